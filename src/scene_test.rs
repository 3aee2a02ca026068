use super::*;
use crate::vector::Vector2;

fn node() -> SceneNode {
    SceneNode::group(Vector2::ZERO, Vector2::new(10.0, 10.0))
}

#[test]
fn new_scene_is_empty() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
    assert_eq!(scene.node_count(), 0);
}

#[test]
fn add_preserves_insertion_order() {
    let mut scene = Scene::new();
    let a = scene.add(node());
    let b = scene.add(node());
    let c = scene.add(node());
    let order: Vec<NodeId> = scene.iter().map(SceneNode::id).collect();
    assert_eq!(order, vec![a, b, c]);
}

#[test]
fn get_finds_descendants() {
    let mut scene = Scene::new();
    let child = node();
    let cid = child.id();
    scene.add(node().with_child(child));
    assert!(scene.contains(cid));
    assert_eq!(scene.get(cid).map(SceneNode::id), Some(cid));
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.node_count(), 2);
}

#[test]
fn get_mut_allows_moving_a_node() {
    let mut scene = Scene::new();
    let id = scene.add(node());
    if let Some(n) = scene.get_mut(id) {
        n.set_pos(Vector2::new(3.0, 4.0));
    }
    assert_eq!(scene.get(id).map(SceneNode::pos), Some(Vector2::new(3.0, 4.0)));
}

#[test]
fn remove_root_keeps_others_in_order() {
    let mut scene = Scene::new();
    let a = scene.add(node());
    let b = scene.add(node());
    let c = scene.add(node());
    assert!(scene.remove(b).is_some());
    let order: Vec<NodeId> = scene.iter().map(SceneNode::id).collect();
    assert_eq!(order, vec![a, c]);
    assert!(!scene.contains(b));
}

#[test]
fn remove_descendant() {
    let mut scene = Scene::new();
    let child = node();
    let cid = child.id();
    let root = scene.add(node().with_child(child));
    assert!(scene.remove(cid).is_some());
    assert!(scene.contains(root));
    assert!(!scene.contains(cid));
}

#[test]
fn remove_unknown_is_none() {
    let mut scene = Scene::new();
    scene.add(node());
    assert!(scene.remove(uuid::Uuid::new_v4()).is_none());
    assert_eq!(scene.len(), 1);
}

#[test]
fn clear_drops_everything() {
    let mut scene = Scene::new();
    scene.add(node());
    scene.add(node());
    scene.clear();
    assert!(scene.is_empty());
}
