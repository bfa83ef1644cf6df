//! Tests for synchronous graph edits and their integrity checks.
mod common;
use common::*;
use onramp::prelude::*;

#[test]
fn test_insert_duplicate_id_rejected() {
    let mut flow = two_step_flow();
    let err = flow
        .insert_node(FlowNode::new("welcome", "Again"))
        .unwrap_err();
    assert_eq!(err, GraphEditError::DuplicateId("welcome".to_string()));

    // The namespace is shared between nodes and blocks.
    let err = flow
        .insert_block(LogicBlock::AbTest {
            id: "finish".to_string(),
            arms: vec![],
        })
        .unwrap_err();
    assert_eq!(err, GraphEditError::DuplicateId("finish".to_string()));
}

#[test]
fn test_connect_unknown_target_rejected() {
    let mut flow = two_step_flow();
    let err = flow
        .connect("welcome", Target::Node("missing".to_string()))
        .unwrap_err();
    assert_eq!(
        err,
        GraphEditError::UnknownTarget {
            from: "welcome".to_string(),
            to: "missing".to_string(),
        }
    );
}

#[test]
fn test_connect_from_unknown_node_rejected() {
    let mut flow = two_step_flow();
    let err = flow.connect("missing", Target::End).unwrap_err();
    assert_eq!(err, GraphEditError::UnknownId("missing".to_string()));
}

#[test]
fn test_connect_self_loop_rejected() {
    let mut flow = two_step_flow();
    let err = flow
        .connect("welcome", Target::Node("welcome".to_string()))
        .unwrap_err();
    assert_eq!(err, GraphEditError::SelfLoop("welcome".to_string()));
}

#[test]
fn test_remove_referenced_node_rejected() {
    // Scenario: welcome -> finish, finish -> end. Removing finish while
    // welcome still targets it must fail.
    let mut flow = two_step_flow();
    let err = flow.remove_node("finish").unwrap_err();
    assert_eq!(
        err,
        GraphEditError::ReferentialIntegrity {
            id: "finish".to_string(),
            referenced_by: "welcome".to_string(),
        }
    );
}

#[test]
fn test_remove_unreferenced_node_succeeds() {
    let mut flow = Flow::new("acme", "Redirected");
    flow.insert_node(FlowNode::new("welcome", "Welcome")).unwrap();
    flow.insert_node(FlowNode::new("finish", "All done")).unwrap();
    // welcome goes straight to the end, so finish is free to remove.
    flow.connect("welcome", Target::End).unwrap();
    let removed = flow.remove_node("finish").unwrap();
    assert_eq!(removed.id, "finish");
    assert_eq!(flow.node_count(), 1);
}

#[test]
fn test_remove_block_referenced_by_connection_rejected() {
    let mut flow = if_else_flow();
    let err = flow.remove_block("size-check").unwrap_err();
    assert_eq!(
        err,
        GraphEditError::ReferentialIntegrity {
            id: "size-check".to_string(),
            referenced_by: "welcome".to_string(),
        }
    );
}

#[test]
fn test_remove_unknown_id_rejected() {
    let mut flow = two_step_flow();
    assert_eq!(
        flow.remove_node("ghost").unwrap_err(),
        GraphEditError::UnknownId("ghost".to_string())
    );
    assert_eq!(
        flow.remove_block("ghost").unwrap_err(),
        GraphEditError::UnknownId("ghost".to_string())
    );
}

#[test]
fn test_entry_node_defaults_to_first_inserted() {
    let flow = two_step_flow();
    assert_eq!(flow.entry_node().unwrap().id, "welcome");
}

#[test]
fn test_designated_entry_overrides_declaration_order() {
    let mut flow = two_step_flow();
    flow.entry = Some("finish".to_string());
    assert_eq!(flow.entry_node().unwrap().id, "finish");
}

#[test]
fn test_remove_preserves_declaration_order() {
    let mut flow = Flow::new("acme", "Ordered");
    for id in ["a", "b", "c"] {
        flow.insert_node(FlowNode::new(id, id)).unwrap();
    }
    flow.remove_node("b").unwrap();
    let order: Vec<&str> = flow.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(order, vec!["a", "c"]);
}
