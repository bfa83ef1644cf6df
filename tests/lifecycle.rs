//! Tests for the flow lifecycle manager and the reference store.
use onramp::prelude::*;
use std::sync::Arc;

fn manager() -> LifecycleManager<InMemoryFlowStore, InMemoryMembership> {
    LifecycleManager::new(InMemoryFlowStore::new(), InMemoryMembership::new())
}

/// Persists a small valid graph into a flow created by the manager.
async fn fill_and_save(
    mgr: &LifecycleManager<InMemoryFlowStore, InMemoryMembership>,
    mut flow: Flow,
) -> Flow {
    flow.insert_node(FlowNode::new("welcome", "Welcome")).unwrap();
    flow.connect("welcome", Target::End).unwrap();
    mgr.store().save(&flow).await.unwrap();
    flow
}

#[tokio::test]
async fn test_free_tier_flow_quota_enforced() {
    let mgr = manager();
    mgr.create_flow("acme", "First").await.unwrap();

    let err = mgr.create_flow("acme", "Second").await.unwrap_err();
    assert_eq!(
        err,
        LifecycleError::QuotaExceeded {
            owner: "acme".to_string(),
            current: 1,
            max_flows: 1,
        }
    );
}

#[tokio::test]
async fn test_archived_flows_do_not_count_against_quota() {
    let mgr = manager();
    let first = mgr.create_flow("acme", "First").await.unwrap();
    mgr.archive(first.id).await.unwrap();

    assert!(mgr.create_flow("acme", "Second").await.is_ok());
}

#[tokio::test]
async fn test_active_tier_allows_more_flows() {
    let membership = InMemoryMembership::new();
    membership.set_tier("acme", Tier::Active).await;
    let mgr = LifecycleManager::new(InMemoryFlowStore::new(), membership);
    for title in ["First", "Second", "Third"] {
        mgr.create_flow("acme", title).await.unwrap();
    }
    assert!(mgr.create_flow("acme", "Fourth").await.is_err());
}

#[tokio::test]
async fn test_created_flow_starts_as_empty_draft() {
    let mgr = manager();
    let flow = mgr.create_flow("acme", "Fresh").await.unwrap();
    assert_eq!(flow.status, FlowStatus::Draft);
    assert_eq!(flow.node_count(), 0);
    assert_eq!(flow.owner, "acme");
}

#[tokio::test]
async fn test_activate_rejects_invalid_flow_and_keeps_status() {
    let mgr = manager();
    // A freshly created flow has no nodes and cannot go live.
    let flow = mgr.create_flow("acme", "Empty").await.unwrap();
    let err = mgr.activate(flow.id).await.unwrap_err();
    assert_eq!(
        err,
        LifecycleError::Validation(ValidationReport {
            violations: vec![Violation::NoEntryNode],
        })
    );
    let reloaded = mgr.store().load(flow.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, FlowStatus::Draft);
}

#[tokio::test]
async fn test_activate_demotes_previous_live_flow() {
    let membership = InMemoryMembership::new();
    membership.set_tier("acme", Tier::Active).await;
    let mgr = LifecycleManager::new(InMemoryFlowStore::new(), membership);

    let a = fill_and_save(&mgr, mgr.create_flow("acme", "A").await.unwrap()).await;
    let b = fill_and_save(&mgr, mgr.create_flow("acme", "B").await.unwrap()).await;

    let a = mgr.activate(a.id).await.unwrap();
    assert_eq!(a.status, FlowStatus::Live);

    let b = mgr.activate(b.id).await.unwrap();
    assert_eq!(b.status, FlowStatus::Live);

    let statuses: Vec<(String, FlowStatus)> = mgr
        .store()
        .list("acme")
        .await
        .unwrap()
        .into_iter()
        .map(|f| (f.title.clone(), f.status))
        .collect();
    assert!(statuses.contains(&("A".to_string(), FlowStatus::Draft)));
    assert!(statuses.contains(&("B".to_string(), FlowStatus::Live)));
}

#[tokio::test]
async fn test_activation_does_not_touch_other_owners() {
    let membership = InMemoryMembership::new();
    membership.set_tier("acme", Tier::Active).await;
    membership.set_tier("globex", Tier::Active).await;
    let mgr = LifecycleManager::new(InMemoryFlowStore::new(), membership);

    let ours = fill_and_save(&mgr, mgr.create_flow("acme", "Ours").await.unwrap()).await;
    let theirs = fill_and_save(&mgr, mgr.create_flow("globex", "Theirs").await.unwrap()).await;

    mgr.activate(theirs.id).await.unwrap();
    mgr.activate(ours.id).await.unwrap();

    let theirs = mgr.store().load(theirs.id).await.unwrap().unwrap();
    assert_eq!(theirs.status, FlowStatus::Live);
}

#[tokio::test]
async fn test_archived_flow_cannot_be_activated_directly() {
    let mgr = manager();
    let flow = fill_and_save(&mgr, mgr.create_flow("acme", "Old").await.unwrap()).await;
    mgr.archive(flow.id).await.unwrap();

    let err = mgr.activate(flow.id).await.unwrap_err();
    assert_eq!(
        err,
        LifecycleError::InvalidTransition {
            from: FlowStatus::Archived,
            to: FlowStatus::Live,
        }
    );

    // Restoring to draft re-opens the path to live.
    mgr.restore(flow.id).await.unwrap();
    assert!(mgr.activate(flow.id).await.is_ok());
}

#[tokio::test]
async fn test_deactivate_and_restore_transitions() {
    let mgr = manager();
    let flow = fill_and_save(&mgr, mgr.create_flow("acme", "Flow").await.unwrap()).await;

    mgr.activate(flow.id).await.unwrap();
    let flow = mgr.deactivate(flow.id).await.unwrap();
    assert_eq!(flow.status, FlowStatus::Draft);

    // Deactivating a draft is a no-op success.
    assert!(mgr.deactivate(flow.id).await.is_ok());

    // Restore only applies to archived flows.
    let err = mgr.restore(flow.id).await.unwrap_err();
    assert_eq!(
        err,
        LifecycleError::InvalidTransition {
            from: FlowStatus::Draft,
            to: FlowStatus::Draft,
        }
    );

    // Deactivate always succeeds when the flow exists, taking even an
    // archived flow back to Draft.
    mgr.archive(flow.id).await.unwrap();
    let flow = mgr.deactivate(flow.id).await.unwrap();
    assert_eq!(flow.status, FlowStatus::Draft);
}

#[tokio::test]
async fn test_unknown_flow_is_not_found() {
    let mgr = manager();
    let id = uuid::Uuid::new_v4();
    let err = mgr.activate(id).await.unwrap_err();
    assert_eq!(err, LifecycleError::Store(StoreError::NotFound(id)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_activation_leaves_exactly_one_live() {
    let membership = InMemoryMembership::new();
    membership.set_tier("acme", Tier::Active).await;
    let mgr = Arc::new(LifecycleManager::new(InMemoryFlowStore::new(), membership));

    let a = fill_and_save(&mgr, mgr.create_flow("acme", "A").await.unwrap()).await;
    let b = fill_and_save(&mgr, mgr.create_flow("acme", "B").await.unwrap()).await;

    for _ in 0..50 {
        let mgr_a = Arc::clone(&mgr);
        let mgr_b = Arc::clone(&mgr);
        let (id_a, id_b) = (a.id, b.id);
        let (ra, rb) = tokio::join!(
            tokio::spawn(async move { mgr_a.activate(id_a).await }),
            tokio::spawn(async move { mgr_b.activate(id_b).await }),
        );
        ra.unwrap().unwrap();
        rb.unwrap().unwrap();

        let live: Vec<Flow> = mgr
            .store()
            .list("acme")
            .await
            .unwrap()
            .into_iter()
            .filter(|f| f.status == FlowStatus::Live)
            .collect();
        assert_eq!(live.len(), 1, "exactly one flow may be live");
    }
}
