use super::store::{FlowStore, Membership};
use crate::error::StoreError;
use crate::flow::{Flow, FlowStatus};
use crate::quota::Tier;
use ahash::AHashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory reference store, used by the tests and the CLI.
///
/// `set_active` holds a single write guard across the demote-all-others and
/// promote steps, which makes concurrent activations for one owner
/// linearizable, the same contract a SQL-backed implementation would get
/// from a transaction.
#[derive(Default)]
pub struct InMemoryFlowStore {
    flows: RwLock<AHashMap<Uuid, Flow>>,
}

impl InMemoryFlowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlowStore for InMemoryFlowStore {
    async fn load(&self, id: Uuid) -> Result<Option<Flow>, StoreError> {
        Ok(self.flows.read().await.get(&id).cloned())
    }

    async fn save(&self, flow: &Flow) -> Result<(), StoreError> {
        self.flows.write().await.insert(flow.id, flow.clone());
        Ok(())
    }

    async fn list(&self, owner: &str) -> Result<Vec<Flow>, StoreError> {
        Ok(self
            .flows
            .read()
            .await
            .values()
            .filter(|flow| flow.owner == owner)
            .cloned()
            .collect())
    }

    async fn set_active(&self, id: Uuid, owner: &str) -> Result<(), StoreError> {
        let mut flows = self.flows.write().await;
        match flows.get(&id) {
            None => return Err(StoreError::NotFound(id)),
            Some(flow) if flow.owner != owner => return Err(StoreError::Conflict(id)),
            Some(_) => {}
        }
        for flow in flows.values_mut() {
            if flow.owner == owner && flow.status == FlowStatus::Live {
                flow.status = FlowStatus::Draft;
            }
        }
        if let Some(flow) = flows.get_mut(&id) {
            flow.status = FlowStatus::Live;
        }
        Ok(())
    }
}

/// In-memory membership table; owners default to `Free` until upgraded.
#[derive(Default)]
pub struct InMemoryMembership {
    tiers: RwLock<AHashMap<String, Tier>>,
}

impl InMemoryMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a tier change, as the payment collaborator would.
    pub async fn set_tier(&self, owner: impl Into<String>, tier: Tier) {
        self.tiers.write().await.insert(owner.into(), tier);
    }
}

#[async_trait]
impl Membership for InMemoryMembership {
    async fn tier(&self, owner: &str) -> Result<Tier, StoreError> {
        Ok(self
            .tiers
            .read()
            .await
            .get(owner)
            .copied()
            .unwrap_or_default())
    }
}
