use crate::error::StoreError;
use crate::flow::Flow;
use crate::quota::Tier;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence boundary for flow documents.
///
/// Implementations own durability and, crucially, the transactional
/// single-Live guarantee of [`set_active`](FlowStore::set_active): at no
/// point may a reader observe two Live flows for one owner. Timeouts and
/// retries against the actual backend are the implementation's concern.
#[async_trait]
pub trait FlowStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<Flow>, StoreError>;

    async fn save(&self, flow: &Flow) -> Result<(), StoreError>;

    /// All flows belonging to `owner`, in no particular order.
    async fn list(&self, owner: &str) -> Result<Vec<Flow>, StoreError>;

    /// Atomically promotes `id` to Live and demotes every other Live flow of
    /// `owner` to Draft, as a single transactional unit.
    async fn set_active(&self, id: Uuid, owner: &str) -> Result<(), StoreError>;
}

/// Subscription lookup, fed out-of-band by the payment collaborator.
///
/// Membership records are lazy: an owner the store has never seen is `Free`.
#[async_trait]
pub trait Membership: Send + Sync {
    async fn tier(&self, owner: &str) -> Result<Tier, StoreError>;
}
