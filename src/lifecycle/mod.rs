//! Flow lifecycle orchestration: creation, status transitions, activation.
//!
//! The manager composes the quota policy, the validator, and the
//! persistence collaborator. It applies no partial state: a failed store
//! call leaves every flow exactly as it was.
//!
//! Status state machine: `Draft ⇄ Live`, `Draft → Archived`,
//! `Live → Archived`, `Archived → Draft` (restore). Initial state is Draft;
//! an archived flow must be restored to Draft before it can go live again.

mod memory;
mod store;

pub use memory::{InMemoryFlowStore, InMemoryMembership};
pub use store::{FlowStore, Membership};

use crate::error::{LifecycleError, StoreError};
use crate::flow::{Flow, FlowStatus};
use crate::validate::validate;
use tracing::{info, warn};
use uuid::Uuid;

/// Orchestrates flow creation and status transitions for one store and one
/// membership source.
pub struct LifecycleManager<S, M> {
    store: S,
    membership: M,
}

impl<S: FlowStore, M: Membership> LifecycleManager<S, M> {
    pub fn new(store: S, membership: M) -> Self {
        Self { store, membership }
    }

    /// The underlying store, for callers that also read flows directly.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates an empty draft flow, rejecting when the owner is already at
    /// the plan's flow limit. Archived flows do not count against the limit.
    pub async fn create_flow(&self, owner: &str, title: &str) -> Result<Flow, LifecycleError> {
        let limits = self.membership.tier(owner).await?.limits();
        let open = self
            .store
            .list(owner)
            .await?
            .iter()
            .filter(|flow| flow.status != FlowStatus::Archived)
            .count();
        if open >= limits.max_flows {
            warn!(owner, open, max_flows = limits.max_flows, "flow quota reached");
            return Err(LifecycleError::QuotaExceeded {
                owner: owner.to_string(),
                current: open,
                max_flows: limits.max_flows,
            });
        }
        let flow = Flow::new(owner, title);
        self.store.save(&flow).await?;
        info!(flow = %flow.id, owner, "created draft flow");
        Ok(flow)
    }

    /// Validates the flow and, on success, makes it the owner's single Live
    /// flow; any other Live flow of the owner is demoted to Draft in the
    /// same transactional step. Validation failure returns the full
    /// violation list and changes nothing.
    pub async fn activate(&self, id: Uuid) -> Result<Flow, LifecycleError> {
        let flow = self.load(id).await?;
        if flow.status == FlowStatus::Archived {
            return Err(LifecycleError::InvalidTransition {
                from: FlowStatus::Archived,
                to: FlowStatus::Live,
            });
        }
        let limits = self.membership.tier(&flow.owner).await?.limits();
        validate(&flow, limits).map_err(|report| {
            warn!(
                flow = %id,
                violations = report.violations.len(),
                "activation rejected by validation"
            );
            LifecycleError::Validation(report)
        })?;
        self.store.set_active(id, &flow.owner).await?;
        info!(flow = %id, owner = %flow.owner, "flow is live");
        self.load(id).await
    }

    /// Takes the flow back to Draft. Always succeeds when the flow exists;
    /// a flow already in Draft is a no-op success.
    pub async fn deactivate(&self, id: Uuid) -> Result<Flow, LifecycleError> {
        self.transition(id, FlowStatus::Draft, |_| true).await
    }

    /// Archives a Draft or Live flow; archiving a Live flow implicitly
    /// deactivates it. Idempotent on already-archived flows.
    pub async fn archive(&self, id: Uuid) -> Result<Flow, LifecycleError> {
        self.transition(id, FlowStatus::Archived, |_| true).await
    }

    /// Restores an archived flow to Draft, from where it may be activated
    /// again.
    pub async fn restore(&self, id: Uuid) -> Result<Flow, LifecycleError> {
        self.transition(id, FlowStatus::Draft, |from| from == FlowStatus::Archived)
            .await
    }

    async fn transition(
        &self,
        id: Uuid,
        to: FlowStatus,
        allowed: impl Fn(FlowStatus) -> bool,
    ) -> Result<Flow, LifecycleError> {
        let mut flow = self.load(id).await?;
        if !allowed(flow.status) {
            return Err(LifecycleError::InvalidTransition {
                from: flow.status,
                to,
            });
        }
        if flow.status != to {
            flow.status = to;
            self.store.save(&flow).await?;
            info!(flow = %id, status = %to, "flow status changed");
        }
        Ok(flow)
    }

    async fn load(&self, id: Uuid) -> Result<Flow, LifecycleError> {
        self.store
            .load(id)
            .await?
            .ok_or(LifecycleError::Store(StoreError::NotFound(id)))
    }
}
