use serde::{Deserialize, Serialize};

/// Subscription tier of a flow owner.
///
/// Membership records are created lazily: an owner the membership
/// collaborator has never seen is `Free` until a payment event upgrades it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Active,
    #[default]
    Free,
}

/// Structural limits granted by a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    pub max_flows: usize,
    pub max_nodes_per_flow: usize,
}

impl Tier {
    /// Pure, total mapping from tier to limits.
    pub const fn limits(self) -> TierLimits {
        match self {
            Tier::Active => TierLimits {
                max_flows: 3,
                max_nodes_per_flow: 30,
            },
            Tier::Free => TierLimits {
                max_flows: 1,
                max_nodes_per_flow: 5,
            },
        }
    }
}
