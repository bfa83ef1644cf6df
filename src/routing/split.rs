use crate::flow::{SplitArm, Target};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Maps (flow, block, visitor) to a stable point in `[0, 1)`.
///
/// SHA-256 keeps the split independent of process, platform, and hasher
/// seeding, so the same visitor lands in the same arm on every visit.
pub(crate) fn split_point(flow_id: &Uuid, block_id: &str, visitor: &str) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(flow_id.as_bytes());
    // NUL separators keep (block, visitor) pairs from colliding by
    // concatenation.
    hasher.update([0u8]);
    hasher.update(block_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(visitor.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    // u64::MAX as f64 + 1.0 is exactly 2^64, so the result stays below 1.
    u64::from_be_bytes(prefix) as f64 / (u64::MAX as f64 + 1.0)
}

/// Selects the arm whose cumulative weight interval contains `point`,
/// arms taken in declared order. `None` when the total weight is zero.
pub(crate) fn pick_arm(arms: &[SplitArm], point: f64) -> Option<&Target> {
    let total: u64 = arms.iter().map(|arm| u64::from(arm.weight)).sum();
    if total == 0 {
        return None;
    }
    let scaled = point * total as f64;
    let mut cumulative = 0u64;
    for arm in arms {
        cumulative += u64::from(arm.weight);
        if scaled < cumulative as f64 {
            return Some(&arm.target);
        }
    }
    // Floating-point rounding can land exactly on the upper bound; the last
    // weighted arm owns that edge.
    arms.iter()
        .rev()
        .find(|arm| arm.weight > 0)
        .map(|arm| &arm.target)
}
