//! Structural validation run before a flow may go live.
//!
//! Violations are grouped into classes (edge integrity, reachability,
//! branch sets, node quota) checked in a fixed order, short-circuiting on
//! the first failing class but collecting every violation within it, so the
//! builder UI can show all problems of one kind at once.

use crate::error::{ValidationReport, Violation};
use crate::flow::{Flow, Target};
use crate::quota::TierLimits;
use ahash::AHashSet;
use itertools::Itertools;
use std::collections::VecDeque;

/// Checks a flow's structural well-formedness. Never mutates; returns
/// either success or the non-empty, ordered violation list of the first
/// failing class.
pub fn validate(flow: &Flow, limits: TierLimits) -> Result<(), ValidationReport> {
    for check in [edge_integrity, reachability, branch_sets] {
        let violations = check(flow);
        if !violations.is_empty() {
            return Err(ValidationReport { violations });
        }
    }
    let violations = quota(flow, limits);
    if !violations.is_empty() {
        return Err(ValidationReport { violations });
    }
    Ok(())
}

/// Class 1: every connection and branch resolves, and no node targets
/// itself. Logic-block cycles are legal; a plain node looping onto itself is
/// not, because the node has no decision point to ever break out.
fn edge_integrity(flow: &Flow) -> Vec<Violation> {
    let mut violations = Vec::new();
    for node in flow.nodes() {
        for target in &node.connections {
            if matches!(target, Target::Node(to) if *to == node.id) {
                violations.push(Violation::SelfLoop(node.id.clone()));
            } else if !flow.is_valid_target(target) {
                violations.push(Violation::DanglingReference {
                    source: node.id.clone(),
                    target: target.to_string(),
                });
            }
        }
    }
    for block in flow.blocks() {
        for target in block.branch_targets() {
            if !flow.is_valid_target(target) {
                violations.push(Violation::DanglingReference {
                    source: block.id().to_string(),
                    target: target.to_string(),
                });
            }
        }
    }
    violations
}

/// Class 2: every node is reachable from the entry node. An unreachable
/// node is a step no user could ever see, which is a defect rather than
/// something to silently ignore.
fn reachability(flow: &Flow) -> Vec<Violation> {
    let Some(entry) = flow.entry_node() else {
        return vec![Violation::NoEntryNode];
    };

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut queue: VecDeque<&Target> = VecDeque::new();
    seen.insert(entry.id.as_str());
    queue.extend(entry.connections.iter());

    while let Some(target) = queue.pop_front() {
        let Some(id) = target.id() else { continue };
        if !seen.insert(id) {
            continue;
        }
        if let Some(node) = flow.node(id) {
            queue.extend(node.connections.iter());
        } else if let Some(block) = flow.block(id) {
            queue.extend(block.branch_targets());
        }
    }

    let unreachable: Vec<String> = flow
        .nodes()
        .filter(|node| !seen.contains(node.id.as_str()))
        .map(|node| node.id.clone())
        .sorted()
        .collect();
    if unreachable.is_empty() {
        Vec::new()
    } else {
        vec![Violation::UnreachableNode { ids: unreachable }]
    }
}

/// Class 3: no logic block may be unable to select a branch.
fn branch_sets(flow: &Flow) -> Vec<Violation> {
    flow.blocks()
        .filter(|block| block.is_branchless())
        .map(|block| Violation::EmptyBranchSet(block.id().to_string()))
        .collect()
}

/// Class 4: the node count stays within the owner's plan.
fn quota(flow: &Flow, limits: TierLimits) -> Vec<Violation> {
    if flow.node_count() > limits.max_nodes_per_flow {
        vec![Violation::QuotaExceeded {
            node_count: flow.node_count(),
            max_nodes: limits.max_nodes_per_flow,
        }]
    } else {
        Vec::new()
    }
}
