//! The conditional-routing engine.
//!
//! `next_step` is a pure computation over (flow, current position, session):
//! it never mutates its inputs and holds no state of its own, so it is safe
//! to call concurrently for any number of end users. The caller persists the
//! new position and the updated response set.

mod condition;
mod split;
mod trace;

pub use trace::{Hop, RouteTrace};

use crate::error::RoutingError;
use crate::flow::{Flow, FlowNode, LogicBlock, Resolved, Target};
use crate::session::Session;
use condition::ConditionEvaluator;

/// Outcome of one routing call: the next content step, or flow completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextStep<'a> {
    Node(&'a FlowNode),
    End,
}

/// Computes the step to present after `current`, given the session's
/// responses so far.
///
/// Logic blocks between `current` and the next content step are evaluated
/// transparently; the result is always a plain node or the end of the flow.
pub fn next_step<'a>(
    flow: &'a Flow,
    current: &str,
    session: &Session,
) -> Result<NextStep<'a>, RoutingError> {
    next_step_traced(flow, current, session).map(|(step, _)| step)
}

/// Same as [`next_step`], also returning the hop-by-hop decision record.
pub fn next_step_traced<'a>(
    flow: &'a Flow,
    current: &str,
    session: &Session,
) -> Result<(NextStep<'a>, RouteTrace), RoutingError> {
    let mut trace = RouteTrace::default();

    let mut pending: Target = match flow.resolve_id(current) {
        Some(Resolved::Node(node)) => {
            trace.push(Hop::Node {
                id: node.id.clone(),
            });
            match node.connections.first() {
                // A node with no outgoing connections is itself a terminal.
                None => {
                    trace.push(Hop::End);
                    return Ok((NextStep::End, trace));
                }
                // Plain nodes never branch; a node with several connections
                // advances along its first edge.
                Some(target) => target.clone(),
            }
        }
        Some(Resolved::Block(block)) => evaluate_block(flow, block, session, &mut trace)?,
        // `resolve_id` only ever yields a node or a block; the `End` sentinel
        // comes from resolving a `Target`, never from a bare id lookup.
        Some(Resolved::End) => unreachable!("resolve_id never yields Resolved::End"),
        None => return Err(RoutingError::UnknownNode(current.to_string())),
    };

    // Bounding the walk to the graph size turns a logic-block cycle that
    // never reaches a content step into a typed failure instead of a hang.
    let limit = flow.graph_len().max(1);
    for _ in 0..limit {
        match flow.resolve(&pending) {
            Some(Resolved::Node(node)) => {
                trace.push(Hop::Node {
                    id: node.id.clone(),
                });
                return Ok((NextStep::Node(node), trace));
            }
            Some(Resolved::End) => {
                trace.push(Hop::End);
                return Ok((NextStep::End, trace));
            }
            Some(Resolved::Block(block)) => {
                pending = evaluate_block(flow, block, session, &mut trace)?;
            }
            None => {
                return Err(RoutingError::UnknownNode(
                    pending.id().unwrap_or_default().to_string(),
                ));
            }
        }
    }
    Err(RoutingError::TraversalLimit { limit })
}

/// Selects exactly one branch of a logic block. Exhaustive over the closed
/// variant set; adding a variant is a compile error here until handled.
fn evaluate_block(
    flow: &Flow,
    block: &LogicBlock,
    session: &Session,
    trace: &mut RouteTrace,
) -> Result<Target, RoutingError> {
    match block {
        LogicBlock::IfElse {
            id,
            condition,
            when_true,
            when_false,
        } => {
            let outcome = ConditionEvaluator::new(&session.responses)
                .eval(condition)
                .map_err(|fault| RoutingError::MalformedCondition {
                    block_id: id.clone(),
                    fault,
                })?;
            trace.push(Hop::IfElse {
                id: id.clone(),
                outcome,
            });
            Ok(if outcome {
                when_true.clone()
            } else {
                when_false.clone()
            })
        }

        LogicBlock::MultiPath {
            id,
            key,
            cases,
            default,
        } => {
            let answer = session.responses.get(key);
            let matched = answer.and_then(|answer| {
                cases.iter().find(|case| answer.matches_text(&case.value))
            });
            match (matched, default) {
                (Some(case), _) => {
                    trace.push(Hop::MultiPath {
                        id: id.clone(),
                        matched: Some(case.value.clone()),
                    });
                    Ok(case.target.clone())
                }
                (None, Some(fallback)) => {
                    trace.push(Hop::MultiPath {
                        id: id.clone(),
                        matched: None,
                    });
                    Ok(fallback.clone())
                }
                // The validator should have caught this; refusing beats
                // silently picking an arbitrary branch.
                (None, None) => Err(RoutingError::NoDefaultBranch {
                    block_id: id.clone(),
                    value: answer.map(ToString::to_string).unwrap_or_default(),
                }),
            }
        }

        LogicBlock::ScoreThreshold {
            id,
            weights,
            buckets,
        } => {
            // Absent response keys contribute zero to the score.
            let score: f64 = weights
                .iter()
                .map(|w| session.responses.number(&w.key).unwrap_or(0.0) * w.weight)
                .sum();
            let chosen = buckets
                .iter()
                .filter(|bucket| bucket.threshold <= score)
                .max_by(|a, b| a.threshold.total_cmp(&b.threshold))
                // Below every threshold: the lowest bucket catches the score.
                .or_else(|| {
                    buckets
                        .iter()
                        .min_by(|a, b| a.threshold.total_cmp(&b.threshold))
                })
                .ok_or_else(|| RoutingError::EmptyBranchSet(id.clone()))?;
            trace.push(Hop::ScoreThreshold {
                id: id.clone(),
                score,
                threshold: chosen.threshold,
            });
            Ok(chosen.target.clone())
        }

        LogicBlock::AbTest { id, arms } => {
            let point = split::split_point(&flow.id, id, &session.visitor);
            let target = split::pick_arm(arms, point)
                .ok_or_else(|| RoutingError::EmptyBranchSet(id.clone()))?
                .clone();
            trace.push(Hop::AbTest {
                id: id.clone(),
                point,
            });
            Ok(target)
        }
    }
}
