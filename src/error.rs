use crate::flow::FlowStatus;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by synchronous edits to a flow's graph.
///
/// These protect the in-memory graph from ever reaching an invalid state
/// mid-edit; persistence never sees a flow that failed one of these checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphEditError {
    #[error("Id '{0}' is already used by another node or logic block in this flow")]
    DuplicateId(String),

    #[error("No node or logic block with id '{0}' exists in this flow")]
    UnknownId(String),

    #[error(
        "Connection from '{from}' points at '{to}', which is not an existing node, logic block, or the end of the flow"
    )]
    UnknownTarget { from: String, to: String },

    #[error("Node '{0}' cannot be its own connection target; it has no decision point to break the loop")]
    SelfLoop(String),

    #[error(
        "'{id}' is still targeted by '{referenced_by}' and cannot be removed until that connection is redirected"
    )]
    ReferentialIntegrity { id: String, referenced_by: String },
}

/// A single structural problem found by the validator.
//
// Display/Error are implemented by hand rather than via `#[derive(Error)]`
// because thiserror treats any field literally named `source` as the error's
// `source()` (which requires `String: Error`); this variant's `source` is a
// node id, not a nested error. The messages below are identical to the
// derived ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    DanglingReference { source: String, target: String },

    SelfLoop(String),

    NoEntryNode,

    UnreachableNode { ids: Vec<String> },

    EmptyBranchSet(String),

    QuotaExceeded { node_count: usize, max_nodes: usize },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::DanglingReference { source, target } => write!(
                f,
                "'{source}' targets '{target}', which does not exist in this flow"
            ),
            Violation::SelfLoop(id) => {
                write!(f, "Node '{id}' is its own connection target")
            }
            Violation::NoEntryNode => write!(f, "Flow has no entry node"),
            Violation::UnreachableNode { ids } => write!(
                f,
                "Nodes unreachable from the entry node: {}",
                ids.join(", ")
            ),
            Violation::EmptyBranchSet(id) => {
                write!(f, "Logic block '{id}' has no branch it could ever select")
            }
            Violation::QuotaExceeded {
                node_count,
                max_nodes,
            } => write!(
                f,
                "Flow has {node_count} nodes, but the current plan allows at most {max_nodes} per flow"
            ),
        }
    }
}

impl std::error::Error for Violation {}

/// The ordered, non-empty list of violations a failed validation produced.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Flow failed validation with {} violation(s)", violations.len())]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

/// Structural defect inside an if-else condition expression.
///
/// These are configuration mistakes, not user-data gaps: a missing response
/// key never raises, it just fails the rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConditionFault {
    #[error("a rule references an empty response key")]
    EmptyKey,

    #[error("an '{0}' group contains no rules")]
    EmptyGroup(&'static str),
}

/// Errors raised while computing the next step of a traversal.
///
/// For a validated live flow none of these should ever fire; the engine
/// still refuses to guess a branch when a defect slips through.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("No node or logic block with id '{0}' exists in this flow")]
    UnknownNode(String),

    #[error("Condition on logic block '{block_id}' is malformed: {fault}")]
    MalformedCondition {
        block_id: String,
        fault: ConditionFault,
    },

    #[error("Logic block '{block_id}' matched no case for '{value}' and declares no default branch")]
    NoDefaultBranch { block_id: String, value: String },

    #[error("Logic block '{0}' has no branch it could select")]
    EmptyBranchSet(String),

    #[error("Traversal exceeded {limit} hops without reaching a content step; the flow's logic blocks form a loop")]
    TraversalLimit { limit: usize },
}

/// Errors surfaced when encoding or decoding a flow document.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("Failed to encode flow document: {0}")]
    Encode(String),

    #[error("Failed to decode flow document: {0}")]
    Decode(String),

    #[error("Could not access flow document file '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors reported by a persistence collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Flow '{0}' was not found in the store")]
    NotFound(Uuid),

    #[error("Conflicting update for flow '{0}'")]
    Conflict(Uuid),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Errors raised by the flow lifecycle manager.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifecycleError {
    #[error("Owner '{owner}' already has {current} open flows of the {max_flows} the current plan allows")]
    QuotaExceeded {
        owner: String,
        current: usize,
        max_flows: usize,
    },

    #[error(transparent)]
    Validation(#[from] ValidationReport),

    #[error("Flow cannot move from {from} to {to}")]
    InvalidTransition { from: FlowStatus, to: FlowStatus },

    #[error(transparent)]
    Store(#[from] StoreError),
}
