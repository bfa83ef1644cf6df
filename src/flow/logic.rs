use super::Target;
use crate::session::ResponseValue;
use serde::{Deserialize, Serialize};

/// Boolean rule evaluated by an `IfElse` block against the response set.
///
/// The rule language is a closed expression tree: comparisons over single
/// response keys, combined with `All`/`Any`/`Not`. A rule that references a
/// response key the user never answered is simply not met; traversal must
/// stay resolvable even when an upstream form omitted a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The key has any answer at all.
    Answered { key: String },
    Equals { key: String, value: ResponseValue },
    NotEquals { key: String, value: ResponseValue },
    GreaterThan { key: String, value: f64 },
    LessThan { key: String, value: f64 },
    All { rules: Vec<Condition> },
    Any { rules: Vec<Condition> },
    Not { rule: Box<Condition> },
}

/// One declared case of a `MultiPath` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseArm {
    pub value: String,
    pub target: Target,
}

/// Weighted contribution of one response key to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeight {
    pub key: String,
    pub weight: f64,
}

/// One threshold bucket of a `ScoreThreshold` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub threshold: f64,
    pub target: Target,
}

/// One weighted arm of an `AbTest` split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitArm {
    pub weight: u32,
    pub target: Target,
}

/// A routing decision point.
///
/// The four variants are a deliberately closed set: the routing engine is an
/// exhaustive match over exactly these cases, and adding a variant is a
/// reviewed extension of both this enum and the engine, not runtime
/// polymorphism. Exactly one branch is selected per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogicBlock {
    IfElse {
        id: String,
        condition: Condition,
        when_true: Target,
        when_false: Target,
    },
    MultiPath {
        id: String,
        /// Response key whose answer is matched against the case values.
        key: String,
        cases: Vec<CaseArm>,
        #[serde(default)]
        default: Option<Target>,
    },
    ScoreThreshold {
        id: String,
        weights: Vec<ScoreWeight>,
        /// Buckets ascending by threshold; the greatest threshold the score
        /// meets wins, and a score below every threshold takes the lowest.
        buckets: Vec<ScoreBucket>,
    },
    #[serde(rename = "a-b-test")]
    AbTest {
        id: String,
        /// Arms in declared order; selection is a stable hash of
        /// (flow, block, visitor) into the cumulative weight intervals.
        arms: Vec<SplitArm>,
    },
}

impl LogicBlock {
    pub fn id(&self) -> &str {
        match self {
            LogicBlock::IfElse { id, .. }
            | LogicBlock::MultiPath { id, .. }
            | LogicBlock::ScoreThreshold { id, .. }
            | LogicBlock::AbTest { id, .. } => id,
        }
    }

    /// Every branch target this block could select, in declared order.
    pub fn branch_targets(&self) -> Vec<&Target> {
        match self {
            LogicBlock::IfElse {
                when_true,
                when_false,
                ..
            } => vec![when_true, when_false],
            LogicBlock::MultiPath { cases, default, .. } => cases
                .iter()
                .map(|case| &case.target)
                .chain(default.iter())
                .collect(),
            LogicBlock::ScoreThreshold { buckets, .. } => {
                buckets.iter().map(|bucket| &bucket.target).collect()
            }
            LogicBlock::AbTest { arms, .. } => arms.iter().map(|arm| &arm.target).collect(),
        }
    }

    /// True when evaluation could never select a branch: no targets at all,
    /// or an a-b split whose arms carry zero total weight.
    pub fn is_branchless(&self) -> bool {
        match self {
            LogicBlock::AbTest { arms, .. } => {
                arms.is_empty() || arms.iter().all(|arm| arm.weight == 0)
            }
            other => other.branch_targets().is_empty(),
        }
    }
}
