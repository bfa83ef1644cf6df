use itertools::Itertools;
use std::fmt;

/// One resolved step inside a single routing call.
#[derive(Debug, Clone, PartialEq)]
pub enum Hop {
    /// A content step was reached.
    Node { id: String },
    /// An if-else block evaluated its condition.
    IfElse { id: String, outcome: bool },
    /// A multi-path block matched a case, or fell through to its default.
    MultiPath { id: String, matched: Option<String> },
    /// A score block computed `score` and landed in the `threshold` bucket.
    ScoreThreshold { id: String, score: f64, threshold: f64 },
    /// An a-b split placed the visitor at `point` in `[0, 1)`.
    AbTest { id: String, point: f64 },
    /// The traversal completed.
    End,
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hop::Node { id } => write!(f, "{}", id),
            Hop::IfElse { id, outcome } => write!(f, "{} [condition {}]", id, outcome),
            Hop::MultiPath {
                id,
                matched: Some(value),
            } => write!(f, "{} [case \"{}\"]", id, value),
            Hop::MultiPath { id, matched: None } => write!(f, "{} [default]", id),
            Hop::ScoreThreshold {
                id,
                score,
                threshold,
            } => write!(f, "{} [score {} -> bucket {}]", id, score, threshold),
            Hop::AbTest { id, point } => write!(f, "{} [split {:.3}]", id, point),
            Hop::End => write!(f, "end"),
        }
    }
}

/// The decision record of one routing call, hop by hop.
///
/// Useful for explaining to an operator why a visitor ended up on a given
/// step; the engine itself never consults it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTrace {
    pub hops: Vec<Hop>,
}

impl RouteTrace {
    pub(crate) fn push(&mut self, hop: Hop) {
        self.hops.push(hop);
    }

    /// Renders the trace as a single reason line, e.g.
    /// `welcome -> plan-split [score 7 -> bucket 5] -> pro-pitch`.
    pub fn format(&self) -> String {
        self.hops.iter().map(Hop::to_string).join(" -> ")
    }
}

impl fmt::Display for RouteTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}
