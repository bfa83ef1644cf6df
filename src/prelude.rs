//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the onramp crate so callers
//! can bring the whole working surface in with one `use`.
//!
//! # Example
//!
//! ```rust,no_run
//! use onramp::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/flow.json")?;
//! let flow = Flow::from_json(&json)?;
//! validate(&flow, Tier::Active.limits())?;
//!
//! let mut session = Session::new("visitor-1");
//! session.answer("team_size", 12.0);
//! let step = next_step(&flow, "welcome", &session)?;
//! println!("Next step: {:?}", step);
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::flow::{
    CaseArm, Condition, ContentBlock, Flow, FlowNode, FlowStatus, LogicBlock, OwnerId, Resolved,
    ScoreBucket, ScoreWeight, SplitArm, Target,
};

// Validation and routing
pub use crate::routing::{next_step, next_step_traced, Hop, NextStep, RouteTrace};
pub use crate::validate::validate;

// Sessions and quota
pub use crate::quota::{Tier, TierLimits};
pub use crate::session::{ResponseSet, ResponseValue, Session};

// Lifecycle and stores
pub use crate::lifecycle::{
    FlowStore, InMemoryFlowStore, InMemoryMembership, LifecycleManager, Membership,
};

// Error types
pub use crate::error::{
    ConditionFault, DocumentError, GraphEditError, LifecycleError, RoutingError, StoreError,
    ValidationReport, Violation,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
