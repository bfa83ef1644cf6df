//! # Onramp - Onboarding Flow Graph & Conditional Routing Engine
//!
//! **Onramp** models multi-step onboarding experiences as directed graphs of
//! content screens and conditional routing blocks, and routes each end user
//! through that graph based on the answers they give along the way.
//!
//! ## Core Workflow
//!
//! 1. **Build the graph**: create a [`Flow`](flow::Flow), insert content
//!    nodes and logic blocks, and wire them with connections. Every edit is
//!    integrity-checked synchronously, so the graph can never reach an
//!    invalid state mid-edit.
//! 2. **Validate**: [`validate`](validate::validate) gates activation.
//!    Dangling references, unreachable nodes, empty branch sets, and plan
//!    quotas are all rejected with typed violations before a user ever sees
//!    the flow.
//! 3. **Go live**: a [`LifecycleManager`](lifecycle::LifecycleManager)
//!    drives the Draft/Live/Archived state machine against a persistence
//!    collaborator, keeping at most one Live flow per owner.
//! 4. **Route**: [`next_step`](routing::next_step) computes each user's next
//!    screen from the live graph and their session, evaluating if-else,
//!    multi-path, score-threshold, and a-b-test blocks along the way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use onramp::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // 1. Build a two-step flow with an if-else branch.
//!     let mut flow = Flow::new("acme", "Developer onboarding");
//!     flow.insert_node(FlowNode::new("welcome", "Welcome").with_content(
//!         ContentBlock::Input {
//!             key: "team_size".to_string(),
//!             label: "How big is your team?".to_string(),
//!         },
//!     ))?;
//!     flow.insert_node(FlowNode::new("solo", "Just you"))?;
//!     flow.insert_node(FlowNode::new("team", "Invite your team"))?;
//!     flow.insert_block(LogicBlock::IfElse {
//!         id: "size-check".to_string(),
//!         condition: Condition::GreaterThan {
//!             key: "team_size".to_string(),
//!             value: 1.0,
//!         },
//!         when_true: Target::Node("team".to_string()),
//!         when_false: Target::Node("solo".to_string()),
//!     })?;
//!     flow.connect("welcome", Target::Block("size-check".to_string()))?;
//!     flow.connect("solo", Target::End)?;
//!     flow.connect("team", Target::End)?;
//!
//!     // 2. Validate against the owner's plan limits.
//!     validate(&flow, Tier::Active.limits())?;
//!
//!     // 3. Route a visitor who answered the first screen.
//!     let mut session = Session::new("visitor-42");
//!     session.answer("team_size", 12.0);
//!     match next_step(&flow, "welcome", &session)? {
//!         NextStep::Node(node) => println!("Show: {}", node.title),
//!         NextStep::End => println!("Flow complete"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod flow;
pub mod lifecycle;
pub mod prelude;
pub mod quota;
pub mod routing;
pub mod session;
pub mod validate;
