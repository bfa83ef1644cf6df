pub mod document;
pub mod logic;
pub mod model;
pub mod node;

pub use logic::*;
pub use model::*;
pub use node::*;
