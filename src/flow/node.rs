use super::Target;
use serde::{Deserialize, Serialize};

/// A piece of renderable content inside a flow node.
///
/// Rendering itself is out of scope; the engine only cares that `Input`
/// blocks declare the response key their answer is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentBlock {
    Heading { text: String },
    Paragraph { text: String },
    Media { url: String },
    Input { key: String, label: String },
}

/// A content step presented to the end user.
///
/// Plain nodes never branch: a node with several connections is routed
/// through its first edge, and anything conditional belongs to a logic
/// block. A node with no connections is a terminal step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub connections: Vec<Target>,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn with_content(mut self, block: ContentBlock) -> Self {
        self.content.push(block);
        self
    }

    /// Response keys collected by this node's input blocks, in display order.
    pub fn response_keys(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::Input { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }
}
