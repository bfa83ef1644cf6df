use super::logic::LogicBlock;
use super::node::FlowNode;
use crate::error::GraphEditError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The operator account a flow belongs to.
pub type OwnerId = String;

/// Where a connection or branch leads: another node, a logic block, or the
/// end of the flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Node(String),
    Block(String),
    End,
}

impl Target {
    /// The referenced id, if this target is not the end sentinel.
    pub fn id(&self) -> Option<&str> {
        match self {
            Target::Node(id) | Target::Block(id) => Some(id),
            Target::End => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Node(id) | Target::Block(id) => write!(f, "{}", id),
            Target::End => write!(f, "end"),
        }
    }
}

/// A target resolved against the flow's id maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Node(&'a FlowNode),
    Block(&'a LogicBlock),
    End,
}

/// Lifecycle status of a flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    #[default]
    Draft,
    Live,
    Archived,
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStatus::Draft => write!(f, "draft"),
            FlowStatus::Live => write!(f, "live"),
            FlowStatus::Archived => write!(f, "archived"),
        }
    }
}

/// An onboarding flow: the aggregate root owning its nodes and logic blocks.
///
/// The graph is stored as flat, insertion-ordered id maps and every edge is
/// an id lookup, which keeps logic-block cycles plain data instead of cyclic
/// ownership. The first inserted node is the entry point unless `entry`
/// designates another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: Uuid,
    pub owner: OwnerId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: FlowStatus,
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    nodes: IndexMap<String, FlowNode>,
    #[serde(default)]
    blocks: IndexMap<String, LogicBlock>,
}

impl Flow {
    /// Creates an empty draft flow for `owner`.
    pub fn new(owner: impl Into<OwnerId>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            title: title.into(),
            created_at: Utc::now(),
            status: FlowStatus::Draft,
            entry: None,
            icon: None,
            nodes: IndexMap::new(),
            blocks: IndexMap::new(),
        }
    }

    // --- Lookups ---

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.get(id)
    }

    pub fn block(&self, id: &str) -> Option<&LogicBlock> {
        self.blocks.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.nodes.values()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &LogicBlock> {
        self.blocks.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total node + block count, the hop bound for a single routing call.
    pub fn graph_len(&self) -> usize {
        self.nodes.len() + self.blocks.len()
    }

    /// The node a traversal starts at: the designated entry if set and
    /// present, otherwise the first node in declaration order.
    pub fn entry_node(&self) -> Option<&FlowNode> {
        self.entry
            .as_deref()
            .and_then(|id| self.nodes.get(id))
            .or_else(|| self.nodes.values().next())
    }

    fn contains_id(&self, id: &str) -> bool {
        self.nodes.contains_key(id) || self.blocks.contains_key(id)
    }

    /// True when the target resolves to an existing node, block, or the end
    /// sentinel.
    pub fn is_valid_target(&self, target: &Target) -> bool {
        match target {
            Target::Node(id) => self.nodes.contains_key(id),
            Target::Block(id) => self.blocks.contains_key(id),
            Target::End => true,
        }
    }

    /// Resolves a target; `None` means a dangling reference.
    pub fn resolve(&self, target: &Target) -> Option<Resolved<'_>> {
        match target {
            Target::Node(id) => self.nodes.get(id).map(Resolved::Node),
            Target::Block(id) => self.blocks.get(id).map(Resolved::Block),
            Target::End => Some(Resolved::End),
        }
    }

    /// Resolves a bare id to the node or block carrying it.
    pub fn resolve_id(&self, id: &str) -> Option<Resolved<'_>> {
        self.nodes
            .get(id)
            .map(Resolved::Node)
            .or_else(|| self.blocks.get(id).map(Resolved::Block))
    }

    // --- Graph edits ---
    //
    // All edits are synchronous and in-memory; persisting the result is the
    // lifecycle manager's concern.

    /// Adds a content node. Any connections the node already carries must
    /// resolve within the flow.
    pub fn insert_node(&mut self, node: FlowNode) -> Result<(), GraphEditError> {
        if self.contains_id(&node.id) {
            return Err(GraphEditError::DuplicateId(node.id));
        }
        for target in &node.connections {
            if let Target::Node(to) = target {
                if *to == node.id {
                    return Err(GraphEditError::SelfLoop(node.id.clone()));
                }
            }
            if !self.is_valid_target(target) {
                return Err(GraphEditError::UnknownTarget {
                    from: node.id.clone(),
                    to: target.to_string(),
                });
            }
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Adds a logic block. Branch targets are not checked here: blocks may
    /// reference each other cyclically, so forward references are legal and
    /// the validator settles them before activation.
    pub fn insert_block(&mut self, block: LogicBlock) -> Result<(), GraphEditError> {
        if self.contains_id(block.id()) {
            return Err(GraphEditError::DuplicateId(block.id().to_string()));
        }
        self.blocks.insert(block.id().to_string(), block);
        Ok(())
    }

    /// Appends an outgoing connection to a node.
    pub fn connect(&mut self, from: &str, target: Target) -> Result<(), GraphEditError> {
        if matches!(&target, Target::Node(to) if to == from) {
            return Err(GraphEditError::SelfLoop(from.to_string()));
        }
        if !self.is_valid_target(&target) {
            return Err(GraphEditError::UnknownTarget {
                from: from.to_string(),
                to: target.to_string(),
            });
        }
        let node = self
            .nodes
            .get_mut(from)
            .ok_or_else(|| GraphEditError::UnknownId(from.to_string()))?;
        node.connections.push(target);
        Ok(())
    }

    /// Removes a node, refusing while anything still targets it. Callers
    /// must first redirect or drop the referencing connections.
    pub fn remove_node(&mut self, id: &str) -> Result<FlowNode, GraphEditError> {
        if !self.nodes.contains_key(id) {
            return Err(GraphEditError::UnknownId(id.to_string()));
        }
        if let Some(referenced_by) = self.referencing(&Target::Node(id.to_string())) {
            return Err(GraphEditError::ReferentialIntegrity {
                id: id.to_string(),
                referenced_by,
            });
        }
        // shift_remove keeps the declaration order of the remaining nodes.
        self.nodes
            .shift_remove(id)
            .ok_or_else(|| GraphEditError::UnknownId(id.to_string()))
    }

    /// Removes a logic block, with the same integrity check as nodes.
    pub fn remove_block(&mut self, id: &str) -> Result<LogicBlock, GraphEditError> {
        if !self.blocks.contains_key(id) {
            return Err(GraphEditError::UnknownId(id.to_string()));
        }
        if let Some(referenced_by) = self.referencing(&Target::Block(id.to_string())) {
            return Err(GraphEditError::ReferentialIntegrity {
                id: id.to_string(),
                referenced_by,
            });
        }
        self.blocks
            .shift_remove(id)
            .ok_or_else(|| GraphEditError::UnknownId(id.to_string()))
    }

    /// Id of the first node or block still targeting `target`, if any.
    fn referencing(&self, target: &Target) -> Option<String> {
        for node in self.nodes.values() {
            if node.connections.contains(target) {
                return Some(node.id.clone());
            }
        }
        for block in self.blocks.values() {
            if block.branch_targets().contains(&target) {
                return Some(block.id().to_string());
            }
        }
        None
    }
}
