use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Index of a node inside its [`DomTree`].
pub type NodeId = usize;

/// Element descriptor as produced by the page's element-tree extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomElementNode {
    pub tag_name: String,
    /// Path-style locator (XPath) identifying this node in the live page.
    pub xpath: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_interactive: bool,
    /// Not occluded by another element at its own center.
    #[serde(default)]
    pub is_top_element: bool,
    /// Index shown to the orchestrator for interactive elements.
    #[serde(default)]
    pub highlight_index: Option<usize>,
    #[serde(skip)]
    pub parent: Option<NodeId>,
    #[serde(skip)]
    pub children: Vec<NodeId>,
}

impl DomElementNode {
    pub fn new(tag_name: impl Into<String>, xpath: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            xpath: xpath.into(),
            attributes: HashMap::new(),
            is_visible: true,
            is_interactive: false,
            is_top_element: true,
            highlight_index: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn interactive(mut self, highlight_index: usize) -> Self {
        self.is_interactive = true;
        self.highlight_index = Some(highlight_index);
        self
    }

    pub fn occluded(mut self) -> Self {
        self.is_top_element = false;
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Arena holding an element tree with parent/child links.
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<DomElementNode>,
}

impl DomTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` under `parent` (or as a root) and returns its id.
    pub fn insert(&mut self, parent: Option<NodeId>, mut node: DomElementNode) -> NodeId {
        let id = self.nodes.len();
        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            p.children.push(id);
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&DomElementNode> {
        self.nodes.get(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<&DomElementNode> {
        self.get(id)?.parent.and_then(|p| self.get(p))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &DomElementNode> {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |c| self.get(*c))
    }

    /// Ids from `id`'s parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(|n| n.parent);
        while let Some(p) = current {
            chain.push(p);
            current = self.get(p).and_then(|n| n.parent);
        }
        chain
    }

    /// Highlight index → node id for every interactive node.
    pub fn selector_map(&self) -> HashMap<usize, NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(id, n)| n.highlight_index.map(|h| (h, id)))
            .collect()
    }

    pub fn by_highlight_index(&self, index: usize) -> Option<&DomElementNode> {
        self.nodes.iter().find(|n| n.highlight_index == Some(index))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
