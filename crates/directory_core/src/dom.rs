//! In-memory render target: an arena of element and text nodes addressed by [`NodeId`].
//!
//! Replacing a subtree (`clear_children`, `remove`) frees the old nodes and their slots are
//! reused by later nodes. Every slot carries a generation, so a `NodeId` kept past removal
//! resolves to nothing instead of aliasing the slot's new occupant.

use std::{collections::BTreeMap, fmt::Write as _};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Handle to the root node of a mounted component.
pub type Fragment = NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Activate,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: NodeId,
}

impl DomEvent {
    pub fn activate(target: NodeId) -> Self {
        Self {
            kind: EventKind::Activate,
            target,
        }
    }

    pub fn input(target: NodeId) -> Self {
        Self {
            kind: EventKind::Input,
            target,
        }
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        classes: Vec<String>,
        attributes: BTreeMap<String, String>,
        value: String,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

const VOID_TAGS: &[&str] = &["input", "img", "br", "hr"];

#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut document = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        document.root = document.create_element("body");
        document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            value: String::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Element with optional text content and a list of classes.
    pub fn elt(&mut self, tag: &str, text: &str, classes: &[&str]) -> NodeId {
        let element = self.create_element(tag);
        for class in classes {
            self.add_class(element, class);
        }
        if !text.is_empty() {
            let text = self.create_text(text);
            self.append(element, text);
        }
        element
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Moves `child` under `parent`, detaching it from any previous parent. Ignored when
    /// either handle is stale or `child` is an ancestor of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if !self.is_live(parent) || !self.is_live(child) || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn append_all(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        for child in children {
            self.append(parent, child);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let previous = self.node_mut(child).and_then(|node| node.parent.take());
        if let Some(node) = previous.and_then(|previous| self.node_mut(previous)) {
            node.children.retain(|node| *node != child);
        }
    }

    /// Removes every child of `node` and frees their subtrees.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = self
            .node_mut(node)
            .map(|node| std::mem::take(&mut node.children))
            .unwrap_or_default();
        for child in children {
            self.free_subtree(child);
        }
    }

    /// Detaches `node` and frees it with all its descendants. The root is only cleared.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root {
            self.clear_children(node);
            return;
        }
        self.detach(node);
        self.free_subtree(node);
    }

    fn free_subtree(&mut self, node: NodeId) {
        for current in self.descendants(node) {
            let slot = &mut self.slots[current.index];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|node| node.parent)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(Node {
            kind: NodeKind::Element { classes, .. },
            ..
        }) = self.node_mut(node)
        {
            if !classes.iter().any(|existing| existing == class) {
                classes.push(class.to_string());
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        matches!(
            self.node(node),
            Some(Node {
                kind: NodeKind::Element { classes, .. },
                ..
            }) if classes.iter().any(|existing| existing == class)
        )
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(Node {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.node_mut(node)
        {
            attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    /// Live value of a form control, distinct from its markup attributes.
    pub fn set_value(&mut self, node: NodeId, new_value: impl Into<String>) {
        if let Some(Node {
            kind: NodeKind::Element { value, .. },
            ..
        }) = self.node_mut(node)
        {
            *value = new_value.into();
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        match self.node(node).map(|node| &node.kind) {
            Some(NodeKind::Element { value, .. }) => value,
            _ => "",
        }
    }

    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = Some(node).filter(|node| self.is_live(*node));
        std::iter::successors(start, move |current| self.parent(*current))
    }

    /// Nearest node, starting at `node` itself, carrying attribute `name`.
    pub fn closest_with_attribute(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.ancestors(node)
            .find(|candidate| self.attribute(*candidate, name).is_some())
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|candidate| candidate == ancestor)
    }

    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(entry) = self.node(current) else {
                continue;
            };
            found.push(current);
            stack.extend(entry.children.iter().rev().copied());
        }
        found
    }

    pub fn find_by_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|candidate| self.has_class(*candidate, class))
            .collect()
    }

    pub fn first_by_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|candidate| self.has_class(*candidate, class))
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for current in self.descendants(node) {
            if let Some(Node {
                kind: NodeKind::Text(text),
                ..
            }) = self.node(current)
            {
                out.push_str(text);
            }
        }
        out
    }

    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(entry) = self.node(node) else {
            return;
        };
        match &entry.kind {
            NodeKind::Text(text) => out.push_str(&escape(text)),
            NodeKind::Element {
                tag,
                classes,
                attributes,
                ..
            } => {
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape(&classes.join(" ")));
                }
                for (name, value) in attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) {
                    return;
                }
                for child in &entry.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/dom_tests.rs"]
mod tests;
