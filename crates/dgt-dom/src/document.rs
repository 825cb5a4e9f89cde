//! Document - arena-backed element tree

use crate::{DOMTokenList, DomError, NamedNodeMap, NodeId, Selector};

/// Element data: tag, attributes and class list
#[derive(Debug, Clone)]
pub struct Element {
    tag_name: String,
    attributes: NamedNodeMap,
    class_list: DOMTokenList,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: NamedNodeMap::new(),
            class_list: DOMTokenList::new(),
        }
    }

    /// Lowercase tag name
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attributes(&self) -> &NamedNodeMap {
        &self.attributes
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get_attribute(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has_attribute(name)
    }

    /// Set an attribute. Setting `class` replaces the class list.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case("class") {
            self.class_list = DOMTokenList::from_string(value);
        }
        self.attributes.set_attribute(name, value);
    }

    pub fn remove_attribute(&mut self, name: &str) -> bool {
        if name.eq_ignore_ascii_case("class") {
            self.class_list = DOMTokenList::new();
        }
        self.attributes.remove_attribute(name).is_some()
    }

    pub fn class_list(&self) -> &DOMTokenList {
        &self.class_list
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.contains(class)
    }

    /// Add a class, keeping the `class` attribute in sync
    pub fn add_class(&mut self, class: &str) -> bool {
        let changed = self.class_list.add(class);
        if changed {
            self.sync_class_attribute();
        }
        changed
    }

    /// Remove a class, keeping the `class` attribute in sync
    pub fn remove_class(&mut self, class: &str) -> bool {
        let changed = self.class_list.remove(class);
        if changed {
            self.sync_class_attribute();
        }
        changed
    }

    fn sync_class_attribute(&mut self) {
        let value = self.class_list.value();
        self.attributes.set_attribute("class", &value);
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    Element(Element),
}

/// Tree node
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self { parent: None, children: Vec::new(), data }
    }

    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// HTML document
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document with the basic `html > (head, body)` structure
    pub fn new() -> Self {
        let mut doc = Self::empty();
        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.attach(NodeId::ROOT, html);
        doc.attach(html, head);
        doc.attach(html, body);
        doc
    }

    /// Create a document holding only the document node
    pub fn empty() -> Self {
        Self { nodes: vec![Node::new(NodeData::Document)] }
    }

    /// Number of nodes, including the document node
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.index()).and_then(Node::as_element_mut)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(tag_name)))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Append `child` to `parent`, detaching it from its current parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.get(parent).ok_or(DomError::NoSuchNode(parent))?;
        self.get(child).ok_or(DomError::NoSuchNode(child))?;

        let hierarchy = DomError::HierarchyRequest { parent, child };
        if child == NodeId::ROOT
            || child == parent
            || self.ancestors(parent).contains(&child)
        {
            return Err(hierarchy);
        }

        if let Some(old_parent) = self.nodes[child.index()].parent {
            self.nodes[old_parent.index()].children.retain(|&c| c != child);
        }
        self.attach(parent, child);
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Ancestors from the parent up to the document node
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            out.push(node);
            current = self.parent(node);
        }
        out
    }

    /// Descendants of `id` in document (pre-)order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// First element in document order matching `selector`
    pub fn query_selector(&self, selector: &Selector) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|e| selector.matches(e)))
    }

    /// All elements in document order matching `selector`
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|e| selector.matches(e)))
            .collect()
    }

    /// The `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        self.query_selector(&Selector::tag("html"))
    }

    /// The `<body>` element
    pub fn body(&self) -> Option<NodeId> {
        self.query_selector(&Selector::tag("body"))
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attribute(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Set an attribute on an element node
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.require_element(id)?.set_attribute(name, value);
        Ok(())
    }

    fn require_element(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        let node = self.nodes.get_mut(id.index()).ok_or(DomError::NoSuchNode(id))?;
        node.as_element_mut().ok_or(DomError::NotAnElement(id))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_structure() {
        let doc = Document::new();
        let html = doc.document_element().unwrap();
        let body = doc.body().unwrap();

        assert_eq!(doc.parent(html), Some(NodeId::ROOT));
        assert_eq!(doc.parent(body), Some(html));
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_empty_document_has_no_root() {
        let doc = Document::empty();
        assert!(doc.document_element().is_none());
        assert!(doc.body().is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_query_in_document_order() {
        let mut doc = Document::new();
        let body = doc.body().unwrap();
        let header = doc.create_element("header");
        let a = doc.create_element("button");
        let b = doc.create_element("button");
        doc.append_child(body, header).unwrap();
        doc.append_child(header, a).unwrap();
        doc.append_child(body, b).unwrap();

        assert_eq!(doc.query_selector_all(&Selector::tag("button")), vec![a, b]);
        assert_eq!(doc.query_selector(&Selector::tag("button")), Some(a));
    }

    #[test]
    fn test_append_moves_node() {
        let mut doc = Document::new();
        let body = doc.body().unwrap();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let item = doc.create_element("span");
        doc.append_child(body, first).unwrap();
        doc.append_child(body, second).unwrap();

        doc.append_child(first, item).unwrap();
        doc.append_child(second, item).unwrap();

        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), &[item]);
        assert_eq!(doc.parent(item), Some(second));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let html = doc.document_element().unwrap();
        let body = doc.body().unwrap();

        assert_eq!(
            doc.append_child(body, html),
            Err(DomError::HierarchyRequest { parent: body, child: html })
        );
        assert!(doc.append_child(body, NodeId::ROOT).is_err());
        assert!(doc.append_child(body, NodeId(99)).is_err());
    }

    #[test]
    fn test_class_attribute_sync() {
        let mut el = Element::new("nav");
        el.set_attribute("class", "takeover dark");
        assert!(el.has_class("dark"));

        el.add_class("takeover__opening");
        assert_eq!(el.get_attribute("class"), Some("takeover dark takeover__opening"));

        el.remove_class("dark");
        assert_eq!(el.get_attribute("class"), Some("takeover takeover__opening"));

        el.remove_attribute("class");
        assert!(el.class_list().is_empty());
    }
}
