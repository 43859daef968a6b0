//! DOM Tree (arena-based allocation)

use std::collections::HashSet;

use crate::{
    DomError, ElementData, InlineStyle, MutationRecord, Node, NodeId,
    parse_style_attribute, user_agent_default,
};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    /// Elements with a child-list observer attached
    observed: HashSet<NodeId>,
    /// Pending mutation records for observed elements
    records: Vec<MutationRecord>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            observed: HashSet::new(),
            records: Vec::new(),
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data for an element node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data for an element node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    fn element_or_err(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match self.nodes.get_mut(id.index()) {
            Some(node) => node.as_element_mut().ok_or(DomError::NotAnElement(id)),
            None => Err(DomError::InvalidNode(id)),
        }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(NodeId::is_valid)
    }

    /// Parent of a node if that parent is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.element(*p).is_some())
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let first = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next: first }
    }

    /// Direct children that are elements
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    /// All elements below `id` in document order (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(id) {
            if self.element(child).is_some() {
                out.push(child);
            }
            self.collect_descendants(child, out);
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        while node.is_valid() {
            if node == ancestor {
                return true;
            }
            node = self.get(node).map(|n| n.parent).unwrap_or(NodeId::NONE);
        }
        false
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.get(parent).is_none() {
            return Err(DomError::InvalidNode(parent));
        }
        if self.get(child).is_none() {
            return Err(DomError::InvalidNode(child));
        }
        if child == NodeId::ROOT || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        if self.parent(child).is_some() {
            self.detach(child);
        }

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        self.record(parent, vec![child], Vec::new());
        Ok(())
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[child.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;

        self.record(parent, Vec::new(), vec![child]);
    }

    /// Get an attribute value
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id).and_then(|e| e.attribute(name))
    }

    /// Set an attribute; `class` and `style` are parsed into their views
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        match name {
            "style" => {
                let style = parse_style_attribute(value);
                self.element_or_err(id)?.style = style;
            }
            "class" => self.element_or_err(id)?.set_class_attr(value),
            _ => self.element_or_err(id)?.set_plain_attr(name, value),
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id).map(|e| e.remove_attribute(name)).unwrap_or(false)
    }

    /// Inline style of an element
    pub fn inline_style(&self, id: NodeId) -> Option<&InlineStyle> {
        self.element(id).map(|e| &e.style)
    }

    /// Read one inline style property
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style.get(property))
    }

    /// Set one inline style property; empty values remove it
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.style.set(property, value);
        }
    }

    /// Set a declaration coming from an author stylesheet
    pub fn set_sheet_property(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.sheet_style.set(property, value);
        }
    }

    /// Approximate `getComputedStyle`: inline, then sheet, then UA default
    pub fn computed_style(&self, id: NodeId, property: &str) -> String {
        let Some(elem) = self.element(id) else {
            return String::new();
        };
        elem.style.get(property)
            .or_else(|| elem.sheet_style.get(property))
            .unwrap_or_else(|| user_agent_default(&elem.tag, property))
            .to_string()
    }

    /// Start recording child-list changes of `id`
    pub fn observe(&mut self, id: NodeId) {
        self.observed.insert(id);
    }

    /// Stop recording child-list changes of `id`
    pub fn disconnect(&mut self, id: NodeId) {
        self.observed.remove(&id);
        self.records.retain(|r| r.target != id);
    }

    pub fn is_observed(&self, id: NodeId) -> bool {
        self.observed.contains(&id)
    }

    /// Drain pending mutation records
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    fn record(&mut self, target: NodeId, added_nodes: Vec<NodeId>, removed_nodes: Vec<NodeId>) {
        if self.observed.contains(&target) {
            tracing::trace!("child list of {:?} changed", target);
            self.records.push(MutationRecord { target, added_nodes, removed_nodes });
        }
    }
}

/// Iterator over a node's children
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map(|n| n.next_sibling).unwrap_or(NodeId::NONE);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_children(count: usize) -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let parent = tree.create_element("div");
        tree.append_child(tree.root(), parent).unwrap();
        let children = (0..count)
            .map(|_| {
                let child = tree.create_element("div");
                tree.append_child(parent, child).unwrap();
                child
            })
            .collect();
        (tree, parent, children)
    }

    #[test]
    fn test_append_and_iterate() {
        let (tree, parent, children) = tree_with_children(3);
        let iterated: Vec<_> = tree.children(parent).collect();
        assert_eq!(iterated, children);
        assert_eq!(tree.parent_element(children[0]), Some(parent));
    }

    #[test]
    fn test_remove_middle_child() {
        let (mut tree, parent, children) = tree_with_children(3);
        tree.remove_child(parent, children[1]).unwrap();
        let iterated: Vec<_> = tree.children(parent).collect();
        assert_eq!(iterated, vec![children[0], children[2]]);
        assert_eq!(tree.parent(children[1]), None);
    }

    #[test]
    fn test_cannot_append_ancestor() {
        let (mut tree, parent, children) = tree_with_children(1);
        let result = tree.append_child(children[0], parent);
        assert!(matches!(result, Err(DomError::HierarchyRequest { .. })));
    }

    #[test]
    fn test_text_nodes_are_not_element_children() {
        let (mut tree, parent, children) = tree_with_children(2);
        let text = tree.create_text("hello");
        tree.append_child(parent, text).unwrap();
        assert_eq!(tree.element_children(parent), children);
        assert_eq!(tree.children(parent).count(), 3);
    }

    #[test]
    fn test_mutation_records_only_when_observed() {
        let (mut tree, parent, _) = tree_with_children(1);
        let extra = tree.create_element("span");
        tree.append_child(parent, extra).unwrap();
        assert!(tree.take_records().is_empty());

        tree.observe(parent);
        let another = tree.create_element("span");
        tree.append_child(parent, another).unwrap();
        tree.remove_child(parent, extra).unwrap();

        let records = tree.take_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].added_nodes, vec![another]);
        assert_eq!(records[1].removed_nodes, vec![extra]);
        assert!(records.iter().all(MutationRecord::changes_children));
    }

    #[test]
    fn test_class_and_style_attributes() {
        let (mut tree, parent, _) = tree_with_children(0);
        tree.set_attribute(parent, "class", "a  b a").unwrap();
        tree.set_attribute(parent, "fxFlex", "50").unwrap();
        assert_eq!(tree.attribute(parent, "class").as_deref(), Some("a b"));
        assert_eq!(tree.attribute(parent, "fxFlex").as_deref(), Some("50"));

        tree.set_attribute(parent, "style", "display: none").unwrap();
        assert_eq!(tree.style_property(parent, "display"), Some("none"));
    }

    #[test]
    fn test_computed_style_fallbacks() {
        let (mut tree, parent, _) = tree_with_children(0);
        let span = tree.create_element("span");
        tree.append_child(parent, span).unwrap();

        assert_eq!(tree.computed_style(parent, "display"), "block");
        assert_eq!(tree.computed_style(span, "display"), "inline");
        assert_eq!(tree.computed_style(span, "flex-direction"), "row");

        tree.set_sheet_property(span, "display", "none");
        assert_eq!(tree.computed_style(span, "display"), "none");

        tree.set_style_property(span, "display", "flex");
        assert_eq!(tree.computed_style(span, "display"), "flex");
    }
}
