use crate::dom::{
    dom_model::{Control, Element, Node, NodeData, NodeId},
    error::DomError,
    event::{DomEvent, EventListener},
};

/// In-memory DOM-like tree. Nodes live in an arena and are addressed by `NodeId`.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document whose root is an element with the given tag.
    pub fn new(root_tag: &str) -> Self {
        Self::with_root(Element::new(root_tag))
    }

    pub fn with_root(root: Element) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: vec![],
                data: NodeData::Element(root),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn append_element(&mut self, parent: NodeId, element: Element) -> Result<NodeId, DomError> {
        self.append(parent, NodeData::Element(element))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        self.append(parent, NodeData::Text(text.to_string()))
    }

    fn append(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId, DomError> {
        if parent.0 >= self.nodes.len() {
            return Err(DomError::UnknownNode(parent.0));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: vec![],
            data,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    pub fn control(&self, id: NodeId) -> Option<&Control> {
        self.element(id)?.control.as_ref()
    }

    fn control_mut(&mut self, id: NodeId) -> Result<&mut Control, DomError> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => el.control.as_mut().ok_or(DomError::NotAControl(id.0)),
            Some(NodeData::Text(_)) => Err(DomError::NotAControl(id.0)),
            None => Err(DomError::UnknownNode(id.0)),
        }
    }

    /// Text payload of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.data {
            NodeData::Text(t) => Some(t.as_str()),
            NodeData::Element(_) => None,
        }
    }

    /// Element children only, in document order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| self.element(*c).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Any child node, text included.
    pub fn has_child_nodes(&self, id: NodeId) -> bool {
        self.node(id).map(|n| !n.children.is_empty()).unwrap_or(false)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id)?.parent?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|s| *s == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Whether `ancestor` is `node` itself or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.node(current).and_then(|n| n.parent);
        }
        false
    }

    /// Document-order (pre-order) walk over every node.
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// First element in document order whose id equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|n| self.element(*n).and_then(|el| el.id.as_deref()) == Some(id))
    }

    /// All elements in document order whose name equals `name`.
    pub fn elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|n| self.element(*n).and_then(|el| el.name.as_deref()) == Some(name))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Live mutation (user interaction and reset)
    // ------------------------------------------------------------------------

    /// Assign a value. Select-like controls pick the option whose value
    /// matches, then the option whose label matches, else clear the selection.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        let control = self.control_mut(id)?;
        if control.kind.to_ascii_lowercase().starts_with("select") {
            let index = control
                .options
                .iter()
                .position(|o| o.value == value)
                .or_else(|| control.options.iter().position(|o| o.label == value));
            control.select_index(index);
        } else {
            control.value = value.to_string();
        }
        Ok(())
    }

    /// Assign the checked flag. Checking a named radio unchecks the other
    /// radios sharing its name.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), DomError> {
        let control = self.control_mut(id)?;
        control.checked = checked;
        let is_radio = control.kind.eq_ignore_ascii_case("radio");

        if checked && is_radio {
            let group = self
                .element(id)
                .and_then(|el| el.name.clone())
                .filter(|n| !n.trim().is_empty());
            if let Some(group) = group {
                for member in self.elements_by_name(&group) {
                    if member == id {
                        continue;
                    }
                    if let Ok(other) = self.control_mut(member) {
                        if other.kind.eq_ignore_ascii_case("radio") {
                            other.checked = false;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn select_option(&mut self, id: NodeId, index: Option<usize>) -> Result<(), DomError> {
        self.control_mut(id)?.select_index(index);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------------

    /// Deliver `event` to each listener capturing on a node along the path
    /// to the target. Each listener sees the event at most once.
    pub fn dispatch(&self, event: &DomEvent, listeners: &mut [&mut dyn EventListener]) {
        if self.node(event.target).is_none() {
            return;
        }
        for listener in listeners.iter_mut() {
            if !listener.listens_to(event.event_type) {
                continue;
            }
            let Some(root) = listener.capture_root(self) else {
                continue;
            };
            if self.is_inclusive_ancestor(root, event.target) {
                listener.handle_event(self, event);
            }
        }
    }
}
