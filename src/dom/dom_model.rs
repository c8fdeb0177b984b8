use serde::{Deserialize, Serialize};

/// Arena index of a node inside one `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub control: Option<Control>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            name: None,
            control: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.control = Some(control);
        self
    }
}

/// Live state of a form control, mirroring the DOM properties the tracker reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Control {
    /// Declared kind (`text`, `checkbox`, `select-one`, `submit`, ...)
    pub kind: String,
    pub value: String,
    pub default_value: Option<String>,
    pub checked: bool,
    pub default_checked: bool,
    /// Select-like controls only
    pub options: Vec<SelectOption>,
}

impl Control {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_default_checked(mut self, default_checked: bool) -> Self {
        self.default_checked = default_checked;
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.selected)
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.selected)
    }

    /// Select the option at `index`, clearing every other selection.
    /// Out-of-range indices leave nothing selected.
    pub fn select_index(&mut self, index: Option<usize>) {
        for (i, option) in self.options.iter_mut().enumerate() {
            option.selected = Some(i) == index;
        }
        self.value = index
            .and_then(|i| self.options.get(i))
            .map(|o| o.value.clone())
            .unwrap_or_default();
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub default_selected: bool,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: false,
            default_selected: false,
        }
    }

    pub fn default_selected(mut self) -> Self {
        self.default_selected = true;
        self.selected = true;
        self
    }
}
