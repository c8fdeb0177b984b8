use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dom::{
    document::Document,
    dom_model::{Control, Element, NodeId, SelectOption},
    error::DomError,
};

/// Serializable description of a form tree, loaded from YAML or JSON.
///
/// ```yaml
/// tag: div
/// id: container
/// children:
///   - tag: input
///     id: num-text
///     type: number
///     default_value: "0"
///   - tag: input
///     id: opt-a
///     name: group
///     type: radio
///     default_checked: true
///   - text: Option A
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormSpec {
    /// Element tag; absent for text nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Text node payload (used when `tag` is absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Control kind; defaults from the tag for form controls
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,

    #[serde(default)]
    pub default_checked: bool,

    #[serde(default)]
    pub multiple: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FormSpec>,
}

impl Document {
    /// Build a document from a form description. The description's top node
    /// becomes the document root.
    pub fn from_spec(spec: &FormSpec) -> Result<Document, DomError> {
        let root_element = match spec.tag {
            Some(_) => to_element(spec),
            None => Element::new("body"),
        };
        let mut doc = Document::with_root(root_element);
        let root = doc.root();

        if let (Some(_), Some(text)) = (&spec.tag, &spec.text) {
            doc.append_text(root, text)?;
        }
        for child in &spec.children {
            append_spec(&mut doc, root, child)?;
        }
        Ok(doc)
    }
}

fn append_spec(doc: &mut Document, parent: NodeId, spec: &FormSpec) -> Result<(), DomError> {
    if spec.tag.is_none() {
        doc.append_text(parent, spec.text.as_deref().unwrap_or(""))?;
        return Ok(());
    }

    let node = doc.append_element(parent, to_element(spec))?;
    if let Some(text) = &spec.text {
        doc.append_text(node, text)?;
    }
    for child in &spec.children {
        append_spec(doc, node, child)?;
    }
    Ok(())
}

fn to_element(spec: &FormSpec) -> Element {
    let tag = spec.tag.clone().unwrap_or_default();
    Element {
        id: spec.id.clone(),
        name: spec.name.clone(),
        control: to_control(&tag, spec),
        tag,
    }
}

/// Control kind implied by the tag when `type` is not given.
fn implied_kind(tag: &str, spec: &FormSpec) -> Option<String> {
    if let Some(kind) = &spec.r#type {
        return Some(kind.clone());
    }
    match tag.to_ascii_lowercase().as_str() {
        "input" => Some("text".into()),
        "textarea" => Some("textarea".into()),
        "select" if spec.multiple => Some("select-multiple".into()),
        "select" => Some("select-one".into()),
        "button" => Some("submit".into()),
        _ => None,
    }
}

fn to_control(tag: &str, spec: &FormSpec) -> Option<Control> {
    let kind = implied_kind(tag, spec)?;

    let mut control = Control::new(&kind);
    control.default_value = spec.default_value.clone();
    control.default_checked = spec.default_checked;
    control.checked = spec.checked.unwrap_or(spec.default_checked);

    if control.kind.to_ascii_lowercase().starts_with("select") {
        control.options = spec
            .options
            .iter()
            .map(|o| SelectOption {
                selected: o.selected || o.default_selected,
                ..o.clone()
            })
            .collect();
        // A single-select always shows one option when it has any
        let fallback = if control.kind.eq_ignore_ascii_case("select-one") && !control.options.is_empty() {
            Some(0)
        } else {
            None
        };
        let index = control.selected_index().or(fallback);
        control.select_index(index);
    } else {
        control.value = spec
            .value
            .clone()
            .or_else(|| spec.default_value.clone())
            .unwrap_or_default();
    }

    Some(control)
}

/// Load a form description from a `.json` file, or YAML for anything else.
pub fn load_form(path: &str) -> Result<Document, DomError> {
    let content = std::fs::read_to_string(path).map_err(|source| DomError::Io {
        path: path.to_string(),
        source,
    })?;

    let is_json = Path::new(path)
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("json"));

    let spec: FormSpec = if is_json {
        serde_json::from_str(&content).map_err(|source| DomError::Json {
            path: path.to_string(),
            source,
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|source| DomError::Yaml {
            path: path.to_string(),
            source,
        })?
    };

    Document::from_spec(&spec)
}
