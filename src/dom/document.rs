//! Page document model
//!
//! The subset of a rendered page the client reacts to: meta tags, forms with
//! their fields, id-addressed elements and edit/delete toggle panels.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Class that hides an element
pub const HIDDEN_CLASS: &str = "hidden";

/// Input field kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Hidden,
    Text,
    Textarea,
    /// Buttons, checkboxes, selects and anything else
    #[serde(other)]
    Other,
}

/// Form field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Field {
    /// Whether the field is a user-editable text input or textarea
    pub fn is_text_entry(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Textarea)
    }
}

/// Form element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: BTreeSet<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Form {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Value of the first `<input>` with the given name
    ///
    /// Textareas are not inputs and never match.
    pub fn input_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.kind != FieldKind::Textarea && f.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn toggle_class(&mut self, class: &str) {
        toggle_in(&mut self.classes, class);
    }
}

/// Id-addressed element (buttons, message containers, panel views)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default)]
    pub classes: BTreeSet<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn toggle_class(&mut self, class: &str) {
        toggle_in(&mut self.classes, class);
    }
}

/// Edit/delete toggle control together with the siblings it shows and hides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub toggle: Element,
    /// Sibling display elements
    #[serde(default)]
    pub views: Vec<Element>,
    /// Sibling forms, as indexes into `Document::forms`
    #[serde(default)]
    pub forms: Vec<usize>,
}

/// Rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// URL the page was loaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `<meta name=... content=...>` tags
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    #[serde(default)]
    pub forms: Vec<Form>,
    #[serde(default)]
    pub elements: BTreeMap<String, Element>,
    #[serde(default)]
    pub panels: Vec<Panel>,
}

impl Document {
    /// Load a page from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse page file: {}", path.display()))
    }

    /// Write the page back to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize page")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write page file: {}", path.display()))?;
        Ok(())
    }

    pub fn meta_content(&self, name: &str) -> Option<&str> {
        self.meta.get(name).map(String::as_str)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Find a form by position or by its `id` attribute
    pub fn find_form(&self, reference: &str) -> Option<usize> {
        if let Ok(index) = reference.parse::<usize>() {
            return (index < self.forms.len()).then_some(index);
        }
        self.forms
            .iter()
            .position(|f| f.id.as_deref() == Some(reference))
    }
}

fn toggle_in(classes: &mut BTreeSet<String>, class: &str) {
    if !classes.remove(class) {
        classes.insert(class.to_string());
    }
}

#[cfg(test)]
impl Field {
    pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Hidden,
            value: value.into(),
            disabled: false,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            value: value.into(),
            disabled: false,
        }
    }

    pub fn textarea(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Textarea,
            value: value.into(),
            disabled: false,
        }
    }
}

#[cfg(test)]
impl Form {
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}
