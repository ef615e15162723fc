//! Request payloads built from ajax forms

use serde::Serialize;

use crate::dom::Form;

pub const METHOD_FIELD: &str = "method";
pub const URL_FIELD: &str = "url";
pub const REDIRECT_FIELD: &str = "redirect";
pub const CSRF_FIELD: &str = "_csrf_token";
pub const TYPE_FIELD: &str = "type";
pub const ID_FIELD: &str = "id";

/// Body of a DELETE request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletePayload {
    #[serde(rename = "_csrf_token", skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl DeletePayload {
    pub fn from_form(form: &Form) -> Self {
        Self {
            csrf_token: form.input_value(CSRF_FIELD).map(str::to_string),
        }
    }
}

/// One edited attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Resource section of a PATCH request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchData {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub attributes: Vec<Attribute>,
}

/// Body of a PATCH request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchPayload {
    #[serde(rename = "_csrf_token", skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    pub data: PatchData,
}

impl PatchPayload {
    pub fn from_form(form: &Form) -> Self {
        Self {
            csrf_token: form.input_value(CSRF_FIELD).map(str::to_string),
            data: PatchData {
                kind: form.input_value(TYPE_FIELD).map(str::to_string),
                id: form.input_value(ID_FIELD).map(str::to_string),
                attributes: collect_attributes(form),
            },
        }
    }
}

/// Text inputs and textareas in document order
///
/// Unnamed and disabled fields are skipped, line breaks become `\r\n`.
pub fn collect_attributes(form: &Form) -> Vec<Attribute> {
    form.fields
        .iter()
        .filter(|f| f.is_text_entry() && !f.name.is_empty() && !f.disabled)
        .map(|f| Attribute {
            name: f.name.clone(),
            value: normalize_line_breaks(&f.value),
        })
        .collect()
}

fn normalize_line_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::document::{Field, FieldKind};

    fn patch_form() -> Form {
        Form::default()
            .with_class("ajax-form")
            .with_field(Field::hidden(METHOD_FIELD, "PATCH"))
            .with_field(Field::hidden(URL_FIELD, "/posts/7"))
            .with_field(Field::hidden(REDIRECT_FIELD, "/posts"))
            .with_field(Field::hidden(CSRF_FIELD, "tok"))
            .with_field(Field::hidden(TYPE_FIELD, "post"))
            .with_field(Field::hidden(ID_FIELD, "7"))
            .with_field(Field::text("subject", "Game night"))
            .with_field(Field::textarea("content", "Bring snacks"))
    }

    #[test]
    fn test_delete_payload_json() {
        let form = Form::default().with_field(Field::hidden(CSRF_FIELD, "tok"));
        let json = serde_json::to_string(&DeletePayload::from_form(&form)).unwrap();
        assert_eq!(json, r#"{"_csrf_token":"tok"}"#);
    }

    #[test]
    fn test_delete_payload_without_token_is_empty_object() {
        let json = serde_json::to_string(&DeletePayload::from_form(&Form::default())).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_patch_payload_shape() {
        let value = serde_json::to_value(PatchPayload::from_form(&patch_form())).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "_csrf_token": "tok",
                "data": {
                    "type": "post",
                    "id": "7",
                    "attributes": [
                        {"name": "subject", "value": "Game night"},
                        {"name": "content", "value": "Bring snacks"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_attributes_keep_document_order() {
        let form = Form::default()
            .with_field(Field::textarea("c", "3"))
            .with_field(Field::hidden(CSRF_FIELD, "tok"))
            .with_field(Field::text("a", "1"))
            .with_field(Field::text("b", "2"));
        let names: Vec<_> = collect_attributes(&form).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_attributes_skip_unnamed_disabled_and_other_kinds() {
        let mut disabled = Field::text("locked", "x");
        disabled.disabled = true;
        let checkbox = Field {
            name: "flag".to_string(),
            kind: FieldKind::Other,
            value: "on".to_string(),
            disabled: false,
        };
        let form = Form::default()
            .with_field(Field::text("", "anonymous"))
            .with_field(disabled)
            .with_field(checkbox)
            .with_field(Field::text("kept", "y"));

        assert_eq!(
            collect_attributes(&form),
            vec![Attribute {
                name: "kept".to_string(),
                value: "y".to_string()
            }]
        );
    }

    #[test]
    fn test_attribute_line_breaks_normalized() {
        let form = Form::default().with_field(Field::textarea("content", "a\nb\r\nc\rd"));
        assert_eq!(collect_attributes(&form)[0].value, "a\r\nb\r\nc\rd");
    }
}
