//! Edit/delete view toggle

use crate::dom::{Document, HIDDEN_CLASS};

use super::interceptor::AJAX_FORM_CLASS;

/// Label shown on the toggle while the forms are open
pub const CANCEL_LABEL: &str = "Cancel";

/// Class of display elements swapped out while editing
pub const UPDATE_HIDE_CLASS: &str = "update-hide";

/// Siblings carrying either class are swapped in or out
const SWAPPED_CLASSES: [&str; 2] = [UPDATE_HIDE_CLASS, AJAX_FORM_CLASS];

/// Handle a click on the toggle control of panel `index`
///
/// Flips `hidden` on every sibling view or form marked `update-hide` or
/// `ajax-form`, then relabels the control between `Cancel` and its original label (kept in the
/// control's value). Returns false when the panel does not exist.
pub fn toggle_update(doc: &mut Document, index: usize) -> bool {
    let Some(panel) = doc.panels.get_mut(index) else {
        tracing::warn!("No panel at index {}", index);
        return false;
    };

    for view in panel
        .views
        .iter_mut()
        .filter(|v| SWAPPED_CLASSES.iter().any(|c| v.has_class(c)))
    {
        view.toggle_class(HIDDEN_CLASS);
    }

    let toggle = &mut panel.toggle;
    toggle.text = if toggle.text == CANCEL_LABEL {
        toggle.value.clone().unwrap_or_default()
    } else {
        CANCEL_LABEL.to_string()
    };

    let form_indexes = panel.forms.clone();
    for form_index in form_indexes {
        match doc.forms.get_mut(form_index) {
            Some(form) if SWAPPED_CLASSES.iter().any(|c| form.has_class(c)) => {
                form.toggle_class(HIDDEN_CLASS)
            }
            Some(_) => {}
            None => tracing::warn!("Panel {} references missing form {}", index, form_index),
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Form;
    use crate::dom::document::{Element, Panel};

    fn element(classes: &[&str]) -> Element {
        Element {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Element::default()
        }
    }

    fn document() -> Document {
        Document {
            forms: vec![
                Form::default().with_class(AJAX_FORM_CLASS).with_class(HIDDEN_CLASS),
                Form::default().with_class("search"),
            ],
            panels: vec![Panel {
                toggle: Element {
                    text: "Edit".to_string(),
                    value: Some("Edit".to_string()),
                    ..Element::default()
                },
                views: vec![element(&[UPDATE_HIDE_CLASS]), element(&["avatar"])],
                forms: vec![0, 1],
            }],
            ..Document::default()
        }
    }

    #[test]
    fn test_toggle_opens_forms() {
        let mut doc = document();
        assert!(toggle_update(&mut doc, 0));

        let panel = &doc.panels[0];
        assert_eq!(panel.toggle.text, CANCEL_LABEL);
        assert!(panel.views[0].has_class(HIDDEN_CLASS));
        assert!(!panel.views[1].has_class(HIDDEN_CLASS));
        assert!(!doc.forms[0].has_class(HIDDEN_CLASS));
        assert!(!doc.forms[1].has_class(HIDDEN_CLASS));
    }

    #[test]
    fn test_either_class_swaps_views_and_forms() {
        let mut doc = document();
        doc.forms.push(Form::default().with_class(UPDATE_HIDE_CLASS));
        doc.panels[0].forms.push(2);
        doc.panels[0].views.push(element(&[AJAX_FORM_CLASS, HIDDEN_CLASS]));

        toggle_update(&mut doc, 0);
        assert!(doc.forms[2].has_class(HIDDEN_CLASS));
        assert!(!doc.panels[0].views[2].has_class(HIDDEN_CLASS));

        toggle_update(&mut doc, 0);
        assert!(!doc.forms[2].has_class(HIDDEN_CLASS));
        assert!(doc.panels[0].views[2].has_class(HIDDEN_CLASS));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let original = document();
        let mut doc = original.clone();
        toggle_update(&mut doc, 0);
        toggle_update(&mut doc, 0);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_cancel_without_value_clears_label() {
        let mut doc = document();
        doc.panels[0].toggle.text = CANCEL_LABEL.to_string();
        doc.panels[0].toggle.value = None;
        toggle_update(&mut doc, 0);
        assert_eq!(doc.panels[0].toggle.text, "");
    }

    #[test]
    fn test_missing_panel() {
        let mut doc = document();
        assert!(!toggle_update(&mut doc, 3));
        assert_eq!(doc, document());
    }
}
