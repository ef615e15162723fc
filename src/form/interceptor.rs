//! Ajax form submission
//!
//! Browsers only submit GET and POST, so forms tagged `ajax-form` are not
//! submitted natively: the hidden `method` field picks DELETE or PATCH and the
//! form content is sent as a JSON ajax call instead.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;

use crate::ajax::AjaxClient;
use crate::dom::{Form, Page};

use super::method::FormMethod;
use super::payload::{DeletePayload, METHOD_FIELD, PatchPayload, REDIRECT_FIELD, URL_FIELD};

/// Marker class of intercepted forms
pub const AJAX_FORM_CLASS: &str = "ajax-form";

pub const DELETE_FAILED_ALERT: &str = "Unsuccessful deletion";
pub const PATCH_FAILED_ALERT: &str = "Unsuccessful update";

/// What a submission led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not an ajax form; native submission applies
    NotIntercepted,
    /// Method field not DELETE or PATCH; nothing sent
    UnknownMethod(String),
    /// Request succeeded; `redirect` is where the window went
    Completed {
        method: FormMethod,
        redirect: Option<String>,
    },
    /// Request failed; `alert` was shown
    Failed { method: FormMethod, alert: &'static str },
}

/// Intercepts ajax form submissions on a page
pub struct FormInterceptor {
    client: Arc<AjaxClient>,
    page: Page,
}

impl FormInterceptor {
    pub fn new(client: Arc<AjaxClient>, page: Page) -> Self {
        Self { client, page }
    }

    /// Handle the submit event of the form at `index`
    pub async fn submit(&self, index: usize) -> SubmitOutcome {
        let Some(form) = self.page.read(|doc| doc.forms.get(index).cloned()) else {
            tracing::warn!("No form at index {}", index);
            return SubmitOutcome::NotIntercepted;
        };

        if !form.has_class(AJAX_FORM_CLASS) {
            return SubmitOutcome::NotIntercepted;
        }

        match FormMethod::parse(form.input_value(METHOD_FIELD)) {
            FormMethod::Delete => self.delete(&form).await,
            FormMethod::Patch => self.patch(&form).await,
            FormMethod::Unknown(raw) => {
                tracing::warn!("Unknown HTTP method: {:?}", raw);
                SubmitOutcome::UnknownMethod(raw)
            }
        }
    }

    async fn delete(&self, form: &Form) -> SubmitOutcome {
        let payload = DeletePayload::from_form(form);
        self.dispatch(FormMethod::Delete, Method::DELETE, form, &payload, DELETE_FAILED_ALERT)
            .await
    }

    async fn patch(&self, form: &Form) -> SubmitOutcome {
        let payload = PatchPayload::from_form(form);
        tracing::debug!("Patching {} attribute(s)", payload.data.attributes.len());
        self.dispatch(FormMethod::Patch, Method::PATCH, form, &payload, PATCH_FAILED_ALERT)
            .await
    }

    async fn dispatch<T: Serialize>(
        &self,
        method: FormMethod,
        http_method: Method,
        form: &Form,
        payload: &T,
        failure_alert: &'static str,
    ) -> SubmitOutcome {
        let result = match form.input_value(URL_FIELD) {
            Some(url) => self.client.send_json(http_method, url, payload).await,
            None => {
                tracing::warn!("{} form has no url field, nothing sent", method);
                self.page.window().alert(failure_alert);
                return SubmitOutcome::Failed {
                    method,
                    alert: failure_alert,
                };
            }
        };

        match result {
            Ok(response) => {
                tracing::debug!("{} returned status {}", method, response.status);
                let redirect = form.input_value(REDIRECT_FIELD).map(str::to_string);
                match &redirect {
                    Some(href) => self.page.window().navigate(href),
                    None => tracing::warn!("{} succeeded but form has no redirect field", method),
                }
                SubmitOutcome::Completed { method, redirect }
            }
            Err(e) => {
                tracing::warn!("{} request failed: {}", method, e);
                self.page.window().alert(failure_alert);
                SubmitOutcome::Failed {
                    method,
                    alert: failure_alert,
                }
            }
        }
    }
}
