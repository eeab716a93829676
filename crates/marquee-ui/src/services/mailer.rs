//! Verification email delivery through the EmailJS browser widget.
//!
//! The page loads the widget script and initialises it with the public key;
//! this module only calls its global `emailjs.send`.

use crate::core::backend::{MailError, VerificationMailer};
use crate::core::config::EmailWidget;
use crate::core::verify::VerificationCode;
use anyhow::anyhow;
use async_trait::async_trait;
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = emailjs, js_name = send, catch)]
    fn emailjs_send(service_id: &str, template_id: &str, params: &JsValue) -> Result<Promise, JsValue>;
}

#[derive(Clone, Debug)]
pub(crate) struct EmailJsMailer {
    widget: EmailWidget,
}

impl EmailJsMailer {
    pub(crate) fn new(widget: EmailWidget) -> Self {
        Self { widget }
    }

    async fn deliver(&self, email: &str, code: &str) -> anyhow::Result<()> {
        let params = Object::new();
        Reflect::set(&params, &JsValue::from_str("to_email"), &JsValue::from_str(email))
            .map_err(js_error)?;
        Reflect::set(&params, &JsValue::from_str("message"), &JsValue::from_str(code))
            .map_err(js_error)?;
        let promise = emailjs_send(&self.widget.service_id, &self.widget.template_id, &params)
            .map_err(js_error)?;
        JsFuture::from(promise).await.map_err(js_error)?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl VerificationMailer for EmailJsMailer {
    async fn send_code(&self, email: &str, code: &VerificationCode) -> Result<(), MailError> {
        self.deliver(email, code.as_str())
            .await
            .map_err(|err| MailError(err.to_string()))
    }
}

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"))
    )
}
