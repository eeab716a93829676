//! Shared service context built once per app boot.
//!
//! # Design
//! - Create exactly one API client, session and mailer per boot.
//! - Storage stays the source of truth; the context only holds handles to it.

use crate::core::auth::Session;
use crate::core::config::UiConfig;
use crate::core::render::RenderCtx;
use crate::core::verify::PendingVerification;
use crate::app::preferences::{api_base_url, current_year};
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::services::api::ApiClient;
use crate::services::mailer::EmailJsMailer;
use crate::services::storage::BrowserStorage;
use std::rc::Rc;

/// Services and rendering inputs shared by every component.
#[derive(Clone)]
pub(crate) struct AppCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
    /// Session persisted in `localStorage`.
    pub session: Rc<Session<BrowserStorage>>,
    /// Pending registration code.
    pub verification: Rc<PendingVerification<BrowserStorage>>,
    /// Verification email delivery.
    pub mailer: Rc<EmailJsMailer>,
    /// Rendering inputs.
    pub render: RenderCtx,
}

impl AppCtx {
    /// Wire the browser services for the given configuration.
    pub(crate) fn new(config: UiConfig, bundle: TranslationBundle, current_year: i32) -> Self {
        Self {
            client: Rc::new(ApiClient::new(config.api_base_url.clone())),
            session: Rc::new(Session::new(BrowserStorage)),
            verification: Rc::new(PendingVerification::new(
                BrowserStorage,
                config.verification_ttl_ms,
            )),
            mailer: Rc::new(EmailJsMailer::new(config.email.clone())),
            render: RenderCtx::new(config, bundle, current_year),
        }
    }
}

impl AppCtx {
    /// Context for the running page in `locale`.
    pub(crate) fn boot(locale: LocaleCode) -> Self {
        let config = UiConfig::default().with_api_base_url(&api_base_url());
        Self::new(config, TranslationBundle::new(locale), current_year())
    }
}

impl PartialEq for AppCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client) && self.render == other.render
    }
}
