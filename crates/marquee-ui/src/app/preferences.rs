//! Persistence and environment helpers for the app shell.

use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use js_sys::Date;
use web_sys::Url;

pub(crate) const LOCALE_KEY: &str = "marquee.locale";

const API_BASE_OVERRIDE: Option<&str> = option_env!("MARQUEE_API_BASE_URL");

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(nav) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&nav) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

/// Backend origin: the build-time override, else the page host with the dev port mapped.
pub(crate) fn api_base_url() -> String {
    if let Some(base) = API_BASE_OVERRIDE.filter(|base| !base.trim().is_empty()) {
        return base.to_string();
    }
    let href = window()
        .location()
        .href()
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

    if let Ok(url) = Url::new(&href) {
        let protocol = url.protocol();
        let host = url.hostname();
        let port = url.port();
        let mapped_port = match port.as_str() {
            "" => None,
            "8080" => Some("5000"),
            other => Some(other),
        };

        let mut base = format!("{protocol}//{host}");
        if let Some(port) = mapped_port {
            base.push(':');
            base.push_str(port);
        }
        return base;
    }

    "http://127.0.0.1:5000".to_string()
}

pub(crate) fn now_ms() -> i64 {
    // Millisecond timestamps fit in f64's integer range until the year 287396.
    #[allow(clippy::cast_possible_truncation)]
    let now = Date::now() as i64;
    now
}

pub(crate) fn current_year() -> i32 {
    i32::try_from(Date::new_0().get_full_year()).unwrap_or(1970)
}

/// Randomness for verification codes.
pub(crate) fn entropy() -> u128 {
    uuid::Uuid::new_v4().as_u128()
}

pub(crate) fn reload_page() {
    if let Err(err) = window().location().reload() {
        tracing::warn!(error = ?err, "page reload failed");
    }
}
