//! Yew components for the catalog pages and modals.

pub(crate) mod auth;
pub(crate) mod cards;
pub(crate) mod command;
pub(crate) mod fragment;
pub(crate) mod home;
pub(crate) mod modal;
pub(crate) mod movie;
pub(crate) mod navbar;
pub(crate) mod person_modal;

use crate::app::AppCtx;
use crate::i18n::DEFAULT_LOCALE;
use yew::prelude::*;

/// Shared services from the shell context.
#[hook]
pub(crate) fn use_app_ctx() -> AppCtx {
    use_context::<AppCtx>().unwrap_or_else(|| AppCtx::boot(DEFAULT_LOCALE))
}
