//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Modals live here because any page can open them.
//! - Session state is a snapshot; storage stays the source of truth.

use crate::core::auth::SessionState;
use crate::core::command::CommandConsole;
use crate::core::modal::{ConfirmModal, ModalHost, PersonModal};
use crate::core::views::AuthForm;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Session snapshot taken at boot and after auth changes.
    pub session: SessionState,
    /// Person detail modal.
    pub person_modal: PersonModal,
    /// Email confirmation modal.
    pub confirm: ConfirmModal,
    /// Login/register modal.
    pub auth: AuthForm,
    /// Command output modal.
    pub console: CommandConsole,
}

impl ModalHost for Dispatch<AppStore> {
    fn with_person_modal<R>(&self, apply: impl FnOnce(&mut PersonModal) -> R) -> R {
        let mut store = (*self.get()).clone();
        let result = apply(&mut store.person_modal);
        self.set(store);
        result
    }
}
