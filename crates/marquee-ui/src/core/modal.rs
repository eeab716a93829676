//! Modal controllers.
//!
//! # Design
//! - `open` resets every field to a placeholder before revealing the region.
//! - Each open bumps a generation; responses carrying an older ticket are dropped.
//! - `close` only hides; the last content stays until the next open.

use crate::core::logic::{age_in, display_date, parse_date};
use crate::core::render::{CardKind, PersonBasics, RenderCtx, movie_card, render_cards};
use crate::core::views::Section;
use marquee_api_models::{MovieSummary, PersonDetail};
use std::cell::RefCell;

/// Proof of which `open` call a pending response belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalTicket {
    generation: u64,
    subject: i64,
}

/// Rendered person modal fields.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PersonModalView {
    /// Display name.
    pub name: String,
    /// Photo URL.
    pub photo: String,
    /// Role line for cast members.
    pub role: Option<String>,
    /// Birth date and age line.
    pub birth: Option<String>,
    /// Birthplace line.
    pub place: Option<String>,
    /// Biography or failure text.
    pub biography: String,
    /// Known-for titles.
    pub known_for: Section,
    /// Acting filmography.
    pub acting: Section,
    /// Directing filmography.
    pub directing: Section,
    /// Whether the extended fields are still loading.
    pub loading: bool,
}

/// Person detail modal.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PersonModal {
    /// Whether the region is visible.
    pub open: bool,
    generation: u64,
    subject: Option<i64>,
    /// Current field values.
    pub view: PersonModalView,
}

impl PersonModal {
    /// Reset to placeholders, show the caller's basics and reveal the modal.
    pub fn open(&mut self, basics: &PersonBasics, ctx: &RenderCtx) -> ModalTicket {
        self.generation = self.generation.wrapping_add(1);
        self.subject = Some(basics.id);
        self.view = PersonModalView {
            name: basics.name.clone(),
            photo: basics.photo.clone(),
            role: basics
                .role
                .as_deref()
                .map(|role| ctx.bundle.format("person.role", "", &[("role", role)])),
            biography: ctx.t("list.loading"),
            known_for: Section::hidden(),
            acting: Section::hidden(),
            directing: Section::hidden(),
            loading: true,
            ..PersonModalView::default()
        };
        self.open = true;
        ModalTicket {
            generation: self.generation,
            subject: basics.id,
        }
    }

    /// Whether `ticket` belongs to the most recent open.
    #[must_use]
    pub fn is_current(&self, ticket: ModalTicket) -> bool {
        ticket.generation == self.generation && self.subject == Some(ticket.subject)
    }

    /// Apply a fetched detail; returns `false` and changes nothing for stale tickets.
    pub fn populate(
        &mut self,
        ticket: ModalTicket,
        detail: Option<&PersonDetail>,
        ctx: &RenderCtx,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.view.loading = false;
        let Some(detail) = detail else {
            self.view.biography = ctx.t("person.failed");
            return true;
        };
        if let Some(name) = detail.name.as_deref() {
            self.view.name = name.to_string();
        }
        if detail.profile_url.is_some() || detail.profile_path.is_some() {
            self.view.photo = ctx
                .config
                .image_url(detail.profile_url.as_deref(), detail.profile_path.as_deref());
        }
        self.view.birth = detail.birthdate.as_deref().map(|raw| {
            let date = display_date(raw);
            let age = parse_date(raw).map_or_else(
                || ctx.t("fallback.unknown"),
                |birth| age_in(birth, ctx.current_year).to_string(),
            );
            ctx.bundle
                .format("person.birth", "", &[("date", &date), ("age", &age)])
        });
        self.view.place = detail
            .country
            .as_deref()
            .map(|place| ctx.bundle.format("person.place", "", &[("place", place)]));
        self.view.biography = detail
            .biography
            .clone()
            .unwrap_or_else(|| ctx.t("fallback.no_overview"));
        self.view.known_for = filmography(&detail.known_for, ctx);
        self.view.acting = filmography(&detail.movies_as_actor, ctx);
        self.view.directing = filmography(&detail.movies_as_director, ctx);
        true
    }

    /// Hide the modal, keeping its content.
    pub fn close(&mut self) {
        self.open = false;
    }
}

fn filmography(movies: &[MovieSummary], ctx: &RenderCtx) -> Section {
    if movies.is_empty() {
        return Section::hidden();
    }
    let cards: Vec<_> = movies
        .iter()
        .map(|movie| movie_card(CardKind::Filmography, movie, ctx))
        .collect();
    Section::visible(render_cards(CardKind::Filmography, &cards))
}

/// Something that owns a [`PersonModal`] and can lend it out briefly.
pub trait ModalHost {
    /// Run `apply` against the modal.
    fn with_person_modal<R>(&self, apply: impl FnOnce(&mut PersonModal) -> R) -> R;
}

impl ModalHost for RefCell<PersonModal> {
    fn with_person_modal<R>(&self, apply: impl FnOnce(&mut PersonModal) -> R) -> R {
        apply(&mut self.borrow_mut())
    }
}

/// Email confirmation modal shown before a verification code is sent.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ConfirmModal {
    /// Whether the region is visible.
    pub open: bool,
    /// Address awaiting confirmation.
    pub email: String,
}

impl ConfirmModal {
    /// Show the address for confirmation.
    pub fn open(&mut self, email: &str) {
        self.email = email.trim().to_string();
        self.open = true;
    }

    /// Hide the modal.
    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UiConfig;
    use crate::i18n::TranslationBundle;
    use serde_json::json;

    fn ctx() -> RenderCtx {
        RenderCtx::new(UiConfig::default(), TranslationBundle::default(), 2024)
    }

    fn basics(id: i64, name: &str) -> PersonBasics {
        PersonBasics {
            id,
            name: name.to_string(),
            photo: format!("{name}.png"),
            role: Some("Cobb".to_string()),
        }
    }

    fn detail(value: serde_json::Value) -> PersonDetail {
        serde_json::from_value(value).expect("person")
    }

    #[test]
    fn open_resets_to_basics_and_placeholders() {
        let ctx = ctx();
        let mut modal = PersonModal::default();
        let first = modal.open(&basics(1, "Leo"), &ctx);
        assert!(modal.populate(first, Some(&detail(json!({ "biography": "Bio" }))), &ctx));

        modal.close();
        assert!(!modal.open);
        assert_eq!(modal.view.biography, "Bio");

        modal.open(&basics(2, "Tom"), &ctx);
        assert!(modal.open);
        assert!(modal.view.loading);
        assert_eq!(modal.view.name, "Tom");
        assert_eq!(modal.view.role.as_deref(), Some("飾演：Cobb"));
        assert_eq!(modal.view.biography, "載入中…");
        assert!(modal.view.acting.hidden);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let ctx = ctx();
        let mut modal = PersonModal::default();
        let a = modal.open(&basics(1, "A"), &ctx);
        let b = modal.open(&basics(2, "B"), &ctx);
        assert!(modal.populate(b, Some(&detail(json!({ "name": "B full" }))), &ctx));
        assert!(!modal.populate(a, Some(&detail(json!({ "name": "A full" }))), &ctx));
        assert_eq!(modal.view.name, "B full");
    }

    #[test]
    fn reopening_same_person_invalidates_earlier_ticket() {
        let ctx = ctx();
        let mut modal = PersonModal::default();
        let first = modal.open(&basics(1, "A"), &ctx);
        let second = modal.open(&basics(1, "A"), &ctx);
        assert!(!modal.is_current(first));
        assert!(modal.is_current(second));
    }

    #[test]
    fn populate_renders_extended_fields() {
        let ctx = ctx();
        let mut modal = PersonModal::default();
        let ticket = modal.open(&basics(1, "Leo"), &ctx);
        let person = detail(json!({
            "birthdate": "Mon, 11 Nov 1974 00:00:00 GMT",
            "country": "Los Angeles",
            "movies_as_actor": [{ "movie_id": 27, "title": "Inception", "release_year": "2010" }]
        }));
        assert!(modal.populate(ticket, Some(&person), &ctx));
        assert_eq!(
            modal.view.birth.as_deref(),
            Some("🎂 生日：1974-11-11 (現年 50 歲)")
        );
        assert_eq!(modal.view.place.as_deref(), Some("🌍 出生地：Los Angeles"));
        assert_eq!(modal.view.biography, "尚無簡介。");
        assert!(!modal.view.acting.hidden);
        assert!(modal.view.acting.html.contains(r#"data-movie-id="27""#));
        assert!(modal.view.directing.hidden);
        assert!(modal.view.known_for.hidden);
    }

    #[test]
    fn failed_fetch_shows_failure_text() {
        let ctx = ctx();
        let mut modal = PersonModal::default();
        let ticket = modal.open(&basics(1, "Leo"), &ctx);
        assert!(modal.populate(ticket, None, &ctx));
        assert_eq!(modal.view.biography, "無法載入詳細資料。");
        assert_eq!(modal.view.name, "Leo");
        assert!(!modal.view.loading);
    }

    #[test]
    fn refcell_host_lends_the_modal() {
        let ctx = ctx();
        let host = RefCell::new(PersonModal::default());
        let ticket = host.with_person_modal(|modal| modal.open(&basics(5, "E"), &ctx));
        assert!(host.borrow().is_current(ticket));
    }

    #[test]
    fn confirm_modal_keeps_trimmed_email() {
        let mut confirm = ConfirmModal::default();
        confirm.open(" ann@example.com ");
        assert!(confirm.open);
        assert_eq!(confirm.email, "ann@example.com");
        confirm.close();
        assert!(!confirm.open);
    }
}
