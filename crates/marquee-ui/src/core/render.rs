//! Card templating for every list the catalog renders.
//!
//! # Design
//! - One template function; a per-kind layout table supplies the CSS classes.
//! - Builders resolve the record's two possible shapes and all fallbacks up front.
//! - Every interpolated value is escaped; click targets travel as `data-*` attributes.

use crate::core::config::UiConfig;
use crate::core::logic::{display_date, escape_html, format_rating};
use crate::i18n::TranslationBundle;
use marquee_api_models::{CastCredit, MovieSummary, PersonSummary, Review};
use std::fmt::Write;
use std::rc::Rc;

/// Shared inputs for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderCtx {
    /// Front-end configuration.
    pub config: Rc<UiConfig>,
    /// Active translations.
    pub bundle: Rc<TranslationBundle>,
    /// Calendar year used for age calculations.
    pub current_year: i32,
}

impl RenderCtx {
    /// Build a context.
    #[must_use]
    pub fn new(config: UiConfig, bundle: TranslationBundle, current_year: i32) -> Self {
        Self {
            config: Rc::new(config),
            bundle: Rc::new(bundle),
            current_year,
        }
    }

    /// Translate a key without a caller default.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.bundle.text(key, "")
    }

    /// Rating text, `N/A` when absent.
    #[must_use]
    pub fn rating_text(&self, score: Option<f64>) -> String {
        format_rating(score).unwrap_or_else(|| self.bundle.text("fallback.rating", "N/A"))
    }

    /// Star-prefixed rating badge.
    #[must_use]
    pub fn rating_badge(&self, score: Option<f64>) -> String {
        format!("⭐ {}", self.rating_text(score))
    }
}

/// Person identity carried by a card click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonBasics {
    /// Person identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Resolved photo URL.
    pub photo: String,
    /// Character played, for cast cards.
    pub role: Option<String>,
}

/// What a card click opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardTarget {
    /// Navigate to the movie detail page.
    Movie(i64),
    /// Open the person modal.
    Person(PersonBasics),
    /// Not clickable.
    Static,
}

impl CardTarget {
    /// Rebuild a target from a clicked element's `data-*` attributes.
    #[must_use]
    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>) -> Option<Self> {
        if let Some(id) = attr("data-movie-id").and_then(|raw| raw.parse::<i64>().ok()) {
            return Some(Self::Movie(id));
        }
        let id = attr("data-person-id").and_then(|raw| raw.parse::<i64>().ok())?;
        Some(Self::Person(PersonBasics {
            id,
            name: attr("data-person-name").unwrap_or_default(),
            photo: attr("data-person-photo").unwrap_or_default(),
            role: attr("data-person-role").filter(|role| !role.is_empty()),
        }))
    }

    fn write_attributes(&self, out: &mut String) {
        match self {
            Self::Movie(id) => {
                let _ = write!(out, r#" data-movie-id="{id}""#);
            }
            Self::Person(person) => {
                let _ = write!(
                    out,
                    r#" data-person-id="{}" data-person-name="{}" data-person-photo="{}" data-person-role="{}""#,
                    person.id,
                    escape_html(&person.name),
                    escape_html(&person.photo),
                    escape_html(person.role.as_deref().unwrap_or_default()),
                );
            }
            Self::Static => {}
        }
    }
}

/// Card variants rendered by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    /// Trending row entry.
    Rank,
    /// Movie search result.
    SearchMovie,
    /// Person search result.
    SearchPerson,
    /// Billed cast member on the detail page.
    Cast,
    /// Filmography entry inside the person modal.
    Filmography,
    /// Review on the detail page.
    Review,
}

struct CardLayout {
    container: &'static str,
    image: Option<&'static str>,
    title: &'static str,
    lines: &'static [&'static str],
}

const fn layout(kind: CardKind) -> CardLayout {
    match kind {
        CardKind::Rank => CardLayout {
            container: "rank-card",
            image: Some("rank-poster"),
            title: "rank-title",
            lines: &["rank-meta", "rank-rating"],
        },
        CardKind::SearchMovie => CardLayout {
            container: "movie-card",
            image: Some("movie-poster"),
            title: "movie-title",
            lines: &["movie-meta", "movie-rating"],
        },
        CardKind::SearchPerson => CardLayout {
            container: "person-card",
            image: Some("person-photo"),
            title: "person-name",
            lines: &["person-subtitle"],
        },
        CardKind::Cast => CardLayout {
            container: "person-card cast-card",
            image: Some("person-photo"),
            title: "person-name",
            lines: &["person-role"],
        },
        CardKind::Filmography => CardLayout {
            container: "mini-card",
            image: Some("mini-poster"),
            title: "mini-title",
            lines: &["mini-meta"],
        },
        CardKind::Review => CardLayout {
            container: "review-card",
            image: None,
            title: "review-user",
            lines: &["review-rating", "review-text", "review-date"],
        },
    }
}

/// Resolved card content, ready for templating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// Click target.
    pub target: CardTarget,
    /// Image URL, when the kind shows one.
    pub image: Option<String>,
    /// Headline.
    pub title: String,
    /// Secondary lines, matched positionally to the kind's line classes.
    pub lines: Vec<Option<String>>,
}

/// Build a movie card for a trending row, search section or filmography.
#[must_use]
pub fn movie_card(kind: CardKind, movie: &MovieSummary, ctx: &RenderCtx) -> Card {
    let title = movie.display_title().map_or_else(
        || match kind {
            CardKind::Filmography => ctx.t("fallback.unknown_title"),
            _ => ctx.t("fallback.untitled"),
        },
        ToString::to_string,
    );
    let year = movie.year().unwrap_or_else(|| match kind {
        CardKind::Rank => ctx.t("fallback.unknown"),
        CardKind::Filmography => String::new(),
        _ => ctx.t("fallback.unknown_year"),
    });
    let lines = match kind {
        CardKind::Filmography => {
            let role = movie
                .character_name
                .as_deref()
                .map(|role| ctx.bundle.format("person.role", "", &[("role", role)]));
            let meta = match role {
                Some(role) if year.is_empty() => role,
                Some(role) => format!("{year} · {role}"),
                None => year,
            };
            vec![Some(meta).filter(|meta| !meta.is_empty())]
        }
        _ => vec![Some(year), Some(ctx.rating_badge(movie.score()))],
    };
    Card {
        target: movie
            .target_id()
            .map_or(CardTarget::Static, CardTarget::Movie),
        image: Some(
            ctx.config
                .image_url(movie.poster_url.as_deref(), movie.poster_path.as_deref()),
        ),
        title,
        lines,
    }
}

/// Build a person search result card.
#[must_use]
pub fn person_card(person: &PersonSummary, ctx: &RenderCtx) -> Card {
    let name = person
        .name
        .clone()
        .unwrap_or_else(|| ctx.bundle.text("fallback.unknown_name", "Unknown"));
    let photo = ctx
        .config
        .image_url(person.profile_url.as_deref(), person.profile_path.as_deref());
    let subtitle = person
        .original_name
        .clone()
        .filter(|original| *original != name);
    Card {
        target: person.person_id().map_or(CardTarget::Static, |id| {
            CardTarget::Person(PersonBasics {
                id,
                name: name.clone(),
                photo: photo.clone(),
                role: None,
            })
        }),
        image: Some(photo),
        title: name,
        lines: vec![subtitle],
    }
}

/// Build a billed cast card.
#[must_use]
pub fn cast_card(credit: &CastCredit, ctx: &RenderCtx) -> Card {
    let name = credit
        .name
        .clone()
        .unwrap_or_else(|| ctx.bundle.text("fallback.unknown_name", "Unknown"));
    let photo = ctx
        .config
        .image_url(credit.profile_url.as_deref(), credit.profile_path.as_deref());
    let role = credit.role().map(ToString::to_string);
    Card {
        target: credit.person_id().map_or(CardTarget::Static, |id| {
            CardTarget::Person(PersonBasics {
                id,
                name: name.clone(),
                photo: photo.clone(),
                role: role.clone(),
            })
        }),
        image: Some(photo),
        title: name,
        lines: vec![
            role.map(|role| ctx.bundle.format("person.role", "", &[("role", &role)])),
        ],
    }
}

/// Build a review card.
#[must_use]
pub fn review_card(review: &Review, ctx: &RenderCtx) -> Card {
    Card {
        target: CardTarget::Static,
        image: None,
        title: review
            .author()
            .map_or_else(|| ctx.t("fallback.anonymous"), ToString::to_string),
        lines: vec![
            Some(ctx.rating_badge(review.rating)),
            Some(review.text().unwrap_or_default().to_string()),
            Some(
                review
                    .created_at
                    .as_deref()
                    .map_or_else(|| ctx.t("fallback.unknown"), display_date),
            ),
        ],
    }
}

/// Render cards of one kind into escaped HTML.
#[must_use]
pub fn render_cards(kind: CardKind, cards: &[Card]) -> String {
    let layout = layout(kind);
    let mut out = String::new();
    for card in cards {
        let _ = write!(out, r#"<div class="{}""#, layout.container);
        card.target.write_attributes(&mut out);
        out.push('>');
        if let (Some(class), Some(src)) = (layout.image, card.image.as_deref()) {
            let _ = write!(
                out,
                r#"<img src="{}" class="{class}" alt="{}" loading="lazy">"#,
                escape_html(src),
                escape_html(&card.title)
            );
        }
        let _ = write!(
            out,
            r#"<div class="{}">{}</div>"#,
            layout.title,
            escape_html(&card.title)
        );
        for (class, line) in layout.lines.iter().zip(&card.lines) {
            if let Some(text) = line {
                let _ = write!(out, r#"<div class="{class}">{}</div>"#, escape_html(text));
            }
        }
        out.push_str("</div>");
    }
    out
}

/// Render cards, or an empty-state hint when there are none.
#[must_use]
pub fn render_list(kind: CardKind, cards: &[Card], empty_text: &str) -> String {
    if cards.is_empty() {
        empty_hint(empty_text)
    } else {
        render_cards(kind, cards)
    }
}

/// Muted placeholder paragraph.
#[must_use]
pub fn empty_hint(text: &str) -> String {
    format!(r#"<p class="empty-hint">{}</p>"#, escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> RenderCtx {
        RenderCtx::new(UiConfig::default(), TranslationBundle::default(), 2024)
    }

    fn movie(value: serde_json::Value) -> MovieSummary {
        serde_json::from_value(value).expect("movie")
    }

    #[test]
    fn rank_card_uses_fallbacks_for_sparse_records() {
        let ctx = ctx();
        let card = movie_card(CardKind::Rank, &movie(json!({ "id": 9 })), &ctx);
        assert_eq!(card.target, CardTarget::Movie(9));
        assert_eq!(card.title, "未命名電影");
        assert_eq!(card.image.as_deref(), Some("No_image_available.png"));
        assert_eq!(
            card.lines,
            vec![Some("未知".to_string()), Some("⭐ N/A".to_string())]
        );
    }

    #[test]
    fn search_card_uses_its_own_unknown_year_label() {
        let ctx = ctx();
        let card = movie_card(
            CardKind::SearchMovie,
            &movie(json!({ "movie_id": 3, "title": "Heat", "rating": 8.3 })),
            &ctx,
        );
        assert_eq!(card.lines[0].as_deref(), Some("未知年份"));
        assert_eq!(card.lines[1].as_deref(), Some("⭐ 8.3"));
    }

    #[test]
    fn filmography_card_appends_role() {
        let ctx = ctx();
        let card = movie_card(
            CardKind::Filmography,
            &movie(json!({ "movie_id": 1, "release_year": "1995", "character_name": "Neil" })),
            &ctx,
        );
        assert_eq!(card.lines, vec![Some("1995 · 飾演：Neil".to_string())]);

        let bare = movie_card(CardKind::Filmography, &movie(json!({ "movie_id": 2 })), &ctx);
        assert_eq!(bare.title, "未知片名");
        assert_eq!(bare.lines, vec![None]);
    }

    #[test]
    fn cast_card_carries_person_attributes() {
        let ctx = ctx();
        let credit: CastCredit = serde_json::from_value(json!({
            "actor_id": 4,
            "name": "Val \"K\"",
            "profile_path": "/v.jpg",
            "character": "Chris"
        }))
        .expect("credit");
        let html = render_cards(CardKind::Cast, &[cast_card(&credit, &ctx)]);
        assert!(html.contains(r#"data-person-id="4""#));
        assert!(html.contains(r#"data-person-name="Val &quot;K&quot;""#));
        assert!(html.contains(r#"data-person-photo="https://image.tmdb.org/t/p/w500/v.jpg""#));
        assert!(html.contains(r#"<div class="person-role">飾演：Chris</div>"#));
    }

    #[test]
    fn rendered_markup_is_escaped() {
        let ctx = ctx();
        let card = movie_card(
            CardKind::Rank,
            &movie(json!({ "movie_id": 1, "title": "<script>alert(1)</script>" })),
            &ctx,
        );
        let html = render_cards(CardKind::Rank, &[card]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.starts_with(r#"<div class="rank-card" data-movie-id="1">"#));
    }

    #[test]
    fn review_card_falls_back_to_anonymous_and_unknown_rating() {
        let ctx = ctx();
        let review: Review =
            serde_json::from_value(json!({ "content": "Nice" })).expect("review");
        let html = render_cards(CardKind::Review, &[review_card(&review, &ctx)]);
        assert!(html.contains(r#"<div class="review-user">匿名</div>"#));
        assert!(html.contains(r#"<div class="review-text">Nice</div>"#));
        assert!(html.contains(r#"<div class="review-rating">⭐ N/A</div>"#));
        assert!(html.contains(r#"<div class="review-date">未知</div>"#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn empty_list_renders_hint() {
        assert_eq!(
            render_list(CardKind::Rank, &[], "暫無資料。"),
            r#"<p class="empty-hint">暫無資料。</p>"#
        );
    }

    #[test]
    fn targets_round_trip_through_attributes() {
        let person = CardTarget::Person(PersonBasics {
            id: 7,
            name: "A".to_string(),
            photo: "p.png".to_string(),
            role: None,
        });
        let attrs = [
            ("data-person-id", "7"),
            ("data-person-name", "A"),
            ("data-person-photo", "p.png"),
            ("data-person-role", ""),
        ];
        let lookup = |name: &str| {
            attrs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        };
        assert_eq!(CardTarget::from_attributes(lookup), Some(person));
        assert_eq!(
            CardTarget::from_attributes(|name: &str| {
                (name == "data-movie-id").then(|| "12".to_string())
            }),
            Some(CardTarget::Movie(12))
        );
        assert_eq!(CardTarget::from_attributes(|_: &str| None), None);
    }
}
