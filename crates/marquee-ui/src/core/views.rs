//! Typed view-models for each page region.
//!
//! # Design
//! - Components render these structs; controllers' outcomes are applied through methods.
//! - Views only hold localized strings and pre-rendered, escaped card markup.
//! - Failures leave placeholders in place unless the region has its own failure text.

use crate::core::auth::{AuthFormError, PasswordVisibility};
use crate::core::logic::join_names;
use crate::core::pipeline::{
    DetailOutcome, LoginOutcome, RegisterOutcome, ReviewDraftError, ReviewsOutcome,
    SearchOutcome, SendCodeOutcome, SubmitOutcome,
};
use crate::core::render::{
    Card, CardKind, RenderCtx, cast_card, empty_hint, movie_card, person_card, render_cards,
    render_list, review_card,
};
use crate::core::verify::VerifyError;
use marquee_api_models::{CastCredit, MovieDetail, MovieSummary, TrendingSets};

/// A container that is either hidden or shows rendered markup.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Section {
    /// Whether the container is hidden.
    pub hidden: bool,
    /// Rendered inner HTML.
    pub html: String,
}

impl Section {
    /// Visible container with markup.
    #[must_use]
    pub const fn visible(html: String) -> Self {
        Self {
            hidden: false,
            html,
        }
    }

    /// Hidden, empty container.
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            hidden: true,
            html: String::new(),
        }
    }
}

/// Trending rows on the home page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendingRow {
    /// Trending today.
    Today,
    /// Trending this week.
    Week,
    /// In theatres.
    NowPlaying,
    /// Upcoming releases.
    Upcoming,
}

impl TrendingRow {
    /// All rows in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Today, Self::Week, Self::NowPlaying, Self::Upcoming]
    }

    /// Translation key for the row heading.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Today => "trending.today",
            Self::Week => "trending.week",
            Self::NowPlaying => "trending.now_playing",
            Self::Upcoming => "trending.upcoming",
        }
    }

    /// DOM id of the row container.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Today => "rankToday",
            Self::Week => "rankWeek",
            Self::NowPlaying => "rankNowPlaying",
            Self::Upcoming => "rankUpcoming",
        }
    }

    fn pick(self, sets: &TrendingSets) -> &[MovieSummary] {
        match self {
            Self::Today => &sets.day,
            Self::Week => &sets.week,
            Self::NowPlaying => &sets.now_playing,
            Self::Upcoming => &sets.upcoming,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Today => 0,
            Self::Week => 1,
            Self::NowPlaying => 2,
            Self::Upcoming => 3,
        }
    }
}

/// Home page trending rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeView {
    rows: [Section; 4],
}

impl HomeView {
    /// Rows showing the loading placeholder.
    #[must_use]
    pub fn loading(ctx: &RenderCtx) -> Self {
        let placeholder = Section::visible(empty_hint(&ctx.t("list.loading")));
        Self {
            rows: [
                placeholder.clone(),
                placeholder.clone(),
                placeholder.clone(),
                placeholder,
            ],
        }
    }

    /// Row content.
    #[must_use]
    pub const fn row(&self, row: TrendingRow) -> &Section {
        &self.rows[row.index()]
    }

    /// Render every row from one payload, capped per row.
    pub fn apply_trending(&mut self, sets: &TrendingSets, ctx: &RenderCtx) {
        let empty = ctx.t("list.empty");
        for row in TrendingRow::all() {
            let cards: Vec<Card> = row
                .pick(sets)
                .iter()
                .take(ctx.config.caps.trending)
                .map(|movie| movie_card(CardKind::Rank, movie, ctx))
                .collect();
            self.rows[row.index()] = Section::visible(render_list(CardKind::Rank, &cards, &empty));
        }
    }
}

/// Search message and result sections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchView {
    /// Status line under the search box.
    pub message: Option<String>,
    /// Whether the results region is revealed.
    pub results_visible: bool,
    /// Movie results.
    pub movies: Section,
    /// People results.
    pub people: Section,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            message: None,
            results_visible: false,
            movies: Section::hidden(),
            people: Section::hidden(),
        }
    }
}

impl SearchView {
    /// Start a search; returns the trimmed query when a request should be issued.
    pub fn begin(&mut self, query: &str, ctx: &RenderCtx) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            self.apply(&SearchOutcome::EmptyQuery, ctx);
            return None;
        }
        self.message = Some(ctx.t("search.searching"));
        self.results_visible = true;
        Some(query.to_string())
    }

    /// Apply a search outcome.
    pub fn apply(&mut self, outcome: &SearchOutcome, ctx: &RenderCtx) {
        match outcome {
            SearchOutcome::EmptyQuery => self.show_message(ctx.t("search.empty_query")),
            SearchOutcome::NoMatches => self.show_message(ctx.t("search.no_results")),
            SearchOutcome::Failed => self.show_message(ctx.t("search.failed")),
            SearchOutcome::Results { movies, people } => {
                self.message = None;
                self.results_visible = true;
                let movie_cards: Vec<Card> = movies
                    .iter()
                    .map(|movie| movie_card(CardKind::SearchMovie, movie, ctx))
                    .collect();
                let person_cards: Vec<Card> =
                    people.iter().map(|person| person_card(person, ctx)).collect();
                self.movies = section_for(CardKind::SearchMovie, &movie_cards);
                self.people = section_for(CardKind::SearchPerson, &person_cards);
            }
        }
    }

    fn show_message(&mut self, message: String) {
        self.message = Some(message);
        self.movies = Section::hidden();
        self.people = Section::hidden();
    }
}

fn section_for(kind: CardKind, cards: &[Card]) -> Section {
    if cards.is_empty() {
        Section::hidden()
    } else {
        Section::visible(render_cards(kind, cards))
    }
}

/// Detail page phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MoviePhase {
    /// Waiting for the detail.
    #[default]
    Loading,
    /// Detail rendered.
    Ready,
    /// The backend demanded a login.
    LoginRequired,
    /// Loading failed.
    Failed,
}

/// Movie detail page fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieView {
    /// Current phase.
    pub phase: MoviePhase,
    /// Poster URL.
    pub poster: String,
    /// Title or status headline.
    pub title: String,
    /// `{year} · TMDB 評分 {rating}`.
    pub meta: String,
    /// Genre line.
    pub genres: String,
    /// Overview, or error/failure text.
    pub overview: String,
    /// Runtime line.
    pub runtime: String,
    /// Rating line.
    pub rating: String,
    /// Directors line, empty when none are credited.
    pub directors: String,
    /// Billed cast row.
    pub cast: Section,
    /// Review list.
    pub reviews: Section,
}

impl MovieView {
    /// Placeholder state shown while the detail loads.
    #[must_use]
    pub fn loading(ctx: &RenderCtx) -> Self {
        let loading = ctx.t("list.loading");
        Self {
            phase: MoviePhase::Loading,
            poster: ctx.config.placeholder_image.clone(),
            title: loading.clone(),
            meta: String::new(),
            genres: String::new(),
            overview: String::new(),
            runtime: String::new(),
            rating: String::new(),
            directors: String::new(),
            cast: Section::hidden(),
            reviews: Section::visible(empty_hint(&loading)),
        }
    }

    /// Apply the detail outcome.
    pub fn apply_detail(&mut self, outcome: &DetailOutcome, ctx: &RenderCtx) {
        match outcome {
            DetailOutcome::Loaded(detail) => self.fill(detail, ctx),
            DetailOutcome::LoginRequired => {
                self.phase = MoviePhase::LoginRequired;
                self.title = ctx.t("movie.locked_title");
                self.overview = ctx.t("movie.locked_body");
                self.cast = Section::hidden();
                self.reviews = Section::hidden();
            }
            DetailOutcome::Rejected(error) => {
                self.phase = MoviePhase::Failed;
                self.overview = ctx.bundle.format("movie.error", "", &[("error", error)]);
            }
            DetailOutcome::Failed => {
                self.phase = MoviePhase::Failed;
                if self.overview.is_empty() {
                    self.overview = ctx.t("movie.load_failed");
                }
            }
        }
    }

    fn fill(&mut self, detail: &MovieDetail, ctx: &RenderCtx) {
        let rating = ctx.rating_text(detail.score());
        let year = detail.year().unwrap_or_else(|| ctx.t("fallback.unknown_year"));
        let genres = join_names(detail.genre_list().iter().map(String::as_str), ", ");
        let genres = if genres.is_empty() {
            ctx.t("fallback.no_genre")
        } else {
            genres
        };
        let directors = join_names(
            detail.directors.iter().filter_map(|person| person.name.as_deref()),
            "、",
        );

        self.phase = MoviePhase::Ready;
        self.poster = ctx
            .config
            .image_url(detail.poster_url.as_deref(), detail.poster_path.as_deref());
        self.title = detail
            .title
            .clone()
            .or_else(|| detail.original_title.clone())
            .unwrap_or_else(|| ctx.t("fallback.untitled"));
        self.meta = ctx
            .bundle
            .format("movie.meta", "", &[("year", &year), ("rating", &rating)]);
        self.genres = ctx.bundle.format("movie.genres", "", &[("genres", &genres)]);
        self.overview = detail
            .overview
            .clone()
            .unwrap_or_else(|| ctx.t("fallback.no_overview"));
        self.runtime = detail
            .runtime
            .filter(|minutes| *minutes > 0)
            .map_or_else(
                || ctx.t("fallback.no_runtime"),
                |minutes| {
                    ctx.bundle
                        .format("movie.runtime", "", &[("minutes", &minutes.to_string())])
                },
            );
        self.rating = ctx.bundle.format("movie.rating", "", &[("rating", &rating)]);
        self.directors = if directors.is_empty() {
            String::new()
        } else {
            ctx.bundle.format("movie.directors", "", &[("names", &directors)])
        };
        let cards: Vec<Card> = billed_cast(&detail.actors, ctx.config.caps.cast)
            .into_iter()
            .map(|credit| cast_card(credit, ctx))
            .collect();
        self.cast = section_for(CardKind::Cast, &cards);
    }

    /// Apply a review list outcome; failures keep the current content.
    pub fn apply_reviews(&mut self, outcome: &ReviewsOutcome, ctx: &RenderCtx) {
        if let ReviewsOutcome::Loaded(reviews) = outcome {
            let cards: Vec<Card> = reviews.iter().map(|review| review_card(review, ctx)).collect();
            self.reviews = Section::visible(render_list(
                CardKind::Review,
                &cards,
                &ctx.t("list.no_reviews"),
            ));
        }
    }
}

/// Cast sorted by billing order (unbilled last), capped.
#[must_use]
pub fn billed_cast(actors: &[CastCredit], cap: usize) -> Vec<&CastCredit> {
    let mut sorted: Vec<&CastCredit> = actors.iter().collect();
    sorted.sort_by_key(|credit| credit.billing_order.unwrap_or(i64::MAX));
    sorted.truncate(cap);
    sorted
}

/// Tone of a form notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    /// Neutral progress text.
    Info,
    /// Completed successfully.
    Success,
    /// Something went wrong.
    Error,
}

/// A one-line message under a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Message tone.
    pub tone: NoticeTone,
    /// Localized text.
    pub text: String,
}

impl Notice {
    fn new(tone: NoticeTone, text: String) -> Self {
        Self { tone, text }
    }
}

/// Tabs in the auth modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthTab {
    /// Login form.
    #[default]
    Login,
    /// Registration form.
    Register,
}

/// Auth modal state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthForm {
    /// Whether the modal is visible.
    pub open: bool,
    /// Active tab.
    pub tab: AuthTab,
    /// Message under the form.
    pub notice: Option<Notice>,
    /// Whether a request is in flight.
    pub busy: bool,
    /// Registration password reveal state.
    pub password: PasswordVisibility,
}

impl AuthForm {
    /// Show the modal on the given tab with a clean slate.
    pub fn open_on(&mut self, tab: AuthTab) {
        self.open = true;
        self.tab = tab;
        self.notice = None;
        self.busy = false;
        self.password = PasswordVisibility::Hidden;
    }

    /// Switch tabs, dropping any message.
    pub fn switch_to(&mut self, tab: AuthTab) {
        self.tab = tab;
        self.notice = None;
    }

    /// Hide the modal.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Mark a request as in flight with a progress message.
    pub fn start(&mut self, text: String) {
        self.busy = true;
        self.notice = Some(Notice::new(NoticeTone::Info, text));
    }

    /// Apply a login outcome. Success closes the modal.
    pub fn apply_login(&mut self, outcome: &LoginOutcome, ctx: &RenderCtx) {
        self.busy = false;
        self.notice = match outcome {
            LoginOutcome::LoggedIn(_) => {
                self.open = false;
                None
            }
            LoginOutcome::Invalid(err) => Some(form_error(*err, ctx)),
            LoginOutcome::Rejected(reason) | LoginOutcome::Failed(reason) => Some(Notice::new(
                NoticeTone::Error,
                ctx.bundle.format("auth.login_failed", "", &[("reason", reason)]),
            )),
        };
    }

    /// Apply a send-code outcome.
    pub fn apply_send(&mut self, outcome: &SendCodeOutcome, ctx: &RenderCtx) {
        self.busy = false;
        self.notice = Some(match outcome {
            SendCodeOutcome::Sent => Notice::new(NoticeTone::Success, ctx.t("auth.sent")),
            SendCodeOutcome::Invalid(err) => form_error(*err, ctx),
            SendCodeOutcome::Failed(_) => Notice::new(NoticeTone::Error, ctx.t("auth.send_failed")),
        });
    }

    /// Apply a registration outcome. Success switches to the login tab.
    pub fn apply_register(&mut self, outcome: &RegisterOutcome, ctx: &RenderCtx) {
        self.busy = false;
        let notice = match outcome {
            RegisterOutcome::Registered => {
                self.tab = AuthTab::Login;
                Notice::new(NoticeTone::Success, ctx.t("auth.registered"))
            }
            RegisterOutcome::Invalid(err) => form_error(*err, ctx),
            RegisterOutcome::Unverified(err) => {
                Notice::new(NoticeTone::Error, ctx.t(verify_error_key(*err)))
            }
            RegisterOutcome::Rejected(reason) | RegisterOutcome::Failed(reason) => Notice::new(
                NoticeTone::Error,
                ctx.bundle.format("auth.register_failed", "", &[("reason", reason)]),
            ),
        };
        self.notice = Some(notice);
    }
}

fn form_error(err: AuthFormError, ctx: &RenderCtx) -> Notice {
    let key = match err {
        AuthFormError::MissingEmail => "auth.missing_email",
        AuthFormError::MissingFields => "auth.missing_fields",
    };
    Notice::new(NoticeTone::Error, ctx.t(key))
}

const fn verify_error_key(err: VerifyError) -> &'static str {
    match err {
        VerifyError::NotIssued => "auth.code_missing",
        VerifyError::EmailMismatch => "auth.email_mismatch",
        VerifyError::Expired => "auth.code_expired",
        VerifyError::Mismatch => "auth.code_mismatch",
    }
}

/// Message for a review submission outcome; `None` on success.
#[must_use]
pub fn review_notice(outcome: &SubmitOutcome, ctx: &RenderCtx) -> Option<Notice> {
    let text = match outcome {
        SubmitOutcome::Submitted => return None,
        SubmitOutcome::Invalid(ReviewDraftError::EmptyBody) => ctx.t("review.empty_body"),
        SubmitOutcome::Invalid(ReviewDraftError::RatingOutOfRange(_)) => ctx.t("review.bad_rating"),
        SubmitOutcome::SessionExpired => ctx.t("review.expired"),
        SubmitOutcome::Rejected(reason) | SubmitOutcome::Failed(reason) => {
            ctx.bundle.format("review.failed", "", &[("reason", reason)])
        }
    };
    Some(Notice::new(NoticeTone::Error, text))
}
