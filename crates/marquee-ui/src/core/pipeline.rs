//! Page controllers: one request per operation, mapped to an outcome.
//!
//! # Design
//! - Controllers never touch the DOM; they return outcome enums the views apply.
//! - Failures are logged and folded into outcomes; nothing is retried.
//! - A 401 on an authenticated call clears the session before reporting.

use crate::core::auth::{AuthFormError, Credentials, Identity, RegistrationForm, Session};
use crate::core::backend::{MovieBackend, VerificationMailer};
use crate::core::error::ApiError;
use crate::core::modal::ModalHost;
use crate::core::render::{PersonBasics, RenderCtx};
use crate::core::storage::KeyValueStore;
use crate::core::verify::{PendingVerification, VerifyError};
use marquee_api_models::{
    CommandRequest, MovieDetail, MovieSummary, PersonDetail, PersonSummary, Review,
    ReviewSubmission, ReviewTarget, TrendingSets,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fetch the four trending sets; `None` leaves the rows on their placeholders.
pub async fn load_trending<B>(backend: &B) -> Option<TrendingSets>
where
    B: MovieBackend + ?Sized,
{
    match backend.trending().await {
        Ok(sets) => {
            debug!(
                day = sets.day.len(),
                week = sets.week.len(),
                now_playing = sets.now_playing.len(),
                upcoming = sets.upcoming.len(),
                "trending sets loaded"
            );
            Some(sets)
        }
        Err(err) => {
            warn!(error = %err, "trending fetch failed");
            None
        }
    }
}

/// Result of a search submission.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Blank input; no request was issued.
    EmptyQuery,
    /// Nothing survived filtering.
    NoMatches,
    /// Filtered and capped results.
    Results {
        /// Movies with a known release year.
        movies: Vec<MovieSummary>,
        /// Matching people.
        people: Vec<PersonSummary>,
    },
    /// Request or decode failure.
    Failed,
}

/// Run a combined search, dropping undated movies and capping each list.
pub async fn run_search<B>(backend: &B, query: &str, limit: usize) -> SearchOutcome
where
    B: MovieBackend + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return SearchOutcome::EmptyQuery;
    }
    match backend.search(query).await {
        Ok(results) => {
            let movies: Vec<MovieSummary> = results
                .movie
                .into_iter()
                .filter(|movie| movie.year().is_some())
                .take(limit)
                .collect();
            let people: Vec<PersonSummary> = results.person.into_iter().take(limit).collect();
            debug!(query, movies = movies.len(), people = people.len(), "search completed");
            if movies.is_empty() && people.is_empty() {
                SearchOutcome::NoMatches
            } else {
                SearchOutcome::Results { movies, people }
            }
        }
        Err(err) => {
            warn!(query, error = %err, "search failed");
            SearchOutcome::Failed
        }
    }
}

/// Result of the movie detail request.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailOutcome {
    /// Detail payload to render.
    Loaded(Box<MovieDetail>),
    /// The backend requires a session for this title.
    LoginRequired,
    /// The backend explained why it could not serve the title.
    Rejected(String),
    /// Transport or decode failure.
    Failed,
}

/// Result of a review list request.
#[derive(Clone, Debug, PartialEq)]
pub enum ReviewsOutcome {
    /// Reviews in backend order.
    Loaded(Vec<Review>),
    /// The list could not be fetched.
    Failed,
}

/// Everything the detail page needs after navigation.
#[derive(Clone, Debug, PartialEq)]
pub struct MoviePage {
    /// Detail outcome.
    pub detail: DetailOutcome,
    /// Reviews, absent when the detail demanded a login.
    pub reviews: Option<ReviewsOutcome>,
}

/// Load a detail page: the detail first, then its reviews unless a login is required.
///
/// A 401 while a token is stored means the token is stale, so the session is
/// cleared before the login prompt is reported.
pub async fn load_movie_page<B, S>(backend: &B, session: &Session<S>, movie_id: i64) -> MoviePage
where
    B: MovieBackend + ?Sized,
    S: KeyValueStore,
{
    let token = session.token();
    let detail = match backend.movie_detail(movie_id, token.as_deref()).await {
        Ok(detail) => match detail.error.clone() {
            Some(error) => {
                warn!(movie_id, error = %error, "movie detail reported an error");
                DetailOutcome::Rejected(error)
            }
            None => DetailOutcome::Loaded(Box::new(detail)),
        },
        Err(err) if err.is_unauthorized() => {
            if token.is_some() {
                warn!(movie_id, "movie detail rejected the stored token; clearing session");
                session.clear();
            } else {
                info!(movie_id, "movie detail requires a login");
            }
            DetailOutcome::LoginRequired
        }
        Err(ApiError::Status {
            status,
            message: Some(message),
        }) => {
            warn!(movie_id, status, error = %message, "movie detail rejected");
            DetailOutcome::Rejected(message)
        }
        Err(err) => {
            warn!(movie_id, error = %err, "movie detail failed");
            DetailOutcome::Failed
        }
    };
    let reviews = match detail {
        DetailOutcome::LoginRequired => None,
        _ => Some(load_reviews(backend, movie_id).await),
    };
    MoviePage { detail, reviews }
}

/// Fetch the review list for a movie.
pub async fn load_reviews<B>(backend: &B, movie_id: i64) -> ReviewsOutcome
where
    B: MovieBackend + ?Sized,
{
    match backend.reviews(movie_id).await {
        Ok(list) => ReviewsOutcome::Loaded(list.reviews),
        Err(err) => {
            warn!(movie_id, error = %err, "review list failed");
            ReviewsOutcome::Failed
        }
    }
}

/// Fetch a person; any failure yields `None`.
pub async fn fetch_person<B>(backend: &B, person_id: i64) -> Option<PersonDetail>
where
    B: MovieBackend + ?Sized,
{
    match backend.person(person_id).await {
        Ok(detail) => Some(detail),
        Err(err) => {
            warn!(person_id, error = %err, "person detail failed");
            None
        }
    }
}

/// Open the person modal with basics, then populate it once the detail arrives.
///
/// Returns `false` when a newer open superseded this one and the response was dropped.
pub async fn show_person<B, H>(backend: &B, host: &H, basics: PersonBasics, ctx: &RenderCtx) -> bool
where
    B: MovieBackend + ?Sized,
    H: ModalHost + ?Sized,
{
    let ticket = host.with_person_modal(|modal| modal.open(&basics, ctx));
    let detail = fetch_person(backend, basics.id).await;
    let applied = host.with_person_modal(|modal| modal.populate(ticket, detail.as_ref(), ctx));
    if !applied {
        debug!(person_id = basics.id, "discarded stale person detail");
    }
    applied
}

/// Result of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session persisted.
    LoggedIn(Identity),
    /// Form validation failed; nothing was sent.
    Invalid(AuthFormError),
    /// The backend refused the credentials.
    Rejected(String),
    /// Transport or decode failure.
    Failed(String),
}

/// Log in and persist the issued session.
pub async fn login<B, S>(backend: &B, session: &Session<S>, credentials: &Credentials) -> LoginOutcome
where
    B: MovieBackend + ?Sized,
    S: KeyValueStore,
{
    let request = match credentials.validate() {
        Ok(request) => request,
        Err(err) => return LoginOutcome::Invalid(err),
    };
    match backend.login(&request).await {
        Ok(response) => match response.token.filter(|token| response.success && !token.is_empty()) {
            Some(token) => {
                let identity = Identity {
                    email: response.user_email.unwrap_or(request.email),
                    nickname: response.user_nickname,
                };
                session.establish(&token, &identity);
                info!(email = %identity.email, "logged in");
                LoginOutcome::LoggedIn(identity)
            }
            None => LoginOutcome::Rejected(response.message.unwrap_or_default()),
        },
        Err(ApiError::Status {
            message: Some(message),
            ..
        }) => LoginOutcome::Rejected(message),
        Err(err) => {
            warn!(error = %err, "login failed");
            LoginOutcome::Failed(err.user_message())
        }
    }
}

/// Result of sending a verification code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendCodeOutcome {
    /// The email widget accepted the message.
    Sent,
    /// No email was entered.
    Invalid(AuthFormError),
    /// Delivery failed.
    Failed(String),
}

/// Issue a fresh code for `email` and hand it to the mailer.
pub async fn send_verification<M, S>(
    mailer: &M,
    pending: &PendingVerification<S>,
    email: &str,
    entropy: u128,
    now_ms: i64,
) -> SendCodeOutcome
where
    M: VerificationMailer + ?Sized,
    S: KeyValueStore,
{
    let email = email.trim();
    if email.is_empty() {
        return SendCodeOutcome::Invalid(AuthFormError::MissingEmail);
    }
    let code = pending.issue(email, entropy, now_ms);
    match mailer.send_code(email, &code).await {
        Ok(()) => {
            info!(email, "verification code sent");
            SendCodeOutcome::Sent
        }
        Err(err) => {
            warn!(email, error = %err, "verification code delivery failed");
            SendCodeOutcome::Failed(err.to_string())
        }
    }
}

/// Result of a registration attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Account created.
    Registered,
    /// Form validation failed; nothing was sent.
    Invalid(AuthFormError),
    /// The typed-back code was refused locally; nothing was sent.
    Unverified(VerifyError),
    /// The backend refused the registration.
    Rejected(String),
    /// Transport or decode failure.
    Failed(String),
}

/// Verify the pending code and register the account.
pub async fn register<B, S>(
    backend: &B,
    pending: &PendingVerification<S>,
    form: &RegistrationForm,
    now_ms: i64,
) -> RegisterOutcome
where
    B: MovieBackend + ?Sized,
    S: KeyValueStore,
{
    let request = match form.validate() {
        Ok(request) => request,
        Err(err) => return RegisterOutcome::Invalid(err),
    };
    if let Err(err) = pending.check(&request.email, &request.code, now_ms) {
        info!(email = %request.email, error = %err, "verification code refused");
        return RegisterOutcome::Unverified(err);
    }
    match backend.register(&request).await {
        Ok(ack) if ack.success => {
            pending.clear();
            info!(email = %request.email, "registered");
            RegisterOutcome::Registered
        }
        Ok(ack) => RegisterOutcome::Rejected(ack.reason().unwrap_or_default().to_string()),
        Err(ApiError::Status {
            message: Some(message),
            ..
        }) => RegisterOutcome::Rejected(message),
        Err(err) => {
            warn!(error = %err, "registration failed");
            RegisterOutcome::Failed(err.user_message())
        }
    }
}

/// Rating used when the form leaves it untouched.
pub const DEFAULT_REVIEW_RATING: u8 = 5;

/// Review form contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Review text.
    pub body: String,
    /// Star rating.
    pub rating: u8,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            body: String::new(),
            rating: DEFAULT_REVIEW_RATING,
        }
    }
}

/// Review form validation failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ReviewDraftError {
    /// The body is blank.
    #[error("review body is empty")]
    EmptyBody,
    /// The rating is outside `1..=5`.
    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),
}

impl ReviewDraft {
    /// Build the submission for a movie.
    ///
    /// # Errors
    ///
    /// Returns a [`ReviewDraftError`] when the body is blank or the rating is out of range.
    pub fn validate(&self, movie_id: i64) -> Result<ReviewSubmission, ReviewDraftError> {
        let body = self.body.trim();
        if body.is_empty() {
            return Err(ReviewDraftError::EmptyBody);
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewDraftError::RatingOutOfRange(self.rating));
        }
        Ok(ReviewSubmission {
            target_type: ReviewTarget::Movie,
            target_id: movie_id,
            rating: self.rating,
            title: None,
            body: body.to_string(),
        })
    }
}

/// Result of a review submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; the list should be reloaded.
    Submitted,
    /// Form validation failed; nothing was sent.
    Invalid(ReviewDraftError),
    /// The token was missing or rejected; the session has been cleared.
    SessionExpired,
    /// The backend refused the review.
    Rejected(String),
    /// Transport or decode failure.
    Failed(String),
}

/// Submit a review as the logged-in user.
pub async fn submit_review<B, S>(
    backend: &B,
    session: &Session<S>,
    movie_id: i64,
    draft: &ReviewDraft,
) -> SubmitOutcome
where
    B: MovieBackend + ?Sized,
    S: KeyValueStore,
{
    let submission = match draft.validate(movie_id) {
        Ok(submission) => submission,
        Err(err) => return SubmitOutcome::Invalid(err),
    };
    let Some(token) = session.token() else {
        session.clear();
        return SubmitOutcome::SessionExpired;
    };
    match backend.submit_review(&token, &submission).await {
        Ok(ack) if ack.success => {
            info!(movie_id, rating = submission.rating, "review submitted");
            SubmitOutcome::Submitted
        }
        Ok(ack) => SubmitOutcome::Rejected(ack.reason().unwrap_or_default().to_string()),
        Err(err) if err.is_unauthorized() => {
            warn!(movie_id, "review rejected with 401; clearing session");
            session.clear();
            SubmitOutcome::SessionExpired
        }
        Err(ApiError::Status {
            message: Some(message),
            ..
        }) => SubmitOutcome::Rejected(message),
        Err(err) => {
            warn!(movie_id, error = %err, "review submission failed");
            SubmitOutcome::Failed(err.user_message())
        }
    }
}

/// Result of relaying a command line.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// Blank line; nothing was sent.
    Ignored,
    /// Raw response body.
    Output(Value),
    /// Transport failure.
    Failed(String),
}

/// Forward a command line verbatim and return whatever JSON came back.
pub async fn relay_command<B>(backend: &B, line: &str) -> CommandOutcome
where
    B: MovieBackend + ?Sized,
{
    let command = line.trim();
    if command.is_empty() {
        return CommandOutcome::Ignored;
    }
    let request = CommandRequest {
        command: command.to_string(),
    };
    match backend.command(&request).await {
        Ok(value) => CommandOutcome::Output(value),
        Err(err) => {
            warn!(error = %err, "command relay failed");
            CommandOutcome::Failed(err.user_message())
        }
    }
}
