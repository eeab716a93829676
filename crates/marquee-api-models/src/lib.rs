#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
//! Shared HTTP DTOs for the Marquee movie catalog backend.
//!
//! The backend fronts a third-party metadata provider and forwards some of its
//! records untouched, so the same logical entity can arrive in two shapes
//! (`movie_id`/`poster_url`/`rating` from the catalog database, or
//! `id`/`poster_path`/`vote_average` straight from the provider). Every field is
//! optional and decoded leniently; callers resolve the shape through the
//! accessor methods instead of reading raw fields.

use serde::{Deserialize, Serialize};

mod lenient;

/// Target kind recorded with a review.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewTarget {
    /// Review attached to a movie.
    #[default]
    Movie,
    /// Review attached to a person.
    Actor,
}

/// Movie record as listed in trending rows, search results and filmographies.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct MovieSummary {
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Catalog database identifier.
    pub movie_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Provider identifier when the record was forwarded untouched.
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Localised title.
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Original-language title.
    pub original_title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Absolute poster URL stored by the catalog.
    pub poster_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Provider-relative poster path.
    pub poster_path: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Release year as stored by the catalog.
    pub release_year: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Full release date (`YYYY-MM-DD`) from the provider.
    pub release_date: Option<String>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    /// Catalog rating.
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    /// Provider vote average.
    pub vote_average: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Comma-joined genre names stored by the catalog.
    pub genre: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Character played, present on acting filmography rows.
    pub character_name: Option<String>,
}

impl MovieSummary {
    /// Identifier used to navigate to the detail page.
    #[must_use]
    pub const fn target_id(&self) -> Option<i64> {
        match self.movie_id {
            Some(id) => Some(id),
            None => self.id,
        }
    }

    /// Best available display title.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.original_title.as_deref())
    }

    /// Rating from whichever source supplied one.
    #[must_use]
    pub const fn score(&self) -> Option<f64> {
        match self.rating {
            Some(value) => Some(value),
            None => self.vote_average,
        }
    }

    /// Four-digit release year, when any release information is present.
    #[must_use]
    pub fn year(&self) -> Option<String> {
        year_of(self.release_year.as_deref(), self.release_date.as_deref())
    }
}

/// Cast credit attached to a movie detail.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct CastCredit {
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Catalog person identifier.
    pub actor_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Provider person identifier.
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Display name.
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Absolute profile photo URL.
    pub profile_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Provider-relative profile photo path.
    pub profile_path: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Character name as stored by the catalog.
    pub character_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Character name as reported by the provider.
    pub character: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Billing order (lower is more prominent).
    pub billing_order: Option<i64>,
}

impl CastCredit {
    /// Identifier used to open the person modal.
    #[must_use]
    pub const fn person_id(&self) -> Option<i64> {
        match self.actor_id {
            Some(id) => Some(id),
            None => self.id,
        }
    }

    /// Character played, from whichever source supplied one.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.character_name
            .as_deref()
            .or(self.character.as_deref())
    }
}

/// Full movie detail returned by `GET /movies/tmdb/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct MovieDetail {
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Catalog database identifier.
    pub movie_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Provider identifier.
    pub tmdb_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Localised title.
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Original-language title.
    pub original_title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Absolute poster URL.
    pub poster_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Provider-relative poster path.
    pub poster_path: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Release year.
    pub release_year: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Full release date.
    pub release_date: Option<String>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    /// Catalog rating.
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    /// Provider vote average.
    pub vote_average: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Runtime in minutes.
    pub runtime: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Comma-joined genre names.
    pub genre: Option<String>,
    #[serde(deserialize_with = "lenient::genre_names")]
    /// Genre names as a list (provider shape).
    pub genres: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Plot overview.
    pub overview: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    /// Billed cast.
    pub actors: Vec<CastCredit>,
    #[serde(deserialize_with = "lenient::list")]
    /// Credited directors.
    pub directors: Vec<PersonSummary>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Error text when the backend could not resolve the movie.
    pub error: Option<String>,
}

impl MovieDetail {
    /// Rating from whichever source supplied one.
    #[must_use]
    pub const fn score(&self) -> Option<f64> {
        match self.rating {
            Some(value) => Some(value),
            None => self.vote_average,
        }
    }

    /// Four-digit release year, when known.
    #[must_use]
    pub fn year(&self) -> Option<String> {
        year_of(self.release_year.as_deref(), self.release_date.as_deref())
    }

    /// Genre names from the list shape, else split from the joined string.
    #[must_use]
    pub fn genre_list(&self) -> Vec<String> {
        if !self.genres.is_empty() {
            return self.genres.clone();
        }
        self.genre
            .as_deref()
            .map(|joined| {
                joined
                    .split([',', '/'])
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Person record as listed in search results and director credits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct PersonSummary {
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Catalog person identifier.
    pub actor_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Provider person identifier.
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Display name.
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Original-language name.
    pub original_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Absolute profile photo URL.
    pub profile_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Provider-relative profile photo path.
    pub profile_path: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Birth date in any of the backend's date renderings.
    pub birthdate: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Birthplace.
    pub country: Option<String>,
}

impl PersonSummary {
    /// Identifier used to open the person modal.
    #[must_use]
    pub const fn person_id(&self) -> Option<i64> {
        match self.actor_id {
            Some(id) => Some(id),
            None => self.id,
        }
    }
}

/// Person detail returned by `GET /actors/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct PersonDetail {
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Catalog person identifier.
    pub actor_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Display name.
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Absolute profile photo URL.
    pub profile_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Provider-relative profile photo path.
    pub profile_path: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Birth date.
    pub birthdate: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Birthplace.
    pub country: Option<String>,
    #[serde(alias = "bio", deserialize_with = "lenient::opt_string")]
    /// Biography text.
    pub biography: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    /// Headline titles the person is known for.
    pub known_for: Vec<MovieSummary>,
    #[serde(deserialize_with = "lenient::list")]
    /// Filmography as a performer.
    pub movies_as_actor: Vec<MovieSummary>,
    #[serde(deserialize_with = "lenient::list")]
    /// Filmography as a director.
    pub movies_as_director: Vec<MovieSummary>,
}

/// The four trending sets returned by `GET /api/trending/all`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct TrendingSets {
    #[serde(deserialize_with = "lenient::list")]
    /// Trending today.
    pub day: Vec<MovieSummary>,
    #[serde(deserialize_with = "lenient::list")]
    /// Trending this week.
    pub week: Vec<MovieSummary>,
    #[serde(deserialize_with = "lenient::list")]
    /// Currently in theatres.
    pub now_playing: Vec<MovieSummary>,
    #[serde(deserialize_with = "lenient::list")]
    /// Upcoming releases.
    pub upcoming: Vec<MovieSummary>,
}

/// Combined search payload returned by `GET /api/search/all`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct SearchResults {
    #[serde(alias = "movies", deserialize_with = "lenient::list")]
    /// Matching movies.
    pub movie: Vec<MovieSummary>,
    #[serde(alias = "people", deserialize_with = "lenient::list")]
    /// Matching people.
    pub person: Vec<PersonSummary>,
}

/// Review row returned by `GET /reviews/{movieId}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct Review {
    #[serde(deserialize_with = "lenient::opt_i64")]
    /// Review identifier.
    pub review_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    /// Star rating.
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Optional headline.
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Review text.
    pub body: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Review text under the legacy key.
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Creation timestamp as rendered by the backend.
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Author username.
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Author email.
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    /// Author email under the legacy key.
    pub user_email: Option<String>,
}

impl Review {
    /// Author identity, preferring the username.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .or(self.user_email.as_deref())
    }

    /// Review text from either key.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.body.as_deref().or(self.content.as_deref())
    }
}

/// Envelope for `GET /reviews/{movieId}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct ReviewList {
    #[serde(deserialize_with = "lenient::list")]
    /// Reviews, newest first.
    pub reviews: Vec<Review>,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain password (transport is expected to be TLS).
    pub password: String,
}

/// Response for `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LoginResponse {
    /// Whether the credentials were accepted.
    pub success: bool,
    /// Bearer token on success.
    pub token: Option<String>,
    /// Email echoed back for display.
    pub user_email: Option<String>,
    #[serde(alias = "username")]
    /// Optional display name.
    pub user_nickname: Option<String>,
    /// Failure reason.
    pub message: Option<String>,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Verification code the user re-entered.
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    /// Optional display name.
    pub username: Option<String>,
}

/// Body for `POST /reviews/add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewSubmission {
    /// Kind of entity being reviewed.
    pub target_type: ReviewTarget,
    /// Identifier of the reviewed entity.
    pub target_id: i64,
    /// Star rating (1..=5).
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    /// Optional headline.
    pub title: Option<String>,
    /// Review text.
    pub body: String,
}

/// Body for `POST /api/cmd`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandRequest {
    /// Opaque command line, forwarded verbatim.
    pub command: String,
}

/// Generic `{success, message}` acknowledgement used by mutating endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Ack {
    /// Whether the mutation was applied.
    pub success: bool,
    /// Human-readable status.
    pub message: Option<String>,
    /// Error text some endpoints use instead of `message`.
    pub error: Option<String>,
}

impl Ack {
    /// Best available explanation text.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

fn year_of(release_year: Option<&str>, release_date: Option<&str>) -> Option<String> {
    [release_year, release_date]
        .into_iter()
        .flatten()
        .find_map(leading_year)
}

fn leading_year(raw: &str) -> Option<String> {
    raw.trim()
        .get(..4)
        .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
        .map(ToString::to_string)
}
