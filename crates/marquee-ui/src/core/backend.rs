//! Seams to the outside world: the catalog backend and the email widget.
//!
//! # Design
//! - Futures are `!Send`; everything runs on the browser's single event loop.
//! - Implementations only move bytes; controllers in `pipeline` own the policy.

use crate::core::error::ApiError;
use crate::core::verify::VerificationCode;
use async_trait::async_trait;
use marquee_api_models::{
    Ack, CommandRequest, LoginRequest, LoginResponse, MovieDetail, PersonDetail, RegisterRequest,
    ReviewList, ReviewSubmission, SearchResults, TrendingSets,
};
use serde_json::Value;
use thiserror::Error;

/// Catalog backend operations.
#[async_trait(?Send)]
pub trait MovieBackend {
    /// `GET /api/trending/all`.
    async fn trending(&self) -> Result<TrendingSets, ApiError>;
    /// `GET /api/search/all?query=`.
    async fn search(&self, query: &str) -> Result<SearchResults, ApiError>;
    /// `GET /movies/tmdb/{id}`, with the bearer token when one exists.
    async fn movie_detail(&self, id: i64, token: Option<&str>) -> Result<MovieDetail, ApiError>;
    /// `GET /reviews/{id}`.
    async fn reviews(&self, movie_id: i64) -> Result<ReviewList, ApiError>;
    /// `GET /actors/{id}`.
    async fn person(&self, id: i64) -> Result<PersonDetail, ApiError>;
    /// `POST /auth/login`.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    /// `POST /auth/register`.
    async fn register(&self, request: &RegisterRequest) -> Result<Ack, ApiError>;
    /// `POST /reviews/add` with the bearer token.
    async fn submit_review(
        &self,
        token: &str,
        submission: &ReviewSubmission,
    ) -> Result<Ack, ApiError>;
    /// `POST /api/cmd`; JSON error bodies are returned as values, not errors.
    async fn command(&self, request: &CommandRequest) -> Result<Value, ApiError>;
}

/// Email delivery failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("verification email failed: {0}")]
pub struct MailError(pub String);

/// Delivers verification codes by email.
#[async_trait(?Send)]
pub trait VerificationMailer {
    /// Send `code` to `email`.
    async fn send_code(&self, email: &str, code: &VerificationCode) -> Result<(), MailError>;
}
