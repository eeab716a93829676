//! In-memory backend and mailer shared by the controller tests.
#![allow(dead_code, unreachable_pub)]

use async_trait::async_trait;
use marquee_api_models::{
    Ack, CommandRequest, LoginRequest, LoginResponse, MovieDetail, PersonDetail, RegisterRequest,
    Review, ReviewList, ReviewSubmission, SearchResults, TrendingSets,
};
use marquee_ui::core::backend::{MailError, MovieBackend, VerificationMailer};
use marquee_ui::core::config::UiConfig;
use marquee_ui::core::error::ApiError;
use marquee_ui::core::render::RenderCtx;
use marquee_ui::core::verify::VerificationCode;
use marquee_ui::i18n::TranslationBundle;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use tokio::sync::oneshot;

pub const VALID_TOKEN: &str = "token-abc";

pub fn ctx() -> RenderCtx {
    RenderCtx::new(UiConfig::default(), TranslationBundle::default(), 2024)
}

pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("fixture decodes")
}

/// Scriptable backend. Unset responses fail with a transport error.
#[derive(Default)]
pub struct FakeBackend {
    pub trending: RefCell<Option<TrendingSets>>,
    pub search: RefCell<Option<SearchResults>>,
    pub details: RefCell<HashMap<i64, MovieDetail>>,
    pub locked: RefCell<HashSet<i64>>,
    pub reviews: RefCell<HashMap<i64, Vec<Review>>>,
    pub people: RefCell<HashMap<i64, PersonDetail>>,
    pub person_gates: RefCell<HashMap<i64, oneshot::Receiver<()>>>,
    pub accounts: RefCell<HashMap<String, String>>,
    pub registered: RefCell<Vec<RegisterRequest>>,
    pub submissions: RefCell<Vec<ReviewSubmission>>,
    pub commands: RefCell<Vec<String>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|call| call.starts_with(prefix))
    }

    /// Hold `person(id)` until the returned sender fires.
    pub fn gate_person(&self, id: i64) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.person_gates.borrow_mut().insert(id, rx);
        tx
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

fn offline() -> ApiError {
    ApiError::Transport("connection refused".to_string())
}

#[async_trait(?Send)]
impl MovieBackend for FakeBackend {
    async fn trending(&self) -> Result<TrendingSets, ApiError> {
        self.record("trending".to_string());
        self.trending.borrow().clone().ok_or_else(offline)
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        self.record(format!("search:{query}"));
        self.search.borrow().clone().ok_or_else(offline)
    }

    async fn movie_detail(&self, id: i64, token: Option<&str>) -> Result<MovieDetail, ApiError> {
        self.record(format!("detail:{id}"));
        if self.locked.borrow().contains(&id) && token != Some(VALID_TOKEN) {
            return Err(ApiError::Status {
                status: 401,
                message: None,
            });
        }
        self.details.borrow().get(&id).cloned().ok_or(ApiError::Status {
            status: 404,
            message: Some("Movie not found".to_string()),
        })
    }

    async fn reviews(&self, movie_id: i64) -> Result<ReviewList, ApiError> {
        self.record(format!("reviews:{movie_id}"));
        Ok(ReviewList {
            reviews: self.reviews.borrow().get(&movie_id).cloned().unwrap_or_default(),
        })
    }

    async fn person(&self, id: i64) -> Result<PersonDetail, ApiError> {
        self.record(format!("person:{id}"));
        let gate = self.person_gates.borrow_mut().remove(&id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.people.borrow().get(&id).cloned().ok_or(ApiError::Status {
            status: 404,
            message: None,
        })
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record(format!("login:{}", request.email));
        match self.accounts.borrow().get(&request.email) {
            Some(password) if *password == request.password => Ok(LoginResponse {
                success: true,
                token: Some(VALID_TOKEN.to_string()),
                user_email: Some(request.email.clone()),
                user_nickname: Some("Ann".to_string()),
                message: None,
            }),
            _ => Err(ApiError::Status {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            }),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Ack, ApiError> {
        self.record(format!("register:{}", request.email));
        if self.accounts.borrow().contains_key(&request.email) {
            return Ok(Ack {
                success: false,
                message: Some("Email already registered".to_string()),
                error: None,
            });
        }
        self.accounts
            .borrow_mut()
            .insert(request.email.clone(), request.password.clone());
        self.registered.borrow_mut().push(request.clone());
        Ok(Ack {
            success: true,
            message: None,
            error: None,
        })
    }

    async fn submit_review(
        &self,
        token: &str,
        submission: &ReviewSubmission,
    ) -> Result<Ack, ApiError> {
        self.record(format!("submit:{}", submission.target_id));
        if token != VALID_TOKEN {
            return Err(ApiError::Status {
                status: 401,
                message: Some("Token expired".to_string()),
            });
        }
        self.submissions.borrow_mut().push(submission.clone());
        let review: Review = decode(json!({
            "username": "Ann",
            "rating": submission.rating,
            "body": submission.body,
            "created_at": "2024-05-01T10:00:00Z"
        }));
        self.reviews
            .borrow_mut()
            .entry(submission.target_id)
            .or_default()
            .insert(0, review);
        Ok(Ack {
            success: true,
            message: Some("ok".to_string()),
            error: None,
        })
    }

    async fn command(&self, request: &CommandRequest) -> Result<Value, ApiError> {
        self.record(format!("command:{}", request.command));
        self.commands.borrow_mut().push(request.command.clone());
        if request.command == "offline" {
            return Err(offline());
        }
        Ok(json!({ "ok": request.command.starts_with("ping"), "echo": request.command }))
    }
}

/// Mailer that records deliveries, or fails when `fail` is set.
#[derive(Default)]
pub struct FakeMailer {
    pub sent: RefCell<Vec<(String, String)>>,
    pub fail: bool,
}

#[async_trait(?Send)]
impl VerificationMailer for FakeMailer {
    async fn send_code(&self, email: &str, code: &VerificationCode) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError("widget unavailable".to_string()));
        }
        self.sent
            .borrow_mut()
            .push((email.to_string(), code.as_str().to_string()));
        Ok(())
    }
}
