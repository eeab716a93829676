//! HTTP client helpers (REST).

use crate::core::backend::MovieBackend;
use crate::core::error::ApiError;
use crate::core::logic::{
    COMMAND_PATH, LOGIN_PATH, REGISTER_PATH, REVIEW_ADD_PATH, TRENDING_PATH, movie_detail_path,
    person_path, reviews_path, search_path,
};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use marquee_api_models::{
    Ack, CommandRequest, LoginRequest, LoginResponse, MovieDetail, PersonDetail, RegisterRequest,
    ReviewList, ReviewSubmission, SearchResults, TrendingSets,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = Request::get(&self.url(path));
        if let Some(token) = token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        decode(req.send().await.map_err(transport)?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = Request::post(&self.url(path));
        if let Some(token) = token {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let response = req.json(body).map_err(transport)?.send().await.map_err(transport)?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let message = response
            .json::<Ack>()
            .await
            .ok()
            .and_then(|ack| ack.reason().map(ToString::to_string));
        return Err(ApiError::Status { status, message });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl MovieBackend for ApiClient {
    async fn trending(&self) -> Result<TrendingSets, ApiError> {
        self.get_json(TRENDING_PATH, None).await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        self.get_json(&search_path(query), None).await
    }

    async fn movie_detail(&self, id: i64, token: Option<&str>) -> Result<MovieDetail, ApiError> {
        self.get_json(&movie_detail_path(id), token).await
    }

    async fn reviews(&self, movie_id: i64) -> Result<ReviewList, ApiError> {
        self.get_json(&reviews_path(movie_id), None).await
    }

    async fn person(&self, id: i64) -> Result<PersonDetail, ApiError> {
        self.get_json(&person_path(id), None).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json(LOGIN_PATH, request, None).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Ack, ApiError> {
        self.post_json(REGISTER_PATH, request, None).await
    }

    async fn submit_review(
        &self,
        token: &str,
        submission: &ReviewSubmission,
    ) -> Result<Ack, ApiError> {
        self.post_json(REVIEW_ADD_PATH, submission, Some(token)).await
    }

    async fn command(&self, request: &CommandRequest) -> Result<Value, ApiError> {
        let response = Request::post(&self.url(COMMAND_PATH))
            .json(request)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let ok = response.ok();
        match response.json::<Value>().await {
            Ok(value) => Ok(value),
            Err(err) if ok => Err(ApiError::Decode(err.to_string())),
            Err(_) => Err(ApiError::Status {
                status,
                message: None,
            }),
        }
    }
}
