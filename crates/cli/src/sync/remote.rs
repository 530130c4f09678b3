// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote movie service abstraction.
//!
//! Provides a trait-based client layer that enables:
//! - Real HTTP calls against the catalog backend for production
//! - Mock remotes for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use mq_core::{Movie, MovieId, MoviePage, MoviePatch, MovieQuery};
use reqwest::{RequestBuilder, Response, StatusCode};

use crate::config::Config;

/// Error type for remote operations.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a response (DNS, connect, reset).
    #[error("request failed: {0}")]
    Request(String),

    /// The call did not finish within its bound.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The target record does not exist on the server.
    #[error("not found")]
    NotFound,

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not what the endpoint promises.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Returns true if the server definitively refused the call, so sending
    /// it again unchanged will not help.
    pub fn is_rejection(&self) -> bool {
        match self {
            RemoteError::NotFound => true,
            RemoteError::Status { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by [`Remote`] methods.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = RemoteResult<T>> + Send + 'a>>;

/// The movie service as seen by the client.
///
/// This trait abstracts over the actual HTTP stack, allowing for easy
/// testing with mock implementations.
pub trait Remote: Send + Sync {
    /// `GET /health`. Returns the parsed body.
    fn health(&self) -> RemoteFuture<'_, serde_json::Value>;

    /// `GET /movies` with paging, genre and sort parameters.
    fn list_movies<'a>(&'a self, query: &'a MovieQuery) -> RemoteFuture<'a, MoviePage>;

    /// `POST /movies`. Returns the created record with its server id.
    fn create_movie<'a>(&'a self, data: &'a MoviePatch) -> RemoteFuture<'a, Movie>;

    /// `PUT /movies/{id}`. Returns the updated record.
    fn update_movie<'a>(&'a self, id: MovieId, data: &'a MoviePatch)
        -> RemoteFuture<'a, Movie>;

    /// `DELETE /movies/{id}`.
    fn delete_movie(&self, id: MovieId) -> RemoteFuture<'_, ()>;
}

/// Runs a remote call, failing with [`RemoteError::Timeout`] if it takes
/// longer than `limit`.
pub async fn bounded<T, F>(limit: Duration, call: F) -> RemoteResult<T>
where
    F: Future<Output = RemoteResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(RemoteError::Timeout(limit)),
    }
}

/// HTTP implementation using reqwest.
pub struct HttpRemote {
    client: reqwest::Client,
    health_url: String,
    movies_url: String,
    token: Option<String>,
}

impl HttpRemote {
    /// Create a client for the backend described by `config`.
    ///
    /// The request timeout applies to every call as a backstop; callers
    /// still bound individual calls with [`bounded`].
    pub fn new(config: &Config) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.sync.request_timeout())
            .build()
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let base = config.backend_url.trim_end_matches('/');
        let prefix = config.api_prefix.trim_end_matches('/');

        Ok(HttpRemote {
            client,
            health_url: format!("{base}/health"),
            movies_url: format!("{base}{prefix}/movies"),
            token: config.token.clone(),
        })
    }

    /// The URL probed by [`Remote::health`].
    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    fn movie_url(&self, id: MovieId) -> String {
        format!("{}/{id}", self.movies_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn send(request: RequestBuilder) -> RemoteResult<Response> {
    let response = request.send().await.map_err(map_reqwest)?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> RemoteResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| RemoteError::Decode(e.to_string()))
}

fn map_reqwest(e: reqwest::Error) -> RemoteError {
    RemoteError::Request(e.to_string())
}

impl Remote for HttpRemote {
    fn health(&self) -> RemoteFuture<'_, serde_json::Value> {
        Box::pin(async move {
            let request = self
                .client
                .get(&self.health_url)
                .header(reqwest::header::CACHE_CONTROL, "no-store");
            decode(send(request).await?).await
        })
    }

    fn list_movies<'a>(&'a self, query: &'a MovieQuery) -> RemoteFuture<'a, MoviePage> {
        Box::pin(async move {
            let request = self
                .authorize(self.client.get(&self.movies_url))
                .query(&query.to_pairs());
            decode(send(request).await?).await
        })
    }

    fn create_movie<'a>(&'a self, data: &'a MoviePatch) -> RemoteFuture<'a, Movie> {
        Box::pin(async move {
            let request = self.authorize(self.client.post(&self.movies_url)).json(data);
            decode(send(request).await?).await
        })
    }

    fn update_movie<'a>(
        &'a self,
        id: MovieId,
        data: &'a MoviePatch,
    ) -> RemoteFuture<'a, Movie> {
        Box::pin(async move {
            let request = self.authorize(self.client.put(self.movie_url(id))).json(data);
            decode(send(request).await?).await
        })
    }

    fn delete_movie(&self, id: MovieId) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            let request = self.authorize(self.client.delete(self.movie_url(id)));
            send(request).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
