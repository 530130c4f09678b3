// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex, MutexGuard};

use mq_core::{Genre, Movie, MovieId, MoviePage, MoviePatch, MovieQuery, QueuedOperation};
use tokio::sync::Notify;

use super::remote::{Remote, RemoteError, RemoteFuture, RemoteResult};

/// What the mock answers on `GET /health`.
#[derive(Debug, Clone)]
pub enum HealthReply {
    /// 200 with `{"status":"OK"}`.
    Object,
    /// 200 with a JSON value that is not an object.
    NotObject,
    /// Non-success status.
    Status(u16),
    /// Never answers.
    Hang,
}

/// A call observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Health,
    List { page: u32 },
    Create { title: Option<String> },
    Update { id: MovieId },
    Delete { id: MovieId },
}

/// Lets a test hold mutation calls until it releases them.
#[derive(Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

struct MockState {
    movies: Vec<Movie>,
    next_id: MovieId,
    health: HealthReply,
    reachable: bool,
    list_fails: bool,
    ignore_page: bool,
    reject_status: Option<u16>,
    fail_mutation_at: Option<usize>,
    mutation_calls: usize,
    calls: Vec<Call>,
    gate: Option<Gate>,
}

/// In-memory movie service.
pub struct MockRemote {
    state: Mutex<MockState>,
}

impl MockRemote {
    pub fn new() -> Self {
        MockRemote {
            state: Mutex::new(MockState {
                movies: Vec::new(),
                next_id: 100,
                health: HealthReply::Object,
                reachable: true,
                list_fails: false,
                ignore_page: false,
                reject_status: None,
                fail_mutation_at: None,
                mutation_calls: 0,
                calls: Vec::new(),
                gate: None,
            }),
        }
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let remote = Self::new();
        remote.lock().movies = movies;
        remote
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn set_health(&self, reply: HealthReply) {
        self.lock().health = reply;
    }

    /// Makes every call fail as if the connection was refused.
    pub fn set_reachable(&self, reachable: bool) {
        self.lock().reachable = reachable;
    }

    /// Makes listings fail with a server error while mutations succeed.
    pub fn set_list_failing(&self, failing: bool) {
        self.lock().list_fails = failing;
    }

    /// Serves the first page for every listing request.
    pub fn set_ignore_page(&self, ignore: bool) {
        self.lock().ignore_page = ignore;
    }

    /// Answers every mutation call with `status`.
    pub fn reject_mutations(&self, status: u16) {
        self.lock().reject_status = Some(status);
    }

    /// Fails the `index`th mutation call (0-based, counted across the mock's
    /// lifetime).
    pub fn fail_mutation_at(&self, index: usize) {
        self.lock().fail_mutation_at = Some(index);
    }

    pub fn gate(&self) -> Gate {
        let gate = Gate::default();
        self.lock().gate = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Health | Call::List { .. }))
            .collect()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.lock().movies.clone()
    }

    fn connection_check(&self, call: Call) -> RemoteResult<()> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.reachable {
            Ok(())
        } else {
            Err(RemoteError::Request("connection refused".to_string()))
        }
    }

    async fn before_mutation(&self, call: Call) -> RemoteResult<()> {
        let (fail, reject, gate) = {
            let mut state = self.lock();
            state.calls.push(call);
            let index = state.mutation_calls;
            state.mutation_calls += 1;
            let fail = !state.reachable || state.fail_mutation_at == Some(index);
            (fail, state.reject_status, state.gate.clone())
        };

        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if fail {
            return Err(RemoteError::Request("connection reset".to_string()));
        }
        if let Some(status) = reject {
            return Err(RemoteError::Status {
                status,
                body: "rejected".to_string(),
            });
        }
        Ok(())
    }
}

impl Remote for MockRemote {
    fn health(&self) -> RemoteFuture<'_, serde_json::Value> {
        Box::pin(async move {
            self.connection_check(Call::Health)?;
            let reply = self.lock().health.clone();
            match reply {
                HealthReply::Object => Ok(serde_json::json!({ "status": "OK" })),
                HealthReply::NotObject => Ok(serde_json::json!("OK")),
                HealthReply::Status(status) => Err(RemoteError::Status {
                    status,
                    body: String::new(),
                }),
                HealthReply::Hang => std::future::pending().await,
            }
        })
    }

    fn list_movies<'a>(&'a self, query: &'a MovieQuery) -> RemoteFuture<'a, MoviePage> {
        Box::pin(async move {
            self.connection_check(Call::List { page: query.page })?;
            if self.lock().list_fails {
                return Err(RemoteError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            let movies = self.movies();
            if self.lock().ignore_page {
                return Ok(MovieQuery {
                    page: 1,
                    ..query.clone()
                }
                .run_local(&movies));
            }
            Ok(query.run_local(&movies))
        })
    }

    fn create_movie<'a>(&'a self, data: &'a MoviePatch) -> RemoteFuture<'a, Movie> {
        Box::pin(async move {
            self.before_mutation(Call::Create {
                title: data.title.clone(),
            })
            .await?;
            let mut state = self.lock();
            state.next_id += 1;
            let movie = data.clone().into_movie(state.next_id);
            state.movies.push(movie.clone());
            Ok(movie)
        })
    }

    fn update_movie<'a>(
        &'a self,
        id: MovieId,
        data: &'a MoviePatch,
    ) -> RemoteFuture<'a, Movie> {
        Box::pin(async move {
            self.before_mutation(Call::Update { id }).await?;
            let mut state = self.lock();
            let movie = state
                .movies
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(RemoteError::NotFound)?;
            data.apply_to(movie);
            Ok(movie.clone())
        })
    }

    fn delete_movie(&self, id: MovieId) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.before_mutation(Call::Delete { id }).await?;
            let mut state = self.lock();
            let before = state.movies.len();
            state.movies.retain(|m| m.id != id);
            if state.movies.len() == before {
                return Err(RemoteError::NotFound);
            }
            Ok(())
        })
    }
}

/// A patch that sets only the title.
pub fn title_patch(title: &str) -> MoviePatch {
    MoviePatch {
        title: Some(title.to_string()),
        ..MoviePatch::default()
    }
}

/// A complete server-side record.
pub fn server_movie(id: MovieId, title: &str) -> Movie {
    Movie::new(id, title)
        .with_genre(Genre::new(1, "Drama"))
        .with_rating(7.5)
}

pub fn add_op(id: MovieId, title: &str) -> QueuedOperation {
    QueuedOperation::add(Some(id), title_patch(title))
}

pub fn update_op(id: MovieId, title: &str) -> QueuedOperation {
    QueuedOperation::update(id, title_patch(title))
}
