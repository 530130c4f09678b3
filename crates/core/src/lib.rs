// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mq-core: Shared library for the marquee movie catalog client
//!
//! This crate provides the movie data model, queued mutations, the local
//! apply fold, and the local-wins merge used by the offline sync runtime.

pub mod apply;
pub mod clock;
pub mod error;
pub mod jsonl;
pub mod merge;
pub mod movie;
pub mod op;
pub mod query;
pub mod status;

pub use apply::Apply;
pub use clock::{ClockSource, IdSource, SystemClock, TempIdClock};
pub use error::{Error, Result};
pub use merge::merge;
pub use movie::{clamp_rating, Genre, Movie, MovieId, MoviePatch};
pub use op::{Mutation, OpKind, QueuedOperation};
pub use query::{MoviePage, MovieQuery, RatingStats, SortOrder};
pub use status::ConnectionStatus;
