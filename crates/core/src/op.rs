// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queued mutations.
//!
//! [`QueuedOperation`] is the persisted shape (`{type, id?, data?}`), kept
//! loose so that anything a caller hands over can be inspected and rejected.
//! [`Mutation`] is the validated form used everywhere else:
//!
//! - `add` requires `data`; `id` is optional (a temporary id)
//! - `update` requires a positive `id` and `data`
//! - `delete` requires a positive `id`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::movie::{MovieId, MoviePatch};

/// The kind of a queued mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Update,
    Delete,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Add => write!(f, "add"),
            OpKind::Update => write!(f, "update"),
            OpKind::Delete => write!(f, "delete"),
        }
    }
}

/// A mutation as persisted in the offline queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedOperation {
    #[serde(rename = "type")]
    pub kind: OpKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MoviePatch>,
}

impl QueuedOperation {
    pub fn add(id: Option<MovieId>, data: MoviePatch) -> Self {
        QueuedOperation {
            kind: OpKind::Add,
            id,
            data: Some(data),
        }
    }

    pub fn update(id: MovieId, data: MoviePatch) -> Self {
        QueuedOperation {
            kind: OpKind::Update,
            id: Some(id),
            data: Some(data),
        }
    }

    pub fn delete(id: MovieId) -> Self {
        QueuedOperation {
            kind: OpKind::Delete,
            id: Some(id),
            data: None,
        }
    }

    /// Checks the structural invariants and returns the typed mutation.
    pub fn validate(&self) -> Result<Mutation> {
        match self.kind {
            OpKind::Add => {
                let data = self
                    .data
                    .clone()
                    .ok_or_else(|| Error::InvalidOperation("add requires data".into()))?;
                Ok(Mutation::Add { id: self.id, data })
            }
            OpKind::Update => {
                let id = required_id(self.kind, self.id)?;
                let data = self
                    .data
                    .clone()
                    .ok_or_else(|| Error::InvalidOperation("update requires data".into()))?;
                Ok(Mutation::Update { id, data })
            }
            OpKind::Delete => {
                let id = required_id(self.kind, self.id)?;
                Ok(Mutation::Delete { id })
            }
        }
    }
}

fn required_id(kind: OpKind, id: Option<MovieId>) -> Result<MovieId> {
    match id {
        None => Err(Error::InvalidOperation(format!("{kind} requires id"))),
        Some(id) if id <= 0 => Err(Error::InvalidMovieId(id)),
        Some(id) => Ok(id),
    }
}

/// A validated mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Create a record. `id` is the temporary id used locally, if any.
    Add { id: Option<MovieId>, data: MoviePatch },
    /// Shallow-merge `data` onto the record with `id`.
    Update { id: MovieId, data: MoviePatch },
    /// Remove the record with `id`.
    Delete { id: MovieId },
}

impl Mutation {
    pub fn kind(&self) -> OpKind {
        match self {
            Mutation::Add { .. } => OpKind::Add,
            Mutation::Update { .. } => OpKind::Update,
            Mutation::Delete { .. } => OpKind::Delete,
        }
    }

    /// Returns the movie id this mutation targets, if known.
    pub fn target(&self) -> Option<MovieId> {
        match self {
            Mutation::Add { id, .. } => *id,
            Mutation::Update { id, .. } | Mutation::Delete { id } => Some(*id),
        }
    }

    /// Rewrites the target id. Used to point later mutations at the
    /// server-assigned id of a record created earlier in the same replay.
    pub fn retarget(&mut self, from: MovieId, to: MovieId) {
        match self {
            Mutation::Add { id, .. } => {
                if *id == Some(from) {
                    *id = Some(to);
                }
            }
            Mutation::Update { id, .. } | Mutation::Delete { id } => {
                if *id == from {
                    *id = to;
                }
            }
        }
    }
}

impl From<Mutation> for QueuedOperation {
    fn from(mutation: Mutation) -> Self {
        match mutation {
            Mutation::Add { id, data } => QueuedOperation::add(id, data),
            Mutation::Update { id, data } => QueuedOperation::update(id, data),
            Mutation::Delete { id } => QueuedOperation::delete(id),
        }
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
