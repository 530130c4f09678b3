// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Applying mutations to an ordered movie collection.
//!
//! Rules:
//! - Add: insert at the end, or replace in place if the id already exists
//! - Update: shallow-merge onto the matching record, no-op if absent
//! - Delete: remove the matching record, no-op if absent
//!
//! Applying a sequence is a left fold: the result depends only on the
//! starting collection and the mutations, in order.

use crate::clock::IdSource;
use crate::movie::{Movie, MovieId};
use crate::op::Mutation;

/// Trait for collections that mutations can be applied to.
pub trait Apply {
    /// Applies a mutation.
    ///
    /// Returns true if the collection changed, false for a no-op (update or
    /// delete of an unknown id).
    fn apply(&mut self, mutation: &Mutation, ids: &dyn IdSource) -> bool;

    /// Applies multiple mutations in order.
    ///
    /// Returns the number of mutations that changed the collection.
    fn apply_all(&mut self, mutations: &[Mutation], ids: &dyn IdSource) -> usize {
        let mut applied = 0;
        for mutation in mutations {
            if self.apply(mutation, ids) {
                applied += 1;
            }
        }
        applied
    }
}

impl Apply for Vec<Movie> {
    fn apply(&mut self, mutation: &Mutation, ids: &dyn IdSource) -> bool {
        match mutation {
            Mutation::Add { id, data } => {
                let id = id.unwrap_or_else(|| ids.next_id());
                let movie = data.clone().into_movie(id);
                match position(self, id) {
                    Some(index) => self[index] = movie,
                    None => self.push(movie),
                }
                true
            }
            Mutation::Update { id, data } => match position(self, *id) {
                Some(index) => {
                    data.apply_to(&mut self[index]);
                    true
                }
                None => false,
            },
            Mutation::Delete { id } => {
                let before = self.len();
                self.retain(|m| m.id != *id);
                self.len() != before
            }
        }
    }
}

fn position(movies: &[Movie], id: MovieId) -> Option<usize> {
    movies.iter().position(|m| m.id == id)
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
