// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use mq_core::{ConnectionStatus, MovieQuery, RatingStats};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::colors;
use crate::display::{format_movie_line, format_page_footer, format_pending, format_stats};
use crate::error::Result;
use crate::sync::{Listing, ListingSource, Remote};

use super::{print_lines, Session};

pub async fn run<R: Remote>(
    session: &Session<R>,
    query: MovieQuery,
    format: OutputFormat,
) -> Result<()> {
    let status = session.connect().await?;
    let listing = session.coordinator.refresh(&query).await?;

    match format {
        OutputFormat::Text => print_lines(&render_text(&listing, status)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&to_json(&listing))?),
    }
    Ok(())
}

pub(crate) fn render_text(listing: &Listing, status: ConnectionStatus) -> Vec<String> {
    let mut lines = Vec::new();
    if listing.source == ListingSource::Local {
        lines.push(colors::banner(status));
        lines.push(colors::context("showing local changes only"));
    }

    let page = &listing.page;
    if page.data.is_empty() {
        lines.push("no movies".to_string());
    } else {
        lines.extend(page.data.iter().map(format_movie_line));
        lines.push(colors::context(&format_page_footer(page)));
        if let Some(stats) = RatingStats::of(&page.data) {
            lines.push(colors::context(&format_stats(&stats)));
        }
    }

    if listing.pending > 0 {
        lines.push(colors::warn(&format_pending(listing.pending)));
    }
    lines
}

pub(crate) fn to_json(listing: &Listing) -> serde_json::Value {
    let page = &listing.page;
    let stats = RatingStats::of(&page.data).map(|s| {
        json!({
            "highest": s.highest,
            "lowest": s.lowest,
            "average": s.average,
        })
    });
    let source = match listing.source {
        ListingSource::Server => "server",
        ListingSource::Local => "local",
    };
    json!({
        "movies": page.data,
        "total": page.total,
        "page": page.page,
        "limit": page.limit,
        "has_more": page.has_more(),
        "source": source,
        "pending": listing.pending,
        "stats": stats,
    })
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
