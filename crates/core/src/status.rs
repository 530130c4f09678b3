// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client connectivity status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reachability of the backend as seen by the client.
///
/// `NetworkOffline` takes precedence over `ServerOffline`: with no network
/// there is no point probing the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionStatus {
    #[default]
    Online,
    NetworkOffline,
    ServerOffline,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Online => "online",
            ConnectionStatus::NetworkOffline => "network-offline",
            ConnectionStatus::ServerOffline => "server-offline",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ConnectionStatus::Online)
    }

    /// User-facing banner text for this status.
    pub fn banner(&self) -> &'static str {
        match self {
            ConnectionStatus::Online => "Online",
            ConnectionStatus::NetworkOffline => {
                "You are offline. Changes are saved locally and will sync when you reconnect."
            }
            ConnectionStatus::ServerOffline => {
                "Server unreachable. Changes are saved locally and will sync when it is back."
            }
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConnectionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "online" => Ok(ConnectionStatus::Online),
            "network-offline" => Ok(ConnectionStatus::NetworkOffline),
            "server-offline" => Ok(ConnectionStatus::ServerOffline),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
