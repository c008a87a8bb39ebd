// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

use std::time::Duration;

use thiserror::Error;

use crate::{failure::Failure, rpc::RpcError};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to the wallet or the contract.
#[derive(Debug, Error)]
pub enum Error {
    /// The contract or the wallet rejected the request; revert data has
    /// already been decoded.
    #[error("{}", .0.describe())]
    Remote(Failure),

    /// Raw JSON-RPC error object returned by the endpoint.
    #[error("{0}")]
    Rpc(RpcError),

    /// The endpoint could not be reached or answered with garbage.
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed ABI payload.
    #[error("ABI error: {0}")]
    Abi(String),

    /// Return data did not match the declared contract surface.
    #[error("ABI error: {0}")]
    SolTypes(#[from] alloy_sol_types::Error),

    /// A string could not be parsed as an address.
    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    /// A string could not be parsed as an amount.
    #[error("invalid amount '{input}': {reason}")]
    InvalidAmount {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Form input rejected before any remote call was issued.
    #[error("{0}")]
    InvalidInput(String),

    /// The wallet returned no accounts.
    #[error("the wallet did not expose any account")]
    NoAccounts,

    /// The connected account is not the platform owner.
    #[error("You are not authorized to view this page.")]
    Unauthorized,

    /// A mined transaction reported failure.
    #[error("transaction {hash} reverted")]
    TransactionReverted {
        /// Transaction hash.
        hash: String,
    },

    /// No receipt arrived within the confirmation timeout.
    #[error("transaction {hash} was not confirmed within {}s", .waited.as_secs())]
    ConfirmationTimeout {
        /// Transaction hash.
        hash: String,
        /// How long the client waited.
        waited: Duration,
    },

    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
