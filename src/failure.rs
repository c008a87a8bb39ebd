// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! Turning failures into a message a user can act on.
//!
//! Every failure, whatever its origin, is reduced to a [`Failure`] and then
//! rendered by [`Failure::describe`], which picks the first piece of
//! information available in this order: a named contract error (with its
//! arguments), a revert reason, a nested provider message, the top-level
//! message, and finally [`DEFAULT_MESSAGE`].

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::Error as ErrorDecl;
use alloy_primitives::hex;
use alloy_sol_types::{Panic, Revert, SolError};
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::rpc::{decode_hex, RpcError};

/// Message used when a failure carries no information at all.
pub const DEFAULT_MESSAGE: &str = "An error occurred while processing the request.";

/// The information that can be extracted from a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Failure {
    /// Name of a custom contract error, e.g. `InsufficientPayment`.
    pub error_name: Option<String>,
    /// Decoded arguments of the custom error.
    pub error_args: Vec<String>,
    /// Revert reason string.
    pub reason: Option<String>,
    /// Message nested inside the provider's `data` payload.
    pub data_message: Option<String>,
    /// Top-level message.
    pub message: Option<String>,
}

impl Failure {
    /// A failure that only carries a top-level message.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Renders the most specific message available.
    #[must_use]
    pub fn describe(&self) -> String {
        if let Some(name) = present(self.error_name.as_ref()) {
            if self.error_args.is_empty() {
                return name.to_string();
            }
            return format!("{name}: {}", self.error_args.join(", "));
        }

        present(self.reason.as_ref())
            .or_else(|| present(self.data_message.as_ref()))
            .or_else(|| present(self.message.as_ref()))
            .map_or_else(|| DEFAULT_MESSAGE.to_string(), ToString::to_string)
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Derives the user-facing message for any client error.
#[must_use]
pub fn describe(err: &Error) -> String {
    match err {
        Error::Remote(failure) => failure.describe(),
        Error::Rpc(rpc) => ErrorCatalog::standard().failure_from_rpc(rpc).describe(),
        other => Failure::from_message(other.to_string()).describe(),
    }
}

/// The set of revert payloads the client knows how to decode.
///
/// Always understands `Error(string)` and `Panic(uint256)`; custom errors
/// are added from the contract's interface description.
#[derive(Debug, Clone, Default)]
pub struct ErrorCatalog {
    errors: Vec<ErrorDecl>,
}

impl ErrorCatalog {
    /// Catalog with only the built-in Solidity errors.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Adds custom errors.
    #[must_use]
    pub fn with_errors(mut self, errors: impl IntoIterator<Item = ErrorDecl>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// Number of custom errors known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no custom error is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Builds a [`Failure`] from a JSON-RPC error object.
    ///
    /// Providers disagree on where revert data goes: it may be the `data`
    /// member itself or `data.data`, next to a `data.message`.
    #[must_use]
    pub fn failure_from_rpc(&self, err: &RpcError) -> Failure {
        let mut failure = Failure::from_message(err.message.clone());

        let revert = match &err.data {
            Some(Value::String(text)) => decode_hex(text),
            Some(Value::Object(data)) => {
                failure.data_message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .map(ToString::to_string);
                data.get("data")
                    .and_then(Value::as_str)
                    .and_then(decode_hex)
            }
            _ => None,
        };

        if let Some(revert) = revert {
            self.apply_revert(&revert, &mut failure);
        }
        failure
    }

    /// Decodes raw revert data into `failure`. Unknown selectors and
    /// malformed payloads leave `failure` untouched.
    pub fn apply_revert(&self, data: &[u8], failure: &mut Failure) {
        let Some((selector, payload)) = data.split_first_chunk::<4>() else {
            return;
        };

        if *selector == Revert::SELECTOR {
            if let Ok(revert) = Revert::abi_decode(data, true) {
                failure.reason = Some(revert.reason);
            }
            return;
        }

        if *selector == Panic::SELECTOR {
            if let Ok(panic) = Panic::abi_decode(data, true) {
                failure.error_name = Some("Panic".to_string());
                failure.error_args = vec![panic.code.to_string()];
            }
            return;
        }

        let Some(known) = self.errors.iter().find(|e| e.selector().0 == *selector) else {
            return;
        };
        match known.abi_decode_input(payload, true) {
            Ok(values) => {
                failure.error_name = Some(known.name.clone());
                failure.error_args = values.iter().map(render).collect();
            }
            Err(err) => {
                debug!(error = %known.signature(), %err, "undecodable custom error payload");
            }
        }
    }
}

fn render(value: &DynSolValue) -> String {
    let join = |items: &[DynSolValue]| items.iter().map(render).collect::<Vec<_>>().join(", ");
    match value {
        DynSolValue::Address(address) => address.to_string(),
        DynSolValue::Uint(value, _) => value.to_string(),
        DynSolValue::Int(value, _) => value.to_string(),
        DynSolValue::Bool(value) => value.to_string(),
        DynSolValue::String(value) => value.clone(),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => format!("[{}]", join(items)),
        DynSolValue::Tuple(items) => format!("({})", join(items)),
        other => format!("{other:?}"),
    }
}
