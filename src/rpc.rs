// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! JSON-RPC plumbing between the client and the wallet-backed endpoint.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{hex, U256};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// JSON-RPC error code for an unknown method.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Per-request HTTP timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The provider seam: anything that can answer JSON-RPC requests on behalf
/// of the user's wallet.
pub trait Transport {
    /// Sends `method` with positional `params` and returns the `result`
    /// member of the response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rpc`] when the endpoint answers with an error object
    /// and a transport error when it cannot be reached.
    fn request(&self, method: &str, params: Value) -> Result<Value>;
}

/// Error object of a JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcError {
    /// Numeric error code.
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Provider-specific payload; often carries revert data.
    #[serde(default)]
    pub data: Option<Value>,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON-RPC error {}: {}", self.code, self.message)
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// Blocking HTTP transport.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Creates a transport for the endpoint at `url`.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(id, method, url = %self.url, "sending JSON-RPC request");

        let response = self.client.post(&self.url).json(&body).send()?;
        let status = response.status();
        let text = response.text()?;

        // Some nodes answer reverts with a 500 and a well-formed error body.
        let parsed: Response = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(Error::Transport(format!("{} answered HTTP {status}", self.url)));
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(error) = parsed.error {
            debug!(id, method, code = error.code, message = %error.message, "JSON-RPC error");
            return Err(Error::Rpc(error));
        }

        Ok(parsed.result.unwrap_or(Value::Null))
    }
}

/// Encodes an integer as a JSON-RPC hex quantity (`0x0`, `0x1a`).
#[must_use]
pub fn to_quantity(value: U256) -> String {
    format!("0x{value:x}")
}

/// Decodes a JSON-RPC hex quantity.
///
/// # Errors
///
/// Fails when `value` is not a `0x`-prefixed hex string of at most 256 bits.
pub fn parse_quantity(value: &Value) -> Result<U256> {
    let text = value
        .as_str()
        .ok_or_else(|| Error::Transport(format!("expected a hex quantity, got {value}")))?;
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| Error::Transport(format!("quantity '{text}' is missing the 0x prefix")))?;
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|_| Error::Transport(format!("invalid hex quantity '{text}'")))
}

/// Decodes a hex quantity that must fit in `u64`, such as a block number.
///
/// # Errors
///
/// See [`parse_quantity`]; also fails for values above `u64::MAX`.
pub fn parse_u64(value: &Value) -> Result<u64> {
    let quantity = parse_quantity(value)?;
    u64::try_from(quantity)
        .map_err(|_| Error::Transport(format!("quantity {quantity} does not fit in 64 bits")))
}

/// Decodes `0x`-prefixed hex data.
///
/// # Errors
///
/// Fails on a missing prefix or invalid hex digits.
pub fn parse_data(value: &Value) -> Result<Vec<u8>> {
    let text = value
        .as_str()
        .ok_or_else(|| Error::Transport(format!("expected hex data, got {value}")))?;
    decode_hex(text).ok_or_else(|| Error::Transport(format!("invalid hex data '{text}'")))
}

/// Decodes `0x`-prefixed hex, returning `None` for anything else.
#[must_use]
pub fn decode_hex(text: &str) -> Option<Vec<u8>> {
    hex::decode(text.strip_prefix("0x")?).ok()
}
