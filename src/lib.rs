// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! Client for the Thought Verse pay-per-content publishing contract.
//!
//! The contract is treated as an opaque remote service: this crate connects
//! to a wallet-backed JSON-RPC endpoint, encodes calls against the contract's
//! method surface, waits for confirmation and derives human-readable messages
//! from failures. The [`views`] module holds the per-feature view state that a
//! front end renders.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unused_must_use)]
#![deny(unused_extern_crates)]
#![warn(clippy::pedantic)]
#![warn(missing_debug_implementations, unreachable_pub, rustdoc::all)]

/// Account and contract addresses.
pub mod address;
/// Contract interface descriptions (build artifacts).
pub mod artifact;
/// Client configuration.
pub mod config;
/// Typed binding to the deployed platform contract.
pub mod contract;
/// Library error type.
pub mod error;
/// Failure taxonomy and message derivation.
pub mod failure;
/// JSON-RPC transport.
pub mod rpc;
/// Ether and percentage amounts.
pub mod units;
/// Per-feature view state.
pub mod views;
/// Wallet connection.
pub mod wallet;

#[cfg(test)]
mod testing;

pub use alloy_primitives::{Address, U256};
pub use config::Config;
pub use contract::{ConfirmationPolicy, ContentPlatform, Deployment, Receipt};
pub use error::{Error, Result};
pub use failure::{describe, ErrorCatalog, Failure};
pub use rpc::{HttpTransport, Transport};
pub use wallet::Session;
