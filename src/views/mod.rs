// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! Each view owns its local state, validates input trivially, issues one
//! mutating contract call per submission and either resets its fields or
//! hands the error back for display. Nothing is shared between views and
//! nothing refreshes automatically.

/// Content listing and detail.
pub mod content;
/// Owner-only platform controls.
pub mod dashboard;
/// Profile creation.
pub mod profile;
/// Content publishing.
pub mod upload;

pub use content::{ContentList, ContentView, PREVIEW_CHARS};
pub use dashboard::OwnerDashboard;
pub use profile::ProfileForm;
pub use upload::UploadForm;

use alloy_primitives::U256;
use tracing::warn;

use crate::contract::Receipt;
use crate::error::{Error, Result};
use crate::units::parse_ether;

/// A confirmed transaction whose follow-up read may have failed.
///
/// The transaction stands either way; `refresh_error` only means the view
/// still shows the state from before it.
#[derive(Debug)]
pub struct Confirmed {
    /// Receipt of the mined transaction.
    pub receipt: Receipt,
    /// Why re-reading contract state afterwards failed, if it did.
    pub refresh_error: Option<Error>,
}

impl Confirmed {
    fn after(receipt: Receipt, refresh: Result<()>) -> Self {
        let refresh_error = refresh.err();
        if let Some(err) = &refresh_error {
            warn!(hash = %receipt.transaction_hash, %err, "refresh after confirmation failed");
        }
        Self {
            receipt,
            refresh_error,
        }
    }
}

fn required<'a>(label: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{label} is required.")));
    }
    Ok(value)
}

/// Parses a strictly positive ether amount, replacing any parse error with
/// `message`.
fn positive_ether(input: &str, message: &str) -> Result<U256> {
    match parse_ether(input) {
        Ok(amount) if !amount.is_zero() => Ok(amount),
        _ => Err(Error::InvalidInput(message.to_string())),
    }
}
