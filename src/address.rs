// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

pub use alloy_primitives::Address;

use crate::error::{Error, Result};

/// Parses a hex address in any letter case, with or without `0x`.
///
/// # Errors
///
/// [`Error::InvalidAddress`] for anything that is not 20 hex bytes.
pub fn parse(input: &str) -> Result<Address> {
    input
        .trim()
        .parse()
        .map_err(|_| Error::InvalidAddress(input.to_string()))
}
