// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

use crate::contract::{ContentPlatform, Receipt};
use crate::error::Result;

use super::required;

/// Shown after a profile is stored.
pub const PROFILE_CREATED: &str = "Profile created successfully!";

/// The "create your profile" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Required.
    pub username: String,
    /// Optional.
    pub bio: String,
}

impl ProfileForm {
    /// Checks required fields without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] when the username is blank.
    pub fn validate(&self) -> Result<()> {
        required("Username", &self.username).map(drop)
    }

    /// Registers the profile and clears the form.
    ///
    /// # Errors
    ///
    /// Validation or contract failure; the form keeps its contents.
    pub fn submit(&mut self, platform: &ContentPlatform<'_>) -> Result<Receipt> {
        self.validate()?;
        let receipt = platform.create_profile(&self.username, &self.bio)?;
        *self = Self::default();
        Ok(receipt)
    }
}
