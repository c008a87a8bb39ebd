// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

use tracing::debug;

use alloy_primitives::U256;

use crate::contract::{Content, ContentPlatform, Profile, Receipt};
use crate::error::Result;

use super::{positive_ether, Confirmed};

/// Characters of the body shown to callers without access.
pub const PREVIEW_CHARS: usize = 100;

/// Shown after a tip is sent.
pub const TIP_SENT: &str = "Tip sent successfully!";

/// Shown when the tip amount is missing, non-numeric or not positive.
pub const INVALID_TIP: &str = "Please enter a valid tip amount.";

/// Every published item, fetched once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentList {
    /// Items in id order.
    pub items: Vec<Content>,
}

impl ContentList {
    /// Fetches items `1..=getContentCount()`.
    ///
    /// # Errors
    ///
    /// The first failing call aborts the load.
    pub fn load(platform: &ContentPlatform<'_>) -> Result<Self> {
        let count = platform.content_count()?;
        debug!(count, "loading content list");

        let items = (1..=count)
            .map(|id| platform.content(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { items })
    }
}

/// One item with its creator, purchase state and tip form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentView {
    /// The item as listed.
    pub content: Content,
    /// Creator profile, once fetched.
    pub creator: Option<Profile>,
    /// The item re-fetched after a successful purchase.
    pub full: Option<Content>,
    /// Tip form input, in ether.
    pub tip_amount: String,
}

impl ContentView {
    /// Wraps an already fetched item.
    #[must_use]
    pub fn new(content: Content) -> Self {
        Self {
            content,
            creator: None,
            full: None,
            tip_amount: String::new(),
        }
    }

    /// Fetches item `id` and its creator's profile.
    ///
    /// # Errors
    ///
    /// Any contract failure.
    pub fn load(platform: &ContentPlatform<'_>, id: u64) -> Result<Self> {
        let mut view = Self::new(platform.content(id)?);
        view.load_creator(platform)?;
        Ok(view)
    }

    /// Fetches the creator's profile.
    ///
    /// # Errors
    ///
    /// Any contract failure.
    pub fn load_creator(&mut self, platform: &ContentPlatform<'_>) -> Result<()> {
        self.creator = Some(platform.profile(self.content.creator)?);
        Ok(())
    }

    /// Whether the caller can read the full body.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.content.has_access || self.full.is_some()
    }

    /// The full body when unlocked, otherwise the preview.
    #[must_use]
    pub fn body_text(&self) -> String {
        match &self.full {
            Some(full) => full.body.clone(),
            None if self.content.has_access => self.content.body.clone(),
            None => preview(&self.content.body),
        }
    }

    /// Pays the item's price, then re-fetches it so the purchased copy
    /// replaces the preview.
    ///
    /// A failed re-fetch does not undo the payment: the receipt comes back
    /// with the re-fetch error attached and the preview stays in place.
    ///
    /// # Errors
    ///
    /// Any failure of the payment itself.
    pub fn access(&mut self, platform: &ContentPlatform<'_>) -> Result<Confirmed> {
        let receipt = platform.access_content(self.content.id, self.content.price)?;
        let refetch = platform.content(self.content.id).map(|full| {
            self.full = Some(full);
        });
        Ok(Confirmed::after(receipt, refetch))
    }

    /// Sends `tip_amount` to the creator and clears the input.
    ///
    /// # Errors
    ///
    /// [`INVALID_TIP`] without any call when the amount is not a positive
    /// number, otherwise any contract failure.
    pub fn tip(&mut self, platform: &ContentPlatform<'_>) -> Result<Receipt> {
        let amount = validate_tip(&self.tip_amount)?;
        let receipt = platform.tip_creator(self.content.creator, amount)?;
        self.tip_amount.clear();
        Ok(receipt)
    }
}

/// Parses a tip amount.
///
/// # Errors
///
/// [`INVALID_TIP`] for empty, non-numeric or non-positive input.
pub fn validate_tip(amount: &str) -> Result<U256> {
    positive_ether(amount, INVALID_TIP)
}

/// First [`PREVIEW_CHARS`] characters of `body` followed by an ellipsis.
#[must_use]
pub fn preview(body: &str) -> String {
    let mut out: String = body.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}
