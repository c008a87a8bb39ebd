// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

use alloy_primitives::{Address, U256};
use tracing::{debug, info};

use crate::contract::ContentPlatform;
use crate::error::{Error, Result};
use crate::units::{format_percent, parse_ether, parse_percent};

use super::{positive_ether, Confirmed};

/// Shown after a partial withdrawal.
pub const WITHDRAWN: &str = "Withdrawal successful!";
/// Shown after the whole balance is withdrawn.
pub const WITHDRAWN_ALL: &str = "All funds withdrawn successfully!";
/// Shown after the platform share changes.
pub const SHARE_UPDATED: &str = "Platform share updated successfully!";
/// Shown after the posting fee changes.
pub const FEE_UPDATED: &str = "Posting fee updated successfully!";

/// Rejected withdrawal input.
pub const INVALID_WITHDRAWAL: &str = "Please enter a valid withdrawal amount.";
/// Rejected platform share input.
pub const INVALID_SHARE: &str = "Please enter a valid platform share percentage.";
/// Rejected posting fee input.
pub const INVALID_FEE: &str = "Please enter a valid posting fee amount.";

/// Platform balance and settings, visible to the contract owner only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerDashboard {
    /// Contract owner; always the connected account.
    pub owner: Address,
    /// Funds held by the contract, in wei.
    pub balance: U256,
    /// Platform cut of each access payment, in basis points.
    pub platform_share_bps: U256,
    /// Fee charged for publishing, in wei.
    pub posting_fee: U256,
}

impl OwnerDashboard {
    /// Checks ownership, then reads balance, platform share and posting fee.
    ///
    /// # Errors
    ///
    /// [`Error::Unauthorized`] when the connected account is not the owner.
    /// Nothing beyond `owner()` is queried in that case.
    pub fn load(platform: &ContentPlatform<'_>) -> Result<Self> {
        let owner = platform.owner()?;
        if owner != platform.account() {
            debug!(%owner, account = %platform.account(), "dashboard denied");
            return Err(Error::Unauthorized);
        }

        Ok(Self {
            owner,
            balance: platform.balance()?,
            platform_share_bps: platform.access_fee_platform_share()?,
            posting_fee: platform.posting_fee()?,
        })
    }

    /// The platform share as a percentage string, e.g. `2.5`.
    #[must_use]
    pub fn platform_share_percent(&self) -> String {
        format_percent(self.platform_share_bps)
    }

    /// Withdraws `amount` ether.
    ///
    /// # Errors
    ///
    /// [`INVALID_WITHDRAWAL`] without any call for a non-positive amount,
    /// otherwise any failure of the transaction itself.
    pub fn withdraw(&mut self, platform: &ContentPlatform<'_>, amount: &str) -> Result<Confirmed> {
        let amount = validate_withdrawal(amount)?;
        let receipt = platform.withdraw(amount)?;
        info!(%amount, "withdrawn");
        Ok(Confirmed::after(receipt, self.refresh(platform)))
    }

    /// Withdraws the whole balance.
    ///
    /// # Errors
    ///
    /// Any failure of the transaction itself.
    pub fn withdraw_all(&mut self, platform: &ContentPlatform<'_>) -> Result<Confirmed> {
        let receipt = platform.withdraw_all()?;
        Ok(Confirmed::after(receipt, self.refresh(platform)))
    }

    /// Sets the platform share from a percentage such as `2.5`.
    ///
    /// # Errors
    ///
    /// [`INVALID_SHARE`] without any call for input outside `0..=100` or
    /// with more than two decimals, otherwise any failure of the
    /// transaction itself.
    pub fn set_platform_share(
        &mut self,
        platform: &ContentPlatform<'_>,
        percent: &str,
    ) -> Result<Confirmed> {
        let bps = validate_share(percent)?;
        let receipt = platform.set_access_fee_platform_share(bps)?;
        Ok(Confirmed::after(receipt, self.refresh(platform)))
    }

    /// Sets the posting fee in ether. Zero is allowed.
    ///
    /// # Errors
    ///
    /// [`INVALID_FEE`] without any call for unparsable input, otherwise any
    /// failure of the transaction itself.
    pub fn set_posting_fee(
        &mut self,
        platform: &ContentPlatform<'_>,
        fee: &str,
    ) -> Result<Confirmed> {
        let fee = validate_fee(fee)?;
        let receipt = platform.set_posting_fee(fee)?;
        Ok(Confirmed::after(receipt, self.refresh(platform)))
    }

    /// Re-reads everything; on failure the previous values stay.
    fn refresh(&mut self, platform: &ContentPlatform<'_>) -> Result<()> {
        *self = Self::load(platform)?;
        Ok(())
    }
}

/// Parses a withdrawal amount in ether.
///
/// # Errors
///
/// [`INVALID_WITHDRAWAL`] for empty, non-numeric or non-positive input.
pub fn validate_withdrawal(amount: &str) -> Result<U256> {
    positive_ether(amount, INVALID_WITHDRAWAL)
}

/// Parses a platform share percentage into basis points.
///
/// # Errors
///
/// [`INVALID_SHARE`] for input outside `0..=100` or with more than two
/// decimals.
pub fn validate_share(percent: &str) -> Result<U256> {
    parse_percent(percent).map_err(|_| Error::InvalidInput(INVALID_SHARE.to_string()))
}

/// Parses a posting fee in ether.
///
/// # Errors
///
/// [`INVALID_FEE`] for empty, non-numeric or negative input.
pub fn validate_fee(fee: &str) -> Result<U256> {
    parse_ether(fee).map_err(|_| Error::InvalidInput(INVALID_FEE.to_string()))
}
