// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! Typed binding to the deployed `ContentPlatform` contract.
//!
//! A [`ContentPlatform`] is cheap to build and holds no state of its own: it
//! borrows the wallet [`Session`] and the fixed [`Deployment`] and is created
//! fresh for every operation. Read calls go through `eth_call`; mutating
//! calls are handed to the wallet with `eth_sendTransaction` and block until
//! the transaction is confirmed.

use std::thread;
use std::time::{Duration, Instant};

use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::SolCall;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::artifact::ContractInterface;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::failure::ErrorCatalog;
use crate::rpc::{parse_data, parse_quantity, to_quantity};
use crate::wallet::Session;

#[allow(missing_docs, unreachable_pub, clippy::pedantic)]
mod bindings {
    alloy_sol_types::sol! {
        interface IContentPlatform {
            struct ContentItem {
                uint256 id;
                address creator;
                string title;
                string body;
                uint256 price;
                bool hasAccess;
            }

            function owner() external view returns (address);
            function createProfile(string username, string bio) external;
            function postContent(string title, string body, uint256 price) external payable;
            function getContentCount() external view returns (uint256);
            function getContent(uint256 id) external view returns (ContentItem);
            function accessContent(uint256 id) external payable;
            function profiles(address account) external view returns (string username, string bio);
            function tipCreator(address creator) external payable;
            function accessFeePlatformShare() external view returns (uint256);
            function setAccessFeePlatformShare(uint256 share) external;
            function postingFee() external view returns (uint256);
            function setPostingFee(uint256 fee) external;
            function withdraw(uint256 amount) external;
            function withdrawAll() external;
        }
    }
}

pub(crate) use bindings::IContentPlatform;

/// Canonical signatures of the contract methods the client depends on.
pub mod signatures {
    use alloy_sol_types::SolCall;

    use super::IContentPlatform as Platform;

    /// `owner()`
    pub const OWNER: &str = Platform::ownerCall::SIGNATURE;
    /// `createProfile(string,string)`
    pub const CREATE_PROFILE: &str = Platform::createProfileCall::SIGNATURE;
    /// `postContent(string,string,uint256)`
    pub const POST_CONTENT: &str = Platform::postContentCall::SIGNATURE;
    /// `getContentCount()`
    pub const GET_CONTENT_COUNT: &str = Platform::getContentCountCall::SIGNATURE;
    /// `getContent(uint256)`
    pub const GET_CONTENT: &str = Platform::getContentCall::SIGNATURE;
    /// `accessContent(uint256)`
    pub const ACCESS_CONTENT: &str = Platform::accessContentCall::SIGNATURE;
    /// `profiles(address)`
    pub const PROFILES: &str = Platform::profilesCall::SIGNATURE;
    /// `tipCreator(address)`
    pub const TIP_CREATOR: &str = Platform::tipCreatorCall::SIGNATURE;
    /// `accessFeePlatformShare()`
    pub const ACCESS_FEE_PLATFORM_SHARE: &str = Platform::accessFeePlatformShareCall::SIGNATURE;
    /// `setAccessFeePlatformShare(uint256)`
    pub const SET_ACCESS_FEE_PLATFORM_SHARE: &str =
        Platform::setAccessFeePlatformShareCall::SIGNATURE;
    /// `postingFee()`
    pub const POSTING_FEE: &str = Platform::postingFeeCall::SIGNATURE;
    /// `setPostingFee(uint256)`
    pub const SET_POSTING_FEE: &str = Platform::setPostingFeeCall::SIGNATURE;
    /// `withdraw(uint256)`
    pub const WITHDRAW: &str = Platform::withdrawCall::SIGNATURE;
    /// `withdrawAll()`
    pub const WITHDRAW_ALL: &str = Platform::withdrawAllCall::SIGNATURE;

    /// Every method above.
    pub const ALL: &[&str] = &[
        OWNER,
        CREATE_PROFILE,
        POST_CONTENT,
        GET_CONTENT_COUNT,
        GET_CONTENT,
        ACCESS_CONTENT,
        PROFILES,
        TIP_CREATOR,
        ACCESS_FEE_PLATFORM_SHARE,
        SET_ACCESS_FEE_PLATFORM_SHARE,
        POSTING_FEE,
        SET_POSTING_FEE,
        WITHDRAW,
        WITHDRAW_ALL,
    ];
}

/// A creator profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Account the profile belongs to.
    pub owner: Address,
    /// Display name.
    pub username: String,
    /// Free-form biography.
    pub bio: String,
}

impl Profile {
    /// The contract returns an empty username for accounts that never
    /// created a profile.
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.username.is_empty()
    }
}

/// A published content item as seen by the calling account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    /// Identifier, starting at 1.
    pub id: u64,
    /// Account that published the item.
    pub creator: Address,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Access price in wei.
    pub price: U256,
    /// Whether the caller may read the full body.
    pub has_access: bool,
}

/// How long and how often to wait for a transaction receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Delay between receipt polls.
    pub poll_interval: Duration,
    /// Give up after this long.
    pub timeout: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Where the contract lives and how to read its failures.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Deployed contract address.
    pub address: Address,
    /// Revert payloads the client can decode.
    pub errors: ErrorCatalog,
    /// Confirmation policy for transactions.
    pub confirmation: ConfirmationPolicy,
}

impl Deployment {
    /// A deployment with the standard error catalog and default policy.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            errors: ErrorCatalog::standard(),
            confirmation: ConfirmationPolicy::default(),
        }
    }

    /// Builds the deployment described by `config`, loading custom errors
    /// from the configured artifact when there is one.
    ///
    /// # Errors
    ///
    /// Fails when no contract address is configured or the artifact cannot
    /// be read.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut deployment = Self::new(config.contract_address()?);
        deployment.confirmation = config.confirmation_policy();

        if let Some(path) = &config.artifact {
            let interface = ContractInterface::load(path)?;
            debug!(
                path = %path.display(),
                contract = interface.contract_name.as_deref().unwrap_or("<unnamed>"),
                errors = interface.errors.len(),
                "loaded contract interface"
            );
            let missing = interface.missing_functions(signatures::ALL);
            if !missing.is_empty() {
                warn!(?missing, "artifact does not declare every platform method");
            }
            deployment.errors = deployment.errors.with_errors(interface.errors);
        }

        Ok(deployment)
    }
}

/// A mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Transaction hash.
    pub transaction_hash: String,
    /// Block the transaction was included in.
    pub block_number: Option<u64>,
    /// Gas consumed.
    pub gas_used: Option<U256>,
}

/// Handle to the platform contract for one operation.
#[derive(Debug, Clone, Copy)]
pub struct ContentPlatform<'a> {
    session: &'a Session,
    deployment: &'a Deployment,
}

impl<'a> ContentPlatform<'a> {
    /// Binds `deployment` to the signing `session`.
    #[must_use]
    pub fn new(session: &'a Session, deployment: &'a Deployment) -> Self {
        Self {
            session,
            deployment,
        }
    }

    /// Contract address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.deployment.address
    }

    /// The account calls are made from.
    #[must_use]
    pub fn account(&self) -> Address {
        self.session.account()
    }

    /// Platform owner.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn owner(&self) -> Result<Address> {
        Ok(self.call(&IContentPlatform::ownerCall {})?._0)
    }

    /// Whether the connected account owns the platform.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure while reading `owner()`.
    pub fn is_owner(&self) -> Result<bool> {
        let owner = self.owner()?;
        debug!(%owner, account = %self.account(), "owner check");
        Ok(owner == self.account())
    }

    /// Registers or updates the caller's profile.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn create_profile(&self, username: &str, bio: &str) -> Result<Receipt> {
        self.send(
            &IContentPlatform::createProfileCall {
                username: username.to_string(),
                bio: bio.to_string(),
            },
            U256::ZERO,
        )
    }

    /// Publishes a content item, paying `fee`.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn post_content(&self, title: &str, body: &str, price: U256, fee: U256) -> Result<Receipt> {
        self.send(
            &IContentPlatform::postContentCall {
                title: title.to_string(),
                body: body.to_string(),
                price,
            },
            fee,
        )
    }

    /// Number of published items. Items are numbered `1..=count`.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure, or a count that does not fit in
    /// `u64`.
    pub fn content_count(&self) -> Result<u64> {
        let count = self.call(&IContentPlatform::getContentCountCall {})?._0;
        u64::try_from(count)
            .map_err(|_| Error::Abi(format!("content count {count} does not fit in u64")))
    }

    /// One content item, with the access flag for the calling account.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn content(&self, id: u64) -> Result<Content> {
        let item = self
            .call(&IContentPlatform::getContentCall { id: U256::from(id) })?
            ._0;
        Ok(Content {
            id,
            creator: item.creator,
            title: item.title,
            body: item.body,
            price: item.price,
            has_access: item.hasAccess,
        })
    }

    /// Pays `price` for access to the body of item `id`.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn access_content(&self, id: u64, price: U256) -> Result<Receipt> {
        self.send(
            &IContentPlatform::accessContentCall { id: U256::from(id) },
            price,
        )
    }

    /// The profile of `account`.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn profile(&self, account: Address) -> Result<Profile> {
        let IContentPlatform::profilesReturn { username, bio } =
            self.call(&IContentPlatform::profilesCall { account })?;
        Ok(Profile {
            owner: account,
            username,
            bio,
        })
    }

    /// Sends `amount` to `creator`.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn tip_creator(&self, creator: Address, amount: U256) -> Result<Receipt> {
        self.send(&IContentPlatform::tipCreatorCall { creator }, amount)
    }

    /// Platform's cut of access fees, in basis points.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn access_fee_platform_share(&self) -> Result<U256> {
        Ok(self.call(&IContentPlatform::accessFeePlatformShareCall {})?._0)
    }

    /// Sets the platform's cut of access fees, in basis points. Owner only.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn set_access_fee_platform_share(&self, bps: U256) -> Result<Receipt> {
        self.send(
            &IContentPlatform::setAccessFeePlatformShareCall { share: bps },
            U256::ZERO,
        )
    }

    /// Fee charged for publishing.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn posting_fee(&self) -> Result<U256> {
        Ok(self.call(&IContentPlatform::postingFeeCall {})?._0)
    }

    /// Sets the publishing fee. Owner only.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn set_posting_fee(&self, fee: U256) -> Result<Receipt> {
        self.send(&IContentPlatform::setPostingFeeCall { fee }, U256::ZERO)
    }

    /// Withdraws `amount` of the accumulated balance. Owner only.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn withdraw(&self, amount: U256) -> Result<Receipt> {
        self.send(&IContentPlatform::withdrawCall { amount }, U256::ZERO)
    }

    /// Withdraws the whole accumulated balance. Owner only.
    ///
    /// # Errors
    ///
    /// Any transport or contract failure.
    pub fn withdraw_all(&self) -> Result<Receipt> {
        self.send(&IContentPlatform::withdrawAllCall {}, U256::ZERO)
    }

    /// Balance held by the contract.
    ///
    /// # Errors
    ///
    /// Any transport failure.
    pub fn balance(&self) -> Result<U256> {
        let value = self
            .session
            .transport()
            .request("eth_getBalance", json!([self.address(), "latest"]))?;
        parse_quantity(&value)
    }

    fn call<C: SolCall>(&self, call: &C) -> Result<C::Return> {
        debug!(method = C::SIGNATURE, "eth_call");

        let result = self
            .session
            .transport()
            .request(
                "eth_call",
                json!([{
                    "from": self.account(),
                    "to": self.address(),
                    "data": hex::encode_prefixed(call.abi_encode()),
                }, "latest"]),
            )
            .map_err(|err| self.remote(err))?;

        Ok(C::abi_decode_returns(&parse_data(&result)?, true)?)
    }

    fn send<C: SolCall>(&self, call: &C, value: U256) -> Result<Receipt> {
        let hash = self
            .session
            .transport()
            .request(
                "eth_sendTransaction",
                json!([{
                    "from": self.account(),
                    "to": self.address(),
                    "data": hex::encode_prefixed(call.abi_encode()),
                    "value": to_quantity(value),
                }]),
            )
            .map_err(|err| self.remote(err))?;

        let hash = hash
            .as_str()
            .ok_or_else(|| Error::Transport(format!("expected a transaction hash, got {hash}")))?
            .to_string();
        info!(method = C::SIGNATURE, %hash, %value, "transaction submitted");

        self.wait_for_receipt(hash)
    }

    fn wait_for_receipt(&self, hash: String) -> Result<Receipt> {
        let policy = self.deployment.confirmation;
        let started = Instant::now();

        loop {
            let receipt = self
                .session
                .transport()
                .request("eth_getTransactionReceipt", json!([hash]))?;

            if !receipt.is_null() {
                return finish_receipt(hash, &receipt);
            }

            let waited = started.elapsed();
            if waited >= policy.timeout {
                return Err(Error::ConfirmationTimeout { hash, waited });
            }
            thread::sleep(policy.poll_interval);
        }
    }

    fn remote(&self, err: Error) -> Error {
        match err {
            Error::Rpc(rpc) => Error::Remote(self.deployment.errors.failure_from_rpc(&rpc)),
            other => other,
        }
    }
}

fn finish_receipt(hash: String, receipt: &Value) -> Result<Receipt> {
    let quantity = |key: &str| receipt.get(key).and_then(|v| parse_quantity(v).ok());

    if quantity("status") == Some(U256::ZERO) {
        return Err(Error::TransactionReverted { hash });
    }

    let receipt = Receipt {
        block_number: quantity("blockNumber").and_then(|n| u64::try_from(n).ok()),
        gas_used: quantity("gasUsed"),
        transaction_hash: hash,
    };
    info!(hash = %receipt.transaction_hash, block = ?receipt.block_number, "transaction confirmed");
    Ok(receipt)
}
