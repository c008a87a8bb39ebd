// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

use std::fmt;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::address::{self, Address};
use crate::error::{Error, Result};
use crate::rpc::{parse_u64, Transport, METHOD_NOT_FOUND};

/// A connected wallet: the provider handle and the account that signs.
///
/// Lives for one run of the client; nothing is persisted.
pub struct Session {
    transport: Box<dyn Transport>,
    account: Address,
    chain_id: u64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Requests account access from the provider and binds the first
    /// account it exposes.
    ///
    /// Endpoints that do not implement `eth_requestAccounts` (plain nodes)
    /// are asked for `eth_accounts` instead.
    ///
    /// # Errors
    ///
    /// Fails when the provider refuses access or exposes no account.
    pub fn connect(transport: impl Transport + 'static) -> Result<Self> {
        let accounts = match transport.request("eth_requestAccounts", json!([])) {
            Err(Error::Rpc(err)) if err.code == METHOD_NOT_FOUND => {
                debug!("eth_requestAccounts unsupported, using eth_accounts");
                transport.request("eth_accounts", json!([]))?
            }
            other => other?,
        };

        let account = accounts
            .as_array()
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .ok_or(Error::NoAccounts)?;
        let account = address::parse(account)?;

        let chain_id = parse_u64(&transport.request("eth_chainId", json!([]))?)?;

        info!(%account, chain_id, "wallet connected");

        Ok(Self {
            transport: Box::new(transport),
            account,
            chain_id,
        })
    }

    /// The signing account.
    #[must_use]
    pub fn account(&self) -> Address {
        self.account
    }

    /// Chain the provider is connected to.
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The provider handle.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}
