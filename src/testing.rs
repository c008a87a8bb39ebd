// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

//! In-memory stand-in for a wallet-backed node running the platform
//! contract. Records every request so tests can assert on what was (and
//! was not) sent.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use alloy_primitives::{hex, keccak256, Address, U256};
use alloy_sol_types::{sol, Revert, SolError, SolInterface, SolValue};
use serde_json::{json, Value};

use crate::address;
use crate::contract::IContentPlatform::{ContentItem, IContentPlatformCalls as Call};
use crate::contract::{signatures, ConfirmationPolicy, Deployment};
use crate::error::{Error, Result};
use crate::rpc::{parse_data, parse_quantity, to_quantity, RpcError, Transport, METHOD_NOT_FOUND};
use crate::units::MAX_BASIS_POINTS;

sol! {
    error OwnableUnauthorizedAccount(address account);
}

pub(crate) const OWNER: Address = Address::new([0x0a; 20]);
pub(crate) const ALICE: Address = Address::new([0xa1; 20]);
pub(crate) const BOB: Address = Address::new([0xb0; 20]);
pub(crate) const CONTRACT: Address = Address::new([0xc0; 20]);

const DEFAULT_POSTING_FEE: U256 = U256::from_limbs([200_000_000_000_000, 0, 0, 0]);

struct StoredContent {
    creator: Address,
    title: String,
    body: String,
    price: U256,
}

struct State {
    accounts: Vec<Address>,
    request_accounts: bool,
    fail_next: Option<(Option<String>, RpcError)>,
    pending_polls: u32,
    pending_remaining: u32,
    failed_receipts: bool,

    owner: Address,
    posting_fee: U256,
    share_bps: U256,
    balance: U256,
    profiles: HashMap<Address, (String, String)>,
    contents: Vec<StoredContent>,
    access: HashSet<(Address, u64)>,
    tips: Vec<(Address, U256)>,

    requests: Vec<String>,
    contract_calls: Vec<(&'static str, bool)>,
    receipts: HashMap<String, u64>,
}

#[derive(Clone)]
pub(crate) struct MockChain(Rc<RefCell<State>>);

impl MockChain {
    pub(crate) fn new(owner: Address) -> Self {
        Self(Rc::new(RefCell::new(State {
            accounts: vec![owner],
            request_accounts: true,
            fail_next: None,
            pending_polls: 0,
            pending_remaining: 0,
            failed_receipts: false,
            owner,
            posting_fee: DEFAULT_POSTING_FEE,
            share_bps: U256::from(250),
            balance: U256::ZERO,
            profiles: HashMap::new(),
            contents: Vec::new(),
            access: HashSet::new(),
            tips: Vec::new(),
            requests: Vec::new(),
            contract_calls: Vec::new(),
            receipts: HashMap::new(),
        })))
    }

    pub(crate) fn with_accounts(self, accounts: impl IntoIterator<Item = Address>) -> Self {
        self.0.borrow_mut().accounts = accounts.into_iter().collect();
        self
    }

    pub(crate) fn without_request_accounts(self) -> Self {
        self.0.borrow_mut().request_accounts = false;
        self
    }

    pub(crate) fn with_pending_polls(self, polls: u32) -> Self {
        self.0.borrow_mut().pending_polls = polls;
        self
    }

    pub(crate) fn with_failed_receipts(self) -> Self {
        self.0.borrow_mut().failed_receipts = true;
        self
    }

    pub(crate) fn with_profile(self, account: Address, username: &str, bio: &str) -> Self {
        self.0
            .borrow_mut()
            .profiles
            .insert(account, (username.to_string(), bio.to_string()));
        self
    }

    pub(crate) fn with_content(self, creator: Address, title: &str, body: &str, price: U256) -> Self {
        self.0.borrow_mut().contents.push(StoredContent {
            creator,
            title: title.to_string(),
            body: body.to_string(),
            price,
        });
        self
    }

    pub(crate) fn with_balance(self, balance: U256) -> Self {
        self.0.borrow_mut().balance = balance;
        self
    }

    pub(crate) fn with_posting_fee(self, fee: U256) -> Self {
        self.0.borrow_mut().posting_fee = fee;
        self
    }

    /// Fails the very next request, whatever its method.
    pub(crate) fn fail_next(&self, err: RpcError) {
        self.0.borrow_mut().fail_next = Some((None, err));
    }

    /// Fails the next request for `method`; earlier requests for other
    /// methods go through.
    pub(crate) fn fail_next_on(&self, method: &str, err: RpcError) {
        self.0.borrow_mut().fail_next = Some((Some(method.to_string()), err));
    }

    pub(crate) fn posting_fee(&self) -> U256 {
        self.0.borrow().posting_fee
    }

    pub(crate) fn share_bps(&self) -> U256 {
        self.0.borrow().share_bps
    }

    pub(crate) fn tips(&self) -> Vec<(Address, U256)> {
        self.0.borrow().tips.clone()
    }

    pub(crate) fn deployment(&self) -> Deployment {
        let mut deployment = Deployment::new(CONTRACT);
        deployment.confirmation = ConfirmationPolicy {
            poll_interval: Duration::ZERO,
            timeout: Duration::from_secs(5),
        };
        deployment
    }

    /// Every JSON-RPC method received, in order.
    pub(crate) fn methods(&self) -> Vec<String> {
        self.0.borrow().requests.clone()
    }

    /// Contract methods invoked, reads and transactions alike.
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.0.borrow().contract_calls.iter().map(|(sig, _)| *sig).collect()
    }

    /// Contract methods invoked through transactions only.
    pub(crate) fn sent(&self) -> Vec<&'static str> {
        self.0
            .borrow()
            .contract_calls
            .iter()
            .filter(|(_, tx)| *tx)
            .map(|(sig, _)| *sig)
            .collect()
    }
}

impl Transport for MockChain {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        let mut state = self.0.borrow_mut();
        state.requests.push(method.to_string());

        let fails_here = matches!(&state.fail_next, Some((None, _)))
            || matches!(&state.fail_next, Some((Some(target), _)) if target == method);
        if fails_here {
            if let Some((_, err)) = state.fail_next.take() {
                return Err(Error::Rpc(err));
            }
        }

        match method {
            "eth_requestAccounts" if !state.request_accounts => Err(Error::Rpc(RpcError {
                code: METHOD_NOT_FOUND,
                message: "the method eth_requestAccounts does not exist".to_string(),
                data: None,
            })),
            "eth_requestAccounts" | "eth_accounts" => Ok(json!(state.accounts)),
            "eth_chainId" => Ok(json!("0x7a69")),
            "eth_getBalance" => Ok(json!(to_quantity(state.balance))),
            "eth_call" => {
                let (from, data, value) = tx_fields(&params)?;
                let output = state.execute(from, &data, value, false).map_err(Error::Rpc)?;
                Ok(json!(hex::encode_prefixed(output)))
            }
            "eth_sendTransaction" => {
                let (from, data, value) = tx_fields(&params)?;
                state.execute(from, &data, value, true).map_err(Error::Rpc)?;

                let number = state.receipts.len() as u64 + 1;
                let hash = format!("0x{number:064x}");
                state.receipts.insert(hash.clone(), number);
                let polls = state.pending_polls;
                state.pending_remaining = polls;
                Ok(json!(hash))
            }
            "eth_getTransactionReceipt" => {
                if state.pending_remaining > 0 {
                    state.pending_remaining -= 1;
                    return Ok(Value::Null);
                }
                let hash = params[0].as_str().unwrap_or_default().to_string();
                Ok(match state.receipts.get(&hash) {
                    Some(number) => json!({
                        "transactionHash": hash,
                        "blockNumber": to_quantity(U256::from(*number)),
                        "gasUsed": "0x5208",
                        "status": if state.failed_receipts { "0x0" } else { "0x1" },
                    }),
                    None => Value::Null,
                })
            }
            other => Err(Error::Rpc(RpcError {
                code: METHOD_NOT_FOUND,
                message: format!("the method {other} does not exist"),
                data: None,
            })),
        }
    }
}

fn tx_fields(params: &Value) -> Result<(Address, Vec<u8>, U256)> {
    let tx = &params[0];
    let from = tx["from"]
        .as_str()
        .ok_or_else(|| Error::Transport("missing from".to_string()))?;
    let from = address::parse(from)?;
    let data = parse_data(&tx["data"])?;
    let value = match tx.get("value") {
        Some(value) => parse_quantity(value)?,
        None => U256::ZERO,
    };
    Ok((from, data, value))
}

fn revert(message: String, data: Vec<u8>) -> RpcError {
    RpcError {
        code: 3,
        message,
        data: Some(json!(hex::encode_prefixed(data))),
    }
}

fn reason(message: &str) -> RpcError {
    revert(
        format!("execution reverted: {message}"),
        SolError::abi_encode(&Revert {
            reason: message.to_string(),
        }),
    )
}

fn unauthorized(account: Address) -> RpcError {
    revert(
        "execution reverted".to_string(),
        SolError::abi_encode(&OwnableUnauthorizedAccount { account }),
    )
}

impl State {
    fn execute(
        &mut self,
        from: Address,
        data: &[u8],
        value: U256,
        transaction: bool,
    ) -> std::result::Result<Vec<u8>, RpcError> {
        let Some(signature) = signatures::ALL
            .iter()
            .copied()
            .find(|sig| data.starts_with(&keccak256(sig.as_bytes())[..4]))
        else {
            return Err(reason("unknown selector"));
        };
        self.contract_calls.push((signature, transaction));

        let call = Call::abi_decode(data, true).map_err(|err| reason(&err.to_string()))?;
        let output = match call {
            Call::owner(_) => self.owner.abi_encode(),
            Call::createProfile(call) => {
                self.profiles.insert(from, (call.username, call.bio));
                Vec::new()
            }
            Call::postContent(call) => {
                if value != self.posting_fee {
                    return Err(reason("Incorrect posting fee"));
                }
                self.contents.push(StoredContent {
                    creator: from,
                    title: call.title,
                    body: call.body,
                    price: call.price,
                });
                self.balance += value;
                Vec::new()
            }
            Call::getContentCount(_) => U256::from(self.contents.len()).abi_encode(),
            Call::getContent(call) => {
                let id = self.content_id(call.id)?;
                let item = &self.contents[id as usize - 1];
                ContentItem {
                    id: call.id,
                    creator: item.creator,
                    title: item.title.clone(),
                    body: item.body.clone(),
                    price: item.price,
                    hasAccess: item.creator == from || self.access.contains(&(from, id)),
                }
                .abi_encode()
            }
            Call::accessContent(call) => {
                let id = self.content_id(call.id)?;
                if value != self.contents[id as usize - 1].price {
                    return Err(reason("Incorrect payment"));
                }
                self.access.insert((from, id));
                self.balance += value * self.share_bps / U256::from(MAX_BASIS_POINTS);
                Vec::new()
            }
            Call::profiles(call) => {
                let (username, bio) = self.profiles.get(&call.account).cloned().unwrap_or_default();
                (username, bio).abi_encode_params()
            }
            Call::tipCreator(call) => {
                if value.is_zero() {
                    return Err(reason("Tip must be greater than zero"));
                }
                self.tips.push((call.creator, value));
                Vec::new()
            }
            Call::accessFeePlatformShare(_) => self.share_bps.abi_encode(),
            Call::setAccessFeePlatformShare(call) => {
                self.only_owner(from)?;
                self.share_bps = call.share;
                Vec::new()
            }
            Call::postingFee(_) => self.posting_fee.abi_encode(),
            Call::setPostingFee(call) => {
                self.only_owner(from)?;
                self.posting_fee = call.fee;
                Vec::new()
            }
            Call::withdraw(call) => {
                self.only_owner(from)?;
                if call.amount > self.balance {
                    return Err(reason("Insufficient balance"));
                }
                self.balance -= call.amount;
                Vec::new()
            }
            Call::withdrawAll(_) => {
                self.only_owner(from)?;
                self.balance = U256::ZERO;
                Vec::new()
            }
        };

        Ok(output)
    }

    fn content_id(&self, id: U256) -> std::result::Result<u64, RpcError> {
        match u64::try_from(id) {
            Ok(id) if id >= 1 && id as usize <= self.contents.len() => Ok(id),
            _ => Err(reason("Content does not exist")),
        }
    }

    fn only_owner(&self, from: Address) -> std::result::Result<(), RpcError> {
        if from == self.owner {
            Ok(())
        } else {
            Err(unauthorized(from))
        }
    }
}
