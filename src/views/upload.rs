// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) THOUGHT VERSE CONTRIBUTORS. All rights reserved.

use alloy_primitives::U256;
use tracing::debug;

use crate::contract::{ContentPlatform, Receipt};
use crate::error::Result;
use crate::units::parse_ether;

use super::required;

/// Shown after content is published.
pub const CONTENT_POSTED: &str = "Content posted successfully!";

/// The "upload new content" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    /// Required.
    pub title: String,
    /// Required.
    pub body: String,
    /// Price in ether; empty means free.
    pub price: String,
}

impl UploadForm {
    /// Checks required fields and parses the price without touching the
    /// network.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank title or body, or an unparsable price.
    pub fn validate(&self) -> Result<U256> {
        required("Title", &self.title)?;
        required("Content", &self.body)?;
        if self.price.trim().is_empty() {
            Ok(U256::ZERO)
        } else {
            parse_ether(&self.price)
        }
    }

    /// Publishes the content, paying `fee` or, when `None`, the fee the
    /// contract currently charges. Clears the form on success.
    ///
    /// # Errors
    ///
    /// Validation or contract failure; the form keeps its contents.
    pub fn submit(&mut self, platform: &ContentPlatform<'_>, fee: Option<U256>) -> Result<Receipt> {
        let price = self.validate()?;
        let fee = match fee {
            Some(fee) => fee,
            None => platform.posting_fee()?,
        };
        debug!(%price, %fee, "posting content");

        let receipt = platform.post_content(&self.title, &self.body, price, fee)?;
        *self = Self::default();
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::signatures;
    use crate::testing::{MockChain, ALICE, OWNER};
    use crate::wallet::Session;

    fn form(title: &str, body: &str, price: &str) -> UploadForm {
        UploadForm {
            title: title.to_string(),
            body: body.to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn successful_post_resets_fields() {
        let chain = MockChain::new(OWNER).with_accounts([ALICE]);
        let session = Session::connect(chain.clone()).unwrap();
        let deployment = chain.deployment();
        let platform = ContentPlatform::new(&session, &deployment);

        let mut upload = form("Title", "Body", "0.05");
        upload.submit(&platform, None).unwrap();

        assert_eq!(upload, UploadForm::default());
        assert_eq!(
            chain.calls(),
            vec![signatures::POSTING_FEE, signatures::POST_CONTENT]
        );
        let content = platform.content(1).unwrap();
        assert_eq!(content.price, U256::from(50_000_000_000_000_000u64));
    }

    #[test]
    fn empty_price_is_free_and_fee_override_skips_lookup() {
        let chain = MockChain::new(OWNER).with_accounts([ALICE]);
        let session = Session::connect(chain.clone()).unwrap();
        let deployment = chain.deployment();
        let platform = ContentPlatform::new(&session, &deployment);

        let mut upload = form("Title", "Body", "");
        upload.submit(&platform, Some(chain.posting_fee())).unwrap();

        assert_eq!(chain.calls(), vec![signatures::POST_CONTENT]);
        assert_eq!(platform.content(1).unwrap().price, U256::ZERO);
    }

    #[test]
    fn posting_fee_wider_than_128_bits_is_paid_in_full() {
        let fee = (U256::from(1) << 130) + U256::from(7);
        let chain = MockChain::new(OWNER)
            .with_accounts([ALICE])
            .with_posting_fee(fee);
        let session = Session::connect(chain.clone()).unwrap();
        let deployment = chain.deployment();
        let platform = ContentPlatform::new(&session, &deployment);

        let mut upload = form("Title", "Body", "");
        upload.submit(&platform, None).unwrap();

        assert_eq!(platform.content_count().unwrap(), 1);
        assert_eq!(platform.balance().unwrap(), fee);
    }

    #[test]
    fn missing_fields_issue_no_call() {
        let chain = MockChain::new(OWNER).with_accounts([ALICE]);
        let session = Session::connect(chain.clone()).unwrap();
        let deployment = chain.deployment();
        let platform = ContentPlatform::new(&session, &deployment);

        for mut upload in [form("", "Body", "1"), form("Title", " ", "1"), form("T", "B", "abc")] {
            assert!(upload.submit(&platform, None).is_err());
        }
        assert!(chain.calls().is_empty());
    }

    #[test]
    fn rejected_post_keeps_fields() {
        let chain = MockChain::new(OWNER).with_accounts([ALICE]);
        let session = Session::connect(chain.clone()).unwrap();
        let deployment = chain.deployment();
        let platform = ContentPlatform::new(&session, &deployment);

        let mut upload = form("Title", "Body", "1");
        let err = upload.submit(&platform, Some(U256::from(1))).unwrap_err();

        assert_eq!(crate::describe(&err), "Incorrect posting fee");
        assert_eq!(upload, form("Title", "Body", "1"));
    }
}
