//! Oracle price feed layer.
//!
//! The calculator itself never does I/O; this module keeps a fresh, validated
//! quote available to it. Validation mirrors the settlement program's own
//! oracle checks (positive price, staleness window, confidence cap) so a
//! price the client shows is one the program would also have accepted.

mod hermes;
mod poller;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use crate::fixed_point::FixedPointError;
use crate::protocol::BASIS_POINTS;

pub use hermes::HermesOracle;
pub use poller::PricePoller;

/// Errors from the price feed layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The price API could not be reached.
    #[error("price API request failed: {0}")]
    Network(String),

    /// The price API response could not be interpreted.
    #[error("price API response malformed: {0}")]
    Parse(String),

    /// The API returned no update for the requested feed.
    #[error("no update returned for feed {feed_id}")]
    UnknownFeed {
        /// The requested feed ID.
        feed_id: String,
    },

    /// Oracle prices must be strictly positive.
    #[error("oracle price must be positive")]
    NonPositivePrice,

    /// The update is older than the staleness window.
    #[error("price update is {age_secs}s old, limit is {max_secs}s")]
    Stale {
        /// Age of the update in seconds.
        age_secs: i64,
        /// Configured maximum age in seconds.
        max_secs: u64,
    },

    /// The confidence interval is too wide to trust.
    #[error("confidence {confidence_bps} bps exceeds the {max_bps} bps limit")]
    ConfidenceTooHigh {
        /// Observed confidence, basis points of the price.
        confidence_bps: u64,
        /// Configured cap, basis points.
        max_bps: u64,
    },

    /// A mantissa/exponent pair could not be normalized.
    #[error(transparent)]
    Encoding(#[from] FixedPointError),
}

/// A normalized oracle price update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceUpdate {
    /// Price in USD.
    pub price: Decimal,
    /// Confidence interval in USD.
    pub conf: Decimal,
    /// When the oracle published the update.
    pub publish_time: DateTime<Utc>,
}

impl PriceUpdate {
    /// Apply the program's oracle acceptance checks against `now`.
    pub fn validate(
        &self,
        now: DateTime<Utc>,
        max_age_secs: u64,
        max_confidence_bps: u64,
    ) -> Result<(), FeedError> {
        if self.price <= Decimal::ZERO {
            return Err(FeedError::NonPositivePrice);
        }

        let age_secs = (now - self.publish_time).num_seconds().max(0);
        if age_secs > i64::try_from(max_age_secs).unwrap_or(i64::MAX) {
            return Err(FeedError::Stale {
                age_secs,
                max_secs: max_age_secs,
            });
        }

        // Integer basis points, floored, exactly as the program computes them.
        let confidence_bps = (self.conf * Decimal::from(BASIS_POINTS) / self.price).trunc();
        if confidence_bps > Decimal::from(max_confidence_bps) {
            return Err(FeedError::ConfidenceTooHigh {
                confidence_bps: confidence_bps.to_u64().unwrap_or(u64::MAX),
                max_bps: max_confidence_bps,
            });
        }

        Ok(())
    }
}

/// Port for fetching the latest oracle price of a feed.
#[async_trait]
pub trait PriceOraclePort: Send + Sync {
    /// Fetch the latest update for a feed ID.
    async fn latest_update(&self, feed_id: &str) -> Result<PriceUpdate, FeedError>;
}
