//! Hermes price API adapter.
//!
//! Implements [`PriceOraclePort`] against the Pyth Hermes HTTP API
//! (`GET /v2/updates/price/latest`). Hermes returns prices as a decimal
//! mantissa plus exponent; normalization goes through [`crate::fixed_point`]
//! so no binary floating point touches the value.

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use crate::config::FeedConfig;
use crate::fixed_point;

use super::{FeedError, PriceOraclePort, PriceUpdate};

/// HTTP client for the Hermes price API.
#[derive(Debug, Clone)]
pub struct HermesOracle {
    client: reqwest::Client,
    endpoint: String,
}

impl HermesOracle {
    /// Create a new Hermes client from feed configuration.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_latest(&self, feed_id: &str) -> Result<LatestPriceResponse, FeedError> {
        let url = format!("{}/v2/updates/price/latest", self.endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("ids[]", feed_id)])
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Network(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PriceOraclePort for HermesOracle {
    async fn latest_update(&self, feed_id: &str) -> Result<PriceUpdate, FeedError> {
        let response = self.fetch_latest(feed_id).await?;

        let parsed = response
            .parsed
            .into_iter()
            .find(|update| feed_ids_match(&update.id, feed_id))
            .ok_or_else(|| FeedError::UnknownFeed {
                feed_id: feed_id.to_string(),
            })?;

        parsed.price.try_into()
    }
}

/// Hermes omits the `0x` prefix on feed IDs; compare without it.
fn feed_ids_match(returned: &str, requested: &str) -> bool {
    returned
        .trim_start_matches("0x")
        .eq_ignore_ascii_case(requested.trim_start_matches("0x"))
}

#[derive(Debug, Deserialize)]
struct LatestPriceResponse {
    parsed: Vec<ParsedUpdate>,
}

#[derive(Debug, Deserialize)]
struct ParsedUpdate {
    id: String,
    price: RawPrice,
}

/// Price payload as Hermes serializes it: stringified mantissas plus an
/// exponent shared by price and confidence.
#[derive(Debug, Deserialize)]
struct RawPrice {
    price: String,
    conf: String,
    expo: i32,
    publish_time: i64,
}

impl TryFrom<RawPrice> for PriceUpdate {
    type Error = FeedError;

    fn try_from(raw: RawPrice) -> Result<Self, Self::Error> {
        let mantissa: i64 = raw
            .price
            .parse()
            .map_err(|_| FeedError::Parse(format!("price mantissa {:?}", raw.price)))?;
        let conf_mantissa: i64 = raw
            .conf
            .parse()
            .map_err(|_| FeedError::Parse(format!("confidence mantissa {:?}", raw.conf)))?;

        let publish_time = DateTime::from_timestamp(raw.publish_time, 0)
            .ok_or_else(|| FeedError::Parse(format!("publish_time {}", raw.publish_time)))?;

        Ok(Self {
            price: fixed_point::from_raw_exponent(mantissa, raw.expo)?,
            conf: fixed_point::from_raw_exponent(conf_mantissa, raw.expo)?,
            publish_time,
        })
    }
}
