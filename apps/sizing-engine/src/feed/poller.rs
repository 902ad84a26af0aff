//! Cancellable price polling task.
//!
//! Polls an oracle port on a fixed interval and publishes the latest
//! validated update through a `watch` channel. The task is bound to the
//! owning component's lifetime via a [`CancellationToken`]; dropping the UI
//! view cancels the token and the loop exits. Fetch failures and rejected
//! updates keep the previous value in place.
//!
//! Freshness policy lives here, on the caller's side of the boundary — the
//! sizing calculator stays synchronous and trusts whatever price it is given.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::FeedConfig;

use super::{PriceOraclePort, PriceUpdate};

/// Polls one price feed and broadcasts its latest accepted update.
pub struct PricePoller {
    oracle: Arc<dyn PriceOraclePort>,
    feed_id: String,
    config: FeedConfig,
    tx: watch::Sender<Option<PriceUpdate>>,
    cancel: CancellationToken,
}

impl PricePoller {
    /// Create a poller and the receiver its updates arrive on.
    ///
    /// The receiver starts at `None` and flips to `Some` once the first
    /// update passes validation.
    #[must_use]
    pub fn new(
        oracle: Arc<dyn PriceOraclePort>,
        feed_id: impl Into<String>,
        config: FeedConfig,
        cancel: CancellationToken,
    ) -> (Self, watch::Receiver<Option<PriceUpdate>>) {
        let (tx, rx) = watch::channel(None);
        (
            Self {
                oracle,
                feed_id: feed_id.into(),
                config,
                tx,
                cancel,
            },
            rx,
        )
    }

    /// Run the polling loop until cancelled.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.config.poll_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    tracing::debug!(feed_id = %self.feed_id, "price poller cancelled");
                    break;
                }
                _ = interval.tick() => {
                    self.poll_once().await;
                }
            }
        }
    }

    async fn poll_once(&self) {
        match self.oracle.latest_update(&self.feed_id).await {
            Ok(update) => {
                let check = update.validate(
                    Utc::now(),
                    self.config.max_age_secs,
                    self.config.max_confidence_bps,
                );
                match check {
                    Ok(()) => {
                        self.tx.send_replace(Some(update));
                    }
                    Err(e) => {
                        tracing::warn!(
                            feed_id = %self.feed_id,
                            error = %e,
                            "discarding oracle update, keeping previous price"
                        );
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    feed_id = %self.feed_id,
                    error = %e,
                    "price fetch failed, keeping previous price"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::feed::FeedError;

    fn fast_config() -> FeedConfig {
        FeedConfig {
            poll_interval_ms: 10,
            ..FeedConfig::default()
        }
    }

    fn fresh_update() -> PriceUpdate {
        PriceUpdate {
            price: dec!(65000),
            conf: dec!(30),
            publish_time: Utc::now(),
        }
    }

    /// Oracle stub cycling through scripted responses, repeating the last.
    struct ScriptedOracle {
        responses: Vec<Result<PriceUpdate, FeedError>>,
        calls: AtomicU32,
    }

    impl ScriptedOracle {
        fn new(responses: Vec<Result<PriceUpdate, FeedError>>) -> Arc<Self> {
            Arc::new(Self {
                responses,
                calls: AtomicU32::new(0),
            })
        }
    }

    #[async_trait]
    impl PriceOraclePort for ScriptedOracle {
        async fn latest_update(&self, _feed_id: &str) -> Result<PriceUpdate, FeedError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            let index = call.min(self.responses.len() - 1);
            self.responses[index].clone()
        }
    }

    #[tokio::test]
    async fn publishes_updates_and_exits_on_cancel() {
        let oracle = ScriptedOracle::new(vec![Ok(fresh_update())]);
        let cancel = CancellationToken::new();
        let (poller, mut rx) =
            PricePoller::new(oracle, "feed-1", fast_config(), cancel.clone());

        let handle = tokio::spawn(poller.run());

        rx.changed().await.unwrap();
        let update = rx.borrow().clone();
        assert_eq!(update.map(|u| u.price), Some(dec!(65000)));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn keeps_last_good_value_across_fetch_failures() {
        let oracle = ScriptedOracle::new(vec![
            Ok(fresh_update()),
            Err(FeedError::Network("connection reset".to_string())),
        ]);
        let cancel = CancellationToken::new();
        let (poller, mut rx) =
            PricePoller::new(oracle.clone(), "feed-1", fast_config(), cancel.clone());

        let handle = tokio::spawn(poller.run());

        rx.changed().await.unwrap();
        // Let several failing polls go by.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(oracle.calls.load(Ordering::SeqCst) > 2);
        assert_eq!(rx.borrow().clone().map(|u| u.price), Some(dec!(65000)));

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn never_publishes_a_stale_update() {
        let stale = PriceUpdate {
            publish_time: Utc::now() - TimeDelta::seconds(600),
            ..fresh_update()
        };
        let oracle = ScriptedOracle::new(vec![Ok(stale)]);
        let cancel = CancellationToken::new();
        let (poller, rx) = PricePoller::new(oracle, "feed-1", fast_config(), cancel.clone());

        let handle = tokio::spawn(poller.run());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.borrow().is_none());

        cancel.cancel();
        handle.await.unwrap();
    }
}
