//! Hermes adapter tests against a mock HTTP server.

use rust_decimal_macros::dec;
use sizing_engine::{FeedConfig, FeedError, HermesOracle, PriceOraclePort};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BTC_FEED: &str = "0xe62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43";

fn config_for(server: &MockServer) -> FeedConfig {
    FeedConfig {
        endpoint: server.uri(),
        ..FeedConfig::default()
    }
}

#[tokio::test]
async fn returns_the_normalized_price() {
    let server = MockServer::start().await;

    let body = r#"{
        "parsed": [{
            "id": "e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43",
            "price": {
                "price": "6500012345678",
                "conf": "3250000000",
                "expo": -8,
                "publish_time": 1700000000
            }
        }]
    }"#;

    Mock::given(method("GET"))
        .and(path("/v2/updates/price/latest"))
        .and(query_param("ids[]", BTC_FEED))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let oracle = HermesOracle::new(&config_for(&server)).unwrap();
    let update = oracle.latest_update(BTC_FEED).await.unwrap();

    assert_eq!(update.price, dec!(65000.12345678));
    assert_eq!(update.conf, dec!(32.5));
    assert_eq!(update.publish_time.timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn reports_server_errors_as_network_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/updates/price/latest"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let oracle = HermesOracle::new(&config_for(&server)).unwrap();
    let err = oracle.latest_update(BTC_FEED).await.unwrap_err();

    assert!(matches!(err, FeedError::Network(_)));
}

#[tokio::test]
async fn missing_feed_in_response_is_unknown_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/updates/price/latest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"parsed": []}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let oracle = HermesOracle::new(&config_for(&server)).unwrap();
    let err = oracle.latest_update(BTC_FEED).await.unwrap_err();

    assert!(matches!(err, FeedError::UnknownFeed { .. }));
}
