use gtrans::token::*;
use httpmock::prelude::*;
use proptest::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const PAGE: &str = "<html><script>var c = {gl:'us',tkk:'445678.1197138734',x:'1.2'};</script></html>";

fn store_for(server: &MockServer) -> KeyPairStore {
    KeyPairStore::builder()
        .http_client(reqwest::Client::new())
        .page_url(server.url("/"))
        .build()
}

fn is_synthetic(pair: KeyPair) -> bool {
    let hour = time::OffsetDateTime::now_utc().unix_timestamp().div_euclid(3600);
    // 跨小时边界时允许差1
    pair.seed() == pair.mask() && (pair.seed() - hour).abs() <= 1
}

// region    --- store
#[tokio::test]
async fn fetches_once_and_caches() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).header("content-type", "text/html").body(PAGE);
        })
        .await;

    let store = store_for(&server);
    assert!(store.cached().await.is_none());
    for _ in 0..5 {
        assert_eq!(store.current().await, KeyPair::new(445678, 1197138734));
    }
    page.assert_hits_async(1).await;

    let cached = store.cached().await.unwrap();
    assert_eq!(cached.source, KeyPairSource::Page);
}

#[tokio::test]
async fn derive_uses_fetched_pair() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(PAGE);
        })
        .await;

    let store = store_for(&server);
    assert_eq!(store.derive("a😀").await.to_string(), "845925.664715");
    assert_eq!(store.derive("a").await.to_string(), "77580.517090");
}

#[tokio::test]
async fn concurrent_callers_share_one_fetch() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .body(PAGE)
                .delay(Duration::from_millis(200));
        })
        .await;

    let store = Arc::new(store_for(&server));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.current().await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), KeyPair::new(445678, 1197138734));
    }
    page.assert_hits_async(1).await;
}

#[tokio::test]
async fn non_success_status_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(503).body("unavailable");
        })
        .await;

    let store = store_for(&server);
    let err = store.fetch().await.unwrap_err();
    assert!(err.is_fetch());
    assert!(matches!(err, KeyPairError::Status(status) if status.as_u16() == 503));

    let pair = store.current().await;
    assert!(is_synthetic(pair));
    assert_eq!(store.cached().await.unwrap().source, KeyPairSource::Fallback);
}

#[tokio::test]
async fn unparsable_page_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("<html>no key here</html>");
        })
        .await;

    let store = store_for(&server);
    assert!(store.fetch().await.unwrap_err().is_parse());

    let token = store.derive("hello").await;
    assert!(token.value() < 1_000_000);
    assert!(is_synthetic(store.current().await));
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    let store = KeyPairStore::builder()
        .http_client(reqwest::Client::new())
        .page_url("http://127.0.0.1:1/")
        .build();
    assert!(store.fetch().await.unwrap_err().is_fetch());
    assert!(is_synthetic(store.current().await));
}

#[tokio::test]
async fn slow_page_is_bounded_by_client_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(PAGE).delay(Duration::from_secs(5));
        })
        .await;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let store = KeyPairStore::builder()
        .http_client(http_client)
        .page_url(server.url("/"))
        .build();

    let pair = tokio::time::timeout(Duration::from_secs(3), store.current())
        .await
        .unwrap();
    assert!(is_synthetic(pair));
}

#[tokio::test]
async fn fallback_is_retried_after_interval() {
    let server = MockServer::start_async().await;
    let mut broken = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(500);
        })
        .await;

    let store = KeyPairStore::builder()
        .http_client(reqwest::Client::new())
        .page_url(server.url("/"))
        .fallback_retry(Duration::ZERO)
        .build();
    assert!(is_synthetic(store.current().await));
    broken.delete_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(PAGE);
        })
        .await;
    assert_eq!(store.current().await, KeyPair::new(445678, 1197138734));
}

#[tokio::test]
async fn fallback_is_kept_within_interval() {
    let server = MockServer::start_async().await;
    let broken = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(500);
        })
        .await;

    let store = store_for(&server);
    store.current().await;
    store.current().await;
    broken.assert_hits_async(1).await;
}

#[tokio::test]
async fn refresh_and_invalidate() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(PAGE);
        })
        .await;

    let store = store_for(&server);
    store.current().await;
    let refreshed = store.refresh().await;
    assert_eq!(refreshed.pair, KeyPair::new(445678, 1197138734));
    page.assert_hits_async(2).await;

    store.invalidate().await;
    assert!(store.cached().await.is_none());
    store.current().await;
    page.assert_hits_async(3).await;
}

#[tokio::test]
async fn max_age_expires_page_pair() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(PAGE);
        })
        .await;

    let store = KeyPairStore::builder()
        .http_client(reqwest::Client::new())
        .page_url(server.url("/"))
        .max_age(Duration::ZERO)
        .build();
    store.current().await;
    store.current().await;
    page.assert_hits_async(2).await;
}

#[tokio::test]
async fn replaced_pair_skips_fetch() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(PAGE);
        })
        .await;

    let store = store_for(&server);
    store.replace(KeyPair::new(0, 0)).await;
    assert_eq!(store.derive("").await.to_string(), "0.0");
    assert_eq!(store.cached().await.unwrap().source, KeyPairSource::Manual);
    page.assert_hits_async(0).await;
}

#[tokio::test]
async fn cancelled_fetch_leaves_cache_untouched() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(PAGE).delay(Duration::from_secs(5));
        })
        .await;

    let store = store_for(&server);
    let res = tokio::time::timeout(Duration::from_millis(100), store.current()).await;
    assert!(res.is_err());
    assert!(store.cached().await.is_none());
}

#[tokio::test]
async fn custom_key_name() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).body(PAGE);
        })
        .await;

    let store = KeyPairStore::builder()
        .http_client(reqwest::Client::new())
        .page_url(server.url("/"))
        .key_name("x")
        .build();
    assert_eq!(store.current().await, KeyPair::new(1, 2));
}
// endregion --- store

// region    --- transform properties
#[test]
fn distinct_texts_give_distinct_tokens() {
    let pair = KeyPair::new(406398, 2087938574);
    let tokens: HashSet<String> = (0..1000)
        .map(|i| derive(&format!("text-{}", i), pair).to_string())
        .collect();
    assert_eq!(tokens.len(), 1000);
}

#[test]
fn distinct_pairs_give_distinct_tokens() {
    let by_seed: HashSet<String> = (0..1000)
        .map(|i| derive("hello", KeyPair::new(406398 + i, 2087938574)).to_string())
        .collect();
    assert_eq!(by_seed.len(), 1000);

    let by_mask: HashSet<String> = (0..1000)
        .map(|i| derive("hello", KeyPair::new(406398, 2087938574 + i)).to_string())
        .collect();
    assert_eq!(by_mask.len(), 1000);
}

#[test]
fn supplementary_char_changes_token() {
    let pair = KeyPair::new(445678, 1197138734);
    assert_eq!("a😀".encode_utf16().count(), 3);
    assert_ne!(derive("a😀", pair), derive("a", pair));
    assert_eq!(derive("a😀", pair).to_string(), "845925.664715");
}

proptest! {
    #[test]
    fn token_is_deterministic(text in ".{0,64}", seed in any::<i64>(), mask in any::<i64>()) {
        let pair = KeyPair::new(seed, mask);
        prop_assert_eq!(derive(&text, pair), derive(&text, pair));
    }

    #[test]
    fn token_format(text in ".{0,64}", seed in any::<i64>(), mask in any::<i64>()) {
        let token = derive(&text, KeyPair::new(seed, mask));
        let pattern = Regex::new(r"^\d+\.\d+$").unwrap();
        prop_assert!(pattern.is_match(&token.to_string()));
        prop_assert!(token.value() < 1_000_000);
        prop_assert_eq!(token.check(), token.value() ^ seed as u32);
    }
}
// endregion --- transform properties
