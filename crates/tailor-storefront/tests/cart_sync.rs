mod common;

use common::{api, url, TOKEN};
use serde_json::json;
use tailor_cache::{Cache, KvStore, MemoryStore};
use tailor_commerce::cart::{CartLine, CartLines};
use tailor_commerce::{ProductId, VariantId};
use tailor_data::{FetchError, Method};
use tailor_observability::{LogLevel, LogSink, RequestId, StructuredLogger};
use tailor_storefront::{AuthStatus, CartStore, NoticeLevel, CART_ITEMS_KEY, NO_PRODUCT_DETAIL};

const SUIT: ProductId = ProductId::new(5);
const SUIT_NAVY_40: VariantId = VariantId::new(50);
const TIE: ProductId = ProductId::new(8);
const TIE_RED: VariantId = VariantId::new(80);

fn server_line(product: u64, variant: u64, pcs: i64) -> serde_json::Value {
    json!({"user": 1, "product": product, "variant": variant, "pcs": pcs})
}

#[tokio::test]
async fn anonymous_cart_lives_in_local_storage() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    cart.sync(AuthStatus::Anonymous).await.unwrap();

    let notice = cart.increase(SUIT, SUIT_NAVY_40, Some("Added to cart")).await;
    assert_eq!(notice.unwrap().level, NoticeLevel::Success);
    cart.increase(SUIT, SUIT_NAVY_40, None).await;
    cart.increase(TIE, TIE_RED, None).await;
    assert_eq!(cart.total_pieces(), 3);

    assert!(cart.decrease(TIE, TIE_RED, None).await.is_none());
    assert_eq!(cart.lines(), &[CartLine::new(SUIT, SUIT_NAVY_40, 2)]);

    let stored: CartLines = cart.cache().get(CART_ITEMS_KEY).unwrap().unwrap();
    assert_eq!(stored.as_slice(), cart.lines());
    assert!(mock.requests().is_empty());
    assert!(!cart.is_loading());
}

#[tokio::test]
async fn anonymous_decrease_of_missing_line_changes_nothing() {
    let (_mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    cart.sync(AuthStatus::Anonymous).await.unwrap();

    assert!(cart.decrease(SUIT, SUIT_NAVY_40, None).await.is_none());
    assert_eq!(cart.total_pieces(), 0);
}

#[tokio::test]
async fn unreadable_local_cart_reads_as_empty() {
    let (_mock, api) = api();
    let cache = Cache::new(MemoryStore::new());
    cache.store().set(CART_ITEMS_KEY, b"{not json").unwrap();
    let mut cart = CartStore::new(cache, api);
    cart.sync(AuthStatus::Anonymous).await.unwrap();
    assert!(cart.lines().is_empty());
}

#[tokio::test]
async fn login_replaces_local_cart_without_merging() {
    let (mock, api) = api();
    let cache = Cache::new(MemoryStore::new());
    cache
        .set(CART_ITEMS_KEY, &vec![CartLine::new(TIE, TIE_RED, 4)])
        .unwrap();
    let mut cart = CartStore::new(cache, api);
    cart.sync(AuthStatus::Anonymous).await.unwrap();
    assert_eq!(cart.total_pieces(), 4);

    mock.push_json(200, json!([server_line(5, 50, 3)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    assert_eq!(cart.total_pieces(), 3);
    assert_eq!(cart.lines()[0].product, SUIT);
    let request = mock.last_request().unwrap();
    assert_eq!(request.url, url("api/products/cart/"));
    assert_eq!(request.header("Authorization"), Some("Bearer token-123"));

    // The signed-out cart is left as it was.
    let stored: CartLines = cart.cache().get(CART_ITEMS_KEY).unwrap().unwrap();
    assert_eq!(stored.total_pieces(), 4);

    // Logging out shows it again.
    cart.sync(AuthStatus::Anonymous).await.unwrap();
    assert_eq!(cart.total_pieces(), 4);
}

#[tokio::test]
async fn failed_sync_keeps_previous_lines() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    cart.sync(AuthStatus::Anonymous).await.unwrap();
    cart.increase(SUIT, SUIT_NAVY_40, None).await;

    mock.push_error(FetchError::Network("connection refused".into()));
    let err = cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap_err();
    assert_eq!(err.user_message(), "Network error. Please check your connection.");
    assert_eq!(cart.total_pieces(), 1);
}

#[tokio::test]
async fn authenticated_increase_posts_new_line_then_refetches() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_json(201, json!({"message": "added"}));
    mock.push_json(200, json!([server_line(5, 50, 1)]));
    let notice = cart.increase(SUIT, SUIT_NAVY_40, Some("Added to cart")).await;
    assert_eq!(notice.unwrap().message, "Added to cart");

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].method, Method::Post);
    assert_eq!(requests[1].url, url("api/products/cart/"));
    assert_eq!(
        requests[1].json_body(),
        Some(json!({"items": [{"id": 5, "variantId": 50, "pcs": 1}]}))
    );
    assert_eq!(requests[2].method, Method::Get);
    assert_eq!(cart.total_pieces(), 1);
}

#[tokio::test]
async fn authenticated_increase_patches_existing_line() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([server_line(5, 50, 3)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_json(200, json!({}));
    mock.push_json(200, json!([server_line(5, 50, 4)]));
    assert!(cart.increase(SUIT, SUIT_NAVY_40, None).await.is_none());

    let patch = &mock.requests()[1];
    assert_eq!(patch.method, Method::Patch);
    assert_eq!(patch.url, url("api/products/cart/5/"));
    assert_eq!(
        patch.json_body(),
        Some(json!({"product": 5, "variant": 50, "pcs": 4}))
    );
    assert_eq!(cart.total_pieces(), 4);
}

#[tokio::test]
async fn authenticated_decrease_to_zero_deletes_line() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([server_line(5, 50, 1), server_line(8, 80, 2)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_body(204, "");
    mock.push_json(200, json!([server_line(8, 80, 2)]));
    cart.decrease(SUIT, SUIT_NAVY_40, Some("Removed")).await;

    let delete = &mock.requests()[1];
    assert_eq!(delete.method, Method::Delete);
    assert_eq!(delete.url, url("api/products/cart/5/variant/50/"));
    assert_eq!(cart.lines(), &[CartLine {
        user: Some(tailor_commerce::UserId::new(1)),
        product: TIE,
        variant: TIE_RED,
        pcs: 2,
    }]);
}

#[tokio::test]
async fn authenticated_decrease_of_missing_line_sends_nothing() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    assert!(cart.decrease(SUIT, SUIT_NAVY_40, Some("Removed")).await.is_none());
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn missing_product_detail_is_swallowed() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([server_line(5, 50, 2)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_json(404, json!({"detail": NO_PRODUCT_DETAIL}));
    assert!(cart.decrease(SUIT, SUIT_NAVY_40, Some("Removed")).await.is_none());
    // No refetch after a failed mutation.
    assert_eq!(mock.requests().len(), 2);
    assert_eq!(cart.total_pieces(), 2);
}

#[tokio::test]
async fn api_errors_become_error_notices() {
    let (mock, api) = api();
    let sink = LogSink::memory();
    let logger = StructuredLogger::new(RequestId::from_string("req-cart"))
        .with_min_level(LogLevel::Debug)
        .with_sink(sink.clone());
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api).with_logger(logger);
    mock.push_json(200, json!([]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_json(400, json!({"variant": ["Only 0 left in stock."]}));
    let notice = cart.increase(SUIT, SUIT_NAVY_40, Some("Added")).await.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Only 0 left in stock.");
    assert!(sink
        .lines()
        .iter()
        .any(|line| line.contains("cart update failed") && line.contains("req-cart")));
}

#[tokio::test]
async fn failed_refetch_applies_change_locally() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([server_line(5, 50, 1)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_json(200, json!({}));
    mock.push_error(FetchError::Timeout);
    let notice = cart.increase(SUIT, SUIT_NAVY_40, Some("Added")).await;
    assert_eq!(notice.unwrap().level, NoticeLevel::Success);
    assert_eq!(cart.total_pieces(), 2);
}

#[tokio::test]
async fn clear_empties_either_cart() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    cart.sync(AuthStatus::Anonymous).await.unwrap();
    cart.increase(SUIT, SUIT_NAVY_40, None).await;
    cart.clear().await.unwrap();
    assert!(cart.lines().is_empty());
    assert!(!cart.cache().exists(CART_ITEMS_KEY).unwrap());

    mock.push_json(200, json!([server_line(5, 50, 1)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();
    mock.push_body(204, "");
    cart.clear().await.unwrap();
    assert_eq!(mock.last_request().unwrap().url, url("api/products/clearcart/"));
    assert_eq!(cart.total_pieces(), 0);
}
