mod common;

use common::{api, url, TOKEN};
use serde_json::json;
use tailor_cache::{Cache, MemoryStore};
use tailor_commerce::checkout::{OrderGroup, OrderStatus};
use tailor_commerce::{AddressId, CommerceError, Currency, Money};
use tailor_data::Method;
use tailor_storefront::{AuthStatus, CartStore, StorefrontError};

fn server_line(product: u64, variant: u64, pcs: i64) -> serde_json::Value {
    json!({"user": 1, "product": product, "variant": variant, "pcs": pcs})
}

fn variant_row(id: u64, product: u64, price: &str, stock: u32) -> serde_json::Value {
    json!({
        "id": id,
        "product": product,
        "color_code": "#000080",
        "color_name": "Navy",
        "size": "40R",
        "price": price,
        "discount": 0,
        "stock": stock
    })
}

fn order_row(id: u64, uid: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "transactionuid": uid,
        "status": status,
        "sub_total": "17500.00",
        "discount": "500.00",
        "total_amt": "17000.00",
        "payment_method": "Cash On Delivery",
        "created": "2026-03-14T09:30:00Z"
    })
}

#[tokio::test]
async fn checkout_places_order_and_empties_cart() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([server_line(5, 50, 2), server_line(8, 80, 1)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_json(200, variant_row(50, 5, "8000.00", 4));
    mock.push_json(200, variant_row(80, 8, "1500.00", 3));
    mock.push_json(201, json!({"message": "Order created"}));
    mock.push_json(200, json!({}));
    mock.push_json(200, json!([]));

    let discount = Money::from_parts(500, 0, Currency::NPR);
    let order = cart.checkout(AddressId::new(7), Some(discount)).await.unwrap();
    assert_eq!(order.total_amt, Money::from_parts(17000, 0, Currency::NPR));
    assert_eq!(order.transactionuid.len(), 36);

    let requests = mock.requests();
    let calls: Vec<_> = requests.iter().map(|r| (r.method, r.url.clone())).collect();
    assert_eq!(
        calls[1..],
        [
            (Method::Get, url("api/products/product-variants/50/")),
            (Method::Get, url("api/products/product-variants/80/")),
            (Method::Post, url("api/sales/sales/")),
            (Method::Delete, url("api/products/clearcart/")),
            (Method::Get, url("api/products/cart/")),
        ]
    );

    let body = requests[3].json_body().unwrap();
    assert_eq!(body["sub_total"], 17500.0);
    assert_eq!(body["discount"], 500.0);
    assert_eq!(body["total_amt"], 17000.0);
    assert_eq!(body["shipping"], 7);
    assert_eq!(body["payment_method"], "Cash On Delivery");
    assert_eq!(body["transactionuid"], order.transactionuid.as_str());
    assert_eq!(
        body["products"],
        json!([
            {"product": 5, "variant": 50, "pcs": 2},
            {"product": 8, "variant": 80, "pcs": 1}
        ])
    );
    assert_eq!(requests[3].header("Authorization"), Some("Bearer token-123"));

    assert_eq!(cart.total_pieces(), 0);
    assert!(!cart.is_loading());
}

#[tokio::test]
async fn checkout_short_of_stock_never_reaches_sales() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([server_line(5, 50, 2)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_json(200, variant_row(50, 5, "8000.00", 1));
    let err = cart.checkout(AddressId::new(7), None).await.unwrap_err();

    assert!(matches!(
        err,
        StorefrontError::Commerce(CommerceError::InsufficientStock {
            requested: 2,
            available: 1,
            ..
        })
    ));
    assert!(mock.requests().iter().all(|r| r.method == Method::Get));
    assert_eq!(cart.total_pieces(), 2);
}

#[tokio::test]
async fn checkout_keeps_cart_when_backend_rejects_order() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    mock.push_json(200, json!([server_line(5, 50, 1)]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();

    mock.push_json(200, variant_row(50, 5, "8000.00", 1));
    mock.push_json(
        400,
        json!({"error": ["Not enough stock for product variant 50"]}),
    );
    let err = cart.checkout(AddressId::new(7), None).await.unwrap_err();

    assert_eq!(err.user_message(), "Not enough stock for product variant 50");
    assert_eq!(mock.requests().len(), 3);
    assert_eq!(cart.total_pieces(), 1);
}

#[tokio::test]
async fn checkout_needs_login_and_lines() {
    let (mock, api) = api();
    let mut cart = CartStore::new(Cache::new(MemoryStore::new()), api);
    cart.sync(AuthStatus::Anonymous).await.unwrap();
    let err = cart.checkout(AddressId::new(7), None).await.unwrap_err();
    assert!(matches!(err, StorefrontError::NotAuthenticated));
    assert!(mock.requests().is_empty());

    mock.push_json(200, json!([]));
    cart.sync(AuthStatus::authenticated(TOKEN)).await.unwrap();
    let err = cart.checkout(AddressId::new(7), None).await.unwrap_err();
    assert_eq!(err.user_message(), "Validation error: Cart is empty.");
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn orders_list_by_status_group() {
    let (mock, api) = api();
    mock.push_json(
        200,
        json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [order_row(2, "uid-2", "verified"), order_row(1, "uid-1", "pending")]
        }),
    );

    let orders = api
        .orders(TOKEN, Some(OrderGroup::OnShipping), Some("hari"))
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o.in_group(Some(OrderGroup::OnShipping))));
    assert_eq!(orders[0].total_amt, Money::from_parts(17000, 0, Currency::NPR));
    assert_eq!(
        mock.last_request().unwrap().url,
        url("api/sales/sales/status/onshipping/?search=hari")
    );

    mock.push_json(200, json!([order_row(3, "uid-3", "cancelled")]));
    let all = api.orders(TOKEN, None, None).await.unwrap();
    assert_eq!(all[0].status, OrderStatus::Cancelled);
    assert_eq!(mock.last_request().unwrap().url, url("api/sales/sales/"));
}

#[tokio::test]
async fn order_by_transaction_uid() {
    let (mock, api) = api();
    let mut row = order_row(4, "5f0c1a2e-8b7d-4c3e-9a1b-2c3d4e5f6a7b", "packed");
    row["products"] = json!([
        {"product": 5, "variant": 50, "qty": 2, "price": "8000.00", "total": "16000.00"},
        {"product": 8, "variant": 80, "qty": 1, "price": "1500.00", "total": "1500.00"}
    ]);
    mock.push_json(200, row);

    let order = api
        .order(TOKEN, "5f0c1a2e-8b7d-4c3e-9a1b-2c3d4e5f6a7b")
        .await
        .unwrap();
    assert_eq!(order.status.group(), OrderGroup::Arrived);
    assert_eq!(order.lines_total(), Some(order.sub_total));
    assert_eq!(
        mock.last_request().unwrap().url,
        url("api/sales/sales/transaction/5f0c1a2e-8b7d-4c3e-9a1b-2c3d4e5f6a7b/")
    );

    mock.push_json(404, json!({"detail": "Not found."}));
    let err = api.order(TOKEN, "missing").await.unwrap_err();
    assert_eq!(err.user_message(), "Not found.");
}
