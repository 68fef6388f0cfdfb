mod common;

use axum::http::{header, StatusCode};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use sea_orm::DatabaseConnection;
use stock_store::{
    entities::stock_aud::RevisionType,
    models::stock::StockDto,
    repositories::{stock_audit_repository, stock_repository},
    AppState,
};

use crate::common::{body_bytes, body_json, build_test_router, empty_request, json_request, send};

const DEFAULT_NAME: &str = "p1";

async fn store_size(db: &DatabaseConnection) -> u64 {
    stock_repository::count(db).await.unwrap()
}

async fn seed(state: &AppState, name: &str, price: rust_decimal::Decimal) -> StockDto {
    state
        .stocks
        .save(StockDto::default().with_name(name).with_current_price(price))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_stock() {
    let (app, state, db) = build_test_router().await;
    let size_before = store_size(&db).await;

    let response = send(
        &app,
        json_request("POST", "/api/stocks", json!({ "name": DEFAULT_NAME, "currentPrice": 12.5 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let headers = response.headers().clone();
    let body = body_json(response).await;

    let id = body["id"].as_i64().expect("created stock has an id");
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        format!("/api/stocks/{}", id).as_str()
    );
    assert_eq!(headers.get("x-storeapp-alert").unwrap(), "storeApp.Stock.created");
    assert_eq!(headers.get("x-storeapp-params").unwrap(), id.to_string().as_str());

    assert_eq!(body["name"], DEFAULT_NAME);
    assert_eq!(body["currentPrice"].as_f64(), Some(12.5));
    assert!(body["createdDate"].is_string());
    assert!(body["modifiedDate"].is_string());

    assert_eq!(store_size(&db).await, size_before + 1);
    let stored = state.stocks.find_one(id).await.unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some(DEFAULT_NAME));
}

#[tokio::test]
async fn test_create_stock_with_existing_id() {
    let (app, _state, db) = build_test_router().await;
    let size_before = store_size(&db).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/stocks",
            json!({ "id": 1, "name": DEFAULT_NAME, "currentPrice": 12.5 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers().get("x-storeapp-error").unwrap(), "error.idexists");
    assert_eq!(response.headers().get("x-storeapp-params").unwrap(), "Stock");

    let body = body_json(response).await;
    assert_eq!(body["title"], "A new stock cannot already have an ID");
    assert_eq!(body["entityName"], "Stock");
    assert_eq!(body["errorKey"], "idexists");

    assert_eq!(store_size(&db).await, size_before);
}

#[tokio::test]
async fn test_create_stock_ignores_client_timestamps() {
    let (app, _state, _db) = build_test_router().await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/stocks",
            json!({
                "name": DEFAULT_NAME,
                "currentPrice": 12.5,
                "createdDate": "1999 Dec 31 23:59:59.999",
                "modifiedDate": "1999 Dec 31 23:59:59.999"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_ne!(body["createdDate"], "1999 Dec 31 23:59:59.999");
    assert_ne!(body["modifiedDate"], "1999 Dec 31 23:59:59.999");
}

#[tokio::test]
async fn test_create_stock_with_duplicate_name() {
    let (app, state, db) = build_test_router().await;
    seed(&state, DEFAULT_NAME, dec!(12.5)).await;

    let response = send(
        &app,
        json_request("POST", "/api/stocks", json!({ "name": DEFAULT_NAME, "currentPrice": 1 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store_size(&db).await, 1);
}

#[tokio::test]
async fn test_create_stock_without_required_fields() {
    let (app, _state, db) = build_test_router().await;

    let no_price = json_request("POST", "/api/stocks", json!({ "name": DEFAULT_NAME }));
    let no_price = send(&app, no_price).await;
    assert_eq!(no_price.status(), StatusCode::BAD_REQUEST);

    let no_name = json_request("POST", "/api/stocks", json!({ "currentPrice": 12.5 }));
    let no_name = send(&app, no_name).await;
    assert_eq!(no_name.status(), StatusCode::BAD_REQUEST);

    assert_eq!(store_size(&db).await, 0);
}

#[tokio::test]
async fn test_get_all_stocks() {
    let (app, state, _db) = build_test_router().await;
    let stock = seed(&state, DEFAULT_NAME, dec!(12.5)).await;

    let response = send(&app, empty_request("GET", "/api/stocks?sort=id,desc")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-total-count").unwrap(), "1");
    let body = body_json(response).await;
    let stocks = body.as_array().unwrap();
    assert!(stocks.iter().any(|s| s["id"].as_i64() == stock.id));
    assert!(stocks.iter().any(|s| s["name"] == DEFAULT_NAME));
    assert!(stocks.iter().any(|s| s["currentPrice"].as_f64() == Some(12.5)));
}

#[tokio::test]
async fn test_get_all_stocks_sorted_desc_by_id() {
    let (app, state, _db) = build_test_router().await;
    for n in 0..5 {
        seed(&state, &format!("stock-{}", n), dec!(10)).await;
    }

    let response = send(&app, empty_request("GET", "/api/stocks?sort=id,desc")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 5);
    assert!(ids.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_get_all_stocks_pagination_headers() {
    let (app, state, _db) = build_test_router().await;
    for n in 0..5 {
        seed(&state, &format!("stock-{}", n), dec!(10)).await;
    }

    let uri = "/api/stocks?page=1&size=2&sort=name,asc";
    let response = send(&app, empty_request("GET", uri)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-total-count").unwrap(), "5");

    let link = response
        .headers()
        .get(header::LINK)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(link.contains("</api/stocks?page=2&size=2&sort=name,asc>; rel=\"next\""));
    assert!(link.contains("</api/stocks?page=0&size=2&sort=name,asc>; rel=\"prev\""));
    assert!(link.contains("</api/stocks?page=2&size=2&sort=name,asc>; rel=\"last\""));
    assert!(link.contains("</api/stocks?page=0&size=2&sort=name,asc>; rel=\"first\""));

    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["stock-2", "stock-3"]);
}

#[tokio::test]
async fn test_pages_cover_every_row_once() {
    let (app, state, _db) = build_test_router().await;
    // Equal prices force the id tie-breaker to decide the order
    for n in 0..7 {
        seed(&state, &format!("stock-{}", n), dec!(10)).await;
    }

    let mut seen = Vec::new();
    for page in 0..3 {
        let uri = format!("/api/stocks?page={}&size=3&sort=currentPrice,desc", page);
        let body = body_json(send(&app, empty_request("GET", &uri)).await).await;
        seen.extend(body.as_array().unwrap().iter().map(|s| s["id"].as_i64().unwrap()));
    }

    let mut unique = seen.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(seen.len(), 7);
    assert_eq!(unique.len(), 7);
}

#[tokio::test]
async fn test_get_all_stocks_rejects_bad_pagination() {
    let (app, _state, _db) = build_test_router().await;

    let unknown_property = send(&app, empty_request("GET", "/api/stocks?sort=price,desc")).await;
    assert_eq!(unknown_property.status(), StatusCode::BAD_REQUEST);

    let zero_size = send(&app, empty_request("GET", "/api/stocks?size=0")).await;
    assert_eq!(zero_size.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_all_stocks_rejects_page_past_offset_range() {
    let (app, state, _db) = build_test_router().await;
    seed(&state, DEFAULT_NAME, dec!(12.5)).await;

    for uri in [
        format!("/api/stocks?page={}&size=2", i64::MAX),
        format!("/api/stocks?page={}", u64::MAX),
    ] {
        let response = send(&app, empty_request("GET", &uri)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
    }

    // The app keeps serving after the rejected requests
    let response = send(&app, empty_request("GET", "/api/stocks")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_stock() {
    let (app, state, _db) = build_test_router().await;
    let stock = seed(&state, DEFAULT_NAME, dec!(12.5)).await;
    let id = stock.id.unwrap();

    let response = send(&app, empty_request("GET", &format!("/api/stocks/{}", id))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], DEFAULT_NAME);
    assert_eq!(body["currentPrice"].as_f64(), Some(12.5));
}

#[tokio::test]
async fn test_get_non_existing_stock() {
    let (app, _state, _db) = build_test_router().await;

    let response = send(&app, empty_request("GET", &format!("/api/stocks/{}", i64::MAX))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_update_stock() {
    let (app, state, db) = build_test_router().await;
    let stock = seed(&state, DEFAULT_NAME, dec!(12.5)).await;
    let id = stock.id.unwrap();
    let size_before = store_size(&db).await;

    // The body is ignored: only the query parameter sets the price
    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/stocks/{}?currentPrice=5.25", id),
            json!({ "name": "p2", "currentPrice": 99 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-storeapp-alert").unwrap(), "storeApp.Stock.updated");
    assert_eq!(response.headers().get("x-storeapp-params").unwrap(), id.to_string().as_str());
    let body = body_json(response).await;
    assert_eq!(body["currentPrice"].as_f64(), Some(5.25));

    assert_eq!(store_size(&db).await, size_before);
    let stored = state.stocks.find_one(id).await.unwrap().unwrap();
    assert_eq!(stored.id, Some(id));
    assert_eq!(stored.name.as_deref(), Some(DEFAULT_NAME));
    assert_eq!(stored.current_price, Some(dec!(5.25)));
    assert_eq!(stored.created_date, stock.created_date);
}

#[tokio::test]
async fn test_update_non_existing_stock() {
    let (app, state, db) = build_test_router().await;
    seed(&state, DEFAULT_NAME, dec!(12.5)).await;
    let size_before = store_size(&db).await;

    let response = send(
        &app,
        empty_request("PUT", &format!("/api/stocks/{}?currentPrice=5.25", i64::MAX)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers().get("x-storeapp-error").unwrap(), "error.idnull");
    let body = body_json(response).await;
    assert_eq!(body["title"], "Invalid id");

    assert_eq!(store_size(&db).await, size_before);
}

#[tokio::test]
async fn test_update_without_id_is_not_routed() {
    let (app, _state, _db) = build_test_router().await;

    let response = send(&app, empty_request("PUT", "/api/stocks?currentPrice=5.25")).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_update_requires_current_price() {
    let (app, state, _db) = build_test_router().await;
    let stock = seed(&state, DEFAULT_NAME, dec!(12.5)).await;

    let response = send(
        &app,
        empty_request("PUT", &format!("/api/stocks/{}", stock.id.unwrap())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_stock() {
    let (app, state, db) = build_test_router().await;
    let stock = seed(&state, DEFAULT_NAME, dec!(12.5)).await;
    let id = stock.id.unwrap();
    let size_before = store_size(&db).await;

    let response = send(&app, empty_request("DELETE", &format!("/api/stocks/{}", id))).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response.headers().get("x-storeapp-alert").unwrap(), "storeApp.Stock.deleted");
    assert_eq!(store_size(&db).await, size_before - 1);
}

#[tokio::test]
async fn test_delete_non_existing_stock_is_noop() {
    let (app, state, db) = build_test_router().await;
    seed(&state, DEFAULT_NAME, dec!(12.5)).await;
    let size_before = store_size(&db).await;

    let response = send(&app, empty_request("DELETE", &format!("/api/stocks/{}", i64::MAX))).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(store_size(&db).await, size_before);
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let (app, _state, _db) = build_test_router().await;

    let response = send(&app, empty_request("GET", "/api/stocks/abc")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_every_write_leaves_a_revision() {
    let (app, _state, db) = build_test_router().await;

    let created = send(
        &app,
        json_request("POST", "/api/stocks", json!({ "name": DEFAULT_NAME, "currentPrice": 12.5 })),
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();
    send(&app, empty_request("PUT", &format!("/api/stocks/{}?currentPrice=5.25", id))).await;
    send(&app, empty_request("DELETE", &format!("/api/stocks/{}", id))).await;

    let revisions = stock_audit_repository::find_revisions(&db, id).await.unwrap();
    let kinds: Vec<RevisionType> = revisions.iter().map(|r| r.revtype).collect();
    assert_eq!(kinds, vec![RevisionType::Add, RevisionType::Mod, RevisionType::Del]);
    assert!(revisions.windows(2).all(|w| w[0].rev < w[1].rev));

    assert_eq!(revisions[0].name.as_deref(), Some(DEFAULT_NAME));
    assert_eq!(revisions[0].current_price, Some(dec!(12.5)));
    assert_eq!(revisions[1].current_price, Some(dec!(5.25)));
    assert_eq!(revisions[2].name, None);
    assert_eq!(revisions[2].current_price, None);
}

#[tokio::test]
async fn test_rejected_writes_leave_no_revision() {
    let (app, state, db) = build_test_router().await;
    let stock = seed(&state, DEFAULT_NAME, dec!(12.5)).await;
    let id = stock.id.unwrap();

    let duplicate = send(
        &app,
        json_request("POST", "/api/stocks", json!({ "name": DEFAULT_NAME, "currentPrice": 1 })),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    send(&app, empty_request("DELETE", &format!("/api/stocks/{}", i64::MAX))).await;

    assert_eq!(stock_audit_repository::find_revisions(&db, id).await.unwrap().len(), 1);
    assert!(stock_audit_repository::find_revisions(&db, i64::MAX)
        .await
        .unwrap()
        .is_empty());
}

#[test]
fn test_dto_json_round_trip_through_value() {
    let dto: StockDto = serde_json::from_value::<StockDto>(json!({
        "id": 3,
        "name": DEFAULT_NAME,
        "currentPrice": 12.5
    }))
    .unwrap();
    let value: Value = serde_json::to_value(&dto).unwrap();
    assert_eq!(value["id"], 3);
    assert_eq!(value["name"], DEFAULT_NAME);
}
