//! Stock handlers
//!
//! REST endpoints under /api/stocks:
//!
//! - `POST   /api/stocks`       create (body must not carry an id)
//! - `PUT    /api/stocks/{id}`  update the price, `?currentPrice=5.12`
//! - `GET    /api/stocks`       paginated listing, `?page=0&size=20&sort=id,desc`
//! - `GET    /api/stocks/{id}`  fetch one
//! - `DELETE /api/stocks/{id}`  delete (idempotent)

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::handlers::headers;
use crate::models::pagination::PageQuery;
use crate::models::stock::{StockDto, UpdatePriceQuery};
use crate::services::stock_service::ENTITY_NAME;
use crate::AppState;

pub const STOCKS_PATH: &str = "/api/stocks";

/// Create a stock
///
/// POST /api/stocks
///
/// Responds 201 with a `Location` header pointing at the new stock.
pub async fn create_stock(
    State(state): State<AppState>,
    Json(dto): Json<StockDto>,
) -> Result<(StatusCode, HeaderMap, Json<StockDto>), AppError> {
    debug!(name = ?dto.name, "REST request to save Stock");

    if dto.id.is_some() {
        warn!(id = ?dto.id, "Rejected create request carrying an id");
        return Err(AppError::invalid_request(
            "A new stock cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let result = state.stocks.save(dto).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();

    let mut response_headers = headers::entity_creation_alert(&state.app_name, ENTITY_NAME, &id);
    headers::insert(
        &mut response_headers,
        header::LOCATION.as_str(),
        &format!("{}/{}", STOCKS_PATH, id),
    );

    Ok((StatusCode::CREATED, response_headers, Json(result)))
}

/// Update the current price of a stock
///
/// PUT /api/stocks/{id}?currentPrice=5.12
///
/// The price comes from the query string; a request body, if any, is ignored.
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<UpdatePriceQuery>,
) -> Result<(HeaderMap, Json<StockDto>), AppError> {
    debug!(id, current_price = %query.current_price, "REST request to update Stock price");

    let result = state.stocks.update_price(id, query.current_price).await?;
    let response_headers =
        headers::entity_update_alert(&state.app_name, ENTITY_NAME, &id.to_string());

    Ok((response_headers, Json(result)))
}

/// List stocks page by page
///
/// GET /api/stocks
///
/// Responds with the page content as a JSON array; totals and navigation
/// travel in the `X-Total-Count` and `Link` headers.
pub async fn get_all_stocks(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<(HeaderMap, Json<Vec<StockDto>>), AppError> {
    debug!(
        page = ?query.page,
        size = ?query.size,
        sort = ?query.sort,
        "REST request to get all Stocks"
    );

    let request = query.validate().map_err(|e| {
        warn!(error = %e, "Invalid pagination parameters");
        AppError::Validation(e)
    })?;

    let page = state.stocks.find_all(&request).await?;
    let response_headers = headers::pagination(uri.path(), uri.query(), &page);

    Ok((response_headers, Json(page.content)))
}

/// Fetch a stock by id
///
/// GET /api/stocks/{id}
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StockDto>, AppError> {
    debug!(id, "REST request to get Stock");

    state
        .stocks
        .find_one(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Delete a stock by id
///
/// DELETE /api/stocks/{id}
///
/// Responds 204 whether or not the stock existed.
pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    debug!(id, "REST request to delete Stock");

    state.stocks.delete(id).await?;
    let response_headers =
        headers::entity_deletion_alert(&state.app_name, ENTITY_NAME, &id.to_string());

    Ok((StatusCode::NO_CONTENT, response_headers))
}
