use axum::{
    extract::State,
    middleware,
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::errors::FailureAlert;
use crate::handlers::{headers, stock};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            stock::STOCKS_PATH,
            get(stock::get_all_stocks).post(stock::create_stock),
        )
        .route(
            "/api/stocks/{id}",
            get(stock::get_stock)
                .put(stock::update_stock)
                .delete(stock::delete_stock),
        )
        .layer(middleware::map_response_with_state(
            state.clone(),
            failure_alert_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn a `FailureAlert` left by `AppError` into `X-{app}-error` headers.
async fn failure_alert_headers(
    State(state): State<AppState>,
    mut response: Response,
) -> Response {
    if let Some(alert) = response.extensions_mut().remove::<FailureAlert>() {
        let alert_headers =
            headers::failure_alert(&state.app_name, &alert.entity_name, &alert.error_key);
        response.headers_mut().extend(alert_headers);
    }
    response
}
