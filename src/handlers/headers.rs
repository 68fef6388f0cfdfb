//! Response header helpers: entity alert headers and pagination headers

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

use crate::models::pagination::Page;

pub const X_TOTAL_COUNT: &str = "x-total-count";

pub(crate) fn insert(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => warn!(header = name, value, "Skipping header with invalid name or value"),
    }
}

/// `X-{app}-alert` / `X-{app}-params` pair announcing a change to an entity.
pub fn alert(app_name: &str, message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, &format!("X-{}-alert", app_name), message);
    insert(&mut headers, &format!("X-{}-params", app_name), param);
    headers
}

pub fn entity_creation_alert(app_name: &str, entity_name: &str, param: &str) -> HeaderMap {
    alert(app_name, &format!("{}.{}.created", app_name, entity_name), param)
}

pub fn entity_update_alert(app_name: &str, entity_name: &str, param: &str) -> HeaderMap {
    alert(app_name, &format!("{}.{}.updated", app_name, entity_name), param)
}

pub fn entity_deletion_alert(app_name: &str, entity_name: &str, param: &str) -> HeaderMap {
    alert(app_name, &format!("{}.{}.deleted", app_name, entity_name), param)
}

pub fn failure_alert(app_name: &str, entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, &format!("X-{}-error", app_name), &format!("error.{}", error_key));
    insert(&mut headers, &format!("X-{}-params", app_name), entity_name);
    headers
}

/// `X-Total-Count` plus an RFC 5988 `Link` header (next, prev, last, first).
///
/// `query` is the original query string; its `page` and `size` pairs are
/// replaced in every link, everything else (e.g. `sort`) is kept.
pub fn pagination<T>(path: &str, query: Option<&str>, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(X_TOTAL_COUNT), HeaderValue::from(page.total));

    let kept: Vec<&str> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page=") && !pair.starts_with("size="))
        .collect();

    let link = |number: u64, rel: &str| {
        let mut pairs = vec![format!("page={}", number), format!("size={}", page.size)];
        pairs.extend(kept.iter().map(|pair| pair.to_string()));
        format!("<{}?{}>; rel=\"{}\"", path, pairs.join("&"), rel)
    };

    let total_pages = page.total_pages();
    let mut links = Vec::new();
    if let Some(next) = page.page.checked_add(1).filter(|next| *next < total_pages) {
        links.push(link(next, "next"));
    }
    if let Some(prev) = page.page.checked_sub(1) {
        links.push(link(prev, "prev"));
    }
    links.push(link(total_pages.saturating_sub(1), "last"));
    links.push(link(0, "first"));

    insert(&mut headers, header::LINK.as_str(), &links.join(","));
    headers
}
