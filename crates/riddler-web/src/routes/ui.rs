//! Web UI page.

use axum::response::Html;

static INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Single-page puzzle generator UI
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
