//! Fixed HTML pages.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use plotline_render::RenderedChart;

/// Body of the 404 page.
pub const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Not Found</title></head>
<body>
<h1>Not Found</h1>
<p>The page you asked for does not exist.</p>
<p><a href="/">Back to the chart</a></p>
</body>
</html>
"#;

/// Body of the 500 page. Carries no detail about the failure.
pub const INTERNAL_ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Internal Server Error</title></head>
<body>
<h1>Internal Server Error</h1>
<p>Something went wrong while building this page.</p>
</body>
</html>
"#;

/// The index page with the chart inlined as a data URI.
pub fn index(chart: &RenderedChart) -> Html<String> {
    let (width, height) = chart.dimensions();
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Plotline</title></head>
<body>
<img alt="line chart of {points} samples" width="{width}" height="{height}" src="{uri}">
</body>
</html>
"#,
        points = chart.point_count(),
        uri = chart.data_uri(),
    ))
}

/// 404 response with the fixed page.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

/// 500 response with the fixed page.
pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Html(INTERNAL_ERROR_PAGE)).into_response()
}
