use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{WebError, WebResult},
    state::AppState,
};

const CACHE_CONTROL: &str = "public, max-age=86400";

#[derive(Debug, Deserialize, IntoParams)]
pub struct ImageProxyQuery {
    /// Absolute http(s) url of the image to fetch
    pub url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/image-proxy",
    params(ImageProxyQuery),
    responses(
        (status = 200, description = "Upstream image bytes with the upstream content type"),
        (status = 400, description = "Missing, malformed or disallowed url"),
        (status = 502, description = "Upstream fetch failed")
    ),
    tag = "images"
)]
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ImageProxyQuery>,
) -> WebResult<Response> {
    let raw = query
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| WebError::BadRequest("url query parameter is required".to_string()))?;

    let url = state.image_proxy.resolve(&raw)?;
    let image = state.image_proxy.fetch(url).await?;

    let content_type = image
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
        ],
        image.bytes,
    )
        .into_response())
}
