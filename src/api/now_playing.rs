use std::sync::Arc;

use axum::{Extension, response::Json};

use crate::{spotify::GradientService, types::SpotifyResponse};

/// `GET /spotify`
///
/// Always answers `200`. Failures are logged by the service and reported
/// to the caller as "No song playing".
pub async fn now_playing(
    Extension(service): Extension<Arc<GradientService>>,
) -> Json<SpotifyResponse> {
    Json(service.respond().await)
}
