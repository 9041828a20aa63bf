use std::sync::Arc;

use axum::{
    Extension, Router,
    extract::State,
    http::{
        HeaderValue,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
    },
    middleware,
    response::Response,
    routing::get,
};

use crate::{
    api,
    config::Config,
    error::{Error, Res},
    info,
    spotify::GradientService,
    warning,
};

const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

pub fn router(service: Arc<GradientService>, cors_origin: &str) -> Res<Router> {
    let origin = HeaderValue::from_str(cors_origin)
        .map_err(|e| Error::Config(format!("invalid CORS_ALLOW_ORIGIN '{cors_origin}': {e}")))?;

    Ok(Router::new()
        .route("/spotify", get(api::now_playing))
        .route("/spotify/", get(api::now_playing))
        .route("/callback", get(api::callback))
        .route("/health", get(api::health))
        .layer(Extension(service))
        .layer(middleware::map_response_with_state(origin, cors_headers)))
}

async fn cors_headers(State(origin): State<HeaderValue>, mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

pub async fn start_api_server(config: &Config, service: Arc<GradientService>) -> Res<()> {
    let app = router(service, &config.cors_origin)?;

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;

    info!("Listening on http://{}", config.server_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

/// Resolves once `signal` fires.
///
/// When the signal handler cannot be installed the error is logged and the
/// future never resolves, so the server keeps running until it is killed.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warning!("Cannot listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
