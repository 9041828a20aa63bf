use crate::{
    config::Config,
    error, info,
    spotify::{GradientService, auth::authorize_url},
    warning,
};

/// Opens the authorization page for the account owner.
///
/// Spotify redirects to the configured redirect URI with a one-time code.
/// When that URI points at a running `serve` instance sharing this token
/// cache, the code is exchanged on the spot; otherwise put it into
/// `SPOTIFY_API_AUTH_CODE`.
pub async fn authorize(config: &Config) {
    let service = match GradientService::from_config(config).await {
        Ok(service) => service,
        Err(e) => error!("Cannot set up token cache: {}", e),
    };

    let state = match service.tokens().begin_authorization().await {
        Ok(state) => state,
        Err(e) => error!("Cannot start authorization: {}", e),
    };

    let url = match authorize_url(config, &state) {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL: {}", e),
    };

    if config.redis_url.is_none() {
        warning!(
            "Without REDIS_URL a running server cannot verify this request; copy the code from the redirect into SPOTIFY_API_AUTH_CODE instead."
        );
    }

    info!("Redirect URI: {}", config.redirect_uri);
    if webbrowser::open(url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    } else {
        info!("Opened authorization page in your browser.");
    }
}
