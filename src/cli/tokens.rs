use crate::{
    config::Config, error, info, management::TokenState, spotify::GradientService, success,
    warning,
};

pub async fn token_status(config: &Config) {
    let service = connect(config).await;

    match service.tokens().state().await {
        Ok(TokenState::Valid) => success!("A valid access token is cached."),
        Ok(TokenState::RefreshOnly) => {
            info!("Only a refresh token is cached; the next request refreshes the access token.")
        }
        Ok(TokenState::Empty) => {
            if config.auth_code.is_some() {
                info!("No tokens cached; the configured authorization code will be exchanged.")
            } else {
                warning!("No tokens cached and no authorization code configured.")
            }
        }
        Err(e) => error!("Cannot read token cache: {}", e),
    }
}

pub async fn clear_tokens(config: &Config) {
    let service = connect(config).await;

    match service.tokens().clear().await {
        Ok(()) => success!("Cleared cached tokens."),
        Err(e) => error!("Cannot clear token cache: {}", e),
    }
}

async fn connect(config: &Config) -> GradientService {
    match GradientService::from_config(config).await {
        Ok(service) => service,
        Err(e) => error!("Cannot set up token cache: {}", e),
    }
}
