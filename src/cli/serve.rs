use std::sync::Arc;

use crate::{config::Config, error, server::start_api_server, spotify::GradientService};

pub async fn serve(config: &Config) {
    let service = match GradientService::from_config(config).await {
        Ok(service) => Arc::new(service),
        Err(e) => error!("Cannot set up gradient service: {}", e),
    };

    if let Err(e) = start_api_server(config, service).await {
        error!("Server stopped: {}", e);
    }
}
