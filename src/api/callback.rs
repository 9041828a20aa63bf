use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{spotify::GradientService, success, warning};

/// Redirect target of the authorization page.
///
/// Exchanges the received code right away and seeds the token cache, so the
/// account owner does not have to copy the code into the environment. Only
/// codes returned together with the `state` of a pending authorization
/// request are accepted; anything else leaves the cache untouched.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(service): Extension<Arc<GradientService>>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was declined: {}", error);
        return Html("<h4>Authorization declined.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let state = params.get("state").map(String::as_str).unwrap_or_default();

    match service.tokens().authorize(state, code).await {
        Ok(_) => {
            success!("Token cache seeded from authorization callback");
            Html("<h2>Authorization successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed [{}]: {}", e.kind(), e);
            Html("<h4>Authorization failed.</h4>")
        }
    }
}
