use std::sync::Arc;

use crate::{
    config::Config,
    error::Res,
    gradient::build_gradient,
    info,
    management::{MemoryTokenCache, RedisTokenCache, TokenCache, TokenManager},
    spotify::{SpotifyApi, SpotifyAuth, http_client},
    types::{Message, NowPlaying, SpotifyResponse},
    warning,
};

pub const NO_SONG_PLAYING: &str = "No song playing";

/// Composes token acquisition, the two Web API calls and the gradient
/// builder into the single operation behind `GET /spotify`.
pub struct GradientService {
    tokens: Arc<TokenManager>,
    api: SpotifyApi,
}

impl GradientService {
    pub fn new(tokens: Arc<TokenManager>, api: SpotifyApi) -> Self {
        Self { tokens, api }
    }

    /// Wires up the service from configuration: one HTTP client, one token
    /// cache and one token manager for the lifetime of the process.
    pub async fn from_config(config: &Config) -> Res<Self> {
        let http = http_client(config.request_timeout)?;

        let cache: Arc<dyn TokenCache> = match &config.redis_url {
            Some(url) => {
                let cache = RedisTokenCache::connect(url).await?;
                info!("Using Redis token cache");
                Arc::new(cache)
            }
            None => {
                warning!("REDIS_URL not set, tokens are cached in memory only");
                Arc::new(MemoryTokenCache::new())
            }
        };

        let auth = SpotifyAuth::new(http.clone(), config);
        let tokens = Arc::new(TokenManager::new(cache, auth));
        let api = SpotifyApi::new(http, config);

        Ok(Self::new(tokens, api))
    }

    /// The token manager behind every request, for the callback and the CLI.
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// The playing song with its gradient, or `None` when nothing plays.
    ///
    /// The audio analysis is only requested when a song is playing.
    pub async fn now_playing(&self) -> Res<Option<NowPlaying>> {
        let token = self.tokens.acquire().await?;

        let Some(song) = self.api.currently_playing(&token).await? else {
            return Ok(None);
        };

        let analysis = self.api.audio_analysis(&token, &song.id).await?;
        let gradient = build_gradient(&analysis.sections, analysis.track.duration);

        Ok(Some(NowPlaying { song, gradient }))
    }

    /// Runs [`Self::now_playing`] and collapses the outcome into the public
    /// payload. Failures are logged here and look like "nothing playing" to
    /// the caller.
    pub async fn respond(&self) -> SpotifyResponse {
        match self.now_playing().await {
            Ok(Some(details)) => SpotifyResponse::playing(details),
            Ok(None) => SpotifyResponse::nothing_playing(),
            Err(e) => {
                warning!("Gradient request failed [{}]: {}", e.kind(), e);
                SpotifyResponse::nothing_playing()
            }
        }
    }
}

impl SpotifyResponse {
    pub fn playing(details: NowPlaying) -> Self {
        Self {
            success: true,
            message: Message::Details(details),
        }
    }

    pub fn nothing_playing() -> Self {
        Self {
            success: false,
            message: Message::Text(NO_SONG_PLAYING.to_string()),
        }
    }
}
