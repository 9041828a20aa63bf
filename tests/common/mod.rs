#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use spotify_gradient::{
    config::Config,
    management::{MemoryTokenCache, TokenManager},
    spotify::{GradientService, SpotifyApi, SpotifyAuth, http_client},
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const AUTH_CODE: &str = "one-time-code";
pub const TRACK_ID: &str = "4uLU6hMCjMI75M1A2tKUQC";

/// How the mock answers. `playing: None` means `204 No Content`.
#[derive(Clone)]
pub struct Behaviour {
    pub code_grant: (u16, Value),
    pub refresh_grant: (u16, Value),
    /// Time the token endpoint takes before answering.
    pub grant_delay: Duration,
    pub playing: Option<(u16, Value)>,
    pub analysis: (u16, Value),
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            code_grant: (
                200,
                json!({
                    "access_token": "code-access",
                    "refresh_token": "code-refresh",
                    "token_type": "Bearer",
                    "expires_in": 3600
                }),
            ),
            refresh_grant: (
                200,
                json!({
                    "access_token": "refreshed-access",
                    "token_type": "Bearer",
                    "expires_in": 3600
                }),
            ),
            grant_delay: Duration::ZERO,
            playing: Some((200, playing_body())),
            analysis: (200, analysis_body()),
        }
    }
}

#[derive(Default)]
pub struct Calls {
    pub code_grants: AtomicUsize,
    pub refresh_grants: AtomicUsize,
    pub currently_playing: AtomicUsize,
    pub audio_analysis: AtomicUsize,
    pub last_form: Mutex<Option<HashMap<String, String>>>,
    pub last_token_authorization: Mutex<Option<String>>,
    pub last_api_authorization: Mutex<Option<String>>,
    pub last_market: Mutex<Option<String>>,
    pub last_track_id: Mutex<Option<String>>,
}

impl Calls {
    pub fn code_grants(&self) -> usize {
        self.code_grants.load(Ordering::SeqCst)
    }

    pub fn refresh_grants(&self) -> usize {
        self.refresh_grants.load(Ordering::SeqCst)
    }

    pub fn token_requests(&self) -> usize {
        self.code_grants() + self.refresh_grants()
    }

    pub fn currently_playing(&self) -> usize {
        self.currently_playing.load(Ordering::SeqCst)
    }

    pub fn audio_analysis(&self) -> usize {
        self.audio_analysis.load(Ordering::SeqCst)
    }
}

struct Shared {
    behaviour: Behaviour,
    calls: Arc<Calls>,
}

/// Authorization server and Web API stand-in listening on an ephemeral port.
pub struct MockSpotify {
    pub addr: SocketAddr,
    pub calls: Arc<Calls>,
}

impl MockSpotify {
    pub async fn start(behaviour: Behaviour) -> Self {
        let calls = Arc::new(Calls::default());
        let shared = Arc::new(Shared {
            behaviour,
            calls: Arc::clone(&calls),
        });

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/player/currently-playing", get(currently_playing))
            .route("/v1/audio-analysis/{id}", get(audio_analysis))
            .with_state(shared);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, calls }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::new(CLIENT_ID, CLIENT_SECRET);
        config.auth_code = Some(AUTH_CODE.to_string());
        config.token_url = format!("http://{}/api/token", self.addr);
        config.api_url = format!("http://{}/v1", self.addr);
        config.request_timeout = Duration::from_secs(5);
        config
    }

    pub fn token_manager(&self, config: &Config, cache: Arc<MemoryTokenCache>) -> TokenManager {
        let http = http_client(config.request_timeout).unwrap();
        TokenManager::new(cache, SpotifyAuth::new(http, config))
    }

    pub fn service(&self, config: &Config, cache: Arc<MemoryTokenCache>) -> GradientService {
        let http = http_client(config.request_timeout).unwrap();
        let tokens = TokenManager::new(cache, SpotifyAuth::new(http.clone(), config));
        GradientService::new(Arc::new(tokens), SpotifyApi::new(http, config))
    }
}

fn reply(status: u16, body: Value) -> Response {
    (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn token(
    State(shared): State<Arc<Shared>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let (status, body) = match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") => {
            shared.calls.code_grants.fetch_add(1, Ordering::SeqCst);
            shared.behaviour.code_grant.clone()
        }
        Some("refresh_token") => {
            shared.calls.refresh_grants.fetch_add(1, Ordering::SeqCst);
            shared.behaviour.refresh_grant.clone()
        }
        _ => (400, json!({ "error": "unsupported_grant_type" })),
    };

    *shared.calls.last_token_authorization.lock().unwrap() = authorization(&headers);
    *shared.calls.last_form.lock().unwrap() = Some(form);

    if !shared.behaviour.grant_delay.is_zero() {
        tokio::time::sleep(shared.behaviour.grant_delay).await;
    }

    reply(status, body)
}

async fn currently_playing(
    State(shared): State<Arc<Shared>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    shared.calls.currently_playing.fetch_add(1, Ordering::SeqCst);
    *shared.calls.last_api_authorization.lock().unwrap() = authorization(&headers);
    *shared.calls.last_market.lock().unwrap() = query.get("market").cloned();

    match shared.behaviour.playing.clone() {
        Some((status, body)) => reply(status, body),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn audio_analysis(State(shared): State<Arc<Shared>>, Path(id): Path<String>) -> Response {
    shared.calls.audio_analysis.fetch_add(1, Ordering::SeqCst);
    *shared.calls.last_track_id.lock().unwrap() = Some(id);

    let (status, body) = shared.behaviour.analysis.clone();
    reply(status, body)
}

pub fn playing_body() -> Value {
    json!({
        "is_playing": true,
        "progress_ms": 41000,
        "item": {
            "id": TRACK_ID,
            "name": "Windowlicker",
            "type": "track",
            "artists": [
                { "id": "6kBDZFXuLrZgHnvmPu9NsG", "name": "Aphex Twin" },
                { "id": "0000000000000000000000", "name": "Someone Else" }
            ],
            "external_urls": { "spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC" },
            "album": {
                "name": "Windowlicker",
                "images": [
                    { "url": "https://i.scdn.co/image/large", "width": 640, "height": 640 },
                    { "url": "https://i.scdn.co/image/small", "width": 64, "height": 64 }
                ]
            }
        }
    })
}

pub fn section(duration: f64, tempo: f64, loudness: f64, key: i32) -> Value {
    json!({
        "start": 0.0,
        "duration": duration,
        "confidence": 0.8,
        "loudness": loudness,
        "tempo": tempo,
        "tempo_confidence": 0.5,
        "key": key,
        "key_confidence": 0.4,
        "mode": 1,
        "mode_confidence": 0.6,
        "time_signature": 4,
        "time_signature_confidence": 1.0
    })
}

pub fn analysis_body() -> Value {
    json!({
        "track": { "duration": 200.0, "tempo": 120.0, "key": 5, "loudness": -8.0 },
        "bars": [],
        "segments": [],
        "sections": [
            section(50.5, 118.0, -12.5, 2),
            section(70.25, 122.0, -6.0, 7),
            section(79.25, 96.0, -20.0, 11)
        ]
    })
}
