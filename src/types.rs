use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Body returned by the authorization server's token endpoint.
///
/// Every field is optional on the wire: a rejected grant comes back as
/// `{"error": ..., "error_description": ...}` and a refresh grant may omit
/// `refresh_token` when the server does not rotate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// A validated grant: the access token is guaranteed to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub href: String,
    pub album_cover: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingResponse {
    pub item: Option<PlayingItem>,
    #[serde(default)]
    pub is_playing: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayingItem {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub external_urls: ExternalUrls,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

/// Aggregate analysis for a whole track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Length of the track in seconds.
    pub duration: f64,
    #[serde(default)]
    pub tempo: f64,
    #[serde(default)]
    pub key: i32,
    #[serde(default)]
    pub loudness: f64,
}

/// A time-bounded slice of a track with its measured musical features.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub start: f64,
    pub duration: f64,
    pub confidence: f64,
    /// Loudness in dB, usually between -60 and 0.
    pub loudness: f64,
    /// Beats per minute.
    pub tempo: f64,
    pub tempo_confidence: f64,
    /// Pitch class 0-11, or -1 when no key was detected.
    pub key: i32,
    pub key_confidence: f64,
    pub mode: i32,
    pub mode_confidence: f64,
    pub time_signature: i32,
    pub time_signature_confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioAnalysis {
    pub track: TrackSummary,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStop {
    /// `#rrggbb`
    pub color: String,
    /// Running percentage of the track, two decimals.
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub song: Song,
    pub gradient: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Details(NowPlaying),
    Text(String),
}

/// Payload of `GET /spotify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyResponse {
    pub success: bool,
    pub message: Message,
}

#[derive(Tabled)]
pub struct GradientTableRow {
    pub position: String,
    pub color: String,
    pub swatch: String,
}
