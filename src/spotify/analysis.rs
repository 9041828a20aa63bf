use serde_json::Value;

use crate::{
    error::{Error, Res},
    spotify::SpotifyApi,
    types::AudioAnalysis,
};

impl SpotifyApi {
    /// Fetches the audio analysis of a track.
    ///
    /// # Errors
    ///
    /// [`Error::UpstreamFetch`] when the request fails or the analysis has no
    /// sections to build a gradient from.
    pub async fn audio_analysis(&self, token: &str, track_id: &str) -> Res<AudioAnalysis> {
        if track_id.is_empty() || !track_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::UpstreamFetch(format!("invalid track id '{track_id}'")));
        }

        let response = self
            .get(&format!("/audio-analysis/{track_id}"), &[], token)
            .await?;

        let json: Value = response
            .json()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("audio analysis is not JSON: {e}")))?;

        parse_audio_analysis(json)
    }
}

/// Checks the analysis shape before decoding it.
///
/// A missing or empty `sections` list means the track has no usable
/// analysis, which is a failure rather than an empty gradient. The track
/// duration has to be positive since positions are relative to it.
pub fn parse_audio_analysis(json: Value) -> Res<AudioAnalysis> {
    match json.get("sections").and_then(Value::as_array) {
        Some(sections) if !sections.is_empty() => {}
        Some(_) => {
            return Err(Error::UpstreamFetch(
                "audio analysis contains no sections".to_string(),
            ));
        }
        None => {
            return Err(Error::UpstreamFetch(
                "response does not contain sections".to_string(),
            ));
        }
    }

    let analysis: AudioAnalysis = serde_json::from_value(json)
        .map_err(|e| Error::UpstreamFetch(format!("unexpected audio analysis shape: {e}")))?;

    if !analysis.track.duration.is_finite() || analysis.track.duration <= 0.0 {
        return Err(Error::UpstreamFetch(format!(
            "audio analysis has invalid track duration {}",
            analysis.track.duration
        )));
    }

    Ok(analysis)
}
