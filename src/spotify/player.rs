use reqwest::StatusCode;

use crate::{
    error::{Error, Res},
    spotify::SpotifyApi,
    types::{CurrentlyPlayingResponse, PlayingItem, Song},
};

impl SpotifyApi {
    /// Fetches the track currently playing on the authenticated account.
    ///
    /// Returns `Ok(None)` when nothing is playing: Spotify answers
    /// `204 No Content` (or a body without `item`) in that case.
    ///
    /// # Errors
    ///
    /// [`Error::UpstreamFetch`] on network errors, non-success statuses and
    /// items that do not have the documented track shape.
    pub async fn currently_playing(&self, token: &str) -> Res<Option<Song>> {
        let response = self
            .get(
                "/me/player/currently-playing",
                &[("market", self.market.as_str())],
                token,
            )
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::UpstreamFetch(format!("currently-playing body unreadable: {e}")))?;

        parse_currently_playing(&body)
    }
}

/// Parses a currently-playing body into a song.
pub fn parse_currently_playing(body: &str) -> Res<Option<Song>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let playing: CurrentlyPlayingResponse = serde_json::from_str(body)
        .map_err(|e| Error::UpstreamFetch(format!("unexpected currently-playing shape: {e}")))?;

    playing.item.map(Song::try_from).transpose()
}

impl TryFrom<PlayingItem> for Song {
    type Error = Error;

    fn try_from(item: PlayingItem) -> Result<Self, Self::Error> {
        let artist = item
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .ok_or_else(|| Error::UpstreamFetch(format!("track {} has no artists", item.id)))?;

        let album_cover = item
            .album
            .and_then(|album| album.images.into_iter().next())
            .map(|image| image.url);

        Ok(Song {
            id: item.id,
            name: item.name,
            artist,
            href: item.external_urls.spotify,
            album_cover,
        })
    }
}
