use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    error, info,
    spotify::{GradientService, NO_SONG_PLAYING},
    success,
    types::{GradientStop, GradientTableRow},
};

/// Runs the gradient computation once and prints it.
pub async fn now_playing(config: &Config) {
    let service = match GradientService::from_config(config).await {
        Ok(service) => service,
        Err(e) => error!("Cannot set up gradient service: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching currently playing track...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = service.now_playing().await;
    pb.finish_and_clear();

    let details = match result {
        Ok(Some(details)) => details,
        Ok(None) => {
            info!("{}", NO_SONG_PLAYING);
            return;
        }
        Err(e) => error!("Failed to fetch gradient: {}", e),
    };

    success!("{} - {}", details.song.artist, details.song.name);
    info!("{}", details.song.href);
    if let Some(cover) = &details.song.album_cover {
        info!("Cover: {}", cover);
    }

    let rows: Vec<GradientTableRow> = details.gradient.iter().map(table_row).collect();
    println!("{}", Table::new(rows));
}

fn table_row(stop: &GradientStop) -> GradientTableRow {
    let swatch = match hex_to_rgb(&stop.color) {
        Some((r, g, b)) => "      ".on_truecolor(r, g, b).to_string(),
        None => String::new(),
    };

    GradientTableRow {
        position: stop.position.clone(),
        color: stop.color.clone(),
        swatch,
    }
}

/// Parses `#rrggbb`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
