//! Audio sections to color gradient.
//!
//! Each section is mapped to a color on its own; the only state carried
//! from one section to the next is the running position.
//!
//! # Color mapping
//!
//! - **hue** (degrees): `tempo / 200 * 360`, nudged by
//!   `tempo / loudness * 15 * confidence` when loudness is non-zero, then
//!   wrapped into `[0, 360)`.
//! - **saturation** (percent): `min(loudness / -30 * 100, 100) + 20`, clamped
//!   to `[0, 100]`. Quieter sections come out more saturated.
//! - **lightness** (percent): `key / 11 * 90`, clamped to `[0, 100]`, so a
//!   section with no detected key (`-1`) is black.
//!
//! Non-finite intermediate values collapse to `0`.

use palette::{Hsl, IntoColor, Srgb};

use crate::types::{GradientStop, Section};

/// Color of a section before conversion to RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionHsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Maps one section to HSL, hue in degrees, saturation and lightness in
/// percent.
pub fn section_hsl(section: &Section) -> SectionHsl {
    let mut hue = section.tempo / 200.0 * 360.0;
    if section.loudness != 0.0 {
        hue += section.tempo / section.loudness * (15.0 * section.confidence);
    }
    let hue = finite_or_zero(hue).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    let hue = if hue >= 360.0 { 0.0 } else { hue };

    let saturation = (section.loudness / -30.0 * 100.0).min(100.0) + 20.0;
    let saturation = clamp_percent(saturation);

    let lightness = clamp_percent(f64::from(section.key) / 11.0 * 90.0);

    SectionHsl {
        hue,
        saturation,
        lightness,
    }
}

/// Converts to a `#rrggbb` string.
pub fn hsl_to_hex(hsl: &SectionHsl) -> String {
    let color = Hsl::new(
        hsl.hue as f32,
        (hsl.saturation / 100.0) as f32,
        (hsl.lightness / 100.0) as f32,
    );
    let rgb: Srgb = color.into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// The `#rrggbb` color of one section.
pub fn section_color(section: &Section) -> String {
    hsl_to_hex(&section_hsl(section))
}

/// Folds the sections, in order, into gradient stops.
///
/// Each stop's position is the share of `track_duration` covered up to and
/// including its section, as a percentage with two decimals. Positions never
/// decrease: sections with a negative or non-finite duration add nothing,
/// and so does every section when `track_duration` is not positive.
pub fn build_gradient(sections: &[Section], track_duration: f64) -> Vec<GradientStop> {
    let mut position = 0.0;

    sections
        .iter()
        .map(|section| {
            position += share_of_track(section.duration, track_duration);
            GradientStop {
                color: section_color(section),
                position: format_percentage(position),
            }
        })
        .collect()
}

fn share_of_track(duration: f64, track_duration: f64) -> f64 {
    if !track_duration.is_finite() || track_duration <= 0.0 {
        return 0.0;
    }
    let share = duration / track_duration * 100.0;
    if share.is_finite() && share > 0.0 {
        share
    } else {
        0.0
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a percentage with exactly two decimals, e.g. `"33.33"`.
pub fn format_percentage(value: f64) -> String {
    // avoid "-0.00"
    let rounded = round2(value) + 0.0;
    format!("{:.2}", rounded)
}

fn clamp_percent(value: f64) -> f64 {
    finite_or_zero(value).clamp(0.0, 100.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
