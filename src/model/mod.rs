//! Core data models for the showcase.
//!
//! Defines the primary entities supplied by the showcase manifest:
//! [`Track`] records for the ambient playlist and [`MediaItem`] records
//! for the gallery. Both are immutable for the lifetime of the session;
//! all mutable state lives in the controllers that consume them.

use serde::Deserialize;
use std::path::PathBuf;

/// A track in the ambient playlist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    /// Unique, stable ordering key
    pub id: u32,
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Path to the audio file, relative to the manifest
    pub source: PathBuf,
}

impl Track {
    /// Display label used in the playlist panel.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

/// Aspect class of a gallery image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Classify a decoded image by its pixel dimensions.
    ///
    /// Square images count as portrait; the manifest declaration stays
    /// authoritative either way.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// A displayable item in the gallery.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaItem {
    /// Unique id
    pub id: u32,
    /// Path to the image file, relative to the manifest
    pub source: PathBuf,
    /// Title shown in the grid overlay and the lightbox
    pub title: String,
    /// Longer description shown in the lightbox
    #[serde(default)]
    pub description: String,
    /// Declared aspect class, drives filtering and grid spans
    pub orientation: Orientation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_dimensions() {
        assert_eq!(Orientation::from_dimensions(1920, 1080), Orientation::Landscape);
        assert_eq!(Orientation::from_dimensions(1080, 1920), Orientation::Portrait);
        assert_eq!(Orientation::from_dimensions(800, 800), Orientation::Portrait);
    }

    #[test]
    fn test_orientation_parses_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            orientation: Orientation,
        }
        let holder: Holder = toml::from_str(r#"orientation = "landscape""#).unwrap();
        assert_eq!(holder.orientation, Orientation::Landscape);

        let bad: Result<Holder, _> = toml::from_str(r#"orientation = "panorama""#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_track_display_label() {
        let track = Track {
            id: 1,
            title: "Workshop Ambience".to_string(),
            artist: "Unknown Artist".to_string(),
            source: PathBuf::from("music/ambience.mp3"),
        };
        assert_eq!(track.display_label(), "Workshop Ambience - Unknown Artist");
    }
}
