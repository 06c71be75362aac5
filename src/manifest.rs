//! Showcase manifest loading and validation.
//!
//! The page-assembly layer is a TOML file listing the playlist tracks and
//! gallery items. It is loaded once at startup and is immutable for the
//! session. Malformed entries reject the whole manifest with a precise
//! error rather than being silently dropped.
//!
//! ```toml
//! [[tracks]]
//! id = 1
//! title = "Chill Buster"
//! artist = "NyxTheShield"
//! source = "music/chill-buster.mp3"
//!
//! [[gallery]]
//! id = 1
//! source = "images/oak-bench.jpg"
//! title = "Oak Bench"
//! description = "Steam-bent backrest, hand-rubbed finish"
//! orientation = "landscape"
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};
use crate::model::{MediaItem, Track};

/// The parsed, validated showcase: the two input collections of the app.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Showcase {
    /// Ambient playlist, in play order
    pub tracks: Vec<Track>,
    /// Gallery items, in display order
    pub gallery: Vec<MediaItem>,
}

/// Load and validate a showcase manifest.
///
/// Source paths are resolved relative to the manifest's directory so the
/// showcase folder can be moved as a unit.
pub fn load(path: &Path) -> Result<Showcase> {
    let contents = std::fs::read_to_string(path)
        .with_context(format!("reading manifest {}", path.display()))?;
    let mut showcase: Showcase =
        toml::from_str(&contents).map_err(|e| Error::ManifestParse {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    validate(&showcase, path)?;

    if let Some(base) = path.parent() {
        resolve_paths(&mut showcase, base);
    }

    tracing::info!(
        "Loaded showcase from {:?}: {} tracks, {} gallery items",
        path,
        showcase.tracks.len(),
        showcase.gallery.len()
    );
    Ok(showcase)
}

/// Load a showcase manifest on a blocking thread (for use in Iced tasks).
pub async fn load_async(path: PathBuf) -> Result<Showcase> {
    tokio::task::spawn_blocking(move || load(&path))
        .await
        .map_err(|e| Error::config(format!("Task join error: {e}")))?
}

fn validate(showcase: &Showcase, path: &Path) -> Result<()> {
    let mut track_ids = HashSet::new();
    for track in &showcase.tracks {
        if !track_ids.insert(track.id) {
            return Err(Error::manifest(path, format!("duplicate track id {}", track.id)));
        }
        if track.title.trim().is_empty() {
            return Err(Error::manifest(path, format!("track {} has an empty title", track.id)));
        }
        if track.artist.trim().is_empty() {
            return Err(Error::manifest(path, format!("track {} has an empty artist", track.id)));
        }
        if track.source.as_os_str().is_empty() {
            return Err(Error::manifest(path, format!("track {} has an empty source", track.id)));
        }
    }

    let mut item_ids = HashSet::new();
    for item in &showcase.gallery {
        if !item_ids.insert(item.id) {
            return Err(Error::manifest(path, format!("duplicate gallery id {}", item.id)));
        }
        if item.title.trim().is_empty() {
            return Err(Error::manifest(path, format!("gallery item {} has an empty title", item.id)));
        }
        if item.source.as_os_str().is_empty() {
            return Err(Error::manifest(path, format!("gallery item {} has an empty source", item.id)));
        }
    }

    Ok(())
}

fn resolve_paths(showcase: &mut Showcase, base: &Path) {
    for track in &mut showcase.tracks {
        if track.source.is_relative() {
            track.source = base.join(&track.source);
        }
    }
    for item in &mut showcase.gallery {
        if item.source.is_relative() {
            item.source = base.join(&item.source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"
[[tracks]]
id = 1
title = "Chill Buster"
artist = "NyxTheShield"
source = "music/chill-buster.mp3"

[[tracks]]
id = 2
title = "Hopes and Dreams"
artist = "KaatuWaves"
source = "music/hopes-and-dreams.mp3"

[[gallery]]
id = 1
source = "images/oak-bench.jpg"
title = "Oak Bench"
description = "Steam-bent backrest"
orientation = "landscape"

[[gallery]]
id = 2
source = "images/buster-sword.jpg"
title = "Buster Sword Prop"
orientation = "portrait"
"#;

    fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("showcase.toml");
        let mut file = std::fs::File::create(&path).expect("failed to create manifest");
        file.write_all(contents.as_bytes()).expect("failed to write manifest");
        path
    }

    #[test]
    fn test_load_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), VALID);

        let showcase = load(&path).unwrap();
        assert_eq!(showcase.tracks.len(), 2);
        assert_eq!(showcase.gallery.len(), 2);
        assert_eq!(showcase.tracks[0].title, "Chill Buster");
        // Description is optional
        assert_eq!(showcase.gallery[1].description, "");
    }

    #[test]
    fn test_sources_resolve_relative_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), VALID);

        let showcase = load(&path).unwrap();
        assert_eq!(showcase.tracks[0].source, dir.path().join("music/chill-buster.mp3"));
        assert_eq!(showcase.gallery[0].source, dir.path().join("images/oak-bench.jpg"));
    }

    #[test]
    fn test_duplicate_track_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"
[[tracks]]
id = 7
title = "A"
artist = "X"
source = "a.mp3"

[[tracks]]
id = 7
title = "B"
artist = "Y"
source = "b.mp3"
"#,
        );

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate track id 7"));
    }

    #[test]
    fn test_empty_title_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"
[[gallery]]
id = 1
source = "a.jpg"
title = "  "
orientation = "portrait"
"#,
        );

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("empty title"));
    }

    #[test]
    fn test_unknown_orientation_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"
[[gallery]]
id = 1
source = "a.jpg"
title = "A"
orientation = "diagonal"
"#,
        );

        assert!(matches!(load(&path), Err(Error::ManifestParse { .. })));
    }

    #[test]
    fn test_empty_manifest_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), "");

        let showcase = load(&path).unwrap();
        assert!(showcase.tracks.is_empty());
        assert!(showcase.gallery.is_empty());
    }

    #[test]
    fn test_missing_file_reports_context() {
        let err = load(Path::new("/nonexistent/showcase.toml")).unwrap_err();
        assert!(err.to_string().contains("reading manifest"));
    }
}
