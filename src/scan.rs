use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use globset::GlobMatcher;
use tracing::{debug, warn};

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{Result, SlideshowError};
use crate::slides::SlideSet;

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path, selector: &GlobMatcher) -> Result<SlideSet<PathBuf>> {
    let read_dir_err = |source| SlideshowError::ReadDir {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if !path.is_file() || !is_image(&path) {
            continue;
        }
        match path.file_name() {
            Some(name) if selector.is_match(name) => paths.push(path),
            _ => debug!(path = %path.display(), "skipped, not matched by selector"),
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir_path.display(), count = paths.len(), "slides found");

    SlideSet::new(paths)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// EXIF orientation of a JPEG, 1 (no rotation) when missing or unreadable.
pub fn read_exif_orientation(file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            warn!("could not read EXIF data: {}", e);
            1
        }
    }
}
