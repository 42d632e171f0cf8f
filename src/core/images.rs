//! Puzzle photo storage. Attached images are copied into an app-private
//! directory under a generated unique filename; the puzzle row stores
//! only the resulting path. Deleting a replaced image is best-effort —
//! a failure only leaks a stale file.

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use rand::Rng;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// `puzzle_image_<timestamp millis>_<random 0..999>.jpg`
pub fn generate_image_name() -> String {
    let suffix: u32 = rand::rng().random_range(0..1000);
    format!("puzzle_image_{}_{}.jpg", Utc::now().timestamp_millis(), suffix)
}

/// Copy `source` into `images_dir` and return the stored path. A copy
/// failure aborts only the image step, never the surrounding save; a
/// source the process may not read maps to `PermissionDenied`.
pub fn attach(images_dir: &Path, source: &Path) -> AppResult<PathBuf> {
    fs::create_dir_all(images_dir)?;
    let dest = images_dir.join(generate_image_name());

    match fs::copy(source, &dest) {
        Ok(_) => Ok(dest),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(AppError::PermissionDenied(
            format!("cannot read image {}", source.display()),
        )),
        Err(e) => Err(AppError::Io(e)),
    }
}

/// Best-effort delete of a stored image; failures are swallowed.
pub fn remove(uri: &str) {
    let _ = fs::remove_file(uri);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generated_names_follow_the_pattern() {
        let name = generate_image_name();
        assert!(name.starts_with("puzzle_image_"));
        assert!(name.ends_with(".jpg"));
        let middle = name
            .trim_start_matches("puzzle_image_")
            .trim_end_matches(".jpg");
        let (millis, suffix) = middle.split_once('_').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert!(suffix.parse::<u32>().unwrap() < 1000);
    }

    #[test]
    fn attach_copies_into_images_dir() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("photo.jpg");
        fs::write(&source, b"jpeg bytes").unwrap();

        let images_dir = dir.path().join("puzzle_images");
        let stored = attach(&images_dir, &source).unwrap();

        assert!(stored.starts_with(&images_dir));
        assert_eq!(fs::read(&stored).unwrap(), b"jpeg bytes");
        // Source is copied, not moved.
        assert!(source.exists());
    }

    #[test]
    fn attach_missing_source_is_io_error() {
        let dir = tempdir().unwrap();
        let err = attach(&dir.path().join("imgs"), &dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn remove_swallows_missing_file() {
        remove("/definitely/not/a/real/file.jpg");
    }
}
