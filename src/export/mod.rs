//! Export domain. Writes a selection to `$HOME/Pictures` as PNG.
//!
//! Files are named `snip-YYYYMMDD-HHMMSS.png`. Two saves within the same
//! second target the same name; the later one overwrites the earlier.

mod encode;

pub use encode::encode_png;

use chrono::{DateTime, TimeZone};
use image::{RgbaImage, SubImage};
use std::ffi::OsString;
use std::fmt::Display;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Directory under the home directory that receives snips.
pub const PICTURES_DIR_NAME: &str = "Pictures";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to save file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// `$HOME/Pictures`, on every OS.
pub fn pictures_dir() -> PathBuf {
    pictures_dir_from(std::env::var_os("HOME"))
}

/// Resolves the pictures directory for a given `HOME` value.
///
/// An unset or empty `HOME` falls back to the platform home directory,
/// then to the working directory.
pub fn pictures_dir_from(home: Option<OsString>) -> PathBuf {
    home.filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PICTURES_DIR_NAME)
}

/// `snip-YYYYMMDD-HHMMSS.png` for the given instant.
pub fn snip_file_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("snip-{}.png", at.format("%Y%m%d-%H%M%S"))
}

/// Encodes `view` and writes it into `dir`, creating `dir` if needed.
///
/// Returns the full path of the written file.
pub fn save_png<Tz>(
    view: &SubImage<&RgbaImage>,
    dir: &Path,
    at: &DateTime<Tz>,
) -> Result<PathBuf, ExportError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let start = Instant::now();

    create_output_dir(dir).map_err(|source| ExportError::DirectoryCreate {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(snip_file_name(at));
    let png_bytes = encode_png(view)?;

    write_file(&path, &png_bytes).map_err(|source| ExportError::FileWrite {
        path: path.clone(),
        source,
    })?;

    log::info!(
        "Saved {} ({} bytes) in {}ms",
        path.display(),
        png_bytes.len(),
        start.elapsed().as_millis()
    );

    Ok(path)
}

/// `mkdir -p` with mode 0755 on Unix.
fn create_output_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

/// One-shot write with mode 0644 on Unix. Existing files are truncated.
fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use image::{imageops, Rgba};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn file_name_uses_second_precision_timestamp() {
        assert_eq!(snip_file_name(&at(7, 8, 9)), "snip-20240305-070809.png");
        assert_eq!(snip_file_name(&at(23, 59, 59)), "snip-20240305-235959.png");
    }

    #[test]
    fn pictures_dir_follows_home() {
        let dir = pictures_dir_from(Some("/home/someone".into()));
        assert_eq!(dir, PathBuf::from("/home/someone/Pictures"));
    }

    #[test]
    fn pictures_dir_without_home_still_ends_in_pictures() {
        let dir = pictures_dir_from(None);
        assert_eq!(dir.file_name().unwrap(), PICTURES_DIR_NAME);
        let dir = pictures_dir_from(Some(OsString::new()));
        assert_eq!(dir.file_name().unwrap(), PICTURES_DIR_NAME);
    }

    #[test]
    fn save_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b").join(PICTURES_DIR_NAME);
        let img = RgbaImage::from_pixel(8, 8, Rgba([9, 9, 9, 255]));

        let path = save_png(&imageops::crop_imm(&img, 0, 0, 4, 4), &dir, &at(1, 2, 3)).unwrap();
        assert_eq!(path, dir.join("snip-20240305-010203.png"));
        assert!(path.is_file());
    }

    #[test]
    fn same_second_save_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(8, 8, Rgba([9, 9, 9, 255]));

        let first = save_png(&imageops::crop_imm(&img, 0, 0, 8, 8), tmp.path(), &at(1, 2, 3)).unwrap();
        let second = save_png(&imageops::crop_imm(&img, 0, 0, 3, 2), tmp.path(), &at(1, 2, 3)).unwrap();
        assert_eq!(first, second);

        let decoded = image::open(&second).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[cfg(unix)]
    #[test]
    fn written_modes_are_0755_and_0644() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(PICTURES_DIR_NAME);
        let img = RgbaImage::new(4, 4);
        let path = save_png(&imageops::crop_imm(&img, 0, 0, 4, 4), &dir, &at(0, 0, 0)).unwrap();

        // umask can only clear bits, never add them.
        let dir_mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode & !0o755, 0);
        assert_eq!(file_mode & !0o644, 0);
    }

    #[test]
    fn directory_error_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join(PICTURES_DIR_NAME);
        fs::write(&blocker, b"not a dir").unwrap();
        let img = RgbaImage::new(4, 4);

        let err = save_png(&imageops::crop_imm(&img, 0, 0, 4, 4), &blocker, &at(0, 0, 0))
            .unwrap_err();
        assert!(matches!(err, ExportError::DirectoryCreate { .. }));
        assert!(err.to_string().starts_with("Failed to create directory"));
        assert!(err.to_string().contains(PICTURES_DIR_NAME));
    }
}
