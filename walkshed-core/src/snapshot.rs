//! Gzip-compressed JSON snapshots of arbitrary serializable values.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;

/// File extension every snapshot must carry
pub const SNAPSHOT_EXTENSION: &str = "gz";

fn check_extension(path: &Path) -> Result<(), Error> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(SNAPSHOT_EXTENSION) => Ok(()),
        _ => Err(Error::InvalidParameter(format!(
            "snapshot path {} must end in .{SNAPSHOT_EXTENSION}",
            path.display()
        ))),
    }
}

/// Serializes `value` to JSON and writes it gzip-compressed to `path`
///
/// # Errors
///
/// Fails if `path` does not end in `.gz`, or on serialization or I/O errors
pub fn compress_to_file<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), Error> {
    check_extension(path)?;

    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GzEncoder::new(file, Compression::default());
    serde_json::to_writer(&mut encoder, value)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Reads a snapshot written by [`compress_to_file`]
///
/// # Errors
///
/// Fails if `path` does not end in `.gz`, is not gzip, or does not hold
/// JSON for `T`
pub fn decompress_from_file<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    check_extension(path)?;

    let decoder = GzDecoder::new(BufReader::new(File::open(path)?));
    Ok(serde_json::from_reader(decoder)?)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn value_survives_a_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tally.json.gz");
        let value = BTreeMap::from([("cafe".to_string(), 12), ("bank".to_string(), 3)]);

        compress_to_file(&value, &path).unwrap();
        let restored: BTreeMap<String, i32> = decompress_from_file(&path).unwrap();
        assert_eq!(restored, value);

        // gzip magic bytes
        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tally.json");

        assert!(matches!(compress_to_file(&1, &path), Err(Error::InvalidParameter(_))));
        assert!(!path.exists());
        assert!(decompress_from_file::<i32>(&path).is_err());
    }

    #[test]
    fn plain_file_is_not_a_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.gz");
        std::fs::write(&path, b"[1, 2, 3]").unwrap();

        assert!(decompress_from_file::<Vec<i32>>(&path).is_err());
    }
}
