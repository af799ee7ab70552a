//! Whole-file snapshots of a record collection.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, error};

/// Format version written into every snapshot.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed snapshot {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "snapshot {} has unsupported version {found} (expected {})",
        .path.display(),
        FORMAT_VERSION
    )]
    UnsupportedVersion { path: PathBuf, found: u32 },
}

impl CodecError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_owned(),
            source,
        }
    }
}

/// Maps one named file to an ordered list of records.
///
/// Implementors provide the fallible [`read`](Codec::read) and
/// [`write`](Codec::write); stores only ever go through
/// [`load`](Codec::load) and [`save`](Codec::save), which contain every
/// failure and report it through tracing.
pub trait Codec {
    /// Where the snapshot lives, for diagnostics.
    fn location(&self) -> &Path;

    /// `Ok(None)` when there is no snapshot yet.
    fn read<T: DeserializeOwned>(&self) -> Result<Option<Vec<T>>, CodecError>;

    /// Replaces the snapshot with `records`.
    fn write<T: Serialize>(&self, records: &[T]) -> Result<(), CodecError>;

    /// Missing or unreadable snapshots both load as empty.
    fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        match self.read() {
            Ok(Some(records)) => {
                debug!(path = %self.location().display(), count = records.len(), "loaded snapshot");
                records
            }
            Ok(None) => {
                debug!(path = %self.location().display(), "no snapshot, starting empty");
                Vec::new()
            }
            Err(err) => {
                error!(path = %self.location().display(), %err, "snapshot could not be loaded, starting empty");
                Vec::new()
            }
        }
    }

    /// Returns whether the snapshot was written.
    fn save<T: Serialize>(&self, records: &[T]) -> bool {
        match self.write(records) {
            Ok(()) => {
                debug!(path = %self.location().display(), count = records.len(), "saved snapshot");
                true
            }
            Err(err) => {
                error!(path = %self.location().display(), %err, "snapshot could not be saved");
                false
            }
        }
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    version: u32,
    records: &'a [T],
}

#[derive(Deserialize)]
struct Snapshot<T> {
    version: u32,
    records: Vec<T>,
}

/// Pretty-printed JSON snapshot, replaced atomically through a temporary file
/// in the same directory.
#[derive(Clone, Debug)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl Codec for JsonFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read<T: DeserializeOwned>(&self) -> Result<Option<Vec<T>>, CodecError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(CodecError::io(&self.path, err)),
        };

        let snapshot: Snapshot<T> = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| CodecError::json(&self.path, err))?;

        if snapshot.version != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion {
                path: self.path.clone(),
                found: snapshot.version,
            });
        }

        Ok(Some(snapshot.records))
    }

    fn write<T: Serialize>(&self, records: &[T]) -> Result<(), CodecError> {
        let parent = self.parent_dir();
        fs::create_dir_all(parent).map_err(|err| CodecError::io(parent, err))?;

        let mut temp_file =
            NamedTempFile::new_in(parent).map_err(|err| CodecError::io(parent, err))?;

        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            let snapshot = SnapshotRef {
                version: FORMAT_VERSION,
                records,
            };

            serde_json::to_writer_pretty(&mut writer, &snapshot)
                .map_err(|err| CodecError::json(&self.path, err))?;
            writer
                .flush()
                .map_err(|err| CodecError::io(&self.path, err))?;
        }

        temp_file
            .persist(&self.path)
            .map_err(|err| CodecError::io(&self.path, err.error))?;

        Ok(())
    }
}
