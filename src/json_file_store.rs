use crate::{
    backend::BookingStore,
    errors::{StoreError, StoreResult},
    types::StoredBooking,
};
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

/// Bookings kept as one pretty-printed JSON array on disk.
///
/// Saves go to `<file>.tmp` first and are renamed over the canonical file, so
/// a reader never sees a half-written list.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates the parent directory if needed. The file itself is only
    /// created by the first save.
    pub fn new(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl BookingStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<StoredBooking>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(vec![]);
        }
        serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)
    }

    fn save(&mut self, bookings: &[StoredBooking]) -> StoreResult<()> {
        let encoded = serde_json::to_vec_pretty(bookings).map_err(StoreError::Encode)?;
        let temp_path = self.temp_path();

        let mut file = File::create(&temp_path)?;
        file.write_all(&encoded)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        debug!(path = %self.path.display(), count = bookings.len(), "Saved bookings");
        Ok(())
    }
}
