use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tilemerge_core::Score;

/// File name a persisted value is stored under.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Progress kept between runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GameData {
    pub(crate) highest_score: Score,
    pub(crate) first_run: bool,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            highest_score: 0,
            first_run: true,
        }
    }
}

impl StorageKey for GameData {
    const KEY: &'static str = "game_data.json";
}

/// JSON files in a single directory.
#[derive(Clone, Debug)]
pub(crate) struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub(crate) fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_of<T: StorageKey>(&self) -> PathBuf {
        self.dir.join(T::KEY)
    }

    /// Missing or unreadable files fall back to the default value.
    pub(crate) fn load_or_default<T>(&self) -> T
    where
        T: StorageKey + DeserializeOwned + Default,
    {
        let path = self.path_of::<T>();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                return T::default();
            }
            Err(err) => {
                log::warn!("failed to read {}: {}", path.display(), err);
                return T::default();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|err| {
            log::warn!("ignoring corrupt {}: {}", path.display(), err);
            T::default()
        })
    }

    pub(crate) fn save<T: StorageKey + Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let path = self.path_of::<T>();
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Could not create {}", self.dir.display()))?;
        let text = serde_json::to_string_pretty(value)?;
        fs::write(&path, text).with_context(|| format!("Could not write {}", path.display()))?;
        Ok(())
    }
}
