use compound_interest_core::RawInputs;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const STATE_DIR: &str = ".compound-interest";
const STATE_FILE: &str = "inputs.json";

/// Last-entered form inputs, kept between runs.
///
/// Loaded when a command starts and written back only when the inputs changed.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(default_path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable state is treated as "nothing saved".
    pub fn load(&self) -> Option<RawInputs> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!("no saved inputs at {}: {}", self.path.display(), e);
                return None;
            }
        };
        match RawInputs::from_json(&contents) {
            Ok(inputs) => {
                info!("loaded saved inputs from {}", self.path.display());
                Some(inputs)
            }
            Err(e) => {
                warn!("ignoring corrupt saved inputs at {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, inputs: &RawInputs) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(inputs)?;
        fs::write(&self.path, json)
            .map_err(|e| format!("Failed to write '{}': {}", self.path.display(), e))?;
        info!("saved inputs to {}", self.path.display());
        Ok(())
    }

    /// Returns whether a saved file existed.
    pub fn clear(&self) -> Result<bool, Box<dyn std::error::Error>> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .map_err(|e| format!("Failed to remove '{}': {}", self.path.display(), e))?;
        info!("cleared saved inputs at {}", self.path.display());
        Ok(true)
    }
}

fn default_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(STATE_DIR).join(STATE_FILE),
        _ => PathBuf::from(format!("{STATE_DIR}.json")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compound_interest_core::{DepositFrequency, DurationUnit};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample() -> RawInputs {
        RawInputs {
            initial_amount: "1000".into(),
            interest_rate: "5".into(),
            deposit_frequency: DepositFrequency::Yearly,
            duration_unit: DurationUnit::Years,
            duration: "10".into(),
            periodic_deposit: "500".into(),
        }
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::new(Some(dir.path().join("absent.json")));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::new(Some(dir.path().join("nested").join("inputs.json")));
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
    }

    #[test]
    fn test_corrupt_state_ignored() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("inputs.json");
        fs::write(&path, "{not json").unwrap();
        assert!(StateStore::new(Some(path)).load().is_none());
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::new(Some(dir.path().join("inputs.json")));
        assert!(!store.clear().unwrap());
        store.save(&sample()).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().is_none());
    }
}
