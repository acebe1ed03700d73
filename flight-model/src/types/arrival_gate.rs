use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use super::{model_error::ModelError, time_snapshot::TimeSnapshot};

/// Key of the flag remembering that the arrival has been celebrated.
pub const ARRIVAL_FLAG_KEY: &str = "flight-arrival-celebrated";

/// Pause between detecting the arrival and launching the celebration.
pub const CELEBRATION_DELAY: Duration = Duration::from_millis(600);

/// Persistent boolean flags, keyed by name.
pub trait FlagStore {
    fn is_set(&self, key: &str) -> Result<bool, ModelError>;

    fn set(&mut self, key: &str) -> Result<(), ModelError>;
}

/// Stores each flag as a `<key>.flag` file inside a state directory, so flags
/// survive restarts of the application.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    dir: PathBuf,
}

impl FileFlagStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: &Path) -> Result<Self, ModelError> {
        fs::create_dir_all(dir)?;
        if !dir.is_dir() {
            return Err(ModelError::InvalidPath(dir.display().to_string()));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.flag", key))
    }
}

impl FlagStore for FileFlagStore {
    fn is_set(&self, key: &str) -> Result<bool, ModelError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(false);
        }
        Ok(fs::read_to_string(path)?.trim() == "true")
    }

    fn set(&mut self, key: &str) -> Result<(), ModelError> {
        fs::write(self.path_for(key), "true")?;
        Ok(())
    }
}

/// Flags kept only for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryFlagStore {
    flags: HashSet<String>,
}

impl FlagStore for MemoryFlagStore {
    fn is_set(&self, key: &str) -> Result<bool, ModelError> {
        Ok(self.flags.contains(key))
    }

    fn set(&mut self, key: &str) -> Result<(), ModelError> {
        self.flags.insert(key.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Launch the celebration after `delay`.
    Fire { delay: Duration },
    Skip,
}

/// One-time guard deciding whether the arrival celebration should run.
#[derive(Debug, Clone)]
pub struct ArrivalGate {
    key: String,
}

impl Default for ArrivalGate {
    fn default() -> Self {
        Self::new(ARRIVAL_FLAG_KEY)
    }
}

impl ArrivalGate {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    /// Fires only when the flight has arrived and the flag was not set yet.
    /// The flag is set before returning `Fire`, so later checks skip.
    pub fn check<S: FlagStore>(
        &self,
        snapshot: &TimeSnapshot,
        store: &mut S,
    ) -> Result<GateDecision, ModelError> {
        if !snapshot.is_arrived() || store.is_set(&self.key)? {
            return Ok(GateDecision::Skip);
        }

        store.set(&self.key)?;
        Ok(GateDecision::Fire {
            delay: CELEBRATION_DELAY,
        })
    }
}
