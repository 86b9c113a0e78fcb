//! Mission store backends.
//!
//! The store is an external collaborator from the game's perspective: it
//! lists committed missions in id order and accepts inserts. There is no
//! update or delete. The JSON store rewrites its whole file per insert,
//! which is fine for a table of this size.

use std::path::{Path, PathBuf};

use sigma_types::{Result, SigmaError};

use crate::mission::{Difficulty, Mission};

/// Supplies the ordered mission list.
pub trait MissionSource {
    /// All committed missions, id-ascending.
    fn list_missions(&self) -> Result<Vec<Mission>>;

    /// Insert a mission and return its assigned id.
    fn insert_mission(&mut self, name: &str, difficulty: Difficulty, active: bool) -> Result<i64>;
}

/// In-process store used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    missions: Vec<Mission>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            missions: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a store pre-populated with the given missions.
    ///
    /// Ids are reassigned ascending so the list order matches the contract.
    pub fn with_missions(missions: impl IntoIterator<Item = Mission>) -> Self {
        let mut store = Self::new();
        for mut m in missions {
            m.id = store.next_id;
            store.next_id += 1;
            store.missions.push(m);
        }
        store
    }
}

impl MissionSource for MemoryStore {
    fn list_missions(&self) -> Result<Vec<Mission>> {
        Ok(self.missions.clone())
    }

    fn insert_mission(&mut self, name: &str, difficulty: Difficulty, active: bool) -> Result<i64> {
        let id = self.next_id;
        self.next_id += 1;
        self.missions.push(Mission {
            id,
            name: name.to_string(),
            difficulty,
            active,
            kind: None,
        });
        log::info!("mission '{name}' inserted with id {id}");
        Ok(id)
    }
}

/// File-backed store, one JSON array of missions.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Open a store at `path`. The file need not exist yet; it is created
    /// on first insert.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Mission>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let mut missions: Vec<Mission> = serde_json::from_str(&raw)?;
        missions.sort_by_key(|m| m.id);
        Ok(missions)
    }

    fn write_all(&self, missions: &[Mission]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(missions)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl MissionSource for JsonStore {
    fn list_missions(&self) -> Result<Vec<Mission>> {
        self.read_all()
    }

    fn insert_mission(&mut self, name: &str, difficulty: Difficulty, active: bool) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(SigmaError::Store("mission name must not be empty".into()));
        }
        let mut missions = self.read_all()?;
        let id = missions.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        missions.push(Mission {
            id,
            name: name.to_string(),
            difficulty,
            active,
            kind: None,
        });
        self.write_all(&missions)?;
        log::info!("mission '{name}' inserted with id {id}");
        Ok(id)
    }
}

/// Fetch missions, degrading any store failure to an empty list.
///
/// This is the boundary the game uses: with zero missions every
/// mission-dependent action becomes a no-op, and the error only shows up in
/// the log.
pub fn list_or_empty(source: &dyn MissionSource) -> Vec<Mission> {
    match source.list_missions() {
        Ok(missions) => {
            log::info!("retrieved {} mission(s)", missions.len());
            missions
        },
        Err(e) => {
            log::error!("mission fetch failed, running with empty list: {e}");
            Vec::new()
        },
    }
}

/// Seed the demo mission set if the store is empty.
pub fn seed_demo(store: &mut dyn MissionSource) -> Result<()> {
    if !store.list_missions()?.is_empty() {
        return Ok(());
    }
    store.insert_mission("Trace Echo", Difficulty::Medium, true)?;
    store.insert_mission("Core Breach", Difficulty::Hard, false)?;
    store.insert_mission("Firewall Reboot", Difficulty::Easy, true)?;
    Ok(())
}
