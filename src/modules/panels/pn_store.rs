use crate::error::StoreError;
use crate::modules::dropdown::FilterField;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub partylist: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

impl Candidate {
    pub fn field_text(&self, field: FilterField) -> String {
        match field {
            FilterField::Name => self.name.clone(),
            FilterField::Partylist => self.partylist.clone(),
            FilterField::Issue => self.issues.join(", "),
            FilterField::Position => self.position.clone(),
        }
    }

    /// Case-insensitive substring match against `field`, or against every
    /// field when none is selected. A blank query matches everything.
    pub fn matches(&self, query: &str, field: Option<FilterField>) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&query);
        match field {
            Some(FilterField::Issue) => self.issues.iter().any(|i| hit(i)),
            Some(field) => hit(&self.field_text(field)),
            None => FilterField::ALL.iter().any(|&f| self.matches(&query, Some(f))),
        }
    }
}

pub struct CandidateStore {
    path: PathBuf,
    candidates: Vec<Candidate>,
    refreshed_at: Option<DateTime<Local>>,
}

impl CandidateStore {
    /// Opens the store at `path`. Unreadable data leaves it empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self { path: path.into(), candidates: Vec::new(), refreshed_at: None };
        store.refresh();
        store
    }

    pub fn read_file(path: &Path) -> Result<Vec<Candidate>, StoreError> {
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reloads from disk, replacing whatever is in memory.
    pub fn refresh(&mut self) {
        self.candidates = match Self::read_file(&self.path) {
            Ok(candidates) => {
                log::info!("Loaded {} candidates from {}", candidates.len(), self.path.display());
                candidates
            }
            Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No candidate file at {}; starting empty", self.path.display());
                Vec::new()
            }
            Err(e) => {
                log::warn!("{e}; starting empty");
                Vec::new()
            }
        };
        self.refreshed_at = Some(Local::now());
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.candidates).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }

    /// Removes `name` and writes the store back. A failed write puts the
    /// candidate back where it was, so memory keeps matching the file.
    pub fn delete(&mut self, name: &str) -> Result<Option<Candidate>, StoreError> {
        let Some(index) = self.candidates.iter().position(|c| c.name == name) else {
            return Ok(None);
        };
        let removed = self.candidates.remove(index);
        match self.save() {
            Ok(()) => Ok(Some(removed)),
            Err(e) => {
                self.candidates.insert(index, removed);
                Err(e)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn filtered<'a>(&'a self, query: &'a str, field: Option<FilterField>) -> impl Iterator<Item = &'a Candidate> + 'a {
        self.candidates.iter().filter(move |c| c.matches(query, field))
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Local>> {
        self.refreshed_at
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
