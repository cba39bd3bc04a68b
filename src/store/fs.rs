//! JSON snapshot source.
//!
//! One JSON file holds the whole property collection — the "offline slot"
//! the fallback chain mutates and reads when the remote record API is
//! unreachable. Missing or corrupt content loads as the empty collection;
//! writes go through a tmp file and rename so a crash never leaves a
//! half-written snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{NewProperty, Property, PropertyId, PropertyPatch};
use crate::store::{create_in, PropertySource};

pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// A backend persisting to the given snapshot file. The file (and its
    /// parent directory) is created on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Vec<Property> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&text) {
            Ok(properties) => properties,
            Err(error) => {
                // Corrupt state degrades to empty, never raises
                warn!(path = %self.path.display(), %error, "corrupt snapshot, starting empty");
                Vec::new()
            }
        }
    }

    /// First-run seeding: write the given listings only when the snapshot
    /// holds nothing yet.
    pub fn seed_if_empty(&self, listings: &[Property]) -> Result<()> {
        if self.load().is_empty() {
            self.save(listings)?;
        }
        Ok(())
    }

    fn save(&self, properties: &[Property]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(Error::Io)?;
            }
        }
        let text = serde_json::to_string_pretty(properties).map_err(Error::Serialization)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(Error::Io)?;
        fs::rename(&tmp, &self.path).map_err(Error::Io)?;
        Ok(())
    }
}

impl PropertySource for JsonFileBackend {
    fn get_all(&self) -> Result<Vec<Property>> {
        Ok(self.load())
    }

    fn get_by_id(&self, id: PropertyId) -> Result<Option<Property>> {
        Ok(self.load().into_iter().find(|p| p.id == id))
    }

    fn create(&mut self, draft: NewProperty) -> Result<Property> {
        let mut properties = self.load();
        let property = create_in(&mut properties, draft);
        self.save(&properties)?;
        Ok(property)
    }

    fn update(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<Property> {
        let mut properties = self.load();
        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::NotFound(id))?;
        patch.apply_to(property);
        let updated = property.clone();
        self.save(&properties)?;
        Ok(updated)
    }

    fn delete(&mut self, id: PropertyId) -> Result<Property> {
        let mut properties = self.load();
        let index = properties
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::NotFound(id))?;
        let removed = properties.remove(index);
        self.save(&properties)?;
        Ok(removed)
    }
}
