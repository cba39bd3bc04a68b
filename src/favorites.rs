//! # Favorites Store
//!
//! A persisted set of user-saved property snapshots, keyed by property id.
//! The mapping is loaded once at construction and every mutation
//! synchronously updates memory and persists the full mapping back through
//! the backend — favorites survive reloads by construction.
//!
//! ## Snapshots, Not References
//!
//! `add` stores a full copy of the property plus the moment it was saved.
//! Later edits to the source record do not propagate to the favorite copy.
//!
//! ## Observers Instead of a Singleton
//!
//! The original design reached for ambient global state consulted from every
//! view. Here the store is an explicit object; interested parties subscribe
//! and receive a [`FavoriteEvent`] after each *effective* mutation (no-ops
//! emit nothing). That event is the hook the presentation boundary uses for
//! its "Added to favorites!" style notifications.
//!
//! ## Degraded Loads
//!
//! Missing or corrupt persisted state loads as the empty mapping. A broken
//! favorites file must never take the application down.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{Favorite, Property, PropertyId};

/// Emitted to subscribers after each effective mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteEvent {
    Added(PropertyId),
    Removed(PropertyId),
    Cleared,
}

/// Raw persistence for the favorites mapping.
///
/// `load` is infallible by design: corrupt or missing state degrades to the
/// empty mapping rather than raising.
pub trait FavoritesBackend {
    fn load(&self) -> HashMap<PropertyId, Favorite>;
    fn save(&self, favorites: &HashMap<PropertyId, Favorite>) -> Result<()>;
}

/// JSON-file slot, independent from the property snapshot slot.
pub struct JsonFavoritesBackend {
    path: PathBuf,
}

impl JsonFavoritesBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesBackend for JsonFavoritesBackend {
    fn load(&self) -> HashMap<PropertyId, Favorite> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return HashMap::new(),
        };
        match serde_json::from_str(&text) {
            Ok(favorites) => favorites,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "corrupt favorites, starting empty");
                HashMap::new()
            }
        }
    }

    fn save(&self, favorites: &HashMap<PropertyId, Favorite>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(Error::Io)?;
            }
        }
        let text = serde_json::to_string_pretty(favorites).map_err(Error::Serialization)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(Error::Io)?;
        fs::rename(&tmp, &self.path).map_err(Error::Io)?;
        Ok(())
    }
}

/// In-memory slot for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryFavoritesBackend {
    favorites: RefCell<HashMap<PropertyId, Favorite>>,
}

impl MemoryFavoritesBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesBackend for MemoryFavoritesBackend {
    fn load(&self) -> HashMap<PropertyId, Favorite> {
        self.favorites.borrow().clone()
    }

    fn save(&self, favorites: &HashMap<PropertyId, Favorite>) -> Result<()> {
        *self.favorites.borrow_mut() = favorites.clone();
        Ok(())
    }
}

type Listener = Box<dyn Fn(&FavoriteEvent)>;

pub struct FavoritesStore<B: FavoritesBackend> {
    backend: B,
    favorites: HashMap<PropertyId, Favorite>,
    listeners: Vec<Listener>,
}

impl<B: FavoritesBackend> FavoritesStore<B> {
    /// Load the persisted mapping (empty on missing/corrupt state).
    pub fn new(backend: B) -> Self {
        let favorites = backend.load();
        Self {
            backend,
            favorites,
            listeners: Vec::new(),
        }
    }

    /// Register an observer for mutation events.
    pub fn subscribe(&mut self, listener: impl Fn(&FavoriteEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, event: FavoriteEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    fn persist(&self) -> Result<()> {
        self.backend.save(&self.favorites)
    }

    pub fn is_favorite(&self, id: PropertyId) -> bool {
        self.favorites.contains_key(&id)
    }

    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Current favorites, most recently added first.
    pub fn favorites(&self) -> Vec<Favorite> {
        let mut all: Vec<Favorite> = self.favorites.values().cloned().collect();
        all.sort_by(|a, b| b.favorite_date.cmp(&a.favorite_date));
        all
    }

    /// Store a snapshot stamped with the current time. Idempotent: adding an
    /// existing favorite is a no-op and emits nothing.
    pub fn add(&mut self, property: &Property) -> Result<()> {
        if self.favorites.contains_key(&property.id) {
            return Ok(());
        }
        self.favorites.insert(
            property.id,
            Favorite::new(property.clone(), Utc::now()),
        );
        self.persist()?;
        self.notify(FavoriteEvent::Added(property.id));
        Ok(())
    }

    /// No-op when the id is absent.
    pub fn remove(&mut self, id: PropertyId) -> Result<()> {
        if self.favorites.remove(&id).is_none() {
            return Ok(());
        }
        self.persist()?;
        self.notify(FavoriteEvent::Removed(id));
        Ok(())
    }

    /// Add if absent, remove if present. Returns whether the property is a
    /// favorite afterwards. This is the one mutation the heart-icon
    /// affordance invokes.
    pub fn toggle(&mut self, property: &Property) -> Result<bool> {
        if self.is_favorite(property.id) {
            self.remove(property.id)?;
            Ok(false)
        } else {
            self.add(property)?;
            Ok(true)
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.favorites.clear();
        self.persist()?;
        self.notify(FavoriteEvent::Cleared);
        Ok(())
    }
}
