//! # Storage Layer
//!
//! This module defines the record-source abstraction for propertyhub. The
//! [`PropertySource`] trait lets the application work with different backends
//! behind one contract.
//!
//! ## The Fallback Chain
//!
//! Production composes backends as a chain of responsibility:
//!
//! ```text
//! RemoteBackend  ──BackendUnavailable──▶  JsonFileBackend / MemoryBackend
//! ```
//!
//! [`fallback::FallbackSource`] is the decorator that tries the primary and,
//! only on `BackendUnavailable`, delegates to the fallback. Callers see the
//! same return shapes either way; the only difference is a logged
//! diagnostic. Mutations that fall back are applied to (and persisted in)
//! the fallback store.
//!
//! ## Contract Highlights
//!
//! - `get_all` returns defensive copies; mutating the result never touches
//!   internal state.
//! - `get_by_id` returns `Ok(None)` for a missing id, never an error.
//! - `create` assigns `max(existing ids) + 1` (1 when empty) and stamps the
//!   listing date.
//! - `update`/`delete` fail with [`Error::NotFound`] for a missing id and
//!   leave the collection unchanged.
//!
//! ## Query Helpers
//!
//! The trait's query helpers (`search_by_location`, `filter_by_price_range`,
//! `filter_by_property_type`, `search`) are default methods delegating to
//! the query engine, so a "browse + filter" flow and a "search + filter"
//! flow can never diverge for the same criteria.
//!
//! ## Implementations
//!
//! - [`memory::MemoryBackend`]: in-memory collection, seedable with sample
//!   listings; also the unit-test workhorse.
//! - [`fs::JsonFileBackend`]: one JSON snapshot file, atomic writes.
//! - [`remote::RemoteBackend`]: blocking client for the remote record API.

use chrono::Utc;

use crate::error::Result;
use crate::model::{NewProperty, Property, PropertyId, PropertyPatch, PropertyType};
use crate::query::{self, FilterCriteria};

pub mod fallback;
pub mod fs;
pub mod memory;
pub mod remote;

pub use fallback::FallbackSource;
pub use fs::JsonFileBackend;
pub use memory::MemoryBackend;
pub use remote::RemoteBackend;

/// Abstract interface over a property record collection.
pub trait PropertySource {
    /// Full collection, as defensive copies.
    fn get_all(&self) -> Result<Vec<Property>>;

    /// Single property, `Ok(None)` when the id is absent.
    fn get_by_id(&self, id: PropertyId) -> Result<Option<Property>>;

    /// Assign a fresh id, stamp the listing date, append, and return the
    /// stored copy.
    fn create(&mut self, draft: NewProperty) -> Result<Property>;

    /// Merge set fields into the existing record.
    fn update(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<Property>;

    /// Remove and return the record.
    fn delete(&mut self, id: PropertyId) -> Result<Property>;

    // --- Query helpers (shared with the query engine by construction) ---

    fn search_by_location(&self, text: &str) -> Result<Vec<Property>> {
        let criteria = FilterCriteria {
            location: Some(text.to_string()),
            ..Default::default()
        };
        Ok(query::filter_properties(&self.get_all()?, &criteria))
    }

    fn filter_by_price_range(&self, min: Option<f64>, max: Option<f64>) -> Result<Vec<Property>> {
        let criteria = FilterCriteria {
            price_min: min,
            price_max: max,
            ..Default::default()
        };
        Ok(query::filter_properties(&self.get_all()?, &criteria))
    }

    fn filter_by_property_type(&self, property_type: &PropertyType) -> Result<Vec<Property>> {
        let criteria = FilterCriteria {
            property_types: vec![property_type.clone()],
            ..Default::default()
        };
        Ok(query::filter_properties(&self.get_all()?, &criteria))
    }

    /// Combined search: text match intersected with the same filter
    /// predicates the browse flow uses.
    fn search(&self, text: &str, criteria: &FilterCriteria) -> Result<Vec<Property>> {
        Ok(query::search_properties(&self.get_all()?, text, criteria))
    }
}

// Boxed sources keep the wiring layer free to pick a chain shape at runtime.
impl PropertySource for Box<dyn PropertySource> {
    fn get_all(&self) -> Result<Vec<Property>> {
        (**self).get_all()
    }

    fn get_by_id(&self, id: PropertyId) -> Result<Option<Property>> {
        (**self).get_by_id(id)
    }

    fn create(&mut self, draft: NewProperty) -> Result<Property> {
        (**self).create(draft)
    }

    fn update(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<Property> {
        (**self).update(id, patch)
    }

    fn delete(&mut self, id: PropertyId) -> Result<Property> {
        (**self).delete(id)
    }
}

/// Id assignment rule shared by every local backend.
pub(crate) fn next_id(properties: &[Property]) -> PropertyId {
    properties.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

/// Apply a create against an in-memory collection. Returns the stored copy.
pub(crate) fn create_in(properties: &mut Vec<Property>, draft: NewProperty) -> Property {
    let property = draft.into_property(next_id(properties), Utc::now());
    properties.push(property.clone());
    property
}
