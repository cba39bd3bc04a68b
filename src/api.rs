//! # API Facade
//!
//! [`PropertyHubApi`] is a thin facade over the storage layer, the query
//! engine, and the favorites store. It is the single entry point a front
//! end needs: it dispatches, composes the pure pipeline over store output,
//! and returns structured types — no I/O, no formatting, no assumptions
//! about who is listening.
//!
//! ## Generic Over Its Stores
//!
//! `PropertyHubApi<S: PropertySource, B: FavoritesBackend>` works against
//! any backend pairing:
//! - Production: the [`open_default`] chain (remote → seeded JSON snapshot)
//!   with the JSON favorites slot.
//! - Testing: `MemoryBackend` + `MemoryFavoritesBackend`, no filesystem.
//!
//! ## Browse vs. Search
//!
//! `browse` applies criteria only; `search` additionally applies the text
//! predicate. Both run the same filter predicates and the same sort/page
//! layering, so their result sets can never diverge for equal criteria.

use crate::config::HubConfig;
use crate::error::{Error, Result};
use crate::favorites::{FavoritesBackend, FavoritesStore, JsonFavoritesBackend};
use crate::model::{NewProperty, Property, PropertyId, PropertyPatch};
use crate::query::{self, FilterCriteria, Page, SortKey};
use crate::store::memory::sample_listings;
use crate::store::{FallbackSource, JsonFileBackend, PropertySource, RemoteBackend};

/// One page of browse/search output, plus the totals the grid needs to
/// render "Showing X of Y" and the load-more affordance.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseResult {
    pub shown: Vec<Property>,
    pub total_matched: usize,
    pub has_more: bool,
}

/// Rollup for the lease management view.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaseSummary {
    /// Listings with a present, positive lease amount.
    pub properties: Vec<Property>,
    pub monthly_revenue: f64,
    /// Leases ending within the next three months (or already ended).
    pub expiring_soon: usize,
}

const EXPIRING_SOON_DAYS: i64 = 90;

pub struct PropertyHubApi<S: PropertySource, B: FavoritesBackend> {
    source: S,
    favorites: FavoritesStore<B>,
}

impl<S: PropertySource, B: FavoritesBackend> PropertyHubApi<S, B> {
    pub fn new(source: S, favorites: FavoritesStore<B>) -> Self {
        Self { source, favorites }
    }

    /// Filtered, sorted, paged listing for the browse view.
    pub fn browse(
        &self,
        criteria: &FilterCriteria,
        sort: SortKey,
        page: &Page,
    ) -> Result<BrowseResult> {
        let matched = query::filter_properties(&self.source.get_all()?, criteria);
        Ok(Self::paged(matched, sort, page))
    }

    /// Text search intersected with the active filters, sorted and paged.
    pub fn search(
        &self,
        text: &str,
        criteria: &FilterCriteria,
        sort: SortKey,
        page: &Page,
    ) -> Result<BrowseResult> {
        let matched = self.source.search(text, criteria)?;
        Ok(Self::paged(matched, sort, page))
    }

    fn paged(matched: Vec<Property>, sort: SortKey, page: &Page) -> BrowseResult {
        let sorted = query::sort_properties(&matched, sort);
        BrowseResult {
            shown: page.apply(&sorted).to_vec(),
            total_matched: sorted.len(),
            has_more: page.has_more(&sorted),
        }
    }

    /// Detail lookup; `Ok(None)` for an unknown id.
    pub fn property(&self, id: PropertyId) -> Result<Option<Property>> {
        self.source.get_by_id(id)
    }

    pub fn create_property(&mut self, draft: NewProperty) -> Result<Property> {
        self.source.create(draft)
    }

    pub fn update_property(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<Property> {
        self.source.update(id, patch)
    }

    pub fn delete_property(&mut self, id: PropertyId) -> Result<Property> {
        self.source.delete(id)
    }

    /// Rollup of the active lease listings.
    pub fn lease_summary(&self) -> Result<LeaseSummary> {
        let now = chrono::Utc::now();
        let properties: Vec<Property> = self
            .source
            .get_all()?
            .into_iter()
            .filter(Property::is_for_lease)
            .collect();
        let monthly_revenue = properties.iter().filter_map(|p| p.lease_amount).sum();
        let expiring_soon = properties
            .iter()
            .filter_map(|p| p.lease_days_remaining(now))
            .filter(|days| *days <= EXPIRING_SOON_DAYS)
            .count();
        Ok(LeaseSummary {
            properties,
            monthly_revenue,
            expiring_soon,
        })
    }

    /// The heart-icon affordance: resolve the live record, then toggle.
    /// Returns whether the property is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: PropertyId) -> Result<bool> {
        let property = self
            .source
            .get_by_id(id)?
            .ok_or(Error::NotFound(id))?;
        self.favorites.toggle(&property)
    }

    pub fn favorites(&self) -> &FavoritesStore<B> {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore<B> {
        &mut self.favorites
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Wire up the production stack from configuration:
/// remote record API (when configured) → JSON snapshot slot, seeded with the
/// built-in sample listings on first run, plus the JSON favorites slot.
pub fn open_default(
    config: &HubConfig,
) -> Result<PropertyHubApi<Box<dyn PropertySource>, JsonFavoritesBackend>> {
    let snapshot = JsonFileBackend::new(config.snapshot_path()?);
    snapshot.seed_if_empty(&sample_listings())?;

    let source: Box<dyn PropertySource> = match &config.remote_url {
        Some(url) => Box::new(FallbackSource::new(RemoteBackend::new(url.clone()), snapshot)),
        None => Box::new(snapshot),
    };

    let favorites = FavoritesStore::new(JsonFavoritesBackend::new(config.favorites_path()?));
    Ok(PropertyHubApi::new(source, favorites))
}
