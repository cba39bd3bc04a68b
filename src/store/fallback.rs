//! Fallback decorator.
//!
//! Composes two [`PropertySource`]s as a chain of responsibility: every call
//! goes to the primary first, and only a [`Error::BackendUnavailable`]
//! answer re-runs it against the fallback. Any other outcome — success,
//! `NotFound`, a store error — is definitive and passes through unchanged,
//! so the chain is invisible to callers apart from a logged diagnostic.

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{NewProperty, Property, PropertyId, PropertyPatch};
use crate::store::PropertySource;

pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
}

impl<P: PropertySource, F: PropertySource> FallbackSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    pub fn into_parts(self) -> (P, F) {
        (self.primary, self.fallback)
    }

    fn recover<T>(operation: &str, result: Result<T>, retry: impl FnOnce() -> Result<T>) -> Result<T> {
        match result {
            Err(Error::BackendUnavailable(reason)) => {
                warn!(operation, %reason, "primary source unavailable, using fallback");
                retry()
            }
            other => other,
        }
    }
}

impl<P: PropertySource, F: PropertySource> PropertySource for FallbackSource<P, F> {
    fn get_all(&self) -> Result<Vec<Property>> {
        Self::recover("get_all", self.primary.get_all(), || self.fallback.get_all())
    }

    fn get_by_id(&self, id: PropertyId) -> Result<Option<Property>> {
        Self::recover("get_by_id", self.primary.get_by_id(id), || {
            self.fallback.get_by_id(id)
        })
    }

    fn create(&mut self, draft: NewProperty) -> Result<Property> {
        match self.primary.create(draft.clone()) {
            Err(Error::BackendUnavailable(reason)) => {
                warn!(operation = "create", %reason, "primary source unavailable, using fallback");
                self.fallback.create(draft)
            }
            other => other,
        }
    }

    fn update(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<Property> {
        match self.primary.update(id, patch.clone()) {
            Err(Error::BackendUnavailable(reason)) => {
                warn!(operation = "update", %reason, "primary source unavailable, using fallback");
                self.fallback.update(id, patch)
            }
            other => other,
        }
    }

    fn delete(&mut self, id: PropertyId) -> Result<Property> {
        match self.primary.delete(id) {
            Err(Error::BackendUnavailable(reason)) => {
                warn!(operation = "delete", %reason, "primary source unavailable, using fallback");
                self.fallback.delete(id)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use crate::test_utils::{listing_set, sample_property};

    fn chain_with_primary_down() -> FallbackSource<MemoryBackend, MemoryBackend> {
        let primary = MemoryBackend::with_properties(listing_set());
        primary.set_unavailable(true);
        let fallback = MemoryBackend::with_properties(vec![sample_property(10)]);
        FallbackSource::new(primary, fallback)
    }

    #[test]
    fn test_primary_serves_when_available() {
        let primary = MemoryBackend::with_properties(listing_set());
        let fallback = MemoryBackend::new();
        let chain = FallbackSource::new(primary, fallback);

        assert_eq!(chain.get_all().unwrap().len(), 4);
    }

    #[test]
    fn test_reads_fall_back_on_unavailable() {
        let chain = chain_with_primary_down();

        let all = chain.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 10);
        assert_eq!(chain.get_by_id(10).unwrap().unwrap().id, 10);
    }

    #[test]
    fn test_mutations_land_in_fallback_store() {
        let mut chain = chain_with_primary_down();

        let created = chain
            .create(NewProperty {
                title: "Offline create".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(created.id, 11); // max(10) + 1 in the fallback

        assert_eq!(chain.fallback().get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_not_found_is_definitive_not_retried() {
        // Primary is up and answers NotFound; the fallback holds id 10 but
        // must not be consulted.
        let primary = MemoryBackend::with_properties(listing_set());
        let fallback = MemoryBackend::with_properties(vec![sample_property(10)]);
        let mut chain = FallbackSource::new(primary, fallback);

        assert!(matches!(
            chain.delete(10).unwrap_err(),
            Error::NotFound(10)
        ));
        assert_eq!(chain.fallback().get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_store_errors_pass_through() {
        let primary = MemoryBackend::with_properties(listing_set());
        primary.set_simulate_write_error(true);
        let fallback = MemoryBackend::new();
        let mut chain = FallbackSource::new(primary, fallback);

        assert!(matches!(
            chain.create(NewProperty::default()).unwrap_err(),
            Error::Store(_)
        ));
        assert!(chain.fallback().get_all().unwrap().is_empty());
    }

    #[test]
    fn test_query_helpers_work_through_chain() {
        let chain = chain_with_primary_down();
        let results = chain.search_by_location("austin").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 10);
    }
}
