//! In-memory property source.
//!
//! The mock/local end of the fallback chain, and the unit-test workhorse.
//! Uses `RefCell` for interior mutability since propertyhub is
//! single-threaded; this keeps read methods at `&self` without lock
//! overhead. Test hooks can simulate an outage (to exercise the fallback
//! decorator) or a write failure.

use std::cell::RefCell;

use crate::error::{Error, Result};
use crate::model::{
    Location, NewProperty, Property, PropertyId, PropertyPatch, PropertyType,
};
use crate::store::{create_in, PropertySource};

pub struct MemoryBackend {
    properties: RefCell<Vec<Property>>,
    simulate_unavailable: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            properties: RefCell::new(Vec::new()),
            simulate_unavailable: RefCell::new(false),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(properties: Vec<Property>) -> Self {
        let backend = Self::default();
        *backend.properties.borrow_mut() = properties;
        backend
    }

    /// Seeded with the built-in sample listings, the offline browsing set.
    pub fn with_sample_listings() -> Self {
        Self::with_properties(sample_listings())
    }

    /// Make every operation report `BackendUnavailable`, so tests can drive
    /// the fallback chain.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.simulate_unavailable.borrow_mut() = unavailable;
    }

    /// Make mutations fail with a store error (not an availability error).
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_available(&self) -> Result<()> {
        if *self.simulate_unavailable.borrow() {
            return Err(Error::BackendUnavailable("simulated outage".to_string()));
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(Error::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl PropertySource for MemoryBackend {
    fn get_all(&self) -> Result<Vec<Property>> {
        self.check_available()?;
        Ok(self.properties.borrow().clone())
    }

    fn get_by_id(&self, id: PropertyId) -> Result<Option<Property>> {
        self.check_available()?;
        Ok(self
            .properties
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    fn create(&mut self, draft: NewProperty) -> Result<Property> {
        self.check_available()?;
        self.check_writable()?;
        Ok(create_in(&mut self.properties.borrow_mut(), draft))
    }

    fn update(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<Property> {
        self.check_available()?;
        self.check_writable()?;
        let mut properties = self.properties.borrow_mut();
        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::NotFound(id))?;
        patch.apply_to(property);
        Ok(property.clone())
    }

    fn delete(&mut self, id: PropertyId) -> Result<Property> {
        self.check_available()?;
        self.check_writable()?;
        let mut properties = self.properties.borrow_mut();
        let index = properties
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::NotFound(id))?;
        Ok(properties.remove(index))
    }
}

/// The built-in sample collection, used when neither the remote API nor an
/// offline snapshot is reachable.
pub fn sample_listings() -> Vec<Property> {
    vec![
        Property {
            id: 1,
            title: "Modern Downtown Condo".to_string(),
            description: "Open-plan two bedroom with floor-to-ceiling windows and skyline views."
                .to_string(),
            price: 425_000.0,
            lease_amount: None,
            location: Location {
                address: Some("1200 Congress Ave".to_string()),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                zip_code: Some("78701".to_string()),
                neighborhood: Some("Downtown".to_string()),
            },
            bedrooms: 2,
            bathrooms: 2.0,
            square_feet: Some(1_150),
            property_type: PropertyType::Condo,
            images: vec![
                "https://images.example.com/listings/1/main.jpg".to_string(),
                "https://images.example.com/listings/1/kitchen.jpg".to_string(),
            ],
            features: vec![
                "Floor-to-ceiling windows".to_string(),
                "Concierge".to_string(),
                "Gym".to_string(),
            ],
            listing_date: Some("2024-02-18T00:00:00Z".to_string()),
            year_built: Some(2016),
            lot_size: None,
            parking: Some("1 reserved space".to_string()),
            lease_end_date: None,
        },
        Property {
            id: 2,
            title: "Craftsman Family Home".to_string(),
            description: "Restored four bedroom craftsman on a quiet tree-lined street."
                .to_string(),
            price: 689_000.0,
            lease_amount: None,
            location: Location {
                address: Some("415 Maple Dr".to_string()),
                city: "Portland".to_string(),
                state: "OR".to_string(),
                zip_code: Some("97214".to_string()),
                neighborhood: Some("Hawthorne".to_string()),
            },
            bedrooms: 4,
            bathrooms: 2.5,
            square_feet: Some(2_450),
            property_type: PropertyType::House,
            images: vec!["https://images.example.com/listings/2/main.jpg".to_string()],
            features: vec![
                "Original hardwood".to_string(),
                "Wraparound porch".to_string(),
                "Fenced yard".to_string(),
            ],
            listing_date: Some("2024-03-04T00:00:00Z".to_string()),
            year_built: Some(1921),
            lot_size: Some(0.18),
            parking: Some("Detached garage".to_string()),
            lease_end_date: None,
        },
        Property {
            id: 3,
            title: "Sunny Midtown Apartment".to_string(),
            description: "Bright one bedroom steps from the park, available furnished."
                .to_string(),
            price: 310_000.0,
            lease_amount: Some(1_950.0),
            location: Location {
                address: Some("88 Peachtree St NE".to_string()),
                city: "Atlanta".to_string(),
                state: "GA".to_string(),
                zip_code: Some("30303".to_string()),
                neighborhood: Some("Midtown".to_string()),
            },
            bedrooms: 1,
            bathrooms: 1.0,
            square_feet: Some(720),
            property_type: PropertyType::Apartment,
            images: vec!["https://images.example.com/listings/3/main.jpg".to_string()],
            features: vec!["Furnished".to_string(), "Rooftop deck".to_string()],
            listing_date: Some("2024-01-27T00:00:00Z".to_string()),
            year_built: Some(2008),
            lot_size: None,
            parking: Some("Street".to_string()),
            lease_end_date: Some("2025-06-30".to_string()),
        },
        Property {
            id: 4,
            title: "Lakeview Townhouse".to_string(),
            description: "Three-story townhouse with a private dock and lake access."
                .to_string(),
            price: 545_000.0,
            lease_amount: None,
            location: Location {
                address: Some("7 Shoreline Ct".to_string()),
                city: "Madison".to_string(),
                state: "WI".to_string(),
                zip_code: Some("53704".to_string()),
                neighborhood: Some("Lakeside".to_string()),
            },
            bedrooms: 3,
            bathrooms: 3.5,
            square_feet: Some(1_980),
            property_type: PropertyType::Townhouse,
            images: vec!["https://images.example.com/listings/4/main.jpg".to_string()],
            features: vec!["Private dock".to_string(), "Lake access".to_string()],
            listing_date: Some("2024-02-02T00:00:00Z".to_string()),
            year_built: Some(2001),
            lot_size: Some(0.05),
            parking: Some("Attached garage".to_string()),
            lease_end_date: None,
        },
        Property {
            id: 5,
            title: "Hillside Buildable Lot".to_string(),
            description: "Half-acre lot with utilities at the street and approved plans."
                .to_string(),
            price: 165_000.0,
            lease_amount: None,
            location: Location {
                address: None,
                city: "Asheville".to_string(),
                state: "NC".to_string(),
                zip_code: Some("28801".to_string()),
                neighborhood: None,
            },
            bedrooms: 0,
            bathrooms: 0.0,
            square_feet: None,
            property_type: PropertyType::Land,
            images: vec!["https://images.example.com/listings/5/main.jpg".to_string()],
            features: vec!["Utilities at street".to_string(), "Approved plans".to_string()],
            listing_date: Some("2023-12-12T00:00:00Z".to_string()),
            year_built: None,
            lot_size: Some(0.5),
            parking: None,
            lease_end_date: None,
        },
        Property {
            id: 6,
            title: "Garden District Rental".to_string(),
            description: "Five bedroom estate home leased through next spring.".to_string(),
            price: 1_150_000.0,
            lease_amount: Some(4_800.0),
            location: Location {
                address: Some("2301 Magnolia Blvd".to_string()),
                city: "New Orleans".to_string(),
                state: "LA".to_string(),
                zip_code: Some("70130".to_string()),
                neighborhood: Some("Garden District".to_string()),
            },
            bedrooms: 5,
            bathrooms: 4.5,
            square_feet: Some(4_300),
            property_type: PropertyType::House,
            images: vec!["https://images.example.com/listings/6/main.jpg".to_string()],
            features: vec![
                "Pool".to_string(),
                "Guest house".to_string(),
                "Mature gardens".to_string(),
            ],
            listing_date: Some("2024-03-09T00:00:00Z".to_string()),
            year_built: Some(1895),
            lot_size: Some(0.4),
            parking: Some("Carriage house".to_string()),
            lease_end_date: Some("2025-04-15".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{listing_set, sample_property};

    #[test]
    fn test_get_all_returns_defensive_copies() {
        let backend = MemoryBackend::with_properties(listing_set());
        let mut copy = backend.get_all().unwrap();
        copy[0].title = "Mutated".to_string();
        copy.clear();

        assert_eq!(backend.get_all().unwrap()[0].title, "Listing 1");
        assert_eq!(backend.get_all().unwrap().len(), 4);
    }

    #[test]
    fn test_get_by_id_missing_is_none_not_error() {
        let backend = MemoryBackend::with_properties(listing_set());
        assert!(backend.get_by_id(999).unwrap().is_none());
        assert_eq!(backend.get_by_id(2).unwrap().unwrap().id, 2);
    }

    #[test]
    fn test_create_assigns_max_plus_one() {
        let mut backend =
            MemoryBackend::with_properties(vec![sample_property(1), sample_property(3)]);
        let created = backend
            .create(NewProperty {
                title: "Gap filler".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(created.id, 4);
        assert!(created.listing_date.is_some());
        assert_eq!(backend.get_all().unwrap().len(), 3);
    }

    #[test]
    fn test_create_on_empty_collection_starts_at_one() {
        let mut backend = MemoryBackend::new();
        let created = backend.create(NewProperty::default()).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut backend = MemoryBackend::with_properties(listing_set());
        let err = backend.update(999, PropertyPatch::default()).unwrap_err();
        assert!(matches!(err, Error::NotFound(999)));
    }

    #[test]
    fn test_update_merges_fields() {
        let mut backend = MemoryBackend::with_properties(listing_set());
        let updated = backend
            .update(
                2,
                PropertyPatch {
                    price: Some(199_000.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, 199_000.0);
        assert_eq!(backend.get_by_id(2).unwrap().unwrap().price, 199_000.0);
    }

    #[test]
    fn test_delete_returns_removed_record() {
        let mut backend = MemoryBackend::with_properties(listing_set());
        let removed = backend.delete(3).unwrap();
        assert_eq!(removed.id, 3);
        assert!(backend.get_by_id(3).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_leaves_collection_unchanged() {
        let mut backend = MemoryBackend::with_properties(listing_set());
        let before = backend.get_all().unwrap();
        assert!(matches!(
            backend.delete(999).unwrap_err(),
            Error::NotFound(999)
        ));
        assert_eq!(backend.get_all().unwrap(), before);
    }

    #[test]
    fn test_unavailable_reports_backend_unavailable() {
        let backend = MemoryBackend::with_sample_listings();
        backend.set_unavailable(true);
        assert!(matches!(
            backend.get_all().unwrap_err(),
            Error::BackendUnavailable(_)
        ));
    }

    #[test]
    fn test_query_helpers_match_engine() {
        let backend = MemoryBackend::with_properties(listing_set());

        let by_location = backend.search_by_location("seattle").unwrap();
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location[0].id, 3);

        let in_band = backend
            .filter_by_price_range(Some(200_000.0), Some(300_000.0))
            .unwrap();
        assert_eq!(in_band.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);

        let condos = backend.filter_by_property_type(&PropertyType::Condo).unwrap();
        assert_eq!(condos[0].id, 1);
    }

    #[test]
    fn test_sample_listings_have_unique_ids() {
        let listings = sample_listings();
        let mut ids: Vec<_> = listings.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), listings.len());
        // At least one lease listing for the lease views
        assert!(listings.iter().any(|p| p.is_for_lease()));
    }
}
