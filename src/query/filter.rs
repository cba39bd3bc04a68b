//! Filter and search predicates.
//!
//! Each criteria field contributes one independent predicate; a property
//! matches when every set field's predicate passes. Text search is a single
//! case-insensitive substring predicate over the listing's descriptive
//! fields. Both the browse flow and the search flow funnel through
//! [`matches_criteria`], keeping their result sets behaviorally identical.

use super::FilterCriteria;
use crate::model::Property;

/// Conjunction of per-field predicates. Absent fields impose no constraint.
pub fn matches_criteria(property: &Property, criteria: &FilterCriteria) -> bool {
    if let Some(min) = criteria.price_min {
        if property.price < min {
            return false;
        }
    }
    if let Some(max) = criteria.price_max {
        if property.price > max {
            return false;
        }
    }

    if !criteria.property_types.is_empty()
        && !criteria.property_types.contains(&property.property_type)
    {
        return false;
    }

    if let Some(bedrooms) = criteria.bedrooms {
        if !bedrooms.matches(f64::from(property.bedrooms)) {
            return false;
        }
    }
    if let Some(bathrooms) = criteria.bathrooms {
        if !bathrooms.matches(property.bathrooms) {
            return false;
        }
    }

    if let Some(location) = criteria.location.as_deref() {
        let needle = location.trim().to_lowercase();
        if !needle.is_empty() && !matches_location(property, &needle) {
            return false;
        }
    }

    true
}

/// Case-insensitive substring match against city OR state OR neighborhood.
fn matches_location(property: &Property, needle: &str) -> bool {
    let loc = &property.location;
    loc.city.to_lowercase().contains(needle)
        || loc.state.to_lowercase().contains(needle)
        || loc
            .neighborhood
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(needle))
}

/// Free-text search predicate: case-insensitive substring match against any
/// of title, description, city, state, neighborhood, property type, or any
/// single feature tag. A blank query matches everything.
pub fn matches_query(property: &Property, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    property.title.to_lowercase().contains(&needle)
        || property.description.to_lowercase().contains(&needle)
        || matches_location(property, &needle)
        || property
            .property_type
            .as_str()
            .to_lowercase()
            .contains(&needle)
        || property
            .features
            .iter()
            .any(|f| f.to_lowercase().contains(&needle))
}

/// Narrow a collection by the active criteria, preserving input order.
pub fn filter_properties(properties: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| matches_criteria(p, criteria))
        .cloned()
        .collect()
}

/// Combined search: text match AND criteria match, preserving input order.
pub fn search_properties(
    properties: &[Property],
    query: &str,
    criteria: &FilterCriteria,
) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| matches_query(p, query) && matches_criteria(p, criteria))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyType;
    use crate::query::CountFilter;
    use crate::test_utils::{listing_set, sample_property};

    #[test]
    fn test_empty_criteria_is_identity() {
        let properties = listing_set();
        let filtered = filter_properties(&properties, &FilterCriteria::default());
        assert_eq!(filtered, properties);
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let p = sample_property(1); // price 250_000

        let at_price = FilterCriteria {
            price_min: Some(p.price),
            ..Default::default()
        };
        assert_eq!(filter_properties(&[p.clone()], &at_price).len(), 1);

        let above_price = FilterCriteria {
            price_min: Some(p.price + 1.0),
            ..Default::default()
        };
        assert!(filter_properties(&[p.clone()], &above_price).is_empty());

        let max_at_price = FilterCriteria {
            price_max: Some(p.price),
            ..Default::default()
        };
        assert_eq!(filter_properties(&[p.clone()], &max_at_price).len(), 1);

        let below_price = FilterCriteria {
            price_max: Some(p.price - 1.0),
            ..Default::default()
        };
        assert!(filter_properties(&[p], &below_price).is_empty());
    }

    #[test]
    fn test_price_range_band() {
        let criteria = FilterCriteria {
            price_min: Some(200_000.0),
            price_max: Some(300_000.0),
            ..Default::default()
        };
        let ids: Vec<u32> = filter_properties(&listing_set(), &criteria)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_property_type_set_membership() {
        let criteria = FilterCriteria {
            property_types: vec![PropertyType::Condo, PropertyType::Townhouse],
            ..Default::default()
        };
        let ids: Vec<u32> = filter_properties(&listing_set(), &criteria)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_bedrooms_exact_and_five_plus() {
        let properties = listing_set();

        let exact = FilterCriteria {
            bedrooms: Some(CountFilter::Exactly(2)),
            ..Default::default()
        };
        let ids: Vec<u32> = filter_properties(&properties, &exact)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1]);

        let five_plus = FilterCriteria {
            bedrooms: Some(CountFilter::AtLeastFive),
            ..Default::default()
        };
        let ids: Vec<u32> = filter_properties(&properties, &five_plus)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_bathrooms_fractional() {
        let criteria = FilterCriteria {
            bathrooms: Some(CountFilter::Exactly(1)),
            ..Default::default()
        };
        let ids: Vec<u32> = filter_properties(&listing_set(), &criteria)
            .iter()
            .map(|p| p.id)
            .collect();
        // 2.5 and 4.5 baths do not match an exact count of 1
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_location_matches_any_of_city_state_neighborhood() {
        let properties = listing_set();

        let by_city = FilterCriteria {
            location: Some("portland".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_properties(&properties, &by_city)[0].id, 1);

        let by_state = FilterCriteria {
            location: Some("wa".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_properties(&properties, &by_state)[0].id, 3);

        let by_neighborhood = FilterCriteria {
            location: Some("pearl".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_properties(&properties, &by_neighborhood)[0].id, 1);

        let no_match = FilterCriteria {
            location: Some("Boston".to_string()),
            ..Default::default()
        };
        assert!(filter_properties(&properties, &no_match).is_empty());
    }

    #[test]
    fn test_predicates_compose_as_conjunction() {
        let criteria = FilterCriteria {
            price_min: Some(200_000.0),
            bedrooms: Some(CountFilter::AtLeastFive),
            location: Some("austin".to_string()),
            ..Default::default()
        };
        let ids: Vec<u32> = filter_properties(&listing_set(), &criteria)
            .iter()
            .map(|p| p.id)
            .collect();
        // id 3 has 5 beds but is in Seattle; only id 4 passes all three
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_text_search_fields() {
        let properties = listing_set();

        // Title
        assert_eq!(search_properties(&properties, "Listing 2", &FilterCriteria::default())[0].id, 2);
        // Description (shared by all fixtures)
        assert_eq!(
            search_properties(&properties, "fine home", &FilterCriteria::default()).len(),
            4
        );
        // Property type
        assert_eq!(search_properties(&properties, "townhouse", &FilterCriteria::default())[0].id, 3);
        // Feature tag
        assert_eq!(search_properties(&properties, "solar", &FilterCriteria::default())[0].id, 4);
        // City
        assert_eq!(search_properties(&properties, "seattle", &FilterCriteria::default())[0].id, 3);
    }

    #[test]
    fn test_search_composes_with_filters() {
        let properties = listing_set();

        // Blank query with a five-plus bedroom filter on a 2/4-bed pair
        let small = vec![
            {
                let mut p = sample_property(1);
                p.price = 100_000.0;
                p.bedrooms = 2;
                p
            },
            {
                let mut p = sample_property(2);
                p.price = 250_000.0;
                p.bedrooms = 4;
                p
            },
        ];
        let five_plus = FilterCriteria {
            bedrooms: Some(CountFilter::AtLeastFive),
            ..Default::default()
        };
        assert!(search_properties(&small, "", &five_plus).is_empty());

        // Text matches ids 1-4, filter narrows to the Seattle townhouse
        let criteria = FilterCriteria {
            location: Some("seattle".to_string()),
            ..Default::default()
        };
        let results = search_properties(&properties, "fine home", &criteria);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 3);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let properties = listing_set();
        let before = properties.clone();
        let criteria = FilterCriteria {
            price_min: Some(999_999_999.0),
            ..Default::default()
        };
        let _ = filter_properties(&properties, &criteria);
        let _ = search_properties(&properties, "anything", &criteria);
        assert_eq!(properties, before);
    }
}
