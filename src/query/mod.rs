//! # Query Engine
//!
//! Pure, stateless functions over property collections. Nothing in this
//! module touches storage or mutates its inputs; callers hand in a slice and
//! get back fresh vectors.
//!
//! ## Composition Rules
//!
//! - Field filters compose as a conjunction: a property must satisfy every
//!   set criteria field. Absent fields impose no constraint.
//! - Text search composes with field filters by AND: a search result set is
//!   always additionally narrowed by active filters. The browse flow
//!   (filter only) and the search flow (text + filter) share the exact same
//!   predicates, so the two can never produce divergent result sets for the
//!   same criteria.
//!
//! ## Modules
//!
//! - [`filter`]: per-field predicates, text matching, and the combined
//!   filter/search entry points
//! - [`sort`]: stable comparators selected by [`sort::SortKey`]
//! - [`page`]: the incremental "load more" window layered on engine output

pub mod filter;
pub mod page;
pub mod sort;

pub use filter::{filter_properties, matches_criteria, matches_query, search_properties};
pub use page::Page;
pub use sort::{sort_properties, SortKey};

use crate::model::PropertyType;

/// Bedroom/bathroom count constraint. The UI offers exact counts plus a
/// `"5+"` bucket for anything with five or more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountFilter {
    Exactly(u32),
    AtLeastFive,
}

impl CountFilter {
    /// Parse UI input. Malformed text is coerced to `None` (no constraint)
    /// rather than rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == "5+" {
            return Some(CountFilter::AtLeastFive);
        }
        text.parse::<u32>().ok().map(CountFilter::Exactly)
    }

    pub fn matches(&self, count: f64) -> bool {
        match self {
            CountFilter::Exactly(n) => count == f64::from(*n),
            CountFilter::AtLeastFive => count >= 5.0,
        }
    }
}

/// The active set of filter constraints. Transient and UI-scoped: there is
/// no persistence, and `clear()` returns every field to absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Empty set means no type restriction.
    pub property_types: Vec<PropertyType>,
    pub bedrooms: Option<CountFilter>,
    pub bathrooms: Option<CountFilter>,
    /// Free-text substring match against city, state, or neighborhood.
    pub location: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.price_min.is_none()
            && self.price_max.is_none()
            && self.property_types.is_empty()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && !self
                .location
                .as_deref()
                .is_some_and(|l| !l.trim().is_empty())
    }

    /// Reset every field to all-absent.
    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_filter_parse() {
        assert_eq!(CountFilter::parse("3"), Some(CountFilter::Exactly(3)));
        assert_eq!(CountFilter::parse("5+"), Some(CountFilter::AtLeastFive));
        assert_eq!(CountFilter::parse(" 2 "), Some(CountFilter::Exactly(2)));
        // Malformed input is coerced to no-constraint, never an error
        assert_eq!(CountFilter::parse("many"), None);
        assert_eq!(CountFilter::parse("-1"), None);
        assert_eq!(CountFilter::parse(""), None);
    }

    #[test]
    fn test_count_filter_matches() {
        assert!(CountFilter::Exactly(2).matches(2.0));
        assert!(!CountFilter::Exactly(2).matches(2.5));
        assert!(CountFilter::AtLeastFive.matches(5.0));
        assert!(CountFilter::AtLeastFive.matches(7.5));
        assert!(!CountFilter::AtLeastFive.matches(4.5));
    }

    #[test]
    fn test_criteria_is_empty() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.is_empty());

        // Whitespace-only location still counts as empty
        criteria.location = Some("   ".to_string());
        assert!(criteria.is_empty());

        criteria.location = Some("Austin".to_string());
        assert!(!criteria.is_empty());

        criteria.clear();
        assert!(criteria.is_empty());
        assert_eq!(criteria, FilterCriteria::default());
    }
}
