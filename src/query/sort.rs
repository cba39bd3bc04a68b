//! Sort comparators.
//!
//! Sorting is stable (equal keys keep their input order) and never mutates
//! the caller's sequence. The "newest" key parses `listing_date` leniently;
//! missing or unparsable dates sort as oldest.

use std::cmp::Ordering;

use crate::model::Property;

/// Selectable sort key. String forms match the UI's sort dropdown values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending by price.
    #[default]
    PriceLow,
    /// Descending by price.
    PriceHigh,
    /// Descending by listing date; undated listings last.
    Newest,
    /// Descending by bedroom count.
    Bedrooms,
    /// Descending by square footage; missing treated as 0.
    SquareFeet,
}

impl SortKey {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "price-low" => Some(SortKey::PriceLow),
            "price-high" => Some(SortKey::PriceHigh),
            "newest" => Some(SortKey::Newest),
            "bedrooms" => Some(SortKey::Bedrooms),
            "square-feet" => Some(SortKey::SquareFeet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
            SortKey::Bedrooms => "bedrooms",
            SortKey::SquareFeet => "square-feet",
        }
    }

    fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            SortKey::PriceLow => total_cmp(a.price, b.price),
            SortKey::PriceHigh => total_cmp(b.price, a.price),
            SortKey::Newest => {
                // None (missing or unparsable) sorts after every real date
                match (a.listing_timestamp(), b.listing_timestamp()) {
                    (Some(a_ts), Some(b_ts)) => b_ts.cmp(&a_ts),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
            SortKey::Bedrooms => b.bedrooms.cmp(&a.bedrooms),
            SortKey::SquareFeet => b.square_feet.unwrap_or(0).cmp(&a.square_feet.unwrap_or(0)),
        }
    }
}

// Prices are well-behaved finite values; NaN (which cannot come from our
// deserialization defaults) ties rather than poisoning the order.
fn total_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Return a sorted copy. The input slice is left untouched and equal keys
/// preserve their relative order.
pub fn sort_properties(properties: &[Property], key: SortKey) -> Vec<Property> {
    let mut sorted = properties.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}
