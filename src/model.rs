//! # Domain Model: Listings and Their Wire Shapes
//!
//! This module defines the core data structures for propertyhub: [`Property`],
//! [`Location`], [`PropertyType`], and [`Favorite`], plus the explicit wire
//! shapes used by the remote record API ([`PropertyDto`], [`RecordEnvelope`]).
//!
//! ## Identity
//!
//! A property's `id` is its sole identity key. It is assigned at creation as
//! `max(existing ids) + 1` (1 for an empty collection), never derived from
//! content, and never reused within a store's lifetime unless the record
//! holding it is deleted first. Favoriting and comparison key on `id` alone.
//!
//! ## Sale vs. Lease
//!
//! There is no discriminant field for lease listings. A present, positive
//! `lease_amount` classifies a listing as "for lease" in display logic; see
//! [`Property::is_for_lease`].
//!
//! ## Wire Boundary
//!
//! Remote records arrive as loosely-typed JSON. Rather than trusting that
//! shape, [`PropertyDto`] deserializes it with every field optional and
//! [`PropertyDto::into_domain`] validates it into a [`Property`], rejecting
//! records that lack an id, title, price, or a usable location. Responses are
//! wrapped in [`RecordEnvelope`] (`{success, data, message}`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Unique integer identifier for a property. Immutable once assigned.
pub type PropertyId = u32;

/// Structured location value. Only `city` and `state` are required; they are
/// the fields the location filter matches against (plus `neighborhood`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
}

/// Open enumeration of listing types. Unrecognized strings are preserved
/// rather than rejected, so a remote collection can grow new types without
/// breaking older clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    House,
    Condo,
    Townhouse,
    Apartment,
    Land,
    Other(String),
}

impl From<String> for PropertyType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "house" => PropertyType::House,
            "condo" => PropertyType::Condo,
            "townhouse" => PropertyType::Townhouse,
            "apartment" => PropertyType::Apartment,
            "land" => PropertyType::Land,
            _ => PropertyType::Other(s),
        }
    }
}

impl From<PropertyType> for String {
    fn from(t: PropertyType) -> Self {
        t.as_str().to_string()
    }
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Apartment => "Apartment",
            PropertyType::Land => "Land",
            PropertyType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing available for sale or lease.
///
/// Serializes in the same camelCase shape the offline snapshot slot and the
/// favorites slot have always used, so persisted state from earlier builds
/// loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Monthly lease amount. Present and positive means "for lease".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_amount: Option<f64>,
    pub location: Location,
    pub bedrooms: u32,
    /// Bathrooms may be fractional (half baths).
    pub bathrooms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u32>,
    pub property_type: PropertyType,
    /// Ordered: the first image is the primary thumbnail.
    #[serde(default)]
    pub images: Vec<String>,
    /// Unordered descriptive tags.
    #[serde(default)]
    pub features: Vec<String>,
    /// ISO date text, parsed leniently where needed (see `listing_timestamp`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<String>,
    /// Present only for lease listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_end_date: Option<String>,
}

impl Property {
    /// A present, positive lease amount reclassifies the listing as "for
    /// lease" in display logic.
    pub fn is_for_lease(&self) -> bool {
        matches!(self.lease_amount, Some(amount) if amount > 0.0)
    }

    /// Parse `listing_date` into a concrete timestamp.
    ///
    /// Accepts RFC 3339 or a bare `YYYY-MM-DD`. Returns `None` for missing
    /// or unparsable text; the "newest" sort treats those as oldest.
    pub fn listing_timestamp(&self) -> Option<DateTime<Utc>> {
        self.listing_date.as_deref().and_then(parse_date)
    }

    /// Days until the lease ends, negative when already expired.
    /// `None` when there is no (parsable) lease end date.
    pub fn lease_days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        let end = self.lease_end_date.as_deref().and_then(parse_date)?;
        Some((end - now).num_days())
    }
}

/// Lenient date parsing shared by listing and lease dates.
pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// A user-saved snapshot of a property.
///
/// Favorites store the full property copy, not a live reference: later edits
/// to the source record do not propagate here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(flatten)]
    pub property: Property,
    #[serde(rename = "favoriteDate")]
    pub favorite_date: DateTime<Utc>,
}

impl Favorite {
    pub fn new(property: Property, favorite_date: DateTime<Utc>) -> Self {
        Self {
            property,
            favorite_date,
        }
    }

    pub fn id(&self) -> PropertyId {
        self.property.id
    }
}

/// Input for creating a property: everything but the store-assigned `id`
/// and `listing_date`.
#[derive(Debug, Clone, Default)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub lease_amount: Option<f64>,
    pub location: Location,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_feet: Option<u32>,
    pub property_type: Option<PropertyType>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub year_built: Option<u32>,
    pub lot_size: Option<f64>,
    pub parking: Option<String>,
    pub lease_end_date: Option<String>,
}

impl NewProperty {
    /// Materialize into a stored record with the given id and listing stamp.
    pub fn into_property(self, id: PropertyId, listing_date: DateTime<Utc>) -> Property {
        Property {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            lease_amount: self.lease_amount,
            location: self.location,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            property_type: self.property_type.unwrap_or(PropertyType::House),
            images: self.images,
            features: self.features,
            listing_date: Some(listing_date.to_rfc3339()),
            year_built: self.year_built,
            lot_size: self.lot_size,
            parking: self.parking,
            lease_end_date: self.lease_end_date,
        }
    }
}

/// Partial update merged into an existing record. Only set fields overwrite;
/// `location` replaces as a unit.
#[derive(Debug, Clone, Default)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub lease_amount: Option<f64>,
    pub location: Option<Location>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<u32>,
    pub property_type: Option<PropertyType>,
    pub images: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub year_built: Option<u32>,
    pub lot_size: Option<f64>,
    pub parking: Option<String>,
    pub lease_end_date: Option<String>,
}

impl PropertyPatch {
    pub fn apply_to(&self, property: &mut Property) {
        if let Some(v) = &self.title {
            property.title = v.clone();
        }
        if let Some(v) = &self.description {
            property.description = v.clone();
        }
        if let Some(v) = self.price {
            property.price = v;
        }
        if let Some(v) = self.lease_amount {
            property.lease_amount = Some(v);
        }
        if let Some(v) = &self.location {
            property.location = v.clone();
        }
        if let Some(v) = self.bedrooms {
            property.bedrooms = v;
        }
        if let Some(v) = self.bathrooms {
            property.bathrooms = v;
        }
        if let Some(v) = self.square_feet {
            property.square_feet = Some(v);
        }
        if let Some(v) = &self.property_type {
            property.property_type = v.clone();
        }
        if let Some(v) = &self.images {
            property.images = v.clone();
        }
        if let Some(v) = &self.features {
            property.features = v.clone();
        }
        if let Some(v) = self.year_built {
            property.year_built = Some(v);
        }
        if let Some(v) = self.lot_size {
            property.lot_size = Some(v);
        }
        if let Some(v) = &self.parking {
            property.parking = Some(v.clone());
        }
        if let Some(v) = &self.lease_end_date {
            property.lease_end_date = Some(v.clone());
        }
    }
}

// --- Remote wire shapes ---

/// Response envelope returned by the remote record interface.
/// `success: false` is treated identically to a transport error.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEnvelope<T> {
    pub success: bool,
    // Spelled out so the derive does not demand `T: Default`
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Raw remote record. Every field is optional at the wire level; validation
/// happens in [`PropertyDto::into_domain`], not at use sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    #[serde(default, alias = "Id")]
    pub id: Option<PropertyId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub lease_amount: Option<f64>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub square_feet: Option<u32>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub listing_date: Option<String>,
    #[serde(default)]
    pub year_built: Option<u32>,
    #[serde(default)]
    pub lot_size: Option<f64>,
    #[serde(default)]
    pub parking: Option<String>,
    #[serde(default)]
    pub lease_end_date: Option<String>,
}

impl PropertyDto {
    /// Validate a wire record into a domain [`Property`].
    ///
    /// Records without an id, title, price, or location are rejected with
    /// `Error::Store` naming the missing field, so a bad remote payload
    /// surfaces at the boundary instead of deep in the query engine.
    pub fn into_domain(self) -> Result<Property> {
        let id = self
            .id
            .ok_or_else(|| Error::Store("remote record missing id".to_string()))?;
        let title = self
            .title
            .ok_or_else(|| Error::Store(format!("remote record {} missing title", id)))?;
        let price = self
            .price
            .ok_or_else(|| Error::Store(format!("remote record {} missing price", id)))?;
        let location = self
            .location
            .ok_or_else(|| Error::Store(format!("remote record {} missing location", id)))?;

        Ok(Property {
            id,
            title,
            description: self.description.unwrap_or_default(),
            price,
            lease_amount: self.lease_amount,
            location,
            bedrooms: self.bedrooms.unwrap_or(0),
            bathrooms: self.bathrooms.unwrap_or(0.0),
            square_feet: self.square_feet,
            property_type: self
                .property_type
                .map(PropertyType::from)
                .unwrap_or(PropertyType::House),
            images: self.images,
            features: self.features,
            listing_date: self.listing_date,
            year_built: self.year_built,
            lot_size: self.lot_size,
            parking: self.parking,
            lease_end_date: self.lease_end_date,
        })
    }

    pub fn from_domain(property: &Property) -> Self {
        Self {
            id: Some(property.id),
            title: Some(property.title.clone()),
            description: Some(property.description.clone()),
            price: Some(property.price),
            lease_amount: property.lease_amount,
            location: Some(property.location.clone()),
            bedrooms: Some(property.bedrooms),
            bathrooms: Some(property.bathrooms),
            square_feet: property.square_feet,
            property_type: Some(property.property_type.to_string()),
            images: property.images.clone(),
            features: property.features.clone(),
            listing_date: property.listing_date.clone(),
            year_built: property.year_built,
            lot_size: property.lot_size,
            parking: property.parking.clone(),
            lease_end_date: property.lease_end_date.clone(),
        }
    }
}
