//! Remote record API client.
//!
//! Talks to a field-listed record service over HTTP. Responses arrive as a
//! `{success, data, message}` envelope; `success: false` is treated exactly
//! like a transport error, so both collapse into
//! [`Error::BackendUnavailable`] and the fallback decorator takes over.
//! Wire records are validated into domain structs at this boundary.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{
    NewProperty, Property, PropertyDto, PropertyId, PropertyPatch, RecordEnvelope,
};
use crate::store::PropertySource;

const COLLECTION: &str = "properties";

pub struct RemoteBackend {
    client: Client,
    base_url: String,
}

impl RemoteBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, COLLECTION)
    }

    fn record_url(&self, id: PropertyId) -> String {
        format!("{}/{}/{}", self.base_url, COLLECTION, id)
    }

    fn unavailable(error: reqwest::Error) -> Error {
        Error::BackendUnavailable(error.to_string())
    }

    /// Unwrap an envelope, mapping `success: false` to `BackendUnavailable`.
    fn unwrap_envelope<T>(envelope: RecordEnvelope<T>) -> Result<T> {
        if !envelope.success {
            return Err(Error::BackendUnavailable(
                envelope
                    .message
                    .unwrap_or_else(|| "remote reported failure".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| Error::BackendUnavailable("remote response missing data".to_string()))
    }

    fn parse<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
        let envelope: RecordEnvelope<T> = response.json().map_err(Self::unavailable)?;
        Self::unwrap_envelope(envelope)
    }

    fn dto_from_new(draft: &NewProperty) -> PropertyDto {
        PropertyDto {
            id: None,
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            price: Some(draft.price),
            lease_amount: draft.lease_amount,
            location: Some(draft.location.clone()),
            bedrooms: Some(draft.bedrooms),
            bathrooms: Some(draft.bathrooms),
            square_feet: draft.square_feet,
            property_type: draft.property_type.as_ref().map(|t| t.to_string()),
            images: draft.images.clone(),
            features: draft.features.clone(),
            listing_date: None,
            year_built: draft.year_built,
            lot_size: draft.lot_size,
            parking: draft.parking.clone(),
            lease_end_date: draft.lease_end_date.clone(),
        }
    }

    /// Only fields set on the patch go over the wire.
    fn patch_body(patch: &PropertyPatch) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        let mut put = |key: &str, value: Option<serde_json::Value>| {
            if let Some(value) = value {
                body.insert(key.to_string(), value);
            }
        };
        put("title", patch.title.as_ref().map(|v| json!(v)));
        put("description", patch.description.as_ref().map(|v| json!(v)));
        put("price", patch.price.map(|v| json!(v)));
        put("leaseAmount", patch.lease_amount.map(|v| json!(v)));
        put("location", patch.location.as_ref().map(|v| json!(v)));
        put("bedrooms", patch.bedrooms.map(|v| json!(v)));
        put("bathrooms", patch.bathrooms.map(|v| json!(v)));
        put("squareFeet", patch.square_feet.map(|v| json!(v)));
        put(
            "propertyType",
            patch.property_type.as_ref().map(|v| json!(v.to_string())),
        );
        put("images", patch.images.as_ref().map(|v| json!(v)));
        put("features", patch.features.as_ref().map(|v| json!(v)));
        put("yearBuilt", patch.year_built.map(|v| json!(v)));
        put("lotSize", patch.lot_size.map(|v| json!(v)));
        put("parking", patch.parking.as_ref().map(|v| json!(v)));
        put(
            "leaseEndDate",
            patch.lease_end_date.as_ref().map(|v| json!(v)),
        );
        serde_json::Value::Object(body)
    }
}

impl PropertySource for RemoteBackend {
    fn get_all(&self) -> Result<Vec<Property>> {
        debug!(url = %self.collection_url(), "fetching property collection");
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .map_err(Self::unavailable)?;
        let dtos: Vec<PropertyDto> = Self::parse(response)?;
        dtos.into_iter().map(PropertyDto::into_domain).collect()
    }

    fn get_by_id(&self, id: PropertyId) -> Result<Option<Property>> {
        let response = self
            .client
            .get(self.record_url(id))
            .send()
            .map_err(Self::unavailable)?;
        // A missing record is an answer, not an outage
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let dto: PropertyDto = Self::parse(response)?;
        dto.into_domain().map(Some)
    }

    fn create(&mut self, draft: NewProperty) -> Result<Property> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&Self::dto_from_new(&draft))
            .send()
            .map_err(Self::unavailable)?;
        let dto: PropertyDto = Self::parse(response)?;
        dto.into_domain()
    }

    fn update(&mut self, id: PropertyId, patch: PropertyPatch) -> Result<Property> {
        let response = self
            .client
            .patch(self.record_url(id))
            .json(&Self::patch_body(&patch))
            .send()
            .map_err(Self::unavailable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(id));
        }
        let dto: PropertyDto = Self::parse(response)?;
        dto.into_domain()
    }

    fn delete(&mut self, id: PropertyId) -> Result<Property> {
        let response = self
            .client
            .delete(self.record_url(id))
            .send()
            .map_err(Self::unavailable)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(id));
        }
        let dto: PropertyDto = Self::parse(response)?;
        dto.into_domain()
    }
}
