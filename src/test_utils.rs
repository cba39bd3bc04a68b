//! Shared fixtures for unit tests.

use crate::model::{Location, Property, PropertyId, PropertyType};

pub fn sample_property(id: PropertyId) -> Property {
    Property {
        id,
        title: format!("Listing {}", id),
        description: "A fine home".to_string(),
        price: 250_000.0,
        lease_amount: None,
        location: Location {
            address: Some("12 Elm St".to_string()),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: Some("78701".to_string()),
            neighborhood: Some("Downtown".to_string()),
        },
        bedrooms: 3,
        bathrooms: 2.0,
        square_feet: Some(1_800),
        property_type: PropertyType::House,
        images: vec!["https://example.com/1.jpg".to_string()],
        features: vec!["Garage".to_string()],
        listing_date: Some("2024-03-01T00:00:00Z".to_string()),
        year_built: Some(1998),
        lot_size: Some(0.25),
        parking: Some("2-car garage".to_string()),
        lease_end_date: None,
    }
}

/// A small mixed collection exercising price, type, bed/bath and location
/// spread. Ids are 1..=4.
pub fn listing_set() -> Vec<Property> {
    let mut a = sample_property(1);
    a.price = 100_000.0;
    a.bedrooms = 2;
    a.bathrooms = 1.0;
    a.property_type = PropertyType::Condo;
    a.location.city = "Portland".to_string();
    a.location.state = "OR".to_string();
    a.location.neighborhood = Some("Pearl District".to_string());
    a.listing_date = Some("2024-01-15T00:00:00Z".to_string());
    a.square_feet = Some(900);

    let mut b = sample_property(2);
    b.price = 250_000.0;
    b.bedrooms = 4;
    b.bathrooms = 2.5;
    b.property_type = PropertyType::House;
    b.listing_date = Some("2024-03-01T00:00:00Z".to_string());
    b.square_feet = Some(2_200);

    let mut c = sample_property(3);
    c.price = 250_000.0;
    c.bedrooms = 5;
    c.bathrooms = 5.0;
    c.property_type = PropertyType::Townhouse;
    c.location.city = "Seattle".to_string();
    c.location.state = "WA".to_string();
    c.location.neighborhood = None;
    c.listing_date = Some("2024-02-10T00:00:00Z".to_string());
    c.square_feet = None;

    let mut d = sample_property(4);
    d.price = 800_000.0;
    d.bedrooms = 6;
    d.bathrooms = 4.5;
    d.property_type = PropertyType::House;
    d.features = vec!["Pool".to_string(), "Solar Panels".to_string()];
    d.listing_date = Some("not a date".to_string());
    d.square_feet = Some(4_100);

    vec![a, b, c, d]
}
