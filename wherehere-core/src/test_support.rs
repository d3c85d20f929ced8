//! Fixture places shared by unit and behaviour tests across the workspace.

use crate::{Candidate, CrowdLevel, Location, PriceTier};

/// Gangnam Station, the query point used by the fixtures.
#[must_use]
pub fn gangnam_station() -> Location {
    place_location(37.4979, 127.0276)
}

/// Build a candidate positioned at `lat`/`lon`.
///
/// # Panics
/// Panics when the coordinates are out of range.
#[must_use]
pub fn place_at(id: &str, lat: f64, lon: f64) -> Candidate {
    let mut candidate = Candidate::new(id, id, 0.0);
    candidate.location = Some(place_location(lat, lon));
    candidate
}

#[expect(clippy::expect_used, reason = "fixture coordinates are authored in range")]
fn place_location(lat: f64, lon: f64) -> Location {
    Location::new(lat, lon).expect("fixture coordinates are valid")
}

/// A small neighbourhood around [`gangnam_station`].
///
/// Distances from the station run from a few metres up to roughly 2.5 km.
#[must_use]
pub fn gangnam_places() -> Vec<Candidate> {
    let mut quiet_cafe = place_at("quiet-cafe", 37.4985, 127.0301)
        .with_category("카페")
        .with_vibe("quiet")
        .with_vibe("cozy")
        .with_price(6_000);
    quiet_cafe.crowd_level = Some(CrowdLevel::Low);

    let mut gallery = place_at("hidden-gallery", 37.5001, 127.0262)
        .with_category("갤러리")
        .with_secondary("문화공간")
        .with_vibe("calm")
        .hidden_gem();
    gallery.price_tier = Some(PriceTier::Free);

    let pub_place = place_at("crowded-pub", 37.4990, 127.0290)
        .with_category("술집")
        .with_vibe("lively")
        .with_price(25_000);

    let park = place_at("riverside-park", 37.5172, 127.0473)
        .with_category("공원")
        .with_vibe("quiet")
        .with_vibe("calm");

    vec![quiet_cafe, gallery, pub_place, park]
}
