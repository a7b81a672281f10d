//! Great-circle distance
//!
//! Standard haversine over a spherical Earth (R = 6371 km), used by
//! the locations page to sort assemblies nearest-first when the
//! visitor shares coordinates.

use crate::models::ChurchLocation;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two (lat, lon) points in
/// degrees.
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Annotate locations with their distance from `origin` and sort
/// nearest-first. Entries without coordinates keep `distance_km =
/// None` and sink to the end, preserving their relative order.
pub fn sort_by_distance(locations: &mut Vec<ChurchLocation>, origin: (f64, f64)) {
    for location in locations.iter_mut() {
        location.distance_km = location.coordinates().map(|c| haversine_km(origin, c));
    }
    locations.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationKind;

    fn location(id: &str, coords: Option<(f64, f64)>) -> ChurchLocation {
        ChurchLocation {
            id: id.to_string(),
            kind: LocationKind::Assembly,
            name: id.to_string(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            address: None,
            leader_name: None,
            leader_phone: None,
            province: None,
            distance_km: None,
        }
    }

    #[test]
    fn test_identical_points_are_zero() {
        let p = (-25.9692, 32.5732); // Maputo
        assert!(haversine_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // Maputo to Beira, roughly 755 km as the crow flies.
        let maputo = (-25.9692, 32.5732);
        let beira = (-19.8436, 34.8389);
        let d = haversine_km(maputo, beira);
        assert!((d - 755.0).abs() < 20.0, "got {}", d);
    }

    #[test]
    fn test_sort_nearest_first_with_missing_coords() {
        let maputo = (-25.9692, 32.5732);
        let mut locations = vec![
            location("beira", Some((-19.8436, 34.8389))),
            location("no-coords", None),
            location("matola", Some((-25.9623, 32.4589))),
        ];

        sort_by_distance(&mut locations, maputo);

        let ids: Vec<&str> = locations.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["matola", "beira", "no-coords"]);
        assert!(locations[0].distance_km.unwrap() < locations[1].distance_km.unwrap());
        assert!(locations[2].distance_km.is_none());
    }
}
