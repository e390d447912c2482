//! Tests for map marker selection and region queries

use super::*;
use crate::app::services::station_lookup::geo::{
    BoundingBox, find_stations_in_region, map_markers,
};

fn located_feed() -> Vec<StationObservation> {
    vec![
        create_named_observation(1, "San Luis").with_location(-33.30, -66.34),
        create_named_observation(2, "Sin Coordenadas"),
        create_named_observation(3, "Cero").with_location(0.0, -66.0),
        create_named_observation(4, "Merlo").with_location(-32.34, -65.01),
        create_named_observation(5, "Fuera de Rango").with_location(-95.0, -65.0),
    ]
}

#[test]
fn test_map_markers_require_coordinates() {
    let stations = create_normalized_stations(&located_feed());
    let markers = map_markers(&stations);

    let names: Vec<&str> = markers.iter().map(|s| s.display_name.as_str()).collect();
    assert_eq!(names, vec!["San Luis", "Merlo"]);
}

#[test]
fn test_map_markers_empty() {
    assert!(map_markers(&[]).is_empty());
}

#[test]
fn test_bounding_box_parse() {
    let bbox: BoundingBox = "-34.0, -32.0, -67.0, -65.5".parse().unwrap();
    assert_eq!(bbox.min_lat, -34.0);
    assert_eq!(bbox.max_lon, -65.5);
    assert!(bbox.contains(-33.3, -66.3));
    assert!(!bbox.contains(-32.34, -65.01));

    assert!("1,2,3".parse::<BoundingBox>().is_err());
    assert!("a,b,c,d".parse::<BoundingBox>().is_err());
    assert!("2,1,3,4".parse::<BoundingBox>().is_err());
}

#[test]
fn test_find_stations_in_region() {
    let stations = create_ranked_stations(&located_feed());
    let bbox = BoundingBox::new(-34.0, -32.0, -67.0, -65.5).unwrap();

    let found = find_stations_in_region(&stations, &bbox);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_name, "San Luis");
}
