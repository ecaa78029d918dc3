//! Coarse state lookup from coordinates.
//!
//! Each region is an axis-aligned lat/lng box. Boxes overlap, so lookup is a
//! first-match scan in catalog order rather than a containment test.

use serde::{Deserialize, Serialize};

/// Returned when a coordinate falls inside none of the catalog's boxes.
pub const OTHER_STATE: &str = "Otro";

/// Merchant state when none of its stores carries usable coordinates.
pub const UNKNOWN_STATE: &str = "Desconocido";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Region {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        min_lng: f64,
        min_lat: f64,
        max_lng: f64,
        max_lat: f64,
    ) -> Self {
        Self {
            name: name.into(),
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Inclusive on every edge.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lng >= self.min_lng && lat >= self.min_lat && lng <= self.max_lng && lat <= self.max_lat
    }
}

/// Ordered list of regions. Earlier entries win where boxes overlap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

/// `(name, [min_lng, min_lat, max_lng, max_lat])`.
///
/// Distrito Capital sits inside Miranda's box and must stay ahead of it.
const VENEZUELA: &[(&str, [f64; 4])] = &[
    ("Distrito Capital", [-67.0, 10.4, -66.8, 10.55]),
    ("Miranda", [-67.1, 10.0, -65.7, 10.6]),
    ("Aragua", [-67.9, 9.8, -66.9, 10.5]),
    ("Carabobo", [-68.4, 9.8, -67.7, 10.5]),
    ("Zulia", [-73.3, 8.3, -70.7, 11.9]),
    ("Lara", [-70.8, 9.4, -68.9, 10.7]),
    ("Falcón", [-71.3, 10.3, -68.2, 12.2]),
    ("Anzoátegui", [-65.8, 7.6, -62.4, 10.2]),
    ("Táchira", [-72.5, 7.3, -71.3, 8.6]),
    ("Mérida", [-72.0, 7.8, -70.4, 9.3]),
    ("Nueva Esparta", [-64.4, 10.8, -63.7, 11.1]),
    ("La Guaira", [-67.4, 10.5, -66.3, 10.7]),
    ("Yaracuy", [-69.2, 9.9, -68.3, 10.6]),
    ("Cojedes", [-68.9, 8.9, -67.9, 9.9]),
    ("Trujillo", [-71.0, 8.8, -70.1, 10.0]),
    ("Portuguesa", [-70.1, 8.4, -68.7, 9.8]),
    ("Barinas", [-71.6, 7.4, -68.6, 9.1]),
    ("Guárico", [-68.0, 7.6, -64.8, 10.0]),
    ("Sucre", [-64.6, 10.1, -61.8, 10.8]),
    ("Monagas", [-64.1, 8.4, -61.9, 10.3]),
    ("Apure", [-72.4, 6.1, -66.4, 8.1]),
    ("Delta Amacuro", [-62.6, 7.6, -59.8, 10.0]),
    ("Bolívar", [-67.5, 3.6, -60.7, 8.2]),
    ("Amazonas", [-68.2, 0.6, -63.4, 6.3]),
];

impl RegionCatalog {
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// The 24 federal entities of Venezuela.
    #[must_use]
    pub fn venezuela() -> Self {
        Self::new(
            VENEZUELA
                .iter()
                .map(|&(name, [min_lng, min_lat, max_lng, max_lat])| {
                    Region::new(name, min_lng, min_lat, max_lng, max_lat)
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Name of the first region containing the point, or [`OTHER_STATE`].
    #[must_use]
    pub fn resolve_state(&self, lat: f64, lng: f64) -> &str {
        self.regions
            .iter()
            .find(|r| r.contains(lat, lng))
            .map_or(OTHER_STATE, |r| r.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venezuela_catalog_has_24_entities() {
        let catalog = RegionCatalog::venezuela();
        assert_eq!(catalog.regions().len(), 24);
        assert_eq!(catalog.regions()[0].name, "Distrito Capital");
        assert_eq!(catalog.regions()[1].name, "Miranda");
    }

    #[test]
    fn nested_box_resolves_to_earlier_entry() {
        // Caracas lies inside both Distrito Capital and Miranda.
        let catalog = RegionCatalog::venezuela();
        assert!(catalog.regions()[1].contains(10.48, -66.90));
        assert_eq!(catalog.resolve_state(10.48, -66.90), "Distrito Capital");
    }

    #[test]
    fn point_in_single_box() {
        let catalog = RegionCatalog::venezuela();
        assert_eq!(catalog.resolve_state(10.65, -71.63), "Zulia");
        assert_eq!(catalog.resolve_state(11.0, -63.9), "Nueva Esparta");
        assert_eq!(catalog.resolve_state(10.07, -69.32), "Lara");
        assert_eq!(catalog.resolve_state(4.6, -61.1), "Bolívar");
    }

    #[test]
    fn point_outside_every_box_is_other() {
        let catalog = RegionCatalog::venezuela();
        assert_eq!(catalog.resolve_state(40.71, -74.0), OTHER_STATE);
        assert_eq!(catalog.resolve_state(0.0, 0.0), OTHER_STATE);
    }

    #[test]
    fn edges_are_inclusive() {
        let catalog = RegionCatalog::new(vec![Region::new("Box", -1.0, -1.0, 1.0, 1.0)]);
        assert_eq!(catalog.resolve_state(1.0, 1.0), "Box");
        assert_eq!(catalog.resolve_state(-1.0, -1.0), "Box");
        assert_eq!(catalog.resolve_state(1.000_1, 0.0), OTHER_STATE);
    }

    #[test]
    fn injected_catalog_order_decides_overlap() {
        let outer = Region::new("Outer", -10.0, -10.0, 10.0, 10.0);
        let inner = Region::new("Inner", -1.0, -1.0, 1.0, 1.0);
        let outer_first = RegionCatalog::new(vec![outer.clone(), inner.clone()]);
        let inner_first = RegionCatalog::new(vec![inner, outer]);
        assert_eq!(outer_first.resolve_state(0.5, 0.5), "Outer");
        assert_eq!(inner_first.resolve_state(0.5, 0.5), "Inner");
    }

    #[test]
    fn empty_catalog_always_other() {
        let catalog = RegionCatalog::default();
        assert_eq!(catalog.resolve_state(10.48, -66.90), OTHER_STATE);
    }
}
