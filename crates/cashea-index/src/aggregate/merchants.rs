use cashea_core::{
    MerchantDocument, MerchantIndexEntry, RegionCatalog, StoreLocation, UNKNOWN_STATE,
};

/// Project merchants into index entries, geocoding each located store.
///
/// A merchant's `state` comes from its first located store only; later
/// stores never change it.
#[must_use]
pub fn aggregate_merchants(
    merchants: Vec<MerchantDocument>,
    catalog: &RegionCatalog,
) -> Vec<MerchantIndexEntry> {
    merchants
        .into_iter()
        .map(|m| merchant_entry(m, catalog))
        .collect()
}

fn merchant_entry(merchant: MerchantDocument, catalog: &RegionCatalog) -> MerchantIndexEntry {
    let locations: Vec<StoreLocation> = merchant
        .stores
        .unwrap_or_default()
        .into_iter()
        .filter_map(|store| {
            let address = store.address?;
            let (lat, lng) = address.coordinates()?;
            Some(StoreLocation {
                lat,
                lng,
                name: address.name,
                state: catalog.resolve_state(lat, lng).to_string(),
            })
        })
        .collect();

    let state = locations
        .first()
        .map_or_else(|| UNKNOWN_STATE.to_string(), |l| l.state.clone());

    MerchantIndexEntry {
        id: merchant.id,
        name: merchant.name,
        category: merchant.category,
        enabled: merchant.enabled,
        merchant_type: merchant.merchant_type,
        state,
        locations,
    }
}

#[cfg(test)]
mod tests {
    use cashea_core::{MerchantStore, Region, StoreAddress, OTHER_STATE};
    use serde_json::Value;

    use super::*;

    fn store_at(lat: Option<f64>, long: Option<f64>, name: &str) -> MerchantStore {
        MerchantStore {
            address: Some(StoreAddress {
                name: Some(name.to_string()),
                lat,
                long,
            }),
            ..MerchantStore::default()
        }
    }

    fn merchant(stores: Vec<MerchantStore>) -> MerchantDocument {
        MerchantDocument {
            id: Some(Value::from(1)),
            name: Some("Farmatodo".to_string()),
            category: Some("Salud".to_string()),
            enabled: Some(true),
            merchant_type: Some("SPLIT".to_string()),
            stores: Some(stores),
        }
    }

    #[test]
    fn state_comes_from_first_store() {
        let m = merchant(vec![
            store_at(Some(10.48), Some(-66.90), "Caracas"),
            store_at(Some(10.65), Some(-71.63), "Maracaibo"),
        ]);
        let entries = aggregate_merchants(vec![m], &RegionCatalog::venezuela());
        assert_eq!(entries[0].state, "Distrito Capital");
        assert_eq!(entries[0].locations.len(), 2);
        assert_eq!(entries[0].locations[1].state, "Zulia");
    }

    #[test]
    fn zero_coordinate_store_is_dropped() {
        let m = merchant(vec![
            store_at(Some(10.48), Some(-66.90), "Caracas"),
            store_at(Some(0.0), Some(0.0), "Null Island"),
        ]);
        let entries = aggregate_merchants(vec![m], &RegionCatalog::venezuela());
        assert_eq!(entries[0].state, "Distrito Capital");
        assert_eq!(entries[0].locations.len(), 1);
    }

    #[test]
    fn only_store_on_equator_is_unknown() {
        let m = merchant(vec![store_at(Some(0.0), Some(-66.90), "Equator")]);
        let entries = aggregate_merchants(vec![m], &RegionCatalog::venezuela());
        assert_eq!(entries[0].state, UNKNOWN_STATE);
        assert!(entries[0].locations.is_empty());
    }

    #[test]
    fn merchant_without_stores_is_unknown() {
        let mut m = merchant(vec![]);
        m.stores = None;
        let entries = aggregate_merchants(vec![m], &RegionCatalog::venezuela());
        assert_eq!(entries[0].state, UNKNOWN_STATE);
    }

    #[test]
    fn store_without_address_or_coordinate_is_skipped() {
        let m = merchant(vec![
            MerchantStore::default(),
            store_at(Some(10.48), None, "No longitude"),
            store_at(Some(10.65), Some(-71.63), "Maracaibo"),
        ]);
        let entries = aggregate_merchants(vec![m], &RegionCatalog::venezuela());
        assert_eq!(entries[0].state, "Zulia");
        assert_eq!(entries[0].locations.len(), 1);
        assert_eq!(entries[0].locations[0].name.as_deref(), Some("Maracaibo"));
    }

    #[test]
    fn coordinates_outside_catalog_are_other() {
        let m = merchant(vec![store_at(Some(40.71), Some(-74.0), "New York")]);
        let entries = aggregate_merchants(vec![m], &RegionCatalog::venezuela());
        assert_eq!(entries[0].state, OTHER_STATE);
    }

    #[test]
    fn uses_injected_catalog() {
        let catalog =
            RegionCatalog::new(vec![Region::new("Everywhere", -180.0, -90.0, 180.0, 90.0)]);
        let m = merchant(vec![store_at(Some(10.48), Some(-66.90), "Caracas")]);
        let entries = aggregate_merchants(vec![m], &catalog);
        assert_eq!(entries[0].state, "Everywhere");
    }

    #[test]
    fn preserves_order_and_passthrough_fields() {
        let mut a = merchant(vec![]);
        a.id = Some(Value::from(10));
        let mut b = merchant(vec![]);
        b.id = Some(Value::from("m-3"));
        b.enabled = Some(false);
        let entries = aggregate_merchants(vec![a, b], &RegionCatalog::venezuela());
        assert_eq!(entries[0].id, Some(Value::from(10)));
        assert_eq!(entries[1].id, Some(Value::from("m-3")));
        assert_eq!(entries[1].enabled, Some(false));
        assert_eq!(entries[1].merchant_type.as_deref(), Some("SPLIT"));
    }
}
