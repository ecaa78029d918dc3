//! Dashboard and analytics rollups computed from the index files.
//!
//! Everything here is a pure function of the merchants and orders indexes.
//! Amounts only count toward volume when the order is not cancelled.

mod clients;
mod orders;

use cashea_core::{MerchantIndexEntry, OrderIndexEntry};
use serde::Serialize;

pub use clients::{purchase_frequency, top_clients, ClientSummary};
pub use orders::{
    approval_trend, aov_trend, channel_activity, channel_volume, hourly_activity, kpis,
    status_breakdown, ticket_sizes, AovPoint, ApprovalPoint, Kpis,
};

/// A label with a count, used for every breakdown in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kpis: Kpis,
    pub status_breakdown: Vec<Bucket>,
    pub channel_volume: Vec<Bucket>,
    pub channel_activity: Vec<Bucket>,
    pub aov_trend: Vec<AovPoint>,
    pub approval_trend: Vec<ApprovalPoint>,
    pub hourly_activity: Vec<Bucket>,
    pub ticket_sizes: Vec<Bucket>,
    pub top_clients: Vec<ClientSummary>,
    pub purchase_frequency: Vec<Bucket>,
    pub merchants_by_state: Vec<Bucket>,
}

/// Build the full report.
#[must_use]
pub fn build_report(merchants: &[MerchantIndexEntry], orders: &[OrderIndexEntry]) -> Report {
    Report {
        kpis: kpis(merchants, orders),
        status_breakdown: status_breakdown(orders),
        channel_volume: channel_volume(orders),
        channel_activity: channel_activity(orders),
        aov_trend: aov_trend(orders),
        approval_trend: approval_trend(orders),
        hourly_activity: hourly_activity(orders),
        ticket_sizes: ticket_sizes(orders),
        top_clients: top_clients(orders),
        purchase_frequency: purchase_frequency(orders),
        merchants_by_state: merchants_by_state(merchants),
    }
}

/// Merchant count per resolved state, descending.
#[must_use]
pub fn merchants_by_state(merchants: &[MerchantIndexEntry]) -> Vec<Bucket> {
    let mut buckets = Buckets::default();
    for m in merchants {
        buckets.add(&m.state, 1.0);
    }
    buckets.into_sorted()
}

/// Accumulates values per name, keeping first-seen order for ties.
#[derive(Debug, Default)]
pub(crate) struct Buckets {
    entries: Vec<Bucket>,
}

impl Buckets {
    pub(crate) fn add(&mut self, name: &str, value: f64) {
        if let Some(bucket) = self.entries.iter_mut().find(|b| b.name == name) {
            bucket.value += value;
        } else {
            self.entries.push(Bucket {
                name: name.to_string(),
                value,
            });
        }
    }

    pub(crate) fn into_sorted(self) -> Vec<Bucket> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        entries
    }
}


#[cfg(test)]
mod tests {
    use cashea_core::MerchantIndexEntry;

    use super::*;

    fn merchant(state: &str) -> MerchantIndexEntry {
        MerchantIndexEntry {
            id: Some(serde_json::Value::from(1)),
            name: None,
            category: None,
            enabled: Some(true),
            merchant_type: None,
            state: state.to_string(),
            locations: vec![],
        }
    }

    #[test]
    fn merchants_by_state_counts_descending() {
        let merchants = vec![
            merchant("Zulia"),
            merchant("Distrito Capital"),
            merchant("Distrito Capital"),
        ];
        let buckets = merchants_by_state(&merchants);
        assert_eq!(buckets[0].name, "Distrito Capital");
        assert!((buckets[0].value - 2.0).abs() < f64::EPSILON);
        assert_eq!(buckets[1].name, "Zulia");
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = build_report(&[merchant("Lara")], &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("statusBreakdown").is_some());
        assert!(json.get("merchantsByState").is_some());
        assert!(json.get("channelActivity").is_some());
        assert!(json.get("aovTrend").is_some());
        assert!(json.get("approvalTrend").is_some());
        assert_eq!(json["hourlyActivity"].as_array().map(Vec::len), Some(24));
        assert_eq!(json["kpis"]["activeMerchants"], 1);
    }
}
