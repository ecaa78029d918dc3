use std::collections::BTreeMap;

use cashea_core::OrderIndexEntry;
use serde::Serialize;

use crate::Bucket;

const TOP_CLIENTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub identifier_number: i64,
    pub name: String,
    pub volume: f64,
    pub orders_count: usize,
}

/// Roll up non-cancelled orders per customer, keyed by identifier.
///
/// Orders with no identifier (or identifier 0) are not attributable and are
/// skipped. The name is taken from the first order seen for the customer.
fn client_rollup(orders: &[OrderIndexEntry]) -> BTreeMap<i64, ClientSummary> {
    let mut clients: BTreeMap<i64, ClientSummary> = BTreeMap::new();
    for o in orders.iter().filter(|o| !o.is_cancelled()) {
        let Some(id) = o.identifier_number.filter(|&id| id != 0) else {
            continue;
        };
        let summary = clients.entry(id).or_insert_with(|| ClientSummary {
            identifier_number: id,
            name: o
                .customer_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Cliente {id}")),
            volume: 0.0,
            orders_count: 0,
        });
        summary.volume += o.amount;
        summary.orders_count += 1;
    }
    clients
}

/// The ten customers with the highest non-cancelled volume.
#[must_use]
pub fn top_clients(orders: &[OrderIndexEntry]) -> Vec<ClientSummary> {
    let mut clients: Vec<ClientSummary> = client_rollup(orders).into_values().collect();
    clients.sort_by(|a, b| b.volume.total_cmp(&a.volume));
    clients.truncate(TOP_CLIENTS);
    clients
}

/// How many customers bought once, twice, three times, or more.
#[must_use]
pub fn purchase_frequency(orders: &[OrderIndexEntry]) -> Vec<Bucket> {
    let mut counts = [0.0_f64; 4];
    for summary in client_rollup(orders).values() {
        let idx = summary.orders_count.clamp(1, 4) - 1;
        counts[idx] += 1.0;
    }
    ["1 compra", "2 compras", "3 compras", "4+ compras"]
        .into_iter()
        .zip(counts)
        .map(|(name, value)| Bucket {
            name: name.to_string(),
            value,
        })
        .collect()
}
