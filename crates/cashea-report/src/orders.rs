use std::collections::BTreeMap;

use cashea_core::{MerchantIndexEntry, OrderIndexEntry};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::{Bucket, Buckets};

const TOP_CHANNELS: usize = 5;
const TOP_ACTIVE_CHANNELS: usize = 10;
const HOURS_PER_DAY: usize = 24;

/// Label used when an order carries no status or channel.
const UNKNOWN_LABEL: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_orders: usize,
    pub total_volume: f64,
    pub active_merchants: usize,
    pub avg_ticket: f64,
    pub cancelled_orders: usize,
}

/// Average ticket for one month, over non-cancelled orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AovPoint {
    /// `YYYY-MM`.
    pub month: String,
    /// Rounded to cents.
    pub aov: f64,
    /// Rounded to cents.
    pub volume: f64,
}

/// Approved vs cancelled amount for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalPoint {
    pub month: String,
    pub approved: f64,
    pub cancelled: f64,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(clippy::cast_precision_loss)]
fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

#[must_use]
pub fn kpis(merchants: &[MerchantIndexEntry], orders: &[OrderIndexEntry]) -> Kpis {
    let (cancelled, live): (Vec<&OrderIndexEntry>, Vec<&OrderIndexEntry>) =
        orders.iter().partition(|o| o.is_cancelled());
    let total_volume: f64 = live.iter().map(|o| o.amount).sum();

    Kpis {
        total_orders: orders.len(),
        total_volume,
        active_merchants: merchants.iter().filter(|m| m.enabled == Some(true)).count(),
        avg_ticket: average(total_volume, live.len()),
        cancelled_orders: cancelled.len(),
    }
}

/// Order count per status, descending.
#[must_use]
pub fn status_breakdown(orders: &[OrderIndexEntry]) -> Vec<Bucket> {
    let mut buckets = Buckets::default();
    for o in orders {
        buckets.add(o.status.as_deref().unwrap_or(UNKNOWN_LABEL), 1.0);
    }
    buckets.into_sorted()
}

/// Non-cancelled volume per channel, top five.
#[must_use]
pub fn channel_volume(orders: &[OrderIndexEntry]) -> Vec<Bucket> {
    let mut buckets = Buckets::default();
    for o in orders.iter().filter(|o| !o.is_cancelled()) {
        buckets.add(o.channel.as_deref().unwrap_or(UNKNOWN_LABEL), o.amount);
    }
    let mut sorted = buckets.into_sorted();
    sorted.truncate(TOP_CHANNELS);
    sorted
}

/// Non-cancelled order count per channel, top ten. Orders without a
/// channel are left out.
#[must_use]
pub fn channel_activity(orders: &[OrderIndexEntry]) -> Vec<Bucket> {
    let mut buckets = Buckets::default();
    for o in orders.iter().filter(|o| !o.is_cancelled()) {
        if let Some(channel) = o.channel.as_deref().filter(|c| !c.is_empty()) {
            buckets.add(channel, 1.0);
        }
    }
    let mut sorted = buckets.into_sorted();
    sorted.truncate(TOP_ACTIVE_CHANNELS);
    sorted
}

/// Wall-clock time of an order as written (no timezone conversion).
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` and a bare date,
/// which reads as midnight.
fn order_time(created_at: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(created_at)
        .map(|d| d.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| {
            NaiveDate::parse_from_str(created_at, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .ok()
}

fn order_month(o: &OrderIndexEntry) -> Option<String> {
    let time = o.created_at.as_deref().and_then(order_time)?;
    Some(time.format("%Y-%m").to_string())
}

/// Per-month average ticket and volume over non-cancelled orders, sorted by
/// month. A month with only cancelled orders has no point here.
///
/// Orders without a parseable `createdAt` are left out.
#[must_use]
pub fn aov_trend(orders: &[OrderIndexEntry]) -> Vec<AovPoint> {
    let mut months: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for o in orders.iter().filter(|o| !o.is_cancelled()) {
        let Some(month) = order_month(o) else {
            continue;
        };
        let acc = months.entry(month).or_default();
        acc.0 += o.amount;
        acc.1 += 1;
    }

    months
        .into_iter()
        .map(|(month, (volume, count))| AovPoint {
            month,
            aov: round_cents(average(volume, count)),
            volume: round_cents(volume),
        })
        .collect()
}

/// Per-month approved (non-cancelled) vs cancelled amount, sorted by month.
#[must_use]
pub fn approval_trend(orders: &[OrderIndexEntry]) -> Vec<ApprovalPoint> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for o in orders {
        let Some(month) = order_month(o) else {
            continue;
        };
        let acc = months.entry(month).or_default();
        if o.is_cancelled() {
            acc.1 += o.amount;
        } else {
            acc.0 += o.amount;
        }
    }

    months
        .into_iter()
        .map(|(month, (approved, cancelled))| ApprovalPoint {
            month,
            approved,
            cancelled,
        })
        .collect()
}

/// Order count per hour of day (`00:00` to `23:00`), all statuses included.
#[must_use]
pub fn hourly_activity(orders: &[OrderIndexEntry]) -> Vec<Bucket> {
    let mut counts = [0u32; HOURS_PER_DAY];
    for time in orders
        .iter()
        .filter_map(|o| o.created_at.as_deref().and_then(order_time))
    {
        counts[time.hour() as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| Bucket {
            name: format!("{hour:02}:00"),
            value: f64::from(count),
        })
        .collect()
}

const TICKET_RANGES: [(&str, f64); 4] = [
    ("< $50", 50.0),
    ("$50 - $100", 100.0),
    ("$100 - $300", 300.0),
    ("$300 - $500", 500.0),
];

const TICKET_OVERFLOW: &str = "> $500";

/// Non-cancelled order counts per ticket size range, in range order.
#[must_use]
pub fn ticket_sizes(orders: &[OrderIndexEntry]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = TICKET_RANGES
        .iter()
        .map(|(name, _)| *name)
        .chain(std::iter::once(TICKET_OVERFLOW))
        .map(|name| Bucket {
            name: name.to_string(),
            value: 0.0,
        })
        .collect();

    for o in orders.iter().filter(|o| !o.is_cancelled()) {
        let idx = TICKET_RANGES
            .iter()
            .position(|&(_, upper)| o.amount < upper)
            .unwrap_or(TICKET_RANGES.len());
        buckets[idx].value += 1.0;
    }
    buckets
}
