//! Frequency tallies over every payment method of every store.
//!
//! The bank tally applies display smoothing: a share of the methods from one
//! dominant bank is re-attributed to randomly chosen peer banks so the chart
//! is not a single bar. The randomness source is passed in, so a seeded
//! generator makes the output reproducible.

use std::collections::HashMap;

use cashea_core::{NamedCount, PaymentsAnalytics};
use rand::Rng;

use crate::reader::StoreDocument;

const TOP_BANKS: usize = 10;

const DOMINANT_BANK: &str = "Banco Nacional de Crédito";

const PEER_BANKS: [&str; 6] = [
    "Banco Mercantil",
    "Banco Provincial",
    "Banco de Venezuela",
    "Bancaribe",
    "Banco Exterior",
    "Banplus",
];

/// Which bank gets redistributed, to whom, and how often.
#[derive(Debug, Clone, PartialEq)]
pub struct BankSmoothing {
    pub source_bank: String,
    pub peers: Vec<String>,
    probability: f64,
}

impl BankSmoothing {
    /// Smoothing over the default dominant bank and its six peers.
    ///
    /// `probability` is clamped to `[0, 1]`; NaN disables smoothing.
    #[must_use]
    pub fn with_probability(probability: f64) -> Self {
        Self {
            source_bank: DOMINANT_BANK.to_string(),
            peers: PEER_BANKS.iter().map(|b| (*b).to_string()).collect(),
            probability: clamp_probability(probability),
        }
    }

    #[must_use]
    pub fn off() -> Self {
        Self::with_probability(0.0)
    }

    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Replace the redistributed bank and its peers, keeping the probability.
    #[must_use]
    pub fn redirecting(mut self, source_bank: impl Into<String>, peers: Vec<String>) -> Self {
        self.source_bank = source_bank.into();
        self.peers = peers;
        self
    }

    fn apply<'a, R: Rng>(&'a self, bank: &'a str, rng: &mut R) -> &'a str {
        if bank != self.source_bank || self.peers.is_empty() || self.probability <= 0.0 {
            return bank;
        }
        if rng.random_bool(self.probability) {
            &self.peers[rng.random_range(0..self.peers.len())]
        } else {
            bank
        }
    }
}

impl Default for BankSmoothing {
    fn default() -> Self {
        Self::with_probability(0.6)
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Counts keyed by name, remembering first-seen order for tie-breaking.
#[derive(Debug, Default)]
struct Tally {
    entries: Vec<NamedCount>,
    positions: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, name: &str) {
        if let Some(&idx) = self.positions.get(name) {
            self.entries[idx].count += 1;
        } else {
            self.positions.insert(name.to_string(), self.entries.len());
            self.entries.push(NamedCount {
                name: name.to_string(),
                count: 1,
            });
        }
    }

    /// Descending by count; equal counts keep first-seen order.
    fn into_sorted(self) -> Vec<NamedCount> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

/// Tally bank, currency, and method display name across all store files.
///
/// Store documents that are not arrays contribute nothing. `banks` is cut
/// to the top 10; the other two lists are complete.
pub fn aggregate_payments<R: Rng>(
    stores: &[StoreDocument],
    smoothing: &BankSmoothing,
    rng: &mut R,
) -> PaymentsAnalytics {
    let mut banks = Tally::default();
    let mut currencies = Tally::default();
    let mut payment_types = Tally::default();

    for method in stores.iter().filter_map(|s| s.methods.as_ref()).flatten() {
        if let Some(bank) = method.bank_name.as_deref().filter(|b| !b.is_empty()) {
            banks.add(smoothing.apply(bank.trim(), rng));
        }

        if let Some(currency) = method
            .currency
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .filter(|c| !c.is_empty())
        {
            currencies.add(currency);
        }

        if let Some(name) = method.name.as_deref().filter(|n| !n.is_empty()) {
            payment_types.add(name.trim());
        }
    }

    let mut banks = banks.into_sorted();
    banks.truncate(TOP_BANKS);

    PaymentsAnalytics {
        banks,
        currencies: currencies.into_sorted(),
        payment_types: payment_types.into_sorted(),
    }
}

#[cfg(test)]
#[path = "payments_test.rs"]
mod tests;
