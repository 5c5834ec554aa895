use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::model::Record;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Label for records without a category.
pub const OTHER: &str = "Other";

pub fn month_label(month0: u32) -> &'static str {
    MONTHS[month0 as usize % MONTHS.len()]
}

/// Labelled sums that remember the order in which their labels were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buckets for `labels`, all starting at zero.
    pub fn seeded<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut buckets = Self::new();
        for label in labels {
            buckets.add(label, Decimal::ZERO);
        }
        buckets
    }

    pub fn add(&mut self, label: &str, amount: Decimal) {
        match self.index.entry(label.to_string()) {
            Entry::Occupied(entry) => {
                let sum = &mut self.entries[*entry.get()].1;
                *sum = add_amounts(*sum, amount);
            }
            Entry::Vacant(entry) => {
                entry.insert(self.entries.len());
                self.entries.push((label.to_string(), amount));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.index.get(label).map(|index| self.entries[*index].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries
            .iter()
            .map(|(label, amount)| (label.as_str(), *amount))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.iter().map(|(label, _)| label).collect()
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.iter().map(|(_, amount)| amount).collect()
    }

    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |sum, (_, amount)| add_amounts(sum, *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keeps only the first `n` buckets.
    pub fn take_first(mut self, n: usize) -> Self {
        for (label, _) in self.entries.iter().skip(n) {
            self.index.remove(label);
        }
        self.entries.truncate(n);
        self
    }
}

/// Sums amounts per category, records without one count as "Other".
pub fn bucket_by_category<R: Record>(records: &[R]) -> Buckets {
    let mut buckets = Buckets::new();
    for record in records {
        buckets.add(record.category_label().unwrap_or(OTHER), record.amount());
    }
    buckets
}

/// Sums amounts per month abbreviation. The year is not part of the key.
/// Only months that occur are emitted, records without a date are skipped.
pub fn bucket_by_month<R: Record>(records: &[R]) -> Buckets {
    let mut buckets = Buckets::new();
    for record in records {
        if let Some(date) = record.date() {
            buckets.add(month_label(date.month0()), record.amount());
        }
    }
    buckets
}

/// All twelve months, zero where nothing happened. Records without a date
/// and records with a zero amount are skipped.
pub fn monthly_totals<R: Record>(records: &[R]) -> Buckets {
    let mut buckets = Buckets::seeded(MONTHS);
    for record in records {
        let amount = record.amount();
        if amount.is_zero() {
            continue;
        }
        if let Some(date) = record.date() {
            buckets.add(month_label(date.month0()), amount);
        }
    }
    buckets
}

pub fn total<R: Record>(records: &[R]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |sum, record| add_amounts(sum, record.amount()))
}

/// Adds two amounts, saturating at `Decimal::MAX` / `Decimal::MIN` on overflow.
pub fn add_amounts(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_add(rhs).unwrap_or_else(|| {
        log::warn!("Sum of {lhs} and {rhs} overflows, saturating");
        lhs.saturating_add(rhs)
    })
}
