use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{wire, Record};

/// Server side expense breakdown as returned by `/analytics/monthly`.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MonthlyAnalytics {
    #[serde(default, deserialize_with = "wire::nullable")]
    pub expenses: Vec<AnalyticsExpense>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsExpense {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub amount: Decimal,
    #[serde(default, with = "wire::timestamp_opt")]
    pub date: Option<DateTime<Utc>>,
}

impl Record for AnalyticsExpense {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    fn category_label(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.trim().is_empty())
    }
}
