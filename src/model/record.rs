use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

use super::wire;

/// Something with an amount and (usually) a date that can be bucketed for charts.
pub trait Record {
    fn amount(&self) -> Decimal;
    fn date(&self) -> Option<DateTime<Utc>>;
    /// Label used when grouping by category. `None` if the record has none.
    fn category_label(&self) -> Option<&str>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} {value:?}, expected one of: {expected}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(pub String);

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "bank transfer")]
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Credit,
        PaymentMethod::Debit,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Debit => "debit",
            PaymentMethod::BankTransfer => "bank transfer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Debit => "Debit",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "credit" => Ok(PaymentMethod::Credit),
            "debit" => Ok(PaymentMethod::Debit),
            "bank transfer" | "bank-transfer" | "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            _ => Err(ParseEnumError::new(
                "payment method",
                s,
                &PaymentMethod::ALL.map(|method| method.as_str()),
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecurringPeriod {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "yearly")]
    Yearly,
}

impl RecurringPeriod {
    pub const ALL: [RecurringPeriod; 4] = [
        RecurringPeriod::Daily,
        RecurringPeriod::Weekly,
        RecurringPeriod::Monthly,
        RecurringPeriod::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringPeriod::Daily => "daily",
            RecurringPeriod::Weekly => "weekly",
            RecurringPeriod::Monthly => "monthly",
            RecurringPeriod::Yearly => "yearly",
        }
    }
}

impl FromStr for RecurringPeriod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RecurringPeriod::Daily),
            "weekly" => Ok(RecurringPeriod::Weekly),
            "monthly" => Ok(RecurringPeriod::Monthly),
            "yearly" => Ok(RecurringPeriod::Yearly),
            _ => Err(ParseEnumError::new(
                "recurring period",
                s,
                &RecurringPeriod::ALL.map(|period| period.as_str()),
            )),
        }
    }
}

/// Payment status of a record.
///
/// The Record Store spells "received" as `recieved`. Both spellings are
/// accepted, the Record Store's one is sent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "paid")]
    Paid,
    #[serde(rename = "recieved", alias = "received")]
    Received,
    #[serde(rename = "overdue")]
    Overdue,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Pending, Status::Paid, Status::Received, Status::Overdue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Paid => "paid",
            Status::Received => "recieved",
            Status::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Paid => "Paid",
            Status::Received => "Received",
            Status::Overdue => "Overdue",
        }
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "paid" => Ok(Status::Paid),
            "recieved" | "received" => Ok(Status::Received),
            "overdue" => Ok(Status::Overdue),
            _ => Err(ParseEnumError::new(
                "status",
                s,
                &["pending", "paid", "received", "overdue"],
            )),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub amount: Decimal,
    #[serde(default, with = "wire::timestamp_opt")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub category_tags: Vec<String>,
    /// Older records carry a single plain category instead of tags.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "wire::lenient_enum")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub is_recurring: bool,
    #[serde(default, deserialize_with = "wire::lenient_enum")]
    pub recurring_period: Option<RecurringPeriod>,
    #[serde(default, deserialize_with = "wire::lenient_enum")]
    pub status: Option<Status>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Expense {
    /// The recurring period, but only if the expense is actually recurring.
    pub fn recurrence(&self) -> Option<RecurringPeriod> {
        recurrence(self.is_recurring, self.recurring_period)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category_tags
            .iter()
            .any(|tag| same_category(tag, category))
            || self
                .category
                .as_deref()
                .is_some_and(|plain| same_category(plain, category))
    }
}

/// Category names and sources compare ignoring case and surrounding whitespace,
/// like goal categories do. Blank names never match.
fn same_category(lhs: &str, rhs: &str) -> bool {
    let lhs = lhs.trim();
    !lhs.is_empty() && lhs.eq_ignore_ascii_case(rhs.trim())
}

impl Record for Expense {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    fn category_label(&self) -> Option<&str> {
        non_empty(self.category_tags.first().map(String::as_str))
            .or_else(|| non_empty(self.category.as_deref()))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub amount: Decimal,
    #[serde(default, with = "wire::timestamp_opt")]
    pub date: Option<DateTime<Utc>>,
    /// Salary, Investments, Freelance, ... Plays the role of the category.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "wire::lenient_enum")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub is_recurring: bool,
    #[serde(default, deserialize_with = "wire::lenient_enum")]
    pub recurring_period: Option<RecurringPeriod>,
    #[serde(default, deserialize_with = "wire::lenient_enum")]
    pub status: Option<Status>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Income {
    pub fn recurrence(&self) -> Option<RecurringPeriod> {
        recurrence(self.is_recurring, self.recurring_period)
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.source
            .as_deref()
            .is_some_and(|own| same_category(own, source))
    }
}

impl Record for Income {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    fn category_label(&self) -> Option<&str> {
        non_empty(self.source.as_deref())
    }
}

fn recurrence(is_recurring: bool, period: Option<RecurringPeriod>) -> Option<RecurringPeriod> {
    if is_recurring {
        period
    } else {
        None
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_full_expense() {
        let expense: Expense = serde_json::from_value(json!({
            "_id": "e1",
            "amount": 12.5,
            "date": "2024-01-15T00:00:00.000Z",
            "description": "Groceries",
            "categoryTags": ["Food", "Groceries"],
            "paymentMethod": "debit",
            "isRecurring": true,
            "recurringPeriod": "weekly",
            "status": "paid",
            "notes": "weekly shop",
        }))
        .unwrap();

        assert_eq!(RecordId("e1".to_string()), expense.id);
        assert_eq!(Decimal::new(125, 1), expense.amount);
        assert_eq!(
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
            expense.date
        );
        assert_eq!(vec!["Food", "Groceries"], expense.category_tags);
        assert_eq!(Some(PaymentMethod::Debit), expense.payment_method);
        assert_eq!(Some(RecurringPeriod::Weekly), expense.recurrence());
        assert_eq!(Some(Status::Paid), expense.status);
        assert_eq!(Some("Food"), expense.category_label());
    }

    #[test]
    fn decodes_sparse_expense() {
        let expense: Expense = serde_json::from_value(json!({
            "_id": "e2",
            "amount": "30",
            "categoryTags": null,
            "paymentMethod": "",
            "recurringPeriod": "monthly",
            "status": "refunded",
        }))
        .unwrap();

        assert_eq!(Decimal::new(30, 0), expense.amount);
        assert_eq!(None, expense.date);
        assert!(expense.category_tags.is_empty());
        assert_eq!(None, expense.payment_method);
        assert_eq!(None, expense.status);
        // not recurring, so the stale period is ignored
        assert_eq!(None, expense.recurrence());
        assert_eq!(None, expense.category_label());
    }

    #[test]
    fn expense_category_label_falls_back_to_plain_category() {
        let expense: Expense = serde_json::from_value(json!({
            "_id": "e3",
            "amount": 20,
            "categoryTags": [""],
            "category": "Rent",
        }))
        .unwrap();
        assert_eq!(Some("Rent"), expense.category_label());
        assert!(expense.has_category("Rent"));
        assert!(expense.has_category("rent"));
        assert!(!expense.has_category("Food"));
        assert!(!expense.has_category(""));
    }

    #[test]
    fn decodes_income_with_both_received_spellings() {
        for spelling in ["recieved", "received"] {
            let income: Income = serde_json::from_value(json!({
                "_id": "i1",
                "amount": 1000,
                "source": "Salary",
                "status": spelling,
                "paymentMethod": "bank transfer",
            }))
            .unwrap();
            assert_eq!(Some(Status::Received), income.status);
            assert_eq!(Some(PaymentMethod::BankTransfer), income.payment_method);
            assert_eq!(Some("Salary"), income.category_label());
        }
    }

    #[test]
    fn status_serializes_with_record_store_spelling() {
        assert_eq!(
            json!("recieved"),
            serde_json::to_value(Status::Received).unwrap()
        );
    }

    #[test]
    fn parse_enums_from_cli_strings() {
        assert_eq!(Ok(PaymentMethod::BankTransfer), "bank-transfer".parse());
        assert_eq!(Ok(Status::Received), "Received".parse());
        assert_eq!(Ok(RecurringPeriod::Yearly), "YEARLY".parse());
        let err = "cheque".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(
            "Unknown payment method \"cheque\", expected one of: cash, credit, debit, bank transfer",
            err.to_string()
        );
    }
}
