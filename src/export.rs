use anyhow::{Context, Result};

use crate::model::{Expense, Income, RecurringPeriod};

/// A CSV column: its header and how to render a record's cell.
pub struct Column<R> {
    pub header: &'static str,
    pub value: fn(&R) -> String,
}

impl<R> Column<R> {
    pub const fn new(header: &'static str, value: fn(&R) -> String) -> Self {
        Self { header, value }
    }
}

/// Renders `records` as CSV text. The header row is written even if there are no records.
pub fn export_to_csv<R>(records: &[R], columns: &[Column<R>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(columns.iter().map(|column| column.header))?;
    for record in records {
        writer.write_record(columns.iter().map(|column| (column.value)(record)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Failed to flush CSV writer: {}", err.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

pub fn income_columns() -> Vec<Column<Income>> {
    vec![
        Column::new("Date", |income: &Income| format_date(income.date)),
        Column::new("Source", |income: &Income| text(&income.source)),
        Column::new("Description", |income: &Income| text(&income.description)),
        Column::new("PaymentMethod", |income: &Income| {
            income
                .payment_method
                .map(|method| method.as_str().to_string())
                .unwrap_or_default()
        }),
        Column::new("Status", |income: &Income| {
            income
                .status
                .map(|status| status.as_str().to_string())
                .unwrap_or_default()
        }),
        Column::new("Recurring", |income: &Income| recurring(income.recurrence())),
        Column::new("Notes", |income: &Income| text(&income.notes)),
        Column::new("Amount", |income: &Income| format!("{:.2}", income.amount)),
    ]
}

pub fn expense_columns() -> Vec<Column<Expense>> {
    vec![
        Column::new("Date", |expense: &Expense| format_date(expense.date)),
        Column::new("Categories", |expense: &Expense| {
            if expense.category_tags.is_empty() {
                text(&expense.category)
            } else {
                expense.category_tags.join(", ")
            }
        }),
        Column::new("Description", |expense: &Expense| text(&expense.description)),
        Column::new("PaymentMethod", |expense: &Expense| {
            expense
                .payment_method
                .map(|method| method.as_str().to_string())
                .unwrap_or_default()
        }),
        Column::new("Status", |expense: &Expense| {
            expense
                .status
                .map(|status| status.as_str().to_string())
                .unwrap_or_default()
        }),
        Column::new("Recurring", |expense: &Expense| recurring(expense.recurrence())),
        Column::new("Notes", |expense: &Expense| text(&expense.notes)),
        Column::new("Amount", |expense: &Expense| format!("{:.2}", expense.amount)),
    ]
}

fn format_date(date: Option<chrono::DateTime<chrono::Utc>>) -> String {
    date.map(|date| date.format("%m/%d/%Y").to_string())
        .unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn recurring(period: Option<RecurringPeriod>) -> String {
    period.map_or_else(|| "No".to_string(), |period| period.as_str().to_string())
}
