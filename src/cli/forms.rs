use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{
    parse_category_tags, ExpenseDraft, GoalCategory, GoalDraft, IncomeDraft, PaymentMethod,
    RecurringPeriod, Status,
};
use crate::terminal;

const NOT_SELECTED: &str = "(none)";

/// Required fields may be left empty here, validating the draft reports them.
pub fn expense_draft() -> Result<ExpenseDraft> {
    let description = terminal::prompt_optional("Description")?;
    let amount = terminal::prompt_parsed::<Decimal>("Amount")?;
    let category_tags =
        parse_category_tags(&terminal::prompt_optional("Categories (comma separated)")?);
    let payment_method =
        select_optional("Payment method", &PaymentMethod::ALL, PaymentMethod::label)?;
    let (is_recurring, recurring_period) = recurrence()?;
    let status = select_optional(
        "Status [default: Pending]",
        &[Status::Pending, Status::Paid, Status::Overdue],
        Status::label,
    )?;
    let notes = terminal::prompt_optional("Notes")?;
    let date = terminal::prompt_parsed::<NaiveDate>("Date (YYYY-MM-DD, optional)")?;
    Ok(ExpenseDraft {
        description,
        amount,
        category_tags,
        payment_method,
        is_recurring,
        recurring_period,
        status,
        notes,
        date,
    })
}

pub fn income_draft() -> Result<IncomeDraft> {
    let amount = terminal::prompt_parsed::<Decimal>("Amount")?;
    let source = terminal::prompt_optional("Source, e.g. Salary")?;
    let description = terminal::prompt_optional("Description")?;
    let payment_method =
        select_optional("Payment method", &PaymentMethod::ALL, PaymentMethod::label)?;
    let (is_recurring, recurring_period) = recurrence()?;
    let status = select_optional(
        "Status [default: Received]",
        &[Status::Received, Status::Pending],
        Status::label,
    )?;
    let notes = terminal::prompt_optional("Notes")?;
    let date = terminal::prompt_parsed::<NaiveDate>("Date (YYYY-MM-DD, optional)")?;
    Ok(IncomeDraft {
        amount,
        source,
        description,
        payment_method,
        is_recurring,
        recurring_period,
        status,
        notes,
        date,
    })
}

pub fn goal_draft() -> Result<GoalDraft> {
    let title = terminal::prompt_optional("Title")?;
    let target_amount = terminal::prompt_parsed::<Decimal>("Target amount")?;
    let current_progress = terminal::prompt_parsed::<Decimal>("Saved so far [default: 0]")?;
    let deadline = terminal::prompt_parsed::<NaiveDate>("Deadline (YYYY-MM-DD, optional)")?;
    let category = select_optional(
        "Category [default: Other]",
        &GoalCategory::ALL,
        GoalCategory::as_str,
    )?;
    Ok(GoalDraft {
        title,
        target_amount,
        current_progress,
        deadline,
        category,
    })
}

fn recurrence() -> Result<(bool, Option<RecurringPeriod>)> {
    if !terminal::prompt_yes_no("Recurring?", false)? {
        return Ok((false, None));
    }
    let period = select_optional(
        "Recurring period",
        &RecurringPeriod::ALL,
        RecurringPeriod::as_str,
    )?;
    Ok((true, period))
}

/// The first option selects nothing.
fn select_optional<T: Copy>(
    prompt: &str,
    options: &[T],
    label: fn(&T) -> &'static str,
) -> Result<Option<T>> {
    let labels: Vec<&str> = std::iter::once(NOT_SELECTED)
        .chain(options.iter().map(label))
        .collect();
    let index = terminal::prompt_select(prompt, &labels, 0)?;
    Ok(index
        .checked_sub(1)
        .and_then(|index| options.get(index).copied()))
}
