//! Add-record forms and the payloads they turn into once validated.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::{wire, GoalCategory, PaymentMethod, RecurringPeriod, Status};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingRequiredFields,
    #[error("Amount and source are required.")]
    MissingAmountOrSource,
    #[error("Title and target amount are required.")]
    MissingTitleOrTarget,
    #[error("Please select a recurring period.")]
    MissingRecurringPeriod,
    #[error("Amounts can't be negative.")]
    NegativeAmount,
    #[error("The deadline can't be in the past.")]
    DeadlineInPast,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Option<Decimal>,
    pub category_tags: Vec<String>,
    pub payment_method: Option<PaymentMethod>,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
    pub status: Option<Status>,
    pub notes: String,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category_tags: Vec<String>,
    pub payment_method: PaymentMethod,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
    pub status: Status,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ExpenseDraft {
    pub fn validate(self) -> Result<NewExpense, ValidationError> {
        let description = self.description.trim().to_string();
        let (Some(amount), Some(payment_method)) = (self.amount, self.payment_method) else {
            return Err(ValidationError::MissingRequiredFields);
        };
        if description.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }
        ensure_not_negative(amount)?;
        let recurring_period = normalize_recurrence(self.is_recurring, self.recurring_period)?;
        Ok(NewExpense {
            description,
            amount,
            category_tags: self.category_tags,
            payment_method,
            is_recurring: self.is_recurring,
            recurring_period,
            status: self.status.unwrap_or(Status::Pending),
            notes: self.notes,
            date: self.date,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct IncomeDraft {
    pub amount: Option<Decimal>,
    pub source: String,
    pub description: String,
    pub payment_method: Option<PaymentMethod>,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
    pub status: Option<Status>,
    pub notes: String,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub source: String,
    pub description: String,
    pub payment_method: Option<PaymentMethod>,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
    pub status: Status,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl IncomeDraft {
    pub fn validate(self) -> Result<NewIncome, ValidationError> {
        let source = self.source.trim().to_string();
        let Some(amount) = self.amount else {
            return Err(ValidationError::MissingAmountOrSource);
        };
        if source.is_empty() {
            return Err(ValidationError::MissingAmountOrSource);
        }
        ensure_not_negative(amount)?;
        let recurring_period = normalize_recurrence(self.is_recurring, self.recurring_period)?;
        Ok(NewIncome {
            amount,
            source,
            description: self.description,
            payment_method: self.payment_method,
            is_recurring: self.is_recurring,
            recurring_period,
            status: self.status.unwrap_or(Status::Received),
            notes: self.notes,
            date: self.date,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoalDraft {
    pub title: String,
    pub target_amount: Option<Decimal>,
    pub current_progress: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<GoalCategory>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_progress: Decimal,
    #[serde(with = "wire::timestamp_opt")]
    pub deadline: Option<DateTime<Utc>>,
    pub category: GoalCategory,
}

impl GoalDraft {
    pub fn validate(self, today: NaiveDate) -> Result<NewGoal, ValidationError> {
        let title = self.title.trim().to_string();
        let Some(target_amount) = self.target_amount else {
            return Err(ValidationError::MissingTitleOrTarget);
        };
        if title.is_empty() {
            return Err(ValidationError::MissingTitleOrTarget);
        }
        let current_progress = self.current_progress.unwrap_or(Decimal::ZERO);
        ensure_not_negative(target_amount)?;
        ensure_not_negative(current_progress)?;
        if let Some(deadline) = self.deadline {
            if deadline < today {
                return Err(ValidationError::DeadlineInPast);
            }
        }
        Ok(NewGoal {
            title,
            target_amount,
            current_progress,
            deadline: self
                .deadline
                .map(|deadline| deadline.and_time(NaiveTime::MIN).and_utc()),
            category: self.category.unwrap_or_default(),
        })
    }
}

fn ensure_not_negative(amount: Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(())
}

/// A period only makes sense on recurring records, and recurring records need one.
fn normalize_recurrence(
    is_recurring: bool,
    period: Option<RecurringPeriod>,
) -> Result<Option<RecurringPeriod>, ValidationError> {
    match (is_recurring, period) {
        (false, _) => Ok(None),
        (true, None) => Err(ValidationError::MissingRecurringPeriod),
        (true, Some(period)) => Ok(Some(period)),
    }
}

/// Splits a comma separated tag list the way the add-expense form does.
pub fn parse_category_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn expense_draft() -> ExpenseDraft {
        ExpenseDraft {
            description: "Groceries".to_string(),
            amount: Some(Decimal::new(4250, 2)),
            category_tags: vec!["Food".to_string()],
            payment_method: Some(PaymentMethod::Debit),
            ..Default::default()
        }
    }

    fn income_draft() -> IncomeDraft {
        IncomeDraft {
            amount: Some(Decimal::new(2000, 0)),
            source: "Salary".to_string(),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn valid_expense_gets_default_status() {
        let expense = expense_draft().validate().unwrap();
        assert_eq!(Status::Pending, expense.status);
        assert_eq!("Groceries", expense.description);
        assert_eq!(None, expense.recurring_period);
    }

    #[rstest]
    #[case::no_description(ExpenseDraft { description: "  ".to_string(), ..expense_draft() })]
    #[case::no_amount(ExpenseDraft { amount: None, ..expense_draft() })]
    #[case::no_payment_method(ExpenseDraft { payment_method: None, ..expense_draft() })]
    fn expense_requires_fields(#[case] draft: ExpenseDraft) {
        assert_eq!(
            Err(ValidationError::MissingRequiredFields),
            draft.validate()
        );
    }

    #[rstest]
    fn non_recurring_period_is_dropped_before_sending(
        #[values(
            RecurringPeriod::Daily,
            RecurringPeriod::Weekly,
            RecurringPeriod::Monthly,
            RecurringPeriod::Yearly
        )]
        period: RecurringPeriod,
    ) {
        let expense = ExpenseDraft {
            is_recurring: false,
            recurring_period: Some(period),
            ..expense_draft()
        }
        .validate()
        .unwrap();
        assert_eq!(None, expense.recurring_period);
        assert_eq!(json!(null), serde_json::to_value(&expense).unwrap()["recurringPeriod"]);

        let income = IncomeDraft {
            is_recurring: false,
            recurring_period: Some(period),
            ..income_draft()
        }
        .validate()
        .unwrap();
        assert_eq!(None, income.recurring_period);
    }

    #[test]
    fn recurring_without_period_is_rejected() {
        let draft = ExpenseDraft {
            is_recurring: true,
            ..expense_draft()
        };
        assert_eq!(
            Err(ValidationError::MissingRecurringPeriod),
            draft.validate()
        );
        let draft = IncomeDraft {
            is_recurring: true,
            ..income_draft()
        };
        assert_eq!(
            Err(ValidationError::MissingRecurringPeriod),
            draft.validate()
        );
    }

    #[test]
    fn recurring_with_period_is_kept() {
        let income = IncomeDraft {
            is_recurring: true,
            recurring_period: Some(RecurringPeriod::Monthly),
            ..income_draft()
        }
        .validate()
        .unwrap();
        assert_eq!(Some(RecurringPeriod::Monthly), income.recurring_period);
        assert_eq!(Status::Received, income.status);
    }

    #[test]
    fn income_requires_amount_and_source() {
        let draft = IncomeDraft {
            source: String::new(),
            ..income_draft()
        };
        assert_eq!(Err(ValidationError::MissingAmountOrSource), draft.validate());
        let draft = IncomeDraft {
            amount: None,
            ..income_draft()
        };
        assert_eq!(Err(ValidationError::MissingAmountOrSource), draft.validate());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let draft = ExpenseDraft {
            amount: Some(Decimal::new(-1, 0)),
            ..expense_draft()
        };
        assert_eq!(Err(ValidationError::NegativeAmount), draft.validate());
    }

    #[test]
    fn expense_payload_uses_record_store_field_names() {
        let payload = serde_json::to_value(expense_draft().validate().unwrap()).unwrap();
        assert_eq!(
            json!({
                "description": "Groceries",
                "amount": 42.5,
                "categoryTags": ["Food"],
                "paymentMethod": "debit",
                "isRecurring": false,
                "recurringPeriod": null,
                "status": "pending",
                "notes": "",
            }),
            payload
        );
    }

    #[test]
    fn goal_defaults() {
        let goal = GoalDraft {
            title: "Laptop".to_string(),
            target_amount: Some(Decimal::new(1500, 0)),
            ..Default::default()
        }
        .validate(today())
        .unwrap();
        assert_eq!(Decimal::ZERO, goal.current_progress);
        assert_eq!(GoalCategory::Other, goal.category);
        assert_eq!(None, goal.deadline);
    }

    #[test]
    fn goal_deadline() {
        let draft = GoalDraft {
            title: "Laptop".to_string(),
            target_amount: Some(Decimal::new(1500, 0)),
            deadline: Some(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()),
            ..Default::default()
        };
        assert_eq!(
            Err(ValidationError::DeadlineInPast),
            draft.clone().validate(today())
        );

        let goal = GoalDraft {
            deadline: Some(today()),
            ..draft
        }
        .validate(today())
        .unwrap();
        assert_eq!(
            json!("2024-06-01T00:00:00.000Z"),
            serde_json::to_value(&goal).unwrap()["deadline"]
        );
    }

    #[test]
    fn goal_requires_title_and_target() {
        assert_eq!(
            Err(ValidationError::MissingTitleOrTarget),
            GoalDraft {
                title: "Laptop".to_string(),
                ..Default::default()
            }
            .validate(today())
        );
        assert_eq!(
            Err(ValidationError::MissingTitleOrTarget),
            GoalDraft {
                target_amount: Some(Decimal::ONE),
                ..Default::default()
            }
            .validate(today())
        );
    }

    #[test]
    fn category_tags() {
        assert_eq!(
            vec!["Food", "Bills"],
            parse_category_tags(" Food, Bills ,, ")
        );
        assert!(parse_category_tags("").is_empty());
    }
}
