use rust_decimal::Decimal;

use super::bucket::{bucket_by_category, Buckets};
use crate::model::{Goal, Income, MonthlyAnalytics};

/// Number of categories shown in the budget comparison.
pub const BUDGET_CATEGORIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalProgress {
    pub title: String,
    pub current_progress: Decimal,
    pub target_amount: Decimal,
    pub percent_complete: Option<Decimal>,
}

pub fn goal_progress(goals: &[Goal]) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|goal| GoalProgress {
            title: goal.title.clone(),
            current_progress: goal.current_progress,
            target_amount: goal.target_amount,
            percent_complete: goal.percent_complete(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetComparison {
    pub category: String,
    pub actual: Decimal,
    pub budget: Decimal,
}

/// Compares what was spent per category with a budget of 120% of it,
/// rounded up, for the first few categories.
pub fn budget_vs_actual(analytics: &MonthlyAnalytics) -> Vec<BudgetComparison> {
    bucket_by_category(&analytics.expenses)
        .take_first(BUDGET_CATEGORIES)
        .iter()
        .map(|(category, actual)| BudgetComparison {
            category: category.to_string(),
            actual,
            budget: budget_for(actual),
        })
        .collect()
}

fn budget_for(actual: Decimal) -> Decimal {
    actual
        .checked_mul(Decimal::new(12, 1))
        .unwrap_or_else(|| {
            log::warn!("Budget for {actual} overflows, saturating");
            actual.saturating_mul(Decimal::new(12, 1))
        })
        .ceil()
}

/// Sums incomes per source, incomes without one count as "Other".
pub fn bucket_by_source(incomes: &[Income]) -> Buckets {
    bucket_by_category(incomes)
}
