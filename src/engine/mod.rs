//! Turns raw record lists into what tables and charts need. Nothing in here
//! mutates its input, every operation returns a fresh value.

mod bucket;
mod fields;
mod filter;
mod paginate;
mod report;
mod sort;

pub use bucket::{
    add_amounts, bucket_by_category, bucket_by_month, month_label, monthly_totals, total, Buckets,
    MONTHS, OTHER,
};
pub use fields::{ExpenseField, GoalField, IncomeField};
pub use filter::{filter, FilterSet, Filterable};
pub use paginate::{page_count, paginate, Pager};
pub use report::{
    bucket_by_source, budget_vs_actual, goal_progress, BudgetComparison, GoalProgress,
    BUDGET_CATEGORIES,
};
pub use sort::{sort, SortKey, SortOrder, SortState, Sortable};
