//! The screens, each one a configuration of the engine.

use rust_decimal::Decimal;

use crate::engine::{
    self, bucket_by_category, bucket_by_source, budget_vs_actual, goal_progress, monthly_totals,
    paginate, BudgetComparison, Buckets, ExpenseField, FilterSet, Filterable, GoalField,
    GoalProgress, IncomeField, Pager, SortOrder, SortState, Sortable,
};
use crate::model::{Expense, Goal, Income, MonthlyAnalytics, UserProfile};

pub const EXPENSES_PAGE_SIZE: usize = 8;
pub const INCOMES_PAGE_SIZE: usize = 9;
pub const GOALS_PAGE_SIZE: usize = 9;

/// Sort, filter and page settings of a record table.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<R: Sortable> {
    pub sort: SortState<R::Field>,
    pub filters: FilterSet,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub items: Vec<R>,
    pub page: usize,
    pub page_count: usize,
    /// Number of records after filtering.
    pub total: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<R> ListView<R>
where
    R: Sortable + Filterable + Clone,
    R::Field: PartialEq,
{
    pub fn new(sort: SortState<R::Field>, page_size: usize) -> Self {
        Self {
            sort,
            filters: FilterSet::default(),
            page: 1,
            page_size,
        }
    }

    /// All matching records in display order, as used for the table and the CSV export.
    pub fn arranged(&self, records: &[R]) -> Vec<R> {
        engine::sort(
            &engine::filter(records, &self.filters),
            self.sort.field,
            self.sort.order,
        )
    }

    /// The requested page of [Self::arranged], with the page number clamped to what exists.
    pub fn render(&self, records: &[R]) -> Page<R> {
        let arranged = self.arranged(records);
        let mut pager = Pager::new(self.page_size, arranged.len());
        pager.go_to(self.page);
        Page {
            items: paginate(&arranged, pager.page(), pager.page_size()),
            page: pager.page(),
            page_count: pager.page_count(),
            total: arranged.len(),
            has_previous: pager.has_previous(),
            has_next: pager.has_next(),
        }
    }
}

pub fn expenses_view(page_size: usize) -> ListView<Expense> {
    ListView::new(SortState::new(ExpenseField::Date, SortOrder::Desc), page_size)
}

pub fn incomes_view(page_size: usize) -> ListView<Income> {
    ListView::new(SortState::new(IncomeField::Date, SortOrder::Desc), page_size)
}

pub fn goals_view(page_size: usize) -> ListView<Goal> {
    ListView::new(SortState::new(GoalField::Deadline, SortOrder::Asc), page_size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_money: Decimal,
    pub total_expenses: Decimal,
    pub total_incomes: Decimal,
    /// Incomes minus expenses.
    pub net: Decimal,
}

impl DashboardSummary {
    pub fn new(profile: &UserProfile) -> Self {
        let total_expenses = engine::total(&profile.expenses);
        let total_incomes = engine::total(&profile.incomes);
        Self {
            total_money: profile.total_money,
            total_expenses,
            total_incomes,
            net: total_incomes.saturating_sub(total_expenses),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub monthly_incomes: Buckets,
    pub monthly_expenses: Buckets,
    pub spending_by_category: Buckets,
    pub income_sources: Buckets,
    pub goal_progress: Vec<GoalProgress>,
    /// Empty if the analytics couldn't be loaded.
    pub budget: Vec<BudgetComparison>,
}

impl Report {
    pub fn build(profile: &UserProfile, analytics: Option<&MonthlyAnalytics>) -> Self {
        Self {
            monthly_incomes: monthly_totals(&profile.incomes),
            monthly_expenses: monthly_totals(&profile.expenses),
            spending_by_category: bucket_by_category(&profile.expenses),
            income_sources: bucket_by_source(&profile.incomes),
            goal_progress: goal_progress(&profile.goals),
            budget: analytics.map(budget_vs_actual).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn profile() -> UserProfile {
        let expenses: Vec<serde_json::Value> = (1..=10)
            .map(|day| {
                let category = if day % 2 == 0 { "Food" } else { "Rent" };
                let status = if day <= 3 { "paid" } else { "pending" };
                json!({
                    "_id": format!("e{day}"),
                    "amount": day,
                    "date": format!("2024-01-{day:02}"),
                    "categoryTags": [category],
                    "status": status,
                })
            })
            .collect();
        serde_json::from_value(json!({
            "username": "alice",
            "totalMoney": 1000,
            "expenses": expenses,
            "incomes": [
                {"_id": "i1", "amount": 500, "date": "2024-02-01", "source": "Salary"},
                {"_id": "i2", "amount": 100, "date": "2024-03-01", "source": "Gift"},
            ],
            "goals": [
                {"_id": "g1", "title": "Later", "targetAmount": 100, "deadline": "2030-01-01"},
                {"_id": "g2", "title": "Sooner", "targetAmount": 100, "deadline": "2026-01-01"},
            ],
        }))
        .unwrap()
    }

    fn expense_ids(page: &Page<Expense>) -> Vec<&str> {
        page.items.iter().map(|expense| expense.id.0.as_str()).collect()
    }

    #[test]
    fn expenses_default_to_newest_first_eight_per_page() {
        let profile = profile();
        let mut view = expenses_view(EXPENSES_PAGE_SIZE);
        let page = view.render(&profile.expenses);
        assert_eq!(
            vec!["e10", "e9", "e8", "e7", "e6", "e5", "e4", "e3"],
            expense_ids(&page)
        );
        assert_eq!(2, page.page_count);
        assert!(page.has_next);
        assert!(!page.has_previous);

        view.page = 2;
        let page = view.render(&profile.expenses);
        assert_eq!(vec!["e2", "e1"], expense_ids(&page));
        assert!(!page.has_next);
    }

    #[test]
    fn page_is_clamped_after_filtering() {
        let profile = profile();
        let mut view = expenses_view(EXPENSES_PAGE_SIZE);
        view.page = 2;
        view.filters.status = Some(crate::model::Status::Paid);
        let page = view.render(&profile.expenses);
        assert_eq!(1, page.page);
        assert_eq!(3, page.total);
        assert_eq!(vec!["e3", "e2", "e1"], expense_ids(&page));
    }

    #[test]
    fn selecting_the_sort_column_toggles() {
        let profile = profile();
        let mut view = expenses_view(EXPENSES_PAGE_SIZE);
        view.sort.select(ExpenseField::Date);
        let page = view.render(&profile.expenses);
        assert_eq!("e1", expense_ids(&page)[0]);
    }

    #[test]
    fn goals_default_to_nearest_deadline() {
        let profile = profile();
        let page = goals_view(GOALS_PAGE_SIZE).render(&profile.goals);
        assert_eq!("Sooner", page.items[0].title);
    }

    #[test]
    fn incomes_export_everything_not_just_the_page() {
        let profile = profile();
        let view = incomes_view(1);
        assert_eq!(1, view.render(&profile.incomes).items.len());
        assert_eq!(2, view.arranged(&profile.incomes).len());
    }

    #[test]
    fn dashboard_totals() {
        let summary = DashboardSummary::new(&profile());
        assert_eq!(Decimal::from(55), summary.total_expenses);
        assert_eq!(Decimal::from(600), summary.total_incomes);
        assert_eq!(Decimal::from(545), summary.net);
        assert_eq!(Decimal::from(1000), summary.total_money);
    }

    #[test]
    fn report_without_analytics_has_no_budget() {
        let report = Report::build(&profile(), None);
        assert!(report.budget.is_empty());
        assert_eq!(Some(Decimal::from(55)), report.monthly_expenses.get("Jan"));
        assert_eq!(Some(Decimal::from(500)), report.monthly_incomes.get("Feb"));
        assert_eq!(vec!["Rent", "Food"], report.spending_by_category.labels());
        assert_eq!(vec!["Salary", "Gift"], report.income_sources.labels());
        assert_eq!(2, report.goal_progress.len());
    }

    #[test]
    fn report_with_analytics() {
        let analytics: MonthlyAnalytics =
            serde_json::from_value(json!({"expenses": [{"category": "Food", "amount": 10}]}))
                .unwrap();
        let report = Report::build(&profile(), Some(&analytics));
        assert_eq!(1, report.budget.len());
        assert_eq!(Decimal::from(12), report.budget[0].budget);
    }
}
