mod analytics;
mod draft;
mod goal;
mod profile;
mod record;
pub mod wire;

pub use analytics::{AnalyticsExpense, MonthlyAnalytics};
pub use draft::{
    parse_category_tags, ExpenseDraft, GoalDraft, IncomeDraft, NewExpense, NewGoal, NewIncome,
    ValidationError,
};
pub use goal::{Goal, GoalCategory};
pub use profile::UserProfile;
pub use record::{
    Expense, Income, ParseEnumError, PaymentMethod, Record, RecordId, RecurringPeriod, Status,
};
