mod analytics;
mod client;
mod error;
mod records;
mod users;

pub use analytics::monthly;
pub use client::{ApiClient, AuthHeaderProvider};
pub use error::ApiError;
pub use records::{
    add_expense, add_goal, add_income, delete_expense, delete_goal, delete_income, list_expenses,
    list_goals, list_incomes, update_expense, update_goal, update_income,
};
pub use users::{login, profile, register, verify, Credentials, Identity, Registration};
