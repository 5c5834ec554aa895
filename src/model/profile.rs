use rust_decimal::Decimal;
use serde::Deserialize;

use super::{wire, Expense, Goal, Income};

/// Everything the Record Store knows about the logged in user.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "wire::nullable")]
    pub username: String,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub email: String,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub total_money: Decimal,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub expenses: Vec<Expense>,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub incomes: Vec<Income>,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub goals: Vec<Goal>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_lists_read_as_empty() {
        let profile: UserProfile = serde_json::from_value(json!({
            "username": "alice",
            "email": "alice@example.com",
            "totalMoney": 1200,
            "expenses": [{"_id": "e1", "amount": 5}],
            "goals": null,
        }))
        .unwrap();
        assert_eq!("alice", profile.username);
        assert_eq!(Decimal::new(1200, 0), profile.total_money);
        assert_eq!(1, profile.expenses.len());
        assert!(profile.incomes.is_empty());
        assert!(profile.goals.is_empty());
        assert_eq!(None, profile.dob);
    }
}
