use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{wire, ParseEnumError, RecordId};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GoalCategory {
    Vacation,
    #[serde(rename = "Emergency Fund")]
    EmergencyFund,
    Education,
    Car,
    #[serde(rename = "House/Apt")]
    HouseApt,
    #[default]
    #[serde(other)]
    Other,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 6] = [
        GoalCategory::Vacation,
        GoalCategory::EmergencyFund,
        GoalCategory::Education,
        GoalCategory::Car,
        GoalCategory::HouseApt,
        GoalCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Vacation => "Vacation",
            GoalCategory::EmergencyFund => "Emergency Fund",
            GoalCategory::Education => "Education",
            GoalCategory::Car => "Car",
            GoalCategory::HouseApt => "House/Apt",
            GoalCategory::Other => "Other",
        }
    }
}

impl FromStr for GoalCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "vacation" => Ok(GoalCategory::Vacation),
            "emergencyfund" => Ok(GoalCategory::EmergencyFund),
            "education" => Ok(GoalCategory::Education),
            "car" => Ok(GoalCategory::Car),
            "houseapt" => Ok(GoalCategory::HouseApt),
            "other" => Ok(GoalCategory::Other),
            _ => Err(ParseEnumError::new(
                "goal category",
                s,
                &GoalCategory::ALL.map(|category| category.as_str()),
            )),
        }
    }
}

/// A savings target. `current_progress` may exceed `target_amount`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub target_amount: Decimal,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub current_progress: Decimal,
    #[serde(default, with = "wire::timestamp_opt")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::nullable")]
    pub category: GoalCategory,
}

impl Goal {
    /// Progress towards the target in percent, `None` if there is no target
    /// or the ratio doesn't fit into a `Decimal`.
    pub fn percent_complete(&self) -> Option<Decimal> {
        if self.target_amount.is_zero() {
            return None;
        }
        let percent = self
            .current_progress
            .checked_div(self.target_amount)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
        if percent.is_none() {
            log::warn!(
                "Progress of goal {} is out of range ({} of {})",
                self.id.0,
                self.current_progress,
                self.target_amount
            );
        }
        percent.map(|percent| percent.round_dp(1))
    }
}
