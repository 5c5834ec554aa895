//! Sortable columns and filter hooks of the three record lists.

use std::str::FromStr;

use super::{Filterable, SortKey, Sortable};
use crate::model::{
    Expense, Goal, GoalCategory, Income, ParseEnumError, PaymentMethod, Record, RecurringPeriod,
    Status,
};

macro_rules! field_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|field| normalize(field.as_str()) == wanted)
                    .ok_or_else(|| {
                        let expected: Vec<&str> = $name::ALL.iter().map(|field| field.as_str()).collect();
                        ParseEnumError::new($kind, s, &expected)
                    })
            }
        }
    };
}

field_enum!(ExpenseField, "expense column", {
    Description => "description",
    Amount => "amount",
    Category => "category",
    PaymentMethod => "payment-method",
    Recurring => "recurring",
    Status => "status",
    Date => "date",
});

field_enum!(IncomeField, "income column", {
    Date => "date",
    Source => "source",
    Description => "description",
    PaymentMethod => "payment-method",
    Recurring => "recurring",
    Status => "status",
    Notes => "notes",
    Amount => "amount",
});

field_enum!(GoalField, "goal column", {
    Title => "title",
    TargetAmount => "target",
    CurrentProgress => "progress",
    Deadline => "deadline",
    Category => "category",
});

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn text(value: Option<&str>) -> Option<SortKey<'_>> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(SortKey::Text)
}

fn recurring_key(period: Option<RecurringPeriod>) -> Option<SortKey<'static>> {
    Some(SortKey::Text(period.map_or("no", |period| period.as_str())))
}

fn status_key(status: Option<Status>) -> Option<SortKey<'static>> {
    status.map(|status| SortKey::Text(status.as_str()))
}

fn payment_method_key(method: Option<PaymentMethod>) -> Option<SortKey<'static>> {
    method.map(|method| SortKey::Text(method.as_str()))
}

impl Sortable for Expense {
    type Field = ExpenseField;

    fn sort_key(&self, field: ExpenseField) -> Option<SortKey<'_>> {
        match field {
            ExpenseField::Description => text(self.description.as_deref()),
            ExpenseField::Amount => Some(SortKey::Number(self.amount)),
            ExpenseField::Category => text(self.category_label()),
            ExpenseField::PaymentMethod => payment_method_key(self.payment_method),
            ExpenseField::Recurring => recurring_key(self.recurrence()),
            ExpenseField::Status => status_key(self.status),
            ExpenseField::Date => self.date.map(SortKey::Time),
        }
    }
}

impl Sortable for Income {
    type Field = IncomeField;

    fn sort_key(&self, field: IncomeField) -> Option<SortKey<'_>> {
        match field {
            IncomeField::Date => self.date.map(SortKey::Time),
            IncomeField::Source => text(self.source.as_deref()),
            IncomeField::Description => text(self.description.as_deref()),
            IncomeField::PaymentMethod => payment_method_key(self.payment_method),
            IncomeField::Recurring => recurring_key(self.recurrence()),
            IncomeField::Status => status_key(self.status),
            IncomeField::Notes => text(self.notes.as_deref()),
            IncomeField::Amount => Some(SortKey::Number(self.amount)),
        }
    }
}

impl Sortable for Goal {
    type Field = GoalField;

    fn sort_key(&self, field: GoalField) -> Option<SortKey<'_>> {
        match field {
            GoalField::Title => text(Some(self.title.as_str())),
            GoalField::TargetAmount => Some(SortKey::Number(self.target_amount)),
            GoalField::CurrentProgress => Some(SortKey::Number(self.current_progress)),
            GoalField::Deadline => self.deadline.map(SortKey::Time),
            GoalField::Category => Some(SortKey::Text(self.category.as_str())),
        }
    }
}

impl Filterable for Expense {
    fn status(&self) -> Option<Status> {
        self.status
    }

    fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    fn has_category(&self, category: &str) -> bool {
        Expense::has_category(self, category)
    }
}

impl Filterable for Income {
    fn status(&self) -> Option<Status> {
        self.status
    }

    fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    fn has_category(&self, category: &str) -> bool {
        self.has_source(category)
    }
}

impl Filterable for Goal {
    fn has_category(&self, category: &str) -> bool {
        category.parse::<GoalCategory>() == Ok(self.category)
    }
}
