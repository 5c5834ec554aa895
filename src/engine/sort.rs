use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::model::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ParseEnumError::new("sort order", s, &["asc", "desc"])),
        }
    }
}

/// The value a record is ordered by. Only keys of the same variant are ever
/// compared with each other since a field always yields the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Number(Decimal),
    Time(DateTime<Utc>),
    Text(&'a str),
}

pub trait Sortable {
    type Field: Copy;

    fn sort_key(&self, field: Self::Field) -> Option<SortKey<'_>>;
}

/// Returns a sorted copy of `records`.
///
/// The sort is stable, so ties keep their input order in both directions.
/// Records without a value for `field` come last, in input order.
pub fn sort<R: Sortable + Clone>(records: &[R], field: R::Field, order: SortOrder) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| match (a.sort_key(field), b.sort_key(field)) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.cmp(&b),
            SortOrder::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Clicking the active column flips the order, any other column starts ascending.
    pub fn select(&mut self, field: F) {
        if self.field == field {
            self.order = self.order.toggle();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        amount: Option<i64>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Field {
        Name,
        Amount,
    }

    impl Sortable for Item {
        type Field = Field;

        fn sort_key(&self, field: Field) -> Option<SortKey<'_>> {
            match field {
                Field::Name => Some(SortKey::Text(self.name)),
                Field::Amount => self.amount.map(|amount| SortKey::Number(Decimal::from(amount))),
            }
        }
    }

    fn item(name: &'static str, amount: Option<i64>) -> Item {
        Item { name, amount }
    }

    fn names(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|item| item.name).collect()
    }

    #[test]
    fn sorts_numbers() {
        let items = vec![item("a", Some(30)), item("b", Some(5)), item("c", Some(100))];
        assert_eq!(vec!["b", "a", "c"], names(&sort(&items, Field::Amount, SortOrder::Asc)));
        assert_eq!(vec!["c", "a", "b"], names(&sort(&items, Field::Amount, SortOrder::Desc)));
        // source is untouched
        assert_eq!(vec!["a", "b", "c"], names(&items));
    }

    #[test]
    fn desc_is_reverse_of_asc_for_unique_keys() {
        let items: Vec<Item> = [7, -3, 12, 0, 99, 4]
            .into_iter()
            .zip(["a", "b", "c", "d", "e", "f"])
            .map(|(amount, name)| item(name, Some(amount)))
            .collect();
        let mut asc = sort(&items, Field::Amount, SortOrder::Asc);
        asc.reverse();
        assert_eq!(asc, sort(&items, Field::Amount, SortOrder::Desc));
    }

    #[test]
    fn sorts_text_lexicographically() {
        let items = vec![item("pear", None), item("Apple", None), item("apple", None)];
        assert_eq!(
            vec!["Apple", "apple", "pear"],
            names(&sort(&items, Field::Name, SortOrder::Asc))
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let items = vec![item("a", Some(1)), item("b", Some(2)), item("c", Some(1))];
        assert_eq!(vec!["a", "c", "b"], names(&sort(&items, Field::Amount, SortOrder::Asc)));
        assert_eq!(vec!["b", "a", "c"], names(&sort(&items, Field::Amount, SortOrder::Desc)));
    }

    #[test]
    fn missing_keys_go_last_in_both_orders() {
        let items = vec![
            item("x", None),
            item("a", Some(2)),
            item("y", None),
            item("b", Some(1)),
        ];
        assert_eq!(
            vec!["b", "a", "x", "y"],
            names(&sort(&items, Field::Amount, SortOrder::Asc))
        );
        assert_eq!(
            vec!["a", "b", "x", "y"],
            names(&sort(&items, Field::Amount, SortOrder::Desc))
        );
    }

    #[test]
    fn empty_input() {
        let items: Vec<Item> = vec![];
        assert!(sort(&items, Field::Amount, SortOrder::Asc).is_empty());
    }

    #[test]
    fn sort_state_toggles_same_field_and_resets_on_new_field() {
        let mut state = SortState::new(Field::Amount, SortOrder::Desc);
        state.select(Field::Amount);
        assert_eq!(SortState::new(Field::Amount, SortOrder::Asc), state);
        state.select(Field::Amount);
        assert_eq!(SortOrder::Desc, state.order);
        state.select(Field::Name);
        assert_eq!(SortState::new(Field::Name, SortOrder::Asc), state);
    }

    #[test]
    fn parse_order() {
        assert_eq!(Ok(SortOrder::Desc), "DESC".parse());
        assert!("down".parse::<SortOrder>().is_err());
    }
}
