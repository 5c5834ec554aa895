use crate::model::{PaymentMethod, Status};

/// Predicates a list view can be narrowed by. Unset predicates match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub status: Option<Status>,
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.active_category().is_none() && self.payment_method.is_none()
    }

    fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
    }

    pub fn matches<R: Filterable>(&self, record: &R) -> bool {
        if let Some(status) = self.status {
            if record.status() != Some(status) {
                return false;
            }
        }
        if let Some(payment_method) = self.payment_method {
            if record.payment_method() != Some(payment_method) {
                return false;
            }
        }
        if let Some(category) = self.active_category() {
            if !record.has_category(category) {
                return false;
            }
        }
        true
    }
}

pub trait Filterable {
    fn status(&self) -> Option<Status> {
        None
    }

    fn payment_method(&self) -> Option<PaymentMethod> {
        None
    }

    fn has_category(&self, category: &str) -> bool;
}

/// Returns the records matching every active predicate, in input order.
pub fn filter<R: Filterable + Clone>(records: &[R], filters: &FilterSet) -> Vec<R> {
    records
        .iter()
        .filter(|record| filters.matches(*record))
        .cloned()
        .collect()
}
