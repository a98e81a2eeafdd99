use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::Property;

/// Sparse listing filter plus paging window, bound straight from the query
/// string. Absent or empty constraints impose nothing; all active
/// constraints are conjoined. Contradictory price bounds simply match
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyFilter {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub page: i32,
    pub page_size: i32,
}

impl Default for PropertyFilter {
    fn default() -> Self {
        Self {
            name: None,
            address: None,
            min_price: None,
            max_price: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl PropertyFilter {
    /// Page number clamped to 1; page <= 0 is treated as the first page.
    pub fn page(&self) -> i32 {
        self.page.max(1)
    }

    /// Page size clamped to 1.
    pub fn page_size(&self) -> i32 {
        self.page_size.max(1)
    }

    /// Offset into the full match set for the current window.
    pub fn skip(&self) -> i64 {
        (self.page() as i64 - 1) * self.page_size() as i64
    }

    /// The case-insensitive substring constraint for `name`, if active.
    pub fn name_contains(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    /// The case-insensitive substring constraint for `address`, if active.
    pub fn address_contains(&self) -> Option<&str> {
        self.address.as_deref().filter(|s| !s.is_empty())
    }

    /// True when no constraint is active (match-all predicate).
    pub fn is_empty(&self) -> bool {
        self.name_contains().is_none()
            && self.address_contains().is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// The conjunction of all active constraints, as an in-memory predicate.
    /// Mirrors the SQL composition in the Postgres adapter.
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(name) = self.name_contains() {
            if !contains_ci(&property.name, name) {
                return false;
            }
        }
        if let Some(address) = self.address_contains() {
            if !contains_ci(&property.address, address) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
