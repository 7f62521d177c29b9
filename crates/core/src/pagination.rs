//! Offset paging driven by `per_page` / `current_page` query parameters.

use serde::Serialize;

use crate::validation::{messages, FieldErrors};

/// Default page size when `per_page` is absent.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Upper bound for a single page.
pub const MAX_PER_PAGE: i64 = 100;

/// A resolved page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub per_page: i64,
    pub current_page: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            current_page: 1,
        }
    }
}

impl Page {
    /// Resolve raw query values. Blank values fall back to the defaults;
    /// non-integers are validation failures.
    pub fn resolve(
        per_page: Option<&str>,
        current_page: Option<&str>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let per_page = parse_integer("per_page", per_page, &mut errors);
        let current_page = parse_integer("current_page", current_page, &mut errors);
        errors.into_result()?;

        Ok(Self {
            per_page: clamp_per_page(per_page),
            current_page: current_page.unwrap_or(1).max(1),
        })
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.current_page - 1).saturating_mul(self.per_page)
    }

    /// Pagination block returned alongside a listed page.
    pub fn meta(&self, total: i64) -> PageMeta {
        let last_page = if total <= 0 {
            1
        } else {
            (total + self.per_page - 1) / self.per_page
        };
        PageMeta {
            current_page: self.current_page,
            per_page: self.per_page,
            total,
            last_page,
        }
    }
}

/// Pagination metadata included in every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
}

/// Clamp a user-provided page size to `[1, MAX_PER_PAGE]`.
pub fn clamp_per_page(per_page: Option<i64>) -> i64 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

fn parse_integer(field: &str, raw: Option<&str>, errors: &mut FieldErrors) -> Option<i64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, messages::integer(field));
            None
        }
    }
}
