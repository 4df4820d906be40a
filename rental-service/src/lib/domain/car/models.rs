use std::fmt;

use chrono::DateTime;
use chrono::Utc;

/// Car unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(pub i64);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A catalog entry.
///
/// `is_currently_rented` is derived from the rental ledger at read time; it
/// is never written independently, so it cannot drift from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub price: i64,
    pub size: String,
    pub image: String,
    pub is_currently_rented: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to add a car to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCarCommand {
    pub name: String,
    pub price: i64,
    pub size: String,
    pub image: String,
}

/// Command to update a catalog entry. Only provided fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCarCommand {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub size: Option<String>,
    pub image: Option<String>,
}

/// Listing pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_count: u32,
    pub page_size: u32,
    pub count: u64,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, count: u64) -> Self {
        let page_count = (count as f64 / page_size as f64).ceil() as u32;
        Self {
            page,
            page_count,
            page_size,
            count,
        }
    }
}

/// One page of the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarPage {
    pub cars: Vec<Car>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_rounds_page_count_up() {
        let pagination = Pagination::new(1, 10, 21);
        assert_eq!(pagination.page_count, 3);
        assert_eq!(pagination.count, 21);
    }

    #[test]
    fn test_pagination_of_empty_catalog() {
        let pagination = Pagination::new(1, 10, 0);
        assert_eq!(pagination.page_count, 0);
    }
}
