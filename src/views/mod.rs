//! Controllers for the addressable views of the console
//!
//! A view owns the state of one mounted page. Opening another route drops
//! it, so nothing survives navigation.

pub mod books;
pub mod catalog;
pub mod loan_request;
pub mod loans;
pub mod nav;
pub mod table;
pub mod users;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::routes::Route;

pub use books::BooksView;
pub use catalog::CatalogView;
pub use loan_request::LoanRequestView;
pub use loans::{LoanForm, LoansView};
pub use nav::{menu, MenuEntry, MenuTarget};
pub use table::{EntityTable, TableRow};
pub use users::UsersView;

/// Outcome of mounting a view
#[derive(Debug, Clone, PartialEq)]
pub enum Mount {
    Ready,
    /// Nothing rendered; go there instead
    Redirect(Route),
}

/// Read a `YYYY-MM-DD` form field; blank means not filled in
pub fn parse_date(raw: &str) -> AppResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::Validation(format!("Fecha no válida: {} (AAAA-MM-DD)", raw)))
}
