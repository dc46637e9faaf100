//! Public loan request form

use chrono::{Local, NaiveDate};
use validator::ValidateEmail;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

pub const REQUEST_SENT: &str = "Solicitud enviada con éxito";

/// What a visitor fills in to ask for a book
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequestForm {
    pub full_name: String,
    pub email: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for LoanRequestForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            start_date: Some(Local::now().date_naive()),
            end_date: None,
        }
    }
}

impl LoanRequestForm {
    pub fn check(&self) -> AppResult<(NaiveDate, NaiveDate)> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(required());
        };
        if self.full_name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(required());
        }
        if !self.email.trim().validate_email() {
            return Err(AppError::Validation(
                "El correo electrónico no es válido.".to_string(),
            ));
        }
        if end <= start {
            return Err(AppError::Validation(
                "La fecha de fin debe ser posterior a la fecha de inicio.".to_string(),
            ));
        }
        Ok((start, end))
    }
}

fn required() -> AppError {
    AppError::Validation("Todos los campos son obligatorios.".to_string())
}

/// Accepts requests locally; nothing is sent to the remote services yet
#[derive(Debug, Clone, Default)]
pub struct LoanRequestService;

impl LoanRequestService {
    pub fn new() -> Self {
        Self
    }

    pub fn submit(&self, book: &Book, form: &LoanRequestForm) -> AppResult<&'static str> {
        let (start, end) = form.check()?;
        tracing::info!(
            book_id = book.id,
            title = %book.title,
            requester = %form.full_name,
            email = %form.email,
            start = %start,
            end = %end,
            "Loan request received"
        );
        Ok(REQUEST_SENT)
    }
}
