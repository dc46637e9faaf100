//! Loan request page (`/solicitud`)

use std::fmt::Write as _;

use crate::{
    error::AppResult,
    models::Book,
    services::loan_request::{LoanRequestForm, LoanRequestService},
};

pub struct LoanRequestView {
    book: Book,
    service: LoanRequestService,
    confirmation: Option<&'static str>,
}

impl LoanRequestView {
    pub fn new(book: Book, service: LoanRequestService) -> Self {
        Self {
            book,
            service,
            confirmation: None,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn submit(&mut self, form: &LoanRequestForm) -> AppResult<&'static str> {
        let message = self.service.submit(&self.book, form)?;
        self.confirmation = Some(message);
        Ok(message)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== Solicitud de préstamo ==");
        if self.book.title.is_empty() {
            let _ = writeln!(out, "Libro: (sin datos)");
        } else {
            let _ = writeln!(out, "Libro: {} ({})", self.book.title, self.book.author);
            let _ = writeln!(out, "Editorial: {} · {}", self.book.publisher, self.book.publication_date);
        }
        match self.confirmation {
            Some(message) => {
                let _ = writeln!(out, "{}", message);
            }
            None => {
                let _ = writeln!(out, "Use `request` para llenar el formulario.");
            }
        }
        out
    }
}
