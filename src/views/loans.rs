//! Loan table (`/prestamos`)
//!
//! Besides the loans themselves this view fetches the books and users, to
//! offer them in the add form and to copy the lent book's fields into the
//! new loan row.

use chrono::{Local, NaiveDate};

use super::{EntityTable, Mount, TableRow};
use crate::{
    error::{AppError, AppResult},
    gateway::Gateways,
    models::{Book, Entity, Loan, LoanDraft, LoanKey, Role, Unassigned, User, UNASSIGNED_ID},
    session::SessionContext,
    store::{EntityListStore, Notification},
};

impl TableRow for Loan {
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Usuario",
        "Libro",
        "Título",
        "Autor",
        "Inicio",
        "Fin",
        "Estado",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.user_id.clone(),
            self.book_id.clone(),
            self.title.clone(),
            self.author.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.status_label().to_string(),
        ]
    }
}

/// Add-loan form as filled in by the operator
#[derive(Debug, Clone, PartialEq)]
pub struct LoanForm {
    pub user_id: String,
    pub book_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Default for LoanForm {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            book_id: String::new(),
            start_date: Local::now().date_naive(),
            end_date: None,
        }
    }
}

pub struct LoansView {
    pub table: EntityTable<Loan>,
    books: EntityListStore<Book>,
    users: EntityListStore<User>,
}

impl LoansView {
    pub fn new(gateways: &Gateways, required: Role, page_size: usize) -> Self {
        Self {
            table: EntityTable::new(gateways.loans.clone(), required, page_size),
            books: EntityListStore::new(gateways.books.clone()),
            users: EntityListStore::new(gateways.users.clone()),
        }
    }

    pub async fn mount(&mut self, session: &SessionContext) -> Mount {
        let mount = self.table.mount(session).await;
        if mount == Mount::Ready {
            if let Err(e) = self.books.load().await {
                tracing::debug!("Loan view has no books to offer: {}", e);
            }
            if let Err(e) = self.users.load().await {
                tracing::debug!("Loan view has no users to offer: {}", e);
            }
        }
        mount
    }

    pub fn books(&self) -> &[Book] {
        self.books.items()
    }

    pub fn users(&self) -> &[User] {
        self.users.items()
    }

    /// Check the form against the fetched lists and build the draft
    pub fn draft(&self, form: &LoanForm) -> AppResult<LoanDraft> {
        let user = self
            .users
            .items()
            .iter()
            .find(|u| u.id.to_string() == form.user_id.trim());
        let book = self
            .books
            .items()
            .iter()
            .find(|b| b.id.to_string() == form.book_id.trim());
        let (Some(user), Some(book)) = (user, book) else {
            return Err(AppError::Validation(
                "Seleccione un usuario y un libro.".to_string(),
            ));
        };

        let Some(end_date) = form.end_date else {
            return Err(AppError::Validation(
                "La fecha de fin es obligatoria.".to_string(),
            ));
        };
        if end_date < form.start_date {
            return Err(AppError::Validation(
                "La fecha de fin no puede ser anterior a la fecha de inicio.".to_string(),
            ));
        }

        Ok(LoanDraft {
            id: Unassigned,
            start_date: form.start_date,
            end_date,
            user_id: user.id.to_string(),
            book_id: book.id.to_string(),
            book: Some(book.clone()),
        })
    }

    pub async fn add(&mut self, form: &LoanForm) -> AppResult<()> {
        self.table.ensure_authorized()?;
        let draft = self.draft(form)?;
        let store = self.table.store_mut()?;
        let created_id = store.create(&draft).await?.id.clone();

        // Without the service's id the new row could not be deleted
        if created_id == UNASSIGNED_ID {
            if let Err(e) = store.load().await {
                tracing::warn!("Reloading loans after create failed: {}", e);
            }
        }
        Ok(())
    }

    /// Delete by loan id; the service also wants the lent book's id
    pub async fn delete(&mut self, loan_id: &str) -> AppResult<()> {
        let store = self.table.store_mut()?;
        if loan_id.trim() == UNASSIGNED_ID {
            return Err(AppError::Validation(
                "El préstamo aún no tiene número asignado. Abra de nuevo la vista.".to_string(),
            ));
        }
        let key = match store.get(&loan_id.to_string()) {
            Some(loan) => loan.delete_key(),
            None => LoanKey {
                idprestamo: loan_id.to_string(),
                idbook: String::new(),
            },
        };
        store.remove(&key).await?;
        Ok(())
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        let mut notes = self.table.take_notifications();
        notes.extend(self.books.notifications_mut().drain());
        notes.extend(self.users.notifications_mut().drain());
        notes
    }

    pub fn render(&self) -> String {
        self.table.render("Préstamos")
    }
}
