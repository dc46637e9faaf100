//! Book management table (`/library`)

use std::sync::Arc;

use super::{EntityTable, Mount, TableRow};
use crate::{
    error::AppResult,
    gateway::RemoteCollection,
    models::{Book, BookDraft, BookStatus, Role},
    session::SessionContext,
    store::Notification,
};

impl TableRow for Book {
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Título",
        "Autor",
        "Publicación",
        "Editorial",
        "Categoría",
        "Estado",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.author.clone(),
            self.publication_date.clone(),
            self.publisher.clone(),
            self.category.clone(),
            self.status.label().to_string(),
        ]
    }
}

pub struct BooksView {
    pub table: EntityTable<Book>,
}

impl BooksView {
    pub fn new(gateway: Arc<dyn RemoteCollection<Book>>, required: Role, page_size: usize) -> Self {
        Self {
            table: EntityTable::new(gateway, required, page_size),
        }
    }

    pub async fn mount(&mut self, session: &SessionContext) -> Mount {
        self.table.mount(session).await
    }

    pub fn book(&self, id: i64) -> Option<&Book> {
        self.table.store().get(&id)
    }

    /// New books always enter the catalog as available
    pub async fn add(&mut self, mut draft: BookDraft) -> AppResult<()> {
        draft.status = BookStatus::available();
        self.table.store_mut()?.create(&draft).await?;
        Ok(())
    }

    /// Full-record overwrite of an existing book
    pub async fn edit(&mut self, book: Book) -> AppResult<()> {
        self.table.store_mut()?.update(&book).await?;
        Ok(())
    }

    pub async fn delete(&mut self, id: i64) -> AppResult<()> {
        self.table.store_mut()?.remove(&id).await?;
        Ok(())
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.table.take_notifications()
    }

    pub fn render(&self) -> String {
        self.table.render("Libros")
    }
}
