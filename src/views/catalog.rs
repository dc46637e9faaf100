//! Public book catalog (`/` and `/home`)

use std::fmt::Write as _;
use std::sync::Arc;

use crate::{
    gateway::RemoteCollection,
    models::Book,
    routes::Route,
    store::{page_count, EntityListStore, Notification, PageRequest},
};

pub struct CatalogView {
    store: EntityListStore<Book>,
    page: PageRequest,
}

impl CatalogView {
    pub fn new(gateway: Arc<dyn RemoteCollection<Book>>, page_size: usize) -> Self {
        Self {
            store: EntityListStore::new(gateway),
            page: PageRequest::first(page_size),
        }
    }

    /// Not gated; a failed fetch leaves an empty catalog
    pub async fn mount(&mut self) {
        if let Err(e) = self.store.load().await {
            tracing::debug!("Catalog mounted empty: {}", e);
        }
    }

    pub fn books(&self) -> &[Book] {
        self.store.items()
    }

    pub fn set_page(&mut self, index: usize, size: Option<usize>) {
        self.page = match size {
            Some(size) if size != self.page.size => self.page.with_size(size),
            _ => PageRequest::new(index, self.page.size),
        };
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.store.notifications_mut().drain()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== Catálogo ==");
        if self.store.is_empty() {
            let _ = writeln!(out, "No hay libros para mostrar.");
            return out;
        }

        for book in self.store.page(self.page) {
            let _ = writeln!(out, "#{} {}", book.id, book.title);
            let _ = writeln!(out, "   {} · {} ({})", book.author, book.publisher, book.publication_date);
            if !book.category.is_empty() {
                let _ = writeln!(out, "   {}", book.category);
            }
            let _ = writeln!(out, "   {} · portada: {}", book.status.label(), book.cover_url());
            if book.status.is_available() {
                let _ = writeln!(
                    out,
                    "   Solicitar: {}",
                    Route::LoanRequest(Box::new(book.clone())).href()
                );
            }
        }

        let _ = writeln!(
            out,
            "Página {} de {}",
            self.page.index + 1,
            page_count(self.store.len(), self.page.size).max(1)
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookStatus;
    use crate::store::testing::FakeCollection;

    fn catalog(n: i64) -> Vec<Book> {
        (1..=n)
            .map(|id| Book {
                id,
                title: format!("Título {}", id),
                status: if id % 2 == 0 { BookStatus::from("1") } else { BookStatus::available() },
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn renders_cards_page_by_page() {
        let mut view = CatalogView::new(Arc::new(FakeCollection::with_items(catalog(14))), 12);
        view.mount().await;

        let first = view.render();
        assert!(first.contains("#12 Título 12"));
        assert!(!first.contains("#13 "));
        assert!(first.contains("Página 1 de 2"));

        view.set_page(1, None);
        let second = view.render();
        assert!(second.contains("#13 Título 13"));
        assert!(second.contains("#14 Título 14"));
    }

    #[tokio::test]
    async fn only_available_books_link_to_the_request_form() {
        let mut view = CatalogView::new(Arc::new(FakeCollection::with_items(catalog(2))), 12);
        view.mount().await;

        let text = view.render();
        assert_eq!(text.matches("Solicitar: /solicitud?book=").count(), 1);
        assert!(text.contains("No disponible"));
        assert!(text.contains("portada: /fallback.png"));
    }

    #[tokio::test]
    async fn load_failure_is_reported() {
        let gateway = Arc::new(FakeCollection::with_items(catalog(3)));
        gateway.set_failing(true);
        let mut view = CatalogView::new(gateway, 12);
        view.mount().await;

        assert!(view.books().is_empty());
        assert_eq!(view.take_notifications()[0].message, "Error al recuperar los libros");
        assert!(view.render().contains("No hay libros para mostrar."));
    }
}
