//! Client-held entity lists reconciled with gateway results
//!
//! A store is the authoritative-for-this-view copy of one remote
//! collection: filled once by a list fetch, then mutated in place only after
//! the gateway confirms an operation. A failed operation never touches the
//! list; it queues a notification instead.

pub mod notifications;
pub mod pagination;

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    gateway::RemoteCollection,
    models::Entity,
};

pub use notifications::{Notification, Notifications, Severity};
pub use pagination::{page_count, paginate, PageRequest};

pub struct EntityListStore<E: Entity> {
    gateway: Arc<dyn RemoteCollection<E>>,
    items: Vec<E>,
    notifications: Notifications,
}

impl<E: Entity> EntityListStore<E> {
    pub fn new(gateway: Arc<dyn RemoteCollection<E>>) -> Self {
        Self {
            gateway,
            items: Vec::new(),
            notifications: Notifications::default(),
        }
    }

    /// Replace the whole list with the server's, in server order
    pub async fn load(&mut self) -> AppResult<()> {
        match self.gateway.list().await {
            Ok(items) => {
                tracing::info!("Loaded {} {} records", items.len(), E::NAME);
                self.items = items;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Loading {} records failed: {}", E::NAME, e);
                self.notifications.error(E::LABELS.load_failed);
                Err(e)
            }
        }
    }

    /// Append the canonical record returned for `draft`
    pub async fn create(&mut self, draft: &E::Draft) -> AppResult<&E> {
        match self.gateway.create(draft).await {
            Ok(created) => {
                self.items.push(created);
                self.notifications.success(E::LABELS.created);
                let index = self.items.len() - 1;
                Ok(&self.items[index])
            }
            Err(e) => {
                tracing::warn!("Creating {} failed: {}", E::NAME, e);
                self.notifications.error(E::LABELS.create_failed);
                Err(e)
            }
        }
    }

    /// Overwrite the record with the same key, keeping its position
    pub async fn update(&mut self, entity: &E) -> AppResult<&E> {
        let key = entity.key();
        let Some(position) = self.position(&key) else {
            self.notifications.error(E::LABELS.not_found);
            return Err(AppError::NotFound(format!("{} {:?}", E::NAME, key)));
        };

        match self.gateway.update(entity).await {
            Ok(updated) => {
                self.items[position] = updated;
                self.notifications.success(E::LABELS.updated);
                Ok(&self.items[position])
            }
            Err(e) => {
                tracing::warn!("Updating {} {:?} failed: {}", E::NAME, key, e);
                self.notifications.error(E::LABELS.update_failed);
                Err(e)
            }
        }
    }

    /// Delete the record whose delete key matches; returns the removed record
    pub async fn remove(&mut self, key: &E::DeleteKey) -> AppResult<E> {
        let Some(position) = self.items.iter().position(|e| &e.delete_key() == key) else {
            self.notifications.error(E::LABELS.not_found);
            return Err(AppError::NotFound(format!("{} {:?}", E::NAME, key)));
        };

        match self.gateway.remove(key).await {
            Ok(()) => {
                let removed = self.items.remove(position);
                self.notifications.success(E::LABELS.deleted);
                Ok(removed)
            }
            Err(e) => {
                tracing::warn!("Deleting {} {:?} failed: {}", E::NAME, key, e);
                self.notifications.error(E::LABELS.delete_failed);
                Err(e)
            }
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.items.iter().find(|e| &e.key() == key)
    }

    pub fn page(&self, request: PageRequest) -> &[E] {
        paginate(&self.items, request)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    fn position(&self, key: &E::Key) -> Option<usize> {
        self.items.iter().position(|e| &e.key() == key)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeCollection;
    use super::*;
    use crate::models::{Book, BookDraft, Loan, LoanKey};

    fn book(id: i64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    async fn loaded(items: Vec<Book>) -> (Arc<FakeCollection<Book>>, EntityListStore<Book>) {
        let fake = Arc::new(FakeCollection::with_items(items));
        let mut store = EntityListStore::new(fake.clone() as Arc<dyn RemoteCollection<Book>>);
        store.load().await.unwrap();
        (fake, store)
    }

    #[tokio::test]
    async fn create_appends_the_canonical_record() {
        let (fake, mut store) = loaded(vec![book(1, "A")]).await;
        fake.answer_create(book(2, "B"));

        let draft = BookDraft {
            title: "B".into(),
            ..Default::default()
        };
        let created = store.create(&draft).await.unwrap();
        assert_eq!(created.id, 2);

        assert_eq!(store.items(), &[book(1, "A"), book(2, "B")]);
        assert_eq!(store.notifications().last().unwrap().severity, Severity::Success);
    }

    #[tokio::test]
    async fn load_keeps_server_order() {
        let (_, store) = loaded(vec![book(3, "C"), book(1, "A"), book(2, "B")]).await;
        let ids: Vec<i64> = store.items().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn failed_load_leaves_empty_list_and_notifies() {
        let fake = Arc::new(FakeCollection::<Book>::with_items(vec![book(1, "A")]));
        fake.set_failing(true);
        let mut store = EntityListStore::new(fake as Arc<dyn RemoteCollection<Book>>);

        assert!(store.load().await.is_err());
        assert!(store.is_empty());
        assert_eq!(
            store.notifications().last().unwrap().message,
            "Error al recuperar los libros"
        );
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let (_, mut store) = loaded(vec![book(1, "A"), book(2, "B"), book(3, "C")]).await;

        store.update(&book(2, "B2")).await.unwrap();
        assert_eq!(store.items(), &[book(1, "A"), book(2, "B2"), book(3, "C")]);
    }

    #[tokio::test]
    async fn update_of_unknown_record_is_rejected() {
        let (_, mut store) = loaded(vec![book(1, "A")]).await;

        let err = store.update(&book(9, "Z")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.items(), &[book(1, "A")]);
    }

    #[tokio::test]
    async fn remove_present_key_shrinks_by_one() {
        let (fake, mut store) = loaded(vec![book(1, "A"), book(2, "B"), book(3, "C")]).await;

        let removed = store.remove(&2).await.unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(store.items(), &[book(1, "A"), book(3, "C")]);
        assert_eq!(fake.removed.lock().unwrap().as_slice(), &[2]);
    }

    #[tokio::test]
    async fn remove_absent_key_reports_and_skips_the_network() {
        let (fake, mut store) = loaded(vec![book(1, "A")]).await;

        let err = store.remove(&7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.len(), 1);
        assert!(fake.removed.lock().unwrap().is_empty());
        assert_eq!(store.notifications().last().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn failures_never_mutate_the_list() {
        let (fake, mut store) = loaded(vec![book(1, "A"), book(2, "B")]).await;
        let before = store.items().to_vec();
        fake.set_failing(true);

        assert!(store.update(&book(1, "changed")).await.is_err());
        assert!(store.remove(&2).await.is_err());
        assert!(store.create(&BookDraft::default()).await.is_err());

        assert_eq!(store.items(), before.as_slice());
        let messages: Vec<String> = store
            .notifications_mut()
            .drain()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Error al actualizar el libro",
                "Error al eliminar el libro",
                "Error al agregar el libro"
            ]
        );
    }

    #[tokio::test]
    async fn loans_are_removed_by_composite_key() {
        let loan: Loan = serde_json::from_value(serde_json::json!({"idprestamo": 5, "idbook": 9})).unwrap();
        let other: Loan = serde_json::from_value(serde_json::json!({"idprestamo": 6, "idbook": 9})).unwrap();
        let fake = Arc::new(FakeCollection::with_items(vec![loan.clone(), other.clone()]));
        let mut store = EntityListStore::new(fake.clone() as Arc<dyn RemoteCollection<Loan>>);
        store.load().await.unwrap();

        let key = LoanKey { idprestamo: "5".into(), idbook: "9".into() };

        fake.set_failing(true);
        assert!(store.remove(&key).await.is_err());
        assert_eq!(store.items(), &[loan.clone(), other.clone()]);
        assert_eq!(store.notifications().last().unwrap().message, "Error al eliminar el préstamo");

        fake.set_failing(false);
        store.remove(&key).await.unwrap();
        assert_eq!(store.items(), &[other]);
    }

    #[tokio::test]
    async fn pages_follow_the_list() {
        let (fake, mut store) = loaded((1..=6).map(|i| book(i, "x")).collect()).await;
        assert_eq!(store.page(PageRequest::new(1, 5)).len(), 1);

        fake.answer_create(book(7, "y"));
        store.create(&BookDraft::default()).await.unwrap();
        assert_eq!(store.page(PageRequest::new(1, 5)).len(), 2);
    }
}
