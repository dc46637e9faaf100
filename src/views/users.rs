//! Borrower account table (`/users`)

use std::sync::Arc;

use validator::Validate;

use super::{EntityTable, Mount, TableRow};
use crate::{
    error::AppResult,
    gateway::RemoteCollection,
    models::{Role, User, UserDraft, UserKey},
    session::SessionContext,
    store::Notification,
};

impl TableRow for User {
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Usuario",
        "Nombre",
        "Email",
        "Teléfono",
        "Nacimiento",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            self.full_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.birth_date.clone(),
        ]
    }
}

pub struct UsersView {
    pub table: EntityTable<User>,
}

impl UsersView {
    pub fn new(gateway: Arc<dyn RemoteCollection<User>>, required: Role, page_size: usize) -> Self {
        Self {
            table: EntityTable::new(gateway, required, page_size),
        }
    }

    pub async fn mount(&mut self, session: &SessionContext) -> Mount {
        self.table.mount(session).await
    }

    /// Every field is required; an incomplete draft never leaves the console
    pub async fn add(&mut self, draft: UserDraft) -> AppResult<()> {
        self.table.ensure_authorized()?;
        draft.validate()?;
        self.table.store_mut()?.create(&draft).await?;
        Ok(())
    }

    pub async fn delete(&mut self, username: &str) -> AppResult<()> {
        let key = UserKey {
            username: username.to_string(),
        };
        self.table.store_mut()?.remove(&key).await?;
        Ok(())
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.table.take_notifications()
    }

    pub fn render(&self) -> String {
        self.table.render("Usuarios")
    }
}
