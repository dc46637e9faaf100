//! Paginated, role-gated entity table shared by the management views

use std::fmt::Write as _;
use std::sync::Arc;

use super::Mount;
use crate::{
    error::{AppError, AppResult},
    gateway::RemoteCollection,
    models::{Entity, Role},
    session::{GateState, RoleGate, SessionContext},
    store::{page_count, EntityListStore, Notification, PageRequest},
};

/// Column layout of an entity in a table view
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

pub struct EntityTable<E: Entity> {
    gate: RoleGate,
    store: EntityListStore<E>,
    page: PageRequest,
}

impl<E: Entity + TableRow> EntityTable<E> {
    pub fn new(gateway: Arc<dyn RemoteCollection<E>>, required: Role, page_size: usize) -> Self {
        Self {
            gate: RoleGate::new(required),
            store: EntityListStore::new(gateway),
            page: PageRequest::first(page_size),
        }
    }

    /// Check the role, then fetch the list.
    ///
    /// A failed fetch still mounts the view, empty, with the failure queued.
    pub async fn mount(&mut self, session: &SessionContext) -> Mount {
        if let GateState::Redirected(to) = self.gate.check(session) {
            return Mount::Redirect(to.clone());
        }
        if let Err(e) = self.store.load().await {
            tracing::debug!("{} table mounted empty: {}", E::NAME, e);
        }
        Mount::Ready
    }

    /// Refuse actions on a view the gate has not let through
    pub fn ensure_authorized(&self) -> AppResult<()> {
        if self.gate.is_authorized() {
            Ok(())
        } else {
            Err(AppError::Unsupported(format!(
                "the {} view is not mounted",
                E::NAME
            )))
        }
    }

    pub fn store(&self) -> &EntityListStore<E> {
        &self.store
    }

    pub fn store_mut(&mut self) -> AppResult<&mut EntityListStore<E>> {
        self.ensure_authorized()?;
        Ok(&mut self.store)
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Jump to a zero-based page, optionally changing its size
    pub fn set_page(&mut self, index: usize, size: Option<usize>) {
        self.page = match size {
            Some(size) if size != self.page.size => self.page.with_size(size),
            _ => PageRequest::new(index, self.page.size),
        };
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.store.notifications_mut().drain()
    }

    pub fn render(&self, title: &str) -> String {
        let mut out = String::new();
        if !self.gate.is_authorized() {
            return out;
        }

        let rows: Vec<Vec<String>> = self.store.page(self.page).iter().map(TableRow::cells).collect();
        let mut widths: Vec<usize> = E::COLUMNS.iter().map(|c| c.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let _ = writeln!(out, "== {} ==", title);
        let header: Vec<String> = E::COLUMNS.iter().map(|c| c.to_string()).collect();
        let _ = writeln!(out, "{}", format_row(&header, &widths));
        let _ = writeln!(
            out,
            "{}",
            widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
        );
        for row in &rows {
            let _ = writeln!(out, "{}", format_row(row, &widths));
        }

        let pages = page_count(self.store.len(), self.page.size).max(1);
        let _ = writeln!(
            out,
            "Página {} de {} ({} registros, {} por página)",
            self.page.index + 1,
            pages,
            self.store.len(),
            self.page.size
        );
        out
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
