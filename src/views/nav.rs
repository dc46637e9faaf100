//! Navigation menu, shaped by the session

use std::fmt;

use crate::{models::Role, routes::Route, session::SessionContext};

#[derive(Debug, Clone, PartialEq)]
pub enum MenuTarget {
    Open(Route),
    Logout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub target: MenuTarget,
}

impl MenuEntry {
    fn open(label: &'static str, route: Route) -> Self {
        Self {
            label,
            target: MenuTarget::Open(route),
        }
    }
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            MenuTarget::Open(route) => write!(f, "{:<16} open {}", self.label, route),
            MenuTarget::Logout => write!(f, "{:<16} logout", self.label),
        }
    }
}

/// Entries visible for this session.
///
/// The management entries follow the same exact role match as the gate;
/// showing them is advisory, the gate and the services decide.
pub fn menu(session: &SessionContext, admin_role: &Role) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::open("Catálogo", Route::Home)];

    if !session.is_authenticated() {
        entries.push(MenuEntry::open("Iniciar sesión", Route::Login));
        entries.push(MenuEntry::open("Cambiar contraseña", Route::ChangePassword));
        return entries;
    }

    if session.has_role(admin_role) {
        entries.push(MenuEntry::open("Libros", Route::Books));
        entries.push(MenuEntry::open("Usuarios", Route::Users));
        entries.push(MenuEntry::open("Préstamos", Route::Loans));
    }
    entries.push(MenuEntry {
        label: "Cerrar sesión",
        target: MenuTarget::Logout,
    });
    entries
}
