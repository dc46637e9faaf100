//! Addressable views of the console

use reqwest::Url;
use std::fmt;

use crate::models::Book;

const BASE: &str = "http://lien.local/";

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// `/`, renders the public catalog
    Landing,
    Home,
    Login,
    /// `/register`, first-login password change
    ChangePassword,
    Books,
    Users,
    Loans,
    /// `/solicitud?book=<json>`
    LoanRequest(Box<Book>),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Home => "/home",
            Route::Login => "/login",
            Route::ChangePassword => "/register",
            Route::Books => "/library",
            Route::Users => "/users",
            Route::Loans => "/prestamos",
            Route::LoanRequest(_) => "/solicitud",
        }
    }

    /// Path plus query, as a link would carry it
    pub fn href(&self) -> String {
        match self {
            Route::LoanRequest(book) => {
                let json = serde_json::to_string(book).unwrap_or_else(|_| "{}".to_string());
                Url::parse_with_params(&format!("{}solicitud", BASE), &[("book", json)])
                    .map(|url| format!("{}?{}", url.path(), url.query().unwrap_or_default()))
                    .unwrap_or_else(|_| self.path().to_string())
            }
            other => other.path().to_string(),
        }
    }

    /// Resolve a link. A missing or unreadable `book` parameter yields an
    /// empty book, as the request form still renders.
    pub fn parse(href: &str) -> Option<Route> {
        let url = Url::parse(BASE).ok()?.join(href).ok()?;
        let route = match url.path().trim_end_matches('/') {
            "" => Route::Landing,
            "/home" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::ChangePassword,
            "/library" => Route::Books,
            "/users" => Route::Users,
            "/prestamos" => Route::Loans,
            "/solicitud" => {
                let book = url
                    .query_pairs()
                    .find(|(name, _)| name == "book")
                    .and_then(|(_, raw)| serde_json::from_str::<Book>(&raw).ok())
                    .unwrap_or_default();
                Route::LoanRequest(Box::new(book))
            }
            _ => return None,
        };
        Some(route)
    }

    /// Views behind the admin role gate
    pub fn is_admin_only(&self) -> bool {
        matches!(self, Route::Books | Route::Users | Route::Loans)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
