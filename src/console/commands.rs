//! Console command line grammar

use clap::{Parser, Subcommand};

use crate::models::Book;
use crate::routes::Route;

#[derive(Parser, Debug)]
#[command(name = "lien", no_binary_name = true, disable_help_subcommand = true)]
#[command(about = "LIEN library lending console", long_about = None)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a view by path (/library) or name (library)
    #[command(alias = "o")]
    Open {
        view: String,

        /// Book to request, for the loan request view
        #[arg(long)]
        book: Option<i64>,
    },

    /// Show another page of the current list
    #[command(alias = "p")]
    Page {
        /// One-based page number
        index: usize,

        /// Rows per page (goes back to the first page)
        #[arg(long)]
        size: Option<usize>,
    },

    /// Add a record to the current table
    #[command(alias = "a")]
    Add,

    /// Edit a book of the current table
    #[command(alias = "e")]
    Edit { id: i64 },

    /// Delete a record: book id, username or loan id
    #[command(alias = "rm")]
    Delete { key: String },

    /// Sign in
    Login,

    /// Change a temporary password
    Password,

    /// Sign out
    Logout,

    /// Fill in the loan request form
    Request,

    /// Show the navigation menu
    #[command(alias = "m")]
    Menu,

    #[command(alias = "exit")]
    Quit,
}

pub fn parse(line: &str) -> Result<Command, clap::Error> {
    CommandLine::try_parse_from(line.split_whitespace()).map(|cli| cli.command)
}

/// Resolve an `open` target: a path (with query) or a bare view name
pub fn resolve_view(name: &str) -> Option<Route> {
    if name.starts_with('/') {
        return Route::parse(name);
    }
    let route = match name.to_lowercase().as_str() {
        "" | "landing" => Route::Landing,
        "home" | "catalogo" | "catálogo" => Route::Home,
        "login" => Route::Login,
        "register" | "password" => Route::ChangePassword,
        "library" | "books" | "libros" => Route::Books,
        "users" | "usuarios" => Route::Users,
        "prestamos" | "préstamos" | "loans" => Route::Loans,
        "solicitud" | "request" => Route::LoanRequest(Box::new(Book::default())),
        _ => return None,
    };
    Some(route)
}
