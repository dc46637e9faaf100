//! Line-oriented terminal front end
//!
//! Reads one command per line, drives the mounted view and writes its
//! rendering. Forms ask for one field per line; an empty answer keeps the
//! default shown in brackets and `-` clears it.

pub mod commands;

use chrono::Local;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDraft, ChangePasswordForm, LoginForm, Role, Unassigned, UserDraft},
    routes::Route,
    services::{loan_request::LoanRequestForm, Navigation},
    session::SessionContext,
    store::Notification,
    views::{
        self, BooksView, CatalogView, LoanForm, LoanRequestView, LoansView, Mount, UsersView,
    },
    AppState,
};

pub use commands::{parse, resolve_view, Command};

/// Form answer that blanks a field instead of keeping its default
const CLEAR: &str = "-";

enum ActiveView {
    Catalog(CatalogView),
    Books(BooksView),
    Users(UsersView),
    Loans(LoansView),
    LoanRequest(LoanRequestView),
    Login,
    ChangePassword,
}

pub struct Console<R, W> {
    state: AppState,
    input: R,
    output: W,
    route: Route,
    view: ActiveView,
    session: SessionContext,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(state: AppState, input: R, output: W) -> Self {
        Self {
            state,
            input,
            output,
            route: Route::Landing,
            view: ActiveView::Login,
            session: SessionContext::anonymous(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Serve commands until `quit` or end of input
    pub async fn run(&mut self) -> AppResult<()> {
        self.navigate(Route::Landing).await?;

        loop {
            write!(self.output, "lien {}> ", self.route.path())?;
            self.output.flush()?;
            let Some(line) = self.read_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match commands::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }

            tracing::debug!("Command {:?} on {}", command, self.route);
            let result = self.dispatch(command).await;
            let notes = self.take_notifications();
            if let Err(e) = result {
                self.report(&e, !notes.is_empty())?;
            }
            for note in notes {
                writeln!(self.output, "{}", note)?;
            }
        }

        tracing::info!("Console closed");
        Ok(())
    }

    async fn dispatch(&mut self, command: Command) -> AppResult<()> {
        match command {
            Command::Open { view, book } => {
                let route = match resolve_view(&view) {
                    Some(Route::LoanRequest(carried)) => match book {
                        Some(id) => Route::LoanRequest(Box::new(self.find_book(id).await?)),
                        None => Route::LoanRequest(carried),
                    },
                    Some(route) => route,
                    None => return Err(AppError::Validation(format!("Vista desconocida: {}", view))),
                };
                self.navigate(route).await
            }
            Command::Page { index, size } => {
                let index = index.saturating_sub(1);
                match &mut self.view {
                    ActiveView::Catalog(view) => view.set_page(index, size),
                    ActiveView::Books(view) => view.table.set_page(index, size),
                    ActiveView::Users(view) => view.table.set_page(index, size),
                    ActiveView::Loans(view) => view.table.set_page(index, size),
                    _ => return Err(not_here("páginas")),
                }
                self.render()
            }
            Command::Add => {
                self.add().await?;
                self.render()
            }
            Command::Edit { id } => {
                self.edit(id).await?;
                self.render()
            }
            Command::Delete { key } => {
                match &mut self.view {
                    ActiveView::Books(view) => {
                        let id = key
                            .parse::<i64>()
                            .map_err(|_| AppError::Validation(format!("Id de libro no válido: {}", key)))?;
                        view.delete(id).await?
                    }
                    ActiveView::Users(view) => view.delete(&key).await?,
                    ActiveView::Loans(view) => view.delete(&key).await?,
                    _ => return Err(not_here("bajas")),
                }
                self.render()
            }
            Command::Login => self.login().await,
            Command::Password => self.change_password().await,
            Command::Logout => {
                let navigation = self.state.services.auth.logout()?;
                writeln!(self.output, "Sesión cerrada.")?;
                self.follow(navigation).await
            }
            Command::Request => self.request().await,
            Command::Menu => {
                let admin = Role::from(self.state.config.console.admin_role.as_str());
                for entry in views::menu(&self.session, &admin) {
                    writeln!(self.output, "  {}", entry)?;
                }
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    /// Mount `route`, following redirects, and render it
    async fn navigate(&mut self, route: Route) -> AppResult<()> {
        self.session = self.state.services.auth.current_session()?;
        let mut route = route;

        loop {
            let (view, mount) = self.open(&route).await;
            match mount {
                Mount::Ready => {
                    self.view = view;
                    self.route = route;
                    break;
                }
                Mount::Redirect(to) => {
                    tracing::debug!("{} redirected to {}", route, to);
                    route = to;
                }
            }
        }

        self.render()?;
        for note in self.take_notifications() {
            writeln!(self.output, "{}", note)?;
        }
        Ok(())
    }

    async fn open(&self, route: &Route) -> (ActiveView, Mount) {
        let config = &self.state.config.console;
        let gateways = &self.state.gateways;
        let admin = Role::from(config.admin_role.as_str());

        match route {
            Route::Landing | Route::Home => {
                let mut view = CatalogView::new(gateways.books.clone(), config.catalog_page_size);
                view.mount().await;
                (ActiveView::Catalog(view), Mount::Ready)
            }
            Route::Login => (ActiveView::Login, Mount::Ready),
            Route::ChangePassword => (ActiveView::ChangePassword, Mount::Ready),
            Route::Books => {
                let mut view = BooksView::new(gateways.books.clone(), admin, config.page_size);
                let mount = view.mount(&self.session).await;
                (ActiveView::Books(view), mount)
            }
            Route::Users => {
                let mut view = UsersView::new(gateways.users.clone(), admin, config.page_size);
                let mount = view.mount(&self.session).await;
                (ActiveView::Users(view), mount)
            }
            Route::Loans => {
                let mut view = LoansView::new(gateways, admin, config.page_size);
                let mount = view.mount(&self.session).await;
                (ActiveView::Loans(view), mount)
            }
            Route::LoanRequest(book) => {
                let view = LoanRequestView::new(
                    book.as_ref().clone(),
                    self.state.services.loan_requests.clone(),
                );
                (ActiveView::LoanRequest(view), Mount::Ready)
            }
        }
    }

    async fn follow(&mut self, navigation: Navigation) -> AppResult<()> {
        match navigation {
            Navigation::Stay => Ok(()),
            Navigation::To(route) => self.navigate(route).await,
            Navigation::After { delay, to } => {
                tokio::time::sleep(delay).await;
                self.navigate(to).await
            }
        }
    }

    async fn login(&mut self) -> AppResult<()> {
        let form = LoginForm {
            username: self.ask("Usuario", None).await?,
            password: self.ask("Contraseña", None).await?,
        };
        let (_, outcome) = self.state.services.auth.login(&form).await?;
        writeln!(self.output, "{}", outcome.message)?;
        self.follow(outcome.navigation).await
    }

    async fn change_password(&mut self) -> AppResult<()> {
        let form = ChangePasswordForm {
            username: self.ask("Usuario", None).await?,
            temporary_password: self.ask("Contraseña temporal", None).await?,
            new_password: self.ask("Nueva contraseña", None).await?,
            confirm_new_password: self.ask("Confirmar nueva contraseña", None).await?,
        };
        let outcome = self.state.services.auth.change_password(&form).await?;
        writeln!(self.output, "{}", outcome.message)?;
        self.output.flush()?;
        self.follow(outcome.navigation).await
    }

    async fn request(&mut self) -> AppResult<()> {
        if !matches!(self.view, ActiveView::LoanRequest(_)) {
            return Err(not_here("solicitudes"));
        }
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let form = LoanRequestForm {
            full_name: self.ask("Nombre", None).await?,
            email: self.ask("Email", None).await?,
            start_date: views::parse_date(&self.ask("Fecha de inicio", Some(&today)).await?)?,
            end_date: views::parse_date(&self.ask("Fecha de fin", None).await?)?,
        };
        if let ActiveView::LoanRequest(view) = &mut self.view {
            let message = view.submit(&form)?;
            writeln!(self.output, "{}", message)?;
        }
        Ok(())
    }

    async fn add(&mut self) -> AppResult<()> {
        match &self.view {
            ActiveView::Books(view) => {
                view.table.ensure_authorized()?;
                let draft = self.ask_book(&Book::default()).await?;
                if let ActiveView::Books(view) = &mut self.view {
                    view.add(draft).await?;
                }
            }
            ActiveView::Users(_) => {
                let draft = UserDraft {
                    id: Unassigned,
                    username: self.ask("Usuario", None).await?,
                    full_name: self.ask("Nombre", None).await?,
                    email: self.ask("Email", None).await?,
                    phone: self.ask("Teléfono", None).await?,
                    birth_date: self.ask("Fecha de nacimiento", None).await?,
                };
                if let ActiveView::Users(view) = &mut self.view {
                    view.add(draft).await?;
                }
            }
            ActiveView::Loans(view) => {
                let choices: Vec<String> = view
                    .users()
                    .iter()
                    .map(|u| format!("  usuario {}: {}", u.id, u.username))
                    .chain(view.books().iter().map(|b| format!("  libro {}: {}", b.id, b.title)))
                    .collect();
                for choice in choices {
                    writeln!(self.output, "{}", choice)?;
                }

                let defaults = LoanForm::default();
                let start = defaults.start_date.format("%Y-%m-%d").to_string();
                let user_id = self.ask("Id de usuario", None).await?;
                let book_id = self.ask("Id de libro", None).await?;
                let start_date = views::parse_date(&self.ask("Fecha de inicio", Some(&start)).await?)?
                    .unwrap_or(defaults.start_date);
                let end_date = views::parse_date(&self.ask("Fecha de fin", None).await?)?;
                let form = LoanForm {
                    user_id,
                    book_id,
                    start_date,
                    end_date,
                };
                if let ActiveView::Loans(view) = &mut self.view {
                    view.add(&form).await?;
                }
            }
            _ => return Err(not_here("altas")),
        }
        Ok(())
    }

    async fn edit(&mut self, id: i64) -> AppResult<()> {
        let ActiveView::Books(view) = &self.view else {
            return Err(not_here("ediciones"));
        };
        let Some(current) = view.book(id).cloned() else {
            return Err(AppError::Validation(format!("No existe el libro {}", id)));
        };

        let draft = self.ask_book(&current).await?;
        let book = Book {
            id: current.id,
            title: draft.title,
            author: draft.author,
            publication_date: draft.publication_date,
            publisher: draft.publisher,
            category: draft.category,
            description: draft.description,
            status: current.status.clone(),
            cover_image: draft.cover_image,
        };
        if let ActiveView::Books(view) = &mut self.view {
            view.edit(book).await?;
        }
        Ok(())
    }

    async fn ask_book(&mut self, current: &Book) -> AppResult<BookDraft> {
        let title = self.ask("Título", Some(&current.title)).await?;
        let author = self.ask("Autor", Some(&current.author)).await?;
        let publication_date = self
            .ask("Fecha de publicación", Some(&current.publication_date))
            .await?;
        let publisher = self.ask("Editorial", Some(&current.publisher)).await?;
        let category = self.ask("Categoría", Some(&current.category)).await?;
        let description = self.ask("Descripción", Some(&current.description)).await?;
        let cover = current.cover_image.clone().unwrap_or_default();
        let cover = self.ask("Portada (archivo o URL)", Some(&cover)).await?;

        Ok(BookDraft {
            id: Unassigned,
            title,
            author,
            publication_date,
            publisher,
            category,
            description,
            status: current.status.clone(),
            cover_image: (!cover.is_empty()).then_some(cover),
        })
    }

    /// Book for the request view: from the mounted lists, else fetched
    async fn find_book(&self, id: i64) -> AppResult<Book> {
        let mounted: &[Book] = match &self.view {
            ActiveView::Catalog(view) => view.books(),
            ActiveView::Books(view) => view.table.store().items(),
            ActiveView::Loans(view) => view.books(),
            _ => &[],
        };
        if let Some(book) = mounted.iter().find(|b| b.id == id) {
            return Ok(book.clone());
        }

        let books = self.state.gateways.books.list().await?;
        Ok(books.into_iter().find(|b| b.id == id).unwrap_or_else(|| {
            tracing::warn!("Book {} not found; request form opens empty", id);
            Book::default()
        }))
    }

    fn render(&mut self) -> AppResult<()> {
        let text = match &self.view {
            ActiveView::Catalog(view) => view.render(),
            ActiveView::Books(view) => view.render(),
            ActiveView::Users(view) => view.render(),
            ActiveView::Loans(view) => view.render(),
            ActiveView::LoanRequest(view) => view.render(),
            ActiveView::Login => "== Iniciar sesión ==\nUse `login` para ingresar.\n".to_string(),
            ActiveView::ChangePassword => {
                "== Cambiar contraseña ==\nUse `password` para cambiar la contraseña temporal.\n"
                    .to_string()
            }
        };
        write!(self.output, "{}", text)?;
        Ok(())
    }

    fn take_notifications(&mut self) -> Vec<Notification> {
        match &mut self.view {
            ActiveView::Catalog(view) => view.take_notifications(),
            ActiveView::Books(view) => view.take_notifications(),
            ActiveView::Users(view) => view.take_notifications(),
            ActiveView::Loans(view) => view.take_notifications(),
            _ => Vec::new(),
        }
    }

    /// Failed store operations already queued their notification
    fn report(&mut self, error: &AppError, notified: bool) -> AppResult<()> {
        match error {
            AppError::Remote(_) | AppError::NotFound(_) if notified => Ok(()),
            AppError::Validation(message) => {
                writeln!(self.output, "{}", message)?;
                Ok(())
            }
            other => {
                tracing::warn!("Command failed: {}", other);
                writeln!(self.output, "Error: {}", other)?;
                Ok(())
            }
        }
    }

    async fn ask(&mut self, label: &str, default: Option<&str>) -> AppResult<String> {
        match default {
            Some(default) if !default.is_empty() => write!(self.output, "{} [{}]: ", label, default)?,
            _ => write!(self.output, "{}: ", label)?,
        }
        self.output.flush()?;

        let Some(answer) = self.read_line().await? else {
            return Err(AppError::Validation("Formulario cancelado.".to_string()));
        };
        let answer = answer.trim().to_string();
        Ok(match default {
            Some(default) if answer.is_empty() => default.to_string(),
            Some(_) if answer == CLEAR => String::new(),
            _ => answer,
        })
    }

    async fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn not_here(what: &str) -> AppError {
    AppError::Validation(format!("Esta vista no admite {}.", what))
}
