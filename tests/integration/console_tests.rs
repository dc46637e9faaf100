//! Console driven end to end with scripted input

use axum::http::Method;
use serde_json::json;
use tempfile::TempDir;

use lien_console::{config::AppConfig, console::Console, routes::Route, AppState};

use crate::common::FakeRemote;

struct Session {
    output: String,
    route: Route,
}

async fn drive(remote: &FakeRemote, dir: &TempDir, script: &str) -> Session {
    let mut config = AppConfig::default();
    config.api = remote.api();
    config.session.storage_path = dir.path().join("storage.json");
    config.console.redirect_delay_ms = 10;

    let state = AppState::new(config).unwrap();
    let mut console = Console::new(state, script.as_bytes(), Vec::new());
    console.run().await.unwrap();
    let route = console.route().clone();
    Session {
        output: String::from_utf8(console.into_output()).unwrap(),
        route,
    }
}

#[tokio::test]
async fn admin_lends_and_returns_a_book() {
    let remote = FakeRemote::start().await;
    let dir = TempDir::new().unwrap();
    let script = "\
login
ana
secreto
open prestamos
add
4
2
2024-06-01
2024-06-20
delete 5
quit
";

    let session = drive(&remote, &dir, script).await;
    let out = &session.output;
    assert_eq!(session.route, Route::Loans);
    assert!(out.contains("Inicio de sesión exitoso"));
    assert!(out.contains("== Préstamos =="));
    assert!(out.contains("[success] Préstamo agregado exitosamente"));
    assert!(out.contains("[success] Préstamo eliminado exitosamente"));
    assert!(out.contains("Ficciones"));

    let mutations = remote.mutations();
    let paths: Vec<&str> = mutations.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/auth/login", "/loans/create_prestamo", "/loans/low_prestamo"]);
    assert_eq!(mutations[2].body, json!({"idprestamo": "5", "idbook": "1"}));
    assert!(mutations[1..].iter().all(|r| r.authorization.as_deref() == Some("Bearer id-tok")));

    let stored = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored["authToken"], "id-tok");
    assert_eq!(stored["userRole"], "admin");
}

#[tokio::test]
async fn session_survives_a_restart_until_logout() {
    let remote = FakeRemote::start().await;
    let dir = TempDir::new().unwrap();

    drive(&remote, &dir, "login\nana\nsecreto\n").await;
    let second = drive(&remote, &dir, "open library\nlogout\nopen users\n").await;

    assert!(second.output.contains("== Libros =="));
    assert!(second.output.contains("Sesión cerrada."));
    assert!(!second.output.contains("== Usuarios =="));
    assert_eq!(second.route, Route::Landing);
    assert!(!remote
        .requests()
        .iter()
        .any(|r| r.method == Method::GET && r.path == "/users/all"));
}

#[tokio::test]
async fn wrong_password_shows_the_server_message() {
    let remote = FakeRemote::start().await;
    let dir = TempDir::new().unwrap();

    let session = drive(&remote, &dir, "login\nana\nincorrecta\nopen library\n").await;
    assert!(session.output.contains("Usuario o contraseña incorrectos"));
    assert_eq!(session.route, Route::Landing);
}

#[tokio::test]
async fn new_books_are_sent_as_available() {
    let remote = FakeRemote::start().await;
    let dir = TempDir::new().unwrap();
    let script = "\
login
ana
secreto
open /library
add
Pedro Páramo
Juan Rulfo
1955
Fondo de Cultura Económica
Novela
Un hijo busca a su padre en Comala.

";

    let session = drive(&remote, &dir, script).await;
    assert!(session.output.contains("[success] Libro agregado con éxito"));
    assert!(session.output.contains("Página 1 de 1 (4 registros, 5 por página)"));
    let add = remote
        .mutations()
        .into_iter()
        .find(|r| r.path == "/books/add")
        .unwrap();
    assert_eq!(add.body["status"], "0");
    assert_eq!(add.body["editorial"], "Fondo de Cultura Económica");
}

#[tokio::test]
async fn password_change_redirects_home() {
    let remote = FakeRemote::start().await;
    let dir = TempDir::new().unwrap();

    let session = drive(&remote, &dir, "open register\npassword\nana\nTemp1234\nAbcdef1!\nAbcdef1!\n").await;
    assert!(session.output.contains("Contraseña cambiada exitosamente."));
    assert_eq!(session.route, Route::Home);
    assert_eq!(
        remote.mutations()[0].body,
        json!({"username": "ana", "temporary_password": "Temp1234", "new_password": "Abcdef1!"})
    );
}
