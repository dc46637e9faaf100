//! Fake LIEN services served by axum on an ephemeral port

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use lien_console::config::{ApiConfig, AuthEndpoints, CollectionEndpoints, DeleteMode};

/// One request as the fake received it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Value,
    pub authorization: Option<String>,
}

pub type Log = Arc<Mutex<Vec<Recorded>>>;

pub struct FakeRemote {
    pub base: String,
    pub log: Log,
}

impl FakeRemote {
    pub async fn start() -> Self {
        let log: Log = Arc::default();
        let app = Router::new().fallback(answer).with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            log,
        }
    }

    pub fn api(&self) -> ApiConfig {
        let url = |path: &str| format!("{}{}", self.base, path);
        ApiConfig {
            books: CollectionEndpoints {
                list_url: url("/books/all"),
                create_url: url("/books/add"),
                update_url: Some(url("/books/edi")),
                delete_url: url("/books/delete"),
                delete_mode: DeleteMode::Path,
            },
            users: CollectionEndpoints {
                list_url: url("/users/all"),
                create_url: url("/users/add"),
                update_url: None,
                delete_url: url("/users/delete_user"),
                delete_mode: DeleteMode::Body,
            },
            loans: CollectionEndpoints {
                list_url: url("/loans/prestamos"),
                create_url: url("/loans/create_prestamo"),
                update_url: None,
                delete_url: url("/loans/low_prestamo"),
                delete_mode: DeleteMode::Body,
            },
            auth: AuthEndpoints {
                login_url: url("/auth/login"),
                change_password_url: url("/auth/change-password"),
            },
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// Requests other than list fetches
    pub fn mutations(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }
}

async fn answer(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();
    log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        body: body.clone(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    match (method.as_str(), path.as_str()) {
        ("GET", "/books/all") => Json(json!([
            {"idbook": 1, "titulo": "Rayuela", "autor": "Julio Cortázar", "status": "0", "coverImage": "rayuela.png"},
            {"idbook": "2", "titulo": "Ficciones", "autor": "Jorge Luis Borges", "status": true},
            {"idbook": 3, "titulo": "Aura", "autor": "Carlos Fuentes", "status": "1"}
        ]))
        .into_response(),
        ("POST", "/books/add") => {
            let mut created = body;
            created["idbook"] = json!(40);
            Json(created).into_response()
        }
        ("PUT", "/books/edi") => Json(body).into_response(),
        ("GET", "/users/all") => Json(json!([
            {"iduser": 4, "username": "ana", "nombre": "Ana López", "email": "ana@example.com", "phone": 5512345678u64, "fechanacimiento": "1990-01-01"}
        ]))
        .into_response(),
        ("POST", "/users/add") => {
            let mut created = body;
            created["iduser"] = json!(11);
            Json(created).into_response()
        }
        ("GET", "/loans/prestamos") => Json(json!([
            {"idprestamo": 5, "idbook": 1, "iduser": 4, "fecha_inicio": "2024-05-01", "fecha_fin": "2024-05-15", "status": 1, "titulo": "Rayuela"}
        ]))
        .into_response(),
        ("POST", "/loans/create_prestamo") => Json(json!({"message": "Préstamo creado", "idprestamo": 12})).into_response(),
        ("POST", "/auth/login") => {
            if body["password"] == "secreto" {
                Json(json!({"id_token": "id-tok", "access_token": "acc", "refresh_token": "ref", "role": "admin"}))
                    .into_response()
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error_message": "Usuario o contraseña incorrectos"})),
                )
                    .into_response()
            }
        }
        ("POST", "/auth/change-password") => Json(json!({"message": "ok"})).into_response(),
        ("DELETE", p) if p.starts_with("/books/delete/") => StatusCode::NO_CONTENT.into_response(),
        ("POST", "/users/delete_user") | ("POST", "/loans/low_prestamo") => {
            Json(json!({"message": "eliminado"})).into_response()
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error_message": "Servicio no disponible"})),
        )
            .into_response(),
    }
}
