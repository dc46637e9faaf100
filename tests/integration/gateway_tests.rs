//! HTTP gateways against the fake services

use axum::http::Method;
use chrono::NaiveDate;
use serde_json::json;

use lien_console::{
    error::{AppError, RemoteError},
    gateway::Gateways,
    models::{Book, BookDraft, BookStatus, Entity, LoanDraft, LoanKey, LoginForm, Unassigned, UserKey},
    store::EntityListStore,
};

use crate::common::FakeRemote;

#[tokio::test]
async fn lists_decode_loosely_typed_records() {
    let remote = FakeRemote::start().await;
    let gateways = Gateways::new(&remote.api()).unwrap();

    let books = gateways.books.list().await.unwrap();
    assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(books[1].status.is_available());
    assert!(!books[2].status.is_available());
    assert_eq!(books[0].cover_url(), "/images/rayuela.png");

    let users = gateways.users.list().await.unwrap();
    assert_eq!(users[0].phone, "5512345678");

    let loans = gateways.loans.list().await.unwrap();
    assert_eq!(
        loans[0].delete_key(),
        LoanKey { idprestamo: "5".into(), idbook: "1".into() }
    );
}

#[tokio::test]
async fn created_book_is_the_server_record() {
    let remote = FakeRemote::start().await;
    let gateways = Gateways::new(&remote.api()).unwrap();

    let draft = BookDraft {
        title: "Pedro Páramo".into(),
        author: "Juan Rulfo".into(),
        status: BookStatus::available(),
        ..Default::default()
    };
    let created = gateways.books.create(&draft).await.unwrap();
    assert_eq!(created.id, 40);
    assert_eq!(created.title, "Pedro Páramo");

    let sent = &remote.mutations()[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.body["titulo"], "Pedro Páramo");
    assert_eq!(sent.body["status"], "0");
    assert_eq!(sent.body["idbook"], 0);
}

#[tokio::test]
async fn each_family_deletes_with_its_own_shape() {
    let remote = FakeRemote::start().await;
    let gateways = Gateways::new(&remote.api()).unwrap();

    gateways.books.remove(&7).await.unwrap();
    gateways
        .users
        .remove(&UserKey { username: "ana".into() })
        .await
        .unwrap();
    gateways
        .loans
        .remove(&LoanKey { idprestamo: "5".into(), idbook: "1".into() })
        .await
        .unwrap();

    let sent = remote.mutations();
    assert_eq!((sent[0].method.clone(), sent[0].path.as_str()), (Method::DELETE, "/books/delete/7"));
    assert_eq!(sent[1].path, "/users/delete_user");
    assert_eq!(sent[1].body, json!({"username": "ana"}));
    assert_eq!(sent[2].path, "/loans/low_prestamo");
    assert_eq!(sent[2].body, json!({"idprestamo": "5", "idbook": "1"}));
}

#[tokio::test]
async fn loan_creation_rebuilds_the_row_from_the_draft() {
    let remote = FakeRemote::start().await;
    let gateways = Gateways::new(&remote.api()).unwrap();

    let draft = LoanDraft {
        id: Unassigned,
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        user_id: "4".into(),
        book_id: "2".into(),
        book: Some(Book { id: 2, title: "Ficciones".into(), ..Default::default() }),
    };
    let loan = gateways.loans.create(&draft).await.unwrap();
    assert_eq!(loan.id, "12");
    assert_eq!(loan.title, "Ficciones");
    assert_eq!(loan.status_label(), "En préstamo");

    assert_eq!(
        remote.mutations()[0].body,
        json!({"idprestamo": "0", "fecha_inicio": "2024-06-01", "fecha_fin": "2024-06-15", "iduser": "4", "idbook": "2"})
    );
}

#[tokio::test]
async fn rejected_login_carries_the_server_message() {
    let remote = FakeRemote::start().await;
    let gateways = Gateways::new(&remote.api()).unwrap();

    let form = LoginForm { username: "ana".into(), password: "incorrecta".into() };
    let err = gateways.auth.login(&form).await.unwrap_err();
    match err {
        AppError::Remote(remote_err @ RemoteError::Status { .. }) => {
            assert_eq!(remote_err.server_message(), Some("Usuario o contraseña incorrectos"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn identity_token_is_sent_as_bearer() {
    let remote = FakeRemote::start().await;
    let gateways = Gateways::new(&remote.api()).unwrap();

    gateways.books.list().await.unwrap();
    gateways.client.set_token(Some("id-tok".into()));
    gateways.books.list().await.unwrap();

    let requests = remote.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer id-tok"));
}

#[tokio::test]
async fn failed_fetch_leaves_the_store_empty() {
    let remote = FakeRemote::start().await;
    let mut api = remote.api();
    api.books.list_url = format!("{}/books/missing", remote.base);
    let gateways = Gateways::new(&api).unwrap();

    let mut store = EntityListStore::new(gateways.books.clone());
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, AppError::Remote(_)));
    assert!(store.is_empty());
    assert_eq!(
        store.notifications().last().map(|n| n.message.as_str()),
        Some("Error al recuperar los libros")
    );
}
