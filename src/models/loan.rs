//! Loan (préstamo) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{book::Book, lenient, placeholder, Entity, EntityLabels, Unassigned};
use crate::error::AppResult;

/// Status the loans service gives to a book out on loan
pub const ON_LOAN: i64 = 1;

/// Id of a created loan until the service's list reports the real one
pub const UNASSIGNED_ID: &str = "0";

/// Loan record with the book fields copied in for display
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Loan {
    #[serde(rename = "idprestamo", deserialize_with = "lenient::id_string")]
    pub id: String,
    #[serde(rename = "fecha_inicio", deserialize_with = "lenient::text")]
    pub start_date: String,
    #[serde(rename = "fecha_fin", deserialize_with = "lenient::text")]
    pub end_date: String,
    #[serde(rename = "iduser", deserialize_with = "lenient::id_string")]
    pub user_id: String,
    #[serde(rename = "idbook", deserialize_with = "lenient::id_string")]
    pub book_id: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub status: i64,
    #[serde(rename = "titulo", deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(rename = "fecha_publicacion", deserialize_with = "lenient::id_string")]
    pub publication_date: String,
    #[serde(rename = "autor", deserialize_with = "lenient::text")]
    pub author: String,
    #[serde(rename = "editorial", deserialize_with = "lenient::text")]
    pub publisher: String,
    #[serde(rename = "descripcion", deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(rename = "categoria", deserialize_with = "lenient::text")]
    pub category: String,
}

impl Loan {
    pub fn status_label(&self) -> &'static str {
        if self.status == ON_LOAN {
            "En préstamo"
        } else {
            ""
        }
    }

    /// Copy the display fields of the lent book.
    ///
    /// The copy is a snapshot: later edits of the book do not reach it.
    pub fn copy_book_details(&mut self, book: &Book) {
        self.title = book.title.clone();
        self.publication_date = book.publication_date.clone();
        self.author = book.author.clone();
        self.publisher = book.publisher.clone();
        self.description = book.description.clone();
        self.category = book.category.clone();
    }
}

/// Composite delete key of the loans service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanKey {
    pub idprestamo: String,
    pub idbook: String,
}

impl Entity for Loan {
    type Key = String;
    type DeleteKey = LoanKey;
    type Draft = LoanDraft;

    const NAME: &'static str = "loan";
    const LABELS: EntityLabels = EntityLabels {
        load_failed: "Error al recuperar los préstamos",
        created: "Préstamo agregado exitosamente",
        create_failed: "Error al agregar el préstamo",
        updated: "Préstamo actualizado exitosamente",
        update_failed: "Error al actualizar el préstamo",
        deleted: "Préstamo eliminado exitosamente",
        delete_failed: "Error al eliminar el préstamo",
        not_found: "El préstamo ya no está en la lista",
    };

    fn key(&self) -> String {
        self.id.clone()
    }

    fn delete_key(&self) -> LoanKey {
        LoanKey {
            idprestamo: self.id.clone(),
            idbook: self.book_id.clone(),
        }
    }

    /// The loan-creation endpoint answers with a status payload rather than
    /// the record, so the loan is rebuilt from the draft. An `idprestamo` in
    /// the body wins over the `"0"` placeholder.
    fn from_created(draft: &LoanDraft, body: Value) -> AppResult<Self> {
        let id = body
            .get("idprestamo")
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| UNASSIGNED_ID.to_string());

        let mut loan = Loan {
            id,
            start_date: draft.start_date.format("%Y-%m-%d").to_string(),
            end_date: draft.end_date.format("%Y-%m-%d").to_string(),
            user_id: draft.user_id.clone(),
            book_id: draft.book_id.clone(),
            status: ON_LOAN,
            ..Default::default()
        };
        if let Some(book) = &draft.book {
            loan.copy_book_details(book);
        }
        Ok(loan)
    }
}

/// New loan as sent to the loans service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanDraft {
    #[serde(rename = "idprestamo", serialize_with = "placeholder::text")]
    pub id: Unassigned,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub end_date: NaiveDate,
    #[serde(rename = "iduser")]
    pub user_id: String,
    #[serde(rename = "idbook")]
    pub book_id: String,
    /// Already-fetched record of the lent book, used for display fields
    #[serde(skip)]
    pub book: Option<Book>,
}
