//! Book (catalog record) model

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::{lenient, placeholder, Entity, EntityLabels, Unassigned};

const AVAILABLE: &str = "0";
const FALLBACK_COVER: &str = "/fallback.png";

/// Availability flag exactly as the catalog service sends it.
///
/// `"0"` is available; every other value is unavailable. The console only
/// displays and forwards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookStatus(#[serde(deserialize_with = "lenient::status_flag")] String);

impl BookStatus {
    pub fn available() -> Self {
        Self(AVAILABLE.to_string())
    }

    pub fn is_available(&self) -> bool {
        self.0 == AVAILABLE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn label(&self) -> &'static str {
        if self.is_available() {
            "Disponible"
        } else {
            "No disponible"
        }
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        Self::available()
    }
}

impl From<&str> for BookStatus {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Catalog record
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    #[serde(rename = "idbook")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde(rename = "titulo", deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(rename = "autor", deserialize_with = "lenient::text")]
    pub author: String,
    #[serde(rename = "fecha_publicacion", deserialize_with = "lenient::id_string")]
    pub publication_date: String,
    #[serde(rename = "editorial", deserialize_with = "lenient::text")]
    pub publisher: String,
    #[serde(rename = "categoria", deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(rename = "descripcion", deserialize_with = "lenient::text")]
    pub description: String,
    pub status: BookStatus,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl Book {
    /// Where to load the cover picture from
    pub fn cover_url(&self) -> String {
        match self.cover_image.as_deref().map(str::trim) {
            None | Some("") => FALLBACK_COVER.to_string(),
            Some(cover) if cover.starts_with("http") => cover.to_string(),
            Some(cover) => format!("/images/{}", cover),
        }
    }
}

impl Entity for Book {
    type Key = i64;
    type DeleteKey = i64;
    type Draft = BookDraft;

    const NAME: &'static str = "book";
    const LABELS: EntityLabels = EntityLabels {
        load_failed: "Error al recuperar los libros",
        created: "Libro agregado con éxito",
        create_failed: "Error al agregar el libro",
        updated: "Libro actualizado con éxito",
        update_failed: "Error al actualizar el libro",
        deleted: "Libro eliminado con éxito",
        delete_failed: "Error al eliminar el libro",
        not_found: "El libro ya no está en la lista",
    };

    fn key(&self) -> i64 {
        self.id
    }

    fn delete_key(&self) -> i64 {
        self.id
    }
}

/// New catalog record, before the service assigns an id
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BookDraft {
    #[serde(rename = "idbook", serialize_with = "placeholder::number")]
    pub id: Unassigned,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "fecha_publicacion")]
    pub publication_date: String,
    #[serde(rename = "editorial")]
    pub publisher: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    pub status: BookStatus,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}
