//! Library user (borrower account) model

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use validator::Validate;

use super::{lenient, placeholder, Entity, EntityLabels, Unassigned};

/// Borrower account as listed by the users service
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "iduser")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub username: String,
    #[serde(rename = "nombre", deserialize_with = "lenient::text")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::id_string")]
    pub phone: String,
    #[serde(rename = "fechanacimiento", deserialize_with = "lenient::text")]
    pub birth_date: String,
}

/// Delete key of the users service: the login name, not the numeric id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserKey {
    pub username: String,
}

impl Entity for User {
    type Key = String;
    type DeleteKey = UserKey;
    type Draft = UserDraft;

    const NAME: &'static str = "user";
    const LABELS: EntityLabels = EntityLabels {
        load_failed: "Error al cargar los usuarios. Intente de nuevo.",
        created: "Usuario agregado exitosamente",
        create_failed: "Error al agregar usuario. Intente de nuevo.",
        updated: "Usuario actualizado exitosamente",
        update_failed: "Error al actualizar el usuario. Intente de nuevo.",
        deleted: "Usuario eliminado exitosamente",
        delete_failed: "Error al eliminar el usuario. Intente de nuevo.",
        not_found: "El usuario ya no está en la lista",
    };

    fn key(&self) -> String {
        self.username.clone()
    }

    fn delete_key(&self) -> UserKey {
        UserKey {
            username: self.username.clone(),
        }
    }
}

/// New borrower account
#[derive(Debug, Clone, PartialEq, Default, Serialize, Validate)]
pub struct UserDraft {
    #[serde(rename = "iduser", serialize_with = "placeholder::number")]
    pub id: Unassigned,
    #[validate(length(min = 1, message = "Todos los campos son obligatorios."))]
    pub username: String,
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "Todos los campos son obligatorios."))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Todos los campos son obligatorios."))]
    pub email: String,
    #[validate(length(min = 1, message = "Todos los campos son obligatorios."))]
    pub phone: String,
    #[serde(rename = "fechanacimiento")]
    #[validate(length(min = 1, message = "Todos los campos son obligatorios."))]
    pub birth_date: String,
}

impl UserDraft {
    pub const REQUIRED_MESSAGE: &'static str = "Todos los campos son obligatorios.";
}
