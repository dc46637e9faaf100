//! Data models for the LIEN console

pub mod book;
pub mod loan;
pub mod session;
pub mod user;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt::Debug;

use crate::error::{AppResult, RemoteError};

// Re-export commonly used types
pub use book::{Book, BookDraft, BookStatus};
pub use loan::{Loan, LoanDraft, LoanKey, UNASSIGNED_ID};
pub use session::{ChangePasswordForm, LoginForm, LoginResponse, Role};
pub use user::{User, UserDraft, UserKey};

/// User-facing texts for one entity family
#[derive(Debug, Clone, Copy)]
pub struct EntityLabels {
    pub load_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    pub not_found: &'static str,
}

/// A record managed through a remote collection.
///
/// `key` identifies the record inside a local list; `delete_key` is the
/// shape the remote service wants for deletion, which differs per family.
pub trait Entity: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Key: Clone + Debug + PartialEq + Send + Sync;
    type DeleteKey: Clone + Debug + PartialEq + Serialize + Send + Sync;
    type Draft: Clone + Debug + Serialize + Send + Sync;

    const NAME: &'static str;
    const LABELS: EntityLabels;

    fn key(&self) -> Self::Key;

    fn delete_key(&self) -> Self::DeleteKey;

    /// Build the canonical record from a create response
    fn from_created(_draft: &Self::Draft, body: Value) -> AppResult<Self> {
        serde_json::from_value(body).map_err(|e| RemoteError::Decode(e).into())
    }
}

/// Id slot of a create payload. The services expect it present and zero;
/// they assign the real id themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unassigned;

/// Wire forms of [`Unassigned`]: `0` for books and users, `"0"` for loans
pub(crate) mod placeholder {
    use serde::Serializer;

    use super::Unassigned;

    pub fn number<S: Serializer>(_: &Unassigned, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(0)
    }

    pub fn text<S: Serializer>(_: &Unassigned, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("0")
    }
}

/// Decoders for fields the remote services encode inconsistently
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
        Flag(bool),
    }

    /// Identifier sent either as a JSON string or number
    pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::Text(s)) => s,
            Some(Scalar::Integer(n)) => n.to_string(),
            Some(Scalar::Float(n)) => n.to_string(),
            Some(Scalar::Flag(b)) => b.to_string(),
            None => String::new(),
        })
    }

    /// Availability flag: `"0"`/`0`/`true` mean available
    pub fn status_flag<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::Text(s)) => s,
            Some(Scalar::Integer(n)) => n.to_string(),
            Some(Scalar::Float(n)) => n.to_string(),
            Some(Scalar::Flag(true)) => "0".to_string(),
            Some(Scalar::Flag(false)) => "1".to_string(),
            None => "0".to_string(),
        })
    }

    /// Integer sent as a number, a numeric string or `null` (zero)
    pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Scalar>::deserialize(deserializer)? {
            Some(Scalar::Integer(n)) => Ok(n),
            Some(Scalar::Float(n)) => Ok(n as i64),
            Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(0),
            Some(Scalar::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
            Some(Scalar::Flag(b)) => Ok(i64::from(b)),
            None => Ok(0),
        }
    }

    /// Text field that may come back as `null`
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
