//! Identity, credential and token records exchanged with authentication
//! providers.
//!
//! Each record exists twice: as a typed struct for code that knows its
//! shape, and as a declared [`RecordType`] so request and response payloads
//! that carry it can be converted like any other record.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::common::DateTimeValue;
use crate::records::{DeclaredField, RecordType};
use crate::typing::TypeShape;
use crate::value::Value;

/// An authenticated subject as reported by an identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique user id (sub, dn or uid).
    pub subject: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub groups: Vec<String>,
    pub claims: BTreeMap<String, serde_json::Value>,
    pub issued_at: DateTimeValue,
    pub issued_by: Option<String>,
    pub expires_at: Option<DateTimeValue>,
    pub audience: Option<Vec<String>>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub pretend_subject: Option<String>,
}

impl Identity {
    /// Subject the caller acts as: the impersonated one when set.
    pub fn effective_subject(&self) -> &str {
        self.pretend_subject.as_deref().unwrap_or(&self.subject)
    }

    pub fn record_type() -> Arc<RecordType> {
        let optional_str = || TypeShape::optional(TypeShape::Str);
        RecordType::declared("Identity")
            .field(DeclaredField::new("subject", TypeShape::Str))
            .field(DeclaredField::new("username", optional_str()))
            .field(DeclaredField::new("email", optional_str()))
            .field(DeclaredField::new("display_name", optional_str()))
            .field(DeclaredField::new("groups", TypeShape::list(TypeShape::Str)))
            .field(DeclaredField::new(
                "claims",
                TypeShape::map(TypeShape::Str, TypeShape::Any),
            ))
            .field(DeclaredField::new("issued_at", TypeShape::DateTime))
            .field(DeclaredField::new("issued_by", optional_str()))
            .field(DeclaredField::new(
                "expires_at",
                TypeShape::optional(TypeShape::DateTime),
            ))
            .field(DeclaredField::new(
                "audience",
                TypeShape::optional(TypeShape::list(TypeShape::Str)),
            ))
            .field(DeclaredField::new("admin", TypeShape::Bool).default(false))
            .field(DeclaredField::new("pretend_subject", optional_str()).default(Value::None))
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCredentials {
    pub username: String,
    pub password: String,
}

impl PasswordCredentials {
    pub fn record_type() -> Arc<RecordType> {
        RecordType::declared("PasswordCredentials")
            .field(DeclaredField::new("username", TypeShape::Str))
            .field(DeclaredField::new("password", TypeShape::Str))
            .build()
    }
}

pub const BEARER: &str = "Bearer";

fn bearer() -> String {
    BEARER.to_string()
}

/// Access token issued for an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Token {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: bearer(),
            expires_in: None,
            refresh_token: None,
        }
    }

    pub fn record_type() -> Arc<RecordType> {
        RecordType::declared("Token")
            .field(DeclaredField::new("access_token", TypeShape::Str))
            .field(DeclaredField::new("token_type", TypeShape::Str).default(BEARER))
            .field(
                DeclaredField::new("expires_in", TypeShape::optional(TypeShape::Int))
                    .default(Value::None),
            )
            .field(
                DeclaredField::new("refresh_token", TypeShape::optional(TypeShape::Str))
                    .default(Value::None),
            )
            .build()
    }
}
