//! Identity pool records
//!
//! Field names serialize in the same PascalCase shape the Cognito API uses,
//! so `pools.json` reads like a `ListUsers` response.

use super::ids::PoolId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single `{Name, Value}` user attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserAttribute {
    /// Attribute name, e.g. `email` or `custom:company`
    pub name: String,

    /// Attribute value
    pub value: String,
}

impl UserAttribute {
    /// Create an attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An MFA delivery setting of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MfaOption {
    /// `SMS` or `EMAIL`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_medium: Option<String>,

    /// Attribute the code is delivered to, e.g. `phone_number`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,
}

/// A user listed from a Cognito user pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PoolUser {
    /// Username; may itself be an email address
    pub username: String,

    /// Attributes in the order the directory returned them
    #[serde(default)]
    pub attributes: Vec<UserAttribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_create_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_last_modified_date: Option<DateTime<Utc>>,

    /// Account status such as `CONFIRMED` or `FORCE_CHANGE_PASSWORD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_status: Option<String>,

    /// Whether the account is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(
        rename = "MFAOptions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mfa_options: Option<Vec<MfaOption>>,
}

impl PoolUser {
    /// Create a user with the given username and attributes
    pub fn new(username: impl Into<String>, attributes: Vec<UserAttribute>) -> Self {
        Self {
            username: username.into(),
            attributes,
            user_create_date: None,
            user_last_modified_date: None,
            user_status: None,
            enabled: None,
            mfa_options: None,
        }
    }

    /// Value of the first attribute with this name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// The user's email attribute
    pub fn email(&self) -> Option<&str> {
        self.attribute("email")
    }

    /// Whether the username looks like an email address
    pub fn username_is_email(&self) -> bool {
        self.username.contains('@')
    }
}

/// One exported pool with its scrubbed users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolExport {
    pub pool_id: PoolId,
    pub pool_name: String,
    pub users: Vec<PoolUser>,
}
