//! Key-value store records
//!
//! Items are kept in DynamoDB's typed-attribute JSON form
//! (`{"email": {"S": "a@b.c"}}`) so tenants and domains can pass through
//! untouched and members only need their `email` attribute rewritten.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque key-value store record in typed-attribute JSON form
pub type Item = Map<String, Value>;

/// Attribute holding the member's email address
pub const EMAIL_ATTRIBUTE: &str = "email";

/// Attribute naming the Cognito pool that owns the member
pub const AUTH_POOL_ID_ATTRIBUTE: &str = "authPoolId";

/// A member record from the Member table
///
/// Serializes exactly like the underlying item.
///
/// # Examples
///
/// ```
/// use crowsnest_export::domain::member::Member;
/// use serde_json::json;
///
/// let member: Member = serde_json::from_value(json!({
///     "email": {"S": "alice@example.com"},
///     "authPoolId": {"S": "us-east-1_abc"}
/// })).unwrap();
///
/// assert_eq!(member.email(), Some("alice@example.com"));
/// assert_eq!(member.auth_pool_id(), Some("us-east-1_abc"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Member {
    attributes: Item,
}

impl Member {
    /// Wrap a scanned item
    pub fn from_item(item: Item) -> Self {
        Self { attributes: item }
    }

    /// Value of a string-typed (`S`) attribute
    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|value| value.get("S"))
            .and_then(Value::as_str)
    }

    /// The member's email, if present as a string attribute
    pub fn email(&self) -> Option<&str> {
        self.string_attribute(EMAIL_ATTRIBUTE)
    }

    /// The owning pool id, if present as a string attribute
    pub fn auth_pool_id(&self) -> Option<&str> {
        self.string_attribute(AUTH_POOL_ID_ATTRIBUTE)
    }

    /// Copy of this member with `email` replaced
    pub fn with_email(&self, email: impl Into<String>) -> Self {
        let mut attributes = self.attributes.clone();
        let mut typed = Map::new();
        typed.insert("S".to_string(), Value::String(email.into()));
        attributes.insert(EMAIL_ATTRIBUTE.to_string(), Value::Object(typed));
        Self { attributes }
    }
}

impl From<Item> for Member {
    fn from(item: Item) -> Self {
        Self::from_item(item)
    }
}
