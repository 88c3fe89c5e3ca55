//! Domain identifier types with validation
//!
//! Newtype wrappers keep pool ids and table names from being mixed up with
//! arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cognito user pool identifier
///
/// # Examples
///
/// ```
/// use crowsnest_export::domain::ids::PoolId;
/// use std::str::FromStr;
///
/// let pool_id = PoolId::from_str("us-east-1_AbCdEf123").unwrap();
/// assert_eq!(pool_id.as_str(), "us-east-1_AbCdEf123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(String);

impl PoolId {
    /// Creates a new PoolId from a string
    ///
    /// Returns `Err` if the id is empty or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Pool ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the pool ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PoolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PoolId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The three auth tables the exporter reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Member records (carry `email` and `authPoolId`)
    Member,
    /// Tenant records
    Tenant,
    /// Domain records
    Domain,
}

impl TableKind {
    /// Table suffix as it appears in the physical table name
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Member => "Member",
            Self::Tenant => "Tenant",
            Self::Domain => "Domain",
        }
    }

    /// Physical table name: `<prefix>-<stage>.<Kind>`
    ///
    /// ```
    /// use crowsnest_export::domain::ids::TableKind;
    ///
    /// assert_eq!(
    ///     TableKind::Member.table_name("crowsnest-authv3", "prod"),
    ///     "crowsnest-authv3-prod.Member"
    /// );
    /// ```
    pub fn table_name(&self, prefix: &str, stage: &str) -> String {
        format!("{}-{}.{}", prefix, stage, self.suffix())
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}
