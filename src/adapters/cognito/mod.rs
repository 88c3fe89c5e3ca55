//! Amazon Cognito integration
//!
//! [`CognitoDirectory`] describes user pools and lists their users. SDK
//! errors are classified into [`CognitoError`](crate::domain::CognitoError)
//! variants so the resolver can tell a missing pool or an unknown attribute
//! apart from other failures.

pub mod client;
pub mod models;

pub use client::CognitoDirectory;
