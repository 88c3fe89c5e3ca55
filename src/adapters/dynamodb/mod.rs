//! DynamoDB integration
//!
//! - [`client`] - [`DynamoDbScanner`], the [`TableScanner`](crate::adapters::traits::TableScanner) implementation
//! - [`item`] - Attribute value to typed-attribute JSON conversion

pub mod client;
pub mod item;

pub use client::DynamoDbScanner;
