//! External system integrations.
//!
//! This module provides adapters for the two AWS services the exporter reads:
//!
//! - [`dynamodb`] - Table scans of the Member, Tenant and Domain tables
//! - [`cognito`] - User pool descriptions and user listings
//! - [`aws`] - Shared SDK configuration, credentials and endpoint overrides
//! - [`traits`] - The seams the export pipeline depends on
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with fake implementations. SDK types and errors stay inside
//! this module; callers only see domain records and domain errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use crowsnest_export::adapters::aws::AwsClientBuilder;
//! use crowsnest_export::adapters::{CognitoDirectory, DynamoDbScanner};
//! use crowsnest_export::config::AwsConfig;
//!
//! # async fn example() {
//! let config = AwsConfig {
//!     region: "us-east-1".to_string(),
//!     dynamodb_endpoint_url: Some("http://localhost:8000".to_string()),
//!     ..Default::default()
//! };
//!
//! let (dynamodb, cognito) = AwsClientBuilder::new(&config).build_clients().await;
//! let scanner = DynamoDbScanner::new(dynamodb);
//! let directory = CognitoDirectory::new(cognito);
//! # }
//! ```

pub mod aws;
pub mod cognito;
pub mod dynamodb;
pub mod traits;

pub use cognito::CognitoDirectory;
pub use dynamodb::DynamoDbScanner;
pub use traits::{IdentityDirectory, TableScanner};
