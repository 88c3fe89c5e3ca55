//! PII scrubbing for exported identity data
//!
//! Member emails and pool-user emails and names are replaced with synthetic
//! values before anything is written to disk. Email domains are preserved so
//! tenant routing by domain still works against the exported data.
//!
//! # Architecture
//!
//! - **Names**: [`NameGenerator`] produces `adjective-noun` names
//! - **Scrubber**: [`Scrubber`] applies the allow-list and rewrites records
//! - **Audit**: optional JSONL log of scrub decisions with hashed emails
//!
//! # Usage
//!
//! ```
//! use crowsnest_export::anonymization::{Scrubber, ScrubberConfig};
//!
//! let scrubber = Scrubber::from_config(&ScrubberConfig::default())?;
//! assert!(scrubber.is_allow_listed("ops@cleo.com"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod audit;
pub mod config;
pub mod names;
pub mod scrubber;

// Re-export main types
pub use config::{ScrubPolicy, ScrubberConfig};
pub use names::{MonikerGenerator, NameGenerator};
pub use scrubber::{ScrubStats, ScrubbedIdentity, Scrubber};
