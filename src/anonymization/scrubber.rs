//! PII scrubber for members and pool users
//!
//! The [`Scrubber`] replaces real email addresses (and, for pool users, given
//! and family names) with synthetic ones built from generated `adjective-noun`
//! names. The original email domain is kept byte for byte. Records whose
//! email domain ends with an allow-listed suffix are returned unchanged.
//!
//! # Examples
//!
//! ```
//! use crowsnest_export::anonymization::{MonikerGenerator, ScrubPolicy, Scrubber};
//! use crowsnest_export::domain::{PoolUser, UserAttribute};
//!
//! let mut scrubber = Scrubber::new(
//!     vec!["cleo.com".to_string()],
//!     ScrubPolicy::PerRun,
//!     Box::new(MonikerGenerator::with_seed(1)),
//! );
//!
//! let user = PoolUser::new(
//!     "bob@example.com",
//!     vec![UserAttribute::new("email", "bob@example.com")],
//! );
//! let scrubbed = scrubber.scrub_pool_user(&user);
//!
//! assert!(scrubbed.email().unwrap().ends_with("@example.com"));
//! assert_ne!(scrubbed.email(), Some("bob@example.com"));
//! assert_eq!(scrubbed.username, scrubbed.email().unwrap());
//! ```

use crate::anonymization::audit::{AuditLogger, RecordKind, ScrubOutcome};
use crate::anonymization::config::{ScrubPolicy, ScrubberConfig};
use crate::anonymization::names::{MonikerGenerator, NameGenerator, NAME_SEPARATOR};
use crate::domain::{Member, PoolUser, UserAttribute};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;

const EMAIL: &str = "email";
const GIVEN_NAME: &str = "given_name";
const FAMILY_NAME: &str = "family_name";
const PREFERRED_NAME: &str = "preferred_name";

/// A synthetic identity standing in for one real person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubbedIdentity {
    pub first: String,
    pub last: String,
    pub email: String,
}

/// Counters for one scrubber's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrubStats {
    /// Records whose PII was replaced
    pub scrubbed: usize,
    /// Records kept verbatim because of an allow-listed domain
    pub allow_listed: usize,
    /// Members with no email to scrub
    pub skipped: usize,
    /// Replacements served from the per-run memo
    pub reused: usize,
}

/// Replaces email addresses and names with synthetic ones
///
/// One instance is meant to live for one export run. Under
/// [`ScrubPolicy::PerRun`] it remembers the identity issued for each original
/// email, so a member and the matching pool user get the same replacement.
pub struct Scrubber {
    allowed_domains: Vec<String>,
    generator: Box<dyn NameGenerator>,
    memo: Option<HashMap<String, ScrubbedIdentity>>,
    audit_logger: Option<AuditLogger>,
    stats: ScrubStats,
}

impl Scrubber {
    /// Create a scrubber with an explicit generator
    pub fn new(
        allowed_domains: Vec<String>,
        policy: ScrubPolicy,
        generator: Box<dyn NameGenerator>,
    ) -> Self {
        let memo = match policy {
            ScrubPolicy::PerRun => Some(HashMap::new()),
            ScrubPolicy::PerCall => None,
        };

        Self {
            allowed_domains,
            generator,
            memo,
            audit_logger: None,
            stats: ScrubStats::default(),
        }
    }

    /// Create a scrubber from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the audit log
    /// cannot be prepared.
    pub fn from_config(config: &ScrubberConfig) -> Result<Self> {
        config.validate().context("Invalid scrubber configuration")?;

        let mut scrubber = Self::new(
            config.allowed_domains.clone(),
            config.policy,
            Box::new(MonikerGenerator::from_seed_opt(config.name_seed)),
        );

        if config.audit.enabled {
            scrubber.audit_logger = Some(
                AuditLogger::new(
                    config.audit.log_path.clone(),
                    config.audit.json_format,
                    true,
                )
                .context("Failed to create scrub audit logger")?,
            );
        }

        Ok(scrubber)
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> ScrubStats {
        self.stats
    }

    /// Whether the email's domain ends with an allow-listed suffix
    ///
    /// The check is case-sensitive. An email without `@` has an empty
    /// domain and is never allow-listed.
    pub fn is_allow_listed(&self, email: &str) -> bool {
        let domain = email_domain(email);
        !domain.is_empty()
            && self
                .allowed_domains
                .iter()
                .any(|suffix| domain.ends_with(suffix.as_str()))
    }

    /// Scrub a member record
    ///
    /// Returns a copy whose `email` attribute is synthetic, or an unchanged
    /// copy when the email is allow-listed or absent.
    pub fn scrub_member(&mut self, member: &Member) -> Member {
        let Some(email) = member.email() else {
            self.stats.skipped += 1;
            self.audit(RecordKind::Member, None, ScrubOutcome::Skipped, false);
            return member.clone();
        };

        if self.is_allow_listed(email) {
            self.stats.allow_listed += 1;
            self.audit(RecordKind::Member, Some(email), ScrubOutcome::AllowListed, false);
            return member.clone();
        }

        let (identity, reused) = self.identity_for(Some(email));
        self.stats.scrubbed += 1;
        self.audit(RecordKind::Member, Some(email), ScrubOutcome::Scrubbed, reused);
        member.with_email(identity.email)
    }

    /// Scrub a pool user
    ///
    /// `email`, `given_name`, `family_name` and `preferred_name` are removed
    /// and `email`, `given_name`, `family_name` appended with synthetic
    /// values. A username containing `@` becomes the synthetic email.
    pub fn scrub_pool_user(&mut self, user: &PoolUser) -> PoolUser {
        let email = user.email();

        if email.is_some_and(|email| self.is_allow_listed(email)) {
            self.stats.allow_listed += 1;
            self.audit(RecordKind::PoolUser, email, ScrubOutcome::AllowListed, false);
            return user.clone();
        }

        let (identity, reused) = self.identity_for(email);
        self.stats.scrubbed += 1;
        self.audit(RecordKind::PoolUser, email, ScrubOutcome::Scrubbed, reused);

        let mut scrubbed = user.clone();
        scrubbed.attributes.retain(|attr| {
            !matches!(
                attr.name.as_str(),
                EMAIL | GIVEN_NAME | FAMILY_NAME | PREFERRED_NAME
            )
        });
        scrubbed
            .attributes
            .push(UserAttribute::new(EMAIL, identity.email.clone()));
        scrubbed
            .attributes
            .push(UserAttribute::new(GIVEN_NAME, identity.first));
        scrubbed
            .attributes
            .push(UserAttribute::new(FAMILY_NAME, identity.last));

        if user.username_is_email() {
            scrubbed.username = identity.email;
        }

        scrubbed
    }

    /// Identity for an original email, plus whether it came from the memo
    ///
    /// Users without an email always get a fresh identity.
    fn identity_for(&mut self, email: Option<&str>) -> (ScrubbedIdentity, bool) {
        let domain = email.map(email_domain).unwrap_or("");

        match (self.memo.as_mut(), email) {
            (Some(memo), Some(email)) => {
                if let Some(identity) = memo.get(email) {
                    self.stats.reused += 1;
                    return (identity.clone(), true);
                }
                let identity = build_identity(&self.generator.next_name(), domain);
                memo.insert(email.to_string(), identity.clone());
                (identity, false)
            }
            _ => (build_identity(&self.generator.next_name(), domain), false),
        }
    }

    fn audit(
        &self,
        record: RecordKind,
        email: Option<&str>,
        outcome: ScrubOutcome,
        reused: bool,
    ) {
        if let Some(logger) = &self.audit_logger {
            if let Err(e) = logger.log_scrub(record, email, outcome, reused) {
                tracing::warn!(error = %e, "Failed to write scrub audit entry");
            }
        }
    }
}

/// Substring from and including the first `@`; empty when there is none
pub fn email_domain(email: &str) -> &str {
    email.find('@').map(|at| &email[at..]).unwrap_or("")
}

fn build_identity(name: &str, domain: &str) -> ScrubbedIdentity {
    let (first, last) = name.split_once(NAME_SEPARATOR).unwrap_or((name, ""));
    ScrubbedIdentity {
        first: first.to_string(),
        last: last.to_string(),
        email: format!("{}{}", name.replace(NAME_SEPARATOR, "."), domain),
    }
}
