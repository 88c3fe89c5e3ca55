//! Conversion from Cognito SDK types to domain records

use crate::domain::{CognitoError, MfaOption, PoolUser, UserAttribute};
use aws_sdk_cognitoidentityprovider::primitives::DateTime as SmithyDateTime;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, MfaOptionType, UserType};
use chrono::{DateTime, Utc};

/// Convert a listed user into a [`PoolUser`]
///
/// Attributes without a value are dropped. Account state (`Enabled`,
/// `MFAOptions`) is kept so the snapshot can reseed a pool faithfully.
pub fn pool_user_from_sdk(user: UserType) -> Result<PoolUser, CognitoError> {
    let username = user
        .username
        .clone()
        .ok_or_else(|| CognitoError::InvalidResponse("user without a Username".to_string()))?;

    let attributes = user
        .attributes
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(user_attribute_from_sdk)
        .collect();

    let mut pool_user = PoolUser::new(username, attributes);
    pool_user.user_create_date = user.user_create_date.as_ref().and_then(to_chrono);
    pool_user.user_last_modified_date = user.user_last_modified_date.as_ref().and_then(to_chrono);
    pool_user.user_status = user.user_status.as_ref().map(|s| s.as_str().to_string());
    pool_user.enabled = Option::from(user.enabled);
    pool_user.mfa_options = user
        .mfa_options
        .as_deref()
        .map(|options| options.iter().map(mfa_option_from_sdk).collect());

    Ok(pool_user)
}

fn user_attribute_from_sdk(attr: &AttributeType) -> Option<UserAttribute> {
    attr.value()
        .map(|value| UserAttribute::new(attr.name(), value))
}

fn mfa_option_from_sdk(option: &MfaOptionType) -> MfaOption {
    MfaOption {
        delivery_medium: option.delivery_medium().map(|m| m.as_str().to_string()),
        attribute_name: option.attribute_name().map(str::to_string),
    }
}

fn to_chrono(date: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(date.secs(), date.subsec_nanos())
}
