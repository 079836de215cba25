//! ALFA Biometrics - Outcome Taxonomy
//!
//! Closed set of results for one authentication attempt. The platform error
//! space is open; everything it reports folds into [`BiometricError`], with
//! [`BiometricError::Unknown`] as the sink.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::{PlatformError, PlatformErrorCode};

/// Reason an authentication attempt failed
///
/// The `Display` text is the fixed, user-facing English description.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricError {
    #[error("There was a problem verifying your identity.")]
    AuthenticationFailed,

    #[error("User Canceled")]
    UserCancel,

    #[error("User opted for Password")]
    UserFallback,

    #[error("Face ID/Touch ID is not available.")]
    BiometryNotAvailable,

    #[error("Face ID/Touch ID is not set up.")]
    BiometryNotEnrolled,

    #[error("Face ID/Touch ID is locked.")]
    BiometryLockout,

    #[error("An unknown error occurred")]
    Unknown,
}

impl BiometricError {
    /// Every reason, in declaration order
    pub const ALL: [BiometricError; 7] = [
        BiometricError::AuthenticationFailed,
        BiometricError::UserCancel,
        BiometricError::UserFallback,
        BiometricError::BiometryNotAvailable,
        BiometricError::BiometryNotEnrolled,
        BiometricError::BiometryLockout,
        BiometricError::Unknown,
    ];

    /// Classify a platform error. Total: absent, foreign-domain and
    /// unmapped codes all become `Unknown`.
    pub fn from_platform_error(error: Option<&PlatformError>) -> Self {
        match error.and_then(PlatformError::biometric_code) {
            Some(PlatformErrorCode::AuthenticationFailed) => Self::AuthenticationFailed,
            Some(PlatformErrorCode::UserCancel) => Self::UserCancel,
            Some(PlatformErrorCode::UserFallback) => Self::UserFallback,
            Some(PlatformErrorCode::BiometryNotAvailable) => Self::BiometryNotAvailable,
            Some(PlatformErrorCode::BiometryNotEnrolled) => Self::BiometryNotEnrolled,
            Some(PlatformErrorCode::BiometryLockout) => Self::BiometryLockout,
            Some(_) | None => Self::Unknown,
        }
    }

    /// English description, not localized
    pub fn description(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "There was a problem verifying your identity.",
            Self::UserCancel => "User Canceled",
            Self::UserFallback => "User opted for Password",
            Self::BiometryNotAvailable => "Face ID/Touch ID is not available.",
            Self::BiometryNotEnrolled => "Face ID/Touch ID is not set up.",
            Self::BiometryLockout => "Face ID/Touch ID is locked.",
            Self::Unknown => "An unknown error occurred",
        }
    }

    /// The user backed out rather than failing verification
    pub fn is_user_initiated(&self) -> bool {
        matches!(self, Self::UserCancel | Self::UserFallback)
    }
}

impl From<Option<&PlatformError>> for BiometricError {
    fn from(error: Option<&PlatformError>) -> Self {
        Self::from_platform_error(error)
    }
}

/// Terminal result of one authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricOutcome {
    Success,
    Failure(BiometricError),
}

impl BiometricOutcome {
    /// Translate a raw platform reply. The error is ignored on success.
    pub fn from_reply(success: bool, error: Option<&PlatformError>) -> Self {
        if success {
            Self::Success
        } else {
            Self::Failure(BiometricError::from_platform_error(error))
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Failure reason, if any
    pub fn error(&self) -> Option<BiometricError> {
        match self {
            Self::Success => None,
            Self::Failure(e) => Some(*e),
        }
    }

    /// Description of the failure reason; `None` on success
    pub fn description(&self) -> Option<&'static str> {
        self.error().map(|e| e.description())
    }

    pub fn into_result(self) -> Result<(), BiometricError> {
        match self {
            Self::Success => Ok(()),
            Self::Failure(e) => Err(e),
        }
    }
}

impl From<BiometricOutcome> for Result<(), BiometricError> {
    fn from(outcome: BiometricOutcome) -> Self {
        outcome.into_result()
    }
}
