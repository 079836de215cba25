//! ALFA Biometrics - Platform Capability
//!
//! The narrow interface to the OS biometric primitive (LocalAuthentication
//! style): a policy probe, a sensor-kind query and an asynchronous
//! challenge that replies exactly once on a thread of the platform's choosing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error domain of biometric platform errors
pub const BIOMETRIC_ERROR_DOMAIN: &str = "com.apple.LocalAuthentication";

/// Platform reply for one challenge: `(success, error)`
pub type Reply = Box<dyn FnOnce(bool, Option<PlatformError>) + Send + 'static>;

/// Policy evaluated by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthPolicy {
    /// Biometrics only (Face ID / Touch ID)
    #[default]
    DeviceOwnerAuthenticationWithBiometrics,
    /// Biometrics with device passcode as fallback
    DeviceOwnerAuthentication,
}

/// Sensor class reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiometryKind {
    None,
    Touch,
    Face,
}

/// Raw platform error: an error domain plus a numeric code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{domain} error {code}")]
pub struct PlatformError {
    pub domain: String,
    pub code: i64,
}

impl PlatformError {
    /// Create an error in an arbitrary domain
    pub fn new(domain: impl Into<String>, code: i64) -> Self {
        Self {
            domain: domain.into(),
            code,
        }
    }

    /// Create an error in the biometric domain
    pub fn biometric(code: PlatformErrorCode) -> Self {
        Self::new(BIOMETRIC_ERROR_DOMAIN, code as i64)
    }

    /// Whether this error belongs to the biometric domain
    pub fn is_biometric(&self) -> bool {
        self.domain == BIOMETRIC_ERROR_DOMAIN
    }

    /// Decode the code, if it is a biometric-domain code this crate knows
    pub fn biometric_code(&self) -> Option<PlatformErrorCode> {
        if self.is_biometric() {
            PlatformErrorCode::from_code(self.code)
        } else {
            None
        }
    }
}

/// Known biometric-domain error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum PlatformErrorCode {
    AuthenticationFailed = -1,
    UserCancel = -2,
    UserFallback = -3,
    SystemCancel = -4,
    PasscodeNotSet = -5,
    BiometryNotAvailable = -6,
    BiometryNotEnrolled = -7,
    BiometryLockout = -8,
    AppCancel = -9,
    InvalidContext = -10,
    NotInteractive = -1004,
}

impl PlatformErrorCode {
    pub fn from_code(code: i64) -> Option<Self> {
        let code = match code {
            -1 => Self::AuthenticationFailed,
            -2 => Self::UserCancel,
            -3 => Self::UserFallback,
            -4 => Self::SystemCancel,
            -5 => Self::PasscodeNotSet,
            -6 => Self::BiometryNotAvailable,
            -7 => Self::BiometryNotEnrolled,
            -8 => Self::BiometryLockout,
            -9 => Self::AppCancel,
            -10 => Self::InvalidContext,
            -1004 => Self::NotInteractive,
            _ => return None,
        };
        Some(code)
    }
}

/// Platform biometric capability (probe + challenge)
///
/// Implementations must call the reply passed to [`evaluate`](Self::evaluate)
/// exactly once. The reply may run on any thread. A context is not assumed to
/// be reentrant: overlapping challenges are only issued when the
/// authenticator is configured for concurrent scheduling.
pub trait BiometricContext: Send + Sync {
    /// Whether `policy` can be evaluated right now
    fn can_evaluate(&self, policy: AuthPolicy) -> bool;

    /// Sensor class of the device
    fn biometry_kind(&self) -> BiometryKind;

    /// Prompt the user with `reason` and reply with the result
    fn evaluate(&self, policy: AuthPolicy, reason: &str, reply: Reply);
}

impl<C: BiometricContext + ?Sized> BiometricContext for std::sync::Arc<C> {
    fn can_evaluate(&self, policy: AuthPolicy) -> bool {
        (**self).can_evaluate(policy)
    }

    fn biometry_kind(&self) -> BiometryKind {
        (**self).biometry_kind()
    }

    fn evaluate(&self, policy: AuthPolicy, reason: &str, reply: Reply) {
        (**self).evaluate(policy, reason, reply)
    }
}

/// Context for hosts without a biometric sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl BiometricContext for UnsupportedPlatform {
    fn can_evaluate(&self, _policy: AuthPolicy) -> bool {
        false
    }

    fn biometry_kind(&self) -> BiometryKind {
        BiometryKind::None
    }

    fn evaluate(&self, _policy: AuthPolicy, _reason: &str, reply: Reply) {
        reply(
            false,
            Some(PlatformError::biometric(PlatformErrorCode::BiometryNotAvailable)),
        );
    }
}
