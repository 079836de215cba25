//! ALFA Biometrics - Modality
//!
//! Which class of biometric sensor the device can use right now.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::platform::{AuthPolicy, BiometricContext, BiometryKind};

/// Biometric option available on a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BiometricModality {
    /// No usable biometry
    #[default]
    None,
    /// Touch ID / fingerprint reader
    Fingerprint,
    /// Face ID / face recognition
    Face,
}

impl BiometricModality {
    /// Probe `context` for the usable modality.
    ///
    /// Availability gates kind: a device that cannot evaluate `policy` reports
    /// `None` whatever sensor it carries.
    pub fn detect(context: &dyn BiometricContext, policy: AuthPolicy) -> Self {
        if !context.can_evaluate(policy) {
            return Self::None;
        }
        context.biometry_kind().into()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fingerprint => "fingerprint",
            Self::Face => "face",
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<BiometryKind> for BiometricModality {
    fn from(kind: BiometryKind) -> Self {
        match kind {
            BiometryKind::None => Self::None,
            BiometryKind::Touch => Self::Fingerprint,
            BiometryKind::Face => Self::Face,
        }
    }
}

impl fmt::Display for BiometricModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockContext;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(BiometricModality::from(BiometryKind::None), BiometricModality::None);
        assert_eq!(BiometricModality::from(BiometryKind::Touch), BiometricModality::Fingerprint);
        assert_eq!(BiometricModality::from(BiometryKind::Face), BiometricModality::Face);
    }

    #[test]
    fn test_detect_available() {
        let ctx = MockContext::available(BiometryKind::Face);
        assert_eq!(
            BiometricModality::detect(&ctx, AuthPolicy::default()),
            BiometricModality::Face
        );
        assert_eq!(ctx.can_evaluate_count(), 1);
    }

    #[test]
    fn test_detect_unavailable_ignores_sensor() {
        for kind in [BiometryKind::None, BiometryKind::Touch, BiometryKind::Face] {
            let ctx = MockContext::unavailable(kind);
            assert_eq!(
                BiometricModality::detect(&ctx, AuthPolicy::default()),
                BiometricModality::None
            );
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&BiometricModality::Fingerprint).unwrap();
        assert_eq!(json, "\"fingerprint\"");
        assert_eq!(BiometricModality::Face.to_string(), "face");
        assert!(!BiometricModality::None.is_present());
    }
}
