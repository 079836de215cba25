//! # ALFA Biometrics
//!
//! Face ID / Touch ID facade with a closed outcome taxonomy.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    ALFA BIOMETRICS                       │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────┐  │
//! │  │  MODALITY   │  │  OUTCOME    │  │  CONFIG         │  │
//! │  │  none/face/ │  │  7 reasons  │  │  policy +       │  │
//! │  │  fingerprint│  │  + success  │  │  scheduling     │  │
//! │  └──────┬──────┘  └──────┬──────┘  └────────┬────────┘  │
//! │         │                │                   │           │
//! │  ┌──────┴────────────────┴───────────────────┴────────┐ │
//! │  │              BIOMETRIC AUTHENTICATOR                │ │
//! │  │   probe → challenge → map → hop to executor → cb    │ │
//! │  └──────────────┬──────────────────────┬──────────────┘ │
//! │                 │                      │                 │
//! │  ┌──────────────┴──────┐  ┌────────────┴──────────────┐ │
//! │  │  PLATFORM CONTEXT   │  │  EXECUTOR                 │ │
//! │  │  (LocalAuth-style)  │  │  (main/UI queue)          │ │
//! │  └─────────────────────┘  └───────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - Every `authenticate` call yields exactly one `BiometricOutcome`
//! - Unknown platform errors fold into `BiometricError::Unknown`
//! - Outcomes are delivered on the authenticator's executor
//! - Dropping the authenticator cancels delivery silently
//!
//! # Example
//!
//! ```rust,ignore
//! use alfa_biometrics::{BiometricAuthenticator, BiometricOutcome, SerialQueue};
//!
//! let auth = BiometricAuthenticator::new(platform_context, SerialQueue::new("main")?);
//!
//! auth.authenticate("Unlock app", |outcome| match outcome {
//!     BiometricOutcome::Success => println!("welcome back"),
//!     BiometricOutcome::Failure(reason) => println!("{}", reason.description()),
//! });
//! ```

pub mod authenticator;
pub mod config;
pub mod error;
pub mod executor;
pub mod modality;
pub mod outcome;
pub mod platform;

#[cfg(test)]
mod mock;

pub use authenticator::{AuthState, BiometricAuthenticator, Completion};
pub use config::{AuthenticatorConfig, ChallengeScheduling};
pub use error::{BioError, BioResult};
pub use executor::{Executor, InlineExecutor, Job, ManualQueue, SerialQueue};
pub use modality::BiometricModality;
pub use outcome::{BiometricError, BiometricOutcome};
pub use platform::{
    AuthPolicy, BiometricContext, BiometryKind, PlatformError, PlatformErrorCode, Reply,
    UnsupportedPlatform, BIOMETRIC_ERROR_DOMAIN,
};

/// ALFA Biometrics version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }
}
