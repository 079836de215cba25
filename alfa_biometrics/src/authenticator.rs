//! ALFA Biometrics - Authenticator
//!
//! Facade over the platform context: availability, modality and the
//! single-shot authentication challenge.
//!
//! Each `authenticate` call moves Idle -> AwaitingPlatformResponse -> delivery
//! and produces exactly one outcome. The platform reply holds only a weak
//! reference to the authenticator, so dropping the authenticator turns late
//! replies into no-ops and discards queued challenges.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::config::{AuthenticatorConfig, ChallengeScheduling};
use crate::executor::Executor;
use crate::modality::BiometricModality;
use crate::outcome::{BiometricError, BiometricOutcome};
use crate::platform::{BiometricContext, PlatformError};

/// Caller's completion callback
pub type Completion = Box<dyn FnOnce(BiometricOutcome) + Send + 'static>;

/// Authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No challenge in flight
    Idle,
    /// Platform prompt is showing
    AwaitingPlatformResponse,
}

struct PendingChallenge {
    reason: String,
    on_complete: Completion,
}

#[derive(Default)]
struct Challenges {
    in_flight: usize,
    pending: VecDeque<PendingChallenge>,
}

struct Inner {
    context: Box<dyn BiometricContext>,
    queue: Arc<dyn Executor>,
    config: AuthenticatorConfig,
    challenges: Mutex<Challenges>,
}

/// Biometric authenticator (Face ID / Touch ID)
pub struct BiometricAuthenticator {
    inner: Arc<Inner>,
}

impl BiometricAuthenticator {
    /// Create an authenticator delivering outcomes on `queue`
    pub fn new<C, E>(context: C, queue: E) -> Self
    where
        C: BiometricContext + 'static,
        E: Executor + 'static,
    {
        Self::with_config(context, queue, AuthenticatorConfig::default())
    }

    pub fn with_config<C, E>(context: C, queue: E, config: AuthenticatorConfig) -> Self
    where
        C: BiometricContext + 'static,
        E: Executor + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                context: Box::new(context),
                queue: Arc::new(queue),
                config,
                challenges: Mutex::new(Challenges::default()),
            }),
        }
    }

    pub fn config(&self) -> &AuthenticatorConfig {
        &self.inner.config
    }

    /// Check if the configured policy can be evaluated right now
    pub fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    /// Usable biometric modality; `None` whenever biometry is unavailable
    pub fn modality(&self) -> BiometricModality {
        BiometricModality::detect(self.inner.context.as_ref(), self.inner.config.policy)
    }

    pub fn state(&self) -> AuthState {
        if self.inner.challenges.lock().in_flight == 0 {
            AuthState::Idle
        } else {
            AuthState::AwaitingPlatformResponse
        }
    }

    /// Challenges waiting behind the one in flight
    pub fn pending_challenges(&self) -> usize {
        self.inner.challenges.lock().pending.len()
    }

    /// Authenticate the device owner.
    ///
    /// `reason` is shown verbatim in the system prompt. `on_complete` runs
    /// exactly once on the authenticator's executor, except when biometry is
    /// unavailable up front: then it runs on the calling thread with
    /// `Failure(BiometryNotAvailable)` before this returns, and the platform
    /// is never prompted.
    pub fn authenticate<F>(&self, reason: &str, on_complete: F)
    where
        F: FnOnce(BiometricOutcome) + Send + 'static,
    {
        if !self.inner.is_available() {
            tracing::debug!("Biometry unavailable, challenge skipped");
            on_complete(BiometricOutcome::Failure(BiometricError::BiometryNotAvailable));
            return;
        }

        let on_complete: Completion = Box::new(on_complete);
        if let Some(on_complete) = self.inner.admit(reason, on_complete) {
            Inner::start(&self.inner, reason.to_owned(), on_complete);
        }
    }

    /// Async form of [`authenticate`](Self::authenticate)
    pub async fn authenticate_async(&self, reason: &str) -> BiometricOutcome {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.authenticate(reason, move |outcome| {
            let _ = tx.send(outcome);
        });

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("Biometric outcome discarded before delivery");
                BiometricOutcome::Failure(BiometricError::Unknown)
            }
        }
    }
}

impl fmt::Debug for BiometricAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiometricAuthenticator")
            .field("config", &self.inner.config)
            .field("state", &self.state())
            .field("pending", &self.pending_challenges())
            .finish()
    }
}

impl Inner {
    fn is_available(&self) -> bool {
        self.context.can_evaluate(self.config.policy)
    }

    /// Take a challenge slot, or queue behind the one in flight.
    /// Returns the callback back when the caller should start now.
    fn admit(&self, reason: &str, on_complete: Completion) -> Option<Completion> {
        let mut challenges = self.challenges.lock();
        if self.config.scheduling == ChallengeScheduling::Serialized && challenges.in_flight > 0 {
            challenges.pending.push_back(PendingChallenge {
                reason: reason.to_owned(),
                on_complete,
            });
            tracing::debug!(
                pending = challenges.pending.len(),
                "Biometric challenge queued"
            );
            return None;
        }
        challenges.in_flight += 1;
        Some(on_complete)
    }

    fn start(this: &Arc<Self>, reason: String, on_complete: Completion) {
        tracing::debug!(reason_len = reason.len(), "Starting biometric challenge");

        let owner = Arc::downgrade(this);
        // No lock may be held here: the platform is free to reply inline
        this.context.evaluate(
            this.config.policy,
            &reason,
            Box::new(move |success, error| Self::on_reply(owner, success, error, on_complete)),
        );
    }

    fn on_reply(
        owner: Weak<Self>,
        success: bool,
        error: Option<PlatformError>,
        on_complete: Completion,
    ) {
        let Some(this) = owner.upgrade() else {
            tracing::debug!("Authenticator dropped before platform replied");
            return;
        };

        let outcome = BiometricOutcome::from_reply(success, error.as_ref());
        match (&outcome, &error) {
            (BiometricOutcome::Failure(reason), Some(raw)) => {
                tracing::info!(platform_error = %raw, "Biometric challenge failed: {}", reason)
            }
            (BiometricOutcome::Failure(reason), None) => {
                tracing::info!("Biometric challenge failed: {}", reason)
            }
            (BiometricOutcome::Success, _) => tracing::info!("Biometric challenge succeeded"),
        }

        Self::deliver(&this, outcome, on_complete);
        Self::finish(&this);
    }

    /// Hop onto the designated executor, then call back if still alive
    fn deliver(this: &Arc<Self>, outcome: BiometricOutcome, on_complete: Completion) {
        let owner = Arc::downgrade(this);
        this.queue.dispatch(Box::new(move || match owner.upgrade() {
            Some(_alive) => on_complete(outcome),
            None => tracing::debug!("Authenticator dropped before outcome delivery"),
        }));
    }

    /// Release the slot, or hand it to the next queued challenge
    fn finish(this: &Arc<Self>) {
        loop {
            let next = {
                let mut challenges = this.challenges.lock();
                match challenges.pending.pop_front() {
                    Some(next) => next,
                    None => {
                        challenges.in_flight = challenges.in_flight.saturating_sub(1);
                        return;
                    }
                }
            };

            if this.is_available() {
                Self::start(this, next.reason, next.on_complete);
                return;
            }

            tracing::debug!("Biometry became unavailable, queued challenge skipped");
            Self::deliver(
                this,
                BiometricOutcome::Failure(BiometricError::BiometryNotAvailable),
                next.on_complete,
            );
        }
    }
}
