//! Scripted platform context for tests

use parking_lot::Mutex;

use crate::platform::{AuthPolicy, BiometricContext, BiometryKind, PlatformError, Reply};

/// How `evaluate` answers
#[derive(Debug, Clone)]
pub enum ReplyMode {
    /// Reply before `evaluate` returns
    Immediate,
    /// Reply from a freshly spawned thread
    Background,
    /// Hold the reply until `release_next` is called
    Deferred,
}

#[derive(Default)]
struct Calls {
    can_evaluate: usize,
    evaluate: usize,
    reasons: Vec<String>,
    policies: Vec<AuthPolicy>,
}

pub struct MockContext {
    available: Mutex<bool>,
    kind: BiometryKind,
    result: Mutex<(bool, Option<PlatformError>)>,
    mode: ReplyMode,
    held: Mutex<Vec<Reply>>,
    calls: Mutex<Calls>,
}

impl MockContext {
    pub fn new(available: bool, kind: BiometryKind) -> Self {
        Self {
            available: Mutex::new(available),
            kind,
            result: Mutex::new((true, None)),
            mode: ReplyMode::Immediate,
            held: Mutex::new(Vec::new()),
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn available(kind: BiometryKind) -> Self {
        Self::new(true, kind)
    }

    pub fn unavailable(kind: BiometryKind) -> Self {
        Self::new(false, kind)
    }

    pub fn with_result(self, success: bool, error: Option<PlatformError>) -> Self {
        *self.result.lock() = (success, error);
        self
    }

    pub fn with_mode(mut self, mode: ReplyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_available(&self, available: bool) {
        *self.available.lock() = available;
    }

    /// Answer the oldest held challenge with `(success, error)`.
    /// Returns false when nothing is held.
    pub fn release_next(&self, success: bool, error: Option<PlatformError>) -> bool {
        let reply = {
            let mut held = self.held.lock();
            if held.is_empty() {
                return false;
            }
            held.remove(0)
        };
        reply(success, error);
        true
    }

    pub fn held_count(&self) -> usize {
        self.held.lock().len()
    }

    pub fn can_evaluate_count(&self) -> usize {
        self.calls.lock().can_evaluate
    }

    pub fn evaluate_count(&self) -> usize {
        self.calls.lock().evaluate
    }

    pub fn reasons(&self) -> Vec<String> {
        self.calls.lock().reasons.clone()
    }

    pub fn policies(&self) -> Vec<AuthPolicy> {
        self.calls.lock().policies.clone()
    }
}

impl BiometricContext for MockContext {
    fn can_evaluate(&self, policy: AuthPolicy) -> bool {
        let mut calls = self.calls.lock();
        calls.can_evaluate += 1;
        calls.policies.push(policy);
        *self.available.lock()
    }

    fn biometry_kind(&self) -> BiometryKind {
        self.kind
    }

    fn evaluate(&self, policy: AuthPolicy, reason: &str, reply: Reply) {
        {
            let mut calls = self.calls.lock();
            calls.evaluate += 1;
            calls.reasons.push(reason.to_string());
            calls.policies.push(policy);
        }

        let (success, error) = self.result.lock().clone();
        match self.mode {
            ReplyMode::Immediate => reply(success, error),
            ReplyMode::Background => {
                std::thread::spawn(move || reply(success, error));
            }
            ReplyMode::Deferred => self.held.lock().push(reply),
        }
    }
}
