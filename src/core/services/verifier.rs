//! Verification orchestrator
//!
//! Sends a normalized request to the knowledge service, validates the answer
//! and applies the fail-safe policy: anything short of a well-formed verdict
//! becomes a suspect verdict.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use crate::core::models::{Failure, Verification, VerificationRequest, VerificationVerdict};
use crate::core::ports::{KnowledgeError, KnowledgeService};

use super::decoder::{DecodeError, decode_verdict};
use super::instruction::{DEFAULT_REGULATOR, render_instruction};

/// Deadline applied when none is configured
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

/// Everything that can go wrong in a single attempt
#[derive(Debug)]
enum AttemptError {
    Service(KnowledgeError),
    Deadline(Duration),
    NoTimer(&'static str),
    Decode(DecodeError),
}

impl AttemptError {
    const fn failure(&self) -> Failure {
        match self {
            Self::Service(KnowledgeError::Timeout) | Self::Deadline(_) => Failure::Timeout,
            Self::Service(_) | Self::NoTimer(_) => Failure::Transport,
            Self::Decode(_) => Failure::Schema,
        }
    }
}

impl std::fmt::Display for AttemptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(e) => write!(f, "{e}"),
            Self::Deadline(d) => write!(f, "no answer within {}s", d.as_secs_f32()),
            Self::NoTimer(why) => write!(f, "cannot arm deadline: {why}"),
            Self::Decode(e) => write!(f, "invalid verdict: {e}"),
        }
    }
}

/// The verification engine
///
/// Holds no per-call state; one instance can serve concurrent callers.
///
/// While a deadline is set (the default), calls must run inside a tokio
/// runtime with time enabled. Elsewhere the call is not attempted and the
/// fail-safe verdict is returned.
#[derive(Clone)]
pub struct Verifier {
    service: Arc<dyn KnowledgeService>,
    regulator: String,
    deadline: Option<Duration>,
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("service", &self.service.name())
            .field("regulator", &self.regulator)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl Verifier {
    /// Create a verifier with the default regulator and deadline
    #[must_use]
    pub fn new(service: Arc<dyn KnowledgeService>) -> Self {
        Self {
            service,
            regulator: DEFAULT_REGULATOR.to_string(),
            deadline: Some(DEFAULT_DEADLINE),
        }
    }

    /// Name the national regulator to consult first
    #[must_use]
    pub fn with_regulator(mut self, regulator: impl Into<String>) -> Self {
        self.regulator = regulator.into();
        self
    }

    /// Bound the wait for the knowledge service
    ///
    /// The deadline is a tokio timer; see [`Verifier`] for the runtime it needs.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Wait for the knowledge service for as long as it takes
    #[must_use]
    pub const fn without_deadline(mut self) -> Self {
        self.deadline = None;
        self
    }

    /// Verify a request; always resolves to a verdict
    ///
    /// Runs under tokio with time enabled unless [`Self::without_deadline`]
    /// was applied; without a usable timer the verdict is the fail-safe one.
    pub async fn verify(&self, request: &VerificationRequest) -> VerificationVerdict {
        self.verify_detailed(request).await.verdict
    }

    /// Verify a request and report how the verdict was reached
    pub async fn verify_detailed(&self, request: &VerificationRequest) -> Verification {
        match self.attempt(request).await {
            Ok(verdict) => {
                log::info!(
                    "Verification resolved by {}: suspect={}",
                    self.service.name(),
                    verdict.is_suspect
                );
                Verification::resolved(verdict)
            },
            Err(err) => {
                let failure = err.failure();
                log::error!(
                    "Verification failed ({failure}) via {}: {err}; returning fail-safe verdict",
                    self.service.name()
                );
                Verification::fail_safe(failure, request.drug_name())
            },
        }
    }

    async fn attempt(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationVerdict, AttemptError> {
        let instruction = render_instruction(request, &self.regulator);
        let call = self.service.generate(&instruction);

        let raw = match self.deadline {
            Some(deadline) => arm_deadline(deadline, call)?
                .await
                .map_err(|_| AttemptError::Deadline(deadline))?,
            None => call.await,
        }
        .map_err(AttemptError::Service)?;

        log::debug!("Knowledge service returned {} bytes", raw.len());
        decode_verdict(&raw).map_err(AttemptError::Decode)
    }
}

/// Wrap `call` in a tokio timeout
///
/// `tokio::time::timeout` panics outside a runtime or when the runtime was
/// built without `enable_time`; both are reported as [`AttemptError::NoTimer`].
fn arm_deadline<F: Future>(
    deadline: Duration,
    call: F,
) -> Result<tokio::time::Timeout<F>, AttemptError> {
    if tokio::runtime::Handle::try_current().is_err() {
        return Err(AttemptError::NoTimer("no tokio runtime"));
    }
    std::panic::catch_unwind(AssertUnwindSafe(|| tokio::time::timeout(deadline, call)))
        .map_err(|_| AttemptError::NoTimer("tokio timers are disabled"))
}
