//! Fetch, validate and classify a forecast payload into a [`ViewModel`].
//!
//! A run is a single linear pass. Any failure ends it with a [`PipelineError`];
//! nothing is retried and nothing is carried over to the next run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::COMPACT_SLOT_COUNT;
use crate::fetch::{Fetcher, TransportError};
use crate::models::{ApiEnvelope, ClassifiedSlot, ForecastData, RawForecastSlot, ViewModel};

/// Terminal failure of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("HTTP error, status code {status_code}")]
    Http { status_code: u16 },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("invalid payload: {reason}")]
    Validation { reason: String },
}

impl PipelineError {
    fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Http { .. } => "http",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::Validation { .. } => "validation",
        }
    }
}

/// How many slots a payload must carry and which of them are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MinimumSlotPolicy {
    /// At least one slot; every slot is used
    #[default]
    All,
    /// At least `count` slots; only the first `count` are used
    FirstN { count: usize },
}

impl MinimumSlotPolicy {
    /// The three-slot layout: current plus the next two windows
    pub fn compact() -> Self {
        Self::FirstN {
            count: COMPACT_SLOT_COUNT,
        }
    }

    pub fn min_slots(&self) -> usize {
        match self {
            Self::All => 1,
            Self::FirstN { count } => (*count).max(1),
        }
    }

    pub fn select<'a>(&self, slots: &'a [RawForecastSlot]) -> &'a [RawForecastSlot] {
        match self {
            Self::All => slots,
            Self::FirstN { .. } => &slots[..self.min_slots().min(slots.len())],
        }
    }
}

/// Per-run progress, traced at every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Fetching,
    Validating,
    Classifying,
    Done,
    Failed,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    endpoint: String,
    policy: MinimumSlotPolicy,
    show_update_notice: bool,
}

impl Pipeline {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            policy: MinimumSlotPolicy::default(),
            show_update_notice: true,
        }
    }

    pub fn with_policy(mut self, policy: MinimumSlotPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_update_notice(mut self, show: bool) -> Self {
        self.show_update_notice = show;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn policy(&self) -> MinimumSlotPolicy {
        self.policy
    }

    /// Runs one fetch-validate-classify cycle against `fetcher`
    pub async fn run<F>(&self, fetcher: &F) -> Result<ViewModel, PipelineError>
    where
        F: Fetcher + ?Sized,
    {
        transition(PipelineState::Idle, PipelineState::Fetching);
        let result = self.execute(fetcher).await;

        match &result {
            Ok(view) => {
                transition(PipelineState::Classifying, PipelineState::Done);
                tracing::info!(
                    city = %view.city_name,
                    future_slots = view.future.len(),
                    "Forecast ready"
                );
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), "Forecast run failed: {}", e);
            }
        }
        result
    }

    async fn execute<F>(&self, fetcher: &F) -> Result<ViewModel, PipelineError>
    where
        F: Fetcher + ?Sized,
    {
        let response = fetcher
            .fetch(&self.endpoint)
            .await
            .map_err(|e| fail(PipelineState::Fetching, e.into()))?;

        if !response.is_success() {
            return Err(fail(
                PipelineState::Fetching,
                PipelineError::Http {
                    status_code: response.status,
                },
            ));
        }

        transition(PipelineState::Fetching, PipelineState::Validating);
        let data = self
            .validate(&response.body)
            .map_err(|e| fail(PipelineState::Validating, e))?;

        transition(PipelineState::Validating, PipelineState::Classifying);
        self.assemble(&data)
            .map_err(|e| fail(PipelineState::Classifying, e))
    }

    fn validate(&self, body: &[u8]) -> Result<ForecastData, PipelineError> {
        let envelope: ApiEnvelope = serde_json::from_slice(body)
            .map_err(|e| PipelineError::MalformedPayload(e.to_string()))?;

        match envelope.success {
            Some(true) => {}
            Some(false) => return Err(PipelineError::validation("API reported failure")),
            None => return Err(PipelineError::validation("missing success flag")),
        }

        let data = envelope
            .data
            .ok_or_else(|| PipelineError::validation("missing forecast data"))?;
        let data: ForecastData = serde_json::from_value(data)
            .map_err(|e| PipelineError::MalformedPayload(e.to_string()))?;

        let required = self.policy.min_slots();
        if data.slots().len() < required {
            return Err(PipelineError::validation(format!(
                "expected at least {} forecast slot(s), got {}",
                required,
                data.slots().len()
            )));
        }

        Ok(data)
    }

    fn assemble(&self, data: &ForecastData) -> Result<ViewModel, PipelineError> {
        let working = self.policy.select(data.slots());
        let (current, future) = working
            .split_first()
            .ok_or_else(|| PipelineError::validation("no forecast slots"))?;

        Ok(ViewModel {
            city_name: data.city.clone(),
            update_notice: data.update_time.clone().filter(|_| self.show_update_notice),
            current: ClassifiedSlot::from_raw(current),
            future: future.iter().map(ClassifiedSlot::from_raw).collect(),
        })
    }
}

fn transition(from: PipelineState, to: PipelineState) {
    tracing::debug!(?from, ?to, "Pipeline state change");
}

fn fail(from: PipelineState, error: PipelineError) -> PipelineError {
    transition(from, PipelineState::Failed);
    error
}
