//! Supporting types for the RunwayService CRD

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration carried by the run-latest, pinned, and release modes
///
/// A configuration describes the desired state of the revisions stamped
/// out for a service. Each configuration owns exactly one revision
/// template.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSpec {
    /// Template for the revisions created from this configuration
    #[serde(default)]
    pub revision_template: RevisionTemplateSpec,
}

impl ConfigurationSpec {
    /// Fill unset fields with their default values
    ///
    /// Cascades into the revision template. Idempotent.
    pub fn set_defaults(&mut self) {
        self.revision_template.set_defaults();
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.revision_template.validate()
    }
}

/// Template describing the revisions a configuration stamps out
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionTemplateSpec {
    /// Desired revision spec
    #[serde(default)]
    pub spec: RevisionSpec,
}

impl RevisionTemplateSpec {
    /// Fill unset fields with their default values
    pub fn set_defaults(&mut self) {
        self.spec.set_defaults();
    }

    /// Validate the template
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.spec.validate()
    }
}

/// Leaf configuration for a single revision
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSpec {
    /// Maximum number of in-flight requests per container instance
    ///
    /// Zero means unlimited concurrency. Never touched by defaulting.
    #[serde(default)]
    pub container_concurrency: u32,

    /// Request timeout in seconds
    ///
    /// Left unset by deserialization; defaulting fills it with
    /// [`crate::DEFAULT_TIMEOUT_SECONDS`] when absent. Explicit values
    /// are never overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,
}

impl RevisionSpec {
    /// Fill unset fields with their default values
    ///
    /// Only `timeout_seconds` participates in defaulting; an explicit
    /// value is kept exactly as provided.
    pub fn set_defaults(&mut self) {
        if self.timeout_seconds.is_none() {
            self.timeout_seconds = Some(crate::DEFAULT_TIMEOUT_SECONDS);
        }
    }

    /// Validate the revision spec
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.container_concurrency > crate::MAX_CONTAINER_CONCURRENCY {
            return Err(crate::Error::validation(format!(
                "containerConcurrency must be at most {}, got {}",
                crate::MAX_CONTAINER_CONCURRENCY,
                self.container_concurrency
            )));
        }
        Ok(())
    }
}

/// Service lifecycle phase
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[non_exhaustive]
pub enum ServicePhase {
    /// Waiting to be reconciled
    #[default]
    Pending,
    /// Latest revision is serving traffic
    Ready,
    /// Reconciliation failed
    Failed,
}

impl std::fmt::Display for ServicePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Condition status following Kubernetes conventions
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ConditionStatus {
    /// Condition is true
    True,
    /// Condition is false
    False,
    /// Condition status is unknown
    #[default]
    Unknown,
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => write!(f, "True"),
            Self::False => write!(f, "False"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Kubernetes-style condition for status reporting
///
/// This type follows Kubernetes API conventions and is used by the
/// service status (ConfigurationsReady, RoutesReady, Ready).
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct Condition {
    /// Type of condition (e.g., Ready, ConfigurationsReady)
    #[serde(rename = "type")]
    pub type_: String,

    /// Status of the condition (True, False, Unknown)
    pub status: ConditionStatus,

    /// Machine-readable reason for the condition
    pub reason: String,

    /// Human-readable message
    pub message: String,

    /// Last time the condition transitioned
    #[serde(rename = "lastTransitionTime")]
    pub last_transition_time: DateTime<Utc>,
}

impl Condition {
    /// Create a new condition with the current timestamp
    pub fn new(
        type_: impl Into<String>,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            type_: type_.into(),
            status,
            reason: reason.into(),
            message: message.into(),
            last_transition_time: Utc::now(),
        }
    }
}
