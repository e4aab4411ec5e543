//! RunwayService Custom Resource Definition
//!
//! A RunwayService declares how a workload is rolled out. Exactly one
//! deployment mode is set per service:
//! - `manual`: rollout is driven entirely by the operator, no managed
//!   configuration
//! - `runLatest`: always route traffic to the latest ready revision
//! - `pinned`: route traffic to one named revision
//! - `release`: split traffic between a current and a candidate revision
//!
//! The admission layer calls [`RunwayService::set_defaults`] once on
//! every incoming document, then [`RunwayService::validate`] before
//! persisting it.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Condition, ConfigurationSpec, ServicePhase};

/// Marker payload for manual mode
///
/// Manual mode carries no configuration; the operator manages routes and
/// configurations directly.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ManualSpec {}

/// Payload for run-latest mode
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunLatestSpec {
    /// Configuration for the revisions stamped out for this service
    #[serde(default)]
    pub configuration: ConfigurationSpec,
}

/// Payload for pinned mode
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PinnedSpec {
    /// Name of the revision that receives all traffic
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub revision_name: String,

    /// Configuration for the revisions stamped out for this service
    #[serde(default)]
    pub configuration: ConfigurationSpec,
}

/// Payload for release mode
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSpec {
    /// Current and optional candidate revision, in that order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revisions: Vec<String>,

    /// Percentage of traffic routed to the candidate revision (0-99)
    #[serde(default)]
    pub rollout_percent: u32,

    /// Configuration for the revisions stamped out for this service
    #[serde(default)]
    pub configuration: ConfigurationSpec,
}

/// Deployment mode for a service
///
/// Modes are mutually exclusive; modeling them as an enum makes "at most
/// one mode set" structural, so a manifest naming two modes fails at
/// deserialization.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum DeploymentMode {
    /// Operator-driven rollout, no managed configuration
    Manual(ManualSpec),
    /// Always route to the latest ready revision
    RunLatest(RunLatestSpec),
    /// Route all traffic to one named revision
    Pinned(PinnedSpec),
    /// Split traffic between a current and a candidate revision
    Release(ReleaseSpec),
}

impl DeploymentMode {
    /// Returns the configuration this mode carries, if any
    ///
    /// Manual mode carries none.
    pub fn configuration(&self) -> Option<&ConfigurationSpec> {
        match self {
            Self::Manual(_) => None,
            Self::RunLatest(m) => Some(&m.configuration),
            Self::Pinned(m) => Some(&m.configuration),
            Self::Release(m) => Some(&m.configuration),
        }
    }

    /// Mutable access to the configuration this mode carries, if any
    pub fn configuration_mut(&mut self) -> Option<&mut ConfigurationSpec> {
        match self {
            Self::Manual(_) => None,
            Self::RunLatest(m) => Some(&mut m.configuration),
            Self::Pinned(m) => Some(&mut m.configuration),
            Self::Release(m) => Some(&mut m.configuration),
        }
    }

    /// Validate the mode payload
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            Self::Manual(_) => Ok(()),
            Self::RunLatest(m) => m.configuration.validate(),
            Self::Pinned(m) => {
                if m.revision_name.is_empty() {
                    return Err(crate::Error::validation(
                        "pinned mode requires a revision name",
                    ));
                }
                m.configuration.validate()
            }
            Self::Release(m) => {
                if m.revisions.is_empty() || m.revisions.len() > 2 {
                    return Err(crate::Error::validation(format!(
                        "release mode requires one or two revisions, got {}",
                        m.revisions.len()
                    )));
                }
                if m.rollout_percent > 99 {
                    return Err(crate::Error::validation(format!(
                        "rolloutPercent must be at most 99, got {}",
                        m.rollout_percent
                    )));
                }
                if m.revisions.len() == 1 && m.rollout_percent != 0 {
                    return Err(crate::Error::validation(
                        "rolloutPercent requires a candidate revision",
                    ));
                }
                m.configuration.validate()
            }
        }
    }
}

impl std::fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual(_) => write!(f, "manual"),
            Self::RunLatest(_) => write!(f, "runLatest"),
            Self::Pinned(_) => write!(f, "pinned"),
            Self::Release(_) => write!(f, "release"),
        }
    }
}

/// Specification for a RunwayService
///
/// A freshly deserialized spec may hold no mode at all; defaulting
/// treats that as a no-op, validation rejects it.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "runway.dev",
    version = "v1alpha1",
    kind = "RunwayService",
    plural = "runwayservices",
    shortname = "rws",
    status = "RunwayServiceStatus",
    derive = "PartialEq",
    namespaced,
    printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Domain","type":"string","jsonPath":".status.domain"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct RunwayServiceSpec {
    /// Deployment mode for this service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<DeploymentMode>,
}

impl RunwayServiceSpec {
    /// Returns true if this service is in manual mode
    pub fn is_manual(&self) -> bool {
        matches!(self.mode, Some(DeploymentMode::Manual(_)))
    }

    /// Returns the configuration carried by the current mode, if any
    pub fn configuration(&self) -> Option<&ConfigurationSpec> {
        self.mode.as_ref().and_then(DeploymentMode::configuration)
    }

    /// Fill unset fields with their default values
    ///
    /// Manual mode and the empty spec are left untouched; for the other
    /// modes the carried configuration is defaulted. Never fabricates or
    /// drops a mode, never fails, idempotent.
    pub fn set_defaults(&mut self) {
        if let Some(config) = self.mode.as_mut().and_then(DeploymentMode::configuration_mut) {
            config.set_defaults();
        }
    }

    /// Validate the service specification
    pub fn validate(&self) -> Result<(), crate::Error> {
        match &self.mode {
            Some(mode) => mode.validate(),
            None => Err(crate::Error::validation(
                "exactly one of manual, runLatest, pinned, or release must be set",
            )),
        }
    }
}

impl RunwayService {
    /// Fill unset fields of the whole document with their default values
    ///
    /// Called by the admission layer exactly once per incoming document,
    /// before validation and persistence.
    pub fn set_defaults(&mut self) {
        debug!(
            service = self.metadata.name.as_deref().unwrap_or_default(),
            "applying serving defaults"
        );
        self.spec.set_defaults();
    }

    /// Validate the whole document
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.spec.validate()
    }
}

/// Status for a RunwayService
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunwayServiceStatus {
    /// Current phase of the service lifecycle
    #[serde(default)]
    pub phase: ServicePhase,

    /// Human-readable message about current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Conditions representing the service state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    /// Most recently created revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_created_revision_name: Option<String>,

    /// Most recent revision that became ready
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_ready_revision_name: Option<String>,

    /// Domain the service is reachable under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl RunwayServiceStatus {
    /// Set the phase and return self for chaining
    pub fn phase(mut self, phase: ServicePhase) -> Self {
        self.phase = phase;
        self
    }

    /// Set the message and return self for chaining
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Set the latest ready revision and return self for chaining
    pub fn ready_revision(mut self, name: impl Into<String>) -> Self {
        self.latest_ready_revision_name = Some(name.into());
        self
    }

    /// Set the serving domain and return self for chaining
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Add a condition and return self for chaining
    pub fn condition(mut self, condition: Condition) -> Self {
        // Remove existing condition of the same type
        self.conditions.retain(|c| c.type_ != condition.type_);
        self.conditions.push(condition);
        self
    }
}
