//! Custom Resource Definitions for Runway
//!
//! This module contains the RunwayService CRD and its supporting types.

mod service;
mod types;

pub use service::{
    DeploymentMode, ManualSpec, PinnedSpec, ReleaseSpec, RunLatestSpec, RunwayService,
    RunwayServiceSpec, RunwayServiceStatus,
};
pub use types::{
    Condition, ConditionStatus, ConfigurationSpec, RevisionSpec, RevisionTemplateSpec,
    ServicePhase,
};
