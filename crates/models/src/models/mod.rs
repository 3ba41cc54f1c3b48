//! Data models for Log Analytics API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod actions;
pub mod common;
pub mod entity_types;
pub mod ingest_time_rules;
pub mod scheduled_tasks;
pub mod schedules;

pub use actions::{
    Action, ActionType, AnyAction, MetricExtraction, PurgeAction, StorageDataType, StreamAction,
};
pub use common::{DefinedTags, FreeformTags, LifecycleState};
pub use entity_types::{
    CloudType, EntityEligibilityStatus, EntityTypeProperty, LogAnalyticsEntityType,
    OutOfBoxEntityTypeDetails,
};
pub use ingest_time_rules::{
    AnyIngestTimeRuleAction, AnyIngestTimeRuleCondition, ConditionKind, ConditionOperator,
    FieldOperator, IngestTimeRule, IngestTimeRuleAction, IngestTimeRuleActionType,
    IngestTimeRuleAdditionalFieldCondition, IngestTimeRuleCondition, IngestTimeRuleFieldCondition,
    IngestTimeRuleMetricExtractionAction,
};
pub use scheduled_tasks::{
    AccelerationTaskDetails, AnyCreateScheduledTaskDetails, CreateScheduledTaskDetails,
    PauseReason, ScheduledTask, StandardTaskDetails, TaskKind, TaskStatus, TaskType,
};
pub use schedules::{
    AnySchedule, AutoSchedule, CronSchedule, FixedFrequencySchedule, MisfirePolicy, Schedule,
    ScheduleType,
};
