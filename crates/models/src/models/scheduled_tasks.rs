//! Scheduled task models.
//!
//! Responsibilities:
//! - Define the create-request shapes ([`CreateScheduledTaskDetails`] and its
//!   acceleration and standard subtypes) and the [`ScheduledTask`] response.
//! - Define task kind, type, status and pause reason enums.
//!
//! Non-responsibilities:
//! - Does not submit or poll tasks (transport is out of scope).
//!
//! Invariants:
//! - `task_type` is strict on the create request and lenient on the response.

use crate::enums::{Lenient, assign_strict};
use crate::error::Result;
use crate::field::Field;
use crate::marshal::{FieldReader, FieldWriter, Model};
use crate::models::actions::AnyAction;
use crate::models::common::{
    DEFINED_TAGS, DefinedTags, FREEFORM_TAGS, FreeformTags, LifecycleState,
};
use crate::models::schedules::AnySchedule;
use crate::schema::{FieldKind, FieldSpec, Schema};
use crate::timestamp::Timestamp;

wire_enum! {
    /// Kind of create request; the discriminator of [`CreateScheduledTaskDetails`].
    pub enum TaskKind {
        Acceleration => "ACCELERATION",
        Standard => "STANDARD",
    }
}

wire_enum! {
    /// What a scheduled task does.
    pub enum TaskType {
        SavedSearch => "SAVED_SEARCH",
        Acceleration => "ACCELERATION",
        Purge => "PURGE",
        AccelerationMaintenance => "ACCELERATION_MAINTENANCE",
    }
}

wire_enum! {
    pub enum TaskStatus {
        Ready => "READY",
        Paused => "PAUSED",
        Completed => "COMPLETED",
        Blocked => "BLOCKED",
    }
}

wire_enum! {
    /// Why the service paused a task.
    pub enum PauseReason {
        MetricExtractionNotValid => "METRIC_EXTRACTION_NOT_VALID",
        SavedSearchNotValid => "SAVED_SEARCH_NOT_VALID",
        SavedSearchNotFound => "SAVED_SEARCH_NOT_FOUND",
        QueryStringNotValid => "QUERY_STRING_NOT_VALID",
        UserAction => "USER_ACTION",
        StreamNotAvailable => "STREAM_NOT_AVAILABLE",
        SlowQuery => "SLOW_QUERY",
    }
}

const KIND: FieldSpec = FieldSpec::new("kind", "kind", FieldKind::Enum("TaskKind"));
const COMPARTMENT_ID: FieldSpec = FieldSpec::new("compartment_id", "compartmentId", FieldKind::String);
const DISPLAY_NAME: FieldSpec = FieldSpec::new("display_name", "displayName", FieldKind::String);
const SCHEDULES: FieldSpec = FieldSpec::new(
    "schedules",
    "schedules",
    FieldKind::List(&FieldKind::Model("Schedule")),
);
const ACTION: FieldSpec = FieldSpec::new("action", "action", FieldKind::Model("Action"));

static CREATE_SCHEDULED_TASK_DETAILS_SCHEMA: Schema = Schema::new(
    "CreateScheduledTaskDetails",
    &[
        KIND,
        COMPARTMENT_ID,
        DISPLAY_NAME,
        FieldSpec::new("task_type", "taskType", FieldKind::Enum("TaskType")),
        SCHEDULES,
        ACTION,
        FREEFORM_TAGS,
        DEFINED_TAGS,
    ],
);

static ACCELERATION_TASK_DETAILS_SCHEMA: Schema = Schema::new(
    "AccelerationTaskDetails",
    &[
        KIND,
        COMPARTMENT_ID,
        DISPLAY_NAME,
        FieldSpec::new("task_type", "taskType", FieldKind::Enum("TaskType")),
        SCHEDULES,
        ACTION,
        FREEFORM_TAGS,
        DEFINED_TAGS,
        FieldSpec::new("saved_search_id", "savedSearchId", FieldKind::String),
    ],
);

static STANDARD_TASK_DETAILS_SCHEMA: Schema = Schema::new(
    "StandardTaskDetails",
    &[
        KIND,
        COMPARTMENT_ID,
        DISPLAY_NAME,
        FieldSpec::new("task_type", "taskType", FieldKind::Enum("TaskType")),
        SCHEDULES,
        ACTION,
        FREEFORM_TAGS,
        DEFINED_TAGS,
    ],
);

static SCHEDULED_TASK_SCHEMA: Schema = Schema::new(
    "ScheduledTask",
    &[
        KIND,
        FieldSpec::new("id", "id", FieldKind::String),
        DISPLAY_NAME,
        FieldSpec::new("task_type", "taskType", FieldKind::Enum("TaskType")),
        SCHEDULES,
        ACTION,
        FieldSpec::new("task_status", "taskStatus", FieldKind::Enum("TaskStatus")),
        FieldSpec::new("pause_reason", "pauseReason", FieldKind::Enum("PauseReason")),
        FieldSpec::new("work_request_id", "workRequestId", FieldKind::String),
        FieldSpec::new("num_occurrences", "numOccurrences", FieldKind::Integer),
        COMPARTMENT_ID,
        FieldSpec::new("time_created", "timeCreated", FieldKind::DateTime),
        FieldSpec::new("time_updated", "timeUpdated", FieldKind::DateTime),
        FieldSpec::new(
            "time_of_next_execution",
            "timeOfNextExecution",
            FieldKind::DateTime,
        ),
        FieldSpec::new(
            "lifecycle_state",
            "lifecycleState",
            FieldKind::Enum("LifecycleState"),
        ),
        FREEFORM_TAGS,
        DEFINED_TAGS,
    ],
);

/// Request body for creating a scheduled task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateScheduledTaskDetails {
    pub kind: Field<Lenient<TaskKind>>,
    pub compartment_id: Field<String>,
    pub display_name: Field<String>,
    pub task_type: Field<TaskType>,
    pub schedules: Field<Vec<AnySchedule>>,
    pub action: Field<AnyAction>,
    pub freeform_tags: Field<FreeformTags>,
    pub defined_tags: Field<DefinedTags>,
}

impl CreateScheduledTaskDetails {
    fn of_kind(kind: TaskKind) -> Self {
        Self {
            kind: Field::Value(kind.into()),
            ..Self::default()
        }
    }

    /// Assign `task_type` from its wire text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::InvalidEnumValue`] for text outside [`TaskType`];
    /// the field keeps its previous value.
    pub fn set_task_type_str(&mut self, value: &str) -> Result<()> {
        let task_type = assign_strict(Self::schema().model, "task_type", value)?;
        self.task_type.set(task_type);
        Ok(())
    }

    fn decode_inherited(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            kind: Field::Unset,
            compartment_id: reader.read("compartment_id")?,
            display_name: reader.read("display_name")?,
            task_type: reader.read("task_type")?,
            schedules: reader.read("schedules")?,
            action: reader.read("action")?,
            freeform_tags: reader.read("freeform_tags")?,
            defined_tags: reader.read("defined_tags")?,
        })
    }

    fn encode_inherited(&self, writer: &mut FieldWriter<'_>) {
        writer.put("kind", &self.kind);
        writer.put("compartment_id", &self.compartment_id);
        writer.put("display_name", &self.display_name);
        writer.put("task_type", &self.task_type);
        writer.put("schedules", &self.schedules);
        writer.put("action", &self.action);
        writer.put("freeform_tags", &self.freeform_tags);
        writer.put("defined_tags", &self.defined_tags);
    }
}

impl Model for CreateScheduledTaskDetails {
    fn schema() -> &'static Schema {
        &CREATE_SCHEDULED_TASK_DETAILS_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        let kind = reader.read("kind")?;
        Ok(Self {
            kind,
            ..Self::decode_inherited(reader)?
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        self.encode_inherited(writer);
    }
}

/// Creates a task that keeps a saved search accelerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccelerationTaskDetails {
    pub details: CreateScheduledTaskDetails,
    pub saved_search_id: Field<String>,
}

impl AccelerationTaskDetails {
    pub const KIND: TaskKind = TaskKind::Acceleration;

    pub fn new() -> Self {
        Self {
            details: CreateScheduledTaskDetails::of_kind(Self::KIND),
            saved_search_id: Field::Unset,
        }
    }
}

impl Default for AccelerationTaskDetails {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for AccelerationTaskDetails {
    fn schema() -> &'static Schema {
        &ACCELERATION_TASK_DETAILS_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        let mut details = CreateScheduledTaskDetails::decode_inherited(reader)?;
        details.kind = Field::Value(Self::KIND.into());
        Ok(Self {
            details,
            saved_search_id: reader.read("saved_search_id")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        self.details.encode_inherited(writer);
        writer.put("saved_search_id", &self.saved_search_id);
    }
}

/// Creates a standard (saved search or purge) task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardTaskDetails {
    pub details: CreateScheduledTaskDetails,
}

impl StandardTaskDetails {
    pub const KIND: TaskKind = TaskKind::Standard;

    pub fn new() -> Self {
        Self {
            details: CreateScheduledTaskDetails::of_kind(Self::KIND),
        }
    }
}

impl Default for StandardTaskDetails {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for StandardTaskDetails {
    fn schema() -> &'static Schema {
        &STANDARD_TASK_DETAILS_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        let mut details = CreateScheduledTaskDetails::decode_inherited(reader)?;
        details.kind = Field::Value(Self::KIND.into());
        Ok(Self { details })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        self.details.encode_inherited(writer);
    }
}

/// A scheduled task as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduledTask {
    pub kind: Field<Lenient<TaskKind>>,
    pub id: Field<String>,
    pub display_name: Field<String>,
    pub task_type: Field<Lenient<TaskType>>,
    pub schedules: Field<Vec<AnySchedule>>,
    pub action: Field<AnyAction>,
    pub task_status: Field<Lenient<TaskStatus>>,
    pub pause_reason: Field<Lenient<PauseReason>>,
    /// Work request of the most recent execution.
    pub work_request_id: Field<String>,
    pub num_occurrences: Field<i64>,
    pub compartment_id: Field<String>,
    pub time_created: Field<Timestamp>,
    pub time_updated: Field<Timestamp>,
    pub time_of_next_execution: Field<Timestamp>,
    pub lifecycle_state: Field<Lenient<LifecycleState>>,
    pub freeform_tags: Field<FreeformTags>,
    pub defined_tags: Field<DefinedTags>,
}

impl Model for ScheduledTask {
    fn schema() -> &'static Schema {
        &SCHEDULED_TASK_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            kind: reader.read("kind")?,
            id: reader.read("id")?,
            display_name: reader.read("display_name")?,
            task_type: reader.read("task_type")?,
            schedules: reader.read("schedules")?,
            action: reader.read("action")?,
            task_status: reader.read("task_status")?,
            pause_reason: reader.read("pause_reason")?,
            work_request_id: reader.read("work_request_id")?,
            num_occurrences: reader.read("num_occurrences")?,
            compartment_id: reader.read("compartment_id")?,
            time_created: reader.read("time_created")?,
            time_updated: reader.read("time_updated")?,
            time_of_next_execution: reader.read("time_of_next_execution")?,
            lifecycle_state: reader.read("lifecycle_state")?,
            freeform_tags: reader.read("freeform_tags")?,
            defined_tags: reader.read("defined_tags")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("kind", &self.kind);
        writer.put("id", &self.id);
        writer.put("display_name", &self.display_name);
        writer.put("task_type", &self.task_type);
        writer.put("schedules", &self.schedules);
        writer.put("action", &self.action);
        writer.put("task_status", &self.task_status);
        writer.put("pause_reason", &self.pause_reason);
        writer.put("work_request_id", &self.work_request_id);
        writer.put("num_occurrences", &self.num_occurrences);
        writer.put("compartment_id", &self.compartment_id);
        writer.put("time_created", &self.time_created);
        writer.put("time_updated", &self.time_updated);
        writer.put("time_of_next_execution", &self.time_of_next_execution);
        writer.put("lifecycle_state", &self.lifecycle_state);
        writer.put("freeform_tags", &self.freeform_tags);
        writer.put("defined_tags", &self.defined_tags);
    }
}

impl_model!(
    CreateScheduledTaskDetails,
    AccelerationTaskDetails,
    StandardTaskDetails,
    ScheduledTask,
);

polymorphic_model! {
    /// A create request of any concrete kind.
    pub enum AnyCreateScheduledTaskDetails: CreateScheduledTaskDetails, discriminator = "kind" {
        Acceleration(AccelerationTaskDetails) => "ACCELERATION",
        Standard(StandardTaskDetails) => "STANDARD",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;
    use crate::models::schedules::{FixedFrequencySchedule, ScheduleType};
    use serde_json::json;

    #[test]
    fn test_subtype_schemas_compose_the_base() {
        let base = CreateScheduledTaskDetails::schema();
        assert!(AccelerationTaskDetails::schema().extends(base, "kind"));
        assert!(StandardTaskDetails::schema().extends(base, "kind"));
        assert!(ScheduledTask::schema().validate().is_empty());
    }

    #[test]
    fn test_saved_search_id_dual_key_rejected() {
        let err = AccelerationTaskDetails::unmarshal(&json!({
            "savedSearchId": "ocid1.a",
            "saved_search_id": "ocid1.b"
        }))
        .unwrap_err();
        match err {
            ModelError::AmbiguousInput {
                model,
                wire_key,
                local_name,
                ..
            } => {
                assert_eq!(model, "AccelerationTaskDetails");
                assert_eq!(wire_key, "savedSearchId");
                assert_eq!(local_name, "saved_search_id");
            }
            other => panic!("expected AmbiguousInput, got {other:?}"),
        }
    }

    #[test]
    fn test_saved_search_id_single_spelling() {
        for key in ["savedSearchId", "saved_search_id"] {
            let details = AccelerationTaskDetails::unmarshal(&json!({ key: "ocid1.a" })).unwrap();
            assert_eq!(details.saved_search_id, Field::Value("ocid1.a".to_string()));
        }
    }

    #[test]
    fn test_strict_task_type() {
        let err = StandardTaskDetails::unmarshal(&json!({"taskType": "COMPACTION"})).unwrap_err();
        assert!(err.is_validation());

        let mut details = CreateScheduledTaskDetails::default();
        assert!(details.set_task_type_str("COMPACTION").is_err());
        assert!(details.task_type.is_unset());
        details.set_task_type_str("PURGE").unwrap();
        assert_eq!(details.task_type, Field::Value(TaskType::Purge));
    }

    #[test]
    fn test_lenient_task_type_on_response() {
        let task = ScheduledTask::unmarshal(&json!({"taskType": "COMPACTION"})).unwrap();
        assert_eq!(task.task_type, Field::Value(Lenient::Unknown));
    }

    #[test]
    fn test_polymorphic_schedules_and_action() {
        let details = AccelerationTaskDetails::unmarshal(&json!({
            "kind": "ACCELERATION",
            "schedules": [
                {"type": "FIXED_FREQUENCY", "recurringInterval": "PT5M", "repeatCount": 3},
                {"type": "CRON", "expression": "0 * * * *"}
            ],
            "action": {"type": "STREAM", "savedSearchId": "ocid1.search"}
        }))
        .unwrap();
        let schedules = details.details.schedules.value().unwrap();
        assert_eq!(schedules.len(), 2);
        match &schedules[0] {
            AnySchedule::FixedFrequency(FixedFrequencySchedule { repeat_count, .. }) => {
                assert_eq!(*repeat_count, Field::Value(3));
            }
            other => panic!("expected FixedFrequency, got {other:?}"),
        }
        assert!(matches!(
            details.details.action,
            Field::Value(AnyAction::Stream(_))
        ));
        assert_eq!(
            schedules[1].discriminator(),
            Some(ScheduleType::Cron.to_string().as_str())
        );
    }

    #[test]
    fn test_schedules_given_object_is_skipped() {
        let details = StandardTaskDetails::unmarshal(&json!({
            "schedules": {"type": "AUTO"}
        }))
        .unwrap();
        assert!(details.details.schedules.is_unset());
    }

    #[test]
    fn test_any_create_details_dispatch_on_kind() {
        let any = AnyCreateScheduledTaskDetails::unmarshal(&json!({
            "kind": "ACCELERATION",
            "savedSearchId": "ocid1.a"
        }))
        .unwrap();
        assert!(matches!(any, AnyCreateScheduledTaskDetails::Acceleration(_)));
        assert_eq!(AnyCreateScheduledTaskDetails::DISCRIMINATOR, "kind");
    }

    #[test]
    fn test_defined_tags_round_trip() {
        let input = json!({
            "kind": "STANDARD",
            "definedTags": {"Operations": {"CostCenter": 42, "Owner": "ops"}},
            "freeformTags": {"team": "logging"}
        });
        let details = StandardTaskDetails::unmarshal(&input).unwrap();
        assert_eq!(details.marshal(), input);
    }
}
