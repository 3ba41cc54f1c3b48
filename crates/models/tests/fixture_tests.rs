//! Fixture-driven decoding tests.
//!
//! Each test loads a captured payload from `fixtures/` and checks the typed view
//! that decoding produces: concrete subtype selection, nested models, lenient
//! substitutions and strict rejections.

mod common;

use common::load_fixture;
use loganalytics_models::{
    AnyAction, AnyCreateScheduledTaskDetails, AnyIngestTimeRuleAction, AnyIngestTimeRuleCondition,
    AnySchedule, CloudType, CollectingSink, ConditionOperator, EntityEligibilityStatus, Field,
    IngestTimeRule, IngestTimeRuleAdditionalFieldCondition, Lenient, LifecycleState,
    LogAnalyticsEntityType, MisfirePolicy, Model, ModelError, OutOfBoxEntityTypeDetails,
    PauseReason, ScheduleType, ScheduledTask, StorageDataType, TaskStatus, TaskType,
    UNKNOWN_ENUM_VALUE,
};
use serde_json::json;

// =============================================================================
// Scheduled tasks
// =============================================================================

#[test]
fn test_acceleration_task_selects_subtype() {
    let input = load_fixture("scheduled_tasks/acceleration_task.json");
    let task = AnyCreateScheduledTaskDetails::unmarshal(&input).unwrap();

    let AnyCreateScheduledTaskDetails::Acceleration(details) = &task else {
        panic!("expected Acceleration, got {task:?}");
    };
    assert_eq!(task.discriminator(), Some("ACCELERATION"));
    assert_eq!(details.details.task_type, Field::Value(TaskType::Acceleration));
    assert_eq!(
        details.saved_search_id.value().map(String::as_str),
        Some("ocid1.managementsavedsearch.oc1..aaaaexample")
    );

    let schedules = details.details.schedules.value().unwrap();
    assert_eq!(schedules.len(), 1);
    let AnySchedule::Auto(auto) = &schedules[0] else {
        panic!("expected Auto schedule, got {:?}", schedules[0]);
    };
    assert_eq!(
        auto.schedule.misfire_policy,
        Field::Value(Lenient::Known(MisfirePolicy::RetryIndefinitely))
    );

    let Some(AnyAction::Stream(stream)) = details.details.action.value() else {
        panic!("expected a stream action");
    };
    let metric = stream.metric_extraction.value().unwrap();
    assert_eq!(metric.metric_name, Field::Value("error_count".to_string()));

    let tags = details.details.defined_tags.value().unwrap();
    assert_eq!(tags["Operations"]["CostCenter"], json!("42"));

    assert_eq!(task.marshal(), input);
}

#[test]
fn test_purge_task_decodes_purge_action() {
    let input = load_fixture("scheduled_tasks/purge_task.json");
    let task = AnyCreateScheduledTaskDetails::unmarshal(&input).unwrap();

    let AnyCreateScheduledTaskDetails::Standard(details) = &task else {
        panic!("expected Standard, got {task:?}");
    };
    let Some(AnyAction::Purge(purge)) = details.details.action.value() else {
        panic!("expected a purge action");
    };
    assert_eq!(purge.data_type, Field::Value(Lenient::Known(StorageDataType::Log)));
    assert_eq!(purge.compartment_id_in_subtree, Field::Value(false));

    let schedules = details.details.schedules.value().unwrap();
    let AnySchedule::FixedFrequency(fixed) = &schedules[0] else {
        panic!("expected FixedFrequency schedule");
    };
    assert_eq!(fixed.repeat_count, Field::Value(-1));
    assert!(fixed.schedule.misfire_policy.is_unset());
}

#[test]
fn test_scheduled_task_response_lenient_fields() {
    let input = load_fixture("scheduled_tasks/scheduled_task_response.json");
    let task = ScheduledTask::unmarshal(&input).unwrap();

    assert_eq!(task.task_type, Field::Value(Lenient::Known(TaskType::Purge)));
    assert_eq!(task.task_status, Field::Value(Lenient::Known(TaskStatus::Paused)));
    assert_eq!(
        task.pause_reason,
        Field::Value(Lenient::Known(PauseReason::SavedSearchNotFound))
    );
    assert_eq!(
        task.lifecycle_state,
        Field::Value(Lenient::Known(LifecycleState::Active))
    );
    assert_eq!(task.num_occurrences, Field::Value(12));
    assert_eq!(task.freeform_tags, Field::Value(Default::default()));

    let schedules = task.schedules.value().unwrap();
    let AnySchedule::Cron(cron) = &schedules[0] else {
        panic!("expected Cron schedule");
    };
    assert_eq!(cron.expression, Field::Value("0 0 3 * * ?".to_string()));
    assert_eq!(
        cron.schedule.schedule_type,
        Field::Value(Lenient::Known(ScheduleType::Cron))
    );
}

#[test]
fn test_scheduled_task_response_tolerates_new_status() {
    let mut input = load_fixture("scheduled_tasks/scheduled_task_response.json");
    input["taskStatus"] = json!("ARCHIVED");

    let mut sink = CollectingSink::new();
    let task = ScheduledTask::unmarshal_with(&input, &mut sink).unwrap();

    assert_eq!(task.task_status, Field::Value(Lenient::Unknown));
    assert_eq!(task.marshal()["taskStatus"], json!(UNKNOWN_ENUM_VALUE));
    assert_eq!(sink.substitutions.len(), 1);
    assert_eq!(sink.substitutions[0].field, "task_status");
    assert_eq!(sink.substitutions[0].received, "ARCHIVED");
}

// =============================================================================
// Ingest-time rules
// =============================================================================

#[test]
fn test_metric_rule_nested_structure() {
    let input = load_fixture("ingest_time_rules/metric_rule.json");
    let rule = IngestTimeRule::unmarshal(&input).unwrap();

    assert_eq!(rule.is_enabled, Field::Value(true));
    let Some(AnyIngestTimeRuleCondition::Field(condition)) = rule.conditions.value() else {
        panic!("expected a field condition");
    };
    let additional = condition.additional_conditions.value().unwrap();
    assert_eq!(additional.len(), 2);
    assert_eq!(
        additional[0].condition_operator,
        Field::Value(Lenient::Known(ConditionOperator::ContainsIgnoreCase))
    );
    assert_eq!(
        additional[1].condition_operator,
        Field::Value(Lenient::Known(ConditionOperator::NotIn))
    );

    let actions = rule.actions.value().unwrap();
    let AnyIngestTimeRuleAction::MetricExtraction(action) = &actions[0] else {
        panic!("expected a metric extraction action");
    };
    assert_eq!(
        action.dimensions,
        Field::Value(vec!["Host Name (Server)".to_string(), "User".to_string()])
    );
}

#[test]
fn test_unknown_operator_maps_to_sentinel() {
    let input = load_fixture("ingest_time_rules/unknown_operator.json");
    let mut sink = CollectingSink::new();
    let condition =
        IngestTimeRuleAdditionalFieldCondition::unmarshal_with(&input, &mut sink).unwrap();

    assert_eq!(condition.condition_operator, Field::Value(Lenient::Unknown));
    assert_eq!(
        condition.marshal(),
        json!({
            "conditionField": "Severity",
            "conditionOperator": "UNKNOWN_ENUM_VALUE",
            "conditionValue": "^(error|fatal)$"
        })
    );

    let substitution = &sink.substitutions[0];
    assert_eq!(substitution.model, "IngestTimeRuleAdditionalFieldCondition");
    assert_eq!(substitution.field, "condition_operator");
    assert_eq!(substitution.enum_name, "ConditionOperator");
    assert_eq!(substitution.received, "MATCHES_REGEX");
}

// =============================================================================
// Entity types
// =============================================================================

#[test]
fn test_out_of_box_entity_type_strict_cloud_type() {
    let input = load_fixture("entity_types/out_of_box_entity_type.json");
    let details = OutOfBoxEntityTypeDetails::unmarshal(&input).unwrap();
    assert!(matches!(details.cloud_type, Field::Value(CloudType::Cloud | CloudType::NonCloud)));

    let response = load_fixture("entity_types/entity_type_response.json");
    let err = OutOfBoxEntityTypeDetails::unmarshal(&response).unwrap_err();
    match err {
        ModelError::InvalidEnumValue {
            model,
            field,
            value,
            allowed,
        } => {
            assert_eq!(model, "OutOfBoxEntityTypeDetails");
            assert_eq!(field, "cloud_type");
            assert_eq!(value, "HYBRID");
            assert_eq!(allowed, vec!["CLOUD", "NON_CLOUD"]);
        }
        other => panic!("expected InvalidEnumValue, got {other:?}"),
    }
}

#[test]
fn test_entity_type_response_lenient_cloud_type() {
    let input = load_fixture("entity_types/entity_type_response.json");
    let mut sink = CollectingSink::new();
    let entity = LogAnalyticsEntityType::unmarshal_with(&input, &mut sink).unwrap();

    assert_eq!(entity.cloud_type, Field::Value(Lenient::Unknown));
    assert_eq!(
        entity.management_agent_eligibility_status,
        Field::Value(Lenient::Known(EntityEligibilityStatus::Eligible))
    );
    assert_eq!(entity.properties, Field::Value(Vec::new()));
    assert_eq!(sink.substitutions.len(), 1);
    assert_eq!(sink.substitutions[0].enum_name, "CloudType");
}
