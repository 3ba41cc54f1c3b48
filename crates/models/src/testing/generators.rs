//! Test data generators using the fake crate.
//!
//! Produces realistic wire payloads (camelCase JSON) for schedules, scheduled
//! task requests and ingest-time rules. Every payload uses wire keys only and
//! canonical timestamps, so decoding then re-encoding it reproduces it exactly.

use chrono::{SecondsFormat, Utc};
use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::chrono::en::DateTime;
use fake::faker::lorem::en::{Sentence, Word};
use serde_json::{Map, Value, json};

use crate::enums::WireEnum;
use crate::models::{
    ConditionOperator, MisfirePolicy, PauseReason, StorageDataType, TaskStatus, TaskType,
};

/// How often optional fields are left out of generated payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Omission {
    /// Every optional field present
    None,
    /// 20% chance per field
    Sparse,
    /// Custom percentage (0-100)
    Percent(u8),
}

impl Omission {
    fn should_omit(&self) -> bool {
        let ratio = match self {
            Omission::None => 0,
            Omission::Sparse => 20,
            Omission::Percent(p) => (*p).min(100),
        };
        Boolean(ratio).fake()
    }
}

fn pick<E: WireEnum>() -> &'static str {
    let index: usize = (0..E::VARIANTS.len()).fake();
    E::VARIANTS[index].as_wire_str()
}

fn ocid(resource: &str) -> String {
    let suffix: String = Word().fake();
    let serial: u32 = (1000..99999).fake();
    format!("ocid1.{resource}.oc1..{suffix}{serial}")
}

fn timestamp() -> String {
    let dt: chrono::DateTime<Utc> = DateTime().fake();
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn insert_optional(object: &mut Map<String, Value>, omission: Omission, key: &str, value: Value) {
    if !omission.should_omit() {
        object.insert(key.to_string(), value);
    }
}

// =============================================================================
// Schedule Generator
// =============================================================================

/// Generates wire payloads for schedules of every concrete type.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    omission: Omission,
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self {
            omission: Omission::None,
        }
    }
}

impl ScheduleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_omission(mut self, omission: Omission) -> Self {
        self.omission = omission;
        self
    }

    /// Generate one schedule with a randomly chosen type.
    pub fn generate(&self) -> Value {
        match (0..3).fake::<u8>() {
            0 => self.fixed_frequency(),
            1 => self.cron(),
            _ => self.auto(),
        }
    }

    pub fn fixed_frequency(&self) -> Value {
        let mut object = self.base("FIXED_FREQUENCY");
        let minutes: u32 = (1..120).fake();
        insert_optional(
            &mut object,
            self.omission,
            "recurringInterval",
            json!(format!("PT{minutes}M")),
        );
        // Always present so the decoded value never falls back to the default.
        let repeat_count: i64 = (-1..50).fake();
        object.insert("repeatCount".to_string(), json!(repeat_count));
        Value::Object(object)
    }

    pub fn cron(&self) -> Value {
        let mut object = self.base("CRON");
        let minute: u8 = (0..60).fake();
        insert_optional(
            &mut object,
            self.omission,
            "expression",
            json!(format!("{minute} * * * *")),
        );
        insert_optional(&mut object, self.omission, "timeZone", json!("UTC"));
        Value::Object(object)
    }

    pub fn auto(&self) -> Value {
        Value::Object(self.base("AUTO"))
    }

    fn base(&self, schedule_type: &str) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("type".to_string(), json!(schedule_type));
        insert_optional(
            &mut object,
            self.omission,
            "misfirePolicy",
            json!(pick::<MisfirePolicy>()),
        );
        insert_optional(
            &mut object,
            self.omission,
            "timeOfFirstExecution",
            json!(timestamp()),
        );
        object
    }
}

// =============================================================================
// Scheduled Task Generator
// =============================================================================

/// Generates wire payloads for scheduled task create requests and responses.
///
/// # Example
/// ```ignore
/// use loganalytics_models::testing::generators::{Omission, ScheduledTaskGenerator};
///
/// let payload = ScheduledTaskGenerator::new()
///     .with_schedule_count(2)
///     .with_omission(Omission::Sparse)
///     .generate();
/// ```
#[derive(Debug, Clone)]
pub struct ScheduledTaskGenerator {
    schedule_count: usize,
    omission: Omission,
    with_tags: bool,
}

impl Default for ScheduledTaskGenerator {
    fn default() -> Self {
        Self {
            schedule_count: 1,
            omission: Omission::None,
            with_tags: true,
        }
    }
}

impl ScheduledTaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule_count(mut self, count: usize) -> Self {
        self.schedule_count = count;
        self
    }

    pub fn with_omission(mut self, omission: Omission) -> Self {
        self.omission = omission;
        self
    }

    pub fn with_tags(mut self, include: bool) -> Self {
        self.with_tags = include;
        self
    }

    /// Generate a create request of a randomly chosen kind.
    pub fn generate(&self) -> Value {
        if Boolean(50).fake() {
            self.acceleration()
        } else {
            self.standard()
        }
    }

    pub fn acceleration(&self) -> Value {
        let mut object = self.details("ACCELERATION");
        insert_optional(
            &mut object,
            self.omission,
            "savedSearchId",
            json!(ocid("managementsavedsearch")),
        );
        Value::Object(object)
    }

    pub fn standard(&self) -> Value {
        Value::Object(self.details("STANDARD"))
    }

    /// Generate a scheduled task response.
    pub fn response(&self) -> Value {
        let mut object = Map::new();
        object.insert("kind".to_string(), json!("STANDARD"));
        object.insert("id".to_string(), json!(ocid("loganalyticsscheduledtask")));
        let name: String = Sentence(2..4).fake();
        insert_optional(&mut object, self.omission, "displayName", json!(name));
        insert_optional(&mut object, self.omission, "taskType", json!(pick::<TaskType>()));
        object.insert("schedules".to_string(), self.schedules());
        object.insert("action".to_string(), self.action());
        insert_optional(&mut object, self.omission, "taskStatus", json!(pick::<TaskStatus>()));
        insert_optional(&mut object, self.omission, "pauseReason", json!(pick::<PauseReason>()));
        let occurrences: i64 = (0..500).fake();
        insert_optional(&mut object, self.omission, "numOccurrences", json!(occurrences));
        object.insert("compartmentId".to_string(), json!(ocid("compartment")));
        insert_optional(&mut object, self.omission, "timeCreated", json!(timestamp()));
        insert_optional(&mut object, self.omission, "lifecycleState", json!("ACTIVE"));
        if self.with_tags {
            self.insert_tags(&mut object);
        }
        Value::Object(object)
    }

    fn details(&self, kind: &str) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("kind".to_string(), json!(kind));
        object.insert("compartmentId".to_string(), json!(ocid("compartment")));
        let name: String = Sentence(2..4).fake();
        insert_optional(&mut object, self.omission, "displayName", json!(name));
        insert_optional(&mut object, self.omission, "taskType", json!(pick::<TaskType>()));
        object.insert("schedules".to_string(), self.schedules());
        object.insert("action".to_string(), self.action());
        if self.with_tags {
            self.insert_tags(&mut object);
        }
        object
    }

    fn schedules(&self) -> Value {
        let generator = ScheduleGenerator::new().with_omission(self.omission);
        Value::Array((0..self.schedule_count).map(|_| generator.generate()).collect())
    }

    fn action(&self) -> Value {
        if Boolean(50).fake() {
            let mut object = Map::new();
            object.insert("type".to_string(), json!("STREAM"));
            insert_optional(
                &mut object,
                self.omission,
                "savedSearchId",
                json!(ocid("managementsavedsearch")),
            );
            insert_optional(&mut object, self.omission, "savedSearchDuration", json!("PT1H"));
            let metric: String = Word().fake();
            insert_optional(
                &mut object,
                self.omission,
                "metricExtraction",
                json!({
                    "compartmentId": ocid("compartment"),
                    "namespace": "log_metrics",
                    "metricName": metric
                }),
            );
            Value::Object(object)
        } else {
            let mut object = Map::new();
            object.insert("type".to_string(), json!("PURGE"));
            insert_optional(&mut object, self.omission, "queryString", json!("*"));
            insert_optional(
                &mut object,
                self.omission,
                "dataType",
                json!(pick::<StorageDataType>()),
            );
            let days: u16 = (1..365).fake();
            insert_optional(&mut object, self.omission, "purgeDuration", json!(format!("-P{days}D")));
            insert_optional(
                &mut object,
                self.omission,
                "compartmentIdInSubtree",
                json!(Boolean(50).fake::<bool>()),
            );
            Value::Object(object)
        }
    }

    fn insert_tags(&self, object: &mut Map<String, Value>) {
        let team: String = Word().fake();
        let cost_center: u32 = (100..999).fake();
        object.insert("freeformTags".to_string(), json!({ "team": team }));
        object.insert(
            "definedTags".to_string(),
            json!({ "Operations": { "CostCenter": cost_center.to_string(), "Tier": cost_center % 3 } }),
        );
    }
}

// =============================================================================
// Ingest-Time Rule Generator
// =============================================================================

/// Generates wire payloads for ingest-time rules.
#[derive(Debug, Clone)]
pub struct IngestTimeRuleGenerator {
    additional_condition_count: usize,
    action_count: usize,
    omission: Omission,
}

impl Default for IngestTimeRuleGenerator {
    fn default() -> Self {
        Self {
            additional_condition_count: 2,
            action_count: 1,
            omission: Omission::None,
        }
    }
}

impl IngestTimeRuleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_additional_condition_count(mut self, count: usize) -> Self {
        self.additional_condition_count = count;
        self
    }

    pub fn with_action_count(mut self, count: usize) -> Self {
        self.action_count = count;
        self
    }

    pub fn with_omission(mut self, omission: Omission) -> Self {
        self.omission = omission;
        self
    }

    pub fn generate(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), json!(ocid("loganalyticsingesttimerule")));
        object.insert("compartmentId".to_string(), json!(ocid("compartment")));
        let name: String = Sentence(2..4).fake();
        insert_optional(&mut object, self.omission, "displayName", json!(name));
        let description: String = Sentence(4..10).fake();
        insert_optional(&mut object, self.omission, "description", json!(description));
        insert_optional(&mut object, self.omission, "lifecycleState", json!("ACTIVE"));
        insert_optional(&mut object, self.omission, "timeCreated", json!(timestamp()));
        insert_optional(
            &mut object,
            self.omission,
            "isEnabled",
            json!(Boolean(80).fake::<bool>()),
        );
        object.insert("conditions".to_string(), self.condition());
        let actions: Vec<Value> = (0..self.action_count).map(|_| self.action()).collect();
        object.insert("actions".to_string(), Value::Array(actions));
        Value::Object(object)
    }

    fn condition(&self) -> Value {
        let field_value: String = Word().fake();
        let additional: Vec<Value> = (0..self.additional_condition_count)
            .map(|_| {
                let value: String = Word().fake();
                json!({
                    "conditionField": "Severity",
                    "conditionOperator": pick::<ConditionOperator>(),
                    "conditionValue": value
                })
            })
            .collect();
        json!({
            "kind": "FIELD",
            "fieldName": "Log Source",
            "fieldOperator": "EQUAL",
            "fieldValue": field_value,
            "additionalConditions": additional
        })
    }

    fn action(&self) -> Value {
        let metric: String = Word().fake();
        let mut object = Map::new();
        object.insert("type".to_string(), json!("METRIC_EXTRACTION"));
        object.insert("compartmentId".to_string(), json!(ocid("compartment")));
        object.insert("namespace".to_string(), json!("ingest_metrics"));
        object.insert("metricName".to_string(), json!(metric));
        insert_optional(&mut object, self.omission, "dimensions", json!(["Host", "Severity"]));
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_generator_sets_discriminator() {
        let generator = ScheduleGenerator::new();
        for _ in 0..20 {
            let schedule = generator.generate();
            let schedule_type = schedule["type"].as_str().unwrap();
            assert!(["FIXED_FREQUENCY", "CRON", "AUTO"].contains(&schedule_type));
        }
    }

    #[test]
    fn test_scheduled_task_generator_schedule_count() {
        let payload = ScheduledTaskGenerator::new().with_schedule_count(4).generate();
        assert_eq!(payload["schedules"].as_array().unwrap().len(), 4);
        assert!(payload["freeformTags"].is_object());
    }

    #[test]
    fn test_full_omission_keeps_required_shape() {
        let payload = ScheduledTaskGenerator::new()
            .with_omission(Omission::Percent(100))
            .with_tags(false)
            .acceleration();
        let object = payload.as_object().unwrap();
        assert!(object.contains_key("kind"));
        assert!(object.contains_key("compartmentId"));
        assert!(!object.contains_key("savedSearchId"));
        assert!(!object.contains_key("definedTags"));
    }

    #[test]
    fn test_ingest_time_rule_generator_counts() {
        let payload = IngestTimeRuleGenerator::new()
            .with_additional_condition_count(3)
            .with_action_count(2)
            .generate();
        assert_eq!(
            payload["conditions"]["additionalConditions"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
        assert_eq!(payload["actions"].as_array().unwrap().len(), 2);
    }
}
