//! Schedule models for scheduled tasks.
//!
//! Responsibilities:
//! - Define the base [`Schedule`] shape and its fixed-frequency, cron and auto subtypes.
//! - Dispatch polymorphic schedule input through [`AnySchedule`].
//!
//! Non-responsibilities:
//! - Does not evaluate schedules or compute next execution times.

use crate::enums::Lenient;
use crate::error::Result;
use crate::field::Field;
use crate::marshal::{FieldReader, FieldWriter, Model};
use crate::schema::{FieldKind, FieldSpec, Schema};
use crate::timestamp::Timestamp;

wire_enum! {
    /// Kind of schedule; the discriminator of [`Schedule`] subtypes.
    pub enum ScheduleType {
        FixedFrequency => "FIXED_FREQUENCY",
        Cron => "CRON",
        Auto => "AUTO",
    }
}

wire_enum! {
    /// What to do when a scheduled execution was missed.
    pub enum MisfirePolicy {
        RetryOnce => "RETRY_ONCE",
        RetryIndefinitely => "RETRY_INDEFINITELY",
        Skip => "SKIP",
    }
}

const TYPE: FieldSpec = FieldSpec::new("type", "type", FieldKind::Enum("ScheduleType"));
const MISFIRE_POLICY: FieldSpec =
    FieldSpec::new("misfire_policy", "misfirePolicy", FieldKind::Enum("MisfirePolicy"));
const TIME_OF_FIRST_EXECUTION: FieldSpec =
    FieldSpec::new("time_of_first_execution", "timeOfFirstExecution", FieldKind::DateTime);

static SCHEDULE_SCHEMA: Schema =
    Schema::new("Schedule", &[TYPE, MISFIRE_POLICY, TIME_OF_FIRST_EXECUTION]);

static FIXED_FREQUENCY_SCHEDULE_SCHEMA: Schema = Schema::new(
    "FixedFrequencySchedule",
    &[
        TYPE,
        MISFIRE_POLICY,
        TIME_OF_FIRST_EXECUTION,
        FieldSpec::new("recurring_interval", "recurringInterval", FieldKind::String),
        FieldSpec::new("repeat_count", "repeatCount", FieldKind::Integer),
    ],
);

static CRON_SCHEDULE_SCHEMA: Schema = Schema::new(
    "CronSchedule",
    &[
        TYPE,
        MISFIRE_POLICY,
        TIME_OF_FIRST_EXECUTION,
        FieldSpec::new("expression", "expression", FieldKind::String),
        FieldSpec::new("time_zone", "timeZone", FieldKind::String),
    ],
);

static AUTO_SCHEDULE_SCHEMA: Schema =
    Schema::new("AutoSchedule", &[TYPE, MISFIRE_POLICY, TIME_OF_FIRST_EXECUTION]);

/// Base schedule shape shared by every schedule subtype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Wire key `type`.
    pub schedule_type: Field<Lenient<ScheduleType>>,
    pub misfire_policy: Field<Lenient<MisfirePolicy>>,
    /// Defaults server-side to the creation time.
    pub time_of_first_execution: Field<Timestamp>,
}

impl Schedule {
    fn of_type(schedule_type: ScheduleType) -> Self {
        Self {
            schedule_type: Field::Value(schedule_type.into()),
            ..Self::default()
        }
    }

    /// Decode every base field except the discriminator.
    fn decode_inherited(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            schedule_type: Field::Unset,
            misfire_policy: reader.read("misfire_policy")?,
            time_of_first_execution: reader.read("time_of_first_execution")?,
        })
    }

    fn encode_inherited(&self, writer: &mut FieldWriter<'_>) {
        writer.put("type", &self.schedule_type);
        writer.put("misfire_policy", &self.misfire_policy);
        writer.put("time_of_first_execution", &self.time_of_first_execution);
    }
}

impl Model for Schedule {
    fn schema() -> &'static Schema {
        &SCHEDULE_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        let schedule_type = reader.read("type")?;
        Ok(Self {
            schedule_type,
            ..Self::decode_inherited(reader)?
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        self.encode_inherited(writer);
    }
}

/// Runs at a fixed interval, optionally a bounded number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFrequencySchedule {
    pub schedule: Schedule,
    /// ISO-8601 duration, e.g. `PT1H`.
    pub recurring_interval: Field<String>,
    /// Number of executions; `-1` runs indefinitely.
    pub repeat_count: Field<i64>,
}

impl FixedFrequencySchedule {
    pub const SCHEDULE_TYPE: ScheduleType = ScheduleType::FixedFrequency;
    pub const REPEAT_INDEFINITELY: i64 = -1;

    pub fn new() -> Self {
        Self {
            schedule: Schedule::of_type(Self::SCHEDULE_TYPE),
            recurring_interval: Field::Unset,
            repeat_count: Field::Value(Self::REPEAT_INDEFINITELY),
        }
    }
}

impl Default for FixedFrequencySchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for FixedFrequencySchedule {
    fn schema() -> &'static Schema {
        &FIXED_FREQUENCY_SCHEDULE_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        let mut schedule = Schedule::decode_inherited(reader)?;
        schedule.schedule_type = Field::Value(Self::SCHEDULE_TYPE.into());
        Ok(Self {
            schedule,
            recurring_interval: reader.read("recurring_interval")?,
            repeat_count: reader.read_or("repeat_count", Self::REPEAT_INDEFINITELY)?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        self.schedule.encode_inherited(writer);
        writer.put("recurring_interval", &self.recurring_interval);
        writer.put("repeat_count", &self.repeat_count);
    }
}

/// Runs on a cron expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    pub schedule: Schedule,
    pub expression: Field<String>,
    /// IANA time zone name.
    pub time_zone: Field<String>,
}

impl CronSchedule {
    pub const SCHEDULE_TYPE: ScheduleType = ScheduleType::Cron;

    pub fn new() -> Self {
        Self {
            schedule: Schedule::of_type(Self::SCHEDULE_TYPE),
            expression: Field::Unset,
            time_zone: Field::Unset,
        }
    }
}

impl Default for CronSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for CronSchedule {
    fn schema() -> &'static Schema {
        &CRON_SCHEDULE_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        let mut schedule = Schedule::decode_inherited(reader)?;
        schedule.schedule_type = Field::Value(Self::SCHEDULE_TYPE.into());
        Ok(Self {
            schedule,
            expression: reader.read("expression")?,
            time_zone: reader.read("time_zone")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        self.schedule.encode_inherited(writer);
        writer.put("expression", &self.expression);
        writer.put("time_zone", &self.time_zone);
    }
}

/// Execution times are chosen by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSchedule {
    pub schedule: Schedule,
}

impl AutoSchedule {
    pub const SCHEDULE_TYPE: ScheduleType = ScheduleType::Auto;

    pub fn new() -> Self {
        Self {
            schedule: Schedule::of_type(Self::SCHEDULE_TYPE),
        }
    }
}

impl Default for AutoSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for AutoSchedule {
    fn schema() -> &'static Schema {
        &AUTO_SCHEDULE_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        let mut schedule = Schedule::decode_inherited(reader)?;
        schedule.schedule_type = Field::Value(Self::SCHEDULE_TYPE.into());
        Ok(Self { schedule })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        self.schedule.encode_inherited(writer);
    }
}

impl_model!(Schedule, FixedFrequencySchedule, CronSchedule, AutoSchedule);

polymorphic_model! {
    /// A schedule of any concrete type.
    pub enum AnySchedule: Schedule, discriminator = "type" {
        FixedFrequency(FixedFrequencySchedule) => "FIXED_FREQUENCY",
        Cron(CronSchedule) => "CRON",
        Auto(AutoSchedule) => "AUTO",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use serde_json::json;

    #[test]
    fn test_subtype_schemas_compose_the_base() {
        for schema in [
            FixedFrequencySchedule::schema(),
            CronSchedule::schema(),
            AutoSchedule::schema(),
        ] {
            assert!(schema.extends(Schedule::schema(), "type"), "{}", schema.model);
            assert!(schema.validate().is_empty());
        }
    }

    #[test]
    fn test_repeat_count_default() {
        let schedule = FixedFrequencySchedule::unmarshal(&json!({})).unwrap();
        assert_eq!(schedule.repeat_count, Field::Value(-1));

        let schedule = FixedFrequencySchedule::unmarshal(&json!({"repeatCount": 0})).unwrap();
        assert_eq!(schedule.repeat_count, Field::Value(0));

        let schedule = FixedFrequencySchedule::unmarshal(&json!({"repeat_count": 5})).unwrap();
        assert_eq!(schedule.repeat_count, Field::Value(5));
    }

    #[test]
    fn test_explicit_null_repeat_count_suppresses_default() {
        let schedule = FixedFrequencySchedule::unmarshal(&json!({"repeatCount": null})).unwrap();
        assert!(schedule.repeat_count.is_unset());
    }

    #[test]
    fn test_subtype_forces_discriminator() {
        let mut sink = CollectingSink::new();
        let schedule =
            CronSchedule::unmarshal_with(&json!({"type": "FIXED_FREQUENCY", "expression": "0 * * * *"}), &mut sink)
                .unwrap();
        assert_eq!(
            schedule.schedule.schedule_type,
            Field::Value(Lenient::Known(ScheduleType::Cron))
        );
        assert!(sink.is_empty());
        assert_eq!(schedule.marshal()["type"], json!("CRON"));
    }

    #[test]
    fn test_cron_round_trip() {
        let input = json!({
            "type": "CRON",
            "misfirePolicy": "SKIP",
            "timeOfFirstExecution": "2024-05-01T00:00:00.000Z",
            "expression": "0 0 * * *",
            "timeZone": "UTC"
        });
        let schedule = CronSchedule::unmarshal(&input).unwrap();
        assert_eq!(schedule.marshal(), input);
    }

    #[test]
    fn test_lenient_misfire_policy() {
        let mut sink = CollectingSink::new();
        let schedule =
            Schedule::unmarshal_with(&json!({"misfirePolicy": "RETRY_TWICE"}), &mut sink).unwrap();
        assert_eq!(schedule.misfire_policy, Field::Value(Lenient::Unknown));
        assert_eq!(sink.substitutions[0].model, "Schedule");
        assert_eq!(sink.substitutions[0].field, "misfire_policy");
        assert_eq!(
            schedule.marshal(),
            json!({"misfirePolicy": "UNKNOWN_ENUM_VALUE"})
        );
    }

    #[test]
    fn test_any_schedule_dispatch() {
        let any = AnySchedule::unmarshal(&json!({"type": "FIXED_FREQUENCY", "recurringInterval": "PT1H"}))
            .unwrap();
        match &any {
            AnySchedule::FixedFrequency(schedule) => {
                assert_eq!(schedule.recurring_interval, Field::Value("PT1H".to_string()));
            }
            other => panic!("expected FixedFrequency, got {other:?}"),
        }
        assert_eq!(any.discriminator(), Some("FIXED_FREQUENCY"));

        let any = AnySchedule::unmarshal(&json!({"type": "HOURLY"})).unwrap();
        assert!(matches!(any, AnySchedule::Base(_)));
        assert_eq!(any.discriminator(), None);
    }

    #[test]
    fn test_new_subtypes_carry_discriminator() {
        assert_eq!(AutoSchedule::new().marshal(), json!({"type": "AUTO"}));
        assert_eq!(
            FixedFrequencySchedule::default().marshal(),
            json!({"type": "FIXED_FREQUENCY", "repeatCount": -1})
        );
    }
}
