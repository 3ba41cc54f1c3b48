//! Ingest-time rule models.
//!
//! Responsibilities:
//! - Define [`IngestTimeRule`] with its condition and action hierarchies.
//! - Define the condition operator vocabulary.
//!
//! Non-responsibilities:
//! - Does not evaluate conditions against log records.

use crate::CodecConfig;
use crate::diagnostics::DiagnosticSink;
use crate::enums::{Lenient, assign_lenient_with};
use crate::error::Result;
use crate::field::Field;
use crate::marshal::{FieldReader, FieldWriter, Model};
use crate::models::common::{
    DEFINED_TAGS, DefinedTags, FREEFORM_TAGS, FreeformTags, LifecycleState,
};
use crate::schema::{FieldKind, FieldSpec, Schema};
use crate::timestamp::Timestamp;

wire_enum! {
    /// Comparison applied by an additional field condition.
    pub enum ConditionOperator {
        Contains => "CONTAINS",
        ContainsIgnoreCase => "CONTAINS_IGNORE_CASE",
        EndsWith => "ENDS_WITH",
        EndsWithIgnoreCase => "ENDS_WITH_IGNORE_CASE",
        Equal => "EQUAL",
        EqualIgnoreCase => "EQUAL_IGNORE_CASE",
        GreaterThan => "GREATER_THAN",
        GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
        In => "IN",
        InIgnoreCase => "IN_IGNORE_CASE",
        LessThan => "LESS_THAN",
        LessThanOrEqual => "LESS_THAN_OR_EQUAL",
        NotContains => "NOT_CONTAINS",
        NotContainsIgnoreCase => "NOT_CONTAINS_IGNORE_CASE",
        NotEqual => "NOT_EQUAL",
        NotEqualIgnoreCase => "NOT_EQUAL_IGNORE_CASE",
        NotIn => "NOT_IN",
        NotInIgnoreCase => "NOT_IN_IGNORE_CASE",
        StartsWith => "STARTS_WITH",
        StartsWithIgnoreCase => "STARTS_WITH_IGNORE_CASE",
    }
}

wire_enum! {
    /// Comparison applied by a primary field condition.
    pub enum FieldOperator {
        Equal => "EQUAL",
    }
}

wire_enum! {
    pub enum ConditionKind {
        Field => "FIELD",
    }
}

wire_enum! {
    pub enum IngestTimeRuleActionType {
        MetricExtraction => "METRIC_EXTRACTION",
    }
}

static ADDITIONAL_FIELD_CONDITION_SCHEMA: Schema = Schema::new(
    "IngestTimeRuleAdditionalFieldCondition",
    &[
        FieldSpec::new("condition_field", "conditionField", FieldKind::String),
        FieldSpec::new(
            "condition_operator",
            "conditionOperator",
            FieldKind::Enum("ConditionOperator"),
        ),
        FieldSpec::new("condition_value", "conditionValue", FieldKind::String),
    ],
);

const KIND: FieldSpec = FieldSpec::new("kind", "kind", FieldKind::Enum("ConditionKind"));

static CONDITION_SCHEMA: Schema = Schema::new("IngestTimeRuleCondition", &[KIND]);

static FIELD_CONDITION_SCHEMA: Schema = Schema::new(
    "IngestTimeRuleFieldCondition",
    &[
        KIND,
        FieldSpec::new("field_name", "fieldName", FieldKind::String),
        FieldSpec::new(
            "field_operator",
            "fieldOperator",
            FieldKind::Enum("FieldOperator"),
        ),
        FieldSpec::new("field_value", "fieldValue", FieldKind::String),
        FieldSpec::new(
            "additional_conditions",
            "additionalConditions",
            FieldKind::List(&FieldKind::Model("IngestTimeRuleAdditionalFieldCondition")),
        ),
    ],
);

const TYPE: FieldSpec = FieldSpec::new(
    "type",
    "type",
    FieldKind::Enum("IngestTimeRuleActionType"),
);

static ACTION_SCHEMA: Schema = Schema::new("IngestTimeRuleAction", &[TYPE]);

static METRIC_EXTRACTION_ACTION_SCHEMA: Schema = Schema::new(
    "IngestTimeRuleMetricExtractionAction",
    &[
        TYPE,
        FieldSpec::new("compartment_id", "compartmentId", FieldKind::String),
        FieldSpec::new("namespace", "namespace", FieldKind::String),
        FieldSpec::new("metric_name", "metricName", FieldKind::String),
        FieldSpec::new("resource_group", "resourceGroup", FieldKind::String),
        FieldSpec::new("dimensions", "dimensions", FieldKind::List(&FieldKind::String)),
    ],
);

static INGEST_TIME_RULE_SCHEMA: Schema = Schema::new(
    "IngestTimeRule",
    &[
        FieldSpec::new("id", "id", FieldKind::String),
        FieldSpec::new("compartment_id", "compartmentId", FieldKind::String),
        FieldSpec::new("display_name", "displayName", FieldKind::String),
        FieldSpec::new("description", "description", FieldKind::String),
        FieldSpec::new(
            "lifecycle_state",
            "lifecycleState",
            FieldKind::Enum("LifecycleState"),
        ),
        FieldSpec::new("time_created", "timeCreated", FieldKind::DateTime),
        FieldSpec::new("time_updated", "timeUpdated", FieldKind::DateTime),
        FieldSpec::new("is_enabled", "isEnabled", FieldKind::Boolean),
        FieldSpec::new(
            "conditions",
            "conditions",
            FieldKind::Model("IngestTimeRuleCondition"),
        ),
        FieldSpec::new(
            "actions",
            "actions",
            FieldKind::List(&FieldKind::Model("IngestTimeRuleAction")),
        ),
        FREEFORM_TAGS,
        DEFINED_TAGS,
    ],
);

/// One extra comparison that must hold alongside the primary field condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestTimeRuleAdditionalFieldCondition {
    pub condition_field: Field<String>,
    pub condition_operator: Field<Lenient<ConditionOperator>>,
    pub condition_value: Field<String>,
}

impl IngestTimeRuleAdditionalFieldCondition {
    /// Assign `condition_operator` from its wire text.
    ///
    /// Unrecognized text becomes the sentinel and is reported to `sink`, or
    /// logged through `tracing` when no sink is given.
    pub fn set_condition_operator_str(
        &mut self,
        value: &str,
        sink: Option<&mut dyn DiagnosticSink>,
    ) {
        self.set_condition_operator_str_with(value, &CodecConfig::default(), sink);
    }

    /// Like [`Self::set_condition_operator_str`], but a missing sink only
    /// logs when `config.log_enum_substitutions` is set.
    pub fn set_condition_operator_str_with(
        &mut self,
        value: &str,
        config: &CodecConfig,
        sink: Option<&mut dyn DiagnosticSink>,
    ) {
        let operator =
            assign_lenient_with(Self::schema().model, "condition_operator", value, config, sink);
        self.condition_operator.set(operator);
    }
}

impl Model for IngestTimeRuleAdditionalFieldCondition {
    fn schema() -> &'static Schema {
        &ADDITIONAL_FIELD_CONDITION_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            condition_field: reader.read("condition_field")?,
            condition_operator: reader.read("condition_operator")?,
            condition_value: reader.read("condition_value")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("condition_field", &self.condition_field);
        writer.put("condition_operator", &self.condition_operator);
        writer.put("condition_value", &self.condition_value);
    }
}

/// Base condition shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestTimeRuleCondition {
    pub kind: Field<Lenient<ConditionKind>>,
}

impl Model for IngestTimeRuleCondition {
    fn schema() -> &'static Schema {
        &CONDITION_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            kind: reader.read("kind")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("kind", &self.kind);
    }
}

/// Matches records whose field equals a value, plus any additional conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestTimeRuleFieldCondition {
    pub condition: IngestTimeRuleCondition,
    pub field_name: Field<String>,
    pub field_operator: Field<Lenient<FieldOperator>>,
    pub field_value: Field<String>,
    pub additional_conditions: Field<Vec<IngestTimeRuleAdditionalFieldCondition>>,
}

impl IngestTimeRuleFieldCondition {
    pub const KIND: ConditionKind = ConditionKind::Field;

    pub fn new() -> Self {
        Self {
            condition: IngestTimeRuleCondition {
                kind: Field::Value(Self::KIND.into()),
            },
            field_name: Field::Unset,
            field_operator: Field::Unset,
            field_value: Field::Unset,
            additional_conditions: Field::Unset,
        }
    }
}

impl Default for IngestTimeRuleFieldCondition {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for IngestTimeRuleFieldCondition {
    fn schema() -> &'static Schema {
        &FIELD_CONDITION_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            field_name: reader.read("field_name")?,
            field_operator: reader.read("field_operator")?,
            field_value: reader.read("field_value")?,
            additional_conditions: reader.read("additional_conditions")?,
            ..Self::new()
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("kind", &self.condition.kind);
        writer.put("field_name", &self.field_name);
        writer.put("field_operator", &self.field_operator);
        writer.put("field_value", &self.field_value);
        writer.put("additional_conditions", &self.additional_conditions);
    }
}

/// Base ingest-time action shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestTimeRuleAction {
    /// Wire key `type`.
    pub action_type: Field<Lenient<IngestTimeRuleActionType>>,
}

impl Model for IngestTimeRuleAction {
    fn schema() -> &'static Schema {
        &ACTION_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            action_type: reader.read("type")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("type", &self.action_type);
    }
}

/// Emits a metric for every matching record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestTimeRuleMetricExtractionAction {
    pub action: IngestTimeRuleAction,
    pub compartment_id: Field<String>,
    pub namespace: Field<String>,
    pub metric_name: Field<String>,
    pub resource_group: Field<String>,
    /// Record fields copied onto the metric as dimensions.
    pub dimensions: Field<Vec<String>>,
}

impl IngestTimeRuleMetricExtractionAction {
    pub const ACTION_TYPE: IngestTimeRuleActionType = IngestTimeRuleActionType::MetricExtraction;

    pub fn new() -> Self {
        Self {
            action: IngestTimeRuleAction {
                action_type: Field::Value(Self::ACTION_TYPE.into()),
            },
            compartment_id: Field::Unset,
            namespace: Field::Unset,
            metric_name: Field::Unset,
            resource_group: Field::Unset,
            dimensions: Field::Unset,
        }
    }
}

impl Default for IngestTimeRuleMetricExtractionAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for IngestTimeRuleMetricExtractionAction {
    fn schema() -> &'static Schema {
        &METRIC_EXTRACTION_ACTION_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            compartment_id: reader.read("compartment_id")?,
            namespace: reader.read("namespace")?,
            metric_name: reader.read("metric_name")?,
            resource_group: reader.read("resource_group")?,
            dimensions: reader.read("dimensions")?,
            ..Self::new()
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("type", &self.action.action_type);
        writer.put("compartment_id", &self.compartment_id);
        writer.put("namespace", &self.namespace);
        writer.put("metric_name", &self.metric_name);
        writer.put("resource_group", &self.resource_group);
        writer.put("dimensions", &self.dimensions);
    }
}

impl_model!(
    IngestTimeRuleAdditionalFieldCondition,
    IngestTimeRuleCondition,
    IngestTimeRuleFieldCondition,
    IngestTimeRuleAction,
    IngestTimeRuleMetricExtractionAction,
);

polymorphic_model! {
    /// A condition of any concrete kind.
    pub enum AnyIngestTimeRuleCondition: IngestTimeRuleCondition, discriminator = "kind" {
        Field(IngestTimeRuleFieldCondition) => "FIELD",
    }
}

polymorphic_model! {
    /// An ingest-time action of any concrete type.
    pub enum AnyIngestTimeRuleAction: IngestTimeRuleAction, discriminator = "type" {
        MetricExtraction(IngestTimeRuleMetricExtractionAction) => "METRIC_EXTRACTION",
    }
}

/// A rule applied to log records as they are ingested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestTimeRule {
    pub id: Field<String>,
    pub compartment_id: Field<String>,
    pub display_name: Field<String>,
    pub description: Field<String>,
    pub lifecycle_state: Field<Lenient<LifecycleState>>,
    pub time_created: Field<Timestamp>,
    pub time_updated: Field<Timestamp>,
    pub is_enabled: Field<bool>,
    pub conditions: Field<AnyIngestTimeRuleCondition>,
    pub actions: Field<Vec<AnyIngestTimeRuleAction>>,
    pub freeform_tags: Field<FreeformTags>,
    pub defined_tags: Field<DefinedTags>,
}

impl Model for IngestTimeRule {
    fn schema() -> &'static Schema {
        &INGEST_TIME_RULE_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            id: reader.read("id")?,
            compartment_id: reader.read("compartment_id")?,
            display_name: reader.read("display_name")?,
            description: reader.read("description")?,
            lifecycle_state: reader.read("lifecycle_state")?,
            time_created: reader.read("time_created")?,
            time_updated: reader.read("time_updated")?,
            is_enabled: reader.read("is_enabled")?,
            conditions: reader.read("conditions")?,
            actions: reader.read("actions")?,
            freeform_tags: reader.read("freeform_tags")?,
            defined_tags: reader.read("defined_tags")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("id", &self.id);
        writer.put("compartment_id", &self.compartment_id);
        writer.put("display_name", &self.display_name);
        writer.put("description", &self.description);
        writer.put("lifecycle_state", &self.lifecycle_state);
        writer.put("time_created", &self.time_created);
        writer.put("time_updated", &self.time_updated);
        writer.put("is_enabled", &self.is_enabled);
        writer.put("conditions", &self.conditions);
        writer.put("actions", &self.actions);
        writer.put("freeform_tags", &self.freeform_tags);
        writer.put("defined_tags", &self.defined_tags);
    }
}

impl_model!(IngestTimeRule);
