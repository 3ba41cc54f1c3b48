//! Action models run by scheduled tasks.
//!
//! Responsibilities:
//! - Define the base [`Action`] shape and its stream and purge subtypes.
//! - Define [`MetricExtraction`], the metric target of a stream action.
//!
//! Non-responsibilities:
//! - Does not validate saved search ids or query strings.

use crate::enums::Lenient;
use crate::error::Result;
use crate::field::Field;
use crate::marshal::{FieldReader, FieldWriter, Model};
use crate::schema::{FieldKind, FieldSpec, Schema};

wire_enum! {
    /// Kind of action; the discriminator of [`Action`] subtypes.
    pub enum ActionType {
        Stream => "STREAM",
        Purge => "PURGE",
    }
}

wire_enum! {
    /// Storage partition targeted by a purge.
    pub enum StorageDataType {
        Log => "LOG",
        Lookup => "LOOKUP",
    }
}

const TYPE: FieldSpec = FieldSpec::new("type", "type", FieldKind::Enum("ActionType"));

static ACTION_SCHEMA: Schema = Schema::new("Action", &[TYPE]);

static METRIC_EXTRACTION_SCHEMA: Schema = Schema::new(
    "MetricExtraction",
    &[
        FieldSpec::new("compartment_id", "compartmentId", FieldKind::String),
        FieldSpec::new("namespace", "namespace", FieldKind::String),
        FieldSpec::new("metric_name", "metricName", FieldKind::String),
        FieldSpec::new("resource_group", "resourceGroup", FieldKind::String),
    ],
);

static STREAM_ACTION_SCHEMA: Schema = Schema::new(
    "StreamAction",
    &[
        TYPE,
        FieldSpec::new("saved_search_id", "savedSearchId", FieldKind::String),
        FieldSpec::new("saved_search_duration", "savedSearchDuration", FieldKind::String),
        FieldSpec::new(
            "metric_extraction",
            "metricExtraction",
            FieldKind::Model("MetricExtraction"),
        ),
    ],
);

static PURGE_ACTION_SCHEMA: Schema = Schema::new(
    "PurgeAction",
    &[
        TYPE,
        FieldSpec::new("query_string", "queryString", FieldKind::String),
        FieldSpec::new("data_type", "dataType", FieldKind::Enum("StorageDataType")),
        FieldSpec::new("purge_duration", "purgeDuration", FieldKind::String),
        FieldSpec::new("purge_compartment_id", "purgeCompartmentId", FieldKind::String),
        FieldSpec::new(
            "compartment_id_in_subtree",
            "compartmentIdInSubtree",
            FieldKind::Boolean,
        ),
    ],
);

/// Base action shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    /// Wire key `type`.
    pub action_type: Field<Lenient<ActionType>>,
}

impl Action {
    fn of_type(action_type: ActionType) -> Self {
        Self {
            action_type: Field::Value(action_type.into()),
        }
    }
}

impl Model for Action {
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

/// Where a stream action publishes extracted metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricExtraction {
    pub compartment_id: Field<String>,
    pub namespace: Field<String>,
    pub metric_name: Field<String>,
    pub resource_group: Field<String>,
}

impl Model for MetricExtraction {
    fn schema() -> &'static Schema {
        &METRIC_EXTRACTION_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            compartment_id: reader.read("compartment_id")?,
            namespace: reader.read("namespace")?,
            metric_name: reader.read("metric_name")?,
            resource_group: reader.read("resource_group")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("compartment_id", &self.compartment_id);
        writer.put("namespace", &self.namespace);
        writer.put("metric_name", &self.metric_name);
        writer.put("resource_group", &self.resource_group);
    }
}

/// Streams saved search results, optionally as metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamAction {
    pub action: Action,
    pub saved_search_id: Field<String>,
    /// ISO-8601 duration of the search window.
    pub saved_search_duration: Field<String>,
    pub metric_extraction: Field<MetricExtraction>,
}

impl StreamAction {
    pub const ACTION_TYPE: ActionType = ActionType::Stream;

    pub fn new() -> Self {
        Self {
            action: Action::of_type(Self::ACTION_TYPE),
            saved_search_id: Field::Unset,
            saved_search_duration: Field::Unset,
            metric_extraction: Field::Unset,
        }
    }
}

impl Default for StreamAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for StreamAction {
    fn schema() -> &'static Schema {
        &STREAM_ACTION_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            action: Action::of_type(Self::ACTION_TYPE),
            saved_search_id: reader.read("saved_search_id")?,
            saved_search_duration: reader.read("saved_search_duration")?,
            metric_extraction: reader.read("metric_extraction")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("type", &self.action.action_type);
        writer.put("saved_search_id", &self.saved_search_id);
        writer.put("saved_search_duration", &self.saved_search_duration);
        writer.put("metric_extraction", &self.metric_extraction);
    }
}

/// Deletes data matching a query once it is older than the purge duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeAction {
    pub action: Action,
    pub query_string: Field<String>,
    pub data_type: Field<Lenient<StorageDataType>>,
    /// ISO-8601 duration; data older than this is purged.
    pub purge_duration: Field<String>,
    pub purge_compartment_id: Field<String>,
    pub compartment_id_in_subtree: Field<bool>,
}

impl PurgeAction {
    pub const ACTION_TYPE: ActionType = ActionType::Purge;

    pub fn new() -> Self {
        Self {
            action: Action::of_type(Self::ACTION_TYPE),
            query_string: Field::Unset,
            data_type: Field::Unset,
            purge_duration: Field::Unset,
            purge_compartment_id: Field::Unset,
            compartment_id_in_subtree: Field::Unset,
        }
    }
}

impl Default for PurgeAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for PurgeAction {
    fn schema() -> &'static Schema {
        &PURGE_ACTION_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            action: Action::of_type(Self::ACTION_TYPE),
            query_string: reader.read("query_string")?,
            data_type: reader.read("data_type")?,
            purge_duration: reader.read("purge_duration")?,
            purge_compartment_id: reader.read("purge_compartment_id")?,
            compartment_id_in_subtree: reader.read("compartment_id_in_subtree")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("type", &self.action.action_type);
        writer.put("query_string", &self.query_string);
        writer.put("data_type", &self.data_type);
        writer.put("purge_duration", &self.purge_duration);
        writer.put("purge_compartment_id", &self.purge_compartment_id);
        writer.put("compartment_id_in_subtree", &self.compartment_id_in_subtree);
    }
}

impl_model!(Action, MetricExtraction, StreamAction, PurgeAction);

polymorphic_model! {
    /// An action of any concrete type.
    pub enum AnyAction: Action, discriminator = "type" {
        Stream(StreamAction) => "STREAM",
        Purge(PurgeAction) => "PURGE",
    }
}
