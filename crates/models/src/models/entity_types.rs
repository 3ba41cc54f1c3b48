//! Log Analytics entity type models.
//!
//! Responsibilities:
//! - Define the out-of-box entity type create request and the entity type response.
//!
//! Invariants:
//! - `cloud_type` is strict on [`OutOfBoxEntityTypeDetails`] and lenient on
//!   [`LogAnalyticsEntityType`].

use crate::enums::{Lenient, assign_strict};
use crate::error::Result;
use crate::field::Field;
use crate::marshal::{FieldReader, FieldWriter, Model};
use crate::models::common::LifecycleState;
use crate::schema::{FieldKind, FieldSpec, Schema};
use crate::timestamp::Timestamp;

wire_enum! {
    /// Whether an entity type describes cloud resources.
    pub enum CloudType {
        Cloud => "CLOUD",
        NonCloud => "NON_CLOUD",
    }
}

wire_enum! {
    pub enum EntityEligibilityStatus {
        Eligible => "ELIGIBLE",
        Ineligible => "INELIGIBLE",
        Unknown => "UNKNOWN",
    }
}

const NAME: FieldSpec = FieldSpec::new("name", "name", FieldKind::String);
const INTERNAL_NAME: FieldSpec = FieldSpec::new("internal_name", "internalName", FieldKind::String);
const CATEGORY: FieldSpec = FieldSpec::new("category", "category", FieldKind::String);
const CLOUD_TYPE: FieldSpec = FieldSpec::new("cloud_type", "cloudType", FieldKind::Enum("CloudType"));
const PROPERTIES: FieldSpec = FieldSpec::new(
    "properties",
    "properties",
    FieldKind::List(&FieldKind::Model("EntityTypeProperty")),
);

static ENTITY_TYPE_PROPERTY_SCHEMA: Schema = Schema::new(
    "EntityTypeProperty",
    &[
        FieldSpec::new("name", "name", FieldKind::String),
        FieldSpec::new("description", "description", FieldKind::String),
    ],
);

static OUT_OF_BOX_ENTITY_TYPE_DETAILS_SCHEMA: Schema = Schema::new(
    "OutOfBoxEntityTypeDetails",
    &[NAME, INTERNAL_NAME, CATEGORY, CLOUD_TYPE, PROPERTIES],
);

static LOG_ANALYTICS_ENTITY_TYPE_SCHEMA: Schema = Schema::new(
    "LogAnalyticsEntityType",
    &[
        NAME,
        INTERNAL_NAME,
        CATEGORY,
        CLOUD_TYPE,
        FieldSpec::new("compartment_id", "compartmentId", FieldKind::String),
        FieldSpec::new(
            "lifecycle_state",
            "lifecycleState",
            FieldKind::Enum("LifecycleState"),
        ),
        FieldSpec::new("time_created", "timeCreated", FieldKind::DateTime),
        FieldSpec::new("time_updated", "timeUpdated", FieldKind::DateTime),
        FieldSpec::new(
            "management_agent_eligibility_status",
            "managementAgentEligibilityStatus",
            FieldKind::Enum("EntityEligibilityStatus"),
        ),
        PROPERTIES,
    ],
);

/// A named property carried by entities of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityTypeProperty {
    pub name: Field<String>,
    pub description: Field<String>,
}

impl Model for EntityTypeProperty {
    fn schema() -> &'static Schema {
        &ENTITY_TYPE_PROPERTY_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            name: reader.read("name")?,
            description: reader.read("description")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("name", &self.name);
        writer.put("description", &self.description);
    }
}

/// Request body for registering an out-of-box entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutOfBoxEntityTypeDetails {
    pub name: Field<String>,
    pub internal_name: Field<String>,
    pub category: Field<String>,
    pub cloud_type: Field<CloudType>,
    pub properties: Field<Vec<EntityTypeProperty>>,
}

impl OutOfBoxEntityTypeDetails {
    /// Assign `cloud_type` from its wire text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::InvalidEnumValue`] unless `value` is `CLOUD`
    /// or `NON_CLOUD`; the field keeps its previous value.
    pub fn set_cloud_type_str(&mut self, value: &str) -> Result<()> {
        let cloud_type = assign_strict(Self::schema().model, "cloud_type", value)?;
        self.cloud_type.set(cloud_type);
        Ok(())
    }
}

impl Model for OutOfBoxEntityTypeDetails {
    fn schema() -> &'static Schema {
        &OUT_OF_BOX_ENTITY_TYPE_DETAILS_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            name: reader.read("name")?,
            internal_name: reader.read("internal_name")?,
            category: reader.read("category")?,
            cloud_type: reader.read("cloud_type")?,
            properties: reader.read("properties")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("name", &self.name);
        writer.put("internal_name", &self.internal_name);
        writer.put("category", &self.category);
        writer.put("cloud_type", &self.cloud_type);
        writer.put("properties", &self.properties);
    }
}

/// An entity type as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogAnalyticsEntityType {
    pub name: Field<String>,
    pub internal_name: Field<String>,
    pub category: Field<String>,
    pub cloud_type: Field<Lenient<CloudType>>,
    pub compartment_id: Field<String>,
    pub lifecycle_state: Field<Lenient<LifecycleState>>,
    pub time_created: Field<Timestamp>,
    pub time_updated: Field<Timestamp>,
    pub management_agent_eligibility_status: Field<Lenient<EntityEligibilityStatus>>,
    pub properties: Field<Vec<EntityTypeProperty>>,
}

impl Model for LogAnalyticsEntityType {
    fn schema() -> &'static Schema {
        &LOG_ANALYTICS_ENTITY_TYPE_SCHEMA
    }

    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self> {
        Ok(Self {
            name: reader.read("name")?,
            internal_name: reader.read("internal_name")?,
            category: reader.read("category")?,
            cloud_type: reader.read("cloud_type")?,
            compartment_id: reader.read("compartment_id")?,
            lifecycle_state: reader.read("lifecycle_state")?,
            time_created: reader.read("time_created")?,
            time_updated: reader.read("time_updated")?,
            management_agent_eligibility_status: reader
                .read("management_agent_eligibility_status")?,
            properties: reader.read("properties")?,
        })
    }

    fn encode_fields(&self, writer: &mut FieldWriter<'_>) {
        writer.put("name", &self.name);
        writer.put("internal_name", &self.internal_name);
        writer.put("category", &self.category);
        writer.put("cloud_type", &self.cloud_type);
        writer.put("compartment_id", &self.compartment_id);
        writer.put("lifecycle_state", &self.lifecycle_state);
        writer.put("time_created", &self.time_created);
        writer.put("time_updated", &self.time_updated);
        writer.put(
            "management_agent_eligibility_status",
            &self.management_agent_eligibility_status,
        );
        writer.put("properties", &self.properties);
    }
}

impl_model!(EntityTypeProperty, OutOfBoxEntityTypeDetails, LogAnalyticsEntityType);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;
    use serde_json::json;

    #[test]
    fn test_strict_cloud_type_setter() {
        let mut details = OutOfBoxEntityTypeDetails::default();
        details.set_cloud_type_str("NON_CLOUD").unwrap();
        assert_eq!(details.cloud_type, Field::Value(CloudType::NonCloud));

        let err = details.set_cloud_type_str("HYBRID").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(details.cloud_type, Field::Value(CloudType::NonCloud));
    }

    #[test]
    fn test_strict_cloud_type_on_unmarshal() {
        match OutOfBoxEntityTypeDetails::unmarshal(&json!({"cloudType": "HYBRID"})) {
            Err(ModelError::InvalidEnumValue {
                model,
                field,
                value,
                allowed,
            }) => {
                assert_eq!(model, "OutOfBoxEntityTypeDetails");
                assert_eq!(field, "cloud_type");
                assert_eq!(value, "HYBRID");
                assert_eq!(allowed, vec!["CLOUD", "NON_CLOUD"]);
            }
            other => panic!("expected InvalidEnumValue, got {other:?}"),
        }
    }

    #[test]
    fn test_same_enum_lenient_on_response() {
        let entity = LogAnalyticsEntityType::unmarshal(&json!({"cloudType": "HYBRID"})).unwrap();
        assert_eq!(entity.cloud_type, Field::Value(Lenient::Unknown));
    }

    #[test]
    fn test_properties_round_trip() {
        let input = json!({
            "name": "Host (Linux)",
            "internalName": "omc_host_linux",
            "cloudType": "NON_CLOUD",
            "properties": [
                {"name": "hostname", "description": "Fully qualified host name"},
                {"name": "ip"}
            ]
        });
        let details = OutOfBoxEntityTypeDetails::unmarshal(&input).unwrap();
        assert_eq!(details.marshal(), input);
    }
}
