//! Smart building domain: buildings, floors, rooms and sensors

use kumo_core::ValueType;
use kumo_schema::{
    ClassDef, ColumnBinding, ColumnDecoder, DataPropertyDef, ObjectPropertyDef, Schema,
    SchemaBuilder, TableMapping,
};

pub const VOCAB_IRI: &str = "http://example.org/building#";
pub const DATA_IRI: &str = "http://example.org/building/data#";

/// Smart building ontology plus the mappings for the `floors`, `rooms` and
/// `sensors` tables.
///
/// Containment runs sensor -> room -> floor -> building through plain
/// foreign keys; the `measures` column is a comma-joined list of measured
/// quantities, each materialized as its own entity.
pub fn schema() -> Schema {
    SchemaBuilder::new("bld", VOCAB_IRI, "bdb", DATA_IRI)
        .class(ClassDef::new("Building"))
        .class(ClassDef::new("Floor"))
        .class(ClassDef::new("Room"))
        .class(ClassDef::new("Device"))
        .class(ClassDef::with_parent("Sensor", "Device"))
        .class(ClassDef::new("Quantity"))
        .data_property(
            DataPropertyDef::new("buildingId", "Building", ValueType::Str).inverse_functional(),
        )
        .data_property(
            DataPropertyDef::new("floorId", "Floor", ValueType::Str).inverse_functional(),
        )
        .data_property(DataPropertyDef::new("level", "Floor", ValueType::Int).functional())
        .data_property(DataPropertyDef::new("roomId", "Room", ValueType::Str).inverse_functional())
        .data_property(DataPropertyDef::new("label", "Room", ValueType::Str).functional())
        .data_property(DataPropertyDef::new("area", "Room", ValueType::Float).functional())
        .data_property(
            DataPropertyDef::new("deviceId", "Device", ValueType::Str).inverse_functional(),
        )
        .data_property(DataPropertyDef::new("installed", "Sensor", ValueType::Date).functional())
        .data_property(DataPropertyDef::new("online", "Sensor", ValueType::Bool).functional())
        .data_property(
            DataPropertyDef::new("quantityName", "Quantity", ValueType::Str).inverse_functional(),
        )
        .object_property(ObjectPropertyDef::new("locatedIn", "Device", "Room").inverse_of("hosts"))
        .object_property(ObjectPropertyDef::new("hosts", "Room", "Device").inverse_of("locatedIn"))
        .object_property(ObjectPropertyDef::new("partOf", "Room", "Floor"))
        .object_property(ObjectPropertyDef::new("within", "Floor", "Building"))
        .object_property(ObjectPropertyDef::new("measures", "Sensor", "Quantity"))
        .table(
            TableMapping::new("floors", "Floor", "id")
                .column(ColumnBinding::new("id", "floorId", ColumnDecoder::Scalar))
                .column(ColumnBinding::new(
                    "level",
                    "level",
                    ColumnDecoder::Typed(ValueType::Int),
                ))
                .column(ColumnBinding::new(
                    "building_id",
                    "within",
                    ColumnDecoder::Scalar,
                )),
        )
        .table(
            TableMapping::new("rooms", "Room", "id")
                .column(ColumnBinding::new("id", "roomId", ColumnDecoder::Scalar))
                .column(ColumnBinding::new(
                    "label",
                    "label",
                    ColumnDecoder::Typed(ValueType::Str),
                ))
                .column(ColumnBinding::new(
                    "area",
                    "area",
                    ColumnDecoder::Typed(ValueType::Float),
                ))
                .column(ColumnBinding::new(
                    "floor_id",
                    "partOf",
                    ColumnDecoder::Scalar,
                )),
        )
        .table(
            TableMapping::new("sensors", "Sensor", "id")
                .column(ColumnBinding::new("id", "deviceId", ColumnDecoder::Scalar))
                .column(ColumnBinding::new(
                    "installed",
                    "installed",
                    ColumnDecoder::Typed(ValueType::Date),
                ))
                .column(ColumnBinding::new(
                    "online",
                    "online",
                    ColumnDecoder::Typed(ValueType::Bool),
                ))
                .column(ColumnBinding::new(
                    "room_id",
                    "locatedIn",
                    ColumnDecoder::Scalar,
                ))
                .column(ColumnBinding::new(
                    "measures",
                    "measures",
                    ColumnDecoder::delimited(',', &[]),
                )),
        )
        .build()
        .expect("building schema is statically valid")
}
