//! Media catalog domain: movies, people and genres

use kumo_core::ValueType;
use kumo_schema::{
    ClassDef, ColumnBinding, ColumnDecoder, DataPropertyDef, ObjectPropertyDef, Schema,
    SchemaBuilder, TableMapping,
};

pub const VOCAB_IRI: &str = "http://example.org/media#";
pub const DATA_IRI: &str = "http://example.org/media/data#";

/// Tokens the `genres` column uses to mean "no genre"
const GENRE_SENTINELS: [&str; 2] = ["(none)", "N/A"];

/// Media catalog ontology plus the mappings for the `movies`, `actors` and
/// `directors` tables.
///
/// The `movies` table carries its actors as a nested record list and its
/// genres as a `|`-joined label list; `director_id` is a plain foreign key
/// that may dangle when the directors extract is incomplete.
pub fn schema() -> Schema {
    SchemaBuilder::new("media", VOCAB_IRI, "mdb", DATA_IRI)
        .class(ClassDef::new("Person"))
        .class(ClassDef::with_parent("Actor", "Person"))
        .class(ClassDef::with_parent("Director", "Person"))
        .class(ClassDef::new("Movie"))
        .class(ClassDef::new("Genre"))
        .data_property(
            DataPropertyDef::new("personId", "Person", ValueType::Str).inverse_functional(),
        )
        .data_property(DataPropertyDef::new("name", "Person", ValueType::Str).functional())
        .data_property(
            DataPropertyDef::new("movieId", "Movie", ValueType::Str).inverse_functional(),
        )
        .data_property(DataPropertyDef::new("title", "Movie", ValueType::Str).functional())
        .data_property(DataPropertyDef::new("releaseYear", "Movie", ValueType::Int).functional())
        .data_property(DataPropertyDef::new("rating", "Movie", ValueType::Float).functional())
        .data_property(
            DataPropertyDef::new("genreName", "Genre", ValueType::Str).inverse_functional(),
        )
        .object_property(ObjectPropertyDef::new("hasActor", "Movie", "Actor").inverse_of("actsIn"))
        .object_property(ObjectPropertyDef::new("actsIn", "Actor", "Movie").inverse_of("hasActor"))
        .object_property(
            ObjectPropertyDef::new("directedBy", "Movie", "Director").inverse_of("directed"),
        )
        .object_property(
            ObjectPropertyDef::new("directed", "Director", "Movie").inverse_of("directedBy"),
        )
        .object_property(ObjectPropertyDef::new("hasGenre", "Movie", "Genre"))
        .table(
            TableMapping::new("movies", "Movie", "id")
                .column(ColumnBinding::new("id", "movieId", ColumnDecoder::Scalar))
                .column(ColumnBinding::new(
                    "title",
                    "title",
                    ColumnDecoder::Typed(ValueType::Str),
                ))
                .column(ColumnBinding::new(
                    "year",
                    "releaseYear",
                    ColumnDecoder::Typed(ValueType::Int),
                ))
                .column(ColumnBinding::new(
                    "rating",
                    "rating",
                    ColumnDecoder::Typed(ValueType::Float),
                ))
                .column(ColumnBinding::new(
                    "director_id",
                    "directedBy",
                    ColumnDecoder::Scalar,
                ))
                .column(ColumnBinding::new(
                    "actors",
                    "hasActor",
                    ColumnDecoder::nested("id", &[("name", "name")]),
                ))
                .column(ColumnBinding::new(
                    "genres",
                    "hasGenre",
                    ColumnDecoder::delimited('|', &GENRE_SENTINELS),
                )),
        )
        .table(
            TableMapping::new("actors", "Actor", "id")
                .column(ColumnBinding::new("id", "personId", ColumnDecoder::Scalar))
                .column(ColumnBinding::new(
                    "name",
                    "name",
                    ColumnDecoder::Typed(ValueType::Str),
                )),
        )
        .table(
            TableMapping::new("directors", "Director", "id")
                .column(ColumnBinding::new("id", "personId", ColumnDecoder::Scalar))
                .column(ColumnBinding::new(
                    "name",
                    "name",
                    ColumnDecoder::Typed(ValueType::Str),
                )),
        )
        .build()
        .expect("media schema is statically valid")
}
