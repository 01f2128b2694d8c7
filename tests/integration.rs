// Integration tests for Kumo components
// These tests verify end-to-end functionality across multiple crates

use kumo_core::{vocab, NodeId, Term, Triple};
use kumo_engine::{LoadWarning, MaterializeOptions, Materializer};
use kumo_serialize::{ntriples, to_string, Format};
use kumo_store::GraphStore;
use serde_json::{json, Value};
use std::collections::HashSet;

fn movie_rows() -> Vec<Value> {
    vec![
        json!({
            "id": "3",
            "title": "X",
            "year": "1999",
            "rating": "7.5",
            "director_id": "99",
            "actors": [{"id": "7", "name": "Jane Doe"}],
            "genres": "Action|Comedy"
        }),
        json!({
            "id": "4",
            "title": "Y",
            "year": "not a year",
            "genres": "(none)"
        }),
    ]
}

fn materialize_media() -> (GraphStore, kumo_engine::RunReport) {
    let mut materializer =
        Materializer::new(kumo_domains::media::schema(), MaterializeOptions::default());
    materializer.load_table("movies", &movie_rows()).unwrap();
    materializer
        .load_table("actors", &[json!({"id": "7", "name": "Jane Doe"})])
        .unwrap();
    materializer.finish()
}

#[test]
fn test_end_to_end_media_materialization() {
    let (store, report) = materialize_media();

    // loaded entities
    assert!(store.has_type(&NodeId::new("mdb:Movie_3")));
    assert!(store.has_type(&NodeId::new("mdb:Actor_7")));

    // dangling director repaired with a stub carrying only its key
    assert!(store.contains(
        &NodeId::new("mdb:Director_99"),
        &NodeId::new(vocab::RDF_TYPE),
        &Term::Node(NodeId::new("media:Director"))
    ));
    assert_eq!(store.find(Some(&NodeId::new("mdb:Director_99")), None, None).len(), 2);

    // the sentinel genre token produced nothing
    assert!(!store.has_type(&NodeId::new("mdb:Genre_none")));

    // malformed year degraded to a warning, row 4 still present
    assert!(store.has_type(&NodeId::new("mdb:Movie_4")));
    assert!(report.warnings.iter().any(|w| matches!(
        w,
        LoadWarning::SourceRow { row, column, .. } if row == "4" && column == "year"
    )));

    assert_eq!(report.tables.len(), 2);
    assert_eq!(report.total_triples, store.len());
}

#[test]
fn test_referential_closure_over_full_store() {
    let (store, _) = materialize_media();
    let rdf_type = NodeId::new(vocab::RDF_TYPE);
    for triple in store.iter() {
        if !triple.subject.as_str().starts_with("mdb:") {
            continue; // ontology declarations
        }
        assert!(store.has_type(&triple.subject), "no type for {}", triple.subject);
        if triple.predicate == rdf_type {
            continue;
        }
        if let Some(object) = triple.object.as_node() {
            assert!(store.has_type(object), "no type for {}", object);
        }
    }
}

#[test]
fn test_full_reload_is_idempotent() {
    let (first_store, first_report) = materialize_media();
    let (second_store, second_report) = materialize_media();

    assert_eq!(first_store.len(), second_store.len());
    assert_eq!(first_report.total_triples, second_report.total_triples);

    let first: HashSet<Triple> = first_store.iter().cloned().collect();
    let second: HashSet<Triple> = second_store.iter().cloned().collect();
    assert_eq!(first, second);
}

#[test]
fn test_functional_cardinality_after_load() {
    let (store, _) = materialize_media();
    let schema = kumo_domains::media::schema();
    let functional: Vec<NodeId> = ["name", "title", "releaseYear", "rating"]
        .iter()
        .map(|p| schema.property_node(p))
        .collect();

    let subjects: HashSet<&NodeId> = store.iter().map(|t| &t.subject).collect();
    for subject in subjects {
        for property in &functional {
            assert!(
                store.objects_of(subject, property).len() <= 1,
                "{} has multiple {} values",
                subject,
                property
            );
        }
    }
}

#[test]
fn test_every_format_renders_the_same_graph() {
    let (store, _) = materialize_media();
    let prefixes = kumo_domains::media::schema().prefixes().clone();

    for format in Format::all() {
        let rendered = to_string(&store, &prefixes, format).unwrap();
        assert!(!rendered.is_empty(), "{} output is empty", format);
        assert!(
            rendered.contains("Movie_3"),
            "{} output lost the movie entity",
            format
        );
    }
}

#[test]
fn test_ntriples_round_trip_is_isomorphic() {
    let (store, _) = materialize_media();
    let prefixes = kumo_domains::media::schema().prefixes().clone();

    let rendered = ntriples::to_string(&store, &prefixes).unwrap();
    let parsed = ntriples::parse(&rendered, &prefixes).unwrap();

    assert_eq!(parsed.len(), store.len());
    let original: HashSet<Triple> = store.iter().cloned().collect();
    let reparsed: HashSet<Triple> = parsed.into_iter().collect();
    assert_eq!(original, reparsed);
}

#[test]
fn test_inverse_consistency_when_enabled() {
    let options = MaterializeOptions {
        materialize_inverses: true,
        ..Default::default()
    };
    let mut materializer = Materializer::new(kumo_domains::media::schema(), options);
    materializer.load_table("movies", &movie_rows()).unwrap();
    let (store, _) = materializer.finish();

    let schema = kumo_domains::media::schema();
    let directed_by = schema.property_node("directedBy");
    let directed = schema.property_node("directed");
    let has_actor = schema.property_node("hasActor");
    let acts_in = schema.property_node("actsIn");

    for triple in store.iter() {
        let (forward, reverse) = if triple.predicate == directed_by {
            (&directed_by, &directed)
        } else if triple.predicate == has_actor {
            (&has_actor, &acts_in)
        } else {
            continue;
        };
        let object = triple.object.as_node().unwrap();
        assert_eq!(&triple.predicate, forward);
        assert!(
            store.contains(object, reverse, &Term::Node(triple.subject.clone())),
            "missing inverse of {} {} {}",
            triple.subject,
            triple.predicate,
            object
        );
    }
}

#[test]
fn test_building_domain_end_to_end() {
    let mut materializer =
        Materializer::new(kumo_domains::building::schema(), MaterializeOptions::default());
    materializer
        .load_table(
            "floors",
            &[json!({"id": "f1", "level": "1", "building_id": "hq"})],
        )
        .unwrap();
    materializer
        .load_table(
            "rooms",
            &[json!({"id": "r12", "label": "Lab", "area": "42.5", "floor_id": "f1"})],
        )
        .unwrap();
    materializer
        .load_table(
            "sensors",
            &[json!({
                "id": "s1",
                "installed": "2021-03-05",
                "online": "1",
                "room_id": "r12",
                "measures": "temperature, co2"
            })],
        )
        .unwrap();
    let (store, report) = materializer.finish();

    // containment chain is fully linked
    assert!(store.contains(
        &NodeId::new("bdb:Sensor_s1"),
        &NodeId::new("bld:locatedIn"),
        &Term::Node(NodeId::new("bdb:Room_r12"))
    ));
    assert!(store.contains(
        &NodeId::new("bdb:Room_r12"),
        &NodeId::new("bld:partOf"),
        &Term::Node(NodeId::new("bdb:Floor_f1"))
    ));
    assert!(store.contains(
        &NodeId::new("bdb:Floor_f1"),
        &NodeId::new("bld:within"),
        &Term::Node(NodeId::new("bdb:Building_hq"))
    ));

    // building was never loaded: repaired as a stub
    assert!(report.warnings.iter().any(|w| matches!(
        w,
        LoadWarning::ReferentialGap { class, key } if class == "Building" && key == "hq"
    )));
    assert!(store.has_type(&NodeId::new("bdb:Quantity_co2")));
}
