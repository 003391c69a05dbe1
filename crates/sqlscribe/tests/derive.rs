//! `#[derive(Entity)]` output.

#![allow(dead_code)]

use sqlscribe::{Column, DatabaseVendor, Entity, NamingConvention, QueryBuilderFactory};

#[derive(Entity)]
struct Person {
    id: i64,
    r#type: String,
    display_name: Option<String>,
    #[scribe(skip)]
    scratch: Vec<u8>,
}

#[derive(Entity)]
#[scribe(table = "audit.events")]
struct AuditEvent {
    event_id: i64,
    payload: serde_json::Value,
}

#[derive(Entity)]
pub struct r#Match {
    pub id: i32,
}

fn factory() -> QueryBuilderFactory {
    QueryBuilderFactory::new(DatabaseVendor::PostgreSql, NamingConvention::LowerSnakeCase, true)
}

#[test]
fn entity_name_and_table() {
    assert_eq!(Person::ENTITY_NAME, "Person");
    assert_eq!(Person::TABLE_NAME, None);
    assert_eq!(AuditEvent::TABLE_NAME, Some("audit.events"));
    assert_eq!(Match::ENTITY_NAME, "Match");
}

#[test]
fn selectors_carry_field_types() {
    let id: Column<Person, i64> = Person::ID;
    let name: Column<Person, Option<String>> = Person::DISPLAY_NAME;
    assert_eq!(id.path(), "id");
    assert_eq!(name.path(), "display_name");
}

#[test]
fn raw_identifiers_are_unrawed() {
    assert_eq!(Person::TYPE.path(), "type");

    let q = factory()
        .builder::<Person>()
        .select(Person::TYPE)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(q.sql(), "SELECT people.type FROM people;");
}

#[test]
fn explicit_table_is_verbatim() {
    let q = QueryBuilderFactory::new(DatabaseVendor::SqlServer, NamingConvention::PascalCase, true)
        .builder::<AuditEvent>()
        .select(AuditEvent::EVENT_ID)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(q.sql(), "SELECT audit.events.EventId FROM audit.events;");
}

#[test]
fn pluralized_root_table() {
    let q = factory()
        .builder::<Match>()
        .select(Match::ID)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(q.sql(), "SELECT matches.id FROM matches;");
}
