//! Tests for `#[derive(Record)]`.

use chrono::{NaiveDate, NaiveDateTime};
use hrdesk_macros::Record;
use hrdesk_query::{
    run, AsValue, FieldKind, FilterState, Pipeline, Record as _, SortState, Timestamp, Value,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl AsValue for Priority {
    fn as_value(&self) -> Value<'_> {
        Value::String(match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        })
    }
}

#[derive(Debug, Clone, Record)]
struct Ticket {
    #[field(string, searchable)]
    subject: String,

    #[field(string, searchable, rename = "requester")]
    requested_by: String,

    #[field(enumeration, rank = ["low", "medium", "high", "urgent"])]
    priority: Priority,

    #[field(date)]
    opened_at: NaiveDate,

    #[field(date)]
    closed_at: Option<NaiveDateTime>,

    #[field(number)]
    reopen_count: u32,

    #[field(skip)]
    internal_note: String,

    id: u64,
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn ticket(id: u64, subject: &str, requested_by: &str, priority: Priority, opened: &str) -> Ticket {
    Ticket {
        subject: subject.into(),
        requested_by: requested_by.into(),
        priority,
        opened_at: date(opened),
        closed_at: None,
        reopen_count: 0,
        internal_note: "escalated by phone".into(),
        id,
    }
}

fn tickets() -> Vec<Ticket> {
    vec![
        ticket(1, "Badge reprint", "Ana", Priority::Low, "2024-05-02"),
        ticket(2, "Payroll mismatch", "Ben", Priority::Urgent, "2024-05-01"),
        ticket(3, "VPN access", "Cleo", Priority::High, "2024-05-03"),
        ticket(4, "Desk move", "Ana", Priority::Medium, "2024-04-28"),
    ]
}

fn ids(view: &[&Ticket]) -> Vec<u64> {
    view.iter().map(|t| t.id).collect()
}

#[test]
fn constants_hold_query_names() {
    assert_eq!(Ticket::SUBJECT, "subject");
    assert_eq!(Ticket::REQUESTED_BY, "requester");
    assert_eq!(Ticket::PRIORITY, "priority");
    assert_eq!(Ticket::REOPEN_COUNT, "reopen_count");
}

#[test]
fn schema_follows_annotations() {
    let schema = Ticket::schema().unwrap();

    assert_eq!(schema.len(), 6);
    let searchable: Vec<&str> = schema.searchable_fields().map(|f| f.name.as_str()).collect();
    assert_eq!(searchable, ["subject", "requester"]);

    assert_eq!(schema.field("opened_at").unwrap().kind, FieldKind::Date);
    assert_eq!(schema.field("reopen_count").unwrap().kind, FieldKind::Number);
    match &schema.field("priority").unwrap().kind {
        FieldKind::Enum { rank: Some(rank) } => {
            assert_eq!(rank.rank("low"), Some(0));
            assert_eq!(rank.rank("urgent"), Some(3));
        }
        other => panic!("unexpected kind {other:?}"),
    }

    assert!(!schema.contains("requested_by"));
    assert!(!schema.contains("internal_note"));
    assert!(!schema.contains("id"));
}

#[test]
fn field_values_go_through_as_value() {
    let mut t = ticket(9, "Laptop", "Dev", Priority::High, "2024-05-10");
    t.reopen_count = 2;

    assert_eq!(t.field_value("subject"), Value::String("Laptop"));
    assert_eq!(t.field_value("requester"), Value::String("Dev"));
    assert_eq!(t.field_value("priority"), Value::String("high"));
    assert_eq!(t.field_value("reopen_count").as_number().map(|n| n.to_f64()), Some(2.0));
    assert_eq!(
        t.field_value("opened_at"),
        Value::Timestamp(Timestamp::parse("2024-05-10").unwrap())
    );
    assert!(t.field_value("closed_at").is_none());
    assert!(t.field_value("internal_note").is_none());
    assert!(t.field_value("id").is_none());

    t.closed_at = date("2024-05-11").and_hms_opt(17, 0, 0);
    assert_eq!(
        t.field_value("closed_at"),
        Value::Timestamp(Timestamp::parse("2024-05-11T17:00:00Z").unwrap())
    );
}

#[test]
fn derived_records_run_through_the_pipeline() {
    let tickets = tickets();
    let schema = Ticket::schema().unwrap();

    let by_priority = run(&tickets, &schema, &FilterState::new(), &SortState::desc(Ticket::PRIORITY)).unwrap();
    assert_eq!(ids(&by_priority), [2, 3, 4, 1]);

    let by_opened = run(&tickets, &schema, &FilterState::new(), &SortState::asc(Ticket::OPENED_AT)).unwrap();
    assert_eq!(ids(&by_opened), [4, 2, 1, 3]);

    let anas = Pipeline::new(
        &schema,
        &FilterState::new().search("ana"),
        &SortState::asc(Ticket::SUBJECT),
    )
    .unwrap();
    assert_eq!(ids(&anas.run(&tickets)), [1, 4]);
    assert_eq!(anas.count(&tickets), 2);
}

#[test]
fn skipped_fields_are_not_searched() {
    let tickets = tickets();
    let schema = Ticket::schema().unwrap();
    let view = run(&tickets, &schema, &FilterState::new().search("phone"), &SortState::asc("subject")).unwrap();
    assert!(view.is_empty());
}

#[derive(Debug, Record)]
struct Shift {
    #[field(enumeration, searchable)]
    r#type: String,

    #[field(number)]
    hours: f64,
}

#[test]
fn raw_identifiers_use_their_plain_name() {
    assert_eq!(Shift::TYPE, "type");
    assert_eq!(Shift::HOURS, "hours");

    let schema = Shift::schema().unwrap();
    assert!(schema.contains("type"));

    let shifts = vec![
        Shift { r#type: "night".into(), hours: 7.5 },
        Shift { r#type: "morning".into(), hours: 8.0 },
    ];
    assert_eq!(shifts[0].field_value("type"), Value::String("night"));

    let view = run(&shifts, &schema, &FilterState::new().search("MORN"), &SortState::asc(Shift::HOURS)).unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].hours, 8.0);
}
