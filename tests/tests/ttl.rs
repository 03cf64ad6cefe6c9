//! Time-to-live: expiry, reset, table defaults and bounds.

use pretty_assertions::assert_eq;
use tern_core::DEFAULT_MAX_TTL_SECS;
use tern_tests::prelude::*;

fn full_row<'a>(h1: &'a str, h2: &'a str, r1: &'a str, r2: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("h1", h1),
        ("h2", h2),
        ("r1", r1),
        ("r2", r2),
        ("v1", "1"),
        ("v2", "2"),
    ]
}

#[test]
fn test_cells_expire_independently() {
    // GIVEN v1 written with TTL 2 and v2 with TTL 4 on the same row
    let h = Harness::new();
    h.create(test_table("test_ttl", ColumnType::Text));
    let row_key = [("h1", "1"), ("h2", "'h'"), ("r1", "2"), ("r2", "'r'")];
    let mut v1 = row_key.to_vec();
    v1.push(("v1", "100"));
    let mut v2 = row_key.to_vec();
    v2.push(("v2", "'later'"));
    h.insert_ok(&insert_into("test_ttl", &v1).ttl(tok("2")));
    h.insert_ok(&insert_into("test_ttl", &v2).ttl(tok("4")));
    assert_eq!(h.rendered("test_ttl"), vec!["Row[1, h, 2, r, 100, later]"]);

    // WHEN the first TTL passes
    h.advance_millis(2_100);

    // THEN only v1 is gone
    assert_eq!(h.rendered("test_ttl"), vec!["Row[1, h, 2, r, NULL, later]"]);

    // WHEN the second TTL passes
    h.advance_millis(2_000);

    // THEN the row is gone entirely
    assert!(h.all("test_ttl").is_empty());
    assert_eq!(h.row("test_ttl", key(&row_key)), None);
}

#[test]
fn test_expiry_is_exclusive_of_the_deadline() {
    let h = Harness::new();
    h.create(kv_table("t", ColumnType::Int));
    h.insert_ok(&insert_into("t", &[("h", "1"), ("c", "5")]).ttl(tok("3")));

    h.advance_millis(2_999);
    assert!(h.row("t", key(&[("h", "1")])).is_some());

    h.advance_millis(1);
    assert_eq!(h.row("t", key(&[("h", "1")])), None);
}

#[test]
fn test_reset_ttl_with_zero() {
    // GIVEN two rows written with TTL 2
    let h = Harness::new();
    h.create(test_table("test_reset_ttl", ColumnType::Int));
    h.insert_ok(&insert_into("test_reset_ttl", &full_row("1", "2", "3", "4")).ttl(tok("2")));
    h.insert_ok(&insert_into("test_reset_ttl", &full_row("5", "6", "7", "8")).ttl(tok("2")));

    // WHEN the second is rewritten with TTL 0 after more than half its TTL
    h.advance_millis(1_500);
    h.insert_ok(&insert_into("test_reset_ttl", &full_row("5", "6", "7", "8")).ttl(tok("0")));
    h.advance_millis(600);

    // THEN only the second survives
    let rows = h.all("test_reset_ttl");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("h1"), Some(&CellValue::Int(5)));
    assert_eq!(rows[0].ttl("v1", h.now()), None);
}

#[test]
fn test_table_default_ttl() {
    // GIVEN a table whose rows live 10 seconds unless told otherwise
    let h = Harness::new();
    h.create(
        TableDefBuilder::new("sessions")
            .column("id", ColumnType::Int)
            .column("who", ColumnType::Text)
            .primary_key("id")
            .default_ttl(10)
            .build()
            .unwrap(),
    );

    // WHEN rows are written with no TTL, TTL 0 and an explicit TTL
    h.insert_ok(&insert_into("sessions", &[("id", "1"), ("who", "'a'")]));
    h.insert_ok(&insert_into("sessions", &[("id", "2"), ("who", "'b'")]).ttl(tok("0")));
    h.insert_ok(&insert_into("sessions", &[("id", "3"), ("who", "'c'")]).ttl(tok("20")));

    // THEN the default applies only to the first
    let first = h.row("sessions", key(&[("id", "1")])).unwrap();
    assert_eq!(first.ttl("who", h.now()), Some(10));

    h.advance_secs(10);
    assert_eq!(h.rendered("sessions"), vec!["Row[2, b]", "Row[3, c]"]);

    h.advance_secs(10);
    assert_eq!(h.rendered("sessions"), vec!["Row[2, b]"]);
}

#[test]
fn test_ttl_counts_down() {
    let h = Harness::new();
    h.create(kv_table("t", ColumnType::Text));
    h.insert_ok(&insert_into("t", &[("h", "1"), ("c", "'x'")]).ttl(tok("100")));

    let read = |h: &Harness| {
        h.row("t", key(&[("h", "1")]))
            .and_then(|row| row.ttl("c", h.now()))
    };
    assert_eq!(read(&h), Some(100));

    h.advance_millis(30_500);
    assert_eq!(read(&h), Some(69));
}

#[test]
fn test_ttl_bounds() {
    let h = Harness::new();
    h.create(kv_table("t", ColumnType::Int));
    let at = |ttl: &str| insert_into("t", &[("h", "1"), ("c", "1")]).ttl(tok(ttl));

    // Both ends of the range are accepted
    h.insert_ok(&at(&DEFAULT_MAX_TTL_SECS.to_string()));
    h.insert_ok(&at("0"));

    for bad in [
        "-5".to_string(),
        (DEFAULT_MAX_TTL_SECS as u64 + 1).to_string(),
        i64::MAX.to_string(),
        "99999999999999999999".to_string(),
        "0x80".to_string(),
        "true".to_string(),
        "'10'".to_string(),
        "1.5".to_string(),
        "abc".to_string(),
    ] {
        h.assert_rejected(&at(&bad), ErrorKind::Ttl);
    }
}

#[test]
fn test_bound_ttl_values() {
    let h = Harness::new();
    h.create(kv_table("t", ColumnType::Int));

    h.insert_ok(&insert_into("t", &[("h", "1"), ("c", "1")]).ttl(BoundValue::Int(5)));
    h.assert_rejected(
        &insert_into("t", &[("h", "2"), ("c", "1")]).ttl(BoundValue::Int(-1)),
        ErrorKind::Ttl,
    );
    h.assert_rejected(
        &insert_into("t", &[("h", "3"), ("c", "1")]).ttl(BoundValue::Text("5".into())),
        ErrorKind::Ttl,
    );

    let row = h.row("t", key(&[("h", "1")])).unwrap();
    assert_eq!(row.ttl("c", h.now()), Some(5));
}

#[test]
fn test_rejected_ttl_writes_nothing() {
    let h = Harness::new();
    h.create(kv_table("t", ColumnType::Int));

    h.assert_rejected(
        &insert_into("t", &[("h", "1"), ("c", "1")]).ttl(tok("-1")),
        ErrorKind::Ttl,
    );

    assert!(h.all("t").is_empty());
}

#[test]
fn test_configured_max_ttl() {
    let h = Harness::with_config(EngineConfig::default().with_max_ttl_secs(60));
    h.create(kv_table("t", ColumnType::Int));

    h.insert_ok(&insert_into("t", &[("h", "1"), ("c", "1")]).ttl(tok("60")));
    h.assert_rejected(
        &insert_into("t", &[("h", "1"), ("c", "1")]).ttl(tok("61")),
        ErrorKind::Ttl,
    );
}

mod write_time {
    use super::*;
    use pretty_assertions::assert_eq;

    fn micros(millis: i64) -> String {
        (millis * 1_000).to_string()
    }

    #[test]
    fn test_older_write_loses() {
        // GIVEN a cell written at START + 10s
        let h = Harness::new();
        h.create(kv_table("t", ColumnType::Text));
        h.insert_ok(
            &insert_into("t", &[("h", "1"), ("c", "'newer'")])
                .timestamp(tok(&micros(START_MILLIS + 10_000))),
        );

        // WHEN a write stamped earlier arrives
        h.insert_ok(
            &insert_into("t", &[("h", "1"), ("c", "'older'")])
                .timestamp(tok(&micros(START_MILLIS))),
        );

        // THEN the newer value stays
        let row = h.row("t", key(&[("h", "1")])).unwrap();
        assert_eq!(row.get("c").and_then(CellValue::as_str), Some("newer"));
        assert_eq!(
            row.write_time("c"),
            Some(WriteTime::from_millis(START_MILLIS + 10_000))
        );
    }

    #[test]
    fn test_ttl_counts_from_write_time() {
        // GIVEN a write stamped one second in the past with TTL 2
        let h = Harness::new();
        h.create(kv_table("t", ColumnType::Int));
        h.insert_ok(
            &insert_into("t", &[("h", "1"), ("c", "1")])
                .ttl(tok("2"))
                .timestamp(tok(&micros(START_MILLIS - 1_000))),
        );

        // THEN it expires one second from now
        h.advance_millis(999);
        assert!(h.row("t", key(&[("h", "1")])).is_some());
        h.advance_millis(1);
        assert_eq!(h.row("t", key(&[("h", "1")])), None);
    }

    #[test]
    fn test_clock_supplies_write_time() {
        let h = Harness::new();
        h.create(kv_table("t", ColumnType::Int));
        h.advance_secs(5);

        let upsert = h.insert_ok(&insert_into("t", &[("h", "1"), ("c", "1")]));

        assert_eq!(upsert.marker.write_time, WriteTime::from_millis(START_MILLIS + 5_000));
        assert_eq!(upsert.marker.expiration, Expiration::Never);
    }

    #[test]
    fn test_invalid_timestamp_clause() {
        let h = Harness::new();
        h.create(kv_table("t", ColumnType::Int));
        for bad in ["'yesterday'", "1.5", "abc"] {
            h.assert_rejected(
                &insert_into("t", &[("h", "1"), ("c", "1")]).timestamp(tok(bad)),
                ErrorKind::Ttl,
            );
        }
    }
}
