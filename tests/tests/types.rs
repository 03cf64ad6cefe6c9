//! Typed literals: timestamp, inet, uuid, timeuuid and blob columns.

use std::net::IpAddr;

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tern_tests::prelude::*;
use uuid::Uuid;

mod timestamp {
    use super::*;
    use pretty_assertions::assert_eq;

    fn millis(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32, ms: u32) -> i64 {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_milli_opt(hh, mm, ss, ms)
            .unwrap();
        Utc.from_utc_datetime(&naive).timestamp_millis()
    }

    /// Literal forms and the instant each denotes.
    fn timestamp_forms() -> Vec<(&'static str, i64)> {
        vec![
            ("1000", 1000),
            ("'1992-06-04'", millis(1992, 6, 4, 0, 0, 0, 0)),
            ("'1992-06-04 12:30'", millis(1992, 6, 4, 12, 30, 0, 0)),
            ("'1992-06-04T12:30:15'", millis(1992, 6, 4, 12, 30, 15, 0)),
            ("'1992-06-04 12:30:15.250'", millis(1992, 6, 4, 12, 30, 15, 250)),
            ("'1992-06-04 12:30:15.123456'", millis(1992, 6, 4, 12, 30, 15, 123)),
            ("'1992-06-04 12:30:15Z'", millis(1992, 6, 4, 12, 30, 15, 0)),
            ("'1992-06-04 12:30:15 UTC'", millis(1992, 6, 4, 12, 30, 15, 0)),
            ("'1992-06-04 12:30:15+0200'", millis(1992, 6, 4, 10, 30, 15, 0)),
            ("'1992-06-04 12:30:15-05:00'", millis(1992, 6, 4, 17, 30, 15, 0)),
            ("'1992-06-04 12:30:15 +01'", millis(1992, 6, 4, 11, 30, 15, 0)),
        ]
    }

    #[test]
    fn test_insert_with_timestamp() {
        // GIVEN a table keyed and valued on timestamps
        let h = Harness::new();
        h.create(test_table("test_insert_with_timestamp", ColumnType::Timestamp));

        for (literal, expected) in timestamp_forms() {
            // WHEN the same literal fills every timestamp column
            h.insert_ok(&insert_into(
                "test_insert_with_timestamp",
                &[
                    ("h1", "1"),
                    ("h2", literal),
                    ("r1", "2"),
                    ("r2", literal),
                    ("v1", "3"),
                    ("v2", literal),
                ],
            ));

            // THEN all three hold the same instant
            let rows = h.partition(
                "test_insert_with_timestamp",
                key(&[("h1", "1"), ("h2", literal)]),
            );
            assert_eq!(rows.len(), 1, "literal {}", literal);
            let row = &rows[0];
            for column in ["h2", "r2", "v2"] {
                assert_eq!(
                    row.get(column).and_then(CellValue::as_timestamp),
                    Some(expected),
                    "{} from {}",
                    column,
                    literal
                );
            }
            assert_eq!(row.get("v1"), Some(&CellValue::Int(3)));
        }
    }

    #[test]
    fn test_invalid_timestamps_rejected() {
        let h = Harness::new();
        h.create(test_table("test_insert_with_invalid_timestamp", ColumnType::Timestamp));

        for bad in [
            "'plainstring'",
            "'1992:12:11'",
            "'1992-11'",
            "'1992-13-12'",
            "'1992-12-12 14:23:30:31'",
            "'1992-12-12 14:23:30.12.32'",
            "1.5",
        ] {
            h.assert_rejected(
                &insert_into(
                    "test_insert_with_invalid_timestamp",
                    &[("h1", "1"), ("h2", "2"), ("r1", "3"), ("r2", "4"), ("v1", "5"), ("v2", bad)],
                ),
                ErrorKind::Validation,
            );
        }
        assert!(h.all("test_insert_with_invalid_timestamp").is_empty());
    }

    #[test]
    fn test_configured_default_zone() {
        // GIVEN a session whose default zone is +05:30
        let h = Harness::with_config(EngineConfig::default().with_default_time_zone("+05:30"));
        h.create(kv_table("t", ColumnType::Timestamp));

        // WHEN a zoneless and a zoned literal are written
        h.insert_ok(&insert_into("t", &[("h", "1"), ("c", "'2017-01-01 05:30:00'")]));
        h.insert_ok(&insert_into("t", &[("h", "2"), ("c", "'2017-01-01 00:00:00Z'")]));

        // THEN both denote midnight UTC
        let rendered = h.rendered("t");
        assert_eq!(rendered.len(), 2);
        for row in rendered {
            assert!(row.ends_with("2017-01-01 00:00:00.000Z]"), "{}", row);
        }
    }
}

mod inet {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_insert_with_inet() {
        // GIVEN
        let h = Harness::new();
        h.create(five_column_table("table_with_inet", ColumnType::Inet, true));

        // WHEN
        h.insert_ok(&insert_into(
            "table_with_inet",
            &[
                ("c1", "'1.2.3.4'"),
                ("c2", "'fe80::2978:9018:b288:3f6c'"),
                ("c3", "1"),
                ("c4", "'fe80::9929:23c3:8309:c29f'"),
                ("c5", "'10.10.10.10'"),
            ],
        ));

        // THEN
        let row = h
            .row(
                "table_with_inet",
                key(&[("c1", "'1.2.3.4'"), ("c2", "'fe80::2978:9018:b288:3f6c'"), ("c3", "1")]),
            )
            .unwrap();
        assert_eq!(row.get("c1").and_then(CellValue::as_inet), Some(addr("1.2.3.4")));
        assert_eq!(
            row.get("c2").and_then(CellValue::as_inet),
            Some(addr("fe80::2978:9018:b288:3f6c"))
        );
        assert_eq!(
            row.get("c4").and_then(CellValue::as_inet),
            Some(addr("fe80::9929:23c3:8309:c29f"))
        );
        assert_eq!(row.get("c5").and_then(CellValue::as_inet), Some(addr("10.10.10.10")));
    }

    #[test]
    fn test_numeric_address_forms() {
        let h = Harness::new();
        h.create(five_column_table("table_with_inet", ColumnType::Inet, true));

        h.insert_ok(&insert_into(
            "table_with_inet",
            &[
                ("c1", "'0xff'"),
                ("c2", "'4294967295'"),
                ("c3", "1"),
                ("c4", "'0xffffffff'"),
                ("c5", "'291913250'"),
            ],
        ));

        let rows = h.partition("table_with_inet", key(&[("c1", "'0xff'")]));
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].to_string(),
            "Row[0.0.0.255, 255.255.255.255, 1, 255.255.255.255, 17.102.62.34]"
        );
    }

    #[test]
    fn test_invalid_inet_rejected() {
        let h = Harness::new();
        h.create(five_column_table("table_with_inet", ColumnType::Inet, true));

        for c1 in ["'1.2.3.400'", "'fe80::2978:9018:b288:3z6c'", "1", "3.1", "true", "'0x1ffffffff'"] {
            h.assert_rejected(
                &insert_into(
                    "table_with_inet",
                    &[
                        ("c1", c1),
                        ("c2", "'fe80::2978:9018:b288:3f6c'"),
                        ("c3", "1"),
                        ("c4", "'fe80::9929:23c3:8309:c29f'"),
                        ("c5", "'10.10.10.10'"),
                    ],
                ),
                ErrorKind::Validation,
            );
        }
    }
}

mod uuids {
    use super::*;
    use pretty_assertions::assert_eq;

    const C1: &str = "467c4b82-ef22-4173-bced-0eba570d969e";
    const C2: &str = "c57c4b82-ef52-2073-aced-0eba570d969e";
    const C4: &str = "157c4b82-ff32-1073-bced-0eba570d969e";
    const C5: &str = "b57c4b82-ef52-1173-bced-0eba570d969e";

    const T1: &str = "467c4b82-ef22-1173-bced-0eba570d969e";
    const T2: &str = "c57c4b82-ef52-1073-aced-0eba570d969e";

    fn request(table: &str, c1: &str, c2: &str, c4: &str) -> InsertRequest {
        insert_into(table, &[("c1", c1), ("c2", c2), ("c3", "1"), ("c4", c4), ("c5", C5)])
    }

    #[test]
    fn test_insert_with_uuid() {
        // GIVEN
        let h = Harness::new();
        h.create(five_column_table("table_with_uuid", ColumnType::Uuid, false));

        // WHEN
        h.insert_ok(&request("table_with_uuid", C1, C2, C4));

        // THEN the row is found by a bound key
        let row = h
            .session()
            .select_row("table_with_uuid", [("c3", BoundValue::Int(1))])
            .unwrap()
            .unwrap();
        for (column, expected) in [("c1", C1), ("c2", C2), ("c4", C4), ("c5", C5)] {
            assert_eq!(
                row.get(column).and_then(CellValue::as_uuid),
                Some(Uuid::parse_str(expected).unwrap())
            );
        }
    }

    #[test]
    fn test_invalid_uuid_rejected() {
        let h = Harness::new();
        h.create(five_column_table("table_with_uuid", ColumnType::Uuid, false));

        for c1 in [
            "67c4b82-ef22-4173-bced-0eba570d969e",
            "467c4b82-e22-4173-bced-0eba570d969e",
            "467c4b82-ef22-413-bced-0eba570d969e",
            "467c4b82-ef22-4173-bced-0eba570d96",
            "2",
            "'467c4b82-ef22-4173-bced-0eba570d969e'",
        ] {
            h.assert_rejected(&request("table_with_uuid", c1, C2, C4), ErrorKind::Validation);
        }
        h.assert_rejected(
            &request("table_with_uuid", C1, "X57c4b82-ef52-2073-aced-0eba570d969e", C4),
            ErrorKind::Validation,
        );
    }

    #[test]
    fn test_insert_with_timeuuid() {
        let h = Harness::new();
        h.create(five_column_table("table_with_timeuuid", ColumnType::TimeUuid, false));

        h.insert_ok(&request("table_with_timeuuid", T1, T2, C4));

        let row = h.row("table_with_timeuuid", key(&[("c3", "1")])).unwrap();
        assert_eq!(
            row.get("c1"),
            Some(&CellValue::TimeUuid(Uuid::parse_str(T1).unwrap()))
        );
    }

    #[test]
    fn test_timeuuid_requires_version_one() {
        // GIVEN a version 4 uuid, which a uuid column accepts
        let h = Harness::new();
        h.create(five_column_table("table_with_timeuuid", ColumnType::TimeUuid, false));
        h.create(five_column_table("table_with_uuid", ColumnType::Uuid, false));
        h.insert_ok(&request("table_with_uuid", C1, C2, C4));

        // WHEN it is written to a timeuuid column
        let err = h.insert_err(&request("table_with_timeuuid", C1, T2, C4));

        // THEN it breaks the version constraint
        assert_eq!(err.kind(), ErrorKind::Constraint);

        // And a well-formed uuid in c4 with version 4 fails the same way
        h.assert_rejected(
            &request("table_with_timeuuid", T1, T2, "157c4b82-ff32-4073-bced-0eba570d969e"),
            ErrorKind::Constraint,
        );
        // Malformed tokens are still validation errors
        h.assert_rejected(
            &request("table_with_timeuuid", "67c4b82-ef22-1173-bced-0eba570d969e", T2, C4),
            ErrorKind::Validation,
        );
    }
}

mod blob {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_with_blob() {
        let h = Harness::new();
        h.create(kv_table("blobs", ColumnType::Blob));

        h.insert_ok(&insert_into("blobs", &[("h", "1"), ("c", "0xCAFEbabe")]));
        h.insert_ok(&insert_into("blobs", &[("h", "2"), ("c", "0x")]));

        let row = h.row("blobs", key(&[("h", "1")])).unwrap();
        assert_eq!(
            row.get("c").and_then(CellValue::as_blob),
            Some(&[0xca, 0xfe, 0xba, 0xbe][..])
        );
        assert_eq!(row.to_string(), "Row[1, 0xcafebabe]");

        for bad in ["0xabc", "0xzz", "'0xab'", "12"] {
            h.assert_rejected(
                &insert_into("blobs", &[("h", "3"), ("c", bad)]),
                ErrorKind::Validation,
            );
        }
    }
}
