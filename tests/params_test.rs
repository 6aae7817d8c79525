//! Tests for value coercion before binding

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use rusqlite::types::Value as SqlValue;
use sqlite_rowkit::time::format_utc;
use sqlite_rowkit::{params, value_for_db, values, Error, Params, Value};

mod timestamp_tests {
    use super::*;

    #[test]
    fn test_non_utc_offset_fails() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let ts = offset.with_ymd_and_hms(2020, 1, 1, 5, 0, 0).unwrap();
        let err = value_for_db(&Value::from(ts)).unwrap_err();
        match err {
            Error::NotUtc { offset: got, .. } => assert_eq!(got, offset),
            other => panic!("expected NotUtc, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_offset_fails() {
        let offset = FixedOffset::west_opt(30 * 60).unwrap();
        let ts = offset.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(value_for_db(&Value::from(ts)), Err(Error::NotUtc { .. })));
    }

    #[test]
    fn test_zero_offset_renders_utc_designator() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let ts = offset.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            value_for_db(&Value::from(ts)).unwrap(),
            SqlValue::Text("2020-01-01T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_utc_datetime() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(
            value_for_db(&Value::from(ts)).unwrap(),
            SqlValue::Text("2024-05-06T07:08:09+00:00".to_string())
        );
    }

    #[test]
    fn test_naive_is_taken_as_utc() {
        let ts = NaiveDate::from_ymd_opt(2021, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(
            value_for_db(&Value::from(ts)).unwrap(),
            SqlValue::Text("2021-12-31T23:59:59+00:00".to_string())
        );
    }

    #[test]
    fn test_fraction_is_microseconds() {
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(250_000_123);
        assert_eq!(format_utc(&ts), "2020-01-01T00:00:00.250000+00:00");
    }

    #[test]
    fn test_rendered_text_parses_back() {
        let now = Utc::now();
        let text = format_utc(&now);
        let parsed = chrono::DateTime::parse_from_rfc3339(&text).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert_eq!(parsed.timestamp(), now.timestamp());
    }
}

mod primitive_tests {
    use super::*;

    #[test]
    fn test_primitives_pass_through() {
        assert_eq!(value_for_db(&Value::from(7)).unwrap(), SqlValue::Integer(7));
        assert_eq!(value_for_db(&Value::from(1.5)).unwrap(), SqlValue::Real(1.5));
        assert_eq!(
            value_for_db(&Value::from("abc")).unwrap(),
            SqlValue::Text("abc".to_string())
        );
        assert_eq!(
            value_for_db(&Value::from(vec![1u8, 2, 3])).unwrap(),
            SqlValue::Blob(vec![1, 2, 3])
        );
        assert_eq!(value_for_db(&Value::Null).unwrap(), SqlValue::Null);
    }

    #[test]
    fn test_bool_and_option() {
        assert_eq!(value_for_db(&Value::from(true)).unwrap(), SqlValue::Integer(1));
        assert_eq!(value_for_db(&Value::from(None::<i64>)).unwrap(), SqlValue::Null);
        assert_eq!(value_for_db(&Value::from(Some(3))).unwrap(), SqlValue::Integer(3));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(serde_json::json!(null)), Value::Null);
        assert_eq!(Value::from(serde_json::json!(4)), Value::Integer(4));
        assert_eq!(Value::from(serde_json::json!(0.5)), Value::Real(0.5));
        assert_eq!(Value::from(serde_json::json!("x")), Value::Text("x".into()));
        assert_eq!(
            Value::from(serde_json::json!([1, 2])),
            Value::Text("[1,2]".into())
        );
    }
}

mod params_tests {
    use super::*;

    #[test]
    fn test_params_macro() {
        let p = params![1, "two", 3.0];
        assert_eq!(
            p,
            Params::Positional(vec![
                Value::Integer(1),
                Value::Text("two".into()),
                Value::Real(3.0)
            ])
        );
        assert!(params![].is_empty());
    }

    #[test]
    fn test_values_macro_keeps_order() {
        let v = values! { "b" => 2, "a" => 1 };
        let keys: Vec<&str> = v.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_params_from_json() {
        assert_eq!(Params::from(serde_json::json!(null)), Params::none());
        assert_eq!(
            Params::from(serde_json::json!([1, "a"])),
            Params::Positional(vec![Value::Integer(1), Value::Text("a".into())])
        );
        let named = Params::from(serde_json::json!({"id": 1}));
        assert_eq!(named, Params::Named(values! { "id" => 1 }));
    }

    #[test]
    fn test_json_object_keeps_caller_order() {
        let named = Params::from(serde_json::json!({"zeta": 1, "alpha": 2, "mid": 3}));
        match named {
            Params::Named(values) => {
                let keys: Vec<&str> = values.keys().map(String::as_str).collect();
                assert_eq!(keys, vec![":zeta", ":alpha", ":mid"]);
            }
            other => panic!("expected named params, got {:?}", other),
        }
    }
}
