//! Property-based tests using proptest
//!
//! These tests verify invariants that should hold for all inputs:
//! - Level mapping preserves order
//! - Zero attributes never produce output
//! - At most one namespace marker per record
//! - Scalar kinds survive conversion unchanged

use proptest::prelude::*;
use rust_log_bridge::core::field::FieldValue;
use rust_log_bridge::prelude::*;
use rust_log_bridge::{convert, Converted};

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Trace),
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
        Just(Level::Fatal),
    ]
}

fn group_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 0..4)
}

/// Attributes that may or may not be the zero attribute
fn maybe_zero_attr() -> impl Strategy<Value = Attr> {
    prop_oneof![
        Just(Attr::default()),
        ("[a-z]{1,8}", any::<i64>()).prop_map(|(k, v)| Attr::int64(k, v)),
        ("[a-z]{1,8}", ".*").prop_map(|(k, v)| Attr::string(k, v)),
        ("[a-z]{1,8}", any::<bool>()).prop_map(|(k, v)| Attr::bool(k, v)),
    ]
}

fn handler_with_groups(core: &ObservedCore, groups: &[String]) -> CoreHandler {
    let mut handler = CoreHandler::builder(core.clone()).without_stacktrace().build();
    for name in groups {
        handler = handler.with_group(name);
    }
    handler
}

// ============================================================================
// Level Mapping Tests
// ============================================================================

proptest! {
    /// Facade order is never inverted by the backend mapping
    #[test]
    fn test_level_mapping_monotone(a in any_level(), b in any_level()) {
        if a <= b {
            prop_assert!(a.to_backend() <= b.to_backend());
        }
    }

    /// Enabled results agree with the mapped backend threshold
    #[test]
    fn test_enabled_matches_backend(level in any_level(), min in any_level()) {
        let core = ObservedCore::new(min);
        let handler = CoreHandler::builder(core).build();
        prop_assert_eq!(handler.enabled(level), level.to_backend() >= min.to_backend());
    }

    /// Parsing the display form gives the same level back
    #[test]
    fn test_level_display_parse(level in any_level()) {
        let parsed: Level = level.to_string().parse().unwrap();
        prop_assert_eq!(parsed, level);
    }
}

// ============================================================================
// Namespace Marker Tests
// ============================================================================

proptest! {
    /// The zero attribute is skipped under any group stack
    #[test]
    fn test_zero_attr_never_emitted(groups in group_names()) {
        let core = ObservedCore::new(Level::Debug);
        let handler = handler_with_groups(&core, &groups);

        handler
            .handle(Record::new(Level::Info, "zero").with_attrs(vec![Attr::default()]))
            .unwrap();

        let entries = core.entries();
        prop_assert_eq!(entries.len(), 1);
        prop_assert!(entries[0].context.is_empty());
    }

    /// One marker exactly when there are groups and something is emitted
    #[test]
    fn test_marker_count(
        groups in group_names(),
        attrs in prop::collection::vec(maybe_zero_attr(), 0..6),
    ) {
        let core = ObservedCore::new(Level::Debug);
        let handler = handler_with_groups(&core, &groups);
        let emitted = attrs.iter().filter(|a| !a.is_zero()).count();

        handler
            .handle(Record::new(Level::Info, "m").with_attrs(attrs))
            .unwrap();

        let context = &core.entries()[0].context;
        let markers = context.iter().filter(|f| f.is_namespace()).count();
        let expected = usize::from(!groups.is_empty() && emitted > 0);
        prop_assert_eq!(markers, expected);
        prop_assert_eq!(context.len(), emitted + markers);
        if markers == 1 {
            prop_assert!(context[0].is_namespace());
            prop_assert_eq!(&context[0].key, &groups.join("."));
        }
    }

    /// Record attribute order survives to the backend
    #[test]
    fn test_field_order_preserved(values in prop::collection::vec(any::<i64>(), 1..10)) {
        let core = ObservedCore::new(Level::Debug);
        let handler = CoreHandler::builder(core.clone()).build();
        let attrs: Vec<Attr> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Attr::int64(format!("k{i}"), *v))
            .collect();

        handler.handle(Record::new(Level::Info, "o").with_attrs(attrs)).unwrap();

        let keys: Vec<String> = core.entries()[0].context.iter().map(|f| f.key.clone()).collect();
        let expected: Vec<String> = (0..values.len()).map(|i| format!("k{i}")).collect();
        prop_assert_eq!(keys, expected);
    }
}

// ============================================================================
// Conversion Tests
// ============================================================================

proptest! {
    #[test]
    fn test_int64_preserved(key in "[a-z]{1,8}", value in any::<i64>()) {
        match convert(Attr::int64(key.clone(), value)) {
            Converted::Field(field) => {
                prop_assert_eq!(field.key, key);
                prop_assert_eq!(field.value, FieldValue::Int64(value));
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn test_uint64_preserved(key in "[a-z]{1,8}", value in any::<u64>()) {
        match convert(Attr::uint64(key.clone(), value)) {
            Converted::Field(field) => {
                prop_assert_eq!(field.key, key);
                prop_assert_eq!(field.value, FieldValue::Uint64(value));
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn test_string_preserved(key in "[a-z]{1,8}", value in ".*") {
        match convert(Attr::string(key.clone(), value.clone())) {
            Converted::Field(field) => {
                prop_assert_eq!(field.key, key);
                prop_assert_eq!(field.value, FieldValue::String(value));
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn test_finite_float_preserved(key in "[a-z]{1,8}", value in -1.0e12f64..1.0e12f64) {
        match convert(Attr::float64(key.clone(), value)) {
            Converted::Field(field) => {
                prop_assert_eq!(field.key, key);
                prop_assert_eq!(field.value, FieldValue::Float64(value));
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    /// Conversion never panics, whatever the message or key
    #[test]
    fn test_handle_no_panic(message in ".*", key in ".*", value in ".*", level in any_level()) {
        let core = ObservedCore::new(Level::Trace);
        let handler = CoreHandler::builder(core).without_stacktrace().build();
        let record = Record::new(level, message).with_attrs(vec![Attr::string(key, value)]);
        prop_assert!(handler.handle(record).is_ok());
    }
}
