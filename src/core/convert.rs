//! Attribute to field conversion

use super::attribute::{Attr, Value, MAX_LAZY_RESOLUTIONS};
use super::field::Field;

/// Outcome of converting one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    /// Nothing to emit.
    Skip,
    Field(Field),
    /// Children of an unnamed group, spliced into the enclosing list.
    Inline(Vec<Field>),
}

impl Converted {
    #[inline]
    pub fn is_skip(&self) -> bool {
        matches!(self, Converted::Skip)
    }

    pub fn append_to(self, out: &mut Vec<Field>) {
        match self {
            Converted::Skip => {}
            Converted::Field(field) => out.push(field),
            Converted::Inline(fields) => out.extend(fields),
        }
    }
}

/// Convert a single attribute into backend fields.
///
/// Lazy values are forced first. The zero attribute and groups without any
/// emitted children become [`Converted::Skip`]. Conversion never fails.
///
/// Every lazy forcing and every group descent inside one attribute draws on a
/// shared budget of [`MAX_LAZY_RESOLUTIONS`]. Once it runs out, whatever is
/// left becomes a string field holding its `Debug` text, so a valuer that
/// keeps producing groups of itself still terminates.
pub fn convert(attr: Attr) -> Converted {
    let mut budget = MAX_LAZY_RESOLUTIONS;
    convert_bounded(attr, &mut budget)
}

/// Convert a sequence of attributes, dropping skips and splicing inline groups.
///
/// Each top-level attribute gets its own budget.
pub fn convert_all<I>(attrs: I) -> Vec<Field>
where
    I: IntoIterator<Item = Attr>,
{
    let mut fields = Vec::new();
    for attr in attrs {
        convert(attr).append_to(&mut fields);
    }
    fields
}

fn convert_bounded(attr: Attr, budget: &mut usize) -> Converted {
    let Attr { key, value } = attr;
    let value = match force(value, budget) {
        Ok(value) => value,
        Err(text) => return Converted::Field(Field::string(key, text)),
    };

    if key.is_empty() && value.is_zero() {
        return Converted::Skip;
    }

    let field = match value {
        Value::Bool(b) => Field::bool(key, b),
        Value::Int64(i) => Field::int64(key, i),
        Value::Uint64(u) => Field::uint64(key, u),
        Value::Float64(f) => Field::float64(key, f),
        Value::String(s) => Field::string(key, s),
        Value::Duration(d) => Field::duration(key, d),
        Value::Time(t) => Field::time(key, t),
        Value::Any(json) => Field::any(key, json),
        Value::Group(children) => {
            if *budget == 0 {
                return Converted::Field(Field::string(key, format!("{:?}", children)));
            }
            *budget -= 1;

            let mut fields = Vec::with_capacity(children.len());
            for child in children {
                convert_bounded(child, budget).append_to(&mut fields);
            }
            if fields.is_empty() {
                return Converted::Skip;
            }
            if key.is_empty() {
                return Converted::Inline(fields);
            }
            Field::object(key, fields)
        }
        // force() never hands back a lazy value
        Value::Lazy(valuer) => Field::string(key, format!("{:?}", valuer)),
    };

    Converted::Field(field)
}

/// Force lazy values against the shared budget; `Err` carries the `Debug`
/// text of the valuer that could not be forced.
fn force(mut value: Value, budget: &mut usize) -> Result<Value, String> {
    while let Value::Lazy(valuer) = value {
        if *budget == 0 {
            return Err(format!("{:?}", valuer));
        }
        *budget -= 1;
        value = valuer.log_value();
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attribute::LogValuer;
    use crate::core::field::FieldValue;
    use chrono::Utc;
    use std::sync::Arc;
    use std::time::Duration;

    fn single(attr: Attr) -> Field {
        match convert(attr) {
            Converted::Field(field) => field,
            other => panic!("expected a single field, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_kinds() {
        let now = Utc::now();
        assert_eq!(single(Attr::bool("ok", true)), Field::bool("ok", true));
        assert_eq!(single(Attr::int64("n", -7)), Field::int64("n", -7));
        assert_eq!(single(Attr::uint64("u", 7)), Field::uint64("u", 7));
        assert_eq!(single(Attr::float64("f", 0.25)), Field::float64("f", 0.25));
        assert_eq!(single(Attr::string("s", "v")), Field::string("s", "v"));
        assert_eq!(
            single(Attr::duration("d", Duration::from_secs(2))),
            Field::duration("d", Duration::from_secs(2))
        );
        assert_eq!(single(Attr::time("t", now)), Field::time("t", now));
    }

    #[test]
    fn test_any_falls_through() {
        let field = single(Attr::new("tags", serde_json::json!(["a", "b"])));
        assert_eq!(field.value, FieldValue::Any(serde_json::json!(["a", "b"])));
    }

    #[test]
    fn test_zero_attr_skips() {
        assert!(convert(Attr::default()).is_skip());
    }

    #[test]
    fn test_named_group_becomes_object() {
        let field = single(Attr::group(
            "http",
            vec![Attr::string("method", "GET"), Attr::default(), Attr::int64("status", 200)],
        ));
        assert_eq!(
            field,
            Field::object(
                "http",
                vec![Field::string("method", "GET"), Field::int64("status", 200)]
            )
        );
    }

    #[test]
    fn test_unnamed_group_is_inlined() {
        let converted = convert(Attr::group("", vec![Attr::int64("a", 1), Attr::int64("b", 2)]));
        assert_eq!(
            converted,
            Converted::Inline(vec![Field::int64("a", 1), Field::int64("b", 2)])
        );

        let fields = convert_all(vec![
            Attr::string("before", "x"),
            Attr::group("", vec![Attr::int64("a", 1)]),
            Attr::string("after", "y"),
        ]);
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["before", "a", "after"]);
    }

    #[test]
    fn test_empty_groups_skip() {
        assert!(convert(Attr::group("empty", vec![])).is_skip());
        assert!(convert(Attr::group("only_zero", vec![Attr::default()])).is_skip());
        assert!(convert(Attr::group("", vec![])).is_skip());
    }

    #[test]
    fn test_lazy_is_forced() {
        let field = single(Attr::lazy("user", || Value::from("alice")));
        assert_eq!(field, Field::string("user", "alice"));

        let nested = single(Attr::group("g", vec![Attr::lazy("n", || Value::from(5i64))]));
        assert_eq!(nested, Field::object("g", vec![Field::int64("n", 5)]));
    }

    #[test]
    fn test_lazy_group_resolves_to_object() {
        let field = single(Attr::lazy("req", || {
            Value::Group(vec![Attr::string("path", "/health")])
        }));
        assert_eq!(
            field,
            Field::object("req", vec![Field::string("path", "/health")])
        );
    }

    #[derive(Debug)]
    struct Mirror;

    impl LogValuer for Mirror {
        fn log_value(&self) -> Value {
            Value::Lazy(Arc::new(Mirror))
        }
    }

    #[test]
    fn test_self_referential_lazy_degrades_to_text() {
        let field = single(Attr::new("loop", Value::Lazy(Arc::new(Mirror))));
        assert_eq!(field, Field::string("loop", "Mirror"));
    }

    /// Produces a group whose only child is another `Hydra`
    #[derive(Debug)]
    struct Hydra;

    impl LogValuer for Hydra {
        fn log_value(&self) -> Value {
            Value::Group(vec![Attr::new("inner", Value::Lazy(Arc::new(Hydra)))])
        }
    }

    #[test]
    fn test_lazy_group_cycle_degrades_to_text() {
        let mut field = single(Attr::new("head", Value::Lazy(Arc::new(Hydra))));
        let mut depth = 0;
        let leaf = loop {
            match field.value {
                FieldValue::Object(mut children) => {
                    assert_eq!(children.len(), 1);
                    field = children.remove(0);
                    depth += 1;
                }
                other => break other,
            }
        };

        assert_eq!(leaf, FieldValue::String("Hydra".to_string()));
        assert_eq!(field.key, "inner");
        assert!(depth <= MAX_LAZY_RESOLUTIONS);
    }

    #[test]
    fn test_budget_is_per_top_level_attr() {
        let attrs: Vec<Attr> = (0..MAX_LAZY_RESOLUTIONS + 10)
            .map(|i| Attr::lazy(format!("k{i}"), move || Value::from(i)))
            .collect();
        let fields = convert_all(attrs);

        assert_eq!(fields.len(), MAX_LAZY_RESOLUTIONS + 10);
        let last = fields.last().unwrap();
        assert_eq!(last.value, FieldValue::Uint64((MAX_LAZY_RESOLUTIONS + 9) as u64));
    }
}
