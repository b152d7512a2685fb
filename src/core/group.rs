//! Group stack and per-call namespace placement

use super::convert::Converted;
use super::field::Field;
use std::sync::Arc;

/// Ordered, immutable stack of open group names.
///
/// `opened` counts the leading groups whose namespace has already been bound
/// into the backend core by an earlier `with_attrs`; only the remainder is
/// still pending.
#[derive(Debug, Clone)]
pub struct GroupStack {
    names: Arc<[String]>,
    opened: usize,
}

impl GroupStack {
    pub fn new() -> Self {
        Self {
            names: Arc::from(Vec::<String>::new()),
            opened: 0,
        }
    }

    /// Every open group, outermost first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Groups whose namespace marker has not been emitted yet.
    pub fn pending(&self) -> &[String] {
        &self.names[self.opened..]
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// New stack with `name` appended; `self` is untouched.
    #[must_use]
    pub fn push(&self, name: impl Into<String>) -> Self {
        let mut names = Vec::with_capacity(self.names.len() + 1);
        names.extend(self.names.iter().cloned());
        names.push(name.into());
        Self {
            names: Arc::from(names),
            opened: self.opened,
        }
    }

    /// Same names, all marked as already materialized.
    #[must_use]
    pub(crate) fn mark_opened(&self) -> Self {
        Self {
            names: Arc::clone(&self.names),
            opened: self.names.len(),
        }
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.names, &other.names) && self.opened == other.opened
    }
}

impl Default for GroupStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates one call's fields, inserting a single namespace marker for the
/// pending groups just before the first non-skip conversion.
pub struct NamespaceTracker<'a> {
    pending: &'a [String],
    fields: Vec<Field>,
    opened: bool,
}

impl<'a> NamespaceTracker<'a> {
    pub fn new(pending: &'a [String], capacity: usize) -> Self {
        Self {
            pending,
            fields: Vec::with_capacity(capacity + 1),
            opened: false,
        }
    }

    pub fn push(&mut self, converted: Converted) {
        if converted.is_skip() {
            return;
        }
        if !self.opened && !self.pending.is_empty() {
            self.fields.push(Field::namespace(self.pending));
            self.opened = true;
        }
        converted.append_to(&mut self.fields);
    }

    /// Whether a namespace marker was emitted.
    pub fn opened(&self) -> bool {
        self.opened
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(stack: &GroupStack) -> Vec<&str> {
        stack.names().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_push_copies() {
        let root = GroupStack::new();
        let req = root.push("req");
        let net = req.push("net");

        assert!(root.is_empty());
        assert_eq!(names(&req), vec!["req"]);
        assert_eq!(names(&net), vec!["req", "net"]);
    }

    #[test]
    fn test_mark_opened_clears_pending() {
        let stack = GroupStack::new().push("a").mark_opened().push("b");
        assert_eq!(names(&stack), vec!["a", "b"]);
        assert_eq!(stack.pending(), &["b".to_string()]);
    }

    #[test]
    fn test_marker_before_first_non_skip_only() {
        let pending = vec!["req".to_string()];
        let mut tracker = NamespaceTracker::new(&pending, 3);
        tracker.push(Converted::Skip);
        tracker.push(Converted::Field(Field::int64("a", 1)));
        tracker.push(Converted::Field(Field::int64("b", 2)));

        assert!(tracker.opened());
        let fields = tracker.into_fields();
        assert_eq!(fields.len(), 3);
        assert!(fields[0].is_namespace());
        assert_eq!(fields.iter().filter(|f| f.is_namespace()).count(), 1);
    }

    #[test]
    fn test_no_marker_when_all_skip() {
        let pending = vec!["req".to_string()];
        let mut tracker = NamespaceTracker::new(&pending, 2);
        tracker.push(Converted::Skip);
        tracker.push(Converted::Skip);

        assert!(!tracker.opened());
        assert!(tracker.into_fields().is_empty());
    }

    #[test]
    fn test_no_marker_without_groups() {
        let mut tracker = NamespaceTracker::new(&[], 1);
        tracker.push(Converted::Field(Field::bool("ok", true)));
        assert!(!tracker.opened());
        assert_eq!(tracker.into_fields(), vec![Field::bool("ok", true)]);
    }
}
