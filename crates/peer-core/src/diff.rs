//! Staged-versus-committed diffing.

use crate::value::AttrValue;

/// Attribute-specific comparison of two values of the same non-primitive
/// kind. Returns `true` when they differ.
pub type CompareFn = fn(&AttrValue, &AttrValue) -> bool;

/// Decides whether `stage` must be pushed to the native node given the last
/// committed value.
///
/// Kinds that differ are always a change, primitives compare by value, and
/// everything else is left to the attribute's own `compare`.
pub fn values_differ(stage: &AttrValue, committed: Option<&AttrValue>, compare: CompareFn) -> bool {
    let Some(committed) = committed else {
        return true;
    };
    if stage.kind() != committed.kind() {
        return true;
    }
    if stage.is_primitive() {
        return stage != committed;
    }
    compare(stage, committed)
}

/// Resource references compare by identity fields, composites field by field.
pub fn structural(stage: &AttrValue, committed: &AttrValue) -> bool {
    match (stage, committed) {
        (AttrValue::Resource(lhs), AttrValue::Resource(rhs)) => lhs != rhs,
        (AttrValue::Composite(lhs), AttrValue::Composite(rhs)) => lhs.differs(rhs),
        (lhs, rhs) => lhs != rhs,
    }
}

/// Re-applied on every patch while staged.
pub fn always(_stage: &AttrValue, _committed: &AttrValue) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Border, Color, Edges, ResourceRef};

    #[test]
    fn unset_committed_value_is_always_a_change() {
        assert!(values_differ(&AttrValue::Number(0.0), None, structural));
    }

    #[test]
    fn primitive_diff_matches_value_inequality() {
        let samples = [
            AttrValue::Number(0.0),
            AttrValue::Number(1.5),
            AttrValue::Number(f64::NAN),
            AttrValue::Str(String::new()),
            AttrValue::Str("100%".into()),
            AttrValue::Bool(true),
            AttrValue::Bool(false),
        ];
        for a in &samples {
            for b in &samples {
                assert_eq!(values_differ(a, Some(b), always), a != b, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn number_and_string_of_same_text_differ() {
        assert!(values_differ(
            &AttrValue::Number(100.0),
            Some(&AttrValue::Str("100".into())),
            structural,
        ));
    }

    #[test]
    fn resource_against_literal_always_differs() {
        let resource = AttrValue::Resource(ResourceRef::new(0xFF00_0000, 10001));
        let literal = AttrValue::from(Color::BLACK);
        assert!(values_differ(&resource, Some(&literal), structural));
        assert!(values_differ(&literal, Some(&resource), structural));

        let composite = AttrValue::from(Edges::all(1.0));
        assert!(values_differ(&resource, Some(&composite), structural));
    }

    #[test]
    fn equal_resources_and_composites_do_not_differ() {
        let resource = AttrValue::Resource(ResourceRef::new(3, 10002).in_module("b", "m"));
        assert!(!values_differ(&resource, Some(&resource.clone()), structural));

        let border = AttrValue::from(Border::new().width(2.0).color(Color::RED));
        assert!(!values_differ(&border, Some(&border.clone()), structural));
    }

    #[test]
    fn always_compare_only_applies_to_non_primitives() {
        let clip = AttrValue::from(Edges::all(0.0));
        assert!(values_differ(&clip, Some(&clip.clone()), always));
        assert!(!values_differ(
            &AttrValue::Bool(true),
            Some(&AttrValue::Bool(true)),
            always,
        ));
    }
}
