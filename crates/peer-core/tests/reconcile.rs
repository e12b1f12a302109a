use peer_core::prelude::*;
use peer_core::{Border, ChangeCallback, Composite, Font, Shadow};
use peer_testing::{NativeCall, RecordingNative};

const NODE: NodeHandle = NodeHandle::new(0x10);

fn width(value: f64) -> Option<AttrValue> {
    Some(AttrValue::Number(value))
}

#[test]
fn staging_same_value_twice_sets_once() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(AttributeId::Width, width(100.0));
    registry.patch(&mut native, NODE);
    registry.stage(AttributeId::Width, width(100.0));
    registry.patch(&mut native, NODE);

    assert_eq!(
        native.calls(),
        &[NativeCall::set(NODE, AttributeId::Width, vec![Field::Number(100.0)])]
    );
}

#[test]
fn unset_resets_once_and_evicts() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(AttributeId::Width, width(100.0));
    registry.patch(&mut native, NODE);
    registry.stage(AttributeId::Width, None);
    let evicted = registry.patch(&mut native, NODE);

    assert_eq!(evicted, vec![AttributeId::Width]);
    assert!(!registry.contains(AttributeId::Width));
    assert_eq!(
        native.take_calls(),
        vec![
            NativeCall::set(NODE, AttributeId::Width, vec![Field::Number(100.0)]),
            NativeCall::reset(NODE, AttributeId::Width),
        ]
    );

    registry.patch(&mut native, NODE);
    assert!(native.calls().is_empty());
}

#[test]
fn native_calls_follow_insertion_order() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(AttributeId::Opacity, Some(0.5.into()));
    registry.stage(AttributeId::Width, width(10.0));
    registry.stage(AttributeId::BackgroundColor, Some(Color::RED.into()));
    // Restaging keeps the original slot.
    registry.stage(AttributeId::Opacity, Some(0.75.into()));
    registry.patch(&mut native, NODE);

    let order: Vec<_> = native.calls().iter().filter_map(NativeCall::attribute).collect();
    assert_eq!(
        order,
        vec![
            AttributeId::Opacity,
            AttributeId::Width,
            AttributeId::BackgroundColor,
        ]
    );
}

#[test]
fn eviction_happens_after_the_full_pass() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(AttributeId::Width, width(1.0));
    registry.stage(AttributeId::Height, width(2.0));
    registry.stage(AttributeId::Opacity, Some(0.5.into()));
    registry.patch(&mut native, NODE);
    native.clear();

    registry.stage(AttributeId::Width, None);
    registry.stage(AttributeId::Height, width(3.0));
    registry.stage(AttributeId::Opacity, None);
    let evicted = registry.patch(&mut native, NODE);

    assert_eq!(evicted, vec![AttributeId::Width, AttributeId::Opacity]);
    assert_eq!(
        native.calls(),
        &[
            NativeCall::reset(NODE, AttributeId::Width),
            NativeCall::set(NODE, AttributeId::Height, vec![Field::Number(3.0)]),
            NativeCall::reset(NODE, AttributeId::Opacity),
        ]
    );
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec![AttributeId::Height]);
}

#[test]
fn clear_staged_resets_everything_on_next_patch() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(AttributeId::Width, width(1.0));
    registry.stage(AttributeId::Height, width(2.0));
    registry.patch(&mut native, NODE);
    native.clear();

    registry.clear_staged();
    assert!(native.calls().is_empty());
    registry.patch(&mut native, NODE);

    assert_eq!(
        native.calls(),
        &[
            NativeCall::reset(NODE, AttributeId::Width),
            NativeCall::reset(NODE, AttributeId::Height),
        ]
    );
    assert!(registry.is_empty());
}

#[test]
fn composite_values_cross_the_boundary_decomposed() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(
        AttributeId::Padding,
        Some(Edges::new(1.0, 2.0, 3.0, 4.0).into()),
    );
    registry.patch(&mut native, NODE);
    registry.stage(
        AttributeId::Padding,
        Some(Edges::new(1.0, 2.0, 3.0, 4.0).into()),
    );
    registry.patch(&mut native, NODE);

    assert_eq!(
        native.calls(),
        &[NativeCall::set(
            NODE,
            AttributeId::Padding,
            vec![
                Field::Number(1.0),
                Field::Number(2.0),
                Field::Number(3.0),
                Field::Number(4.0),
            ],
        )]
    );
}

#[test]
fn resource_replacing_literal_is_reapplied() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();
    let red = ResourceRef::new(Color::RED.argb() as i64, 10001);

    registry.stage(AttributeId::FontColor, Some(Color::RED.into()));
    registry.patch(&mut native, NODE);
    registry.stage(AttributeId::FontColor, Some(red.clone().into()));
    registry.patch(&mut native, NODE);
    registry.stage(AttributeId::FontColor, Some(red.clone().into()));
    registry.patch(&mut native, NODE);

    assert_eq!(
        native.calls(),
        &[
            NativeCall::set(
                NODE,
                AttributeId::FontColor,
                vec![Field::Number(Color::RED.argb() as f64)],
            ),
            NativeCall::set(NODE, AttributeId::FontColor, vec![Field::Resource(red)]),
        ]
    );
}

#[test]
fn unaccepted_shape_is_committed_but_resets() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(AttributeId::Opacity, Some(AttrValue::Bool(true)));
    let evicted = registry.patch(&mut native, NODE);
    assert!(evicted.is_empty());
    registry.stage(AttributeId::Opacity, Some(AttrValue::Bool(true)));
    registry.patch(&mut native, NODE);

    assert_eq!(native.calls(), &[NativeCall::reset(NODE, AttributeId::Opacity)]);
    let modifier = registry.get(AttributeId::Opacity).expect("modifier kept");
    assert_eq!(modifier.value(), Some(&AttrValue::Bool(true)));
}

#[test]
fn always_different_attribute_reapplies_every_patch() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();
    let shape = AttrValue::Composite(Composite::Fields(vec![Field::Number(8.0)]));

    for _ in 0..3 {
        registry.stage(AttributeId::Clip, Some(shape.clone()));
        registry.patch(&mut native, NODE);
    }
    assert_eq!(native.calls().len(), 3);
}

#[test]
fn text_clip_shape_is_set_on_every_patch() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();
    let shape = AttrValue::Composite(Composite::Fields(vec![Field::Number(8.0)]));

    for _ in 0..3 {
        registry.stage(AttributeId::TextClip, Some(shape.clone()));
        registry.patch(&mut native, NODE);
    }
    let expected = NativeCall::set(NODE, AttributeId::TextClip, vec![Field::Number(8.0)]);
    assert_eq!(native.calls(), &[expected.clone(), expected.clone(), expected]);

    native.clear();
    registry.stage(AttributeId::TextClip, Some(AttrValue::Bool(true)));
    registry.patch(&mut native, NODE);
    assert_eq!(
        native.calls(),
        &[NativeCall::set(NODE, AttributeId::TextClip, vec![Field::Bool(true)])]
    );
}

#[test]
fn font_weight_numbers_are_sent_as_strings() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(AttributeId::FontWeight, Some(400.into()));
    registry.stage(AttributeId::Font, Some(Font::new(14.0).weight("bold").into()));
    registry.patch(&mut native, NODE);

    assert_eq!(
        native.calls()[0],
        NativeCall::set(NODE, AttributeId::FontWeight, vec![Field::Str("400".into())])
    );
    assert_eq!(
        native.calls()[1],
        NativeCall::set(
            NODE,
            AttributeId::Font,
            vec![
                Field::Number(14.0),
                Field::Str("bold".into()),
                Field::Absent,
                Field::Absent,
            ],
        )
    );
}

#[test]
fn forget_committed_reapplies_staged_values() {
    let mut native = RecordingNative::new();
    let mut registry = ModifierRegistry::new();

    registry.stage(AttributeId::Border, Some(Border::new().width(1.0).into()));
    registry.stage(AttributeId::Shadow, Some(Shadow::new(4.0).into()));
    registry.patch(&mut native, NODE);
    native.clear();

    registry.patch(&mut native, NODE);
    assert!(native.calls().is_empty());

    registry.forget_committed();
    registry.patch(&mut native, NODE);
    assert_eq!(native.calls().len(), 2);
}

#[test]
fn modifier_reports_pending_difference() {
    let mut native = RecordingNative::new();
    let mut modifier = AttributeModifier::new(AttributeId::Height, width(5.0));
    assert!(modifier.is_different());

    assert!(!modifier.reconcile(&mut native, NODE));
    assert!(!modifier.is_different());

    modifier.stage(Some("50%".into()));
    assert!(modifier.is_different());
    modifier.stage(None);
    assert!(modifier.is_different());
    assert!(modifier.reconcile(&mut native, NODE));
    assert_eq!(modifier.value(), None);
}

#[test]
fn notifying_map_reconciles_each_write_immediately() {
    use std::rc::Rc;

    let native = RecordingNative::shared();
    let mut map = ChangeNotifyingMap::new();
    let sink = Rc::clone(&native);
    let callback: ChangeCallback = Box::new(move |_, modifier| {
        let mut native = sink.borrow_mut();
        let expired = modifier.reconcile(&mut *native, NODE);
        native.mark_dirty(NODE);
        expired
    });
    map.set_on_change(callback);

    map.stage(AttributeId::Width, width(100.0));
    map.stage(AttributeId::Width, None);
    assert!(map.is_empty());

    // Nothing left for a batched patch to reset a second time.
    let mut native = native.borrow_mut();
    assert_eq!(
        native.take_calls(),
        vec![
            NativeCall::set(NODE, AttributeId::Width, vec![Field::Number(100.0)]),
            NativeCall::MarkDirty { node: NODE },
            NativeCall::reset(NODE, AttributeId::Width),
            NativeCall::MarkDirty { node: NODE },
        ]
    );
    map.patch(&mut *native, NODE);
    assert!(native.calls().is_empty());
}
