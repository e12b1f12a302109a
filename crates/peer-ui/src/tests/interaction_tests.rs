use super::*;
use std::cell::RefCell;

use peer_core::{AttributeId, Color, NodeHandle, SharedNative};
use peer_testing::{NativeCall, RecordingNative};

use crate::component::ComponentKind;
use crate::context::RootContext;

const NODE: NodeHandle = NodeHandle::new(0x42);

fn button() -> (Rc<RefCell<RecordingNative>>, Component) {
    let native = RecordingNative::shared();
    let shared: SharedNative = native.clone();
    let component = Component::bound(RootContext::new(shared), ComponentKind::Button, NODE);
    (native, component)
}

fn logging(
    log: &Rc<RefCell<Vec<&'static str>>>,
    name: &'static str,
) -> impl Fn(&mut Component) -> Result<(), PeerError> {
    let log = Rc::clone(log);
    move |_: &mut Component| {
        log.borrow_mut().push(name);
        Ok(())
    }
}

#[test]
fn supported_mask_has_one_bit_per_declared_style() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let styles = StateStyles::new()
        .normal(logging(&log, "normal"))
        .pressed(logging(&log, "pressed"))
        .selected(logging(&log, "selected"));
    assert_eq!(styles.supported_mask(), UiState::PRESSED | UiState::SELECTED);
    assert_eq!(StateStyles::new().supported_mask(), UiState::NORMAL);
}

#[test]
fn dispatch_runs_only_declared_and_active_states() {
    let (native, mut component) = button();
    let log = Rc::new(RefCell::new(Vec::new()));
    component.set_state_styles(
        StateStyles::new()
            .pressed(logging(&log, "pressed"))
            .selected(logging(&log, "selected")),
    );
    native.borrow_mut().set_ui_state(
        NODE,
        UiState::PRESSED | UiState::FOCUSED | UiState::SELECTED,
    );

    let fired = InteractionStateDispatcher::apply(&mut component).unwrap();

    assert_eq!(*log.borrow(), vec!["pressed", "selected"]);
    assert_eq!(fired, UiState::PRESSED | UiState::SELECTED);
    assert_eq!(
        native.borrow().calls(),
        &[NativeCall::SetSupportedUiState {
            node: NODE,
            mask: UiState::PRESSED | UiState::SELECTED,
        }]
    );
}

#[test]
fn normal_style_always_runs_first() {
    let (native, mut component) = button();
    let log = Rc::new(RefCell::new(Vec::new()));
    component.set_state_styles(
        StateStyles::new()
            .disabled(logging(&log, "disabled"))
            .focused(logging(&log, "focused"))
            .normal(logging(&log, "normal")),
    );

    InteractionStateDispatcher::dispatch(&mut component).unwrap();
    assert_eq!(*log.borrow(), vec!["normal"]);

    native
        .borrow_mut()
        .set_ui_state(NODE, UiState::DISABLED | UiState::FOCUSED);
    InteractionStateDispatcher::dispatch(&mut component).unwrap();
    assert_eq!(
        *log.borrow(),
        vec!["normal", "normal", "focused", "disabled"]
    );
}

#[test]
fn styles_restage_attributes_through_setters() {
    let (native, mut component) = button();
    component.set_state_styles(
        StateStyles::new()
            .normal(|c| c.background_color(Color::GRAY).map(|_| ()))
            .pressed(|c| c.background_color(Color::BLUE).map(|_| ())),
    );

    native.borrow_mut().set_ui_state(NODE, UiState::PRESSED);
    InteractionStateDispatcher::dispatch(&mut component).unwrap();
    component.patch();

    assert_eq!(
        native.borrow().attribute_calls(),
        vec![NativeCall::set(
            NODE,
            AttributeId::BackgroundColor,
            vec![Color::BLUE.into()],
        )]
    );
}

#[test]
fn failing_style_stops_dispatch() {
    let (native, mut component) = button();
    let log = Rc::new(RefCell::new(Vec::new()));
    component.set_state_styles(
        StateStyles::new()
            .pressed(|c| c.max_lines(1).map(|_| ()))
            .selected(logging(&log, "selected")),
    );
    native
        .borrow_mut()
        .set_ui_state(NODE, UiState::PRESSED | UiState::SELECTED);

    let err = InteractionStateDispatcher::dispatch(&mut component).unwrap_err();
    assert_eq!(
        err,
        PeerError::UnsupportedAttribute {
            component: "Button",
            attribute: "maxLines",
        }
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn unbound_component_dispatches_nothing() {
    let native = RecordingNative::shared();
    let shared: SharedNative = native.clone();
    let mut component = Component::new(
        RootContext::new(shared),
        ComponentKind::Button,
        crate::component::BindingMode::Plain,
    );
    let log = Rc::new(RefCell::new(Vec::new()));
    component.set_state_styles(StateStyles::new().normal(logging(&log, "normal")));

    assert_eq!(InteractionStateDispatcher::publish(&component), None);
    assert_eq!(
        InteractionStateDispatcher::dispatch(&mut component),
        Ok(UiState::NORMAL)
    );
    assert!(log.borrow().is_empty());
    assert!(native.borrow().calls().is_empty());
}
