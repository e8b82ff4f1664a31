//! Editor field control
//!
//! [`EditorFieldControl`] wraps an [`EditorWidget`] and keeps three sources
//! of truth in step: the host value, the widget buffer and the options map.
//!
//! The control is a cheap `Rc` handle. Widget event handlers hold a weak
//! reference to the same state, so a control that is dropped without being
//! destroyed does not keep itself alive through its widget.
//!
//! State is split into `Cell`/`RefCell` fields and no borrow is ever held
//! across a call into the widget or a host callback; both may re-enter the
//! control synchronously.
//!
//! The implementation is spread over:
//! - this module: identity and form-field state
//! - `value`: the value bridge
//! - `options`: option reconciliation
//! - `lifecycle`: widget creation, event routing and teardown

mod lifecycle;
mod options;
mod value;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mirrorfield_core::id::next_control_id;
use mirrorfield_core::{
    CursorActivity, EditorOptions, EventEmitter, LifecycleEvent, LifecycleState, OptionsDiffer,
    ScrollInfo, StateMachine,
};
use smallvec::SmallVec;

use crate::accessor::{ChangeCallback, FormFieldControl, TouchedCallback, ValueAccessor};
use crate::config::FieldConfig;
use crate::validation::ValidationContext;
use crate::widget::EditorWidget;

pub use value::normalize_line_endings;

/// Option toggled from the value: whether the gutter shows line numbers
pub const LINE_NUMBERS_OPTION: &str = "lineNumbers";

/// Option toggled from the disabled state
pub const READ_ONLY_OPTION: &str = "readOnly";

const CONTROL_TYPE: &str = "mirrorfield";
const FLOATING_CLASS: &str = "floating";

pub(crate) struct ControlInner<W: EditorWidget> {
    id: String,
    described_by: RefCell<String>,
    placeholder: RefCell<Option<String>>,
    required: Cell<bool>,
    disabled: Cell<bool>,
    focused: Cell<bool>,

    value: RefCell<String>,
    show_line_numbers: Cell<bool>,
    preserve_scroll_position: Cell<bool>,
    on_change: RefCell<ChangeCallback>,
    on_touched: RefCell<TouchedCallback>,

    options: RefCell<Option<EditorOptions>>,
    differ: RefCell<Option<OptionsDiffer>>,

    lifecycle: RefCell<StateMachine<LifecycleState, LifecycleEvent>>,
    widget: RefCell<Option<Rc<W>>>,
    restored_anchor: RefCell<Option<W::Anchor>>,

    validation: RefCell<Option<Rc<dyn ValidationContext>>>,

    state_changes: EventEmitter<()>,
    cursor_activity: EventEmitter<CursorActivity>,
    focus_change: EventEmitter<bool>,
    scroll: EventEmitter<ScrollInfo>,
}

/// Form-field control wrapping an external editor widget
pub struct EditorFieldControl<W: EditorWidget> {
    inner: Rc<ControlInner<W>>,
}

impl<W: EditorWidget> Clone for EditorFieldControl<W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<W: EditorWidget> EditorFieldControl<W> {
    /// Create an unmounted control with an empty value
    pub fn new() -> Self {
        let id = next_control_id();
        tracing::debug!(%id, "field control created");
        Self {
            inner: Rc::new(ControlInner {
                id,
                described_by: RefCell::new(String::new()),
                placeholder: RefCell::new(None),
                required: Cell::new(false),
                disabled: Cell::new(false),
                focused: Cell::new(false),
                value: RefCell::new(String::new()),
                show_line_numbers: Cell::new(false),
                preserve_scroll_position: Cell::new(false),
                on_change: RefCell::new(Rc::new(|_: &str| {})),
                on_touched: RefCell::new(Rc::new(|| {})),
                options: RefCell::new(None),
                differ: RefCell::new(None),
                lifecycle: RefCell::new(LifecycleState::machine()),
                widget: RefCell::new(None),
                restored_anchor: RefCell::new(None),
                validation: RefCell::new(None),
                state_changes: EventEmitter::new(),
                cursor_activity: EventEmitter::new(),
                focus_change: EventEmitter::new(),
                scroll: EventEmitter::new(),
            }),
        }
    }

    /// Create an unmounted control from a configuration
    pub fn with_config(config: &FieldConfig) -> Self {
        let control = Self::new();
        control.set_required(config.required);
        if let Some(placeholder) = &config.placeholder {
            control.set_placeholder(placeholder.clone());
        }
        control.set_preserve_scroll_position(config.preserve_scroll_position);
        if !config.options.is_empty() {
            control.set_options(Some(config.options.clone()));
        }
        control
    }

    pub(crate) fn from_inner(inner: Rc<ControlInner<W>>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Space-joined ids of the elements describing this control
    pub fn described_by(&self) -> String {
        self.inner.described_by.borrow().clone()
    }

    pub fn set_described_by_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        *self.inner.described_by.borrow_mut() = joined;
    }

    pub fn placeholder(&self) -> Option<String> {
        self.inner.placeholder.borrow().clone()
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        *self.inner.placeholder.borrow_mut() = Some(placeholder.into());
        self.inner.state_changes.notify();
    }

    /// Unset the placeholder
    pub fn clear_placeholder(&self) {
        *self.inner.placeholder.borrow_mut() = None;
        self.inner.state_changes.notify();
    }

    pub fn required(&self) -> bool {
        self.inner.required.get()
    }

    pub fn set_required(&self, required: bool) {
        self.inner.required.set(required);
        self.inner.state_changes.notify();
    }

    pub fn disabled(&self) -> bool {
        self.inner.disabled.get()
    }

    /// Set the disabled flag without touching the widget
    ///
    /// Hosts going through the value-accessor protocol use
    /// [`set_disabled_state`](Self::set_disabled_state), which also makes
    /// the widget read-only.
    pub fn set_disabled(&self, disabled: bool) {
        self.inner.disabled.set(disabled);
        self.inner.state_changes.notify();
    }

    pub fn focused(&self) -> bool {
        self.inner.focused.get()
    }

    pub fn set_focused(&self, focused: bool) {
        self.inner.focused.set(focused);
        self.inner.state_changes.notify();
    }

    pub fn empty(&self) -> bool {
        self.inner.value.borrow().is_empty()
    }

    pub fn should_label_float(&self) -> bool {
        self.focused() || !self.empty()
    }

    /// Touched and invalid, according to the attached validation context
    pub fn error_state(&self) -> bool {
        self.inner
            .validation
            .borrow()
            .as_ref()
            .is_some_and(|ctx| !ctx.pristine() && !ctx.valid())
    }

    /// Attach (or detach) the host's validation state
    pub fn set_validation_context(&self, context: Option<Rc<dyn ValidationContext>>) {
        *self.inner.validation.borrow_mut() = context;
    }

    /// Classes the chrome should apply to the host element
    pub fn host_classes(&self) -> SmallVec<[&'static str; 2]> {
        let mut classes = SmallVec::new();
        classes.push(CONTROL_TYPE);
        if self.should_label_float() {
            classes.push(FLOATING_CLASS);
        }
        classes
    }

    pub fn preserve_scroll_position(&self) -> bool {
        self.inner.preserve_scroll_position.get()
    }

    pub fn set_preserve_scroll_position(&self, preserve: bool) {
        self.inner.preserve_scroll_position.set(preserve);
    }

    /// Fires on every placeholder/required/disabled/focused/value write
    pub fn state_changes(&self) -> &EventEmitter<()> {
        &self.inner.state_changes
    }

    /// Cursor or selection moved in the widget
    pub fn cursor_activity(&self) -> &EventEmitter<CursorActivity> {
        &self.inner.cursor_activity
    }

    /// Widget gained (`true`) or lost (`false`) focus
    pub fn focus_change(&self) -> &EventEmitter<bool> {
        &self.inner.focus_change
    }

    /// Widget viewport scrolled
    pub fn scroll(&self) -> &EventEmitter<ScrollInfo> {
        &self.inner.scroll
    }
}

impl<W: EditorWidget> Default for EditorFieldControl<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: EditorWidget> ValueAccessor for EditorFieldControl<W> {
    fn write_value(&self, value: Option<&str>) {
        Self::write_value(self, value)
    }

    fn register_on_change(&self, callback: ChangeCallback) {
        Self::register_on_change(self, callback)
    }

    fn register_on_touched(&self, callback: TouchedCallback) {
        Self::register_on_touched(self, callback)
    }

    fn set_disabled_state(&self, disabled: bool) {
        Self::set_disabled_state(self, disabled)
    }
}

impl<W: EditorWidget> FormFieldControl for EditorFieldControl<W> {
    fn id(&self) -> &str {
        Self::id(self)
    }

    fn placeholder(&self) -> Option<String> {
        Self::placeholder(self)
    }

    fn required(&self) -> bool {
        Self::required(self)
    }

    fn disabled(&self) -> bool {
        Self::disabled(self)
    }

    fn focused(&self) -> bool {
        Self::focused(self)
    }

    fn empty(&self) -> bool {
        Self::empty(self)
    }

    fn error_state(&self) -> bool {
        Self::error_state(self)
    }

    fn should_label_float(&self) -> bool {
        Self::should_label_float(self)
    }

    fn set_described_by_ids(&self, ids: &[String]) {
        Self::set_described_by_ids(self, ids)
    }

    fn on_container_click(&self) {
        // The editor takes pointer focus on its own
        tracing::trace!(id = %self.inner.id, "container click");
    }

    fn control_type(&self) -> &'static str {
        CONTROL_TYPE
    }

    fn state_changes(&self) -> &EventEmitter<()> {
        Self::state_changes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessEditor;
    use crate::validation::ValidationState;

    type Control = EditorFieldControl<HeadlessEditor>;

    fn count_notifications(control: &Control) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        control.state_changes().subscribe(move |_| c.set(c.get() + 1));
        count
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Control::new();
        let b = Control::new();
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("mirrorfield-"));
    }

    #[test]
    fn test_every_setter_notifies_even_without_change() {
        let control = Control::new();
        let count = count_notifications(&control);

        control.set_required(false);
        control.set_required(false);
        control.set_placeholder("SQL");
        control.set_placeholder("SQL");
        control.set_disabled(false);
        control.set_focused(false);

        assert_eq!(count.get(), 6);
    }

    #[test]
    fn test_clear_placeholder() {
        let control = Control::new();
        control.set_placeholder("SQL");
        let count = count_notifications(&control);

        control.clear_placeholder();

        assert_eq!(count.get(), 1);
        assert_eq!(FormFieldControl::placeholder(&control), None);
    }

    #[test]
    fn test_described_by_is_space_joined() {
        let control = Control::new();
        control.set_described_by_ids(["hint-1", "error-2"]);
        assert_eq!(control.described_by(), "hint-1 error-2");

        FormFieldControl::set_described_by_ids(&control, &["x".to_string()]);
        assert_eq!(control.described_by(), "x");

        control.set_described_by_ids(Vec::<String>::new());
        assert_eq!(control.described_by(), "");
    }

    #[test]
    fn test_label_float_truth_table() {
        let control = Control::new();
        for (focused, value, expected) in [
            (false, "", false),
            (true, "", true),
            (false, "x", true),
            (true, "x", true),
        ] {
            control.set_focused(focused);
            control.set_value(value);
            assert_eq!(control.empty(), value.is_empty());
            assert_eq!(control.should_label_float(), expected, "{focused} {value:?}");
        }
    }

    #[test]
    fn test_error_state_needs_dirty_and_invalid() {
        let control = Control::new();
        assert!(!control.error_state());

        let validation = Rc::new(ValidationState::new());
        control.set_validation_context(Some(validation.clone()));
        assert!(!control.error_state());

        validation.set_valid(false);
        assert!(!control.error_state(), "pristine values show no error");

        validation.mark_dirty();
        assert!(control.error_state());

        validation.set_valid(true);
        assert!(!control.error_state());

        validation.set_valid(false);
        control.set_validation_context(None);
        assert!(!control.error_state());
    }

    #[test]
    fn test_host_classes() {
        let control = Control::new();
        assert_eq!(control.host_classes().as_slice(), &["mirrorfield"]);
        control.set_focused(true);
        assert_eq!(control.host_classes().as_slice(), &["mirrorfield", "floating"]);
        assert_eq!(FormFieldControl::control_type(&control), "mirrorfield");
    }

    #[test]
    fn test_with_config() {
        let config = FieldConfig {
            placeholder: Some("Query".into()),
            required: true,
            preserve_scroll_position: true,
            ..Default::default()
        };
        let control = Control::with_config(&config);
        assert!(control.required());
        assert!(control.preserve_scroll_position());
        assert_eq!(control.placeholder().as_deref(), Some("Query"));
        assert!(control.options().is_none());
        assert_eq!(control.lifecycle_state(), LifecycleState::Unmounted);
    }
}
