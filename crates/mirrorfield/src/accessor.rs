//! Host protocols
//!
//! [`ValueAccessor`] is how a host form model exchanges a value and
//! touched/disabled state with a control. [`FormFieldControl`] is what the
//! surrounding label/outline chrome reads to render itself.

use std::rc::Rc;

use mirrorfield_core::EventEmitter;

/// Called with the control's value whenever it should flow back to the host
pub type ChangeCallback = Rc<dyn Fn(&str)>;

/// Called whenever the control was interacted with
pub type TouchedCallback = Rc<dyn Fn()>;

/// Value exchange between a host form model and a control
pub trait ValueAccessor {
    /// Push a value from the host into the control. `None` is ignored.
    fn write_value(&self, value: Option<&str>);

    /// Replace the callback receiving values from the control
    fn register_on_change(&self, callback: ChangeCallback);

    /// Replace the callback receiving touched notifications
    fn register_on_touched(&self, callback: TouchedCallback);

    fn set_disabled_state(&self, disabled: bool);
}

/// Contract between a control and its form-field chrome
pub trait FormFieldControl {
    fn id(&self) -> &str;

    fn placeholder(&self) -> Option<String>;

    fn required(&self) -> bool;

    fn disabled(&self) -> bool;

    fn focused(&self) -> bool;

    fn empty(&self) -> bool;

    fn error_state(&self) -> bool;

    fn should_label_float(&self) -> bool;

    /// Replace the ids of the elements describing this control
    fn set_described_by_ids(&self, ids: &[String]);

    /// The chrome around the control was clicked
    fn on_container_click(&self) {}

    /// Kind of control, for styling by the chrome
    fn control_type(&self) -> &'static str;

    /// Fires whenever the chrome should re-read the state above
    fn state_changes(&self) -> &EventEmitter<()>;
}
