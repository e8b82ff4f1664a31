//! Widget lifecycle
//!
//! The widget is created once, when the view hands over an anchor element,
//! and reverted once, on teardown. Event handlers installed on the widget
//! hold a weak reference to the control and go quiet after teardown.

use std::rc::{Rc, Weak};

use mirrorfield_core::{
    LifecycleEvent, LifecycleState, OptionValue, WidgetEvent, WidgetEventHandler, WidgetEventKind,
};

use super::{ControlInner, EditorFieldControl, READ_ONLY_OPTION};
use crate::error::FieldError;
use crate::widget::EditorWidget;

impl<W: EditorWidget> EditorFieldControl<W> {
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.inner.lifecycle.borrow().current_state()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.lifecycle.borrow().is_in(LifecycleState::Mounted)
    }

    /// The live widget, if mounted
    pub fn widget(&self) -> Option<Rc<W>> {
        self.inner.widget.borrow().clone()
    }

    /// Take the anchor handed back by the widget on teardown
    pub fn take_anchor(&self) -> Option<W::Anchor> {
        self.inner.restored_anchor.borrow_mut().take()
    }

    /// Create the widget once the view has an anchor for it
    ///
    /// Only the first call with an anchor does anything. Without an anchor
    /// the control stays unmounted and keeps storing writes. If the widget
    /// rejects the anchor the control stays unmounted as well.
    pub fn after_view_init(&self, anchor: Option<W::Anchor>) -> Result<(), FieldError> {
        if !self.inner.lifecycle.borrow().can_send(LifecycleEvent::Mount) {
            tracing::debug!(id = %self.inner.id, state = ?self.lifecycle_state(), "mount ignored");
            return Ok(());
        }
        let Some(anchor) = anchor else {
            tracing::debug!(id = %self.inner.id, "no anchor, staying unmounted");
            return Ok(());
        };

        let options = self.options().unwrap_or_default();
        let widget = match W::from_anchor(anchor, &options) {
            Ok(widget) => Rc::new(widget),
            Err(err) => {
                tracing::warn!(id = %self.inner.id, %err, "widget creation failed");
                return Err(err.into());
            }
        };

        *self.inner.widget.borrow_mut() = Some(widget.clone());
        self.inner.lifecycle.borrow_mut().send(LifecycleEvent::Mount);
        tracing::debug!(id = %self.inner.id, options = options.len(), "widget mounted");

        self.update_line_numbers();
        if self.disabled() {
            widget.set_option(READ_ONLY_OPTION, OptionValue::Bool(true));
        }
        self.wire_events(&widget);

        let value = self.value();
        self.write_value(Some(&value));
        Ok(())
    }

    /// Tear the control down
    ///
    /// Reverts the widget to its anchor, releases it, and closes the
    /// state-changed stream last. Later calls do nothing. Safe to call from
    /// inside a widget event handler.
    pub fn destroy(&self) {
        if self.lifecycle_state() == LifecycleState::Destroyed {
            return;
        }
        self.inner.lifecycle.borrow_mut().send(LifecycleEvent::Destroy);

        let widget = self.inner.widget.borrow_mut().take();
        if let Some(widget) = widget {
            let anchor = widget.revert_to_anchor();
            *self.inner.restored_anchor.borrow_mut() = anchor;
        }

        self.inner.state_changes.complete();
        tracing::debug!(id = %self.inner.id, "field control destroyed");
    }

    fn wire_events(&self, widget: &W) {
        let weak = Rc::downgrade(&self.inner);

        widget.on(
            WidgetEventKind::Change,
            route(&weak, |control, event| {
                if let WidgetEvent::Change(change) = event {
                    control.handle_widget_change(change);
                }
            }),
        );
        widget.on(
            WidgetEventKind::CursorActivity,
            route(&weak, |control, event| {
                if let WidgetEvent::CursorActivity(activity) = event {
                    control.inner.cursor_activity.emit(activity);
                }
            }),
        );
        widget.on(
            WidgetEventKind::Focus,
            route(&weak, |control, _| control.handle_focus_change(true)),
        );
        widget.on(
            WidgetEventKind::Blur,
            route(&weak, |control, _| control.handle_focus_change(false)),
        );
        widget.on(
            WidgetEventKind::Scroll,
            route(&weak, |control, event| {
                if let WidgetEvent::Scroll(info) = event {
                    control.inner.scroll.emit(info);
                }
            }),
        );
    }

    fn handle_focus_change(&self, focused: bool) {
        self.set_focused(focused);
        // A state listener may have torn the control down
        if !self.is_mounted() {
            return;
        }
        self.notify_touched();
        self.inner.focus_change.emit(&focused);
    }
}

/// Wrap a control callback as a widget event handler
///
/// The handler does nothing once the control is gone or torn down.
fn route<W, F>(weak: &Weak<ControlInner<W>>, f: F) -> WidgetEventHandler
where
    W: EditorWidget,
    F: Fn(&EditorFieldControl<W>, &WidgetEvent) + 'static,
{
    let weak = weak.clone();
    Rc::new(move |event: &WidgetEvent| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let control = EditorFieldControl::from_inner(inner);
        if !control.is_mounted() {
            tracing::trace!(id = %control.id(), kind = event.kind().name(), "event after teardown");
            return;
        }
        f(&control, event);
    })
}
