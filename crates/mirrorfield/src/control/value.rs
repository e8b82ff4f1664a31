//! Value bridge
//!
//! Host writes go through [`EditorFieldControl::write_value`], widget edits
//! come back through `handle_widget_change`. A widget reports its own
//! programmatic `set_value` as a change tagged `SetValue`; those are dropped
//! so a host write is never echoed back to the host as if the user typed it.

use std::borrow::Cow;

use mirrorfield_core::{ContentChange, OptionValue};

use super::{EditorFieldControl, LINE_NUMBERS_OPTION, READ_ONLY_OPTION};
use crate::accessor::{ChangeCallback, TouchedCallback};
use crate::widget::EditorWidget;

/// Fold `\r\n` and lone `\r` into `\n`
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

impl<W: EditorWidget> EditorFieldControl<W> {
    /// The stored value
    pub fn value(&self) -> String {
        self.inner.value.borrow().clone()
    }

    /// Update the stored value
    ///
    /// Recomputes line numbering and notifies state listeners. The widget
    /// buffer is left alone; use [`write_value`](Self::write_value) to sync it.
    pub fn set_value(&self, value: impl Into<String>) {
        *self.inner.value.borrow_mut() = value.into();
        self.update_line_numbers();
        self.inner.state_changes.notify();
    }

    /// Whether the stored value spans several lines
    pub fn show_line_numbers(&self) -> bool {
        self.inner.show_line_numbers.get()
    }

    /// Push a value from the host into the control
    pub fn write_value(&self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };

        let Some(widget) = self.widget() else {
            tracing::trace!(id = %self.inner.id, "no widget yet, storing value");
            self.set_value(value);
            return;
        };

        let current = widget.value();
        if normalize_line_endings(&current) != normalize_line_endings(value) {
            self.set_value(value);
            // A state listener may have torn the control down
            if self.widget().is_none() {
                tracing::trace!(id = %self.inner.id, "destroyed during write, widget left alone");
                return;
            }
            if self.preserve_scroll_position() {
                let previous = widget.scroll_info();
                widget.set_value(value);
                widget.scroll_to(previous.left, previous.top);
            } else {
                widget.set_value(value);
            }
            return;
        }

        // Same text: acknowledge without touching the widget
        let resolved = self.value();
        self.notify_change(&resolved);
    }

    pub fn register_on_change(&self, callback: ChangeCallback) {
        *self.inner.on_change.borrow_mut() = callback;
    }

    pub fn register_on_touched(&self, callback: TouchedCallback) {
        *self.inner.on_touched.borrow_mut() = callback;
    }

    /// Set the disabled flag and make the widget read-only to match
    ///
    /// Before mount only the flag is stored; mounting a disabled control
    /// makes the new widget read-only.
    pub fn set_disabled_state(&self, disabled: bool) {
        self.set_disabled(disabled);
        self.apply_option(READ_ONLY_OPTION, OptionValue::Bool(disabled));
    }

    pub(crate) fn handle_widget_change(&self, change: &ContentChange) {
        if change.origin.is_full_replace() {
            tracing::trace!(id = %self.inner.id, "ignoring programmatic replace");
            return;
        }
        let Some(widget) = self.widget() else {
            return;
        };
        let content = widget.value();
        self.set_value(content.clone());
        self.notify_change(&content);
    }

    pub(crate) fn notify_touched(&self) {
        let callback = self.inner.on_touched.borrow().clone();
        callback();
    }

    pub(crate) fn update_line_numbers(&self) {
        let show = self.inner.value.borrow().contains('\n');
        self.inner.show_line_numbers.set(show);
        self.apply_option(LINE_NUMBERS_OPTION, OptionValue::Bool(show));
    }

    fn notify_change(&self, value: &str) {
        let callback = self.inner.on_change.borrow().clone();
        callback(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
        assert_eq!(normalize_line_endings("\r\r\n"), "\n\n");
    }
}
