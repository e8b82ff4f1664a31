//! The editor widget seam
//!
//! [`EditorWidget`] is the narrow surface the control consumes from an
//! external editor: create from an anchor element, read/write the buffer,
//! read/write options, read/restore scroll, subscribe to events, and revert
//! back to the plain anchor.
//!
//! Every method takes `&self`. Widgets are expected to use interior
//! mutability and must release their own borrows before invoking event
//! handlers, because handlers call straight back into the widget (a change
//! handler reads the buffer, a focus handler may tear the control down).

use mirrorfield_core::{EditorOptions, OptionValue, ScrollInfo, WidgetEventHandler, WidgetEventKind};

use crate::error::WidgetError;

/// An external, stateful text-editing widget
pub trait EditorWidget: 'static {
    /// The plain element the widget is created from and reverts to
    type Anchor: 'static;

    /// Create a widget on top of `anchor`, configured with `options`
    fn from_anchor(anchor: Self::Anchor, options: &EditorOptions) -> Result<Self, WidgetError>
    where
        Self: Sized;

    /// Current buffer content
    fn value(&self) -> String;

    /// Replace the whole buffer. Widgets report the resulting change event
    /// with [`ChangeOrigin::SetValue`](mirrorfield_core::ChangeOrigin::SetValue).
    fn set_value(&self, value: &str);

    fn option(&self, key: &str) -> Option<OptionValue>;

    fn set_option(&self, key: &str, value: OptionValue);

    fn scroll_info(&self) -> ScrollInfo;

    /// Jump to a scroll offset, no animation
    fn scroll_to(&self, left: f64, top: f64);

    /// Subscribe a handler to one event kind
    fn on(&self, kind: WidgetEventKind, handler: WidgetEventHandler);

    /// Undo whatever creation did to the anchor and hand it back
    ///
    /// Returns `None` if the widget was already reverted.
    fn revert_to_anchor(&self) -> Option<Self::Anchor>;
}

/// A plain multi-line text input element
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TextAreaAnchor {
    /// `name` attribute
    pub name: String,
    /// Class applied to the element
    pub class_name: String,
    pub autofocus: bool,
    /// Text held by the element itself
    pub value: String,
    /// Whether an editor is currently mounted on this element
    pub augmented: bool,
}

impl TextAreaAnchor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}
