//! Widget event types and dispatch
//!
//! The five events a wrapped editor widget reports, plus the dispatcher a
//! widget implementation uses to fan them out to its subscribers.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Kinds of events a widget can be subscribed to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetEventKind {
    /// Buffer content changed
    Change,
    /// Cursor or selection moved
    CursorActivity,
    /// Widget gained focus
    Focus,
    /// Widget lost focus
    Blur,
    /// Viewport scrolled
    Scroll,
}

impl WidgetEventKind {
    pub const ALL: [WidgetEventKind; 5] = [
        WidgetEventKind::Change,
        WidgetEventKind::CursorActivity,
        WidgetEventKind::Focus,
        WidgetEventKind::Blur,
        WidgetEventKind::Scroll,
    ];

    /// Event name as editor widgets spell it
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEventKind::Change => "change",
            WidgetEventKind::CursorActivity => "cursorActivity",
            WidgetEventKind::Focus => "focus",
            WidgetEventKind::Blur => "blur",
            WidgetEventKind::Scroll => "scroll",
        }
    }
}

/// Origin tag attached to a content change
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ChangeOrigin {
    /// Programmatic replacement of the whole buffer
    SetValue,
    /// Typed input
    #[default]
    Input,
    /// Backspace/delete
    Delete,
    Paste,
    Cut,
    Drag,
    Undo,
    Redo,
    /// IME composition
    Compose,
    /// Any tag the widget invents on its own
    Other(String),
}

impl ChangeOrigin {
    /// Parse a widget origin tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "setValue" => ChangeOrigin::SetValue,
            "+input" | "input" => ChangeOrigin::Input,
            "+delete" | "delete" => ChangeOrigin::Delete,
            "paste" => ChangeOrigin::Paste,
            "cut" => ChangeOrigin::Cut,
            "drag" => ChangeOrigin::Drag,
            "undo" => ChangeOrigin::Undo,
            "redo" => ChangeOrigin::Redo,
            "*compose" => ChangeOrigin::Compose,
            other => ChangeOrigin::Other(other.to_string()),
        }
    }

    /// The tag string for this origin
    pub fn tag(&self) -> &str {
        match self {
            ChangeOrigin::SetValue => "setValue",
            ChangeOrigin::Input => "+input",
            ChangeOrigin::Delete => "+delete",
            ChangeOrigin::Paste => "paste",
            ChangeOrigin::Cut => "cut",
            ChangeOrigin::Drag => "drag",
            ChangeOrigin::Undo => "undo",
            ChangeOrigin::Redo => "redo",
            ChangeOrigin::Compose => "*compose",
            ChangeOrigin::Other(tag) => tag,
        }
    }

    /// Whether the change replaced the whole buffer programmatically
    pub fn is_full_replace(&self) -> bool {
        matches!(self, ChangeOrigin::SetValue)
    }
}

/// Position in a multi-line buffer (line and column, both 0-based)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A single content change reported by the widget
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ContentChange {
    pub origin: ChangeOrigin,
    /// Start of the replaced range (pre-change coordinates)
    pub from: TextPosition,
    /// End of the replaced range (pre-change coordinates)
    pub to: TextPosition,
    /// Inserted text
    pub inserted: String,
    /// Removed text
    pub removed: String,
}

impl ContentChange {
    pub fn new(origin: ChangeOrigin) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }
}

/// Cursor/selection context passed through on cursor activity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CursorActivity {
    /// Where the cursor is
    pub head: TextPosition,
    /// Where the selection started (equal to `head` without a selection)
    pub anchor: TextPosition,
}

impl CursorActivity {
    pub fn at(position: TextPosition) -> Self {
        Self {
            head: position,
            anchor: position,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.head != self.anchor
    }
}

/// Scroll offsets and sizes of the widget viewport
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollInfo {
    pub left: f64,
    pub top: f64,
    /// Full content width
    pub width: f64,
    /// Full content height
    pub height: f64,
    /// Visible viewport width
    pub client_width: f64,
    /// Visible viewport height
    pub client_height: f64,
}

/// A widget event with its payload
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetEvent {
    Change(ContentChange),
    CursorActivity(CursorActivity),
    Focus,
    Blur,
    Scroll(ScrollInfo),
}

impl WidgetEvent {
    pub fn kind(&self) -> WidgetEventKind {
        match self {
            WidgetEvent::Change(_) => WidgetEventKind::Change,
            WidgetEvent::CursorActivity(_) => WidgetEventKind::CursorActivity,
            WidgetEvent::Focus => WidgetEventKind::Focus,
            WidgetEvent::Blur => WidgetEventKind::Blur,
            WidgetEvent::Scroll(_) => WidgetEventKind::Scroll,
        }
    }
}

/// Event handler function type
pub type WidgetEventHandler = Rc<dyn Fn(&WidgetEvent)>;

/// Handler registry keyed by event kind
///
/// Handlers may call back into the widget that dispatched them, so widgets
/// should take a [`snapshot`](EventDispatcher::snapshot) and release any
/// borrow of the dispatcher before invoking it.
pub struct EventDispatcher {
    handlers: FxHashMap<WidgetEventKind, SmallVec<[WidgetEventHandler; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register a handler for an event kind
    pub fn register<F>(&mut self, kind: WidgetEventKind, handler: F)
    where
        F: Fn(&WidgetEvent) + 'static,
    {
        self.handlers.entry(kind).or_default().push(Rc::new(handler));
    }

    /// Clone out the handlers currently registered for an event kind
    pub fn snapshot(&self, kind: WidgetEventKind) -> SmallVec<[WidgetEventHandler; 2]> {
        self.handlers.get(&kind).cloned().unwrap_or_default()
    }

    /// Dispatch an event to all registered handlers
    pub fn dispatch(&self, event: &WidgetEvent) {
        for handler in self.snapshot(event.kind()) {
            handler(event);
        }
    }

    /// Number of handlers registered for an event kind
    pub fn count(&self, kind: WidgetEventKind) -> usize {
        self.handlers.get(&kind).map_or(0, |h| h.len())
    }

    /// Drop every handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(|h| h.is_empty())
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
