//! Headless editor widget
//!
//! An in-memory [`EditorWidget`] for tests, demos and server-side use. It
//! keeps a plain string buffer, a cursor, a scroll position derived from a
//! fixed line height, and an option map. It behaves like a real editor
//! where the control cares:
//!
//! - `set_value` fires a `change` event tagged `SetValue` synchronously and
//!   resets the scroll position to the top
//! - `scroll_to` clamps to the content and fires `scroll` when it moved
//! - `revert_to_anchor` writes the buffer back into the anchor
//!
//! Simulated user input (`type_text`, `focus`, `blur`, ...) fires the same
//! events a user would cause. Every call made by a control is recorded in
//! a [`Journal`].

use std::cell::{Cell, Ref, RefCell};

use mirrorfield_core::{
    ChangeOrigin, ContentChange, CursorActivity, EditorOptions, EventDispatcher, OptionValue,
    ScrollInfo, TextPosition, WidgetEvent, WidgetEventHandler, WidgetEventKind,
};

use crate::control::{LINE_NUMBERS_OPTION, READ_ONLY_OPTION};
use crate::error::WidgetError;
use crate::widget::{EditorWidget, TextAreaAnchor};

/// Height of one line in the headless viewport
pub const LINE_HEIGHT: f64 = 16.0;
/// Width of one character in the headless viewport
pub const CHAR_WIDTH: f64 = 8.0;
/// Visible viewport size
pub const VIEWPORT: (f64, f64) = (640.0, 320.0);

/// Options the editor only accepts as booleans
const BOOLEAN_OPTIONS: [&str; 3] = [READ_ONLY_OPTION, LINE_NUMBERS_OPTION, "lineWrapping"];

/// Calls a control made on a headless widget
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Journal {
    pub set_value: Vec<String>,
    pub set_option: Vec<(String, OptionValue)>,
    pub scroll_to: Vec<(f64, f64)>,
}

impl Journal {
    /// Keys passed to `set_option`, in call order
    pub fn option_keys(&self) -> Vec<&str> {
        self.set_option.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// In-memory editor widget
pub struct HeadlessEditor {
    /// The anchor, held while the editor is mounted on it
    anchor: RefCell<Option<TextAreaAnchor>>,
    buffer: RefCell<String>,
    options: RefCell<EditorOptions>,
    cursor: Cell<CursorActivity>,
    scroll: Cell<(f64, f64)>,
    focused: Cell<bool>,
    dispatcher: RefCell<EventDispatcher>,
    journal: RefCell<Journal>,
}

impl HeadlessEditor {
    /// The buffer content
    pub fn content(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    pub fn cursor(&self) -> CursorActivity {
        self.cursor.get()
    }

    /// Snapshot of every option the widget holds
    pub fn options(&self) -> EditorOptions {
        self.options.borrow().clone()
    }

    pub fn journal(&self) -> Ref<'_, Journal> {
        self.journal.borrow()
    }

    pub fn clear_journal(&self) {
        *self.journal.borrow_mut() = Journal::default();
    }

    pub fn handler_count(&self, kind: WidgetEventKind) -> usize {
        self.dispatcher.borrow().count(kind)
    }

    /// Type text at the end of the buffer, as a user would
    pub fn type_text(&self, text: &str) {
        self.edit(ChangeOrigin::Input, |buffer| {
            buffer.push_str(text);
        });
    }

    /// Delete the last `count` characters, as a user would
    pub fn delete_backward(&self, count: usize) {
        self.edit(ChangeOrigin::Delete, |buffer| {
            for _ in 0..count {
                if buffer.pop().is_none() {
                    break;
                }
            }
        });
    }

    /// Replace the whole buffer with an arbitrary origin tag
    pub fn replace_all(&self, origin: ChangeOrigin, text: &str) {
        self.edit(origin, |buffer| {
            buffer.clear();
            buffer.push_str(text);
        });
    }

    /// Move the cursor, collapsing any selection
    pub fn move_cursor(&self, position: TextPosition) {
        self.cursor.set(CursorActivity::at(position));
        self.emit(WidgetEvent::CursorActivity(self.cursor.get()));
    }

    /// Select from `anchor` to `head`
    pub fn select(&self, anchor: TextPosition, head: TextPosition) {
        self.cursor.set(CursorActivity { head, anchor });
        self.emit(WidgetEvent::CursorActivity(self.cursor.get()));
    }

    pub fn focus(&self) {
        if !self.focused.replace(true) {
            self.emit(WidgetEvent::Focus);
        }
    }

    pub fn blur(&self) {
        if self.focused.replace(false) {
            self.emit(WidgetEvent::Blur);
        }
    }

    /// Scroll relative to the current position, as a user would
    pub fn scroll_by(&self, dx: f64, dy: f64) {
        let (left, top) = self.scroll.get();
        self.move_viewport(left + dx, top + dy);
    }

    fn edit(&self, origin: ChangeOrigin, apply: impl FnOnce(&mut String)) {
        let (removed, inserted, from, to) = {
            let mut buffer = self.buffer.borrow_mut();
            let before = buffer.clone();
            apply(&mut *buffer);
            let after: &str = &buffer;
            let common = common_prefix(&before, after);
            (
                before[common..].to_string(),
                after[common..].to_string(),
                position_of(&before, common),
                end_position(&before),
            )
        };
        let end = end_position(&self.buffer.borrow());
        self.cursor.set(CursorActivity::at(end));

        self.emit(WidgetEvent::Change(ContentChange {
            origin,
            from,
            to,
            inserted,
            removed,
        }));
        self.emit(WidgetEvent::CursorActivity(self.cursor.get()));
    }

    fn move_viewport(&self, left: f64, top: f64) {
        let info = self.scroll_info();
        let max_left = (info.width - info.client_width).max(0.0);
        let max_top = (info.height - info.client_height).max(0.0);
        let next = (left.clamp(0.0, max_left), top.clamp(0.0, max_top));
        if next != self.scroll.get() {
            self.scroll.set(next);
            self.emit(WidgetEvent::Scroll(self.scroll_info()));
        }
    }

    /// Dispatch with no borrow of the widget held
    fn emit(&self, event: WidgetEvent) {
        let handlers = self.dispatcher.borrow().snapshot(event.kind());
        for handler in handlers {
            handler(&event);
        }
    }
}

impl EditorWidget for HeadlessEditor {
    type Anchor = TextAreaAnchor;

    fn from_anchor(mut anchor: TextAreaAnchor, options: &EditorOptions) -> Result<Self, WidgetError> {
        if anchor.augmented {
            return Err(WidgetError::AnchorRejected(format!(
                "`{}` already hosts an editor",
                anchor.name
            )));
        }
        for key in BOOLEAN_OPTIONS {
            match options.get(key) {
                None | Some(OptionValue::Bool(_)) => {}
                Some(other) => {
                    return Err(WidgetError::InvalidOption {
                        key: key.to_string(),
                        reason: format!("expected a boolean, got {other}"),
                    });
                }
            }
        }
        anchor.augmented = true;
        let buffer = anchor.value.clone();
        let focused = anchor.autofocus;

        Ok(Self {
            anchor: RefCell::new(Some(anchor)),
            buffer: RefCell::new(buffer),
            options: RefCell::new(options.clone()),
            cursor: Cell::new(CursorActivity::default()),
            scroll: Cell::new((0.0, 0.0)),
            focused: Cell::new(focused),
            dispatcher: RefCell::new(EventDispatcher::new()),
            journal: RefCell::new(Journal::default()),
        })
    }

    fn value(&self) -> String {
        self.content()
    }

    fn set_value(&self, value: &str) {
        self.journal.borrow_mut().set_value.push(value.to_string());
        let removed = std::mem::replace(&mut *self.buffer.borrow_mut(), value.to_string());
        self.cursor.set(CursorActivity::default());
        self.scroll.set((0.0, 0.0));

        self.emit(WidgetEvent::Change(ContentChange {
            origin: ChangeOrigin::SetValue,
            from: TextPosition::default(),
            to: end_position(&removed),
            inserted: value.to_string(),
            removed,
        }));
    }

    fn option(&self, key: &str) -> Option<OptionValue> {
        self.options.borrow().get(key).cloned()
    }

    fn set_option(&self, key: &str, value: OptionValue) {
        self.journal
            .borrow_mut()
            .set_option
            .push((key.to_string(), value.clone()));
        self.options.borrow_mut().insert(key.to_string(), value);
    }

    fn scroll_info(&self) -> ScrollInfo {
        let buffer = self.buffer.borrow();
        let lines = buffer.split('\n').count() as f64;
        let longest = buffer
            .split('\n')
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as f64;
        let (left, top) = self.scroll.get();
        ScrollInfo {
            left,
            top,
            width: (longest * CHAR_WIDTH).max(VIEWPORT.0),
            height: (lines * LINE_HEIGHT).max(VIEWPORT.1),
            client_width: VIEWPORT.0,
            client_height: VIEWPORT.1,
        }
    }

    fn scroll_to(&self, left: f64, top: f64) {
        self.journal.borrow_mut().scroll_to.push((left, top));
        self.move_viewport(left, top);
    }

    fn on(&self, kind: WidgetEventKind, handler: WidgetEventHandler) {
        self.dispatcher
            .borrow_mut()
            .register(kind, move |event| handler(event));
    }

    fn revert_to_anchor(&self) -> Option<TextAreaAnchor> {
        let mut anchor = self.anchor.borrow_mut().take()?;
        anchor.value = self.content();
        anchor.augmented = false;
        self.dispatcher.borrow_mut().clear();
        Some(anchor)
    }
}

fn common_prefix(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

fn position_of(text: &str, byte: usize) -> TextPosition {
    let before = &text[..byte];
    let line = before.matches('\n').count();
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count());
    TextPosition::new(line, column)
}

fn end_position(text: &str) -> TextPosition {
    position_of(text, text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::rc::Rc;

    fn mount(value: &str) -> HeadlessEditor {
        HeadlessEditor::from_anchor(TextAreaAnchor::new("t").value(value), &EditorOptions::new())
            .unwrap()
    }

    fn record(editor: &HeadlessEditor) -> Rc<RefCell<Vec<WidgetEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        for kind in WidgetEventKind::ALL {
            let log = seen.clone();
            editor.on(kind, Rc::new(move |e: &WidgetEvent| log.borrow_mut().push(e.clone())));
        }
        seen
    }

    #[test]
    fn test_created_from_anchor_content() {
        let editor = mount("select 1");
        assert_eq!(editor.value(), "select 1");
    }

    #[test]
    fn test_augmented_anchor_rejected() {
        let mut anchor = TextAreaAnchor::new("busy");
        anchor.augmented = true;
        let result = HeadlessEditor::from_anchor(anchor, &EditorOptions::new());
        assert!(matches!(result, Err(WidgetError::AnchorRejected(_))));
    }

    #[test]
    fn test_non_boolean_flag_rejected() {
        let mut options = EditorOptions::new();
        options.insert(READ_ONLY_OPTION.to_string(), json!("yes"));
        let result = HeadlessEditor::from_anchor(TextAreaAnchor::new("t"), &options);
        assert_eq!(
            result.err(),
            Some(WidgetError::InvalidOption {
                key: READ_ONLY_OPTION.to_string(),
                reason: "expected a boolean, got \"yes\"".to_string(),
            })
        );

        options.insert(READ_ONLY_OPTION.to_string(), json!(true));
        options.insert("tabSize".to_string(), json!("4"));
        assert!(HeadlessEditor::from_anchor(TextAreaAnchor::new("t"), &options).is_ok());
    }

    #[test]
    fn test_set_value_fires_programmatic_change() {
        let editor = mount("old");
        let seen = record(&editor);

        editor.set_value("new");

        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        match &events[0] {
            WidgetEvent::Change(change) => {
                assert_eq!(change.origin, ChangeOrigin::SetValue);
                assert_eq!(change.removed, "old");
                assert_eq!(change.inserted, "new");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(editor.journal().set_value, vec!["new".to_string()]);
    }

    #[test]
    fn test_typing_fires_input_change_then_cursor() {
        let editor = mount("ab");
        let seen = record(&editor);

        editor.type_text("c\nd");

        let events = seen.borrow();
        assert_eq!(events.len(), 2);
        match &events[0] {
            WidgetEvent::Change(change) => {
                assert_eq!(change.origin, ChangeOrigin::Input);
                assert_eq!(change.inserted, "c\nd");
                assert_eq!(change.from, TextPosition::new(0, 2));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(
            events[1],
            WidgetEvent::CursorActivity(CursorActivity::at(TextPosition::new(1, 1)))
        );
        assert_eq!(editor.content(), "abc\nd");
    }

    #[test]
    fn test_delete_backward() {
        let editor = mount("abc");
        editor.delete_backward(2);
        assert_eq!(editor.content(), "a");
        editor.delete_backward(5);
        assert_eq!(editor.content(), "");
    }

    #[test]
    fn test_scroll_clamps_and_fires_once_per_move() {
        let editor = mount(&"line\n".repeat(100));
        let seen = record(&editor);

        editor.scroll_to(0.0, 400.0);
        editor.scroll_to(0.0, 400.0);
        editor.scroll_to(0.0, 1.0e9);

        let info = editor.scroll_info();
        assert_eq!(info.top, info.height - info.client_height);
        assert_eq!(seen.borrow().len(), 2);

        // Short content cannot scroll at all
        let short = mount("x");
        short.scroll_by(10.0, 10.0);
        assert_eq!(short.scroll_info().top, 0.0);
    }

    #[test]
    fn test_focus_and_blur_fire_on_change_only() {
        let editor = mount("");
        let seen = record(&editor);

        editor.focus();
        editor.focus();
        editor.blur();
        editor.blur();

        assert_eq!(*seen.borrow(), vec![WidgetEvent::Focus, WidgetEvent::Blur]);
    }

    #[test]
    fn test_options_recorded() {
        let editor = mount("");
        editor.set_option("mode", json!("sql"));
        assert_eq!(editor.option("mode"), Some(json!("sql")));
        assert_eq!(editor.journal().option_keys(), vec!["mode"]);
        editor.clear_journal();
        assert!(editor.journal().set_option.is_empty());
    }

    #[test]
    fn test_revert_restores_anchor_once() {
        let editor = mount("draft");
        let _seen = record(&editor);
        editor.type_text("!");

        let anchor = editor.revert_to_anchor().unwrap();
        assert_eq!(anchor.value, "draft!");
        assert!(!anchor.augmented);
        assert_eq!(editor.handler_count(WidgetEventKind::Change), 0);
        assert!(editor.revert_to_anchor().is_none());
    }
}
