//! mirrorfield core
//!
//! Framework-agnostic primitives used by the mirrorfield editor control:
//!
//! - **Widget Events**: change/cursor/focus/blur/scroll events emitted by a wrapped editor
//! - **Emitters**: payload-carrying broadcast channels with an explicit completion step
//! - **State Machines**: small transition tables for control lifecycles
//! - **Options**: opaque editor option maps and the key-level differ used to reconcile them
//!
//! # Example
//!
//! ```rust
//! use mirrorfield_core::options::{diff_options, EditorOptions};
//! use serde_json::json;
//!
//! let mut before = EditorOptions::new();
//! before.insert("lineWrapping".into(), json!(false));
//! before.insert("tabSize".into(), json!(4));
//!
//! let mut after = before.clone();
//! after.insert("lineWrapping".into(), json!(true));
//! after.shift_remove("tabSize");
//! after.insert("mode".into(), json!("markdown"));
//!
//! let diff = diff_options(&before, &after);
//! assert_eq!(diff.changed.len(), 1);
//! assert_eq!(diff.added.len(), 1);
//! assert_eq!(diff.removed.len(), 1);
//! ```

pub mod emitter;
pub mod events;
pub mod fsm;
pub mod id;
pub mod lifecycle;
pub mod options;

pub use emitter::{EventEmitter, SubscriptionId};
pub use events::{
    ChangeOrigin, ContentChange, CursorActivity, EventDispatcher, ScrollInfo, TextPosition,
    WidgetEvent, WidgetEventHandler, WidgetEventKind,
};
pub use fsm::{StateMachine, Transition};
pub use lifecycle::{LifecycleEvent, LifecycleState};
pub use options::{diff_options, EditorOptions, OptionRecord, OptionValue, OptionsDiff, OptionsDiffer};
