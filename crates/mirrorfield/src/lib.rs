//! mirrorfield
//!
//! A form-field control wrapping an external, stateful code editor widget.
//!
//! [`EditorFieldControl`] sits between three things that all change on
//! their own: the host form's value, the editor widget's buffer, and a
//! reconfigurable map of editor options. It speaks two host protocols:
//!
//! - [`ValueAccessor`]: value writes in, change/touched callbacks out
//! - [`FormFieldControl`]: placeholder/required/disabled/focused/empty/error
//!   state plus a state-changed stream for the surrounding label chrome
//!
//! The widget itself is anything implementing [`EditorWidget`]. The crate
//! ships [`HeadlessEditor`], an in-memory widget useful for tests and
//! demos.
//!
//! # Example
//!
//! ```rust
//! use mirrorfield::{EditorFieldControl, FieldConfig, HeadlessEditor, ValueAccessor};
//!
//! let config = FieldConfig::from_toml_str(r#"
//!     name = "query"
//!
//!     [options]
//!     lineWrapping = true
//! "#).unwrap();
//!
//! let control = EditorFieldControl::<HeadlessEditor>::with_config(&config);
//! control.write_value(Some("hello"));
//! control.after_view_init(Some(config.anchor())).unwrap();
//!
//! let widget = control.widget().unwrap();
//! assert_eq!(widget.content(), "hello");
//! assert!(!control.show_line_numbers());
//! ```

pub mod accessor;
pub mod config;
pub mod control;
pub mod error;
pub mod headless;
pub mod validation;
pub mod widget;

pub use accessor::{ChangeCallback, FormFieldControl, TouchedCallback, ValueAccessor};
pub use config::{parse_options, FieldConfig};
pub use control::{normalize_line_endings, EditorFieldControl, LINE_NUMBERS_OPTION, READ_ONLY_OPTION};
pub use error::{FieldError, WidgetError};
pub use headless::{HeadlessEditor, Journal};
pub use validation::{ValidationContext, ValidationState};
pub use widget::{EditorWidget, TextAreaAnchor};

pub use mirrorfield_core::{
    ChangeOrigin, ContentChange, CursorActivity, EditorOptions, EventEmitter, LifecycleState,
    OptionValue, OptionsDiff, ScrollInfo, TextPosition, WidgetEvent, WidgetEventKind,
};
