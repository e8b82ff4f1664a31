//! Validation context seen by the control
//!
//! The control only needs two answers from the host form model to decide
//! whether to show an error: has the user touched the value, and is it
//! valid. A control without a context never reports an error.

use std::cell::Cell;

/// What the control asks of the host's validation state
pub trait ValidationContext {
    /// Whether the value is still untouched by the user
    fn pristine(&self) -> bool;

    /// Whether the value currently passes validation
    fn valid(&self) -> bool;
}

/// A minimal mutable validation context
#[derive(Debug)]
pub struct ValidationState {
    pristine: Cell<bool>,
    valid: Cell<bool>,
}

impl ValidationState {
    /// Pristine and valid
    pub fn new() -> Self {
        Self {
            pristine: Cell::new(true),
            valid: Cell::new(true),
        }
    }

    pub fn mark_dirty(&self) {
        self.pristine.set(false);
    }

    pub fn mark_pristine(&self) {
        self.pristine.set(true);
    }

    pub fn set_valid(&self, valid: bool) {
        self.valid.set(valid);
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationContext for ValidationState {
    fn pristine(&self) -> bool {
        self.pristine.get()
    }

    fn valid(&self) -> bool {
        self.valid.get()
    }
}
