//! Option reconciliation
//!
//! Hosts replace the whole options map whenever they like and call
//! [`EditorFieldControl::reconcile_options`] once per check cycle. Only
//! keys that differ from the previously reconciled snapshot reach the
//! widget.

use mirrorfield_core::{EditorOptions, OptionValue, OptionsDiff, OptionsDiffer};

use super::EditorFieldControl;
use crate::widget::EditorWidget;

impl<W: EditorWidget> EditorFieldControl<W> {
    /// The current options snapshot
    pub fn options(&self) -> Option<EditorOptions> {
        self.inner.options.borrow().clone()
    }

    /// Replace the options snapshot
    ///
    /// Nothing is applied here. The differ is created on the first
    /// non-empty snapshot; until then reconciliation does nothing.
    pub fn set_options(&self, options: Option<EditorOptions>) {
        let has_shape = options.as_ref().is_some_and(|o| !o.is_empty());
        *self.inner.options.borrow_mut() = options;

        let mut differ = self.inner.differ.borrow_mut();
        if differ.is_none() && has_shape {
            *differ = Some(OptionsDiffer::new());
        }
    }

    /// Apply every key that changed since the last pass
    ///
    /// Cheap when nothing changed. Without a widget the changed keys are
    /// dropped, not queued: a widget mounted later is created from the
    /// snapshot current at that time.
    pub fn reconcile_options(&self) -> Option<OptionsDiff> {
        let diff = {
            let mut differ = self.inner.differ.borrow_mut();
            let differ = differ.as_mut()?;
            let options = self.inner.options.borrow();
            differ.diff(options.as_ref())?
        };

        for record in diff.records() {
            self.apply_option(&record.key, record.value_to_apply());
        }
        Some(diff)
    }

    /// Set a single option on the widget, if there is one
    pub(crate) fn apply_option(&self, key: &str, value: OptionValue) {
        let Some(widget) = self.widget() else {
            return;
        };
        tracing::trace!(id = %self.inner.id, key, %value, "set option");
        widget.set_option(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessEditor;
    use serde_json::json;

    type Control = EditorFieldControl<HeadlessEditor>;

    fn opts(pairs: &[(&str, OptionValue)]) -> EditorOptions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_no_differ_until_non_empty_snapshot() {
        let control = Control::new();
        assert!(control.reconcile_options().is_none());

        control.set_options(Some(EditorOptions::new()));
        assert!(control.reconcile_options().is_none());

        control.set_options(None);
        assert!(control.reconcile_options().is_none());

        control.set_options(Some(opts(&[("mode", json!("sql"))])));
        let diff = control.reconcile_options().unwrap_or_default();
        assert_eq!(diff.added.len(), 1);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let control = Control::new();
        control.set_options(Some(opts(&[("mode", json!("sql"))])));

        assert!(control.reconcile_options().is_some());
        assert!(control.reconcile_options().is_none());
        assert!(control.reconcile_options().is_none());
    }

    #[test]
    fn test_clearing_options_removes_every_key() {
        let control = Control::new();
        control.set_options(Some(opts(&[("mode", json!("sql")), ("tabSize", json!(2))])));
        control.reconcile_options();

        control.set_options(None);
        let diff = control.reconcile_options().unwrap_or_default();
        assert_eq!(diff.removed.len(), 2);
    }
}
