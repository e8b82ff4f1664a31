//! Drive an editor field over the headless widget
//!
//! Run with `RUST_LOG=mirrorfield=trace` to watch the bridge at work.

use std::rc::Rc;

use anyhow::Result;
use mirrorfield::{EditorFieldControl, EditorWidget, FieldConfig, HeadlessEditor};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
name = "query"
placeholder = "SQL"
preserve_scroll_position = true

[options]
mode = "sql"
tabSize = 4
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = FieldConfig::from_toml_str(CONFIG)?;
    let control = EditorFieldControl::<HeadlessEditor>::with_config(&config);

    control.register_on_change(Rc::new(|value: &str| println!("host <- {value:?}")));
    control.register_on_touched(Rc::new(|| println!("host <- touched")));
    control.state_changes().subscribe(|_| println!("state changed"));

    control.write_value(Some("SELECT 1"));
    control.after_view_init(Some(config.anchor()))?;
    let widget = control
        .widget()
        .ok_or_else(|| anyhow::anyhow!("widget did not mount"))?;

    // User activity
    widget.focus();
    widget.type_text("\nFROM dual");
    widget.blur();
    println!("line numbers: {}", control.show_line_numbers());

    // Host reconfigures
    control.set_options(Some(mirrorfield::parse_options(json!({
        "mode": "sql",
        "tabSize": 2,
        "lineWrapping": true,
    }))?));
    if let Some(diff) = control.reconcile_options() {
        for record in diff.records() {
            println!("option {} -> {}", record.key, record.value_to_apply());
        }
    }

    control.set_disabled_state(true);
    println!("readOnly: {:?}", widget.option("readOnly"));
    println!("label floats: {}", control.should_label_float());

    control.destroy();
    if let Some(anchor) = control.take_anchor() {
        println!("anchor {:?} restored with {:?}", anchor.name, anchor.value);
    }
    Ok(())
}
