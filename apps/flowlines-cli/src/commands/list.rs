//! List the flow menu.

use anyhow::Result;
use flowlines::FlowSelector;

/// Print `key. name` for every selectable flow.
pub fn execute() -> Result<()> {
    for (key, label) in FlowSelector::default().menu() {
        println!("{key}. {label}");
    }
    Ok(())
}
