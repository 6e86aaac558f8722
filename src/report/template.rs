use std::collections::BTreeMap;

use crate::error::{ReportError, Result};

/// Every slot the report template may reference.
pub const SLOTS: &[&str] = &[
    "datas",
    "css",
    "js",
    "workflow",
    "decision_tree",
    "sunburst",
    "treemap",
    "cobahma_oms",
    "x_oms",
    "y_oms",
    "z_oms",
    "unknown_oms",
    "genome_over_time",
    "sequence_over_time",
    "metrics_fig",
];

/// Replaces each `{{ name }}` placeholder with its slot value, verbatim.
/// A placeholder that is not a report slot, or whose slot has no value, is
/// an error; slots the template never references are ignored.
pub fn fill_template(template: &str, values: &BTreeMap<&str, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len() + values.values().map(String::len).sum::<usize>());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            return Err(ReportError::Template(
                "unterminated placeholder".to_string(),
            ));
        };
        let name = after[..close].trim();
        if !SLOTS.contains(&name) {
            return Err(ReportError::Template(format!("unknown slot '{name}'")));
        }
        match values.get(name) {
            Some(value) => out.push_str(value),
            None => {
                return Err(ReportError::Template(format!("slot '{name}' has no value")));
            }
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);

    for slot in values.keys() {
        if !template_mentions(template, slot) {
            tracing::debug!(slot = %slot, "template does not reference slot");
        }
    }
    Ok(out)
}

fn template_mentions(template: &str, slot: &str) -> bool {
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                if after[..close].trim() == slot {
                    return true;
                }
                rest = &after[close + 2..];
            }
            None => return false,
        }
    }
    false
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/template.rs"]
mod tests;
