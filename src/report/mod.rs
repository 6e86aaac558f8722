pub mod plotly;
pub mod template;

/// Static PCALF workflow diagram embedded in every report.
pub const WORKFLOW_SVG: &str = include_str!("../../assets/workflow.svg");

pub const NO_NTER_DATA: &str = "<p style='font-style: italic;'>No data for this kind of N-ter</p>";
