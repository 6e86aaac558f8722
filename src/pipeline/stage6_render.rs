use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::input::Database;
use crate::model::layout::LayoutProfile;
use crate::model::nter::modorg_slots;
use crate::pipeline::stage1_load::run_stage1;
use crate::pipeline::stage3_charts::run_stage3;
use crate::pipeline::stage4_modorg::make_modorg_charts;
use crate::pipeline::stage5_nested::{run_stage5, to_pretty_json};
use crate::report::plotly::{Figure, PlotlyJs, to_html_fragment};
use crate::report::template::fill_template;
use crate::report::{NO_NTER_DATA, WORKFLOW_SVG};

pub const TEMPLATE_HTML: &str = "template.html";
pub const TEMPLATE_CSS: &str = "template.css";
pub const TEMPLATE_JS: &str = "template.js";

#[derive(Debug, Clone)]
pub struct TemplateFiles {
    pub html: String,
    pub css: String,
    pub js: String,
}

fn read_named(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("{}: {e}", path.display())).into()
    })
}

pub fn read_templates(dir: &Path) -> Result<TemplateFiles> {
    Ok(TemplateFiles {
        html: read_named(dir, TEMPLATE_HTML)?,
        css: read_named(dir, TEMPLATE_CSS)?,
        js: read_named(dir, TEMPLATE_JS)?,
    })
}

fn standalone(fig: &Figure, div_id: &str) -> Result<String> {
    to_html_fragment(fig, div_id, PlotlyJs::Cdn)
}

/// Every template slot value for one database.
pub fn build_slots(
    db: &Database,
    templates: &TemplateFiles,
    profile: &LayoutProfile,
) -> Result<BTreeMap<&'static str, String>> {
    let data = run_stage1(db)?;
    let charts = run_stage3(&data, profile)?;
    let modorg = make_modorg_charts(&data.sequences, profile);
    let nested = run_stage5(db)?;

    tracing::info!(
        organisms = nested.record.as_object().map_or(0, |o| o.len()),
        with_calcyanin = nested.ccya_plus,
        without_calcyanin = nested.ccya_minus,
        "assembled nested record"
    );

    let mut slots = BTreeMap::new();
    // Embedded in a <script> element.
    slots.insert("datas", to_pretty_json(&nested.record)?.replace("</", "<\\/"));
    slots.insert("css", templates.css.clone());
    slots.insert("js", templates.js.clone());
    slots.insert("workflow", WORKFLOW_SVG.to_string());
    slots.insert(
        "decision_tree",
        standalone(&charts.decision_tree, "decision-tree-plot")?,
    );
    slots.insert("sunburst", standalone(&charts.sunburst, "sunburst-plot")?);
    slots.insert("treemap", standalone(&charts.treemap, "treemap-plot")?);
    slots.insert(
        "genome_over_time",
        standalone(&charts.genome_over_time, "genome-over-time-plot")?,
    );
    slots.insert(
        "sequence_over_time",
        standalone(&charts.sequence_over_time, "sequence-over-time-plot")?,
    );
    slots.insert("metrics_fig", standalone(&charts.metrics, "metrics-plot")?);

    for (nter, slot, div_id) in modorg_slots() {
        let html = match modorg.get(nter) {
            Some(fig) => to_html_fragment(fig, div_id, PlotlyJs::Omit)?,
            None => {
                tracing::debug!(nter = %nter, "no sequences for N-ter type");
                NO_NTER_DATA.to_string()
            }
        };
        slots.insert(*slot, html);
    }

    let unslotted = modorg
        .keys()
        .filter(|n| !modorg_slots().iter().any(|(known, _, _)| known == *n))
        .map(|n| n.as_str().to_string())
        .collect::<Vec<_>>();
    if !unslotted.is_empty() {
        tracing::warn!(types = ?unslotted, "N-ter types without a report slot");
    }
    Ok(slots)
}

pub fn render_html(
    db: &Database,
    templates: &TemplateFiles,
    profile: &LayoutProfile,
) -> Result<String> {
    let slots = build_slots(db, templates, profile)?;
    fill_template(&templates.html, &slots)
}

/// Writes the report, creating parent directories and replacing any
/// existing file.
pub fn write_report(out: &Path, html: &str) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(out)?);
    writer.write_all(html.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub db: PathBuf,
    pub templates: PathBuf,
    pub out: PathBuf,
}

pub fn render_report(request: &RenderRequest, profile: &LayoutProfile) -> Result<()> {
    let db = Database::open(&request.db)?;
    let templates = read_templates(&request.templates)?;
    let html = render_html(&db, &templates, profile)?;
    write_report(&request.out, &html)?;
    tracing::info!(
        out = %request.out.display(),
        bytes = html.len(),
        "wrote report"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_render.rs"]
mod tests;
