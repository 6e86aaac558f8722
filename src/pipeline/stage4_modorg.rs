use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::input::rows::NA;
use crate::model::layout::LayoutProfile;
use crate::model::nter::NterType;
use crate::model::palette::domain_line_style;
use crate::model::records::{FeatureRecord, SequenceRecord};
use crate::report::plotly::{
    Axis, Figure, Layout, Line, Margin, Scatter, TRANSPARENT, Title, dedup_legend,
};

const BACKBONE: &str = "full-seq";
const NTER_FEATURE: &str = "N-ter";

/// Legend category of a feature. N-ter features are named after the first
/// `|` token of their source annotation.
pub fn feature_category(feature: &FeatureRecord) -> String {
    if feature.feature_id == NTER_FEATURE
        && let Some(token) = feature
            .source
            .as_deref()
            .and_then(|s| s.split('|').next())
            .filter(|t| !t.is_empty())
    {
        return token.to_string();
    }
    feature.feature_id.clone()
}

/// Sample positions of `[start, end)` at the profile stride. `None` when a
/// coordinate is missing or zero, or when no position is sampled.
pub fn sample_feature(feature: &FeatureRecord, profile: &LayoutProfile) -> Option<Vec<i64>> {
    let start = feature.start.filter(|s| *s != 0)?;
    let end = feature.end.filter(|e| *e != 0)?;
    let samples = (start..end)
        .step_by(profile.sample_stride.max(1))
        .collect::<Vec<_>>();
    if samples.is_empty() { None } else { Some(samples) }
}

/// Traces drawing one sequence on `lane`: a dashed backbone over its full
/// length, then one colored segment per drawable feature.
pub fn sequence_modular_orga(
    seq_id: &str,
    record: &SequenceRecord,
    lane: usize,
    extras: &[(&str, String)],
    profile: &LayoutProfile,
) -> Vec<Scatter> {
    let mut traces = vec![Scatter {
        x: vec![json!(0), json!(record.length)],
        y: vec![json!(lane), json!(lane)],
        mode: Some("lines".to_string()),
        name: Some(BACKBONE.to_string()),
        line: Some(Line {
            color: Some("black".to_string()),
            width: Some(1.0),
            dash: Some("dash".to_string()),
        }),
        opacity: Some(0.4),
        hovertext: Some(seq_id.to_string()),
        legendgroup: Some(BACKBONE.to_string()),
        legendgrouptitle: Some(Title::new(BACKBONE)),
        ..Scatter::default()
    }];

    let flag = record.flag.as_deref().unwrap_or(NA);
    let neighbor = record.nter_neighbor.as_deref().unwrap_or(NA);

    for feature in &record.features {
        let Some(samples) = sample_feature(feature, profile) else {
            tracing::debug!(
                sequence = %seq_id,
                feature = %feature.feature_id,
                "feature without drawable coordinates skipped"
            );
            continue;
        };
        let category = feature_category(feature);
        let style = domain_line_style(&category);
        let (min, max) = (samples[0], samples[samples.len() - 1]);

        let mut hover = format!(
            "- {seq_id}<br>- {category}<br>- {flag}<br>- From {min} to {max}<br>- {neighbor} [nearest neighbor]<br>"
        );
        let mut customdata = vec![json!({ "seqid": seq_id })];
        for (key, value) in extras {
            hover.push_str(&format!("- {key}: {value}<br>"));
            let mut entry = serde_json::Map::new();
            entry.insert(key.to_string(), json!(value));
            customdata.push(Value::Object(entry));
        }

        traces.push(Scatter {
            x: samples.iter().map(|x| json!(x)).collect(),
            y: samples.iter().map(|_| json!(lane)).collect(),
            mode: Some("lines".to_string()),
            name: Some(category.clone()),
            line: Some(Line {
                color: Some(style.color.to_string()),
                width: Some(f64::from(style.width)),
                dash: None,
            }),
            text: Some(json!("")),
            hovertext: Some(hover),
            hoveron: Some("points+fills".to_string()),
            customdata: Some(Value::Array(customdata)),
            legendgroup: Some(category.clone()),
            legendgrouptitle: Some(Title::new(category)),
            ..Scatter::default()
        });
    }
    traces
}

fn modorg_layout(nter: &NterType, lanes: usize, profile: &LayoutProfile) -> Layout {
    Layout {
        title: Some(Title::new(format!("Modular organization [{nter}]"))),
        autosize: Some(false),
        width: Some(profile.chart_width_px),
        height: Some(profile.modorg_height(lanes)),
        margin: Some(Margin {
            l: 50,
            r: 50,
            b: 100,
            t: 100,
            pad: Some(4),
        }),
        paper_bgcolor: Some(TRANSPARENT.to_string()),
        plot_bgcolor: Some(TRANSPARENT.to_string()),
        xaxis: Some(Axis {
            title: Some(Title::new("Sequence length (aa)")),
            gridcolor: Some("rgba(0,0,0,0.1)".to_string()),
            ..Axis::default()
        }),
        yaxis: Some(Axis {
            visible: Some(false),
            ..Axis::default()
        }),
        ..Layout::default()
    }
}

/// One lane diagram per N-ter type observed. Lanes are numbered from 1 in
/// record order within each chart.
pub fn make_modorg_charts(
    records: &[SequenceRecord],
    profile: &LayoutProfile,
) -> BTreeMap<NterType, Figure> {
    let mut grouped: BTreeMap<NterType, Vec<&SequenceRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.nter.clone()).or_default().push(record);
    }

    let mut charts = BTreeMap::new();
    for (nter, members) in grouped {
        let mut fig = Figure::new();
        for (idx, record) in members.iter().enumerate() {
            let extras = [
                (
                    "Organism_Name",
                    record.organism.clone().unwrap_or_else(|| NA.to_string()),
                ),
                ("Assembly", record.source.clone()),
            ];
            for trace in sequence_modular_orga(&record.accession, record, idx + 1, &extras, profile)
            {
                fig.add_trace(trace);
            }
        }
        dedup_legend(&mut fig);
        fig.layout = modorg_layout(&nter, members.len(), profile);
        tracing::debug!(nter = %nter, lanes = members.len(), "built modular organization chart");
        charts.insert(nter, fig);
    }
    charts
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_modorg.rs"]
mod tests;
