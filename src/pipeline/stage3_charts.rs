use std::collections::HashMap;

use serde_json::{Value, json};

use crate::error::Result;
use crate::model::genotype::Genotype;
use crate::model::layout::LayoutProfile;
use crate::model::nter::NterType;
use crate::model::palette::{ColorAssigner, DASH_SEQUENCE, genotype_color, nter_color};
use crate::pipeline::stage1_load::Stage1Output;
use crate::pipeline::stage2_aggregate::{
    CategoryCount, REDUNDANCY_LEVELS, category_counts, count_db_genotypes, count_genotypes,
    cumulative_count_by_date, sequence_counts_by_date,
};
use crate::report::plotly::{
    Annotation, Axis, Domain, Figure, Hierarchy, Layout, Legend, Line, Margin, Marker, Pie,
    Scatter, TRANSPARENT, Title, Trace,
};

const GRID_COLOR: &str = "rgba(0,0,0,0.1)";
const FACET_SPACING: f64 = 0.03;
const CATEGORY_TITLE: &str = "No of Calcyanin.";

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub metrics: Figure,
    pub genome_over_time: Figure,
    pub sequence_over_time: Figure,
    pub sunburst: Figure,
    pub treemap: Figure,
    pub decision_tree: Figure,
}

pub fn run_stage3(data: &Stage1Output, profile: &LayoutProfile) -> Result<Stage3Output> {
    tracing::info!(by_database = ?count_db_genotypes(&data.genomes), "genome genotypes");
    let sequence_over_time = make_sequence_over_time_chart(data);
    if sequence_over_time.is_empty() {
        tracing::warn!("no dated calcyanin sequence; sequence chart is empty");
    }
    Ok(Stage3Output {
        metrics: make_genome_pie_chart(data)?,
        genome_over_time: make_genome_over_time_chart(data)?,
        sequence_over_time,
        sunburst: make_sunburst(data),
        treemap: make_treemap(data),
        decision_tree: make_decision_tree_chart(profile),
    })
}

fn time_axes(layout: &mut Layout, y_title: &str, legend_title: &str) {
    layout.xaxis = Some(Axis {
        title: Some(Title::new("Date")),
        showgrid: Some(false),
        ..Axis::default()
    });
    layout.yaxis = Some(Axis {
        title: Some(Title::new(y_title)),
        gridcolor: Some(GRID_COLOR.to_string()),
        ..Axis::default()
    });
    layout.legend = Some(Legend {
        title: Some(Title::new(legend_title)),
    });
    layout.paper_bgcolor = Some(TRANSPARENT.to_string());
    layout.plot_bgcolor = Some(TRANSPARENT.to_string());
}

/// One genotype pie per redundancy level, laid out side by side.
pub fn make_genome_pie_chart(data: &Stage1Output) -> Result<Figure> {
    let mut fig = Figure::new();
    fig.config.display_mode_bar = Some(false);

    let columns = REDUNDANCY_LEVELS.len() as f64;
    let width = (1.0 - FACET_SPACING * (columns - 1.0)) / columns;

    for (idx, (column, _)) in REDUNDANCY_LEVELS.iter().enumerate() {
        let counts = count_genotypes(&data.genomes, column)?;
        let red_level = format!("{column} [{}]", counts.distinct);
        let x0 = idx as f64 * (width + FACET_SPACING);

        fig.add_trace(Pie {
            labels: vec![
                Genotype::Positive.label().to_string(),
                Genotype::Negative.label().to_string(),
            ],
            values: vec![counts.positive as u64, counts.negative as u64],
            name: Some(red_level.clone()),
            marker: Some(Marker {
                colors: Some(vec![
                    genotype_color(Genotype::Positive).to_string(),
                    genotype_color(Genotype::Negative).to_string(),
                ]),
                ..Marker::default()
            }),
            domain: Some(Domain {
                x: [x0, x0 + width],
                y: [0.0, 1.0],
            }),
            hovertemplate: Some(format!(
                "RedLevel={red_level}<br>genotype=%{{label}}<br>count=%{{value}}<extra></extra>"
            )),
            showlegend: None,
        });
        fig.layout.annotations.push(Annotation {
            text: format!("RedLevel={red_level}"),
            x: x0 + width / 2.0,
            y: 1.0,
            xref: "paper".to_string(),
            yref: "paper".to_string(),
            xanchor: "center".to_string(),
            yanchor: "bottom".to_string(),
            showarrow: false,
        });
    }
    Ok(fig)
}

/// Cumulative number of distinct entries at each redundancy level.
pub fn make_genome_over_time_chart(data: &Stage1Output) -> Result<Figure> {
    let mut series = REDUNDANCY_LEVELS
        .iter()
        .map(|(column, label)| cumulative_count_by_date(&data.genomes, column, label))
        .collect::<Result<Vec<_>>>()?;
    series.sort_by(|a, b| a.label.cmp(&b.label));

    let mut colors = ColorAssigner::default();
    let mut fig = Figure::new();
    for s in series {
        let color = colors.color_for(&s.label, None);
        fig.add_trace(Scatter {
            x: s.points.iter().map(|p| json!(p.date)).collect(),
            y: s.points.iter().map(|p| json!(p.total)).collect(),
            mode: Some("lines+markers".to_string()),
            name: Some(s.label.clone()),
            line: Some(Line {
                color: Some(color),
                ..Line::default()
            }),
            customdata: Some(Value::Array(
                s.points.iter().map(|p| json!([p.count_by_date])).collect(),
            )),
            hovertemplate: Some(
                "label=%{fullData.name}<br>Date=%{x}<br>total=%{y}<br>count_by_date=%{customdata[0]}<extra></extra>"
                    .to_string(),
            ),
            legendgroup: Some(s.label),
            ..Scatter::default()
        });
    }

    fig.layout.title = Some(Title::new("Number of entry over time"));
    time_axes(&mut fig.layout, "#entries", "Level of redundancy");
    Ok(fig)
}

/// Cumulative calcyanin counts, colored by N-ter type and dashed by flag.
pub fn make_sequence_over_time_chart(data: &Stage1Output) -> Figure {
    let mut colors = ColorAssigner::default();
    let mut dashes: Vec<String> = Vec::new();
    let mut fig = Figure::new();

    for s in sequence_counts_by_date(&data.genome_sequences) {
        let color = colors.color_for(s.nter.as_str(), nter_color(&s.nter));
        let dash_idx = match dashes.iter().position(|f| *f == s.flag) {
            Some(idx) => idx,
            None => {
                dashes.push(s.flag.clone());
                dashes.len() - 1
            }
        };
        let name = format!("{}, {}", s.nter, s.flag);
        fig.add_trace(Scatter {
            x: s.points.iter().map(|p| json!(p.date)).collect(),
            y: s.points.iter().map(|p| json!(p.total)).collect(),
            mode: Some("lines+markers".to_string()),
            name: Some(name.clone()),
            line: Some(Line {
                color: Some(color),
                dash: Some(DASH_SEQUENCE[dash_idx % DASH_SEQUENCE.len()].to_string()),
                ..Line::default()
            }),
            customdata: Some(Value::Array(
                s.points.iter().map(|p| json!([p.count_by_date])).collect(),
            )),
            hovertemplate: Some(format!(
                "nter={}<br>flag={}<br>Date=%{{x}}<br>total=%{{y}}<br>count_by_date=%{{customdata[0]}}<extra></extra>",
                s.nter, s.flag
            )),
            legendgroup: Some(name),
            ..Scatter::default()
        });
    }

    fig.layout.title = Some(Title::new(
        "Number of calcyanin by N-ter type and flag over time",
    ));
    time_axes(&mut fig.layout, "#sequences", "Calcyanin N-ter type and flag");
    fig
}

/// Node id of a category path: labels joined by `/`, with `\\` and `/`
/// inside a label escaped so distinct paths never share an id.
fn node_id(path: &[String]) -> String {
    path.iter()
        .map(|label| label.replace('\\', "\\\\").replace('/', "\\/"))
        .collect::<Vec<_>>()
        .join("/")
}

/// Flattens category paths into Plotly's ids/parents form. Branch values
/// are the sum of their leaves; every node takes the color of its N-ter root.
pub fn build_hierarchy(counts: &[CategoryCount]) -> Hierarchy {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out = Hierarchy {
        branchvalues: "total".to_string(),
        ..Hierarchy::default()
    };
    let mut colors = ColorAssigner::default();
    let mut node_colors: Vec<String> = Vec::new();

    for count in counts {
        let Some(root) = count.path.first() else {
            continue;
        };
        let root_color = colors.color_for(root, nter_color(&NterType::from_stored(Some(root))));
        for depth in 0..count.path.len() {
            let id = node_id(&count.path[..=depth]);
            match index.get(&id) {
                Some(&idx) => out.values[idx] += count.count as u64,
                None => {
                    let parent = if depth == 0 {
                        String::new()
                    } else {
                        node_id(&count.path[..depth])
                    };
                    index.insert(id.clone(), out.ids.len());
                    out.ids.push(id);
                    out.labels.push(count.path[depth].clone());
                    out.parents.push(parent);
                    out.values.push(count.count as u64);
                    node_colors.push(root_color.clone());
                }
            }
        }
    }

    out.marker = Some(Marker {
        colors: Some(node_colors),
        ..Marker::default()
    });
    out.hovertemplate = Some(
        "labels=%{label}<br>No of sequences=%{value}<br>parent=%{parent}<br>id=%{id}<extra></extra>"
            .to_string(),
    );
    out
}

pub fn make_sunburst(data: &Stage1Output) -> Figure {
    let mut fig = Figure::new();
    fig.add_trace(Trace::Sunburst(build_hierarchy(&category_counts(
        &data.sequences,
        true,
    ))));
    fig.layout.title = Some(Title::new(CATEGORY_TITLE));
    fig
}

pub fn make_treemap(data: &Stage1Output) -> Figure {
    let mut fig = Figure::new();
    fig.add_trace(Trace::Treemap(build_hierarchy(&category_counts(
        &data.sequences,
        false,
    ))));
    fig.layout.title = Some(Title::new(CATEGORY_TITLE));
    fig
}

const DECISION_NODES: &[&str] = &[
    "[Sequence has a significative hit against the GlyX3]<br>Does the sequence have three glycine zipper in the right order (G1|G2|G3) ?",
    "Does the sequence have<br>at least a G1 and G3 in this order ?",
    "Does the sequence have<br>a Known N-ter ?",
    "Does the sequence have<br>Known N-ter ?",
    "Does the sequence have<br>a N-ter of type Y ?",
    "Calcyanin with<br>new N-ter",
    "Calcyanin with<br>known N-ter",
    "Atypical gly region<br>with new N-ter",
    "Atypical gly region<br>with known N-ter",
    "Atypical gly region<br>with new N-ter",
    "Calcyanin with<br>known N-ter",
];

const OUTCOME_NODES: &[usize] = &[5, 6, 9, 10];
const NO_EDGE: (&str, &str) = ("#c6587e", "N");
const YES_EDGE: (&str, &str) = ("#48d38b", "Y");

/// Tidy layout of the binary tree where node `i` has children `2i+1` and
/// `2i+2`: leaves are spaced one unit apart in depth-first order, parents
/// are centred over their children, and the root sits on top.
pub fn tree_layout(nodes: usize) -> Vec<(f64, f64)> {
    fn depth_of(mut node: usize) -> usize {
        let mut depth = 0;
        while node > 0 {
            node = (node - 1) / 2;
            depth += 1;
        }
        depth
    }

    fn place(node: usize, nodes: usize, next_leaf: &mut f64, xs: &mut [f64]) -> f64 {
        let children = [2 * node + 1, 2 * node + 2]
            .into_iter()
            .filter(|c| *c < nodes)
            .collect::<Vec<_>>();
        let x = if children.is_empty() {
            let x = *next_leaf;
            *next_leaf += 1.0;
            x
        } else {
            let sum: f64 = children
                .iter()
                .map(|c| place(*c, nodes, next_leaf, xs))
                .sum();
            sum / children.len() as f64
        };
        xs[node] = x;
        x
    }

    if nodes == 0 {
        return Vec::new();
    }
    let mut xs = vec![0.0; nodes];
    let mut next_leaf = 0.0;
    place(0, nodes, &mut next_leaf, &mut xs);
    let max_depth = (0..nodes).map(depth_of).max().unwrap_or(0) as f64;

    (0..nodes)
        .map(|n| (xs[n], 2.0 * max_depth - depth_of(n) as f64))
        .collect()
}

pub fn make_decision_tree_chart(profile: &LayoutProfile) -> Figure {
    let positions = tree_layout(DECISION_NODES.len());
    let mut fig = Figure::new();

    for child in 1..positions.len() {
        let parent = (child - 1) / 2;
        let (color, answer) = if child % 2 == 1 { NO_EDGE } else { YES_EDGE };
        fig.add_trace(Scatter {
            x: vec![json!(positions[parent].0), json!(positions[child].0), Value::Null],
            y: vec![json!(positions[parent].1), json!(positions[child].1), Value::Null],
            mode: Some("lines".to_string()),
            line: Some(Line {
                color: Some(color.to_string()),
                width: Some(4.0),
                ..Line::default()
            }),
            opacity: Some(0.5),
            text: Some(json!(answer)),
            hoverinfo: Some("text".to_string()),
            ..Scatter::default()
        });
    }

    let labels = DECISION_NODES
        .iter()
        .enumerate()
        .map(|(idx, txt)| {
            if OUTCOME_NODES.contains(&idx) {
                json!(format!("<b>{txt}</b>"))
            } else {
                json!(txt)
            }
        })
        .collect::<Vec<_>>();
    fig.add_trace(Scatter {
        x: positions.iter().map(|p| json!(p.0)).collect(),
        y: positions.iter().map(|p| json!(p.1)).collect(),
        mode: Some("markers+text".to_string()),
        name: Some("decision".to_string()),
        marker: Some(Marker {
            color: Some("white".to_string()),
            size: Some(30.0),
            symbol: Some("diamond".to_string()),
            line: Some(Line {
                color: Some("rgb(50,50,50)".to_string()),
                width: Some(1.0),
                ..Line::default()
            }),
            ..Marker::default()
        }),
        opacity: Some(1.0),
        text: Some(Value::Array(labels)),
        textposition: Some("top center".to_string()),
        hoverinfo: Some("text".to_string()),
        ..Scatter::default()
    });

    let hidden = Axis {
        visible: Some(false),
        ..Axis::default()
    };
    fig.layout = Layout {
        title: Some(Title::new("Calcyanin classification decision tree.")),
        height: Some(profile.decision_tree_height_px),
        margin: Some(Margin {
            l: 40,
            r: 40,
            b: 85,
            t: 100,
            pad: None,
        }),
        paper_bgcolor: Some(TRANSPARENT.to_string()),
        plot_bgcolor: Some(TRANSPARENT.to_string()),
        showlegend: Some(false),
        xaxis: Some(hidden.clone()),
        yaxis: Some(hidden),
        ..Layout::default()
    };
    fig
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_charts.rs"]
mod tests;
