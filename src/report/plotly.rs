use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    #[serde(skip)]
    pub config: Config,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_trace(&mut self, trace: impl Into<Trace>) {
        self.data.push(trace.into());
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(Scatter),
    Pie(Pie),
    Sunburst(Hierarchy),
    Treemap(Hierarchy),
}

impl Trace {
    pub fn name(&self) -> Option<&str> {
        match self {
            Trace::Scatter(s) => s.name.as_deref(),
            Trace::Pie(p) => p.name.as_deref(),
            Trace::Sunburst(_) | Trace::Treemap(_) => None,
        }
    }

    pub fn set_showlegend(&mut self, show: bool) {
        match self {
            Trace::Scatter(s) => s.showlegend = Some(show),
            Trace::Pie(p) => p.showlegend = Some(show),
            Trace::Sunburst(_) | Trace::Treemap(_) => {}
        }
    }
}

impl From<Scatter> for Trace {
    fn from(value: Scatter) -> Self {
        Trace::Scatter(value)
    }
}

impl From<Pie> for Trace {
    fn from(value: Pie) -> Self {
        Trace::Pie(value)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Scatter {
    pub x: Vec<Value>,
    pub y: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoveron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgrouptitle: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Pie {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

/// Shared shape of sunburst and treemap traces.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Hierarchy {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<u64>,
    pub branchvalues: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: String,
    pub yref: String,
    pub xanchor: String,
    pub yanchor: String,
    pub showarrow: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_mode_bar: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            responsive: true,
            display_mode_bar: None,
        }
    }
}

pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotlyJs {
    /// Prepend a `<script src>` tag loading Plotly.js from the CDN.
    Cdn,
    /// The page is expected to have loaded Plotly.js already.
    Omit,
}

/// JSON safe to embed inside a `<script>` element.
pub fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Embeddable markup for one figure: a sized `<div>` plus the
/// `Plotly.newPlot` call that draws into it.
pub fn to_html_fragment(figure: &Figure, div_id: &str, js: PlotlyJs) -> Result<String> {
    let data = script_json(&figure.data)?;
    let layout = script_json(&figure.layout)?;
    let config = script_json(&figure.config)?;
    let height = figure
        .layout
        .height
        .map(|h| format!("{h}px"))
        .unwrap_or_else(|| "100%".to_string());

    let mut out = String::new();
    out.push_str("<div>");
    if js == PlotlyJs::Cdn {
        out.push_str(&format!(
            "<script src=\"{PLOTLY_CDN}\" charset=\"utf-8\"></script>"
        ));
    }
    out.push_str(&format!(
        "<div id=\"{div_id}\" class=\"plotly-graph-div\" style=\"height:{height}; width:100%;\"></div>"
    ));
    out.push_str("<script type=\"text/javascript\">");
    out.push_str("window.PLOTLYENV=window.PLOTLYENV || {};");
    out.push_str(&format!(
        "if (document.getElementById(\"{div_id}\")) {{ Plotly.newPlot(\"{div_id}\", {data}, {layout}, {config}); }}"
    ));
    out.push_str("</script></div>");
    Ok(out)
}

/// Hides the legend entry of every trace whose name was already shown.
pub fn dedup_legend(figure: &mut Figure) {
    let mut seen: Vec<String> = Vec::new();
    for trace in &mut figure.data {
        let Some(name) = trace.name().map(str::to_string) else {
            continue;
        };
        if seen.contains(&name) {
            trace.set_showlegend(false);
        } else {
            seen.push(name);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/plotly.rs"]
mod tests;
