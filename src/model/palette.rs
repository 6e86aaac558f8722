use crate::model::genotype::Genotype;
use crate::model::nter::NterType;

/// Plotly's default qualitative sequence, used for categories without a fixed color.
pub const DEFAULT_SEQUENCE: &[&str] = &[
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub const DASH_SEQUENCE: &[&str] = &["solid", "dot", "dash", "longdash", "dashdot", "longdashdot"];

pub fn nter_color(nter: &NterType) -> Option<&'static str> {
    match nter {
        NterType::Z => Some("#7ad5a3"),
        NterType::X => Some("#322f26"),
        NterType::CoBaHMA => Some("#0babc1"),
        NterType::Y => Some("#b980d1"),
        NterType::Unknown => Some("#717171"),
        NterType::Other(_) => None,
    }
}

pub fn genotype_color(genotype: Genotype) -> &'static str {
    match genotype {
        Genotype::Positive => "#88D9E6",
        Genotype::Negative => "#D5D5D8",
    }
}

/// Glycine-zipper domains and N-ter subtypes share one legend in the lane diagram.
pub fn domain_color(category: &str) -> Option<&'static str> {
    match category {
        "Gly1" => Some("#ecec13"),
        "Gly2" => Some("#ec9d13"),
        "Gly3" => Some("#e25d3f"),
        "GlyX3" => Some("#d9d5d4"),
        other => {
            let nter = NterType::from_stored(Some(other));
            if nter.is_known() && !other.is_empty() {
                nter_color(&nter)
            } else {
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: u32,
}

pub const DEFAULT_LINE: LineStyle = LineStyle {
    color: "black",
    width: 1,
};

pub fn domain_line_style(category: &str) -> LineStyle {
    match domain_color(category) {
        Some(color) => LineStyle { color, width: 3 },
        None => DEFAULT_LINE,
    }
}

/// Hands out fixed colors where known and walks the default sequence otherwise.
#[derive(Debug, Default)]
pub struct ColorAssigner {
    assigned: Vec<(String, String)>,
    next_default: usize,
}

impl ColorAssigner {
    pub fn color_for(&mut self, key: &str, fixed: Option<&'static str>) -> String {
        if let Some((_, c)) = self.assigned.iter().find(|(k, _)| k == key) {
            return c.clone();
        }
        let color = match fixed {
            Some(c) => c.to_string(),
            None => {
                let c = DEFAULT_SEQUENCE[self.next_default % DEFAULT_SEQUENCE.len()];
                self.next_default += 1;
                c.to_string()
            }
        };
        self.assigned.push((key.to_string(), color.clone()));
        color
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/palette.rs"]
mod tests;
