#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NterType {
    Z,
    X,
    CoBaHMA,
    Y,
    Unknown,
    Other(String),
}

impl NterType {
    /// Empty or NULL stored values are reported as `Unknown-type`.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => NterType::Unknown,
            Some("Z-type") => NterType::Z,
            Some("X-type") => NterType::X,
            Some("CoBaHMA-type") => NterType::CoBaHMA,
            Some("Y-type") => NterType::Y,
            Some("Unknown-type") => NterType::Unknown,
            Some(other) => NterType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NterType::Z => "Z-type",
            NterType::X => "X-type",
            NterType::CoBaHMA => "CoBaHMA-type",
            NterType::Y => "Y-type",
            NterType::Unknown => "Unknown-type",
            NterType::Other(s) => s.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, NterType::Other(_))
    }
}

impl std::fmt::Display for NterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One report slot per entry: (type, template slot, div id).
pub fn modorg_slots() -> &'static [(NterType, &'static str, &'static str)] {
    &[
        (NterType::CoBaHMA, "cobahma_oms", "cobahma-type-plot"),
        (NterType::X, "x_oms", "x-type-plot"),
        (NterType::Y, "y_oms", "y-type-plot"),
        (NterType::Z, "z_oms", "z-type-plot"),
        (NterType::Unknown, "unknown_oms", "unknown-type-plot"),
    ]
}
