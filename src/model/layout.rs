#[derive(Debug, Clone)]
pub struct LayoutProfile {
    pub sample_stride: usize,
    pub lane_height_px: u32,
    pub scaling_min_lanes: usize,
    pub floor_height_px: u32,
    pub chart_width_px: u32,
    pub decision_tree_height_px: u32,
}

impl LayoutProfile {
    pub fn default_v1() -> Self {
        Self {
            sample_stride: 20,
            lane_height_px: 10,
            scaling_min_lanes: 100,
            floor_height_px: 700,
            chart_width_px: 1000,
            decision_tree_height_px: 750,
        }
    }

    /// Pixel height of a lane diagram holding `lanes` sequences.
    pub fn modorg_height(&self, lanes: usize) -> u32 {
        if lanes > self.scaling_min_lanes {
            self.lane_height_px.saturating_mul(lanes as u32)
        } else {
            self.floor_height_px
        }
    }
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}
