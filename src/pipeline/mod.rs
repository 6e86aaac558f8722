pub mod stage1_load;
pub mod stage2_aggregate;
pub mod stage3_charts;
pub mod stage4_modorg;
pub mod stage5_nested;
pub mod stage6_render;
