pub mod stage1_extract;
pub mod stage2_sweep;
