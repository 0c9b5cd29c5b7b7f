// ==========================================
// 医生值班排班系统 - 配置层
// ==========================================

pub mod generation;

pub use generation::{GenerationConfig, DEFAULT_SHIFT_CAP};
