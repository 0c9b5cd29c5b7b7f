// ==========================================
// 医生值班排班系统 - 导入层
// ==========================================
// 职责: 外部数据接入 (花名册)
// ==========================================

pub mod roster_json;

pub use roster_json::{load_roster, ImportError, RoleSpec};
