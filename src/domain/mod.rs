// ==========================================
// 医生值班排班系统 - 领域层
// ==========================================
// 职责: 实体与类型定义,不含业务规则
// ==========================================

pub mod doctor;
pub mod roster;
pub mod schedule;
pub mod types;

// 重导出核心实体
pub use doctor::Doctor;
pub use roster::{RolePool, Roster};
pub use schedule::{Schedule, ShiftAssignment};
pub use types::ScheduleStatus;
