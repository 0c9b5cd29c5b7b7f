// ==========================================
// 医生值班排班系统 - 引擎层
// ==========================================
// 职责: 实现排班业务规则,不拼 SQL
// 红线: 所有约束退化必须输出事件,不允许静默放宽
// ==========================================

pub mod assigner;
pub mod error;
pub mod events;
pub mod orchestrator;

// 重导出核心引擎
pub use assigner::{AssignmentOutcome, ShiftAssigner};
pub use error::{EngineError, EngineResult, GenerationError};
pub use events::{FillEvent, FillEventType};
pub use orchestrator::{GenerationResult, ScheduleOrchestrator};
