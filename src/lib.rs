// ==========================================
// 医生值班排班系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 批处理排班引擎 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 排班规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 排班参数
pub mod config;

// 数据库基础设施(连接初始化/PRAGMA/schema 统一)
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::ScheduleStatus;

// 领域实体
pub use domain::{Doctor, RolePool, Roster, Schedule, ShiftAssignment};

// 引擎
pub use engine::{
    AssignmentOutcome, EngineError, FillEvent, FillEventType, GenerationError, GenerationResult,
    ScheduleOrchestrator, ShiftAssigner,
};

// 配置
pub use config::{GenerationConfig, DEFAULT_SHIFT_CAP};

// 仓储
pub use repository::{RepositoryError, ScheduleRepository, SqlScriptWriter};

// 导入
pub use importer::{load_roster, ImportError, RoleSpec};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "医生值班排班系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
