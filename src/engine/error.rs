// ==========================================
// 医生值班排班系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 配置类错误在任何排班计算开始前快速失败
// ==========================================

use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 配置错误 (排班前快速失败) =====
    #[error("花名册为空: 没有任何角色池")]
    EmptyRoster,

    #[error("角色池为空: role={role_name}")]
    EmptyRolePool { role_name: String },

    #[error("角色名重复: role={role_name}")]
    DuplicateRoleName { role_name: String },

    #[error("医生跨池重复: doctor_id={doctor_id} 同时出现在 {first_role} 与 {second_role}")]
    DoctorInMultiplePools {
        doctor_id: Uuid,
        first_role: String,
        second_role: String,
    },

    #[error("日期区间无效: start={start} > end={end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("值班上限无效: cap 必须为正数")]
    NonPositiveShiftCap,
}

/// 排班全流程错误 (引擎 + 落库)
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("排班计算失败: {0}")]
    Engine(#[from] EngineError),

    #[error("排班结果落库失败: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
