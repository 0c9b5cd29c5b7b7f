// ==========================================
// 医生值班排班系统 - 排班表与值班记录
// ==========================================
// 职责: 排班输出实体,与 schedules / shifts 表一一对应
// ==========================================

use crate::domain::types::ScheduleStatus;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Schedule - 排班表
// ==========================================

/// 排班表: 一个排班周期的标识实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// 排班表ID
    pub schedule_id: Uuid,
    /// 所属月份 (当月1日)
    pub month: NaiveDate,
    /// 状态
    pub status: ScheduleStatus,
}

impl Schedule {
    /// 按起始日期创建定稿排班表 (month 归一化到当月1日)
    pub fn final_for(schedule_id: Uuid, period_start: NaiveDate) -> Self {
        let month = NaiveDate::from_ymd_opt(period_start.year(), period_start.month(), 1)
            .unwrap_or(period_start);
        Self {
            schedule_id,
            month,
            status: ScheduleStatus::Final,
        }
    }
}

// ==========================================
// ShiftAssignment - 值班记录
// ==========================================

/// 值班记录: (日期, 角色, 医生) 三元组,排班引擎的输出单元
///
/// 正常情况下每个 (日期, 角色) 恰好一条;角色填充失败时缺省。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// 所属排班表ID
    pub schedule_id: Uuid,
    /// 值班日期
    pub duty_date: NaiveDate,
    /// 值班角色名
    pub shift_role: String,
    /// 医生ID
    pub doctor_id: Uuid,
}
