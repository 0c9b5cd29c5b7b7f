// ==========================================
// 医生值班排班系统 - 填充事件
// ==========================================
// 职责: 记录排班过程中的约束退化事件,供上层展示/审计
// 红线: 所有退化必须输出事件,不允许静默放宽
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 填充事件类型
// ==========================================

/// 填充事件触发类型
///
/// 引擎在候选集退化时发布,调用方据此区分"放宽成功"与"彻底无人可排"。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillEventType {
    /// 严格候选集为空,放宽休息日规则后成功选人
    RestRuleRelaxed,
    /// 放宽后候选集仍为空,该 (日期, 角色) 缺岗
    RoleUnfilled,
}

impl FillEventType {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            FillEventType::RestRuleRelaxed => "RestRuleRelaxed",
            FillEventType::RoleUnfilled => "RoleUnfilled",
        }
    }
}

// ==========================================
// 填充事件
// ==========================================

/// 填充事件: 某 (日期, 角色) 的约束退化记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillEvent {
    /// 值班日期
    pub duty_date: NaiveDate,
    /// 角色名
    pub shift_role: String,
    /// 事件类型
    pub event_type: FillEventType,
    /// 事发时本池规模 (用于事后诊断池/上限配置)
    pub pool_size: usize,
}

impl FillEvent {
    pub fn relaxed(duty_date: NaiveDate, shift_role: impl Into<String>, pool_size: usize) -> Self {
        Self {
            duty_date,
            shift_role: shift_role.into(),
            event_type: FillEventType::RestRuleRelaxed,
            pool_size,
        }
    }

    pub fn unfilled(duty_date: NaiveDate, shift_role: impl Into<String>, pool_size: usize) -> Self {
        Self {
            duty_date,
            shift_role: shift_role.into(),
            event_type: FillEventType::RoleUnfilled,
            pool_size,
        }
    }
}
