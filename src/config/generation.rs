// ==========================================
// 医生值班排班系统 - 排班参数配置
// ==========================================
// 职责: 一次排班运行的全部输入参数
// 约束: 参数校验在引擎入口统一执行 (见 engine::assigner)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 每人每月默认值班上限
pub const DEFAULT_SHIFT_CAP: u32 = 6;

/// 排班参数
///
/// `seed` 是整次运行唯一的随机来源: 日期顺序、角色顺序、约束判定
/// 全部确定,固定种子即可逐字节复现排班结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// 排班表ID (同ID重新排班会先清除旧记录)
    pub schedule_id: Uuid,
    /// 周期起始日 (含)
    pub start_date: NaiveDate,
    /// 周期结束日 (含)
    pub end_date: NaiveDate,
    /// 每人周期内值班上限
    pub shift_cap: u32,
    /// 随机种子
    pub seed: u64,
}

impl GenerationConfig {
    pub fn new(
        schedule_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        shift_cap: u32,
        seed: u64,
    ) -> Self {
        Self {
            schedule_id,
            start_date,
            end_date,
            shift_cap,
            seed,
        }
    }

    /// 周期天数 (含两端)
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_count_inclusive() {
        let config = GenerationConfig::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            DEFAULT_SHIFT_CAP,
            42,
        );
        assert_eq!(config.day_count(), 31);
    }

    #[test]
    fn test_single_day_period() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let config = GenerationConfig::new(Uuid::new_v4(), d, d, 1, 0);
        assert_eq!(config.day_count(), 1);
    }
}
