// ==========================================
// 医生值班排班系统 - 值班分配引擎
// ==========================================
// 职责: 逐日逐角色分配值班人,输出值班记录与填充事件
// 红线: 月上限永远生效,放宽只豁免"昨日值过班"排除
// 红线: 随机只发生在选人一步,固定种子可逐字节复现
// ==========================================
// 输入: 花名册 (有序角色池) + 排班参数
// 输出: AssignmentOutcome (值班记录 + 填充事件)
// ==========================================

use crate::config::GenerationConfig;
use crate::domain::doctor::Doctor;
use crate::domain::roster::{RolePool, Roster};
use crate::domain::schedule::ShiftAssignment;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::events::{FillEvent, FillEventType};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, warn};
use uuid::Uuid;

// ==========================================
// AssignmentOutcome - 分配结果
// ==========================================

/// 一次排班运行的完整输出
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    /// 值班记录,按 (日期, 角色声明顺序) 排列
    pub assignments: Vec<ShiftAssignment>,
    /// 约束退化事件 (放宽 / 缺岗)
    pub fill_events: Vec<FillEvent>,
}

impl AssignmentOutcome {
    /// 放宽休息日规则的次数
    pub fn relaxation_count(&self) -> usize {
        self.fill_events
            .iter()
            .filter(|e| e.event_type == FillEventType::RestRuleRelaxed)
            .count()
    }

    /// 缺岗的 (日期, 角色) 数
    pub fn unfilled_count(&self) -> usize {
        self.fill_events
            .iter()
            .filter(|e| e.event_type == FillEventType::RoleUnfilled)
            .count()
    }
}

// ==========================================
// RunState - 运行期状态
// ==========================================
// 每次 generate 独立持有,运行之间互不影响

struct RunState {
    /// 周期内已分配次数 (只增不减)
    shift_counts: HashMap<Uuid, u32>,
    /// 昨日值班医生集合
    previous_day: HashSet<Uuid>,
    /// 今日已分配医生集合 (防同日兼岗)
    current_day: HashSet<Uuid>,
}

impl RunState {
    fn new() -> Self {
        Self {
            shift_counts: HashMap::new(),
            previous_day: HashSet::new(),
            current_day: HashSet::new(),
        }
    }

    fn count_of(&self, doctor_id: &Uuid) -> u32 {
        self.shift_counts.get(doctor_id).copied().unwrap_or(0)
    }

    fn commit(&mut self, doctor_id: Uuid) {
        *self.shift_counts.entry(doctor_id).or_insert(0) += 1;
        self.current_day.insert(doctor_id);
    }

    fn roll_over_day(&mut self) {
        self.previous_day = self.current_day.clone();
        self.current_day.clear();
    }
}

// ==========================================
// ShiftAssigner - 值班分配引擎
// ==========================================

pub struct ShiftAssigner {
    // 无状态引擎,运行期状态每次 generate 独立创建
}

impl ShiftAssigner {
    pub fn new() -> Self {
        Self {}
    }

    /// 输入参数校验 (任何分配计算前快速失败)
    ///
    /// 检查项: 花名册非空、各池非空、角色名唯一、医生不跨池、
    /// 日期区间合法、值班上限为正。
    pub fn validate(roster: &Roster, config: &GenerationConfig) -> EngineResult<()> {
        if config.start_date > config.end_date {
            return Err(EngineError::InvalidDateRange {
                start: config.start_date,
                end: config.end_date,
            });
        }
        if config.shift_cap == 0 {
            return Err(EngineError::NonPositiveShiftCap);
        }
        if roster.pools().is_empty() {
            return Err(EngineError::EmptyRoster);
        }

        let mut seen_roles: HashSet<&str> = HashSet::new();
        let mut seen_doctors: HashMap<Uuid, &str> = HashMap::new();

        for pool in roster.pools() {
            if pool.is_empty() {
                return Err(EngineError::EmptyRolePool {
                    role_name: pool.role_name.clone(),
                });
            }
            if !seen_roles.insert(pool.role_name.as_str()) {
                return Err(EngineError::DuplicateRoleName {
                    role_name: pool.role_name.clone(),
                });
            }
            for doctor in &pool.doctors {
                if let Some(first_role) =
                    seen_doctors.insert(doctor.doctor_id, pool.role_name.as_str())
                {
                    return Err(EngineError::DoctorInMultiplePools {
                        doctor_id: doctor.doctor_id,
                        first_role: first_role.to_string(),
                        second_role: pool.role_name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// 执行一次完整排班
    ///
    /// # 流程 (每个日期,按时间顺序)
    /// 1. 清空今日集合
    /// 2. 按角色声明顺序逐角色选人:
    ///    严格候选集 (未达上限 + 昨日未值班 + 今日未排) 均匀随机;
    ///    为空则放宽候选集 (只去掉昨日排除) 均匀随机并记录事件;
    ///    仍为空则缺岗并记录事件,继续后续角色
    /// 3. 昨日集合 := 今日集合副本
    ///
    /// # 返回
    /// - `Ok(AssignmentOutcome)`: 记录 + 事件 (缺岗不视为错误)
    /// - `Err(EngineError)`: 输入参数非法
    pub fn generate(
        &self,
        roster: &Roster,
        config: &GenerationConfig,
    ) -> EngineResult<AssignmentOutcome> {
        Self::validate(roster, config)?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut state = RunState::new();
        let mut assignments: Vec<ShiftAssignment> = Vec::new();
        let mut fill_events: Vec<FillEvent> = Vec::new();

        debug!(
            schedule_id = %config.schedule_id,
            start = %config.start_date,
            end = %config.end_date,
            shift_cap = config.shift_cap,
            roles = roster.role_count(),
            doctors = roster.doctor_count(),
            "开始排班"
        );

        let mut date = config.start_date;
        loop {
            for pool in roster.pools() {
                match self.fill_role(pool, date, config, &mut state, &mut rng, &mut fill_events) {
                    Some(doctor_id) => {
                        state.commit(doctor_id);
                        assignments.push(ShiftAssignment {
                            schedule_id: config.schedule_id,
                            duty_date: date,
                            shift_role: pool.role_name.clone(),
                            doctor_id,
                        });
                    }
                    None => {
                        // 缺岗已记录事件,继续处理后续角色
                    }
                }
            }

            state.roll_over_day();

            if date >= config.end_date {
                break;
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break, // 日历上界,实际不可达
            }
        }

        let outcome = AssignmentOutcome {
            assignments,
            fill_events,
        };

        debug!(
            assignments = outcome.assignments.len(),
            relaxations = outcome.relaxation_count(),
            unfilled = outcome.unfilled_count(),
            "排班完成"
        );

        Ok(outcome)
    }

    /// 为单个 (日期, 角色) 选人
    ///
    /// 返回选中的医生ID;彻底无人可排时返回 None (事件已记录)。
    fn fill_role(
        &self,
        pool: &RolePool,
        date: chrono::NaiveDate,
        config: &GenerationConfig,
        state: &mut RunState,
        rng: &mut StdRng,
        fill_events: &mut Vec<FillEvent>,
    ) -> Option<Uuid> {
        // 严格候选集: 未达上限 + 昨日未值班 + 今日未排
        let strict: Vec<&Doctor> = pool
            .doctors
            .iter()
            .filter(|d| {
                state.count_of(&d.doctor_id) < config.shift_cap
                    && !state.previous_day.contains(&d.doctor_id)
                    && !state.current_day.contains(&d.doctor_id)
            })
            .collect();

        if let Some(chosen) = strict.choose(rng) {
            return Some(chosen.doctor_id);
        }

        // 放宽候选集: 只豁免昨日排除,上限与同日排除仍生效
        let relaxed: Vec<&Doctor> = pool
            .doctors
            .iter()
            .filter(|d| {
                state.count_of(&d.doctor_id) < config.shift_cap
                    && !state.current_day.contains(&d.doctor_id)
            })
            .collect();

        if let Some(chosen) = relaxed.choose(rng) {
            warn!(
                duty_date = %date,
                role = %pool.role_name,
                pool_size = pool.doctors.len(),
                "严格候选集为空,已放宽休息日规则选人"
            );
            fill_events.push(FillEvent::relaxed(date, &pool.role_name, pool.doctors.len()));
            return Some(chosen.doctor_id);
        }

        error!(
            duty_date = %date,
            role = %pool.role_name,
            pool_size = pool.doctors.len(),
            "放宽后仍无候选,该角色当日缺岗 (检查池规模与值班上限配置)"
        );
        fill_events.push(FillEvent::unfilled(date, &pool.role_name, pool.doctors.len()));
        None
    }
}

impl Default for ShiftAssigner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::events::FillEventType;
    use chrono::NaiveDate;

    // ==========================================
    // 测试数据准备
    // ==========================================

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn make_pool(role_name: &str, size: usize) -> RolePool {
        let doctors = (0..size)
            .map(|i| Doctor::new(Uuid::new_v4(), format!("{} 医生{}", role_name, i + 1), role_name))
            .collect();
        RolePool::new(role_name, doctors)
    }

    fn make_config(start_day: u32, end_day: u32, cap: u32, seed: u64) -> GenerationConfig {
        GenerationConfig::new(Uuid::new_v4(), date(start_day), date(end_day), cap, seed)
    }

    // ==========================================
    // 参数校验
    // ==========================================

    #[test]
    fn test_validate_rejects_empty_roster() {
        let roster = Roster::new(vec![]);
        let config = make_config(1, 31, 6, 0);
        assert!(matches!(
            ShiftAssigner::validate(&roster, &config),
            Err(EngineError::EmptyRoster)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let roster = Roster::new(vec![RolePool::new("Attending", vec![])]);
        let config = make_config(1, 31, 6, 0);
        assert!(matches!(
            ShiftAssigner::validate(&roster, &config),
            Err(EngineError::EmptyRolePool { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_date_range() {
        let roster = Roster::new(vec![make_pool("Attending", 3)]);
        let config = make_config(10, 1, 6, 0);
        assert!(matches!(
            ShiftAssigner::validate(&roster, &config),
            Err(EngineError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let roster = Roster::new(vec![make_pool("Attending", 3)]);
        let config = make_config(1, 31, 0, 0);
        assert!(matches!(
            ShiftAssigner::validate(&roster, &config),
            Err(EngineError::NonPositiveShiftCap)
        ));
    }

    #[test]
    fn test_validate_rejects_doctor_in_two_pools() {
        let shared = Doctor::new(Uuid::new_v4(), "跨池医生", "junior");
        let roster = Roster::new(vec![
            RolePool::new("Junior Resident", vec![shared.clone()]),
            RolePool::new("Senior Resident", vec![shared]),
        ]);
        let config = make_config(1, 31, 6, 0);
        assert!(matches!(
            ShiftAssigner::validate(&roster, &config),
            Err(EngineError::DoctorInMultiplePools { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_role_name() {
        let roster = Roster::new(vec![make_pool("Attending", 2), make_pool("Attending", 2)]);
        let config = make_config(1, 31, 6, 0);
        assert!(matches!(
            ShiftAssigner::validate(&roster, &config),
            Err(EngineError::DuplicateRoleName { .. })
        ));
    }

    // ==========================================
    // 基础分配行为
    // ==========================================

    #[test]
    fn test_one_assignment_per_role_per_day() {
        let roster = Roster::new(vec![make_pool("Junior Resident", 5), make_pool("Attending", 5)]);
        let config = make_config(1, 7, 6, 42);
        let outcome = ShiftAssigner::new().generate(&roster, &config).unwrap();

        assert_eq!(outcome.assignments.len(), 2 * 7);
        assert_eq!(outcome.unfilled_count(), 0);
    }

    #[test]
    fn test_cap_never_exceeded_even_under_relaxation() {
        // 2人池 + 31天,必然频繁放宽,但上限始终生效
        let roster = Roster::new(vec![make_pool("Attending", 2)]);
        let config = make_config(1, 31, 6, 7);
        let outcome = ShiftAssigner::new().generate(&roster, &config).unwrap();

        let mut counts: HashMap<Uuid, u32> = HashMap::new();
        for a in &outcome.assignments {
            *counts.entry(a.doctor_id).or_insert(0) += 1;
        }
        for (_, c) in counts {
            assert!(c <= 6);
        }
        // 2人×6次=12 为总供给上限
        assert!(outcome.assignments.len() <= 12);
    }

    #[test]
    fn test_no_doctor_twice_same_day() {
        let roster = Roster::new(vec![
            make_pool("Junior Resident", 5),
            make_pool("Senior Resident", 5),
            make_pool("Attending", 5),
        ]);
        let config = make_config(1, 31, 6, 11);
        let outcome = ShiftAssigner::new().generate(&roster, &config).unwrap();

        let mut by_day: HashMap<NaiveDate, HashSet<Uuid>> = HashMap::new();
        for a in &outcome.assignments {
            assert!(
                by_day.entry(a.duty_date).or_default().insert(a.doctor_id),
                "医生 {} 在 {} 被重复排班",
                a.doctor_id,
                a.duty_date
            );
        }
    }

    #[test]
    fn test_assignee_always_from_declared_pool() {
        let junior = make_pool("Junior Resident", 4);
        let attending = make_pool("Attending", 4);
        let junior_ids: HashSet<Uuid> = junior.doctors.iter().map(|d| d.doctor_id).collect();
        let attending_ids: HashSet<Uuid> = attending.doctors.iter().map(|d| d.doctor_id).collect();

        let roster = Roster::new(vec![junior, attending]);
        let config = make_config(1, 14, 6, 3);
        let outcome = ShiftAssigner::new().generate(&roster, &config).unwrap();

        for a in &outcome.assignments {
            match a.shift_role.as_str() {
                "Junior Resident" => assert!(junior_ids.contains(&a.doctor_id)),
                "Attending" => assert!(attending_ids.contains(&a.doctor_id)),
                other => panic!("未知角色: {}", other),
            }
        }
    }

    #[test]
    fn test_rest_rule_holds_unless_relaxation_reported() {
        let roster = Roster::new(vec![make_pool("Junior Resident", 5), make_pool("Attending", 5)]);
        let config = make_config(1, 31, 6, 99);
        let outcome = ShiftAssigner::new().generate(&roster, &config).unwrap();

        let relaxed: HashSet<(NaiveDate, &str)> = outcome
            .fill_events
            .iter()
            .filter(|e| e.event_type == FillEventType::RestRuleRelaxed)
            .map(|e| (e.duty_date, e.shift_role.as_str()))
            .collect();

        let mut by_day: HashMap<NaiveDate, HashSet<Uuid>> = HashMap::new();
        for a in &outcome.assignments {
            by_day.entry(a.duty_date).or_default().insert(a.doctor_id);
        }

        for a in &outcome.assignments {
            if let Some(prev) = a.duty_date.pred_opt() {
                if let Some(yesterday) = by_day.get(&prev) {
                    if yesterday.contains(&a.doctor_id) {
                        assert!(
                            relaxed.contains(&(a.duty_date, a.shift_role.as_str())),
                            "{} {} 违反休息日规则但未记录放宽事件",
                            a.duty_date,
                            a.shift_role
                        );
                    }
                }
            }
        }
    }

    // ==========================================
    // 退化路径
    // ==========================================

    #[test]
    fn test_single_doctor_pool_relaxes_then_runs_dry() {
        // 1人池: 第1天严格成功,第2天起只能放宽;
        // 第6次 (上限) 用完后,此后每天缺岗
        let roster = Roster::new(vec![make_pool("Attending", 1)]);
        let config = make_config(1, 10, 6, 5);
        let outcome = ShiftAssigner::new().generate(&roster, &config).unwrap();

        assert_eq!(outcome.assignments.len(), 6);
        assert_eq!(outcome.relaxation_count(), 5); // 第2~6天
        assert_eq!(outcome.unfilled_count(), 4); // 第7~10天

        // 缺岗日连续排在周期末尾
        let unfilled_dates: Vec<NaiveDate> = outcome
            .fill_events
            .iter()
            .filter(|e| e.event_type == FillEventType::RoleUnfilled)
            .map(|e| e.duty_date)
            .collect();
        assert_eq!(unfilled_dates, vec![date(7), date(8), date(9), date(10)]);
    }

    #[test]
    fn test_unfilled_role_does_not_abort_other_roles() {
        // 第一个池会枯竭,第二个池始终充足
        let roster = Roster::new(vec![make_pool("Junior Resident", 1), make_pool("Attending", 8)]);
        let config = make_config(1, 10, 6, 13);
        let outcome = ShiftAssigner::new().generate(&roster, &config).unwrap();

        let attending_count = outcome
            .assignments
            .iter()
            .filter(|a| a.shift_role == "Attending")
            .count();
        assert_eq!(attending_count, 10, "缺岗角色不得中断后续角色的排班");
    }

    // ==========================================
    // 确定性
    // ==========================================

    #[test]
    fn test_same_seed_reproduces_identical_run() {
        let roster = Roster::new(vec![
            make_pool("Junior Resident", 6),
            make_pool("Intermediate Resident", 6),
            make_pool("Senior Resident", 6),
            make_pool("Attending", 8),
        ]);
        let config = make_config(1, 31, 6, 20260101);

        let first = ShiftAssigner::new().generate(&roster, &config).unwrap();
        let second = ShiftAssigner::new().generate(&roster, &config).unwrap();

        assert_eq!(first.assignments, second.assignments);
        assert_eq!(first.fill_events, second.fill_events);
    }

    #[test]
    fn test_different_seed_changes_selection() {
        let roster = Roster::new(vec![make_pool("Attending", 10)]);
        let config_a = GenerationConfig::new(Uuid::new_v4(), date(1), date(31), 6, 1);
        let mut config_b = config_a.clone();
        config_b.seed = 2;

        let a = ShiftAssigner::new().generate(&roster, &config_a).unwrap();
        let b = ShiftAssigner::new().generate(&roster, &config_b).unwrap();

        let picks_a: Vec<Uuid> = a.assignments.iter().map(|x| x.doctor_id).collect();
        let picks_b: Vec<Uuid> = b.assignments.iter().map(|x| x.doctor_id).collect();
        assert_ne!(picks_a, picks_b, "不同种子得到完全相同的31天选择序列概率可忽略");
    }
}
