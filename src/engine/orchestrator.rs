// ==========================================
// 医生值班排班系统 - 排班流程编排器
// ==========================================
// 用途: 协调 校验 → 分配 → 落库 的执行顺序
// 约束: 全流程同步顺序执行,运行之间状态完全隔离
// ==========================================

use crate::config::GenerationConfig;
use crate::domain::roster::Roster;
use crate::domain::schedule::Schedule;
use crate::engine::assigner::{AssignmentOutcome, ShiftAssigner};
use crate::engine::error::{EngineResult, GenerationError};
use crate::repository::ScheduleRepository;
use tracing::{info, warn};

// ==========================================
// GenerationResult - 排班落库结果
// ==========================================

#[derive(Debug)]
pub struct GenerationResult {
    /// 排班表实体
    pub schedule: Schedule,
    /// 分配结果 (记录 + 填充事件)
    pub outcome: AssignmentOutcome,
    /// 实际落库记录数
    pub persisted: usize,
}

// ==========================================
// ScheduleOrchestrator - 排班流程编排器
// ==========================================

pub struct ScheduleOrchestrator {
    assigner: ShiftAssigner,
}

impl ScheduleOrchestrator {
    /// 创建新的编排器实例
    pub fn new() -> Self {
        Self {
            assigner: ShiftAssigner::new(),
        }
    }

    /// 纯计算: 校验并生成排班,不触库
    pub fn generate(
        &self,
        roster: &Roster,
        config: &GenerationConfig,
    ) -> EngineResult<(Schedule, AssignmentOutcome)> {
        let outcome = self.assigner.generate(roster, config)?;
        let schedule = Schedule::final_for(config.schedule_id, config.start_date);
        Ok((schedule, outcome))
    }

    /// 生成并落库
    ///
    /// 同一 schedule_id 重复执行为幂等重排: 旧值班记录先被清除,
    /// 落库后每个 (日期, 角色) 恰好一条记录。
    pub fn generate_and_persist(
        &self,
        roster: &Roster,
        config: &GenerationConfig,
        repo: &ScheduleRepository,
    ) -> Result<GenerationResult, GenerationError> {
        info!(
            schedule_id = %config.schedule_id,
            start = %config.start_date,
            end = %config.end_date,
            "开始排班流程"
        );

        let (schedule, outcome) = self.generate(roster, config)?;
        let persisted = repo.persist(&schedule, &outcome.assignments)?;

        if outcome.unfilled_count() > 0 {
            warn!(
                unfilled = outcome.unfilled_count(),
                "存在缺岗 (日期, 角色),请检查池规模与值班上限配置"
            );
        }

        info!(
            schedule_id = %schedule.schedule_id,
            assignments = outcome.assignments.len(),
            relaxations = outcome.relaxation_count(),
            unfilled = outcome.unfilled_count(),
            persisted,
            "排班流程完成"
        );

        Ok(GenerationResult {
            schedule,
            outcome,
            persisted,
        })
    }
}

impl Default for ScheduleOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
