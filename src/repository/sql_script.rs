// ==========================================
// 医生值班排班系统 - SQL 脚本输出
// ==========================================
// 职责: 将排班结果渲染为可重放的持久化语句序列
// 用途: 离线交付/人工审阅场景,不直接连库
// 约束: 语句顺序 = 建表项 → 清旧记录 → 逐条写入,与仓储落库一致
// ==========================================

use crate::domain::schedule::{Schedule, ShiftAssignment};
use std::io::Write;
use std::path::Path;

// ==========================================
// SqlScriptWriter - SQL 脚本输出器
// ==========================================
pub struct SqlScriptWriter {
    // 无状态,纯渲染
}

impl SqlScriptWriter {
    pub fn new() -> Self {
        Self {}
    }

    /// 渲染完整语句序列
    ///
    /// # 语句顺序
    /// 1. 幂等建排班表项 (ON CONFLICT DO NOTHING)
    /// 2. 清除同 schedule_id 的旧值班记录
    /// 3. 按引擎输出顺序逐条写入值班记录
    pub fn render(&self, schedule: &Schedule, assignments: &[ShiftAssignment]) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(assignments.len() + 2);

        lines.push(format!(
            "INSERT INTO schedules (id, month, status) VALUES ('{}', '{}', '{}') ON CONFLICT DO NOTHING;",
            schedule.schedule_id,
            schedule.month.format("%Y-%m-%d"),
            schedule.status,
        ));
        lines.push(format!(
            "DELETE FROM shifts WHERE schedule_id = '{}';",
            schedule.schedule_id,
        ));

        for a in assignments {
            lines.push(format!(
                "INSERT INTO shifts (schedule_id, duty_date, shift_role, doctor_id) VALUES ('{}', '{}', '{}', '{}');",
                a.schedule_id,
                a.duty_date.format("%Y-%m-%d"),
                escape_sql_text(&a.shift_role),
                a.doctor_id,
            ));
        }

        lines.join("\n")
    }

    /// 渲染并写入文件
    pub fn write_to_file(
        &self,
        path: &Path,
        schedule: &Schedule,
        assignments: &[ShiftAssignment],
    ) -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(self.render(schedule, assignments).as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}

impl Default for SqlScriptWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 单引号转义 (角色名为自由文本,其余字段为 UUID/日期字面量)
fn escape_sql_text(raw: &str) -> String {
    raw.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ScheduleStatus;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_schedule() -> Schedule {
        Schedule {
            schedule_id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440020").unwrap(),
            month: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            status: ScheduleStatus::Final,
        }
    }

    #[test]
    fn test_render_statement_order_and_format() {
        let schedule = sample_schedule();
        let doctor_id = Uuid::parse_str("dd22325b-c89c-401a-abf0-4e41a95e294f").unwrap();
        let assignments = vec![ShiftAssignment {
            schedule_id: schedule.schedule_id,
            duty_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            shift_role: "Junior Resident".to_string(),
            doctor_id,
        }];

        let script = SqlScriptWriter::new().render(&schedule, &assignments);
        let lines: Vec<&str> = script.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "INSERT INTO schedules (id, month, status) VALUES ('550e8400-e29b-41d4-a716-446655440020', '2026-01-01', 'FINAL') ON CONFLICT DO NOTHING;"
        );
        assert_eq!(
            lines[1],
            "DELETE FROM shifts WHERE schedule_id = '550e8400-e29b-41d4-a716-446655440020';"
        );
        assert_eq!(
            lines[2],
            "INSERT INTO shifts (schedule_id, duty_date, shift_role, doctor_id) VALUES ('550e8400-e29b-41d4-a716-446655440020', '2026-01-05', 'Junior Resident', 'dd22325b-c89c-401a-abf0-4e41a95e294f');"
        );
    }

    #[test]
    fn test_role_name_quote_escaping() {
        let schedule = sample_schedule();
        let assignments = vec![ShiftAssignment {
            schedule_id: schedule.schedule_id,
            duty_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            shift_role: "O'Brien Ward".to_string(),
            doctor_id: Uuid::new_v4(),
        }];

        let script = SqlScriptWriter::new().render(&schedule, &assignments);
        assert!(script.contains("'O''Brien Ward'"));
    }
}
