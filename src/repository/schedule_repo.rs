// ==========================================
// 医生值班排班系统 - 排班表数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// 约束: 同一 schedule_id 重写必须先清后插,保证 (日期, 角色) 唯一
// ==========================================

use crate::domain::schedule::{Schedule, ShiftAssignment};
use crate::domain::types::ScheduleStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// ScheduleRepository - 排班表仓储
// ==========================================
pub struct ScheduleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScheduleRepository {
    /// 创建新的 ScheduleRepository 实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 幂等创建排班表 (已存在则静默跳过)
    pub fn create_if_absent(&self, schedule: &Schedule) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO schedules (id, month, status)
               VALUES (?, ?, ?)
               ON CONFLICT(id) DO NOTHING"#,
            params![
                &schedule.schedule_id.to_string(),
                &schedule.month,
                &schedule.status.to_string(),
            ],
        )?;

        Ok(())
    }

    /// 按ID查询排班表
    ///
    /// # 返回
    /// - `Ok(Some(Schedule))`: 找到
    /// - `Ok(None)`: 未找到
    pub fn find_by_id(&self, schedule_id: &Uuid) -> RepositoryResult<Option<Schedule>> {
        let conn = self.get_conn()?;

        match conn.query_row(
            r#"SELECT id, month, status FROM schedules WHERE id = ?"#,
            params![&schedule_id.to_string()],
            map_schedule_row,
        ) {
            Ok(schedule) => Ok(Some(schedule)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 清除指定排班表的全部值班记录
    ///
    /// # 返回
    /// - `Ok(usize)`: 删除的记录数
    pub fn clear_shifts(&self, schedule_id: &Uuid) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        let deleted = conn.execute(
            "DELETE FROM shifts WHERE schedule_id = ?",
            params![&schedule_id.to_string()],
        )?;

        Ok(deleted)
    }

    /// 批量写入值班记录 (单事务)
    ///
    /// # 返回
    /// - `Ok(usize)`: 写入的记录数
    pub fn insert_shifts(&self, assignments: &[ShiftAssignment]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        for a in assignments {
            tx.execute(
                r#"INSERT INTO shifts (schedule_id, duty_date, shift_role, doctor_id)
                   VALUES (?, ?, ?, ?)"#,
                params![
                    &a.schedule_id.to_string(),
                    &a.duty_date,
                    &a.shift_role,
                    &a.doctor_id.to_string(),
                ],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(assignments.len())
    }

    /// 整体落库: 幂等建表项 + 清旧记录 + 写新记录 (单事务)
    ///
    /// 同一 schedule_id 重复调用后,每个 (日期, 角色) 恰好保留一条记录。
    pub fn persist(
        &self,
        schedule: &Schedule,
        assignments: &[ShiftAssignment],
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"INSERT INTO schedules (id, month, status)
               VALUES (?, ?, ?)
               ON CONFLICT(id) DO NOTHING"#,
            params![
                &schedule.schedule_id.to_string(),
                &schedule.month,
                &schedule.status.to_string(),
            ],
        )?;

        tx.execute(
            "DELETE FROM shifts WHERE schedule_id = ?",
            params![&schedule.schedule_id.to_string()],
        )?;

        for a in assignments {
            tx.execute(
                r#"INSERT INTO shifts (schedule_id, duty_date, shift_role, doctor_id)
                   VALUES (?, ?, ?, ?)"#,
                params![
                    &a.schedule_id.to_string(),
                    &a.duty_date,
                    &a.shift_role,
                    &a.doctor_id.to_string(),
                ],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(assignments.len())
    }

    /// 查询排班表的全部值班记录,按写入顺序 (日期升序, 角色处理顺序)
    pub fn list_shifts(&self, schedule_id: &Uuid) -> RepositoryResult<Vec<ShiftAssignment>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"SELECT schedule_id, duty_date, shift_role, doctor_id
               FROM shifts
               WHERE schedule_id = ?
               ORDER BY duty_date ASC, rowid ASC"#,
        )?;

        let shifts = stmt
            .query_map(params![&schedule_id.to_string()], map_shift_row)?
            .collect::<Result<Vec<ShiftAssignment>, _>>()?;

        Ok(shifts)
    }

    /// 统计排班表的值班记录数
    pub fn count_shifts(&self, schedule_id: &Uuid) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM shifts WHERE schedule_id = ?",
            params![&schedule_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}

// ==========================================
// 行映射
// ==========================================

fn map_schedule_row(row: &Row<'_>) -> rusqlite::Result<Schedule> {
    let id: String = row.get(0)?;
    let month: NaiveDate = row.get(1)?;
    let status: String = row.get(2)?;

    Ok(Schedule {
        schedule_id: parse_uuid(0, &id)?,
        month,
        status: parse_status(2, &status)?,
    })
}

fn map_shift_row(row: &Row<'_>) -> rusqlite::Result<ShiftAssignment> {
    let schedule_id: String = row.get(0)?;
    let duty_date: NaiveDate = row.get(1)?;
    let shift_role: String = row.get(2)?;
    let doctor_id: String = row.get(3)?;

    Ok(ShiftAssignment {
        schedule_id: parse_uuid(0, &schedule_id)?,
        duty_date,
        shift_role,
        doctor_id: parse_uuid(3, &doctor_id)?,
    })
}

fn parse_uuid(idx: usize, raw: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_status(idx: usize, raw: &str) -> rusqlite::Result<ScheduleStatus> {
    match raw {
        "DRAFT" => Ok(ScheduleStatus::Draft),
        "FINAL" => Ok(ScheduleStatus::Final),
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("未知排班表状态: {}", other).into(),
        )),
    }
}
