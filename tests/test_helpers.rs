// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、花名册生成等功能
// ==========================================
#![allow(dead_code)]

use duty_roster::db;
use duty_roster::{Doctor, GenerationConfig, RolePool, Roster, ScheduleRepository};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件(需要保持存活)
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let _conn = db::open_sqlite_connection(&db_path)?;

    Ok((temp_file, db_path))
}

/// 创建内存库仓储 (大多数测试用)
pub fn in_memory_repo() -> ScheduleRepository {
    let conn = db::open_in_memory().expect("内存库初始化失败");
    ScheduleRepository::new(Arc::new(Mutex::new(conn)))
}

/// 创建测试花名册: 每个 (角色名, 池规模) 一个池
pub fn make_roster(specs: &[(&str, usize)]) -> Roster {
    let pools = specs
        .iter()
        .map(|(role_name, size)| {
            let doctors = (0..*size)
                .map(|i| {
                    Doctor::new(
                        Uuid::new_v4(),
                        format!("{} 医生{}", role_name, i + 1),
                        *role_name,
                    )
                })
                .collect();
            RolePool::new(*role_name, doctors)
        })
        .collect();
    Roster::new(pools)
}

/// 2026年1月的排班参数
pub fn january_config(schedule_id: Uuid, shift_cap: u32, seed: u64) -> GenerationConfig {
    GenerationConfig::new(
        schedule_id,
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        shift_cap,
        seed,
    )
}

/// 直接查询 shifts 表行数 (绕过仓储,用于交叉验证)
pub fn raw_shift_count(conn: &Connection, schedule_id: &Uuid) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM shifts WHERE schedule_id = ?",
        [schedule_id.to_string()],
        |row| row.get(0),
    )
    .unwrap()
}
