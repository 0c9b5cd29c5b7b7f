// ==========================================
// 医生值班排班系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - 内嵌 schema,首次打开即可用
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout(毫秒)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 内嵌 schema DDL
///
/// shifts 表对 (schedule_id, duty_date, shift_role) 做唯一约束:
/// 正常流程先清后插不会触发,触发即说明调用方绕过了仓储层。
const SCHEMA_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS schedules (
    id     TEXT PRIMARY KEY,
    month  TEXT NOT NULL,
    status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS shifts (
    schedule_id TEXT NOT NULL,
    duty_date   TEXT NOT NULL,
    shift_role  TEXT NOT NULL,
    doctor_id   TEXT NOT NULL,
    UNIQUE (schedule_id, duty_date, shift_role)
);

CREATE INDEX IF NOT EXISTS idx_shifts_schedule ON shifts (schedule_id);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明:
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 初始化 schema(幂等)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_DDL)
}

/// 打开 SQLite 连接并应用统一配置与 schema
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// 打开内存库 (测试用)
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}
