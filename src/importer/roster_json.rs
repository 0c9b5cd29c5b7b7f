// ==========================================
// 医生值班排班系统 - 花名册 JSON 导入
// ==========================================
// 职责: 解析医生名单 JSON,按池标签分组为有序角色池
// 约束: 未知池标签直接报错,不静默丢弃医生
// ==========================================

use crate::domain::doctor::Doctor;
use crate::domain::roster::{RolePool, Roster};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

// ==========================================
// 导入错误类型
// ==========================================

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("花名册 JSON 解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("未知池标签: doctor_id={doctor_id} pool_tag={pool_tag}")]
    UnknownPoolTag { doctor_id: Uuid, pool_tag: String },
}

// ==========================================
// 输入格式
// ==========================================

/// 花名册 JSON 单条记录
#[derive(Debug, Deserialize)]
struct DoctorRecord {
    id: Uuid,
    full_name: String,
    pool_tag: String,
}

/// 角色声明: 角色名 + 对应池标签
///
/// 声明顺序即引擎的每日角色处理顺序。
#[derive(Debug, Clone)]
pub struct RoleSpec {
    pub role_name: String,
    pub pool_tag: String,
}

impl RoleSpec {
    pub fn new(role_name: impl Into<String>, pool_tag: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
            pool_tag: pool_tag.into(),
        }
    }
}

// ==========================================
// 导入入口
// ==========================================

/// 解析花名册 JSON 并按角色声明分组
///
/// 每条记录按 `pool_tag` 归入对应角色池,池内保持输入顺序
/// (池内顺序参与抽签遍历,需稳定)。
pub fn load_roster(json: &str, roles: &[RoleSpec]) -> Result<Roster, ImportError> {
    let records: Vec<DoctorRecord> = serde_json::from_str(json)?;

    let mut pools: Vec<RolePool> = roles
        .iter()
        .map(|r| RolePool::new(r.role_name.clone(), Vec::new()))
        .collect();

    for record in records {
        let slot = roles
            .iter()
            .position(|r| r.pool_tag == record.pool_tag)
            .ok_or_else(|| ImportError::UnknownPoolTag {
                doctor_id: record.id,
                pool_tag: record.pool_tag.clone(),
            })?;
        pools[slot]
            .doctors
            .push(Doctor::new(record.id, record.full_name, record.pool_tag));
    }

    let roster = Roster::new(pools);
    info!(
        roles = roster.role_count(),
        doctors = roster.doctor_count(),
        "花名册导入完成"
    );
    Ok(roster)
}
