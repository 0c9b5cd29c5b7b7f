// ==========================================
// 医生值班排班系统 - 医生主数据
// ==========================================
// 职责: 医生实体定义,排班运行期内不可变
// ==========================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 医生主数据
///
/// `pool_tag` 标识医生所属的值班池,一名医生只属于一个池。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// 医生唯一标识
    pub doctor_id: Uuid,
    /// 姓名 (展示用)
    pub full_name: String,
    /// 值班池标签 (决定可担任的值班角色)
    pub pool_tag: String,
}

impl Doctor {
    pub fn new(doctor_id: Uuid, full_name: impl Into<String>, pool_tag: impl Into<String>) -> Self {
        Self {
            doctor_id,
            full_name: full_name.into(),
            pool_tag: pool_tag.into(),
        }
    }
}
