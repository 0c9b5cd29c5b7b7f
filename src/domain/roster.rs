// ==========================================
// 医生值班排班系统 - 值班角色池
// ==========================================
// 红线: 各池互不相交,角色只从本池取人,不跨池借调
// 红线: 角色声明顺序即每日处理顺序 (先声明者先挑人)
// ==========================================

use crate::domain::doctor::Doctor;
use serde::{Deserialize, Serialize};

// ==========================================
// RolePool - 单角色候选池
// ==========================================

/// 值班角色池: 一个命名角色 + 其候选医生列表
///
/// 候选列表顺序即抽签时的候选遍历顺序,固定后不再变化,
/// 保证同种子下运行结果可复现。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePool {
    /// 角色名 (如 "Junior Resident" / "Attending")
    pub role_name: String,
    /// 本池候选医生
    pub doctors: Vec<Doctor>,
}

impl RolePool {
    pub fn new(role_name: impl Into<String>, doctors: Vec<Doctor>) -> Self {
        Self {
            role_name: role_name.into(),
            doctors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

// ==========================================
// Roster - 排班花名册
// ==========================================

/// 排班花名册: 按处理顺序排列的角色池集合
///
/// 池的声明顺序决定每日角色处理顺序,顺序在排班期内固定。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pools: Vec<RolePool>,
}

impl Roster {
    pub fn new(pools: Vec<RolePool>) -> Self {
        Self { pools }
    }

    /// 按声明顺序返回角色池
    pub fn pools(&self) -> &[RolePool] {
        &self.pools
    }

    /// 角色数量
    pub fn role_count(&self) -> usize {
        self.pools.len()
    }

    /// 全部医生数量 (各池之和)
    pub fn doctor_count(&self) -> usize {
        self.pools.iter().map(|p| p.doctors.len()).sum()
    }

    /// 按角色名查池
    pub fn find_pool(&self, role_name: &str) -> Option<&RolePool> {
        self.pools.iter().find(|p| p.role_name == role_name)
    }
}
