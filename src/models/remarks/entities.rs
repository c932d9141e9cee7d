use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 复核申请状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub enum RemarkStatus {
    Pending,  // 待处理
    Approved, // 已通过
    Rejected, // 已驳回
}

impl<'de> Deserialize<'de> for RemarkStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "pending" => Ok(RemarkStatus::Pending),
            "approved" => Ok(RemarkStatus::Approved),
            "rejected" => Ok(RemarkStatus::Rejected),
            _ => Err(serde::de::Error::custom(format!(
                "无效的复核状态: '{s}'. 支持的状态: pending, approved, rejected"
            ))),
        }
    }
}

impl std::fmt::Display for RemarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemarkStatus::Pending => write!(f, "pending"),
            RemarkStatus::Approved => write!(f, "approved"),
            RemarkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

// 成绩复核申请实体
//
// 由学生发起，创建时一律为 Pending；状态流转只允许 Pending -> Approved/Rejected。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct RemarkRequest {
    pub id: i64,
    pub student_id: i64,
    pub assessment_id: i64,
    pub course_id: String,
    pub reason: String,
    pub status: RemarkStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub response: Option<String>,
}
