use super::entities::RemarkStatus;
use serde::Deserialize;
use ts_rs::TS;

// 复核申请提交请求
//
// status 与 created_at 即使由调用方携带也会被忽略：
// 服务端强制初始状态为 Pending 并以服务器时间落创建时间戳。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct SubmitRemarkRequest {
    pub assessment_id: i64,
    pub course_id: String,
    pub reason: String,
    #[serde(default)]
    pub status: Option<RemarkStatus>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 复核裁定请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct ReviewRemarkRequest {
    /// 只接受 approved 或 rejected
    pub decision: RemarkStatus,
    pub response: Option<String>,
}

// 复核申请查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/remark.ts")]
pub struct RemarkListQuery {
    pub student_id: Option<i64>,
    pub course_id: Option<String>,
    pub status: Option<RemarkStatus>,
}
