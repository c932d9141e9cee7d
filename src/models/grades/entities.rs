use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩记录实体
//
// marks 为 None 表示已提交但尚未批改，聚合时按缺考核处理。
// assessment_id 不做引用完整性校验，悬空引用在聚合中被静默跳过。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub assessment_id: i64,
    pub course_id: String,
    pub marks: Option<f64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub feedback: Option<String>,
}
