use super::entities::AssessmentKind;
use serde::Deserialize;
use ts_rs::TS;

// 考核项创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CreateAssessmentRequest {
    pub title: String,
    pub kind: AssessmentKind,
    pub course_id: String,
    pub total_marks: f64,
    pub weightage: f64,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub description: Option<String>,
}

// 考核项查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListQuery {
    pub course_id: Option<String>,
}
