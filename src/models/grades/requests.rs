use serde::Deserialize;
use ts_rs::TS;

// 成绩录入请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordGradeRequest {
    pub student_id: i64,
    pub assessment_id: i64,
    pub course_id: String,
    pub marks: Option<f64>,
    pub feedback: Option<String>,
}

// 成绩修改请求，未提供的字段保持原值
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub marks: Option<f64>,
    pub feedback: Option<String>,
}

// 学生成绩查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentMarksQuery {
    pub course_id: Option<String>,
}

// 成绩查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GradeQuery {
    pub student_id: Option<i64>,
    pub course_id: Option<String>,
}
