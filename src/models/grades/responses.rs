use super::entities::Grade;
use serde::Serialize;
use ts_rs::TS;

// 成绩列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
}

// 成绩响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeResponse {
    pub grade: Grade,
}

// 课程总评响应
//
// total 为 [0,100] 的加权百分比，只统计已批改的考核项。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CourseTotalResponse {
    pub student_id: i64,
    pub course_id: String,
    pub total: f64,
}

// 导师查看名下学生的课程总评
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct AdviseeReport {
    pub student_id: i64,
    pub display_name: String,
    pub totals: Vec<CourseTotalResponse>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct AdviseeReportResponse {
    pub items: Vec<AdviseeReport>,
}
