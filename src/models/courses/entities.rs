use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程实体
//
// students 存学生用户 ID，讲师名册由此解析。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub lecturer_id: i64,
    pub credits: u32,
    pub semester: String,
    pub students: Vec<i64>,
}
