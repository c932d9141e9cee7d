use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考核类型
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum AssessmentKind {
    Quiz,       // 随堂测验
    Assignment, // 作业
    Test,       // 阶段测试
    Exam,       // 考试
}

impl<'de> Deserialize<'de> for AssessmentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "quiz" => Ok(AssessmentKind::Quiz),
            "assignment" => Ok(AssessmentKind::Assignment),
            "test" => Ok(AssessmentKind::Test),
            "exam" => Ok(AssessmentKind::Exam),
            _ => Err(serde::de::Error::custom(format!(
                "无效的考核类型: '{s}'. 支持的类型: quiz, assignment, test, exam"
            ))),
        }
    }
}

impl std::fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentKind::Quiz => write!(f, "quiz"),
            AssessmentKind::Assignment => write!(f, "assignment"),
            AssessmentKind::Test => write!(f, "test"),
            AssessmentKind::Exam => write!(f, "exam"),
        }
    }
}

// 考核项实体
//
// weightage 为该项占课程总评的百分点 (0-100)。
// 同一课程各项 weightage 之和不强制等于 100，由调用方自行把握。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub kind: AssessmentKind,
    pub course_id: String,
    pub total_marks: f64,
    pub weightage: f64,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub description: Option<String>,
}
