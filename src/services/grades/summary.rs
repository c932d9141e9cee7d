//! 课程加权总评
//!
//! 总评 = Σ(得分率 × 权重) / Σ权重 × 100，只统计已批改的考核项。
//! 未批改或缺考核的项不进分子也不进分母，即"按已完成部分平均"，
//! 而不是把缺交按零分计入。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use std::time::Duration;

use super::GradeService;
use crate::errors::{PortalError, Result};
use crate::middlewares::RequireSession;
use crate::models::assessments::{entities::Assessment, requests::AssessmentListQuery};
use crate::models::grades::{
    entities::Grade,
    requests::GradeQuery,
    responses::CourseTotalResponse,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 加权总评计算
///
/// 对每个考核项取首个 assessment_id 匹配的成绩；录入层保证了
/// (student, assessment) 唯一，首个匹配即唯一匹配。
/// 悬空的 assessment_id（成绩引用了不存在的考核项）不参与聚合。
pub fn weighted_course_total(assessments: &[Assessment], grades: &[Grade]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weightage_sum = 0.0;

    for assessment in assessments {
        let graded = grades
            .iter()
            .find(|g| g.assessment_id == assessment.id)
            .and_then(|g| g.marks);

        if let Some(marks) = graded {
            let percentage = (marks / assessment.total_marks) * 100.0;
            weighted_sum += percentage * assessment.weightage / 100.0;
            weightage_sum += assessment.weightage;
        }
    }

    if weightage_sum > 0.0 {
        (weighted_sum / weightage_sum) * 100.0
    } else {
        // 该生在本课程无任何已批改成绩
        0.0
    }
}

/// 并发拉取学生成绩与课程考核项
///
/// 两路读取同时发出，任一失败整体失败，不提交部分结果；
/// 超时上限由配置给出，避免一路挂起拖住整个请求。
pub(crate) async fn fetch_course_records(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    course_id: &str,
    timeout_ms: u64,
) -> Result<(Vec<Grade>, Vec<Assessment>)> {
    let grades_fut = storage.list_grades(GradeQuery {
        student_id: Some(student_id),
        course_id: Some(course_id.to_string()),
    });
    let assessments_fut = storage.list_assessments(AssessmentListQuery {
        course_id: Some(course_id.to_string()),
    });

    match tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        futures_util::future::try_join(grades_fut, assessments_fut),
    )
    .await
    {
        Ok(joined) => joined,
        Err(_) => Err(PortalError::storage_operation(format!(
            "Course records fetch timed out after {timeout_ms} ms"
        ))),
    }
}

/// 检查当前身份是否可以查看该学生的课程总评
///
/// 放行顺序：管理员、本人、课程讲师、该生的导师。
async fn check_total_access(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    student_id: i64,
    course_id: &str,
) -> std::result::Result<(), HttpResponse> {
    // Admin 直接放行
    if current_user.role == UserRole::Admin {
        return Ok(());
    }

    // 本人可以查看自己的总评
    if current_user.id == student_id && current_user.role == UserRole::Student {
        return Ok(());
    }

    // 导师可以查看名下学生
    if current_user.role == UserRole::Advisor && current_user.advisees.contains(&student_id) {
        return Ok(());
    }

    // 课程讲师可以查看本课程学生
    if current_user.role == UserRole::Lecturer {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(course)) if course.lecturer_id == current_user.id => return Ok(()),
            Ok(_) => {}
            Err(e) => {
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询课程失败: {e}"),
                    )),
                );
            }
        }
    }

    Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::Forbidden,
        "没有查看该总评的权限",
    )))
}

/// 课程加权总评
/// GET /courses/{course_id}/students/{student_id}/total
pub async fn handle_course_total(
    service: &GradeService,
    course_id: String,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前身份
    let current_user = match RequireSession::extract_identity(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 权限验证
    if let Err(resp) = check_total_access(&storage, &current_user, student_id, &course_id).await {
        return Ok(resp);
    }

    let timeout_ms = service.get_config().server.timeouts.storage_fetch;

    // 拉取失败降级为零总评，不向调用方抛错
    let (grades, assessments) =
        match fetch_course_records(&storage, student_id, &course_id, timeout_ms).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Failed to fetch course records: {}", e);
                (Vec::new(), Vec::new())
            }
        };

    let total = weighted_course_total(&assessments, &grades);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseTotalResponse {
            student_id,
            course_id,
            total,
        },
        "查询成功",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::AssessmentKind;

    fn assessment(id: i64, total_marks: f64, weightage: f64) -> Assessment {
        Assessment {
            id,
            title: format!("Assessment {id}"),
            kind: AssessmentKind::Quiz,
            course_id: "CS101".to_string(),
            total_marks,
            weightage,
            due_date: chrono::Utc::now(),
            description: None,
        }
    }

    fn grade(assessment_id: i64, marks: Option<f64>) -> Grade {
        Grade {
            id: assessment_id,
            student_id: 2,
            assessment_id,
            course_id: "CS101".to_string(),
            marks,
            submitted_at: chrono::Utc::now(),
            feedback: None,
        }
    }

    #[test]
    fn test_no_grades_yields_zero() {
        let assessments = vec![assessment(1, 20.0, 10.0), assessment(2, 100.0, 25.0)];
        assert_eq!(weighted_course_total(&assessments, &[]), 0.0);
    }

    #[test]
    fn test_full_marks_yields_hundred() {
        let assessments = vec![
            assessment(1, 20.0, 10.0),
            assessment(2, 100.0, 25.0),
            assessment(3, 50.0, 65.0),
        ];
        let grades = vec![
            grade(1, Some(20.0)),
            grade(2, Some(100.0)),
            grade(3, Some(50.0)),
        ];
        let total = weighted_course_total(&assessments, &grades);
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_average_over_completed_work() {
        // 18/20 权重 10，85/100 权重 25，第三项未批改
        let assessments = vec![
            assessment(1, 20.0, 10.0),
            assessment(2, 100.0, 25.0),
            assessment(3, 100.0, 35.0),
        ];
        let grades = vec![grade(1, Some(18.0)), grade(2, Some(85.0))];

        let total = weighted_course_total(&assessments, &grades);
        // (9 + 21.25) / 35 * 100 ≈ 86.43
        assert!((total - 86.428_571_428_571_43).abs() < 1e-9);
    }

    #[test]
    fn test_ungraded_submission_excluded_from_both_sums() {
        let assessments = vec![assessment(1, 20.0, 10.0), assessment(2, 100.0, 25.0)];
        // 第二项已提交但 marks 为空，应与没有成绩等价
        let with_ungraded = vec![grade(1, Some(18.0)), grade(2, None)];
        let without = vec![grade(1, Some(18.0))];

        assert_eq!(
            weighted_course_total(&assessments, &with_ungraded),
            weighted_course_total(&assessments, &without)
        );
    }

    #[test]
    fn test_dangling_grade_reference_is_skipped() {
        let assessments = vec![assessment(1, 20.0, 10.0)];
        // assessment_id 99 不存在，该成绩被静默跳过
        let grades = vec![grade(1, Some(10.0)), grade(99, Some(100.0))];
        let total = weighted_course_total(&assessments, &grades);
        assert!((total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_overweighted_course_still_averages() {
        // 权重和超过 100 不被拒绝，聚合按实际权重归一
        let assessments = vec![assessment(1, 10.0, 80.0), assessment(2, 10.0, 60.0)];
        let grades = vec![grade(1, Some(10.0)), grade(2, Some(5.0))];
        let total = weighted_course_total(&assessments, &grades);
        // (80 + 30) / 140 * 100 ≈ 78.57
        assert!((total - 78.571_428_571_428_57).abs() < 1e-9);
    }
}
