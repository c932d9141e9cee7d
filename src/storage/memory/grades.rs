use std::sync::atomic::Ordering;

use super::MemoryStorage;
use crate::errors::{PortalError, Result};
use crate::models::grades::{
    entities::Grade,
    requests::{GradeQuery, RecordGradeRequest, UpdateGradeRequest},
};

impl MemoryStorage {
    /// 录入成绩
    ///
    /// 同一 (student_id, assessment_id) 只允许一条记录，重复录入返回冲突。
    pub(crate) fn add_grade_impl(&self, req: RecordGradeRequest) -> Result<Grade> {
        let key = (req.student_id, req.assessment_id);
        if self.grade_index.contains_key(&key) {
            return Err(PortalError::conflict(format!(
                "Grade already recorded for student {} on assessment {}",
                req.student_id, req.assessment_id
            )));
        }

        let mut grades = self
            .grades
            .write()
            .map_err(|_| PortalError::storage_operation("成绩集合写锁中毒"))?;

        let grade = Grade {
            id: self.next_grade_id.fetch_add(1, Ordering::SeqCst),
            student_id: req.student_id,
            assessment_id: req.assessment_id,
            course_id: req.course_id,
            marks: req.marks,
            submitted_at: chrono::Utc::now(),
            feedback: req.feedback,
        };

        self.grade_index.insert(key, grade.id);
        grades.push(grade.clone());
        Ok(grade)
    }

    /// 修改成绩
    ///
    /// 未知 ID 不是错误：返回 Ok(None)，集合保持不变。
    pub(crate) fn update_grade_impl(
        &self,
        id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        let mut grades = self
            .grades
            .write()
            .map_err(|_| PortalError::storage_operation("成绩集合写锁中毒"))?;

        let Some(grade) = grades.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };

        if let Some(marks) = update.marks {
            grade.marks = Some(marks);
        }
        if let Some(feedback) = update.feedback {
            grade.feedback = Some(feedback);
        }

        Ok(Some(grade.clone()))
    }

    /// 查询成绩，保持写入顺序
    pub(crate) fn list_grades_impl(&self, query: GradeQuery) -> Result<Vec<Grade>> {
        let grades = self
            .grades
            .read()
            .map_err(|_| PortalError::storage_operation("成绩集合读锁中毒"))?;
        Ok(grades
            .iter()
            .filter(|g| query.student_id.is_none_or(|s| g.student_id == s))
            .filter(|g| query.course_id.as_deref().is_none_or(|c| g.course_id == c))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn record(student_id: i64, assessment_id: i64, marks: Option<f64>) -> RecordGradeRequest {
        RecordGradeRequest {
            student_id,
            assessment_id,
            course_id: "CS101".to_string(),
            marks,
            feedback: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_grade_rejected() {
        let storage = MemoryStorage::new();
        storage.add_grade(record(2, 1, Some(18.0))).await.unwrap();
        let err = storage.add_grade(record(2, 1, Some(19.0))).await.unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));

        // 集合未被第二次写入污染
        let grades = storage.list_grades(GradeQuery::default()).await.unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].marks, Some(18.0));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let storage = MemoryStorage::new();
        storage.add_grade(record(2, 1, Some(18.0))).await.unwrap();

        let result = storage
            .update_grade(
                9999,
                UpdateGradeRequest {
                    marks: Some(1.0),
                    feedback: Some("changed".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());

        let grades = storage.list_grades(GradeQuery::default()).await.unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].marks, Some(18.0));
        assert!(grades[0].feedback.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_student_and_course() {
        let storage = MemoryStorage::new();
        storage.add_grade(record(2, 1, Some(18.0))).await.unwrap();
        storage.add_grade(record(3, 1, Some(10.0))).await.unwrap();
        storage
            .add_grade(RecordGradeRequest {
                student_id: 2,
                assessment_id: 2,
                course_id: "MATH101".to_string(),
                marks: Some(70.0),
                feedback: None,
            })
            .await
            .unwrap();

        let all_for_student = storage
            .list_grades(GradeQuery {
                student_id: Some(2),
                course_id: None,
            })
            .await
            .unwrap();
        assert_eq!(all_for_student.len(), 2);

        let scoped = storage
            .list_grades(GradeQuery {
                student_id: Some(2),
                course_id: Some("CS101".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].assessment_id, 1);
    }
}
