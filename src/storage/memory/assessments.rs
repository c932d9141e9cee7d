use std::sync::atomic::Ordering;

use super::MemoryStorage;
use crate::errors::{PortalError, Result};
use crate::models::assessments::{
    entities::Assessment,
    requests::{AssessmentListQuery, CreateAssessmentRequest},
};

impl MemoryStorage {
    /// 新增考核项
    pub(crate) fn add_assessment_impl(&self, req: CreateAssessmentRequest) -> Result<Assessment> {
        if req.total_marks <= 0.0 {
            return Err(PortalError::validation("total_marks must be positive"));
        }
        if !(0.0..=100.0).contains(&req.weightage) {
            return Err(PortalError::validation(
                "weightage must be between 0 and 100",
            ));
        }

        let mut assessments = self
            .assessments
            .write()
            .map_err(|_| PortalError::storage_operation("考核项集合写锁中毒"))?;

        let assessment = Assessment {
            id: self.next_assessment_id.fetch_add(1, Ordering::SeqCst),
            title: req.title,
            kind: req.kind,
            course_id: req.course_id,
            total_marks: req.total_marks,
            weightage: req.weightage,
            due_date: req.due_date,
            description: req.description,
        };

        assessments.push(assessment.clone());
        Ok(assessment)
    }

    /// 列出考核项，可按课程过滤，保持写入顺序
    pub(crate) fn list_assessments_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<Vec<Assessment>> {
        let assessments = self
            .assessments
            .read()
            .map_err(|_| PortalError::storage_operation("考核项集合读锁中毒"))?;
        Ok(assessments
            .iter()
            .filter(|a| query.course_id.as_deref().is_none_or(|c| a.course_id == c))
            .cloned()
            .collect())
    }

    /// 通过 ID 获取考核项
    pub(crate) fn get_assessment_by_id_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let assessments = self
            .assessments
            .read()
            .map_err(|_| PortalError::storage_operation("考核项集合读锁中毒"))?;
        Ok(assessments.iter().find(|a| a.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::AssessmentKind;
    use crate::storage::Storage;

    fn quiz(course: &str, weightage: f64) -> CreateAssessmentRequest {
        CreateAssessmentRequest {
            title: "Quiz".to_string(),
            kind: AssessmentKind::Quiz,
            course_id: course.to_string(),
            total_marks: 20.0,
            weightage,
            due_date: chrono::Utc::now(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_course_filter_preserves_insertion_order() {
        let storage = MemoryStorage::new();
        storage.add_assessment(quiz("CS101", 10.0)).await.unwrap();
        storage.add_assessment(quiz("MATH101", 20.0)).await.unwrap();
        storage.add_assessment(quiz("CS101", 30.0)).await.unwrap();

        let cs = storage
            .list_assessments(AssessmentListQuery {
                course_id: Some("CS101".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(cs.len(), 2);
        assert!(cs[0].id < cs[1].id);
        assert_eq!(cs[0].weightage, 10.0);
    }

    #[tokio::test]
    async fn test_invalid_total_marks_rejected() {
        let storage = MemoryStorage::new();
        let mut req = quiz("CS101", 10.0);
        req.total_marks = 0.0;
        assert!(storage.add_assessment(req).await.is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_weightage_rejected() {
        let storage = MemoryStorage::new();
        assert!(storage.add_assessment(quiz("CS101", 120.0)).await.is_err());
    }
}
