use std::sync::atomic::Ordering;

use super::MemoryStorage;
use crate::errors::{PortalError, Result};
use crate::models::remarks::{
    entities::{RemarkRequest, RemarkStatus},
    requests::{RemarkListQuery, SubmitRemarkRequest},
};

impl MemoryStorage {
    /// 提交复核申请
    ///
    /// 调用方携带的 status / created_at 一律忽略：初始状态强制 Pending，
    /// 创建时间以服务器时钟为准。
    pub(crate) fn submit_remark_request_impl(
        &self,
        student_id: i64,
        req: SubmitRemarkRequest,
    ) -> Result<RemarkRequest> {
        let mut remark_requests = self
            .remark_requests
            .write()
            .map_err(|_| PortalError::storage_operation("复核申请集合写锁中毒"))?;

        let remark = RemarkRequest {
            id: self.next_remark_id.fetch_add(1, Ordering::SeqCst),
            student_id,
            assessment_id: req.assessment_id,
            course_id: req.course_id,
            reason: req.reason,
            status: RemarkStatus::Pending,
            created_at: chrono::Utc::now(),
            response: None,
        };

        remark_requests.push(remark.clone());
        Ok(remark)
    }

    /// 列出复核申请
    pub(crate) fn list_remark_requests_impl(
        &self,
        query: RemarkListQuery,
    ) -> Result<Vec<RemarkRequest>> {
        let remark_requests = self
            .remark_requests
            .read()
            .map_err(|_| PortalError::storage_operation("复核申请集合读锁中毒"))?;
        Ok(remark_requests
            .iter()
            .filter(|r| query.student_id.is_none_or(|s| r.student_id == s))
            .filter(|r| query.course_id.as_deref().is_none_or(|c| r.course_id == c))
            .filter(|r| query.status.as_ref().is_none_or(|s| &r.status == s))
            .cloned()
            .collect())
    }

    /// 通过 ID 获取复核申请
    pub(crate) fn get_remark_request_by_id_impl(&self, id: i64) -> Result<Option<RemarkRequest>> {
        let remark_requests = self
            .remark_requests
            .read()
            .map_err(|_| PortalError::storage_operation("复核申请集合读锁中毒"))?;
        Ok(remark_requests.iter().find(|r| r.id == id).cloned())
    }

    /// 裁定复核申请
    ///
    /// 只允许 Pending -> Approved/Rejected；已裁定的申请返回冲突。
    pub(crate) fn review_remark_request_impl(
        &self,
        id: i64,
        decision: RemarkStatus,
        response: Option<String>,
    ) -> Result<Option<RemarkRequest>> {
        if decision == RemarkStatus::Pending {
            return Err(PortalError::validation(
                "Review decision must be approved or rejected",
            ));
        }

        let mut remark_requests = self
            .remark_requests
            .write()
            .map_err(|_| PortalError::storage_operation("复核申请集合写锁中毒"))?;

        let Some(remark) = remark_requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if remark.status != RemarkStatus::Pending {
            return Err(PortalError::conflict(format!(
                "Remark request {id} has already been reviewed"
            )));
        }

        remark.status = decision;
        remark.response = response;
        Ok(Some(remark.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn submit(assessment_id: i64) -> SubmitRemarkRequest {
        SubmitRemarkRequest {
            assessment_id,
            course_id: "CS101".to_string(),
            reason: "加总似乎有误".to_string(),
            status: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_caller_supplied_status_is_ignored() {
        let storage = MemoryStorage::new();
        let remark = storage
            .submit_remark_request(
                2,
                SubmitRemarkRequest {
                    assessment_id: 1,
                    course_id: "CS101".to_string(),
                    reason: "复核".to_string(),
                    status: Some(RemarkStatus::Approved),
                    created_at: Some(chrono::Utc::now() - chrono::Duration::days(30)),
                },
            )
            .await
            .unwrap();

        assert_eq!(remark.status, RemarkStatus::Pending);
        // 创建时间由服务端落，不会沿用 30 天前的伪造时间
        assert!(chrono::Utc::now() - remark.created_at < chrono::Duration::minutes(1));
    }

    #[tokio::test]
    async fn test_review_transitions_pending_only() {
        let storage = MemoryStorage::new();
        let remark = storage.submit_remark_request(2, submit(1)).await.unwrap();

        let reviewed = storage
            .review_remark_request(
                remark.id,
                RemarkStatus::Approved,
                Some("已复核，维持原分".to_string()),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.status, RemarkStatus::Approved);

        // 再次裁定已结案的申请被拒绝
        let err = storage
            .review_remark_request(remark.id, RemarkStatus::Rejected, None)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_review_unknown_id_returns_none() {
        let storage = MemoryStorage::new();
        let result = storage
            .review_remark_request(404, RemarkStatus::Approved, None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_pending_decision_rejected() {
        let storage = MemoryStorage::new();
        let remark = storage.submit_remark_request(2, submit(1)).await.unwrap();
        assert!(
            storage
                .review_remark_request(remark.id, RemarkStatus::Pending, None)
                .await
                .is_err()
        );
    }
}
