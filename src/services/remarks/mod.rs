pub mod list;
pub mod review;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::remarks::requests::{RemarkListQuery, ReviewRemarkRequest, SubmitRemarkRequest};
use crate::storage::Storage;

pub struct RemarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl RemarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生提交复核申请
    pub async fn submit(
        &self,
        submit_request: SubmitRemarkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, submit_request, request).await
    }

    // 复核申请列表
    pub async fn list(
        &self,
        query: RemarkListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list(self, query, request).await
    }

    // 讲师裁定复核申请
    pub async fn review(
        &self,
        remark_id: i64,
        review_request: ReviewRemarkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        review::handle_review(self, remark_id, review_request, request).await
    }
}
