pub mod list;
pub mod roster;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 课程列表
    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list_courses(self, request).await
    }

    // 课程详情
    pub async fn get_course(
        &self,
        course_id: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_get_course(self, course_id, request).await
    }

    // 讲师名册
    pub async fn lecturer_students(
        &self,
        lecturer_username: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        roster::handle_lecturer_students(self, lecturer_username, request).await
    }
}
