pub mod list;
pub mod record;
pub mod report;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::grades::requests::{
    RecordGradeRequest, StudentMarksQuery, UpdateGradeRequest,
};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 当前学生的成绩列表
    pub async fn student_marks(
        &self,
        query: StudentMarksQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_student_marks(self, query, request).await
    }

    // 讲师录入成绩
    pub async fn record_grade(
        &self,
        grade_request: RecordGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::handle_record_grade(self, grade_request, request).await
    }

    // 讲师修改成绩
    pub async fn update_grade(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        record::handle_update_grade(self, grade_id, update, request).await
    }

    // 课程加权总评
    pub async fn course_total(
        &self,
        course_id: String,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::handle_course_total(self, course_id, student_id, request).await
    }

    // 导师名下学生总评报表
    pub async fn advisee_report(
        &self,
        advisor_username: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::handle_advisee_report(self, advisor_username, request).await
    }
}
