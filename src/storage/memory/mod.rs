//! 内存存储实现
//!
//! 记录集合以进程内共享的形式保存，写入顺序即遍历顺序。
//! 会话内 ID 由原子计数器分配，单调且唯一。

mod assessments;
mod courses;
mod grades;
mod remarks;
mod users;

use dashmap::DashMap;
use std::sync::RwLock;
use std::sync::atomic::AtomicI64;

use crate::errors::Result;
use crate::models::{
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest},
    },
    courses::entities::Course,
    grades::{
        entities::Grade,
        requests::{GradeQuery, RecordGradeRequest, UpdateGradeRequest},
    },
    remarks::{
        entities::{RemarkRequest, RemarkStatus},
        requests::{RemarkListQuery, SubmitRemarkRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;

pub struct MemoryStorage {
    pub(crate) users: RwLock<Vec<User>>,
    pub(crate) courses: RwLock<Vec<Course>>,
    pub(crate) assessments: RwLock<Vec<Assessment>>,
    pub(crate) grades: RwLock<Vec<Grade>>,
    pub(crate) remark_requests: RwLock<Vec<RemarkRequest>>,
    // (student_id, assessment_id) -> grade_id，录入时的唯一性索引
    pub(crate) grade_index: DashMap<(i64, i64), i64>,
    pub(crate) next_user_id: AtomicI64,
    pub(crate) next_assessment_id: AtomicI64,
    pub(crate) next_grade_id: AtomicI64,
    pub(crate) next_remark_id: AtomicI64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            courses: RwLock::new(Vec::new()),
            assessments: RwLock::new(Vec::new()),
            grades: RwLock::new(Vec::new()),
            remark_requests: RwLock::new(Vec::new()),
            grade_index: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_assessment_id: AtomicI64::new(1),
            next_grade_id: AtomicI64::new(1),
            next_remark_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username)
    }

    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_identifier_impl(identifier)
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query)
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update)
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id)
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id)
    }

    async fn count_users(&self) -> Result<i64> {
        self.count_users_impl()
    }

    // 课程模块
    async fn add_course(&self, course: Course) -> Result<Course> {
        self.add_course_impl(course)
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl()
    }

    async fn get_course_by_id(&self, course_id: &str) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id)
    }

    async fn list_courses_for_lecturer(&self, lecturer_id: i64) -> Result<Vec<Course>> {
        self.list_courses_for_lecturer_impl(lecturer_id)
    }

    async fn list_students_for_lecturer(&self, lecturer_id: i64) -> Result<Vec<User>> {
        self.list_students_for_lecturer_impl(lecturer_id)
    }

    // 考核项模块
    async fn add_assessment(&self, req: CreateAssessmentRequest) -> Result<Assessment> {
        self.add_assessment_impl(req)
    }

    async fn list_assessments(&self, query: AssessmentListQuery) -> Result<Vec<Assessment>> {
        self.list_assessments_impl(query)
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(id)
    }

    // 成绩模块
    async fn add_grade(&self, req: RecordGradeRequest) -> Result<Grade> {
        self.add_grade_impl(req)
    }

    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>> {
        self.update_grade_impl(id, update)
    }

    async fn list_grades(&self, query: GradeQuery) -> Result<Vec<Grade>> {
        self.list_grades_impl(query)
    }

    // 复核申请模块
    async fn submit_remark_request(
        &self,
        student_id: i64,
        req: SubmitRemarkRequest,
    ) -> Result<RemarkRequest> {
        self.submit_remark_request_impl(student_id, req)
    }

    async fn list_remark_requests(&self, query: RemarkListQuery) -> Result<Vec<RemarkRequest>> {
        self.list_remark_requests_impl(query)
    }

    async fn get_remark_request_by_id(&self, id: i64) -> Result<Option<RemarkRequest>> {
        self.get_remark_request_by_id_impl(id)
    }

    async fn review_remark_request(
        &self,
        id: i64,
        decision: RemarkStatus,
        response: Option<String>,
    ) -> Result<Option<RemarkRequest>> {
        self.review_remark_request_impl(id, decision, response)
    }
}
