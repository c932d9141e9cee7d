use std::sync::Arc;

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

use crate::errors::Result;

pub mod memory;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱、学号或用户名获取用户信息（登录标识符）
    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<i64>;

    /// 课程管理方法
    // 写入课程（用于启动种子数据）
    async fn add_course(&self, course: Course) -> Result<Course>;
    // 列出全部课程，保持写入顺序
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 通过课程代号获取课程
    async fn get_course_by_id(&self, course_id: &str) -> Result<Option<Course>>;
    // 讲师所授课程
    async fn list_courses_for_lecturer(&self, lecturer_id: i64) -> Result<Vec<Course>>;
    // 讲师名册：其所授课程的全部学生，去重并保持出现顺序
    async fn list_students_for_lecturer(&self, lecturer_id: i64) -> Result<Vec<User>>;

    /// 考核项管理方法
    // 新增考核项，分配单调递增 ID
    async fn add_assessment(&self, req: CreateAssessmentRequest) -> Result<Assessment>;
    // 列出考核项，可按课程过滤，保持写入顺序
    async fn list_assessments(&self, query: AssessmentListQuery) -> Result<Vec<Assessment>>;
    // 通过ID获取考核项
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;

    /// 成绩管理方法
    // 录入成绩；同一 (student_id, assessment_id) 只允许一条记录
    async fn add_grade(&self, req: RecordGradeRequest) -> Result<Grade>;
    // 修改成绩；未知 ID 返回 Ok(None)，集合不变
    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>>;
    // 查询成绩，按条件过滤，保持写入顺序
    async fn list_grades(&self, query: GradeQuery) -> Result<Vec<Grade>>;

    /// 复核申请管理方法
    // 提交复核申请；状态强制 Pending，创建时间由服务端落
    async fn submit_remark_request(
        &self,
        student_id: i64,
        req: SubmitRemarkRequest,
    ) -> Result<RemarkRequest>;
    // 列出复核申请
    async fn list_remark_requests(&self, query: RemarkListQuery) -> Result<Vec<RemarkRequest>>;
    // 通过ID获取复核申请
    async fn get_remark_request_by_id(&self, id: i64) -> Result<Option<RemarkRequest>>;
    // 裁定复核申请；只允许 Pending -> Approved/Rejected
    async fn review_remark_request(
        &self,
        id: i64,
        decision: RemarkStatus,
        response: Option<String>,
    ) -> Result<Option<RemarkRequest>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = memory::MemoryStorage::new();
    Ok(Arc::new(storage))
}
