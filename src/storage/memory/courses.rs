use super::MemoryStorage;
use crate::errors::{PortalError, Result};
use crate::models::{courses::entities::Course, users::entities::User};

impl MemoryStorage {
    /// 写入课程（启动种子数据）
    pub(crate) fn add_course_impl(&self, course: Course) -> Result<Course> {
        let mut courses = self
            .courses
            .write()
            .map_err(|_| PortalError::storage_operation("课程集合写锁中毒"))?;
        if courses.iter().any(|c| c.id == course.id) {
            return Err(PortalError::conflict(format!(
                "Course {} already exists",
                course.id
            )));
        }
        courses.push(course.clone());
        Ok(course)
    }

    /// 列出全部课程
    pub(crate) fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let courses = self
            .courses
            .read()
            .map_err(|_| PortalError::storage_operation("课程集合读锁中毒"))?;
        Ok(courses.clone())
    }

    /// 通过课程代号获取课程
    pub(crate) fn get_course_by_id_impl(&self, course_id: &str) -> Result<Option<Course>> {
        let courses = self
            .courses
            .read()
            .map_err(|_| PortalError::storage_operation("课程集合读锁中毒"))?;
        Ok(courses.iter().find(|c| c.id == course_id).cloned())
    }

    /// 讲师所授课程
    pub(crate) fn list_courses_for_lecturer_impl(&self, lecturer_id: i64) -> Result<Vec<Course>> {
        let courses = self
            .courses
            .read()
            .map_err(|_| PortalError::storage_operation("课程集合读锁中毒"))?;
        Ok(courses
            .iter()
            .filter(|c| c.lecturer_id == lecturer_id)
            .cloned()
            .collect())
    }

    /// 讲师名册：其所授课程的全部学生，去重并保持出现顺序
    pub(crate) fn list_students_for_lecturer_impl(&self, lecturer_id: i64) -> Result<Vec<User>> {
        let student_ids: Vec<i64> = {
            let courses = self
                .courses
                .read()
                .map_err(|_| PortalError::storage_operation("课程集合读锁中毒"))?;
            let mut seen = Vec::new();
            for course in courses.iter().filter(|c| c.lecturer_id == lecturer_id) {
                for id in &course.students {
                    if !seen.contains(id) {
                        seen.push(*id);
                    }
                }
            }
            seen
        };

        let users = self
            .users
            .read()
            .map_err(|_| PortalError::storage_operation("用户集合读锁中毒"))?;
        Ok(student_ids
            .into_iter()
            .filter_map(|id| users.iter().find(|u| u.id == id).cloned())
            .collect())
    }
}
