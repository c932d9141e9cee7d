// 业务错误码，随 ApiResponse 返回给前端
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,

    Unauthorized = 40100,
    AuthFailed = 40101,

    Forbidden = 40300,

    NotFound = 40400,
    UserNotFound = 40401,
    CourseNotFound = 40402,
    AssessmentNotFound = 40403,
    GradeNotFound = 40404,
    RemarkRequestNotFound = 40405,

    UserAlreadyExists = 40900,
    GradeAlreadyRecorded = 40901,
    RemarkAlreadySettled = 40902,

    ValidationFailed = 42200,
    UserNameInvalid = 42201,
    UserEmailInvalid = 42202,
    UserPasswordInvalid = 42203,
    MatricNumberInvalid = 42204,

    InternalServerError = 50000,
    UserCreationFailed = 50001,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::AuthFailed as i32, 40101);
        assert_eq!(ErrorCode::GradeAlreadyRecorded as i32, 40901);
    }
}
