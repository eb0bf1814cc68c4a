use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;

use super::CourseService;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse,
    courses::{
        entities::DEFAULT_CREDITS,
        requests::{CreateCourseRequest, NewCourse},
        responses::CourseResponse,
    },
};
use crate::services::error_response;
use crate::utils::ids::parse_record_id;
use crate::utils::validate::{optional_trimmed, require_non_empty};

/// 学分：数字或数字字符串，缺失或无法解析时取默认值
pub(crate) fn coerce_credits(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|c| c.is_finite()).unwrap_or(DEFAULT_CREDITS)
}

/// 授课教师：未提供返回 None，格式错误返回校验错误
pub(crate) fn parse_assigned_teacher(value: &Value) -> Result<Option<i64>, SchoolError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        other => parse_record_id(other)
            .map(Some)
            .ok_or_else(|| SchoolError::validation("Invalid assignedTeacher id")),
    }
}

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = match require_non_empty(course_data.name.as_deref(), "name") {
        Ok(name) => name,
        Err(e) => return Ok(error_response(request, e)),
    };
    let assigned_teacher_id = match parse_assigned_teacher(&course_data.assigned_teacher) {
        Ok(id) => id,
        Err(e) => return Ok(error_response(request, e)),
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    // 引用的教师必须存在
    if let Some(teacher_id) = assigned_teacher_id {
        match storage.get_teacher_by_id(teacher_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(error_response(
                    request,
                    SchoolError::validation("Assigned teacher not found"),
                ));
            }
            Err(e) => return Ok(error_response(request, e)),
        }
    }

    let new_course = NewCourse {
        name,
        description: optional_trimmed(course_data.description),
        credits: coerce_credits(&course_data.credits),
        assigned_teacher_id,
    };

    match storage.create_course(new_course).await {
        Ok(course) => Ok(HttpResponse::Created().json(ApiResponse::success(
            CourseResponse { course },
            "Course created successfully",
        ))),
        Err(e) => Ok(error_response(request, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credits_coercion() {
        assert_eq!(coerce_credits(&json!(4)), 4.0);
        assert_eq!(coerce_credits(&json!("2.5")), 2.5);
        assert_eq!(coerce_credits(&json!("many")), DEFAULT_CREDITS);
        assert_eq!(coerce_credits(&Value::Null), DEFAULT_CREDITS);
    }

    #[test]
    fn test_assigned_teacher_parsing() {
        assert_eq!(parse_assigned_teacher(&Value::Null).unwrap(), None);
        assert_eq!(parse_assigned_teacher(&json!("")).unwrap(), None);
        assert_eq!(parse_assigned_teacher(&json!("12")).unwrap(), Some(12));
        assert!(parse_assigned_teacher(&json!("abc")).is_err());
        assert!(parse_assigned_teacher(&json!(-3)).is_err());
    }
}
