use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::{Result, SchoolError};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        requests::{CreateStudentRequest, NewStudent},
        responses::StudentResponse,
    },
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::dates::parse_date;
use crate::utils::validate::{optional_trimmed, require_non_empty, validate_email};

/// 校验请求并转换为待写入的学生
pub(crate) fn build_new_student(data: CreateStudentRequest) -> Result<NewStudent> {
    let name = require_non_empty(data.name.as_deref(), "name")?;
    let email = require_non_empty(data.email.as_deref(), "email")?.to_lowercase();
    let grade = require_non_empty(data.grade.as_deref(), "grade")?;
    let parent_contact = require_non_empty(data.parent_contact.as_deref(), "parentContact")?;
    validate_email(&email).map_err(SchoolError::validation)?;

    let enrollment_date = match optional_trimmed(data.enrollment_date) {
        Some(raw) => parse_date(&raw)
            .ok_or_else(|| SchoolError::date_parse(format!("Invalid enrollmentDate: {raw}")))?,
        None => chrono::Utc::now(),
    };
    let dob = match optional_trimmed(data.dob) {
        Some(raw) => Some(
            parse_date(&raw).ok_or_else(|| SchoolError::date_parse(format!("Invalid dob: {raw}")))?,
        ),
        None => None,
    };

    // meta 只接受 JSON 对象
    let meta = match data.meta {
        Some(serde_json::Value::Null) | None => None,
        Some(value @ serde_json::Value::Object(_)) => Some(value),
        Some(_) => return Err(SchoolError::validation("meta must be an object")),
    };

    Ok(NewStudent {
        name,
        email,
        grade,
        enrollment_date,
        parent_contact,
        first_name: optional_trimmed(data.first_name),
        last_name: optional_trimmed(data.last_name),
        dob,
        gender: optional_trimmed(data.gender),
        nationality: optional_trimmed(data.nationality),
        contact_no: optional_trimmed(data.contact_no),
        photo_url: optional_trimmed(data.photo_url),
        admission_no: optional_trimmed(data.admission_no),
        roll_no: optional_trimmed(data.roll_no),
        blood_group: optional_trimmed(data.blood_group),
        category: optional_trimmed(data.category),
        religion: optional_trimmed(data.religion),
        student_address: optional_trimmed(data.student_address),
        address_same_as_student: data.address_same_as_student,
        parent: data.parent,
        meta,
    })
}

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let new_student = match build_new_student(student_data) {
        Ok(student) => student,
        Err(e) => return Ok(error_response(request, e)),
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.create_student(new_student).await {
        Ok(student) => Ok(HttpResponse::Created().json(ApiResponse::success(
            StudentResponse { student },
            "Student created successfully",
        ))),
        Err(SchoolError::Conflict(_)) => Ok(error_response_with_code(
            request,
            SchoolError::conflict("A student with this email already exists."),
            ErrorCode::StudentAlreadyExists,
        )),
        Err(e) => Ok(error_response(request, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            name: Some("  Ada Lovelace ".to_string()),
            email: Some("Ada@School.Test".to_string()),
            grade: Some("10".to_string()),
            parent_contact: Some("555-0100".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_trims_and_lowercases() {
        let student = build_new_student(request()).unwrap();
        assert_eq!(student.name, "Ada Lovelace");
        assert_eq!(student.email, "ada@school.test");
        assert!(student.dob.is_none());
    }

    #[test]
    fn test_blank_required_field_is_rejected() {
        let mut data = request();
        data.grade = Some("   ".to_string());
        let err = build_new_student(data).unwrap_err();
        assert_eq!(err.message(), "grade is required");
    }

    #[test]
    fn test_enrollment_date_is_parsed() {
        let mut data = request();
        data.enrollment_date = Some("2024-09-01".to_string());
        let student = build_new_student(data).unwrap();
        assert_eq!(student.enrollment_date.format("%Y-%m-%d").to_string(), "2024-09-01");
    }

    #[test]
    fn test_bad_dates_and_meta_are_rejected() {
        let mut data = request();
        data.dob = Some("yesterday".to_string());
        assert!(matches!(build_new_student(data), Err(SchoolError::DateParse(_))));

        let mut data = request();
        data.meta = Some(serde_json::json!([1, 2]));
        assert!(matches!(build_new_student(data), Err(SchoolError::Validation(_))));
    }
}
