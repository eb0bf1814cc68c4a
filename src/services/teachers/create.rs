use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::{Result, SchoolError};
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{
        requests::{CreateTeacherRequest, NewTeacher},
        responses::TeacherResponse,
    },
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::dates::parse_date;
use crate::utils::validate::{optional_trimmed, require_non_empty, validate_email};

pub(crate) fn build_new_teacher(data: CreateTeacherRequest) -> Result<NewTeacher> {
    let name = require_non_empty(data.name.as_deref(), "name")?;
    let email = require_non_empty(data.email.as_deref(), "email")?.to_lowercase();
    let subject_specialty =
        require_non_empty(data.subject_specialty.as_deref(), "subjectSpecialty")?;
    validate_email(&email).map_err(SchoolError::validation)?;

    let hire_date = match optional_trimmed(data.hire_date) {
        Some(raw) => parse_date(&raw)
            .ok_or_else(|| SchoolError::date_parse(format!("Invalid hireDate: {raw}")))?,
        None => chrono::Utc::now(),
    };

    Ok(NewTeacher {
        name,
        email,
        subject_specialty,
        hire_date,
    })
}

pub async fn create_teacher(
    service: &TeacherService,
    teacher_data: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let new_teacher = match build_new_teacher(teacher_data) {
        Ok(teacher) => teacher,
        Err(e) => return Ok(error_response(request, e)),
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.create_teacher(new_teacher).await {
        Ok(teacher) => Ok(HttpResponse::Created().json(ApiResponse::success(
            TeacherResponse { teacher },
            "Teacher created successfully",
        ))),
        Err(SchoolError::Conflict(_)) => Ok(error_response_with_code(
            request,
            SchoolError::conflict("A teacher with this email already exists."),
            ErrorCode::TeacherAlreadyExists,
        )),
        Err(e) => Ok(error_response(request, e)),
    }
}
