use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, parse_status};
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::UpdateAttendanceRequest, responses::AttendanceResponse},
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::ids::parse_record_id;
use crate::utils::validate::optional_trimmed;

pub async fn update_attendance(
    service: &AttendanceService,
    update_data: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(id) = parse_record_id(&update_data.id) else {
        return Ok(error_response(
            request,
            SchoolError::validation("Invalid attendance id"),
        ));
    };

    let status = match update_data.status.as_deref() {
        None => None,
        Some(raw) => match parse_status(raw) {
            Some(status) => Some(status),
            None => {
                return Ok(error_response_with_code(
                    request,
                    SchoolError::validation(format!("Invalid attendance status: {raw}")),
                    ErrorCode::AttendanceInvalid,
                ));
            }
        },
    };
    // null 或空串清除备注
    let remarks = update_data.remarks.map(optional_trimmed);

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.update_attendance(id, status, remarks).await {
        Ok(Some(attendance)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceResponse { attendance },
            "Attendance updated",
        ))),
        Ok(None) => Ok(error_response_with_code(
            request,
            SchoolError::not_found("Attendance record not found"),
            ErrorCode::AttendanceNotFound,
        )),
        Err(e) => Ok(error_response(request, e)),
    }
}
