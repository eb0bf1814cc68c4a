use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AttendanceService, is_blank};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::DeleteAttendanceRequest, responses::DeleteAttendanceResponse},
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::dates::{parse_date, start_of_day};
use crate::utils::ids::parse_record_id;

/// 删除目标
#[derive(Debug, PartialEq)]
pub(crate) enum DeleteTarget {
    Record(i64),
    /// 课程 id 与当天 UTC 零点
    Day { course_id: i64, day_start: i64 },
}

/// id 优先；否则需要 course 与 date 同时提供
pub(crate) fn resolve_target(data: &DeleteAttendanceRequest) -> Result<DeleteTarget> {
    if !is_blank(&data.id) {
        return parse_record_id(&data.id)
            .map(DeleteTarget::Record)
            .ok_or_else(|| SchoolError::validation("Invalid attendance id"));
    }

    let date = data.date.as_deref().map(str::trim).filter(|d| !d.is_empty());
    match (is_blank(&data.course), date) {
        (false, Some(raw)) => {
            let course_id = parse_record_id(&data.course)
                .ok_or_else(|| SchoolError::validation("Invalid course id"))?;
            let day = parse_date(raw)
                .ok_or_else(|| SchoolError::date_parse(format!("Invalid date: {raw}")))?;
            Ok(DeleteTarget::Day {
                course_id,
                day_start: start_of_day(day).timestamp(),
            })
        }
        _ => Err(SchoolError::validation(
            "Provide either an attendance id or a course and date",
        )),
    }
}

pub async fn delete_attendance(
    service: &AttendanceService,
    delete_data: DeleteAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let target = match resolve_target(&delete_data) {
        Ok(target) => target,
        Err(e) => return Ok(error_response(request, e)),
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    let deleted = match target {
        DeleteTarget::Record(id) => match storage.delete_attendance_by_id(id).await {
            Ok(true) => 1,
            Ok(false) => {
                return Ok(error_response_with_code(
                    request,
                    SchoolError::not_found("Attendance record not found"),
                    ErrorCode::AttendanceNotFound,
                ));
            }
            Err(e) => return Ok(error_response(request, e)),
        },
        DeleteTarget::Day {
            course_id,
            day_start,
        } => match storage.delete_attendance_for_day(course_id, day_start).await {
            Ok(count) => {
                info!(
                    "Deleted {} attendance records for course {} on day {}",
                    count, course_id, day_start
                );
                count
            }
            Err(e) => return Ok(error_response(request, e)),
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DeleteAttendanceResponse { deleted },
        "Attendance deleted",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_takes_precedence() {
        let data = DeleteAttendanceRequest {
            id: json!("12"),
            course: json!(3),
            date: Some("2025-01-10".to_string()),
        };
        assert_eq!(resolve_target(&data).unwrap(), DeleteTarget::Record(12));
    }

    #[test]
    fn test_course_and_date_resolve_to_day() {
        let data = DeleteAttendanceRequest {
            course: json!(3),
            date: Some("2025-01-10T15:00:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_target(&data).unwrap(),
            DeleteTarget::Day {
                course_id: 3,
                day_start: 1_736_467_200
            }
        );
    }

    #[test]
    fn test_missing_target_is_rejected() {
        let data = DeleteAttendanceRequest {
            course: json!(3),
            ..Default::default()
        };
        assert!(matches!(resolve_target(&data), Err(SchoolError::Validation(_))));
        assert!(resolve_target(&DeleteAttendanceRequest::default()).is_err());
    }
}
