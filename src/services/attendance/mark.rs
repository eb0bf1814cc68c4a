use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::join_all;
use std::collections::HashSet;
use tracing::debug;

use super::{AttendanceService, collect_entries};
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, BulkWriteError, BulkWriteResult, ErrorCode,
    attendance::{
        entities::AttendanceMark, requests::MarkAttendanceRequest,
        responses::MarkAttendanceResponse,
    },
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::dates::{parse_date, start_of_day};
use crate::utils::ids::parse_record_id;

pub async fn mark_attendance(
    service: &AttendanceService,
    mark_data: MarkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(course_id) = parse_record_id(&mark_data.course) else {
        return Ok(error_response_with_code(
            request,
            SchoolError::validation("Invalid course id"),
            ErrorCode::AttendanceInvalid,
        ));
    };

    // 日期缺省为今天，统一归到 UTC 零点
    let date = match mark_data.date.as_deref().map(str::trim) {
        None | Some("") => start_of_day(chrono::Utc::now()),
        Some(raw) => match parse_date(raw) {
            Some(dt) => start_of_day(dt),
            None => {
                return Ok(error_response(
                    request,
                    SchoolError::date_parse(format!("Invalid date: {raw}")),
                ));
            }
        },
    };

    let entries = collect_entries(mark_data.entries);
    if entries.is_empty() {
        return Ok(error_response_with_code(
            request,
            SchoolError::validation("No valid attendance entries provided"),
            ErrorCode::AttendanceInvalid,
        ));
    }

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(error_response_with_code(
                request,
                SchoolError::not_found("Course not found"),
                ErrorCode::CourseNotFound,
            ));
        }
        Err(e) => return Ok(error_response(request, e)),
    }

    let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();
    let known: HashSet<i64> = match storage.existing_student_ids(&student_ids).await {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => return Ok(error_response(request, e)),
    };

    // 每条独立 upsert，并发执行，单条失败不影响其他条目
    let writes = entries.into_iter().enumerate().map(|(index, entry)| {
        let storage = storage.clone();
        let known = known.contains(&entry.student_id);
        async move {
            let student_id = entry.student_id;
            if !known {
                return Err(BulkWriteError {
                    index,
                    student_id,
                    message: "Student not found".to_string(),
                });
            }
            storage
                .upsert_attendance(AttendanceMark {
                    student_id,
                    course_id,
                    date,
                    status: entry.status,
                    remarks: entry.remarks,
                })
                .await
                .map_err(|e| BulkWriteError {
                    index,
                    student_id,
                    message: e.message().to_string(),
                })
        }
    });

    let mut result = BulkWriteResult {
        requested: student_ids.len(),
        ..Default::default()
    };
    for outcome in join_all(writes).await {
        match outcome {
            Ok(()) => result.succeeded += 1,
            Err(write_error) => result.write_errors.push(write_error),
        }
    }
    debug!(
        "Marked attendance for course {} on {}: {}/{} succeeded",
        course_id,
        date.format("%Y-%m-%d"),
        result.succeeded,
        result.requested
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MarkAttendanceResponse { result },
        "Attendance marked",
    )))
}
