use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::errors::{Result, SchoolError};
use crate::models::{
    ApiResponse, PaginationInfo,
    attendance::{
        requests::{AttendanceFilter, AttendanceListQuery},
        responses::AttendanceListResponse,
    },
};
use crate::services::error_response;
use crate::utils::dates::{day_bounds, parse_date};
use crate::utils::ids::parse_id_str;

fn parse_bound(raw: Option<&str>, field: &str) -> Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw)
            .map(|dt| Some(dt.timestamp()))
            .ok_or_else(|| SchoolError::date_parse(format!("Invalid {field}: {raw}"))),
    }
}

/// 构建查询过滤条件：date 优先于 from/to，非法 id 被忽略
pub(crate) fn build_filter(query: &AttendanceListQuery) -> Result<AttendanceFilter> {
    let mut filter = AttendanceFilter {
        course_id: query.course.as_deref().and_then(parse_id_str),
        student_id: query.student.as_deref().and_then(parse_id_str),
        ..Default::default()
    };

    match query.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            let day = parse_date(raw)
                .ok_or_else(|| SchoolError::date_parse(format!("Invalid date: {raw}")))?;
            let (from, to) = day_bounds(day);
            filter.date_from = Some(from);
            filter.date_to = Some(to);
        }
        _ => {
            filter.date_from = parse_bound(query.from.as_deref(), "from")?;
            filter.date_to = parse_bound(query.to.as_deref(), "to")?;
        }
    }
    Ok(filter)
}

pub async fn list_attendance(
    service: &AttendanceService,
    query: AttendanceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let filter = match build_filter(&query) {
        Ok(filter) => filter,
        Err(e) => return Ok(error_response(request, e)),
    };
    let page = query.pagination.normalized_page();
    let page_size = query.pagination.normalized_page_size();

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.list_attendance(filter, page, page_size).await {
        Ok((items, total)) => {
            let pagination = PaginationInfo {
                page: page as i64,
                page_size: page_size as i64,
                total: total as i64,
                total_pages: total.div_ceil(page_size) as i64,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttendanceListResponse { items, pagination },
                "Attendance retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(request, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_expands_to_whole_day() {
        let query = AttendanceListQuery {
            date: Some("2025-01-10".to_string()),
            from: Some("2020-01-01".to_string()),
            ..Default::default()
        };
        let filter = build_filter(&query).unwrap();
        assert_eq!(filter.date_from, Some(1_736_467_200));
        assert_eq!(filter.date_to, Some(1_736_467_200 + 86_399));
    }

    #[test]
    fn test_malformed_ids_are_ignored() {
        let query = AttendanceListQuery {
            course: Some("7".to_string()),
            student: Some("bob".to_string()),
            ..Default::default()
        };
        let filter = build_filter(&query).unwrap();
        assert_eq!(filter.course_id, Some(7));
        assert_eq!(filter.student_id, None);
    }

    #[test]
    fn test_bad_range_is_rejected() {
        let query = AttendanceListQuery {
            to: Some("soon".to_string()),
            ..Default::default()
        };
        assert!(matches!(build_filter(&query), Err(SchoolError::DateParse(_))));
    }
}
