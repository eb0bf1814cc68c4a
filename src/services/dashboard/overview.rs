use actix_web::http::header::{CACHE_CONTROL, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use super::DashboardService;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    attendance::entities::AttendanceStatus,
    dashboard::{
        entities::AttendanceDayCount,
        responses::{DailyAttendance, DashboardCounts, DashboardResponse, RecentItems},
    },
};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::dates::{SECONDS_PER_DAY, trailing_days};

/// 考勤趋势的天数
pub const TREND_DAYS: u64 = 7;
/// 排行榜条数
pub const TOP_LIMIT: u64 = 5;
const RECENT_LIMIT: u64 = 5;
const RECENT_ATTENDANCE_LIMIT: u64 = 10;

fn midnight(day: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)).timestamp()
}

/// 把分组计数展开成按天的序列，缺失的日期补零
pub(crate) fn build_daily_series(
    days: &[NaiveDate],
    counts: &[AttendanceDayCount],
) -> Vec<DailyAttendance> {
    let mut by_day: HashMap<i64, HashMap<&str, i64>> = HashMap::new();
    for row in counts {
        *by_day
            .entry(row.day)
            .or_default()
            .entry(row.status.as_str())
            .or_default() += row.count;
    }

    days.iter()
        .map(|day| {
            let statuses = by_day.get(&midnight(*day));
            let count = |status: AttendanceStatus| {
                statuses
                    .and_then(|s| s.get(status.as_str()))
                    .copied()
                    .unwrap_or(0)
            };
            let present = count(AttendanceStatus::Present);
            let absent = count(AttendanceStatus::Absent);
            let late = count(AttendanceStatus::Late);
            let excused = count(AttendanceStatus::Excused);
            let total = present + absent + late + excused;
            DailyAttendance {
                date: day.format("%Y-%m-%d").to_string(),
                present,
                absent,
                late,
                excused,
                total,
                rate_present: if total > 0 {
                    present as f64 / total as f64
                } else {
                    0.0
                },
            }
        })
        .collect()
}

async fn load_overview(storage: Arc<dyn Storage>) -> Result<DashboardResponse> {
    let days = trailing_days(Utc::now().date_naive(), TREND_DAYS);
    let (from, to) = match (days.first(), days.last()) {
        (Some(first), Some(last)) => (midnight(*first), midnight(*last) + SECONDS_PER_DAY - 1),
        _ => (0, 0),
    };

    // 各项统计相互独立，并发执行
    let (
        students,
        teachers,
        courses,
        enrollments_active,
        attendance_records,
        day_counts,
        top_courses_by_enrollment,
        teacher_course_counts,
        recent_students,
        recent_teachers,
        recent_courses,
        recent_attendance,
    ) = tokio::try_join!(
        storage.count_students(),
        storage.count_teachers(),
        storage.count_courses(),
        storage.count_active_enrollments(),
        storage.count_attendance(),
        storage.attendance_day_counts(from, to),
        storage.top_courses_by_enrollment(TOP_LIMIT),
        storage.teacher_course_counts(TOP_LIMIT),
        storage.list_students(Some(RECENT_LIMIT)),
        storage.list_teachers(Some(RECENT_LIMIT)),
        storage.list_courses(Some(RECENT_LIMIT)),
        storage.list_recent_attendance(RECENT_ATTENDANCE_LIMIT),
    )?;

    Ok(DashboardResponse {
        counts: DashboardCounts {
            students,
            teachers,
            courses,
            enrollments_active,
            attendance_records,
        },
        attendance_last7_days: build_daily_series(&days, &day_counts),
        top_courses_by_enrollment,
        teacher_course_counts,
        recent: RecentItems {
            students: recent_students,
            teachers: recent_teachers,
            courses: recent_courses,
            attendance: recent_attendance,
        },
    })
}

pub async fn get_overview(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let outcome = match service.get_storage(request) {
        Ok(storage) => load_overview(storage).await,
        Err(e) => Err(e),
    };

    // 成功与失败都不允许缓存
    let mut response = match outcome {
        Ok(overview) => HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Dashboard retrieved successfully",
        )),
        Err(e) => error_response(request, e),
    };
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: NaiveDate, status: &str, count: i64) -> AttendanceDayCount {
        AttendanceDayCount {
            day: midnight(day),
            status: status.to_string(),
            count,
        }
    }

    #[test]
    fn test_missing_days_are_zero_filled() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let days = trailing_days(today, TREND_DAYS);
        let series = build_daily_series(&days, &[row(today, "present", 3)]);

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, "2025-01-04");
        assert_eq!(series[6].date, "2025-01-10");
        assert!(series[..6].iter().all(|d| d.total == 0 && d.rate_present == 0.0));
        assert_eq!(series[6].present, 3);
        assert_eq!(series[6].rate_present, 1.0);
    }

    #[test]
    fn test_rate_present_over_all_statuses() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let days = trailing_days(today, TREND_DAYS);
        let series = build_daily_series(
            &days,
            &[
                row(today, "present", 1),
                row(today, "absent", 2),
                row(today, "late", 1),
            ],
        );
        let last = &series[6];
        assert_eq!(last.total, 4);
        assert_eq!(last.absent, 2);
        assert_eq!(last.rate_present, 0.25);
    }

    #[test]
    fn test_rows_outside_window_are_ignored() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let days = trailing_days(today, TREND_DAYS);
        let old = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let series = build_daily_series(&days, &[row(old, "present", 9)]);
        assert_eq!(series.iter().map(|d| d.total).sum::<i64>(), 0);
    }
}
