use serde::Serialize;
use ts_rs::TS;

use crate::models::attendance::entities::AttendanceDetail;
use crate::models::courses::entities::Course;
use crate::models::students::entities::Student;
use crate::models::teachers::entities::Teacher;

// 总量统计
#[derive(Debug, Clone, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardCounts {
    pub students: u64,
    pub teachers: u64,
    pub courses: u64,
    pub enrollments_active: u64,
    pub attendance_records: u64,
}

/// 某一天的考勤汇总
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DailyAttendance {
    /// YYYY-MM-DD
    pub date: String,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    pub total: i64,
    pub rate_present: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TopCourse {
    pub course_id: i64,
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherCourseCount {
    pub teacher_id: i64,
    pub name: String,
    pub email: String,
    pub course_count: i64,
}

// 最近创建的记录
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RecentItems {
    pub students: Vec<Student>,
    pub teachers: Vec<Teacher>,
    pub courses: Vec<Course>,
    pub attendance: Vec<AttendanceDetail>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub counts: DashboardCounts,
    /// 固定 7 个点，按日期升序
    pub attendance_last7_days: Vec<DailyAttendance>,
    pub top_courses_by_enrollment: Vec<TopCourse>,
    pub teacher_course_counts: Vec<TeacherCourseCount>,
    pub recent: RecentItems,
}
