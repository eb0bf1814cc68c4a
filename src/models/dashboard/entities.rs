/// 某天某状态的考勤数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceDayCount {
    /// 当天 UTC 零点的 Unix 秒
    pub day: i64,
    pub status: String,
    pub count: i64,
}
