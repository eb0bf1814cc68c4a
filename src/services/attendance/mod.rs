pub mod delete;
pub mod list;
pub mod mark;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::Value;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::attendance::{
    entities::AttendanceStatus,
    requests::{
        AttendanceEntryInput, AttendanceListQuery, DeleteAttendanceRequest, MarkAttendanceRequest,
        UpdateAttendanceRequest,
    },
};
use crate::storage::Storage;
use crate::utils::ids::parse_record_id;
use crate::utils::validate::optional_trimmed;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 分页查询考勤
    pub async fn list_attendance(
        &self,
        query: AttendanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, query, request).await
    }

    // 批量点名
    pub async fn mark_attendance(
        &self,
        mark_data: MarkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, mark_data, request).await
    }

    // 修改单条考勤
    pub async fn update_attendance(
        &self,
        update_data: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, update_data, request).await
    }

    // 按 id 或按 (课程, 日期) 删除
    pub async fn delete_attendance(
        &self,
        delete_data: DeleteAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, delete_data, request).await
    }
}

/// 一条有效的点名记录
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// 解析状态字符串，忽略大小写与首尾空白
pub(crate) fn parse_status(raw: &str) -> Option<AttendanceStatus> {
    raw.trim().to_lowercase().parse().ok()
}

/// 丢弃学生 id 非法或状态缺失/非法的条目；同一学生只保留最后一条，
/// 位置取首次出现的位置
pub(crate) fn collect_entries(entries: Vec<AttendanceEntryInput>) -> Vec<ValidEntry> {
    let mut collected: Vec<ValidEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(student_id) = parse_record_id(&entry.student) else {
            continue;
        };
        let Some(status) = entry.status.as_str().and_then(parse_status) else {
            continue;
        };
        let valid = ValidEntry {
            student_id,
            status,
            remarks: optional_trimmed(entry.remarks),
        };
        match collected.iter_mut().find(|e| e.student_id == student_id) {
            Some(existing) => *existing = valid,
            None => collected.push(valid),
        }
    }
    collected
}

/// 空值（缺失、null、空串）视为未提供
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(student: Value, status: Value, remarks: Option<&str>) -> AttendanceEntryInput {
        AttendanceEntryInput {
            student,
            status,
            remarks: remarks.map(str::to_string),
        }
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        let entries = collect_entries(vec![
            entry(json!("1"), json!("present"), None),
            entry(json!("abc"), json!("present"), None),
            entry(json!(2), Value::Null, None),
            entry(json!(3), json!("sleeping"), None),
            entry(json!(4), json!(7), None),
        ]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].student_id, 1);
    }

    #[test]
    fn test_last_entry_per_student_wins() {
        let entries = collect_entries(vec![
            entry(json!(1), json!("present"), Some("on time")),
            entry(json!(2), json!("absent"), None),
            entry(json!("1"), json!("Late"), Some("  ")),
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            ValidEntry {
                student_id: 1,
                status: AttendanceStatus::Late,
                remarks: None,
            }
        );
        assert_eq!(entries[1].student_id, 2);
    }

    #[test]
    fn test_blank_values() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!(" ")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!("5")));
    }
}
