use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 批量写入中单条失败的记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkWriteError {
    /// 在去重后的批次中的位置
    pub index: usize,
    pub student_id: i64,
    pub message: String,
}

/// 无序批量写入的结果
///
/// 单条失败不会回滚或阻塞其他条目，失败明细原样返回给调用方。
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/bulk.ts")]
pub struct BulkWriteResult {
    pub requested: usize,
    pub succeeded: usize,
    pub write_errors: Vec<BulkWriteError>,
}

impl BulkWriteResult {
    pub fn is_complete(&self) -> bool {
        self.write_errors.is_empty()
    }
}
