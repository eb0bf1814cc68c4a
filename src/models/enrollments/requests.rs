use serde::{Deserialize, Deserializer};
use ts_rs::TS;

// 选课列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListQuery {
    pub course: Option<String>,
    /// 为 true 时包含已停用的记录
    #[serde(default)]
    pub include_inactive: bool,
}

// 批量选课请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollStudentsRequest {
    #[serde(default)]
    #[ts(type = "string | number")]
    pub course: serde_json::Value,
    #[serde(default)]
    #[ts(type = "Array<string | number>")]
    pub students: Vec<serde_json::Value>,
}

// 批量退课请求，hard 为 true 时物理删除
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct RemoveEnrollmentsRequest {
    #[serde(default)]
    #[ts(type = "string | number")]
    pub course: serde_json::Value,
    #[serde(default)]
    #[ts(type = "Array<string | number>")]
    pub students: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    #[ts(type = "boolean | string | number")]
    pub hard: bool,
}

/// 宽松的布尔标记：true、非零数字以及 "true"/"1"/"yes"/"on" 为真，其余为假
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(flag) => flag,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hard(value: serde_json::Value) -> bool {
        let request: RemoveEnrollmentsRequest =
            serde_json::from_value(json!({"course": 1, "students": [2], "hard": value})).unwrap();
        request.hard
    }

    #[test]
    fn test_hard_flag_accepts_truthy_values() {
        assert!(hard(json!(true)));
        assert!(hard(json!("true")));
        assert!(hard(json!(" TRUE ")));
        assert!(hard(json!(1)));
        assert!(hard(json!("1")));
    }

    #[test]
    fn test_hard_flag_defaults_to_soft() {
        assert!(!hard(json!(false)));
        assert!(!hard(json!("false")));
        assert!(!hard(json!(0)));
        assert!(!hard(json!(null)));
        let request: RemoveEnrollmentsRequest =
            serde_json::from_value(json!({"course": 1, "students": [2]})).unwrap();
        assert!(!request.hard);
    }
}
