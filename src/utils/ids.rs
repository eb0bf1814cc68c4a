//! 记录 id 解析
//!
//! 合法 id 为正整数，可以是 JSON 数字或十进制字符串。

use serde_json::Value;

/// 解析字符串形式的 id
pub fn parse_id_str(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// 解析 JSON 值形式的 id，非法时返回 None
pub fn parse_record_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().filter(|id| *id > 0),
        Value::String(s) => parse_id_str(s),
        _ => None,
    }
}

/// 过滤掉非法 id 并去重，保留首次出现的顺序
pub fn collect_valid_ids(values: &[Value]) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::with_capacity(values.len());
    for id in values.iter().filter_map(parse_record_id) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(parse_record_id(&json!(12)), Some(12));
        assert_eq!(parse_record_id(&json!("12")), Some(12));
        assert_eq!(parse_record_id(&json!(" 7 ")), Some(7));
    }

    #[test]
    fn test_malformed_ids() {
        assert_eq!(parse_record_id(&json!("not-an-id")), None);
        assert_eq!(parse_record_id(&json!("-3")), None);
        assert_eq!(parse_record_id(&json!(0)), None);
        assert_eq!(parse_record_id(&json!(1.5)), None);
        assert_eq!(parse_record_id(&json!(null)), None);
        assert_eq!(parse_record_id(&json!("")), None);
    }

    #[test]
    fn test_collect_drops_invalid_and_duplicates() {
        let ids = collect_valid_ids(&[json!("3"), json!("bad"), json!(1), json!(3)]);
        assert_eq!(ids, vec![3, 1]);
    }
}
