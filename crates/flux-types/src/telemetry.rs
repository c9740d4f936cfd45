use serde::Serialize;
use serde_json::{Map, Value};

/// 设备上报的批量遥测消息
///
/// 设备 ID 和时间戳保留原始 JSON 标量，字符串和数字都原样透传。
/// `null` 视为缺失。只能从 JSON 对象构造，数组等其他顶层结构不是批次。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eid: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviceid: Option<Value>,

    /// 原始读数列表，逐条用 [`DataPoint::from_json`] 解析
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
}

impl InputMessage {
    /// 从已解析的 JSON 构造，顶层不是对象时返回 `None`
    ///
    /// `data` 不是数组时按空批次处理。
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };

        let data = match take_present(&mut fields, "data") {
            None => None,
            Some(Value::Array(items)) => Some(items),
            Some(_) => Some(Vec::new()),
        };

        Some(Self {
            ts: take_present(&mut fields, "ts"),
            timestamp: take_present(&mut fields, "timestamp"),
            eid: take_present(&mut fields, "eid"),
            deviceid: take_present(&mut fields, "deviceid"),
            data,
        })
    }

    /// 消息级时间戳：`ts` 优先，其次 `timestamp`
    pub fn timestamp(&self) -> Option<&Value> {
        self.ts.as_ref().or(self.timestamp.as_ref())
    }

    /// 消息级设备 ID：`eid` 优先，其次 `deviceid`
    pub fn device_id(&self) -> Option<&Value> {
        self.eid.as_ref().or(self.deviceid.as_ref())
    }

    /// 批次模式在解析后确定一次，之后不再变化
    pub fn mode(&self) -> BatchMode {
        match self.device_id() {
            Some(eid) => BatchMode::Single { eid: eid.clone() },
            None => BatchMode::Multi,
        }
    }
}

/// 单条读数
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eid: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviceid: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<Value>,

    pub key: Option<Value>,

    pub value: Value,
}

impl DataPoint {
    /// 从 JSON 构造，不是对象时返回 `None`；缺少 `value` 记为 `null`
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };

        Some(Self {
            eid: take_present(&mut fields, "eid"),
            deviceid: take_present(&mut fields, "deviceid"),
            ts: take_present(&mut fields, "ts"),
            key: take_present(&mut fields, "key"),
            value: fields.remove("value").unwrap_or(Value::Null),
        })
    }

    pub fn device_id(&self) -> Option<&Value> {
        self.eid.as_ref().or(self.deviceid.as_ref())
    }

    /// 输出中使用的 key
    ///
    /// 数字和布尔值转为字符串；对象、数组或缺失时返回 `None`。
    pub fn key_name(&self) -> Option<String> {
        match self.key.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// 取出字段，`null` 视为缺失
pub fn take_present(fields: &mut Map<String, Value>, name: &str) -> Option<Value> {
    fields.remove(name).filter(|v| !v.is_null())
}

/// 批次模式
#[derive(Debug, Clone, PartialEq)]
pub enum BatchMode {
    /// 整个批次属于同一设备，读数自带的 ID 不参与分组
    Single { eid: Value },

    /// 每条读数必须自带设备 ID
    Multi,
}

impl BatchMode {
    pub fn device_id(&self) -> Option<&Value> {
        match self {
            BatchMode::Single { eid } => Some(eid),
            BatchMode::Multi => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchMode::Single { .. } => "single-device",
            BatchMode::Multi => "multi-device",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_level_fallbacks() {
        let msg = InputMessage::from_json(json!({ "timestamp": 42, "deviceid": "D9" })).unwrap();
        assert_eq!(msg.timestamp(), Some(&json!(42)));
        assert_eq!(msg.device_id(), Some(&json!("D9")));
        assert_eq!(msg.mode(), BatchMode::Single { eid: json!("D9") });
        assert!(msg.data.is_none());
    }

    #[test]
    fn test_eid_wins_over_deviceid() {
        let msg = InputMessage::from_json(json!({
            "eid": "E1", "deviceid": "D1", "ts": 1, "timestamp": 2, "data": []
        }))
        .unwrap();
        assert_eq!(msg.device_id(), Some(&json!("E1")));
        assert_eq!(msg.timestamp(), Some(&json!(1)));
        assert_eq!(msg.data, Some(vec![]));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let msg = InputMessage::from_json(json!({ "eid": null, "data": [] })).unwrap();
        assert_eq!(msg.mode(), BatchMode::Multi);

        let msg = InputMessage::from_json(json!({ "data": null })).unwrap();
        assert!(msg.data.is_none());
    }

    #[test]
    fn test_only_objects_are_batches() {
        // 数组不会按位置填充字段
        assert!(InputMessage::from_json(json!([100, null, "D1", null, [{ "key": "k" }]])).is_none());
        assert!(InputMessage::from_json(json!("D1")).is_none());
        assert!(InputMessage::from_json(Value::Null).is_none());
    }

    #[test]
    fn test_non_array_data_is_empty_batch() {
        let msg = InputMessage::from_json(json!({ "eid": "D1", "data": "oops" })).unwrap();
        assert_eq!(msg.data, Some(vec![]));

        let msg = InputMessage::from_json(json!({ "data": { "key": "k" } })).unwrap();
        assert_eq!(msg.data, Some(vec![]));
    }

    #[test]
    fn test_data_point_from_json() {
        let point = DataPoint::from_json(json!({ "deviceid": "A", "ts": null, "key": "k" })).unwrap();
        assert_eq!(point.device_id(), Some(&json!("A")));
        assert!(point.ts.is_none());
        assert_eq!(point.value, Value::Null);

        assert!(DataPoint::from_json(json!([null, null, null, "k", 1])).is_none());
        assert!(DataPoint::from_json(json!(1)).is_none());
        assert!(DataPoint::from_json(Value::Null).is_none());
    }

    #[test]
    fn test_key_name() {
        let point = |key: Value| DataPoint {
            key: Some(key),
            ..Default::default()
        };
        assert_eq!(point(json!("temp")).key_name().as_deref(), Some("temp"));
        assert_eq!(point(json!(7)).key_name().as_deref(), Some("7"));
        assert_eq!(point(json!({ "nested": 1 })).key_name(), None);
        assert_eq!(DataPoint::default().key_name(), None);
    }
}
