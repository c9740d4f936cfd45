use crate::hook::ProtocolHook;
use crate::types::HookType;
use flux_core::Result;
use flux_types::{take_present, OutputMessage};
use serde_json::{Map, Value};
use tracing::debug;

/// 扁平对象钩子
///
/// 适用于每条消息只上报一个对象的设备，例如
/// `{"eid":"D1","ts":100,"temp":20,"hum":55}`。设备 ID 和时间戳的取值规则与
/// 批量重组相同，其余顶层字段都作为读数。
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughHook;

impl PassthroughHook {
    pub fn new() -> Self {
        Self
    }
}

impl ProtocolHook for PassthroughHook {
    fn hook_type(&self) -> HookType {
        HookType::Passthrough
    }

    fn transform(&self, raw: &str, topic: &str) -> Result<Option<Vec<OutputMessage>>> {
        let Value::Object(mut fields) = serde_json::from_str::<Value>(raw)? else {
            debug!(topic, "Payload is not an object, nothing to publish");
            return Ok(None);
        };

        let eid = take_first(&mut fields, "eid", "deviceid");
        let ts = take_first(&mut fields, "ts", "timestamp");

        let mut output = OutputMessage::new(topic, eid, ts);
        for (key, value) in fields {
            output.insert(key, value);
        }
        Ok(Some(vec![output]))
    }
}

/// 两个字段都移除，返回第一个非 null 的值
fn take_first(fields: &mut Map<String, Value>, primary: &str, fallback: &str) -> Option<Value> {
    let primary = take_present(fields, primary);
    let fallback = take_present(fields, fallback);
    primary.or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_object() {
        let hook = PassthroughHook::new();
        let outputs = hook
            .transform(r#"{"eid":"D1","ts":100,"temp":20,"hum":55}"#, "t/1")
            .unwrap()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&outputs).unwrap(),
            json!([{ "eid": "D1", "ts": 100, "topic": "t/1", "msg": { "data": { "temp": 20, "hum": 55 } } }])
        );
    }

    #[test]
    fn test_fallback_fields_are_consumed() {
        let hook = PassthroughHook::new();
        let outputs = hook
            .transform(r#"{"eid":null,"deviceid":"D2","timestamp":7,"v":1}"#, "t")
            .unwrap()
            .unwrap();

        assert_eq!(outputs[0].eid, Some(json!("D2")));
        assert_eq!(outputs[0].ts, Some(json!(7)));
        assert_eq!(outputs[0].msg.data.len(), 1);
    }

    #[test]
    fn test_non_object_is_absent() {
        let hook = PassthroughHook::new();
        assert!(hook.transform("[1,2,3]", "t").unwrap().is_none());
        assert!(hook.transform("42", "t").unwrap().is_none());
        assert!(hook.transform("not json", "t").is_err());
    }
}
