use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 管道内流转的消息信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub topic: String,
    pub payload: serde_json::Value,
    pub timestamp: i64,
}

impl Message {
    pub fn new(topic: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            payload,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// 按 (设备, 时间戳) 分组后的输出消息
///
/// 序列化形式为 `{eid?, ts?, topic, msg: {data: {...}}}`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eid: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<Value>,

    pub topic: String,

    pub msg: MessageBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub data: Map<String, Value>,
}

impl OutputMessage {
    pub fn new(topic: impl Into<String>, eid: Option<Value>, ts: Option<Value>) -> Self {
        Self {
            eid,
            ts,
            topic: topic.into(),
            msg: MessageBody::default(),
        }
    }

    /// 写入读数，同名 key 后写覆盖前写
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.msg.data.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.msg.data.is_empty()
    }

    /// 封装为同一主题的管道消息
    pub fn into_message(self) -> serde_json::Result<Message> {
        let topic = self.topic.clone();
        let payload = serde_json::to_value(self)?;
        Ok(Message::new(topic, payload))
    }
}
