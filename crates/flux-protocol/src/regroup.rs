//! 批量遥测重组
//!
//! 设备一次上报一批 `key/value` 读数，这里按 (设备 ID, 时间戳) 把连续的
//! 读数合并成一条条消息，交给下游发布。相同分组只在相邻读数之间合并，
//! 分组切换即输出上一条。

use crate::hook::ProtocolHook;
use crate::types::HookType;
use flux_config::HookConfig;
use flux_core::Result;
use flux_types::{BatchMode, DataPoint, InputMessage, OutputMessage};
use serde_json::Value;
use tracing::{debug, trace, warn};

/// 重组选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegroupOptions {
    /// 没有任何读数被接收时，仍输出一条空消息
    pub emit_trailing_empty: bool,
}

impl Default for RegroupOptions {
    fn default() -> Self {
        Self {
            emit_trailing_empty: true,
        }
    }
}

impl From<&HookConfig> for RegroupOptions {
    fn from(config: &HookConfig) -> Self {
        Self {
            emit_trailing_empty: config.emit_trailing_empty,
        }
    }
}

/// 重组一条原始消息，使用默认选项
///
/// 输入不是合法 JSON 时返回错误；顶层不是对象或没有 `data` 字段时返回 `Ok(None)`。
pub fn regroup(raw: &str, topic: &str) -> Result<Option<Vec<OutputMessage>>> {
    regroup_with(raw, topic, RegroupOptions::default())
}

pub fn regroup_with(
    raw: &str,
    topic: &str,
    options: RegroupOptions,
) -> Result<Option<Vec<OutputMessage>>> {
    let value: Value = serde_json::from_str(raw)?;
    let Some(input) = InputMessage::from_json(value) else {
        debug!(topic, "Payload is not an object, nothing to regroup");
        return Ok(None);
    };
    Ok(regroup_message(input, topic, options))
}

/// 重组已解析的消息
pub fn regroup_message(
    input: InputMessage,
    topic: &str,
    options: RegroupOptions,
) -> Option<Vec<OutputMessage>> {
    let mode = input.mode();
    let batch_ts = input.timestamp().cloned();
    let points = input.data?;

    debug!(mode = mode.as_str(), points = points.len(), topic, "Regrouping telemetry batch");

    let mut outputs = Vec::new();
    let mut acc = Accumulator::Empty {
        eid: mode.device_id().cloned(),
    };

    for (index, item) in points.into_iter().enumerate() {
        let Some(point) = DataPoint::from_json(item) else {
            warn!(index, topic, "Skipping data point that is not an object");
            continue;
        };

        let eid = match &mode {
            BatchMode::Single { eid } => {
                if let Some(own) = point.device_id().filter(|own| *own != eid) {
                    trace!(index, point_eid = %own, "Ignoring per-point id in single-device batch");
                }
                eid.clone()
            }
            BatchMode::Multi => match point.device_id() {
                Some(own) => own.clone(),
                None => {
                    warn!(index, topic, "Skipping data point without eid/deviceid");
                    continue;
                }
            },
        };

        let Some(key) = point.key_name() else {
            warn!(index, topic, "Skipping data point without a usable key");
            continue;
        };

        let reading = Reading {
            eid,
            ts: point.ts.or_else(|| batch_ts.clone()),
            key,
            value: point.value,
        };
        acc = acc.accept(reading, topic, &mut outputs);
    }

    if let Some(last) = acc.finish(topic, options) {
        outputs.push(last);
    }

    debug!(messages = outputs.len(), topic, "Regrouped telemetry batch");
    Some(outputs)
}

/// 一条已解析出设备和时间戳的读数
#[derive(Debug)]
struct Reading {
    eid: Value,
    ts: Option<Value>,
    key: String,
    value: Value,
}

/// 分组累加器
///
/// `Empty` 尚未接收读数（单设备批次预先带上设备 ID），`Filled` 正在累加。
#[derive(Debug)]
enum Accumulator {
    Empty { eid: Option<Value> },
    Filled(OutputMessage),
}

impl Accumulator {
    fn accept(self, reading: Reading, topic: &str, outputs: &mut Vec<OutputMessage>) -> Self {
        let Reading { eid, ts, key, value } = reading;

        let mut current = match self {
            Accumulator::Empty { .. } => OutputMessage::new(topic, Some(eid), ts),
            Accumulator::Filled(current) if current.eid.as_ref() != Some(&eid) => {
                debug!(eid = ?current.eid, ts = ?current.ts, "Device changed, flushing");
                outputs.push(current);
                OutputMessage::new(topic, Some(eid), ts)
            }
            Accumulator::Filled(current) if current.ts != ts => {
                debug!(eid = ?current.eid, ts = ?current.ts, "Timestamp changed, flushing");
                outputs.push(current);
                OutputMessage::new(topic, Some(eid), ts)
            }
            Accumulator::Filled(current) => current,
        };

        current.insert(key, value);
        Accumulator::Filled(current)
    }

    fn finish(self, topic: &str, options: RegroupOptions) -> Option<OutputMessage> {
        match self {
            Accumulator::Filled(current) => Some(current),
            Accumulator::Empty { eid } if options.emit_trailing_empty => {
                Some(OutputMessage::new(topic, eid, None))
            }
            Accumulator::Empty { .. } => {
                debug!(topic, "No readings accepted, dropping empty message");
                None
            }
        }
    }
}

/// 批量读数重组钩子
#[derive(Debug, Clone, Default)]
pub struct RegroupHook {
    options: RegroupOptions,
}

impl RegroupHook {
    pub fn new(options: RegroupOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &HookConfig) -> Self {
        Self::new(RegroupOptions::from(config))
    }

    pub fn options(&self) -> RegroupOptions {
        self.options
    }
}

impl ProtocolHook for RegroupHook {
    fn hook_type(&self) -> HookType {
        HookType::Regroup
    }

    fn transform(&self, raw: &str, topic: &str) -> Result<Option<Vec<OutputMessage>>> {
        regroup_with(raw, topic, self.options)
    }
}
