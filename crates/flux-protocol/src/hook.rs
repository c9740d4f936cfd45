use crate::types::HookType;
use flux_core::Result;
use flux_types::{Message, OutputMessage};

/// 自定义协议钩子
///
/// 管道对每条入站消息调用一次。实现只持有不可变配置，可在多个调用方之间共享。
pub trait ProtocolHook: Send + Sync {
    /// 获取钩子类型
    fn hook_type(&self) -> HookType;

    /// 转换原始消息
    ///
    /// `Ok(None)` 表示该消息没有可发布的内容。
    fn transform(&self, raw: &str, topic: &str) -> Result<Option<Vec<OutputMessage>>>;

    /// 转换并封装为管道消息
    fn publish(&self, raw: &str, topic: &str) -> Result<Vec<Message>> {
        let Some(outputs) = self.transform(raw, topic)? else {
            return Ok(Vec::new());
        };

        let mut messages = Vec::with_capacity(outputs.len());
        for output in outputs {
            messages.push(output.into_message()?);
        }
        Ok(messages)
    }
}
