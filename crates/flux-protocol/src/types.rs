/// 钩子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookType {
    /// 批量读数按 (设备, 时间戳) 重新分组
    Regroup,
    /// 单个扁平对象直接转为一条消息
    Passthrough,
}

impl HookType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "regroup" | "custom" => Some(Self::Regroup),
            "passthrough" | "flat" => Some(Self::Passthrough),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regroup => "regroup",
            Self::Passthrough => "passthrough",
        }
    }
}
