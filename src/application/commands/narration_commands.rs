//! Narration Commands - 朗读合成命令

use bytes::Bytes;

/// 合成朗读命令
///
/// 字段为原始输入，尚未去空白或回退默认音色
#[derive(Debug, Clone, Default)]
pub struct SynthesizeNarration {
    pub text: Option<String>,
    pub voice_id: Option<String>,
}

/// 合成朗读响应
#[derive(Debug, Clone)]
pub struct SynthesizeNarrationResponse {
    pub audio: Bytes,
    pub content_type: &'static str,
}
