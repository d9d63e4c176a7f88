//! Playback Context - State

use serde::Serialize;

/// 请求失败时展示给用户的固定文案（不透传上游错误）
pub const GENERATION_FAILED_MESSAGE: &str =
    "Audio could not be generated. Check the ElevenLabs server.";

/// 播放失败时展示给用户的固定文案
pub const PLAYBACK_FAILED_MESSAGE: &str = "Audio playback failed. Please try again.";

/// 播放状态
///
/// 互斥状态，每次转换都是整体替换。`Error` 等同于带消息的 idle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum PlaybackState {
    Idle,
    Loading,
    Speaking,
    Error(String),
}

impl PlaybackState {
    /// 是否处于活动状态（此时按钮表现为 stop）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Loading | Self::Speaking)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_speaking(&self) -> bool {
        matches!(self, Self::Speaking)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// 按钮展示
    pub fn button(&self, supported: bool) -> ButtonView {
        ButtonView::new(self, supported)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Idle
    }
}

/// 朗读按钮的展示模型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: &'static str,
    pub aria_label: &'static str,
    pub enabled: bool,
    pub pressed: bool,
    pub busy: bool,
    /// 按钮下方的状态提示
    pub status: Option<String>,
}

impl ButtonView {
    fn new(state: &PlaybackState, supported: bool) -> Self {
        let aria_label = if !supported {
            "Audio narration unavailable"
        } else {
            match state {
                PlaybackState::Speaking => "Stop audio narration",
                PlaybackState::Loading => "Stop audio preparation",
                _ => "Play audio narration",
            }
        };

        let status = if !supported {
            Some("Audio playback is not supported in this browser.".to_string())
        } else if state.is_loading() {
            Some("Preparing your narration...".to_string())
        } else {
            state.error_message().map(str::to_string)
        };

        Self {
            label: if state.is_active() { "Stop Audio" } else { "Play Audio" },
            aria_label,
            enabled: supported,
            pressed: state.is_speaking(),
            busy: state.is_loading(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_button() {
        let view = PlaybackState::Idle.button(true);
        assert_eq!(view.label, "Play Audio");
        assert_eq!(view.aria_label, "Play audio narration");
        assert!(view.enabled);
        assert!(!view.pressed);
        assert!(!view.busy);
        assert_eq!(view.status, None);
    }

    #[test]
    fn test_loading_button() {
        let view = PlaybackState::Loading.button(true);
        assert_eq!(view.label, "Stop Audio");
        assert_eq!(view.aria_label, "Stop audio preparation");
        assert!(view.busy);
        assert_eq!(view.status.as_deref(), Some("Preparing your narration..."));
    }

    #[test]
    fn test_speaking_button() {
        let view = PlaybackState::Speaking.button(true);
        assert_eq!(view.label, "Stop Audio");
        assert_eq!(view.aria_label, "Stop audio narration");
        assert!(view.pressed);
    }

    #[test]
    fn test_error_button_shows_message() {
        let state = PlaybackState::Error(GENERATION_FAILED_MESSAGE.to_string());
        let view = state.button(true);
        assert_eq!(view.label, "Play Audio");
        assert_eq!(view.status.as_deref(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn test_unsupported_button() {
        let view = PlaybackState::Idle.button(false);
        assert!(!view.enabled);
        assert_eq!(view.aria_label, "Audio narration unavailable");
        assert_eq!(
            view.status.as_deref(),
            Some("Audio playback is not supported in this browser.")
        );
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_value(PlaybackState::Error("boom".into())).unwrap();
        assert_eq!(json, serde_json::json!({"state": "error", "message": "boom"}));

        let json = serde_json::to_value(PlaybackState::Idle).unwrap();
        assert_eq!(json, serde_json::json!({"state": "idle"}));
    }
}
