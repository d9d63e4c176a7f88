//! Narration Player - 朗读播放控制器
//!
//! 单按钮 play/stop 切换，驱动 idle / loading / speaking / error 状态机。
//!
//! 事件驱动：请求结果与播放回报通过 channel 投递回控制器，
//! 由调用方在同一任务中 `next_event` + `apply`。每个请求带代次，
//! 过期代次的结果与回报一律忽略。

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    AudioOutputPort, NarrationFetchError, NarrationSourcePort, PlaybackNotifier, PlaybackReport,
    PlaybackSignal, SpeechSynthesizerPort,
};
use crate::domain::gallery::{Artwork, Page};
use crate::domain::playback::{
    ButtonView, PlaybackState, GENERATION_FAILED_MESSAGE, PLAYBACK_FAILED_MESSAGE,
};

/// 朗读后端策略
pub enum NarrationBackend {
    /// 通过朗读代理获取音频，再交给媒体输出播放
    Remote {
        source: Arc<dyn NarrationSourcePort>,
        output: Box<dyn AudioOutputPort>,
    },
    /// 设备端语音合成，没有 loading 状态
    Device {
        synthesizer: Box<dyn SpeechSynthesizerPort>,
    },
}

impl NarrationBackend {
    pub fn remote(source: Arc<dyn NarrationSourcePort>, output: Box<dyn AudioOutputPort>) -> Self {
        Self::Remote { source, output }
    }

    pub fn device(synthesizer: Box<dyn SpeechSynthesizerPort>) -> Self {
        Self::Device { synthesizer }
    }

    fn is_available(&self) -> bool {
        match self {
            Self::Remote { output, .. } => output.is_available(),
            Self::Device { synthesizer } => synthesizer.is_available(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Remote { .. } => "remote",
            Self::Device { .. } => "device",
        }
    }

    /// 停止输出（暂停并回到开头 / 取消设备朗读）
    fn halt(&mut self) {
        match self {
            Self::Remote { output, .. } => output.stop(),
            Self::Device { synthesizer } => synthesizer.cancel(),
        }
    }
}

/// 控制器事件
#[derive(Debug)]
pub enum PlayerEvent {
    /// 音频请求完成
    Fetched {
        generation: u64,
        result: Result<Bytes, NarrationFetchError>,
    },
    /// 播放结束或失败
    Playback(PlaybackReport),
}

/// 进行中的请求
struct InFlight {
    generation: u64,
    cancel: CancellationToken,
}

/// 朗读播放控制器
///
/// 每个实例最多一个进行中的请求，且独占音频输出
pub struct NarrationPlayer {
    state: PlaybackState,
    backend: NarrationBackend,
    text: String,
    page: Page,
    generation: u64,
    in_flight: Option<InFlight>,
    /// 允许回报的播放代次
    playing: Option<u64>,
    /// 输出中是否装载了音频源
    source_loaded: bool,
    fetch_tx: mpsc::UnboundedSender<PlayerEvent>,
    fetch_rx: mpsc::UnboundedReceiver<PlayerEvent>,
    playback_tx: mpsc::UnboundedSender<PlaybackReport>,
    playback_rx: mpsc::UnboundedReceiver<PlaybackReport>,
}

impl NarrationPlayer {
    pub fn new(backend: NarrationBackend, text: impl Into<String>) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let (playback_tx, playback_rx) = mpsc::unbounded_channel();
        Self {
            state: PlaybackState::Idle,
            backend,
            text: text.into(),
            page: Page::default(),
            generation: 0,
            in_flight: None,
            playing: None,
            source_loaded: false,
            fetch_tx,
            fetch_rx,
            playback_tx,
            playback_rx,
        }
    }

    /// 朗读指定作品
    pub fn for_artwork(backend: NarrationBackend, artwork: &Artwork) -> Self {
        Self::new(backend, artwork.narration_text())
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// 运行环境是否支持朗读
    pub fn is_supported(&self) -> bool {
        self.backend.is_available()
    }

    pub fn button(&self) -> ButtonView {
        self.state.button(self.is_supported())
    }

    /// 是否有进行中的请求
    pub fn has_pending_request(&self) -> bool {
        self.in_flight.is_some()
    }

    /// 按钮点击：活动中则停止，否则开始朗读
    pub fn toggle(&mut self) {
        if !self.is_supported() {
            tracing::debug!("Narration unsupported, ignoring toggle");
            return;
        }
        if self.state.is_active() {
            self.stop();
        } else {
            self.play();
        }
    }

    /// 开始朗读，先取消之前的请求并停止正在进行的播放
    pub fn play(&mut self) {
        if !self.is_supported() {
            return;
        }

        self.cancel_in_flight();
        if let Some(previous) = self.playing.take() {
            tracing::debug!(generation = previous, "Replacing active narration");
            self.backend.halt();
        }
        self.generation += 1;
        let generation = self.generation;

        tracing::debug!(generation, backend = self.backend.name(), "Starting narration");

        match &mut self.backend {
            NarrationBackend::Remote { source, .. } => {
                let cancel = CancellationToken::new();
                self.in_flight = Some(InFlight {
                    generation,
                    cancel: cancel.clone(),
                });
                self.state = PlaybackState::Loading;

                let source = source.clone();
                let text = self.text.clone();
                let tx = self.fetch_tx.clone();
                tokio::spawn(async move {
                    let result = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => Err(NarrationFetchError::Cancelled),
                        result = source.fetch(&text, cancel.clone()) => result,
                    };
                    let _ = tx.send(PlayerEvent::Fetched { generation, result });
                });
            }
            NarrationBackend::Device { synthesizer } => {
                synthesizer.cancel();
                let notifier = PlaybackNotifier::new(generation, self.playback_tx.clone());
                match synthesizer.speak(&self.text, notifier) {
                    Ok(()) => {
                        self.playing = Some(generation);
                        self.state = PlaybackState::Speaking;
                    }
                    Err(e) => {
                        tracing::warn!(generation, error = %e, "Device speech failed to start");
                        self.state = PlaybackState::Error(GENERATION_FAILED_MESSAGE.to_string());
                    }
                }
            }
        }
    }

    /// 停止：取消请求、停止输出，回到 idle
    pub fn stop(&mut self) {
        self.cancel_in_flight();
        self.playing = None;
        self.backend.halt();
        if self.state.is_active() {
            self.state = PlaybackState::Idle;
        }
    }

    /// 页面切换，离开朗读页时强制停止
    pub fn navigate(&mut self, page: Page) {
        self.page = page;
        if !page.has_narration() && self.state.is_active() {
            tracing::debug!(page = page.id(), "Left narration page, stopping");
            self.stop();
        }
    }

    /// 等待下一个事件
    ///
    /// 控制器自身持有发送端，没有事件时会一直等待
    pub async fn next_event(&mut self) -> Option<PlayerEvent> {
        tokio::select! {
            Some(event) = self.fetch_rx.recv() => Some(event),
            Some(report) = self.playback_rx.recv() => Some(PlayerEvent::Playback(report)),
            else => None,
        }
    }

    /// 取出已到达的事件，不等待
    pub fn try_next_event(&mut self) -> Option<PlayerEvent> {
        if let Ok(event) = self.fetch_rx.try_recv() {
            return Some(event);
        }
        self.playback_rx.try_recv().ok().map(PlayerEvent::Playback)
    }

    /// 等待并处理下一个事件
    pub async fn process_next(&mut self) {
        if let Some(event) = self.next_event().await {
            self.apply(event);
        }
    }

    /// 处理事件
    pub fn apply(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Fetched { generation, result } => self.on_fetched(generation, result),
            PlayerEvent::Playback(report) => self.on_playback(report),
        }
    }

    /// 组件销毁：取消请求、停止并释放音频源
    pub fn shutdown(&mut self) {
        self.cancel_in_flight();
        self.playing = None;
        match &mut self.backend {
            NarrationBackend::Remote { output, .. } => {
                output.stop();
                if self.source_loaded {
                    output.release();
                    self.source_loaded = false;
                }
            }
            NarrationBackend::Device { synthesizer } => synthesizer.cancel(),
        }
        self.state = PlaybackState::Idle;
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!(generation = in_flight.generation, "Cancelling narration request");
            in_flight.cancel.cancel();
        }
    }

    fn on_fetched(&mut self, generation: u64, result: Result<Bytes, NarrationFetchError>) {
        match &self.in_flight {
            Some(in_flight) if in_flight.generation == generation => {
                self.in_flight = None;
            }
            _ => {
                tracing::debug!(generation, "Ignoring stale narration response");
                return;
            }
        }

        let audio = match result {
            Ok(audio) => audio,
            Err(NarrationFetchError::Cancelled) => return,
            Err(e) => {
                tracing::warn!(generation, error = %e, "Narration request failed");
                self.state = PlaybackState::Error(GENERATION_FAILED_MESSAGE.to_string());
                return;
            }
        };

        let NarrationBackend::Remote { output, .. } = &mut self.backend else {
            return;
        };

        // 新音频替换旧音频源
        if self.source_loaded {
            output.release();
            self.source_loaded = false;
        }

        let notifier = PlaybackNotifier::new(generation, self.playback_tx.clone());
        let started = match output.load(audio) {
            Ok(()) => {
                self.source_loaded = true;
                output.play(notifier)
            }
            Err(e) => Err(e),
        };
        match started {
            Ok(()) => {
                self.playing = Some(generation);
                self.state = PlaybackState::Speaking;
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "Narration playback failed to start");
                self.state = PlaybackState::Error(GENERATION_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn on_playback(&mut self, report: PlaybackReport) {
        if self.playing != Some(report.generation) {
            tracing::debug!(generation = report.generation, "Ignoring stale playback report");
            return;
        }
        self.playing = None;

        match report.signal {
            PlaybackSignal::Ended => self.state = PlaybackState::Idle,
            PlaybackSignal::Failed(reason) => {
                tracing::warn!(
                    generation = report.generation,
                    reason = %reason,
                    "Narration playback failed"
                );
                self.state = PlaybackState::Error(PLAYBACK_FAILED_MESSAGE.to_string());
            }
        }
    }
}

impl Drop for NarrationPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
