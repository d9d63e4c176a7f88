//! Audio Normalization - 音频归一化
//!
//! 将服务商返回的任意形态音频收集为一块连续缓冲

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tokio::io::AsyncReadExt;

use crate::application::ports::{AudioPayload, TtsError};

/// 收集为连续字节
///
/// - `Ok(None)`: 无法识别或为空的返回（Empty / 越界视图）
/// - `Err(_)`: 读取流时上游出错
pub async fn drain_to_bytes(payload: AudioPayload) -> Result<Option<Bytes>, TtsError> {
    match payload {
        AudioPayload::Empty => Ok(None),
        AudioPayload::Buffer(buffer) => Ok(Some(buffer)),
        AudioPayload::View {
            buffer,
            offset,
            len,
        } => match offset.checked_add(len) {
            Some(end) if end <= buffer.len() => Ok(Some(buffer.slice(offset..end))),
            _ => {
                tracing::warn!(
                    offset,
                    len,
                    buffer_len = buffer.len(),
                    "Audio view out of range"
                );
                Ok(None)
            }
        },
        AudioPayload::Reader(mut reader) => {
            let mut buf = Vec::new();
            reader
                .read_to_end(&mut buf)
                .await
                .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;
            Ok(Some(Bytes::from(buf)))
        }
        AudioPayload::Stream(mut stream) => {
            let mut buf = BytesMut::new();
            let mut chunks = 0usize;
            while let Some(chunk) = stream.next().await {
                buf.extend_from_slice(&chunk?);
                chunks += 1;
            }
            tracing::debug!(chunks, total = buf.len(), "Audio stream drained");
            Ok(Some(buf.freeze()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::io::Cursor;
    use tokio_util::io::StreamReader;

    #[tokio::test]
    async fn test_empty_yields_nothing() {
        assert!(drain_to_bytes(AudioPayload::Empty).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_buffer_passes_through() {
        let audio = drain_to_bytes(AudioPayload::Buffer(Bytes::from_static(b"ID3abc")))
            .await
            .unwrap();
        assert_eq!(audio.as_deref(), Some(&b"ID3abc"[..]));
    }

    #[tokio::test]
    async fn test_view_respects_offset_and_len() {
        let payload = AudioPayload::View {
            buffer: Bytes::from_static(b"xxID3abcyy"),
            offset: 2,
            len: 6,
        };
        let audio = drain_to_bytes(payload).await.unwrap();
        assert_eq!(audio.as_deref(), Some(&b"ID3abc"[..]));
    }

    #[tokio::test]
    async fn test_view_out_of_range_yields_nothing() {
        let payload = AudioPayload::View {
            buffer: Bytes::from_static(b"short"),
            offset: 3,
            len: 10,
        };
        assert!(drain_to_bytes(payload).await.unwrap().is_none());

        let payload = AudioPayload::View {
            buffer: Bytes::from_static(b"short"),
            offset: usize::MAX,
            len: 1,
        };
        assert!(drain_to_bytes(payload).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reader_is_read_to_end() {
        let payload = AudioPayload::Reader(Box::pin(Cursor::new(b"pull-based audio".to_vec())));
        let audio = drain_to_bytes(payload).await.unwrap().unwrap();
        assert_eq!(&audio[..], b"pull-based audio");
    }

    #[tokio::test]
    async fn test_chunked_reader() {
        let chunks = stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"ab")),
            Ok(Bytes::from_static(b"cd")),
        ]);
        let payload = AudioPayload::Reader(Box::pin(StreamReader::new(chunks)));
        let audio = drain_to_bytes(payload).await.unwrap().unwrap();
        assert_eq!(&audio[..], b"abcd");
    }

    #[tokio::test]
    async fn test_stream_chunks_are_concatenated() {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"one-")),
            Ok(Bytes::from_static(b"two-")),
            Ok(Bytes::from_static(b"three")),
        ]);
        let payload = AudioPayload::Stream(chunks.boxed());
        let audio = drain_to_bytes(payload).await.unwrap().unwrap();
        assert_eq!(&audio[..], b"one-two-three");
    }

    #[tokio::test]
    async fn test_empty_stream_is_empty_buffer() {
        let payload = AudioPayload::Stream(stream::empty().boxed());
        let audio = drain_to_bytes(payload).await.unwrap();
        assert_eq!(audio.map(|a| a.len()), Some(0));
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(TtsError::NetworkError("connection reset".into())),
        ]);
        let payload = AudioPayload::Stream(chunks.boxed());
        let err = drain_to_bytes(payload).await.unwrap_err();
        assert!(matches!(err, TtsError::NetworkError(_)));
    }
}
