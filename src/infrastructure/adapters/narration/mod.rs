//! Narration Adapter - 朗读代理客户端

mod proxy_client;

pub use proxy_client::*;
