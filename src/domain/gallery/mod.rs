//! Gallery Context - 展览限界上下文
//!
//! 职责:
//! - 作品元数据
//! - 页面导航（只有作品页带朗读）

mod artwork;

pub use artwork::{Artwork, Page};
