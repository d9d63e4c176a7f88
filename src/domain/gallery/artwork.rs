//! Gallery Context - Artwork & Pages

use serde::{Deserialize, Serialize};

/// 展览作品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub title: String,
    pub year: String,
    pub medium: String,
    pub artist: String,
    pub description: String,
    pub image_url: String,
}

impl Artwork {
    /// 当前展出的作品
    pub fn featured() -> Self {
        Self {
            title: "Untitled Landscape".to_string(),
            year: "2024".to_string(),
            medium: "Oil on canvas".to_string(),
            artist: "Ceylan He".to_string(),
            description: "A contemplative landscape study exploring color temperature, depth, \
                          and quiet motion through layered brushwork."
                .to_string(),
            image_url: "https://picsum.photos/300/200".to_string(),
        }
    }

    /// 朗读文本：标题 + 描述
    pub fn narration_text(&self) -> String {
        format!("{}. {}", self.title, self.description)
    }
}

/// 页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Artwork,
    About,
    Archive,
    Contact,
}

impl Page {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Artwork => "artwork",
            Self::About => "about",
            Self::Archive => "archive",
            Self::Contact => "contact",
        }
    }

    /// 该页面是否承载朗读
    pub fn has_narration(&self) -> bool {
        matches!(self, Self::Artwork)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::Artwork
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narration_text() {
        let artwork = Artwork::featured();
        let text = artwork.narration_text();
        assert!(text.starts_with("Untitled Landscape. A contemplative landscape study"));
        assert!(text.ends_with("layered brushwork."));
    }

    #[test]
    fn test_only_artwork_page_has_narration() {
        assert!(Page::Artwork.has_narration());
        assert!(!Page::About.has_narration());
        assert!(!Page::Archive.has_narration());
        assert!(!Page::Contact.has_narration());
    }

    #[test]
    fn test_default_page_is_artwork() {
        assert_eq!(Page::default(), Page::Artwork);
        assert_eq!(Page::default().id(), "artwork");
    }
}
