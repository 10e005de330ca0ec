use serde::{Deserialize, Serialize};

use crate::template::{Placeholder, TemplateContext};

pub const UNKNOWN_AUTHOR: &str = "未知作者";
pub const IMAGE_POST_LABEL: &str = "图片";
pub const VIDEO_POST_LABEL: &str = "视频";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub nickname: String,
    pub signature: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub digg: u64,
    pub comment: u64,
    pub share: u64,
    pub collect: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUrls {
    pub download: Option<String>,
    pub play: Option<String>,
}

impl VideoUrls {
    /// Download address when present, else the play address.
    pub fn preferred(&self) -> Option<&str> {
        self.download.as_deref().or(self.play.as_deref())
    }
}

/// Presentation fields derived from one canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFields {
    pub aweme_id: Option<String>,
    pub description: String,
    pub media_urls: Vec<String>,
    pub duration_seconds: u64,
    pub author: Author,
    pub statistics: Statistics,
    pub video_urls: VideoUrls,
    pub cover_url: Option<String>,
}

impl ContentFields {
    /// Image posts are recognized only by having media URLs.
    pub fn is_image_post(&self) -> bool {
        !self.media_urls.is_empty()
    }

    pub fn content_type(&self) -> &'static str {
        if self.is_image_post() {
            IMAGE_POST_LABEL
        } else {
            VIDEO_POST_LABEL
        }
    }

    pub fn template_context(&self) -> TemplateContext {
        TemplateContext::new()
            .with(Placeholder::Desc, self.description.as_str())
            .with(Placeholder::Type, self.content_type())
            .with(Placeholder::DiggCount, self.statistics.digg)
            .with(Placeholder::CommentCount, self.statistics.comment)
            .with(Placeholder::ShareCount, self.statistics.share)
            .with(Placeholder::CollectCount, self.statistics.collect)
            .with(Placeholder::Duration, self.duration_seconds)
            .with(Placeholder::Nickname, self.author.nickname.as_str())
            .with(Placeholder::Signature, self.author.signature.as_str())
    }
}
