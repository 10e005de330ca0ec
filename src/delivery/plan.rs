use crate::delivery::sender::OutboundItem;
use crate::extractor::ContentFields;
use crate::pipeline::errors::PipelineError;

pub const VIDEO_LINK_PREFIX: &str = "视频地址：";

/// What follows the text reply for one resolved post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryPlan {
    /// Every media URL as an image, in order.
    Images(Vec<String>),
    /// The video is over the duration limit: a notice and, if found, the cover.
    LongVideo {
        notice: String,
        cover: Option<String>,
    },
    /// A direct link to the video.
    VideoLink(String),
}

impl DeliveryPlan {
    /// `max_duration_secs == 0.0` disables the duration limit.
    pub fn decide(
        fields: &ContentFields,
        max_duration_secs: f64,
        long_video_notice: &str,
    ) -> Result<Self, PipelineError> {
        if fields.is_image_post() {
            return Ok(Self::Images(fields.media_urls.clone()));
        }

        if max_duration_secs > 0.0 && fields.duration_seconds as f64 > max_duration_secs {
            return Ok(Self::LongVideo {
                notice: long_video_notice.to_string(),
                cover: fields.cover_url.clone(),
            });
        }

        fields
            .video_urls
            .preferred()
            .map(|url| Self::VideoLink(url.to_string()))
            .ok_or(PipelineError::MissingVideoUrl)
    }

    pub fn items(&self) -> Vec<OutboundItem> {
        match self {
            Self::Images(urls) => urls.iter().cloned().map(OutboundItem::Image).collect(),
            Self::LongVideo { notice, cover } => {
                let mut items = vec![OutboundItem::text(notice.as_str())];
                items.extend(cover.iter().cloned().map(OutboundItem::Image));
                items
            }
            Self::VideoLink(url) => vec![OutboundItem::Text(format!("{VIDEO_LINK_PREFIX}{url}"))],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{Author, Statistics, VideoUrls};

    fn video(duration: u64, download: Option<&str>, play: Option<&str>) -> ContentFields {
        ContentFields {
            aweme_id: None,
            description: "d".to_string(),
            media_urls: vec![],
            duration_seconds: duration,
            author: Author {
                nickname: "n".to_string(),
                signature: String::new(),
            },
            statistics: Statistics::default(),
            video_urls: VideoUrls {
                download: download.map(str::to_string),
                play: play.map(str::to_string),
            },
            cover_url: Some("cover".to_string()),
        }
    }

    #[test]
    fn test_image_post_sends_every_url() {
        let mut fields = video(500, Some("u1"), None);
        fields.media_urls = vec!["a", "b", "c", "d"].into_iter().map(String::from).collect();

        let plan = DeliveryPlan::decide(&fields, 90.0, "too long").unwrap();
        assert_eq!(
            plan.items(),
            vec![
                OutboundItem::image("a"),
                OutboundItem::image("b"),
                OutboundItem::image("c"),
                OutboundItem::image("d"),
            ]
        );
    }

    #[test]
    fn test_long_video_sends_notice_and_cover() {
        let plan = DeliveryPlan::decide(&video(120, Some("u1"), Some("u2")), 90.0, "too long").unwrap();
        assert_eq!(
            plan.items(),
            vec![OutboundItem::text("too long"), OutboundItem::image("cover")]
        );

        let mut fields = video(120, Some("u1"), None);
        fields.cover_url = None;
        let plan = DeliveryPlan::decide(&fields, 90.0, "too long").unwrap();
        assert_eq!(plan.items(), vec![OutboundItem::text("too long")]);
    }

    #[test]
    fn test_download_preferred_over_play() {
        let plan = DeliveryPlan::decide(&video(30, Some("u1"), Some("u2")), 90.0, "").unwrap();
        assert_eq!(plan.items(), vec![OutboundItem::text("视频地址：u1")]);

        let plan = DeliveryPlan::decide(&video(30, None, Some("u2")), 90.0, "").unwrap();
        assert_eq!(plan, DeliveryPlan::VideoLink("u2".to_string()));
    }

    #[test]
    fn test_zero_limit_disables_duration_check() {
        let plan = DeliveryPlan::decide(&video(100_000, Some("u1"), None), 0.0, "").unwrap();
        assert_eq!(plan, DeliveryPlan::VideoLink("u1".to_string()));
    }

    #[test]
    fn test_duration_at_limit_is_allowed() {
        let plan = DeliveryPlan::decide(&video(90, Some("u1"), None), 90.0, "").unwrap();
        assert_eq!(plan, DeliveryPlan::VideoLink("u1".to_string()));
    }

    #[test]
    fn test_fractional_limit() {
        let plan = DeliveryPlan::decide(&video(90, Some("u1"), None), 90.5, "long").unwrap();
        assert_eq!(plan, DeliveryPlan::VideoLink("u1".to_string()));

        let plan = DeliveryPlan::decide(&video(91, Some("u1"), None), 90.5, "long").unwrap();
        assert!(matches!(plan, DeliveryPlan::LongVideo { .. }));

        let plan = DeliveryPlan::decide(&video(1, Some("u1"), None), 0.5, "long").unwrap();
        assert!(matches!(plan, DeliveryPlan::LongVideo { .. }));
    }

    #[test]
    fn test_missing_video_url() {
        let result = DeliveryPlan::decide(&video(30, None, None), 90.0, "");
        assert!(matches!(result, Err(PipelineError::MissingVideoUrl)));
    }
}
