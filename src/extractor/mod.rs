pub mod duration;
pub mod model;
pub mod rules;

#[cfg(test)]
mod tests;

pub use model::{Author, ContentFields, Statistics, VideoUrls};

use serde_json::Value;

use crate::normalizer::CanonicalRecord;
use rules::{Sources, first_match};

/// Derive presentation fields from a record. `None` when the record has no
/// content node; every other missing field falls back to its default.
pub fn extract(record: &CanonicalRecord) -> Option<ContentFields> {
    Sources::from_record(record).map(extract_from)
}

pub fn extract_from(sources: Sources<'_>) -> ContentFields {
    let duration_seconds = first_match(rules::DURATION, sources, rules::non_negative_number)
        .map(duration::normalize_seconds)
        .unwrap_or(0);

    ContentFields {
        aweme_id: first_match(rules::AWEME_ID, sources, rules::identifier),
        description: first_match(rules::DESCRIPTION, sources, rules::non_empty_str)
            .unwrap_or_default(),
        media_urls: first_match(rules::MEDIA, sources, |v| {
            rules::non_empty_array(v).map(|items| flatten_media(items))
        })
        .unwrap_or_default(),
        duration_seconds,
        author: Author {
            nickname: first_match(rules::NICKNAME, sources, rules::non_empty_str)
                .unwrap_or_else(|| model::UNKNOWN_AUTHOR.to_string()),
            signature: first_match(rules::SIGNATURE, sources, rules::non_empty_str)
                .unwrap_or_default(),
        },
        statistics: Statistics {
            digg: first_match(rules::DIGG_COUNT, sources, rules::count).unwrap_or(0),
            comment: first_match(rules::COMMENT_COUNT, sources, rules::count).unwrap_or(0),
            share: first_match(rules::SHARE_COUNT, sources, rules::count).unwrap_or(0),
            collect: first_match(rules::COLLECT_COUNT, sources, rules::count).unwrap_or(0),
        },
        video_urls: VideoUrls {
            download: first_match(rules::DOWNLOAD_URL, sources, rules::first_listed_url),
            play: first_match(rules::PLAY_URL, sources, rules::first_listed_url),
        },
        cover_url: first_match(rules::COVER, sources, rules::first_listed_url),
    }
}

/// Each entry contributes its `url_list`, else its `url`, else itself when
/// it is a plain string.
fn flatten_media(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| -> Vec<String> {
            if let Some(list) = item.get("url_list").and_then(Value::as_array) {
                list.iter().filter_map(rules::non_empty_str).collect()
            } else if let Some(url) = item.get("url").and_then(rules::non_empty_str) {
                vec![url]
            } else {
                rules::non_empty_str(item).into_iter().collect()
            }
        })
        .collect()
}
