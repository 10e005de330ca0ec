use serde_json::{Value, json};
use std::fs;

use crate::extractor::{ContentFields, extract};
use crate::normalizer::normalize;

fn load_fixture(name: &str) -> Value {
    let raw = fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture");
    serde_json::from_str(&raw).expect("Fixture is not valid JSON")
}

fn extract_value(response: &Value) -> Option<ContentFields> {
    extract(&normalize(response))
}

#[test]
fn test_extract_video_detail() {
    let fields = extract_value(&load_fixture("video_detail.json")).unwrap();

    assert_eq!(fields.aweme_id.as_deref(), Some("7372484719365098803"));
    assert_eq!(fields.description, "对话一夜涨粉8万的00后主播 #海报新闻");
    assert!(!fields.is_image_post());
    assert_eq!(fields.content_type(), "视频");
    // 15400 ms
    assert_eq!(fields.duration_seconds, 15);
    assert_eq!(fields.author.nickname, "海报新闻");
    assert_eq!(fields.author.signature, "大众报业集团主办");
    assert_eq!(fields.statistics.digg, 18734);
    assert_eq!(fields.statistics.collect, 1204);
    assert_eq!(
        fields.video_urls.preferred(),
        Some("https://v3-web.douyinvod.com/download/1.mp4")
    );
    assert_eq!(
        fields.video_urls.play.as_deref(),
        Some("https://v3-web.douyinvod.com/play/1.mp4")
    );
    // dynamic_cover has an empty url_list, so cover is next in line
    assert_eq!(
        fields.cover_url.as_deref(),
        Some("https://p3-pc-sign.douyinpic.com/cover/1.jpeg")
    );
}

#[test]
fn test_extract_image_post() {
    let fields = extract_value(&load_fixture("image_post.json")).unwrap();

    assert!(fields.is_image_post());
    assert_eq!(fields.content_type(), "图片");
    assert_eq!(
        fields.media_urls,
        vec![
            "https://p3-pc-sign.douyinpic.com/img/a.webp",
            "https://p9-pc-sign.douyinpic.com/img/a.webp",
            "https://p3-pc-sign.douyinpic.com/img/b.webp",
            "https://p3-pc-sign.douyinpic.com/img/c.webp",
            "https://p3-pc-sign.douyinpic.com/img/d.webp",
        ]
    );
    assert_eq!(fields.duration_seconds, 0);
    assert_eq!(fields.author.signature, "");
    assert_eq!(fields.statistics.digg, 0);
    assert_eq!(fields.statistics.comment, 5);
    assert_eq!(fields.statistics.share, 0);
}

#[test]
fn test_extract_aweme_list_falls_back_to_payload() {
    let fields = extract_value(&load_fixture("aweme_list.json")).unwrap();

    assert_eq!(fields.aweme_id.as_deref(), Some("7390000000000000002"));
    // empty desc on the content node falls through to the payload
    assert_eq!(fields.description, "payload level description");
    assert_eq!(fields.duration_seconds, 58);
    assert_eq!(fields.author.nickname, "列表作者");
    assert_eq!(fields.statistics.digg, 42);
    assert_eq!(fields.statistics.share, 7);
    assert_eq!(fields.video_urls.download, None);
    assert_eq!(
        fields.video_urls.preferred(),
        Some("https://v3-web.douyinvod.com/play/list.mp4")
    );
    assert_eq!(
        fields.cover_url.as_deref(),
        Some("https://p3-pc-sign.douyinpic.com/payload-cover.jpeg")
    );
}

#[test]
fn test_defaults_for_sparse_content() {
    let fields = extract_value(&json!({"data": {"aweme_detail": {"desc": "only desc"}}})).unwrap();

    assert_eq!(fields.description, "only desc");
    assert!(fields.media_urls.is_empty());
    assert_eq!(fields.duration_seconds, 0);
    assert_eq!(fields.author.nickname, "未知作者");
    assert_eq!(fields.statistics, Default::default());
    assert_eq!(fields.video_urls.preferred(), None);
    assert_eq!(fields.cover_url, None);
    assert_eq!(fields.aweme_id, None);
}

#[test]
fn test_no_content_node_yields_nothing() {
    assert!(extract_value(&json!({"code": 200, "data": {}})).is_none());
}

#[test]
fn test_first_non_empty_media_source_wins() {
    // content.images is non-empty but yields no URLs; payload images are ignored
    let resp = json!({
        "data": {
            "aweme_detail": {"images": [{"uri": "no-urls"}]},
            "images": [{"url_list": ["https://example.com/payload.jpg"]}]
        }
    });
    let fields = extract_value(&resp).unwrap();
    assert!(fields.media_urls.is_empty());
    assert!(!fields.is_image_post());

    // an empty images list is skipped in favour of image_infos
    let resp = json!({
        "data": {
            "aweme_detail": {
                "images": [],
                "image_infos": [{"url_list": ["https://example.com/info.jpg"]}]
            }
        }
    });
    let fields = extract_value(&resp).unwrap();
    assert_eq!(fields.media_urls, vec!["https://example.com/info.jpg"]);
}

#[test]
fn test_duration_sources_in_order() {
    let resp = json!({"aweme_detail": {"video": {"duration": 90}, "duration": 5000}});
    assert_eq!(extract_value(&resp).unwrap().duration_seconds, 90);

    let resp = json!({"aweme_detail": {"video": {"duration": "n/a"}, "duration": 45}});
    assert_eq!(extract_value(&resp).unwrap().duration_seconds, 45);

    let resp = json!({"aweme_detail": {"video": {}, "desc": "x"}, "music": {"duration": 33}});
    assert_eq!(extract_value(&resp).unwrap().duration_seconds, 33);

    let resp = json!({"aweme_detail": {"music": {"duration": 187000}}});
    assert_eq!(extract_value(&resp).unwrap().duration_seconds, 187);
}

#[test]
fn test_statistics_fields_are_independent() {
    let resp = json!({
        "data": {
            "aweme_detail": {"statistics": {"digg_count": 3}},
            "statistics": {"digg_count": 99, "comment_count": 4}
        }
    });
    let fields = extract_value(&resp).unwrap();
    assert_eq!(fields.statistics.digg, 3);
    assert_eq!(fields.statistics.comment, 4);
}

#[test]
fn test_cover_priority_across_nodes() {
    let resp = json!({
        "data": {
            "aweme_detail": {"video": {"cover_original_scale": {"url_list": ["orig"]}}},
            "dynamic_cover": {"url_list": ["payload-dynamic"]}
        }
    });
    assert_eq!(extract_value(&resp).unwrap().cover_url.as_deref(), Some("orig"));

    let resp = json!({
        "data": {
            "aweme_detail": {"video": {}},
            "cover_original_scale": {"url_list": ["payload-orig"]},
            "cover": {"url_list": ["payload-cover"]}
        }
    });
    assert_eq!(
        extract_value(&resp).unwrap().cover_url.as_deref(),
        Some("payload-cover")
    );
}

#[test]
fn test_template_context_from_fields() {
    use crate::template::{Placeholder, TemplateValue, render};

    let fields = extract_value(&load_fixture("image_post.json")).unwrap();
    let ctx = fields.template_context();
    assert_eq!(ctx.get(Placeholder::Type), Some(&TemplateValue::Text("图片".into())));
    assert_eq!(
        render("{nickname}|{type}|{digg_count}|{comment_count}", &ctx),
        "晚霞收集者|图片||5"
    );
}
