use anyhow::{Context, anyhow};
use medassist_core::article::ArticleList;
use medassist_core::responses::{HealthStatus, ImageGeneration, InstantAnswer};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    reply: Option<String>,
}

pub fn parse_chat_reply(body: &[u8]) -> anyhow::Result<String> {
    let resp: ChatResponse = serde_json::from_slice(body).context("decode chat JSON")?;
    resp.reply.ok_or_else(|| anyhow!("no reply in chat response"))
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    explanation: Option<String>,
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
}

pub fn parse_image_generation(body: &[u8]) -> anyhow::Result<ImageGeneration> {
    let resp: ImageResponse = serde_json::from_slice(body).context("decode image JSON")?;
    Ok(ImageGeneration {
        explanation: non_blank(resp.explanation),
        image_url: non_blank(resp.image_url),
    })
}

pub fn parse_articles(body: &[u8]) -> anyhow::Result<ArticleList> {
    let list: ArticleList = serde_json::from_slice(body).context("decode articles JSON")?;
    if list.count != list.items.len() as u64 {
        log::debug!(
            "articles count {} differs from {} items returned",
            list.count,
            list.items.len()
        );
    }
    Ok(list)
}

pub fn parse_instant_answer(body: &[u8]) -> anyhow::Result<InstantAnswer> {
    serde_json::from_slice(body).context("decode instant answer JSON")
}

pub fn parse_health(body: &[u8]) -> anyhow::Result<HealthStatus> {
    serde_json::from_slice(body).context("decode health JSON")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_reply() {
        let body = br#"{"reply":"Hello"}"#;
        assert_eq!(parse_chat_reply(body).unwrap(), "Hello");
    }

    #[test]
    fn chat_missing_reply_errors() {
        assert!(parse_chat_reply(br#"{"answer":"Hello"}"#).is_err());
        assert!(parse_chat_reply(b"<html>502</html>").is_err());
    }

    #[test]
    fn image_fields_are_optional() {
        let full = parse_image_generation(
            br#"{"explanation":"X","imageUrl":"http://i/1.png"}"#,
        )
        .unwrap();
        assert_eq!(full.explanation.as_deref(), Some("X"));
        assert_eq!(full.image_url.as_deref(), Some("http://i/1.png"));

        let empty = parse_image_generation(br#"{"imageUrl":""}"#).unwrap();
        assert_eq!(empty, ImageGeneration::default());
    }

    #[test]
    fn parses_article_list() {
        let body = br#"{"count":2,"items":[
            {"title":"A","created_at":"2024-05-01","tags":["heart"],"summary":"s","slug":"a"},
            {"title":"B","created_at":"2024-05-02","tags":[],"slug":"b"}
        ]}"#;
        let list = parse_articles(body).unwrap();
        assert_eq!(list.count, 2);
        assert_eq!(list.items[1].slug, "b");
        assert_eq!(list.items[1].summary, None);
    }

    #[test]
    fn parses_instant_answer_and_ignores_timestamp() {
        let body = br#"{"answer":"Rest.","source":"Sources: Google Search","timestamp":1700000000.5}"#;
        let a = parse_instant_answer(body).unwrap();
        assert_eq!(a.answer, "Rest.");
        assert_eq!(a.source, "Sources: Google Search");
    }

    #[test]
    fn parses_health() {
        let h = parse_health(br#"{"status":"healthy","timestamp":1.0,"version":"2.0.0"}"#).unwrap();
        assert!(h.is_healthy());
        assert_eq!(h.version.as_deref(), Some("2.0.0"));
    }
}
