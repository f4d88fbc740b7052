use std::io::Read;

use anyhow::{anyhow, Result};
use axum::http::HeaderMap;
use flate2::read::GzDecoder;

use backend_domain::RuntimeConfig;

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Decodes an uploaded combat log. Blank uploads are refused here so the
/// application layer only sees text worth scanning. `max_bytes` bounds the
/// decoded size, which for gzip uploads can far exceed the request body.
pub fn read_log_body(headers: &HeaderMap, body: &[u8], max_bytes: u64) -> Result<String> {
    let content = maybe_gunzip(headers, body, max_bytes)?;
    if content.trim().is_empty() {
        return Err(anyhow!("combat log body is empty"));
    }
    Ok(content)
}

fn maybe_gunzip(headers: &HeaderMap, body: &[u8], max_bytes: u64) -> Result<String> {
    if let Some(encoding) = headers.get("Content-Encoding") {
        if encoding.to_str().unwrap_or("").eq_ignore_ascii_case("gzip") {
            let mut decoder = GzDecoder::new(body).take(max_bytes.saturating_add(1));
            let mut out = Vec::new();
            decoder
                .read_to_end(&mut out)
                .map_err(|err| anyhow!("invalid gzip body: {}", err))?;
            if out.len() as u64 > max_bytes {
                return Err(anyhow!("decompressed body exceeds {} bytes", max_bytes));
            }
            return utf8(out);
        }
    }
    utf8(body.to_vec())
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|err| anyhow!("body is not valid UTF-8: {}", err))
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use axum::http::HeaderValue;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    fn config(api_token: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: api_token.map(ToString::to_string),
            data_dir: None,
            max_body_bytes: 1024,
            request_timeout_seconds: 5,
        }
    }

    #[test]
    fn open_when_no_token_is_configured() {
        assert!(authorize(&config(None), &HeaderMap::new()));
    }

    #[test]
    fn bearer_token_must_match() {
        let config = config(Some("secret"));
        let mut headers = HeaderMap::new();
        assert!(!authorize(&config, &headers));

        headers.insert("Authorization", HeaderValue::from_static("Bearer nope"));
        assert!(!authorize(&config, &headers));

        headers.insert("Authorization", HeaderValue::from_static("Bearer secret"));
        assert!(authorize(&config, &headers));

        headers.insert("Authorization", HeaderValue::from_static("secret"));
        assert!(!authorize(&config, &headers));
    }

    #[test]
    fn gzip_bodies_are_inflated() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(b"[00:05:10] npc_dota_hero_antimage buys item item_boots\n")
            .expect("write");
        let compressed = encoder.finish().expect("finish");

        let mut headers = HeaderMap::new();
        headers.insert("Content-Encoding", HeaderValue::from_static("gzip"));
        let text = read_log_body(&headers, &compressed, 1024).expect("decode");
        assert!(text.starts_with("[00:05:10]"));
    }

    #[test]
    fn blank_and_invalid_bodies_are_refused() {
        let headers = HeaderMap::new();
        assert!(read_log_body(&headers, b"  \n\t", 1024).is_err());
        assert!(read_log_body(&headers, &[0xff, 0xfe, 0x00], 1024).is_err());

        let mut gzip = HeaderMap::new();
        gzip.insert("Content-Encoding", HeaderValue::from_static("gzip"));
        assert!(read_log_body(&gzip, b"not gzip", 1024).is_err());
    }

    #[test]
    fn gzip_bodies_are_capped_after_inflation() {
        let line = "[00:07:00] npc_dota_hero_sniper hits npc_dota_hero_antimage with weapon_sniper for 45 damage\n";
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        for _ in 0..10_000 {
            encoder.write_all(line.as_bytes()).expect("write");
        }
        let compressed = encoder.finish().expect("finish");
        let inflated = (line.len() * 10_000) as u64;
        assert!((compressed.len() as u64) < inflated / 10);

        let mut headers = HeaderMap::new();
        headers.insert("Content-Encoding", HeaderValue::from_static("gzip"));
        let err = read_log_body(&headers, &compressed, 64 * 1024).expect_err("over limit");
        assert!(err.to_string().contains("exceeds"));

        let text = read_log_body(&headers, &compressed, inflated).expect("at limit");
        assert_eq!(text.len() as u64, inflated);
    }
}
