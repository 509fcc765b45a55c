//! Randomized browser-like request headers
//!
//! Every request draws Accept, Accept-Language, Referer, and Sec-Fetch-Site
//! from fixed pools around constant client-hint values, diversifying the
//! request fingerprint while the User-Agent stays pinned per account.

use rand::seq::SliceRandom;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};

use crate::error::Result;

const ACCEPT_OPTIONS: &[&str] = &[
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    "application/json, text/javascript, */*; q=0.01",
    "text/plain, */*; q=0.01",
];

const ACCEPT_LANGUAGE_OPTIONS: &[&str] = &[
    "en-US,en;q=0.9",
    "vi-VN,vi;q=0.9,fr-FR;q=0.8,fr;q=0.7,en-US;q=0.6,en;q=0.5",
    "en-GB,en;q=0.9,en-US;q=0.8,vi;q=0.7",
];

const REFERER_OPTIONS: &[&str] = &[
    "https://www.google.com/",
    "https://www.facebook.com/",
    "https://tg-app.memefi.club/",
];

const SEC_FETCH_SITE_OPTIONS: &[&str] = &["same-origin", "same-site", "cross-site"];

const ORIGIN_VALUE: &str = "https://tg-app.memefi.club";
const SEC_CH_UA: &str =
    "\"Not/A)Brand\";v=\"99\", \"Google Chrome\";v=\"115\", \"Chromium\";v=\"115\"";

fn pick(options: &'static [&'static str]) -> &'static str {
    options
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(options[0])
}

/// Build a randomized header set for one request
pub fn random_headers(user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(ACCEPT, HeaderValue::from_static(pick(ACCEPT_OPTIONS)));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(pick(ACCEPT_LANGUAGE_OPTIONS)),
    );
    headers.insert("content-language", HeaderValue::from_static("en-GB"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_VALUE));
    headers.insert(REFERER, HeaderValue::from_static(pick(REFERER_OPTIONS)));
    headers.insert("sec-ch-ua", HeaderValue::from_static(SEC_CH_UA));
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert(
        "sec-fetch-site",
        HeaderValue::from_static(pick(SEC_FETCH_SITE_OPTIONS)),
    );
    headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_draw_from_pools() {
        let headers = random_headers("Mozilla/5.0 (test)").unwrap();

        let accept = headers.get(ACCEPT).unwrap().to_str().unwrap();
        assert!(ACCEPT_OPTIONS.contains(&accept));

        let referer = headers.get(REFERER).unwrap().to_str().unwrap();
        assert!(REFERER_OPTIONS.contains(&referer));

        let site = headers.get("sec-fetch-site").unwrap().to_str().unwrap();
        assert!(SEC_FETCH_SITE_OPTIONS.contains(&site));
    }

    #[test]
    fn test_constant_headers() {
        let headers = random_headers("Mozilla/5.0 (test)").unwrap();

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(ORIGIN).unwrap(), ORIGIN_VALUE);
        assert_eq!(headers.get(USER_AGENT).unwrap(), "Mozilla/5.0 (test)");
        assert!(headers.get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        assert!(random_headers("bad\nagent").is_err());
    }
}
