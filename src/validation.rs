// src/validation.rs
use url::Url;

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// Accepts `http(s)://[www.]github.com/<owner>/<repo>` and nothing else.
///
/// Only the shape is checked; whether the repository exists or is public is
/// up to the backend. Hosts are compared after WHATWG parsing, which
/// lowercases them.
pub fn is_public_github_repo_url(candidate: &str) -> bool {
    let parsed = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => return false,
    };

    let is_http = matches!(parsed.scheme(), "http" | "https");
    let is_github_host = parsed
        .host_str()
        .map(|host| GITHUB_HOSTS.contains(&host))
        .unwrap_or(false);
    let segments = parsed
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .count();

    is_http && is_github_host && segments == 2
}
