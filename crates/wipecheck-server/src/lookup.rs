use serde::{Deserialize, Serialize};

/// Lookup request: at least one of handle or name must carry content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub platform: Option<String>,
}

/// A public profile as assembled from search results or the fallback
/// dataset. All enrichment fields are best-effort.
#[derive(Debug, Clone, Serialize)]
pub struct FoundProfile {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub platform: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub followers: Option<u64>,
    pub verified: Option<bool>,
    pub last_active: Option<String>,
    pub source_urls: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum LookupResult {
    Found(FoundProfile),
    NotFound,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

const SOCIAL_DOMAINS: &[&str] = &[
    "instagram.com",
    "x.com",
    "twitter.com",
    "tiktok.com",
    "facebook.com",
    "linkedin.com",
    "tinder",
];

fn is_social_url(url: &str) -> bool {
    SOCIAL_DOMAINS.iter().any(|d| url.contains(d))
}

/// Public profile lookup collaborator: Tavily-backed search when an API key
/// is configured, static fallback dataset otherwise. Consumed by the check
/// UI flow only, never by the payment core.
pub struct ProfileLookup {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl ProfileLookup {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    pub async fn search(&self, req: &SearchRequest) -> LookupResult {
        if let Some(key) = &self.api_key {
            match self.tavily_search(key, req).await {
                Ok(Some(profile)) => return LookupResult::Found(profile),
                Ok(None) => {}
                Err(e) => {
                    // Degrade to the static dataset on any search failure
                    tracing::warn!(error = %e, "tavily search failed");
                }
            }
        }

        match static_profile(req) {
            Some(profile) => LookupResult::Found(profile),
            None => LookupResult::NotFound,
        }
    }

    async fn tavily_search(
        &self,
        api_key: &str,
        req: &SearchRequest,
    ) -> Result<Option<FoundProfile>, String> {
        let handle = req.handle.as_deref().unwrap_or("").trim();
        let name = req.name.as_deref().unwrap_or("").trim();
        let platform = req.platform.as_deref().unwrap_or("").trim();

        let mut query_parts = Vec::new();
        if !handle.is_empty() {
            query_parts.push(handle.to_string());
        }
        if !platform.is_empty() {
            query_parts.push(platform.to_string());
        }
        if !name.is_empty() {
            query_parts.push(format!("\"{name}\""));
        }
        query_parts.push("profile".to_string());

        let resp = self
            .client
            .post("https://api.tavily.com/search")
            .bearer_auth(api_key)
            .timeout(std::time::Duration::from_secs(15))
            .json(&serde_json::json!({
                "query": query_parts.join(" "),
                "depth": "basic",
                "max_results": 5,
            }))
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("search API returned {}", resp.status()));
        }

        let body: TavilyResponse = resp
            .json()
            .await
            .map_err(|e| format!("response parse failed: {e}"))?;

        if body.results.is_empty() && body.answer.is_none() {
            return Ok(None);
        }

        // Prefer a result that looks like a social profile link
        let social_hint = body
            .results
            .iter()
            .find(|r| r.url.as_deref().is_some_and(is_social_url))
            .or_else(|| body.results.first());

        let mut snippet_parts = Vec::new();
        if let Some(answer) = &body.answer {
            snippet_parts.push(answer.clone());
        }
        for result in body.results.iter().take(3) {
            if let Some(content) = &result.content {
                snippet_parts.push(content.clone());
            }
        }
        let mut bio = snippet_parts.join(" ");
        if bio.len() > 800 {
            let mut cut = 800;
            while !bio.is_char_boundary(cut) {
                cut -= 1;
            }
            bio.truncate(cut);
        }

        let derived_name = if !name.is_empty() {
            Some(name.to_string())
        } else {
            social_hint
                .and_then(|r| r.title.clone())
                // Drop trailing "- Site" / "| Site" page-title decorations
                .map(|t| {
                    t.split(['-', '|', '•'])
                        .next()
                        .unwrap_or(&t)
                        .trim()
                        .to_string()
                })
                .filter(|t| !t.is_empty())
        };

        let inferred_handle = if !handle.is_empty() {
            Some(handle.to_string())
        } else {
            social_hint
                .and_then(|r| r.url.as_deref())
                .and_then(|u| u.trim_end_matches('/').rsplit('/').next())
                .filter(|s| !s.is_empty() && !s.contains('.'))
                .map(String::from)
        };

        let source_urls = body.results.iter().filter_map(|r| r.url.clone()).collect();

        Ok(Some(FoundProfile {
            name: derived_name,
            handle: inferred_handle,
            platform: (!platform.is_empty()).then(|| platform.to_string()),
            bio: (!bio.is_empty()).then_some(bio),
            profile_pic: None,
            followers: None,
            verified: None,
            last_active: None,
            source_urls,
        }))
    }
}

/// Static fallback dataset used when no search key is configured or the
/// search yields nothing.
fn static_profile(req: &SearchRequest) -> Option<FoundProfile> {
    let handle = req.handle.as_deref().unwrap_or("").trim();
    let name = req.name.as_deref().unwrap_or("").trim();
    let platform = req
        .platform
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    let needle = if !handle.is_empty() { handle } else { name }.to_lowercase();

    if needle.contains("riya") || platform == "instagram" {
        Some(FoundProfile {
            name: Some(if name.is_empty() { "Riya S." } else { name }.to_string()),
            handle: Some(if handle.is_empty() { "riya_travels" } else { handle }.to_string()),
            platform: Some(if platform.is_empty() {
                "instagram".to_string()
            } else {
                platform
            }),
            bio: Some(
                "Travel ✈️ | Coffee ☕ | Crypto-curious 💎 | Telegram: @riya_contact".to_string(),
            ),
            profile_pic: Some("https://placekitten.com/320/320".to_string()),
            followers: Some(5120),
            verified: Some(false),
            last_active: Some("2025-10-20T12:34:00Z".to_string()),
            source_urls: vec![],
        })
    } else if needle.contains("alex") || platform == "tinder" {
        Some(FoundProfile {
            name: Some(if name.is_empty() { "Alex K" } else { name }.to_string()),
            handle: Some(if handle.is_empty() { "alex99" } else { handle }.to_string()),
            platform: Some(if platform.is_empty() {
                "tinder".to_string()
            } else {
                platform
            }),
            bio: Some("Outdoorsy • Indie music • Looking for someone who loves hikes".to_string()),
            profile_pic: Some("https://placekitten.com/321/321".to_string()),
            followers: Some(120),
            verified: Some(false),
            last_active: Some("2025-11-01T09:00:00Z".to_string()),
            source_urls: vec![],
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_dataset_matches_by_handle() {
        let profile = static_profile(&SearchRequest {
            handle: Some("riya_travels".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(profile.bio.unwrap().contains("Telegram"));
        assert_eq!(profile.platform.as_deref(), Some("instagram"));
    }

    #[test]
    fn test_static_dataset_matches_by_platform() {
        let profile = static_profile(&SearchRequest {
            name: Some("Someone".to_string()),
            platform: Some("Tinder".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(profile.handle.as_deref(), Some("alex99"));
        // Caller-supplied name wins over the dataset name
        assert_eq!(profile.name.as_deref(), Some("Someone"));
    }

    #[test]
    fn test_static_dataset_misses_unknown_handle() {
        assert!(static_profile(&SearchRequest {
            handle: Some("nobody_here".to_string()),
            ..Default::default()
        })
        .is_none());
    }

    #[test]
    fn test_social_url_detection() {
        assert!(is_social_url("https://instagram.com/riya_travels"));
        assert!(!is_social_url("https://example.com/blog"));
    }
}
