use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

/// Background facts used whenever a live fetch is unavailable.
pub const FALLBACK_FACTS: &str = "The East Wing of the White House was originally built in 1908. It was extensively remodeled in 1942 during World War II to provide additional office space. It houses the First Lady's staff and the White House Social Secretary. The East Wing has undergone various renovations over the decades.";

const STATUS_QUERY: &str = "White House East Wing renovation demolition current status 2025 political opinion about renovation";
const VIOLATIONS_QUERY: &str = "trump violations of building codes and safety regulations";
const VIOLATIONS_HEADING: &str = "ADDITIONAL FACTS ABOUT BUILDING CODE VIOLATIONS:";

/// Source of background facts for the prompt.
#[async_trait]
pub trait FactProvider: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<String>;
}

/// Always returns `FALLBACK_FACTS`.
pub struct StaticFacts;

#[async_trait]
impl FactProvider for StaticFacts {
    async fn fetch(&self) -> anyhow::Result<String> {
        Ok(FALLBACK_FACTS.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    content: Option<String>,
}

/// Tavily web search. Runs two searches and stitches the answers together.
pub struct TavilyFactProvider {
    client: Client,
    api_key: String,
    max_results: u32,
}

impl TavilyFactProvider {
    pub fn new(api_key: String, max_results: u32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            max_results,
        }
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<String>> {
        let body = serde_json::json!({
            "query": query,
            "max_results": self.max_results,
            "search_depth": "advanced",
            "include_answer": true,
            "include_images": false,
        });

        let response = self
            .client
            .post("https://api.tavily.com/search")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("{status}: {text}");
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(search_snippets(parsed, self.max_results as usize))
    }
}

/// Prefer the generated answer; otherwise use the top result contents.
fn search_snippets(response: SearchResponse, limit: usize) -> Vec<String> {
    match response.answer {
        Some(answer) if !answer.trim().is_empty() => vec![answer],
        _ => response
            .results
            .into_iter()
            .take(limit)
            .filter_map(|r| r.content)
            .collect(),
    }
}

/// Join both searches; the violations section gets its own heading.
pub fn combine_facts(status: &[String], violations: &[String]) -> Option<String> {
    let mut sections = Vec::new();
    if !status.is_empty() {
        sections.push(status.join("\n"));
    }
    if !violations.is_empty() {
        if !sections.is_empty() {
            sections.push(format!("\n\n{VIOLATIONS_HEADING}"));
        }
        sections.push(violations.join("\n"));
    }
    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n"))
    }
}

#[async_trait]
impl FactProvider for TavilyFactProvider {
    async fn fetch(&self) -> anyhow::Result<String> {
        let status = self.search(STATUS_QUERY).await.unwrap_or_else(|e| {
            warn!("status search failed: {e}");
            Vec::new()
        });
        let violations = self.search(VIOLATIONS_QUERY).await.unwrap_or_else(|e| {
            warn!("violations search failed: {e}");
            Vec::new()
        });

        combine_facts(&status, &violations)
            .ok_or_else(|| anyhow::anyhow!("both fact searches came back empty"))
    }
}

/// Fetch facts, falling back to `FALLBACK_FACTS` on any failure.
pub async fn fetch_or_fallback(provider: &dyn FactProvider) -> String {
    match provider.fetch().await {
        Ok(facts) if !facts.trim().is_empty() => {
            info!(chars = facts.len(), "fetched background facts");
            facts
        }
        Ok(_) => {
            warn!("fact provider returned nothing, using fallback facts");
            FALLBACK_FACTS.to_string()
        }
        Err(e) => {
            warn!("could not fetch facts ({e}), using fallback facts");
            FALLBACK_FACTS.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_preferred_over_results() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"answer":"short answer","results":[{"content":"long content"}]}"#,
        )
        .unwrap();
        assert_eq!(search_snippets(response, 3), vec!["short answer"]);
    }

    #[test]
    fn results_used_when_answer_missing() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results":[{"content":"a"},{"title":"no content"},{"content":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(search_snippets(response, 3), vec!["a", "b"]);
    }
}
