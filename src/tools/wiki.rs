//! Wikipedia lookup: search for matching pages, then fetch their summaries.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::WikiConfig;

const NO_RESULT: &str = "No good Wikipedia Search Result was found";

/// Look up a topic on Wikipedia.
pub struct WikiLookup {
    client: Client,
    config: WikiConfig,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    title: String,
    #[serde(default)]
    extract: String,
}

impl WikiLookup {
    pub fn new(config: WikiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("research_agent/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn run(&self, query: &str) -> anyhow::Result<String> {
        let titles = self.search(query.trim()).await?;

        let mut pages = Vec::new();
        for title in titles.iter().take(self.config.top_k_results) {
            if let Some(summary) = self.summary(title).await? {
                pages.push(format!("Page: {}\nSummary: {}", summary.title, summary.extract));
            }
        }

        if pages.is_empty() {
            return Ok(NO_RESULT.to_string());
        }

        Ok(truncate_chars(
            &pages.join("\n\n"),
            self.config.doc_content_chars_max,
        ))
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<String>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/w/api.php", self.base_url());
        let limit = self.config.top_k_results.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        let titles: Vec<String> = body
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default();

        Ok(titles)
    }

    /// Page summary, or `None` when the page has disappeared since the search.
    async fn summary(&self, title: &str) -> anyhow::Result<Option<PageSummary>> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url(),
            urlencoding::encode(&title.replace(' ', "_"))
        );

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(title, "Wikipedia page vanished between search and summary");
            return Ok(None);
        }

        Ok(Some(response.error_for_status()?.json().await?))
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lookup_for(server: &MockServer, max_chars: usize) -> WikiLookup {
        WikiLookup::new(WikiConfig {
            base_url: server.uri(),
            top_k_results: 1,
            doc_content_chars_max: max_chars,
        })
        .expect("client")
    }

    #[tokio::test]
    async fn returns_page_and_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("srsearch", "coral bleaching"))
            .and(query_param("srlimit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"search": [{"title": "Coral bleaching"}]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/rest_v1/page/summary/Coral_bleaching"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Coral bleaching",
                "extract": "Coral bleaching is the process when corals become white."
            })))
            .mount(&server)
            .await;

        let output = lookup_for(&server, 500)
            .run("coral bleaching")
            .await
            .expect("lookup");
        assert_eq!(
            output,
            "Page: Coral bleaching\nSummary: Coral bleaching is the process when corals become white."
        );
    }

    #[tokio::test]
    async fn truncates_to_character_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"search": [{"title": "Reef"}]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/rest_v1/page/summary/Reef"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Reef",
                "extract": "A reef is a ridge of rock."
            })))
            .mount(&server)
            .await;

        let output = lookup_for(&server, 10).run("reef").await.expect("lookup");
        assert_eq!(output, "Page: Reef");
    }

    #[tokio::test]
    async fn no_hits_yields_fixed_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"query": {"search": []}})),
            )
            .mount(&server)
            .await;

        let output = lookup_for(&server, 500).run("qwxzzy").await.expect("lookup");
        assert_eq!(output, NO_RESULT);
    }

    #[tokio::test]
    async fn server_error_is_a_tool_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(lookup_for(&server, 500).run("reef").await.is_err());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
