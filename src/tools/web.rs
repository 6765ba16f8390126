//! Web search tool backed by DuckDuckGo's HTML endpoint.

use std::time::Duration;

use reqwest::Client;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
const MAX_RESULTS: usize = 5;

/// Search the web (DuckDuckGo HTML, no API key needed).
pub struct WebSearch {
    client: Client,
    endpoint: String,
}

impl WebSearch {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_endpoint(DDG_HTML_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; ResearchAgent/0.1)")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub async fn run(&self, query: &str) -> anyhow::Result<String> {
        let query = query.trim();
        if query.is_empty() {
            anyhow::bail!("search query is empty");
        }

        let url = format!("{}?q={}", self.endpoint, urlencoding::encode(query));
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error: {}", status);
        }

        let html = response.text().await?;
        let results = extract_ddg_results(&html);

        tracing::debug!(query, results = results.len(), "Web search finished");

        if results.is_empty() {
            Ok(format!("No results found for: {}", query))
        } else {
            Ok(results.join("\n\n"))
        }
    }
}

/// Extract search results from DuckDuckGo HTML.
fn extract_ddg_results(html: &str) -> Vec<String> {
    let mut results = Vec::new();

    for chunk in html.split("class=\"result__body\"").skip(1) {
        if results.len() >= MAX_RESULTS {
            break;
        }

        let title = field_text(chunk, "result__a").unwrap_or("");
        let snippet = field_text(chunk, "result__snippet").unwrap_or("No snippet");
        let url = field_text(chunk, "result__url").unwrap_or("");

        if !title.is_empty() {
            results.push(format!(
                "**{}**\n{}\nURL: {}",
                html_decode(title),
                html_decode(snippet),
                url
            ));
        }
    }

    results
}

/// Text between the tag carrying `class` and the next `<`.
fn field_text<'a>(chunk: &'a str, class: &str) -> Option<&'a str> {
    chunk
        .split(&format!("class=\"{}\"", class))
        .nth(1)
        .and_then(|s| s.split_once('>'))
        .and_then(|(_, rest)| rest.split('<').next())
        .map(str::trim)
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
