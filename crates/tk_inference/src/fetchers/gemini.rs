use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tk_core::{parse_report, Citation, Error, FetchResult, NewsFetcher, Result};
use tracing::{debug, info, warn};

use super::UNAVAILABLE_MESSAGE;
use crate::Config;

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate and its citations, if any were returned.
    fn into_parts(self) -> (String, Option<Vec<Citation>>) {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return (String::new(), None);
        };

        let text = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        let citations = candidate.grounding_metadata.map(|meta| {
            meta.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .map(|web| Citation::new(web.uri.unwrap_or_default(), web.title))
                .collect()
        });

        (text, citations)
    }
}

pub struct GeminiFetcher {
    client: Client,
    api_key: String,
    config: Config,
}

impl GeminiFetcher {
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("a Gemini API key is required (set GEMINI_API_KEY)".to_string()))?;
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, api_key, config })
    }

    pub fn prompt(&self) -> String {
        build_prompt(&self.config.region, self.config.story_count)
    }

    async fn generate(&self) -> Result<(String, Option<Vec<Citation>>)> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: self.prompt() }],
            }],
            tools: vec![Tool { google_search: GoogleSearch {} }],
        };

        let response = self.client
            .post(format!("{}/models/{}:generateContent", self.config.base_url, self.config.model_name))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        Ok(response.into_parts())
    }
}

impl fmt::Debug for GeminiFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiFetcher")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model", &self.config.model_name)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

pub fn build_prompt(region: &str, story_count: usize) -> String {
    format!(
        "Find the {count} most important news stories from {region} published in the last 24 hours. \
         Cover a mix of Politics, Business, Sports, Entertainment and Tech.\n\
         Answer with exactly {count} stories in plain text, no markdown, using this format for each story:\n\n\
         HEADLINE: <headline>\n\
         SOURCE: <publication name>\n\
         CATEGORY: <one of Politics, Business, Sports, Entertainment, Tech, General>\n\
         SUMMARY: <two sentence summary>\n\
         IS_BREAKING: <true or false>\n\
         ---\n",
        count = story_count,
        region = region,
    )
}

#[async_trait]
impl NewsFetcher for GeminiFetcher {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn fetch(&self) -> Result<FetchResult> {
        info!("📡 Requesting {} stories from {}", self.config.story_count, self.config.model_name);
        let (text, citations) = match self.generate().await {
            Ok(parts) => parts,
            Err(e) => {
                warn!("Gemini request failed: {}", e);
                return Ok(FetchResult::failure(UNAVAILABLE_MESSAGE));
            }
        };
        debug!("Gemini returned {} bytes of text", text.len());

        let report = parse_report(&text);
        if report.dropped > 0 {
            debug!("Dropped {} malformed chunks", report.dropped);
        }
        if report.articles.is_empty() {
            info!("Response contained no usable stories");
        } else {
            info!("✨ Parsed {} stories", report.articles.len());
        }

        Ok(FetchResult::success(report.articles, citations))
    }
}
