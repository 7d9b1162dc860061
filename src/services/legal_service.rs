use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::ServiceError;
use crate::models::SearchResult;

const EMBEDDED_TOPICS: &str = include_str!("../../data/legal_topics.json");
const RESULT_LINK: &str = "#";

#[derive(Debug, Clone, Deserialize)]
pub struct LegalEntry {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl LegalEntry {
    fn to_result(&self) -> SearchResult {
        SearchResult {
            title: self.title.clone(),
            snippet: self.content.trim().to_string(),
            link: Some(RESULT_LINK.to_string()),
            display_link: Some(self.sources.first().cloned().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegalTopic {
    pub key: String,
    #[serde(flatten)]
    pub entry: LegalEntry,
}

impl LegalTopic {
    /// `query` must already be lower-cased.
    fn matches(&self, query: &str) -> bool {
        query.contains(self.key.as_str())
            || self.key.split_whitespace().any(|word| query.contains(word))
    }
}

/// A phrase that routes to a topic when no topic key matched directly.
#[derive(Debug, Clone, Deserialize)]
pub struct Synonym {
    pub term: String,
    pub topic: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBase {
    pub topics: Vec<LegalTopic>,
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
    pub fallback: LegalEntry,
}

impl KnowledgeBase {
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(EMBEDDED_TOPICS).context("Failed to parse embedded legal topics")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read legal topics: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse legal topics: {}", path.display()))
    }

    fn topic(&self, key: &str) -> Option<&LegalTopic> {
        self.topics.iter().find(|topic| topic.key == key)
    }
}

#[derive(Clone)]
pub struct LegalService {
    knowledge_base: Arc<KnowledgeBase>,
}

impl LegalService {
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        Self {
            knowledge_base: Arc::new(knowledge_base),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let knowledge_base = match &config.topics_path {
            Some(path) => KnowledgeBase::from_path(path)?,
            None => KnowledgeBase::embedded()?,
        };
        Ok(Self::new(knowledge_base))
    }

    pub fn topic_count(&self) -> usize {
        self.knowledge_base.topics.len()
    }

    /// Matches topics in knowledge-base order, then the first synonym, then
    /// falls back to the general entry. Never returns an empty list.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError> {
        let query = query.to_lowercase();
        let kb = &self.knowledge_base;

        let mut results: Vec<SearchResult> = kb
            .topics
            .iter()
            .filter(|topic| topic.matches(&query))
            .map(|topic| topic.entry.to_result())
            .collect();

        if results.is_empty() {
            if let Some(synonym) = kb.synonyms.iter().find(|s| query.contains(s.term.as_str())) {
                let topic = kb.topic(&synonym.topic).ok_or_else(|| {
                    ServiceError::Internal(format!(
                        "Synonym '{}' refers to unknown topic '{}'",
                        synonym.term, synonym.topic
                    ))
                })?;
                debug!(term = %synonym.term, topic = %topic.key, "matched synonym");
                results.push(topic.entry.to_result());
            }
        }

        if results.is_empty() {
            debug!("no topic matched, using fallback");
            results.push(kb.fallback.to_result());
        }

        Ok(results)
    }
}
