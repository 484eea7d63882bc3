//! In-memory collaborators for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm_client::{LlmError, TextGenerator};
use crate::models::skill::Taxonomy;
use crate::retrieval::{IndexDocument, IndexError, IndexFilter, Metadata, VectorIndex};

pub fn metadata(value: Value) -> Metadata {
    value.as_object().cloned().unwrap_or_default()
}

/// Vector index backed by a per-taxonomy list of metadata records.
#[derive(Default)]
pub struct FakeIndex {
    records: HashMap<String, Vec<Metadata>>,
    fail: bool,
    filters: Mutex<Vec<IndexFilter>>,
    queries: Mutex<Vec<String>>,
}

impl FakeIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_records(mut self, taxonomy: Taxonomy, records: Vec<Metadata>) -> Self {
        self.records
            .entry(taxonomy.as_str().to_string())
            .or_default()
            .extend(records);
        self
    }

    pub fn with_skills(self, taxonomy: Taxonomy, skills: &[&str]) -> Self {
        let records = skills
            .iter()
            .map(|s| metadata(serde_json::json!({"framework": taxonomy.as_str(), "skill": s})))
            .collect();
        self.with_records(taxonomy, records)
    }

    pub fn filters_seen(&self) -> Vec<IndexFilter> {
        self.filters.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn query(
        &self,
        text: &str,
        filter: &IndexFilter,
        top_k: usize,
    ) -> Result<Vec<Metadata>, IndexError> {
        self.filters.lock().unwrap().push(filter.clone());
        self.queries.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(IndexError::Api {
                status: 503,
                message: "index unavailable".to_string(),
            });
        }
        Ok(self
            .records
            .get(&filter.framework)
            .map(|r| r.iter().take(top_k).cloned().collect())
            .unwrap_or_default())
    }

    async fn add_documents(
        &self,
        _docs: &[IndexDocument],
        _metadatas: &[Metadata],
    ) -> Result<(), IndexError> {
        Ok(())
    }
}

enum Reply {
    Text(String),
    Fail,
}

/// Text generator that answers by prompt substring. The first matching rule wins;
/// unmatched prompts get the default reply. Every prompt is recorded.
pub struct FakeGenerator {
    rules: Vec<(String, Reply)>,
    default_reply: String,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn new(default_reply: &str) -> Self {
        Self {
            rules: Vec::new(),
            default_reply: default_reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, needle: &str, reply: &str) -> Self {
        self.rules
            .push((needle.to_string(), Reply::Text(reply.to_string())));
        self
    }

    pub fn failing_on(mut self, needle: &str) -> Self {
        self.rules.push((needle.to_string(), Reply::Fail));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn calls_containing(&self, needle: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.contains(needle))
            .count()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.rules.iter().find(|(needle, _)| prompt.contains(needle)) {
            Some((_, Reply::Text(text))) => Ok(text.clone()),
            Some((_, Reply::Fail)) => Err(LlmError::Api {
                status: 503,
                message: "generator unavailable".to_string(),
            }),
            None => Ok(self.default_reply.clone()),
        }
    }
}
