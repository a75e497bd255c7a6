use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, IndexSnapshot, DEFAULT_SIMILARITY_THRESHOLD};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

impl AppConfig {
    /// Loads `config/app.yaml` and `config/prompts.yaml` (or the files named by
    /// `APP_CONFIG` / `PROMPTS_CONFIG`), then applies environment overrides.
    /// Missing files fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = env_path("APP_CONFIG", "config/app.yaml");
        let prompts_path = env_path("PROMPTS_CONFIG", "config/prompts.yaml");

        let mut config: Config = read_yaml_or_default(&config_path)?;
        let prompts: PromptsConfig = read_yaml_or_default(&prompts_path)?;
        config.apply_env()?;

        Ok(Self { config, prompts })
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn read_yaml_or_default<T>(path: &Path) -> Result<T, ConfigError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(T::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub rag: RagConfig,
    pub ingest: IngestConfig,
}

impl Config {
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "SERVER_PORT",
                value: port,
            })?;
        }
        if let Ok(path) = std::env::var("SNAPSHOT_PATH") {
            self.ingest.snapshot_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("INGEST_SOURCE") {
            self.ingest.source_path = PathBuf::from(path);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            model: "gpt-4o-mini".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

impl EmbeddingConfig {
    /// Rejects a snapshot whose vectors cannot be compared with this model's
    /// query embeddings. An empty snapshot is always accepted.
    pub fn check_snapshot(&self, snapshot: &IndexSnapshot) -> Result<(), DomainError> {
        if snapshot.metadata.model != self.model {
            tracing::warn!(
                snapshot_model = %snapshot.metadata.model,
                configured_model = %self.model,
                "snapshot was built with a different embedding model"
            );
        }
        match snapshot.dimension() {
            Some(dimension) if dimension != self.dimension => {
                Err(DomainError::dimension_mismatch(self.dimension, dimension))
            }
            _ => Ok(()),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimension: 1536,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub top_k: usize,
    pub threshold: f64,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub source_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub clean_markdown: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("data/faq.md"),
            snapshot_path: PathBuf::from("data/embeddings.json"),
            chunk_size: 600,
            chunk_overlap: 100,
            clean_markdown: false,
        }
    }
}

/// System and user prompt templates per pathway.
///
/// User templates understand `{context}` and `{question}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub kb_only: PathwayPrompt,
    pub kb_augmented: PathwayPrompt,
    pub llm_fallback: PathwayPrompt,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathwayPrompt {
    pub system: String,
    pub user: String,
    pub temperature: Option<f64>,
}

impl PathwayPrompt {
    /// Fills `{context}` and `{question}` in one pass over the template.
    /// Placeholder text inside either value is copied through untouched.
    pub fn render_user(&self, context: &str, question: &str) -> String {
        let mut rendered = String::with_capacity(self.user.len() + context.len() + question.len());
        let mut rest = self.user.as_str();
        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{context}") {
                rendered.push_str(context);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{question}") {
                rendered.push_str(question);
                rest = after;
            } else {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
        rendered.push_str(rest);
        rendered
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            kb_only: PathwayPrompt {
                system: "You are a helpful assistant that answers questions strictly from the provided context.\n\n\
                         Rules:\n\
                         1. Use only information found in the context.\n\
                         2. If the answer is not clearly in the context, reply exactly: \"I don't know based on the internal docs.\"\n\
                         3. Be concise and factual."
                    .to_string(),
                user: "Context:\n{context}\n\nUser question: {question}\n\n\
                       If you cannot answer using only the context, reply: \"I don't know based on the internal docs.\""
                    .to_string(),
                temperature: Some(0.1),
            },
            kb_augmented: PathwayPrompt {
                system: "Use the internal documentation in the context to answer the user's question. \
                         When the context contains the answer, respond with it clearly."
                    .to_string(),
                user: "Context:\n{context}\n\nUser question: {question}".to_string(),
                temperature: None,
            },
            llm_fallback: PathwayPrompt {
                system: "You are a helpful assistant. The user's question is not covered by the internal documentation. \
                         Use general knowledge to give the best possible answer."
                    .to_string(),
                user: "{question}".to_string(),
                temperature: Some(0.7),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chunk, Embedding, EmbeddingRecord};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rag.top_k, 3);
        assert_eq!(config.rag.threshold, 0.60);
        assert_eq!(config.ingest.chunk_size, 600);
        assert_eq!(config.ingest.chunk_overlap, 100);
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str(
            "rag:\n  threshold: 0.75\nllm:\n  provider: anthropic\n  model: claude-3-5-haiku-latest\n",
        )
        .unwrap();

        assert_eq!(config.rag.threshold, 0.75);
        assert_eq!(config.rag.top_k, 3);
        assert_eq!(config.llm.provider, LlmProvider::Anthropic);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prompts: PromptsConfig = read_yaml_or_default(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(prompts.kb_only.temperature, Some(0.1));
    }

    #[test]
    fn test_render_user_fills_placeholders() {
        let prompts = PromptsConfig::default();
        let rendered = prompts.kb_augmented.render_user("[Context 1]\nA", "Q?");
        assert_eq!(rendered, "Context:\n[Context 1]\nA\n\nUser question: Q?");
        assert_eq!(prompts.llm_fallback.render_user("ignored", "Q?"), "Q?");
    }

    #[test]
    fn test_render_user_leaves_placeholders_in_values() {
        let prompts = PromptsConfig::default();
        let rendered = prompts
            .kb_augmented
            .render_user("[Context 1]\nUse the form at {question} to apply.", "How to {context}?");
        assert_eq!(
            rendered,
            "Context:\n[Context 1]\nUse the form at {question} to apply.\n\nUser question: How to {context}?"
        );
    }

    #[test]
    fn test_render_user_keeps_stray_braces() {
        let prompt = PathwayPrompt {
            system: String::new(),
            user: "{ {question} } {unknown}{context}".to_string(),
            temperature: None,
        };
        assert_eq!(prompt.render_user("C", "Q"), "{ Q } {unknown}C");
    }

    fn embedded(model: &str, vectors: &[Vec<f32>]) -> IndexSnapshot {
        let records = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| {
                EmbeddingRecord::new(Chunk::new(format!("chunk {i}"), i), Embedding::new(v.clone()))
            })
            .collect();
        IndexSnapshot::new(model, records)
    }

    #[test]
    fn test_check_snapshot_rejects_dimension_mismatch() {
        let config = EmbeddingConfig {
            model: "m".to_string(),
            dimension: 3,
        };
        let err = config
            .check_snapshot(&embedded("m", &[vec![1.0, 0.0], vec![0.0, 1.0]]))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_check_snapshot_accepts_matching_or_empty() {
        let config = EmbeddingConfig {
            model: "m".to_string(),
            dimension: 2,
        };
        assert!(config.check_snapshot(&embedded("m", &[vec![1.0, 0.0]])).is_ok());
        assert!(config.check_snapshot(&IndexSnapshot::empty("m")).is_ok());
        // A different model name only warns.
        assert!(config.check_snapshot(&embedded("other", &[vec![1.0, 0.0]])).is_ok());
    }
}
