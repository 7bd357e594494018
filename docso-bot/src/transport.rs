//! Collaborators: where indexes come from and where blocks go

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docso_core::{Block, DocIndex, Handle};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{BotError, BotResult};

/// A sent message: the channel it lives in and its handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub channel: String,
    pub message: Handle,
}

impl MessageRef {
    pub fn new(channel: impl Into<String>, message: impl Into<Handle>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

/// Source of documentation indexes
#[async_trait]
pub trait IndexProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Fetch the index for a package
    async fn fetch_index(&self, package: &str) -> BotResult<Arc<DocIndex>>;

    /// Drop stale indexes held by the provider; returns how many went
    async fn evict_expired(&self) -> usize {
        0
    }
}

/// Destination for rendered blocks
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel backend name
    fn name(&self) -> &str;

    /// Post a new message
    async fn send_block(&self, channel: &str, block: &Block) -> BotResult<MessageRef>;

    /// Replace the content of a message
    async fn edit_block(&self, message: &MessageRef, block: &Block) -> BotResult<()>;

    /// Remove a message
    async fn delete_message(&self, message: &MessageRef) -> BotResult<()>;

    /// Attach reactions to a message, in order
    async fn add_reactions(&self, message: &MessageRef, emojis: &[&str]) -> BotResult<()>;
}

/// Reads `<docs_dir>/<pkg>.json`
///
/// Nested package paths such as `net/http` map to `net_http.json`.
pub struct FileIndexProvider {
    docs_dir: PathBuf,
}

impl FileIndexProvider {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
        }
    }

    /// File that holds the index for `package`
    pub fn path_for(&self, package: &str) -> BotResult<PathBuf> {
        if package.is_empty() || package.contains("..") || package.contains('\\') {
            return Err(BotError::IndexNotFound(package.to_string()));
        }
        Ok(self
            .docs_dir
            .join(format!("{}.json", package.replace('/', "_"))))
    }
}

#[async_trait]
impl IndexProvider for FileIndexProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_index(&self, package: &str) -> BotResult<Arc<DocIndex>> {
        let path = self.path_for(package)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BotError::IndexNotFound(package.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let index = DocIndex::from_json(&content)?;
        tracing::debug!(
            package,
            path = %path.display(),
            types = index.types.len(),
            functions = index.functions.len(),
            "index loaded"
        );
        Ok(Arc::new(index))
    }
}

/// One outbound JSON-lines record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Outbound {
    Send {
        channel: String,
        message: Handle,
        block: Block,
        at: DateTime<Utc>,
    },
    Edit {
        channel: String,
        message: Handle,
        block: Block,
        at: DateTime<Utc>,
    },
    Delete {
        channel: String,
        message: Handle,
        at: DateTime<Utc>,
    },
    React {
        channel: String,
        message: Handle,
        emojis: Vec<String>,
        at: DateTime<Utc>,
    },
}

/// Writes every operation as one JSON object per line
///
/// Message handles are freshly generated UUIDs.
pub struct StdioChannel<W> {
    writer: Mutex<W>,
}

impl StdioChannel<tokio::io::Stdout> {
    /// Channel on the process's standard output
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin + Send> StdioChannel<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    async fn emit(&self, record: &Outbound) -> BotResult<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&line)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| BotError::Transport(e.to_string()))
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Channel for StdioChannel<W> {
    fn name(&self) -> &str {
        "stdio"
    }

    async fn send_block(&self, channel: &str, block: &Block) -> BotResult<MessageRef> {
        let message = MessageRef::new(channel, Uuid::new_v4().to_string());
        self.emit(&Outbound::Send {
            channel: message.channel.clone(),
            message: message.message.clone(),
            block: block.clone(),
            at: Utc::now(),
        })
        .await?;
        Ok(message)
    }

    async fn edit_block(&self, message: &MessageRef, block: &Block) -> BotResult<()> {
        self.emit(&Outbound::Edit {
            channel: message.channel.clone(),
            message: message.message.clone(),
            block: block.clone(),
            at: Utc::now(),
        })
        .await
    }

    async fn delete_message(&self, message: &MessageRef) -> BotResult<()> {
        self.emit(&Outbound::Delete {
            channel: message.channel.clone(),
            message: message.message.clone(),
            at: Utc::now(),
        })
        .await
    }

    async fn add_reactions(&self, message: &MessageRef, emojis: &[&str]) -> BotResult<()> {
        self.emit(&Outbound::React {
            channel: message.channel.clone(),
            message: message.message.clone(),
            emojis: emojis.iter().map(|e| e.to_string()).collect(),
            at: Utc::now(),
        })
        .await
    }
}
