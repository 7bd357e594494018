//! Recording collaborators shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docso_bot::{BotError, BotResult, Channel, IndexProvider, MessageRef};
use docso_core::{Block, DocIndex, FunctionEntry, TypeEntry};

/// Serves indexes from memory and counts fetches
#[derive(Default)]
pub struct MapProvider {
    indexes: HashMap<String, Arc<DocIndex>>,
    pub fetches: AtomicUsize,
}

impl MapProvider {
    pub fn with(mut self, package: &str, index: DocIndex) -> Self {
        self.indexes.insert(package.to_string(), Arc::new(index));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndexProvider for MapProvider {
    fn name(&self) -> &str {
        "map"
    }

    async fn fetch_index(&self, package: &str) -> BotResult<Arc<DocIndex>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.indexes
            .get(package)
            .cloned()
            .ok_or_else(|| BotError::IndexNotFound(package.to_string()))
    }
}

/// One recorded channel operation
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Send { message: MessageRef, block: Block },
    Edit { message: MessageRef, block: Block },
    Delete { message: MessageRef },
    React { message: MessageRef, emojis: Vec<String> },
}

/// Records every operation; message ids count up from `m-1`
#[derive(Default)]
pub struct RecordingChannel {
    ops: Mutex<Vec<Op>>,
    next_id: AtomicUsize,
    fail_reactions: bool,
}

impl RecordingChannel {
    /// A channel that rejects every `add_reactions`
    pub fn failing_reactions() -> Self {
        Self {
            fail_reactions: true,
            ..Self::default()
        }
    }

    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(MessageRef, Block)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Send { message, block } => Some((message, block)),
                _ => None,
            })
            .collect()
    }

    pub fn last_sent(&self) -> (MessageRef, Block) {
        self.sent().pop().expect("nothing was sent")
    }

    fn record(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send_block(&self, channel: &str, block: &Block) -> BotResult<MessageRef> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let message = MessageRef::new(channel, format!("m-{}", id));
        self.record(Op::Send {
            message: message.clone(),
            block: block.clone(),
        });
        Ok(message)
    }

    async fn edit_block(&self, message: &MessageRef, block: &Block) -> BotResult<()> {
        self.record(Op::Edit {
            message: message.clone(),
            block: block.clone(),
        });
        Ok(())
    }

    async fn delete_message(&self, message: &MessageRef) -> BotResult<()> {
        self.record(Op::Delete {
            message: message.clone(),
        });
        Ok(())
    }

    async fn add_reactions(&self, message: &MessageRef, emojis: &[&str]) -> BotResult<()> {
        if self.fail_reactions {
            return Err(BotError::Transport("missing permission".to_string()));
        }
        self.record(Op::React {
            message: message.clone(),
            emojis: emojis.iter().map(|e| e.to_string()).collect(),
        });
        Ok(())
    }
}

/// A `strings`-like package with 23 functions and 3 types
pub fn strings_index() -> DocIndex {
    let mut index = DocIndex::new("https://pkg.go.dev/strings")
        .with_type(
            TypeEntry::new("Builder", "type Builder struct")
                .with_comment("A Builder is used to efficiently build a string."),
        )
        .with_type(TypeEntry::new("Reader", "type Reader struct"))
        .with_type(TypeEntry::new("Replacer", "type Replacer struct"))
        .with_function(
            FunctionEntry::method(
                "Builder",
                "WriteString",
                "func (b *Builder) WriteString(s string) (int, error)",
            )
            .with_comment("WriteString appends the contents of s to b's buffer."),
        )
        .with_function(FunctionEntry::method(
            "Builder",
            "WriteByte",
            "func (b *Builder) WriteByte(c byte) error",
        ))
        .with_function(FunctionEntry::method(
            "Reader",
            "Read",
            "func (r *Reader) Read(b []byte) (n int, err error)",
        ));

    for i in 0..20 {
        index.functions.push(
            FunctionEntry::plain(format!("Func{:02}", i), format!("func Func{:02}()", i))
                .with_comment(format!("Func{:02} does thing number {}.", i, i)),
        );
    }
    index
}
