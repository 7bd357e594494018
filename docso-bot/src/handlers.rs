//! Command dispatch
//!
//! The [`Bot`] turns inbound events into blocks: `doc` lookups go through the
//! query resolver, `getfuncs`/`gettypes` open a paginated listing, and
//! reactions on a listing message navigate it.

use std::sync::Arc;

use docso_core::format::{self, Block};
use docso_core::{
    resolve, CallerId, DocIndex, DocsoError, ListingKind, Navigation, PaginationRegistry, Query,
};
use tracing::{debug, info, warn};

use crate::config::BotConfig;
use crate::error::{BotError, BotResult};
use crate::events::{signal_for, Event, MessageEvent, ReactionEvent, LISTING_REACTIONS};
use crate::transport::{Channel, IndexProvider, MessageRef};

/// What a message asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Doc,
    Listing(ListingKind),
}

/// Chat front end
pub struct Bot {
    config: BotConfig,
    provider: Arc<dyn IndexProvider>,
    channel: Arc<dyn Channel>,
    registry: Arc<PaginationRegistry>,
}

impl Bot {
    pub fn new(
        config: BotConfig,
        provider: Arc<dyn IndexProvider>,
        channel: Arc<dyn Channel>,
    ) -> Self {
        let registry = Arc::new(PaginationRegistry::new(
            config.pagination.registry_config(),
        ));
        Self::with_registry(config, provider, channel, registry)
    }

    /// Use an existing registry (shared with the sweeper, or a test clock)
    pub fn with_registry(
        config: BotConfig,
        provider: Arc<dyn IndexProvider>,
        channel: Arc<dyn Channel>,
        registry: Arc<PaginationRegistry>,
    ) -> Self {
        Self {
            config,
            provider,
            channel,
            registry,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<PaginationRegistry> {
        &self.registry
    }

    /// Split `content` into a command and its arguments
    ///
    /// `None` when the message is not addressed to the bot.
    pub fn parse_command<'a>(&self, content: &'a str) -> Option<(Command, Vec<&'a str>)> {
        let rest = content.trim_start().strip_prefix(self.config.prefix.as_str())?;
        let mut tokens = rest.split_whitespace();
        let word = tokens.next()?;

        // the command word must follow the prefix directly
        if !rest.starts_with(word) {
            return None;
        }

        let command = if word == self.config.doc_command {
            Command::Doc
        } else if word == self.config.funcs_command {
            Command::Listing(ListingKind::Functions)
        } else if word == self.config.types_command {
            Command::Listing(ListingKind::Types)
        } else {
            return None;
        };

        Some((command, tokens.collect()))
    }

    /// Handle one inbound event
    pub async fn handle_event(&self, event: Event) -> BotResult<()> {
        if event.from_bot() {
            return Ok(());
        }

        match event {
            Event::Message(message) => self.handle_message(message).await,
            Event::Reaction(reaction) => self.handle_reaction(reaction).await,
        }
    }

    pub async fn handle_message(&self, message: MessageEvent) -> BotResult<()> {
        let Some((command, args)) = self.parse_command(&message.content) else {
            return Ok(());
        };

        debug!(channel = %message.channel, author = %message.author, ?command, "command received");

        match command {
            Command::Doc => self.handle_doc(&message.channel, &args).await,
            Command::Listing(kind) => {
                self.handle_listing(&message.channel, &message.author, kind, &args)
                    .await
            }
        }
    }

    async fn handle_doc(&self, channel: &str, args: &[&str]) -> BotResult<()> {
        let query = Query::parse(args);
        if let Err(e) = query.check_patterns() {
            let block = self.failure(e.into());
            self.channel.send_block(channel, &block).await?;
            return Ok(());
        }

        let block = match query.package() {
            // help and request-shape errors never need an index
            None => self.render(&DocIndex::default(), &query),
            Some(package) => match self.fetch(package).await {
                Ok(index) => self.render(&index, &query),
                Err(err) => self.failure(err),
            },
        };

        self.channel.send_block(channel, &block).await?;
        Ok(())
    }

    fn render(&self, index: &DocIndex, query: &Query) -> Block {
        match resolve(index, query) {
            Ok(resolution) => resolution.into_block(&self.config.prefix, &self.config.doc_command),
            Err(err) => self.failure(err),
        }
    }

    /// Log a failed request and render it for the user
    fn failure(&self, err: DocsoError) -> Block {
        debug!(
            code = err.error_code(),
            category = ?err.category(),
            recoverable = err.is_recoverable(),
            "request failed: {}",
            err
        );
        format::error_block(&err)
    }

    async fn handle_listing(
        &self,
        channel: &str,
        author: &CallerId,
        kind: ListingKind,
        args: &[&str],
    ) -> BotResult<()> {
        let &[package] = args else {
            let command = match kind {
                ListingKind::Functions => &self.config.funcs_command,
                ListingKind::Types => &self.config.types_command,
            };
            let block = format::listing_help_block(&self.config.prefix, command);
            self.channel.send_block(channel, &block).await?;
            return Ok(());
        };

        let index = match self.fetch(package).await {
            Ok(index) => index,
            Err(err) => {
                self.channel.send_block(channel, &self.failure(err)).await?;
                return Ok(());
            }
        };

        let state = self.registry.open(kind, author.clone(), index);
        let sent = self.channel.send_block(channel, &state.render()).await?;

        info!(
            handle = %sent.message,
            package,
            kind = kind.title(),
            pages = state.page_limit(),
            "listing opened"
        );
        self.registry.register(sent.message.clone(), state);

        if let Err(e) = self.channel.add_reactions(&sent, &LISTING_REACTIONS).await {
            warn!(handle = %sent.message, "failed to add navigation reactions: {}", e);
        }
        Ok(())
    }

    pub async fn handle_reaction(&self, reaction: ReactionEvent) -> BotResult<()> {
        let Some(signal) = signal_for(&reaction.emoji) else {
            return Ok(());
        };

        let navigation = match self
            .registry
            .navigate(&reaction.message, signal, &reaction.user)
        {
            Ok(navigation) => navigation,
            // reactions on messages that are not (or no longer) listings
            Err(err @ (DocsoError::NotFound { .. } | DocsoError::NotOwner { .. })) => {
                debug!(code = err.error_code(), "navigation ignored: {}", err);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let target: MessageRef = reaction.target();
        match navigation {
            Navigation::Moved(block) => self.channel.edit_block(&target, &block).await,
            Navigation::Unchanged => Ok(()),
            Navigation::Destroyed => self.channel.delete_message(&target).await,
        }
    }

    async fn fetch(&self, package: &str) -> Result<Arc<DocIndex>, DocsoError> {
        self.provider.fetch_index(package).await.map_err(|e| {
            warn!(package, provider = self.provider.name(), "index fetch failed: {}", e);
            BotError::into_fetch_error(e, package)
        })
    }

    /// Evict idle listings and expired cached indexes
    pub async fn sweep(&self) -> SweepReport {
        let report = SweepReport {
            listings: self.registry.evict_idle(),
            indexes: self.provider.evict_expired().await,
        };
        if report.listings + report.indexes > 0 {
            debug!(
                listings = report.listings,
                indexes = report.indexes,
                remaining = self.registry.len(),
                "idle sweep"
            );
        }
        report
    }
}

/// What one [`Bot::sweep`] removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub listings: usize,
    pub indexes: usize,
}
