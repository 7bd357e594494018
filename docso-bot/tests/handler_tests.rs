//! Command and reaction handling against recording collaborators

mod common;

use std::sync::Arc;

use common::{strings_index, MapProvider, Op, RecordingChannel};
use docso_bot::events::{ReactionEvent, DESTROY_EMOJI, LEFT_ARROW, RIGHT_ARROW};
use docso_bot::handlers::Bot;
use docso_bot::{BotConfig, Event, MessageRef};
use docso_core::format::Footer;
use docso_core::{CallerId, DocIndex};

struct Harness {
    bot: Bot,
    provider: Arc<MapProvider>,
    channel: Arc<RecordingChannel>,
}

fn harness_with(config: BotConfig, channel: RecordingChannel) -> Harness {
    let provider = Arc::new(
        MapProvider::default()
            .with("strings", strings_index())
            .with("empty", DocIndex::new("https://pkg.go.dev/empty")),
    );
    let channel = Arc::new(channel);
    let bot = Bot::new(config, provider.clone(), channel.clone());
    Harness {
        bot,
        provider,
        channel,
    }
}

fn harness() -> Harness {
    harness_with(BotConfig::default(), RecordingChannel::default())
}

fn message(author: &str, content: &str) -> Event {
    serde_json::from_value(serde_json::json!({
        "type": "message",
        "channel": "general",
        "author": author,
        "content": content,
    }))
    .unwrap()
}

fn reaction(target: &MessageRef, user: &str, emoji: &str) -> Event {
    Event::Reaction(ReactionEvent {
        channel: target.channel.clone(),
        message: target.message.clone(),
        user: CallerId::from(user),
        emoji: emoji.to_string(),
        bot: false,
    })
}

fn page_of(op: &Op) -> String {
    match op {
        Op::Edit { block, .. } => block.footer.as_ref().unwrap().to_string(),
        other => panic!("expected an edit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_doc_help_needs_no_fetch() {
    let h = harness();
    h.bot.handle_event(message("u-1", "!doc")).await.unwrap();

    let (_, block) = h.channel.last_sent();
    assert_eq!(block.title, "Docs help!");
    assert_eq!(h.provider.fetch_count(), 0);
}

#[tokio::test]
async fn test_doc_method_lookup() {
    let h = harness();
    h.bot
        .handle_event(message("u-1", "!doc strings builder.writestring"))
        .await
        .unwrap();

    let (sent, block) = h.channel.last_sent();
    assert_eq!(sent.channel, "general");
    assert_eq!(block.title, "strings: func(Builder) WriteString");
    assert!(block
        .description
        .contains("WriteString appends the contents of s to b's buffer."));
    assert_eq!(
        block.footer,
        Some(Footer::Link {
            url: "https://pkg.go.dev/strings#Builder.WriteString".to_string()
        })
    );
}

#[tokio::test]
async fn test_doc_package_summary() {
    let h = harness();
    h.bot.handle_event(message("u-1", "!doc strings")).await.unwrap();

    let (_, block) = h.channel.last_sent();
    assert_eq!(block.title, "Info for strings");
    assert_eq!(block.description, "Types: 3\nFunctions: 23");
}

#[tokio::test]
async fn test_doc_too_many_arguments_is_not_a_fetch_error() {
    let h = harness();
    h.bot
        .handle_event(message("u-1", "!doc strings Builder.Len a b"))
        .await
        .unwrap();

    let (_, block) = h.channel.last_sent();
    assert!(block.is_error());
    assert!(block.description.starts_with("Too many arguments"));
    assert_eq!(h.provider.fetch_count(), 0);
}

#[tokio::test]
async fn test_doc_fetch_failure() {
    let h = harness();
    h.bot.handle_event(message("u-1", "!doc nosuchpkg Foo")).await.unwrap();

    let (_, block) = h.channel.last_sent();
    assert!(block.is_error());
    assert_eq!(
        block.description,
        "An error occurred while fetching the page for the package `nosuchpkg`"
    );
}

#[tokio::test]
async fn test_doc_bad_glob_surfaces_message() {
    let h = harness();
    h.bot
        .handle_event(message("u-1", "!doc strings Builder.Write["))
        .await
        .unwrap();

    let (_, block) = h.channel.last_sent();
    assert!(block.is_error());
    assert!(block.description.starts_with("Error processing glob pattern"));
    assert_eq!(h.provider.fetch_count(), 0);
}

#[tokio::test]
async fn test_doc_bad_glob_on_unknown_package_skips_fetch() {
    let h = harness();
    h.bot
        .handle_event(message("u-1", "!doc nosuchpkg {Builder.Len"))
        .await
        .unwrap();

    let (_, block) = h.channel.last_sent();
    assert!(block.description.starts_with("Error processing glob pattern"));
    assert!(block.description.contains("{Builder"));
    assert_eq!(h.provider.fetch_count(), 0);
}

#[tokio::test]
async fn test_unaddressed_and_bot_messages_are_ignored() {
    let h = harness();
    h.bot.handle_event(message("u-1", "hello there")).await.unwrap();
    h.bot.handle_event(message("u-1", "!unknown strings")).await.unwrap();

    let mut from_bot = message("u-1", "!doc strings");
    if let Event::Message(m) = &mut from_bot {
        m.bot = true;
    }
    h.bot.handle_event(from_bot).await.unwrap();

    assert!(h.channel.ops().is_empty());
}

#[tokio::test]
async fn test_listing_help_on_wrong_argument_count() {
    let h = harness();
    h.bot.handle_event(message("u-1", "!getfuncs")).await.unwrap();
    h.bot
        .handle_event(message("u-1", "!gettypes strings extra"))
        .await
        .unwrap();

    let sent = h.channel.sent();
    assert_eq!(sent[0].1.title, "Help getfuncs");
    assert!(sent[0].1.description.ends_with("!getfuncs strings"));
    assert_eq!(sent[1].1.title, "Help gettypes");
    assert!(h.bot.registry().is_empty());
}

#[tokio::test]
async fn test_listing_lifecycle() {
    let h = harness();
    h.bot
        .handle_event(message("u-1", "!getfuncs strings"))
        .await
        .unwrap();

    let ops = h.channel.ops();
    let Op::Send { message: listing, block } = &ops[0] else {
        panic!("expected a send, got {:?}", ops[0]);
    };
    assert_eq!(block.title, "functions");
    assert_eq!(block.footer, Some(Footer::Page { current: 1, limit: 3 }));
    assert_eq!(
        ops[1],
        Op::React {
            message: listing.clone(),
            emojis: vec![
                LEFT_ARROW.to_string(),
                RIGHT_ARROW.to_string(),
                DESTROY_EMOJI.to_string()
            ],
        }
    );
    assert!(h.bot.registry().contains(&listing.message));

    h.bot.handle_event(reaction(listing, "u-2", RIGHT_ARROW)).await.unwrap();
    h.bot.handle_event(reaction(listing, "u-2", RIGHT_ARROW)).await.unwrap();
    // already on the last page
    h.bot.handle_event(reaction(listing, "u-2", RIGHT_ARROW)).await.unwrap();
    h.bot.handle_event(reaction(listing, "u-1", LEFT_ARROW)).await.unwrap();
    // unrelated reaction
    h.bot.handle_event(reaction(listing, "u-1", "👍")).await.unwrap();

    let ops = h.channel.ops();
    assert_eq!(ops.len(), 5);
    assert_eq!(page_of(&ops[2]), "Page 2/3");
    assert_eq!(page_of(&ops[3]), "Page 3/3");
    assert_eq!(page_of(&ops[4]), "Page 2/3");

    h.bot.handle_event(reaction(listing, "u-1", DESTROY_EMOJI)).await.unwrap();
    assert_eq!(
        h.channel.ops().last(),
        Some(&Op::Delete {
            message: listing.clone()
        })
    );
    assert!(h.bot.registry().is_empty());

    // after destroy, navigation is silently ignored
    let before = h.channel.ops().len();
    h.bot.handle_event(reaction(listing, "u-1", RIGHT_ARROW)).await.unwrap();
    assert_eq!(h.channel.ops().len(), before);
}

#[tokio::test]
async fn test_type_listing_of_empty_package() {
    let h = harness();
    h.bot.handle_event(message("u-1", "!gettypes empty")).await.unwrap();

    let (listing, block) = h.channel.last_sent();
    assert_eq!(block.title, "types");
    assert_eq!(block.footer.unwrap().to_string(), "Page 0/0");

    let before = h.channel.ops().len();
    h.bot.handle_event(reaction(&listing, "u-1", RIGHT_ARROW)).await.unwrap();
    h.bot.handle_event(reaction(&listing, "u-1", LEFT_ARROW)).await.unwrap();
    assert_eq!(h.channel.ops().len(), before);
}

#[tokio::test]
async fn test_listing_fetch_failure_registers_nothing() {
    let h = harness();
    h.bot
        .handle_event(message("u-1", "!getfuncs nosuchpkg"))
        .await
        .unwrap();

    let (_, block) = h.channel.last_sent();
    assert!(block.is_error());
    assert!(h.bot.registry().is_empty());
}

#[tokio::test]
async fn test_owner_only_listing() {
    let mut config = BotConfig::default();
    config.pagination.owner_only = true;
    let h = harness_with(config, RecordingChannel::default());

    h.bot
        .handle_event(message("u-1", "!getfuncs strings"))
        .await
        .unwrap();
    let (listing, _) = h.channel.last_sent();
    let before = h.channel.ops().len();

    h.bot.handle_event(reaction(&listing, "u-2", RIGHT_ARROW)).await.unwrap();
    h.bot.handle_event(reaction(&listing, "u-2", DESTROY_EMOJI)).await.unwrap();
    assert_eq!(h.channel.ops().len(), before);
    assert!(h.bot.registry().contains(&listing.message));

    h.bot.handle_event(reaction(&listing, "u-1", RIGHT_ARROW)).await.unwrap();
    assert_eq!(page_of(h.channel.ops().last().unwrap()), "Page 2/3");
}

#[tokio::test]
async fn test_reaction_failure_keeps_listing() {
    let h = harness_with(BotConfig::default(), RecordingChannel::failing_reactions());

    h.bot
        .handle_event(message("u-1", "!getfuncs strings"))
        .await
        .unwrap();
    let (listing, _) = h.channel.last_sent();
    assert!(h.bot.registry().contains(&listing.message));
}
