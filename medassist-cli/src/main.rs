mod commands;
mod view;

use std::sync::Arc;

use anyhow::Context;
use medassist_engine::client::ConversationClient;
use medassist_runtime::config_store::ConfigStore;
use medassist_runtime::defaults::CONFIG_PATH_ENV;
use medassist_runtime::runtime_client::{build_client_from_config, resolve_config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Command, HELP, parse_line};
use crate::view::{TerminalView, describe_health};

const DEFAULT_CONFIG_FILE: &str = "medassist.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medassist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let store = ConfigStore::at_path(config_path);
    let cfg = resolve_config(&store)
        .with_context(|| format!("load config from {}", store.path().display()))?;
    let quick_phrases = cfg.quick_phrases.clone();

    let client = Arc::new(build_client_from_config(&cfg, Arc::new(TerminalView))?);
    println!("MedAssist at {} (type /help for commands)", cfg.base_url);

    // Exchanges run in the background so the prompt stays usable while a
    // reply is pending.
    let mut exchanges = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("read stdin")? {
        let cmd = match parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };

        match cmd {
            Command::Say(text) => {
                let client = client.clone();
                exchanges.spawn(async move { client.submit(&text).await });
            }
            Command::Image(query) => {
                let client = client.clone();
                exchanges.spawn(async move { client.request_image(&query).await });
            }
            Command::ListQuick => {
                for (i, phrase) in quick_phrases.iter().enumerate() {
                    println!("  {}. {phrase}", i + 1);
                }
            }
            Command::Quick(idx) => match quick_phrases.get(idx) {
                Some(phrase) => {
                    println!("user> {phrase}");
                    let phrase = phrase.clone();
                    let client = client.clone();
                    exchanges.spawn(async move { client.submit_quick_phrase(&phrase).await });
                }
                None => eprintln!("no quick question {}", idx + 1),
            },
            Command::Search(query) => {
                let client = client.clone();
                exchanges.spawn(async move { client.ask_instant(&query).await });
            }
            Command::Articles(tag) => print_articles(&client, tag.as_deref()).await,
            Command::Health => match client.check_health().await {
                Ok(h) => println!("{}", describe_health(&h)),
                Err(e) => eprintln!("health check failed: {e}"),
            },
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }

        // Reap finished exchanges so the set does not grow for the whole session.
        while let Some(done) = exchanges.try_join_next() {
            if let Err(e) = done {
                log::error!("exchange task failed: {e}");
            }
        }
    }

    if !exchanges.is_empty() {
        log::info!("waiting for {} pending exchange(s)", client.in_flight());
    }
    while let Some(done) = exchanges.join_next().await {
        if let Err(e) = done {
            log::error!("exchange task failed: {e}");
        }
    }

    Ok(())
}

async fn print_articles(client: &ConversationClient, tag: Option<&str>) {
    match client.fetch_articles(tag).await {
        Ok(list) if list.items.is_empty() => println!("no articles"),
        Ok(list) => {
            for article in &list.items {
                println!("- {} ({})", article.title, article.created_at);
                if let Some(summary) = article.summary.as_deref() {
                    println!("    {summary}");
                }
                if !article.tags.is_empty() {
                    println!("    tags: {}", article.tags.join(", "));
                }
            }
        }
        Err(e) => eprintln!("could not load articles: {e}"),
    }
}
