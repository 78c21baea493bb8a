//! # homedashctl: command-line dashboard
//!
//! Composition root that wires the HTTP adapter into the application
//! services and runs one command.
//!
//! ## Responsibilities
//! - Parse CLI arguments and configuration (file, env vars)
//! - Install the tracing subscriber (logs go to stderr)
//! - Construct the `HttpBackend` adapter and inject it into `RuleService`,
//!   `ControlService` and `StatePoller`
//! - Print results to stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod cli;
mod config;
mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use homedash_adapter_http::HttpBackend;
use homedash_app::dashboard::DashboardStore;
use homedash_app::poller::StatePoller;
use homedash_app::services::control_service::ControlService;
use homedash_app::services::rule_service::RuleService;
use homedash_domain::id::RuleId;
use homedash_domain::rule::RuleForm;

use cli::{Cli, Command, ControlCommand, FanSetting, RulesCommand, toggle_target};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter)
                .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?,
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(backend = %config.backend.base_url, "configuration loaded");

    let backend = Arc::new(HttpBackend::new(&config.backend).context("failed to build HTTP client")?);

    match cli.command {
        Command::Rules(command) => run_rules(RuleService::new(backend), command).await,
        Command::Fields { kind } => {
            print!("{}", render::fields_table(kind));
            Ok(())
        }
        Command::Control(command) => run_control(ControlService::new(backend), command).await,
        Command::Watch => watch(backend, &config).await,
    }
}

fn rule_id(raw: &str) -> anyhow::Result<RuleId> {
    raw.parse().with_context(|| format!("invalid rule id {raw:?}"))
}

async fn run_rules(
    service: RuleService<Arc<HttpBackend>>,
    command: RulesCommand,
) -> anyhow::Result<()> {
    match command {
        RulesCommand::List => {
            let rules = service.list_rules().await.context("failed to list rules")?;
            for rule in &rules {
                println!("{}", render::rule_details(rule));
            }
        }
        RulesCommand::Show { id } => {
            let id = rule_id(&id)?;
            let rule = service
                .get_rule(&id)
                .await
                .with_context(|| format!("failed to fetch rule {id}"))?;
            println!("{}", render::rule_details(&rule));
        }
        RulesCommand::Create(args) => {
            let mut form = RuleForm::default();
            args.apply(&mut form);
            let rule = service.save(&form).await.context("failed to create rule")?;
            println!("{}", render::rule_details(&rule));
        }
        RulesCommand::Edit { id, fields } => {
            let id = rule_id(&id)?;
            let current = service
                .get_rule(&id)
                .await
                .with_context(|| format!("failed to fetch rule {id}"))?;
            let mut form = RuleForm::from(&current);
            fields.apply(&mut form);
            let rule = service
                .save(&form)
                .await
                .with_context(|| format!("failed to update rule {id}"))?;
            println!("{}", render::rule_details(&rule));
        }
        RulesCommand::Toggle { id, on, off } => {
            let id = rule_id(&id)?;
            service
                .toggle(&id, toggle_target(on, off))
                .await
                .with_context(|| format!("failed to toggle rule {id}"))?;
            let rule = service.get_rule(&id).await?;
            println!("{}", render::rule_summary(&rule));
        }
        RulesCommand::Delete { id } => {
            let id = rule_id(&id)?;
            service
                .delete(&id)
                .await
                .with_context(|| format!("failed to delete rule {id}"))?;
            println!("deleted {id}");
        }
        RulesCommand::Reset => {
            service
                .reset_to_defaults()
                .await
                .context("failed to reset rules")?;
            for rule in &service.list_rules().await? {
                println!("{}", render::rule_summary(rule));
            }
        }
    }
    Ok(())
}

async fn run_control(
    service: ControlService<Arc<HttpBackend>>,
    command: ControlCommand,
) -> anyhow::Result<()> {
    let sent = match command {
        ControlCommand::Fan {
            command: FanSetting::Manual(command),
        } => service.fans(command).await,
        ControlCommand::Fan {
            command: FanSetting::Auto,
        } => service.fans_auto().await,
        ControlCommand::Light { room, command } => service.light(room, command).await,
        ControlCommand::Door { command } => service.door(command).await,
        ControlCommand::Garage { command } => service.garage(command).await,
    }
    .context("failed to control device")?;
    println!("{sent}");
    Ok(())
}

async fn watch(backend: Arc<HttpBackend>, config: &Config) -> anyhow::Result<()> {
    let store = DashboardStore::new();
    match RuleService::new(backend.clone()).list_rules().await {
        Ok(rules) => {
            println!("{} rules loaded", rules.len());
            store.set_rules(rules);
        }
        Err(err) => tracing::warn!(%err, "could not load rules"),
    }

    let mut updates = store.subscribe();
    let poller = StatePoller::start(backend, store, config.poll_interval());

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().clone();
                println!("{}", render::state_line(&view));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, stopping");
                break;
            }
        }
    }
    poller.abort();
    Ok(())
}
