//! Application wiring: builds every component from [`BotConfig`] and hands their open and close
//! operations to a [`LifecycleManager`].

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use character::{
    CachedCharacterService, Character, CharacterError, CharacterService, DdbClient, RollService,
};
use context_store::{
    ContextRepository, ContextService, InMemoryContextRepository, RedisContextRepository,
    SqliteContextRepository,
};
use ddbot_core::Bot;
use futures::FutureExt;
use handler_chain::HandlerChain;
use lifecycle::{
    LifecycleManager, LifecycleStep, RunError, RunOutcome, ShutdownError, StartupError,
};
use result_cache::{Cache, LocalCache, NoCache};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::commands::{self, CommandGroups};
use crate::config::{BotConfig, ContextStoreKind};
use crate::handlers::{
    render_help_message, BotUsername, CacheClearHandler, CharacterSetHandler, HelpHandler,
    HumanOnlyHandler, LoggingHandler, RollHandler,
};
use crate::health::HealthServer;
use crate::telegram::{self, TelegramBotAdapter};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize application: {0:#}")]
    Init(#[source] anyhow::Error),

    #[error(transparent)]
    ServerStart(#[from] StartupError),

    #[error(transparent)]
    ServerRuntime(#[from] RunError),

    #[error(transparent)]
    Dispose(#[from] ShutdownError),
}

/// Services the handlers share.
pub struct HandlerDeps {
    pub bot: Arc<dyn Bot>,
    pub bot_username: BotUsername,
    pub contexts: ContextService,
    pub characters: Arc<dyn CharacterService>,
    pub rolls: RollService,
    pub help_text: String,
}

/// Builds the handler chain. Commands come out in registration order: general, ability checks,
/// saving throws, skill checks, miscellaneous.
pub fn build_handler_chain(deps: HandlerDeps) -> HandlerChain {
    let HandlerDeps {
        bot,
        bot_username,
        contexts,
        characters,
        rolls,
        help_text,
    } = deps;

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(HumanOnlyHandler))
        .add_handler(Arc::new(CharacterSetHandler::new(
            bot.clone(),
            bot_username.clone(),
            contexts.clone(),
            characters.clone(),
        )))
        .add_handler(Arc::new(CacheClearHandler::new(
            bot.clone(),
            bot_username.clone(),
            contexts.clone(),
            characters.clone(),
        )))
        .add_handler(Arc::new(HelpHandler::new(
            bot.clone(),
            bot_username.clone(),
            help_text,
        )))
        .add_handler(Arc::new(RollHandler::new(
            bot,
            bot_username,
            contexts,
            characters,
            rolls,
            commands::roll_commands(),
        )))
}

/// Character cache for the configured TTL, or a pass-through when caching is disabled.
pub fn build_character_cache(
    enabled: bool,
    ttl: Duration,
) -> Arc<dyn Cache<Character, CharacterError>> {
    if enabled {
        Arc::new(LocalCache::<Character>::new(ttl))
    } else {
        Arc::new(NoCache::new())
    }
}

async fn build_context_repository(
    config: &BotConfig,
) -> anyhow::Result<(Arc<dyn ContextRepository>, Option<LifecycleStep>)> {
    let kind = config.context.kind()?;
    info!(store_type = %kind, "Initializing context store");

    match kind {
        ContextStoreKind::Local => {
            let repo: Arc<dyn ContextRepository> = Arc::new(InMemoryContextRepository::new());
            Ok((repo, None))
        }
        ContextStoreKind::Redis => {
            let redis = RedisContextRepository::connect(&config.context.redis_url).await?;
            let check = {
                let redis = redis.clone();
                LifecycleStep::new(
                    move || async move { redis.ping().await.map_err(anyhow::Error::from) },
                    "Redis context store is reachable",
                    "Failed to reach Redis context store",
                )
            };
            let repo: Arc<dyn ContextRepository> = Arc::new(redis);
            Ok((repo, Some(check)))
        }
        ContextStoreKind::Sqlite => {
            let path = &config.context.sqlite_path;
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create directory for {}", path))?;
                }
            }
            let repo: Arc<dyn ContextRepository> =
                Arc::new(SqliteContextRepository::new(path).await?);
            Ok((repo, None))
        }
    }
}

/// The bot process: components plus the lifecycle that opens, runs and closes them.
pub struct Application {
    lifecycle: LifecycleManager,
}

impl Application {
    /// Validates `config` and builds every component. Connections that need I/O up front (Redis,
    /// SQLite) are opened here; everything talking to Telegram waits for [`Application::start`].
    #[instrument(skip(config))]
    pub async fn from_config(config: BotConfig) -> Result<Self, AppError> {
        Self::build(config).await.map_err(AppError::Init)
    }

    async fn build(config: BotConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut lifecycle = LifecycleManager::builder();

        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        let (repository, context_check) = build_context_repository(&config).await?;
        let contexts = ContextService::new(repository);
        if let Some(step) = context_check {
            lifecycle = lifecycle.startup_step(step);
        }
        lifecycle = lifecycle.shutdown_step(LifecycleStep::disposal("Context store", {
            let contexts = contexts.clone();
            move || async move { contexts.close().await.map_err(anyhow::Error::from) }
        }));

        let repository = Arc::new(DdbClient::with_base_url(
            http_client,
            config.character.ddb_base_url.clone(),
        ));
        let cache = build_character_cache(
            config.character.cache_enabled,
            config.character.cache_ttl(),
        );
        let characters: Arc<dyn CharacterService> =
            Arc::new(CachedCharacterService::new(repository, cache));
        info!(
            ddb_base_url = %config.character.ddb_base_url,
            cache_enabled = config.character.cache_enabled,
            cache_ttl_seconds = config.character.cache_ttl_seconds,
            "Character service configured"
        );

        let teloxide_bot = telegram::build_bot(config.bot_token(), config.telegram_api_url());
        let bot_username: BotUsername = Arc::new(RwLock::new(None));
        let groups = CommandGroups::new();
        let profile = &config.profile;
        let help_text = render_help_message(
            &profile.help_message_template,
            &groups,
            &profile.help_message_escape_characters,
        );

        let chain = build_handler_chain(HandlerDeps {
            bot: Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
            bot_username: bot_username.clone(),
            contexts,
            characters,
            rolls: RollService::default(),
            help_text,
        });

        lifecycle = lifecycle.startup_steps([
            telegram::resolve_username_step(teloxide_bot.clone(), bot_username.clone()),
            telegram::sync_name_step(teloxide_bot.clone(), profile.bot_name.clone()),
            telegram::sync_description_step(
                teloxide_bot.clone(),
                profile.bot_description.clone(),
            ),
            telegram::sync_short_description_step(
                teloxide_bot.clone(),
                profile.bot_short_description.clone(),
            ),
            telegram::sync_commands_step(teloxide_bot.clone(), chain.commands()),
        ]);

        let health = if config.server.enabled {
            let server =
                HealthServer::new(config.server.bind_addr()?.to_string(), bot_username.clone());
            lifecycle = lifecycle
                .startup_step(LifecycleStep::new(
                    {
                        let server = server.clone();
                        move || async move { server.bind().await.map(|_| ()) }
                    },
                    "Health server has been bound",
                    "Failed to bind health server",
                ))
                .shutdown_step(LifecycleStep::disposal("Health server", {
                    let server = server.clone();
                    move || async move {
                        server.shutdown();
                        anyhow::Ok(())
                    }
                }));
            Some(server)
        } else {
            None
        };

        let main_operation = async move {
            match health {
                Some(server) => {
                    tokio::select! {
                        result = telegram::dispatch(teloxide_bot, chain) => result,
                        result = server.serve() => result,
                    }
                }
                None => telegram::dispatch(teloxide_bot, chain).await,
            }
        }
        .boxed();

        Ok(Self {
            lifecycle: lifecycle.build(main_operation),
        })
    }

    /// Runs startup, then the main operation until Ctrl-C or SIGTERM.
    pub async fn start(&mut self) -> Result<(), AppError> {
        self.start_until(wait_for_shutdown_signal()).await
    }

    /// Like [`Application::start`] with a caller-supplied shutdown signal.
    #[instrument(skip(self, shutdown_signal))]
    pub async fn start_until<S>(&mut self, shutdown_signal: S) -> Result<(), AppError>
    where
        S: Future<Output = ()>,
    {
        self.lifecycle.on_startup().await?;
        info!("Bot started successfully");

        match self.lifecycle.run(shutdown_signal).await? {
            RunOutcome::Completed => info!("Bot stopped"),
            RunOutcome::Cancelled => info!("Shutdown signal received, bot stopped"),
        }
        Ok(())
    }

    /// Runs every shutdown step, newest resource first.
    pub async fn dispose(&mut self) -> Result<(), AppError> {
        self.lifecycle.on_shutdown().await?;
        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler, waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
