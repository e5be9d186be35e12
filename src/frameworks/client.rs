// Framework bootstrap for the headless shooting client.

use crate::domain::ports::SoundEffect;
use crate::domain::{EngineSettings, EngineState, Playfield, SessionStats};
use crate::frameworks::config;
use crate::frameworks::sound::TerminalBell;
use crate::interface_adapters::clients::ScoreClient;
use crate::interface_adapters::input::{LocalInput, parse_line};
use crate::interface_adapters::net::connect_trigger_channel;
use crate::use_cases::{
    FrameSnapshot, LeaderboardView, LoadLeaderboardUseCase, SaveScoreUseCase, Session,
    SessionSettings, ShotSource,
};

use std::io::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Everything the client needs from its environment.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub trigger_url: String,
    /// Bearer token from the login service; `None` runs offline.
    pub token: Option<String>,
    pub username: String,
    pub http_timeout: Duration,
    pub target_count: usize,
    pub field: Playfield,
    pub seed: Option<u64>,
    pub frame_interval: Duration,
    pub sound: Arc<dyn SoundEffect>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let (width, height) = config::field_size();
        Self {
            api_base_url: config::api_base_url(),
            trigger_url: config::trigger_channel_url(),
            token: config::api_token(),
            username: config::username(),
            http_timeout: config::http_timeout(),
            target_count: config::target_count(),
            field: Playfield::new(width, height),
            seed: config::rng_seed(),
            frame_interval: config::FRAME_INTERVAL,
            sound: Arc::new(TerminalBell),
        }
    }
}

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Runs one session driven by `input` lines until `quit`, end of input or ctrl-c.
///
/// The final score is submitted before teardown. Returns the final stats.
pub async fn run<R>(config: ClientConfig, input: R) -> Result<SessionStats>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (lines_tx, lines_rx) = mpsc::channel(config::INPUT_LINE_CAPACITY);
    let reader = tokio::spawn(async move {
        let mut lines = input.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if lines_tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "input read failed");
                    break;
                }
            }
        }
    });

    let stats = run_lines(config, lines_rx).await;
    reader.abort();
    stats
}

// Blocking stdin reads cannot be cancelled, so they live on a plain thread the
// runtime never waits for. The thread ends with the process.
fn spawn_stdin_reader() -> Result<mpsc::Receiver<String>> {
    let (lines_tx, lines_rx) = mpsc::channel(config::INPUT_LINE_CAPACITY);
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lines() {
                match line {
                    Ok(line) => {
                        if lines_tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
        })?;
    Ok(lines_rx)
}

async fn run_lines(
    config: ClientConfig,
    mut input: mpsc::Receiver<String>,
) -> Result<SessionStats> {
    let score_client = ScoreClient::new(config.api_base_url.clone(), config.http_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize score client: {e}")))?;
    debug!(
        api_base_url = %config.api_base_url,
        http_timeout_ms = config.http_timeout.as_millis(),
        "score client configured"
    );

    let mut engine_settings = EngineSettings::new(config.target_count, config.field);
    engine_settings.seed = config.seed;
    let engine = EngineState::with_settings(engine_settings);

    let mut session = Session::start(
        engine,
        SessionSettings {
            frame_interval: config.frame_interval,
            command_capacity: config::COMMAND_CHANNEL_CAPACITY,
            hit_capacity: config::HIT_BROADCAST_CAPACITY,
            listener_grace: config::LISTENER_GRACE,
        },
        config.sound.clone(),
        status_line(),
    );

    // The external trigger is optional; local input keeps working without it.
    match config.token.as_deref() {
        Some(token) => match connect_trigger_channel(
            &config.trigger_url,
            token,
            session.input(ShotSource::External),
            session.subscribe_hits(),
            session.cancel_token(),
        )
        .await
        {
            Ok(channel) => session.attach_listener(channel.into_task()),
            Err(e) => warn!(error = %e, "trigger channel unavailable; local input only"),
        },
        None => info!("no token configured; trigger channel and score saving disabled"),
    }

    let save = SaveScoreUseCase {
        store: score_client.clone(),
    };
    let leaderboard = LoadLeaderboardUseCase {
        store: score_client,
    };
    let mut view = LeaderboardView::default();
    let local = session.input(ShotSource::Local);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        let line = tokio::select! {
            biased;
            _ = &mut interrupt => {
                info!("interrupted");
                None
            }
            line = input.recv() => line,
        };
        let Some(line) = line else {
            break;
        };

        let sent = match parse_line(&line) {
            Ok(LocalInput::Aim { x, y }) => local.aim(x, y).await,
            Ok(LocalInput::Shoot) => local.shoot().await,
            Ok(LocalInput::Resize { width, height }) => local.resize(width, height).await,
            Ok(LocalInput::SaveScore) => {
                let outcome = save
                    .execute(config.token.as_deref(), &config.username, session.stats())
                    .await;
                println!("{}", outcome.notice());
                Ok(())
            }
            Ok(LocalInput::ToggleLeaderboard) => {
                if leaderboard.execute(&mut view).await && view.is_visible() {
                    print_leaderboard(&view, &config.username);
                }
                Ok(())
            }
            Ok(LocalInput::Quit) => break,
            Err(e) => {
                println!("{e}");
                Ok(())
            }
        };
        if sent.is_err() {
            warn!("session stopped accepting input");
            break;
        }
    }

    // Teardown: render loop, trigger channel and input all stop here.
    input.close();
    let stats = session.shutdown().await;
    let outcome = save
        .execute(config.token.as_deref(), &config.username, stats)
        .await;
    println!("{}", outcome.notice());

    Ok(stats)
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = ClientConfig::from_env();
    let stdin = spawn_stdin_reader()?;
    let stats = run_lines(config, stdin).await?;
    info!(
        points = stats.points,
        shots = stats.shots,
        hits = stats.hits,
        "final score"
    );
    Ok(())
}

// Headless draw callback: reports the score line whenever it changes.
fn status_line() -> impl FnMut(&FrameSnapshot) + Send + 'static {
    let mut last: Option<SessionStats> = None;
    move |frame: &FrameSnapshot| {
        if last == Some(frame.stats) {
            return;
        }
        last = Some(frame.stats);
        info!(
            points = frame.stats.points,
            shots = frame.stats.shots,
            hits = frame.stats.hits,
            accuracy = %format!("{:.1}%", frame.stats.accuracy_percent()),
            aim_x = frame.aim.x,
            aim_y = frame.aim.y,
            "score"
        );
    }
}

fn print_leaderboard(view: &LeaderboardView, username: &str) {
    println!("{:>3}  {:<20} {:>7} {:>5}", "#", "player", "points", "hits");
    for row in view.rows(username) {
        let own = if row.is_own { " <" } else { "" };
        println!(
            "{:>3}  {:<20} {:>7} {:>5}{own}",
            row.rank, row.username, row.points, row.hits
        );
    }
}
