//! Subcommand handlers.
//!
//! Handlers drive the client stores and print the derived views. Failures
//! from the API surface as the extracted display message.

use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Utc};
use goose_client::{
    ClientConfig, ClientError, GooseClient, SessionState, TapAttempt, extract_message,
};
use goose_core::{ClockTicker, RoundPhase, RoundRow, RoundScreen};
use goose_types::{LoginRequest, RoundId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::cli::Command;
use crate::render;

/// Execute one subcommand.
pub async fn run(command: Command, client: &GooseClient, config: &ClientConfig) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            login(client, LoginRequest::new(username, password)).await
        }
        Command::Whoami => whoami(client).await,
        Command::Logout => logout(client).await,
        Command::Rounds { watch } => rounds(client, watch.then_some(config.tick)).await,
        Command::Create => create(client).await,
        Command::Round { id } => show_round(client, &RoundId::from(id)).await,
        Command::Tap { id } => tap_once(client, &RoundId::from(id)).await,
        Command::Play { id } => play(client, &RoundId::from(id), config.tick).await,
    }
}

/// Convert an API failure into the message the player sees.
fn shown(error: &ClientError) -> anyhow::Error {
    anyhow!(extract_message(error))
}

/// Recover the identity behind a stored token, once.
async fn restore_session(client: &GooseClient) -> SessionState {
    let state = client.session.snapshot().await;
    if state.token.is_some() && state.user.is_none() && !state.me_loading {
        client.session.fetch_identity().await;
    }
    client.session.snapshot().await
}

/// Restore the session and fail unless it is authenticated.
async fn require_session(client: &GooseClient) -> Result<SessionState> {
    let state = restore_session(client).await;
    if !state.is_authenticated() {
        bail!(render::SIGN_IN_HINT);
    }
    Ok(state)
}

async fn login(client: &GooseClient, credentials: LoginRequest) -> Result<()> {
    client
        .session
        .login(&credentials)
        .await
        .map_err(|e| shown(&e))?;
    match client.session.fetch_identity().await {
        Some(user) => {
            println!("{}", render::greeting(&user));
            Ok(())
        }
        None => {
            let state = client.session.snapshot().await;
            bail!(state.error.unwrap_or_else(|| "Invalid username or password".to_owned()))
        }
    }
}

async fn whoami(client: &GooseClient) -> Result<()> {
    let state = restore_session(client).await;
    match &state.user {
        Some(user) if state.is_authenticated() => println!("{}", render::greeting(user)),
        _ => println!("Not signed in"),
    }
    Ok(())
}

async fn logout(client: &GooseClient) -> Result<()> {
    client.session.logout().await;
    if let Some(error) = client.session.snapshot().await.error {
        eprintln!("Server-side logout failed: {error}");
    }
    println!("Signed out");
    Ok(())
}

async fn rounds(client: &GooseClient, watch: Option<Duration>) -> Result<()> {
    let session = require_session(client).await?;
    client.rounds.fetch_rounds().await.map_err(|e| shown(&e))?;

    let Some(period) = watch else {
        print_round_list(client, &session, Utc::now()).await;
        return Ok(());
    };

    let mut ticker = ClockTicker::start(period);
    print_round_list(client, &session, ticker.now()).await;
    loop {
        tokio::select! {
            now = ticker.changed() => {
                let Some(now) = now else { break };
                print_round_list(client, &session, now).await;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    ticker.stop().await;
    Ok(())
}

async fn print_round_list(client: &GooseClient, session: &SessionState, now: DateTime<Utc>) {
    let state = client.rounds.snapshot().await;
    let rows: Vec<RoundRow> = state.rounds.iter().map(|r| RoundRow::derive(r, now)).collect();
    println!("{}", render::round_list(session, &rows));
}

async fn create(client: &GooseClient) -> Result<()> {
    let session = require_session(client).await?;
    if !session.is_admin() {
        println!("{}", render::ADMIN_ONLY_HINT);
        return Ok(());
    }
    let round = client.rounds.create_round().await.map_err(|e| shown(&e))?;
    info!(round_id = %round.id, "round created");
    println!("Round created: {}", round.id);
    println!("Open it with: goose play {}", round.id);
    Ok(())
}

async fn show_round(client: &GooseClient, id: &RoundId) -> Result<()> {
    let session = require_session(client).await?;
    client.round.fetch_round(id).await.map_err(|e| shown(&e))?;
    let detail = client.round.snapshot().await.detail;
    let screen = RoundScreen::derive(detail.as_ref(), Utc::now());
    println!("{}", render::round_screen(id, session.display_name(), &screen));
    Ok(())
}

async fn tap_once(client: &GooseClient, id: &RoundId) -> Result<()> {
    require_session(client).await?;
    client.round.fetch_round(id).await.map_err(|e| shown(&e))?;
    match client.round.tap_if_active(id, Utc::now()).await {
        Ok(TapAttempt::Sent(result)) => {
            println!("Tap counted: {} taps, score {}", result.taps, result.score);
        }
        Ok(TapAttempt::Ignored(phase)) => println!("Round is {phase}; tap ignored"),
        Err(e) => return Err(shown(&e)),
    }
    Ok(())
}

/// Interactive round screen.
///
/// Redraws on every tick. Each input line is a tap attempt, dropped
/// client-side unless the round is active. When the round finishes the
/// detail is fetched once more so the final standings are shown.
async fn play(client: &GooseClient, id: &RoundId, period: Duration) -> Result<()> {
    let session = require_session(client).await?;
    client.round.fetch_round(id).await.map_err(|e| shown(&e))?;

    let mut ticker = ClockTicker::start(period);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut notice: Option<String> = None;
    let mut last_phase = client.round.phase_at(id, ticker.now()).await;
    redraw(client, id, &session, ticker.now(), notice.as_deref()).await;

    loop {
        tokio::select! {
            now = ticker.changed() => {
                let Some(now) = now else { break };
                last_phase = match client.round.follow_phase(id, last_phase, now).await {
                    Ok(phase) => phase,
                    Err(e) => {
                        notice = Some(extract_message(&e));
                        RoundPhase::Finished
                    }
                };
                redraw(client, id, &session, now, notice.as_deref()).await;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().eq_ignore_ascii_case("q") {
                    break;
                }
                let now = Utc::now();
                notice = match client.round.tap_if_active(id, now).await {
                    Ok(TapAttempt::Sent(_)) => Some("Tap counted".to_owned()),
                    Ok(TapAttempt::Ignored(phase)) => {
                        debug!(round_id = %id, %phase, "tap dropped");
                        None
                    }
                    Err(e) => Some(extract_message(&e)),
                };
                redraw(client, id, &session, now, notice.as_deref()).await;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    ticker.stop().await;
    Ok(())
}

/// Clear the terminal and draw the round screen.
async fn redraw(
    client: &GooseClient,
    id: &RoundId,
    session: &SessionState,
    now: DateTime<Utc>,
    notice: Option<&str>,
) {
    let detail = client.round.snapshot().await.detail;
    let screen = RoundScreen::derive(detail.as_ref(), now);
    print!("{}", render::CLEAR_SCREEN);
    println!("{}", render::round_screen(id, session.display_name(), &screen));
    if let Some(notice) = notice {
        println!("{notice}");
    }
    println!("Enter: tap   q: leave");
}
