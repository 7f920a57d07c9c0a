use std::sync::Arc;

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    time::{self, Instant, MissedTickBehavior},
};

use crate::{
    config::GameConfig,
    game::{DifficultyController, Game, Submission, WordValidator},
    models::Verdict,
    websocket::messages::{ClientMessage, ServerMessage},
};

/// Verdicts in flight at once; submits are serialized so one is enough in practice
const VERDICT_BUFFER: usize = 4;

/// What a session needs from the server
#[derive(Clone)]
pub struct SessionContext {
    pub game: GameConfig,
    pub validator: Arc<WordValidator>,
}

/// Drive one single-player game until the player goes away.
///
/// Nothing happens until a `start` action arrives. From then on this task
/// is the only owner of the `Game`: frame ticks, difficulty ticks, player
/// actions and validation verdicts are handled one at a time, so a
/// difficulty tick can land between two frames but never inside one.
/// Word validation runs in its own task and reports back over a channel;
/// the field keeps moving while it is in flight. Frames are dropped when
/// the client falls behind; every other message is delivered.
pub async fn run_session(
    ctx: SessionContext,
    mut actions: mpsc::Receiver<ClientMessage>,
    tx: mpsc::Sender<ServerMessage>,
) {
    let Some(mut game) = wait_for_start(&ctx.game, &mut actions).await else {
        return;
    };

    let mut frames = time::interval(ctx.game.frame_period());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let period = game.difficulty_period();
    let mut difficulty = time::interval_at(Instant::now() + period, period);

    let (verdict_tx, mut verdict_rx) = mpsc::channel::<(Submission, Verdict)>(VERDICT_BUFFER);

    loop {
        let outgoing = tokio::select! {
            _ = frames.tick() => {
                game.advance_frame();
                match tx.try_send(ServerMessage::Frame(game.snapshot())) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => tracing::trace!("Client is behind, dropping frame"),
                    Err(TrySendError::Closed(_)) => break,
                }
                None
            }
            _ = difficulty.tick() => {
                let drift_speed = game.increase_difficulty();
                Some(ServerMessage::DifficultyIncreased {
                    drift_speed,
                    drift_speed_label: game.drift_speed_label(),
                })
            }
            Some((submission, verdict)) = verdict_rx.recv() => {
                Some(ServerMessage::WordResult(game.resolve_submission(&submission, verdict)))
            }
            action = actions.recv() => match action {
                Some(action) => handle_action(&mut game, action, &ctx.validator, &verdict_tx),
                None => break,
            },
        };

        if let Some(message) = outgoing {
            if tx.send(message).await.is_err() {
                break;
            }
        }
    }

    tracing::debug!("Session ended with score {}", game.score());
}

/// Swallow everything until the player starts a game
async fn wait_for_start(
    config: &GameConfig,
    actions: &mut mpsc::Receiver<ClientMessage>,
) -> Option<Game> {
    while let Some(action) = actions.recv().await {
        match action {
            ClientMessage::Start {
                initial_drift_speed,
                width,
                height,
            } => {
                let drift_speed = match initial_drift_speed {
                    Some(speed) if speed.is_finite() && speed > 0.0 => speed,
                    Some(speed) => {
                        tracing::warn!(
                            "Ignoring invalid initial drift speed {}, using {}",
                            speed,
                            config.default_drift_speed
                        );
                        config.default_drift_speed
                    }
                    None => config.default_drift_speed,
                };

                let difficulty = DifficultyController::with_schedule(
                    drift_speed,
                    config.difficulty_step,
                    config.difficulty_period(),
                );
                return Some(Game::new(config.layout(width, height), difficulty));
            }
            other => {
                tracing::debug!("Ignoring {:?} before the game has started", other);
            }
        }
    }
    None
}

fn handle_action(
    game: &mut Game,
    action: ClientMessage,
    validator: &Arc<WordValidator>,
    verdict_tx: &mpsc::Sender<(Submission, Verdict)>,
) -> Option<ServerMessage> {
    match action {
        ClientMessage::Start { .. } => {
            tracing::debug!("Ignoring start: game already running");
            None
        }
        ClientMessage::PointerSelect { x, y } => {
            game.pointer_select(x, y);
            None
        }
        ClientMessage::Submit => {
            if let Some(submission) = game.submit() {
                spawn_validation(validator.clone(), submission, verdict_tx.clone());
            }
            None
        }
        ClientMessage::Clear => {
            game.clear_selection();
            None
        }
        ClientMessage::ActivateMultiplier => game
            .activate_multiplier()
            .then_some(ServerMessage::MultiplierArmed),
        ClientMessage::Reshuffle => {
            game.reshuffle();
            Some(ServerMessage::Reshuffled {
                tile_count: game.field().len(),
            })
        }
    }
}

fn spawn_validation(
    validator: Arc<WordValidator>,
    submission: Submission,
    verdict_tx: mpsc::Sender<(Submission, Verdict)>,
) {
    tokio::spawn(async move {
        let verdict = validator.validate(&submission.word).await;
        // The session may have ended while we were waiting
        let _ = verdict_tx.send((submission, verdict)).await;
    });
}
