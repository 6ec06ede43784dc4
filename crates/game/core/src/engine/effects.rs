//! Applies a resolved [`Effect`] to the world.

use crate::dialog::Effect;
use crate::events::GameEvent;
use crate::ids::DialogId;
use crate::state::{DiscoverError, WorldState};

use super::InterpreterError;

/// Applies `effect` in place and returns the session requests it raised.
///
/// World events land in the world journal as usual. Callers stage `world`
/// and discard it on error, which keeps application atomic.
pub(super) fn apply_effect(
    effect: &Effect,
    world: &mut WorldState,
    follow_up_on_caught: &DialogId,
) -> Result<Vec<GameEvent>, InterpreterError> {
    tracing::debug!("Applying effect {}", effect.as_str());

    let mut requests = Vec::new();
    match effect {
        Effect::GrantClue(clue) => {
            world.grant_clue(clue);
        }
        Effect::GrantConnectionDialog(connection) => {
            match world.discover_connection_by_id(connection) {
                Ok(_) | Err(DiscoverError::AlreadyDiscovered { .. }) => {}
                Err(err) => return Err(err.into()),
            }
            requests.push(GameEvent::ConnectionDialogRequested {
                connection: connection.clone(),
            });
        }
        Effect::SetPendingExternalCutscene(cutscene) => {
            world.set_pending_cutscene(cutscene.clone());
        }
        Effect::CatchSuspect(suspect) => world.catch_suspect(suspect)?,
        Effect::ReleaseSuspect(suspect) => world.release_suspect(suspect)?,
        Effect::SkipDay => {
            world.skip_day();
        }
        Effect::CutsceneUnlessCaught {
            cutscene,
            otherwise,
        } => {
            if let Some(held) = world.caught_suspect() {
                let dialog = otherwise.as_ref().unwrap_or(follow_up_on_caught).clone();
                tracing::info!(
                    "Suspect '{}' is still held, redirecting to dialog '{}'",
                    held.id,
                    dialog
                );
                requests.push(GameEvent::FollowUpDialogRequested { dialog });
            } else {
                world.set_pending_cutscene(cutscene.clone());
            }
        }
        Effect::None => {}
    }

    Ok(requests)
}
