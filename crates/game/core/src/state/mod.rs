//! Authoritative investigation state.
//!
//! [`WorldState`] is built once per session from a [`CaseFile`] and mutated
//! for the rest of the session. It tracks which clues are collected, which
//! connections are discovered, each suspect's stage, the current day and a
//! pending outside cutscene.
//!
//! Every successful mutation appends [`GameEvent`]s to an internal journal
//! (drained with [`WorldState::take_events`]) and re-scans hidden suspects,
//! revealing every one whose unlock requirements now hold.
mod clues;
mod error;
mod suspects;

pub use clues::{ClueState, ConnectionKey, ConnectionState, Discovered};
pub use error::{DiscoverError, StateError};
pub use suspects::{SuspectAction, SuspectStage, SuspectState};

use std::collections::BTreeMap;

use crate::case::{CaseFile, UnlockRequirements};
use crate::condition::ConditionContext;
use crate::events::GameEvent;
use crate::ids::{ClueId, ConnectionId, CutsceneId, SuspectId};

/// Mutable case board for one play session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    clues: BTreeMap<ClueId, ClueState>,
    connections: BTreeMap<ConnectionId, ConnectionState>,
    suspects: BTreeMap<SuspectId, SuspectState>,
    day: u32,
    pending_cutscene: Option<CutsceneId>,

    /// Events recorded since the last `take_events`.
    #[cfg_attr(feature = "serde", serde(skip))]
    journal: Vec<GameEvent>,
}

impl WorldState {
    /// Builds a fresh world from case content.
    ///
    /// # Errors
    ///
    /// Rejects duplicate ids, connections that name unknown clues or link a
    /// clue to itself, and two connections over the same clue pair.
    pub fn new(case: &CaseFile, starting_day: u32) -> Result<Self, StateError> {
        if starting_day == 0 {
            return Err(StateError::InvalidDay { day: starting_day });
        }

        let mut clues = BTreeMap::new();
        for def in &case.clues {
            let state = ClueState {
                id: def.id.clone(),
                title: def.title.clone(),
                description: def.description.clone(),
                collected: false,
            };
            if clues.insert(def.id.clone(), state).is_some() {
                return Err(StateError::DuplicateClue {
                    clue: def.id.clone(),
                });
            }
        }

        let mut connections: BTreeMap<ConnectionId, ConnectionState> = BTreeMap::new();
        for def in &case.connections {
            let (first, second) = &def.clues;
            for clue in [first, second] {
                if !clues.contains_key(clue) {
                    return Err(StateError::ConnectionClueMissing {
                        connection: def.id.clone(),
                        clue: clue.clone(),
                    });
                }
            }
            if first == second {
                return Err(StateError::SelfConnection {
                    connection: def.id.clone(),
                    clue: first.clone(),
                });
            }

            let key = ConnectionKey::from_refs(first, second);
            if connections.values().any(|existing| existing.key == key) {
                return Err(StateError::DuplicateConnectionPair {
                    first: key.first().clone(),
                    second: key.second().clone(),
                });
            }

            let state = ConnectionState {
                id: def.id.clone(),
                key,
                description: def.description.clone(),
                discovered: false,
            };
            if connections.insert(def.id.clone(), state).is_some() {
                return Err(StateError::DuplicateConnection {
                    connection: def.id.clone(),
                });
            }
        }

        let mut suspects = BTreeMap::new();
        for def in &case.suspects {
            let state = SuspectState {
                id: def.id.clone(),
                name: def.name.clone(),
                description: def.description.clone(),
                unlock: def.unlock.clone(),
                stage: SuspectStage::Hidden,
            };
            if suspects.insert(def.id.clone(), state).is_some() {
                return Err(StateError::DuplicateSuspect {
                    suspect: def.id.clone(),
                });
            }
        }

        Ok(Self {
            clues,
            connections,
            suspects,
            day: starting_day,
            pending_cutscene: None,
            journal: Vec::new(),
        })
    }

    /// Drains the events recorded since the previous call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Journal position to pass to [`Self::take_events_since`].
    pub fn journal_mark(&self) -> usize {
        self.journal.len()
    }

    /// Drains only the events recorded after `mark`; earlier ones stay queued.
    pub fn take_events_since(&mut self, mark: usize) -> Vec<GameEvent> {
        let mark = mark.min(self.journal.len());
        self.journal.drain(mark..).collect()
    }

    fn record(&mut self, event: GameEvent) {
        self.journal.push(event);
    }

    // ========================================================================
    // Clues
    // ========================================================================

    /// Marks a clue as collected.
    ///
    /// Returns `true` only for a new grant. Unknown ids are ignored with a
    /// warning so that stray notebook entries cannot break a dialogue.
    pub fn grant_clue(&mut self, id: &ClueId) -> bool {
        let Some(clue) = self.clues.get_mut(id) else {
            tracing::warn!("Clue '{}' not found, grant ignored", id);
            return false;
        };
        if clue.collected {
            return false;
        }

        clue.collected = true;
        tracing::info!("Clue '{}' collected", id);
        self.record(GameEvent::ClueCollected { clue: id.clone() });
        self.rescan_unlocks();
        true
    }

    pub fn has_clue(&self, id: &ClueId) -> bool {
        self.clues.get(id).is_some_and(|clue| clue.collected)
    }

    pub fn clue(&self, id: &ClueId) -> Option<&ClueState> {
        self.clues.get(id)
    }

    pub fn clues(&self) -> impl Iterator<Item = &ClueState> {
        self.clues.values()
    }

    pub fn collected_clues(&self) -> impl Iterator<Item = &ClueState> {
        self.clues.values().filter(|clue| clue.collected)
    }

    // ========================================================================
    // Connections
    // ========================================================================

    /// Links two collected clues on the board.
    ///
    /// Argument order does not matter. Checks run in a fixed order: both
    /// clues collected, the connection exists, it is not yet discovered.
    pub fn discover_connection(
        &mut self,
        first: &ClueId,
        second: &ClueId,
    ) -> Result<Discovered, DiscoverError> {
        if !self.has_clue(first) || !self.has_clue(second) {
            return Err(DiscoverError::CluesNotCollected {
                first: first.clone(),
                second: second.clone(),
            });
        }

        let key = ConnectionKey::from_refs(first, second);
        let Some(connection) = self
            .connections
            .values_mut()
            .find(|connection| connection.key == key)
        else {
            return Err(DiscoverError::NoSuchConnection {
                first: first.clone(),
                second: second.clone(),
            });
        };
        if connection.discovered {
            return Err(DiscoverError::AlreadyDiscovered {
                connection: connection.id.clone(),
            });
        }

        connection.discovered = true;
        let discovered = connection.to_discovered();

        tracing::info!(
            "Connection '{}' discovered between '{}' and '{}'",
            discovered.connection,
            discovered.clues.0,
            discovered.clues.1
        );
        self.record(GameEvent::ConnectionDiscovered {
            connection: discovered.connection.clone(),
            clues: discovered.clues.clone(),
            description: discovered.description.clone(),
        });
        self.rescan_unlocks();
        Ok(discovered)
    }

    /// Links the two clues of a connection given by id.
    pub fn discover_connection_by_id(
        &mut self,
        id: &ConnectionId,
    ) -> Result<Discovered, DiscoverError> {
        let Some(connection) = self.connections.get(id) else {
            tracing::warn!("Connection '{}' not found", id);
            return Err(DiscoverError::UnknownConnection {
                connection: id.clone(),
            });
        };
        let (first, second) = connection.key.clone().into_pair();
        self.discover_connection(&first, &second)
    }

    pub fn is_connection_discovered(&self, first: &ClueId, second: &ClueId) -> bool {
        self.connection_between(first, second)
            .is_some_and(|connection| connection.discovered)
    }

    pub fn is_connection_discovered_by_id(&self, id: &ConnectionId) -> bool {
        self.connections
            .get(id)
            .is_some_and(|connection| connection.discovered)
    }

    /// Looks up the authored connection between two clues, in either order.
    pub fn connection_between(&self, first: &ClueId, second: &ClueId) -> Option<&ConnectionState> {
        let key = ConnectionKey::from_refs(first, second);
        self.connections
            .values()
            .find(|connection| connection.key == key)
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&ConnectionState> {
        self.connections.get(id)
    }

    pub fn discovered_connections(&self) -> impl Iterator<Item = &ConnectionState> {
        self.connections
            .values()
            .filter(|connection| connection.discovered)
    }

    // ========================================================================
    // Suspects
    // ========================================================================

    /// Reveals a hidden suspect whose unlock requirements hold.
    ///
    /// Returns `Ok(true)` on reveal and `Ok(false)` if the suspect was already
    /// past `Hidden`.
    pub fn reveal_suspect(&mut self, id: &SuspectId) -> Result<bool, StateError> {
        let suspect = self.suspect_or_err(id)?;
        if suspect.stage.is_revealed() {
            return Ok(false);
        }
        if !self.unlock_satisfied(&suspect.unlock) {
            return Err(StateError::SuspectLocked {
                suspect: id.clone(),
            });
        }

        self.mark_revealed(id);
        self.rescan_unlocks();
        Ok(true)
    }

    /// Reveals a hidden suspect regardless of its unlock requirements.
    pub fn force_reveal_suspect(&mut self, id: &SuspectId) -> Result<bool, StateError> {
        let suspect = self.suspect_or_err(id)?;
        if suspect.stage.is_revealed() {
            return Ok(false);
        }

        self.mark_revealed(id);
        self.rescan_unlocks();
        Ok(true)
    }

    /// Moves a revealed suspect into the single caught slot.
    pub fn catch_suspect(&mut self, id: &SuspectId) -> Result<(), StateError> {
        let stage = self.suspect_or_err(id)?.stage;
        if stage != SuspectStage::Caught
            && let Some(held) = self.caught_suspect()
        {
            return Err(StateError::CaughtSlotOccupied {
                suspect: id.clone(),
                held: held.id.clone(),
            });
        }
        if stage != SuspectStage::Revealed {
            return Err(StateError::InvalidSuspectTransition {
                suspect: id.clone(),
                stage,
                action: SuspectAction::Catch,
            });
        }

        self.set_stage(id, SuspectStage::Caught);
        tracing::info!("Suspect '{}' caught", id);
        self.record(GameEvent::SuspectCaught {
            suspect: id.clone(),
        });
        self.rescan_unlocks();
        Ok(())
    }

    pub fn release_suspect(&mut self, id: &SuspectId) -> Result<(), StateError> {
        self.leave_caught(id, SuspectAction::Release, SuspectStage::Released, |suspect| {
            GameEvent::SuspectReleased { suspect }
        })
    }

    pub fn eliminate_suspect(&mut self, id: &SuspectId) -> Result<(), StateError> {
        self.leave_caught(id, SuspectAction::Eliminate, SuspectStage::Eliminated, |suspect| {
            GameEvent::SuspectEliminated { suspect }
        })
    }

    fn leave_caught(
        &mut self,
        id: &SuspectId,
        action: SuspectAction,
        next: SuspectStage,
        event: fn(SuspectId) -> GameEvent,
    ) -> Result<(), StateError> {
        let stage = self.suspect_or_err(id)?.stage;
        if stage != SuspectStage::Caught {
            return Err(StateError::InvalidSuspectTransition {
                suspect: id.clone(),
                stage,
                action,
            });
        }

        self.set_stage(id, next);
        tracing::info!("Suspect '{}' {}", id, next);
        self.record(event(id.clone()));
        self.rescan_unlocks();
        Ok(())
    }

    pub fn suspect(&self, id: &SuspectId) -> Option<&SuspectState> {
        self.suspects.get(id)
    }

    pub fn suspect_stage(&self, id: &SuspectId) -> Option<SuspectStage> {
        self.suspects.get(id).map(|suspect| suspect.stage)
    }

    pub fn suspects(&self) -> impl Iterator<Item = &SuspectState> {
        self.suspects.values()
    }

    pub fn revealed_suspects(&self) -> impl Iterator<Item = &SuspectState> {
        self.suspects
            .values()
            .filter(|suspect| suspect.stage.is_revealed())
    }

    /// The suspect currently held, if any. There is at most one.
    pub fn caught_suspect(&self) -> Option<&SuspectState> {
        self.suspects
            .values()
            .find(|suspect| suspect.stage == SuspectStage::Caught)
    }

    pub fn is_suspect_alive_and_free(&self, id: &SuspectId) -> bool {
        self.suspects
            .get(id)
            .is_some_and(|suspect| suspect.stage.is_alive_and_free())
    }

    /// Returns true if every required clue is collected and every required
    /// connection is discovered.
    pub fn unlock_satisfied(&self, unlock: &UnlockRequirements) -> bool {
        unlock.clues.iter().all(|clue| self.has_clue(clue))
            && unlock
                .connections
                .iter()
                .all(|connection| self.is_connection_discovered_by_id(connection))
    }

    /// Reveals every hidden suspect whose requirements hold.
    ///
    /// Reveals never change clues or connections, so one pass reaches the fixpoint.
    fn rescan_unlocks(&mut self) {
        let ready: Vec<SuspectId> = self
            .suspects
            .values()
            .filter(|suspect| suspect.stage == SuspectStage::Hidden)
            .filter(|suspect| self.unlock_satisfied(&suspect.unlock))
            .map(|suspect| suspect.id.clone())
            .collect();

        for id in ready {
            self.mark_revealed(&id);
        }
    }

    fn mark_revealed(&mut self, id: &SuspectId) {
        self.set_stage(id, SuspectStage::Revealed);
        tracing::info!("Suspect '{}' revealed", id);
        self.record(GameEvent::SuspectRevealed {
            suspect: id.clone(),
        });
    }

    fn set_stage(&mut self, id: &SuspectId, stage: SuspectStage) {
        if let Some(suspect) = self.suspects.get_mut(id) {
            suspect.stage = stage;
        }
    }

    fn suspect_or_err(&self, id: &SuspectId) -> Result<&SuspectState, StateError> {
        self.suspects
            .get(id)
            .ok_or_else(|| StateError::UnknownSuspect { suspect: id.clone() })
    }

    // ========================================================================
    // Calendar
    // ========================================================================

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Advances to the next day and returns it.
    pub fn skip_day(&mut self) -> u32 {
        let previous = self.day;
        self.day = self.day.saturating_add(1);
        tracing::info!("Day skipped: {} -> {}", previous, self.day);
        self.record(GameEvent::DayChanged {
            previous,
            current: self.day,
        });
        self.day
    }

    /// Jumps to a given day (debugging or loading a save).
    pub fn set_day(&mut self, day: u32) -> Result<(), StateError> {
        if day == 0 {
            return Err(StateError::InvalidDay { day });
        }
        let previous = self.day;
        self.day = day;
        tracing::info!("Day set: {} -> {}", previous, day);
        self.record(GameEvent::DayChanged {
            previous,
            current: day,
        });
        Ok(())
    }

    // ========================================================================
    // Outside actions
    // ========================================================================

    pub fn pending_cutscene(&self) -> Option<&CutsceneId> {
        self.pending_cutscene.as_ref()
    }

    /// Stores the cutscene to play when the player next leaves the house.
    ///
    /// A newer plan replaces an older one.
    pub fn set_pending_cutscene(&mut self, cutscene: CutsceneId) {
        tracing::info!("Pending cutscene set: {}", cutscene);
        self.pending_cutscene = Some(cutscene.clone());
        self.record(GameEvent::CutscenePending { cutscene });
    }

    pub fn take_pending_cutscene(&mut self) -> Option<CutsceneId> {
        self.pending_cutscene.take()
    }
}

impl ConditionContext for WorldState {
    fn has_clue(&self, id: &ClueId) -> bool {
        WorldState::has_clue(self, id)
    }

    fn is_connection_discovered_by_id(&self, id: &ConnectionId) -> bool {
        WorldState::is_connection_discovered_by_id(self, id)
    }

    fn is_suspect_alive_and_free(&self, id: &SuspectId) -> bool {
        WorldState::is_suspect_alive_and_free(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{ClueDefinition, ConnectionDefinition, SuspectDefinition};
    use crate::error::{ErrorKind, GameError};

    fn clue(id: &str) -> ClueId {
        ClueId::from(id)
    }

    fn suspect(id: &str) -> SuspectId {
        SuspectId::from(id)
    }

    fn sample_case() -> CaseFile {
        CaseFile {
            clues: ["1", "2", "3", "8"]
                .into_iter()
                .map(|id| ClueDefinition::new(id, format!("Clue {id}")))
                .collect(),
            connections: vec![
                ConnectionDefinition::new("1_2", "1", "2", "The body was never released"),
                ConnectionDefinition::new("2_3", "3", "2", "Company X funds the morgue"),
            ],
            suspects: vec![
                SuspectDefinition::new("0", "Morgue manager")
                    .with_unlock(UnlockRequirements::new(["1"], Vec::<&str>::new())),
                SuspectDefinition::new("1", "Deputy director")
                    .with_unlock(UnlockRequirements::new(["3"], ["1_2"])),
                SuspectDefinition::new("2", "Head doctor")
                    .with_unlock(UnlockRequirements::new(["8"], Vec::<&str>::new())),
            ],
        }
    }

    fn world() -> WorldState {
        WorldState::new(&sample_case(), 1).expect("sample case is valid")
    }

    #[test]
    fn grant_clue_is_idempotent() {
        let mut once = world();
        let mut twice = world();

        assert!(once.grant_clue(&clue("2")));
        assert!(twice.grant_clue(&clue("2")));
        assert!(!twice.grant_clue(&clue("2")));

        once.take_events();
        twice.take_events();
        assert_eq!(once, twice);
    }

    #[test]
    fn take_events_since_keeps_earlier_entries() {
        let mut world = world();
        world.grant_clue(&clue("2"));
        let mark = world.journal_mark();
        world.grant_clue(&clue("3"));

        assert_eq!(
            world.take_events_since(mark),
            vec![GameEvent::ClueCollected { clue: clue("3") }]
        );
        assert_eq!(
            world.take_events(),
            vec![GameEvent::ClueCollected { clue: clue("2") }]
        );
    }

    #[test]
    fn unknown_clue_grant_is_ignored() {
        let mut world = world();
        assert!(!world.grant_clue(&clue("404")));
        assert!(world.take_events().is_empty());
    }

    #[test]
    fn discover_connection_scenario() {
        let mut world = world();
        world.grant_clue(&clue("1"));
        world.grant_clue(&clue("2"));

        let discovered = world
            .discover_connection(&clue("1"), &clue("2"))
            .expect("both clues are collected");
        assert_eq!(discovered.connection.as_str(), "1_2");
        assert_eq!(discovered.description, "The body was never released");
        assert!(world.is_connection_discovered(&clue("1"), &clue("2")));
        assert!(world.is_connection_discovered(&clue("2"), &clue("1")));

        let again = world.discover_connection(&clue("1"), &clue("2"));
        assert!(matches!(again, Err(DiscoverError::AlreadyDiscovered { .. })));
    }

    #[test]
    fn discover_connection_is_order_independent() {
        let mut forward = world();
        let mut backward = world();
        for world in [&mut forward, &mut backward] {
            world.grant_clue(&clue("2"));
            world.grant_clue(&clue("3"));
        }

        let a = forward.discover_connection(&clue("2"), &clue("3")).unwrap();
        let b = backward.discover_connection(&clue("3"), &clue("2")).unwrap();
        assert_eq!(a, b);
        forward.take_events();
        backward.take_events();
        assert_eq!(forward, backward);
    }

    #[test]
    fn discover_connection_failures_in_order() {
        let mut world = world();
        world.grant_clue(&clue("1"));

        let err = world.discover_connection(&clue("1"), &clue("2")).unwrap_err();
        assert!(matches!(err, DiscoverError::CluesNotCollected { .. }));
        assert_eq!(err.kind(), ErrorKind::Gated);

        world.grant_clue(&clue("8"));
        let err = world.discover_connection(&clue("1"), &clue("8")).unwrap_err();
        assert!(matches!(err, DiscoverError::NoSuchConnection { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn discover_unknown_connection_id_names_it() {
        let mut world = world();
        let err = world
            .discover_connection_by_id(&ConnectionId::from("7_9"))
            .unwrap_err();
        assert_eq!(
            err,
            DiscoverError::UnknownConnection {
                connection: ConnectionId::from("7_9")
            }
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "unknown connection '7_9'");
        assert!(world.take_events().is_empty());
    }

    #[test]
    fn clue_grant_reveals_suspect() {
        let mut world = world();
        world.grant_clue(&clue("1"));

        assert_eq!(
            world.suspect_stage(&suspect("0")),
            Some(SuspectStage::Revealed)
        );
        let events = world.take_events();
        assert_eq!(
            events,
            vec![
                GameEvent::ClueCollected { clue: clue("1") },
                GameEvent::SuspectRevealed {
                    suspect: suspect("0")
                },
            ]
        );
    }

    #[test]
    fn connection_discovery_reveals_suspect_requiring_it() {
        let mut world = world();
        world.grant_clue(&clue("1"));
        world.grant_clue(&clue("2"));
        world.grant_clue(&clue("3"));
        assert_eq!(
            world.suspect_stage(&suspect("1")),
            Some(SuspectStage::Hidden)
        );

        world.discover_connection(&clue("1"), &clue("2")).unwrap();
        assert_eq!(
            world.suspect_stage(&suspect("1")),
            Some(SuspectStage::Revealed)
        );
    }

    #[test]
    fn reveal_suspect_is_gated_then_idempotent() {
        let mut world = world();
        let err = world.reveal_suspect(&suspect("2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Gated);

        world.force_reveal_suspect(&suspect("2")).unwrap();
        assert_eq!(world.reveal_suspect(&suspect("2")), Ok(false));

        let err = world.reveal_suspect(&suspect("nobody")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn only_one_suspect_caught_at_a_time() {
        let mut world = world();
        for id in ["0", "1", "2"] {
            world.force_reveal_suspect(&suspect(id)).unwrap();
        }

        world.catch_suspect(&suspect("0")).unwrap();
        let err = world.catch_suspect(&suspect("1")).unwrap_err();
        assert!(matches!(err, StateError::CaughtSlotOccupied { .. }));

        world.release_suspect(&suspect("0")).unwrap();
        world.catch_suspect(&suspect("1")).unwrap();
        world.eliminate_suspect(&suspect("1")).unwrap();
        world.catch_suspect(&suspect("2")).unwrap();

        assert_eq!(world.caught_suspect().map(|s| s.id.as_str()), Some("2"));
        assert_eq!(
            world.suspects().filter(|s| s.stage == SuspectStage::Caught).count(),
            1
        );
    }

    #[test]
    fn caught_slot_holds_under_arbitrary_sequences() {
        // Deterministic pseudo-random walk over catch/release/eliminate calls.
        let ids = ["0", "1", "2"];
        let mut world = world();
        for id in ids {
            world.force_reveal_suspect(&suspect(id)).unwrap();
        }

        let mut seed: u32 = 0x2545_f491;
        for _ in 0..200 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let target = suspect(ids[(seed % 3) as usize]);
            let _ = match (seed >> 8) % 3 {
                0 => world.catch_suspect(&target),
                1 => world.release_suspect(&target),
                _ => world.eliminate_suspect(&target),
            };
            let caught = world
                .suspects()
                .filter(|s| s.stage == SuspectStage::Caught)
                .count();
            assert!(caught <= 1);
        }
    }

    #[test]
    fn terminal_stages_cannot_be_caught() {
        let mut world = world();
        world.force_reveal_suspect(&suspect("0")).unwrap();
        world.catch_suspect(&suspect("0")).unwrap();
        world.release_suspect(&suspect("0")).unwrap();

        let err = world.catch_suspect(&suspect("0")).unwrap_err();
        assert!(matches!(
            err,
            StateError::InvalidSuspectTransition {
                stage: SuspectStage::Released,
                action: SuspectAction::Catch,
                ..
            }
        ));
        assert!(world.is_suspect_alive_and_free(&suspect("0")));

        let err = world.release_suspect(&suspect("1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn alive_and_free_tracks_stage() {
        let mut world = world();
        let id = suspect("2");
        assert!(world.is_suspect_alive_and_free(&id));
        world.force_reveal_suspect(&id).unwrap();
        world.catch_suspect(&id).unwrap();
        assert!(!world.is_suspect_alive_and_free(&id));
        world.eliminate_suspect(&id).unwrap();
        assert!(!world.is_suspect_alive_and_free(&id));
        assert!(!world.is_suspect_alive_and_free(&suspect("ghost")));
    }

    #[test]
    fn rejects_inconsistent_case_files() {
        let mut case = sample_case();
        case.connections
            .push(ConnectionDefinition::new("dup", "2", "1", "again"));
        assert!(matches!(
            WorldState::new(&case, 1),
            Err(StateError::DuplicateConnectionPair { .. })
        ));

        let mut case = sample_case();
        case.connections
            .push(ConnectionDefinition::new("x", "1", "99", ""));
        assert!(matches!(
            WorldState::new(&case, 1),
            Err(StateError::ConnectionClueMissing { .. })
        ));

        assert!(matches!(
            WorldState::new(&sample_case(), 0),
            Err(StateError::InvalidDay { day: 0 })
        ));
    }

    #[test]
    fn day_and_pending_cutscene() {
        let mut world = world();
        assert_eq!(world.skip_day(), 2);
        assert!(world.set_day(0).is_err());

        world.set_pending_cutscene(CutsceneId::from("cutscene_is_stels:true_0"));
        assert_eq!(
            world.take_pending_cutscene().map(|c| c.0),
            Some("cutscene_is_stels:true_0".to_owned())
        );
        assert!(world.pending_cutscene().is_none());
    }
}
