//! Single-threaded session orchestrator.
//!
//! [`GameSession`] owns the world, the dialog graph and the interpreter.
//! Every entry point runs to completion synchronously, queues the events it
//! produced and returns. Observers receive the queued events on the next
//! [`GameSession::tick`], after the mutating call has released the session,
//! so a callback can never re-enter it.

use std::collections::VecDeque;

use casebook_core::{
    CaseFile, ClueId, ConnectionId, CutsceneId, Dialog, DialogGraph, DialogId, DialogInterpreter,
    DialogNode, DialogOption, Discovered, GameConfig, GameEvent, InterpreterError, SuspectId,
    SuspectState, WorldState,
};

use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, SessionObserver, Topic};
use crate::repository::StateRepository;

/// A dialog waiting for the interpreter to become idle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FollowUp {
    Dialog(DialogId),
    /// The generated description dialog of a discovered connection.
    Connection(ConnectionId),
}

/// One play session over a loaded case.
pub struct GameSession {
    config: GameConfig,
    world: WorldState,
    graph: DialogGraph,
    interpreter: DialogInterpreter,
    bus: EventBus,
    follow_ups: VecDeque<FollowUp>,
}

impl GameSession {
    pub fn builder() -> GameSessionBuilder {
        GameSessionBuilder::new()
    }

    /// Builds a session from loaded case content.
    #[cfg(feature = "content")]
    pub fn from_content(content: casebook_content::CaseContent) -> Result<Self> {
        for rejected in &content.rejected {
            tracing::warn!(
                "Dialog '{}' was rejected at load time: {}",
                rejected.dialog,
                rejected.reason
            );
        }
        Self::builder()
            .config(content.config)
            .case(content.case)
            .graph(content.graph)
            .build()
    }

    // ========================================================================
    // Observers
    // ========================================================================

    pub fn subscribe(&mut self, topics: &[Topic], observer: impl SessionObserver + 'static) {
        self.bus.subscribe(topics, observer);
    }

    pub fn subscribe_all(&mut self, observer: impl SessionObserver + 'static) {
        self.bus.subscribe_all(observer);
    }

    /// Starts follow-up dialogs if the interpreter is idle, then delivers
    /// every queued event to observers.
    ///
    /// Returns the number of events delivered.
    pub fn tick(&mut self) -> usize {
        self.start_follow_ups();
        self.bus.dispatch()
    }

    /// Events queued for the next tick.
    pub fn pending_events(&self) -> usize {
        self.bus.pending()
    }

    pub fn pending_follow_ups(&self) -> impl Iterator<Item = &FollowUp> {
        self.follow_ups.iter()
    }

    // ========================================================================
    // Dialogue
    // ========================================================================

    pub fn start_dialog(&mut self, id: &DialogId) -> Result<()> {
        let events = self
            .interpreter
            .start_dialog(&self.graph, &mut self.world, id)?;
        self.record(events);
        Ok(())
    }

    /// Selects an option of the current node by its declaration index.
    pub fn select_option(&mut self, index: usize) -> Result<()> {
        let events = self
            .interpreter
            .select_option(&self.graph, &mut self.world, index)?;
        self.record(events);
        Ok(())
    }

    /// Ends the active dialog. Returns `false` when no dialog was active.
    pub fn end_dialog(&mut self) -> bool {
        match self.interpreter.end_dialog() {
            Some(event) => {
                self.record(vec![event]);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Case board
    // ========================================================================

    /// Links two collected clues on the board.
    ///
    /// On success the connection's description dialog opens right away when
    /// the interpreter is idle, or is queued as a follow-up otherwise.
    pub fn discover_connection(&mut self, first: &ClueId, second: &ClueId) -> Result<Discovered> {
        let discovered = self.world.discover_connection(first, second)?;
        let events = self.world.take_events();
        self.record(events);

        if self.config.connection_dialog.enabled {
            if self.interpreter.is_in_dialog() {
                self.follow_ups
                    .push_back(FollowUp::Connection(discovered.connection.clone()));
            } else {
                self.open_connection_dialog(&discovered);
            }
        }
        Ok(discovered)
    }

    /// Eliminates the suspect currently held in the basement.
    pub fn eliminate_caught_suspect(&mut self) -> Result<SuspectId> {
        let suspect = self
            .world
            .caught_suspect()
            .map(|state| state.id.clone())
            .ok_or(RuntimeError::NoCaughtSuspect)?;
        self.world.eliminate_suspect(&suspect)?;
        let events = self.world.take_events();
        self.record(events);
        Ok(suspect)
    }

    /// Leaves the house, playing the pending outside cutscene if one is set.
    ///
    /// When the graph has a dialog with the cutscene's id, that dialog starts.
    pub fn exit_house(&mut self) -> Result<Option<CutsceneId>> {
        if let Some(active) = self.interpreter.current_dialog_id() {
            return Err(InterpreterError::AlreadyInDialog {
                active: active.clone(),
            }
            .into());
        }

        let Some(cutscene) = self.world.take_pending_cutscene() else {
            tracing::info!("Nothing planned outside");
            return Ok(None);
        };
        tracing::info!("Leaving the house for cutscene '{}'", cutscene);
        self.record(vec![GameEvent::CutsceneStarted {
            cutscene: cutscene.clone(),
        }]);

        let dialog = DialogId::from(cutscene.as_str());
        if self.graph.contains(&dialog) {
            self.start_dialog(&dialog)?;
        }
        Ok(Some(cutscene))
    }

    // ========================================================================
    // Calendar
    // ========================================================================

    pub fn news_dialog_for_today(&self) -> Option<&DialogId> {
        self.config.news_for_day(self.world.day())
    }

    /// Starts today's news broadcast. Returns `None` when nothing airs today.
    pub fn start_todays_news(&mut self) -> Result<Option<DialogId>> {
        let Some(id) = self.news_dialog_for_today().cloned() else {
            return Ok(None);
        };
        self.start_dialog(&id)?;
        Ok(Some(id))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_in_dialog(&self) -> bool {
        self.interpreter.is_in_dialog()
    }

    pub fn current_dialog_id(&self) -> Option<&DialogId> {
        self.interpreter.current_dialog_id()
    }

    /// The active dialog, including generated connection dialogs.
    pub fn current_dialog(&self) -> Option<&Dialog> {
        self.interpreter.current_dialog(&self.graph)
    }

    pub fn current_node(&self) -> Option<&DialogNode> {
        self.interpreter.current_node(&self.graph)
    }

    pub fn available_options(&self) -> Vec<(usize, &DialogOption)> {
        self.interpreter.available_options(&self.graph, &self.world)
    }

    pub fn dialog(&self, id: &DialogId) -> Option<&Dialog> {
        self.graph.dialog(id)
    }

    pub fn has_clue(&self, id: &ClueId) -> bool {
        self.world.has_clue(id)
    }

    pub fn is_connection_discovered(&self, first: &ClueId, second: &ClueId) -> bool {
        self.world.is_connection_discovered(first, second)
    }

    pub fn caught_suspect(&self) -> Option<&SuspectState> {
        self.world.caught_suspect()
    }

    pub fn day(&self) -> u32 {
        self.world.day()
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn graph(&self) -> &DialogGraph {
        &self.graph
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn snapshot(&self) -> WorldState {
        self.world.clone()
    }

    /// Replaces the world with a saved one.
    ///
    /// Refused while a dialog is active. Queued follow-ups are dropped since
    /// they belong to the replaced world.
    pub fn restore(&mut self, world: WorldState) -> Result<()> {
        if let Some(active) = self.interpreter.current_dialog_id() {
            return Err(RuntimeError::RestoreDuringDialog {
                active: active.clone(),
            });
        }
        tracing::info!("Restored world on day {}", world.day());
        self.world = world;
        self.follow_ups.clear();
        Ok(())
    }

    pub fn save(&self, repo: &dyn StateRepository, slot: &str) -> Result<()> {
        repo.save(slot, &self.world)?;
        tracing::info!("Saved session to slot '{}'", slot);
        Ok(())
    }

    pub fn load(&mut self, repo: &dyn StateRepository, slot: &str) -> Result<()> {
        if let Some(active) = self.interpreter.current_dialog_id() {
            return Err(RuntimeError::RestoreDuringDialog {
                active: active.clone(),
            });
        }
        let world = repo
            .load(slot)?
            .ok_or_else(|| RuntimeError::SlotNotFound {
                slot: slot.to_owned(),
            })?;
        self.restore(world)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Queues events for observers and picks up the session requests among them.
    fn record(&mut self, events: Vec<GameEvent>) {
        for event in &events {
            match event {
                GameEvent::FollowUpDialogRequested { dialog } => {
                    self.follow_ups.push_back(FollowUp::Dialog(dialog.clone()));
                }
                GameEvent::ConnectionDialogRequested { connection }
                    if self.config.connection_dialog.enabled =>
                {
                    self.follow_ups
                        .push_back(FollowUp::Connection(connection.clone()));
                }
                _ => {}
            }
        }
        self.bus.publish_all(events);
    }

    fn start_follow_ups(&mut self) {
        while !self.interpreter.is_in_dialog() {
            let Some(follow_up) = self.follow_ups.pop_front() else {
                break;
            };
            tracing::debug!("Starting follow-up {:?}", follow_up);

            match follow_up {
                FollowUp::Dialog(id) => {
                    if let Err(err) = self.start_dialog(&id) {
                        tracing::warn!("Follow-up dialog '{}' failed to start: {}", id, err);
                    }
                }
                FollowUp::Connection(id) => match self.world.connection(&id) {
                    Some(connection) => {
                        let discovered = connection.to_discovered();
                        self.open_connection_dialog(&discovered);
                    }
                    None => tracing::warn!("Follow-up names unknown connection '{}'", id),
                },
            }
        }
    }

    fn open_connection_dialog(&mut self, discovered: &Discovered) {
        let dialog = Dialog::for_connection(discovered, &self.config.connection_dialog);
        match self
            .interpreter
            .start_transient(&self.graph, &mut self.world, dialog)
        {
            Ok(events) => self.record(events),
            Err(err) => tracing::warn!(
                "Connection dialog for '{}' failed to start: {}",
                discovered.connection,
                err
            ),
        }
    }
}

/// Builder for [`GameSession`].
pub struct GameSessionBuilder {
    config: GameConfig,
    case: Option<CaseFile>,
    world: Option<WorldState>,
    graph: DialogGraph,
    bus: EventBus,
}

impl GameSessionBuilder {
    fn new() -> Self {
        Self {
            config: GameConfig::default(),
            case: None,
            world: None,
            graph: DialogGraph::default(),
            bus: EventBus::new(),
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Case the world is built from, starting on `config.starting_day`.
    pub fn case(mut self, case: CaseFile) -> Self {
        self.case = Some(case);
        self
    }

    /// Start from an existing world instead of a fresh one. Takes precedence
    /// over [`Self::case`].
    pub fn world(mut self, world: WorldState) -> Self {
        self.world = Some(world);
        self
    }

    pub fn graph(mut self, graph: DialogGraph) -> Self {
        self.graph = graph;
        self
    }

    pub fn observer(mut self, topics: &[Topic], observer: impl SessionObserver + 'static) -> Self {
        self.bus.subscribe(topics, observer);
        self
    }

    pub fn build(self) -> Result<GameSession> {
        let world = match (self.world, self.case) {
            (Some(world), _) => world,
            (None, Some(case)) => WorldState::new(&case, self.config.starting_day)?,
            (None, None) => return Err(RuntimeError::MissingCase),
        };

        tracing::info!(
            "Session ready: {} dialogs, {} effects, day {}",
            self.graph.len(),
            self.graph.effects().len(),
            world.day()
        );

        Ok(GameSession {
            interpreter: DialogInterpreter::new(&self.config),
            config: self.config,
            world,
            graph: self.graph,
            bus: self.bus,
            follow_ups: VecDeque::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_core::{ClueDefinition, ConnectionDefinition, Effect, EffectTable, Transition};

    use crate::events::EventRecorder;

    fn case() -> CaseFile {
        let clue = |id: &str| ClueDefinition {
            id: ClueId::from(id),
            title: format!("Clue {id}"),
            description: String::new(),
        };
        CaseFile {
            clues: vec![clue("1"), clue("2")],
            connections: vec![ConnectionDefinition {
                id: ConnectionId::from("1_2"),
                clues: (ClueId::from("1"), ClueId::from("2")),
                description: "They match.".into(),
            }],
            suspects: Vec::new(),
        }
    }

    fn graph() -> DialogGraph {
        let effects = EffectTable::new().with("_grant_2", Effect::GrantClue(ClueId::from("2")));
        let mut graph = DialogGraph::new(effects);
        graph
            .register(
                Dialog::new("intro", "Detective", "start").with_node(
                    DialogNode::new("start", "Look around.").with_option(DialogOption::new(
                        "Search",
                        Transition::EffectThenEnd("_grant_2".into()),
                    )),
                ),
            )
            .unwrap();
        graph
    }

    fn session() -> (GameSession, EventRecorder) {
        let recorder = EventRecorder::new();
        let session = GameSession::builder()
            .case(case())
            .graph(graph())
            .observer(&Topic::ALL, recorder.clone())
            .build()
            .unwrap();
        (session, recorder)
    }

    #[test]
    fn observers_wait_for_tick() {
        let (mut session, recorder) = session();
        session.start_dialog(&DialogId::from("intro")).unwrap();

        assert!(recorder.is_empty());
        assert!(session.pending_events() > 0);

        let delivered = session.tick();
        assert_eq!(delivered, recorder.len());
        assert_eq!(recorder.names()[0], "dialog_started");
        assert_eq!(session.tick(), 0);
    }

    #[test]
    fn build_requires_case_or_world() {
        let err = GameSession::builder().build().err().unwrap();
        assert!(matches!(err, RuntimeError::MissingCase));
    }

    #[test]
    fn eliminate_without_caught_suspect_fails() {
        let (mut session, _) = session();
        let err = session.eliminate_caught_suspect().unwrap_err();
        assert!(matches!(err, RuntimeError::NoCaughtSuspect));
    }

    #[test]
    fn discovery_opens_connection_dialog_when_idle() {
        let (mut session, recorder) = session();
        session.world.grant_clue(&ClueId::from("1"));
        session.world.grant_clue(&ClueId::from("2"));
        session.world.take_events();

        let discovered = session
            .discover_connection(&ClueId::from("2"), &ClueId::from("1"))
            .unwrap();
        assert_eq!(discovered.connection.as_str(), "1_2");
        assert_eq!(
            session.current_dialog_id().map(DialogId::as_str),
            Some("connection_1_2")
        );
        assert_eq!(
            session.current_node().map(|node| node.text.as_str()),
            Some("They match.")
        );

        session.tick();
        assert_eq!(
            recorder.names(),
            vec!["connection_discovered", "dialog_started", "node_played", "highlights_updated"]
        );
    }

    #[test]
    fn discovery_mid_dialog_is_queued() {
        let (mut session, _) = session();
        session.world.grant_clue(&ClueId::from("1"));
        session.start_dialog(&DialogId::from("intro")).unwrap();
        session.select_option(0).unwrap();
        assert!(!session.is_in_dialog());
        assert!(session.has_clue(&ClueId::from("2")));

        session.start_dialog(&DialogId::from("intro")).unwrap();
        session
            .discover_connection(&ClueId::from("1"), &ClueId::from("2"))
            .unwrap();
        assert_eq!(session.current_dialog_id().map(DialogId::as_str), Some("intro"));
        assert_eq!(
            session.pending_follow_ups().collect::<Vec<_>>(),
            vec![&FollowUp::Connection(ConnectionId::from("1_2"))]
        );

        // Still busy: the follow-up keeps waiting
        session.tick();
        assert_eq!(session.pending_follow_ups().count(), 1);

        session.end_dialog();
        session.tick();
        assert_eq!(
            session.current_dialog_id().map(DialogId::as_str),
            Some("connection_1_2")
        );
        assert_eq!(session.pending_follow_ups().count(), 0);
    }

    #[test]
    fn restore_refused_mid_dialog() {
        let (mut session, _) = session();
        let saved = session.snapshot();
        session.start_dialog(&DialogId::from("intro")).unwrap();

        let err = session.restore(saved.clone()).unwrap_err();
        assert!(matches!(err, RuntimeError::RestoreDuringDialog { .. }));

        session.end_dialog();
        session.restore(saved).unwrap();
    }
}
