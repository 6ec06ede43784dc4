//! End-to-end sessions over the bundled sample case.

use casebook_content::ContentFactory;
use casebook_core::{ClueId, DialogId, GameEvent, SuspectId, SuspectStage};
use casebook_runtime::{
    EventRecorder, FileStateRepository, FollowUp, GameSession, RuntimeError, StateRepository,
    Topic,
};

fn clue(id: &str) -> ClueId {
    ClueId::from(id)
}

fn dialog(id: &str) -> DialogId {
    DialogId::from(id)
}

fn bundled_session() -> (GameSession, EventRecorder) {
    let content = ContentFactory::bundled().expect("bundled content loads");
    let mut session = GameSession::from_content(content).expect("session builds");
    let recorder = EventRecorder::new();
    session.subscribe_all(recorder.clone());
    (session, recorder)
}

/// Starts `id` and picks the given option indices in order.
fn play(session: &mut GameSession, id: &str, picks: &[usize]) {
    session.start_dialog(&dialog(id)).unwrap();
    for &pick in picks {
        session.select_option(pick).unwrap();
    }
    session.tick();
}

fn available(session: &GameSession) -> Vec<usize> {
    session
        .available_options()
        .into_iter()
        .map(|(index, _)| index)
        .collect()
}

#[test]
fn sleeping_skips_a_day_and_working_does_not() {
    let (mut session, recorder) = bundled_session();
    assert_eq!(session.day(), 1);

    play(&mut session, "skip_day", &[1]);
    assert!(!session.is_in_dialog());
    assert_eq!(session.day(), 1);
    assert!(!recorder.names().contains(&"day_changed"));

    play(&mut session, "skip_day", &[0]);
    assert!(!session.is_in_dialog());
    assert_eq!(session.day(), 2);
    assert!(recorder.events().contains(&GameEvent::DayChanged {
        previous: 1,
        current: 2,
    }));
}

#[test]
fn gated_option_appears_once_clue_is_granted() {
    let (mut session, _) = bundled_session();

    session.start_dialog(&dialog("dialogue_2")).unwrap();
    assert_eq!(available(&session), vec![0]);
    let err = session.select_option(1).unwrap_err();
    assert!(matches!(err, RuntimeError::Interpreter(_)));
    session.end_dialog();

    // The cutscene's outcome grants clue 8
    play(&mut session, "cutscene_is_stels:true_1", &[0]);
    assert!(session.has_clue(&clue("8")));

    session.start_dialog(&dialog("dialogue_2")).unwrap();
    assert_eq!(available(&session), vec![1]);
}

#[test]
fn news_reveals_a_suspect_in_event_order() {
    let (mut session, recorder) = bundled_session();

    assert_eq!(session.news_dialog_for_today(), Some(&dialog("news_1")));
    let started = session.start_todays_news().unwrap();
    assert_eq!(started, Some(dialog("news_1")));
    session.tick();
    recorder.take();

    session.select_option(0).unwrap();
    session.tick();
    assert_eq!(
        recorder.names(),
        vec![
            "option_selected",
            "clue_collected",
            "suspect_revealed",
            "dialog_ended"
        ]
    );
    assert_eq!(
        session.world().suspect_stage(&SuspectId::from("0")),
        Some(SuspectStage::Revealed)
    );
}

#[test]
fn capture_interrogation_and_redirect_while_held() {
    let (mut session, recorder) = bundled_session();

    play(&mut session, "news_1", &[0]);
    play(&mut session, "map_0", &[0]);
    assert!(session.world().pending_cutscene().is_some());

    let cutscene = session.exit_house().unwrap();
    assert_eq!(
        cutscene.as_ref().map(|id| id.as_str()),
        Some("cutscene_is_stels:false_0")
    );
    assert_eq!(
        session.current_dialog_id(),
        Some(&dialog("cutscene_is_stels:false_0"))
    );
    session.select_option(0).unwrap();
    session.tick();
    assert_eq!(
        session.caught_suspect().map(|s| s.id.as_str()),
        Some("0")
    );
    assert_eq!(session.exit_house().unwrap(), None);

    play(&mut session, "dialogue_0", &[0, 0, 0]);
    assert!(session.has_clue(&clue("3")));

    // Planning another capture while one suspect is held redirects
    session.start_dialog(&dialog("map_1")).unwrap();
    session.select_option(0).unwrap();
    assert!(!session.is_in_dialog());
    assert!(session.world().pending_cutscene().is_none());
    assert_eq!(
        session.pending_follow_ups().collect::<Vec<_>>(),
        vec![&FollowUp::Dialog(dialog("need_to_release"))]
    );

    session.tick();
    assert_eq!(session.current_dialog_id(), Some(&dialog("need_to_release")));
    assert!(recorder.names().contains(&"follow_up_dialog_requested"));
    session.select_option(0).unwrap();

    let eliminated = session.eliminate_caught_suspect().unwrap();
    assert_eq!(eliminated.as_str(), "0");
    assert!(session.caught_suspect().is_none());
    session.tick();
    assert!(recorder.events().contains(&GameEvent::SuspectEliminated {
        suspect: SuspectId::from("0"),
    }));
}

#[test]
fn linking_clues_reveals_suspect_and_reads_description() {
    let (mut session, recorder) = bundled_session();

    play(&mut session, "news_1", &[0]);
    play(&mut session, "map_0", &[0]);
    session.exit_house().unwrap();
    session.select_option(0).unwrap();
    play(&mut session, "dialogue_0", &[0, 0, 0]);
    play(&mut session, "skip_day", &[0]);
    assert_eq!(session.news_dialog_for_today(), Some(&dialog("news_2")));
    session.start_todays_news().unwrap();
    session.select_option(0).unwrap();
    session.tick();
    assert!(session.has_clue(&clue("4")));

    let deputy = SuspectId::from("1");
    assert_eq!(
        session.world().suspect_stage(&deputy),
        Some(SuspectStage::Hidden)
    );

    let discovered = session.discover_connection(&clue("4"), &clue("3")).unwrap();
    assert_eq!(discovered.connection.as_str(), "3_4");
    assert!(session.is_connection_discovered(&clue("3"), &clue("4")));
    assert_eq!(
        session.world().suspect_stage(&deputy),
        Some(SuspectStage::Revealed)
    );

    let generated = session.current_dialog().unwrap();
    assert_eq!(generated.id.as_str(), "connection_3_4");
    assert_eq!(generated.speaker, "Thoughts");
    assert_eq!(
        session.current_node().map(|node| node.text.as_str()),
        Some(discovered.description.as_str())
    );
    session.select_option(0).unwrap();
    assert!(!session.is_in_dialog());

    let again = session.discover_connection(&clue("3"), &clue("4"));
    assert!(matches!(again, Err(RuntimeError::Discover(_))));

    session.tick();
    let names = recorder.names();
    let discovered_at = names
        .iter()
        .position(|name| *name == "connection_discovered")
        .unwrap();
    assert_eq!(names[discovered_at + 1], "suspect_revealed");
    assert_eq!(names[discovered_at + 2], "dialog_started");
}

#[test]
fn topic_subscribers_see_only_their_topic() {
    let (mut session, _) = bundled_session();
    let case_only = EventRecorder::new();
    session.subscribe(&[Topic::Case], case_only.clone());

    play(&mut session, "news_1", &[0]);
    assert_eq!(case_only.names(), vec!["clue_collected", "suspect_revealed"]);
}

#[test]
fn save_and_load_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let (mut session, _) = bundled_session();

    play(&mut session, "news_1", &[0]);
    session.save(&repo, "day-one").unwrap();
    assert_eq!(repo.list_slots().unwrap(), vec!["day-one".to_owned()]);

    play(&mut session, "skip_day", &[0]);
    play(&mut session, "cutscene_is_stels:true_1", &[0]);
    assert_eq!(session.day(), 2);
    assert!(session.has_clue(&clue("8")));

    session.start_dialog(&dialog("exit_basement")).unwrap();
    let err = session.load(&repo, "day-one").unwrap_err();
    assert!(matches!(err, RuntimeError::RestoreDuringDialog { .. }));
    session.end_dialog();

    session.load(&repo, "day-one").unwrap();
    assert_eq!(session.day(), 1);
    assert!(session.has_clue(&clue("1")));
    assert!(!session.has_clue(&clue("8")));

    let missing = session.load(&repo, "nope").unwrap_err();
    assert!(matches!(missing, RuntimeError::SlotNotFound { .. }));
}

#[test]
fn dialog_state_errors_leave_session_usable() {
    let (mut session, _) = bundled_session();

    assert!(matches!(
        session.select_option(0),
        Err(RuntimeError::Interpreter(_))
    ));
    assert!(!session.end_dialog());
    assert!(session.start_dialog(&dialog("missing")).is_err());

    session.start_dialog(&dialog("exit_basement")).unwrap();
    assert!(session.start_dialog(&dialog("skip_day")).is_err());
    assert!(session.exit_house().is_err());
    assert_eq!(session.current_dialog_id(), Some(&dialog("exit_basement")));
    assert_eq!(available(&session), vec![0, 1]);
}
