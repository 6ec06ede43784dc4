//! Prints session events and board summaries to stdout.
use casebook_core::GameEvent;
use casebook_runtime::{GameSession, SessionObserver};

/// Observer that narrates events as they are dispatched.
#[derive(Default)]
pub struct Narrator;

impl SessionObserver for Narrator {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::DialogStarted { speaker, .. } => println!("\n--- {speaker} ---"),
            GameEvent::NodePlayed { speaker, text, .. } => println!("{speaker}: {text}"),
            GameEvent::OptionSelected { text, .. } => println!("> {text}"),
            GameEvent::DialogEnded { .. } => println!("---"),
            GameEvent::ClueCollected { clue } => println!("[notebook] new clue {clue}"),
            GameEvent::ConnectionDiscovered {
                clues, description, ..
            } => println!("[board] {} + {}: {description}", clues.0, clues.1),
            GameEvent::SuspectRevealed { suspect } => println!("[board] new suspect {suspect}"),
            GameEvent::SuspectCaught { suspect } => {
                println!("[basement] suspect {suspect} is held")
            }
            GameEvent::SuspectReleased { suspect } => println!("[basement] {suspect} let go"),
            GameEvent::SuspectEliminated { suspect } => println!("[basement] {suspect} is gone"),
            GameEvent::DayChanged { current, .. } => println!("\n== Day {current} =="),
            GameEvent::CutscenePending { cutscene } => {
                println!("[plan] {cutscene} when you leave the house")
            }
            GameEvent::CutsceneStarted { cutscene } => println!("[outside] {cutscene}"),
            GameEvent::HighlightsUpdated { .. }
            | GameEvent::FollowUpDialogRequested { .. }
            | GameEvent::ConnectionDialogRequested { .. } => {}
        }
    }
}

/// Lists the options the player can pick right now, numbered from 1.
pub fn print_options(session: &GameSession) {
    let Some(node) = session.current_node() else {
        return;
    };
    for highlight in &node.highlights {
        let policy = session.config().condition_policy;
        for tooltip in highlight.visible_tooltips(session.world(), policy) {
            println!("  ({}: {})", highlight.word, tooltip.text);
        }
    }
    let options = session.available_options();
    if options.is_empty() {
        println!("  (no options, type 'end')");
    }
    for (index, option) in options {
        println!("  {}. {}", index + 1, option.text);
    }
}

pub fn print_current(session: &GameSession) {
    match (session.current_dialog(), session.current_node()) {
        (Some(dialog), Some(node)) => {
            println!("{}: {}", dialog.speaker, node.text);
            print_options(session);
        }
        _ => println!("Not in a dialog. Day {}.", session.day()),
    }
}

pub fn print_clues(session: &GameSession) {
    let world = session.world();
    let mut any = false;
    for clue in world.collected_clues() {
        any = true;
        println!("  {} {}: {}", clue.id, clue.title, clue.description);
    }
    if !any {
        println!("  (no clues yet)");
    }
    for connection in world.discovered_connections() {
        println!(
            "  [{} + {}] {}",
            connection.key.first(),
            connection.key.second(),
            connection.description
        );
    }
}

pub fn print_suspects(session: &GameSession) {
    let world = session.world();
    let mut any = false;
    for suspect in world.revealed_suspects() {
        any = true;
        println!("  {} {} ({})", suspect.id, suspect.name, suspect.stage);
    }
    if !any {
        println!("  (nobody yet)");
    }
}
