use std::fs;

use crawl_core::{InputJournal, Session, Status, WorldConfig, replay_to_end, summarize};

/// Records a session, writes its journal to disk, reads it back and replays.
#[test]
fn file_journal_replay_equivalence() {
    let dir = tempfile::tempdir().expect("temp dir");
    let journal_path = dir.path().join("session.json");
    let config = WorldConfig::default();

    let mut live = Session::new(config.clone()).expect("default config is valid");
    live.feed_all("N31337S").expect("generation succeeds");
    for key in "DDDWWWAAASSS....".chars().cycle().take(400) {
        if live.is_over() {
            break;
        }
        live.feed(key).expect("play keys never fail");
    }

    fs::write(&journal_path, live.journal().to_json().expect("journal serializes"))
        .expect("journal written");
    let restored = InputJournal::from_json(
        &fs::read_to_string(&journal_path).expect("journal readable"),
    )
    .expect("journal parses");

    assert_eq!(&restored, live.journal());
    assert_eq!(replay_to_end(&config, &restored).expect("replay succeeds"), summarize(&live));
}

#[test]
fn replay_stops_at_the_first_terminal_state() {
    let config = WorldConfig::default();
    let mut live = Session::new(config.clone()).expect("default config is valid");
    live.feed_all(&format!("N9S{}", ".".repeat(500))).expect("generation succeeds");

    let result = replay_to_end(&config, live.journal()).expect("replay succeeds");
    assert_eq!(result.final_status, live.status());
    if live.status() == Status::Lose {
        assert!(result.ticks < 500);
        assert!(live.journal().len() < "N9S".len() + 500);
    }
}

#[test]
fn journals_from_a_different_config_diverge() {
    let journal = InputJournal::from_inputs("N4S");
    let wide = WorldConfig::with_dimensions(80, 43);
    let default = replay_to_end(&WorldConfig::default(), &journal).expect("replay succeeds");
    let other = replay_to_end(&wide, &journal).expect("replay succeeds");
    assert_ne!(default.final_snapshot_hash, other.final_snapshot_hash);
}
