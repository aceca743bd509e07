use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use cops_and_robber_core::{AiMode, CellIndex, CopId, Event, GameConfig, Phase};
use cops_and_robber_session::Session;

#[test]
fn deterministic_replay_produces_identical_games() {
    for mode in [AiMode::Random, AiMode::Smart] {
        let first = replay(mode, 0x5eed);
        let second = replay(mode, 0x5eed);

        assert_eq!(first, second, "{mode:?} replay diverged between runs");
        assert_eq!(
            first.fingerprint(),
            second.fingerprint(),
            "{mode:?} fingerprint mismatch"
        );
    }
}

#[test]
fn replay_log_is_ordered_per_round() {
    let outcome = replay(AiMode::Random, 7);
    let rounds: Vec<u32> = outcome
        .events
        .iter()
        .filter_map(|event| match event {
            Event::RoundCompleted { round } => Some(*round),
            _ => None,
        })
        .collect();

    assert_eq!(rounds, (1..=rounds.len() as u32).collect::<Vec<_>>());
    assert!(
        outcome
            .events
            .iter()
            .filter(|event| matches!(event, Event::RobberTurnStarted { .. }))
            .count()
            == outcome
                .events
                .iter()
                .filter(|event| matches!(event, Event::RobberMoved { .. }))
                .count(),
        "every robber turn must resolve with exactly one move"
    );
}

fn replay(mode: AiMode, seed: u64) -> ReplayOutcome {
    let mut session = Session::new(GameConfig {
        rows: 6,
        columns: 6,
        initial_cops: [CellIndex::new(0), CellIndex::new(5)],
        initial_robber: CellIndex::new(21),
        max_rounds: 4,
        capture_ends_game: false,
        ai_mode: mode,
        seed,
        ..GameConfig::default()
    })
    .expect("config is valid");

    for round in 0..6 {
        let cop = CopId::ALL[round % 2];
        session.on_select_cop(cop);
        if let Some(destination) = session.selectable_cells().last().copied() {
            session.on_select_cell(destination);
        }
        session.on_finish_turn();
        session.on_finish_turn();
    }

    ReplayOutcome {
        cops: CopId::ALL.map(|cop| session.cop_cell(cop)),
        robber: session.robber_cell(),
        phase: session.phase(),
        rounds: session.round_count(),
        events: session.take_events(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    cops: [CellIndex; 2],
    robber: CellIndex,
    phase: Phase,
    rounds: u32,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
