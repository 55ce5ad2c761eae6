use env_logger::Env;
use log::info;
use pro_striker::{InputState, MatchCommand, MatchConfig, MatchEngine, MatchEvent, MatchState};
use std::env;

/// Headless runner: plays a full AI-vs-AI match to completion and logs the
/// notable events. Mostly useful for soak-testing determinism from the shell:
/// two runs with the same SEED must print identical goal sequences.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let seed = env::var("SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);

    let config = MatchConfig {
        seed,
        ..MatchConfig::default()
    };

    let mut engine = MatchEngine::new(config)?;
    engine.apply(MatchCommand::Start);

    let input = InputState::new();
    let mut ticks = 0u64;

    while engine.state.current() != MatchState::GameOver {
        for event in engine.tick(&input) {
            match event {
                MatchEvent::GoalScored(team) => {
                    let snapshot = engine.snapshot();
                    info!(
                        "goal for {:?}, score {} - {}",
                        team, snapshot.score.home, snapshot.score.away
                    );
                }
                MatchEvent::Whistle(kind) => info!("whistle: {:?}", kind),
                MatchEvent::KickPerformed => {}
            }
        }

        ticks += 1;
    }

    let snapshot = engine.snapshot();
    info!(
        "full time after {} ticks: {} - {}",
        ticks, snapshot.score.home, snapshot.score.away
    );

    Ok(())
}
