mod deck;
mod profiles;

use anyhow::Context;
use swipedeck_card::CardConfig;
use swipedeck_foundation::EventClock;

use deck::{Deck, Gesture};

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = CardConfig::default();
    config.validate().context("invalid card configuration")?;

    println!("=== SwipeDeck demo ===");
    println!("A scripted owner works through a deck of five profiles.");
    println!();

    let wall_clock = EventClock::new();
    let mut deck = Deck::new(config, profiles::sample_profiles());
    let script = [
        vec![Gesture::Wait(250), Gesture::SlowDrag(60.0), Gesture::Flick(320.0)],
        vec![Gesture::Tap, Gesture::Close, Gesture::Dislike],
        vec![Gesture::Tap, Gesture::SlowDrag(-400.0), Gesture::Tap, Gesture::SlowDrag(-450.0)],
        vec![Gesture::Like, Gesture::Dislike],
        vec![Gesture::Flick(-200.0)],
    ];

    for (round, gestures) in script.into_iter().enumerate() {
        println!("--- card {} ---", round + 1);
        deck.render()?;
        for gesture in gestures {
            deck.perform(gesture)?;
            if deck.is_empty() {
                break;
            }
            deck.render()?;
        }
        deck.settle();
    }

    anyhow::ensure!(deck.is_empty(), "script ended with cards left in the deck");

    println!();
    println!("liked:  {}", deck.liked().join(", "));
    println!("passed: {}", deck.passed().join(", "));
    println!("haptic pulses: {}", deck.haptics());
    println!(
        "simulated {} ms in {} ms of wall time",
        deck.now_millis(),
        wall_clock.uptime_millis()
    );
    Ok(())
}
