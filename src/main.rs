//! Guardians of the Glow entry point
//!
//! The game itself is hosted by a browser shell that forwards touches and
//! draws the state. Natively this runs a scripted headless session, which is
//! handy for checking tuning changes.
//!
//! Settings can be supplied as JSON in `GLOW_SETTINGS`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use glow_guardians::Settings;
    use glow_guardians::feedback::{LogSink, cues_for, dispatch};
    use glow_guardians::sim::{ContactId, GameEvent, Session, SimRng};

    env_logger::init();
    log::info!("Guardians of the Glow (native) starting...");

    let settings = match std::env::var("GLOW_SETTINGS") {
        Ok(json) => Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring GLOW_SETTINGS: {}", e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    };

    let screen = Vec2::new(800.0, 600.0);
    let mut session = Session::from_settings(screen, &settings);
    let mut cue_rng = SimRng::new(settings.seed.unwrap_or(0) ^ 0x5eed);
    let mut sink = LogSink::default();

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 60 * 30;
    const PARENT: ContactId = ContactId(1000);

    session.start(0.0);

    let center = screen * 0.5;
    let mut absorbed = (0u32, 0u32);
    let mut tap_id = 0;

    for frame in 1..=FRAMES {
        let now = frame as f64 * FRAME_MS;
        let t = now as f32 / 1000.0;

        // Toddler: a quick tap every half second somewhere along the edge
        if frame % 30 == 0 {
            tap_id += 1;
            let angle = tap_id as f32 * 2.4;
            let pos = center + Vec2::new(angle.cos() * 300.0, angle.sin() * 220.0);
            session.contact_start(ContactId(tap_id), pos, now);
            session.contact_end(ContactId(tap_id));
        }

        // Parent: a finger circling the lantern, sweeping sparks inward
        let sweep = center + Vec2::new((t * 0.8).cos(), (t * 0.8).sin()) * 140.0;
        if frame == 1 {
            session.contact_start(PARENT, center + Vec2::new(140.0, 0.0), now);
        }
        session.contact_move(PARENT, sweep);

        for event in session.frame(now) {
            if let GameEvent::SparkAbsorbed { success, .. } = event {
                if *success {
                    absorbed.0 += 1;
                } else {
                    absorbed.1 += 1;
                }
            }
            let cues = cues_for(event, &settings, &mut cue_rng);
            dispatch(&mut sink, &cues);
        }
    }

    session.end();

    let state = session.state();
    log::info!(
        "Done: score {}, energy {:.1}, {} sparks alive, {} good / {} wrong absorptions, {} cues",
        state.score,
        state.lantern.energy,
        state.sparks.len(),
        absorbed.0,
        absorbed.1,
        sink.played
    );
    println!(
        "score={} energy={:.1} sparks={} good={} wrong={}",
        state.score,
        state.lantern.energy,
        state.sparks.len(),
        absorbed.0,
        absorbed.1
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives the library directly
}
