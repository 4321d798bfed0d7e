//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for everything running on the logic (non-platform)
// thread.
//
// Responsibilities:
// - Own the input system, the game and the presenter
// - Receive platform events via the bounded channel
// - Step the game at a fixed tick rate (TPS) with a fixed dt
// - Hand each tick's snapshot and events to the presenter
//
// Notes:
// The orchestrator runs independently from the platform layer. The only
// shared state is the channel, so the game never needs locking.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod input;
pub mod math;
pub mod physics;
pub(crate) mod platform_bridge;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{info, trace};

//=== Internal Modules ====================================================

use crate::game::{Game, GameAction, Presenter};
use input::InputSystem;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================
//
// Owns the logic-thread systems until `spawn_core_thread` moves them onto
// the thread.
//
pub(crate) struct CoreSystemsOrchestrator {
    input: InputSystem<GameAction>,
    game: Game,
    presenter: Box<dyn Presenter>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        input: InputSystem<GameAction>,
        game: Game,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            input,
            game,
            presenter,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread that ticks at `tps`.
    //
    // Each tick:
    //  1. Collects platform events (exits on close or disconnect)
    //  2. Rebuilds the action state
    //  3. Steps the game by 1 / tps seconds
    //  4. Presents the snapshot and drained events
    //  5. Sleeps to maintain fixed pacing
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();

        thread::spawn(move || {
            let Self {
                mut input,
                mut game,
                mut presenter,
            } = self;
            let mut collector = EventCollector::new(receiver);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(
                        "Core thread exiting after {} frames ({} platform messages)",
                        game.frame(),
                        collector.received()
                    );
                    break;
                }

                //--- Step 2: Input -----------------------------------------
                input.process_frame(collector.batches());

                //--- Step 3: Simulation ------------------------------------
                game.step(dt, input.actions());

                //--- Step 4: Presentation ----------------------------------
                let events = game.drain_events();
                presenter.present(&game.snapshot(), &events);

                //--- Step 5: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    trace!("Frame {} overran by {:?}", game.frame(), elapsed - frame_duration);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::game::{
        default_bindings, AssetError, AssetLoader, CharacterId, GameConfig, GameEvent, Snapshot,
    };
    use crossbeam_channel::{bounded, Sender};

    /// Presenter that forwards what it sees back to the test thread.
    struct Probe {
        tx: Sender<(Snapshot, Vec<GameEvent>)>,
    }

    impl AssetLoader for Probe {
        fn load_image(&mut self, _name: &str, _path: &str) -> Result<(), AssetError> {
            Ok(())
        }
    }

    impl Presenter for Probe {
        fn present(&mut self, snapshot: &Snapshot, events: &[GameEvent]) {
            let _ = self.tx.send((snapshot.clone(), events.to_vec()));
        }
    }

    fn orchestrator(tx: Sender<(Snapshot, Vec<GameEvent>)>) -> CoreSystemsOrchestrator {
        let mut input = InputSystem::new();
        for (key, action) in default_bindings() {
            input.bind_key(key, action);
        }
        let game = Game::new(&GameConfig::default()).expect("valid config");
        CoreSystemsOrchestrator::new(input, game, Box::new(Probe { tx }))
    }

    #[test]
    fn thread_exits_on_window_closed() {
        let (probe_tx, _probe_rx) = bounded(1024);
        let (tx, rx) = bounded(16);

        let handle = orchestrator(probe_tx).spawn_core_thread(rx, 240.0);
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert!(handle.join().is_ok());
    }

    #[test]
    fn thread_exits_on_disconnect() {
        let (probe_tx, _probe_rx) = bounded(1024);
        let (tx, rx) = bounded::<PlatformEvent>(16);

        let handle = orchestrator(probe_tx).spawn_core_thread(rx, 240.0);
        drop(tx);

        assert!(handle.join().is_ok());
    }

    #[test]
    fn key_press_reaches_the_game() {
        let (probe_tx, probe_rx) = bounded(1024);
        let (tx, rx) = bounded(16);

        let handle = orchestrator(probe_tx).spawn_core_thread(rx, 240.0);
        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown { key: KeyCode::KeyS }]))
            .unwrap();

        let switched = probe_rx
            .iter()
            .take(200)
            .any(|(_, events)| events.contains(&GameEvent::Switched(CharacterId::Secondary)));

        tx.send(PlatformEvent::WindowClosed).unwrap();
        assert!(handle.join().is_ok());
        assert!(switched);
    }
}
