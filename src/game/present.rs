//=========================================================================
// Presentation
//=========================================================================
//
// The seam between the simulation and whatever draws it.
//
// Each tick the host hands the presenter a snapshot and the events raised
// during that tick. `LogPresenter` is the headless default: the opening HUD
// and later HUD changes go to `info!`, the debug overlay goes to `trace!`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, trace};

//=== Internal Dependencies ===============================================

use super::assets::{AssetError, AssetLoader};
use super::events::GameEvent;
use super::snapshot::Snapshot;

//=== Presenter ===========================================================

/// Receives every frame of the simulation.
///
/// Lives on the logic thread, hence `Send`.
pub trait Presenter: AssetLoader + Send {
    fn present(&mut self, snapshot: &Snapshot, events: &[GameEvent]);
}

//=== LogPresenter ========================================================

/// Presenter that narrates the game through the `log` facade.
#[derive(Debug, Default)]
pub struct LogPresenter {
    images: Vec<String>,
    frames: u64,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the images registered during preload.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl AssetLoader for LogPresenter {
    fn load_image(&mut self, name: &str, path: &str) -> Result<(), AssetError> {
        if path.is_empty() {
            return Err(AssetError::NotFound {
                name: name.to_string(),
                path: path.to_string(),
            });
        }
        trace!(target: "present", "Registered image '{}' ({})", name, path);
        self.images.push(name.to_string());
        Ok(())
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, snapshot: &Snapshot, events: &[GameEvent]) {
        self.frames += 1;
        if self.frames == 1 {
            for line in snapshot.hud_lines() {
                info!(target: "present", "{}", line);
            }
        }

        for event in events {
            match event {
                GameEvent::TreatCollected { score } => info!(target: "present", "Score: {}", score),
                GameEvent::LevelComplete => info!(target: "present", "Level Complete!"),
                GameEvent::HazardHit(id) => info!(target: "present", "{} got hit!", id.name()),
                GameEvent::DugUp(id) => info!(target: "present", "Something was dug up ({:?})", id),
                GameEvent::Switched(id) => {
                    info!(target: "present", "Active player switched to: {}", id.name())
                }
            }
        }

        trace!(target: "present", "[frame {}] {}", snapshot.frame, snapshot.debug_lines().join(" | "));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
