//=========================================================================
// Twin Paws Engine
//
// Public entry point. `EngineBuilder` validates the level, binds the
// default keys and preloads images; `Engine::run` then owns the process
// until the window closes.
//
//   EngineBuilder::new()
//       .with_config(..) .with_presenter(..) .with_tps(..)
//       .build()?            -> Engine
//       .run()               -> returns on window close
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::bounded;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::input::InputSystem;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::CoreSystemsOrchestrator;
use crate::game::{
    default_bindings, preload, AssetError, ConfigError, Game, GameConfig, LogPresenter, Presenter,
};
use crate::platform::{Platform, WindowSettings};

const WINDOW_TITLE: &str = "Twin Paws";

//=== EngineError =========================================================

/// Reasons `EngineBuilder::build` can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The game configuration was rejected.
    Config(ConfigError),

    /// The presenter could not load the image manifest.
    Assets(AssetError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Invalid game configuration: {}", e),
            Self::Assets(e) => write!(f, "Asset preload failed: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Assets(e) => Some(e),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<AssetError> for EngineError {
    fn from(e: AssetError) -> Self {
        Self::Assets(e)
    }
}

//=== EngineBuilder =======================================================

/// Collects runtime settings, then [`EngineBuilder::build`] checks them.
///
/// Defaults: 60 ticks per second (each tick advances the game by 1/60 s),
/// a 128-message platform channel, the stock level, and a [`LogPresenter`].
///
/// ```no_run
/// use twin_paws::EngineBuilder;
///
/// let engine = EngineBuilder::new().with_tps(120.0).build()?;
/// engine.run();
/// # Ok::<(), twin_paws::EngineError>(())
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    config: GameConfig,
    presenter: Option<Box<dyn Presenter>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            config: GameConfig::default(),
            presenter: None,
        }
    }

    /// Logic ticks per second. The game's `dt` is `1 / tps`.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// How many platform messages may queue before the window thread
    /// blocks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Replaces the level constants. Validated in [`EngineBuilder::build`].
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the default [`LogPresenter`].
    pub fn with_presenter<P: Presenter + 'static>(mut self, presenter: P) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Builds the game, binds the default keys and preloads assets.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or an image cannot be loaded.
    pub fn build(self) -> Result<Engine, EngineError> {
        let game = Game::new(&self.config)?;

        let mut input = InputSystem::new();
        for (key, action) in default_bindings() {
            input.bind_key(key, action);
        }

        let mut presenter = self
            .presenter
            .unwrap_or_else(|| Box::new(LogPresenter::new()));
        preload(presenter.as_mut())?;

        let world_size = self.config.world_size;
        info!(
            "Level built: {} treats, {} platforms",
            game.world().active_collectible_count(),
            game.world().platforms().len()
        );

        Ok(Engine {
            orchestrator: CoreSystemsOrchestrator::new(input, game, presenter),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: WindowSettings {
                title: WINDOW_TITLE.to_string(),
                width: world_size.x as u32,
                height: world_size.y as u32,
            },
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// A built game plus its runtime settings. Create via [`EngineBuilder`].
///
/// ```text
/// main thread:   Platform (winit loop, window, keyboard)
///                   │ PlatformEvent over a bounded channel
///                   ▼
/// logic thread:  CoreSystemsOrchestrator: input → Game::step → Presenter
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
}

impl Engine {
    /// Runs the game until its window is closed. Blocks the calling thread,
    /// which must be the main thread.
    ///
    /// Platform failures and a panicked logic thread are logged; neither
    /// propagates out of `run`.
    pub fn run(self) {
        let Self {
            orchestrator,
            tps,
            channel_capacity,
            window,
        } = self;

        let (tx, rx) = bounded::<PlatformEvent>(channel_capacity);
        let logic = orchestrator.spawn_core_thread(rx, tps);
        info!("Logic thread running at {} TPS (channel: {})", tps, channel_capacity);

        // Returns once the window closes; `tx` drops with the platform.
        if let Err(e) = Platform::new(tx, window).run() {
            error!("Platform stopped with an error: {}", e);
        }

        match logic.join() {
            Ok(()) => info!("Twin Paws shut down"),
            Err(e) => error!("Logic thread panicked: {:?}", e),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{AssetLoader, GameEvent, Snapshot};

    struct FailingPresenter;

    impl AssetLoader for FailingPresenter {
        fn load_image(&mut self, name: &str, _path: &str) -> Result<(), AssetError> {
            Err(AssetError::Unreadable {
                name: name.to_string(),
                reason: "no decoder".to_string(),
            })
        }
    }

    impl Presenter for FailingPresenter {
        fn present(&mut self, _snapshot: &Snapshot, _events: &[GameEvent]) {}
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.config, GameConfig::default());
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .build()
            .expect("default setup builds");

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!((engine.window.width, engine.window.height), (800, 600));
        assert_eq!(engine.window.title, "Twin Paws");
    }

    #[test]
    fn build_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.gravity = f32::NAN;

        let result = EngineBuilder::new().with_config(config).build();

        assert!(matches!(result, Err(EngineError::Config(ConfigError::InvalidGravity(_)))));
    }

    #[test]
    fn build_surfaces_asset_failure() {
        let result = EngineBuilder::new().with_presenter(FailingPresenter).build();

        match result {
            Err(EngineError::Assets(e)) => assert!(e.to_string().contains("background")),
            Err(other) => panic!("Expected asset error, got {}", other),
            Ok(_) => panic!("Expected asset error"),
        }
    }
}
