//=========================================================================
// Assets
//=========================================================================
//
// Image manifest and the loader contract used before the first frame.
//
// The simulation never touches assets. A presenter loads the manifest once
// through `preload` and fails fast on the first missing image.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info};

//=== Manifest ============================================================

/// Every image the level needs, as `(name, path)`.
pub const IMAGE_MANIFEST: [(&str, &str); 7] = [
    ("background", "assets/background.png"),
    ("deven", "assets/deven.png"),
    ("sami", "assets/sami.png"),
    ("platform", "assets/platform.png"),
    ("treat", "assets/treat.png"),
    ("ball", "assets/ball.png"),
    ("digSpot", "assets/digSpot.png"),
];

//=== AssetLoader =========================================================

/// Retrieves an image by name.
pub trait AssetLoader {
    fn load_image(&mut self, name: &str, path: &str) -> Result<(), AssetError>;
}

/// Loads the whole manifest, stopping at the first failure.
///
/// Returns the number of images loaded.
pub fn preload<L: AssetLoader + ?Sized>(loader: &mut L) -> Result<usize, AssetError> {
    for (name, path) in IMAGE_MANIFEST {
        loader.load_image(name, path)?;
        debug!("Loaded image '{}' from {}", name, path);
    }

    info!("Preloaded {} images", IMAGE_MANIFEST.len());
    Ok(IMAGE_MANIFEST.len())
}

//=== AssetError ==========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Nothing exists at the given path.
    NotFound { name: String, path: String },

    /// The file exists but could not be used.
    Unreadable { name: String, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name, path } => write!(f, "Image '{}' not found at {}", name, path),
            Self::Unreadable { name, reason } => {
                write!(f, "Image '{}' could not be loaded: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for AssetError {}

//=========================================================================
// Unit Tests
//=========================================================================
