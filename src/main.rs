//=========================================================================
// Twin Paws Binary
//=========================================================================
//
// Installs the log backend and runs the game.
//
// Log level is read from `RUST_LOG` (default `info`), e.g.
//   RUST_LOG=twin_paws=debug,present=info cargo run
//
//=========================================================================

use std::process::ExitCode;

use log::error;
use tracing_subscriber::EnvFilter;
use twin_paws::EngineBuilder;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match EngineBuilder::new().build() {
        Ok(engine) => {
            engine.run();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
