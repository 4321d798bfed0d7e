//=========================================================================
// Platform Bridge
//=========================================================================
//
// The only contact point between the window thread and the logic thread.
//
// - `interface`: the messages that cross the channel and platform errors
// - `event_collector`: the logic-thread side that drains them each tick
//
// The game never sees winit types; the platform never sees the game.
//
//=========================================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
