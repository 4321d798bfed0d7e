//=========================================================================
// Platform Subsystem
//
// Owns the window and the winit event loop on the main thread, and ships
// keyboard input to the logic thread once per redraw.
//
// Data flow:
// ```text
//  winit KeyEvent / Focused ─► InputProcessor ─► InputBuffer
//                                                    │
//                         RedrawRequested (flush) ◄──┘
//                                   │
//                                   ▼
//            PlatformEvent::Inputs ──channel──► EventCollector (logic)
//            PlatformEvent::WindowClosed ──────►
// ```
//
// The logic thread ticks at its own rate; redraws only decide how input is
// grouped. Within one batch the OS order is kept, so a key tapped between
// two redraws still arrives as a down followed by an up.
//
// If the logic thread is gone the window keeps running so the user can
// still close it.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::event::InputEvent;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowSettings ======================================================

/// Fixed-size, non-resizable window matching the world rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSettings {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl WindowSettings {
    fn attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.title.clone())
            .with_resizable(false)
            .with_inner_size(LogicalSize::new(self.width, self.height))
    }
}

//=== Platform ============================================================

/// Main-thread half of the runtime. Not `Send`: winit requires the event
/// loop on the main thread on macOS and iOS.
pub(crate) struct Platform {
    /// Created in `resumed()`, not in `new()`.
    window: Option<Window>,
    settings: WindowSettings,
    input_processor: InputProcessor,
    buffer: InputBuffer,
    sender: Sender<PlatformEvent>,
}

impl Platform {
    pub(crate) fn new(sender: Sender<PlatformEvent>, settings: WindowSettings) -> Self {
        info!(
            target: "platform",
            "Platform ready for a {}x{} window", settings.width, settings.height
        );
        Self {
            window: None,
            settings,
            input_processor: InputProcessor::new(),
            buffer: InputBuffer::new(),
            sender,
        }
    }

    /// Blocks in the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the loop cannot be created or aborts.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        debug!(target: "platform", "Entering winit event loop");

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Input ------------------------------------------------------------

    fn buffer_event(&mut self, event: Option<InputEvent>) {
        if let Some(event) = event {
            self.buffer.push(event);
        }
    }

    /// Sends this redraw's input as one batch. Nothing is sent when no key
    /// changed.
    fn flush_input_buffer(&mut self) {
        let Some(batch) = self.buffer.drain() else {
            return;
        };
        let count = batch.len();

        trace!(target: "platform::input", "Sending {} input events", count);
        if self.sender.send(PlatformEvent::Inputs(batch)).is_err() {
            warn!(
                target: "platform::input",
                "Logic thread gone, {} input events discarded", count
            );
        }
    }

    /// Tells the logic thread to stop and leaves the event loop.
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        let _ = self.sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.settings.attributes()) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window '{}' created at {}x scale",
                    self.settings.title,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.shut_down(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shut_down(event_loop);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let event = self.input_processor.process_key_event(&event);
                self.buffer_event(event);
            }
            WindowEvent::Focused(focused) => {
                debug!(target: "platform::input", "Focused: {}", focused);
                let event = self.input_processor.process_focus(focused);
                self.buffer_event(event);
            }
            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::{unbounded, Receiver};

    fn platform() -> (Platform, Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        let settings = WindowSettings {
            title: "test".to_string(),
            width: 800,
            height: 600,
        };
        (Platform::new(tx, settings), rx)
    }

    fn down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx) = platform();
        assert!(platform.window.is_none());
    }

    #[test]
    fn nothing_is_sent_without_input() {
        let (mut platform, rx) = platform();

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn redraw_sends_one_batch_in_order() {
        let (mut platform, rx) = platform();

        platform.buffer_event(Some(down(KeyCode::KeyS)));
        platform.buffer_event(None);
        platform.buffer_event(Some(InputEvent::KeyUp { key: KeyCode::KeyS }));
        platform.flush_input_buffer();

        assert_eq!(
            rx.try_recv().ok(),
            Some(PlatformEvent::Inputs(vec![
                down(KeyCode::KeyS),
                InputEvent::KeyUp { key: KeyCode::KeyS },
            ]))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_survives_a_dead_logic_thread() {
        let (mut platform, rx) = platform();
        platform.buffer_event(Some(down(KeyCode::ArrowUp)));
        drop(rx);

        platform.flush_input_buffer();

        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn window_settings_fix_the_size() {
        let (platform, _rx) = platform();
        let attrs = platform.settings.attributes();

        assert!(!attrs.resizable);
        assert_eq!(attrs.title, "test");
    }
}
