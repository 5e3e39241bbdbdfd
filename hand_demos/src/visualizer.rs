//! Software-rendered window using `minifb`.
//!
//! The visualizer owns the window and a [`Surface`] the size of the frame.
//! Each pass it turns the keyboard and mouse into [`Command`]s for the
//! feature and a [`SimInput`] for the simulated landmark source, then
//! presents whatever the feature drew.
//!
//! | Key | Meaning |
//! |---|---|
//! | `Esc` | quit |
//! | `C` | calibrate |
//! | `R` | reset |
//! | `M` | toggle mode |
//! | others | see [`crate::source`] |

use anyhow::{anyhow, Result};
use hand_geometry::Finger;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::config::WindowConfig;
use crate::session::Command;
use crate::source::{SimInput, SimKey};
use crate::surface::Surface;

pub const BG_COLOR: u32 = 0xFF1A1A2E;

/// Everything the window produced since the last frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub commands: Vec<Command>,
    pub sim:      SimInput,
}

const COMMAND_KEYS: [(Key, Command); 4] = [
    (Key::Escape, Command::Quit),
    (Key::C,      Command::Calibrate),
    (Key::R,      Command::Reset),
    (Key::M,      Command::ToggleMode),
];

const SIM_KEYS: [(Key, SimKey); 11] = [
    (Key::Key1, SimKey::ToggleFinger(Finger::Thumb)),
    (Key::Key2, SimKey::ToggleFinger(Finger::Index)),
    (Key::Key3, SimKey::ToggleFinger(Finger::Middle)),
    (Key::Key4, SimKey::ToggleFinger(Finger::Ring)),
    (Key::Key5, SimKey::ToggleFinger(Finger::Pinky)),
    (Key::F,    SimKey::CloseAll),
    (Key::O,    SimKey::OpenAll),
    (Key::P,    SimKey::Pinch),
    (Key::Up,   SimKey::Wider),
    (Key::Down, SimKey::Narrower),
    (Key::H,    SimKey::Hide),
];

pub struct Visualizer {
    window:  Window,
    surface: Surface,
}

impl Visualizer {
    pub fn new(title: &str, cfg: &WindowConfig) -> Result<Self> {
        let (w, h) = (cfg.width as usize, cfg.height as usize);
        let mut window = Window::new(
            title,
            w, h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| anyhow!("failed to open window: {}", e))?;

        #[allow(deprecated)]
        window.limit_update_rate(Some(cfg.frame_interval()));

        Ok(Visualizer {
            window,
            surface: Surface::new(w as i32, h as i32, BG_COLOR),
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn surface_mut(&mut self) -> &mut Surface { &mut self.surface }

    /// Poll keyboard and mouse (first press only, no repeat).
    pub fn poll(&self) -> FrameInput {
        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        let commands = COMMAND_KEYS.iter()
            .filter(|(k, _)| pressed(*k))
            .map(|&(_, c)| c)
            .collect();
        let keys = SIM_KEYS.iter()
            .filter(|(k, _)| pressed(*k))
            .map(|&(_, s)| s)
            .collect();
        let cursor = self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x as i32, y as i32));

        FrameInput { commands, sim: SimInput { cursor, keys } }
    }

    /// Push the surface to the screen and start the next frame on a clean
    /// background.
    pub fn present(&mut self) -> Result<()> {
        let (w, h) = (self.surface.width() as usize, self.surface.height() as usize);
        self.window
            .update_with_buffer(self.surface.pixels(), w, h)
            .map_err(|e| anyhow!("failed to update window: {}", e))?;
        self.surface.clear(BG_COLOR);
        Ok(())
    }
}
