//! MIDI output for the air piano.
//!
//! Everything runs on the frame loop's thread: a key press sends note-on
//! immediately, and the previous note is released first so only one note
//! rings at a time.

// ════════════════════════════════════════════════════════════════════════════
// MidiOut: abstraction over midir / null (for testing)
// ════════════════════════════════════════════════════════════════════════════

pub trait MidiOut {
    fn program_change(&mut self, channel: u8, program: u8);
    fn note_on(&mut self,  channel: u8, note: u8, velocity: u8);
    fn note_off(&mut self, channel: u8, note: u8);
}

// ── midir backend ─────────────────────────────────────────────────────────

pub struct MidirOut {
    conn: midir::MidiOutputConnection,
}

impl MidirOut {
    fn send(&mut self, message: &[u8]) {
        report_send(message, self.conn.send(message));
    }
}

impl MidiOut for MidirOut {
    fn program_change(&mut self, channel: u8, program: u8) {
        self.send(&[0xC0 | (channel & 0x0F), program & 0x7F]);
    }
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        self.send(&[0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F]);
    }
    fn note_off(&mut self, channel: u8, note: u8) {
        self.send(&[0x80 | (channel & 0x0F), note & 0x7F, 0]);
    }
}

/// Log a failed send; true when the message went out.
fn report_send<E: std::fmt::Display>(message: &[u8], result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("MIDI send {:02X?} failed: {}", message, e);
            false
        }
    }
}

// ── null backend (used when no MIDI port is available) ────────────────────

pub struct NullOut;
impl MidiOut for NullOut {
    fn program_change(&mut self, _ch: u8, _p: u8)   {}
    fn note_on(&mut self, _ch: u8, _n: u8, _v: u8)  {}
    fn note_off(&mut self, _ch: u8, _n: u8)          {}
}

// ════════════════════════════════════════════════════════════════════════════
// open_midi_output: enumerate ports and pick first available
// ════════════════════════════════════════════════════════════════════════════

/// Try to open a MIDI output port, preferring a software synthesiser.
/// Falls back to `NullOut` with a warning if none found.
pub fn open_midi_output() -> Box<dyn MidiOut> {
    let midi_out = match midir::MidiOutput::new("hand_demos") {
        Ok(m)  => m,
        Err(e) => {
            log::warn!("MIDI init error: {}; piano will be silent", e);
            return Box::new(NullOut);
        }
    };

    let ports = midi_out.ports();
    if ports.is_empty() {
        log::warn!("no MIDI output ports found; piano will be silent");
        log::info!("start a synthesiser such as `timidity -iA` or `fluidsynth` to hear notes");
        return Box::new(NullOut);
    }

    // Prefer a softsynth if visible
    let port_idx = ports.iter()
        .position(|p| {
            midi_out.port_name(p).map(|n| {
                let n = n.to_lowercase();
                n.contains("fluid") || n.contains("timidity") ||
                n.contains("microsoft") || n.contains("gm") ||
                n.contains("synth")
            }).unwrap_or(false)
        })
        .unwrap_or(0);

    let port = &ports[port_idx];
    let name = midi_out.port_name(port)
        .unwrap_or_else(|_| "Unknown".to_string());
    log::info!("opening MIDI port: {}", name);

    match midi_out.connect(port, "hand-demos-piano") {
        Ok(conn) => Box::new(MidirOut { conn }),
        Err(e) => {
            log::warn!("failed to connect to {}: {}; piano will be silent", name, e);
            Box::new(NullOut)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NotePlayer
// ════════════════════════════════════════════════════════════════════════════

pub struct NotePlayer {
    out:      Box<dyn MidiOut>,
    channel:  u8,
    velocity: u8,
    sounding: Option<u8>,
}

impl NotePlayer {
    pub fn new(mut out: Box<dyn MidiOut>, channel: u8, instrument: u8, velocity: u8) -> Self {
        out.program_change(channel, instrument);
        NotePlayer { out, channel, velocity, sounding: None }
    }

    pub fn sounding(&self) -> Option<u8> { self.sounding }

    /// Release whatever is ringing and strike `note`.
    pub fn play(&mut self, note: u8) {
        self.silence();
        self.out.note_on(self.channel, note, self.velocity);
        self.sounding = Some(note);
    }

    pub fn silence(&mut self) {
        if let Some(n) = self.sounding.take() {
            self.out.note_off(self.channel, n);
        }
    }
}

impl Drop for NotePlayer {
    fn drop(&mut self) {
        self.silence();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
