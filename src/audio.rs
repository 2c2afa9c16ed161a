//! Sound cues. The game only emits events; sinks decide what they sound like.

use std::io::{self, Write};

use log::trace;

use crate::game::GameEvent;

pub trait AudioSink {
    fn play(&mut self, event: GameEvent);
}

/// Rings the terminal bell for the loud cues. Pellets stay quiet.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, event: GameEvent) {
        trace!("cue {:?}", event);
        if event == GameEvent::PelletEaten {
            return;
        }
        // A failed bell is not worth interrupting the game for.
        let _ = self.out.write_all(b"\x07").and_then(|()| self.out.flush());
    }
}
