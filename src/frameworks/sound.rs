use crate::domain::ports::SoundEffect;
use std::io::Write;

// Terminal stand-in for the shot sound: rings the bell on stderr.
pub struct TerminalBell;

impl SoundEffect for TerminalBell {
    fn play_shot(&self) {
        let mut err = std::io::stderr();
        let _ = err.write_all(b"\x07");
        let _ = err.flush();
    }
}
