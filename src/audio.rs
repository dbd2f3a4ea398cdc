//! Collision cues
//!
//! The simulation never waits on sound. The run loop hands each resolved
//! contact to a `CueSink` and moves on; whatever backs the sink decides how
//! (or whether) to play it.

use crate::sim::{Contact, Surface};

/// Cue kinds, one per kind of surface struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Ball hits a field edge
    WallHit,
    /// Ball hits a flat obstacle face
    ObstacleHit,
    /// Ball clips an obstacle corner
    CornerHit,
}

impl Cue {
    pub fn for_contact(contact: &Contact) -> Self {
        match contact.surface {
            Surface::Boundary(_) => Cue::WallHit,
            Surface::Face { .. } => Cue::ObstacleHit,
            Surface::Corner { .. } => Cue::CornerHit,
        }
    }

    /// Base pitch a synthesizing backend should use
    pub fn pitch_hz(self) -> f32 {
        match self {
            Cue::WallHit => 400.0,
            Cue::ObstacleHit => 300.0,
            Cue::CornerHit => 600.0,
        }
    }
}

/// Fire-and-forget cue output
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Records cues in order; handy for headless runs and tests
impl CueSink for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}

/// Native backend without an audio device: cues go to the log
pub struct LogCues {
    master_volume: f32,
    muted: bool,
}

impl Default for LogCues {
    fn default() -> Self {
        Self::new()
    }
}

impl LogCues {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }
}

impl CueSink for LogCues {
    fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("cue {:?} at {} Hz, volume {:.2}", cue, cue.pitch_hz(), vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Corner, Side};

    fn contact(surface: Surface) -> Contact {
        Contact {
            surface,
            depth: 1.0,
            heading_in: 0.0,
            heading_out: 0.0,
        }
    }

    #[test]
    fn test_cue_for_contact() {
        assert_eq!(Cue::for_contact(&contact(Surface::Boundary(Side::Top))), Cue::WallHit);
        assert_eq!(
            Cue::for_contact(&contact(Surface::Face {
                obstacle: 0,
                side: Side::Left
            })),
            Cue::ObstacleHit
        );
        assert_eq!(
            Cue::for_contact(&contact(Surface::Corner {
                obstacle: 3,
                corner: Corner::BottomRight
            })),
            Cue::CornerHit
        );
    }

    #[test]
    fn test_vec_sink_records() {
        let mut sink: Vec<Cue> = Vec::new();
        sink.play(Cue::WallHit);
        sink.play(Cue::CornerHit);
        assert_eq!(sink, vec![Cue::WallHit, Cue::CornerHit]);
    }

    #[test]
    fn test_log_cues_volume() {
        let mut cues = LogCues::new();
        cues.set_master_volume(3.0);
        assert_eq!(cues.effective_volume(), 1.0);
        cues.set_muted(true);
        assert_eq!(cues.effective_volume(), 0.0);
        cues.play(Cue::WallHit);
    }
}
