//! Frame loop glue
//!
//! One `frame` call per presented frame: read the clock, fold input, tick the
//! simulation once and forward collision cues.

use crate::audio::{Cue, CueSink};
use crate::frame::FrameView;
use crate::platform::{InputEvent, TimeSource, fold_events};
use crate::sim::{SimEvent, SimState, tick};

/// Whether the host loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Owns the session plus the clock and cue sink driving it
pub struct Runner<T: TimeSource, C: CueSink> {
    state: SimState,
    time: T,
    cues: C,
    frames: u64,
}

impl<T: TimeSource, C: CueSink> Runner<T, C> {
    pub fn new(state: SimState, time: T, cues: C) -> Self {
        Self {
            state,
            time,
            cues,
            frames: 0,
        }
    }

    /// Run one frame
    pub fn frame(&mut self, events: &[InputEvent]) -> LoopControl {
        let (input, quit) = fold_events(events);
        if quit {
            log::info!("Quit after {} frames", self.frames);
            return LoopControl::Exit;
        }

        let max_dt = self.state.settings.max_frame_dt;
        let mut dt = self.time.restart();
        if dt > max_dt {
            log::warn!("Frame took {:.3}s, clamping to {:.3}s", dt, max_dt);
            dt = max_dt;
        }

        tick(&mut self.state, &input, dt);
        self.frames += 1;

        // Time spent before a start/pause/resume must not reach the next tick
        if self.state.clock_reset {
            self.time.restart();
            self.state.clock_reset = false;
        }

        for event in self.state.drain_events() {
            match event {
                SimEvent::Collision(contact) => self.cues.play(Cue::for_contact(&contact)),
                SimEvent::EffectChanged(kind) => log::debug!("Effect -> {}", kind.label()),
                _ => {}
            }
        }

        LoopControl::Continue
    }

    pub fn view(&self) -> FrameView {
        FrameView::capture(&self.state)
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
