use crate::constants::{CHASE_TIMES, FRIGHTENED_DURATION, SCATTER_TIMES};
use crate::ghost::GhostMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    /// The global chase/scatter phase flipped to the given mode.
    PhaseChanged(GhostMode),
    FrightenedEnded,
}

/// Global chase/scatter clock plus the frightened window that pauses it.
///
/// Scatter phases take `SCATTER_TIMES[index]`. When a scatter phase ends the
/// following chase phase takes `CHASE_TIMES[index]` and `index` advances,
/// saturating at the last table entry.
#[derive(Debug, Clone)]
pub struct ModeTimeline {
    elapsed: f64,
    duration: f64,
    frightened_remaining: f64,
    chase_phase: bool,
    index: usize,
}

impl Default for ModeTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeTimeline {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            duration: SCATTER_TIMES[0],
            frightened_remaining: 0.0,
            chase_phase: false,
            index: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current global mode, `Chase` or `Scatter`.
    pub fn mode(&self) -> GhostMode {
        if self.chase_phase {
            GhostMode::Chase
        } else {
            GhostMode::Scatter
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase_duration(&self) -> f64 {
        self.duration
    }

    pub fn phase_elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn phase_remaining(&self) -> f64 {
        self.duration - self.elapsed
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened_remaining > 0.0
    }

    pub fn frightened_remaining(&self) -> f64 {
        self.frightened_remaining
    }

    /// Starts (or restarts) the frightened window.
    pub fn frighten(&mut self) {
        self.frightened_remaining = FRIGHTENED_DURATION;
    }

    pub fn tick(&mut self, dt: f64) -> Option<TimelineEvent> {
        if self.frightened_remaining > 0.0 {
            self.frightened_remaining -= dt;
            if self.frightened_remaining <= 0.0 {
                self.frightened_remaining = 0.0;
                return Some(TimelineEvent::FrightenedEnded);
            }
            return None;
        }

        self.elapsed += dt;
        if self.elapsed < self.duration {
            return None;
        }

        self.elapsed = 0.0;
        if self.chase_phase {
            self.chase_phase = false;
            self.duration = SCATTER_TIMES[self.index];
        } else {
            self.chase_phase = true;
            self.duration = CHASE_TIMES[self.index];
            self.index = (self.index + 1).min(SCATTER_TIMES.len() - 1);
        }
        Some(TimelineEvent::PhaseChanged(self.mode()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish_phase(timeline: &mut ModeTimeline) -> Option<TimelineEvent> {
        let remaining = timeline.phase_remaining();
        timeline.tick(remaining)
    }

    #[test]
    fn starts_in_scatter() {
        let timeline = ModeTimeline::new();
        assert_eq!(timeline.mode(), GhostMode::Scatter);
        assert_eq!(timeline.index(), 0);
        assert_eq!(timeline.phase_remaining(), 7.0);
        assert!(!timeline.is_frightened());
    }

    #[test]
    fn phase_durations_follow_tables() {
        let mut timeline = ModeTimeline::new();
        let mut scatter = vec![timeline.phase_duration()];
        let mut chase = Vec::new();
        for _ in 0..12 {
            let event = finish_phase(&mut timeline);
            assert_eq!(event, Some(TimelineEvent::PhaseChanged(timeline.mode())));
            match timeline.mode() {
                GhostMode::Chase => chase.push(timeline.phase_duration()),
                _ => scatter.push(timeline.phase_duration()),
            }
        }
        assert_eq!(scatter, vec![7.0, 7.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
        assert_eq!(chase, vec![20.0, 20.0, 20.0, 999.0, 999.0, 999.0]);
    }

    #[test]
    fn index_saturates_after_scatter_phases() {
        let mut timeline = ModeTimeline::new();
        let mut completed_scatter = 0;
        while completed_scatter < 4 {
            if timeline.mode() == GhostMode::Scatter {
                completed_scatter += 1;
            }
            finish_phase(&mut timeline);
        }
        assert_eq!(timeline.index(), 3);
        assert_eq!(timeline.mode(), GhostMode::Chase);

        for _ in 0..3 {
            finish_phase(&mut timeline);
            assert_eq!(timeline.mode(), GhostMode::Scatter);
            assert_eq!(timeline.phase_duration(), 5.0);
            finish_phase(&mut timeline);
            assert_eq!(timeline.index(), 3);
        }
    }

    #[test]
    fn one_transition_per_tick() {
        let mut timeline = ModeTimeline::new();
        let event = timeline.tick(100.0);
        assert_eq!(event, Some(TimelineEvent::PhaseChanged(GhostMode::Chase)));
        assert_eq!(timeline.phase_elapsed(), 0.0);
        assert_eq!(timeline.phase_remaining(), 20.0);
    }

    #[test]
    fn frightened_window_freezes_phase_clock() {
        let mut timeline = ModeTimeline::new();
        timeline.tick(7.0);
        timeline.tick(17.0);
        assert_eq!(timeline.mode(), GhostMode::Chase);
        assert_eq!(timeline.phase_remaining(), 3.0);

        timeline.frighten();
        let mut ended = false;
        for _ in 0..16 {
            assert!(timeline.phase_remaining() >= 3.0);
            if timeline.tick(0.5) == Some(TimelineEvent::FrightenedEnded) {
                ended = true;
            }
        }
        assert!(ended);
        assert!(!timeline.is_frightened());
        assert_eq!(timeline.phase_remaining(), 3.0);
        assert_eq!(timeline.mode(), GhostMode::Chase);

        timeline.tick(1.0);
        assert_eq!(timeline.phase_remaining(), 2.0);
    }

    #[test]
    fn retrigger_restarts_window() {
        let mut timeline = ModeTimeline::new();
        timeline.frighten();
        timeline.tick(6.0);
        timeline.frighten();
        assert_eq!(timeline.frightened_remaining(), 8.0);
        assert_eq!(timeline.tick(7.9), None);
        assert_eq!(timeline.phase_elapsed(), 0.0);
    }

    #[test]
    fn reset_returns_to_first_scatter() {
        let mut timeline = ModeTimeline::new();
        for _ in 0..5 {
            finish_phase(&mut timeline);
        }
        timeline.frighten();
        timeline.reset();
        assert_eq!(timeline.mode(), GhostMode::Scatter);
        assert_eq!(timeline.index(), 0);
        assert_eq!(timeline.phase_remaining(), 7.0);
        assert!(!timeline.is_frightened());
    }
}
