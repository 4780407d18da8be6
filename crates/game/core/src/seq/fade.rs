use super::SeqStatus;
use crate::events::GameEvent;

/// Screen-overlay fade timer.
///
/// The core only tracks timing so sequences know when the presentation fade
/// has finished; the actual overlay is drawn by the presentation layer in
/// response to the [`GameEvent::FadeRequested`] this emits. Fades run on
/// real time so they keep moving while the simulation clock is frozen.
#[derive(Clone, Debug)]
pub struct Fade {
    pub color: [f32; 3],
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

impl Fade {
    pub fn new(color: [f32; 3], from: f32, to: f32, duration: f32) -> Self {
        Self {
            color,
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Fade the overlay in (transparent to opaque).
    pub fn fade_out(color: [f32; 3], duration: f32) -> Self {
        Self::new(color, 0.0, 1.0, duration)
    }

    /// Fade the overlay away (opaque to transparent).
    pub fn fade_in(color: [f32; 3], duration: f32) -> Self {
        Self::new(color, 1.0, 0.0, duration)
    }

    /// The event asking presentation to run this fade.
    pub fn request_event(&self) -> GameEvent {
        GameEvent::FadeRequested {
            color: self.color,
            to_alpha: self.to,
            duration: self.duration,
        }
    }

    pub fn advance(&mut self, dt_real: f32) -> SeqStatus {
        self.elapsed = (self.elapsed + dt_real).min(self.duration);
        if self.is_done() {
            SeqStatus::Done
        } else {
            SeqStatus::Running
        }
    }

    /// Jumps to the end state.
    pub fn skip(&mut self) {
        self.elapsed = self.duration;
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current overlay alpha.
    pub fn alpha(&self) -> f32 {
        if self.duration <= f32::EPSILON {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_alpha_over_duration() {
        let mut fade = Fade::fade_out(BLACK, 2.0);
        assert_eq!(fade.alpha(), 0.0);

        fade.advance(1.0);
        assert!((fade.alpha() - 0.5).abs() < 1e-5);

        assert_eq!(fade.advance(1.0), SeqStatus::Done);
        assert_eq!(fade.alpha(), 1.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut fade = Fade::fade_in(BLACK, 0.0);
        assert!(fade.is_done());
        assert_eq!(fade.alpha(), 0.0);
        assert_eq!(fade.advance(0.0), SeqStatus::Done);
    }
}
