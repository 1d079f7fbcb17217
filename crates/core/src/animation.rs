//! Slide animation bookkeeping
//!
//! The board is committed before an animation starts; the animation only
//! describes how to draw the tiles that moved. Progress is a pure function of
//! the clock, so there is no timer to tick.

use crate::moves::{Anchors, Displacements};
use crate::types::{Displacement, Pos};

/// In-flight slide animation for one committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    displacements: Displacements,
    /// Merge partners that wait in place for a sliding tile
    anchors: Anchors,
    started_ms: u64,
    duration_ms: u32,
}

impl Animation {
    pub fn new(displacements: Displacements, started_ms: u64, duration_ms: u32) -> Self {
        Self {
            displacements,
            anchors: Anchors::new(),
            started_ms,
            duration_ms,
        }
    }

    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn displacements(&self) -> &[Displacement] {
        &self.displacements
    }

    pub fn anchors(&self) -> &[Pos] {
        &self.anchors
    }

    pub fn started_ms(&self) -> u64 {
        self.started_ms
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Linear progress in `[0, 1]`. A zero duration is always complete.
    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.started_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= self.duration_ms as u64
    }

    /// True if some sliding tile lands on `pos`.
    ///
    /// Renderers hide the committed tile there until the slide completes.
    pub fn is_destination(&self, pos: Pos) -> bool {
        self.displacements.iter().any(|d| d.destination == pos)
    }
}

/// Ease-out quadratic: fast start, soft landing.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Fractional (row, col) of a sliding tile at `progress`.
pub fn interpolate(d: &Displacement, progress: f32) -> (f32, f32) {
    let t = ease_out(progress);
    let lerp = |a: u8, b: u8| a as f32 + (b as f32 - a as f32) * t;
    (
        lerp(d.origin.row, d.destination.row),
        lerp(d.origin.col, d.destination.col),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide() -> Displacement {
        Displacement {
            origin: Pos::new(0, 3),
            destination: Pos::new(0, 0),
            value: 4,
        }
    }

    fn animation(start: u64, duration: u32) -> Animation {
        let mut ds = Displacements::new();
        ds.push(slide());
        Animation::new(ds, start, duration)
    }

    #[test]
    fn test_progress_is_clamped() {
        let a = animation(1000, 100);
        assert_eq!(a.progress(500), 0.0);
        assert_eq!(a.progress(1000), 0.0);
        assert!((a.progress(1050) - 0.5).abs() < 1e-6);
        assert_eq!(a.progress(1100), 1.0);
        assert_eq!(a.progress(5000), 1.0);
    }

    #[test]
    fn test_finished_at_duration() {
        let a = animation(0, 120);
        assert!(!a.is_finished(119));
        assert!(a.is_finished(120));
        assert!(animation(10, 0).is_finished(10));
        assert_eq!(animation(10, 0).progress(10), 1.0);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let d = slide();
        assert_eq!(interpolate(&d, 0.0), (0.0, 3.0));
        assert_eq!(interpolate(&d, 1.0), (0.0, 0.0));
        assert_eq!(interpolate(&d, 2.0), (0.0, 0.0));

        let (_, mid) = interpolate(&d, 0.5);
        // Eased: already past the linear midpoint.
        assert!(mid < 1.5 && mid > 0.0);
    }

    #[test]
    fn test_is_destination() {
        let a = animation(0, 100);
        assert!(a.is_destination(Pos::new(0, 0)));
        assert!(!a.is_destination(Pos::new(0, 3)));
        assert!(a.anchors().is_empty());

        let mut anchors = Anchors::new();
        anchors.push(Pos::new(0, 0));
        let a = a.with_anchors(anchors);
        assert_eq!(a.anchors(), &[Pos::new(0, 0)]);
    }
}
