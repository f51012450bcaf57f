//! Zoom factor for the word cloud.

/// Default zoom step.
pub const DEFAULT_ZOOM_STEP: f64 = 0.1;

/// A positive zoom factor adjusted in fixed steps.
///
/// Zooming out never goes below one step, so the factor stays positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    factor: f64,
    step: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_STEP)
    }
}

impl Zoom {
    /// Creates a zoom at 1.0 with the given step.
    ///
    /// A non-finite or non-positive step falls back to
    /// [`DEFAULT_ZOOM_STEP`].
    pub fn new(step: f64) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            DEFAULT_ZOOM_STEP
        };
        Self { factor: 1.0, step }
    }

    /// Current factor.
    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Step size.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Increases the factor by one step.
    pub fn zoom_in(&mut self) {
        self.factor += self.step;
    }

    /// Decreases the factor by one step, stopping at the step itself.
    pub fn zoom_out(&mut self) {
        self.factor = (self.factor - self.step).max(self.step);
    }

    /// Back to 1.0.
    pub fn reset(&mut self) {
        self.factor = 1.0;
    }
}
