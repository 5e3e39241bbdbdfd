//! Frame-to-frame smoothing: the stability filter and the rising-edge
//! trigger.

// ════════════════════════════════════════════════════════════════════════════
// StabilityFilter
// ════════════════════════════════════════════════════════════════════════════

/// What a [`StabilityFilter`] lets through this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reading<T> {
    /// The same label has been seen for at least the threshold frames.
    Stable(T),
    /// Still waiting for the label to settle.
    Detecting,
}

impl<T> Reading<T> {
    pub fn stable(self) -> Option<T> {
        match self {
            Reading::Stable(t) => Some(t),
            Reading::Detecting => None,
        }
    }
}

/// Hides single-frame classifier noise: a label is only reported once it
/// has repeated for `threshold` consecutive frames.
///
/// No averaging is done on the geometry underneath; this works on labels
/// alone.
#[derive(Clone, Debug)]
pub struct StabilityFilter<T> {
    last:      Option<T>,
    count:     u32,
    threshold: u32,
}

impl<T: Clone + PartialEq> StabilityFilter<T> {
    /// A threshold of 0 behaves like 1: every label is reported at once.
    pub fn new(threshold: u32) -> Self {
        StabilityFilter { last: None, count: 0, threshold: threshold.max(1) }
    }

    pub fn update(&mut self, candidate: T) -> Reading<T> {
        if self.last.as_ref() == Some(&candidate) {
            self.count = self.count.saturating_add(1);
        } else {
            self.last  = Some(candidate.clone());
            self.count = 1;
        }
        if self.count >= self.threshold {
            Reading::Stable(candidate)
        } else {
            Reading::Detecting
        }
    }

    /// Consecutive frames the current label has been seen.
    pub fn count(&self) -> u32 { self.count }

    pub fn threshold(&self) -> u32 { self.threshold }

    pub fn reset(&mut self) {
        self.last  = None;
        self.count = 0;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// EdgeTrigger
// ════════════════════════════════════════════════════════════════════════════

/// Fires once on each false → true transition of a condition, never while
/// it is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    active: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        EdgeTrigger::default()
    }

    /// Feed this frame's condition; true only on the rising edge.
    pub fn update(&mut self, condition: bool) -> bool {
        let fired = condition && !self.active;
        self.active = condition;
        fired
    }

    pub fn is_active(&self) -> bool { self.active }

    pub fn reset(&mut self) { self.active = false; }
}
