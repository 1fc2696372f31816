// One-shot reveal bookkeeping. A node transitions pending -> revealed at most
// once per activation; observation stops for that node as soon as it fires.

// Deep-link sweep band: anything whose top is within the upper fraction of the
// viewport on the first frame is revealed without waiting for the observer.
pub const FORCE_REVEAL_BAND: f64 = 0.85;

/// Tracks reveal state for an indexed list of tagged nodes.
#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    /// Mark node `i` revealed. Returns true only on the pending -> revealed
    /// transition so the caller can stop observing exactly once.
    pub fn mark(&mut self, i: usize) -> bool {
        match self.revealed.get_mut(i) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, i: usize) -> bool {
        self.revealed.get(i).copied().unwrap_or(false)
    }

    pub fn pending_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.revealed
            .iter()
            .enumerate()
            .filter(|(_, r)| !**r)
            .map(|(i, _)| i)
    }
}

/// Whether a node already sits far enough into the viewport that the first
/// frame should reveal it immediately (mid-page landings where the observer
/// may not fire promptly).
#[inline]
pub fn in_force_reveal_band(rect_top: f64, rect_bottom: f64, viewport_h: f64) -> bool {
    rect_bottom > 0.0 && rect_top < viewport_h * FORCE_REVEAL_BAND
}
