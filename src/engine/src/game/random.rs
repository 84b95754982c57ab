use rand::Rng;

/// Source of uniform floats in `[0, 1)`.
///
/// Every `rand::Rng` already is one; tests can substitute a
/// [`SequenceSource`] to make draws predictable.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index called with empty range");
        let index = (self.next_unit() * len as f64) as usize;
        // A source returning exactly 1.0 would otherwise overflow the range
        index.min(len - 1)
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of floats, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    /// Values should lie in `[0, 1)`; anything at or above 1.0 is clamped to
    /// the last index by [`RandomSource::next_index`].
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceSource needs at least one value");
        Self { values, position: 0 }
    }

    /// Number of values handed out so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

// Not an `Rng`, so this does not overlap with the blanket impl.
impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
