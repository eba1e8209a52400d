use std::collections::VecDeque;

use tracing::warn;

use crate::units::level_to_height;

/// Fixed-width rolling history of one metric, scaled to a shared display height.
///
/// The history always holds `capacity` entries: it starts as zeros with a single
/// full-height marker at the end, and every update pushes one value and evicts
/// the oldest. Values are stored in display space (`0..=display_height`), so the
/// chart can draw every buffer against the same y axis.
#[derive(Debug, Clone)]
pub struct ScrollingBuffer {
    capacity: usize,
    display_height: f64,
    max_value: f64,
    history: VecDeque<f64>,
    ingested: usize,
    rescales: usize,
}

impl ScrollingBuffer {
    pub fn new(capacity: usize, display_height: f64, max_value: f64) -> Self {
        let capacity = capacity.max(1);
        let mut history = VecDeque::with_capacity(capacity + 1);
        history.extend(std::iter::repeat(0.0).take(capacity - 1));
        history.push_back(display_height);

        Self {
            capacity,
            display_height,
            max_value,
            history,
            ingested: 0,
            rescales: 0,
        }
    }

    /// Push a raw sample. Returns true if the sample raised the ceiling.
    ///
    /// A sample above the current ceiling becomes the new ceiling and the
    /// retained history is rescaled against it. The rescale is applied to the
    /// stored display-space values, not to the raw samples.
    pub fn update(&mut self, value: f64) -> bool {
        let raised = value > self.max_value;
        if raised {
            warn!(
                value,
                max_value = self.max_value,
                "value larger than max value, rescaling"
            );
            self.max_value = value;
            for entry in self.history.iter_mut() {
                *entry = level_to_height(*entry, self.max_value, self.display_height);
            }
            self.rescales += 1;
        }

        let rescaled = level_to_height(value, self.max_value, self.display_height);
        self.history.push_back(rescaled);
        self.ingested += 1;

        while self.history.len() > self.capacity {
            self.history.pop_front();
        }

        raised
    }

    pub fn history(&self) -> &VecDeque<f64> {
        &self.history
    }

    /// Chart points: x is the slot index, y the display value.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.history
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.history.back().copied()
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn display_height(&self) -> f64 {
        self.display_height
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Number of samples pushed since construction.
    pub fn ingested(&self) -> usize {
        self.ingested
    }

    /// Number of history slots holding real samples rather than the seed.
    pub fn live_len(&self) -> usize {
        self.ingested.min(self.capacity)
    }

    /// Number of times the ceiling has been raised.
    pub fn rescales(&self) -> usize {
        self.rescales
    }
}
