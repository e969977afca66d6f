// PetPal — Motion Sample Buffer
//
// Fixed-capacity rolling store of raw motion samples, backed by a
// `heapless::Deque` so the 5-second window lives in a fixed slab and sliding
// by one sample is O(1). Pushing into a full buffer evicts the oldest
// sample; the pipeline normally drains or clears before that happens.

use heapless::Deque;

use crate::config::SAMPLE_CAPACITY;
use crate::events::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Full,
    NotFull,
}

#[derive(Debug, Default)]
pub struct SampleBuffer {
    samples: Deque<Sample, SAMPLE_CAPACITY>,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self {
            samples: Deque::new(),
        }
    }

    /// Append a sample, evicting the oldest one if the buffer is already full.
    pub fn push(&mut self, sample: Sample) -> Fill {
        if self.samples.is_full() {
            self.samples.pop_front();
        }
        // Cannot fail: a slot was freed above if none was available.
        let _ = self.samples.push_back(sample);

        if self.samples.is_full() {
            Fill::Full
        } else {
            Fill::NotFull
        }
    }

    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop the oldest sample so the window slides by one.
    pub fn drain_oldest(&mut self) -> Option<Sample> {
        self.samples.pop_front()
    }

    /// Start collecting from scratch.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples in insertion order, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f32) -> Sample {
        Sample {
            time: t,
            ..Sample::default()
        }
    }

    #[test]
    fn fills_at_capacity() {
        let mut buffer = SampleBuffer::new();
        for i in 0..SAMPLE_CAPACITY - 1 {
            assert_eq!(buffer.push(sample(i as f32)), Fill::NotFull);
        }
        assert!(!buffer.is_full());
        assert_eq!(buffer.push(sample(49.0)), Fill::Full);
        assert!(buffer.is_full());
        assert_eq!(buffer.len(), SAMPLE_CAPACITY);
    }

    #[test]
    fn push_when_full_evicts_oldest() {
        let mut buffer = SampleBuffer::new();
        for i in 0..SAMPLE_CAPACITY + 2 {
            buffer.push(sample(i as f32));
        }

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), SAMPLE_CAPACITY);
        assert_eq!(snapshot[0].time, 2.0);
        assert_eq!(snapshot[SAMPLE_CAPACITY - 1].time, (SAMPLE_CAPACITY + 1) as f32);
    }

    #[test]
    fn drain_oldest_slides_window() {
        let mut buffer = SampleBuffer::new();
        for i in 0..SAMPLE_CAPACITY {
            buffer.push(sample(i as f32));
        }

        let dropped = buffer.drain_oldest().unwrap();
        assert_eq!(dropped.time, 0.0);
        assert!(!buffer.is_full());
        assert_eq!(buffer.push(sample(50.0)), Fill::Full);
        assert_eq!(buffer.snapshot()[0].time, 1.0);
    }

    #[test]
    fn clear_restarts_collection() {
        let mut buffer = SampleBuffer::new();
        for i in 0..10 {
            buffer.push(sample(i as f32));
        }
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.drain_oldest().is_none());
    }
}
