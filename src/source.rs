// Reading sources — where each render cycle gets its glucose value from.
// The random source stands in for a device feed; a real feed only has to
// implement `ReadingSource`.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SourceError;
use crate::types::GlucoseLevel;

/// Capability to produce the next glucose reading.
pub trait ReadingSource {
    fn next_reading(&mut self) -> Result<GlucoseLevel, SourceError>;
}

/// Uniform integer readings in the half-open range `[min, max)`.
pub struct RandomReadingSource<R: Rng> {
    rng: R,
    min: i64,
    max: i64,
}

impl<R: Rng> RandomReadingSource<R> {
    pub fn new(rng: R, (min, max): (i64, i64)) -> Result<Self, SourceError> {
        if min >= max {
            return Err(SourceError::InvalidRange { min, max });
        }
        Ok(Self { rng, min, max })
    }
}

impl RandomReadingSource<StdRng> {
    pub fn seeded(seed: u64, range: (i64, i64)) -> Result<Self, SourceError> {
        Self::new(StdRng::seed_from_u64(seed), range)
    }
}

impl<R: Rng> ReadingSource for RandomReadingSource<R> {
    fn next_reading(&mut self) -> Result<GlucoseLevel, SourceError> {
        Ok(self.rng.gen_range(self.min..self.max) as GlucoseLevel)
    }
}

/// Replays a fixed list of readings, then reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct ScriptedReadingSource {
    readings: VecDeque<GlucoseLevel>,
}

impl ScriptedReadingSource {
    pub fn new(readings: impl IntoIterator<Item = GlucoseLevel>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl ReadingSource for ScriptedReadingSource {
    fn next_reading(&mut self) -> Result<GlucoseLevel, SourceError> {
        self.readings.pop_front().ok_or(SourceError::Exhausted)
    }
}

/// Pull `count` readings from a source.
pub fn take_readings(
    source: &mut dyn ReadingSource,
    count: usize,
) -> Result<Vec<GlucoseLevel>, SourceError> {
    (0..count).map(|_| source.next_reading()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn test_random_source_stays_in_range() {
        let mut source = RandomReadingSource::seeded(7, LIVE_READING_RANGE).unwrap();
        for _ in 0..1000 {
            let r = source.next_reading().unwrap();
            assert!((70.0..150.0).contains(&r), "reading {} out of range", r);
            assert_eq!(r.fract(), 0.0);
        }
    }

    #[test]
    fn test_random_source_is_reproducible() {
        let mut a = RandomReadingSource::seeded(42, TREND_READING_RANGE).unwrap();
        let mut b = RandomReadingSource::seeded(42, TREND_READING_RANGE).unwrap();
        assert_eq!(take_readings(&mut a, 30).unwrap(), take_readings(&mut b, 30).unwrap());
    }

    #[test]
    fn test_random_source_rejects_empty_range() {
        assert_eq!(
            RandomReadingSource::seeded(1, (150, 70)).err(),
            Some(SourceError::InvalidRange { min: 150, max: 70 })
        );
        assert!(RandomReadingSource::seeded(1, (100, 100)).is_err());
    }

    #[test]
    fn test_scripted_source_exhausts() {
        let mut source = ScriptedReadingSource::new([120.0, 75.0]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_reading(), Ok(120.0));
        assert_eq!(source.next_reading(), Ok(75.0));
        assert_eq!(source.next_reading(), Err(SourceError::Exhausted));
        assert_eq!(
            take_readings(&mut ScriptedReadingSource::new([1.0]), 2),
            Err(SourceError::Exhausted)
        );
    }
}
