use rand::Rng;

/// Source of traversal order for the carver.
pub trait Shuffle {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Fisher–Yates over an owned random number generator.
pub struct RandomShuffle<R> {
    rng: R,
}

impl<R: Rng> RandomShuffle<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffle for RandomShuffle<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut counter = items.len();
        while counter > 0 {
            let index = self.rng.gen_range(0..counter);
            counter -= 1;
            items.swap(counter, index);
        }
    }
}
