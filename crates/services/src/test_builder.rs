use rand::Rng;

use prep_core::sampling::{self, TEST_SIZE};

/// How a question list is built from the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// The whole bank in its shipped order.
    Practice,
    /// A uniform random draw of `size` distinct questions.
    Random { size: usize },
}

impl TestMode {
    /// Random draw of the standard test size.
    #[must_use]
    pub fn random() -> Self {
        TestMode::Random { size: TEST_SIZE }
    }
}

#[must_use]
pub fn build_test<T, R>(bank: &[T], mode: TestMode, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    match mode {
        TestMode::Practice => bank.to_vec(),
        TestMode::Random { size } => sampling::sample(bank, size, rng),
    }
}
