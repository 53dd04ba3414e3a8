/// A benchmark function optimised by the genetic algorithm.
///
/// The function must be defined, without discontinuities, over the whole interval
/// the representation encodes.
pub trait TestFunction: Send + Sync {
    /// Length of the input vector.
    fn input_dimension(&self) -> usize;

    fn evaluate(&self, x: &[f64]) -> f64;

    fn name(&self) -> &str {
        "test function"
    }
}

impl<F: TestFunction + ?Sized> TestFunction for &F {
    fn input_dimension(&self) -> usize {
        (**self).input_dimension()
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        (**self).evaluate(x)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
