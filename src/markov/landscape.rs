use crate::functions::OneMax;

/// A one-dimensional fitness landscape over decoded values, maximised.
pub trait Landscape: Send + Sync {
    /// The value of the global optimum.
    fn optimum(&self) -> f64;

    fn fitness(&self, x: f64) -> f64;
}

impl Landscape for OneMax {
    fn optimum(&self) -> f64 {
        self.target()
    }

    fn fitness(&self, x: f64) -> f64 {
        self.score(x)
    }
}

impl<L: Landscape + ?Sized> Landscape for &L {
    fn optimum(&self) -> f64 {
        (**self).optimum()
    }

    fn fitness(&self, x: f64) -> f64 {
        (**self).fitness(x)
    }
}
