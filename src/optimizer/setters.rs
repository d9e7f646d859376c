use crate::data::GroupKey;
use crate::optimizer::ThresholdOptimizer;
use crate::scorer::Scorer;
use crate::solver::Constraint;

impl<S, K> ThresholdOptimizer<S, K>
where
    S: Scorer,
    K: GroupKey,
{
    // Set methods for parameters

    /// Set the constraint on the optimizer.
    /// * `constraint` - The fairness constraint to satisfy.
    pub fn set_constraint(mut self, constraint: Constraint) -> Self {
        self.cfg.constraint = constraint;
        self
    }

    /// Set the grid size on the optimizer.
    /// * `grid_size` - Number of ticks on the grid the curves are evaluated at. A larger
    ///   grid gets closer to the best solution at the cost of a longer search.
    pub fn set_grid_size(mut self, grid_size: usize) -> Self {
        self.cfg.grid_size = grid_size;
        self
    }

    /// Set flip on the optimizer.
    /// * `flip` - Allow flipping to negative weights if it improves accuracy.
    pub fn set_flip(mut self, flip: bool) -> Self {
        self.cfg.flip = flip;
        self
    }

    /// Set prefit on the optimizer.
    /// * `prefit` - Whether the scorer is already trained, otherwise it is trained in `fit`.
    pub fn set_prefit(mut self, prefit: bool) -> Self {
        self.cfg.prefit = prefit;
        self
    }

    /// Set parallel on the optimizer.
    /// * `parallel` - Build the per group ROC curves in parallel.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }
}
