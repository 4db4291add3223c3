use super::{CdclOracle, Lit};

impl CdclOracle {
    /// A literal of the unvalued variable with the most activity, with the saved phase of the variable, if some variable is unvalued.
    ///
    /// Every unvalued variable is active on the heap, and so if none is found the valuation is complete.
    pub(super) fn decide(&mut self) -> Option<Lit> {
        while let Some(var) = self.activity.pop_max() {
            if self.values[var].is_none() {
                return Some(Lit::new(var, self.phases[var]));
            }
        }
        None
    }
}
