use super::CdclOracle;

impl CdclOracle {
    /// Undoes each assignment made after `level`, saving the phase of each variable and returning each to the decision heap.
    pub(super) fn backjump(&mut self, level: usize) {
        if self.decision_level() <= level {
            return;
        }

        let undone = self.trail.split_off(self.trail_limits[level]);
        for literal in undone {
            let var = literal.var();
            self.values[var] = None;
            self.reasons[var] = None;
            self.phases[var] = literal.polarity();
            self.activity.activate(var);
        }

        self.trail_limits.truncate(level);
        self.q_head = self.trail.len();
    }
}
