#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

/// Submission status of a form flow.
///
/// `Submitting` lasts exactly as long as the single in-flight request; every
/// outcome returns the flow to `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowStatus {
    #[default]
    Idle,
    Submitting,
}

impl FlowStatus {
    pub fn is_submitting(self) -> bool {
        self == Self::Submitting
    }

    /// Move to `Submitting` unless a request is already in flight.
    /// Returns `false` when the submit must be ignored.
    pub fn try_begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = Self::Submitting;
        true
    }

    pub fn finish(&mut self) {
        *self = Self::Idle;
    }
}
