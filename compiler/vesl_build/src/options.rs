//! Build-time options.

use vesl_ir::ForConditionPolicy;

/// Knobs for one [`BuildContext`](crate::BuildContext).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Condition chosen when a recorded for header has both a captured
    /// boolean constructor and a stacked condition.
    pub for_condition_policy: ForConditionPolicy,
    /// Turn unnamed, never-read declarations into temporaries at
    /// [`finish`](crate::BuildContext::finish).
    pub elide_dead_declarations: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            for_condition_policy: ForConditionPolicy::default(),
            elide_dead_declarations: true,
        }
    }
}

impl BuildOptions {
    #[must_use]
    pub fn with_for_condition_policy(mut self, policy: ForConditionPolicy) -> Self {
        self.for_condition_policy = policy;
        self
    }

    #[must_use]
    pub fn with_dead_declaration_elision(mut self, enabled: bool) -> Self {
        self.elide_dead_declarations = enabled;
        self
    }
}
