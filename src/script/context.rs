use crate::script::script_model::AssertionResult;

/// Execution state of a running script.
#[derive(Debug, Clone, Default)]
pub struct ScriptContext {
    /// Current step index (0-based)
    pub current_step: usize,

    pub assertion_results: Vec<AssertionResult>,
}

impl ScriptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: AssertionResult) {
        self.assertion_results.push(result);
    }

    pub fn all_passed(&self) -> bool {
        self.assertion_results.iter().all(|r| r.passed)
    }
}
