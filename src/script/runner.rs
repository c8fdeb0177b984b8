use std::sync::Arc;

use crate::{
    dom::{
        document::Document,
        dom_model::NodeId,
        event::{DomEvent, EventListener},
    },
    script::{
        context::ScriptContext,
        error::ScriptError,
        script_model::{Assertion, AssertionResult, Script, ScriptResult, Step},
    },
    trace::logger::TraceLogger,
    tracker::{changed::ChangedElement, tracker::ChangeTracker},
};

/// Replays a `Script` against a document with a fresh `ChangeTracker`.
pub struct ScriptRunner;

impl ScriptRunner {
    /// Run every step in order. A step error stops the run and fails it;
    /// failed assertions are collected and the run continues.
    pub fn run(script: &Script, doc: &mut Document, tracer: Option<Arc<TraceLogger>>) -> ScriptResult {
        let mut tracker = match tracer {
            Some(t) => ChangeTracker::new().with_tracer(t),
            None => ChangeTracker::new(),
        };
        let mut ctx = ScriptContext::new();

        if let Some(root) = &script.root {
            if let Err(e) = tracker.initialize(doc, root) {
                return Self::finish(script, &tracker, ctx, 0, Some(format!("Failed to initialize: {}", e)));
            }
        }

        for (i, step) in script.steps.iter().enumerate() {
            ctx.current_step = i;
            if let Err(e) = Self::execute_step(step, i, doc, &mut tracker, &mut ctx, script) {
                return Self::finish(script, &tracker, ctx, i + 1, Some(format!("Step {} failed: {}", i, e)));
            }
        }

        Self::finish(script, &tracker, ctx, script.steps.len(), None)
    }

    fn finish(
        script: &Script,
        tracker: &ChangeTracker,
        ctx: ScriptContext,
        steps_run: usize,
        error: Option<String>,
    ) -> ScriptResult {
        ScriptResult {
            script_name: script.name.clone(),
            passed: error.is_none() && ctx.all_passed(),
            steps_run,
            assertion_results: ctx.assertion_results,
            final_changes: tracker.changed_elements().into_vec(),
            error,
        }
    }

    fn execute_step(
        step: &Step,
        step_index: usize,
        doc: &mut Document,
        tracker: &mut ChangeTracker,
        ctx: &mut ScriptContext,
        script: &Script,
    ) -> Result<(), ScriptError> {
        match step {
            Step::Initialize { root } => {
                let root = root
                    .as_deref()
                    .or(script.root.as_deref())
                    .or(tracker.root_id())
                    .map(str::to_string)
                    .ok_or(ScriptError::TargetNotFound("<no root given>".into()))?;
                tracker.initialize(doc, &root)?;
                Ok(())
            }

            Step::Focus { target } => {
                let node = resolve_target(doc, target)?;
                fire(doc, DomEvent::focus(node), tracker);
                Ok(())
            }

            Step::SetValue { target, value } => {
                let node = resolve_target(doc, target)?;
                doc.set_value(node, value)?;
                Ok(())
            }

            Step::SetChecked { target, checked } => {
                let node = resolve_target(doc, target)?;
                doc.set_checked(node, *checked)?;
                Ok(())
            }

            Step::Select { target, label } => {
                let node = resolve_target(doc, target)?;
                select_by_label(doc, node, target, label)
            }

            Step::Commit { target } => {
                let node = resolve_target(doc, target)?;
                fire(doc, DomEvent::change(node), tracker);
                Ok(())
            }

            Step::Edit { target, value } => {
                let node = resolve_target(doc, target)?;
                fire(doc, DomEvent::focus(node), tracker);
                doc.set_value(node, value)?;
                fire(doc, DomEvent::change(node), tracker);
                Ok(())
            }

            Step::Toggle { target, checked } => {
                let node = resolve_target(doc, target)?;
                fire(doc, DomEvent::focus(node), tracker);
                doc.set_checked(node, *checked)?;
                fire(doc, DomEvent::change(node), tracker);
                Ok(())
            }

            Step::Reset => {
                tracker.reset(doc)?;
                Ok(())
            }

            Step::Assert { assertions } => {
                for assertion in assertions {
                    let result = evaluate_one(assertion, step_index, doc, tracker);
                    ctx.record(result);
                }
                Ok(())
            }
        }
    }
}

fn fire(doc: &Document, event: DomEvent, tracker: &mut ChangeTracker) {
    let listener: &mut dyn EventListener = tracker;
    doc.dispatch(&event, &mut [listener]);
}

/// Element by id, else the first element carrying the name.
pub fn resolve_target(doc: &Document, target: &str) -> Result<NodeId, ScriptError> {
    doc.element_by_id(target)
        .or_else(|| doc.elements_by_name(target).into_iter().next())
        .ok_or_else(|| ScriptError::TargetNotFound(target.to_string()))
}

fn select_by_label(doc: &mut Document, node: NodeId, target: &str, label: &str) -> Result<(), ScriptError> {
    let index = doc
        .control(node)
        .and_then(|c| c.options.iter().position(|o| o.label == label))
        .ok_or_else(|| ScriptError::OptionNotFound {
            target: target.to_string(),
            label: label.to_string(),
        })?;
    doc.select_option(node, Some(index))?;
    Ok(())
}

fn evaluate_one(
    assertion: &Assertion,
    step_index: usize,
    doc: &Document,
    tracker: &ChangeTracker,
) -> AssertionResult {
    let (passed, actual, message) = match assertion {
        Assertion::Dirty { expected } => {
            let dirty = tracker.is_dirty();
            (
                dirty == *expected,
                Some(dirty.to_string()),
                format!("expected dirty={}, got {}", expected, dirty),
            )
        }

        Assertion::ChangedCount { expected } => {
            let count = tracker.changed_elements().len();
            (
                count == *expected,
                Some(count.to_string()),
                format!("expected {} changed elements, got {}", expected, count),
            )
        }

        Assertion::Changed { entry } => match ChangedElement::try_from(entry.clone()) {
            Ok(expected) => {
                let changes = tracker.changed_elements();
                let found = changes.get(&expected.element_id).cloned();
                let passed = found.as_ref().map_or(false, |c| {
                    c.original_value.loosely_equals(&expected.original_value)
                        && c.new_value.loosely_equals(&expected.new_value)
                });
                let actual = found.map(|c| {
                    format!("{} -> {}", c.original_value, c.new_value)
                });
                (
                    passed,
                    actual,
                    format!(
                        "expected '{}' changed {} -> {}",
                        expected.element_id, expected.original_value, expected.new_value
                    ),
                )
            }
            Err(e) => (false, None, e.to_string()),
        },

        Assertion::Value { target, expected } => {
            let value = resolve_target(doc, target)
                .ok()
                .and_then(|n| doc.control(n))
                .map(|c| c.value.clone());
            (
                value.as_deref() == Some(expected.as_str()),
                value,
                format!("expected '{}' to hold '{}'", target, expected),
            )
        }

        Assertion::Checked { target, expected } => {
            let checked = resolve_target(doc, target)
                .ok()
                .and_then(|n| doc.control(n))
                .map(|c| c.checked);
            (
                checked == Some(*expected),
                checked.map(|c| c.to_string()),
                format!("expected '{}' checked={}", target, expected),
            )
        }

        Assertion::InputCount { expected } => match tracker.input_elements(doc) {
            Ok(inputs) => (
                inputs.len() == *expected,
                Some(inputs.len().to_string()),
                format!("expected {} input elements, got {}", expected, inputs.len()),
            ),
            Err(e) => (false, None, e.to_string()),
        },
    };

    AssertionResult {
        step_index,
        assertion: assertion.clone(),
        passed,
        actual,
        message: if passed { None } else { Some(message) },
    }
}

/// Load one script file.
pub fn load_script(path: &str) -> Result<Script, ScriptError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ScriptError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Load a single script file, or every `.yaml`/`.yml` script in a directory
/// sorted by name.
pub fn load_scripts(path: &str) -> Result<Vec<Script>, ScriptError> {
    let io_err = |source: std::io::Error| ScriptError::Io {
        path: path.to_string(),
        source,
    };
    let metadata = std::fs::metadata(path).map_err(io_err)?;
    if !metadata.is_dir() {
        return Ok(vec![load_script(path)?]);
    }

    let mut scripts = Vec::new();
    for entry in std::fs::read_dir(path).map_err(io_err)? {
        let p = entry.map_err(io_err)?.path();
        if p.extension().map_or(false, |e| e == "yaml" || e == "yml") {
            scripts.push(load_script(&p.to_string_lossy())?);
        }
    }
    scripts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(scripts)
}
