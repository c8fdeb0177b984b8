use std::sync::Arc;

use crate::cli::config::ResolvedSettings;
use crate::dom::loader::load_form;
use crate::report::console::format_console_report;
use crate::report::json::format_json_report;
use crate::report::report_model::ReplayReport;
use crate::script::runner::{ScriptRunner, load_scripts};
use crate::trace::logger::TraceLogger;
use crate::tracker::tracker::ChangeTracker;

// ============================================================================
// inspect subcommand
// ============================================================================

/// Print every trackable control under the root as `identifier<TAB>kind`.
pub fn cmd_inspect(
    form_path: &str,
    settings: &ResolvedSettings,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_form(form_path)?;
    let mut tracker = ChangeTracker::new();
    if let Some(tracer) = build_tracer(settings) {
        tracker = tracker.with_tracer(tracer);
    }
    tracker.initialize(&doc, &settings.root)?;

    let inputs = tracker.input_elements(&doc)?;
    if verbose > 0 {
        eprintln!(
            "Found {} trackable controls under '{}'",
            inputs.len(),
            settings.root
        );
    }

    for (key, node) in &inputs {
        let kind = doc.control(*node).map(|c| c.kind.as_str()).unwrap_or("?");
        println!("{}\t{}", key, kind.to_ascii_lowercase());
    }
    Ok(())
}

// ============================================================================
// replay subcommand
// ============================================================================

/// Replay scripts against fresh copies of the form. Returns whether every
/// script passed.
pub fn cmd_replay(
    form_path: &str,
    script_path: &str,
    settings: &ResolvedSettings,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let form = load_form(form_path)?;
    let scripts = load_scripts(script_path)?;

    if scripts.is_empty() {
        eprintln!("No scripts found at: {}", script_path);
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!("Replaying {} scripts against {}...", scripts.len(), form_path);
    }

    let tracer = build_tracer(settings);
    let start = std::time::Instant::now();

    let mut results = Vec::with_capacity(scripts.len());
    for script in &scripts {
        if verbose > 0 {
            eprintln!("  Replaying: {}", script.name);
        }
        // Each script starts from the form as loaded
        let mut doc = form.clone();
        let mut script = script.clone();
        if script.root.is_none() {
            script.root = Some(settings.root.clone());
        }
        results.push(ScriptRunner::run(&script, &mut doc, tracer.clone()));
    }

    let report =
        ReplayReport::from_results(form_path, results).with_duration(start.elapsed().as_millis());
    let all_passed = report.all_passed();

    let output_content = match settings.format.as_str() {
        "json" => format_json_report(&report)?,
        _ => format_console_report(&report),
    };

    match &settings.output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

fn build_tracer(settings: &ResolvedSettings) -> Option<Arc<TraceLogger>> {
    settings
        .trace
        .as_deref()
        .map(|path| Arc::new(TraceLogger::new(path)))
}
