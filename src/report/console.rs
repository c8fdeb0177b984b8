use crate::report::report_model::ReplayReport;
use crate::script::script_model::Assertion;

/// Format a replay report for the terminal.
///
/// ```text
/// === Replay: forms/contact.yaml ===
///
/// ✓ PASS  number field round trip (6 steps, 3 assertions)
/// ✗ FAIL  radio group (4 steps, 2 assertions)
///     [FAIL] Step 3: Dirty — expected dirty=false, got true
///     changed: opt-group "Option A" -> "Option 2"
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &ReplayReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Replay: {} ===\n\n", report.suite_name));

    for result in &report.script_results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} assertions)\n",
            marker,
            result.script_name,
            result.steps_run,
            result.assertion_results.len()
        ));

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        if result.passed {
            continue;
        }

        for ar in result.assertion_results.iter().filter(|r| !r.passed) {
            let detail = ar.message.as_deref().unwrap_or("assertion failed");
            out.push_str(&format!(
                "    [FAIL] Step {}: {} \u{2014} {}\n",
                ar.step_index,
                assertion_name(&ar.assertion),
                detail
            ));
        }
        for change in &result.final_changes {
            out.push_str(&format!(
                "    changed: {} {} -> {}\n",
                change.element_id, change.original_value, change.new_value
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {}ms", ms));
    }

    out.push_str(" ===\n");
    out
}

fn assertion_name(assertion: &Assertion) -> &'static str {
    match assertion {
        Assertion::Dirty { .. } => "Dirty",
        Assertion::ChangedCount { .. } => "ChangedCount",
        Assertion::Changed { .. } => "Changed",
        Assertion::Value { .. } => "Value",
        Assertion::Checked { .. } => "Checked",
        Assertion::InputCount { .. } => "InputCount",
    }
}
