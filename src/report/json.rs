use crate::report::report_model::ReplayReport;

/// Pretty-printed JSON form of a replay report.
pub fn format_json_report(report: &ReplayReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
