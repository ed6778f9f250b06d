use std::fmt::Write as _;
use std::path::Path;

use crate::config::RunConfig;
use crate::error::{LogweaveError, Result};
use crate::module::MetricValue;
use crate::report::AggregateReport;

/// The opaque rendering seam: assembled template tree in, document bytes out.
pub trait ReportRenderer {
    /// Render the final document.
    ///
    /// # Errors
    /// A missing or malformed template file is fatal to the run.
    fn render(
        &self,
        template_dir: &Path,
        base_file: &str,
        report: &AggregateReport,
        config: &RunConfig,
    ) -> Result<Vec<u8>>;
}

/// Built-in renderer producing a standalone HTML document.
///
/// Styles and scripts from the assembled template tree (including
/// module-staged assets) are inlined so the report is a single portable
/// file. The raw aggregate is embedded as a JSON payload for client-side
/// filtering.
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn load_base(template_dir: &Path, base_file: &str) -> Result<String> {
        let path = template_dir.join(base_file);
        std::fs::read_to_string(&path).map_err(|e| {
            LogweaveError::Render(format!("cannot load template file {}: {e}", path.display()))
        })
    }

    /// Concatenate every template file with the given extension, sorted by
    /// path so the inlined order is reproducible.
    fn inline_assets(template_dir: &Path, extension: &str) -> String {
        let mut paths: Vec<_> = walkdir::WalkDir::new(template_dir)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(extension))
            .collect();
        paths.sort();

        let mut combined = String::new();
        for path in paths {
            if let Ok(content) = std::fs::read_to_string(&path) {
                combined.push_str(&content);
                combined.push('\n');
            }
        }
        combined
    }

    fn write_summary(output: &mut String, report: &AggregateReport) {
        output.push_str("        <div class=\"summary-grid\">\n");
        let samples = report.general_stats.sample_count();
        let modules = report.modules.len();
        let failed = report.failed_modules.len();

        writeln!(
            output,
            r#"            <div class="summary-card">
                <span class="value">{samples}</span>
                <span class="label">Samples</span>
            </div>"#
        )
        .ok();
        writeln!(
            output,
            r#"            <div class="summary-card">
                <span class="value">{modules}</span>
                <span class="label">Modules</span>
            </div>"#
        )
        .ok();
        if failed > 0 {
            writeln!(
                output,
                r#"            <div class="summary-card failed">
                <span class="value">{failed}</span>
                <span class="label">Failed Modules</span>
            </div>"#
            )
            .ok();
        }
        output.push_str("        </div>\n");
    }

    fn write_failed_modules(output: &mut String, report: &AggregateReport) {
        if report.failed_modules.is_empty() {
            return;
        }
        let names = report
            .failed_modules
            .iter()
            .map(|m| html_escape(m))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            output,
            r#"        <div class="failed-modules"><strong>Failed modules:</strong> {names} &mdash; their results are missing from this report.</div>"#
        )
        .ok();
    }

    fn write_general_stats(output: &mut String, report: &AggregateReport) {
        let table = &report.general_stats;
        output.push_str("        <h2>General Statistics</h2>\n");
        if table.is_empty() {
            output.push_str("        <p class=\"no-results\">No samples to display.</p>\n");
            return;
        }

        output.push_str("        <div class=\"filter-box\">\n");
        output.push_str(
            "            <input id=\"sample-filter\" type=\"text\" placeholder=\"Filter samples...\">\n",
        );
        output.push_str("        </div>\n");
        output.push_str("        <div class=\"table-container\">\n");
        output.push_str("        <table id=\"general-stats\">\n");
        output.push_str("            <thead>\n");

        // First header row groups columns by contributing module.
        output.push_str("                <tr>\n");
        output.push_str("                    <th rowspan=\"2\">Sample</th>\n");
        let mut i = 0;
        while i < table.columns.len() {
            let module = &table.columns[i].module;
            let span = table.columns[i..]
                .iter()
                .take_while(|c| &c.module == module)
                .count();
            writeln!(
                output,
                r#"                    <th class="module-group" colspan="{span}">{}</th>"#,
                html_escape(module)
            )
            .ok();
            i += span;
        }
        output.push_str("                </tr>\n");

        output.push_str("                <tr>\n");
        for column in &table.columns {
            writeln!(
                output,
                "                    <th>{}</th>",
                html_escape(&column.metric)
            )
            .ok();
        }
        output.push_str("                </tr>\n");
        output.push_str("            </thead>\n");
        output.push_str("            <tbody>\n");

        for (sample, row) in &table.rows {
            writeln!(
                output,
                r#"                <tr data-sample="{}">"#,
                html_escape(sample)
            )
            .ok();
            writeln!(
                output,
                r#"                    <td class="sample-name">{}</td>"#,
                html_escape(sample)
            )
            .ok();
            for column in &table.columns {
                match row.get(&column.key()) {
                    Some(value @ (MetricValue::Int(_) | MetricValue::Float(_))) => {
                        writeln!(output, r#"                    <td class="number">{value}</td>"#)
                            .ok();
                    }
                    Some(MetricValue::Text(text)) => {
                        writeln!(output, "                    <td>{}</td>", html_escape(text))
                            .ok();
                    }
                    None => output.push_str("                    <td></td>\n"),
                }
            }
            output.push_str("                </tr>\n");
        }

        output.push_str("            </tbody>\n");
        output.push_str("        </table>\n");
        output.push_str("        </div>\n");
    }

    fn write_data_sources(output: &mut String, report: &AggregateReport) {
        if report.data_sources.is_empty() {
            return;
        }
        output.push_str("        <h2>Data Sources</h2>\n");
        output.push_str("        <div class=\"table-container\">\n");
        output.push_str("        <table>\n");
        output.push_str("            <thead>\n");
        output.push_str("                <tr><th>Sample</th><th>Module</th><th>Source Files</th></tr>\n");
        output.push_str("            </thead>\n");
        output.push_str("            <tbody>\n");
        for (sample, modules) in &report.data_sources.samples {
            for (module, files) in modules {
                let file_list = files
                    .iter()
                    .map(|f| html_escape(&f.display().to_string()))
                    .collect::<Vec<_>>()
                    .join("<br>");
                writeln!(
                    output,
                    r#"                <tr><td class="sample-name">{}</td><td>{}</td><td class="file-path">{file_list}</td></tr>"#,
                    html_escape(sample),
                    html_escape(module)
                )
                .ok();
            }
        }
        output.push_str("            </tbody>\n");
        output.push_str("        </table>\n");
        output.push_str("        </div>\n");
    }

    fn write_payload(output: &mut String, report: &AggregateReport) -> Result<()> {
        let payload = serde_json::json!({
            "run_id": &report.run_id,
            "general_stats": &report.general_stats.rows,
            "data_sources": &report.data_sources,
        });
        // `</` would terminate the script block early inside a string value.
        let encoded = serde_json::to_string(&payload)?.replace("</", "<\\/");
        writeln!(
            output,
            r#"        <script type="application/json" id="logweave-data">{encoded}</script>"#
        )
        .ok();
        Ok(())
    }

    fn build_body(report: &AggregateReport) -> Result<String> {
        let mut body = String::new();
        Self::write_summary(&mut body, report);
        Self::write_failed_modules(&mut body, report);
        Self::write_general_stats(&mut body, report);
        Self::write_data_sources(&mut body, report);
        Self::write_payload(&mut body, report)?;
        Ok(body)
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render(
        &self,
        template_dir: &Path,
        base_file: &str,
        report: &AggregateReport,
        config: &RunConfig,
    ) -> Result<Vec<u8>> {
        let base = Self::load_base(template_dir, base_file)?;
        if !base.contains("{{ body }}") {
            return Err(LogweaveError::Render(format!(
                "template file {base_file} has no body slot"
            )));
        }

        let body = Self::build_body(report)?;
        let document = base
            .replace("{{ title }}", &html_escape(&config.title))
            .replace("{{ run_id }}", &html_escape(&report.run_id))
            .replace("{{ styles }}", &Self::inline_assets(template_dir, "css"))
            .replace("{{ scripts }}", &Self::inline_assets(template_dir, "js"))
            .replace("{{ body }}", &body);

        Ok(document.into_bytes())
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
