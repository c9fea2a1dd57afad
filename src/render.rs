use crate::classify::Classification;
use crate::config::Config;
use crate::input::LoadedReport;
use crate::report::CoverageEntry;
use crate::suggest::suggestions_for;

const RULE_WIDTH: usize = 70;

/// Limits applied when rendering the console summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub fix_limit: usize,
    pub skipped_limit: usize,
    pub error_preview: usize,
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            fix_limit: config.fix_limit,
            skipped_limit: config.skipped_limit,
            error_preview: config.error_preview,
        }
    }
}

/// Coverage verdict for a percentage: good at 80% and above, warning at 50%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageLevel {
    Good,
    Warning,
    Poor,
}

impl CoverageLevel {
    pub fn of(percent: f64) -> Self {
        if percent >= 80.0 {
            CoverageLevel::Good
        } else if percent >= 50.0 {
            CoverageLevel::Warning
        } else {
            CoverageLevel::Poor
        }
    }

    fn marker(self) -> &'static str {
        match self {
            CoverageLevel::Good => "✅",
            CoverageLevel::Warning => "⚠️",
            CoverageLevel::Poor => "❌",
        }
    }
}

/// Render the full console summary for a loaded report.
pub fn render_summary(
    loaded: &LoadedReport,
    classification: &Classification<'_>,
    opts: RenderOptions,
) -> String {
    let mut out = String::new();
    let results = &loaded.report.results;

    push_banner(&mut out, "📊 Test report analysis");
    out.push_str(&format!("Source: {}\n\n", loaded.source));

    out.push_str("📈 Summary:\n");
    out.push_str(&format!("   Total:     {}\n", results.total));
    out.push_str(&format!("   ✅ Passed:  {}\n", results.passed));
    out.push_str(&format!("   ❌ Failed:  {}\n", results.failed));
    out.push_str(&format!("   ⏭️  Skipped: {}\n", results.skipped));
    out.push_str(&format!("   Pass rate: {}%\n", results.pass_rate));
    out.push_str(&format!("   Duration:  {}s\n\n", results.duration));

    if classification.failed.is_empty() {
        out.push_str("✅ No failed tests!\n\n");
    } else {
        push_failures(&mut out, classification, opts);
        push_suggestions(&mut out, classification, opts);
    }

    push_skipped(&mut out, classification, opts);
    push_coverage(&mut out, loaded);

    out
}

fn push_banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    out.push_str(&format!("{rule}\n{title}\n{rule}\n"));
}

fn push_failures(out: &mut String, c: &Classification<'_>, opts: RenderOptions) {
    out.push_str(&format!("❌ {} failed test(s):\n\n", c.failed.len()));

    let mut index = 0;
    for group in &c.by_category {
        out.push_str(&format!(
            "   {} ({} failed):\n",
            group.label.to_uppercase(),
            group.tests.len()
        ));
        for test in &group.tests {
            index += 1;
            out.push_str(&format!("      {index}. {}\n", test.display_name()));
            if let Some(ref error) = test.error
                && !error.is_empty()
            {
                out.push_str(&format!(
                    "         error: {}\n",
                    preview(error, opts.error_preview)
                ));
            }
            if let Some(ref details) = test.details
                && !details.is_empty()
            {
                out.push_str(&format!(
                    "         details: {}\n",
                    preview(details, opts.error_preview)
                ));
            }
        }
    }
    out.push('\n');

    out.push_str("   By error type:\n");
    for group in &c.by_error_type {
        out.push_str(&format!(
            "      {}: {}\n",
            preview(&group.label, opts.error_preview),
            group.tests.len()
        ));
    }
    out.push('\n');
}

fn push_suggestions(out: &mut String, c: &Classification<'_>, opts: RenderOptions) {
    let targets = c.fix_targets(opts.fix_limit);
    push_banner(
        out,
        &format!(
            "🔧 Fix suggestions (first {} of {} failed)",
            targets.len(),
            c.failed.len()
        ),
    );
    out.push('\n');

    for (i, test) in targets.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} [{}]\n",
            i + 1,
            test.display_name(),
            test.category_label()
        ));
        if let Some(ref error) = test.error {
            out.push_str(&format!("   error: {error}\n"));
        }
        for suggestion in suggestions_for(test) {
            out.push_str(&format!(
                "\n   💡 {}: {}\n",
                suggestion.title, suggestion.description
            ));
            for line in suggestion.code.lines() {
                out.push_str(&format!("      {line}\n"));
            }
        }
        out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
    }
    out.push('\n');
}

fn push_skipped(out: &mut String, c: &Classification<'_>, opts: RenderOptions) {
    if c.skipped.is_empty() {
        return;
    }
    out.push_str(&format!("⏭️  Skipped tests ({}):\n", c.skipped.len()));
    for test in c.skipped.iter().take(opts.skipped_limit) {
        let details = test
            .details
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("no details");
        out.push_str(&format!("   - {}: {details}\n", test.display_name()));
    }
    if c.skipped.len() > opts.skipped_limit {
        out.push_str(&format!(
            "   ... and {} more skipped test(s)\n",
            c.skipped.len() - opts.skipped_limit
        ));
    }
    out.push('\n');
}

fn push_coverage(out: &mut String, loaded: &LoadedReport) {
    let entries = loaded.report.results.coverage_entries();
    if entries.is_empty() {
        return;
    }
    out.push_str("📊 Coverage:\n");
    for (category, entry) in entries {
        match entry {
            CoverageEntry::Stats { tested, total } => {
                let percent = entry.percent().unwrap_or(0.0);
                out.push_str(&format!(
                    "   {} {category}: {percent:.1}% ({tested}/{total})\n",
                    CoverageLevel::of(percent).marker()
                ));
            }
            CoverageEntry::Note(ref note) => {
                out.push_str(&format!("   {category}: {note}\n"));
            }
        }
    }
    out.push('\n');
}

/// First `max` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
