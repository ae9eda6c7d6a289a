//! LaTeX appendix for research write-ups.

use super::ResearchMetrics;

/// Render the four metrics as a LaTeX table
pub fn generate_latex_appendix(metrics: &ResearchMetrics, mode_label: &str) -> String {
    format!(
        "\\section*{{Appendix: Introspection Metrics}}\n\
         \\textit{{Mode: {mode}}}\n\
         \\begin{{table}}[h]\n\
         \\centering\n\
         \\begin{{tabular}}{{l l r}}\n\
         \\hline\n\
         Metric & Description & Value \\\\\n\
         \\hline\n\
         ISS & Internal Stability Score & {iss:.4} \\\\\n\
         PSU & Predictive Self-Uncertainty & {psu:.4} \\\\\n\
         ICC & Internal Confidence Collapse & {icc:.4} \\\\\n\
         FAH & Failure Anticipation Horizon (epochs) & {fah} \\\\\n\
         \\hline\n\
         \\end{{tabular}}\n\
         \\caption{{Research metrics over the trailing window.}}\n\
         \\end{{table}}\n",
        mode = mode_label,
        iss = metrics.iss,
        psu = metrics.psu,
        icc = metrics.icc,
        fah = metrics.fah,
    )
}
