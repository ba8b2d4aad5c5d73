//! Terminal rendering for assessments.

use modestcheck_core::Assessment;

/// Render an assessment as a short human-readable report.
pub fn render_assessment(assessment: &Assessment) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Verdict: {} ({:.2}% confidence)\n",
        assessment.verdict.as_str(),
        assessment.confidence
    ));
    out.push_str("Detected items:\n");
    for line in assessment.detail_lines() {
        out.push_str(&format!("  - {line}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use modestcheck_core::{Lexicon, Prediction, assess};

    #[test]
    fn renders_verdict_and_items() {
        let a = assess(
            vec![
                Prediction::new("abaya", 0.613),
                Prediction::new("cloak", 0.2),
            ],
            &Lexicon::default(),
        );
        let text = render_assessment(&a);

        assert!(text.starts_with("Verdict: compliant (61.30% confidence)"));
        assert!(text.contains("  - abaya (61.3%)"));
        assert!(text.contains("  - cloak (20.0%)"));
    }

    #[test]
    fn renders_non_compliant_verdict() {
        let a = assess(vec![Prediction::new("bikini, two-piece", 0.9)], &Lexicon::default());
        let text = render_assessment(&a);
        assert!(text.contains("not compliant"));
    }
}
