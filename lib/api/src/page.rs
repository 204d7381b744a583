//! Server-side rendering of the analyzer page
//!
//! One page: review form on top, then at most one of warning banner, error
//! banner or results panel. A persistent error banner is shown whenever the
//! artifacts are unavailable, and the Analyze button is disabled.

use reviewlens_core::AnalysisResult;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 20px 50px; line-height: 1.6; }
h1 { font-size: 2rem; }
textarea { width: 100%; min-height: 160px; font-size: 1.1rem; }
button { margin-top: 10px; padding: 8px 24px; font-size: 1.1rem; }
.banner { padding: 12px 16px; border-radius: 8px; margin: 16px 0; }
.error { background: #fde2e1; color: #8a1c16; }
.warning { background: #fff4d6; color: #7a5600; }
.info { background: #e3f0fd; color: #114a7a; }
.results { margin-top: 24px; }
footer { margin-top: 48px; border-top: 1px solid #ddd; padding-top: 8px; color: #666; }
"#;

/// What to show below the form
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Empty,
    /// Non-blocking, the user can resubmit right away
    Warning(&'a str),
    /// Blocking error from the last submission
    Failure(&'a str),
    Analysis(&'a AnalysisResult),
}

#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Review text echoed back into the form
    pub review: &'a str,
    /// Set when the artifacts failed to load at startup
    pub unavailable: Option<&'a str>,
    pub outcome: Outcome<'a>,
}

impl<'a> Page<'a> {
    pub fn new(unavailable: Option<&'a str>) -> Self {
        Self {
            review: "",
            unavailable,
            outcome: Outcome::Empty,
        }
    }

    #[must_use]
    pub fn with_review(mut self, review: &'a str) -> Self {
        self.review = review;
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome<'a>) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Movie Review Sentiment Analyzer</title>\n");
        let _ = write!(html, "<style>{}</style>\n</head>\n<body>\n", STYLE);
        html.push_str("<h1>🎥 Movie Review Sentiment Analysis</h1>\n");

        if let Some(reason) = self.unavailable {
            let _ = writeln!(
                html,
                "<div class=\"banner error\">Error: {}</div>",
                escape_html(reason)
            );
        }

        let disabled = if self.unavailable.is_some() { " disabled" } else { "" };
        let _ = write!(
            html,
            "<form method=\"post\" action=\"/\">\n\
             <label for=\"review\">Enter your movie review below:</label>\n\
             <textarea id=\"review\" name=\"review\">{}</textarea>\n\
             <button type=\"submit\"{}>Analyze</button>\n\
             </form>\n",
            escape_html(self.review),
            disabled
        );

        match self.outcome {
            Outcome::Empty => {}
            Outcome::Warning(msg) => {
                let _ = writeln!(html, "<div class=\"banner warning\">{}</div>", escape_html(msg));
            }
            Outcome::Failure(msg) => {
                let _ = writeln!(html, "<div class=\"banner error\">Error: {}</div>", escape_html(msg));
            }
            Outcome::Analysis(result) => render_result(&mut html, result),
        }

        html.push_str("<footer>Runs locally. Reviews are not stored.</footer>\n</body>\n</html>\n");
        html
    }
}

fn render_result(html: &mut String, result: &AnalysisResult) {
    let label = result.label;
    html.push_str("<section class=\"results\">\n");
    let _ = writeln!(html, "<h2>Sentiment: {}</h2>", label.display_name());
    let _ = writeln!(html, "<p>Emotion: {}</p>", label.emotion());
    let _ = writeln!(
        html,
        "<img src=\"/assets/{}\" alt=\"{}\" width=\"150\">",
        label.image(),
        label.emotion()
    );
    let _ = writeln!(
        html,
        "<p><strong>Confidence Score:</strong> {:.2}%</p>",
        result.confidence_percent()
    );
    let _ = writeln!(html, "<p><strong>Polarity:</strong> {:.2}</p>", result.polarity);
    let _ = writeln!(html, "<p><strong>Subjectivity:</strong> {:.2}</p>", result.subjectivity);

    html.push_str("<h3>Key Words Influencing the Prediction</h3>\n");
    let _ = writeln!(html, "<p>{}</p>", escape_html(&result.explanation_text()));

    if result.top_terms.is_empty() {
        html.push_str("<p>No significant words were found in this review.</p>\n");
    } else {
        html.push_str(
            "<div class=\"banner info\">The following words had the most influence on the prediction:\n<ul>\n",
        );
        for term in &result.top_terms {
            let _ = writeln!(
                html,
                "<li><strong>{}</strong> (TF-IDF Score: {:.4})</li>",
                escape_html(&term.term),
                term.weight
            );
        }
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</section>\n");
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewlens_core::{Explanation, Label, TopTerm};

    fn result(top_terms: Vec<TopTerm>) -> AnalysisResult {
        AnalysisResult {
            label: Label::Positive,
            probabilities: [0.1234, 0.8766],
            confidence: 0.8766,
            polarity: 0.456,
            subjectivity: 0.5,
            explanation: Explanation::from_terms(&top_terms),
            top_terms,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape_html("<b>\"Tom & Jerry\"</b>'s"),
            "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;&#39;s"
        );
    }

    #[test]
    fn test_result_formatting() {
        let r = result(vec![TopTerm { term: "gripping".to_string(), weight: 0.71234 }]);
        let html = Page::new(None).with_outcome(Outcome::Analysis(&r)).render();
        assert!(html.contains("Sentiment: Positive Review"));
        assert!(html.contains("Emotion: Happy 😊"));
        assert!(html.contains("/assets/happy.jpg"));
        assert!(html.contains("87.66%"));
        assert!(html.contains("<strong>Polarity:</strong> 0.46"));
        assert!(html.contains("<strong>Subjectivity:</strong> 0.50"));
        assert!(html.contains("(TF-IDF Score: 0.7123)"));
        assert!(html.contains("words like &#39;gripping&#39;"));
    }

    #[test]
    fn test_no_terms_branch() {
        let r = result(Vec::new());
        let html = Page::new(None).with_outcome(Outcome::Analysis(&r)).render();
        assert!(html.contains("No significant words were found in this review."));
        assert!(html.contains("classified as neutral"));
    }

    #[test]
    fn test_unavailable_banner_disables_form() {
        let html = Page::new(Some("Model or vectorizer files not found. <missing>")).render();
        assert!(html.contains(
            "banner error\">Error: Model or vectorizer files not found. &lt;missing&gt;</div>"
        ));
        assert!(html.contains("<button type=\"submit\" disabled>"));
    }

    #[test]
    fn test_review_echoed_escaped() {
        let html = Page::new(None)
            .with_review("</textarea><script>")
            .with_outcome(Outcome::Warning("Please enter a valid review."))
            .render();
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(html.contains("banner warning\">Please enter a valid review."));
    }
}
