//! Result rendering: list, warning and summary status.

use crate::backend::RankedResult;
use crate::config::SearchConfig;
use crate::documents::DocumentFragment;
use crate::html::html_encode;
use crate::view::{messages, SearchView};

/// Counts of what was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    /// Number of rows rendered
    pub total: usize,
    /// Rows for public objects
    pub public: usize,
}

/// Picks the warning for a result set from its top score and size.
pub fn select_warning(top_score: f64, count: usize, config: &SearchConfig) -> Option<&'static str> {
    let poor = top_score <= config.low_score_threshold;
    let many = count > config.many_results_threshold;
    match (poor, many) {
        (true, true) => Some(messages::MANY_POOR_RESULTS),
        (true, false) => Some(messages::POOR_RESULTS),
        (false, true) => Some(messages::MANY_RESULTS),
        (false, false) => None,
    }
}

/// Status line for a query that matched nothing.
pub fn no_results_status(query: &str) -> String {
    format!("No results matches \"{}\"", html_encode(query))
}

/// Status line summarising the public matches.
///
/// Private objects are left out of the count; if nothing public matched the
/// status says so while hinting that private objects did.
pub fn summary_status(query: &str, fragments: &[DocumentFragment]) -> String {
    let public = fragments.iter().filter(|f| f.is_public()).count();
    if public == 0 {
        return format!(
            "{}. Some private objects matches your search though.",
            no_results_status(query)
        );
    }

    let noun = if public == 1 { "result" } else { "results" };
    format!(
        "Search for \"{}\" yielded {} {}.",
        html_encode(query),
        public,
        noun
    )
}

/// Fills the result list and updates warning and status.
///
/// `ranked` drives the warning (its first entry is the top score); the
/// fragments are displayed as given, which is rank order.
pub fn render(
    view: &dyn SearchView,
    config: &SearchConfig,
    query: &str,
    fragments: Vec<DocumentFragment>,
    ranked: &[RankedResult],
) -> RenderSummary {
    view.clear_results();

    let top_score = ranked.first().map(|r| r.score).unwrap_or(0.0);
    view.set_warning(select_warning(top_score, ranked.len(), config).unwrap_or(""));
    view.set_status(&summary_status(query, &fragments));

    let summary = RenderSummary {
        total: fragments.len(),
        public: fragments.iter().filter(|f| f.is_public()).count(),
    };
    view.set_results(fragments);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fragment, ranked_with_scores, RecordingView};

    #[test]
    fn test_warning_selection() {
        let config = SearchConfig::default();
        assert_eq!(
            select_warning(3.0, 600, &config),
            Some(messages::MANY_POOR_RESULTS)
        );
        assert_eq!(select_warning(5.0, 500, &config), Some(messages::POOR_RESULTS));
        assert_eq!(select_warning(5.1, 501, &config), Some(messages::MANY_RESULTS));
        assert_eq!(select_warning(10.0, 5, &config), None);
    }

    #[test]
    fn test_summary_plural_and_singular() {
        let five: Vec<_> = (0..5).map(|i| fragment(&format!("m{i}"), false)).collect();
        assert_eq!(
            summary_status("reactor", &five),
            "Search for \"reactor\" yielded 5 results."
        );

        let one = vec![fragment("m", false), fragment("_m", true)];
        assert_eq!(
            summary_status("reactor", &one),
            "Search for \"reactor\" yielded 1 result."
        );
    }

    #[test]
    fn test_summary_only_private_matches() {
        let private = vec![fragment("_a", true), fragment("_b", true)];
        assert_eq!(
            summary_status("<a>", &private),
            "No results matches \"&lt;a&gt;\". Some private objects matches your search though."
        );
    }

    #[test]
    fn test_statuses_escape_ampersands_and_quotes() {
        let one = vec![fragment("m", false)];
        assert_eq!(
            summary_status(r#"a&"b""#, &one),
            "Search for \"a&amp;&quot;b&quot;\" yielded 1 result."
        );
        assert_eq!(
            no_results_status("&\""),
            "No results matches \"&amp;&quot;\""
        );
    }

    #[test]
    fn test_render_fills_view() {
        let view = RecordingView::default();
        let ranked = ranked_with_scores(&[("a", 3.0), ("_b", 2.0)]);
        let fragments = vec![fragment("a", false), fragment("_b", true)];

        let summary = render(&view, &SearchConfig::default(), "q", fragments, &ranked);

        assert_eq!(summary, RenderSummary { total: 2, public: 1 });
        assert_eq!(view.result_ids(), vec!["a", "_b"]);
        assert_eq!(view.warning(), messages::POOR_RESULTS);
        assert_eq!(view.status(), "Search for \"q\" yielded 1 result.");
    }
}
