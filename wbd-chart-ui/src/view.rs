//! Which of the mutually exclusive chart views to show for a query state.

use wbd_query::QueryState;

/// Shown when an error carries no message of its own.
pub const FALLBACK_ERROR: &str = "Failed to load chart data. Please try again.";

/// The view a chart card renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartView {
    Loading,
    Error(String),
    Empty,
    Content,
}

impl ChartView {
    /// Precedence: loading, then error, then empty, then content. A query
    /// that is disabled has nothing to show and counts as empty.
    pub fn resolve(state: &QueryState) -> ChartView {
        match state {
            QueryState::Loading => ChartView::Loading,
            QueryState::Error(e) => ChartView::error(e.to_string()),
            QueryState::Idle => ChartView::Empty,
            QueryState::Success(_) if state.is_empty() => ChartView::Empty,
            QueryState::Success(_) => ChartView::Content,
        }
    }

    /// One view for a chart fed by several queries: loading if any is
    /// loading, otherwise the first error, otherwise empty if any is empty.
    pub fn combine(states: &[&QueryState]) -> ChartView {
        let views: Vec<ChartView> = states.iter().map(|s| ChartView::resolve(s)).collect();
        if views.iter().any(|v| *v == ChartView::Loading) {
            return ChartView::Loading;
        }
        if let Some(error) = views.iter().find(|v| matches!(v, ChartView::Error(_))) {
            return error.clone();
        }
        if views.is_empty() || views.iter().any(|v| *v == ChartView::Empty) {
            return ChartView::Empty;
        }
        ChartView::Content
    }

    /// Whether the chart container is mounted and a figure should be drawn.
    pub fn has_plot(&self) -> bool {
        *self == ChartView::Content
    }

    fn error(message: String) -> ChartView {
        if message.trim().is_empty() {
            ChartView::Error(FALLBACK_ERROR.to_string())
        } else {
            ChartView::Error(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use wbd_api::{FetchError, IndicatorResponse};

    const EMPTY: &str = r#"[{"page":1,"pages":0,"per_page":500,"total":0}, null]"#;
    const ONE_ROW: &str = r#"[{"page":1,"pages":1,"per_page":500,"total":1},
        [{"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},
          "country":{"id":"SG","value":"Singapore"},"countryiso3code":"SGP","date":"2021","value":5453566,
          "unit":"","obs_status":"","decimal":0}]]"#;

    fn success(body: &str) -> QueryState {
        QueryState::Success(Rc::new(IndicatorResponse::from_body(body).unwrap()))
    }

    #[test]
    fn test_single_state_views() {
        assert_eq!(ChartView::resolve(&QueryState::Loading), ChartView::Loading);
        assert_eq!(ChartView::resolve(&QueryState::Idle), ChartView::Empty);
        assert_eq!(ChartView::resolve(&success(EMPTY)), ChartView::Empty);
        assert_eq!(ChartView::resolve(&success(ONE_ROW)), ChartView::Content);
        assert_eq!(
            ChartView::resolve(&QueryState::Error(FetchError::malformed("response is not an array"))),
            ChartView::Error("Malformed response: response is not an array".to_string())
        );
    }

    #[test]
    fn test_blank_error_uses_fallback() {
        let view = ChartView::resolve(&QueryState::Error(FetchError::Network(String::new())));
        assert!(matches!(view, ChartView::Error(_)));
        let view = ChartView::error("  ".to_string());
        assert_eq!(view, ChartView::Error(FALLBACK_ERROR.to_string()));
    }

    #[test]
    fn test_combined_precedence() {
        let loading = QueryState::Loading;
        let error = QueryState::Error(FetchError::network("timeout"));
        let empty = success(EMPTY);
        let content = success(ONE_ROW);

        assert_eq!(ChartView::combine(&[&error, &loading, &content]), ChartView::Loading);
        assert!(matches!(ChartView::combine(&[&content, &empty, &error]), ChartView::Error(_)));
        assert_eq!(ChartView::combine(&[&content, &empty, &content]), ChartView::Empty);
        assert_eq!(ChartView::combine(&[&content, &content, &content]), ChartView::Content);
    }

    #[test]
    fn test_only_content_draws_a_plot() {
        let empty = success(EMPTY);
        let content = success(ONE_ROW);
        // Every query answered, but one answered with nothing.
        assert!(!ChartView::combine(&[&content, &content, &empty]).has_plot());
        assert!(!ChartView::resolve(&QueryState::Idle).has_plot());
        assert!(!ChartView::resolve(&QueryState::Loading).has_plot());
        assert!(ChartView::combine(&[&content, &content, &content]).has_plot());
    }
}
