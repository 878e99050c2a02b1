use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use goals_core::GoalStatistics;

use crate::goal::GoalState;
use crate::statistics::PieChart;
use crate::web::WebError;

#[derive(Template)]
#[template(path = "statistics.html")]
struct StatisticsTemplate {
    stats: GoalStatistics,
    chart: PieChart,
}

impl StatisticsTemplate {
    pub fn new(stats: GoalStatistics) -> Self {
        let chart = PieChart::from_statistics(&stats);
        Self { stats, chart }
    }
}

/// Handler for GET /statistics that renders the pie chart and per-status counts.
#[tracing::instrument(skip(state))]
async fn statistics_handler(State(state): State<GoalState>) -> Result<Html<String>, WebError> {
    let stats = state.service.statistics().await?;
    let template = StatisticsTemplate::new(stats);
    template.render().map(Html).map_err(WebError::from)
}

/// Creates and returns the statistics page router.
pub fn create_statistics_router(state: GoalState) -> Router {
    Router::new()
        .route("/statistics", get(statistics_handler))
        .with_state(state)
}
