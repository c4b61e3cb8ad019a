// Visualize service - Use case for the three exploration charts
use crate::application::charts::{ChartBuilder, HeartRateChart, RespirationChart, StressChart};
use crate::application::error::PageError;
use crate::application::page_loader::PageLoader;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VisualizeView {
    pub stress: StressChart,
    pub heart_rate: HeartRateChart,
    pub respiration: RespirationChart,
}

#[derive(Clone)]
pub struct VisualizeService {
    loader: PageLoader,
    charts: ChartBuilder,
}

impl VisualizeService {
    pub fn new(loader: PageLoader, charts: ChartBuilder) -> Self {
        Self { loader, charts }
    }

    pub async fn get_charts(&self, username: &str) -> Result<VisualizeView, PageError> {
        let series = self.loader.load_series(username).await?;
        if !series.has_data() {
            tracing::info!("No series data for {}", username);
            return Err(PageError::EmptyDataset);
        }

        Ok(VisualizeView {
            stress: self.charts.stress_chart(&series),
            heart_rate: self.charts.heart_rate_chart(&series),
            respiration: self.charts.respiration_chart(&series),
        })
    }
}
