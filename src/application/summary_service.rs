// Summary service - Use case for the stress summary page
use crate::application::aggregator::Aggregator;
use crate::application::error::PageError;
use crate::application::normalizer::SampleNormalizer;
use crate::application::page_loader::PageLoader;
use crate::domain::sample::SeriesKind;
use crate::domain::summary::Summary;

#[derive(Clone)]
pub struct SummaryService {
    loader: PageLoader,
    normalizer: SampleNormalizer,
    aggregator: Aggregator,
}

impl SummaryService {
    pub fn new(loader: PageLoader, normalizer: SampleNormalizer, aggregator: Aggregator) -> Self {
        Self {
            loader,
            normalizer,
            aggregator,
        }
    }

    /// Statistics run on the cleaned, full-resolution series. Decimation only
    /// exists for chart density and never feeds the numbers here.
    pub async fn get_summary(&self, username: &str) -> Result<Summary, PageError> {
        let data = self.loader.load(username).await?;
        let full = |kind: SeriesKind| self.normalizer.clean(kind, data.series.records(kind));

        Ok(Summary {
            stress_trend: self.aggregator.daily_trend(&full(SeriesKind::Stress)),
            heart_rate_zones: self.aggregator.zone_distribution(&full(SeriesKind::HeartRate)),
            respiration: self.aggregator.respiration_comparison(
                &full(SeriesKind::Respiration),
                &full(SeriesKind::SleepRespiration),
            ),
            annotations: self.aggregator.annotation_stats(&data.annotations),
        })
    }
}
