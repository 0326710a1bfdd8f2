//! Historical analysis of a single series

use super::{seasonal::seasonal_pattern, trend::fit_trend, variability::variability};
use crate::models::{DataRange, HistoricalAnalysis, Observation};
use crate::types::GpsCoordinates;

/// Derive seasonal, trend and variability statistics from one series.
///
/// The series must be sorted ascending by date.
pub fn analyze(location: GpsCoordinates, series: &[Observation]) -> HistoricalAnalysis {
    HistoricalAnalysis {
        location,
        data_range: DataRange {
            start: series.first().map(|o| o.date),
            end: series.last().map(|o| o.date),
            points: series.len(),
        },
        seasonal_pattern: seasonal_pattern(series),
        trend: fit_trend(series),
        variability: variability(series),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TrendModel, VariabilityStats};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn location() -> GpsCoordinates {
        GpsCoordinates::new(Decimal::new(187883, 4), Decimal::new(989853, 4))
    }

    #[test]
    fn test_empty_series() {
        let analysis = analyze(location(), &[]);
        assert_eq!(analysis.data_range, DataRange::default());
        assert_eq!(analysis.trend, TrendModel::flat());
        assert_eq!(analysis.variability, VariabilityStats::default());
        assert_eq!(analysis.seasonal_pattern.total_count(), 0);
    }

    #[test]
    fn test_data_range_counts_all_points() {
        let series = vec![
            Observation::new(NaiveDate::from_ymd_opt(2022, 1, 5).unwrap(), Some(0.3)),
            Observation::new(NaiveDate::from_ymd_opt(2022, 2, 5).unwrap(), None),
            Observation::new(NaiveDate::from_ymd_opt(2022, 3, 5).unwrap(), Some(0.5)),
        ];
        let analysis = analyze(location(), &series);
        assert_eq!(analysis.data_range.points, 3);
        assert_eq!(analysis.data_range.start, Some(series[0].date));
        assert_eq!(analysis.data_range.end, Some(series[2].date));
        assert_eq!(analysis.variability.count, 2);
    }
}
