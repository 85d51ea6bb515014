//! Scalable Bloom filter
//!
//! A chain of partitioned filters, newest first. Only the newest filter
//! accepts new elements; a lookup is the union of every filter in the chain.
//! When the newest filter's estimated fill ratio passes
//! [`FILL_RATIO_THRESHOLD`], a filter `growth_rate` times larger is prepended
//! with the false positive target tightened by `tightening_ratio`, which keeps
//! the compounded false positive rate of the chain bounded.
//!
//! Reference: Almeida, Baquero, Preguiça, Hutchison, "Scalable Bloom Filters"
//!
//! INVARIANTS:
//! - The chain is never empty and never shrinks
//! - Sub-filters keep their size and hash count for their whole life

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::bloom_filter::Filter;
use super::config::ScalableConfig;
use super::parameters::{compound_fpr, hash_count_for_fpr, FILL_RATIO_THRESHOLD};
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Bloom filter that grows with the number of elements fed
#[derive(Clone)]
pub struct ScalableFilter {
    config: ScalableConfig,
    /// False positive target of the newest sub-filter
    target_fpr: f64,
    /// Newest first
    filters: VecDeque<Filter>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl ScalableFilter {
    /// Create a scalable filter
    ///
    /// # Arguments
    /// * `target_fpr` - False positive probability target (p)
    /// * `growth_rate` - Size multiplier for each new sub-filter (s)
    /// * `initial_size` - Size of the first sub-filter in bytes (m0)
    /// * `tightening_ratio` - Multiplier for the target on each growth (r)
    pub fn new(
        target_fpr: f64,
        growth_rate: f64,
        initial_size: usize,
        tightening_ratio: f64,
    ) -> Result<Self, FilterError> {
        Self::from_config(ScalableConfig::new(
            target_fpr,
            growth_rate,
            initial_size,
            tightening_ratio,
        )?)
    }

    /// Create a scalable filter with s = 2, m0 = 1024 bytes and r = 0.8
    pub fn new_default(target_fpr: f64) -> Result<Self, FilterError> {
        Self::from_config(ScalableConfig::default().with_target_fpr(target_fpr))
    }

    /// Create a scalable filter from a configuration
    pub fn from_config(config: ScalableConfig) -> Result<Self, FilterError> {
        config.validate()?;
        let first = Filter::new(config.initial_size, hash_count_for_fpr(config.target_fpr))?;
        debug!(
            size = first.size(),
            k = first.hash_count(),
            target_fpr = config.target_fpr,
            "Created scalable filter"
        );

        let mut filters = VecDeque::with_capacity(8);
        filters.push_front(first);
        Ok(Self {
            target_fpr: config.target_fpr,
            config,
            filters,
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Report events to `metrics`
    ///
    /// Sub-filters that already exist are reported as created.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        for filter in &self.filters {
            metrics.record_filter_created(filter.size(), filter.hash_count());
        }
        self.metrics = metrics;
        self
    }

    /// Add an element, growing the chain first if the newest sub-filter is
    /// too full
    ///
    /// Fails with [`FilterError::Capacity`] when the next sub-filter cannot
    /// be addressed by any digest; the filter is then left unchanged and the
    /// element is not added.
    pub fn feed(&mut self, element: impl AsRef<[u8]>) -> Result<&mut Self, FilterError> {
        let start = Instant::now();
        if self.active().estimate_fill_ratio() > FILL_RATIO_THRESHOLD {
            self.grow()?;
        }
        self.active_mut().feed(element);
        self.metrics.record_insert(start.elapsed());
        Ok(self)
    }

    /// Test whether an element may have been fed, newest sub-filter first
    pub fn matches(&self, element: impl AsRef<[u8]>) -> bool {
        let start = Instant::now();
        let element = element.as_ref();
        let found = self.filters.iter().any(|filter| filter.matches(element));
        self.metrics.record_lookup(start.elapsed(), found);
        found
    }

    fn grow(&mut self) -> Result<(), FilterError> {
        let target_fpr = self.target_fpr * self.config.tightening_ratio;
        let previous = self.active().size();
        let size = ((previous as f64 * self.config.growth_rate) as usize).max(previous);
        let k = hash_count_for_fpr(target_fpr);

        let filter = match Filter::new(size, k) {
            Ok(filter) => filter,
            Err(err) => {
                debug!(size = size, k = k, error = %err, "Failed to grow scalable filter");
                return Err(err);
            }
        };

        debug!(
            depth = self.filters.len() + 1,
            size = size,
            k = k,
            target_fpr = target_fpr,
            "Scalable filter grew"
        );
        self.metrics.record_filter_created(size, k);
        self.metrics.record_growth(size, target_fpr);
        self.target_fpr = target_fpr;
        self.filters.push_front(filter);
        Ok(())
    }

    fn active(&self) -> &Filter {
        &self.filters[0]
    }

    fn active_mut(&mut self) -> &mut Filter {
        &mut self.filters[0]
    }

    /// Number of sub-filters in the chain
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Sub-filters, newest first
    pub fn filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// False positive target of the newest sub-filter
    pub fn target_fpr(&self) -> f64 {
        self.target_fpr
    }

    /// Configuration the filter was built with
    pub fn config(&self) -> &ScalableConfig {
        &self.config
    }

    /// Feed calls across every sub-filter
    pub fn inserted(&self) -> u64 {
        self.filters.iter().map(Filter::inserted).sum()
    }

    /// Probability that a lookup of a never-fed element matches any sub-filter
    pub fn estimated_fpr(&self) -> f64 {
        compound_fpr(self.filters.iter().map(Filter::estimated_fpr))
    }

    /// Log one line per sub-filter at debug level
    pub fn describe(&self) {
        for (i, filter) in self.filters.iter().enumerate() {
            debug!(
                index = i,
                size = filter.size(),
                k = filter.hash_count(),
                fill_ratio = filter.fill_ratio(),
                "Scalable sub-filter"
            );
        }
    }

    /// Rebuild a scalable filter from its parts, `filters` newest first
    pub(crate) fn from_parts(
        config: ScalableConfig,
        target_fpr: f64,
        filters: Vec<Filter>,
    ) -> Result<Self, FilterError> {
        config.validate()?;
        if filters.is_empty() {
            return Err(FilterError::Serialization(
                "scalable filter has no sub-filters".to_string(),
            ));
        }
        if !(target_fpr > 0.0 && target_fpr <= config.target_fpr) {
            return Err(FilterError::Serialization(format!(
                "target_fpr {} outside (0, {}]",
                target_fpr, config.target_fpr
            )));
        }
        Ok(Self {
            config,
            target_fpr,
            filters: filters.into(),
            metrics: Arc::new(NoOpMetrics),
        })
    }
}

impl fmt::Debug for ScalableFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalableFilter")
            .field("config", &self.config)
            .field("target_fpr", &self.target_fpr)
            .field("filters", &self.filters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;

    #[test]
    fn test_new_default_creates_single_filter() {
        let filter = ScalableFilter::new_default(0.1).unwrap();

        assert_eq!(filter.filter_count(), 1);
        let first = filter.filters().next().unwrap();
        assert_eq!(first.size(), 1024);
        assert_eq!(first.hash_count(), 4, "ceil(log2(1/0.1)) = 4");
        assert_eq!(filter.target_fpr(), 0.1);
        assert_eq!(filter.config().growth_rate, 2.0);
        assert_eq!(filter.config().tightening_ratio, 0.8);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(matches!(
            ScalableFilter::new(1.5, 2.0, 1024, 0.8),
            Err(FilterError::InvalidParameters(_))
        ));
        assert!(matches!(
            ScalableFilter::new(0.1, 2.0, 0, 0.8),
            Err(FilterError::InvalidParameters(_))
        ));
        assert!(matches!(
            ScalableFilter::new_default(0.0),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_feed_then_match() {
        let mut filter = ScalableFilter::new_default(0.01).unwrap();
        filter.feed("Bloom").unwrap().feed("Poney").unwrap();

        assert!(filter.matches("Bloom"));
        assert!(filter.matches("Poney"));
        assert!(!filter.matches("Unrelated-Never-Fed-Value"));
        assert_eq!(filter.inserted(), 2);
    }

    #[test]
    fn test_grows_exactly_when_fill_estimate_exceeds_threshold() {
        let mut filter = ScalableFilter::new(0.1, 2.0, 64, 0.8).unwrap();

        for i in 0..5000 {
            let before = filter.filter_count();
            let should_grow = filter.active().estimate_fill_ratio() > FILL_RATIO_THRESHOLD;

            filter.feed(format!("element_{}", i)).unwrap();

            let expected = if should_grow { before + 1 } else { before };
            assert_eq!(
                filter.filter_count(),
                expected,
                "Unexpected chain length after feeding element {}",
                i
            );
        }
        assert!(filter.filter_count() > 3, "5000 elements must trigger growth");
    }

    #[test]
    fn test_growth_parameters() {
        let mut filter = ScalableFilter::new_default(0.1).unwrap();
        let mut i = 0;
        while filter.filter_count() == 1 {
            filter.feed(format!("element_{}", i)).unwrap();
            i += 1;
        }

        let newest = filter.filters().next().unwrap();
        assert_eq!(newest.size(), 2048, "New sub-filter doubles in size");
        assert_eq!(newest.hash_count(), hash_count_for_fpr(0.1 * 0.8));
        assert_eq!(newest.inserted(), 1, "Pending element goes to the new filter");
        assert!((filter.target_fpr() - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_elements_survive_growth() {
        let mut filter = ScalableFilter::new(0.05, 2.0, 32, 0.8).unwrap();
        let elements: Vec<String> = (0..3000).map(|i| format!("address_{:04x}", i)).collect();

        for elem in &elements {
            filter.feed(elem).unwrap();
        }

        assert!(filter.filter_count() > 1);
        for elem in &elements {
            assert!(filter.matches(elem), "False negative for {}", elem);
        }
    }

    #[test]
    fn test_growth_capacity_error_propagates() {
        // Second sub-filter would need k = 24 hashes of 3 bytes = 72 bytes
        let mut filter = ScalableFilter::new(0.1, 2.0, 1024, 1e-6).unwrap();

        let mut failure = None;
        for i in 0..2000 {
            if let Err(err) = filter.feed(format!("element_{}", i)) {
                failure = Some((i, err));
                break;
            }
        }

        let (i, err) = failure.expect("growth must fail");
        assert!(matches!(err, FilterError::Capacity { .. }));
        assert_eq!(filter.filter_count(), 1, "Failed growth leaves the chain as is");
        assert_eq!(filter.target_fpr(), 0.1);
        assert_eq!(filter.inserted(), i as u64);
    }

    #[test]
    fn test_metrics_recorded() {
        let metrics = Arc::new(Metrics::new());
        let mut filter = ScalableFilter::new(0.1, 2.0, 64, 0.8)
            .unwrap()
            .with_metrics(metrics.clone());

        for i in 0..1000 {
            filter.feed(format!("element_{}", i)).unwrap();
        }
        filter.matches("element_0");
        filter.matches("never-fed");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.elements_inserted, 1000);
        assert_eq!(snapshot.lookups_performed, 2);
        assert!(snapshot.lookups_positive >= 1);
        assert_eq!(snapshot.filters_created, filter.filter_count() as u64);
        assert_eq!(snapshot.growth_events, filter.filter_count() as u64 - 1);
        let bytes: usize = filter.filters().map(Filter::size).sum();
        assert_eq!(snapshot.bytes_allocated, bytes as u64);
    }

    #[test]
    fn test_sizes_and_targets_monotonic() {
        let mut filter = ScalableFilter::new(0.1, 2.0, 16, 0.8).unwrap();
        for i in 0..2000 {
            filter.feed(format!("element_{}", i)).unwrap();
        }

        let filters: Vec<&Filter> = filter.filters().collect();
        for pair in filters.windows(2) {
            assert!(pair[0].size() >= pair[1].size(), "Newer filters are not smaller");
            assert!(pair[0].hash_count() >= pair[1].hash_count());
        }
        let fpr = filter.estimated_fpr();
        assert!((0.0..=1.0).contains(&fpr));
    }

    #[test]
    fn test_from_parts_rejects_empty_chain() {
        let result = ScalableFilter::from_parts(ScalableConfig::default(), 0.1, Vec::new());
        assert!(matches!(result, Err(FilterError::Serialization(_))));
    }
}
