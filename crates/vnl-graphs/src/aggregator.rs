//! Aggregation of the player table into the views each chart draws

use crate::density::{gaussian_kde, DensityPoint, DENSITY_GRID_POINTS};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use vnl_common::{Result, Table, VnlError};

/// Default number of countries kept per metric
pub const DEFAULT_TOP_COUNTRIES: usize = 10;

/// Default number of age histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Trait for aggregating the player table into a chart view
pub trait DataAggregator<T> {
    /// Derive the view from `table`
    fn aggregate(&self, table: &Table) -> Result<T>;
}

/// Mean attack score for one age
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeAttackDataPoint {
    /// Age in years
    pub age: f64,
    /// Mean of `Attack` over the rows of this age
    pub mean_attack: f64,
}

/// Mean attack per age, ordered by age ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttackByAgeView {
    /// One point per distinct age
    pub points: Vec<AgeAttackDataPoint>,
}

/// Mean scores of one country; a metric is `None` when the country is
/// outside that metric's top N
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryScoreDataPoint {
    /// Country code
    pub country: String,
    /// Mean attack, if in the attack top N
    pub attack: Option<f64>,
    /// Mean block, if in the block top N
    pub block: Option<f64>,
}

/// Union of the attack top N and the block top N
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCountriesView {
    /// N used for each metric
    pub limit: usize,
    /// Attack ranking first, then block-only countries
    pub countries: Vec<CountryScoreDataPoint>,
}

/// Count and share of one court position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDataPoint {
    /// Position code
    pub position: String,
    /// Players at this position
    pub count: usize,
    /// Share of all players, 0 to 100
    pub percentage: f64,
}

/// Position counts, largest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionDistributionView {
    /// Number of rows counted
    pub total: usize,
    /// Positions by descending count
    pub positions: Vec<PositionDataPoint>,
}

impl PositionDistributionView {
    /// Counts keyed by position label
    pub fn counts(&self) -> BTreeMap<&str, usize> {
        self.positions
            .iter()
            .map(|p| (p.position.as_str(), p.count))
            .collect()
    }
}

/// One histogram bin; `[lower, upper)` except the last bin, which is closed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge, inclusive only for the last bin
    pub upper: f64,
    /// Ages in the bin
    pub count: usize,
}

/// Equal-width age histogram with its density overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeHistogramView {
    /// Equal-width bins in ascending order
    pub bins: Vec<HistogramBin>,
    /// Density curve scaled to counts; empty for degenerate samples
    pub density: Vec<DensityPoint>,
}

impl AgeHistogramView {
    /// Sum of all bin counts
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Width shared by every bin
    pub fn bin_width(&self) -> f64 {
        self.bins.first().map_or(0.0, |b| b.upper - b.lower)
    }
}

/// Groups rows by age and averages the attack score
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAttackByAge;

impl DataAggregator<AttackByAgeView> for MeanAttackByAge {
    #[instrument(skip(self, table), fields(rows = table.len()))]
    fn aggregate(&self, table: &Table) -> Result<AttackByAgeView> {
        let mut rows: Vec<(f64, f64)> = table.iter().map(|r| (r.age, r.attack)).collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));

        // Sorted, so equal ages are adjacent
        let points: Vec<_> = rows
            .chunk_by(|a, b| a.0 == b.0)
            .map(|group| AgeAttackDataPoint {
                age: group[0].0,
                mean_attack: group.iter().map(|(_, attack)| attack).sum::<f64>()
                    / group.len() as f64,
            })
            .collect();

        debug!(ages = points.len(), "Aggregated mean attack by age");
        Ok(AttackByAgeView { points })
    }
}

/// Selects the countries with the highest mean attack and mean block
#[derive(Debug, Clone, Copy)]
pub struct TopCountries {
    /// How many countries each metric keeps
    pub limit: usize,
}

impl TopCountries {
    /// Keep `limit` countries per metric
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Highest `limit` entries by value, ties broken by country name
    fn top_n<'a>(&self, means: &[(&'a str, f64)]) -> Vec<(&'a str, f64)> {
        let mut ranked = means.to_vec();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.limit);
        ranked
    }
}

impl Default for TopCountries {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_COUNTRIES)
    }
}

impl DataAggregator<TopCountriesView> for TopCountries {
    #[instrument(skip(self, table), fields(rows = table.len(), limit = self.limit))]
    fn aggregate(&self, table: &Table) -> Result<TopCountriesView> {
        if self.limit == 0 {
            return Err(VnlError::validation_field(
                "Top country limit must be at least 1",
                "limit",
            ));
        }

        let mut groups: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
        for record in table {
            let entry = groups.entry(record.country.as_str()).or_insert((0.0, 0.0, 0));
            entry.0 += record.attack;
            entry.1 += record.block;
            entry.2 += 1;
        }

        let attack_means: Vec<_> = groups
            .iter()
            .map(|(country, (attack, _, n))| (*country, attack / *n as f64))
            .collect();
        let block_means: Vec<_> = groups
            .iter()
            .map(|(country, (_, block, n))| (*country, block / *n as f64))
            .collect();

        let top_attack = self.top_n(&attack_means);
        let top_block = self.top_n(&block_means);
        let block_lookup: BTreeMap<&str, f64> = top_block.iter().copied().collect();
        let attack_lookup: BTreeMap<&str, f64> = top_attack.iter().copied().collect();

        // Attack ranking first, then countries that only made the block ranking
        let mut countries: Vec<_> = top_attack
            .iter()
            .map(|(country, attack)| CountryScoreDataPoint {
                country: (*country).to_string(),
                attack: Some(*attack),
                block: block_lookup.get(country).copied(),
            })
            .collect();
        countries.extend(
            top_block
                .iter()
                .filter(|(country, _)| !attack_lookup.contains_key(country))
                .map(|(country, block)| CountryScoreDataPoint {
                    country: (*country).to_string(),
                    attack: None,
                    block: Some(*block),
                }),
        );

        debug!(
            countries = countries.len(),
            groups = groups.len(),
            "Selected top countries"
        );
        Ok(TopCountriesView {
            limit: self.limit,
            countries,
        })
    }
}

/// Counts players per court position
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionCounts;

impl DataAggregator<PositionDistributionView> for PositionCounts {
    #[instrument(skip(self, table), fields(rows = table.len()))]
    fn aggregate(&self, table: &Table) -> Result<PositionDistributionView> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in table {
            *counts.entry(record.position.as_str()).or_insert(0) += 1;
        }

        let total = table.len();
        let mut positions: Vec<_> = counts
            .into_iter()
            .map(|(position, count)| PositionDataPoint {
                position: position.to_string(),
                count,
                percentage: if total > 0 {
                    count as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        // BTreeMap order is by label, so a stable sort keeps ties alphabetical
        positions.sort_by(|a, b| b.count.cmp(&a.count));

        debug!(positions = positions.len(), "Counted positions");
        Ok(PositionDistributionView { total, positions })
    }
}

/// Bins ages into equal-width bins over the observed range
#[derive(Debug, Clone, Copy)]
pub struct AgeHistogram {
    /// Number of equal-width bins
    pub bins: usize,
}

impl AgeHistogram {
    /// Use `bins` equal-width bins
    pub fn new(bins: usize) -> Self {
        Self { bins }
    }

    /// Bin edges over the observed range; `bins + 1` values
    fn edges(&self, ages: &[f64]) -> Vec<f64> {
        let (lower, upper) = match observed_range(ages) {
            None => (0.0, 1.0),
            Some((min, max)) if min == max => (min - 0.5, max + 0.5),
            Some(range) => range,
        };

        let mut edges: Vec<f64> = (0..=self.bins)
            .map(|i| lower + (upper - lower) * i as f64 / self.bins as f64)
            .collect();
        if let Some(last) = edges.last_mut() {
            *last = upper;
        }
        edges
    }
}

impl Default for AgeHistogram {
    fn default() -> Self {
        Self::new(DEFAULT_HISTOGRAM_BINS)
    }
}

fn observed_range(values: &[f64]) -> Option<(f64, f64)> {
    let min = values.iter().copied().min_by(f64::total_cmp)?;
    let max = values.iter().copied().max_by(f64::total_cmp)?;
    Some((min, max))
}

/// Index of the bin holding `value`; the last bin includes its upper edge
fn bin_index(edges: &[f64], value: f64) -> usize {
    let bins = edges.len() - 1;
    let lower = edges[0];
    let width = (edges[bins] - lower) / bins as f64;

    let mut index = (((value - lower) / width).floor().max(0.0) as usize).min(bins - 1);
    // Float division can land one bin off near an edge
    while index > 0 && value < edges[index] {
        index -= 1;
    }
    while index < bins - 1 && value >= edges[index + 1] {
        index += 1;
    }
    index
}

impl DataAggregator<AgeHistogramView> for AgeHistogram {
    #[instrument(skip(self, table), fields(rows = table.len(), bins = self.bins))]
    fn aggregate(&self, table: &Table) -> Result<AgeHistogramView> {
        if self.bins == 0 {
            return Err(VnlError::validation_field(
                "Histogram needs at least one bin",
                "bins",
            ));
        }

        let ages: Vec<f64> = table.iter().map(|r| r.age).collect();
        let edges = self.edges(&ages);

        let mut counts = vec![0usize; self.bins];
        for &age in &ages {
            counts[bin_index(&edges, age)] += 1;
        }

        let bins: Vec<_> = edges
            .windows(2)
            .zip(counts)
            .map(|(edge, count)| HistogramBin {
                lower: edge[0],
                upper: edge[1],
                count,
            })
            .collect();

        let density = match observed_range(&ages) {
            Some((min, max)) => {
                let bin_width = (edges[self.bins] - edges[0]) / self.bins as f64;
                let scale = ages.len() as f64 * bin_width;
                gaussian_kde(&ages, min, max, DENSITY_GRID_POINTS, scale)
            }
            None => Vec::new(),
        };

        debug!(
            density_points = density.len(),
            "Binned {} ages",
            ages.len()
        );
        Ok(AgeHistogramView { bins, density })
    }
}
