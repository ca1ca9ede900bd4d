use crate::domain::market_data::{DepthAnalysis, Snapshot};
use ordered_float::OrderedFloat;

/// Equal-width bands over `count` ordinal slots, no padding.
///
/// A reversed range (`start > end`) puts slot 0 at the far end, so the lowest
/// domain value lands at the bottom of a y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f64,
    end: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        Self {
            count,
            start: range.0,
            end: range.1,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bandwidth(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.end - self.start).abs() / self.count as f64
    }

    /// Leading (smaller-coordinate) edge of band `index`.
    pub fn position(&self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        let step = self.bandwidth();
        let low = self.start.min(self.end);
        let slot = if self.start <= self.end {
            index
        } else {
            self.count - 1 - index
        };
        Some(low + step * slot as f64)
    }
}

/// Band scale over the sorted distinct prices of a window.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceScale {
    prices: Vec<f64>,
    bands: BandScale,
}

impl PriceScale {
    /// `prices` must be sorted ascending and de-duplicated.
    pub fn new(prices: Vec<f64>, plot_height: f64) -> Self {
        let bands = BandScale::new(prices.len(), (plot_height, 0.0));
        Self { prices, bands }
    }

    pub fn domain(&self) -> &[f64] {
        &self.prices
    }

    pub fn bandwidth(&self) -> f64 {
        self.bands.bandwidth()
    }

    /// Top edge of the band for `price`; `None` for prices outside the domain.
    /// Compares with the same equality used to de-duplicate the domain.
    pub fn position(&self, price: f64) -> Option<f64> {
        self.prices
            .binary_search_by_key(&OrderedFloat(price), |&p| OrderedFloat(p))
            .ok()
            .and_then(|index| self.bands.position(index))
    }
}

/// Linear map `[0, domain_max] -> [0, range_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_max: f64,
    range_max: f64,
}

impl LinearScale {
    /// A non-positive `domain_max` is replaced by 1.
    pub fn new(domain_max: f64, range_max: f64) -> Self {
        Self {
            domain_max: if domain_max > 0.0 { domain_max } else { 1.0 },
            range_max,
        }
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    pub fn apply(&self, value: f64) -> f64 {
        value / self.domain_max * self.range_max
    }
}

/// Positional scales derived from one visible window.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    /// One band per visible snapshot, indexed by window position.
    pub x: BandScale,
    pub y: PriceScale,
    pub bid_ask: LinearScale,
}

impl Scales {
    /// `None` when the plot has no area or the window is empty.
    pub fn compute(
        window: &[Snapshot],
        plot_width: f64,
        plot_height: f64,
        bar_panel_width: f64,
    ) -> Option<Self> {
        let latest = window.last()?;
        if !(plot_width > 0.0 && plot_height > 0.0) {
            return None;
        }

        Some(Self {
            x: BandScale::new(window.len(), (0.0, plot_width)),
            y: PriceScale::new(DepthAnalysis::distinct_prices(window), plot_height),
            bid_ask: LinearScale::new(latest.max_volume(), bar_panel_width),
        })
    }
}

/// Holds the last successfully computed scales.
#[derive(Debug, Clone, Default)]
pub struct ScaleEngine {
    current: Option<Scales>,
}

impl ScaleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from `window`; keeps the previous scales when nothing can be
    /// computed. Returns whether the scales were replaced.
    pub fn recompute(
        &mut self,
        window: &[Snapshot],
        plot_width: f64,
        plot_height: f64,
        bar_panel_width: f64,
    ) -> bool {
        match Scales::compute(window, plot_width, plot_height, bar_panel_width) {
            Some(scales) => {
                self.current = Some(scales);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&Scales> {
        self.current.as_ref()
    }
}
