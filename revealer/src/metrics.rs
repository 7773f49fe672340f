use crate::{FrameScheduler, Viewport};

/// Configuration for [`ScrollMetricsEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsOptions {
    /// The header counts as scrolled once the offset is strictly greater than this.
    pub header_threshold: f64,
    /// Parallax offset per unit of scroll.
    pub parallax_factor: f64,
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            header_threshold: 18.0,
            parallax_factor: 0.12,
        }
    }
}

impl MetricsOptions {
    pub fn with_header_threshold(mut self, header_threshold: f64) -> Self {
        self.header_threshold = header_threshold;
        self
    }

    pub fn with_parallax_factor(mut self, parallax_factor: f64) -> Self {
        self.parallax_factor = parallax_factor;
        self
    }
}

/// Scroll-derived visual parameters for one frame. Raw instantaneous values, no easing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    /// Scroll progress in percent, `0.0..=100.0`. Zero when the document does not scroll.
    pub progress_percent: f64,
    pub header_scrolled: bool,
    /// Background shift applied to the parallax target.
    pub parallax_offset: f64,
}

impl ScrollMetrics {
    pub fn compute(viewport: &Viewport, options: &MetricsOptions) -> Self {
        let scrollable = viewport.document_height - viewport.height;
        let progress_percent = if scrollable > 0.0 {
            (viewport.scroll_offset / scrollable * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            progress_percent,
            header_scrolled: viewport.scroll_offset > options.header_threshold,
            parallax_offset: viewport.scroll_offset * options.parallax_factor,
        }
    }
}

/// Recomputes [`ScrollMetrics`] at most once per rendered frame.
#[derive(Clone, Debug, Default)]
pub struct ScrollMetricsEngine {
    options: MetricsOptions,
    scheduler: FrameScheduler,
    current: Option<ScrollMetrics>,
    recomputations: u64,
}

impl ScrollMetricsEngine {
    pub fn new(options: MetricsOptions) -> Self {
        Self {
            options,
            scheduler: FrameScheduler::new(),
            current: None,
            recomputations: 0,
        }
    }

    pub fn options(&self) -> &MetricsOptions {
        &self.options
    }

    /// Computes and stores the pre-scroll baseline unconditionally.
    pub fn baseline(&mut self, viewport: &Viewport) -> ScrollMetrics {
        let m = ScrollMetrics::compute(viewport, &self.options);
        self.store(m);
        m
    }

    /// Records a scroll notification. Returns `true` when the host must request a frame.
    pub fn on_scroll(&mut self) -> bool {
        let schedule = self.scheduler.request();
        if !schedule {
            rtrace!(
                coalesced = self.scheduler.coalesced(),
                "ScrollMetricsEngine: frame already pending"
            );
        }
        schedule
    }

    /// Runs the pending recomputation for this frame, if any, against the current geometry.
    pub fn on_frame(&mut self, viewport: &Viewport) -> Option<ScrollMetrics> {
        let options = &self.options;
        let m = self
            .scheduler
            .run(|| ScrollMetrics::compute(viewport, options))?;
        self.store(m);
        Some(m)
    }

    fn store(&mut self, m: ScrollMetrics) {
        self.current = Some(m);
        self.recomputations = self.recomputations.saturating_add(1);
    }

    /// The most recently applied metrics.
    pub fn current(&self) -> Option<ScrollMetrics> {
        self.current
    }

    /// Number of recomputations, the baseline included.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn is_frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }
}
