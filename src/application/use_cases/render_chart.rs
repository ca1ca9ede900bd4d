use crate::domain::{
    chart::{
        BarPanelFrame, BarTarget, BarTransition, ChartLayout, ChartOptions, ChartState, Color,
        LevelKey, Rect, Scales,
    },
    errors::RenderingResult,
    logging::LogComponent,
    market_data::{DepthAnalysis, Side, Snapshot},
};
use crate::infrastructure::rendering::{Font, Point, Surface, TextAlign, TextBaseline, TextStyle};
use crate::time_utils::format_zoom_level;
use crate::{log_debug, log_trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Windows at least this long compute heatmap cells in parallel.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Assumed x label used to thin the time axis.
const X_LABEL_SAMPLE: &str = "77:77:77";
const X_LABEL_GAP: f64 = 20.0;
const AXIS_LINE_WIDTH: f64 = 1.2;
const TRADE_LINE_WIDTH: f64 = 1.0;
/// Left inset of the zoom and last-trade readouts.
const READOUT_INSET: f64 = 20.0;

/// One buy or sell cell of the heatmap, in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub rect: Rect,
    pub color: Color,
}

/// Draws the five chart regions. Each region clears its own rectangle to the
/// background first; the rest of the surface is left alone.
pub struct RenderPipeline;

impl RenderPipeline {
    /// Full redraw. Restarts the bar transition and returns its generation,
    /// or `None` when there is nothing to draw yet.
    pub fn render(state: &mut ChartState, surface: &mut dyn Surface) -> RenderingResult<Option<u64>> {
        let Some(scales) = state.recompute_scales().cloned() else {
            log_trace!(LogComponent::Application("RenderPipeline"), "no scales, skipping render");
            state.animation.cancel();
            return Ok(None);
        };
        let layout = state.layout();
        let options = &state.options;
        let window = state.visible_window();
        let Some(latest) = window.last() else {
            return Ok(None);
        };

        surface.fill_rect(layout.heatmap, options.clear_color);
        Self::draw_heatmap(surface, &layout, options, &scales, window)?;
        Self::draw_x_axis(surface, &layout, options, &scales, window, state.viewport.window_length())?;
        let max_label_width = Self::draw_y_axis(surface, &layout, options, &scales)?;

        let transition = Self::bar_transition(&layout, options, &scales, latest, max_label_width);
        let generation = state.animation.restart(transition);
        if let Some(frame) = state.animation.tick(generation, 0.0) {
            Self::draw_bar_panel(surface, &state.options, &frame)?;
        }

        Self::draw_ratio(surface, &layout, &state.options, state.visible_window())?;

        log_debug!(
            LogComponent::Application("RenderPipeline"),
            "rendered {} snapshots, {} price levels",
            scales.x.count(),
            scales.y.domain().len()
        );
        Ok(Some(generation))
    }

    /// Repaint only the bar panel for one animation frame.
    pub fn draw_bar_panel(
        surface: &mut dyn Surface,
        options: &ChartOptions,
        frame: &BarPanelFrame,
    ) -> RenderingResult<()> {
        surface.fill_rect(frame.panel, options.clear_color);
        let label_font = Font::default();

        for bar in &frame.bars {
            let (fill, text_on_fill) = match bar.key.side {
                Side::Buy => (options.buy_color, options.text_on_buy_color),
                Side::Sell => (options.sell_color, options.text_on_sell_color),
            };
            let top = frame.panel.y + bar.top;
            surface.fill_rect(
                Rect::new(frame.panel.x, top, bar.length, frame.bar_height),
                fill,
            );

            let label = bar.qty.to_string();
            let text_width = surface.measure_text(&label, &label_font);
            let text_y = top + frame.bar_height / 2.0 + 1.0;
            let (x, style) = if frame.panel.width - bar.length - 2.0 >= text_width {
                (
                    bar.length + 2.0,
                    TextStyle::new(options.text_on_background, TextAlign::Start, TextBaseline::Middle),
                )
            } else {
                (
                    bar.length - 2.0,
                    TextStyle::new(text_on_fill, TextAlign::End, TextBaseline::Middle),
                )
            };
            surface.fill_text(&label, (frame.panel.x + x, text_y), &style)?;
        }
        Ok(())
    }

    /// Cell geometry for every level of every visible snapshot.
    pub fn heatmap_cells(
        layout: &ChartLayout,
        options: &ChartOptions,
        scales: &Scales,
        window: &[Snapshot],
    ) -> Vec<HeatCell> {
        #[cfg(feature = "parallel")]
        {
            if window.len() >= PARALLEL_THRESHOLD {
                return window
                    .par_iter()
                    .enumerate()
                    .flat_map_iter(|(index, snapshot)| {
                        Self::snapshot_cells(layout, options, scales, index, snapshot)
                    })
                    .collect();
            }
        }

        window
            .iter()
            .enumerate()
            .flat_map(|(index, snapshot)| Self::snapshot_cells(layout, options, scales, index, snapshot))
            .collect()
    }

    fn snapshot_cells(
        layout: &ChartLayout,
        options: &ChartOptions,
        scales: &Scales,
        index: usize,
        snapshot: &Snapshot,
    ) -> Vec<HeatCell> {
        let Some(x) = scales.x.position(index) else {
            return Vec::new();
        };
        let max_volume = snapshot.max_volume();
        let width = scales.x.bandwidth();
        let height = scales.y.bandwidth();

        snapshot
            .market_depth
            .all_levels()
            .filter_map(|(side, level)| {
                let y = scales.y.position(level.rate.value())?;
                let base = match side {
                    Side::Buy => options.buy_color,
                    Side::Sell => options.sell_color,
                };
                Some(HeatCell {
                    rect: Rect::new(layout.heatmap.x + x, layout.heatmap.y + y, width, height),
                    color: base.with_alpha((level.qty.value() / max_volume) as f32),
                })
            })
            .collect()
    }

    fn trade_point(layout: &ChartLayout, scales: &Scales, index: usize, snapshot: &Snapshot) -> Option<Point> {
        let x = scales.x.position(index)?;
        let y = scales.y.position(snapshot.market_depth.last_traded_price.value())?;
        Some((layout.heatmap.x + x, layout.heatmap.y + y))
    }

    fn draw_heatmap(
        surface: &mut dyn Surface,
        layout: &ChartLayout,
        options: &ChartOptions,
        scales: &Scales,
        window: &[Snapshot],
    ) -> RenderingResult<()> {
        for cell in Self::heatmap_cells(layout, options, scales, window) {
            surface.fill_rect(cell.rect, cell.color);
        }

        let max_traded = DepthAnalysis::max_traded_volume(window);
        let max_radius = (scales.x.bandwidth() / 2.0).min(options.volume_circle_max_radius);
        let mut trade_line = Vec::with_capacity(window.len());

        for (index, snapshot) in window.iter().enumerate() {
            let Some(center) = Self::trade_point(layout, scales, index, snapshot) else {
                continue;
            };
            let radius = max_radius * snapshot.market_depth.last_traded_qty.value() / max_traded;
            surface.fill_circle(center, radius, options.trade_color)?;
            trade_line.push(center);
        }

        surface.stroke_polyline(&trade_line, options.trade_color, TRADE_LINE_WIDTH);
        Ok(())
    }

    fn draw_x_axis(
        surface: &mut dyn Surface,
        layout: &ChartLayout,
        options: &ChartOptions,
        scales: &Scales,
        window: &[Snapshot],
        window_length: usize,
    ) -> RenderingResult<()> {
        let area = layout.x_axis;
        surface.fill_rect(area, options.clear_color);

        let label_font = Font::default();
        let assumed_width = surface.measure_text(X_LABEL_SAMPLE, &label_font) + X_LABEL_GAP;
        let bandwidth = scales.x.bandwidth();
        let interval = if bandwidth > 0.0 {
            ((assumed_width / bandwidth).floor() as usize).max(1)
        } else {
            1
        };

        let mut segments = vec![((area.x, area.y), (area.x + area.width, area.y))];
        let label_style = TextStyle::new(options.text_on_background, TextAlign::Center, TextBaseline::Top);
        let label_y = area.y + options.axis_tick_size + options.x_axis_text_padding;

        for (index, snapshot) in window.iter().enumerate() {
            let Some(x) = scales.x.position(index) else {
                continue;
            };
            let x = area.x + x;
            segments.push(((x, area.y), (x, area.y + options.axis_tick_size)));
            if index % interval == 0 {
                surface.fill_text(&snapshot.ts, (x, label_y), &label_style)?;
            }
        }

        let readout_y = label_y + READOUT_INSET;
        let zoom_text = format!("Zoom Level:  {}", format_zoom_level(window_length));
        let zoom_style = TextStyle::new(options.text_on_background, TextAlign::Left, TextBaseline::Top);
        surface.fill_text(&zoom_text, (area.x + READOUT_INSET, readout_y), &zoom_style)?;

        if let Some(latest) = window.last() {
            let zoom_width = surface.measure_text(&zoom_text, &label_font);
            let trade_text = format!(
                "LTP:  {}     LTQ:  {}",
                latest.market_depth.last_traded_price.value(),
                latest.market_depth.last_traded_qty.value()
            );
            let trade_style = TextStyle::new(
                options.text_highlight_on_background,
                TextAlign::Left,
                TextBaseline::Top,
            );
            surface.fill_text(
                &trade_text,
                (area.x + READOUT_INSET + zoom_width + READOUT_INSET, readout_y),
                &trade_style,
            )?;
        }

        surface.stroke_segments(&segments, options.axis_color, AXIS_LINE_WIDTH);
        Ok(())
    }

    /// Returns the widest price label, which offsets the bar panel.
    fn draw_y_axis(
        surface: &mut dyn Surface,
        layout: &ChartLayout,
        options: &ChartOptions,
        scales: &Scales,
    ) -> RenderingResult<f64> {
        let area = layout.y_axis;
        surface.fill_rect(area, options.clear_color);

        let label_font = Font::default();
        let label_style = TextStyle::new(options.text_on_background, TextAlign::Start, TextBaseline::Top)
            .with_max_width(options.axis_y_width - options.axis_tick_size + options.y_axis_text_padding);
        let label_x = area.x + options.axis_tick_size + options.y_axis_text_padding;

        let mut segments = vec![((area.x, area.y), (area.x, area.y + area.height))];
        let mut max_label_width: f64 = 0.0;

        for &price in scales.y.domain() {
            let Some(y) = scales.y.position(price) else {
                continue;
            };
            let y = area.y + y;
            segments.push(((area.x, y), (area.x + options.axis_tick_size, y)));

            let label = format!("{price:.2}");
            surface.fill_text(&label, (label_x, y + 2.0), &label_style)?;
            max_label_width = max_label_width.max(surface.measure_text(&label, &label_font));
        }

        surface.stroke_segments(&segments, options.axis_color, AXIS_LINE_WIDTH);
        Ok(max_label_width)
    }

    fn bar_transition(
        layout: &ChartLayout,
        options: &ChartOptions,
        scales: &Scales,
        latest: &Snapshot,
        max_label_width: f64,
    ) -> BarTransition {
        let targets = latest
            .market_depth
            .all_levels()
            .filter_map(|(side, level)| {
                let rate = level.rate.value();
                Some(BarTarget {
                    key: LevelKey::new(side, rate),
                    qty: level.qty.value(),
                    top: scales.y.position(rate)?,
                    length: scales.bid_ask.apply(level.qty.value()),
                })
            })
            .collect();

        BarTransition {
            panel: layout.bar_panel(options, max_label_width),
            bar_height: (scales.y.bandwidth() - 2.0).max(0.0),
            targets,
        }
    }

    fn draw_ratio(
        surface: &mut dyn Surface,
        layout: &ChartLayout,
        options: &ChartOptions,
        window: &[Snapshot],
    ) -> RenderingResult<()> {
        let area = layout.ratio;
        if area.is_empty() {
            return Ok(());
        }
        surface.fill_rect(area, options.clear_color);

        let Some(ratio) = DepthAnalysis::buy_sell_ratio(window, options.running_ratio_seconds) else {
            return Ok(());
        };
        let text_height = (area.height - 15.0) / 2.0;
        if text_height <= 0.0 {
            return Ok(());
        }

        let style = TextStyle::new(options.text_on_background, TextAlign::Center, TextBaseline::Middle)
            .with_font(Font::bold(text_height));
        let center_x = area.x + area.width / 2.0;
        surface.fill_text(&format!("{ratio:.2}"), (center_x, area.y + text_height / 2.0), &style)?;
        surface.fill_text("Buy/Sell", (center_x, area.y + text_height * 1.5 + 5.0), &style)?;
        Ok(())
    }
}
