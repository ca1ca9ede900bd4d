use super::value_objects::{Color, Dimensions, Rect};
use crate::domain::errors::{AppError, ConfigResult};
use serde::Deserialize;

/// Theme colours and layout dimensions of the heatmap.
///
/// Deserialises from a partial camelCase JSON object; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    /// `[top, right, bottom, left]`
    pub border_padding: [f64; 4],
    pub bid_ask_width: f64,
    pub axis_y_width: f64,
    pub axis_x_height: f64,
    pub buy_color: Color,
    pub text_on_buy_color: Color,
    pub sell_color: Color,
    pub text_on_sell_color: Color,
    pub text_on_background: Color,
    pub text_highlight_on_background: Color,
    pub trade_color: Color,
    pub axis_tick_size: f64,
    pub axis_color: Color,
    pub x_axis_text_padding: f64,
    pub y_axis_text_padding: f64,
    pub bid_ask_graph_padding_left: f64,
    pub bid_ask_transition_duration: f64,
    pub volume_circle_max_radius: f64,
    pub running_ratio_seconds: usize,
    pub clear_color: Color,
    pub window_length: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            border_padding: [5.0, 5.0, 0.0, 0.0],
            bid_ask_width: 100.0,
            axis_y_width: 50.0,
            axis_x_height: 50.0,
            buy_color: Color::from_hex(0x388e3c),
            text_on_buy_color: Color::WHITE,
            sell_color: Color::from_hex(0xd32f2f),
            text_on_sell_color: Color::WHITE,
            text_on_background: Color::BLACK,
            text_highlight_on_background: Color::BLACK,
            trade_color: Color::from_hex(0x7434eb),
            axis_tick_size: 6.0,
            axis_color: Color::BLACK,
            x_axis_text_padding: 6.0,
            y_axis_text_padding: 6.0,
            bid_ask_graph_padding_left: 10.0,
            bid_ask_transition_duration: 500.0,
            volume_circle_max_radius: 20.0,
            running_ratio_seconds: 1,
            clear_color: Color::WHITE,
            window_length: 40,
        }
    }
}

impl ChartOptions {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let options: ChartOptions = serde_json::from_str(json)
            .map_err(|e| AppError::ConfigurationError(format!("invalid options: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("bidAskWidth", self.bid_ask_width),
            ("bidAskTransitionDuration", self.bid_ask_transition_duration),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AppError::ConfigurationError(format!("{name} must be positive")));
            }
        }

        let non_negative = [
            ("axisYWidth", self.axis_y_width),
            ("axisXHeight", self.axis_x_height),
            ("axisTickSize", self.axis_tick_size),
            ("xAxisTextPadding", self.x_axis_text_padding),
            ("yAxisTextPadding", self.y_axis_text_padding),
            ("bidAskGraphPaddingLeft", self.bid_ask_graph_padding_left),
            ("volumeCircleMaxRadius", self.volume_circle_max_radius),
        ];
        for (name, value) in non_negative
            .into_iter()
            .chain(self.border_padding.iter().map(|&p| ("borderPadding", p)))
        {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AppError::ConfigurationError(format!(
                    "{name} must not be negative"
                )));
            }
        }

        if self.running_ratio_seconds == 0 {
            return Err(AppError::ConfigurationError(
                "runningRatioSeconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn padding_top(&self) -> f64 {
        self.border_padding[0]
    }

    pub fn padding_right(&self) -> f64 {
        self.border_padding[1]
    }

    pub fn padding_bottom(&self) -> f64 {
        self.border_padding[2]
    }

    pub fn padding_left(&self) -> f64 {
        self.border_padding[3]
    }

    /// Region layout for a surface of the given size.
    pub fn layout(&self, dimensions: Dimensions) -> ChartLayout {
        let plot_width = dimensions.width
            - self.padding_right()
            - self.padding_left()
            - self.bid_ask_width
            - self.axis_y_width;
        let plot_height =
            dimensions.height - self.padding_top() - self.padding_bottom() - self.axis_x_height;

        let left = self.padding_left();
        let top = self.padding_top();
        let ratio_x = left + plot_width + self.axis_tick_size;
        let ratio_y = top + plot_height + self.axis_tick_size;

        ChartLayout {
            dimensions,
            heatmap: Rect::new(left, top, plot_width, plot_height),
            x_axis: Rect::new(left, top + plot_height, plot_width, self.axis_x_height),
            y_axis: Rect::new(
                left + plot_width,
                top,
                self.axis_y_width,
                plot_height + self.axis_tick_size,
            ),
            ratio: Rect::new(
                ratio_x,
                ratio_y,
                dimensions.width - ratio_x,
                dimensions.height - ratio_y,
            ),
        }
    }
}

/// Pixel regions of one chart. The bar panel is placed at render time
/// because it sits right of the widest y-axis label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub dimensions: Dimensions,
    pub heatmap: Rect,
    pub x_axis: Rect,
    pub y_axis: Rect,
    pub ratio: Rect,
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        self.heatmap.width
    }

    pub fn plot_height(&self) -> f64 {
        self.heatmap.height
    }

    /// Bar panel rectangle given the widest y label.
    pub fn bar_panel(&self, options: &ChartOptions, max_label_width: f64) -> Rect {
        Rect::new(
            self.y_axis.x
                + max_label_width
                + options.axis_tick_size
                + options.y_axis_text_padding
                + options.bid_ask_graph_padding_left,
            self.heatmap.y,
            options.bid_ask_width,
            self.heatmap.height + options.axis_tick_size,
        )
    }
}
