use stock_heatmap::HeatmapChart;
use stock_heatmap::application::FrameStatus;
use stock_heatmap::domain::chart::{ChartOptions, Color, Dimensions, Rect};
use stock_heatmap::domain::market_data::{
    DepthLevel, MarketDepth, Price, Quantity, QuoteStats, Snapshot,
};
use stock_heatmap::infrastructure::rendering::{DrawCommand, RecordingSurface, TextAlign};

fn snapshot(second: usize) -> Snapshot {
    Snapshot::new(
        format!("09:{:02}:{:02}", second / 60 % 60, second % 60),
        MarketDepth {
            last_traded_price: Price::from(101.0),
            last_traded_qty: Quantity::from(3.0),
            buy_order_volume: Quantity::from(300.0),
            sell_order_volume: Quantity::from(200.0),
            buys: vec![DepthLevel::new(100.0, 5.0, 1)],
            sells: vec![DepthLevel::new(102.0, 10.0, 1)],
            quote: QuoteStats::default(),
        },
    )
}

fn rendered() -> (HeatmapChart<RecordingSurface>, u64) {
    let mut chart = HeatmapChart::new(ChartOptions::default());
    assert!(chart.attach(RecordingSurface::new(800.0, 400.0)).is_none());
    let generation = chart.set_data((0..50).map(snapshot).collect()).unwrap();
    (chart, generation)
}

fn clear_index(surface: &RecordingSurface, region: Rect) -> Option<usize> {
    surface.commands().iter().position(|command| {
        matches!(command, DrawCommand::FillRect { rect, color } if *rect == region && *color == Color::WHITE)
    })
}

#[test]
fn regions_are_cleared_in_drawing_order() {
    let (chart, _) = rendered();
    let surface = chart.surface().unwrap();
    let layout = chart.state().layout();

    assert_eq!(layout.heatmap, Rect::new(0.0, 5.0, 645.0, 345.0));
    // "100.00" measures 36px on the recording surface
    let bar_panel = Rect::new(703.0, 5.0, 100.0, 351.0);

    let order: Vec<usize> = [layout.heatmap, layout.x_axis, layout.y_axis, bar_panel, layout.ratio]
        .into_iter()
        .map(|region| clear_index(surface, region).unwrap())
        .collect();
    assert_eq!(order[0], 0);
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn heatmap_shades_cells_by_relative_volume() {
    let (chart, _) = rendered();
    let options = ChartOptions::default();
    let cells: Vec<(Rect, Color)> = chart
        .surface()
        .unwrap()
        .filled_rects()
        .into_iter()
        .filter(|(_, color)| color.r == options.buy_color.r || color.r == options.sell_color.r)
        .filter(|(rect, _)| rect.x < 645.0)
        .collect();

    assert_eq!(cells.len(), 80);
    let (first_buy, buy_color) = cells[0];
    assert_eq!(first_buy, Rect::new(0.0, 235.0, 16.125, 115.0));
    assert_eq!(buy_color.a, 0.5);
    let (first_sell, sell_color) = cells[1];
    assert_eq!(first_sell.y, 5.0);
    assert_eq!(sell_color.a, 1.0);
}

#[test]
fn trades_are_marked_with_scaled_circles() {
    let (chart, _) = rendered();
    let circles = chart.surface().unwrap().circles();
    assert_eq!(circles.len(), 40);
    let ((x, y), radius) = circles[0];
    assert_eq!((x, y), (0.0, 120.0));
    assert_eq!(radius, 16.125 / 2.0);
}

#[test]
fn axes_and_readouts_are_labelled() {
    let (chart, _) = rendered();
    let texts = chart.surface().unwrap().texts();

    assert!(texts.contains(&"09:00:09"));
    for price in ["100.00", "101.00", "102.00"] {
        assert!(texts.contains(&price), "missing price label {price}");
    }
    assert!(texts.contains(&"1.50"));
    assert!(texts.contains(&"Buy/Sell"));

    let readouts: Vec<&str> = texts
        .iter()
        .copied()
        .filter(|text| text.starts_with("Zoom") || text.starts_with("LTP"))
        .collect();
    insta::assert_snapshot!(readouts.join("\n"), @r"
    Zoom Level:  40s
    LTP:  101     LTQ:  3
    ");
}

#[test]
fn bars_grow_to_their_volume_share() {
    let (mut chart, generation) = rendered();
    assert_eq!(chart.tick_animation(generation, 250.0), FrameStatus::Running);

    chart.surface_mut().unwrap().clear();
    assert_eq!(chart.tick_animation(generation, 500.0), FrameStatus::Finished);

    let surface = chart.surface().unwrap();
    let bars: Vec<Rect> = surface
        .filled_rects()
        .into_iter()
        .map(|(rect, _)| rect)
        .filter(|rect| rect.x == 703.0 && rect.height == 113.0)
        .collect();
    assert_eq!(bars, vec![
        Rect::new(703.0, 235.0, 50.0, 113.0),
        Rect::new(703.0, 5.0, 100.0, 113.0),
    ]);

    let labels: Vec<(&str, f64, TextAlign)> = surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { text, at, style } => Some((text.as_str(), at.0, style.align)),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec![("5", 755.0, TextAlign::Start), ("10", 801.0, TextAlign::End)]);
}

#[test]
fn superseded_transition_stops() {
    let (mut chart, first) = rendered();
    let second = chart.set_zoom_level(20).unwrap();
    assert_ne!(first, second);
    assert_eq!(chart.tick_animation(first, 100.0), FrameStatus::Stopped);
    assert_eq!(chart.tick_animation(second, 100.0), FrameStatus::Running);
}

#[test]
fn detached_chart_stops_animating() {
    let (mut chart, generation) = rendered();
    chart.detach();
    assert_eq!(chart.tick_animation(generation, 100.0), FrameStatus::Stopped);
    assert!(chart.render().is_none());
}

#[test]
fn zero_sized_surface_draws_nothing() {
    let mut chart = HeatmapChart::new(ChartOptions::default());
    chart.attach(RecordingSurface::new(0.0, 0.0));
    assert!(chart.set_data((0..10).map(snapshot).collect()).is_none());
    assert!(chart.surface().unwrap().commands().is_empty());
}

#[test]
fn collapsed_plot_skips_render_after_a_full_draw() {
    let (mut chart, generation) = rendered();
    chart.surface_mut().unwrap().clear();

    assert!(chart.set_dimensions(Dimensions::new(100.0, 40.0)).is_none());
    assert!(chart.surface().unwrap().commands().is_empty());
    assert_eq!(chart.tick_animation(generation, 100.0), FrameStatus::Stopped);
    assert!(chart.surface().unwrap().commands().is_empty());

    assert!(chart.set_dimensions(Dimensions::new(800.0, 400.0)).is_some());
    assert!(!chart.surface().unwrap().commands().is_empty());
}
