use stock_heatmap::HeatmapChart;
use stock_heatmap::domain::chart::ChartOptions;
use stock_heatmap::domain::market_data::{
    DepthLevel, MarketDepth, Price, Quantity, QuoteStats, Snapshot,
};
use stock_heatmap::infrastructure::rendering::RecordingSurface;

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

/// 800x400 surface: 645px plot, 40 bands of 16.125px.
fn chart() -> HeatmapChart<RecordingSurface> {
    let mut chart = HeatmapChart::new(ChartOptions::default());
    chart.attach(RecordingSurface::new(800.0, 400.0));
    chart.set_data((0..50).map(snapshot).collect());
    chart
}

#[test]
fn dragging_right_reveals_older_snapshots() {
    let mut chart = chart();
    chart.pointer_down(300.0);
    assert!(chart.pointer_move(333.0).is_some());
    assert_eq!(chart.state().viewport.window_position(), 7);
}

#[test]
fn slow_drag_accumulates_until_a_band_is_crossed() {
    let mut chart = chart();
    chart.pointer_down(300.0);
    assert!(chart.pointer_move(290.0).is_none());
    assert!(chart.pointer_move(283.0).is_some());
    assert_eq!(chart.state().viewport.window_position(), 10);
}

#[test]
fn drag_past_the_end_is_ignored() {
    let mut chart = chart();
    chart.pointer_down(300.0);
    chart.pointer_move(283.0);
    assert_eq!(chart.state().viewport.window_position(), 10);

    assert!(chart.pointer_move(266.0).is_none());
    assert_eq!(chart.state().viewport.window_position(), 10);
}

#[test]
fn release_ends_the_drag() {
    let mut chart = chart();
    chart.pointer_down(300.0);
    chart.pointer_up();
    assert!(chart.pointer_move(400.0).is_none());
    assert_eq!(chart.state().viewport.window_position(), 9);
}

#[test]
fn wheel_zooms_around_the_right_edge() {
    let mut chart = chart();
    assert!(chart.wheel(-120.0).is_some());
    assert_eq!(chart.state().viewport.window_length(), 39);
    assert_eq!(chart.state().viewport.window_position(), 10);

    assert!(chart.wheel(120.0).is_some());
    assert_eq!(chart.state().viewport.window_length(), 40);
    assert_eq!(chart.state().viewport.window_position(), 9);
}

#[test]
fn wheel_stops_at_limits() {
    let mut chart = chart();
    chart.set_zoom_level(3);
    assert!(chart.wheel(-1.0).is_none());
    assert_eq!(chart.state().viewport.window_length(), 3);

    chart.set_zoom_level(49);
    assert!(chart.wheel(1.0).is_none());
    assert_eq!(chart.state().viewport.window_length(), 49);
}

#[test]
fn detached_chart_ignores_pointer_input() {
    let mut chart = chart();
    assert!(chart.detach().is_some());
    chart.pointer_down(300.0);
    assert!(chart.pointer_move(400.0).is_none());
    assert!(chart.wheel(-1.0).is_none());
    assert_eq!(chart.state().viewport.window_position(), 9);
    assert_eq!(chart.state().viewport.window_length(), 40);
}
