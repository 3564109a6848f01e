use market_data::sparkline::render::render_svg_points;
use market_data::{MarketSnapshot, SparklineGenerator, TrendDirection, ViewBox};

const DAY: i64 = 20_000;

fn btc() -> MarketSnapshot {
    MarketSnapshot {
        symbol: "BTC/USDT".to_string(),
        last_price: 68900.0,
        high_24h: 69500.0,
        low_24h: 68000.0,
        change_pct_24h: 2.5,
    }
}

fn snapshot(last: f64, high: f64, low: f64, change: f64, symbol: &str) -> MarketSnapshot {
    MarketSnapshot {
        symbol: symbol.to_string(),
        last_price: last,
        high_24h: high,
        low_24h: low,
        change_pct_24h: change,
    }
}

fn assert_positive_and_finite(prices: &[f64]) {
    for price in prices {
        assert!(price.is_finite(), "non-finite price {}", price);
        assert!(*price > 0.0, "non-positive price {}", price);
    }
}

fn parse_pairs(points: &str) -> Vec<(f64, f64)> {
    points
        .split(' ')
        .map(|pair| {
            let (x, y) = pair.split_once(',').expect("pair has a comma");
            (x.parse().unwrap(), y.parse().unwrap())
        })
        .collect()
}

#[test]
fn test_generates_default_count() {
    let generator = SparklineGenerator::default();
    let prices = generator.generate_prices(68900.0, 69500.0, 68000.0, 2.5, "BTC/USDT", 40);
    assert_eq!(prices.len(), 40);
    assert_eq!(generator.generate_for_snapshot(&btc()).len(), 40);
}

#[test]
fn test_last_point_equals_last_price() {
    let generator = SparklineGenerator::default();
    let prices = generator.generate_prices_on_day(&btc(), 40, DAY);
    assert_eq!(prices[39], 68900.0);
}

#[test]
fn test_deterministic_output() {
    let generator = SparklineGenerator::default();
    let a = generator.generate_prices_on_day(&btc(), 40, DAY);
    let b = generator.generate_prices_on_day(&btc(), 40, DAY);
    assert_eq!(a, b);

    let bits_a: Vec<u64> = a.iter().map(|p| p.to_bits()).collect();
    let bits_b: Vec<u64> = b.iter().map(|p| p.to_bits()).collect();
    assert_eq!(bits_a, bits_b);
}

#[test]
fn test_symbol_and_trend_bucket_change_the_curve() {
    let generator = SparklineGenerator::default();
    let base = generator.generate_prices_on_day(&btc(), 40, DAY);

    let mut other_symbol = btc();
    other_symbol.symbol = "ETH/USDT".to_string();
    assert_ne!(base, generator.generate_prices_on_day(&other_symbol, 40, DAY));

    let mut other_bucket = btc();
    other_bucket.change_pct_24h = 5.0;
    assert_ne!(base, generator.generate_prices_on_day(&other_bucket, 40, DAY));

    assert_ne!(base, generator.generate_prices_on_day(&btc(), 40, DAY + 1));
}

#[test]
fn test_all_prices_positive_with_crash() {
    let generator = SparklineGenerator::default();
    let prices = generator.generate_prices_on_day(
        &snapshot(68900.0, 69500.0, 68000.0, -50.0, "BTC/USDT"),
        40,
        DAY,
    );
    assert_eq!(prices.len(), 40);
    assert_positive_and_finite(&prices);
}

#[test]
fn test_handles_zero_range() {
    let generator = SparklineGenerator::default();
    let prices =
        generator.generate_prices_on_day(&snapshot(100.0, 100.0, 100.0, 0.0, "STABLE/USDT"), 40, DAY);
    assert_eq!(prices.len(), 40);
    assert_positive_and_finite(&prices);
}

#[test]
fn test_handles_zero_price() {
    let generator = SparklineGenerator::default();
    let prices = generator.generate_prices(0.0, 100.0, 50.0, 5.0, "ZERO/USDT", 40);
    assert!(prices.is_empty());
    let prices = generator.generate_prices(-1.0, 100.0, 50.0, 5.0, "NEG/USDT", 40);
    assert!(prices.is_empty());
}

#[test]
fn test_handles_extreme_change() {
    let generator = SparklineGenerator::default();
    let prices =
        generator.generate_prices_on_day(&snapshot(0.001, 0.005, 0.0001, 500.0, "MEME/USDT"), 40, DAY);
    assert_eq!(prices.len(), 40);
    assert_eq!(prices[39], 0.001);
    assert_positive_and_finite(&prices);
}

#[test]
fn test_floor_keeps_prices_positive() {
    // Huge range relative to the price pushes the walk into the floor
    let generator = SparklineGenerator::default();
    let prices =
        generator.generate_prices_on_day(&snapshot(0.001, 1000.0, 0.0, -500.0, "DUST/USDT"), 400, DAY);
    assert_positive_and_finite(&prices);
}

#[test]
fn test_handles_inverted_range() {
    let generator = SparklineGenerator::default();
    let prices =
        generator.generate_prices_on_day(&snapshot(68900.0, 65000.0, 72000.0, 2.5, "BTC/USDT"), 40, DAY);
    assert_eq!(prices.len(), 40);
    assert_eq!(prices[39], 68900.0);
    assert_positive_and_finite(&prices);
}

#[test]
fn test_handles_tiny_range() {
    let generator = SparklineGenerator::default();
    let prices =
        generator.generate_prices_on_day(&snapshot(1.00001, 1.00002, 1.00000, 0.01, "PEG/USDT"), 40, DAY);
    assert_eq!(prices.len(), 40);
    assert_positive_and_finite(&prices);
}

#[test]
fn test_count_minimum() {
    let generator = SparklineGenerator::default();
    assert!(generator.generate_prices(68900.0, 69500.0, 68000.0, 2.5, "BTC/USDT", 1).is_empty());
    assert!(generator.generate_prices(68900.0, 69500.0, 68000.0, 2.5, "BTC/USDT", 0).is_empty());
    assert_eq!(generator.generate_prices_on_day(&btc(), 2, DAY).len(), 2);
}

fn assert_within_viewbox(prices: &[f64]) {
    let generator = SparklineGenerator::default();
    let points = generator.render_svg_points(prices);

    let pairs = parse_pairs(&points.polyline_points);
    assert_eq!(pairs.len(), prices.len());
    for (x, y) in pairs {
        assert!((0.0..=100.0).contains(&x), "x out of bounds: {}", x);
        assert!((0.0..=30.0).contains(&y), "y out of bounds: {}", y);
    }
}

#[test]
fn test_svg_points_within_viewbox() {
    let generator = SparklineGenerator::default();
    assert_within_viewbox(&generator.generate_prices_on_day(&btc(), 40, DAY));
}

#[test]
fn test_svg_points_within_viewbox_for_extreme_series() {
    let generator = SparklineGenerator::default();
    let dust = generator.generate_prices_on_day(&snapshot(0.001, 1000.0, 0.0, -500.0, "DUST/USDT"), 400, DAY);
    let meme = generator.generate_prices_on_day(&snapshot(0.001, 0.005, 0.0001, 500.0, "MEME/USDT"), 40, DAY);
    assert_within_viewbox(&dust);
    assert_within_viewbox(&meme);
}

#[test]
fn test_svg_x_spans_full_width() {
    let generator = SparklineGenerator::default();
    let prices = generator.generate_prices_on_day(&btc(), 40, DAY);
    let pairs = parse_pairs(&generator.render_svg_points(&prices).polyline_points);
    assert_eq!(pairs.first().unwrap().0, 0.0);
    assert_eq!(pairs.last().unwrap().0, 100.0);
}

#[test]
fn test_svg_polygon_closes_path() {
    let generator = SparklineGenerator::default();
    let prices = generator.generate_prices_on_day(&btc(), 40, DAY);
    let points = generator.render_svg_points(&prices);

    assert!(points.polygon_points.ends_with("100,30 0,30"));
    assert!(points.polygon_points.starts_with(&points.polyline_points));
}

#[test]
fn test_renderer_handles_empty_prices() {
    let points = render_svg_points(&[], ViewBox::default());
    assert_eq!(points.polyline_points, "");
    assert_eq!(points.polygon_points, "");
    assert!(points.is_empty());
}

#[test]
fn test_renderer_handles_equal_prices() {
    let points = render_svg_points(&vec![100.0; 40], ViewBox::default());
    for (_, y) in parse_pairs(&points.polyline_points) {
        assert_eq!(y, 15.0);
    }
}

#[test]
fn test_trend_direction() {
    let generator = SparklineGenerator::default();
    assert_eq!(generator.get_trend_direction(5.0), TrendDirection::Positive);
    assert_eq!(generator.get_trend_direction(-3.0), TrendDirection::Negative);
    assert_eq!(generator.get_trend_direction(0.0), TrendDirection::Positive);
    assert_eq!(generator.get_trend_direction(-0.0), TrendDirection::Positive);
    assert_eq!(TrendDirection::Negative.to_string(), "negative");
}
