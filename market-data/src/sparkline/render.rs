//! Projection of a price series onto SVG coordinates

use common::decimal::precision::round_coordinate;

use crate::models::{PlotPoints, ViewBox};

/// Ranges narrower than this draw as a flat line
const FLAT_RANGE_EPSILON: f64 = 1e-12;

/// Vertical padding as a fraction of the price range
const PADDING_FRACTION: f64 = 0.1;

/// Project `prices` into `view_box`.
///
/// x spreads evenly from 0 to the width; y is inverted because SVG grows
/// downward. Fewer than two prices give empty strings.
pub fn render_svg_points(prices: &[f64], view_box: ViewBox) -> PlotPoints {
    if prices.len() < 2 {
        return PlotPoints::empty();
    }

    let ViewBox { width, height } = view_box;
    let buf_min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let buf_max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = buf_max - buf_min;
    let last_index = (prices.len() - 1) as f64;

    // None marks the flat case
    let scale = (range >= FLAT_RANGE_EPSILON).then(|| {
        let padding = range * PADDING_FRACTION;
        let y_min = buf_min - padding;
        (y_min, (buf_max + padding) - y_min)
    });
    let y_of = |price: f64| match scale {
        Some((y_min, y_range)) => (height - (price - y_min) / y_range * height).clamp(0.0, height),
        None => height / 2.0,
    };

    let polyline_points = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let x = round_coordinate(i as f64 * width / last_index);
            let y = round_coordinate(y_of(price));
            format!("{},{}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let polygon_points = format!("{} {},{} 0,{}", polyline_points, width, height, height);

    PlotPoints {
        polyline_points,
        polygon_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(points: &str) -> Vec<(f64, f64)> {
        points
            .split(' ')
            .map(|pair| {
                let (x, y) = pair.split_once(',').unwrap();
                (x.parse().unwrap(), y.parse().unwrap())
            })
            .collect()
    }

    #[test]
    fn test_two_points_span_the_box() {
        let points = render_svg_points(&[1.0, 2.0], ViewBox::default());
        // padding 0.1: y_min 0.9, y_range 1.2
        assert_eq!(points.polyline_points, "0,27.5 100,2.5");
        assert_eq!(points.polygon_points, "0,27.5 100,2.5 100,30 0,30");
    }

    #[test]
    fn test_flat_series_sits_in_the_middle() {
        let points = render_svg_points(&[5.0; 3], ViewBox::default());
        assert_eq!(points.polyline_points, "0,15 50,15 100,15");
    }

    #[test]
    fn test_custom_view_box() {
        let view_box = ViewBox {
            width: 60.0,
            height: 20.5,
        };
        let points = render_svg_points(&[3.0, 1.0, 2.0], view_box);
        for (x, y) in pairs(&points.polyline_points) {
            assert!((0.0..=60.0).contains(&x));
            assert!((0.0..=20.5).contains(&y));
        }
        assert!(points.polygon_points.ends_with("60,20.5 0,20.5"));
    }

    #[test]
    fn test_single_point_is_empty() {
        assert_eq!(render_svg_points(&[1.0], ViewBox::default()), PlotPoints::empty());
    }
}
