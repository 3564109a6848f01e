use common::model::order::Side;
use market_data::upstream::{parse_order_book, parse_ticker_stats, TickerStats};
use market_data::{
    BookLevel, MarketDataService, MoverMode, OrderBookSnapshot, PriceLevel, SparklineGenerator,
    TrendDirection, ViewBox,
};

fn book() -> OrderBookSnapshot {
    OrderBookSnapshot {
        symbol: "BTC_USDT".to_string(),
        bids: vec![
            PriceLevel::new(99.0, 2.0),
            PriceLevel::new(98.0, 2.0),
            PriceLevel::new(97.0, 2.0),
        ],
        asks: vec![
            PriceLevel::new(101.0, 2.0),
            PriceLevel::new(102.0, 2.0),
            PriceLevel::new(103.0, 2.0),
        ],
    }
}

#[test]
fn test_buy_walks_asks() {
    let service = MarketDataService::new();
    let quote = service.quote_slippage(&book(), Side::Buy, 4.0);

    assert_eq!(quote.symbol, "BTC_USDT");
    assert_eq!(quote.side, Side::Buy);
    assert_eq!(quote.best_price, 101.0);
    assert_eq!(quote.avg_price, 101.5);
    assert_eq!(quote.total_cost, 406.0);
    assert_eq!(quote.spread, 2.0);
    assert_eq!(quote.spread_pct, 2.0202);
}

#[test]
fn test_sell_walks_bids() {
    let service = MarketDataService::new();
    let quote = service.quote_slippage(&book(), Side::Sell, 4.0);

    assert_eq!(quote.best_price, 99.0);
    assert_eq!(quote.avg_price, 98.5);
    assert_eq!(quote.depth_used, 4.0);
}

#[test]
fn test_depth_limit_caps_liquidity() {
    let service = MarketDataService::new();
    let quote = service.quote_slippage_with_depth(&book(), Side::Buy, 6.0, 1);

    // Only the first ask level is visible
    assert_eq!(quote.depth_used, 2.0);
    assert_eq!(quote.total_cost, 202.0);
    assert_eq!(quote.amount, 6.0);
}

#[test]
fn test_service_depth_is_clamped() {
    let service = MarketDataService::with_settings(SparklineGenerator::default(), 10_000);
    assert_eq!(service.max_depth(), 250);

    let service = MarketDataService::with_settings(SparklineGenerator::default(), 0);
    assert_eq!(service.max_depth(), 1);
}

#[test]
fn test_empty_book_quote_is_zero() {
    let service = MarketDataService::new();
    let empty = OrderBookSnapshot {
        symbol: "BTC_USDT".to_string(),
        ..Default::default()
    };
    let quote = service.quote_slippage(&empty, Side::Buy, 1.0);

    assert_eq!(quote.avg_price, 0.0);
    assert_eq!(quote.depth_used, 0.0);
    assert_eq!(quote.spread, 0.0);
    assert_eq!(quote.spread_pct, 0.0);
}

#[test]
fn test_quote_from_upstream_payload() {
    let body = r#"{"bids": [["68899.5", "0.5"]], "asks": [["68900.5", "0.25"], ["68901.5", "1"]]}"#;
    let book = parse_order_book(body, "BTC_USDT").unwrap();
    let quote = MarketDataService::new().quote_slippage(&book, Side::Buy, 0.5);

    // 0.25 * 68900.5 + 0.25 * 68901.5 = 34450.5
    assert_eq!(quote.total_cost, 34450.5);
    assert_eq!(quote.avg_price, 68901.0);
    assert_eq!(quote.spread, 1.0);
}

#[test]
fn test_ticker_sparkline() {
    let service = MarketDataService::with_settings(
        SparklineGenerator::new(
            20,
            ViewBox {
                width: 200.0,
                height: 50.0,
            },
        ),
        250,
    );
    let stats = TickerStats {
        symbol: "ETH/USDT".to_string(),
        last_price: 3800.0,
        high_24h: 3900.0,
        low_24h: 3700.0,
        change_pct_24h: Some(-1.2),
        quote_volume: 1_000_000.0,
        highest_bid: 3799.5,
        lowest_ask: 3800.5,
        ..Default::default()
    };
    let row = service.ticker_sparkline(&stats).unwrap();

    assert_eq!(row.base, "ETH");
    assert_eq!(row.quote, "USDT");
    assert_eq!(row.trend, TrendDirection::Negative);
    assert_eq!(row.volume_24h, 1_000_000.0);
    assert_eq!(row.highest_bid, 3799.5);
    assert_eq!(row.lowest_ask, 3800.5);
    assert_eq!(row.prices.len(), 20);
    assert_eq!(row.prices[19], 3800.0);
    assert!(row.points.polygon_points.ends_with("200,50 0,50"));
}

#[test]
fn test_ticker_sparkline_serializes_flat_points() {
    let stats = TickerStats {
        symbol: "BTC/USDT".to_string(),
        last_price: 68900.0,
        high_24h: 69500.0,
        low_24h: 68000.0,
        change_pct_24h: Some(2.5),
        ..Default::default()
    };
    let row = MarketDataService::new().ticker_sparkline(&stats).unwrap();
    let json = serde_json::to_value(&row).unwrap();

    assert_eq!(json["trend"], "positive");
    assert!(json["polyline_points"].is_string());
    assert!(json["polygon_points"].is_string());
}

#[test]
fn test_ticker_sparklines_filters_and_skips_bad_symbols() {
    let body = r#"[
        {"symbol": "BTC/USDT", "lastPrice": "68900", "highestPrice24H": "69500", "lowestPrice24H": "68000", "priceChangePercent24H": "2.5"},
        {"symbol": "BROKEN", "lastPrice": "1"},
        {"symbol": "ETH/USDT", "lastPrice": "3800", "highestPrice24H": "3900", "lowestPrice24H": "3700", "priceChangePercent24H": "-1.2"},
        {"symbol": "XRP/USDT", "lastPrice": "0.5"}
    ]"#;
    let stats = parse_ticker_stats(body).unwrap();
    let rows = MarketDataService::new().ticker_sparklines(&stats, &["ETH/USDT", "BROKEN", "BTC/USDT"]);

    let symbols: Vec<_> = rows.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["BTC/USDT", "ETH/USDT"]);
}

#[test]
fn test_zero_price_ticker_has_no_sparkline() {
    let stats = TickerStats {
        symbol: "ZERO/USDT".to_string(),
        ..Default::default()
    };
    let row = MarketDataService::new().ticker_sparkline(&stats).unwrap();

    assert!(row.prices.is_empty());
    assert!(row.points.is_empty());
    assert_eq!(row.trend, TrendDirection::Positive);
}

const MOVERS: &str = r#"[
    {"symbol": "BTC/USDT", "lastPrice": "68900", "priceChangePercent24H": "2.5", "quoteVolume": "900"},
    {"symbol": "ETH/USDT", "lastPrice": "3800", "priceChangePercent24H": "-1.2"},
    {"symbol": "NEW/USDT", "lastPrice": "1"},
    {"symbol": "EMPTY/USDT", "lastPrice": "1", "priceChangePercent24H": ""},
    {"symbol": "SOL/USDT", "lastPrice": "150", "priceChangePercent24H": "7.75"},
    {"symbol": "XRP/USDT", "lastPrice": "0.5", "priceChangePercent24H": "-4"}
]"#;

fn movers_symbols(mode: MoverMode, limit: usize) -> Vec<String> {
    let stats = parse_ticker_stats(MOVERS).unwrap();
    MarketDataService::new()
        .movers(&stats, mode, limit)
        .into_iter()
        .map(|row| row.symbol)
        .collect()
}

#[test]
fn test_movers_gainers_sort_descending() {
    assert_eq!(
        movers_symbols(MoverMode::Gainers, 10),
        vec!["SOL/USDT", "BTC/USDT", "ETH/USDT", "XRP/USDT"]
    );
}

#[test]
fn test_movers_losers_sort_ascending_and_truncate() {
    assert_eq!(movers_symbols(MoverMode::Losers, 2), vec!["XRP/USDT", "ETH/USDT"]);
    assert_eq!(movers_symbols(MoverMode::Losers, 1_000).len(), 4);
}

#[test]
fn test_mover_row_fields() {
    let stats = parse_ticker_stats(MOVERS).unwrap();
    let rows = MarketDataService::new().movers(&stats, MoverMode::Gainers, 2);
    let btc = &rows[1];

    assert_eq!(btc.base, "BTC");
    assert_eq!(btc.quote, "USDT");
    assert_eq!(btc.last_price, 68900.0);
    assert_eq!(btc.change_pct_24h, 2.5);
    assert_eq!(btc.volume_24h, 900.0);
}

#[test]
fn test_order_book_summary() {
    let summary = MarketDataService::new().order_book_summary(&book(), 2);

    assert_eq!(summary.symbol, "BTC_USDT");
    assert_eq!(
        summary.bids,
        vec![
            BookLevel { price: 99.0, amount: 2.0 },
            BookLevel { price: 98.0, amount: 2.0 },
        ]
    );
    assert_eq!(summary.asks.len(), 2);
    assert_eq!(summary.spread, 2.0);
    assert_eq!(summary.spread_pct, 2.0202);
}

#[test]
fn test_order_book_summary_respects_service_depth() {
    let service = MarketDataService::with_settings(SparklineGenerator::default(), 1);
    let summary = service.order_book_summary(&book(), 20);
    assert_eq!(summary.bids.len(), 1);
    assert_eq!(summary.asks.len(), 1);
}
