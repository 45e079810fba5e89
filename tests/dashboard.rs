//! Dashboard coordinator end to end over a scripted gateway.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use alphawatch::config::DashboardConfig;
use alphawatch::dashboard::{Dashboard, DashboardUpdate};
use alphawatch::domain::calc::RangeField;
use alphawatch::domain::price::Trend;
use alphawatch::domain::token::Token;
use alphawatch::select::Key;

use common::{dec, MockGateway};

fn tokens() -> Vec<Token> {
    vec![
        Token::new("KOGE", "ALPHA_22"),
        Token::new("ZKJ", "ALPHA_118"),
        Token::new("B2", "ALPHA_7"),
    ]
}

fn dashboard(gateway: &Arc<MockGateway>) -> Dashboard {
    Dashboard::new(gateway.clone(), &DashboardConfig::default())
}

#[tokio::test(start_paused = true)]
async fn token_list_populates_selector() {
    let gateway = Arc::new(MockGateway::new().tokens(tokens()));
    let mut dash = dashboard(&gateway);

    dash.load_tokens().await;
    assert!(!dash.is_loading_tokens());
    assert!(!dash.selector().is_disabled());
    let labels: Vec<_> = dash
        .selector()
        .options()
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(labels, ["KOGE (ALPHA_22)", "ZKJ (ALPHA_118)", "B2 (ALPHA_7)"]);
}

#[tokio::test(start_paused = true)]
async fn token_list_failure_leaves_selector_empty() {
    let gateway = Arc::new(MockGateway::new());
    let mut dash = dashboard(&gateway);

    dash.load_tokens().await;
    assert!(dash.tokens().is_empty());
    assert!(dash.selector().options().is_empty());
    assert!(!dash.selector().is_disabled());
    assert!(dash.error().is_none());
}

#[tokio::test(start_paused = true)]
async fn select_without_polling_fetches_once() {
    let gateway = Arc::new(MockGateway::new().price("ALPHA_22", "KOGE", Duration::ZERO));
    let mut dash = dashboard(&gateway);
    assert_eq!(dash.symbol(), "—");
    assert_eq!(dash.placeholders(), 15);

    dash.select("ALPHA_22");
    let update = dash.next_update().await.unwrap();
    assert!(matches!(update, DashboardUpdate::Price { .. }));

    assert_eq!(dash.symbol(), "KOGE");
    assert_eq!(dash.history().len(), 1);
    assert_eq!(dash.placeholders(), 14);
    let rows = dash.rows();
    assert_eq!(rows[0].last, "1.50000000");
    assert_eq!(rows[0].trend, Trend::Flat);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(gateway.price_calls_for("ALPHA_22"), 1);
}

#[tokio::test(start_paused = true)]
async fn polling_accumulates_history_newest_first() {
    let gateway = Arc::new(MockGateway::new().price("ALPHA_22", "KOGE", Duration::ZERO));
    let config = DashboardConfig::default().history_capacity(3).polling(true);
    let mut dash = Dashboard::new(gateway.clone(), &config);

    dash.set_frequency(1);
    dash.select("ALPHA_22");
    for _ in 0..5 {
        dash.next_update().await.unwrap();
    }

    assert_eq!(dash.history().len(), 3);
    assert_eq!(dash.placeholders(), 0);
    let last: Vec<_> = dash.rows().into_iter().map(|r| r.last).collect();
    assert_eq!(last, ["5.50000000", "4.50000000", "3.50000000"]);
    assert_eq!(dash.rows()[0].trend, Trend::Up);

    dash.shutdown();
    assert!(!dash.controller().is_running());
}

#[tokio::test(start_paused = true)]
async fn switching_target_drops_the_old_targets_result() {
    let gateway = Arc::new(
        MockGateway::new()
            .price("SLOW", "SLOW", Duration::from_secs(3))
            .price("FAST", "FAST", Duration::ZERO),
    );
    let mut dash = dashboard(&gateway);

    dash.select("SLOW");
    dash.select("FAST");
    match dash.next_update().await.unwrap() {
        DashboardUpdate::Price { observation, .. } => assert_eq!(observation.symbol, "FAST"),
        other => panic!("unexpected update: {other:?}"),
    }

    sleep(Duration::from_secs(5)).await;
    assert!(dash.drain_updates().await.is_empty());
    assert_eq!(dash.symbol(), "FAST");
    assert_eq!(dash.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failure_is_shown_then_cleared_by_next_success() {
    let gateway = Arc::new(
        MockGateway::new()
            .price("ALPHA_22", "KOGE", Duration::ZERO)
            .failing("ALPHA_22", &[0]),
    );
    let mut dash = dashboard(&gateway);

    dash.select("ALPHA_22");
    assert_eq!(
        dash.next_update().await,
        Some(DashboardUpdate::Failed("upstream unavailable".into()))
    );
    assert_eq!(dash.error(), Some("upstream unavailable"));
    assert!(dash.history().is_empty());

    assert!(dash.query());
    dash.next_update().await.unwrap();
    assert!(dash.error().is_none());
    assert_eq!(dash.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn clear_history_keeps_latest_price() {
    let gateway = Arc::new(MockGateway::new().price("ALPHA_22", "KOGE", Duration::ZERO));
    let mut dash = dashboard(&gateway);

    dash.select("ALPHA_22");
    dash.next_update().await.unwrap();
    dash.clear_history();
    assert!(dash.history().is_empty());
    assert!(dash.rows().is_empty());
    assert_eq!(dash.symbol(), "KOGE");
    assert_eq!(dash.latest().unwrap().price_now, dec("1.5"));
}

#[tokio::test(start_paused = true)]
async fn query_without_target_is_a_no_op() {
    let gateway = Arc::new(MockGateway::new());
    let mut dash = dashboard(&gateway);
    assert!(!dash.query());
    sleep(Duration::from_secs(1)).await;
    assert!(gateway.price_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn auto_calculation_follows_price() {
    let gateway = Arc::new(MockGateway::new().price("ALPHA_22", "KOGE", Duration::ZERO));
    let mut dash = dashboard(&gateway);
    assert!(dash.calculator().is_disabled());

    dash.select("ALPHA_22");
    match dash.next_update().await.unwrap() {
        DashboardUpdate::Price { recalculated, .. } => assert!(recalculated),
        other => panic!("unexpected update: {other:?}"),
    }
    assert_eq!(gateway.calc_calls(), 1);
    // 0.15 / 1030 * 1.5
    assert_eq!(dash.calculator().display_lower(), "0.00021845");

    assert!(dash.set_calc_input(RangeField::WasteUpper, "0.5").await);
    assert_eq!(gateway.calc_calls(), 2);

    // invalid input never reaches the gateway
    assert!(!dash.set_calc_input(RangeField::PerVolume, "0").await);
    assert_eq!(gateway.calc_calls(), 2);
    assert_eq!(dash.calculator().error(), Some("per_volume must be > 0"));
}

#[tokio::test(start_paused = true)]
async fn manual_calculation_reports_gateway_error() {
    let gateway = Arc::new(
        MockGateway::new()
            .price("ALPHA_22", "KOGE", Duration::ZERO)
            .calc_failure(r#"{"detail":"calculation unavailable"}"#),
    );
    let mut dash = dashboard(&gateway);
    assert!(!dash.set_calc_auto(false).await);
    assert!(!dash.calculate().await);

    dash.select("ALPHA_22");
    match dash.next_update().await.unwrap() {
        DashboardUpdate::Price { recalculated, .. } => assert!(!recalculated),
        other => panic!("unexpected update: {other:?}"),
    }
    assert_eq!(gateway.calc_calls(), 0);

    assert!(dash.calculate().await);
    assert_eq!(gateway.calc_calls(), 1);
    assert_eq!(dash.calculator().error(), Some("calculation unavailable"));
    assert_eq!(dash.calculator().display_lower(), "—");
    assert!(!dash.calculator().is_computing());
}

#[tokio::test(start_paused = true)]
async fn keyboard_commit_selects_target() {
    let gateway = Arc::new(
        MockGateway::new()
            .tokens(tokens())
            .price("ALPHA_118", "ZKJ", Duration::ZERO),
    );
    let mut dash = dashboard(&gateway);
    dash.load_tokens().await;

    dash.selector_input("zk");
    assert!(dash.selector().is_open());
    assert!(dash.selector_key(Key::Enter));
    assert!(!dash.selector().is_open());
    assert_eq!(dash.target().as_str(), "ALPHA_118");
    assert_eq!(dash.selector_text(), "ZKJ (ALPHA_118)");

    dash.next_update().await.unwrap();
    assert_eq!(dash.symbol(), "ZKJ");
}

#[tokio::test(start_paused = true)]
async fn custom_mode_disables_selector_and_selects_typed_target() {
    let gateway = Arc::new(
        MockGateway::new()
            .tokens(tokens())
            .price("BTCUSDT", "BTC", Duration::ZERO),
    );
    let mut dash = dashboard(&gateway);
    dash.load_tokens().await;

    dash.set_custom_text("  BTCUSDT ");
    assert!(dash.target().is_empty());

    dash.set_custom_mode(true);
    assert!(dash.selector().is_disabled());
    dash.selector_focus();
    assert!(!dash.selector().is_open());
    assert_eq!(dash.target().as_str(), "BTCUSDT");
    // unknown to the selector, so the raw id is shown
    assert_eq!(dash.selector_text(), "BTCUSDT");

    dash.next_update().await.unwrap();
    assert_eq!(dash.symbol(), "BTC");

    dash.set_custom_mode(false);
    assert!(!dash.selector().is_disabled());
}

#[tokio::test(start_paused = true)]
async fn frequency_input_is_clamped() {
    let gateway = Arc::new(MockGateway::new());
    let mut dash = dashboard(&gateway);

    dash.set_frequency(0);
    assert_eq!(dash.frequency().seconds(), 1);
    dash.set_frequency(600);
    assert_eq!(dash.frequency().seconds(), 60);
    dash.set_frequency_text("abc");
    assert_eq!(dash.frequency().seconds(), 1);
    dash.set_frequency_text("12");
    assert_eq!(dash.frequency().seconds(), 12);
}

#[tokio::test(start_paused = true)]
async fn reselecting_same_target_drops_fetches_from_before_the_reset() {
    let gateway = Arc::new(MockGateway::new().price("ALPHA_22", "KOGE", Duration::from_secs(3)));
    let config = DashboardConfig::default().polling(true);
    let mut dash = Dashboard::new(gateway.clone(), &config);

    dash.select("ALPHA_22");
    sleep(Duration::from_secs(1)).await;
    dash.select("ALPHA_22");

    // the t=0 lookup lands first and is skipped; the t=1 lookup is kept
    match dash.next_update().await.unwrap() {
        DashboardUpdate::Price { observation, .. } => {
            assert_eq!(observation.price_now, dec("2.5"))
        }
        other => panic!("unexpected update: {other:?}"),
    }
    assert_eq!(dash.history().len(), 1);
    assert_eq!(gateway.price_calls_for("ALPHA_22"), 2);
    dash.shutdown();
}
