// ═══════════════════════════════════════════════════════════════════
// Service Tests — CurrencyService, ValuationService, LedgerService,
// AggregationService
// ═══════════════════════════════════════════════════════════════════

use swyftx_portfolio_core::errors::CoreError;
use swyftx_portfolio_core::models::account::Balance;
use swyftx_portfolio_core::models::asset::{ListedAsset, TradedAsset};
use swyftx_portfolio_core::models::catalog::ReferenceCatalog;
use swyftx_portfolio_core::models::holding::Holding;
use swyftx_portfolio_core::models::ledger::{CompletedEntry, PendingEntry};
use swyftx_portfolio_core::models::portfolio::RunningPortfolio;
use swyftx_portfolio_core::models::settings::EngineConfig;
use swyftx_portfolio_core::models::transaction::{ActionType, Transaction};
use swyftx_portfolio_core::services::aggregation_service::AggregationService;
use swyftx_portfolio_core::services::currency_service::CurrencyService;
use swyftx_portfolio_core::services::ledger_service::LedgerService;
use swyftx_portfolio_core::services::valuation_service::ValuationService;

// ═══════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════

const BTC: u64 = 1;
const ETH: u64 = 2;
const USDT: u64 = 3;
const DOGE: u64 = 4;

/// Anchor AUD. USDT mid = 1.49, BTC mid = 59500, ETH mid = 3950.
/// DOGE is listed but not traded.
fn catalog() -> ReferenceCatalog {
    ReferenceCatalog::new(
        vec![
            ListedAsset::new(BTC, "BTC", "Bitcoin"),
            ListedAsset::new(ETH, "ETH", "Ethereum"),
            ListedAsset::new(USDT, "USDT", "Tether"),
            ListedAsset::new(DOGE, "DOGE", "Dogecoin"),
        ],
        vec![
            TradedAsset::new(BTC, "BTC", 60000.0, 59000.0),
            TradedAsset::new(ETH, "ETH", 4000.0, 3900.0),
            TradedAsset::new(USDT, "USDT", 1.48, 1.50),
        ],
    )
    .unwrap()
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

fn tx(asset: u64, amount: f64, trigger: f64, action: &str, status: &str) -> Transaction {
    Transaction::new(asset, amount, trigger, action, status)
}

// ═══════════════════════════════════════════════════════════════════
// CurrencyService
// ═══════════════════════════════════════════════════════════════════

mod currency {
    use super::*;

    fn service() -> CurrencyService {
        CurrencyService::new("AUD")
    }

    #[test]
    fn anchor_mid_price_is_one() {
        assert_eq!(service().mid_price(&catalog(), "AUD").unwrap(), 1.0);
        assert_eq!(service().anchor_currency(), "AUD");
    }

    #[test]
    fn mid_price_of_traded_code() {
        assert!(approx(service().mid_price(&catalog(), "USDT").unwrap(), 1.49));
    }

    #[test]
    fn ratio_anchor_to_usdt_is_usdt_mid() {
        let ratio = service().ratio(&catalog(), "AUD", "USDT").unwrap();
        assert!(approx(ratio, 1.49), "got {ratio}");
    }

    #[test]
    fn ratio_of_code_with_itself_is_one() {
        let c = catalog();
        for code in ["BTC", "ETH", "USDT", "AUD"] {
            assert_eq!(service().ratio(&c, code, code).unwrap(), 1.0, "{code}");
        }
    }

    #[test]
    fn ratio_round_trip_is_one() {
        let c = catalog();
        let codes = ["AUD", "BTC", "ETH", "USDT"];
        for a in codes {
            for b in codes {
                let there = service().ratio(&c, a, b).unwrap();
                let back = service().ratio(&c, b, a).unwrap();
                assert!(approx(there * back, 1.0), "{a}/{b}: {}", there * back);
            }
        }
    }

    #[test]
    fn unknown_source_code_fails() {
        match service().ratio(&catalog(), "ZZZ", "USDT") {
            Err(CoreError::UnknownCurrency(code)) => assert_eq!(code, "ZZZ"),
            other => panic!("Expected UnknownCurrency, got {other:?}"),
        }
    }

    #[test]
    fn unknown_target_code_fails() {
        assert!(matches!(
            service().ratio(&catalog(), "BTC", "ZZZ"),
            Err(CoreError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn listed_but_untraded_code_is_unknown() {
        assert!(matches!(
            service().mid_price(&catalog(), "DOGE"),
            Err(CoreError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn zero_mid_price_is_invalid_quote() {
        let c = ReferenceCatalog::new(vec![], vec![TradedAsset::new(9, "DEAD", 0.0, 0.0)]).unwrap();
        match service().ratio(&c, "AUD", "DEAD") {
            Err(CoreError::InvalidQuote { code, mid }) => {
                assert_eq!(code, "DEAD");
                assert_eq!(mid, 0.0);
            }
            other => panic!("Expected InvalidQuote, got {other:?}"),
        }
    }

    #[test]
    fn negative_mid_price_is_invalid_quote() {
        let c = ReferenceCatalog::new(vec![], vec![TradedAsset::new(9, "NEG", -2.0, 1.0)]).unwrap();
        assert!(matches!(
            service().mid_price(&c, "NEG"),
            Err(CoreError::InvalidQuote { .. })
        ));
    }

    #[test]
    fn exists_currency_accepts_anchor_and_traded_codes() {
        let c = catalog();
        assert!(service().exists_currency(&c, "AUD"));
        assert!(service().exists_currency(&c, "BTC"));
        assert!(!service().exists_currency(&c, "DOGE"));
        assert!(!service().exists_currency(&c, "ZZZ"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ValuationService
// ═══════════════════════════════════════════════════════════════════

mod valuation {
    use super::*;

    fn service() -> ValuationService {
        ValuationService::new(EngineConfig::default())
    }

    fn history() -> Vec<Transaction> {
        vec![
            // most recent first
            tx(BTC, 200.0, 2.0, "Market Sell", "Complete"),
            tx(BTC, 0.5, 40000.0, "Limit Buy", "Complete"),
            tx(BTC, 9.0, 1.0, "Market Buy", "Pending"),
            tx(BTC, 9.0, 1.0, "Market Buy", "Failed"),
            tx(BTC, 50.0, 0.0, "Deposit", "Complete"),
            tx(ETH, 1.0, 3000.0, "Market Buy", "Complete"),
        ]
    }

    #[test]
    fn values_balance_at_sell_quote_over_display_mid() {
        let balances = vec![Balance::new(BTC, 0.5)];
        let report = service()
            .valuate(&balances, &catalog(), &[], "USDT")
            .unwrap();
        assert_eq!(report.holdings.len(), 1);
        let h = &report.holdings[0];
        assert_eq!(h.code, "BTC");
        assert_eq!(h.name, "Bitcoin");
        assert_eq!(h.balance, 0.5);
        assert!(approx(h.value, 0.5 * 59000.0 / 1.49));
    }

    #[test]
    fn value_in_anchor_uses_raw_sell_quote() {
        let balances = vec![Balance::new(BTC, 2.0)];
        let report = service().valuate(&balances, &catalog(), &[], "AUD").unwrap();
        assert!(approx(report.holdings[0].value, 118000.0));
    }

    #[test]
    fn cost_and_proceeds_from_completed_trades_only() {
        let balances = vec![Balance::new(BTC, 0.5)];
        let report = service()
            .valuate(&balances, &catalog(), &history(), "USDT")
            .unwrap();
        let h = &report.holdings[0];
        // In USDT the stablecoin factor is 1.
        assert!(approx(h.cost_basis, 1.006 * 0.5 * 40000.0), "cost {}", h.cost_basis);
        assert!(approx(h.sold_proceeds, 0.994 * 200.0 / 2.0), "sold {}", h.sold_proceeds);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn cost_in_anchor_is_scaled_by_stablecoin_mid() {
        let balances = vec![Balance::new(BTC, 0.5)];
        let report = service()
            .valuate(&balances, &catalog(), &history(), "AUD")
            .unwrap();
        let h = &report.holdings[0];
        assert!(approx(h.cost_basis, 1.006 * 0.5 * 40000.0 * 1.49));
        assert!(approx(h.sold_proceeds, 0.994 * 100.0 * 1.49));
    }

    #[test]
    fn gain_pct_is_value_plus_proceeds_over_cost() {
        let balances = vec![Balance::new(BTC, 0.5)];
        let report = service()
            .valuate(&balances, &catalog(), &history(), "USDT")
            .unwrap();
        let h = &report.holdings[0];
        let expected = 100.0 * (h.value + h.sold_proceeds) / h.cost_basis;
        assert!(approx(h.gain_pct().unwrap(), expected));
    }

    #[test]
    fn holding_without_buys_reports_division_by_zero_on_gain() {
        let balances = vec![Balance::new(USDT, 100.0)];
        let report = service()
            .valuate(&balances, &catalog(), &history(), "USDT")
            .unwrap();
        assert_eq!(report.holdings.len(), 1);
        assert!(matches!(
            report.holdings[0].gain_pct(),
            Err(CoreError::DivisionByZero(_))
        ));
    }

    #[test]
    fn zero_balance_never_appears() {
        let balances = vec![Balance::new(BTC, 0.0), Balance::new(ETH, 1.0)];
        let report = service()
            .valuate(&balances, &catalog(), &history(), "USDT")
            .unwrap();
        let codes: Vec<&str> = report.holdings.iter().map(|h| h.code.as_str()).collect();
        assert_eq!(codes, vec!["ETH"]);
    }

    #[test]
    fn unresolvable_balances_are_skipped_silently() {
        let balances = vec![
            Balance::new(99, 5.0),   // not listed
            Balance::new(DOGE, 5.0), // listed, not traded
            Balance::new(ETH, 1.0),
        ];
        let report = service()
            .valuate(&balances, &catalog(), &[], "USDT")
            .unwrap();
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].code, "ETH");
        assert!(report.rejected.is_empty());
    }

    // ── Captured log output ─────────────────────────────────────────

    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::{Mutex, Once};

    struct CaptureLogger;

    static CAPTURED: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT: Once = Once::new();

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            CAPTURED
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    fn install_logger() {
        INIT.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Trace);
        });
    }

    fn captured_level(message: &str) -> Option<Level> {
        CAPTURED
            .lock()
            .unwrap()
            .iter()
            .find(|(_, m)| m == message)
            .map(|(level, _)| *level)
    }

    #[test]
    fn skipped_balances_are_logged_as_warnings() {
        install_logger();
        let balances = vec![Balance::new(99, 5.0), Balance::new(DOGE, 5.0)];
        let report = service()
            .valuate(&balances, &catalog(), &[], "USDT")
            .unwrap();
        assert!(report.holdings.is_empty());

        assert_eq!(
            captured_level("Skipping balance of unlisted asset id 99"),
            Some(Level::Warn)
        );
        assert_eq!(
            captured_level("Skipping balance of untraded asset DOGE"),
            Some(Level::Warn)
        );
    }

    #[test]
    fn output_follows_balance_order() {
        let balances = vec![
            Balance::new(USDT, 10.0),
            Balance::new(BTC, 1.0),
            Balance::new(ETH, 1.0),
        ];
        let report = service()
            .valuate(&balances, &catalog(), &[], "AUD")
            .unwrap();
        let codes: Vec<&str> = report.holdings.iter().map(|h| h.code.as_str()).collect();
        assert_eq!(codes, vec!["USDT", "BTC", "ETH"]);
    }

    #[test]
    fn unknown_display_currency_fails_the_pass() {
        let balances = vec![Balance::new(BTC, 1.0)];
        assert!(matches!(
            service().valuate(&balances, &catalog(), &[], "ZZZ"),
            Err(CoreError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn missing_stablecoin_fails_the_pass() {
        let c = ReferenceCatalog::new(
            vec![ListedAsset::new(BTC, "BTC", "Bitcoin")],
            vec![TradedAsset::new(BTC, "BTC", 2.0, 1.0)],
        )
        .unwrap();
        match service().valuate(&[Balance::new(BTC, 1.0)], &c, &[], "AUD") {
            Err(CoreError::UnknownCurrency(code)) => assert_eq!(code, "USDT"),
            other => panic!("Expected UnknownCurrency, got {other:?}"),
        }
    }

    #[test]
    fn zero_trigger_sell_is_rejected_but_holding_survives() {
        let history = vec![
            tx(BTC, 10.0, 0.0, "Market Sell", "Complete"),
            tx(BTC, 1.0, 100.0, "Market Buy", "Complete"),
        ];
        let report = service()
            .valuate(&[Balance::new(BTC, 1.0)], &catalog(), &history, "USDT")
            .unwrap();
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].sold_proceeds, 0.0);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].reference, "history[0]");
        assert!(matches!(report.rejected[0].error, CoreError::DivisionByZero(_)));
    }

    #[test]
    fn custom_fee_rate_is_applied() {
        let config = EngineConfig {
            fee_rate: 0.01,
            ..EngineConfig::default()
        };
        let history = vec![tx(BTC, 1.0, 100.0, "Market Buy", "Complete")];
        let report = ValuationService::new(config)
            .valuate(&[Balance::new(BTC, 1.0)], &catalog(), &history, "USDT")
            .unwrap();
        assert!(approx(report.holdings[0].cost_basis, 101.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// LedgerService
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;

    fn service() -> LedgerService {
        LedgerService::new(EngineConfig::default())
    }

    #[test]
    fn completed_buy_values() {
        let history = vec![tx(BTC, 100.0, 2.0, "Market Buy", "Complete")];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        let e = &report.completed[0];
        assert_eq!(e.code, "BTC");
        assert_eq!(e.action_type, ActionType::MarketBuy);
        assert_eq!(e.amount, 100.0);
        assert!(approx(e.received_value, 200.0));
        assert!(approx(e.fee, 1.2));
        assert!(approx(e.transaction_value, 201.2));
    }

    #[test]
    fn completed_sell_values() {
        let history = vec![tx(BTC, 200.0, 2.0, "Limit Sell", "Complete")];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        let e = &report.completed[0];
        assert!(approx(e.transaction_value, 100.0));
        assert!(approx(e.fee, 0.6));
        assert!(approx(e.received_value, 99.4));
    }

    #[test]
    fn values_are_converted_to_display_currency() {
        let history = vec![tx(BTC, 100.0, 2.0, "Market Buy", "Complete")];
        let report = service().normalize(&history, &catalog(), "AUD").unwrap();
        let e = &report.completed[0];
        assert!(approx(e.received_value, 200.0 * 1.49));
        assert!(approx(e.fee, 1.2 * 1.49));
        assert!(approx(e.transaction_value, 201.2 * 1.49));
        // amount is a unit count and is never converted
        assert_eq!(e.amount, 100.0);
    }

    #[test]
    fn pending_entry_reports_inverse_trigger() {
        let history = vec![tx(ETH, 3.0, 4.0, "Limit Buy", "Pending")];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        assert!(report.completed.is_empty());
        let p = &report.pending[0];
        assert_eq!(p.code, "ETH");
        assert!(approx(p.implied_trigger, 0.25));
        assert!(approx(p.received_value, 12.0));
    }

    #[test]
    fn pending_trigger_is_scaled_inversely() {
        let history = vec![tx(ETH, 3.0, 4.0, "Limit Buy", "Pending")];
        let report = service().normalize(&history, &catalog(), "AUD").unwrap();
        let p = &report.pending[0];
        // trigger / 1.49, then inverted
        assert!(approx(p.implied_trigger, 1.49 / 4.0));
        assert!(approx(p.received_value, 12.0 * 1.49));
    }

    #[test]
    fn non_failed_other_status_is_pending() {
        let history = vec![tx(ETH, 1.0, 2.0, "Stop Limit Sell", "Cancelled")];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        assert_eq!(report.pending.len(), 1);
        assert!(approx(report.pending[0].received_value, 0.5 * 0.994));
    }

    #[test]
    fn excluded_types_and_failed_never_appear() {
        let history = vec![
            tx(USDT, 100.0, 0.0, "Deposit", "Complete"),
            tx(USDT, 50.0, 0.0, "Withdrawal", "Pending"),
            tx(BTC, 0.001, 0.0, "Dust Sell", "Complete"),
            tx(BTC, 1.0, 2.0, "Market Buy", "Failed"),
            tx(99, 1.0, 2.0, "Staking Reward", "Failed"),
        ];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        assert!(report.completed.is_empty());
        assert!(report.pending.is_empty());
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn entries_come_out_oldest_first() {
        let history = vec![
            tx(ETH, 1.0, 2.0, "Market Buy", "Complete"),  // newest
            tx(USDT, 1.0, 2.0, "Limit Buy", "Pending"),
            tx(BTC, 1.0, 2.0, "Market Sell", "Complete"), // oldest
        ];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        let codes: Vec<&str> = report.completed.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["BTC", "ETH"]);
        assert_eq!(report.pending[0].code, "USDT");
    }

    #[test]
    fn unresolved_asset_is_rejected_without_stopping_the_pass() {
        let history = vec![
            tx(99, 1.0, 2.0, "Market Buy", "Complete"),
            tx(BTC, 1.0, 2.0, "Market Buy", "Complete"),
        ];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].reference, "history[0]");
        assert!(matches!(report.rejected[0].error, CoreError::UnresolvedAsset(99)));
    }

    #[test]
    fn listed_only_asset_is_unresolved() {
        let history = vec![tx(DOGE, 1.0, 2.0, "Market Buy", "Complete")];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        assert!(matches!(report.rejected[0].error, CoreError::UnresolvedAsset(DOGE)));
    }

    #[test]
    fn unknown_action_type_is_rejected() {
        let history = vec![tx(BTC, 1.0, 2.0, "Staking Reward", "Complete")];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        assert!(report.completed.is_empty());
        match &report.rejected[0].error {
            CoreError::UnsupportedActionType(label) => assert_eq!(label, "Staking Reward"),
            other => panic!("Expected UnsupportedActionType, got {other:?}"),
        }
    }

    #[test]
    fn zero_trigger_sell_is_rejected() {
        let history = vec![tx(BTC, 1.0, 0.0, "Market Sell", "Complete")];
        let report = service().normalize(&history, &catalog(), "USDT").unwrap();
        assert!(matches!(report.rejected[0].error, CoreError::DivisionByZero(_)));
    }

    #[test]
    fn unknown_display_currency_fails_the_pass() {
        let history = vec![tx(BTC, 1.0, 2.0, "Market Buy", "Complete")];
        assert!(matches!(
            service().normalize(&history, &catalog(), "ZZZ"),
            Err(CoreError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn timestamps_are_carried_over() {
        let mut t = tx(BTC, 1.0, 2.0, "Market Buy", "Complete");
        t.updated = chrono::DateTime::from_timestamp_millis(1_650_000_000_000);
        let report = service().normalize(&[t.clone()], &catalog(), "USDT").unwrap();
        assert_eq!(report.completed[0].updated, t.updated);
    }

    #[test]
    fn input_is_not_mutated() {
        let history = vec![tx(BTC, 100.0, 2.0, "Market Buy", "Complete")];
        let before = history.clone();
        service().normalize(&history, &catalog(), "AUD").unwrap();
        assert_eq!(history, before);
    }
}

// ═══════════════════════════════════════════════════════════════════
// AggregationService
// ═══════════════════════════════════════════════════════════════════

mod aggregation {
    use super::*;

    fn holding(code: &str, balance: f64, value: f64, sold: f64, cost: f64) -> Holding {
        Holding {
            code: code.into(),
            name: format!("{code} coin"),
            balance,
            value,
            sold_proceeds: sold,
            cost_basis: cost,
        }
    }

    fn completed(code: &str) -> CompletedEntry {
        CompletedEntry {
            code: code.into(),
            action_type: ActionType::MarketBuy,
            amount: 1.0,
            transaction_value: 1.006,
            fee: 0.006,
            received_value: 1.0,
            updated: None,
        }
    }

    fn pending(code: &str) -> PendingEntry {
        PendingEntry {
            code: code.into(),
            action_type: ActionType::LimitSell,
            amount: 1.0,
            implied_trigger: 2.0,
            received_value: 0.497,
            updated: None,
        }
    }

    #[test]
    fn merge_into_empty_appends_in_order() {
        let mut p = RunningPortfolio::new();
        AggregationService::new().merge_holdings(
            &mut p,
            vec![holding("ETH", 1.0, 2.0, 0.0, 1.0), holding("BTC", 1.0, 2.0, 0.0, 1.0)],
        );
        let codes: Vec<&str> = p.holdings.iter().map(|h| h.code.as_str()).collect();
        assert_eq!(codes, vec!["ETH", "BTC"]);
    }

    #[test]
    fn self_merge_doubles_amounts_and_keeps_gain() {
        let set = vec![
            holding("BTC", 0.5, 29607.38, 99.4, 20120.0),
            holding("ETH", 2.0, 5234.9, 0.0, 6036.0),
        ];
        let gains: Vec<f64> = set.iter().map(|h| h.gain_pct().unwrap()).collect();

        let mut p = RunningPortfolio::new();
        let svc = AggregationService::default();
        svc.merge_holdings(&mut p, set.clone());
        svc.merge_holdings(&mut p, set.clone());

        assert_eq!(p.holdings.len(), 2);
        for ((merged, single), gain) in p.holdings.iter().zip(&set).zip(gains) {
            assert_eq!(merged.balance, 2.0 * single.balance);
            assert_eq!(merged.value, 2.0 * single.value);
            assert_eq!(merged.sold_proceeds, 2.0 * single.sold_proceeds);
            assert!(approx(merged.gain_pct().unwrap(), gain));
        }
    }

    #[test]
    fn merged_gain_is_recomputed_not_summed() {
        let mut p = RunningPortfolio::new();
        let svc = AggregationService::new();
        svc.merge_holdings(&mut p, vec![holding("BTC", 1.0, 150.0, 0.0, 100.0)]); // 150 %
        svc.merge_holdings(&mut p, vec![holding("BTC", 1.0, 50.0, 0.0, 100.0)]); //  50 %
        let merged = p.holding("BTC").unwrap();
        assert!(approx(merged.gain_pct().unwrap(), 100.0));
        assert_eq!(merged.name, "BTC coin");
    }

    #[test]
    fn new_codes_are_appended_after_existing() {
        let mut p = RunningPortfolio::new();
        let svc = AggregationService::new();
        svc.merge_holdings(&mut p, vec![holding("BTC", 1.0, 1.0, 0.0, 1.0)]);
        svc.merge_holdings(
            &mut p,
            vec![holding("ETH", 1.0, 1.0, 0.0, 1.0), holding("BTC", 1.0, 1.0, 0.0, 1.0)],
        );
        let codes: Vec<&str> = p.holdings.iter().map(|h| h.code.as_str()).collect();
        assert_eq!(codes, vec!["BTC", "ETH"]);
        assert_eq!(p.holding("BTC").unwrap().balance, 2.0);
    }

    #[test]
    fn ledger_merge_concatenates_in_arrival_order() {
        let mut p = RunningPortfolio::new();
        let svc = AggregationService::new();
        svc.merge_ledger(&mut p, vec![completed("BTC")], vec![pending("ETH")]);
        svc.merge_ledger(&mut p, vec![completed("USDT"), completed("BTC")], vec![]);
        let codes: Vec<&str> = p.completed.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["BTC", "USDT", "BTC"]);
        assert_eq!(p.pending.len(), 1);
    }
}
