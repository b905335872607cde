//! Plain-text tables for the terminal.

use swyftx_portfolio_core::models::holding::Holding;
use swyftx_portfolio_core::models::ledger::{CompletedEntry, PendingEntry, RejectedRecord};

pub fn holdings_table(holdings: &[Holding], currency: &str, total_value: f64) -> String {
    let value_header = format!("Value ({currency})");
    let mut out = String::new();
    out.push_str(&format!(
        "\nCode   (Name)                    |         Balance  | {value_header:>14}  |           Sold  |  Total gain\n"
    ));
    out.push_str(
        "---------------------------------+------------------+-----------------+-----------------+-------------\n",
    );
    for h in holdings {
        let name = format!("({})", h.name);
        let gain = match h.gain_pct() {
            Ok(pct) => format!("{pct:>7.2}%"),
            Err(_) => format!("{:>8}", "n/a"),
        };
        out.push_str(&format!(
            "{:6} {:26}|   {:>13.4}  |  {:>13.4}  |  {:>13.4}  |    {gain}\n",
            h.code, name, h.balance, h.value, h.sold_proceeds
        ));
    }
    out.push_str(&format!(
        "\nTotal portfolio value:                              {total_value:>14.2}\n"
    ));
    out
}

pub fn completed_table(entries: &[CompletedEntry], currency: &str) -> String {
    let mut out = format!("\nTransaction history (in {currency}):\n\n");
    out.push_str("  Code |     Action Type |        Amount |   Trans Value |           Fee |  Actual Value\n");
    out.push_str("-------+-----------------+---------------+---------------+---------------+---------------\n");
    for e in entries {
        out.push_str(&format!(
            "{:>6} | {:>15} | {:>13.4} | {:>13.4} | {:>13.4} | {:>13.4}\n",
            e.code,
            e.action_type.label(),
            e.amount,
            e.transaction_value,
            e.fee,
            e.received_value
        ));
    }
    out
}

pub fn pending_table(entries: &[PendingEntry], currency: &str) -> String {
    let mut out = format!("\nTransactions pending (in {currency}):\n\n");
    out.push_str("  Code |     Action Type |        Amount |       Trigger |   Actual Value\n");
    out.push_str("-------+-----------------+---------------+---------------+----------------\n");
    for e in entries {
        out.push_str(&format!(
            "{:>6} | {:>15} | {:>13.4} | {:>13.4} | {:>13.4}\n",
            e.code,
            e.action_type.label(),
            e.amount,
            e.implied_trigger,
            e.received_value
        ));
    }
    out
}

pub fn rejected_list(rejected: &[RejectedRecord]) -> String {
    if rejected.is_empty() {
        return String::new();
    }
    let mut out = format!("\n{} record(s) could not be processed:\n", rejected.len());
    for r in rejected {
        out.push_str(&format!("  {r}\n"));
    }
    out
}
