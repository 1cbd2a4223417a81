//! # Profit Calculator
//!
//! Revenue, tax and margin for selling a quantity of one item.
//!
//! ## Accounting
//! ```text
//! revenue  = item.final_price_with(qty, discount)     (pre-tax)
//! tax      = tax_policy.calculate_tax(revenue)        (pass-through)
//! cost     = item.cost_price × qty
//! profit   = revenue − cost                           (tax on neither side)
//! margin % = profit / revenue × 100                   (None if revenue = 0)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use ts_rs::TS;

use crate::item::Item;
use crate::money::Money;
use crate::pricing::discount::DiscountPolicy;
use crate::pricing::tax::TaxPolicy;

/// Immutable result of a profit calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub item_id: String,
    pub quantity: i64,
    pub revenue: Money,
    pub tax_amount: Money,
    pub cost_of_goods: Money,
    pub net_profit: Money,
    pub margin_percent: Option<f64>,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

impl FinancialReport {
    /// All-zero report.
    pub fn empty(item_id: impl Into<String>, quantity: i64) -> Self {
        FinancialReport {
            item_id: item_id.into(),
            quantity,
            revenue: Money::zero(),
            tax_amount: Money::zero(),
            cost_of_goods: Money::zero(),
            net_profit: Money::zero(),
            margin_percent: None,
            generated_at: Utc::now(),
        }
    }

    pub fn is_loss(&self) -> bool {
        self.net_profit.is_negative()
    }

    /// Plain-text report. Amounts are rounded here and nowhere else.
    ///
    /// The margin line is left out for a loss.
    pub fn render(&self, title: &str, currency: &str, decimals: u8) -> String {
        let places = usize::from(decimals);
        let mut out = String::new();
        let _ = writeln!(out, "===== FINANCIAL REPORT: {title} =====");
        let _ = writeln!(out, "Revenue:        {:>14.places$} {currency}", self.revenue.rounded(decimals));
        let _ = writeln!(out, "  (Tax owed):   {:>14.places$} {currency}", self.tax_amount.rounded(decimals));
        let _ = writeln!(out, "Cost of goods: -{:>14.places$} {currency}", self.cost_of_goods.rounded(decimals));
        let _ = writeln!(out, "Net profit:     {:>14.places$} {currency}", self.net_profit.rounded(decimals));
        if self.is_loss() {
            let _ = writeln!(out, "  LOSS-MAKING SALE");
        } else if let Some(margin) = self.margin_percent {
            let _ = writeln!(out, "  Margin:       {margin:>14.1} %");
        }
        out
    }
}

/// Stateless calculator over an item and a pair of policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfitCalculator;

impl ProfitCalculator {
    /// Builds the report for selling `qty` units.
    ///
    /// `qty ≤ 0` yields an all-zero report.
    ///
    /// ## Example
    /// ```rust
    /// use vitrine_core::ids::SequentialIds;
    /// use vitrine_core::pricing::{FlatVat, PercentageOff};
    /// use vitrine_core::{Item, ProfitCalculator};
    ///
    /// let ids = SequentialIds::default();
    /// let mut laptop = Item::generic("P-LAP", "Laptop", 450_000.0, &ids);
    /// laptop.try_set_cost_price(350_000.0);
    ///
    /// let report = ProfitCalculator.calculate(
    ///     &laptop,
    ///     1,
    ///     Some(&PercentageOff::new(10.0)),
    ///     &FlatVat::from_percentage(12.0),
    /// );
    /// assert!(!report.is_loss());
    /// assert!((report.net_profit.amount() - 55_000.0).abs() < 1e-6);
    /// ```
    pub fn calculate(
        &self,
        item: &Item,
        qty: i64,
        discount: Option<&dyn DiscountPolicy>,
        tax: &dyn TaxPolicy,
    ) -> FinancialReport {
        if qty <= 0 {
            return FinancialReport::empty(item.id(), qty);
        }

        let revenue = item.final_price_with(qty, discount);
        let tax_amount = tax.calculate_tax(revenue);
        let cost_of_goods = item.cost_price() * qty;
        let net_profit = revenue - cost_of_goods;
        let margin_percent = revenue
            .is_positive()
            .then(|| net_profit.amount() / revenue.amount() * 100.0);

        FinancialReport {
            item_id: item.id().to_string(),
            quantity: qty,
            revenue,
            tax_amount,
            cost_of_goods,
            net_profit,
            margin_percent,
            generated_at: Utc::now(),
        }
    }
}
