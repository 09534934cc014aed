// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure KPI derivation from raw campaign counters.
//!
//! Deterministic, no I/O. Monetary and ratio outputs are rounded to two
//! decimal places here, at the point of derivation, so cached and
//! transmitted values are reproducible across repeated reads.

use crate::types::{KpiSet, RawMetricsRow};

/// Rounds to two decimal places (half away from zero, matching `f64::round`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derives the KPI set for one period from a raw counter row.
///
/// Divide-by-zero policy: every ratio whose denominator is zero is 0, not
/// NaN or infinity. A campaign listed but absent from the report gets the
/// all-zero row via [`derive_or_zero`], not an error.
pub fn derive(row: &RawMetricsRow) -> KpiSet {
    let spend = row.cost;
    let sales = row.sales_7d;
    let clicks = row.clicks;
    let impressions = row.impressions;
    let orders = row.purchases_7d;

    let cpc = if clicks > 0 {
        spend / clicks as f64
    } else {
        0.0
    };
    let ctr = if impressions > 0 {
        clicks as f64 / impressions as f64 * 100.0
    } else {
        0.0
    };
    let acos = if sales > 0.0 {
        spend / sales * 100.0
    } else {
        0.0
    };
    let roas = if spend > 0.0 { sales / spend } else { 0.0 };
    let conversion_rate = if clicks > 0 {
        orders as f64 / clicks as f64 * 100.0
    } else {
        0.0
    };

    KpiSet {
        impressions,
        clicks,
        orders,
        units: row.units_sold_clicks_7d,
        sales: round2(sales),
        spend: round2(spend),
        cpc: round2(cpc),
        ctr: round2(ctr),
        acos: round2(acos),
        roas: round2(roas),
        conversion_rate: round2(conversion_rate),
    }
}

/// Derives KPIs for a campaign that may have no report row this period.
/// Absence means zero activity, so the result is the all-zero KPI set.
pub fn derive_or_zero(row: Option<&RawMetricsRow>) -> KpiSet {
    match row {
        Some(row) => derive(row),
        None => KpiSet::default(),
    }
}

/// Derives the previous-period KPI set. A completely absent row yields
/// `None` ("no comparison available"), never a zeroed set, so downstream
/// percent-change rendering is suppressed instead of showing a spurious 0%.
pub fn derive_previous(row: Option<&RawMetricsRow>) -> Option<KpiSet> {
    row.map(derive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        impressions: u64,
        clicks: u64,
        cost: f64,
        purchases: u64,
        units: u64,
        sales: f64,
    ) -> RawMetricsRow {
        RawMetricsRow {
            campaign_id: "c1".into(),
            campaign_name: "Test".into(),
            impressions,
            clicks,
            cost,
            purchases_7d: purchases,
            units_sold_clicks_7d: units,
            sales_7d: sales,
        }
    }

    #[test]
    fn reference_scenario_matches_expected_kpis() {
        // impressions 1000, clicks 50, orders 5, sales 250.00, spend 125.00
        let kpis = derive(&row(1000, 50, 125.0, 5, 5, 250.0));
        assert_eq!(kpis.cpc, 2.50);
        assert_eq!(kpis.ctr, 5.00);
        assert_eq!(kpis.acos, 50.00);
        assert_eq!(kpis.roas, 2.00);
        assert_eq!(kpis.conversion_rate, 10.00);
    }

    #[test]
    fn previous_period_reference_scenario() {
        // sales 200.00, spend 80.00 -> ACOS 40.00, ROAS 2.50
        let prev = derive_previous(Some(&row(0, 0, 80.0, 0, 0, 200.0))).unwrap();
        assert_eq!(prev.acos, 40.00);
        assert_eq!(prev.roas, 2.50);
    }

    #[test]
    fn zero_clicks_zeroes_click_ratios() {
        let kpis = derive(&row(500, 0, 0.0, 0, 0, 0.0));
        assert_eq!(kpis.cpc, 0.0);
        assert_eq!(kpis.conversion_rate, 0.0);
        // CTR is defined relative to impressions and is 0 with 0 clicks.
        assert_eq!(kpis.ctr, 0.0);
    }

    #[test]
    fn zero_spend_zeroes_roas() {
        let kpis = derive(&row(100, 10, 0.0, 1, 1, 50.0));
        assert_eq!(kpis.roas, 0.0);
    }

    #[test]
    fn zero_sales_zeroes_acos() {
        let kpis = derive(&row(100, 10, 12.5, 0, 0, 0.0));
        assert_eq!(kpis.acos, 0.0);
        assert_eq!(kpis.roas, 0.0);
    }

    #[test]
    fn zero_impressions_zeroes_ctr() {
        let kpis = derive(&row(0, 0, 0.0, 0, 0, 0.0));
        assert_eq!(kpis.ctr, 0.0);
    }

    #[test]
    fn missing_row_means_zero_activity_not_error() {
        assert_eq!(derive_or_zero(None), KpiSet::default());
    }

    #[test]
    fn missing_previous_row_is_none_not_zeros() {
        assert!(derive_previous(None).is_none());
    }

    #[test]
    fn derivation_is_idempotent_under_rerounding() {
        let kpis = derive(&row(1234, 77, 99.999, 9, 11, 333.333));
        // Re-deriving from the same raw row must be bit-identical, and
        // rounding the already-rounded outputs must not move them.
        let again = derive(&row(1234, 77, 99.999, 9, 11, 333.333));
        assert_eq!(kpis, again);
        assert_eq!(round2(kpis.cpc), kpis.cpc);
        assert_eq!(round2(kpis.acos), kpis.acos);
        assert_eq!(round2(kpis.roas), kpis.roas);
        assert_eq!(round2(kpis.spend), kpis.spend);
    }

    proptest::proptest! {
        #[test]
        fn derived_ratios_are_finite_and_round_stable(
            impressions in 0u64..10_000_000,
            clicks in 0u64..1_000_000,
            cost in 0.0f64..1_000_000.0,
            purchases in 0u64..100_000,
            sales in 0.0f64..10_000_000.0,
        ) {
            let kpis = derive(&row(impressions, clicks, cost, purchases, purchases, sales));
            for value in [kpis.cpc, kpis.ctr, kpis.acos, kpis.roas, kpis.conversion_rate] {
                proptest::prop_assert!(value.is_finite());
                proptest::prop_assert!(value >= 0.0);
                proptest::prop_assert_eq!(round2(value), value);
            }
        }
    }
}
