//! Exchange Math - Binary Entry Point
//!
//! Runs a fixed set of match scenarios under the protocol fee policy read
//! from the environment and prints the results as JSON. Set `RUST_LOG=trace`
//! to see which transfer branch each match takes.

use anyhow::Context;
use primitive_types::U256;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_math::engine::{calculate_matched_fill_results, select_branch};
use exchange_math::types::units::{to_base_units, ETHER_DECIMALS};
use exchange_math::{ConformanceReceipt, MatchedFillResults, Order, ProtocolFeeConfig};

struct Scenario {
    name: &'static str,
    left: (&'static str, &'static str),
    right: (&'static str, &'static str),
    decimals: u32,
    with_maximal_fill: bool,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "right order fully filled",
        left: ("17", "98"),
        right: ("75", "13"),
        decimals: 0,
        with_maximal_fill: false,
    },
    Scenario {
        name: "left order fully filled, right taker rounds up",
        left: ("16", "22"),
        right: ("83", "49"),
        decimals: 0,
        with_maximal_fill: false,
    },
    Scenario {
        name: "orders completely fill each other",
        left: ("5", "10"),
        right: ("10", "2"),
        decimals: ETHER_DECIMALS,
        with_maximal_fill: false,
    },
    Scenario {
        name: "maximal fill, left order fully filled",
        left: ("15", "90"),
        right: ("196", "28"),
        decimals: 0,
        with_maximal_fill: true,
    },
    Scenario {
        name: "negative spread",
        left: ("1", "2"),
        right: ("1", "1"),
        decimals: ETHER_DECIMALS,
        with_maximal_fill: false,
    },
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioReport {
    name: &'static str,
    with_maximal_fill: bool,
    branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<MatchedFillResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    protocol_fees: ProtocolFeeConfig,
    scenarios: Vec<ScenarioReport>,
    receipt_digest: String,
}

fn order(amounts: (&str, &str), decimals: u32) -> anyhow::Result<Order> {
    let maker = to_base_units(amounts.0, decimals)
        .with_context(|| format!("invalid maker amount {:?}", amounts.0))?;
    let taker = to_base_units(amounts.1, decimals)
        .with_context(|| format!("invalid taker amount {:?}", amounts.1))?;
    let fee = U256::exp10(ETHER_DECIMALS as usize);
    Ok(Order::new(maker, taker).with_fees(fee, fee))
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exchange_math=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let fees = ProtocolFeeConfig::from_env().context("loading protocol fee policy")?;
    tracing::info!(
        multiplier = %fees.multiplier,
        gas_price = %fees.gas_price,
        "Starting exchange-math v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut receipt = ConformanceReceipt::new();
    let mut scenarios = Vec::with_capacity(SCENARIOS.len());

    for scenario in SCENARIOS {
        let left = order(scenario.left, scenario.decimals)?;
        let right = order(scenario.right, scenario.decimals)?;

        let result = calculate_matched_fill_results(
            &left,
            &right,
            fees.multiplier,
            fees.gas_price,
            scenario.with_maximal_fill,
        );
        receipt.record_match(&result);

        if let Err(err) = &result {
            tracing::warn!(scenario = scenario.name, code = err.code(), "match failed");
        }

        let (results, error) = match result {
            Ok(results) => (Some(results), None),
            Err(err) => (None, Some(err.to_string())),
        };
        scenarios.push(ScenarioReport {
            name: scenario.name,
            with_maximal_fill: scenario.with_maximal_fill,
            branch: select_branch(&left, &right, scenario.with_maximal_fill).to_string(),
            results,
            error,
        });
    }

    tracing::info!(
        calls = receipt.calls(),
        failures = receipt.failures(),
        "Scenarios complete"
    );

    let report = Report {
        protocol_fees: fees,
        scenarios,
        receipt_digest: receipt.digest_hex(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
