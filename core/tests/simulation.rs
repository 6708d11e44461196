//! Price change simulator tests.

use elasticity_core::{
    error::ElasticityError,
    score_table::{ScoreRow, ScoreTable},
    simulation::{parse_price_change, simulate, SimulationQuery},
    types::{ElasticityModel, PriceTranche},
};

const EPS: f64 = 1e-6;

fn toys_row() -> ScoreRow {
    ScoreRow {
        category:                 "Toys".into(),
        tranche:                  PriceTranche::From3To10,
        baseline_weekly_volume:   1000.0,
        average_selling_price:    5.00,
        elasticity_linear:        -2.0,
        elasticity_time_series:   -1.5,
        elasticity_random_forest: -0.5,
    }
}

fn toys_table() -> ScoreTable {
    let books = ScoreRow {
        category:                 "Books".into(),
        tranche:                  PriceTranche::From10To20,
        baseline_weekly_volume:   300.0,
        average_selling_price:    14.50,
        elasticity_linear:        -0.8,
        elasticity_time_series:   -0.6,
        elasticity_random_forest: -0.9,
    };
    ScoreTable::new(vec![toys_row(), books]).unwrap()
}

fn query(model: ElasticityModel, change: f64) -> SimulationQuery {
    SimulationQuery {
        category:             "Toys".into(),
        tranche:              PriceTranche::From3To10,
        model,
        price_change_percent: change,
    }
}

/// Scenario A: a 10% cut on elasticity -2.0 lifts volume by 20%.
#[test]
fn price_cut_projects_volume_gain() {
    let table = toys_table();
    let result = simulate(&table, &query(ElasticityModel::Linear, -10.0)).unwrap();

    assert!((result.demand_change_fraction - 0.20).abs() < EPS);
    assert!((result.baseline_volume - 1000.0).abs() < EPS);
    assert!((result.projected_volume - 1200.0).abs() < EPS);
    assert!((result.weekly_gmv_delta - 1000.0).abs() < EPS);
    assert!((result.annual_gmv_delta - 52_000.0).abs() < EPS);
}

/// Scenario B: the same row with a 10% rise loses 20% of volume.
#[test]
fn price_rise_projects_volume_loss() {
    let table = toys_table();
    let result = simulate(&table, &query(ElasticityModel::Linear, 10.0)).unwrap();

    assert!((result.demand_change_fraction + 0.20).abs() < EPS);
    assert!((result.projected_volume - 800.0).abs() < EPS);
    assert!((result.weekly_gmv_delta + 1000.0).abs() < EPS);
    assert!((result.annual_gmv_delta + 52_000.0).abs() < EPS);
}

/// Scenario C: an absent pair is an error, never a zero-filled result.
#[test]
fn missing_selection_is_no_data_error() {
    let table = toys_table();
    let q = SimulationQuery {
        category:             "Toys".into(),
        tranche:              PriceTranche::Over50,
        model:                ElasticityModel::Linear,
        price_change_percent: -10.0,
    };

    match simulate(&table, &q) {
        Err(ElasticityError::NoDataForSelection { category, tranche }) => {
            assert_eq!(category, "Toys");
            assert_eq!(tranche, Some(PriceTranche::Over50));
        }
        other => panic!("expected NoDataForSelection, got {other:?}"),
    }

    let unknown_category = SimulationQuery { category: "Garden".into(), ..q };
    assert!(matches!(
        simulate(&table, &unknown_category),
        Err(ElasticityError::NoDataForSelection { .. })
    ));
}

/// Scenario D: zero price change leaves everything exactly unchanged.
#[test]
fn zero_change_yields_exact_zero_deltas() {
    let table = toys_table();
    for model in ElasticityModel::ALL {
        let result = simulate(&table, &query(model, 0.0)).unwrap();
        assert_eq!(result.projected_volume, result.baseline_volume);
        assert_eq!(result.weekly_gmv_delta, 0.0);
        assert_eq!(result.annual_gmv_delta, 0.0);
    }
}

#[test]
fn model_choice_selects_matching_elasticity() {
    let table = toys_table();

    let ts = simulate(&table, &query(ElasticityModel::TimeSeries, -10.0)).unwrap();
    assert!((ts.elasticity + 1.5).abs() < EPS);
    assert!((ts.projected_volume - 1150.0).abs() < EPS);

    let rf = simulate(&table, &query(ElasticityModel::RandomForest, -10.0)).unwrap();
    assert!((rf.elasticity + 0.5).abs() < EPS);
    assert!((rf.projected_volume - 1050.0).abs() < EPS);
}

#[test]
fn projected_volume_is_not_clamped_at_zero() {
    let table = toys_table();
    // -2.0 × +80% = -160% demand change.
    let result = simulate(&table, &query(ElasticityModel::Linear, 80.0)).unwrap();
    assert!((result.projected_volume + 600.0).abs() < EPS);
    assert!(result.projected_volume < 0.0, "volume should go negative, not clamp");
}

#[test]
fn simulation_does_not_touch_the_table() {
    let table = toys_table();
    let before: Vec<ScoreRow> = table.rows().to_vec();
    let _ = simulate(&table, &query(ElasticityModel::Linear, -25.0)).unwrap();
    let _ = simulate(&table, &query(ElasticityModel::Linear, 40.0)).unwrap();
    assert_eq!(table.rows(), before.as_slice());
}

#[test]
fn table_is_shareable_across_threads() {
    let table = std::sync::Arc::new(toys_table());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let table = std::sync::Arc::clone(&table);
            std::thread::spawn(move || {
                simulate(&table, &query(ElasticityModel::Linear, -(i as f64)))
                    .unwrap()
                    .projected_volume
            })
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        let v = h.join().unwrap();
        let expected = 1000.0 * (1.0 + -2.0 * (-(i as f64) / 100.0));
        assert!((v - expected).abs() < EPS);
    }
}

/// NaN or infinite price changes never reach the arithmetic.
#[test]
fn non_finite_price_change_is_invalid_input() {
    let table = toys_table();
    for change in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = simulate(&table, &query(ElasticityModel::Linear, change)).unwrap_err();
        assert!(
            matches!(err, ElasticityError::InvalidInput(_)),
            "change {change} should be InvalidInput, got {err:?}"
        );
        assert!(!err.is_fatal());
    }
}

#[test]
fn price_change_text_accepts_signed_numbers_and_percent_suffix() {
    assert_eq!(parse_price_change("-10").unwrap(), -10.0);
    assert_eq!(parse_price_change(" +5.5 ").unwrap(), 5.5);
    assert_eq!(parse_price_change("10%").unwrap(), 10.0);
    assert_eq!(parse_price_change("-2.5 %").unwrap(), -2.5);
}

/// Unparseable text is an error rather than a silent fallback to the default.
#[test]
fn price_change_text_rejects_garbage_and_non_finite_values() {
    for raw in ["ten", "", "%", "5%%", "NaN", "inf", "-infinity"] {
        match parse_price_change(raw) {
            Err(ElasticityError::InvalidInput(_)) => {}
            other => panic!("'{raw}' should be InvalidInput, got {other:?}"),
        }
    }
}
