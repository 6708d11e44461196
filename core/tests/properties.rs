use elasticity_core::{
    presentation::{describe_delta, DeltaTone},
    score_table::{ScoreRow, ScoreTable},
    simulation::{simulate, SimulationQuery},
    types::{ElasticityModel, PriceTranche},
};
use proptest::prelude::*;

fn single_row_table(elasticity: f64, baseline: f64, asp: f64) -> ScoreTable {
    ScoreTable::new(vec![ScoreRow {
        category:                 "Toys".into(),
        tranche:                  PriceTranche::From10To20,
        baseline_weekly_volume:   baseline,
        average_selling_price:    asp,
        elasticity_linear:        elasticity,
        elasticity_time_series:   elasticity,
        elasticity_random_forest: elasticity,
    }])
    .unwrap()
}

fn model_strategy() -> impl Strategy<Value = ElasticityModel> {
    prop_oneof![
        Just(ElasticityModel::Linear),
        Just(ElasticityModel::TimeSeries),
        Just(ElasticityModel::RandomForest),
    ]
}

fn query(model: ElasticityModel, change: f64) -> SimulationQuery {
    SimulationQuery {
        category:             "Toys".into(),
        tranche:              PriceTranche::From10To20,
        model,
        price_change_percent: change,
    }
}

proptest! {
    #[test]
    fn point_elasticity_law_holds(
        e in -10.0f64..10.0,
        p in -100.0f64..100.0,
        baseline in 0.0f64..100_000.0,
        asp in 0.01f64..1_000.0,
        model in model_strategy(),
    ) {
        let table = single_row_table(e, baseline, asp);
        let result = simulate(&table, &query(model, p)).unwrap();
        let expected = baseline * (1.0 + e * (p / 100.0));
        let tolerance = 1e-9 * expected.abs().max(1.0);
        prop_assert!(
            (result.projected_volume - expected).abs() <= tolerance,
            "projected {} vs expected {}", result.projected_volume, expected
        );
    }

    #[test]
    fn annual_is_fifty_two_weeks(
        e in -10.0f64..10.0,
        p in -100.0f64..100.0,
        baseline in 0.0f64..100_000.0,
        asp in 0.01f64..1_000.0,
    ) {
        let table = single_row_table(e, baseline, asp);
        let result = simulate(&table, &query(ElasticityModel::Linear, p)).unwrap();
        prop_assert_eq!(result.annual_gmv_delta, result.weekly_gmv_delta * 52.0);
    }

    #[test]
    fn zero_change_means_zero_deltas(
        e in -50.0f64..50.0,
        baseline in 0.0f64..100_000.0,
        asp in 0.01f64..1_000.0,
        model in model_strategy(),
    ) {
        let table = single_row_table(e, baseline, asp);
        let result = simulate(&table, &query(model, 0.0)).unwrap();
        prop_assert_eq!(result.projected_volume, baseline);
        prop_assert_eq!(result.weekly_gmv_delta, 0.0);
        prop_assert_eq!(result.annual_gmv_delta, 0.0);
    }

    #[test]
    fn absent_selection_always_fails(category in "[A-Z][a-z]{2,10}") {
        prop_assume!(category != "Toys");
        let table = single_row_table(-1.0, 100.0, 5.0);
        let q = SimulationQuery { category, ..query(ElasticityModel::Linear, -10.0) };
        prop_assert!(simulate(&table, &q).is_err());
    }

    #[test]
    fn describe_delta_preserves_magnitude(v in -1.0e9f64..1.0e9) {
        let d = describe_delta(v);
        prop_assert_eq!(d.magnitude, v.abs());
        prop_assert_eq!(d.tone == DeltaTone::Gain, v >= 0.0);
    }
}
