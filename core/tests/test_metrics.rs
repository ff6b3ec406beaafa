use chrono::{Duration, TimeZone, Utc};

use rungraph_core::metrics::{derive_series, elevation_gain_loss, std_dev, summarize};
use rungraph_core::models::TrackPoint;

fn pt(offset_s: i64, lat: f64, lon: f64, ele: Option<f64>, hr: Option<u32>) -> TrackPoint {
    TrackPoint {
        time: Utc.with_ymd_and_hms(2023, 6, 1, 6, 0, 0).unwrap() + Duration::seconds(offset_s),
        lat,
        lon,
        elevation: ele,
        heart_rate: hr,
    }
}

#[test]
fn first_point_has_zero_deltas_and_no_pace() {
    let points = vec![pt(0, 0.0, 0.0, None, None), pt(30, 0.0, 0.001, None, None)];
    let series = derive_series(&points);

    assert_eq!(series[0].distance_delta_m, 0.0);
    assert_eq!(series[0].time_delta_s, 0.0);
    assert_eq!(series[0].pace_min_per_km, None);
    assert!(series[1].pace_min_per_km.is_some());
}

#[test]
fn geodesic_distance_is_ellipsoidal_meters() {
    // 0.001° lengdegrad på ekvator ≈ 111.32 m
    let points = vec![pt(0, 0.0, 0.0, None, None), pt(30, 0.0, 0.001, None, None)];
    let series = derive_series(&points);
    let d = series[1].distance_delta_m;
    assert!(d > 110.8 && d < 111.8, "got {}", d);
}

#[test]
fn pace_is_none_exactly_when_distance_delta_is_zero() {
    // Punkt 2 står stille (samme koordinat), punkt 3 beveger seg
    let points = vec![
        pt(0, 0.0, 0.0, None, None),
        pt(30, 0.0, 0.0, None, None),
        pt(60, 0.0, 0.001, None, None),
    ];
    let series = derive_series(&points);

    for d in &series {
        assert_eq!(d.pace_min_per_km.is_none(), d.distance_delta_m == 0.0);
    }
    assert_eq!(series[1].pace_min_per_km, None);
    assert!(series[2].pace_min_per_km.is_some());
}

#[test]
fn cumulative_distance_is_running_sum_and_monotonic() {
    let points = vec![
        pt(0, 0.0, 0.0, None, None),
        pt(30, 0.0, 0.001, None, None),
        pt(55, 0.0, 0.002, None, None),
        pt(90, 0.0, 0.0045, None, None),
    ];
    let series = derive_series(&points);

    let mut running = 0.0;
    let mut prev_cum = 0.0;
    for d in &series {
        running += d.distance_delta_m;
        assert!((d.distance_m - running).abs() < 1e-9);
        assert!(d.distance_m >= prev_cum);
        assert!((d.distance_km - d.distance_m / 1000.0).abs() < 1e-12);
        prev_cum = d.distance_m;
    }
}

#[test]
fn avg_pace_is_total_over_total_not_mean_of_paces() {
    // Ujevne splitter: 1 min over ~111 m, så 1 min over ~334 m
    let points = vec![
        pt(0, 0.0, 0.0, None, None),
        pt(60, 0.0, 0.001, None, None),
        pt(120, 0.0, 0.004, None, None),
    ];
    let series = derive_series(&points);
    let summary = summarize(&points, &series).unwrap();

    let avg = summary.avg_pace_min_per_km.unwrap();
    let expected = summary.total_time_min / summary.total_distance_km;
    assert!((avg - expected).abs() < 1e-12);

    let paces: Vec<f64> = series.iter().filter_map(|d| d.pace_min_per_km).collect();
    let mean = paces.iter().sum::<f64>() / paces.len() as f64;
    assert!(
        (avg - mean).abs() > 0.5,
        "avg {} should differ from per-point mean {} on irregular splits",
        avg,
        mean
    );
}

#[test]
fn elevation_gain_loss_telescopes_when_all_points_have_elevation() {
    let points = vec![
        pt(0, 0.0, 0.0, Some(100.0), None),
        pt(30, 0.0, 0.001, Some(105.0), None),
        pt(60, 0.0, 0.002, Some(103.0), None),
        pt(90, 0.0, 0.003, Some(110.0), None),
    ];
    let (gain, loss) = elevation_gain_loss(&points);
    assert!((gain - 12.0).abs() < 1e-12);
    assert!((loss - 2.0).abs() < 1e-12);
    // Teleskopsum: gain - loss == siste - første
    assert!(((gain - loss) - (110.0 - 100.0)).abs() < 1e-12);
}

#[test]
fn elevation_gain_loss_skips_points_without_elevation() {
    let points = vec![
        pt(0, 0.0, 0.0, Some(100.0), None),
        pt(30, 0.0, 0.001, None, None),
        pt(60, 0.0, 0.002, Some(104.0), None),
        pt(90, 0.0, 0.003, Some(101.0), None),
    ];
    let (gain, loss) = elevation_gain_loss(&points);
    assert!((gain - 4.0).abs() < 1e-12);
    assert!((loss - 3.0).abs() < 1e-12);

    let no_ele = vec![pt(0, 0.0, 0.0, None, None), pt(30, 0.0, 0.001, None, None)];
    assert_eq!(elevation_gain_loss(&no_ele), (0.0, 0.0));
}

#[test]
fn pace_std_requires_at_least_two_samples() {
    assert_eq!(std_dev(&[]), None);
    assert_eq!(std_dev(&[3.0]), None);

    // Sample-standardavvik (n-1): [2, 4] -> sqrt(2)
    let s = std_dev(&[2.0, 4.0]).unwrap();
    assert!((s - 2.0_f64.sqrt()).abs() < 1e-12);

    // Bare ett definert pace-sample -> None i sammendraget
    let points = vec![
        pt(0, 0.0, 0.0, None, None),
        pt(30, 0.0, 0.001, None, None),
        pt(60, 0.0, 0.001, None, None), // stillestående
    ];
    let series = derive_series(&points);
    let summary = summarize(&points, &series).unwrap();
    assert_eq!(summary.pace_std, None);
}

#[test]
fn negative_time_delta_propagates_unclamped() {
    // Klokken hopper bakover mellom punkt 1 og 2
    let points = vec![
        pt(60, 0.0, 0.0, None, None),
        pt(0, 0.0, 0.001, None, None),
    ];
    let series = derive_series(&points);
    assert!((series[1].time_delta_s - (-60.0)).abs() < 1e-9);
    let pace = series[1].pace_min_per_km.unwrap();
    assert!(pace < 0.0, "negative dt should surface as negative pace");
}

#[test]
fn summary_handles_heart_rate_and_pace_extrema() {
    let points = vec![
        pt(0, 0.0, 0.0, None, Some(120)),
        pt(60, 0.0, 0.001, None, Some(155)),
        pt(120, 0.0, 0.004, None, Some(149)),
    ];
    let series = derive_series(&points);
    let summary = summarize(&points, &series).unwrap();

    assert_eq!(summary.max_heart_rate, Some(155));

    let paces: Vec<f64> = series.iter().filter_map(|d| d.pace_min_per_km).collect();
    let lo = paces.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = paces.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(summary.min_pace, Some(lo));
    assert_eq!(summary.max_pace, Some(hi));
}

#[test]
fn summary_is_none_for_empty_series_and_avg_none_for_zero_distance() {
    assert!(summarize(&[], &[]).is_none());

    // Alle punkter på samme koordinat: distanse 0 -> avg pace udefinert
    let points = vec![pt(0, 0.0, 0.0, None, None), pt(30, 0.0, 0.0, None, None)];
    let series = derive_series(&points);
    let summary = summarize(&points, &series).unwrap();
    assert_eq!(summary.avg_pace_min_per_km, None);
    assert_eq!(summary.min_pace, None);
    assert_eq!(summary.max_pace, None);
}
