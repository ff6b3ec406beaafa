use crate::analyze::TrackAnalysis;
use crate::splits::SplitPlan;

/// Metrikk-kortene som tekst for terminalbruk.
pub fn print_summary_report(analysis: &TrackAnalysis) {
    let s = &analysis.summary;
    println!("--- Run Report ---");
    println!("Distance: {:.2} km", s.total_distance_km);
    println!("Duration: {:.2} min", s.total_time_min);
    match s.avg_pace_min_per_km {
        Some(p) => println!("Avg pace: {:.2} min/km", p),
        None => println!("Avg pace: n/a"),
    }
    if let Some(hr) = s.max_heart_rate {
        println!("Max HR: {} bpm", hr);
    }
    println!(
        "Elevation: +{:.1} m / -{:.1} m",
        s.elevation_gain_m, s.elevation_loss_m
    );
    for f in &analysis.findings {
        println!("* {}", f.message);
    }
}

pub fn print_split_plan(plan: &SplitPlan) {
    println!("--- Split Plan ({:.0} m splits) ---", plan.interval_m);
    for s in &plan.splits {
        println!(
            "#{:<3} {:>7}   total {:>7}",
            s.index, s.split_display, s.cumulative_display
        );
    }
}
