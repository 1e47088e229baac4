use std::path::PathBuf;

use anyhow::Context;
use jpop_dash::{
    Cohort, DashboardConfig, DashboardView, DatasetCache, PopulationOrigin, build_dashboard,
};
use log::info;

fn load_config() -> anyhow::Result<DashboardConfig> {
    let mut config = match std::env::var_os("JPOP_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            DashboardConfig::from_json_file(&path)
                .with_context(|| format!("Failed to read configuration {}", path.display()))?
        }
        None => DashboardConfig::default(),
    };
    if let Some(dir) = std::env::var_os("JPOP_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    Ok(config)
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "データなし".to_string(), |v| format!("{v:.decimals$}"))
}

fn print_report(view: &DashboardView) {
    println!("== データ状況 ==");
    for message in view.status.messages() {
        println!("  {message}");
    }
    if view.origin == PopulationOrigin::Sample {
        println!("  (population rows are sample data)");
    }
    if !view.warnings.is_empty() {
        println!("  {} value(s) could not be parsed", view.warnings.len());
    }
    if !view.duplicate_prefectures.is_empty() {
        println!(
            "  duplicated prefecture rows: {}",
            view.duplicate_prefectures.join(", ")
        );
    }

    println!("\n== 全国概況 ==");
    println!("  総人口: {}", fmt_opt(view.summary.total_population, 0));
    println!("  平均人口増減率: {}%", fmt_opt(view.summary.mean_change_rate, 2));
    println!("  自然増減: {}", fmt_opt(view.summary.natural_change, 0));
    println!("  社会増減: {}", fmt_opt(view.summary.social_change, 0));

    if let Some(rankings) = &view.rankings {
        println!("\n== 増加率TOP{} ==", rankings.growth.len());
        for row in &rankings.growth {
            println!(
                "  {:<8} {:>8} {:>10}",
                row.name,
                fmt_opt(row.net_change_rate, 2),
                fmt_opt(row.net_change, 0)
            );
        }
        println!("\n== 減少率TOP{} ==", rankings.decline.len());
        for row in &rankings.decline {
            println!(
                "  {:<8} {:>8} {:>10}",
                row.name,
                fmt_opt(row.net_change_rate, 2),
                fmt_opt(row.net_change, 0)
            );
        }
    }

    println!("\n== 地域別 ==");
    for summary in view.metro.iter().chain(&view.areas) {
        let sums: Vec<String> = summary
            .sums
            .iter()
            .map(|(column, value)| format!("{column}={value:.0}"))
            .collect();
        println!(
            "  {} ({}): {}",
            summary.bucket,
            summary.prefectures,
            sums.join(" ")
        );
    }

    match &view.pyramid {
        Some(pyramid) => {
            println!("\n== 人口ピラミッド {} ==", pyramid.year);
            for (label, male, female) in pyramid.iter() {
                println!("  {label:>6} 男 {male:>12.0} 女 {female:>12.0}");
            }
        }
        None => println!("\n人口ピラミッド: データなし"),
    }

    println!("\n== 年齢3区分 ==");
    for row in &view.cohorts {
        let parts: Vec<String> = Cohort::ALL
            .iter()
            .map(|c| format!("{} {:.0}", c.label(), row.get(*c)))
            .collect();
        println!(
            "  {}: {} 高齢化率 {}%",
            row.year,
            parts.join(" / "),
            fmt_opt(row.aging_rate(), 1)
        );
    }
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    info!("Loading statistics from: {}", config.data_dir.display());

    let mut cache = DatasetCache::new();
    let dataset = cache.get_or_load(&config);
    let view = build_dashboard(&dataset, &config).context("Failed to build dashboard views")?;

    if std::env::var_os("JPOP_JSON").is_some() {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize dashboard")?
        );
    } else {
        print_report(&view);
    }

    Ok(())
}
