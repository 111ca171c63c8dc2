//! The benchmark itself: random points, index construction and timed queries

use crate::settings::Settings;
use instant::Instant;
use point_quadtree::{Config, IndexInfo, Point, PointIndex, Region};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Outcome of one benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Points generated, including any the index rejected
    pub points: usize,
    pub config: Config,
    pub info: IndexInfo,
    pub queries: usize,
    pub parallel: bool,
    /// Points returned over all queries
    pub total_results: usize,
    pub build_seconds: f64,
    pub average_query_seconds: f64,
}

/// Uniformly distributed points in `[min, max]²`
pub fn generate_points(rng: &mut StdRng, count: usize, min: f64, max: f64) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.random_range(min..=max), rng.random_range(min..=max)))
        .collect()
}

/// Square windows of side `size` centered on random points of `[min, max]²`
///
/// Windows near the domain edge stick out of it; that is part of the workload.
pub fn query_windows(rng: &mut StdRng, count: usize, min: f64, max: f64, size: f64) -> Vec<Region> {
    generate_points(rng, count, min, max)
        .into_iter()
        .map(|center| Region::from_center(center.x, center.y, size / 2.0))
        .collect()
}

/// Time each query separately and return (average seconds, total results)
fn run_sequential(index: &PointIndex, windows: &[Region]) -> (f64, usize) {
    let mut total_seconds = 0.0;
    let mut total_results = 0;

    for window in windows {
        let mut results = Vec::new();
        let start = Instant::now();
        index.query_into(window, &mut results);
        total_seconds += start.elapsed().as_secs_f64();
        total_results += results.len();
    }

    (average(total_seconds, windows.len()), total_results)
}

/// Time the whole batch at once and return (average seconds, total results)
fn run_parallel(index: &PointIndex, windows: &[Region]) -> (f64, usize) {
    let start = Instant::now();
    let results = index.query_batch(windows);
    let total_seconds = start.elapsed().as_secs_f64();

    let total_results = results.iter().map(Vec::len).sum();
    (average(total_seconds, windows.len()), total_results)
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Run the full experiment described by `settings`
///
/// `settings` must already be validated.
pub fn run(settings: &Settings) -> anyhow::Result<Report> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let points = {
        #[cfg(feature = "profiling")]
        profiling::scope!("workload::generate_points");
        generate_points(&mut rng, settings.points, settings.min_coord, settings.max_coord)
    };

    let mut index = PointIndex::new(settings.index_config())?;
    let start = Instant::now();
    index.insert_many(points);
    let build_seconds = start.elapsed().as_secs_f64();

    let info = index.info();
    tracing::info!(
        accepted = info.point_count,
        rejected = info.rejected_count,
        nodes = info.node_count,
        depth = info.depth,
        "Built index in {:.3}s",
        build_seconds
    );
    if info.rejected_count > 0 {
        tracing::warn!("{} points fell outside the index region", info.rejected_count);
    }

    let windows = query_windows(
        &mut rng,
        settings.queries,
        settings.min_coord,
        settings.max_coord,
        settings.query_size,
    );

    let (average_query_seconds, total_results) = {
        #[cfg(feature = "profiling")]
        profiling::scope!("workload::queries");
        if settings.parallel {
            run_parallel(&index, &windows)
        } else {
            run_sequential(&index, &windows)
        }
    };
    tracing::debug!(total_results, "Queries finished");

    Ok(Report {
        points: settings.points,
        config: index.config().clone(),
        info,
        queries: windows.len(),
        parallel: settings.parallel,
        total_results,
        build_seconds,
        average_query_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn small_settings(extra: &[&str]) -> Settings {
        let args = [
            "quadtree-bench",
            "-n",
            "2000",
            "--queries",
            "50",
            "--max-coord",
            "100",
            "--query-size",
            "20",
            "--seed",
            "7",
        ];
        Settings::try_parse_from(args.iter().chain(extra.iter()).copied()).unwrap()
    }

    #[test]
    fn test_generate_points_within_domain() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = generate_points(&mut rng, 500, -5.0, 5.0);
        assert_eq!(points.len(), 500);
        let domain = Region::new(-5.0, -5.0, 5.0, 5.0);
        assert!(points.iter().all(|p| domain.contains(p)));
    }

    #[test]
    fn test_query_windows_have_requested_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let windows = query_windows(&mut rng, 20, 0.0, 1000.0, 10.0);
        assert_eq!(windows.len(), 20);
        for window in windows {
            assert!((window.width() - 10.0).abs() < 1e-9);
            assert!((window.height() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        assert_eq!(
            generate_points(&mut a, 100, 0.0, 1.0),
            generate_points(&mut b, 100, 0.0, 1.0)
        );
    }

    #[test]
    fn test_run_sequential_and_parallel_agree() {
        let sequential = run(&small_settings(&[])).unwrap();
        let parallel = run(&small_settings(&["--parallel"])).unwrap();

        assert_eq!(sequential.info.point_count, 2000);
        assert_eq!(sequential.info.rejected_count, 0);
        assert_eq!(sequential.queries, 50);
        assert!(sequential.total_results > 0);
        assert_eq!(sequential.total_results, parallel.total_results);
        assert_eq!(sequential.info, parallel.info);
        assert!(parallel.parallel);
        assert!(sequential.average_query_seconds >= 0.0);
    }

    #[test]
    fn test_report_json_carries_index_types() {
        let report = run(&small_settings(&[])).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["config"]["capacity"], 4);
        assert_eq!(json["config"]["region"]["max_x"], 100.0);
        assert_eq!(json["info"]["point_count"], 2000);

        let config: Config = serde_json::from_value(json["config"].clone()).unwrap();
        assert_eq!(config, report.config);
        let info: IndexInfo = serde_json::from_value(json["info"].clone()).unwrap();
        assert_eq!(info, report.info);
    }

    #[test]
    fn test_run_rejects_zero_capacity() {
        assert!(run(&small_settings(&["--capacity", "0"])).is_err());
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average(1.0, 0), 0.0);
        assert_eq!(average(1.0, 4), 0.25);
    }
}
