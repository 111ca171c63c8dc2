use clap::Parser;
use point_quadtree::{Config, Region};
#[cfg(feature = "profiling")]
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Quadtree Bench - Build a point quadtree over random points and time range queries
pub struct Settings {
    /// Number of random points to insert
    #[clap(short = 'n', long, default_value = "1000000")]
    pub points: usize,

    /// Lower bound of both coordinates (the domain is a square)
    #[clap(long, default_value = "0.0", allow_negative_numbers = true)]
    pub min_coord: f64,

    /// Upper bound of both coordinates
    #[clap(long, default_value = "1000.0", allow_negative_numbers = true)]
    pub max_coord: f64,

    /// Number of range queries to run
    #[clap(short, long, default_value = "1000")]
    pub queries: usize,

    /// Side length of each square query window
    #[clap(long, default_value = "10.0")]
    pub query_size: f64,

    /// Maximum points per quadtree node before subdivision
    #[clap(short, long, default_value = "4")]
    pub capacity: usize,

    /// Seed for the point and query generator (random if omitted)
    #[clap(long)]
    pub seed: Option<u64>,

    /// Run all queries as one parallel batch instead of timing them one by one
    #[clap(long, default_value = "false")]
    pub parallel: bool,

    /// Print a JSON report instead of the one-line summary
    #[clap(long, default_value = "false")]
    pub json: bool,

    /// Write a Chrome trace of the run to this file
    #[cfg(feature = "profiling")]
    #[clap(long, value_name = "FILE")]
    pub trace_file: Option<PathBuf>,
}

/// Settings that parse but describe an unusable experiment
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SettingsError {
    #[error("Coordinate range is empty: min {min} must be below max {max}")]
    EmptyDomain { min: f64, max: f64 },

    #[error("Coordinate range {min}..{max} is too wide to sample from")]
    UnboundedDomain { min: f64, max: f64 },

    #[error("Query size must be a positive number, got {0}")]
    InvalidQuerySize(f64),
}

impl Settings {
    /// Parse from the command line, exiting with usage information on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Reject geometry that would make point or window generation meaningless
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.min_coord.is_finite() && self.max_coord.is_finite())
            || self.min_coord >= self.max_coord
        {
            return Err(SettingsError::EmptyDomain {
                min: self.min_coord,
                max: self.max_coord,
            });
        }
        // The sampler works on the width of the range, which can overflow
        if !(self.max_coord - self.min_coord).is_finite() {
            return Err(SettingsError::UnboundedDomain {
                min: self.min_coord,
                max: self.max_coord,
            });
        }
        if !(self.query_size.is_finite() && self.query_size > 0.0) {
            return Err(SettingsError::InvalidQuerySize(self.query_size));
        }
        Ok(())
    }

    /// Index configuration covering the whole coordinate domain
    pub fn index_config(&self) -> Config {
        Config {
            region: Region::new(
                self.min_coord,
                self.min_coord,
                self.max_coord,
                self.max_coord,
            ),
            capacity: self.capacity,
        }
    }
}
