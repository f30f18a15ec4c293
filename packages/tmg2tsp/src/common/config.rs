//! This module contains structs which represent the options selected by the
//! end user. The loader reads a `LoadConfig`, while the command line driver
//! works from a `MatrixConfig` built out of the raw `UserMatrixConfig`.

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::common::error::TmgError;

/// Sets which endpoint closes the final leg of a collapsed or traveled
/// edge's path when accumulating its length. `FirstEndpoint` matches the
/// lengths produced by the METAL C tools, which measure the last leg back to
/// the edge's first vertex
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShapingClosure {
    #[default]
    FirstEndpoint,
    SecondEndpoint,
}

impl FromStr for ShapingClosure {
    type Err = ();

    fn from_str(input: &str) -> Result<ShapingClosure, Self::Err> {
        match input {
            "first" => Ok(ShapingClosure::FirstEndpoint),
            "second" => Ok(ShapingClosure::SecondEndpoint),
            _ => Err(()),
        }
    }
}

/// How the distance matrix report is written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(input: &str) -> Result<OutputFormat, Self::Err> {
        match input {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

/// Options which affect how a TMG file is turned into a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadConfig {
    pub closing: ShapingClosure,
}

/// Stores the user's requested options exactly as they are received from
/// the command line
#[derive(Parser, Debug, PartialEq)]
#[command(name = "tmg2tsp")]
#[command(
    about = "Generate a TSP distance matrix from a METAL .tmg graph file"
)]
pub struct UserMatrixConfig {
    /// METAL .tmg graph file to read
    pub filename: PathBuf,

    /// Number of leading waypoints to include in the matrix
    #[arg(allow_negative_numbers = true)]
    pub num_points: i64,

    /// Endpoint which closes shaping point paths: first or second
    #[arg(long, default_value = "first")]
    pub close_at: String,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Print graph statistics to stderr before the matrix
    #[arg(long)]
    pub stats: bool,

    /// Show a progress bar while computing the matrix
    #[arg(long)]
    pub progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Stores the user's requested options in a validated format which can be
/// used in the rest of this package. Users should first create a
/// UserMatrixConfig and use try_into() to convert to MatrixConfig
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixConfig {
    pub filename: PathBuf,
    pub num_points: usize,
    pub load: LoadConfig,
    pub format: OutputFormat,
    pub show_stats: bool,
    pub show_progress: bool,
}

impl TryFrom<UserMatrixConfig> for MatrixConfig {
    type Error = TmgError;

    fn try_from(user: UserMatrixConfig) -> Result<MatrixConfig, TmgError> {
        if user.num_points < 2 {
            return Err(TmgError::TooFewPoints(user.num_points));
        }
        let num_points = usize::try_from(user.num_points)
            .map_err(|_| TmgError::TooFewPoints(user.num_points))?;

        let closing =
            ShapingClosure::from_str(&user.close_at).map_err(|_| {
                TmgError::InvalidOption {
                    name: "close-at",
                    value: user.close_at.clone(),
                }
            })?;

        let format = OutputFormat::from_str(&user.format).map_err(|_| {
            TmgError::InvalidOption {
                name: "format",
                value: user.format.clone(),
            }
        })?;

        Ok(MatrixConfig {
            filename: user.filename,
            num_points,
            load: LoadConfig { closing },
            format,
            show_stats: user.stats,
            show_progress: user.progress,
        })
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn get_test_user_config() -> UserMatrixConfig {
        UserMatrixConfig {
            filename: PathBuf::from("siena-area.tmg"),
            num_points: 5,
            close_at: "second".to_string(),
            format: "json".to_string(),
            stats: true,
            progress: false,
            verbose: false,
        }
    }

    /// Success case for creation of a new ShapingClosure
    #[test]
    fn test_new_closure_ok() {
        let maybe_result = ShapingClosure::from_str("second");

        match maybe_result {
            Ok(result) => assert_eq!(result, ShapingClosure::SecondEndpoint),
            Err(_) => panic!("Should have received a value!"),
        }
    }

    /// Failure case for creation of a new OutputFormat
    #[test]
    fn test_new_format_err() -> Result<(), String> {
        match OutputFormat::from_str("csv") {
            Ok(_) => Err("Should not have received a value!".to_string()),
            Err(_) => Ok(()),
        }
    }

    /// Check conversion from UserMatrixConfig to MatrixConfig retains all of
    /// the necessary information
    #[test]
    fn test_user_config_to_matrix_config() {
        let target = MatrixConfig {
            filename: PathBuf::from("siena-area.tmg"),
            num_points: 5,
            load: LoadConfig {
                closing: ShapingClosure::SecondEndpoint,
            },
            format: OutputFormat::Json,
            show_stats: true,
            show_progress: false,
        };

        let result: MatrixConfig = match get_test_user_config().try_into() {
            Ok(config) => config,
            Err(err) => panic!("Conversion failed: {err}"),
        };

        assert_eq!(result, target)
    }

    #[test]
    fn test_too_few_points() {
        let mut user = get_test_user_config();
        user.num_points = 1;

        let result: Result<MatrixConfig, TmgError> = user.try_into();

        assert!(matches!(result, Err(TmgError::TooFewPoints(1))));
    }

    #[test]
    fn test_invalid_close_at() {
        let mut user = get_test_user_config();
        user.close_at = "middle".to_string();

        let result: Result<MatrixConfig, TmgError> = user.try_into();

        assert!(matches!(
            result,
            Err(TmgError::InvalidOption {
                name: "close-at",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_command_line() {
        let user = UserMatrixConfig::parse_from([
            "tmg2tsp",
            "siena-area.tmg",
            "5",
            "--close-at",
            "second",
            "--format",
            "json",
            "--stats",
        ]);

        assert_eq!(user, get_test_user_config());
    }

    #[test]
    fn test_parse_negative_points() {
        let user = UserMatrixConfig::parse_from(["tmg2tsp", "a.tmg", "-3"]);

        assert_eq!(user.num_points, -3);
    }
}
