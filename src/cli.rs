// SPDX-License-Identifier: MPL-2.0

//! Command line arguments of the `fda` binary.

use std::path::PathBuf;

use crate::error::{FdaError, FdaResult};
use crate::params::{load_params, FdaParams, ResizeFilter};

/// Parsed command line.
#[derive(Clone, Debug, PartialEq)]
pub struct CliArgs {
    /// Image to adapt.
    pub source: PathBuf,
    /// Image providing the low-frequency amplitudes.
    pub target: PathBuf,
    /// Where to write the adapted image.
    pub output: PathBuf,
    /// Window ratio, overrides the config file.
    pub beta: Option<f64>,
    /// Resize filter, overrides the config file.
    pub filter: Option<ResizeFilter>,
    /// JSON parameter file.
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Parse arguments, program name excluded.
    pub fn parse<I>(args: I) -> FdaResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut source = None;
        let mut target = None;
        let mut output = None;
        let mut beta = None;
        let mut filter = None;
        let mut config = None;

        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next().ok_or_else(|| {
                    FdaError::Config(format!("missing value for {flag}\n{}", usage()))
                })
            };
            match flag.as_str() {
                "--source" => source = Some(PathBuf::from(value()?)),
                "--target" => target = Some(PathBuf::from(value()?)),
                "--output" => output = Some(PathBuf::from(value()?)),
                "--beta" => {
                    let raw = value()?;
                    let parsed = raw
                        .parse::<f64>()
                        .map_err(|e| FdaError::Config(format!("invalid --beta '{raw}': {e}")))?;
                    beta = Some(parsed);
                }
                "--filter" => filter = Some(value()?.parse()?),
                "--config" => config = Some(PathBuf::from(value()?)),
                other => {
                    return Err(FdaError::Config(format!(
                        "unexpected argument '{other}'\n{}",
                        usage()
                    )))
                }
            }
        }

        let required = |value: Option<PathBuf>, flag: &str| {
            value.ok_or_else(|| FdaError::Config(format!("missing {flag}\n{}", usage())))
        };
        let args = Self {
            source: required(source, "--source")?,
            target: required(target, "--target")?,
            output: required(output, "--output")?,
            beta,
            filter,
            config,
        };
        if args.beta.is_none() && args.config.is_none() {
            return Err(FdaError::Config(format!("missing --beta\n{}", usage())));
        }
        Ok(args)
    }

    /// Merge the config file, if any, with the flags given on the command line.
    pub fn resolve_params(&self) -> FdaResult<FdaParams> {
        let mut params = match &self.config {
            Some(path) => load_params(path)?,
            None => FdaParams::default(),
        };
        if let Some(beta) = self.beta {
            params = params.with_beta(beta);
        }
        if let Some(filter) = self.filter {
            params = params.with_filter(filter);
        }
        Ok(params)
    }
}

/// One-line usage string.
pub fn usage() -> String {
    "Usage: fda --source <image> --target <image> --output <image> --beta <ratio> \
     [--filter nearest|triangle|catmull_rom|gaussian|lanczos3] [--config <params.json>]"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn parses_all_flags() {
        let cli = CliArgs::parse(args(
            "--source a.png --target b.jpg --output out/c.png --beta 0.01 --filter nearest",
        ))
        .unwrap();
        assert_eq!(cli.source, PathBuf::from("a.png"));
        assert_eq!(cli.target, PathBuf::from("b.jpg"));
        assert_eq!(cli.output, PathBuf::from("out/c.png"));
        assert_eq!(cli.beta, Some(0.01));
        assert_eq!(cli.filter, Some(ResizeFilter::Nearest));

        let params = cli.resolve_params().unwrap();
        assert_eq!(params.beta, 0.01);
        assert_eq!(params.filter, ResizeFilter::Nearest);
    }

    #[test]
    fn beta_is_required_without_config() {
        let result = CliArgs::parse(args("--source a.png --target b.png --output c.png"));
        assert!(matches!(result, Err(FdaError::Config(msg)) if msg.contains("--beta")));
    }

    #[test]
    fn config_stands_in_for_beta() {
        let cli = CliArgs::parse(args(
            "--source a.png --target b.png --output c.png --config p.json",
        ))
        .unwrap();
        assert_eq!(cli.beta, None);
        assert_eq!(cli.config, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn rejects_bad_input() {
        let bad_beta = "--source a.png --target b.png --output c.png --beta x";
        assert!(CliArgs::parse(args(bad_beta)).is_err());
        assert!(CliArgs::parse(args("--source a.png --target b.png --beta 0.1")).is_err());
        assert!(CliArgs::parse(args("--source a.png --target")).is_err());
        assert!(CliArgs::parse(args("--verbose")).is_err());
    }
}
