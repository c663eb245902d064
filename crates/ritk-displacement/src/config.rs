//! Command-line configuration.

use std::fmt;
use std::str::FromStr;
use clap::{Args, ValueEnum};
use serde::Serialize;

/// Transform selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "parameters", rename_all = "lowercase")]
pub enum TransformSpec {
    Identity,
    /// `translation:x,y,z`
    Translation([f64; 3]),
    /// `scale:sx,sy,sz`, about the physical origin
    Scale([f64; 3]),
}

impl FromStr for TransformSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, params) = match s.split_once(':') {
            Some((kind, params)) => (kind.trim(), Some(params)),
            None => (s.trim(), None),
        };
        match (kind.to_ascii_lowercase().as_str(), params) {
            ("identity", None) => Ok(Self::Identity),
            ("translation", Some(params)) => parse_triple(params).map(Self::Translation),
            ("scale", Some(params)) => parse_triple(params).map(Self::Scale),
            ("translation" | "scale", None) => {
                Err(format!("'{}' needs three parameters, e.g. {}:1,2,3", kind, kind))
            }
            _ => Err(format!(
                "unknown transform '{}' (expected identity, translation:x,y,z or scale:sx,sy,sz)",
                s
            )),
        }
    }
}

impl fmt::Display for TransformSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::Translation([x, y, z]) => write!(f, "translation:{},{},{}", x, y, z),
            Self::Scale([x, y, z]) => write!(f, "scale:{},{},{}", x, y, z),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented field printout
    #[default]
    Text,
    /// JSON field summary
    Json,
}

/// Parse `a,b,c` into three floats.
pub fn parse_triple(s: &str) -> Result<[f64; 3], String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid number '{}': {}", part.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    <[f64; 3]>::try_from(values)
        .map_err(|v| format!("expected 3 comma-separated values, got {}", v.len()))
}

/// Parse `nx,ny,nz` into a size. Zero extents are left for the filter to reject.
pub fn parse_size(s: &str) -> Result<[usize; 3], String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid extent '{}': {}", part.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    <[usize; 3]>::try_from(values)
        .map_err(|v| format!("expected 3 comma-separated extents, got {}", v.len()))
}

/// Flags of the `run` command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Reference volume size in voxels, x,y,z
    #[arg(long, default_value = "10,10,10", value_parser = parse_size)]
    pub size: [usize; 3],

    /// Voxel spacing, x,y,z
    #[arg(long, default_value = "1,1,1", value_parser = parse_triple, allow_hyphen_values = true)]
    pub spacing: [f64; 3],

    /// Physical origin, x,y,z
    #[arg(long, default_value = "0,0,0", value_parser = parse_triple, allow_hyphen_values = true)]
    pub origin: [f64; 3],

    /// Transform to sample (identity, translation:x,y,z, scale:sx,sy,sz)
    #[arg(short, long, default_value = "identity")]
    pub transform: TransformSpec,

    /// Take the output grid from the reference volume (default)
    #[arg(long, overrides_with = "no_reference_image")]
    pub use_reference_image: bool,

    /// Pass size, spacing and origin to the filter directly
    #[arg(long, overrides_with = "use_reference_image")]
    pub no_reference_image: bool,

    /// Number of chunks along the slowest axis
    #[arg(short, long, default_value_t = 1)]
    pub chunks: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            size: [10, 10, 10],
            spacing: [1.0; 3],
            origin: [0.0; 3],
            transform: TransformSpec::Identity,
            use_reference_image: false,
            no_reference_image: false,
            chunks: 1,
            format: OutputFormat::Text,
        }
    }
}

impl RunArgs {
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            size: self.size,
            spacing: self.spacing,
            origin: self.origin,
            transform: self.transform,
            use_reference_image: !self.no_reference_image,
            chunks: self.chunks,
            format: self.format,
        }
    }
}

/// Resolved settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    pub size: [usize; 3],
    pub spacing: [f64; 3],
    pub origin: [f64; 3],
    pub transform: TransformSpec,
    pub use_reference_image: bool,
    pub chunks: usize,
    pub format: OutputFormat,
}

impl Default for RunConfig {
    /// The zero 10x10x10 volume sampled with the identity transform.
    fn default() -> Self {
        RunArgs::default().into_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transform_spec() {
        assert_eq!("identity".parse::<TransformSpec>(), Ok(TransformSpec::Identity));
        assert_eq!(
            "translation:1,-2.5,3".parse::<TransformSpec>(),
            Ok(TransformSpec::Translation([1.0, -2.5, 3.0]))
        );
        assert_eq!(
            "Scale: 2, 2, 0.5".parse::<TransformSpec>(),
            Ok(TransformSpec::Scale([2.0, 2.0, 0.5]))
        );
        assert!("translation".parse::<TransformSpec>().is_err());
        assert!("scale:1,2".parse::<TransformSpec>().is_err());
        assert!("rigid:0,0,0".parse::<TransformSpec>().is_err());
    }

    #[test]
    fn test_transform_spec_display_parses_back() {
        let spec = TransformSpec::Translation([0.5, 1.0, -2.0]);
        assert_eq!(spec.to_string().parse::<TransformSpec>(), Ok(spec));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("10,10,10"), Ok([10, 10, 10]));
        assert_eq!(parse_size("4, 0, 2"), Ok([4, 0, 2]));
        assert!(parse_size("10,10").is_err());
        assert!(parse_size("10,-1,10").is_err());
    }

    #[test]
    fn test_default_config_is_identity_scenario() {
        let config = RunConfig::default();
        assert_eq!(config.size, [10, 10, 10]);
        assert_eq!(config.transform, TransformSpec::Identity);
        assert!(config.use_reference_image);
        assert_eq!(config.chunks, 1);
    }
}
