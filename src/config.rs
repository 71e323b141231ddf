use std::fmt;
use std::ops::RangeInclusive;

use clap::Parser;

use crate::error::{AppError, AppResult};

/// Tessellation density shared by every shape in one build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Density(u32);

impl Density {
    pub const MIN: u32 = 4;
    pub const MAX: u32 = 256;
    pub const DEFAULT: Density = Density(32);

    /// Range offered by the panel slider.
    pub const SLIDER_RANGE: RangeInclusive<u32> = 8..=128;

    pub fn new(value: u32) -> AppResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::InvalidDensity {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Parser, Debug)]
#[command(name = "relief3d")]
#[command(version, about = "Mesh resolution explorer for displaced spheres, tori and terrain")]
pub struct Args {
    /// Initial tessellation density.
    #[arg(short, long, default_value_t = 32, value_parser = parse_density)]
    pub density: u32,

    /// Start with the wireframe overlay hidden.
    #[arg(long)]
    pub hide_mesh: bool,

    /// Enable vertical sync.
    #[arg(long)]
    pub vsync: bool,
}

fn parse_density(s: &str) -> Result<u32, String> {
    let value: u32 = s.parse().map_err(|e| format!("{e}"))?;
    Density::new(value).map(Density::get).map_err(|e| e.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppConfig {
    pub density: Density,
    pub show_mesh: bool,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            density: Density::DEFAULT,
            show_mesh: true,
            vsync: false,
        }
    }
}

impl TryFrom<Args> for AppConfig {
    type Error = AppError;

    fn try_from(args: Args) -> AppResult<Self> {
        Ok(Self {
            density: Density::new(args.density)?,
            show_mesh: !args.hide_mesh,
            vsync: args.vsync,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_bounds() {
        assert!(Density::new(Density::MIN).is_ok());
        assert!(Density::new(Density::MAX).is_ok());
        assert!(Density::new(0).is_err());
        assert!(Density::new(3).is_err());
        assert!(Density::new(257).is_err());
    }

    #[test]
    fn test_slider_inside_valid_range() {
        assert!(Density::new(*Density::SLIDER_RANGE.start()).is_ok());
        assert!(Density::new(*Density::SLIDER_RANGE.end()).is_ok());
        assert!(Density::SLIDER_RANGE.contains(&Density::DEFAULT.get()));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["relief3d"]).unwrap();
        let config = AppConfig::try_from(args).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_args_reject_bad_density() {
        assert!(Args::try_parse_from(["relief3d", "--density", "2"]).is_err());
        assert!(Args::try_parse_from(["relief3d", "--density", "-5"]).is_err());
        assert!(Args::try_parse_from(["relief3d", "--density", "abc"]).is_err());
    }

    #[test]
    fn test_args_flags() {
        let args =
            Args::try_parse_from(["relief3d", "-d", "64", "--hide-mesh", "--vsync"]).unwrap();
        let config = AppConfig::try_from(args).unwrap();
        assert_eq!(config.density.get(), 64);
        assert!(!config.show_mesh);
        assert!(config.vsync);
    }
}
