use clap::Parser;
use renderer::{Antialiasing, EffectKind};

#[derive(Parser, Debug)]
#[command(
    name = "glowlay",
    author,
    version,
    about = "Translucent display-synchronized overlay renderer"
)]
pub struct Cli {
    /// Overlay size in physical pixels (e.g. `400x400`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Seconds to keep the overlay on screen.
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Effect variant: `pulse`, `spotlight`, or `vignette`.
    #[arg(
        long,
        value_name = "EFFECT",
        value_parser = parse_effect,
        default_value = "pulse"
    )]
    pub effect: EffectKind,

    /// Anti-aliasing policy: `off` or an MSAA sample count (2/4/8/16).
    #[arg(
        long,
        value_name = "MODE",
        value_parser = parse_antialias,
        default_value = "4"
    )]
    pub antialias: Antialiasing,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_effect(value: &str) -> Result<EffectKind, String> {
    value.parse()
}

pub fn parse_antialias(value: &str) -> Result<Antialiasing, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("anti-alias mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "off" | "none" | "disable" | "disabled" | "0" | "1" => Ok(Antialiasing::Off),
        _ => {
            let samples: u32 = normalized.parse().map_err(|_| {
                format!("invalid anti-alias sample count '{trimmed}'; use off or 2/4/8/16")
            })?;
            if !matches!(samples, 2 | 4 | 8 | 16) {
                return Err(format!(
                    "unsupported sample count {samples}; supported values are 2, 4, 8, or 16"
                ));
            }
            Ok(Antialiasing::Samples(samples))
        }
    }
}

/// Parses a `WIDTHxHEIGHT` size argument.
pub fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid size '{value}'; expected WIDTHxHEIGHT"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in size '{value}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in size '{value}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("size '{value}' must be non-zero in both dimensions"));
    }
    Ok((width, height))
}

/// Parses the run duration in (possibly fractional) seconds.
pub fn parse_run_duration(seconds: f64) -> Result<std::time::Duration, String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("duration must be a positive number of seconds, got {seconds}"));
    }
    Ok(std::time::Duration::from_secs_f64(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_accepts_both_separators() {
        assert_eq!(parse_surface_size("400x400").unwrap(), (400, 400));
        assert_eq!(parse_surface_size("1920X1080").unwrap(), (1920, 1080));
        assert_eq!(parse_surface_size(" 640 x 480 ").unwrap(), (640, 480));
    }

    #[test]
    fn surface_size_rejects_malformed_input() {
        assert!(parse_surface_size("400").is_err());
        assert!(parse_surface_size("0x400").is_err());
        assert!(parse_surface_size("wide x tall").is_err());
    }

    #[test]
    fn antialias_accepts_off_and_sample_counts() {
        assert_eq!(parse_antialias("off").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("0").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("4").unwrap(), Antialiasing::Samples(4));
        assert_eq!(parse_antialias("16").unwrap(), Antialiasing::Samples(16));
        assert!(parse_antialias("3").is_err());
        assert!(parse_antialias("").is_err());
    }

    #[test]
    fn run_duration_must_be_positive_and_finite() {
        assert_eq!(
            parse_run_duration(1.5).unwrap(),
            std::time::Duration::from_millis(1500)
        );
        assert!(parse_run_duration(0.0).is_err());
        assert!(parse_run_duration(-2.0).is_err());
        assert!(parse_run_duration(f64::NAN).is_err());
    }

    #[test]
    fn cli_defaults_are_stable() {
        let cli = Cli::parse_from(["glowlay"]);
        assert_eq!(cli.effect, EffectKind::Pulse);
        assert_eq!(cli.antialias, Antialiasing::Samples(4));
        assert!(cli.size.is_none());
        assert!(cli.duration.is_none());
    }
}
