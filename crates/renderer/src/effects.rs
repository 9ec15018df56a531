use std::str::FromStr;

/// Fragment effect rendered by the overlay.
///
/// Every variant is the same pipeline with a different distance-field body:
/// each body defines `effect_color(vec2 frag_coord)` over the uniform block
/// declared by the wrapper in `compile.rs`, and the wrapper turns its result
/// into premultiplied alpha. Adding a variant means adding a body here,
/// nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectKind {
    /// Ring around the center whose radius breathes with time.
    #[default]
    Pulse,
    /// Soft glow that wanders along a time-parameterized path.
    Spotlight,
    /// Darkened edges with a slow pulse, center left clear.
    Vignette,
}

impl EffectKind {
    /// GLSL body defining `effect_color` for this variant.
    pub fn fragment_body(&self) -> &'static str {
        match self {
            EffectKind::Pulse => PULSE_BODY,
            EffectKind::Spotlight => SPOTLIGHT_BODY,
            EffectKind::Vignette => VIGNETTE_BODY,
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::Pulse => f.write_str("pulse"),
            EffectKind::Spotlight => f.write_str("spotlight"),
            EffectKind::Vignette => f.write_str("vignette"),
        }
    }
}

impl FromStr for EffectKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pulse" => Ok(EffectKind::Pulse),
            "spotlight" => Ok(EffectKind::Spotlight),
            "vignette" => Ok(EffectKind::Vignette),
            other => Err(format!(
                "unknown effect '{other}'; expected pulse, spotlight, or vignette"
            )),
        }
    }
}

const PULSE_BODY: &str = r"vec4 effect_color(vec2 frag_coord) {
    vec2 center = 0.5 * params.bounds.zw;
    float extent = 0.5 * min(params.bounds.z, params.bounds.w);
    float radius = extent * (0.45 + 0.25 * sin(params.time * 2.0));
    float band = abs(distance(frag_coord, center) - radius);
    float alpha = (1.0 - smoothstep(0.0, extent * 0.12, band)) * 0.6;
    return vec4(0.55, 0.85, 1.0, alpha);
}
";

const SPOTLIGHT_BODY: &str = r"vec4 effect_color(vec2 frag_coord) {
    vec2 half_bounds = 0.5 * params.bounds.zw;
    vec2 center = half_bounds
        + 0.35 * half_bounds * vec2(cos(params.time * 0.9), sin(params.time * 1.3));
    float reach = 0.4 * min(params.bounds.z, params.bounds.w);
    float falloff = 1.0 - smoothstep(0.0, reach, distance(frag_coord, center));
    float alpha = falloff * falloff * 0.7;
    return vec4(1.0, 0.95, 0.8, alpha);
}
";

const VIGNETTE_BODY: &str = r"vec4 effect_color(vec2 frag_coord) {
    vec2 center = 0.5 * params.bounds.zw;
    float extent = 0.5 * length(params.bounds.zw);
    float edge = smoothstep(extent * 0.45, extent, distance(frag_coord, center));
    float alpha = edge * (0.5 + 0.1 * sin(params.time * 0.8));
    return vec4(0.02, 0.02, 0.05, alpha);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_effects() {
        assert_eq!("pulse".parse::<EffectKind>().unwrap(), EffectKind::Pulse);
        assert_eq!(
            " Spotlight ".parse::<EffectKind>().unwrap(),
            EffectKind::Spotlight
        );
        assert_eq!(
            "VIGNETTE".parse::<EffectKind>().unwrap(),
            EffectKind::Vignette
        );
    }

    #[test]
    fn rejects_unknown_effect() {
        assert!("plasma".parse::<EffectKind>().is_err());
    }

    #[test]
    fn every_body_defines_the_entry_point() {
        for kind in [EffectKind::Pulse, EffectKind::Spotlight, EffectKind::Vignette] {
            assert!(kind.fragment_body().contains("vec4 effect_color(vec2"));
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in [EffectKind::Pulse, EffectKind::Spotlight, EffectKind::Vignette] {
            assert_eq!(kind.to_string().parse::<EffectKind>().unwrap(), kind);
        }
    }
}
