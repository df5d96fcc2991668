use latticeview_common::is_known_ease;
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Which end of the curve the easing applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EaseMode {
    In,
    Out,
    InOut,
}

/// Easing curve, named the way gsap names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ease {
    Linear,
    /// Polynomial ease. `Power(1, _)` is quadratic, `Power(4, _)` quintic.
    Power(u8, EaseMode),
    Sine(EaseMode),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ease {0:?}")]
pub struct EaseParseError(pub String);

impl Default for Ease {
    fn default() -> Self {
        // gsap's default
        Self::Power(1, EaseMode::Out)
    }
}

impl Ease {
    pub const POWER1_IN_OUT: Self = Self::Power(1, EaseMode::InOut);

    /// Map linear progress in 0..=1 to eased progress. Input is clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::Power(n, mode) => {
                let k = i32::from(n) + 1;
                match mode {
                    EaseMode::In => t.powi(k),
                    EaseMode::Out => 1.0 - (1.0 - t).powi(k),
                    EaseMode::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(k) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(k) / 2.0
                        }
                    }
                }
            }
            Self::Sine(mode) => match mode {
                EaseMode::In => {
                    if t == 1.0 {
                        1.0
                    } else {
                        1.0 - (t * FRAC_PI_2).cos()
                    }
                }
                EaseMode::Out => (t * FRAC_PI_2).sin(),
                EaseMode::InOut => -((PI * t).cos() - 1.0) / 2.0,
            },
        }
    }
}

impl FromStr for Ease {
    type Err = EaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || EaseParseError(s.to_string());
        if !is_known_ease(s) {
            return Err(err());
        }
        let (family, mode) = match s.split_once('.') {
            Some((family, mode)) => (family, Some(mode)),
            None => (s, None),
        };
        let mode = match mode {
            None | Some("out") => EaseMode::Out,
            Some("in") => EaseMode::In,
            Some("inOut") => EaseMode::InOut,
            Some(_) => return Err(err()),
        };
        let power = |n: u8| Ok(Self::Power(n, mode));
        match family {
            "none" | "linear" | "power0" => Ok(Self::Linear),
            "power1" | "quad" => power(1),
            "power2" | "cubic" => power(2),
            "power3" | "quart" => power(3),
            "power4" | "quint" | "strong" => power(4),
            "sine" => Ok(Self::Sine(mode)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = |m: &EaseMode| match m {
            EaseMode::In => "in",
            EaseMode::Out => "out",
            EaseMode::InOut => "inOut",
        };
        match self {
            Self::Linear => write!(f, "none"),
            Self::Power(n, m) => write!(f, "power{n}.{}", mode(m)),
            Self::Sine(m) => write!(f, "sine.{}", mode(m)),
        }
    }
}
