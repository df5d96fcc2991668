//! Ease names accepted in configs, shared so config validation and the
//! tween parser agree without depending on each other.

/// Curve families. Aliases map to the same curve.
pub const EASE_FAMILIES: &[&str] = &[
    "none", "linear", "power0", "power1", "quad", "power2", "cubic", "power3", "quart", "power4",
    "quint", "strong", "sine",
];

/// Suffixes after the dot. A bare family means `out`.
pub const EASE_MODES: &[&str] = &["in", "out", "inOut"];

/// Whether `name` is `family` or `family.mode` with both parts known.
pub fn is_known_ease(name: &str) -> bool {
    let (family, mode) = match name.split_once('.') {
        Some((family, mode)) => (family, Some(mode)),
        None => (name, None),
    };
    EASE_FAMILIES.contains(&family) && mode.is_none_or(|m| EASE_MODES.contains(&m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_family_with_or_without_mode() {
        assert!(is_known_ease("power1.inOut"));
        assert!(is_known_ease("sine"));
        assert!(is_known_ease("none.in"));
    }

    #[test]
    fn rejects_unknown_parts() {
        assert!(!is_known_ease("bounce.out"));
        assert!(!is_known_ease("power1.sideways"));
        assert!(!is_known_ease("power1."));
        assert!(!is_known_ease(""));
    }
}
