/// Marker check run before a step rewrites anything.
///
/// The guard is satisfied as soon as any one of its markers occurs in the
/// buffer. A step whose markers are only partly present is therefore treated
/// as applied and left alone; re-inserting it would duplicate declarations.
#[derive(Debug, Clone, Copy)]
pub struct Guard {
    markers: &'static [&'static str],
}

impl Guard {
    pub const fn new(markers: &'static [&'static str]) -> Self {
        Self { markers }
    }

    /// A guard that never fires, for steps that are safe to re-run as-is
    pub const fn none() -> Self {
        Self { markers: &[] }
    }

    pub fn markers(&self) -> &'static [&'static str] {
        self.markers
    }

    pub fn is_satisfied(&self, buffer: &str) -> bool {
        self.markers.iter().any(|marker| buffer.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_marker_satisfies() {
        let guard = Guard::new(&["alpha", "beta"]);

        assert!(guard.is_satisfied("alpha only"));
        assert!(guard.is_satisfied("only beta"));
        assert!(guard.is_satisfied("alpha and beta"));
        assert!(!guard.is_satisfied("gamma"));
    }

    #[test]
    fn test_empty_guard_never_fires() {
        assert!(!Guard::none().is_satisfied("anything at all"));
        assert!(Guard::none().markers().is_empty());
    }
}
