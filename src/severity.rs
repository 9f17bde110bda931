use crate::types::anomaly::Severity;

/// Coefficient-of-variation thresholds, inclusive lower bounds.
pub const CRITICAL_CV: f64 = 2.0;
pub const WARNING_CV: f64 = 1.0;

/// Classify a coefficient of variation into a severity tier.
/// Callers guarantee `cv >= 0`. Boundary values resolve to the higher tier.
pub fn classify(cv: f64) -> Severity {
    if cv >= CRITICAL_CV {
        Severity::Critical
    } else if cv >= WARNING_CV {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

/// Presentation tokens for a severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub icon: &'static str,
    pub color_token: &'static str,
}

/// Rendering policy for a tier, kept out of `classify` so the classifier
/// stays a pure tier mapping.
pub fn badge(severity: Severity) -> Badge {
    match severity {
        Severity::Critical => Badge {
            icon: "🔥",
            color_token: "#e53935",
        },
        Severity::Warning => Badge {
            icon: "⚠️",
            color_token: "#fb8c00",
        },
        Severity::Normal => Badge {
            icon: "",
            color_token: "#43a047",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_cv_is_critical() {
        assert_eq!(classify(2.35), Severity::Critical);
        assert_eq!(classify(100.0), Severity::Critical);
    }

    #[test]
    fn mid_cv_is_warning() {
        assert_eq!(classify(1.5), Severity::Warning);
        assert_eq!(classify(1.99), Severity::Warning);
    }

    #[test]
    fn low_cv_is_normal() {
        assert_eq!(classify(0.0), Severity::Normal);
        assert_eq!(classify(0.99), Severity::Normal);
    }

    #[test]
    fn boundaries_resolve_upward() {
        assert_eq!(classify(2.0), Severity::Critical);
        assert_eq!(classify(1.0), Severity::Warning);
    }

    #[test]
    fn badge_tokens_per_tier() {
        assert_eq!(badge(Severity::Critical).icon, "🔥");
        assert_eq!(badge(Severity::Warning).icon, "⚠️");
        assert_eq!(badge(Severity::Normal).icon, "");
        assert_ne!(
            badge(Severity::Critical).color_token,
            badge(Severity::Normal).color_token
        );
    }
}
