//! Keyword-rule categorizer mapping a headline to a thematic component.

use hindex_core::Component;
use regex::{Regex, RegexBuilder};

use crate::error::EngineError;

/// Ordered rule table. Rules are tried top to bottom and the first pattern
/// matching anywhere in the title wins; the order is load-bearing and must
/// not change (conflict outranks disaster outranks civic outranks science
/// outranks humanitarian).
const RULES: &[(Component, i8, &str)] = &[
    (
        Component::A,
        -1,
        r"war|attack|missile|drone|conflict|clashes|shooting|airstrike|invasion|terror|raid|shelling",
    ),
    (
        Component::C,
        -1,
        r"earthquake|flood|wildfire|hurricane|cyclone|landslide|eruption|famine|outbreak|collapse",
    ),
    (
        Component::D,
        1,
        r"court|verdict|rights|anti[- ]corruption|transparency|accountability|treaty|ceasefire",
    ),
    (
        Component::E,
        1,
        r"vaccine|cancer|science|research|discovery|breakthrough|trial|approved|cure|space|fusion",
    ),
    (
        Component::B,
        1,
        r"aid|donation|charity|volunteer|rebuild|peace|reconciliation|humanitarian|rescued|relief",
    ),
];

/// Words that raise the magnitude of a matched headline.
const INTENSITY: &str =
    r"\b(major|massive|deadly|historic|record|breakthrough|landmark|catastrophic)\b";

/// Magnitude for titles that match no rule: a weak positive under civic
/// governance, so themeless days do not drag the index negative.
const FALLBACK_MAGNITUDE: f64 = 0.3;

/// Result of categorizing one title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Categorization {
    pub component: Component,
    /// `-1` or `+1`.
    pub sign: i8,
    /// Severity in `[0.3, 1.0]`.
    pub magnitude: f64,
}

/// Compiled rule table. Construct once per run; categorization itself is a
/// pure function of the title.
#[derive(Debug)]
pub struct Categorizer {
    rules: Vec<(Component, i8, Regex)>,
    intensity: Regex,
}

impl Categorizer {
    /// Compile the rule table, failing fast if any pattern is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Rule`] naming the offending pattern.
    pub fn new() -> Result<Self, EngineError> {
        let compile = |pattern: &str| -> Result<Regex, EngineError> {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| EngineError::Rule {
                    pattern: pattern.to_string(),
                    source,
                })
        };

        let rules = RULES
            .iter()
            .map(|&(component, sign, pattern)| Ok((component, sign, compile(pattern)?)))
            .collect::<Result<Vec<_>, EngineError>>()?;
        let intensity = compile(INTENSITY)?;

        Ok(Self { rules, intensity })
    }

    /// Map a title to `(component, sign, magnitude)` by first-match-wins
    /// rule order. Titles matching no rule fall back to `(D, +1, 0.3)`.
    #[must_use]
    pub fn categorize(&self, title: &str) -> Categorization {
        for (component, sign, pattern) in &self.rules {
            if pattern.is_match(title) {
                return Categorization {
                    component: *component,
                    sign: *sign,
                    magnitude: self.magnitude(title),
                };
            }
        }

        Categorization {
            component: Component::D,
            sign: 1,
            magnitude: FALLBACK_MAGNITUDE,
        }
    }

    /// Saturating magnitude for a matched title: a 0.6 base plus 0.1 per
    /// intensity word, clamped to `[0.3, 1.0]`.
    fn magnitude(&self, title: &str) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let hits = self.intensity.find_iter(title).count() as f64;
        (0.6 + 0.1 * hits).clamp(0.3, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorizer() -> Categorizer {
        Categorizer::new().expect("static rule table should compile")
    }

    #[test]
    fn rule_table_compiles() {
        assert!(Categorizer::new().is_ok());
    }

    #[test]
    fn conflict_keyword_maps_to_component_a_negative() {
        let c = categorizer().categorize("Missile attack reported near the border");
        assert_eq!(c.component, Component::A);
        assert_eq!(c.sign, -1);
    }

    #[test]
    fn disaster_keyword_maps_to_component_c_negative() {
        let c = categorizer().categorize("Earthquake strikes coastal region");
        assert_eq!(c.component, Component::C);
        assert_eq!(c.sign, -1);
    }

    #[test]
    fn science_keyword_maps_to_component_e_positive() {
        let c = categorizer().categorize("New vaccine shows promise in trial");
        assert_eq!(c.component, Component::E);
        assert_eq!(c.sign, 1);
    }

    #[test]
    fn humanitarian_keyword_maps_to_component_b_positive() {
        let c = categorizer().categorize("Volunteers deliver relief supplies");
        assert_eq!(c.component, Component::B);
        assert_eq!(c.sign, 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = categorizer().categorize("WILDFIRE FORCES EVACUATIONS");
        assert_eq!(c.component, Component::C);
    }

    #[test]
    fn conflict_outranks_humanitarian() {
        // Both a conflict and a humanitarian keyword: the conflict rule is
        // tried first and wins.
        let c = categorizer().categorize("Aid convoy halted as clashes resume");
        assert_eq!(c.component, Component::A);
        assert_eq!(c.sign, -1);
    }

    #[test]
    fn disaster_outranks_science() {
        let c = categorizer().categorize("Research station lost in flood");
        assert_eq!(c.component, Component::C);
    }

    #[test]
    fn unmatched_title_falls_back_to_weak_positive_civic() {
        let c = categorizer().categorize("Local bakery celebrates anniversary");
        assert_eq!(c.component, Component::D);
        assert_eq!(c.sign, 1);
        assert!((c.magnitude - 0.3).abs() < 1e-12);
    }

    #[test]
    fn matched_magnitude_has_base_of_point_six() {
        let c = categorizer().categorize("Clashes in the capital");
        assert!((c.magnitude - 0.6).abs() < 1e-12);
    }

    #[test]
    fn intensity_words_raise_magnitude() {
        let base = categorizer().categorize("Flooding in the delta").magnitude;
        let one = categorizer()
            .categorize("Massive flooding in the delta")
            .magnitude;
        let two = categorizer()
            .categorize("Massive deadly flooding in the delta")
            .magnitude;
        assert!(one > base);
        assert!(two > one);
        assert!((one - 0.7).abs() < 1e-12);
        assert!((two - 0.8).abs() < 1e-12);
    }

    #[test]
    fn magnitude_saturates_at_one() {
        let c = categorizer().categorize(
            "Major massive deadly historic record breakthrough landmark catastrophic war",
        );
        assert!((c.magnitude - 1.0).abs() < 1e-12);
    }

    #[test]
    fn magnitude_always_within_bounds() {
        let categorizer = categorizer();
        for title in [
            "",
            "quiet tuesday",
            "war",
            "major war",
            "major major major major major war",
            "Massive historic record deadly catastrophic landmark breakthrough major flood",
        ] {
            let c = categorizer.categorize(title);
            assert!(
                (0.3..=1.0).contains(&c.magnitude),
                "magnitude {} out of bounds for title {title:?}",
                c.magnitude
            );
        }
    }

    #[test]
    fn categorize_is_deterministic() {
        let categorizer = categorizer();
        let a = categorizer.categorize("Ceasefire treaty signed after talks");
        let b = categorizer.categorize("Ceasefire treaty signed after talks");
        assert_eq!(a, b);
    }
}
