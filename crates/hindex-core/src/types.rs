use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the five fixed thematic buckets an event is scored under.
///
/// The label set is part of the output contract: artifacts always carry
/// the single-letter form `"A"`..`"E"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Conflict and violence.
    A,
    /// Humanitarian action and cooperation.
    B,
    /// Natural disaster and crisis.
    C,
    /// Civic life and governance.
    D,
    /// Science and health.
    E,
}

impl Component {
    /// All components in their fixed reporting order.
    pub const ALL: [Component; 5] = [
        Component::A,
        Component::B,
        Component::C,
        Component::D,
        Component::E,
    ];
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Component::A => "A",
            Component::B => "B",
            Component::C => "C",
            Component::D => "D",
            Component::E => "E",
        };
        write!(f, "{label}")
    }
}

/// Coarse political-lean label attached to a publishing domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiasBin {
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
    Unknown,
}

/// Reliability and bias lookup value for one publishing domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityEntry {
    pub bias: BiasBin,
    /// Source reliability in `[0, 1]`.
    pub reliability: f64,
}

impl Default for ReliabilityEntry {
    /// The entry used for domains absent from the reliability table.
    fn default() -> Self {
        Self {
            bias: BiasBin::Center,
            reliability: 0.8,
        }
    }
}

/// A single fetched headline, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineRecord {
    pub title: String,
    /// Publishing domain, lowercased by the source layer.
    pub source_domain: String,
    pub observed_date: NaiveDate,
}

/// One scored event row, produced per cluster and consumed by the index
/// model. Field names are part of the transparency-artifact contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub date: NaiveDate,
    pub component: Component,
    /// Valence direction: `-1` or `+1`.
    pub sign: i8,
    /// Severity in `[0.3, 1.0]`.
    pub magnitude: f64,
    /// Mean member reliability in `[0, 1]`.
    pub reliability: f64,
    /// Share of cluster members in the dominant bias bin, in `[0, 1]`.
    pub bias_max_share: f64,
    pub representative_title: String,
}

/// One day of the bounded index series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub date: NaiveDate,
    /// Humanity Index, an integer in `[-100, 100]`.
    #[serde(rename = "HI")]
    pub hi: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_serializes_as_single_letter() {
        let json = serde_json::to_string(&Component::C).unwrap();
        assert_eq!(json, "\"C\"");
    }

    #[test]
    fn bias_bin_serializes_kebab_case() {
        let json = serde_json::to_string(&BiasBin::CenterLeft).unwrap();
        assert_eq!(json, "\"center-left\"");
    }

    #[test]
    fn bias_bin_round_trips() {
        for raw in ["left", "center-left", "center", "center-right", "right", "unknown"] {
            let bin: BiasBin = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
            assert_eq!(serde_json::to_string(&bin).unwrap(), format!("\"{raw}\""));
        }
    }

    #[test]
    fn unknown_domain_entry_defaults_to_center() {
        let entry = ReliabilityEntry::default();
        assert_eq!(entry.bias, BiasBin::Center);
        assert!((entry.reliability - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn index_point_uses_upper_case_hi_key() {
        let point = IndexPoint {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            hi: -42,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2025-06-01");
        assert_eq!(json["HI"], -42);
    }

    #[test]
    fn scored_event_field_names_are_stable() {
        let event = ScoredEvent {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            component: Component::A,
            sign: -1,
            magnitude: 0.6,
            reliability: 0.9,
            bias_max_share: 1.0,
            representative_title: "Example".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        for key in [
            "date",
            "component",
            "sign",
            "magnitude",
            "reliability",
            "bias_max_share",
            "representative_title",
        ] {
            assert!(json.get(key).is_some(), "missing field {key}");
        }
    }
}
