//! Scene label vocabulary.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LabelError;

/// Group a [`Label`] belongs to.
///
/// The two groups are disjoint and together cover the whole vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelGroup {
    /// Scenes defined by what traffic participants do.
    Dynamic,

    /// Scenes defined by the surroundings.
    Static,
}

impl LabelGroup {
    /// Returns the labels in this group, in vocabulary order.
    #[must_use]
    pub const fn labels(self) -> &'static [Label] {
        match self {
            Self::Dynamic => &Label::DYNAMIC,
            Self::Static => &Label::STATIC,
        }
    }

    /// Returns the group name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dynamic => "dynamic",
            Self::Static => "static",
        }
    }
}

impl std::fmt::Display for LabelGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scene-recognition label.
///
/// The wire form is the upper snake case name (`PED_CROSSING`), which is
/// what [`Label::name`], [`Display`](std::fmt::Display), serde and
/// [`FromStr`] all agree on.
///
/// # Example
///
/// ```
/// use scene_types::Label;
///
/// assert_eq!(Label::TrafficLight.name(), "TRAFFIC_LIGHT");
/// assert_eq!("RAINY_WEATHER".parse::<Label>().ok(), Some(Label::RainyWeather));
/// assert_eq!(Label::ALL.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    /// Pedestrian crossing in front of the ego vehicle.
    PedCrossing,
    /// Ego vehicle turning left.
    LeftTurn,
    /// Ego vehicle turning right.
    RightTurn,
    /// Construction vehicle in the scene.
    ConstructionVehicle,
    /// Ego vehicle avoiding a stationary obstacle.
    AvoidStationary,
    /// Road intersection.
    Intersection,
    /// Parking lot.
    ParkingLot,
    /// Traffic light visible.
    TrafficLight,
    /// Rain.
    RainyWeather,
    /// Construction zone.
    ConstructionZone,
}

impl Label {
    /// Dynamic labels, in vocabulary order.
    pub const DYNAMIC: [Self; 5] = [
        Self::PedCrossing,
        Self::LeftTurn,
        Self::RightTurn,
        Self::ConstructionVehicle,
        Self::AvoidStationary,
    ];

    /// Static labels, in vocabulary order.
    pub const STATIC: [Self; 5] = [
        Self::Intersection,
        Self::ParkingLot,
        Self::TrafficLight,
        Self::RainyWeather,
        Self::ConstructionZone,
    ];

    /// The full vocabulary: dynamic labels followed by static labels.
    pub const ALL: [Self; 10] = [
        Self::PedCrossing,
        Self::LeftTurn,
        Self::RightTurn,
        Self::ConstructionVehicle,
        Self::AvoidStationary,
        Self::Intersection,
        Self::ParkingLot,
        Self::TrafficLight,
        Self::RainyWeather,
        Self::ConstructionZone,
    ];

    /// Returns the wire name of the label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PedCrossing => "PED_CROSSING",
            Self::LeftTurn => "LEFT_TURN",
            Self::RightTurn => "RIGHT_TURN",
            Self::ConstructionVehicle => "CONSTRUCTION_VEHICLE",
            Self::AvoidStationary => "AVOID_STATIONARY",
            Self::Intersection => "INTERSECTION",
            Self::ParkingLot => "PARKING_LOT",
            Self::TrafficLight => "TRAFFIC_LIGHT",
            Self::RainyWeather => "RAINY_WEATHER",
            Self::ConstructionZone => "CONSTRUCTION_ZONE",
        }
    }

    /// Returns the group the label belongs to.
    #[must_use]
    pub const fn group(self) -> LabelGroup {
        match self {
            Self::PedCrossing
            | Self::LeftTurn
            | Self::RightTurn
            | Self::ConstructionVehicle
            | Self::AvoidStationary => LabelGroup::Dynamic,
            Self::Intersection
            | Self::ParkingLot
            | Self::TrafficLight
            | Self::RainyWeather
            | Self::ConstructionZone => LabelGroup::Static,
        }
    }

    /// Returns `true` if `raw` is the wire name of this label.
    #[must_use]
    pub fn matches(self, raw: &str) -> bool {
        self.name() == raw
    }

    /// Parses a raw label string, rejecting anything outside the vocabulary.
    ///
    /// Matching is exact: no trimming, no case folding.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::Unknown`] naming `raw` if it is not one of
    /// the 10 labels.
    pub fn parse_raw(raw: &str) -> Result<Self, LabelError> {
        Self::ALL
            .into_iter()
            .find(|label| label.matches(raw))
            .ok_or_else(|| LabelError::unknown(raw))
    }

    /// Parses every element of `raw`, failing on the first unknown one.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::Unknown`] for the first element outside the
    /// vocabulary.
    pub fn parse_all<I, S>(raw: I) -> Result<Vec<Self>, LabelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|s| Self::parse_raw(s.as_ref()))
            .collect()
    }

    /// Comma separated list of every wire name, in vocabulary order.
    #[must_use]
    pub fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(|label| label.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_raw(s)
    }
}

impl TryFrom<&str> for Label {
    type Error = LabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_raw(value)
    }
}

/// How a multi-label filter combines its labels.
///
/// # Example
///
/// ```
/// use scene_types::MatchMode;
///
/// assert_eq!(MatchMode::default(), MatchMode::Any);
/// assert_eq!("all".parse::<MatchMode>().ok(), Some(MatchMode::All));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Record carries at least one of the requested labels.
    ///
    /// An empty request matches nothing.
    #[default]
    Any,

    /// Record carries every requested label.
    ///
    /// An empty request matches everything.
    All,
}

impl MatchMode {
    /// Returns the mode name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }

    /// Applies the mode to a record's raw labels.
    ///
    /// `wanted` is assumed to be already validated; `labels` is raw data
    /// and may hold strings outside the vocabulary, which never match.
    #[must_use]
    pub fn accepts<S: AsRef<str>>(self, labels: &[S], wanted: &[Label]) -> bool {
        let has = |label: &Label| labels.iter().any(|raw| label.matches(raw.as_ref()));
        match self {
            Self::Any => wanted.iter().any(has),
            Self::All => wanted.iter().all(has),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MatchMode {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => Err(LabelError::unknown_mode(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_groups_are_disjoint_and_cover_all() {
        for label in Label::DYNAMIC {
            assert_eq!(label.group(), LabelGroup::Dynamic);
            assert!(!Label::STATIC.contains(&label));
        }
        for label in Label::STATIC {
            assert_eq!(label.group(), LabelGroup::Static);
        }
        assert_eq!(Label::DYNAMIC.len() + Label::STATIC.len(), Label::ALL.len());
        for label in Label::ALL {
            assert!(label.group().labels().contains(&label));
        }
    }

    #[test]
    fn label_name_roundtrips_through_parse() {
        for label in Label::ALL {
            assert_eq!(label.name().parse::<Label>().ok(), Some(label));
        }
    }

    #[test]
    fn label_parse_is_exact() {
        assert!(Label::parse_raw("ped_crossing").is_err());
        assert!(Label::parse_raw(" PED_CROSSING").is_err());
        assert!(Label::parse_raw("").is_err());
    }

    #[test]
    fn label_parse_rejects_unknown() {
        let err = Label::parse_raw("NOT_A_LABEL");
        assert!(matches!(err, Err(LabelError::Unknown { ref value }) if value == "NOT_A_LABEL"));
    }

    #[test]
    fn label_parse_all_stops_at_first_unknown() {
        let err = Label::parse_all(["LEFT_TURN", "FOG", "SNOW"]);
        assert!(matches!(err, Err(LabelError::Unknown { ref value }) if value == "FOG"));

        let ok = Label::parse_all(["LEFT_TURN", "INTERSECTION"]);
        assert_eq!(ok.ok(), Some(vec![Label::LeftTurn, Label::Intersection]));
    }

    #[test]
    fn label_vocabulary_lists_every_name() {
        let vocab = Label::vocabulary();
        for label in Label::ALL {
            assert!(vocab.contains(label.name()));
        }
        assert!(vocab.starts_with("PED_CROSSING"));
    }

    #[test]
    fn label_serialization() {
        let json = serde_json::to_string(&Label::ConstructionVehicle).unwrap_or_default();
        assert_eq!(json, "\"CONSTRUCTION_VEHICLE\"");

        let parsed: std::result::Result<Label, _> = serde_json::from_str("\"PARKING_LOT\"");
        assert_eq!(parsed.ok(), Some(Label::ParkingLot));
    }

    #[test]
    fn match_mode_any() {
        let labels = ["INTERSECTION", "SOMETHING_ELSE"];
        assert!(MatchMode::Any.accepts(&labels, &[Label::Intersection, Label::LeftTurn]));
        assert!(!MatchMode::Any.accepts(&labels, &[Label::LeftTurn]));
    }

    #[test]
    fn match_mode_all() {
        let labels = ["INTERSECTION", "TRAFFIC_LIGHT"];
        assert!(MatchMode::All.accepts(&labels, &[Label::Intersection, Label::TrafficLight]));
        assert!(!MatchMode::All.accepts(&labels, &[Label::Intersection, Label::LeftTurn]));
    }

    #[test]
    fn match_mode_empty_request_asymmetry() {
        let labels = ["INTERSECTION"];
        assert!(MatchMode::All.accepts(&labels, &[]));
        assert!(!MatchMode::Any.accepts(&labels, &[]));
    }

    #[test]
    fn match_mode_parse() {
        assert_eq!("ANY".parse::<MatchMode>().ok(), Some(MatchMode::Any));
        assert_eq!("all".parse::<MatchMode>().ok(), Some(MatchMode::All));
        assert!("some".parse::<MatchMode>().is_err());
    }

    #[test]
    fn label_group_display() {
        assert_eq!(format!("{}", LabelGroup::Dynamic), "dynamic");
        assert_eq!(format!("{}", Label::LeftTurn), "LEFT_TURN");
    }
}
