use std::collections::BTreeMap;

use crate::mission::Mission;

#[derive(Clone, Debug, PartialEq, Eq)]
struct MissionFeatures {
    /// Insertion-ordered, no duplicates.
    selected: Vec<String>,
    /// True once the user has opened or used the advanced checklist.
    engaged: bool,
}

impl MissionFeatures {
    fn defaults(mission: Mission) -> Self {
        Self {
            selected: mission
                .default_features()
                .iter()
                .map(|name| name.to_string())
                .collect(),
            engaged: false,
        }
    }
}

/// Feature lists sent alongside a prediction request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeaturePayload {
    pub features: Vec<String>,
    /// Only present when the advanced checklist was engaged.
    pub selected_features: Option<Vec<String>>,
}

/// Per-mission set of selected feature names. Every mission keeps its own
/// independent set, whichever mission is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSelection {
    sets: BTreeMap<Mission, MissionFeatures>,
}

impl Default for FeatureSelection {
    fn default() -> Self {
        Self {
            sets: Mission::ALL
                .into_iter()
                .map(|mission| (mission, MissionFeatures::defaults(mission)))
                .collect(),
        }
    }
}

impl FeatureSelection {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, mission: Mission) -> &mut MissionFeatures {
        self.sets
            .entry(mission)
            .or_insert_with(|| MissionFeatures::defaults(mission))
    }

    /// Add or remove `feature` for `mission`. Returns true if the set changed.
    pub fn toggle_feature(&mut self, mission: Mission, feature: &str, selected: bool) -> bool {
        let set = self.entry(mission);
        set.engaged = true;
        let position = set.selected.iter().position(|name| name == feature);
        match (selected, position) {
            (true, None) => {
                set.selected.push(feature.to_string());
                true
            }
            (false, Some(index)) => {
                set.selected.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Mark the advanced checklist as in use for `mission`.
    pub fn engage(&mut self, mission: Mission) {
        self.entry(mission).engaged = true;
    }

    pub fn is_engaged(&self, mission: Mission) -> bool {
        self.sets.get(&mission).is_some_and(|set| set.engaged)
    }

    pub fn is_selected(&self, mission: Mission, feature: &str) -> bool {
        self.sets
            .get(&mission)
            .is_some_and(|set| set.selected.iter().any(|name| name == feature))
    }

    /// Live contents of the mission's set, in selection order.
    pub fn current_feature_selection(&self, mission: Mission) -> Vec<String> {
        self.sets
            .get(&mission)
            .map(|set| set.selected.clone())
            .unwrap_or_default()
    }

    /// Check every checklist entry for `mission`, keeping existing order.
    pub fn select_all(&mut self, mission: Mission) {
        for name in mission.feature_checklist() {
            self.toggle_feature(mission, name, true);
        }
    }

    pub fn deselect_all(&mut self, mission: Mission) {
        let set = self.entry(mission);
        set.engaged = true;
        set.selected.clear();
    }

    /// `"{checked} of {total} features selected"` over the mission's checklist.
    pub fn feature_count_summary(&self, mission: Mission) -> String {
        let checklist = mission.feature_checklist();
        let checked = checklist
            .iter()
            .filter(|name| self.is_selected(mission, name))
            .count();
        format!("{checked} of {} features selected", checklist.len())
    }

    /// Build the `features` / `selected_features` pair for a request. Without
    /// the advanced checklist, the mission defaults go out as `features`.
    pub fn payload(&self, mission: Mission) -> FeaturePayload {
        if !self.is_engaged(mission) {
            return FeaturePayload {
                features: mission
                    .default_features()
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
                selected_features: None,
            };
        }
        let current = self.current_feature_selection(mission);
        FeaturePayload {
            features: current.clone(),
            selected_features: Some(current),
        }
    }
}
