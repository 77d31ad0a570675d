//! Survey missions and their static reference data: manual-entry field
//! schemas, default feature lists, and identifier columns.

use serde::{Deserialize, Serialize};

/// One of the astronomical surveys the backend has a classifier for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mission {
    #[default]
    Kepler,
    Tess,
    K2,
}

impl Mission {
    /// All missions in selector order.
    pub const ALL: [Mission; 3] = [Mission::Kepler, Mission::Tess, Mission::K2];

    /// Identifier sent to the backend.
    pub fn id(self) -> &'static str {
        match self {
            Mission::Kepler => "kepler",
            Mission::Tess => "tess",
            Mission::K2 => "k2",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Mission::Kepler => "Kepler",
            Mission::Tess => "TESS",
            Mission::K2 => "K2",
        }
    }

    /// Parse a mission identifier, ignoring case and surrounding whitespace.
    pub fn from_id(id: &str) -> Option<Mission> {
        let id = id.trim();
        Mission::ALL
            .into_iter()
            .find(|mission| mission.id().eq_ignore_ascii_case(id))
    }

    /// Manual-entry fields in display order.
    pub fn field_schema(self) -> &'static [FieldDescriptor] {
        match self {
            Mission::Kepler => KEPLER_FIELDS,
            Mission::Tess => TESS_FIELDS,
            Mission::K2 => K2_FIELDS,
        }
    }

    /// Feature names selected before the user touches the checklist.
    pub fn default_features(self) -> &'static [&'static str] {
        match self {
            Mission::Kepler => &["koi_period", "koi_prad", "koi_teq", "koi_insol", "koi_dor"],
            Mission::Tess => &["Tmag", "Teff", "logg", "MH", "rad"],
            Mission::K2 => &["k2_period", "k2_prad", "k2_teq", "k2_insol", "k2_dor"],
        }
    }

    /// Catalog columns that name a row, in table order.
    pub fn identifier_columns(self) -> &'static [&'static str] {
        match self {
            Mission::Kepler => &["kepoi_name", "kepler_name"],
            Mission::Tess => &["toi"],
            Mission::K2 => &["pl_name"],
        }
    }

    /// Header labels for the two identifier columns of the result table.
    /// Missions with a single identifier leave the second header empty.
    pub fn identifier_headers(self) -> [&'static str; 2] {
        match self {
            Mission::Kepler => ["KepOI Name", "Kepler Name"],
            Mission::Tess => ["TOI Label", ""],
            Mission::K2 => ["Planet Name", ""],
        }
    }

    /// Names offered in the feature checklist: schema fields first, then any
    /// default feature the schema does not already list.
    pub fn feature_checklist(self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.field_schema().iter().map(|f| f.name).collect();
        for default in self.default_features() {
            if !names.contains(default) {
                names.push(default);
            }
        }
        names
    }
}

impl std::fmt::Display for Mission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Widget kind used for a manual-entry field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Free text that must parse as a finite number once filled in.
    Number,
}

/// Increment hint for numeric inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Any,
    Fixed(f64),
}

/// Static description of one manual-entry field.
///
/// `step`, `min` and `max` are advisory UI hints; nothing enforces them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub input_kind: InputKind,
    pub placeholder: &'static str,
    pub step: Option<Step>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldDescriptor {
    /// Whether `value` fits this field's input kind. Blank always fits; the
    /// backend reports missing values itself.
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return true;
        }
        match self.input_kind {
            InputKind::Number => value.parse::<f64>().is_ok_and(f64::is_finite),
        }
    }

    const fn number(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            input_kind: InputKind::Number,
            placeholder,
            step: Some(Step::Any),
            min: None,
            max: None,
        }
    }

    const fn flag(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input_kind: InputKind::Number,
            placeholder: "0 or 1",
            step: Some(Step::Fixed(1.0)),
            min: Some(0.0),
            max: Some(1.0),
        }
    }

    const fn with_step(mut self, step: Step) -> Self {
        self.step = Some(step);
        self
    }

    const fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

const KEPLER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::number("koi_period", "Orbital Period (days)", "e.g., 365.25"),
    FieldDescriptor::number("koi_duration", "Transit Duration (hours)", "e.g., 6.5"),
    FieldDescriptor::number("koi_depth", "Transit Depth (ppm)", "e.g., 1000"),
    FieldDescriptor::number("koi_prad", "Planet Radius (Earth radii)", "e.g., 1.2"),
    FieldDescriptor::number("koi_teq", "Equilibrium Temperature (K)", "e.g., 288"),
    FieldDescriptor::number("koi_srho", "Stellar Density (g/cm³)", "e.g., 1.4"),
    FieldDescriptor::number("koi_sma", "Semi-major Axis (AU)", "e.g., 1.0"),
    FieldDescriptor::number("koi_incl", "Inclination (degrees)", "e.g., 90"),
    FieldDescriptor::number("koi_insol", "Insolation Flux (Earth flux)", "e.g., 1.0"),
    FieldDescriptor::flag("koi_fpflag_nt", "Noise Transit Flag"),
    FieldDescriptor::flag("koi_fpflag_ss", "Stellar Variability Flag"),
    FieldDescriptor::flag("koi_fpflag_co", "Centroid Offset Flag"),
    FieldDescriptor::flag("koi_fpflag_ec", "Eclipsing Binary Flag"),
    FieldDescriptor::number("koi_model_snr", "Signal-to-Noise Ratio", "e.g., 15.2"),
    FieldDescriptor::number("koi_max_sngle_ev", "Max Single Event Statistic", "e.g., 8.5"),
    FieldDescriptor::number("koi_max_mult_ev", "Max Multi Event Statistic", "e.g., 12.3"),
];

const K2_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::number("pl_orbper", "Orbital Period (days)", "e.g., 365.25"),
    FieldDescriptor::number("pl_orbsmax", "Semi-major Axis (AU)", "e.g., 1.0"),
    FieldDescriptor::number("pl_rade", "Planet Radius (Earth radii)", "e.g., 1.2"),
    FieldDescriptor::number("pl_radj", "Planet Radius (Jupiter radii)", "e.g., 0.1"),
    FieldDescriptor::number("pl_masse", "Planet Mass (Earth masses)", "e.g., 1.0"),
    FieldDescriptor::number("pl_massj", "Planet Mass (Jupiter masses)", "e.g., 0.003"),
    FieldDescriptor::number("pl_trandep", "Transit Depth (ppm)", "e.g., 1000"),
    FieldDescriptor::number("pl_trandur", "Transit Duration (hours)", "e.g., 6.5"),
    FieldDescriptor::number("pl_ratdor", "Planet-Star Distance/Stellar Radius", "e.g., 10.5"),
    FieldDescriptor::number("pl_ratror", "Planet-Star Radius Ratio", "e.g., 0.1"),
    FieldDescriptor::number("pl_occdep", "Occultation Depth (ppm)", "e.g., 50"),
    FieldDescriptor::flag("tran_flag", "Transit Flag"),
    FieldDescriptor::flag("ptv_flag", "Photometric Timing Variations Flag"),
    FieldDescriptor::flag("ast_flag", "Astrometry Flag"),
    FieldDescriptor::flag("etv_flag", "Eclipse Timing Variations Flag"),
    FieldDescriptor::number("st_teff", "Stellar Effective Temperature (K)", "e.g., 5778"),
    FieldDescriptor::number("st_rad", "Stellar Radius (Solar radii)", "e.g., 1.0"),
    FieldDescriptor::number("st_mass", "Stellar Mass (Solar masses)", "e.g., 1.0"),
    FieldDescriptor::number("st_logg", "Stellar Surface Gravity (log10(cm/s²))", "e.g., 4.44"),
    FieldDescriptor::number("st_met", "Stellar Metallicity [Fe/H]", "e.g., 0.0"),
    FieldDescriptor::number("st_lum", "Stellar Luminosity (Solar luminosities)", "e.g., 1.0"),
    FieldDescriptor::number("sy_dist", "System Distance (pc)", "e.g., 150"),
    FieldDescriptor::number("sy_pm", "System Proper Motion (mas/yr)", "e.g., 28.0"),
    FieldDescriptor::number("sy_bmag", "System B Magnitude", "e.g., 12.5"),
    FieldDescriptor::number("sy_vmag", "System V Magnitude", "e.g., 11.8"),
    FieldDescriptor::number("sy_jmag", "System J Magnitude", "e.g., 10.2"),
    FieldDescriptor::number("sy_hmag", "System H Magnitude", "e.g., 9.8"),
    FieldDescriptor::number("sy_kmag", "System K Magnitude", "e.g., 9.5"),
    FieldDescriptor::number("k2_campaigns_num", "K2 Campaign Number", "e.g., 5")
        .with_step(Step::Fixed(1.0))
        .with_min(0.0),
    FieldDescriptor::number("pl_orbeccen", "Orbital Eccentricity", "e.g., 0.1")
        .with_min(0.0)
        .with_max(1.0),
    FieldDescriptor::number("pl_insol", "Insolation Flux (Earth flux)", "e.g., 1.0"),
];

const TESS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::number("pl_orbper", "Orbital Period (days)", "e.g., 365.25"),
    FieldDescriptor::number("pl_trandurh", "Transit Duration (hours)", "e.g., 6.5"),
    FieldDescriptor::number("pl_trandep", "Transit Depth (ppm)", "e.g., 1000"),
    FieldDescriptor::number("pl_rade", "Planet Radius (Earth radii)", "e.g., 1.2"),
    FieldDescriptor::number("pl_insol", "Insolation Flux (Earth flux)", "e.g., 1.0"),
    FieldDescriptor::number("pl_eqt", "Equilibrium Temperature (K)", "e.g., 288"),
    FieldDescriptor::number("st_teff", "Stellar Effective Temperature (K)", "e.g., 5778"),
    FieldDescriptor::number("st_logg", "Stellar Surface Gravity (log10(cm/s²))", "e.g., 4.44"),
    FieldDescriptor::number("st_rad", "Stellar Radius (Solar radii)", "e.g., 1.0"),
    FieldDescriptor::number("st_tmag", "TESS Magnitude", "e.g., 10.5"),
    FieldDescriptor::number("st_dist", "Stellar Distance (pc)", "e.g., 150"),
];
