//! Mission-driven manual-entry form and the per-mission feature checklist.

mod features;
mod layout;

pub use features::{FeaturePayload, FeatureSelection};
pub use layout::{FormError, FormLayout, ManualForm, build_form};
