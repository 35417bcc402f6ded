//! Design entity - a named, persisted bundle of appearance settings
//!
//! This is a data-carrying struct with no invariants to protect. All fields
//! are public because there's no invalid state that can be constructed - any
//! combination of values is valid. The folder path label is repository
//! state, not part of the entity.

use serde::{Deserialize, Serialize};

use crate::ids::DesignId;
use crate::value_objects::{
    ApplicationTypeMask, ApplySelection, DesignData, JobMask, MaterialOverrides,
};

/// A named, persisted bundle of equipment/customization/material/toggle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: DesignId,
    pub name: String,
    /// Free-form labels matched by tag predicates
    pub tags: Vec<String>,
    /// Display color label matched by color predicates
    pub color: String,
    pub data: DesignData,
    pub materials: MaterialOverrides,
    /// Fine-grained enable bits honored by the merge
    pub selection: ApplySelection,
    /// Applying this design requires a full actor redraw
    pub forced_redraw: bool,
    /// Applying this design clears advanced dye rows first
    pub reset_advanced_dyes: bool,
    /// Chained designs consumed by automation
    pub links: Vec<DesignLink>,
}

impl Design {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DesignId::new(),
            name: name.into(),
            tags: Vec::new(),
            color: String::new(),
            data: DesignData::default(),
            materials: MaterialOverrides::new(),
            selection: ApplySelection::all(),
            forced_redraw: false,
            reset_advanced_dyes: false,
            links: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: DesignData) -> Self {
        self.data = data;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_materials(mut self, materials: MaterialOverrides) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_selection(mut self, selection: ApplySelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_link(mut self, link: DesignLink) -> Self {
        self.links.push(link);
        self
    }

    /// Stable identifier string, matched by identifier predicates
    pub fn identifier(&self) -> String {
        self.id.to_string()
    }

    /// Shortened label used instead of the name in incognito mode
    pub fn incognito_label(&self) -> String {
        let full = self.id.to_string();
        full.chars().take(8).collect()
    }
}

/// One chained design reference, filtered by automation at apply time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignLink {
    pub target: DesignId,
    /// Categories the linked design may touch
    pub application: ApplicationTypeMask,
    /// Job classes the link is active for
    pub jobs: JobMask,
}

impl DesignLink {
    pub fn new(target: DesignId) -> Self {
        Self {
            target,
            application: ApplicationTypeMask::ALL,
            jobs: JobMask::ANY,
        }
    }

    pub fn with_application(mut self, application: ApplicationTypeMask) -> Self {
        self.application = application;
        self
    }

    pub fn with_jobs(mut self, jobs: JobMask) -> Self {
        self.jobs = jobs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_design_has_full_selection_and_no_links() {
        let design = Design::new("Casual Friday");
        assert_eq!(design.name, "Casual Friday");
        assert_eq!(design.selection, ApplySelection::all());
        assert!(design.links.is_empty());
        assert!(!design.forced_redraw);
    }

    #[test]
    fn incognito_label_is_first_eight_chars_of_id() {
        let design = Design::new("Secret");
        let label = design.incognito_label();
        assert_eq!(label.len(), 8);
        assert!(design.identifier().starts_with(&label));
    }

    #[test]
    fn links_default_to_all_categories_any_job() {
        let link = DesignLink::new(DesignId::new());
        assert_eq!(link.application, ApplicationTypeMask::ALL);
        assert_eq!(link.jobs, JobMask::ANY);
    }

    #[test]
    fn serde_roundtrip() {
        let design = Design::new("Round Trip")
            .with_tags(vec!["summer".to_string()])
            .with_color("green")
            .with_link(DesignLink::new(DesignId::new()));

        let json = serde_json::to_string(&design).expect("serialize");
        let back: Design = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, design);
    }
}
