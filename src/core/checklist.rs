use crate::utils::error::{MaritimeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoyageStage {
    PreFixture,
    OnVoyage,
    PostVoyage,
}

impl VoyageStage {
    pub const ALL: [VoyageStage; 3] = [
        VoyageStage::PreFixture,
        VoyageStage::OnVoyage,
        VoyageStage::PostVoyage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoyageStage::PreFixture => "pre_fixture",
            VoyageStage::OnVoyage => "on_voyage",
            VoyageStage::PostVoyage => "post_voyage",
        }
    }

    pub fn items(&self) -> &'static [&'static str] {
        match self {
            VoyageStage::PreFixture => &[
                "Obtain charter party draft",
                "Review vessel certificates (class, P&I, statutory)",
                "Confirm cargo specs and load/discharge ports",
                "Nominate vessel and issue NOR requirements",
            ],
            VoyageStage::OnVoyage => &[
                "Issue NOR on arrival per CP terms",
                "Record SOF events with timestamps",
                "Monitor weather and routing",
                "Exchange arrival/departure reports",
            ],
            VoyageStage::PostVoyage => &[
                "Prepare laytime statement",
                "Issue demurrage/despatch invoice",
                "Archive CP, NOR, SOF, B/L copies",
                "Submit performance and bunker reports",
            ],
        }
    }
}

impl FromStr for VoyageStage {
    type Err = MaritimeError;

    /// Accepts `pre-fixture`, `Pre Fixture`, `pre_fixture`, ...
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        VoyageStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == key)
            .ok_or_else(|| {
                let valid: Vec<&str> = VoyageStage::ALL.iter().map(|s| s.as_str()).collect();
                MaritimeError::validation(format!(
                    "Unknown stage '{}'. Valid stages: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

impl fmt::Display for VoyageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub stage: VoyageStage,
    pub items: Vec<String>,
}

pub fn checklist_for(stage: &str) -> Result<Checklist> {
    let stage: VoyageStage = stage.parse()?;
    Ok(Checklist {
        stage,
        items: stage.items().iter().map(|s| s.to_string()).collect(),
    })
}
