//! Preset catalog
//!
//! An ordered list of named grids. The first preset is the one the editor
//! starts from. Stored codes are canonical or close to it (one built-in entry
//! carries a trailing `/`), so matching falls back to comparing decoded tokens.

use serde::{Deserialize, Serialize};

use crate::codec;

/// Built-in presets, in picker order.
const BUILTIN_PRESETS: &[(&str, &str)] = &[
    ("ImPOstor", "RD_RD_RD_RD/RD_RD_RD_RD/GY_GY_GY_GY/GY_GY_GY_GY"),
    ("Linn LM-1(1980)", "BK_BK_BK_BK/OR_OR_OR_OR/RD_RD_RD_RD/DG_DG_DG_DG/"),
    ("Akai MPC 60 (1981)", "LG_LG_LG_LG/DG_DG_DG_DG/BL_BL_BL_BL/RD_RD_RD_RD"),
    ("TR-808 PATTERN (1980)", "RD_RD_RD_RD/OR_OR_OR_OR/YE_YE_YE_YE/GY_GY_GY_GY"),
    ("TR-909 PATTERN (1983)", "DG_DG_DG_DG/WH_WH_WH_WH/OR_OR_OR_OR/LG_LG_LG_LG"),
    (
        "MAESTRO RHYTHM&SOUND (1968) - SOON",
        "BK_BK_BK_BK/OR_OR_OR_OR/IB_IB_IB_IB/YE_YE_YE_YE",
    ),
    ("ALL PURPLE", "PU_PU_PU_PU/PU_PU_PU_PU/PU_PU_PU_PU/PU_PU_PU_PU"),
    ("GameBoy", "LG_LG_LG_LG/LG_DG_RD_RD/DG_DG_DG_LG/LG_DG_LG_LG"),
    ("FADE", "BK_DG_LG_WH/BK_DG_LG_WH/BK_DG_LG_WH/BK_DG_LG_WH"),
    ("MERICA", "BL_BL_WH_WH/BL_BL_RD_RD/WH_WH_WH_WH/RD_RD_RD_RD"),
];

/// A named grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    /// Order code as stored; not necessarily canonical
    pub code: String,
}

impl Preset {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// Decoded color codes of this preset.
    pub fn codes(&self) -> Vec<String> {
        codec::parse(&self.code)
    }
}

/// Ordered, read-only list of presets.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_PRESETS
                .iter()
                .map(|&(name, code)| Preset::new(name, code))
                .collect(),
        )
    }

    /// Append presets. Only used while assembling the catalog at startup.
    pub fn extend(&mut self, presets: impl IntoIterator<Item = Preset>) {
        self.presets.extend(presets);
    }

    pub fn first(&self) -> Option<&Preset> {
        self.presets.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Preset> {
        self.presets.iter()
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Find the preset whose code matches `code`.
    ///
    /// Exact string equality is tried first across the whole catalog; failing
    /// that, both sides are decoded and their token sequences compared, which
    /// tolerates stray or trailing delimiters in stored codes.
    pub fn match_by_code(&self, code: &str) -> Option<&Preset> {
        if let Some(preset) = self.presets.iter().find(|p| p.code == code) {
            return Some(preset);
        }

        let wanted = codec::parse(code);
        if wanted.is_empty() {
            return None;
        }
        self.presets.iter().find(|p| p.codes() == wanted)
    }

    /// Find a preset by exact name.
    pub fn match_by_name(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }
}

impl<'a> IntoIterator for &'a PresetCatalog {
    type Item = &'a Preset;
    type IntoIter = std::slice::Iter<'a, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
