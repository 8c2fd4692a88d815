//! Palette registry mapping 2-character color codes to display colors
//!
//! The registry keeps entries in registration order, which is the order the
//! legend and the per-cell picker present them in. Lookups never fail: an
//! unknown code resolves to [`FALLBACK_GRAY`] and produces a diagnostic.

use std::collections::HashMap;

use image::Rgb;
use serde::Serialize;

use crate::color::to_hex;

/// Gray used for codes that are not registered.
pub const FALLBACK_GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Built-in colors, in legend order.
const BUILTIN_COLORS: &[(&str, &str, [u8; 3])] = &[
    ("RD", "Red", [255, 0, 0]),
    ("OR", "Orange", [255, 153, 102]),
    ("YE", "Yellow", [249, 231, 96]),
    ("GR", "Green", [136, 196, 73]),
    ("IB", "Ice Blue", [178, 240, 229]),
    ("BL", "Blue", [69, 204, 245]),
    ("PU", "Purple", [135, 111, 204]),
    ("LG", "Light Gray", [224, 224, 224]),
    ("DG", "Dark Gray", [96, 96, 96]),
    ("WH", "White", [255, 255, 255]),
    ("BK", "Black", [0, 0, 0]),
];

/// A single registered color.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub code: String,
    pub name: String,
    pub rgb: Rgb<u8>,
}

/// JSON shape of a palette entry for `--json` output.
#[derive(Debug, Serialize)]
pub struct PaletteEntryView<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub rgb: [u8; 3],
    pub hex: String,
}

impl PaletteEntry {
    pub fn view(&self) -> PaletteEntryView<'_> {
        PaletteEntryView {
            code: &self.code,
            name: &self.name,
            rgb: self.rgb.0,
            hex: to_hex(self.rgb),
        }
    }
}

/// Warning produced when a code cannot be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteWarning {
    pub message: String,
}

impl PaletteWarning {
    pub fn unknown_code(code: &str) -> Self {
        Self {
            message: format!("Color with code '{}' not found", code),
        }
    }
}

/// Lookup result that always carries a color, plus a warning on a miss.
#[derive(Debug, Clone, PartialEq)]
pub struct LenientResult {
    pub rgb: Rgb<u8>,
    pub warning: Option<PaletteWarning>,
}

/// Registry of color codes.
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    entries: Vec<PaletteEntry>,
    index: HashMap<String, usize>,
}

impl PaletteRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The built-in 11-color palette.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &(code, name, [r, g, b]) in BUILTIN_COLORS {
            registry.register(code, name, r, g, b);
        }
        registry
    }

    /// Register a color, replacing any existing entry with the same code.
    ///
    /// A replaced entry keeps its original position in the legend.
    pub fn register(&mut self, code: &str, name: &str, r: u8, g: u8, b: u8) {
        let entry = PaletteEntry {
            code: code.to_string(),
            name: name.to_string(),
            rgb: Rgb([r, g, b]),
        };

        match self.index.get(code) {
            Some(&i) => {
                tracing::debug!("Overwriting palette entry '{}'", code);
                self.entries[i] = entry;
            }
            None => {
                self.index.insert(code.to_string(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Get an entry by code.
    pub fn get(&self, code: &str) -> Option<&PaletteEntry> {
        self.index.get(code).map(|&i| &self.entries[i])
    }

    /// Check if a code is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Resolve a code to its color, falling back to gray with a logged warning.
    pub fn lookup(&self, code: &str) -> Rgb<u8> {
        let result = self.lookup_lenient(code);
        if let Some(warning) = &result.warning {
            tracing::warn!("{}", warning.message);
        }
        result.rgb
    }

    /// Resolve a code without logging; the caller decides what to do with the warning.
    pub fn lookup_lenient(&self, code: &str) -> LenientResult {
        match self.get(code) {
            Some(entry) => LenientResult {
                rgb: entry.rgb,
                warning: None,
            },
            None => LenientResult {
                rgb: FALLBACK_GRAY,
                warning: Some(PaletteWarning::unknown_code(code)),
            },
        }
    }

    /// Resolve many codes at once, logging one warning per distinct unknown code.
    pub fn lookup_all<S: AsRef<str>>(&self, codes: &[S]) -> Vec<Rgb<u8>> {
        let mut reported: Vec<&str> = Vec::new();
        codes
            .iter()
            .map(|code| {
                let code = code.as_ref();
                let result = self.lookup_lenient(code);
                if let Some(warning) = result.warning {
                    if !reported.contains(&code) {
                        tracing::warn!("{}", warning.message);
                        reported.push(code);
                    }
                }
                result.rgb
            })
            .collect()
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
