//! Read-only display of the stored slots and current mapping.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use triuv_core::{CORNER_NAMES, Command, Mapping, MappingState};
use triuv_prefs::DisplayPreferences;

/// Text rendering of a [`MappingState`].
pub(crate) struct Panel<'a> {
    pub state: &'a MappingState,
    pub prefs: &'a DisplayPreferences,
}

impl fmt::Display for Panel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.prefs.precision;
        let current = self.state.mapping();

        writeln!(f, "[{}]", Command::Capture.label())?;
        writeln!(f)?;
        writeln!(f, "UV Coordinates (1, 2, 3):")?;
        for (i, slot) in self.state.slots.iter().enumerate() {
            writeln!(f, "  {}: {slot:.p$}", i + 1)?;
        }
        writeln!(f)?;
        writeln!(f, "Current Mapping: {}", self.state.index)?;
        writeln!(f, "  {current}: {}", describe(current))?;
        if self.prefs.show_mapping_table {
            writeln!(f)?;
            for mapping in Mapping::all() {
                let marker = if mapping == current { '>' } else { ' ' };
                writeln!(
                    f,
                    "{marker} {} {:<14} {}",
                    mapping.number(),
                    mapping.to_string(),
                    describe(mapping),
                )?;
            }
        }
        write!(f, "[{}]", Command::Apply.label())
    }
}

fn describe(mapping: Mapping) -> String {
    let corners = mapping
        .slots()
        .iter()
        .zip(CORNER_NAMES)
        .map(|(slot, corner)| format!("{corner}←{}", slot + 1))
        .join(" ");
    match mapping.is_mirrored() {
        true => format!("{} ({corners}, mirrored)", mapping.describe()),
        false => format!("{} ({corners})", mapping.describe()),
    }
}

/// JSON rendering of a [`MappingState`].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct PanelJson {
    slots: [[f64; 2]; 3],
    mapping: u8,
    mapping_name: Mapping,
    corners: [usize; 3],
    mirrored: bool,
}
impl From<&MappingState> for PanelJson {
    fn from(state: &MappingState) -> Self {
        let mapping = state.mapping();
        Self {
            slots: state.slots.map(<[f64; 2]>::from),
            mapping: state.index.get(),
            mapping_name: mapping,
            corners: mapping.slots().map(|slot| slot + 1),
            mirrored: mapping.is_mirrored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use triuv_core::CoordinatePair;

    use super::*;

    #[test]
    fn test_default_panel() {
        let state = MappingState::default();
        let prefs = DisplayPreferences::default();
        let text = Panel {
            state: &state,
            prefs: &prefs,
        }
        .to_string();
        assert_eq!(
            text,
            "\
[Capture From Selected Triangle]

UV Coordinates (1, 2, 3):
  1: (0.000, 0.000)
  2: (0.500, 0.866)
  3: (1.000, 0.000)

Current Mapping: 1
  Identity: 1A, 2B, 3C (A←1 B←2 C←3)
[Apply Mapping]",
        );
    }

    #[test]
    fn test_panel_with_table() {
        let mut state = MappingState::with_slots([CoordinatePair::new(0.5, 1.0); 3]);
        state.set_index(4);
        let prefs = DisplayPreferences {
            precision: 1,
            show_mapping_table: true,
        };
        let text = Panel {
            state: &state,
            prefs: &prefs,
        }
        .to_string();
        assert!(text.contains("  1: (0.5, 1.0)"));
        assert!(text.contains("Current Mapping: 4\n  Swap A/C: 1C, 2B, 3A (A←3 B←2 C←1, mirrored)"));
        assert!(text.contains("> 4 Swap A/C"));
        assert_eq!(text.lines().filter(|l| l.starts_with('>')).count(), 1);
    }

    #[test]
    fn test_json() {
        let mut state = MappingState::default();
        state.set_index(2);
        let json = serde_json::to_value(PanelJson::from(&state)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "slots": [[0.0, 0.0], [0.5, 0.866], [1.0, 0.0]],
                "mapping": 2,
                "mapping_name": "shift_forward",
                "corners": [3, 1, 2],
                "mirrored": false,
            }),
        );
    }
}
