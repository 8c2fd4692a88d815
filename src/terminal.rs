//! Terminal rendering of the grid and the palette legend
//!
//! Colored output uses ANSI 24-bit background sequences. Plain output is used
//! when stdout is not a terminal or color is disabled.

use image::Rgb;

use crate::color::{luma, to_hex};
use crate::grid::{Grid, GRID_SIDE};
use crate::palette::PaletteRegistry;
use crate::state::ActiveSelection;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert a color to an ANSI 24-bit background escape sequence.
///
/// # Examples
///
/// ```
/// use colorgrid::terminal::color_to_ansi_bg;
/// use image::Rgb;
///
/// assert_eq!(color_to_ansi_bg(Rgb([255, 0, 0])), "\x1b[48;2;255;0;0m");
/// ```
pub fn color_to_ansi_bg(rgb: Rgb<u8>) -> String {
    format!("\x1b[48;2;{};{};{}m", rgb[0], rgb[1], rgb[2])
}

/// Foreground sequence that stays readable on `background`.
fn contrasting_fg(background: Rgb<u8>) -> &'static str {
    if luma(background) > 140 {
        "\x1b[38;2;0;0;0m"
    } else {
        "\x1b[38;2;255;255;255m"
    }
}

/// Render the grid, one row per line.
///
/// With `color`, each cell is the code centered in a 6-character swatch.
/// Without it, codes are separated by spaces and rows are prefixed with
/// their first cell index.
pub fn render_grid(grid: &Grid, palette: &PaletteRegistry, color: bool) -> String {
    let mut output = String::new();
    let colors = palette.lookup_all(grid.cells());

    for (row_index, (row, row_colors)) in grid.rows().zip(colors.chunks(GRID_SIDE)).enumerate() {
        if color {
            for (code, &rgb) in row.iter().zip(row_colors) {
                output.push_str(&color_to_ansi_bg(rgb));
                output.push_str(contrasting_fg(rgb));
                output.push_str(&format!("  {:<2}  ", code));
                output.push_str(ANSI_RESET);
                output.push(' ');
            }
        } else {
            output.push_str(&format!("{:>2}: ", row_index * row.len()));
            output.push_str(&row.join(" "));
        }
        output.push('\n');
    }

    output
}

/// Render the label, grid and order code of a selection.
pub fn render_selection(selection: &ActiveSelection, palette: &PaletteRegistry, color: bool) -> String {
    format!(
        "{}\n\n{}\nOrder Code: {}\n",
        selection.label,
        render_grid(&selection.grid, palette, color),
        selection.canonical_code
    )
}

/// Render the palette legend: `XX  Name  #RRGGBB`, one entry per line.
pub fn render_legend(palette: &PaletteRegistry, color: bool) -> String {
    let mut output = String::new();
    for entry in palette.entries() {
        if color {
            output.push_str(&color_to_ansi_bg(entry.rgb));
            output.push_str("    ");
            output.push_str(ANSI_RESET);
            output.push(' ');
        }
        output.push_str(&format!("{:<3} {:<12} {}\n", entry.code, entry.name, to_hex(entry.rgb)));
    }
    output
}
