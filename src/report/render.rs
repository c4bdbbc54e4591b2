//! Rendering of the Performance section

use crate::{
    constants::report::{HEADING, MACHINE_PREFIX, TABLE_HEADER, TABLE_SEPARATOR},
    models::UnitSummary,
    utils::machine::MachineProfile,
};

/// Render the Performance section, ending with a newline after the last row.
///
/// Rows are written in the order given; callers pass summaries sorted by day.
pub fn render_section(machine: &MachineProfile, summaries: &[UnitSummary]) -> String {
    let mut lines = vec![
        HEADING.to_string(),
        String::new(),
        format!("{} {}", MACHINE_PREFIX, machine.description),
        String::new(),
        TABLE_HEADER.to_string(),
        TABLE_SEPARATOR.to_string(),
    ];

    lines.extend(
        summaries
            .iter()
            .map(|s| format!("| {} | {} |", s.unit_id, s.display_elapsed)),
    );

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
