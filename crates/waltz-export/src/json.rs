//! JSON structure renderer

use serde::Serialize;
use waltz_engine::ThreeFingerWaltz;
use waltz_types::StepSummary;

#[derive(Serialize)]
struct JsonExport {
    waltz_metadata: Metadata,
    steps: Vec<StepSummary>,
    phase_summary: Vec<PhaseCount>,
}

#[derive(Serialize)]
struct Metadata {
    completed: bool,
    recursion_depth: u32,
    max_recursion: u32,
    energy_conservation: f64,
    total_steps: usize,
    history_count: usize,
}

#[derive(Serialize)]
struct PhaseCount {
    phase: String,
    count: usize,
}

/// Render waltz metadata, steps, and phase summary as JSON.
///
/// `pretty` selects indented output.
pub fn render_json(waltz: &ThreeFingerWaltz, pretty: bool) -> String {
    let status = waltz.status();
    let export = JsonExport {
        waltz_metadata: Metadata {
            completed: status.completed,
            recursion_depth: status.recursion_depth,
            max_recursion: status.max_recursion,
            energy_conservation: status.energy_conservation,
            total_steps: status.steps_taken,
            history_count: status.history_count,
        },
        steps: waltz.steps().iter().map(|s| s.summary()).collect(),
        phase_summary: waltz
            .phase_summary()
            .into_iter()
            .map(|(phase, count)| PhaseCount {
                phase: phase.tag().to_string(),
                count,
            })
            .collect(),
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&export)
    } else {
        serde_json::to_string(&export)
    };
    // Serialization of plain owned structs cannot fail.
    rendered.unwrap_or_default()
}
