//! GraphViz DOT renderer

use waltz_engine::ThreeFingerWaltz;
use waltz_types::WaltzPhase;

/// Render the choreography as a GraphViz DOT digraph.
///
/// Node definitions are fixed; edges are emitted once per phase
/// transition present in the step log, deduplicated.
pub fn render_dot(waltz: &ThreeFingerWaltz) -> String {
    if waltz.steps().is_empty() {
        return concat!(
            "digraph waltz {\n",
            "    node [shape=box];\n",
            "    NoSteps [label=\"No waltz steps recorded\"];\n",
            "}"
        )
        .to_string();
    }

    let mut lines = vec![
        "digraph waltz {".to_string(),
        "    rankdir=LR;".to_string(),
        "    node [shape=box, style=filled];".to_string(),
        String::new(),
        "    Phoenix [label=\"Phoenix\\nINITIATION\\nBEGIN Mode\", fillcolor=\"#ff6b6b\", fontcolor=white];".to_string(),
        "    Hydrogenesi [label=\"Hydrogenesi\\nTRANSFORMATION\\nEXTEND Mode\", fillcolor=\"#4c6ef5\", fontcolor=white];".to_string(),
        "    TheThird [label=\"The Third\\nINTEGRATION\\nHOLD Mode\", fillcolor=\"#51cf66\", fontcolor=white];".to_string(),
        "    Unified [label=\"Unified\\nCOMPLETION\\nSovereign\", fillcolor=\"#ffd43b\"];".to_string(),
        String::new(),
    ];

    let mut emitted = [false; 3];
    for step in waltz.steps() {
        match step.phase {
            WaltzPhase::Transformation if !emitted[0] => {
                lines.push("    Phoenix -> Hydrogenesi [label=\"propagate\"];".to_string());
                emitted[0] = true;
            }
            WaltzPhase::Integration if !emitted[1] => {
                lines.push("    Hydrogenesi -> TheThird [label=\"bind\"];".to_string());
                emitted[1] = true;
            }
            WaltzPhase::Completion if !emitted[2] => {
                lines.push("    TheThird -> Unified [label=\"complete_triad\"];".to_string());
                emitted[2] = true;
            }
            _ => {}
        }
    }

    lines.push("}".to_string());
    lines.join("\n")
}
