//! Mermaid flowchart renderer

use waltz_engine::ThreeFingerWaltz;
use waltz_types::WaltzPhase;

/// Render the choreography as a Mermaid flowchart in a fenced block.
///
/// The four-node skeleton is fixed; edges are added for phase
/// transitions actually present in the step log.
pub fn render_mermaid(waltz: &ThreeFingerWaltz) -> String {
    if waltz.steps().is_empty() {
        return "```mermaid\ngraph TD\n    Start[No waltz steps recorded]\n```".to_string();
    }

    let mut lines = vec![
        "```mermaid".to_string(),
        "graph TD".to_string(),
        "    Start[Start] --> Phoenix".to_string(),
    ];

    let phases: Vec<WaltzPhase> = waltz.steps().iter().map(|s| s.phase).collect();
    if phases.contains(&WaltzPhase::Transformation) {
        lines.push("    Phoenix -->|propagate| Hydro".to_string());
    }
    if phases.contains(&WaltzPhase::Integration) {
        lines.push("    Hydro -->|bind| Third".to_string());
    }
    if phases.contains(&WaltzPhase::Completion) {
        lines.push("    Third -->|complete_triad| Complete".to_string());
    }

    lines.push(String::new());
    lines.push("    Phoenix[Phoenix: INITIATION<br/>BEGIN Mode]".to_string());
    lines.push("    Hydro[Hydrogenesi: TRANSFORMATION<br/>EXTEND Mode]".to_string());
    lines.push("    Third[The Third: INTEGRATION<br/>HOLD Mode]".to_string());
    lines.push("    Complete[Unified: COMPLETION<br/>Sovereign Achieved]".to_string());

    lines.push(String::new());
    lines.push("    style Phoenix fill:#ff6b6b,stroke:#c92a2a,color:#fff".to_string());
    lines.push("    style Hydro fill:#4c6ef5,stroke:#364fc7,color:#fff".to_string());
    lines.push("    style Third fill:#51cf66,stroke:#2b8a3e,color:#fff".to_string());
    lines.push("    style Complete fill:#ffd43b,stroke:#f08c00,color:#000".to_string());

    lines.push("```".to_string());
    lines.join("\n")
}
