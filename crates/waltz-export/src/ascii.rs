//! ASCII table renderer

use waltz_engine::ThreeFingerWaltz;

const BANNER: &str =
    "================================================================================";

/// Render the choreography as a terminal-friendly text table.
pub fn render_ascii(waltz: &ThreeFingerWaltz) -> String {
    if waltz.steps().is_empty() {
        return "No waltz steps recorded yet.".to_string();
    }

    let mut lines = vec![
        BANNER.to_string(),
        "THREE-FINGER WALTZ CHOREOGRAPHY".to_string(),
        BANNER.to_string(),
        String::new(),
    ];

    for step in waltz.steps() {
        lines.push(step.to_string());
    }

    lines.push(String::new());
    lines.push(BANNER.to_string());
    lines.push(format!(
        "Total Steps: {} | Energy Conservation: {:.1}%",
        waltz.steps().len(),
        waltz.energy_conservation() * 100.0
    ));
    lines.push(format!(
        "Status: {} | Recursion: {}/{}",
        if waltz.is_complete() {
            "COMPLETE"
        } else {
            "IN PROGRESS"
        },
        waltz.recursion_depth(),
        waltz.max_recursion()
    ));
    lines.push(BANNER.to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use waltz_types::PatternRecord;

    #[test]
    fn test_empty_waltz_message() {
        let waltz = ThreeFingerWaltz::new();
        assert_eq!(render_ascii(&waltz), "No waltz steps recorded yet.");
    }

    #[test]
    fn test_completed_waltz_table() {
        let mut waltz = ThreeFingerWaltz::new();
        waltz.dance(&[PatternRecord::named("x")]);

        let rendered = render_ascii(&waltz);
        assert!(rendered.contains("THREE-FINGER WALTZ CHOREOGRAPHY"));
        assert!(rendered.contains("Step 1: initiation | Phoenix --[Phoenix Ignition]--> BEGIN"));
        assert!(rendered.contains("Step 4: completion | Unified --[Triadic Closure]--> COMPLETE"));
        assert!(rendered.contains("Total Steps: 4 | Energy Conservation: 90.0%"));
        assert!(rendered.contains("Status: COMPLETE | Recursion: 1/7"));
    }
}
