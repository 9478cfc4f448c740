//! Human-readable statistics report.

use super::facade::Statistics;

const FRAME: &str = "#######################################";

impl Statistics {
    /// Renders the counters as report lines.
    ///
    /// Disabled statistics produce a short notice without figures.
    pub fn report(&self) -> Vec<String> {
        if !self.is_enabled() {
            return vec![
                FRAME.to_string(),
                String::new(),
                "Detailed statistics were not enabled.".to_string(),
                String::new(),
                FRAME.to_string(),
            ];
        }

        let mut out: Vec<String> = [
            "",
            FRAME,
            "",
            "                 WARNING",
            "These counters are approximate. Use them to compare",
            "similar runs with each other, not as absolute figures.",
            "They only cover this process: runs split across several",
            "cooperating processes are not aggregated.",
            "",
            FRAME,
            "",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let trials = self.total_trials();
        out.push(line("Total number of trials:", trials));
        out.push(line("      translated to child individuals:", 2 * trials));
        out.push(line("Number of sanity based discards:", self.total_sanity_discards()));
        out.push(line("Number of local optimizations:", self.total_local_opts()));
        out.push(line("Number of fitness evaluations:", self.total_fitness_evals()));
        out.push(line("Number of gradient evaluations:", self.total_gradient_evals()));

        for (key, count) in self.custom_counters() {
            out.push(format!("Number of {key}: {count}"));
        }

        out.extend([String::new(), FRAME.to_string(), String::new(), String::new()]);
        out
    }
}

fn line(label: &str, value: u64) -> String {
    format!("{label:<39}{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_report_has_no_figures() {
        let report = Statistics::new().report();
        assert_eq!(report.len(), 5);
        assert!(report.iter().any(|l| l.contains("not enabled")));
        assert!(!report.iter().any(|l| l.chars().any(|c| c.is_ascii_digit())));
    }

    #[test]
    fn test_enabled_report() {
        let stats = Statistics::new();
        stats.enable();
        for _ in 0..3 {
            stats.increment_trials();
        }
        stats.increment_fitness_evals();
        stats.increment_custom("zeta");
        stats.increment_custom("alpha");

        let report = stats.report();
        let find = |needle: &str| {
            report
                .iter()
                .find(|l| l.contains(needle))
                .cloned()
                .unwrap_or_else(|| panic!("missing line {needle:?}"))
        };

        assert!(find("approximate").contains("approximate"));
        assert!(find("Total number of trials:").ends_with(" 3"));
        assert!(find("translated to child individuals:").ends_with(" 6"));
        assert!(find("fitness evaluations:").ends_with(" 1"));
        assert!(find("gradient evaluations:").ends_with(" 0"));

        let customs: Vec<&String> = report
            .iter()
            .filter(|l| l.starts_with("Number of alpha") || l.starts_with("Number of zeta"))
            .collect();
        assert_eq!(customs, vec!["Number of alpha: 1", "Number of zeta: 1"]);

        let n = report.len();
        assert_eq!(report[n - 5], "Number of zeta: 1");
        assert_eq!(&report[n - 4..], &["", FRAME, "", ""]);
    }

    #[test]
    fn test_labels_are_aligned() {
        assert_eq!(line("Total number of trials:", 4), format!("{:<39}4", "Total number of trials:"));
        assert_eq!(line("Total number of trials:", 4).len(), 40);
        assert_eq!(line("Number of local optimizations:", 12).len(), 41);
    }
}
