//! Run banner and closing summary

use colored::Colorize;
use gdext_logger as logger;

use crate::upgrade::{UpgradeOptions, UpgradeReport};

pub fn banner_lines(options: &UpgradeOptions) -> Vec<String> {
    vec![
        format!("=== Upgrading plugin at: {} ===", options.root.display()),
        format!(
            "    compatibility_minimum will be set to: {}",
            options.compatibility_minimum
        ),
        format!(
            "    clean build files: {}",
            if options.clean { "yes" } else { "no" }
        ),
    ]
}

pub fn print_banner(options: &UpgradeOptions) {
    if logger::is_quiet() {
        return;
    }
    let lines = banner_lines(options);
    println!();
    if let Some((title, rest)) = lines.split_first() {
        println!("{}", title.bold());
        for line in rest {
            println!("{}", line);
        }
    }
    println!();
}

pub fn summary_line(report: &UpgradeReport) -> String {
    match report.warnings() {
        0 => "=== Done! Recompile the plugin to apply changes. ===".to_string(),
        1 => "=== Done with 1 warning. Recompile the plugin to apply changes. ===".to_string(),
        n => format!(
            "=== Done with {} warnings. Recompile the plugin to apply changes. ===",
            n
        ),
    }
}

pub fn print_summary(report: &UpgradeReport) {
    if logger::is_quiet() {
        return;
    }
    let line = summary_line(report);
    println!();
    if report.warnings() == 0 {
        println!("{}", line.bold().green());
    } else {
        println!("{}", line.bold().yellow());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::StepOutcome;

    #[test]
    fn test_banner_reports_clean_flag() {
        let mut options = UpgradeOptions::new("/work/plugin");
        assert_eq!(banner_lines(&options)[2], "    clean build files: yes");
        options.clean = false;
        assert_eq!(banner_lines(&options)[2], "    clean build files: no");
    }

    #[test]
    fn test_summary_counts_warnings() {
        let mut report = UpgradeReport::default();
        assert!(summary_line(&report).starts_with("=== Done!"));

        report.outcomes.push(StepOutcome::success("ok"));
        report.outcomes.push(StepOutcome::warning("one"));
        assert!(summary_line(&report).contains("1 warning."));

        report.outcomes.push(StepOutcome::warning("two"));
        assert!(summary_line(&report).contains("2 warnings"));
    }
}
