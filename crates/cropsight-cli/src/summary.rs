use std::path::Path;

use console::Style;
use cropsight_core::advisor::Priority;
use cropsight_core::session::{CycleReport, MonitorSession, MonitorSummary};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    warn: Style,
    bad: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            warn: Style::new().yellow(),
            bad: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }

    fn for_priority(&self, priority: Priority) -> &Style {
        match priority {
            Priority::Optimal => &self.good,
            Priority::Low => &self.value,
            Priority::Moderate => &self.warn,
            Priority::Critical => &self.bad,
        }
    }
}

pub fn print_cycle_report(path: &Path, session: &MonitorSession, report: &CycleReport) {
    let s = Styles::new();
    let advice = &report.advice;

    println!();
    println!("  {}", s.path.apply_to(path.display()));
    println!(
        "  {:<14}{} / {}{}",
        s.label.apply_to("Profile"),
        s.value.apply_to(session.crop().kind),
        s.value.apply_to(session.weather().kind),
        if report.analysis.close_range {
            " (close range)"
        } else {
            ""
        }
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Score"),
        s.for_priority(advice.priority)
            .apply_to(format!("{:.1}", advice.score))
    );
    println!(
        "  {:<14}{} ({})",
        s.label.apply_to("Priority"),
        s.for_priority(advice.priority).apply_to(advice.priority),
        advice.directive()
    );
    println!();

    println!("  {}", s.header.apply_to("Metrics"));
    for reading in report.analysis.readings() {
        println!(
            "    {:<14}{:>10.3}  {}",
            s.label.apply_to(reading.metric),
            reading.raw_value,
            reading.status_label
        );
    }
    println!(
        "    {:<14}{:>10.3}",
        s.label.apply_to("Spectral"),
        report.analysis.metrics.spectral_focus
    );
    println!();

    if !advice.adjustments.is_empty() {
        println!("  {}", s.header.apply_to("Adjustments"));
        for cmd in &advice.adjustments {
            println!(
                "    {} {:<28} {}",
                s.for_priority(cmd.priority).apply_to(format!("p{}", cmd.priority)),
                cmd.action.to_string(),
                s.label.apply_to(format!("[{}]", cmd.category))
            );
        }
        println!();
    }

    println!("  {}", s.header.apply_to("Feedback"));
    for line in &advice.feedback {
        println!("    {line}");
    }
    println!();
}

pub fn print_monitor_summary(summary: &MonitorSummary, session: &MonitorSession) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Cropsight Monitor"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();
    println!(
        "  {:<14}{} / {}",
        s.label.apply_to("Profile"),
        s.value.apply_to(session.crop().kind),
        s.value.apply_to(session.weather().kind)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Close range"),
        s.value.apply_to(session.close_range_mode())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Stopped"),
        s.value.apply_to(summary.stop_reason)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Processed"),
        s.value.apply_to(summary.processed)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Skipped"),
        s.value.apply_to(summary.skipped)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Commands"),
        s.value.apply_to(summary.accepted)
    );
    if summary.sink_errors > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Sink errors"),
            s.bad.apply_to(summary.sink_errors)
        );
    }
    match summary.mean_score {
        Some(score) => println!(
            "  {:<14}{}",
            s.label.apply_to("Mean score"),
            s.value.apply_to(format!("{score:.1}"))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Mean score"),
            s.warn.apply_to("no frames")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Altitude"),
        s.value.apply_to(format!("{:.2} m", summary.final_altitude))
    );
    println!();

    if let Some(last) = session.history().latest() {
        println!("  {}", s.header.apply_to("Last command"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Frame"),
            s.value.apply_to(last.frame_count)
        );
        println!(
            "    {:<12}{:.2} m -> {:.2} m",
            s.label.apply_to("Height"),
            last.current_height,
            last.target_height
        );
        println!("    {:<12}{}", s.label.apply_to("Reason"), last.reason);
        println!();
    }
}
