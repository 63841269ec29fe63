use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cropsight_core::session::{PlannerConfig, SessionConfig};

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include an example [planner] section
    #[arg(long)]
    pub with_planner: bool,
}

/// Print or save a default SessionConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let mut config = SessionConfig {
        history_path: Some(PathBuf::from("command_history.jsonl")),
        ..SessionConfig::default()
    };
    if args.with_planner {
        config.planner = Some(PlannerConfig {
            program: PathBuf::from("path_planner"),
            args: Vec::new(),
            polygon: vec![[12.9716, 77.5946], [12.9721, 77.5952], [12.9712, 77.5958]],
        });
    }
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
