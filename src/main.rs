use anyhow::{Context, Result};

use pitch_insights::config::{Config, OutputFormat};
use pitch_insights::payload::read_player_payloads;
use pitch_insights::report::build_reports;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = Config::from_env().apply_args(&args);
    log::info!("reading payload from {}", cfg.payload_path.display());

    let payloads = read_player_payloads(&cfg.payload_path)?;
    let reports = build_reports(&payloads)
        .into_iter()
        .enumerate()
        .map(|(idx, res)| res.with_context(|| format!("payload #{idx}")))
        .collect::<Result<Vec<_>>>()?;

    match cfg.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports).context("serialize reports")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for (idx, report) in reports.iter().enumerate() {
                if idx > 0 {
                    println!("----");
                }
                print!("{}", report.render_text());
            }
        }
    }

    Ok(())
}
