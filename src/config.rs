use std::env;
use std::path::PathBuf;

const DEFAULT_PAYLOAD: &str = "payload.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub payload_path: PathBuf,
    pub output: OutputFormat,
}

impl Config {
    /// Read `INSIGHTS_PAYLOAD` / `INSIGHTS_OUTPUT`; callers load `.env` first.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let payload_path = lookup("INSIGHTS_PAYLOAD")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PAYLOAD));
        let output = match lookup("INSIGHTS_OUTPUT") {
            None => OutputFormat::Text,
            Some(raw) => OutputFormat::parse(&raw).unwrap_or_else(|| {
                log::warn!("unknown INSIGHTS_OUTPUT={raw:?}, using text");
                OutputFormat::Text
            }),
        };
        Self {
            payload_path,
            output,
        }
    }

    /// Apply `--payload <path>`, `--payload=<path>` and `--json` on top.
    pub fn apply_args(mut self, args: &[String]) -> Self {
        for (idx, arg) in args.iter().enumerate() {
            if arg == "--json" {
                self.output = OutputFormat::Json;
                continue;
            }
            if let Some(path) = arg.strip_prefix("--payload=") {
                let trimmed = path.trim();
                if !trimmed.is_empty() {
                    self.payload_path = PathBuf::from(trimmed);
                }
                continue;
            }
            if arg == "--payload" {
                let Some(next) = args.get(idx + 1) else {
                    continue;
                };
                // `--payload --json` leaves the path alone
                if !next.trim().is_empty() && !next.starts_with("--") {
                    self.payload_path = PathBuf::from(next);
                }
            }
        }
        self
    }
}
