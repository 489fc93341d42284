//! Commands issued by whatever drives the engine (UI, runner, tests).
//!
//! Two wire forms: JSON objects tagged by `cmd`, and whitespace-separated
//! text lines such as `toggle 3 4` or `interval 250`. Dimensions and
//! intervals are read leniently, anything else is strict.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    // ── Cells ─────────────────────────────────────
    ToggleCell { x: i64, y: i64 },
    Resize {
        #[serde(deserialize_with = "lenient_field")]
        width:  i64,
        #[serde(deserialize_with = "lenient_field")]
        height: i64,
    },
    Reset,
    Randomize { density: f64, seed: u64 },

    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
    Step,
    SetInterval {
        #[serde(deserialize_with = "lenient_field")]
        ms: i64,
    },

    // ── Cosmetic ──────────────────────────────────
    SetColor { color: String },
}

/// Read a leading integer the way a free-text number field would:
/// optional sign, then digits, trailing junk ignored. No digits gives 0,
/// which every caller clamps up to its minimum.
pub fn lenient_int(text: &str) -> i64 {
    let text = text.trim();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    // Overlong input saturates instead of wrapping.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative { -magnitude } else { magnitude }
}

fn lenient_field<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => lenient_int(&s),
        _ => 0,
    })
}

impl Command {
    /// Parse either form. Lines starting with `{` are JSON.
    pub fn parse_line(line: &str) -> SimResult<Self> {
        let line = line.trim();
        if line.starts_with('{') {
            Ok(serde_json::from_str(line)?)
        } else {
            line.parse()
        }
    }
}

impl FromStr for Command {
    type Err = SimError;

    fn from_str(line: &str) -> SimResult<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        let malformed = |reason: &str| SimError::MalformedCommand {
            line:   line.to_string(),
            reason: reason.to_string(),
        };
        let arg = |i: usize| args.get(i).copied().unwrap_or_default();

        let command = match verb.as_str() {
            "toggle" => {
                let coord = |i: usize, name: &str| {
                    arg(i)
                        .parse::<i64>()
                        .map_err(|_| malformed(&format!("{name} must be an integer")))
                };
                Command::ToggleCell { x: coord(0, "x")?, y: coord(1, "y")? }
            }
            "resize" => Command::Resize {
                width:  lenient_int(arg(0)),
                height: lenient_int(arg(1)),
            },
            "interval" | "speed" => Command::SetInterval { ms: lenient_int(arg(0)) },
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "reset" => Command::Reset,
            "step" => Command::Step,
            "color" => {
                if args.is_empty() {
                    return Err(malformed("missing color value"));
                }
                Command::SetColor { color: args.join(" ") }
            }
            "randomize" => {
                let density = arg(0)
                    .parse::<f64>()
                    .map_err(|_| malformed("density must be a number"))?;
                let seed = arg(1)
                    .parse::<u64>()
                    .map_err(|_| malformed("seed must be an unsigned integer"))?;
                Command::Randomize { density, seed }
            }
            "" => return Err(malformed("empty command")),
            other => return Err(SimError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}
