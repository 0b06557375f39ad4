use std::str::FromStr;
use std::time::Duration;

/// Durations written like `30s`, `2m` or `1m30s`. A bare number means seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_ms = 0u64;
        let mut digits = String::new();
        let mut seen = false;
        let mut chars = s.trim().chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            let value: u64 = digits
                .parse()
                .map_err(|_| format!("Missing number before unit: {}", c))?;
            let unit_ms = match c {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                's' => 1_000,
                'm' => 60_000,
                'h' => 3_600_000,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_ms = accumulate(total_ms, value, unit_ms)?;
            digits.clear();
            seen = true;
        }

        if !digits.is_empty() {
            let value: u64 = digits
                .parse()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_ms = accumulate(total_ms, value, 1_000)?;
            seen = true;
        }

        if !seen {
            return Err("Duration must include a number".to_string());
        }
        Ok(HumanDuration(Duration::from_millis(total_ms)))
    }
}

fn accumulate(total_ms: u64, value: u64, unit_ms: u64) -> std::result::Result<u64, String> {
    value
        .checked_mul(unit_ms)
        .and_then(|ms| total_ms.checked_add(ms))
        .ok_or_else(|| "Duration too large".to_string())
}
