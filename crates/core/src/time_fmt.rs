// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable durations.

use std::time::Duration;

/// Format elapsed seconds as a compact unit string ("5s", "2m", "1h", "3d").
pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

/// Format elapsed milliseconds, see [`format_elapsed`].
pub fn format_elapsed_ms(ms: u64) -> String {
    format_elapsed(ms / 1000)
}

/// Parse a human-readable duration ("30s", "5m", "1h30m", "7d"). A bare
/// number is seconds. Zero is rejected.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let mut total_secs: u64 = 0;
    let mut current_num = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }
        let n: u64 = current_num
            .parse()
            .map_err(|_| format!("invalid duration: {}", s))?;
        current_num.clear();
        let unit = match c {
            'd' => 86400,
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(format!("unknown duration unit '{}' in: {}", c, s)),
        };
        total_secs = n
            .checked_mul(unit)
            .and_then(|v| total_secs.checked_add(v))
            .ok_or_else(|| format!("duration too large: {}", s))?;
    }
    if !current_num.is_empty() {
        let n: u64 = current_num
            .parse()
            .map_err(|_| format!("invalid duration: {}", s))?;
        total_secs = total_secs
            .checked_add(n)
            .ok_or_else(|| format!("duration too large: {}", s))?;
    }
    if total_secs == 0 {
        return Err(format!("duration must be > 0: {}", s));
    }
    Ok(Duration::from_secs(total_secs))
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
