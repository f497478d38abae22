use anyhow::{Result, anyhow, bail};
use ratatui::style::Color;

/// Accepts `#RRGGBB`, `rgb(r, g, b)`, `rgba(r, g, b, a)` or a named color.
/// Alpha is dropped; a terminal cell has no transparency.
pub fn parse_color(s: &str) -> Result<Color> {
    let s = s.trim();
    match s {
        s if s.starts_with('#') => parse_hex(s),
        s if s.starts_with("rgba(") => parse_rgb(s, "rgba(", 4),
        s if s.starts_with("rgb(") => parse_rgb(s, "rgb(", 3),
        _ => try_from_str(s),
    }
}

fn parse_hex(s: &str) -> Result<Color> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        bail!("Invalid hex input: {s}\nExpected format\"#FF20D5\"");
    }

    let r = u8::from_str_radix(&hex[0..2], 16)?;
    let g = u8::from_str_radix(&hex[2..4], 16)?;
    let b = u8::from_str_radix(&hex[4..], 16)?;

    Ok(Color::Rgb(r, g, b))
}

fn parse_rgb(s: &str, prefix: &str, expected: usize) -> Result<Color> {
    if let Some(inner) = s.strip_prefix(prefix).and_then(|s| s.strip_suffix(')')) {
        let parts = inner.split(',').map(str::trim).collect::<Vec<&str>>();
        if parts.len() == expected {
            let r = parts[0].parse::<u8>()?;
            let g = parts[1].parse::<u8>()?;
            let b = parts[2].parse::<u8>()?;
            return Ok(Color::Rgb(r, g, b));
        }
    }
    Err(anyhow!(
        "Invalid rgb input: {s}\nExpected ex: \"rgb(255, 50, 120)\""
    ))
}

fn try_from_str(s: &str) -> Result<Color> {
    match s.to_lowercase().as_str() {
        "" | "none" => Ok(Color::default()),
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "white" => Ok(Color::White),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        _ => Err(anyhow!("Invalid input: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_forms() {
        assert_eq!(parse_color("#FF0000").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("rgb(1, 2, 3)").unwrap(), Color::Rgb(1, 2, 3));
        assert_eq!(parse_color("rgba(0, 0, 0, 0.8)").unwrap(), Color::Rgb(0, 0, 0));
        assert_eq!(parse_color(" Cyan ").unwrap(), Color::Cyan);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_color("#FFF").is_err());
        assert!(parse_color("rgb(1, 2)").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
    }
}
