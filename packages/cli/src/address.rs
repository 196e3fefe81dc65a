//! Argument parsers for line addresses and alternative choices

use telescope_editor::AltChoice;
use telescope_parser::LineAddress;

/// `PARAGRAPH:LINE`, both zero-based
pub fn parse_address(value: &str) -> Result<LineAddress, String> {
    let (paragraph, line) = value
        .split_once(':')
        .ok_or_else(|| format!("expected PARAGRAPH:LINE, got `{}`", value))?;

    let paragraph = paragraph
        .trim()
        .parse()
        .map_err(|_| format!("invalid paragraph index `{}`", paragraph))?;
    let line = line
        .trim()
        .parse()
        .map_err(|_| format!("invalid line index `{}`", line))?;

    Ok(LineAddress::new(paragraph, line))
}

/// `original` or an alternative index
pub fn parse_choice(value: &str) -> Result<AltChoice, String> {
    if value.eq_ignore_ascii_case("original") {
        return Ok(AltChoice::Original);
    }
    value
        .parse()
        .map(AltChoice::Alternative)
        .map_err(|_| format!("expected `original` or an alternative index, got `{}`", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("2:5"), Ok(LineAddress::new(2, 5)));
        assert_eq!(parse_address(" 0 : 1 "), Ok(LineAddress::new(0, 1)));
        assert!(parse_address("3").is_err());
        assert!(parse_address("a:1").is_err());
        assert!(parse_address("1:-1").is_err());
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("original"), Ok(AltChoice::Original));
        assert_eq!(parse_choice("Original"), Ok(AltChoice::Original));
        assert_eq!(parse_choice("2"), Ok(AltChoice::Alternative(2)));
        assert!(parse_choice("second").is_err());
    }
}
