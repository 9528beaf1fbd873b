//! Domain list input.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Splits a domain list into entries.
///
/// Entries are separated by commas or whitespace; anything after `#` on a
/// line is a comment. Entries are returned as written: normalization and
/// validation happen in the scanner so invalid entries still show up in the
/// output.
pub fn parse_domain_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(before, _)| before))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads and parses the domain list at `path`; `-` reads stdin.
pub fn read_domain_list(path: &Path) -> Result<Vec<String>> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read domains from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read domain list: {}", path.display()))?
    };
    Ok(parse_domain_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_separators_and_comments() {
        let text = "example.com, gmail.com\n# full line comment\n\n  a.org b.net # trailing\n,,\n";
        assert_eq!(
            parse_domain_list(text),
            vec!["example.com", "gmail.com", "a.org", "b.net"]
        );
    }

    #[test]
    fn test_parse_keeps_invalid_entries() {
        assert_eq!(parse_domain_list("bad_domain!, ok.com"), vec!["bad_domain!", "ok.com"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_domain_list("").is_empty());
        assert!(parse_domain_list("# nothing\n   \n").is_empty());
    }

    #[test]
    fn test_read_domain_list_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "one.com\ntwo.com,three.com").unwrap();
        let domains = read_domain_list(file.path()).unwrap();
        assert_eq!(domains, vec!["one.com", "two.com", "three.com"]);
    }

    #[test]
    fn test_read_domain_list_missing_file() {
        let err = read_domain_list(Path::new("/nonexistent/domains.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/domains.txt"));
    }
}
