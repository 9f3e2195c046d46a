use std::io::{self, ErrorKind};

use crate::entry::{Line, LineKind};

/// payload translates the list into a Clash rule provider. Comments and blank
/// lines stay where they are, indented to match the sequence items.
pub fn payload(lines: &[Line]) -> io::Result<String> {
    let mut out = String::from("payload:\n");
    for line in lines {
        match &line.kind {
            LineKind::Blank => out.push('\n'),
            LineKind::Comment(text) if text.is_empty() => out.push_str("  #\n"),
            LineKind::Comment(text) => out.push_str(&format!("  # {}\n", text)),
            LineKind::Entry(entry) => {
                out.push_str(&format!("  - {}\n", scalar(&entry.canonical())?));
            }
        }
    }
    Ok(out)
}

/// renders a string as YAML scalar, quoted only where plain style would change its meaning
fn scalar(value: &str) -> io::Result<String> {
    let rendered =
        serde_yaml::to_string(value).map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
    Ok(rendered.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::parse_lines;

    fn lines(raw: &[&str]) -> Vec<Line> {
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        parse_lines(&raw).into_iter().map(Result::unwrap).collect()
    }

    #[test]
    fn test_payload_adapter() {
        let got = payload(&lines(&[
            "#Proxy",
            "DOMAIN-SUFFIX,google.com",
            "",
            "# Direct",
            "DOMAIN,example.com",
        ]))
        .unwrap();
        let expect = "payload:\n  # Proxy\n  - DOMAIN-SUFFIX,google.com\n\n  # Direct\n  - DOMAIN,example.com\n";
        assert_eq!(got, expect);
    }

    #[test]
    fn test_payload_quotes_wildcards() {
        let got = payload(&lines(&["*.example.com"])).unwrap();
        assert!(!got.contains("  - *.example.com"));
        let value: serde_yaml::Value = serde_yaml::from_str(&got).unwrap();
        assert_eq!(value["payload"][0], "*.example.com");
    }
}
