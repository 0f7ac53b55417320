// Text cleanup for titles and summaries scraped from paper sources

/// Strip embedded markup tags and decode common HTML entities
pub fn clean_text(input: &str) -> String {
    decode_entities(&strip_tags(input)).trim().to_string()
}

/// Remove `<...>` tags. A `<` that does not open a tag is kept.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let opens_tag = after
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
            .unwrap_or(false);

        match after.find('>') {
            Some(end) if opens_tag => rest = &after[end + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        // entity names and numeric references are short
        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= 10)
            .and_then(|end| decode_entity(&after[..end]).map(|s| (s, end)));

        match decoded {
            Some((replacement, end)) => {
                out.push_str(&replacement);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

const REPLACEMENT: char = '\u{FFFD}';

fn decode_entity(entity: &str) -> Option<String> {
    let named = match entity {
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" | "#39" => Some("'"),
        "nbsp" => Some(" "),
        "#8211" | "ndash" => Some("-"),
        "#8212" | "mdash" => Some("—"),
        "#8216" | "#8217" | "lsquo" | "rsquo" => Some("'"),
        "#8220" | "#8221" | "ldquo" | "rdquo" => Some("\""),
        _ => None,
    };
    if let Some(s) = named {
        return Some(s.to_string());
    }

    let number = entity.strip_prefix('#')?;
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    let ch = char::from_u32(code)?;
    // newline and tab are the only control characters kept
    if ch.is_control() && ch != '\n' && ch != '\t' {
        return Some(REPLACEMENT.to_string());
    }
    Some(ch.to_string())
}
