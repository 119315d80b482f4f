//! Escaping of FIQL metacharacters inside clause values.
//!
//! `,` and `;` are the OR/AND separators of the grammar and `+` turns into a
//! space once the query travels in a URL, so values carry them double
//! percent-encoded.

/// Literal character and its escaped form
pub const ENCODINGS: [(char, &str); 3] = [(',', "%252C"), (';', "%253B"), ('+', "%252B")];

/// Replace reserved characters with their escaped form
pub fn encode(value: &str) -> String {
    if !needs_escaping(value) {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ENCODINGS.iter().find(|(literal, _)| *literal == ch) {
            Some((_, escaped)) => out.push_str(escaped),
            None => out.push(ch),
        }
    }
    out
}

/// Turn escaped sequences back into the reserved characters
pub fn decode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while !rest.is_empty() {
        if let Some((literal, escaped)) = ENCODINGS.iter().find(|(_, escaped)| rest.starts_with(escaped)) {
            out.push(*literal);
            rest = &rest[escaped.len()..];
            continue;
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }

    out
}

/// Whether the value contains a character that must be escaped
pub fn needs_escaping(value: &str) -> bool {
    value.chars().any(|ch| ENCODINGS.iter().any(|(literal, _)| *literal == ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reserved() {
        assert_eq!(encode("a,b;c+d"), "a%252Cb%253Bc%252Bd");
        assert_eq!(encode("plain"), "plain");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_decode_reserved() {
        assert_eq!(decode("a%252Cb%253Bc%252Bd"), "a,b;c+d");
        assert_eq!(decode("%25"), "%25");
        assert_eq!(decode("100%"), "100%");
    }

    #[test]
    fn test_roundtrip_mixed() {
        for value in ["a,b;c+d", ",,,", ";+;", "naïve,ünïcode", "x%y", "1+1=2", ""] {
            assert_eq!(decode(&encode(value)), value);
        }
    }

    #[test]
    fn test_escaped_output_has_no_metacharacters() {
        let escaped = encode("a,b;c+d");
        assert!(!needs_escaping(&escaped));
        assert!(needs_escaping("a,b"));
    }
}
