use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::MAX_WEEKS;
use crate::models::{Amount, Ledger, SessionConfig, Student};

/// Characters left unescaped by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to serialize shared state: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed share token: {0}")]
    Malformed(String),
    #[error("Share token is missing required field `{0}`")]
    Incomplete(&'static str),
    #[error("Share token week count {0} is outside 1..={max}", max = MAX_WEEKS)]
    WeekCountOutOfRange(u64),
    #[error("Share token lists student id {0} more than once")]
    DuplicateStudentId(u32),
}

/// The state carried by a share token
#[derive(Debug, Clone, PartialEq)]
pub struct SharedState {
    pub config: SessionConfig,
    pub roster: Vec<Student>,
    pub ledger: Ledger,
}

#[derive(Serialize)]
struct SharedStateRecord<'a> {
    w: u32,
    r: Amount,
    p: &'a Ledger,
    s: &'a [Student],
}

/// Wire shape on decode; every field optional so absence can be told apart
/// from a type error
#[derive(Deserialize)]
struct SharedStateWire {
    w: Option<u64>,
    r: Option<Amount>,
    p: Option<Ledger>,
    s: Option<Vec<Student>>,
}

/// Token for a session snapshot: `base64(percent_escape(json))` of
/// `{ w: week_count, r: required_amount, p: ledger, s: roster }`. The mode is
/// never encoded.
pub fn encode(
    config: &SessionConfig,
    roster: &[Student],
    ledger: &Ledger,
) -> Result<String, EncodeError> {
    let record = SharedStateRecord {
        w: config.week_count,
        r: config.required_amount,
        p: ledger,
        s: roster,
    };
    let json = serde_json::to_string(&record)?;
    let escaped = utf8_percent_encode(&json, URI_COMPONENT).to_string();
    Ok(STANDARD.encode(escaped))
}

pub fn decode(token: &str) -> Result<SharedState, DecodeError> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|e| DecodeError::Malformed(format!("invalid base64: {}", e)))?;
    let escaped = String::from_utf8(bytes)
        .map_err(|_| DecodeError::Malformed("escaped payload is not text".to_string()))?;
    let json = unescape(&escaped)?;

    let wire: SharedStateWire = serde_json::from_str(&json)
        .map_err(|e| DecodeError::Malformed(format!("invalid JSON: {}", e)))?;

    let week_count = wire.w.ok_or(DecodeError::Incomplete("w"))?;
    let ledger = wire.p.ok_or(DecodeError::Incomplete("p"))?;
    let required_amount = wire.r.ok_or(DecodeError::Incomplete("r"))?;
    let roster = wire.s.ok_or(DecodeError::Incomplete("s"))?;

    if !(1..=u64::from(MAX_WEEKS)).contains(&week_count) {
        return Err(DecodeError::WeekCountOutOfRange(week_count));
    }

    let mut seen = HashSet::with_capacity(roster.len());
    if let Some(duplicate) = roster.iter().find(|student| !seen.insert(student.id)) {
        return Err(DecodeError::DuplicateStudentId(duplicate.id));
    }

    Ok(SharedState {
        config: SessionConfig {
            week_count: week_count as u32,
            required_amount,
        },
        roster,
        ledger,
    })
}

/// Reverse the percent escaping, rejecting truncated or non-hex escapes
fn unescape(escaped: &str) -> Result<String, DecodeError> {
    let bytes = escaped.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(DecodeError::Malformed(format!(
                    "truncated escape sequence at byte {}",
                    i
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(escaped)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|_| DecodeError::Malformed("escaped payload is not valid UTF-8".to_string()))
}

/// Fully qualified read-only link: `<origin><path><route><token>`
pub fn share_link(origin: &str, path: &str, route: &str, token: &str) -> String {
    format!("{}{}{}{}", origin, path, route, token)
}

/// Extract a non-empty token from a location fragment such as `#/view/<token>`
pub fn token_from_location<'a>(hash: &'a str, route: &str) -> Option<&'a str> {
    hash.strip_prefix(route).filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> SharedState {
        let mut ledger = Ledger::new();
        ledger.set(1, 1, 20);
        ledger.set(1, 3, 5);
        ledger.set(2, 8, 0);
        SharedState {
            config: SessionConfig { week_count: 8, required_amount: 20 },
            roster: vec![
                Student { id: 1, name: "Alice".to_string() },
                Student { id: 2, name: "นักเรียนคนที่ 2".to_string() },
                Student { id: 7, name: "Zoë & \"Bo\" 100%".to_string() },
            ],
            ledger,
        }
    }

    fn encode_json(json: &str) -> String {
        STANDARD.encode(utf8_percent_encode(json, URI_COMPONENT).to_string())
    }

    #[test]
    fn test_decode_reproduces_encoded_state() {
        let state = sample_state();
        let token = encode(&state.config, &state.roster, &state.ledger).unwrap();
        assert_eq!(decode(&token).unwrap(), state);
    }

    #[test]
    fn test_round_trip_at_bounds_and_zero_requirement() {
        for week_count in [1, MAX_WEEKS] {
            let mut ledger = Ledger::new();
            ledger.set_weeks(3, 1..=week_count, 0);
            let state = SharedState {
                config: SessionConfig { week_count, required_amount: 0 },
                roster: vec![Student { id: 3, name: "C".to_string() }],
                ledger,
            };
            let token = encode(&state.config, &state.roster, &state.ledger).unwrap();
            assert_eq!(decode(&token).unwrap(), state);
        }
    }

    #[test]
    fn test_token_is_url_fragment_safe() {
        let state = sample_state();
        let token = encode(&state.config, &state.roster, &state.ledger).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')));
    }

    #[test]
    fn test_decodes_browser_generated_token() {
        // btoa(encodeURIComponent(JSON.stringify(...))) output
        let token = encode_json(r#"{"w":3,"r":20,"p":{"1":{"2":20}},"s":[{"id":1,"name":"Alice"}]}"#);
        let state = decode(&token).unwrap();
        assert_eq!(state.config, SessionConfig { week_count: 3, required_amount: 20 });
        assert_eq!(state.ledger.amount(1, 2), 20);
        assert_eq!(state.roster[0].name, "Alice");
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(decode("!!!not base64"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("abc"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(&STANDARD.encode("%E0%A4")), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(&STANDARD.encode("%7B%2")), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(&encode_json("{\"w\":")), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(&encode_json("[1,2]")), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            decode(&encode_json(r#"{"w":3,"r":-1,"p":{},"s":[]}"#)),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_truncated_token_is_rejected() {
        let state = sample_state();
        let token = encode(&state.config, &state.roster, &state.ledger).unwrap();
        for cut in [1, token.len() / 2, token.len() - 3] {
            assert!(decode(&token[..cut]).is_err(), "prefix of length {} decoded", cut);
        }
    }

    #[test]
    fn test_missing_fields_are_incomplete() {
        let cases = [
            (r#"{"r":20,"p":{},"s":[]}"#, "w"),
            (r#"{"w":3,"p":{},"s":[]}"#, "r"),
            (r#"{"w":3,"r":20,"s":[]}"#, "p"),
            (r#"{"w":3,"r":20,"p":{}}"#, "s"),
            (r#"{"w":3,"r":null,"p":{},"s":[]}"#, "r"),
        ];
        for (json, field) in cases {
            assert_eq!(decode(&encode_json(json)), Err(DecodeError::Incomplete(field)));
        }
    }

    #[test]
    fn test_zero_requirement_is_accepted() {
        let state = decode(&encode_json(r#"{"w":2,"r":0,"p":{},"s":[]}"#)).unwrap();
        assert_eq!(state.config.required_amount, 0);
    }

    #[test]
    fn test_week_count_range_is_checked() {
        assert_eq!(
            decode(&encode_json(r#"{"w":0,"r":20,"p":{},"s":[]}"#)),
            Err(DecodeError::WeekCountOutOfRange(0))
        );
        assert_eq!(
            decode(&encode_json(r#"{"w":53,"r":20,"p":{},"s":[]}"#)),
            Err(DecodeError::WeekCountOutOfRange(53))
        );
    }

    #[test]
    fn test_duplicate_student_ids_are_rejected() {
        let json = r#"{"w":2,"r":0,"p":{},"s":[{"id":1,"name":"A"},{"id":1,"name":"B"}]}"#;
        assert_eq!(decode(&encode_json(json)), Err(DecodeError::DuplicateStudentId(1)));
    }

    #[test]
    fn test_share_link_and_token_extraction() {
        let link = share_link("https://fees.example", "/class/", "#/view/", "abc=");
        assert_eq!(link, "https://fees.example/class/#/view/abc=");

        assert_eq!(token_from_location("#/view/abc=", "#/view/"), Some("abc="));
        assert_eq!(token_from_location("#/view/", "#/view/"), None);
        assert_eq!(token_from_location("#/edit/abc", "#/view/"), None);
        assert_eq!(token_from_location("", "#/view/"), None);
    }
}
