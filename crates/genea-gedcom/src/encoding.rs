//! Character encoding detection and conversion for GEDCOM files.
//!
//! Detection order: byte order mark, then the header `CHAR` tag, then byte
//! heuristics. ANSEL (Z39.47, the GEDCOM 5.x legacy encoding) is decoded by
//! an in-crate table; everything else goes through `encoding_rs`.

use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};

use genea_core::GeneaError;

/// The detected or declared encoding of a GEDCOM byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GedcomEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Windows1252,
    Iso8859_1,
    Ansel,
    Ascii,
}

impl std::fmt::Display for GedcomEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Utf16Le => write!(f, "UTF-16LE"),
            Self::Utf16Be => write!(f, "UTF-16BE"),
            Self::Windows1252 => write!(f, "Windows-1252"),
            Self::Iso8859_1 => write!(f, "ISO-8859-1"),
            Self::Ansel => write!(f, "ANSEL"),
            Self::Ascii => write!(f, "ASCII"),
        }
    }
}

/// Detect the encoding of raw GEDCOM bytes.
pub fn detect_encoding(bytes: &[u8]) -> GedcomEncoding {
    // Byte order marks first.
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return GedcomEncoding::Utf8;
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return GedcomEncoding::Utf16Le;
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return GedcomEncoding::Utf16Be;
    }

    if let Some(declared) = declared_encoding(bytes) {
        return declared;
    }

    // No BOM, no CHAR tag: valid UTF-8 wins, pure ASCII is ASCII, anything
    // else is treated as Windows-1252 (a superset of ISO-8859-1).
    match std::str::from_utf8(bytes) {
        Ok(s) if s.is_ascii() => GedcomEncoding::Ascii,
        Ok(_) => GedcomEncoding::Utf8,
        Err(_) => GedcomEncoding::Windows1252,
    }
}

/// Find the `1 CHAR <value>` line in the header without assuming a working
/// decode yet. The header is ASCII-compatible in every supported encoding
/// except UTF-16, which was handled by its BOM.
fn declared_encoding(bytes: &[u8]) -> Option<GedcomEncoding> {
    let sample = &bytes[..bytes.len().min(4096)];
    let (text, _, _) = WINDOWS_1252.decode(sample);
    for line in text.lines().take(50) {
        let mut parts = line.trim().split_whitespace();
        let (Some(level), Some(tag)) = (parts.next(), parts.next()) else {
            continue;
        };
        if level == "1" && tag.eq_ignore_ascii_case("CHAR") {
            let value = parts.collect::<Vec<_>>().join(" ").to_uppercase();
            return Some(match value.as_str() {
                "UTF-8" | "UTF8" | "UNICODE" => GedcomEncoding::Utf8,
                "ANSEL" => GedcomEncoding::Ansel,
                "ANSI" | "WINDOWS-1252" | "CP1252" => GedcomEncoding::Windows1252,
                "ISO-8859-1" | "LATIN1" | "LATIN-1" => GedcomEncoding::Iso8859_1,
                "ASCII" | "IBMPC" => GedcomEncoding::Ascii,
                _ => return None,
            });
        }
    }
    None
}

/// Decode GEDCOM bytes into text, detecting the encoding first.
///
/// # Errors
///
/// [`GeneaError::CodecMalformed`] only when the stream cannot be decoded at
/// all (the single fatal import condition).
pub fn decode_gedcom_bytes(bytes: &[u8]) -> Result<(String, GedcomEncoding), GeneaError> {
    if bytes.is_empty() {
        return Err(GeneaError::CodecMalformed("empty input".into()));
    }
    let encoding = detect_encoding(bytes);
    let text = match encoding {
        GedcomEncoding::Utf8 | GedcomEncoding::Ascii => {
            let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(bytes);
            String::from_utf8(body.to_vec())
                .map_err(|e| GeneaError::CodecMalformed(format!("invalid UTF-8: {e}")))?
        }
        GedcomEncoding::Utf16Le => UTF_16LE.decode(bytes).0.into_owned(),
        GedcomEncoding::Utf16Be => UTF_16BE.decode(bytes).0.into_owned(),
        GedcomEncoding::Windows1252 | GedcomEncoding::Iso8859_1 => {
            WINDOWS_1252.decode(bytes).0.into_owned()
        }
        GedcomEncoding::Ansel => decode_ansel(bytes),
    };
    Ok((text, encoding))
}

/// Decode ANSEL (Z39.47) into UTF-8.
///
/// ANSEL places combining diacritics BEFORE the base character; Unicode
/// places them after, so pending combiners are buffered and flushed after
/// the next base character.
pub fn decode_ansel(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut pending: Vec<char> = Vec::new();

    for &b in bytes {
        match b {
            0x00..=0x7F => {
                out.push(b as char);
                for c in pending.drain(..) {
                    out.push(c);
                }
            }
            0xE0..=0xFE => {
                if let Some(c) = ansel_combining(b) {
                    pending.push(c);
                }
            }
            _ => {
                let c = ansel_special(b).unwrap_or('\u{FFFD}');
                out.push(c);
                for c in pending.drain(..) {
                    out.push(c);
                }
            }
        }
    }
    out
}

/// Spacing characters of the ANSEL high range.
fn ansel_special(b: u8) -> Option<char> {
    Some(match b {
        0xA1 => '\u{0141}', // Ł
        0xA2 => '\u{00D8}', // Ø
        0xA3 => '\u{0110}', // Đ
        0xA4 => '\u{00DE}', // Þ
        0xA5 => '\u{00C6}', // Æ
        0xA6 => '\u{0152}', // Œ
        0xA7 => '\u{02B9}', // modifier prime
        0xA8 => '\u{00B7}', // middle dot
        0xA9 => '\u{266D}', // flat
        0xAA => '\u{00AE}', // registered
        0xAB => '\u{00B1}', // plus-minus
        0xAC => '\u{01A0}', // Ơ
        0xAD => '\u{01AF}', // Ư
        0xAE => '\u{02BC}', // apostrophe
        0xB0 => '\u{02BB}', // ayn
        0xB1 => '\u{0142}', // ł
        0xB2 => '\u{00F8}', // ø
        0xB3 => '\u{0111}', // đ
        0xB4 => '\u{00FE}', // þ
        0xB5 => '\u{00E6}', // æ
        0xB6 => '\u{0153}', // œ
        0xB7 => '\u{02BA}', // double prime
        0xB8 => '\u{0131}', // dotless i
        0xB9 => '\u{00A3}', // £
        0xBA => '\u{00F0}', // ð
        0xBC => '\u{01A1}', // ơ
        0xBD => '\u{01B0}', // ư
        0xC0 => '\u{00B0}', // degree
        0xC1 => '\u{2113}', // script l
        0xC2 => '\u{2117}', // sound recording copyright
        0xC3 => '\u{00A9}', // ©
        0xC4 => '\u{266F}', // sharp
        0xC5 => '\u{00BF}', // ¿
        0xC6 => '\u{00A1}', // ¡
        _ => return None,
    })
}

/// Combining diacritics of the ANSEL high range, mapped to their Unicode
/// combining equivalents.
fn ansel_combining(b: u8) -> Option<char> {
    Some(match b {
        0xE0 => '\u{0309}', // hook above
        0xE1 => '\u{0300}', // grave
        0xE2 => '\u{0301}', // acute
        0xE3 => '\u{0302}', // circumflex
        0xE4 => '\u{0303}', // tilde
        0xE5 => '\u{0304}', // macron
        0xE6 => '\u{0306}', // breve
        0xE7 => '\u{0307}', // dot above
        0xE8 => '\u{0308}', // diaeresis
        0xE9 => '\u{030C}', // caron
        0xEA => '\u{030A}', // ring above
        0xEB => '\u{FE20}', // ligature left half
        0xEC => '\u{FE21}', // ligature right half
        0xED => '\u{0315}', // comma above right
        0xEE => '\u{030B}', // double acute
        0xEF => '\u{0310}', // candrabindu
        0xF0 => '\u{0327}', // cedilla
        0xF1 => '\u{0328}', // ogonek
        0xF2 => '\u{0323}', // dot below
        0xF3 => '\u{0324}', // diaeresis below
        0xF4 => '\u{0325}', // ring below
        0xF5 => '\u{0333}', // double low line
        0xF6 => '\u{0332}', // low line
        0xF7 => '\u{0326}', // comma below
        0xF8 => '\u{031C}', // left half ring below
        0xF9 => '\u{032E}', // breve below
        0xFA => '\u{FE22}', // double tilde left half
        0xFB => '\u{FE23}', // double tilde right half
        0xFE => '\u{0313}', // comma above
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"0 HEAD\n0 TRLR\n");
        assert_eq!(detect_encoding(&bytes), GedcomEncoding::Utf8);
        let (text, _) = decode_gedcom_bytes(&bytes).unwrap();
        assert!(text.starts_with("0 HEAD"));
    }

    #[test]
    fn test_detects_declared_ansel() {
        let bytes = b"0 HEAD\n1 CHAR ANSEL\n0 TRLR\n";
        assert_eq!(detect_encoding(bytes), GedcomEncoding::Ansel);
    }

    #[test]
    fn test_detects_declared_utf8() {
        let bytes = b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR UTF-8\n0 TRLR\n";
        assert_eq!(detect_encoding(bytes), GedcomEncoding::Utf8);
    }

    #[test]
    fn test_plain_ascii_without_header() {
        assert_eq!(detect_encoding(b"0 HEAD\n0 TRLR\n"), GedcomEncoding::Ascii);
    }

    #[test]
    fn test_latin1_bytes_decode() {
        // "Müller" in ISO-8859-1, no CHAR declaration.
        let mut bytes = b"0 HEAD\n0 @I1@ INDI\n1 NAME M".to_vec();
        bytes.push(0xFC);
        bytes.extend_from_slice(b"ller /X/\n0 TRLR\n");
        let (text, encoding) = decode_gedcom_bytes(&bytes).unwrap();
        assert_eq!(encoding, GedcomEncoding::Windows1252);
        assert!(text.contains("M\u{00FC}ller"));
    }

    #[test]
    fn test_ansel_combining_diacritic() {
        // ANSEL acute (0xE2) precedes the base 'e': "Durand, André".
        let bytes = b"Andr\xE2e".to_vec();
        assert_eq!(decode_ansel(&bytes), "Andre\u{0301}");
    }

    #[test]
    fn test_ansel_specials() {
        assert_eq!(decode_ansel(&[0xA5]), "\u{00C6}");
        assert_eq!(decode_ansel(&[0xB2]), "\u{00F8}");
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(decode_gedcom_bytes(&[]).is_err());
    }
}
