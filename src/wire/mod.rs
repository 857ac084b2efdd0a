//! Request framing for the tio.run wire format.
//!
//! A request is a sequence of commands in the service's command language; this
//! client only ever emits `V` (set variable) and `F` (create file) followed by
//! the `R` (run) terminator. Each field is length-prefixed so the service can
//! parse values without escaping embedded NUL bytes. The framed request is
//! raw-DEFLATE compressed before it goes on the wire; the response comes back
//! gzip-compressed.

mod compress;

pub use compress::{compress, decompress, generate_random_bits};

use crate::options::EvaluateOptions;

/// Convert text to its byte-string form: the UTF-8 octets of the value, one
/// element per byte. Characters above U+00FF contribute each of their encoded
/// bytes individually, never a multi-byte unit. Total over all input and the
/// identity on ASCII.
pub fn to_byte_string(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// A named unit of request payload: either a single file blob or a
/// multi-value variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    File { value: String },
    Variable { values: Vec<String> },
}

impl Field {
    pub fn file(value: impl Into<String>) -> Self {
        Field::File { value: value.into() }
    }

    pub fn variable<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Field::Variable {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Disabled fields (empty file, zero-value variable) are skipped entirely
    /// during encoding.
    pub fn disabled(&self) -> bool {
        match self {
            Field::File { value } => value.is_empty(),
            Field::Variable { values } => values.is_empty(),
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Field::File { .. } => b'F',
            Field::Variable { .. } => b'V',
        }
    }
}

/// The canonical ordered field set for one execution request.
///
/// The seven keys and their order are fixed: order determines wire order and
/// is part of the contract with the service. Built fresh per request and
/// discarded after encoding.
#[derive(Debug, Clone)]
pub struct State {
    fields: Vec<(&'static str, Field)>,
}

impl State {
    pub fn from_options(options: &EvaluateOptions) -> Self {
        let fields = vec![
            ("lang", Field::variable([options.language.clone()])),
            (
                "TIO_CFLAGS",
                Field::variable(options.flags.clone().unwrap_or_default()),
            ),
            (
                "TIO_OPTIONS",
                Field::variable(options.options.clone().unwrap_or_default()),
            ),
            (
                "TIO_DRIVER",
                Field::variable(options.driver.clone().unwrap_or_default()),
            ),
            (".code.tio", Field::file(options.code.clone())),
            (".input.tio", Field::file(options.input.clone().unwrap_or_default())),
            ("args", Field::variable(options.args.clone().unwrap_or_default())),
        ];
        Self { fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Field)> {
        self.fields.iter().map(|(name, field)| (*name, field))
    }

    /// Serialize into the pre-compression frame.
    ///
    /// Per active field: the type tag (`F`/`V`), the key name, NUL, then for a
    /// file the decimal byte length, NUL and the bytes; for a variable the
    /// decimal value count, NUL and each value followed by NUL. The frame ends
    /// with the `R` run command.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, field) in &self.fields {
            if field.disabled() {
                continue;
            }
            out.push(field.tag());
            out.extend_from_slice(name.as_bytes());
            out.push(0);
            match field {
                Field::File { value } => {
                    let bytes = to_byte_string(value);
                    out.extend_from_slice(bytes.len().to_string().as_bytes());
                    out.push(0);
                    out.extend_from_slice(&bytes);
                }
                Field::Variable { values } => {
                    out.extend_from_slice(values.len().to_string().as_bytes());
                    out.push(0);
                    for value in values {
                        out.extend_from_slice(&to_byte_string(value));
                        out.push(0);
                    }
                }
            }
        }
        out.push(b'R');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_string_is_identity_on_ascii() {
        assert_eq!(to_byte_string("hello"), b"hello");
        assert_eq!(to_byte_string(""), b"");
    }

    #[test]
    fn byte_string_widens_unicode_to_utf8_octets() {
        // U+00E9 is two bytes, U+20AC three; each byte stands alone.
        assert_eq!(to_byte_string("é"), vec![0xc3, 0xa9]);
        assert_eq!(to_byte_string("€"), vec![0xe2, 0x82, 0xac]);
    }

    #[test]
    fn empty_fields_are_disabled() {
        assert!(Field::file("").disabled());
        assert!(!Field::file("a").disabled());
        assert!(Field::variable(Vec::<String>::new()).disabled());
        let field = Field::variable(["x"]);
        assert!(!field.disabled());
        assert_eq!(field, Field::Variable { values: vec!["x".into()] });
    }

    #[test]
    fn state_preserves_canonical_order() {
        let options = EvaluateOptions::new("python3", "print(1)");
        let state = State::from_options(&options);
        let names: Vec<&str> = state.fields().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            [
                "lang",
                "TIO_CFLAGS",
                "TIO_OPTIONS",
                "TIO_DRIVER",
                ".code.tio",
                ".input.tio",
                "args",
            ]
        );
    }

    #[test]
    fn minimal_request_encodes_exactly() {
        let state = State::from_options(&EvaluateOptions::new("L", "C"));
        assert_eq!(state.encode(), b"Vlang\x001\x00L\x00F.code.tio\x001\x00CR");
    }

    #[test]
    fn variable_values_are_nul_terminated_in_order() {
        let mut options = EvaluateOptions::new("L", "C");
        options.args = Some(vec!["a".into(), "b".into()]);
        let frame = State::from_options(&options).encode();
        assert!(frame.ends_with(b"Vargs\x002\x00a\x00b\x00R"));
    }

    #[test]
    fn file_length_counts_bytes_not_chars() {
        // "é" is two UTF-8 bytes, so the length prefix must read 2.
        let frame = State::from_options(&EvaluateOptions::new("L", "é")).encode();
        let mut expected = b"Vlang\x001\x00L\x00F.code.tio\x002\x00".to_vec();
        expected.extend_from_slice(&[0xc3, 0xa9, b'R']);
        assert_eq!(frame, expected);
    }
}
