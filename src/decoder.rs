use crate::Result;

/// Converts the raw bytes of a line into text.
///
/// Any closure `Fn(Vec<u8>) -> Result<String>` can be used as decoder as well.
pub trait Decoder {
    fn decode(&self, bytes: Vec<u8>) -> Result<String>;
}

/// Strict UTF-8. Invalid data results in `Error::Utf8`. This is the default decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

impl Decoder for Utf8 {
    #[inline]
    fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        Ok(String::from_utf8(bytes)?)
    }
}

/// UTF-8 which replaces invalid sequences with U+FFFD instead of failing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Lossy;

impl Decoder for Utf8Lossy {
    #[inline]
    fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        match String::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        }
    }
}

/// ISO-8859-1. Every byte maps to the unicode codepoint of the same value, so decoding never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latin1;

impl Decoder for Latin1 {
    #[inline]
    fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        Ok(bytes.into_iter().map(char::from).collect())
    }
}

impl<F> Decoder for F
where
    F: Fn(Vec<u8>) -> Result<String>,
{
    #[inline]
    fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        self(bytes)
    }
}
