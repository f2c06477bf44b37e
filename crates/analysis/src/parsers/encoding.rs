//! Strict decoding of transcript bytes.

use encoding_rs::{EUC_KR, UTF_8};
use std::borrow::Cow;
use talkscope_core::config::TextEncoding;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode `bytes` as `encoding` without substituting replacement characters.
///
/// Returns `None` when the bytes are malformed for that encoding.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> Option<Cow<'_, str>> {
    match encoding {
        TextEncoding::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
        TextEncoding::Utf8Sig => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            UTF_8.decode_without_bom_handling_and_without_replacement(body)
        }
        // WHATWG EUC-KR is the unified Hangul code page (CP949).
        TextEncoding::Cp949 => EUC_KR.decode_without_bom_handling_and_without_replacement(bytes),
    }
}
