// Envelope encoding - compact JSON with <, >, &, U+2028 and U+2029 escaped as \uXXXX
// so JSONP payloads stay inert inside <script>

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const JSONP_CONTENT_TYPE: &str = "application/x-javascript";

struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;

        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };

            if start < i {
                writer.write_all(fragment[start..i].as_bytes())?;
            }
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }

        if start < fragment.len() {
            writer.write_all(fragment[start..].as_bytes())?;
        }
        Ok(())
    }
}

pub fn to_json(value: &impl Serialize) -> serde_json::Result<Vec<u8>> {
    let mut body = Vec::with_capacity(256);
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, HtmlSafeFormatter);
    value.serialize(&mut serializer)?;
    Ok(body)
}

// callback(json) when a callback is given, plain json otherwise
pub fn wrap_jsonp(json: Vec<u8>, callback: &str) -> (Vec<u8>, &'static str) {
    if callback.is_empty() {
        return (json, JSON_CONTENT_TYPE);
    }

    let mut body = Vec::with_capacity(callback.len() + json.len() + 2);
    body.extend_from_slice(callback.as_bytes());
    body.push(b'(');
    body.extend_from_slice(&json);
    body.push(b')');
    (body, JSONP_CONTENT_TYPE)
}
