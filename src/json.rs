use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};

use crate::error::{Error, Result};


/// Serialize `value` as compact JSON, writing numbers the way
/// `JSON.stringify` does.
pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, NumberFormatter);
    value.serialize(&mut ser).or(Err(Error::PayloadInvalid))?;
    Ok(out)
}

/// Parse a JSON object. Integers too large for 64 bits come back as `f64`.
pub fn object_from_slice(bytes: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(object)) => Ok(object),
        _ => Err(Error::TokenInvalid),
    }
}


/// The compact formatter, except floats print as ECMAScript numbers:
/// `1` rather than `1.0`, and positional notation up to `1e21`.
struct NumberFormatter;

impl Formatter for NumberFormatter {
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        write_number(writer, value)
    }
}


fn write_number<W: ?Sized + io::Write>(writer: &mut W, value: f64) -> io::Result<()> {
    // Both zeroes print as `0`.
    if value == 0.0 {
        return writer.write_all(b"0");
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.25e-7`.
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    let mut out = String::with_capacity(k as usize + 8);
    if value < 0.0 {
        out.push('-');
    }

    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend((0..n - k).map(|_| '0'));
    } else if 0 < n && n <= 21 {
        out.push_str(&digits[..n as usize]);
        out.push('.');
        out.push_str(&digits[n as usize..]);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend((0..-n).map(|_| '0'));
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if n > 0 { '+' } else { '-' });
        out.push_str(&(n - 1).abs().to_string());
    }

    writer.write_all(out.as_bytes())
}
