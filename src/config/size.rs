// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::*;
use regex::Regex;

/// The multiplier for a size qualifier character. The qualifier has
/// already been vetted by the format expression, so an unknown character
/// here is a programmer error.
fn qualifier_to_multiplier(qualifier: char) -> Result<f64> {
    Ok(match qualifier {
        'b' => 1.0,
        'k' => 1024.0,
        'm' => 1024.0 * 1024.0,
        'g' => 1024.0 * 1024.0 * 1024.0,
        't' => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        'p' => 1024.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => {
            return Err(Error::Assert(format_err!(
                "'{}' is not a valid size qualifier",
                qualifier
            )));
        }
    })
}

/// Convert a size value with an optional binary qualifier (e.g. "8192",
/// "16k", "2GB") into bytes. Qualifiers are case-insensitive; a value
/// without a qualifier is already in bytes.
pub fn parse_size(value: &str) -> Result<f64> {
    lazy_static! {
        static ref SIZE_EXPRESSION: Regex =
            Regex::new("^[0-9]+(kb|k|mb|m|gb|g|tb|t|pb|p|b)*$").unwrap();
    }

    let lower = value.to_lowercase();

    if !SIZE_EXPRESSION.is_match(&lower) {
        return Err(Error::Format(format_err!("value '{}' is not valid", value)));
    }

    let bytes = lower.as_bytes();
    let size = bytes.len();
    let mut qualifier_pos: Option<usize> = None;

    // If there is a 'b' on the end, the qualifier is the 'b' itself when
    // the preceding character is a digit, else the preceding letter
    // (e.g. "kb", where the 'k' is the position of interest). The format
    // expression has already enforced that anything non-numeric at the
    // end is a valid qualifier.
    if bytes[size - 1] == b'b' {
        if bytes[size - 2] <= b'9' {
            qualifier_pos = Some(size - 1);
        } else {
            qualifier_pos = Some(size - 2);
        }
    } else if bytes[size - 1] > b'9' {
        qualifier_pos = Some(size - 1);
    }

    let (digits, multiplier) = match qualifier_pos {
        None => (lower.as_str(), 1.0),
        Some(pos) => (&lower[..pos], qualifier_to_multiplier(bytes[pos] as char)?),
    };

    let number: f64 = match digits.parse() {
        Ok(number) => number,
        Err(_) => {
            return Err(Error::Format(format_err!("value '{}' is not valid", value)));
        }
    };

    Ok(number * multiplier)
}
