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

use crate::config::size::parse_size;
use crate::error::Error;

#[test]
fn test_unqualified_values_are_bytes() {
    assert_eq!(0.0, parse_size("0").unwrap());
    assert_eq!(10.0, parse_size("10").unwrap());
    assert_eq!(8192.0, parse_size("8192").unwrap());
    assert_eq!(1048576.0, parse_size("1048576").unwrap());
}

#[test]
fn test_qualified_values() {
    assert_eq!(10.0, parse_size("10b").unwrap());
    assert_eq!(1024.0, parse_size("1k").unwrap());
    assert_eq!(2048.0, parse_size("2kb").unwrap());
    assert_eq!(5.0 * 1048576.0, parse_size("5m").unwrap());
    assert_eq!(5.0 * 1048576.0, parse_size("5mb").unwrap());
    assert_eq!(2147483648.0, parse_size("2g").unwrap());
    assert_eq!(2147483648.0, parse_size("2gb").unwrap());
    assert_eq!(3.0 * 1099511627776.0, parse_size("3t").unwrap());
    assert_eq!(1125899906842624.0, parse_size("1pb").unwrap());
}

#[test]
fn test_qualifiers_are_case_insensitive() {
    assert_eq!(2147483648.0, parse_size("2GB").unwrap());
    assert_eq!(2147483648.0, parse_size("2Gb").unwrap());
    assert_eq!(1024.0, parse_size("1K").unwrap());
    assert_eq!(10.0, parse_size("10B").unwrap());
}

#[test]
fn test_unqualified_matches_integer_parse() {
    for value in &["1", "16384", "999999", "1073741824"] {
        assert_eq!(
            value.parse::<i64>().unwrap() as f64,
            parse_size(value).unwrap()
        );
    }
}

fn assert_not_valid(value: &str) {
    match parse_size(value) {
        Err(Error::Format(e)) => {
            assert_eq!(format!("value '{}' is not valid", value), e.to_string())
        }
        other => panic!("expected Format error for '{}', got {:?}", value, other),
    }
}

#[test]
fn test_invalid_values() {
    assert_not_valid("");
    assert_not_valid("abc");
    assert_not_valid("k");
    assert_not_valid("1.5k");
    assert_not_valid("-1");
    assert_not_valid("1 k");
    assert_not_valid("1q");
    assert_not_valid("1kk");
}
