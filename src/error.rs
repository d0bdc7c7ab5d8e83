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

#[derive(Fail, Debug)]
pub enum Error {
    /// An internal invariant was violated. This always indicates a
    /// programmer error, never bad user input.
    #[fail(display = "{}", _0)]
    Assert(::failure::Error),
    /// The first non-option argument is not a recognized command, or its
    /// role suffix is not a recognized role.
    #[fail(display = "{}", _0)]
    CommandInvalid(::failure::Error),
    /// Arguments were given but no command was specified.
    #[fail(display = "{}", _0)]
    CommandRequired(::failure::Error),
    /// A value (e.g. a size) does not match its required format.
    #[fail(display = "{}", _0)]
    Format(::failure::Error),
    #[fail(display = "{}", _0)]
    Io(#[cause] ::std::io::Error),
    /// A file or directory that was explicitly requested does not exist.
    #[fail(display = "{}", _0)]
    NotFound(::failure::Error),
    /// An option is structurally invalid: unknown, duplicated, in
    /// conflict with a negation/reset, or not valid for the command.
    #[fail(display = "{}", _0)]
    OptionInvalid(::failure::Error),
    /// An option value failed semantic validation: bad boolean, bad
    /// number, bad path, out of range, not in the allow list, or empty.
    #[fail(display = "{}", _0)]
    OptionInvalidValue(::failure::Error),
    /// An option required by the command was not resolved from any
    /// source.
    #[fail(display = "{}", _0)]
    OptionRequired(::failure::Error),
    /// Parameters were passed to a command which does not accept them.
    #[fail(display = "{}", _0)]
    ParamInvalid(::failure::Error),
}

impl From<::std::io::Error> for Error {
    fn from(e: ::std::io::Error) -> Self {
        Error::Io(e)
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;
