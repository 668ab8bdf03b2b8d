// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

//! Error types for card and device discovery.

use thiserror::Error;

use crate::CardId;

/// A negative status returned by a call into the sound subsystem.
///
/// The message is the subsystem's own description of the status code
/// (`snd_strerror()`), the context names the operation that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{context}: {message}")]
pub struct SubsystemError {
    /// Raw (negative) status code.
    pub status: i32,
    /// Description of `status` provided by the subsystem.
    pub message: String,
    /// What was being attempted when the call failed.
    pub context: String,
}

impl SubsystemError {
    /// Create a new error from a status code and its translated message.
    pub fn new(
        status: i32,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            context: context.into(),
        }
    }
}

/// Error for querying cards and raw MIDI devices.
#[derive(Error, Debug)]
pub enum Error {
    /// A call into the sound subsystem failed.
    #[error(transparent)]
    Subsystem(#[from] SubsystemError),

    /// The shared object (or one of its symbols) could not be loaded.
    #[error("cannot load {0}")]
    LibraryUnavailable(&'static str),

    /// Opening a control channel succeeded but produced no handle.
    #[error("control for card {0} opened without a handle")]
    NullHandle(CardId),

    /// The card number does not fit the subsystem's card index.
    #[error("card {0} is out of range")]
    CardOutOfRange(CardId),
}

impl Error {
    /// Status code of the failing subsystem call, if any.
    pub fn status(&self) -> Option<i32> {
        match self {
            Error::Subsystem(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
