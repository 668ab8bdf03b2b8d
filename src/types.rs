// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Numeric index as understood by the sound subsystem.
            pub fn index(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self(index)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(f, "{}", self.0)
            }
        }
    };
}

id!(
    /// A sound card.  Valid while the card stays attached; not stable across
    /// reboots.
    CardId
);

id!(
    /// A raw MIDI device, unique within its card.
    DeviceId
);

id!(
    /// A subdevice of a raw MIDI device.  Defaults to 0.
    SubdeviceId
);

/// Direction of a raw MIDI stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Bytes flow from the device to the host.
    Input,
    /// Bytes flow from the host to the device.
    Output,
}

/// Result of probing one subdevice.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceCapability {
    /// Name the device declares for itself.
    pub name: String,
    /// Whether the subdevice can be opened for input.
    pub supports_input: bool,
    /// Whether the subdevice can be opened for output.
    pub supports_output: bool,
    /// Number of subdevices the device reports (0 if neither probe succeeded).
    pub subdevices: u32,
}

impl DeviceCapability {
    /// Whether the device is usable as raw MIDI in at least one direction.
    pub fn is_usable(&self) -> bool {
        self.supports_input || self.supports_output
    }

    /// Whether the device supports `direction`.
    pub fn supports(&self, direction: Direction) -> bool {
        match direction {
            Direction::Input => self.supports_input,
            Direction::Output => self.supports_output,
        }
    }
}

impl Display for DeviceCapability {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let io = match (self.supports_input, self.supports_output) {
            (true, true) => "IO",
            (true, false) => "I",
            (false, true) => "O",
            (false, false) => "-",
        };
        write!(f, "{} [{}]", self.name, io)
    }
}
