// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).
//
//! Discover ALSA sound cards and raw MIDI devices.
//!
//! For every raw MIDI subdevice on the host this crate reports the name the
//! device declares and whether it can be opened for input, output, or both.
//! No MIDI data is ever read or written.
//!
//! # Getting Started
//! Add the following to your *Cargo.toml*:
//!
//! ```toml
//! [dependencies]
//! rawmidi-probe = "0.1"
//! ```
//!
//! This example lists every usable raw MIDI device:
//!
//! ```rust,no_run
//! use rawmidi_probe::{discover, Asound};
//!
//! fn main() -> rawmidi_probe::Result<()> {
//!     let asound = Asound::load()?;
//!     for card in discover(&asound)? {
//!         println!("card {}: {}", card.card, card.name.unwrap_or_default());
//!         for dev in card.devices {
//!             println!("  hw:{},{},{} {}", card.card, dev.device, dev.subdevice,
//!                 dev.capability);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The lower-level pieces compose the same way:
//!
//! ```rust,no_run
//! use rawmidi_probe::{cards, with_card, Asound, SubdeviceId};
//!
//! fn main() -> rawmidi_probe::Result<()> {
//!     let asound = Asound::load()?;
//!     for card in cards(&asound) {
//!         with_card(&asound, card?, |ctl| {
//!             for device in ctl.devices() {
//!                 let cap = ctl.probe(device?, SubdeviceId::default())?;
//!                 println!("{}", cap);
//!             }
//!             Ok(())
//!         })?;
//!     }
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(
    anonymous_parameters,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_qualifications,
    variant_size_differences
)]

#[cfg(target_os = "linux")]
mod asound;
mod card;
mod consts;
mod control;
mod cursor;
mod device;
mod discovery;
mod error;
mod owned;
mod status;
mod subsystem;
mod types;

#[cfg(target_os = "linux")]
pub use asound::Asound;
pub use card::{cards, long_name, short_name, Cards};
pub use control::{with_card, Control};
pub use device::Devices;
pub use discovery::{discover, CardReport, DeviceReport, Discovery};
pub use error::{Error, Result, SubsystemError};
pub use status::describe;
pub use subsystem::{CtlMode, RawmidiStream, Subsystem};
pub use types::{CardId, DeviceCapability, DeviceId, Direction, SubdeviceId};
