// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

//! Walk every card and raw MIDI device on the host.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    card, control, CardId, Control, DeviceCapability, DeviceId, Result,
    SubdeviceId, Subsystem,
};

/// One probed subdevice.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceReport {
    /// Device within the card.
    pub device: DeviceId,
    /// Subdevice that was probed.
    pub subdevice: SubdeviceId,
    /// What the probe found.
    pub capability: DeviceCapability,
}

/// One card and its raw MIDI devices.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardReport {
    /// The card.
    pub card: CardId,
    /// Short name, if names were requested.
    pub name: Option<String>,
    /// Long name, if names were requested.
    pub long_name: Option<String>,
    /// Raw MIDI devices, possibly empty.
    pub devices: Vec<DeviceReport>,
}

/// Options for a discovery run.
///
/// ```rust,no_run
/// # fn main() -> rawmidi_probe::Result<()> {
/// let asound = rawmidi_probe::Asound::load()?;
/// let cards = rawmidi_probe::Discovery::new()
///     .card_names(false)
///     .all_subdevices(true)
///     .run(&asound)?;
/// # Ok(())
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Discovery {
    card_names: bool,
    include_unusable: bool,
    all_subdevices: bool,
}

impl Default for Discovery {
    fn default() -> Self {
        Self {
            card_names: true,
            include_unusable: false,
            all_subdevices: false,
        }
    }
}

impl Discovery {
    /// Default options: names on, unusable devices hidden, subdevice 0 only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve short and long card names.
    pub fn card_names(mut self, enable: bool) -> Self {
        self.card_names = enable;
        self
    }

    /// Also report devices that support neither direction.
    pub fn include_unusable(mut self, enable: bool) -> Self {
        self.include_unusable = enable;
        self
    }

    /// Probe every subdevice a device reports, not just subdevice 0.
    pub fn all_subdevices(mut self, enable: bool) -> Self {
        self.all_subdevices = enable;
        self
    }

    /// Run discovery.  The first failing subsystem call aborts the run.
    pub fn run<S: Subsystem + ?Sized>(&self, sys: &S) -> Result<Vec<CardReport>> {
        card::cards(sys)
            .map(|card| self.card(sys, card?))
            .collect()
    }

    fn card<S: Subsystem + ?Sized>(&self, sys: &S, card: CardId) -> Result<CardReport> {
        let (name, long_name) = if self.card_names {
            (
                Some(card::short_name(sys, card)?),
                Some(card::long_name(sys, card)?),
            )
        } else {
            (None, None)
        };

        let devices = control::with_card(sys, card, |ctl| {
            let mut devices = Vec::new();
            for device in ctl.devices() {
                self.device(ctl, device?, &mut devices)?;
            }
            Ok(devices)
        })?;

        Ok(CardReport {
            card,
            name,
            long_name,
            devices,
        })
    }

    fn device<S: Subsystem + ?Sized>(
        &self,
        ctl: &Control<'_, S>,
        device: DeviceId,
        out: &mut Vec<DeviceReport>,
    ) -> Result<()> {
        let first = ctl.probe(device, SubdeviceId::default())?;
        let count = if self.all_subdevices { first.subdevices } else { 1 };
        let mut report = |subdevice: SubdeviceId, capability: DeviceCapability| {
            if self.include_unusable || capability.is_usable() {
                out.push(DeviceReport {
                    device,
                    subdevice,
                    capability,
                });
            }
        };

        report(SubdeviceId::default(), first);
        for subdevice in (1..count).map(SubdeviceId) {
            report(subdevice, ctl.probe(device, subdevice)?);
        }
        Ok(())
    }
}

/// Run discovery with default options.
pub fn discover<S: Subsystem + ?Sized>(sys: &S) -> Result<Vec<CardReport>> {
    Discovery::default().run(sys)
}
