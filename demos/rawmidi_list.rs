//! List raw MIDI devices on every sound card, like `amidi -l`.

#[cfg(target_os = "linux")]
fn main() {
    use rawmidi_probe::{Asound, Discovery};

    tracing_subscriber::fmt::init();

    let asound = match Asound::load() {
        Ok(asound) => asound,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let cards = match Discovery::new().include_unusable(true).run(&asound) {
        Ok(cards) => cards,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("Dir Device    Name");
    for card in cards {
        for dev in card.devices {
            let dir = match (
                dev.capability.supports_input,
                dev.capability.supports_output,
            ) {
                (true, true) => "IO",
                (true, false) => "I ",
                (false, true) => " O",
                (false, false) => "  ",
            };
            println!(
                "{}  hw:{},{},{}  {}",
                dir, card.card, dev.device, dev.subdevice, dev.capability.name
            );
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    eprintln!("ALSA is only available on Linux");
}
