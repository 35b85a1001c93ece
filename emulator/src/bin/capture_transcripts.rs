use std::io;
use std::path::PathBuf;

#[allow(dead_code)]
#[path = "../session.rs"]
mod session;

use macro_core::sequencer::DEFAULT_FEED_REPEATS;
use session::{Session, SessionConfig};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TranscriptProfile {
    Startup,
    FeedLoop,
    Console,
}

impl TranscriptProfile {
    const ALL: [TranscriptProfile; 3] = [
        TranscriptProfile::Startup,
        TranscriptProfile::FeedLoop,
        TranscriptProfile::Console,
    ];

    fn log_path(self) -> &'static str {
        match self {
            TranscriptProfile::Startup => "evidence/emulator-startup.log",
            TranscriptProfile::FeedLoop => "evidence/emulator-feed-loop.log",
            TranscriptProfile::Console => "evidence/emulator-console.log",
        }
    }

    fn header(self) -> &'static str {
        match self {
            TranscriptProfile::Startup => "Feed macro emulator startup transcript",
            TranscriptProfile::FeedLoop => "Feed macro emulator feed loop transcript",
            TranscriptProfile::Console => "Feed macro emulator console transcript",
        }
    }

    fn script(self) -> &'static [&'static str] {
        match self {
            TranscriptProfile::Startup => &[
                "status",
                "tick 251",
                "tick",
                "tick 5",
                "until buy",
                "status",
            ],
            TranscriptProfile::FeedLoop => &[
                "until feed",
                "cycle",
                "status",
                "until after-feed",
                "until buy",
                "log",
                "status",
            ],
            TranscriptProfile::Console => &[
                "help",
                "help until",
                "until sync",
                "tick 0",
                "jump",
                "cycle 2",
                "reset",
                "status",
            ],
        }
    }
}

fn main() -> io::Result<()> {
    for profile in TranscriptProfile::ALL {
        record_profile(profile)?;
    }
    Ok(())
}

fn record_profile(profile: TranscriptProfile) -> io::Result<()> {
    let config = SessionConfig {
        feed_repeats: DEFAULT_FEED_REPEATS,
        log_path: PathBuf::from(profile.log_path()),
        header: profile.header(),
    };
    let mut session = Session::new(&config)?;
    for command in profile.script() {
        let _ = session.handle_command(command)?;
    }
    println!("recorded {}", profile.log_path());
    Ok(())
}
