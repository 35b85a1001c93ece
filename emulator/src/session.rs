use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use macro_core::report::InputReport;
use macro_core::repl::grammar::{self, Command, HELP_TOPICS};
use macro_core::repl::status::{StatusFormatter, StatusSnapshot};
use macro_core::scripts::Phase;
use macro_core::sequencer::{CycleEvent, CycleLog, DEFAULT_FEED_REPEATS, MacroProgram};
use macro_core::transport::ReportPump;

pub const DEFAULT_LOG_PATH: &str = "evidence/emulator-session.log";
pub const DEFAULT_HEADER: &str = "Feed macro emulator session transcript";

/// Playback lines kept per command before the rest are summarised.
const MAX_PLAYBACK_LINES: usize = 40;

const EXIT_HELP: &str = "exit                 - close the session";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    pub feed_repeats: u8,
    pub log_path: PathBuf,
    pub header: &'static str,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feed_repeats: DEFAULT_FEED_REPEATS,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            header: DEFAULT_HEADER,
        }
    }
}

pub struct Session {
    program: MacroProgram,
    pump: ReportPump<CycleLog>,
    transcript: TranscriptLogger,
    last_report: InputReport,
}

impl Session {
    pub fn new(config: &SessionConfig) -> io::Result<Self> {
        let program = MacroProgram::standard()
            .with_feed_repeats(config.feed_repeats)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
        let transcript = TranscriptLogger::new(&config.log_path, config.header, &program)?;

        Ok(Self {
            program,
            pump: ReportPump::with_observer(program, CycleLog::new()),
            transcript,
            last_report: InputReport::neutral(),
        })
    }

    pub fn handle_command(&mut self, line: &str) -> io::Result<Vec<String>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        self.transcript
            .append_line(self.ticks(), TranscriptRole::Host, trimmed)?;

        let lines = match grammar::parse(trimmed) {
            Ok(command) => self.execute(command),
            Err(err) => vec![format!("ERR syntax {err}")],
        };

        self.record_output(&lines)?;
        Ok(lines)
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.pump.sequencer().total_ticks()
    }

    fn execute(&mut self, command: Command<'_>) -> Vec<String> {
        match command {
            Command::Tick(count) => self.run_ticks(count),
            Command::Cycle(count) => self.run_cycles(count),
            Command::Until(phase) => self.run_until(phase),
            Command::Status => self.status_lines(),
            Command::Log => self.log_lines(),
            Command::Reset => self.reset(),
            Command::Help(topic) => help_lines(topic),
        }
    }

    fn run_ticks(&mut self, count: u32) -> Vec<String> {
        let mut playback = Playback::default();
        for _ in 0..count {
            self.step(&mut playback);
        }
        playback.finish(format!("OK tick {count} {}", self.position()))
    }

    fn run_cycles(&mut self, count: u32) -> Vec<String> {
        let mut playback = Playback::default();
        let mut completed = 0;
        while completed < count {
            if self.step(&mut playback).is_some() {
                completed += 1;
            }
        }
        playback.finish(format!("OK cycle {count} {}", self.position()))
    }

    fn run_until(&mut self, phase: Phase) -> Vec<String> {
        if phase == Phase::Sync {
            return vec!["ERR until sync: the sync phase only runs after reset".to_string()];
        }

        let mut playback = Playback::default();
        let start = self.ticks();
        loop {
            if let Some(event) = self.step(&mut playback) {
                if event.advanced() && event.next == phase {
                    break;
                }
            }
        }
        let elapsed = self.ticks() - start;
        playback.finish(format!(
            "OK until {phase} after {elapsed} ticks {}",
            self.position()
        ))
    }

    /// Plays one tick, narrating report changes and pulses.
    fn step(&mut self, playback: &mut Playback) -> Option<CycleEvent> {
        let pulses = self.pump.sequencer().pulse_count();
        let report = self.pump.poll_outbound();

        if report != self.last_report {
            playback.push(format!("t={} {report}", self.ticks()));
            self.last_report = report;
        }

        if self.pump.sequencer().pulse_count() == pulses {
            return None;
        }

        let event = self.pump.sequencer().observer().latest().copied()?;
        playback.push(event.to_string());
        Some(event)
    }

    fn status_lines(&self) -> Vec<String> {
        let snapshot = StatusSnapshot::of_pump(&self.pump);
        StatusFormatter::new(&snapshot).lines()
    }

    fn log_lines(&self) -> Vec<String> {
        let log = self.pump.sequencer().observer();
        if log.is_empty() {
            return vec!["no pulses recorded".to_string()];
        }

        let mut lines = vec![format!(
            "pulses recorded={} transitions={} retained={}",
            log.recorded(),
            log.transitions(),
            log.len()
        )];
        lines.extend(log.oldest_first().map(|event| format!("  {event}")));
        lines
    }

    fn reset(&mut self) -> Vec<String> {
        self.pump = ReportPump::with_observer(self.program, CycleLog::new());
        self.last_report = InputReport::neutral();
        vec![format!("OK reset {}", self.position())]
    }

    fn position(&self) -> String {
        let state = self.pump.state();
        let script = self.program.script(state.phase);
        format!(
            "phase={} step={}/{}",
            state.phase,
            state.step_index + 1,
            script.step_count()
        )
    }

    fn record_output(&mut self, lines: &[String]) -> io::Result<()> {
        let stamp = self.ticks();
        for line in lines {
            self.transcript
                .append_line(stamp, TranscriptRole::Emulator, line)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Playback {
    lines: Vec<String>,
    suppressed: usize,
}

impl Playback {
    fn push(&mut self, line: String) {
        if self.lines.len() < MAX_PLAYBACK_LINES {
            self.lines.push(line);
        } else {
            self.suppressed += 1;
        }
    }

    fn finish(mut self, summary: String) -> Vec<String> {
        if self.suppressed > 0 {
            self.lines
                .push(format!("... {} more lines suppressed", self.suppressed));
        }
        self.lines.push(summary);
        self.lines
    }
}

fn help_lines(topic: Option<&str>) -> Vec<String> {
    match topic {
        Some(target) if target.eq_ignore_ascii_case("exit") => vec![EXIT_HELP.to_string()],
        Some(target) => match grammar::help_for(target) {
            Some(detail) => vec![detail.to_string()],
            None => vec![
                format!("No help available for `{target}`."),
                format!("Available topics: {}, exit", help_topic_list()),
            ],
        },
        None => {
            let mut lines = vec!["Available commands:".to_string()];
            for (_, detail) in HELP_TOPICS {
                lines.push(format!("  {detail}"));
            }
            lines.push(format!("  {EXIT_HELP}"));
            lines.push("Type `help <topic>` for a specific command.".to_string());
            lines
        }
    }
}

fn help_topic_list() -> String {
    HELP_TOPICS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

struct TranscriptLogger {
    writer: BufWriter<fs::File>,
}

impl TranscriptLogger {
    fn new(path: &Path, header: &str, program: &MacroProgram) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut logger = Self {
            writer: BufWriter::new(file),
        };
        logger.write_header(header, program)?;
        Ok(logger)
    }

    fn write_header(&mut self, header: &str, program: &MacroProgram) -> io::Result<()> {
        writeln!(self.writer, "# {header}")?;
        writeln!(self.writer, "# Stamps are sequencer ticks since the last reset")?;
        writeln!(self.writer, "# feed-repeats={}", program.feed_repeats())?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    fn append_line(&mut self, tick: u64, role: TranscriptRole, line: &str) -> io::Result<()> {
        writeln!(self.writer, "[t={tick:>8}] {} {line}", role.prefix())?;
        self.writer.flush()
    }
}

enum TranscriptRole {
    Host,
    Emulator,
}

impl TranscriptRole {
    fn prefix(&self) -> &'static str {
        match self {
            TranscriptRole::Host => "HOST>",
            TranscriptRole::Emulator => "EMU <",
        }
    }
}
