mod session;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use session::{Session, SessionConfig};

const USAGE: &str = "Usage: macro-emulator [--repeats <1-255>] [--log <path>]";

fn main() -> io::Result<()> {
    let config = parse_config(env::args().skip(1)).unwrap_or_else(|err| {
        eprintln!("{err}");
        eprintln!("{USAGE}");
        process::exit(2);
    });

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut session = Session::new(&config)?;
    let mut line = String::new();

    writeln!(
        writer,
        "Feed macro emulator ready (feed-repeats={}, log={}). Type `help` for commands or `exit` to quit.",
        config.feed_repeats,
        config.log_path.display()
    )?;

    loop {
        line.clear();
        write!(writer, "> ")?;
        writer.flush()?;

        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            writeln!(writer)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if should_terminate(trimmed) {
            writeln!(writer, "Session closed.")?;
            break;
        }

        let responses = session.handle_command(trimmed)?;
        for response in responses {
            writeln!(writer, "{response}")?;
        }
    }

    Ok(())
}

fn should_terminate(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

fn parse_config<I>(args: I) -> Result<SessionConfig, String>
where
    I: IntoIterator<Item = String>,
{
    let mut config = SessionConfig::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg, None),
        };

        match flag.as_str() {
            "--repeats" => {
                let value = inline
                    .or_else(|| args.next())
                    .ok_or_else(|| "Expected value after --repeats".to_string())?;
                config.feed_repeats = match value.parse::<u8>() {
                    Ok(0) | Err(_) => {
                        return Err(format!("Invalid repeat count `{value}` (expected 1-255)"));
                    }
                    Ok(repeats) => repeats,
                };
            }
            "--log" => {
                let value = inline
                    .or_else(|| args.next())
                    .ok_or_else(|| "Expected value after --log".to_string())?;
                config.log_path = PathBuf::from(value);
            }
            other => return Err(format!("Unknown argument `{other}`")),
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SessionConfig, String> {
        parse_config(args.iter().map(|arg| (*arg).to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        assert_eq!(parse(&[]), Ok(SessionConfig::default()));
    }

    #[test]
    fn repeats_and_log_accept_both_forms() {
        let config = parse(&["--repeats", "5", "--log=/tmp/feed.log"]).unwrap();
        assert_eq!(config.feed_repeats, 5);
        assert_eq!(config.log_path, PathBuf::from("/tmp/feed.log"));

        let config = parse(&["--repeats=20"]).unwrap();
        assert_eq!(config.feed_repeats, 20);
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        assert!(parse(&["--repeats", "0"]).is_err());
        assert!(parse(&["--repeats", "300"]).is_err());
        assert!(parse(&["--log"]).is_err());
        assert_eq!(
            parse(&["--profile"]),
            Err("Unknown argument `--profile`".to_string())
        );
    }
}
