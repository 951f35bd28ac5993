// File: src/cli.rs
//! Interactive menu over standard input/output.
//!
//! Generic over the reader, writer and word source so whole sessions can be
//! replayed in tests.

use std::io::{self, BufRead, Write};

use crate::assembler::Fill;
use crate::config::Config;
use crate::detect::SupportFlags;
use crate::format::{to_grouped_hex, to_hex_string};
use crate::generator::Generator;
use crate::source::WordSource;
use crate::types::Family;

const BANNER: &str = "=== Intel CPU Hardware Random Number Generator ===";

const MENU: &str = "\nPlease select an operation:
1. Generate a random byte array (RDRAND)
2. Generate a random byte array (RDSEED)
3. Generate hexadecimal random string (RDRAND)
4. Generate hexadecimal random string (RDSEED)
5. Exit
Please enter your selection (1-5): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// Grouped hex, wrapped for the terminal.
    Bytes,
    /// One unbroken hex string.
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Generate { rendering: Rendering, family: Family },
    Exit,
}

impl Choice {
    /// Parses a menu selection, `None` if it is not one of 1-5.
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim().parse::<u8>().ok()? {
            1 => Choice::Generate {
                rendering: Rendering::Bytes,
                family: Family::Rdrand,
            },
            2 => Choice::Generate {
                rendering: Rendering::Bytes,
                family: Family::Rdseed,
            },
            3 => Choice::Generate {
                rendering: Rendering::Hex,
                family: Family::Rdrand,
            },
            4 => Choice::Generate {
                rendering: Rendering::Hex,
                family: Family::Rdseed,
            },
            5 => Choice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Runs the menu loop until the user picks exit or input ends.
pub fn run<S, R, W>(
    generator: &Generator<S>,
    config: &Config,
    mut input: R,
    mut output: W,
) -> io::Result<()>
where
    S: WordSource,
    R: BufRead,
    W: Write,
{
    write_support(generator.support(), &mut output)?;
    writeln!(output, "\n{BANNER}")?;

    loop {
        write!(output, "{MENU}")?;
        output.flush()?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };

        let (rendering, family) = match Choice::parse(&line) {
            Some(Choice::Exit) => break,
            Some(Choice::Generate { rendering, family }) => (rendering, family),
            None => {
                writeln!(output, "Invalid selection, please try again.")?;
                continue;
            }
        };

        write!(output, "Please enter the length (in bytes) to be generated: ")?;
        output.flush()?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };
        let length = match line.trim().parse::<usize>() {
            Ok(n) if config.accepts_length(n) => n,
            _ => {
                writeln!(
                    output,
                    "The length must be between {}-{}.",
                    config.min_length, config.max_length
                )?;
                continue;
            }
        };

        log::debug!("generating {length} bytes with {family}");
        let fill = generator.fill(length, family == Family::Rdseed);
        report(&fill, rendering, family, config, &mut output)?;
    }

    output.flush()
}

fn write_support(support: SupportFlags, output: &mut impl Write) -> io::Result<()> {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    writeln!(output, "RDRAND support: {}", yes_no(support.rdrand_available))?;
    writeln!(output, "RDSEED support: {}", yes_no(support.rdseed_available))
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn report(
    fill: &Fill,
    rendering: Rendering,
    requested: Family,
    config: &Config,
    output: &mut impl Write,
) -> io::Result<()> {
    if fill.fell_back() {
        log::warn!("RDSEED unavailable, fell back to RDRAND");
        writeln!(output, "Note: RDSEED is not supported by this CPU, RDRAND was used instead.")?;
    }

    if let Some(e) = fill.error() {
        log::error!("generated {} of {} bytes: {e}", fill.len(), fill.requested());
        writeln!(output, "Error: {e}")?;
        if fill.is_empty() {
            return Ok(());
        }
    }

    let used = fill.family().unwrap_or(requested);
    match rendering {
        Rendering::Bytes => {
            write!(output, "Generated random bytes ({used}): ")?;
            let grouped = to_grouped_hex(fill.bytes(), config.bytes_per_line, config.bytes_per_group);
            writeln!(output, "{grouped}")
        }
        Rendering::Hex => writeln!(
            output,
            "Generated hexadecimal string ({used}): {}",
            to_hex_string(fill.bytes())
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::source::ScriptedSource;

    fn session(support: SupportFlags, input: &str) -> (String, Vec<u8>, ScriptedSource) {
        let source = ScriptedSource::new(support);
        let generator = Generator::with_source(&source);
        let mut output = Vec::new();
        run(&generator, &Config::default(), Cursor::new(input), &mut output).unwrap();

        let bytes = source
            .produced()
            .into_iter()
            .flat_map(|(_, w)| w.as_u64().to_le_bytes())
            .collect();
        (String::from_utf8(output).unwrap(), bytes, source)
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(
            Choice::parse("2\n"),
            Some(Choice::Generate {
                rendering: Rendering::Bytes,
                family: Family::Rdseed,
            })
        );
        assert_eq!(Choice::parse(" 5 "), Some(Choice::Exit));
        assert_eq!(Choice::parse("0"), None);
        assert_eq!(Choice::parse("6"), None);
        assert_eq!(Choice::parse("rdrand"), None);
    }

    #[test]
    fn test_prints_support_and_banner() {
        let (out, _, _) = session(SupportFlags::new(true, false), "5\n");
        assert!(out.starts_with("RDRAND support: yes\nRDSEED support: no\n"));
        assert!(out.contains(BANNER));
        assert_eq!(out.matches("Please select an operation:").count(), 1);
    }

    #[test]
    fn test_byte_output_layout() {
        let (out, words, _) = session(SupportFlags::new(true, false), "1\n20\n5\n");
        let expected = to_grouped_hex(&words[..20], 16, 8);

        assert!(out.contains(&format!("Generated random bytes (RDRAND): {expected}\n")));
        assert!(expected.contains(' '));
        assert!(expected.contains('\n'));
    }

    #[test]
    fn test_hex_output() {
        let (out, words, source) = session(SupportFlags::new(true, true), "4\n5\n5\n");
        let expected = to_hex_string(&words[..5]);

        assert!(out.contains(&format!("Generated hexadecimal string (RDSEED): {expected}\n")));
        assert_eq!(source.calls(Family::Rdseed), 1);
        assert_eq!(source.calls(Family::Rdrand), 0);
    }

    #[test]
    fn test_fallback_is_reported() {
        let (out, _, source) = session(SupportFlags::new(true, false), "2\n8\n5\n");
        assert!(out.contains("RDRAND was used instead"));
        assert!(out.contains("Generated random bytes (RDRAND): "));
        assert_eq!(source.calls(Family::Rdseed), 0);
    }

    #[test]
    fn test_invalid_selection_reprompts() {
        let (out, _, source) = session(SupportFlags::new(true, true), "9\nabc\n5\n");
        assert_eq!(out.matches("Invalid selection, please try again.").count(), 2);
        assert_eq!(out.matches("Please select an operation:").count(), 3);
        assert_eq!(source.total_calls(), 0);
    }

    #[test]
    fn test_length_out_of_range() {
        let (out, _, source) = session(SupportFlags::new(true, true), "1\n0\n3\n10001\n1\nten\n5\n");
        assert_eq!(out.matches("The length must be between 1-10000.").count(), 3);
        assert_eq!(source.total_calls(), 0);
    }

    #[test]
    fn test_no_hardware_reports_error() {
        let (out, _, source) = session(SupportFlags::NONE, "3\n16\n5\n");
        assert!(out.contains("Error: CPU does not support a hardware random number generator"));
        assert!(!out.contains("Generated hexadecimal string"));
        assert_eq!(source.total_calls(), 0);
    }

    #[test]
    fn test_end_of_input_exits() {
        let (out, _, _) = session(SupportFlags::new(true, true), "1\n");
        assert!(out.ends_with("Please enter the length (in bytes) to be generated: "));

        let (empty, _, _) = session(SupportFlags::new(true, true), "");
        assert!(empty.ends_with("Please enter your selection (1-5): "));
    }
}
