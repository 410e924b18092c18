//! Prints one or '-n count' UUIDv8 strings, or decodes the UUID strings given after 'parse'

use std::{env, io, io::Write, process::ExitCode};

use uuidv8::{is_valid, UuidV8};

enum Command {
    Generate(usize),
    Parse(Vec<String>),
}

fn main() -> io::Result<ExitCode> {
    let mut args = env::args();
    let program = args.next();
    let command = match parse_args(args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!(
                "Usage: {0} [-n count]\n       {0} parse <uuid>...",
                program.as_deref().unwrap_or("uuidv8")
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut out = io::BufWriter::new(io::stdout());
    let mut status = ExitCode::SUCCESS;
    match command {
        Command::Generate(count) => {
            for _ in 0..count {
                match uuidv8::uuidv8() {
                    Ok(uuid) => writeln!(out, "{uuid}")?,
                    Err(err) => {
                        out.flush()?;
                        eprintln!("Error: {err}");
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
        }
        Command::Parse(inputs) => {
            for input in inputs {
                match input.parse::<UuidV8>() {
                    Ok(fields) => writeln!(
                        out,
                        "{input}\ttimestamp={} clock_seq={:#05x} node={} valid={}",
                        fields.timestamp,
                        fields.clock_seq,
                        hex::encode(&fields.node),
                        is_valid(&input),
                    )?,
                    Err(err) => {
                        writeln!(out, "{input}\terror: {err}")?;
                        status = ExitCode::FAILURE;
                    }
                }
            }
        }
    }

    out.flush()?;
    Ok(status)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let Some(first) = args.next() else {
        return Ok(Command::Generate(1));
    };
    match first.as_str() {
        "parse" => {
            let inputs: Vec<String> = args.collect();
            if inputs.is_empty() {
                return Err("no UUID given to 'parse'".to_owned());
            }
            Ok(Command::Parse(inputs))
        }
        "-n" => {
            let Some(n_arg) = args.next() else {
                return Err("argument to option 'n' missing".to_owned());
            };
            let Ok(count) = n_arg.parse() else {
                return Err(format!("invalid argument to option 'n': '{n_arg}'"));
            };
            match args.next() {
                None => Ok(Command::Generate(count)),
                Some(extra) => Err(format!("unexpected argument '{extra}'")),
            }
        }
        other => Err(format!("unrecognized argument '{other}'")),
    }
}
