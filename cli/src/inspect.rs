use dexstack::descriptor::{ParsedLocation, parse_location};
use owo_colors::OwoColorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Interactive descriptor inspector: each entered line is parsed and its
/// fields (or skip reason / parse error) are displayed.
pub fn run() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!(
        "{} {}",
        "dexstack".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!(
        "{}",
        "Paste a location descriptor to inspect it; .help for commands".bright_black()
    );

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if handle_command(trimmed) {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);
                inspect_line(trimmed);
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "bye".bright_black());
                break;
            }
            Err(err) => {
                eprintln!("{} {err}", "inspector error:".red().bold());
                break;
            }
        }
    }

    Ok(())
}

fn handle_command(trimmed: &str) -> bool {
    if trimmed == ".exit" || trimmed == "exit" {
        std::process::exit(0);
    }
    if trimmed == ".help" {
        println!("{}", ".help                show commands".bright_blue());
        println!("{}", ".exit                exit inspector".bright_blue());
        println!(
            "{}",
            "<descriptor>         parse one walker location line".bright_blue()
        );
        return true;
    }
    false
}

fn inspect_line(descriptor: &str) {
    match parse_location(descriptor) {
        Ok(ParsedLocation::Skip(reason)) => {
            println!("{} {reason:?}", "skipped:".yellow().bold());
        }
        Ok(ParsedLocation::Frame(location)) => {
            println!("{}  {}", "return type".bright_black(), location.return_type);
            println!("{}        {}", "class".bright_black(), location.class_name);
            println!("{}       {}", "method".bright_black(), location.method_name);
            println!("{}         {}", "args".bright_black(), location.arg_types);
            println!(
                "{}       {:#x}",
                "dex pc".bright_black(),
                location.raw_dex_pc
            );
            println!(
                "{}    {}",
                "signature".bright_black(),
                location.full_signature().bright_white()
            );
        }
        Err(err) => {
            println!("{} {err}", "parse error:".red().bold());
        }
    }
}
