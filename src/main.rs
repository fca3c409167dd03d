use std::{fs::read_to_string, time::Instant};

use interpreter::{
    display_errors,
    lexer::lexer::tokenize,
    parser::parser::parse,
};
use rustyline::{error::ReadlineError, DefaultEditor};

const PROMPT: &str = ">> ";
const HISTORY_FILE: &str = ".history.txt";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    let show_tokens = args.contains("--tokens");
    let file = args.opt_value_from_str::<&str, String>("--file")?;

    if let Some(file) = file {
        let source = read_to_string(&file)?;
        log::info!("parse file {:?}", file);
        run(&source, show_tokens);
        return Ok(());
    }

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(HISTORY_FILE).is_err() {
        log::info!("No previous history.");
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                log::info!("parse line {:?}", &line);
                run(&line, show_tokens);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                log::error!("readline failed: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        log::error!("could not save history: {}", err);
    }

    Ok(())
}

/// Lexes and parses one input, printing either diagnostics or the rendering.
fn run(source: &str, show_tokens: bool) {
    if show_tokens {
        for token in tokenize(source) {
            println!("{}", token);
        }
        return;
    }

    let start = Instant::now();
    let (parser, program) = parse(source);
    log::debug!("Parsed in {:?}", start.elapsed());

    if !parser.diagnostics().is_empty() {
        display_errors(parser.diagnostics());
        return;
    }

    println!("{}", program);
}
