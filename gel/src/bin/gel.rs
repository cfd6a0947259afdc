extern crate gel;

use gel::Session;

// enable with RUST_LOG=gel=debug
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn print_stats(session: &Session) {
    for (expression, stats) in session.top_expressions(10) {
        println!("{:>6} calls {:>10.3}ms avg  {}",
                 stats.calls, stats.average().as_secs_f64() * 1000.0, expression);
    }
    session.log_top_expressions(10);
}

fn main() -> Result<(), String> {
    init_tracing();
    let session = Session::new();

    if std::env::args().len() > 1 {
        let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");
        match session.evaluate(&input) {
            Err(e) => println!("Eval err: {}", e),
            Ok(value) => println!("{}", value),
        }
        return Ok(());
    }

    use rustyline::error::ReadlineError;
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    loop {
        match rl.readline("~> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) if line.trim() == ":stats" => print_stats(&session),
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match session.evaluate_nodes(&line, &gel::Bindings::new()) {
                    Err(e) => println!("Eval err: {}", e),
                    Ok(evaluated) => for e in evaluated {
                        println!("{}", e.result);
                    },
                }
            },
        }
    }
}
