//! Replay a session script and print the resulting gradient and handles.
//!
//! ```text
//! RUST_LOG=gradient_editor=debug cargo run --example replay --features tracing -- tests/sessions/sweep.session
//! ```

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (name, source) = match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .map_err(|e| miette::miette!("failed to read {}: {}", path, e))?;
            (path, source)
        }
        None => (
            "<builtin>".to_string(),
            "type radial\nstops 0:red 1:blue\ndown 200 150\nmove 220 140\nup\ndown 300 150\nup\n".to_string(),
        ),
    };

    let session = gradient_editor::Session::parse(name, source)?;
    tracing::info!(name = session.name(), lines = session.lines().len(), "replaying");
    let editor = session.run()?;

    let value = editor.value();
    println!("transform: {}", value.transform);
    for stop in &value.stops {
        println!("stop {:.3} {}", stop.offset, stop.color);
    }
    println!();
    println!("{}", editor.layout());
    Ok(())
}
