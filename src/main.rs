//! Sitewright: describe a website, get HTML/CSS/JS back, preview, edit and export it.
//!
//! With the `gui` feature this opens the webview window. Without it, the
//! binary generates one site from the command line and writes its archive.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(true).with_line_number(true))
        .init();
}

#[cfg(feature = "gui")]
fn main() {
    init_tracing();
    if let Err(e) = sitewright::ui::webview_app::run() {
        tracing::error!(error = %e, "Sitewright exited with an error");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use sitewright::app::App;

    init_tracing();

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let mut app = match App::open_default() {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize Sitewright");
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "failed to start async runtime");
            std::process::exit(1);
        }
    };

    let timeout = app.generation_timeout();
    let generator = app.generator.clone();
    let outcome = {
        let App { history, session, .. } = &mut app;
        rt.block_on(session.submit(history, generator.as_ref(), timeout, &prompt))
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    for note in &outcome.notifications {
        println!("{}: {}", note.title, note.description);
    }

    match app.export_current() {
        Ok(path) => println!("Archive written to {}", path.display()),
        Err(e) => {
            eprintln!("Export failed: {}", e);
            std::process::exit(1);
        }
    }
}
