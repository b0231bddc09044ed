// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blickwerk — cross-platform identity-check companion.
//
// Entry point. Initialises logging and runs the headless self-check: build
// the process-wide app context, drive the bootstrap coordinator to
// completion, and print what startup cost. The camera/barcode/face-match
// screens live in the platform shells; this binary exercises the backend
// core they all sit on.

mod services;

use blickwerk_core::human_errors::humanize_error;
use services::app::App;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Blickwerk starting");

    let app = App::global();

    if let Err(e) = app.ensure_initialized().await {
        let step = e.failing_step().unwrap_or("unknown");
        tracing::error!(step, error = %e, "initialisation failed");

        let human = humanize_error(&e);
        eprintln!("{}", human.message);
        eprintln!("{}", human.suggestion);
        std::process::exit(1);
    }

    println!("platform: {}", app.platform_name());
    println!("readiness: {:?}", app.readiness());
    println!("data dir: {}", app.data_dir().display());
    println!("model resource: {}", app.config().model_resource);

    if let Some(model) = app.face_match_model() {
        println!(
            "face-match model: {} bytes, sha256 {}, input {}px, embedding {}",
            model.len(),
            model.digest(),
            model.image_square_size(),
            model.embedding_len()
        );
    }

    if let Some(report) = app.startup_report() {
        for step in &report.steps {
            println!("  {}: {} ms", step.name, step.duration.as_millis());
        }
        println!("total: {} ms", report.total.as_millis());

        if let Err(e) = app.persist_last_boot(report) {
            tracing::warn!(error = %e, "could not persist last boot report");
        }
    }

    if let Err(e) = app.persist_config() {
        tracing::warn!(error = %e, "could not persist config");
    }
}
