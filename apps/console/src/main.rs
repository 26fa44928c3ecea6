mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    HttpBackend, MemoryBackend, PersistenceBackend, TableController, DEFAULT_PAGE_SIZE,
};
use shared::domain::{College, Student};

#[derive(Parser, Debug)]
struct Args {
    /// Search query applied to the college table before rendering.
    #[arg(long, default_value = "")]
    query: String,
    /// Talk to the configured admin server instead of the in-memory seed.
    #[arg(long)]
    server_backed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings();

    let backend: Arc<dyn PersistenceBackend> = if args.server_backed {
        Arc::new(HttpBackend::new(
            &settings.server_url,
            settings.csrf_token.clone(),
        )?)
    } else {
        let seed = sample_colleges();
        Arc::new(MemoryBackend::with_seed(seed.as_slice()))
    };

    let colleges: Arc<TableController<College>> = TableController::new(backend);
    colleges.load(None).await;
    colleges.set_query(args.query.as_str()).await;
    println!("colleges table:");
    println!("{}", colleges.render_table().await);

    let students: Arc<TableController<Student>> =
        TableController::with_pagination(Arc::new(MemoryBackend::new()), DEFAULT_PAGE_SIZE);
    students.load(Some(Vec::new())).await;
    println!("students table:");
    println!("{}", students.render_table().await);
    if let Some(pagination) = students.render_pagination().await {
        println!("pagination:");
        println!("{pagination}");
    }

    Ok(())
}

fn sample_colleges() -> Vec<College> {
    [
        ("CCS", "College of Computer Studies"),
        ("COE", "College of Engineering"),
        ("CBAA", "College of Business Administration and Accountancy"),
        ("CAS", "College of Arts and Sciences"),
    ]
    .into_iter()
    .map(|(code, name)| College {
        id: None,
        code: code.into(),
        name: name.into(),
    })
    .collect()
}
