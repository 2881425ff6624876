//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sparktasks_core` linkage.
//! - Optionally summarize a SparkTasks database: `sparktasks_cli [db_path]`.
//! - Keep output deterministic for quick local sanity checks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sparktasks_core::db::open_db;
use sparktasks_core::{keys, AppService, KeyValueStore, LoadStatus, SqliteKvStore};
use std::process::ExitCode;

const QUOTE_SEED: u64 = 0;

fn main() -> ExitCode {
    println!("sparktasks_core ping={}", sparktasks_core::ping());
    println!("sparktasks_core version={}", sparktasks_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match summarize(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sparktasks_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(db_path: &str) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("db open failed: {err}"))?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| err.to_string())?;
    let app = AppService::open(&kv, &mut StdRng::seed_from_u64(QUOTE_SEED))
        .map_err(|err| err.to_string())?;

    let snapshot = app.dashboard();
    println!("db={db_path}");
    println!(
        "tasks total={} completed={}",
        snapshot.total_tasks, snapshot.completed_tasks
    );
    println!("notes={}", snapshot.notes);
    println!("favorite_quotes={}", app.quotes().favorites().len());
    println!("activities={}", app.activities().len());

    for (key, status) in [
        (keys::TASKS, app.tasks().load_status()),
        (keys::NOTES, app.notes().load_status()),
        (keys::FAVORITE_QUOTES, app.quotes().load_status()),
        (keys::ACTIVITIES, app.activities().load_status()),
    ] {
        if let LoadStatus::Corrupt(reason) = status {
            println!("warning key={key} status=corrupt reason={reason}");
        }
    }

    let user_name = app.preferences().user_name().map_err(|err| err.to_string())?;
    println!("user_name={user_name}");
    println!(
        "stored_keys={}",
        kv.keys().map_err(|err| err.to_string())?.len()
    );
    let onboarding = kv
        .get(keys::HAS_COMPLETED_ONBOARDING)
        .map_err(|err| err.to_string())?
        .is_some();
    println!("onboarding_recorded={onboarding}");
    Ok(())
}
