//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `staffdesk_core` linkage and
//!   schema bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use staffdesk_core::db::migrations::latest_version;
use staffdesk_core::db::open_db_in_memory;

fn main() {
    println!("staffdesk_core version={}", staffdesk_core::core_version());
    match open_db_in_memory() {
        Ok(_conn) => {
            println!("staffdesk_core schema_version={}", latest_version());
        }
        Err(err) => {
            eprintln!("staffdesk_core bootstrap failed: {err}");
            std::process::exit(1);
        }
    }
}
