//! # DTO Sample
//!
//! Converts one author of the demo store into an [`AuthorDto`] and prints it as JSON.
//!
//! ```text
//! RUST_LOG=debug cargo run -p dto-sample -- 2
//! ```
//!
//! The optional argument is the author id (default `1`).

use dto_framework::tracing::setup_tracing;
use dto_framework::Converter;
use dto_sample::dto::AuthorDto;
use dto_sample::queries::author_profile;
use dto_sample::store;
use std::error::Error;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let author_id: i64 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .map_err(|e| format!("invalid author id '{arg}': {e}"))?,
        None => 1,
    };

    info!(author_id, "Loading demo store");
    let store = store::demo();

    let profile: AuthorDto = match author_profile(&store, &Converter::new(), author_id) {
        Ok(profile) => profile,
        Err(e) => {
            error!(error = %e, "Profile conversion failed");
            return Err(e.into());
        }
    };

    info!(posts = profile.posts.len(), "Profile converted");
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
