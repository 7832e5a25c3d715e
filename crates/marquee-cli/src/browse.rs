//! Interactive `browse` command.
//!
//! Each stdin line becomes the raw query and goes through the debouncer, so
//! lines entered in quick succession collapse into one search. `:trending`
//! reloads the trending list; `:quit` or end of input exits without waiting
//! for a pending search.

use marquee_catalogue::ControllerOptions;
use marquee_core::AppConfig;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::render_state;

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    RefreshTrending,
    Query(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        ":quit" | ":q" => Input::Quit,
        ":trending" => Input::RefreshTrending,
        _ => Input::Query(line),
    }
}

/// Run the interactive loop until `:quit` or end of input.
///
/// # Errors
///
/// Returns an error if the catalogue cannot be built or stdin fails.
pub(crate) async fn run_browse(config: &AppConfig) -> anyhow::Result<()> {
    let catalogue = marquee_catalogue::build_catalogue(config).await?;
    let handle = catalogue.spawn_controller(ControllerOptions::from_app_config(config));
    let mut states = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("Type to search. `:trending` refreshes trending, `:quit` exits.");

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => match parse_input(&line) {
                    Input::Quit => break,
                    Input::RefreshTrending => {
                        handle.refresh_trending().await;
                    }
                    Input::Query(raw) => {
                        handle.set_query(raw);
                    }
                },
                None => break,
            },
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                print!("\n{}", render_state(&state));
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
