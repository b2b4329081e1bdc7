use std::time::Duration;

use anyhow::{bail, Context, Result};
use nearby_app::{App, AppEvent};
use nearby_core::Config;

/// Upper bound for any single wait on the backend or positioning source
const WAIT_LIMIT: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    nearby_core::init()?;

    let (mut config, _) = Config::load_validated()?;

    // A place name on the command line wins over configured positioning
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if !query.trim().is_empty() {
        config.location.latitude = None;
        config.location.longitude = None;
        config.location.query = Some(query);
    }

    let mut app = App::from_config(config)?;
    tracing::info!("Nearby started");

    app.start();
    tokio::time::timeout(
        WAIT_LIMIT,
        app.wait_until(|s| s.position.is_some() || s.location_error.is_some()),
    )
    .await
    .context("Timed out waiting for a location")?;

    if let Some(error) = &app.state().location_error {
        bail!("{}", error.user_message());
    }

    println!("{}", app.state().location_label());

    app.generate();
    tokio::time::timeout(
        WAIT_LIMIT,
        app.wait_for_event(|e| {
            matches!(
                e,
                AppEvent::GenerateSucceeded(_) | AppEvent::GenerateFailed(_)
            )
        }),
    )
    .await
    .context("Timed out waiting for ideas")?;

    let state = app.state();
    if let Some(error) = state.visible_error() {
        bail!("{}", error.user_message());
    }

    if state.show_empty_state() {
        println!("No ideas yet. Try widening your filters.");
    }

    for idea in &state.ideas {
        println!();
        println!("{} [{}] {}", idea.title, idea.category, idea.cost);
        if !idea.why_today.is_empty() {
            println!("  {}", idea.why_today);
        }
        for link in &idea.links {
            println!("  {}: {}", link.name, link.url);
        }
    }

    Ok(())
}
