use tracing::info;

use super::show_service::{ShowService, StoreError};

pub const DEMO_SHOWS: &[&str] = &[
    "Breaking Bad",
    "The Wire",
    "Mad Men",
    "The Sopranos",
    "Game of Thrones",
];

/// Insert the demo shows into an empty database. Returns how many were added.
pub async fn seed_demo_data(service: &ShowService) -> Result<usize, StoreError> {
    if service.count_shows().await? > 0 {
        info!("Shows already present, skipping demo seed");
        return Ok(0);
    }

    for title in DEMO_SHOWS {
        service.create_show(title).await?;
    }

    info!(count = DEMO_SHOWS.len(), "Demo data seeded");
    Ok(DEMO_SHOWS.len())
}
