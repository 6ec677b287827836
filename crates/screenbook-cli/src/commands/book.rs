use booking_models::{BookingRequest, MovieRef};
use color_eyre::Result;
use comfy_table::Table;

use crate::commands::{fail, Service};
use crate::output::Output;

pub async fn run_book(
    user_id: &str,
    date: &str,
    movie: &str,
    service: &Service,
    output: &Output,
) -> Result<()> {
    let request = BookingRequest {
        date: date.to_string(),
        movie: movie.to_string(),
    };

    let dates = service.add_booking(user_id, &request).await.map_err(fail)?;

    output.success(format!("Booked {} on {}", movie, date));
    if output.is_human() {
        let mut table = Table::new();
        table.set_header(vec!["Date", "Movies"]);
        for entry in &dates {
            table.add_row(vec![entry.date.clone(), entry.movies.join(", ")]);
        }
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        println!("{table}");
    } else {
        output.json(&serde_json::to_value(&dates)?);
    }

    Ok(())
}

pub async fn run_bookings(
    user_id: Option<&str>,
    all: bool,
    service: &Service,
    output: &Output,
) -> Result<()> {
    if all {
        let records = service.all_bookings().await.map_err(fail)?;
        if output.is_human() {
            let mut table = Table::new();
            table.set_header(vec!["User", "Date", "Movies"]);
            for record in &records {
                for entry in &record.dates {
                    table.add_row(vec![
                        record.user_id.clone(),
                        entry.date.clone(),
                        entry.movies.join(", "),
                    ]);
                }
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{table}");
        } else {
            output.json(&serde_json::to_value(&records)?);
        }
        return Ok(());
    }

    // clap guarantees a user id when --all is absent
    let Some(user_id) = user_id else {
        return Ok(());
    };

    let enriched = service.bookings_for_user(user_id).await.map_err(fail)?;

    if enriched.is_empty() {
        output.info("No bookings yet");
    }

    if output.is_human() {
        for entry in &enriched {
            output.info(format!("{}:", entry.date));
            for movie in &entry.movies {
                match movie {
                    MovieRef::Resolved(m) => {
                        output.info(format!("  {}: {} ({:.1})", m.id, m.title, m.rating))
                    }
                    MovieRef::Stub { id } => {
                        output.info(format!("  {}: no longer in the catalog", id))
                    }
                }
            }
        }
    } else {
        output.json(&serde_json::to_value(&enriched)?);
    }

    Ok(())
}
