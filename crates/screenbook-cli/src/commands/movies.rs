use color_eyre::Result;
use comfy_table::Table;

use crate::commands::{fail, Service};
use crate::output::Output;

pub async fn run_movies(service: &Service, output: &Output) -> Result<()> {
    let movies = service.movies().await.map_err(fail)?;

    if output.is_human() {
        let mut table = Table::new();
        table.set_header(vec!["ID", "Title", "Director", "Rating"]);
        for movie in &movies {
            table.add_row(vec![
                movie.id.clone(),
                movie.title.clone(),
                movie.director.clone(),
                format!("{:.1}", movie.rating),
            ]);
        }
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        println!("{table}");
    } else {
        output.json(&serde_json::to_value(&movies)?);
    }

    Ok(())
}

pub async fn run_movie(movie_id: &str, service: &Service, output: &Output) -> Result<()> {
    let movie = service.movie(movie_id).await.map_err(fail)?;

    output.info(format!(
        "{} (directed by {}, rated {:.1})",
        movie.title, movie.director, movie.rating
    ));
    output.json(&serde_json::to_value(&movie)?);
    Ok(())
}

pub async fn run_showtimes(service: &Service, output: &Output) -> Result<()> {
    let schedule = service.schedule().await.map_err(fail)?;

    if output.is_human() {
        let mut table = Table::new();
        table.set_header(vec!["Date", "Movies"]);
        for slot in &schedule {
            table.add_row(vec![slot.date.clone(), slot.movies.join(", ")]);
        }
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        println!("{table}");
    } else {
        output.json(&serde_json::to_value(&schedule)?);
    }

    Ok(())
}

pub async fn run_rate(
    user_id: &str,
    movie_id: &str,
    rating: &str,
    service: &Service,
    output: &Output,
) -> Result<()> {
    let movie = service
        .rate_movie(user_id, movie_id, rating)
        .await
        .map_err(fail)?;

    output.success(format!("{} now rated {:.1}", movie.title, movie.rating));
    output.json(&serde_json::to_value(&movie)?);
    Ok(())
}
