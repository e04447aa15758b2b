//! Server-rendered HTML for the single-page UI
//!
//! The page is a plain form: a title dropdown and a submit button that reloads
//! `/?movie=<title>`. Results are rendered inline below it.

use crate::models::{MovieRecord, RecommendationResponse};

/// What to show below the form
pub enum PageBody<'a> {
    Empty,
    Results(&'a RecommendationResponse),
    Error(&'a str),
}

/// Render the full page
pub fn render_page<'a>(
    movies: impl Iterator<Item = &'a MovieRecord>,
    selected: Option<&str>,
    body: PageBody<'_>,
) -> String {
    let content = match body {
        PageBody::Empty => String::new(),
        PageBody::Results(response) => render_results(response),
        PageBody::Error(message) => format!(
            r#"<div class="error">{}</div>"#,
            html_escape(message)
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CineMate X - Movie Recommender</title>
    <style>{css}</style>
</head>
<body>
    <main>
        <h1>CineMate <span class="accent">X</span></h1>
        <p class="tagline">Choose your favorite movie and get 5 similar ones!</p>
        {form}
        {content}
    </main>
    {footer}
</body>
</html>"#,
        css = inline_css(),
        form = render_form(movies, selected),
        content = content,
        footer = render_footer(),
    )
}

fn render_form<'a>(movies: impl Iterator<Item = &'a MovieRecord>, selected: Option<&str>) -> String {
    let options: String = movies
        .map(|movie| {
            let title = html_escape(&movie.title);
            let marker = if selected == Some(movie.title.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{title}"{marker}>{title}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(
        r#"<form method="get" action="/">
        <label for="movie">Search and select a movie</label>
        <select id="movie" name="movie">
            {options}
        </select>
        <button type="submit">Recommend</button>
    </form>"#
    )
}

fn render_results(response: &RecommendationResponse) -> String {
    let cards: String = response
        .recommendations
        .iter()
        .map(|rec| {
            let trailer = match &rec.trailer_url {
                Some(url) => format!(
                    r#"<a class="trailer" href="{}" target="_blank" rel="noopener">Watch Trailer</a>"#,
                    html_escape(url)
                ),
                None => r#"<span class="no-trailer">Trailer not available</span>"#.to_string(),
            };

            format!(
                r#"<div class="card">
                <img src="{poster}" alt="{title}">
                <div class="card-title">{title}</div>
                {trailer}
            </div>"#,
                poster = html_escape(&rec.poster_url),
                title = html_escape(&rec.title),
                trailer = trailer,
            )
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(
        r#"<section class="searched">
        <h2>Your Searched Movie</h2>
        <img src="{poster}" alt="{title}">
    </section>
    <section>
        <h2>Recommended</h2>
        <div class="cards">
            {cards}
        </div>
    </section>"#,
        poster = html_escape(&response.movie.poster_url),
        title = html_escape(&response.movie.title),
        cards = cards,
    )
}

fn render_footer() -> &'static str {
    r#"<footer>
        <p><i>Made with love by Sachin</i></p>
        <p>Movie data and images from TMDB.</p>
    </footer>"#
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; font-family: sans-serif; background: linear-gradient(to right, #0f2027, #203a43, #2c5364); color: #fff; }
main { max-width: 1100px; margin: 2rem auto; padding: 2rem; background: rgba(0, 0, 0, 0.6); border-radius: 12px; }
h1 { text-align: center; color: #ff4b4b; }
.accent { color: #00bfff; }
.tagline { text-align: center; }
form { display: flex; gap: 1rem; align-items: center; flex-wrap: wrap; }
select { flex: 1; padding: 0.5rem; }
button { padding: 0.5rem 1rem; font-weight: bold; border-radius: 8px; cursor: pointer; }
.searched img { width: 200px; border-radius: 12px; }
.cards { display: grid; grid-template-columns: repeat(5, 1fr); gap: 1rem; }
.card { text-align: center; }
.card img { width: 100%; border-radius: 8px; }
.card-title { font-weight: bold; margin: 0.5rem 0; }
.trailer { display: inline-block; padding: 8px 14px; color: #fff; text-decoration: none; background: linear-gradient(135deg, #e50914, #b81d24); border-radius: 10px; }
.no-trailer { color: #bbb; font-size: 0.9em; }
.error { margin-top: 1rem; padding: 1rem; background: #5c1a1a; border-radius: 8px; }
footer { text-align: center; margin: 3rem 0 1rem; }
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
