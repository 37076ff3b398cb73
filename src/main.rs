mod app;
mod config;
mod error;
mod host;
mod logging;
mod recipe_core;
mod recipe_doc;
mod session;

use app::*;
use leptos::prelude::*;

fn main() {
    let search = window().location().search().unwrap_or_default();
    logging::init(&config::EditorConfig::from_query(&search));
    mount_to_body(|| view! { <App/> })
}
