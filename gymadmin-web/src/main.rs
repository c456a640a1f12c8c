//! GymAdmin browser console: yew entry point.

mod app;
mod components;
mod pages;
mod routes;
mod telemetry;


use app::App;
use console::ConsoleConfig;
use yew::Renderer;

fn main() {
    // Surface panics in the browser console with their location.
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic");
        web_sys::console::error_1(&format!("Panic: {payload}").into());
        if let Some(location) = info.location() {
            web_sys::console::error_1(
                &format!(
                    "  at {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                )
                .into(),
            );
        }
    }));

    telemetry::init(&ConsoleConfig::new());
    tracing::info!("starting GymAdmin console");

    Renderer::<App>::new().render();
}
