use tablegen::config::AppConfig;
use tablegen::ui::app::App;

fn main() {
    let config = AppConfig::from_env();
    if let Err(err) = dioxus::logger::init(config.log_level) {
        eprintln!("failed to initialise logging: {err}");
    }
    tracing::info!(language = config.language.code(), "starting table generator");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new()
                    .with_title("Table Generator")
                    .with_inner_size(dioxus::desktop::LogicalSize::new(900.0, 600.0)),
            ),
        )
        .launch(App);
}
