#![windows_subsystem = "windows"]

mod aqi;
mod chart;
mod error;
mod hover;
mod preferences;
mod ringbuf;
mod sampler;
mod scene;
mod series;
mod surface;
pub mod theme;
mod ui;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ui::AirDash;

pub const UI_FONT: iced::Font = iced::Font::DEFAULT;

pub const UI_FONT_MONO: iced::Font = iced::Font::MONOSPACE;

pub const UI_FONT_BOLD: iced::Font = iced::Font {
    weight: iced::font::Weight::Bold,
    ..iced::Font::DEFAULT
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting airdash");

    iced::application(AirDash::title, AirDash::update, AirDash::view)
        .subscription(AirDash::subscription)
        .theme(AirDash::theme)
        .default_font(UI_FONT)
        .window(iced::window::Settings {
            size: (1000.0, 720.0).into(),
            #[cfg(target_os = "linux")]
            platform_specific: iced::window::settings::PlatformSpecific {
                application_id: String::from("airdash"),
                ..Default::default()
            },
            ..Default::default()
        })
        .run_with(|| (AirDash::new(), iced::Task::none()))
        .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
