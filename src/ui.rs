use iced::widget::canvas::Canvas;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input, Column, Space};
use iced::{Alignment, Background, Border, Color, Element, Length, Shadow, Size, Subscription, Theme, Vector};
use std::time::Duration;

use crate::aqi::{mock_series, StyleClass};
use crate::chart::{ChartColors, LineChart};
use crate::hover::PointerEvent;
use crate::preferences::Preferences;
use crate::sampler::LiveSampler;
use crate::series::{LiveStore, MetricKind, Series};
use crate::surface::{ChartSource, SurfaceId, Surfaces};
use crate::theme::{build_palette, Palette, ThemeVariant};
use crate::UI_FONT_MONO;

const CURRENT_CHART_HEIGHT: f32 = 240.0;
const PINNED_CHART_HEIGHT: f32 = 180.0;
const LIVE_CHART_HEIGHT: f32 = 170.0;

// ─── MESSAGE & ENUMS ───────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    ViewSelected(View),
    CitySelected(String),
    /// Re-run the fetch for the city already in the picker.
    FetchAqi,
    Pointer(SurfaceId, PointerEvent, Size),
    MediaUrlChanged(String),
    Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    AirQuality,
    LiveMonitor,
    Media,
}

impl View {
    const ALL: [View; 3] = [View::AirQuality, View::LiveMonitor, View::Media];

    fn label(&self) -> &'static str {
        match self {
            View::AirQuality => "Air Quality",
            View::LiveMonitor => "Live Monitor",
            View::Media => "Media",
        }
    }
}

/// Texts shown in the result panel after a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLabels {
    pub city: String,
    pub aqi: String,
    pub status: String,
    pub pm25: String,
    pub pm10: String,
    pub advice: &'static str,
    pub class: StyleClass,
}

// ─── APP STATE ──────────────────────────────────────────────────

pub struct AirDash {
    theme_variant: ThemeVariant,
    pal: Palette,
    refresh_interval_secs: u64,
    view: View,
    cities: Vec<String>,
    picked_city: Option<String>,
    current_selection: Option<Series>,
    summary: Option<SummaryLabels>,
    pinned: Vec<Series>,
    live: LiveStore,
    sampler: LiveSampler,
    surfaces: Surfaces,
    ticks: u64,
    media_url: String,
    now_playing: Option<String>,
}

impl AirDash {
    pub fn new() -> Self {
        let prefs = Preferences::load();
        let sampler = LiveSampler::new(prefs.sampler, prefs.network_unit);
        Self::with_sampler(prefs, sampler)
    }

    pub fn with_sampler(prefs: Preferences, sampler: LiveSampler) -> Self {
        tracing::info!(
            theme = %prefs.theme,
            refresh_secs = prefs.refresh_interval_secs,
            sampler = ?prefs.sampler,
            "loaded preferences"
        );
        let mut surfaces = Surfaces::default();
        surfaces.register(SurfaceId::Current, ChartSource::MockSelection);
        for (i, city) in prefs.pinned_cities.iter().enumerate() {
            surfaces.register(SurfaceId::Pinned(i), ChartSource::FixedCity(city.clone()));
        }
        for metric in MetricKind::ALL {
            surfaces.register(SurfaceId::Live(metric), ChartSource::LiveMetric(metric));
        }

        let mut app = Self {
            theme_variant: prefs.theme,
            pal: build_palette(prefs.theme),
            refresh_interval_secs: prefs.refresh_interval_secs,
            view: View::AirQuality,
            cities: prefs.cities,
            picked_city: None,
            current_selection: None,
            summary: None,
            pinned: prefs.pinned_cities.iter().map(|c| mock_series(c)).collect(),
            live: LiveStore::new(prefs.network_unit),
            sampler,
            surfaces,
            ticks: 0,
            media_url: String::new(),
            now_playing: None,
        };
        if let Some(city) = prefs.default_city {
            app.select_city(city);
        }
        app
    }

    pub fn title(&self) -> String {
        String::from("Air Quality Dashboard")
    }

    pub fn theme(&self) -> Theme {
        if self.theme_variant.is_light() { Theme::Light } else { Theme::Dark }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_secs(self.refresh_interval_secs)).map(|_| Message::Tick)
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick => self.tick(),
            Message::ViewSelected(view) => self.view = view,
            Message::CitySelected(city) => self.select_city(city),
            Message::FetchAqi => match self.picked_city.clone() {
                Some(city) => self.select_city(city),
                None => tracing::debug!("fetch pressed with no city selected"),
            },
            Message::Pointer(id, event, size) => self.surfaces.pointer(id, event, size),
            Message::MediaUrlChanged(url) => self.media_url = url,
            Message::Play => {
                let url = self.media_url.trim();
                if url.is_empty() {
                    tracing::debug!("play pressed with an empty url");
                } else {
                    tracing::info!(url, "loading media");
                    self.now_playing = Some(url.to_string());
                }
            }
        }
    }

    /// Generate the mock data for `city`, refresh the result labels and
    /// repaint the selection chart.
    fn select_city(&mut self, city: String) {
        let series = mock_series(&city);
        if let Some(s) = series.summary() {
            tracing::info!(
                city = %city,
                aqi = s.aqi,
                status = s.tier.label(),
                class = s.tier.style_class().css_name(),
                "fetched air quality"
            );
            self.summary = Some(SummaryLabels {
                city: city.clone(),
                aqi: s.aqi.to_string(),
                status: s.status_text(),
                pm25: s.pm25_text(),
                pm10: s.pm10_text(),
                advice: s.tier.advice(),
                class: s.tier.style_class(),
            });
        }
        self.current_selection = Some(series);
        self.picked_city = Some(city);
        self.surfaces.request_repaint(SurfaceId::Current);
    }

    /// Sample every live counter once and repaint the live charts.
    fn tick(&mut self) {
        self.ticks += 1;
        for metric in MetricKind::ALL {
            let value = self.sampler.sample(metric);
            self.live.push(metric, value);
            self.surfaces.request_repaint(SurfaceId::Live(metric));
        }
        tracing::debug!(
            tick = self.ticks,
            cpu = self.live.get(MetricKind::Cpu).latest(),
            mem = self.live.get(MetricKind::Memory).latest(),
            net = self.live.get(MetricKind::Network).latest(),
            repaints = self.surfaces.total_repaints(),
            "live sample"
        );
    }

    fn series_for(&self, source: &ChartSource) -> Option<&Series> {
        match source {
            ChartSource::MockSelection => self.current_selection.as_ref(),
            ChartSource::FixedCity(name) => self.pinned.iter().find(|s| s.name() == name),
            ChartSource::LiveMetric(metric) => Some(self.live.get(*metric)),
        }
    }

    // ─── MAIN VIEW ──────────────────────────────────────────────

    pub fn view(&self) -> Element<'_, Message> {
        let p = &self.pal;

        let header = row![
            text("Air Quality Dashboard").size(20).color(p.text),
            Space::with_width(Length::Fill),
            text(chrono::Local::now().format("%H:%M:%S").to_string())
                .size(13)
                .font(UI_FONT_MONO)
                .color(p.label),
        ]
        .align_y(Alignment::Center)
        .padding([8, 16]);

        let sidebar_bg = p.sidebar_bg;
        let border_c = p.border;
        let sidebar = container(
            Column::with_children(
                View::ALL
                    .iter()
                    .map(|&v| sidebar_item(v.label(), v, self.view, p)),
            )
            .spacing(4)
            .padding(8),
        )
        .width(180)
        .height(Length::Fill)
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(sidebar_bg)),
            border: Border { color: border_c, width: 1.0, radius: 0.0.into() },
            ..Default::default()
        });

        let content = match self.view {
            View::AirQuality => self.view_air_quality(),
            View::LiveMonitor => self.view_live(),
            View::Media => self.view_media(),
        };

        let bg = p.bg;
        container(column![
            panel_bg(header.into(), p.sidebar_bg),
            row![sidebar, scrollable(container(content).width(Length::Fill).padding(16))].height(Length::Fill),
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(bg)),
            ..Default::default()
        })
        .into()
    }

    // ─── AIR QUALITY ───────────────────────────────────────────

    fn view_air_quality(&self) -> Element<'_, Message> {
        let p = &self.pal;
        let picker = row![
            pick_list(self.cities.as_slice(), self.picked_city.as_ref(), Message::CitySelected)
                .placeholder("Select a city")
                .width(240),
            button(text("Fetch AQI")).on_press(Message::FetchAqi).style(button::primary),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let mut col = column![section_title("Check Air Quality", p), picker].spacing(12);

        if let Some(labels) = &self.summary {
            let status_c = p.tier_color(labels.class);
            let stats = row![
                stat("AQI", &labels.aqi, p.text, p),
                stat("Status", &labels.status, status_c, p),
                column![
                    text(&labels.pm25).size(13).font(UI_FONT_MONO).color(p.text),
                    text(&labels.pm10).size(13).font(UI_FONT_MONO).color(p.text),
                ]
                .spacing(4),
            ]
            .spacing(32)
            .align_y(Alignment::Center);
            col = col.push(panel(
                column![
                    text(&labels.city).size(22).color(p.text),
                    stats,
                    text(labels.advice).size(13).color(p.label),
                    self.chart(SurfaceId::Current, CURRENT_CHART_HEIGHT),
                ]
                .spacing(10)
                .into(),
                p,
            ));
        }

        col = col.push(section_title("Major Cities", p));
        for (i, series) in self.pinned.iter().enumerate() {
            col = col.push(panel(
                column![
                    text(series.name()).size(14).color(p.text),
                    self.chart(SurfaceId::Pinned(i), PINNED_CHART_HEIGHT),
                ]
                .spacing(6)
                .into(),
                p,
            ));
        }
        col.into()
    }

    // ─── LIVE ──────────────────────────────────────────────────

    fn view_live(&self) -> Element<'_, Message> {
        let p = &self.pal;
        let mut col = column![section_title("Live System Monitor", p)].spacing(12);
        for metric in MetricKind::ALL {
            let series = self.live.get(metric);
            col = col.push(panel(
                column![
                    row![
                        text(metric.title()).size(14).color(p.text),
                        Space::with_width(Length::Fill),
                        text(format!("last {} samples", series.capacity()))
                            .size(11)
                            .font(UI_FONT_MONO)
                            .color(p.label),
                    ],
                    self.chart(SurfaceId::Live(metric), LIVE_CHART_HEIGHT),
                ]
                .spacing(6)
                .into(),
                p,
            ));
        }
        col.into()
    }

    // ─── MEDIA ─────────────────────────────────────────────────

    fn view_media(&self) -> Element<'_, Message> {
        let p = &self.pal;
        let entry = row![
            text_input("Enter a media URL…", &self.media_url)
                .on_input(Message::MediaUrlChanged)
                .on_submit(Message::Play)
                .width(Length::Fill),
            button(text("Play")).on_press(Message::Play).style(button::primary),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let status: Element<Message> = match &self.now_playing {
            Some(url) => text(format!("Now playing: {url}")).size(13).color(p.text).into(),
            None => text("Nothing loaded").size(13).color(p.label).into(),
        };

        column![section_title("Media Player", p), panel(column![entry, status].spacing(10).into(), p)]
            .spacing(12)
            .into()
    }

    fn chart(&self, id: SurfaceId, height: f32) -> Element<'_, Message> {
        let Some(surface) = self.surfaces.get(id) else {
            tracing::warn!(?id, "no chart surface registered");
            return Space::new(Length::Fill, Length::Fixed(height)).into();
        };
        Canvas::new(LineChart {
            id,
            series: self.series_for(&surface.source),
            surface,
            colors: ChartColors::from(&self.pal),
        })
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .into()
    }
}

// ─── WIDGET HELPERS ────────────────────────────────────────────

fn sidebar_item<'a>(label: &'static str, target: View, current: View, p: &Palette) -> Element<'a, Message> {
    let is_active = target == current;
    let accent = p.accent;
    let text_c = p.text;
    let label_c = p.label;
    let active_bg = Color::from_rgba(accent.r, accent.g, accent.b, 0.1);
    let hover_bg = Color::from_rgba(accent.r, accent.g, accent.b, 0.05);

    button(text(label).size(14).color(if is_active { accent } else { label_c }))
        .on_press(Message::ViewSelected(target))
        .width(Length::Fill)
        .padding([10, 16])
        .style(move |_: &Theme, status| {
            let bg = match status {
                button::Status::Hovered if !is_active => hover_bg,
                _ if is_active => active_bg,
                _ => Color::TRANSPARENT,
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: text_c,
                border: Border { color: Color::TRANSPARENT, width: 0.0, radius: 4.0.into() },
                ..Default::default()
            }
        })
        .into()
}

fn stat<'a>(label: &'a str, value: &'a str, color: Color, p: &Palette) -> Element<'a, Message> {
    column![
        text(label.to_uppercase()).size(12).color(p.label),
        text(value).size(26).color(color),
    ]
    .spacing(2)
    .into()
}

fn panel<'a>(content: Element<'a, Message>, p: &Palette) -> Element<'a, Message> {
    let panel_bg = p.panel_bg;
    let border_c = p.border;
    container(content)
        .width(Length::Fill)
        .padding(16)
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(panel_bg)),
            border: Border {
                color: border_c,
                width: 1.0,
                radius: 4.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.02),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 4.0,
            },
            ..Default::default()
        })
        .into()
}

fn panel_bg<'a>(content: Element<'a, Message>, bg: Color) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .style(move |_: &Theme| container::Style {
            background: Some(Background::Color(bg)),
            ..Default::default()
        })
        .into()
}

fn section_title(label: &str, p: &Palette) -> Element<'static, Message> {
    text(label.to_string()).size(20).color(p.text).into()
}
