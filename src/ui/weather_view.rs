//! Main screen rendering
//!
//! Search box on top, the weather panel in the middle and the clock at the
//! bottom. The whole screen is tinted by the weather category.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::WeatherCategory;
use crate::input::PLACEHOLDER;
use crate::presentation::{DisplayState, WeatherView};

/// Background and foreground for a weather category
pub fn category_style(category: Option<WeatherCategory>) -> Style {
    match category {
        Some(WeatherCategory::Rainy) => Style::default().bg(Color::Blue).fg(Color::White),
        Some(WeatherCategory::Snowy) => Style::default().bg(Color::Gray).fg(Color::Black),
        Some(WeatherCategory::Foggy) => Style::default().bg(Color::DarkGray).fg(Color::White),
        Some(WeatherCategory::Sunny) => Style::default().bg(Color::Yellow).fg(Color::Black),
        Some(WeatherCategory::Cloudy) => Style::default().bg(Color::Cyan).fg(Color::Black),
        None => Style::default(),
    }
}

/// Renders the main screen
pub fn render(frame: &mut Frame, app: &App) {
    let state = app.display_state();
    let base = category_style(state.category);
    let area = frame.area();

    let background = Block::default().style(base);
    frame.render_widget(background, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // Weather panel
            Constraint::Length(3), // Clock
        ])
        .split(area);

    render_search(frame, app, base, chunks[0]);
    render_weather(frame, &state, base, chunks[1]);
    render_clock(frame, &state, base, chunks[2]);
}

fn render_search(frame: &mut Frame, app: &App, base: Style, area: Rect) {
    let title = if app.is_loading() {
        " Searching... "
    } else {
        " Search "
    };

    let text = if app.input.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, base.add_modifier(Modifier::DIM)))
    } else {
        Line::from(vec![
            Span::styled(app.input.text().to_string(), base),
            Span::styled("_", base.add_modifier(Modifier::SLOW_BLINK)),
        ])
    };

    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(" Enter: search  Tab: °C/°F  F1: help ").right_aligned())
        .borders(Borders::ALL)
        .style(base);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_weather(frame: &mut Frame, state: &DisplayState, base: Style, area: Rect) {
    let lines = match &state.weather {
        Some(view) => weather_lines(view, base),
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Type a city and press Enter",
                base.add_modifier(Modifier::DIM),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines)
        .style(base)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE).style(base));

    frame.render_widget(paragraph, area);
}

fn weather_lines(view: &WeatherView, base: Style) -> Vec<Line<'static>> {
    let bold = base.add_modifier(Modifier::BOLD);

    vec![
        Line::from(""),
        Line::from(Span::styled(view.location.clone(), bold)),
        Line::from(format!("{}  {}", view.icon, view.description)),
        Line::from(Span::styled(view.icon_url.clone(), base.add_modifier(Modifier::DIM))),
        Line::from(""),
        Line::from(Span::styled(format!("Temperature: {}", view.temperature), bold)),
        Line::from(format!("[Tab] {}", view.unit_label)),
        Line::from(""),
        Line::from(vec![
            detail("Min Temp", &view.min_temp),
            Span::raw("   "),
            detail("Max Temp", &view.max_temp),
        ]),
        Line::from(vec![
            detail("Wind", &view.wind),
            Span::raw("   "),
            detail("Humidity", &view.humidity),
        ]),
    ]
}

fn detail(label: &str, value: &str) -> Span<'static> {
    Span::raw(format!("{}: {}", label, value))
}

fn render_clock(frame: &mut Frame, state: &DisplayState, base: Style, area: Rect) {
    let clock = Paragraph::new(state.clock.clone())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).style(base));

    frame.render_widget(clock, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Phase;
    use crate::data::{TemperatureUnit, WeatherReading};
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> (String, Vec<Color>) {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        let backgrounds = buffer.content().iter().map(|cell| cell.bg).collect();
        (content, backgrounds)
    }

    fn reading(code: u32) -> WeatherReading {
        WeatherReading {
            city: "Paris".to_string(),
            country: "FR".to_string(),
            description: "light rain".to_string(),
            icon: "10d".to_string(),
            temperature: 300.0,
            temp_min: 289.15,
            temp_max: 291.15,
            wind_speed: 4.1,
            humidity: 81,
            condition_code: code,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_state_shows_placeholder() {
        let app = App::new();
        let (content, backgrounds) = render_to_string(&app);

        assert!(content.contains(PLACEHOLDER));
        assert!(content.contains("Type a city"));
        assert!(!content.contains("Temperature"));
        assert!(backgrounds.iter().all(|bg| *bg == Color::Reset));
    }

    #[test]
    fn test_loaded_state_shows_reading() {
        let mut app = App::new();
        app.reading = Some(reading(500));
        app.phase = Phase::Loaded;

        let (content, backgrounds) = render_to_string(&app);

        assert!(content.contains("Paris, FR"));
        assert!(content.contains("light rain"));
        assert!(content.contains("http://openweathermap.org/img/wn/10d.png"));
        assert!(content.contains("Temperature: 27 °C"));
        assert!(content.contains("Celsius"));
        assert!(content.contains("Min Temp: 16 °C"));
        assert!(content.contains("Max Temp: 18 °C"));
        assert!(content.contains("Wind: 4.1 m/s"));
        assert!(content.contains("Humidity: 81%"));
        assert!(backgrounds.iter().any(|bg| *bg == Color::Blue));
    }

    #[test]
    fn test_fahrenheit_rendering() {
        let mut app = App::with_unit(TemperatureUnit::Fahrenheit);
        app.reading = Some(reading(800));

        let (content, backgrounds) = render_to_string(&app);

        assert!(content.contains("Temperature: 80 °F"));
        assert!(content.contains("Fahrenheit"));
        assert!(backgrounds.iter().any(|bg| *bg == Color::Yellow));
    }

    #[test]
    fn test_loading_title() {
        let mut app = App::new();
        app.search_city("Paris");

        let (content, _) = render_to_string(&app);
        assert!(content.contains("Searching..."));
        assert!(content.contains("Paris"));
    }

    #[test]
    fn test_clock_is_rendered() {
        let app = App::new();
        let (content, _) = render_to_string(&app);
        assert!(content.contains(&app.display_state().clock));
    }

    #[test]
    fn test_category_styles_are_distinct() {
        let categories = [
            WeatherCategory::Rainy,
            WeatherCategory::Snowy,
            WeatherCategory::Foggy,
            WeatherCategory::Sunny,
            WeatherCategory::Cloudy,
        ];
        for (i, a) in categories.iter().enumerate() {
            for b in categories.iter().skip(i + 1) {
                assert_ne!(category_style(Some(*a)).bg, category_style(Some(*b)).bg);
            }
        }
        assert_eq!(category_style(None), Style::default());
    }
}
