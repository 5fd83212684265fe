//! Terminal output: the title banner and the hourly rain table.

use chrono::{DateTime, TimeZone, Utc};
use crossterm::style::{Color, Stylize};
use raincheck_core::{Hour, WeatherResponse};
use std::{
    fmt::Display,
    io::{IsTerminal, Write},
};

const LOGO: &str = r"  _______ _(_)__  ____/ /  ___ ____/ /__
 / __/ _ '/ / _ \/ __/ _ \/ -_) __/  '_/
/_/  \_,_/_/_//_/\__/_//_/\__/\__/_/\_\";

const PROJECT_NAME: &str = "github/kezanwar/raincheck-cli-tool";
const PROJECT_URL: &str = "https://www.github.com/kezanwar/raincheck-cli-tool";

const HEADER: &str = "🕛 Time        🌡️  Temp       🌧️  Chance Of Rain        ⛅️ Condition";
const SEPARATOR: &str = "----------------------------------------------------------------------";

/// Column widths the numeric fields are padded to.
const TEMP_WIDTH: usize = 2;
const CHANCE_WIDTH: usize = 3;

/// Rows above this chance of rain are drawn in red.
const RAIN_THRESHOLD: f64 = 40.0;

/// Whether the output is a terminal. Escapes are only emitted when it is.
pub fn use_escapes() -> bool {
    std::io::stdout().is_terminal()
}

/// Turn crossterm styling off for the whole process when stdout isn't a terminal.
pub fn init_colors() {
    if !use_escapes() {
        crossterm::style::force_color_output(false);
    }
}

pub fn render_title(
    out: &mut impl Write,
    weather: &WeatherResponse,
    links: bool,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "{}", LOGO.dark_cyan())?;
    writeln!(out)?;
    writeln!(out, "🔗 {}", project_link(links).dark_cyan())?;
    writeln!(out)?;
    writeln!(out, "{}", title(weather).dark_magenta())?;
    writeln!(out)?;
    writeln!(out, "{}", HEADER.dark_magenta())?;
    writeln!(out)?;
    Ok(())
}

/// One row per hour that hasn't started yet, in forecast order.
///
/// The separator is left off only after the last hour of the full day, so
/// skipped hours don't move it.
pub fn render_hours<Tz>(
    out: &mut impl Write,
    hours: &[Hour],
    now: DateTime<Utc>,
    tz: &Tz,
) -> std::io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let last = hours.len().saturating_sub(1);

    for (i, hour) in hours.iter().enumerate() {
        if hour.is_before(now) {
            continue;
        }

        writeln!(out, "{}", hour_line(hour, tz).with(rain_color(hour.chance_of_rain)))?;

        if i != last {
            writeln!(out, "{}", SEPARATOR.grey())?;
        } else {
            writeln!(out)?;
        }
    }

    Ok(())
}

pub fn title(weather: &WeatherResponse) -> String {
    format!(
        "{}, {}: {:.0}° {}",
        weather.location.name,
        weather.location.country,
        weather.current.temp_c,
        weather.current.condition.text
    )
}

pub fn hour_line<Tz>(hour: &Hour, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = tz
        .timestamp_opt(hour.time_epoch, 0)
        .single()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default();

    let temp = floored(hour.temp_c);
    let chance = floored(hour.chance_of_rain);

    format!(
        "{time}             {temp}°  {}               {chance}% {}           {}",
        padding(TEMP_WIDTH, &temp),
        padding(CHANCE_WIDTH, &chance),
        hour.condition.text
    )
}

/// Standard red or green (palette entries 1 and 2, what SGR 31/32 select).
pub fn rain_color(chance_of_rain: f64) -> Color {
    if chance_of_rain > RAIN_THRESHOLD { Color::DarkRed } else { Color::DarkGreen }
}

fn floored(value: f64) -> String {
    (value.floor() as i64).to_string()
}

fn padding(width: usize, text: &str) -> String {
    " ".repeat(width.saturating_sub(text.len()))
}

/// OSC 8 hyperlink on a terminal, plain `text (url)` otherwise.
fn project_link(links: bool) -> String {
    if links {
        format!("\x1b]8;;{PROJECT_URL}\x07{PROJECT_NAME}\x1b]8;;\x07")
    } else {
        format!("{PROJECT_NAME} ({PROJECT_URL})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raincheck_core::{Condition, Current, Location};

    const START: i64 = 1_700_006_400; // 2023-11-15 00:00 UTC

    fn hour(offset: i64, temp_c: f64, chance_of_rain: f64, text: &str) -> Hour {
        Hour {
            time_epoch: START + offset * 3600,
            temp_c,
            chance_of_rain,
            condition: Condition { text: text.into(), ..Condition::default() },
            ..Hour::default()
        }
    }

    fn day() -> Vec<Hour> {
        (0..24).map(|h| hour(h, 10.0, 0.0, &format!("hour {h}"))).collect()
    }

    fn at(offset_hours: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(START + offset_hours * 3600, 0).unwrap()
    }

    fn render(hours: &[Hour], now: DateTime<Utc>) -> String {
        let mut out = Vec::new();
        render_hours(&mut out, hours, now, &Utc).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn temperature_is_floored_not_rounded() {
        let line = hour_line(&hour(0, 9.9, 0.0, "Sunny"), &Utc);
        assert!(line.contains(" 9°"), "{line}");
        assert!(!line.contains("10°"));

        assert_eq!(floored(-0.5), "-1");
        assert_eq!(floored(40.99), "40");
    }

    #[test]
    fn row_layout_pads_numeric_columns() {
        let line = hour_line(&hour(13, 9.2, 5.0, "Cloudy"), &Utc);
        assert_eq!(
            line,
            "13:00             9°                  5%              Cloudy"
        );

        let line = hour_line(&hour(14, 12.0, 100.0, "Heavy rain"), &Utc);
        assert_eq!(
            line,
            "14:00             12°                 100%            Heavy rain"
        );
    }

    #[test]
    fn rain_color_boundary_is_forty() {
        assert_eq!(rain_color(40.0), Color::DarkGreen);
        assert_eq!(rain_color(41.0), Color::DarkRed);
        assert_eq!(rain_color(0.0), Color::DarkGreen);
    }

    #[test]
    fn past_hours_are_skipped_in_order() {
        let output = render(&day(), at(20));

        let rows: Vec<&str> = output.lines().filter(|l| l.contains("hour ")).collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].contains("20:00") && rows[0].contains("hour 20"));
        assert!(rows[3].contains("23:00") && rows[3].contains("hour 23"));
        assert!(!output.contains("hour 19"));
    }

    #[test]
    fn hour_starting_now_is_kept() {
        let output = render(&day(), at(23));
        assert!(output.contains("hour 23"));
        assert!(!output.contains("hour 22"));
    }

    #[test]
    fn separator_follows_every_row_but_the_days_last() {
        let output = render(&day(), at(21));

        assert_eq!(output.matches(SEPARATOR).count(), 2);
        assert!(output.ends_with("\n\n"));
    }

    #[test]
    fn separator_keys_off_the_full_day() {
        let mut hours = day();
        hours[23].time_epoch = START - 3600;

        let output = render(&hours, at(22));

        assert!(output.contains("hour 22"));
        assert!(!output.contains("hour 23"));
        assert_eq!(output.matches(SEPARATOR).count(), 1);
    }

    #[test]
    fn all_past_renders_nothing() {
        assert!(render(&day(), at(24)).is_empty());
    }

    #[test]
    fn title_banner_and_header() {
        let weather = WeatherResponse {
            location: Location {
                name: "Manchester".into(),
                country: "United Kingdom".into(),
                ..Location::default()
            },
            current: Current {
                temp_c: 9.6,
                condition: Condition { text: "Light rain".into(), ..Condition::default() },
                ..Current::default()
            },
            ..WeatherResponse::default()
        };

        assert_eq!(title(&weather), "Manchester, United Kingdom: 10° Light rain");

        let mut out = Vec::new();
        render_title(&mut out, &weather, true).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("\n\n"));
        assert!(output.contains("Manchester, United Kingdom: 10° Light rain"));
        assert!(output.contains("Chance Of Rain"));
        assert!(output.contains(&format!("\x1b]8;;{PROJECT_URL}\x07")));
    }

    #[test]
    fn link_falls_back_to_plain_text_off_terminal() {
        let mut out = Vec::new();
        render_title(&mut out, &WeatherResponse::default(), false).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(!output.contains("\x1b]8"));
        assert!(output.contains(&format!("{PROJECT_NAME} ({PROJECT_URL})")));
    }
}
