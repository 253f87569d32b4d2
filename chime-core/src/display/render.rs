//! Screen rendering
//!
//! Builds screens for the clock face, the setup steps and the start-up
//! banner.
//!
//! Layout follows a 128x64 OLED: small rows hold 21 characters, large rows
//! half that.

use crate::settings::{AlarmSchedule, DisplayFormat};
use crate::setup::{FieldRef, SetupSession};
use crate::time::ClockTime;

use super::screen::Screen;
use super::text;

const TOP_MENU: [&str; 4] = [
    " 1. ALARM CLOCK ",
    " 2. DATE TIME ",
    " 3. DAYLIGHT ",
    " 4. DISP STYLE ",
];
const ALARM_MENU: [&str; 2] = [" 1. ALARM OFF ", " 2. ALARM ON "];
const DAYLIGHT_MENU: [&str; 3] = [" CANCEL ", " SPRING +1 HOUR ", " FALL -1 HOUR "];
const DATE_STYLE_MENU: [&str; 3] = [" 1. YYYY/MM/DD ", " 2. DD/MM/YYYY ", " 3. MM/DD/YYYY "];
const TIME_STYLE_MENU: [&str; 2] = [" 1. 24 HOUR ", " 2. 12 HOUR "];
const TEMP_UNIT_MENU: [&str; 2] = [" 1. CELSIUS ", " 2. FAHRENHEIT "];

/// Everything shown on the clock face
#[derive(Debug, Clone, Copy)]
pub struct ClockFace<'a> {
    pub time: &'a ClockTime,
    pub format: &'a DisplayFormat,
    pub alarm: &'a AlarmSchedule,
    /// RTC die temperature, hundredths of °C
    pub local_hundredths: i16,
    /// Probe temperature, hundredths of °C (fault sentinel when unreadable)
    pub probe_hundredths: i16,
}

/// Screen renderer for the clock states
#[derive(Debug, Default)]
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the start-up banner
    pub fn render_banner(&mut self) {
        self.screen.clear();
        self.screen.set_large_line(0, "CLOCK");
        self.screen.set_line(2, "Alarm, Calendar,");
        self.screen.set_line(3, "Temperature");
        self.screen.set_line(4, "Local and Probe");
    }

    /// Render the normal clock face
    pub fn render_clock_face(&mut self, face: &ClockFace<'_>) {
        let format = face.format;
        self.screen.clear();
        self.screen
            .set_line(0, &text::date_line(face.time, format.date_style));
        self.screen
            .set_large_line(1, &text::time_line(face.time, format.time_style));
        if face.alarm.enabled {
            self.screen
                .set_line(2, &text::alarm_line(face.alarm, format.time_style));
        }
        self.temperature_row(3, "Local", face.local_hundredths, format);
        self.temperature_row(4, "Probe", face.probe_hundredths, format);
    }

    fn temperature_row(
        &mut self,
        row: usize,
        label: &str,
        hundredths: i16,
        format: &DisplayFormat,
    ) {
        let mut line = text::Line::new();
        let _ = line.push_str(label);
        let _ = line.push(' ');
        let _ = line.push_str(&text::temperature_text(hundredths, format.temp_unit));
        let _ = line.push(' ');
        let _ = line.push_str(format.temp_unit.letter());
        self.screen.set_line(row, &line);
    }

    /// Render the active setup step
    pub fn render_setup(&mut self, session: &SetupSession) {
        let field = session.field();
        let value = session.value();
        self.screen.clear();

        let (heading, options): (&str, &[&str]) = match field {
            FieldRef::TopMenu => ("SELECT MENU", &TOP_MENU[..]),
            FieldRef::AlarmEnabled => ("ALARM CLOCK", &ALARM_MENU[..]),
            FieldRef::Daylight => ("DAYLIGHT ADJUST", &DAYLIGHT_MENU[..]),
            FieldRef::DateStyle => ("DATE STYLE MENU", &DATE_STYLE_MENU[..]),
            FieldRef::TimeStyle => ("TIME STYLE MENU", &TIME_STYLE_MENU[..]),
            FieldRef::TempUnit => ("TEMPERATURE UNIT", &TEMP_UNIT_MENU[..]),
            _ => {
                self.render_numeric_step(session);
                return;
            }
        };

        self.screen.set_line(0, heading);
        for (i, option) in options.iter().enumerate() {
            let row = i + 1;
            self.screen.set_line(row, option);
            self.screen.set_highlight(row, i == value as usize);
        }
    }

    fn render_numeric_step(&mut self, session: &SetupSession) {
        let field = session.field();
        let value = session.value();
        let time_style = session.working().format.time_style;

        let name = match field {
            FieldRef::Year => "YEAR",
            FieldRef::Month => "MONTH",
            FieldRef::Day => "DAY",
            FieldRef::Hour | FieldRef::AlarmHour => "HOUR",
            FieldRef::Minute | FieldRef::AlarmMinute => "MINUTE",
            _ => "LENGTH",
        };
        let shown = match field {
            FieldRef::Year => text::year_text(value),
            FieldRef::Hour => text::hour_text(value, time_style),
            _ => text::two_digits(value),
        };

        self.screen.set_line(0, "SETUP MENU");
        self.screen.set_large_line(1, name);
        self.screen.set_large_line(3, &shown);
    }
}
