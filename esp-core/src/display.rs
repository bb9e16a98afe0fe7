//! Status-Display mit Abschalt-Watchdog
//!
//! Priorität beim Rendern: Mute-Icon > Kommando-Overlay > Lautstärke-Zahl.
//! Die beiden Verbindungs-Icons werden immer in den unteren Ecken gezeichnet.

use core::fmt::Write;

use heapless::String;

use crate::config::{AmpConfig, Millis};
use crate::icons;
use crate::traits::{DisplaySurface, Font, Glyph};
use crate::volume::VolumeSnapshot;

/// Display-Breite in Pixeln (SSD1306 128x64)
pub const DISPLAY_WIDTH: i32 = 128;
/// Display-Höhe in Pixeln
pub const DISPLAY_HEIGHT: i32 = 64;

const CENTER_X: i32 = DISPLAY_WIDTH / 2;
const STATUS_ICON_Y: i32 = DISPLAY_HEIGHT - 15;
const BROKER_ICON_X: i32 = 0;
const WIFI_ICON_X: i32 = DISPLAY_WIDTH - 15;
const SUBTITLE_Y: i32 = 40;

/// Zuletzt gezeichneter Hauptinhalt (für Tests und Logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Volume(u8),
    Command(u8),
    Muted,
    Blank,
}

#[derive(Debug)]
pub struct DisplayPresenter<D: DisplaySurface> {
    surface: D,
    last_activity: Millis,
    is_blanked: bool,
    transient_command: Option<u8>,
    broker_connected: bool,
    link_up: bool,
    timeout_ms: Millis,
    blank_while_muted: bool,
    screen: Screen,
}

impl<D: DisplaySurface> DisplayPresenter<D> {
    pub fn new(surface: D, config: &AmpConfig) -> Self {
        Self {
            surface,
            last_activity: 0,
            is_blanked: false,
            transient_command: None,
            broker_connected: false,
            link_up: false,
            timeout_ms: config.display_timeout_ms,
            blank_while_muted: config.blank_while_muted,
            screen: Screen::Blank,
        }
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn is_blanked(&self) -> bool {
        self.is_blanked
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn last_activity(&self) -> Millis {
        self.last_activity
    }

    /// (WLAN-Link, Broker)
    pub fn connectivity(&self) -> (bool, bool) {
        (self.link_up, self.broker_connected)
    }

    /// Aktualisiert die Verbindungs-Icons (sichtbar ab dem nächsten Rendern)
    pub fn set_connectivity(&mut self, link_up: bool, broker_connected: bool) -> bool {
        let changed = self.link_up != link_up || self.broker_connected != broker_connected;
        self.link_up = link_up;
        self.broker_connected = broker_connected;
        changed
    }

    /// Boot-Bildschirm mit Titel und Untertitel
    pub fn show_splash(&mut self, title: &str, subtitle: &str, now: Millis) {
        self.surface.clear();
        self.surface.draw_text(CENTER_X, 0, Font::Large, title);
        self.surface.draw_text(CENTER_X, SUBTITLE_Y, Font::Small, subtitle);
        self.present();
        self.screen = Screen::Splash;
        self.touch(now);
    }

    /// Kommando einmalig anstelle der Lautstärke anzeigen
    pub fn show_command(&mut self, command: u8, volume: &VolumeSnapshot, now: Millis) {
        self.transient_command = Some(command);
        self.render(volume, now);
    }

    /// Zeichnet den aktuellen Zustand und setzt den Inaktivitäts-Timer zurück
    pub fn render(&mut self, volume: &VolumeSnapshot, now: Millis) {
        self.surface.clear();

        // Overlay wird auch im Mute-Modus verbraucht
        let command = self.transient_command.take();
        let mut text: String<8> = String::new();

        self.screen = if volume.muted {
            let glyph = icons::MUTE;
            let x = CENTER_X - i32::from(glyph.width) / 2;
            self.surface.draw_glyph(x, 8, &glyph);
            Screen::Muted
        } else if let Some(command) = command {
            let _ = write!(text, "C{}", command);
            self.surface.draw_text(CENTER_X, 0, Font::Large, &text);
            Screen::Command(command)
        } else {
            let _ = write!(text, "{}", volume.user_volume);
            self.surface.draw_text(CENTER_X, 0, Font::Large, &text);
            Screen::Volume(volume.user_volume)
        };

        let broker: &Glyph = if self.broker_connected {
            &icons::BROKER_OK
        } else {
            &icons::BROKER_FAILED
        };
        let wifi: &Glyph = if self.link_up {
            &icons::WIFI_ON
        } else {
            &icons::WIFI_OFF
        };
        self.surface.draw_glyph(BROKER_ICON_X, STATUS_ICON_Y, broker);
        self.surface.draw_glyph(WIFI_ICON_X, STATUS_ICON_Y, wifi);

        self.present();
        self.touch(now);
    }

    /// Tastendruck ohne eigene Anzeige: Inaktivitäts-Timer zurücksetzen
    ///
    /// Ein bereits abgeschaltetes Display wird neu gezeichnet.
    pub fn wake(&mut self, volume: &VolumeSnapshot, now: Millis) {
        if self.is_blanked {
            self.render(volume, now);
        } else {
            self.touch(now);
        }
    }

    /// Watchdog: muss jeden Tick aufgerufen werden, `true` wenn gerade abgeschaltet
    pub fn poll_blank(&mut self, muted: bool, now: Millis) -> bool {
        if self.is_blanked || (muted && !self.blank_while_muted) {
            return false;
        }
        if now.saturating_sub(self.last_activity) <= self.timeout_ms {
            return false;
        }

        debug!("Display: blanking after {} ms idle", self.timeout_ms);
        self.surface.clear();
        self.present();
        self.is_blanked = true;
        self.screen = Screen::Blank;
        true
    }

    fn touch(&mut self, now: Millis) {
        self.last_activity = now;
        self.is_blanked = false;
    }

    fn present(&mut self) {
        if let Err(e) = self.surface.present() {
            warn!("Display: present failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DisplayError;

    #[derive(Default)]
    struct RecordingSurface {
        texts: heapless::Vec<String<16>, 8>,
        glyphs: heapless::Vec<(i32, i32, u16), 8>,
        presents: usize,
    }

    impl DisplaySurface for RecordingSurface {
        fn clear(&mut self) {
            self.texts.clear();
            self.glyphs.clear();
        }

        fn draw_text(&mut self, _x: i32, _y: i32, _font: Font, text: &str) {
            let _ = self.texts.push(String::try_from(text).unwrap());
        }

        fn draw_glyph(&mut self, x: i32, y: i32, glyph: &Glyph) {
            let _ = self.glyphs.push((x, y, glyph.width));
        }

        fn present(&mut self) -> Result<(), DisplayError> {
            self.presents += 1;
            Ok(())
        }
    }

    fn snapshot(user_volume: u8, muted: bool) -> VolumeSnapshot {
        VolumeSnapshot {
            level: 0,
            user_volume,
            muted,
        }
    }

    fn presenter() -> DisplayPresenter<RecordingSurface> {
        DisplayPresenter::new(RecordingSurface::default(), &AmpConfig::new())
    }

    #[test]
    fn test_render_volume_number() {
        let mut display = presenter();
        display.render(&snapshot(47, false), 0);

        assert_eq!(display.screen(), Screen::Volume(47));
        assert_eq!(display.surface().texts[0].as_str(), "47");
        // zwei Status-Icons
        assert_eq!(display.surface().glyphs.len(), 2);
        assert_eq!(display.surface().presents, 1);
    }

    #[test]
    fn test_command_overlay_shown_once() {
        let mut display = presenter();
        display.show_command(31, &snapshot(47, false), 0);
        assert_eq!(display.screen(), Screen::Command(31));
        assert_eq!(display.surface().texts[0].as_str(), "C31");

        display.render(&snapshot(47, false), 10);
        assert_eq!(display.screen(), Screen::Volume(47));
    }

    #[test]
    fn test_mute_has_priority_over_command() {
        let mut display = presenter();
        display.show_command(2, &snapshot(47, true), 0);
        assert_eq!(display.screen(), Screen::Muted);
        assert!(display.surface().texts.is_empty());
        assert_eq!(display.surface().glyphs.len(), 3);
    }

    #[test]
    fn test_blank_after_timeout() {
        let mut display = presenter();
        display.render(&snapshot(47, false), 0);

        assert!(!display.poll_blank(false, 10_000));
        assert!(display.poll_blank(false, 10_001));
        assert!(display.is_blanked());
        assert_eq!(display.screen(), Screen::Blank);
        assert!(!display.poll_blank(false, 20_000));

        display.render(&snapshot(47, false), 20_500);
        assert!(!display.is_blanked());
    }

    #[test]
    fn test_mute_suppresses_blanking() {
        let mut display = presenter();
        display.render(&snapshot(47, true), 0);
        assert!(!display.poll_blank(true, 60_000));
        assert!(!display.is_blanked());
    }

    #[test]
    fn test_blank_while_muted_option() {
        let config = AmpConfig::new().with_blank_while_muted(true);
        let mut display = DisplayPresenter::new(RecordingSurface::default(), &config);
        display.render(&snapshot(47, true), 0);
        assert!(display.poll_blank(true, 10_001));
    }

    #[test]
    fn test_wake_postpones_blank() {
        let mut display = presenter();
        display.render(&snapshot(47, false), 0);

        display.wake(&snapshot(47, false), 9_000);
        assert!(!display.poll_blank(false, 10_001));
        assert_eq!(display.surface().presents, 1);
    }

    #[test]
    fn test_wake_redraws_blank_display() {
        let mut display = presenter();
        display.render(&snapshot(47, false), 0);
        assert!(display.poll_blank(false, 10_001));

        display.wake(&snapshot(47, false), 12_000);
        assert!(!display.is_blanked());
        assert_eq!(display.screen(), Screen::Volume(47));
        assert_eq!(display.last_activity(), 12_000);
    }

    #[test]
    fn test_connectivity_change_detection() {
        let mut display = presenter();
        assert!(display.set_connectivity(true, false));
        assert!(!display.set_connectivity(true, false));
        assert!(display.set_connectivity(true, true));
    }
}
