//! Device command builders.
//!
//! Every single-frame feature of the display is one [`Command`] variant;
//! [`Command::frame`] validates the parameters and feeds one shared
//! `(command id, fixed fields, payload)` table through the frame codec.
//! There is deliberately no per-feature type: the frames differ only in
//! their byte tables.
//!
//! Parameter ranges come from the vendor app's protocol. Fields the device
//! tolerates out-of-range (colors, coordinates) are plain `u8`s; fields it
//! chokes on (brightness below 5%, clock styles above 7) are validated here,
//! before any encoding; a frame that fails validation is never sent.
//!
//! # Example
//!
//! ```
//! use dotmatrix_client::commands::Command;
//!
//! let frame = Command::Brightness { percent: 80 }.frame().unwrap();
//! assert_eq!(&frame[..], &[0x05, 0x00, 0x04, 0x80, 0x50]);
//!
//! // Out-of-range parameters fail before anything is encoded.
//! assert!(Command::Brightness { percent: 101 }.frame().is_err());
//! ```

use bytes::Bytes;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DotmatrixError, Result};
use crate::protocol::encode_frame;

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Countdown control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CountdownAction {
    Disable = 0,
    Start = 1,
    Pause = 2,
    Restart = 3,
}

/// Chronograph (stopwatch) control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChronographAction {
    Reset = 0,
    Start = 1,
    Pause = 2,
    Resume = 3,
}

/// One single-frame device instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Freeze or unfreeze the current screen content.
    FreezeScreen,
    /// Turn the panel on or off.
    Screen { on: bool },
    /// Rotate the panel content by 180 degrees.
    FlipScreen { flipped: bool },
    /// Panel brightness, 5-100 percent.
    Brightness { percent: u8 },
    /// Global scroll speed.
    ScrollSpeed { speed: u8 },
    /// Set the device clock. The weekday is derived from the date.
    SetTime {
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    },
    /// Multi-panel joint mode.
    Joint { mode: u8 },
    /// Six-digit pairing password, 000000-999999.
    Password { pin: u32 },
    /// Clock face: style 0-7, optional date line, 12/24h, face color.
    Clock {
        style: u8,
        show_date: bool,
        hour24: bool,
        color: Rgb,
    },
    /// Show or hide the clock's time indicator.
    ClockTimeIndicator { enabled: bool },
    /// Countdown timer control.
    Countdown {
        action: CountdownAction,
        minutes: u8,
        seconds: u8,
    },
    /// Stopwatch control.
    Chronograph { action: ChronographAction },
    /// Fill the whole panel with one color.
    FullscreenColor { color: Rgb },
    /// Two-counter scoreboard; counters are clamped to 0-999.
    Scoreboard { left: u16, right: u16 },
    /// Paint one pixel in graffiti mode.
    GraffitiPixel { color: Rgb, x: u8, y: u8 },
    /// Built-in color effect: style 0-6 over a palette of 2-7 colors.
    Effect { style: u8, palette: Vec<Rgb> },
    /// Scheduled on/off window with its own brightness.
    Eco {
        enabled: bool,
        start_hour: u8,
        start_minute: u8,
        end_hour: u8,
        end_minute: u8,
        brightness: u8,
    },
    /// Microphone type for music sync.
    MicType { kind: u8 },
    /// Music-sync stick-figure rhythm value.
    ImageRhythm { value: u8 },
    /// Stop the music-sync rhythm display.
    StopRhythm,
    /// Enter (1) or leave (0) the DIY draw mode used for pixel uploads.
    DiyMode { mode: u8 },
    /// Factory-delete stored device data.
    DeleteDeviceData,
}

impl Command {
    /// Validate the parameters and encode the command frame.
    ///
    /// # Errors
    ///
    /// [`DotmatrixError::Validation`] for out-of-range parameters (nothing
    /// is encoded), [`DotmatrixError::Encoding`] if the frame cannot be
    /// encoded.
    pub fn frame(&self) -> Result<Bytes> {
        self.validate()?;
        let (command_id, fixed, payload) = self.parts();
        encode_frame(command_id, &fixed, &payload)
    }

    fn validate(&self) -> Result<()> {
        match self {
            Command::Brightness { percent } => {
                require_range("brightness percent", u32::from(*percent), 5, 100)
            }
            Command::SetTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
            } => {
                if date_of(*year, *month, *day).is_none() {
                    return Err(DotmatrixError::Validation(format!(
                        "{:04}-{:02}-{:02} is not a valid calendar date",
                        year, month, day
                    )));
                }
                require_range("hour", u32::from(*hour), 0, 23)?;
                require_range("minute", u32::from(*minute), 0, 59)?;
                require_range("second", u32::from(*second), 0, 59)
            }
            Command::Password { pin } => require_range("password", *pin, 0, 999_999),
            Command::Clock { style, .. } => require_range("clock style", u32::from(*style), 0, 7),
            Command::Countdown { seconds, .. } => {
                require_range("countdown seconds", u32::from(*seconds), 0, 59)
            }
            Command::Effect { style, palette } => {
                require_range("effect style", u32::from(*style), 0, 6)?;
                require_range("effect palette size", palette.len() as u32, 2, 7)
            }
            Command::Eco {
                start_hour,
                start_minute,
                end_hour,
                end_minute,
                ..
            } => {
                require_range("eco start hour", u32::from(*start_hour), 0, 23)?;
                require_range("eco start minute", u32::from(*start_minute), 0, 59)?;
                require_range("eco end hour", u32::from(*end_hour), 0, 23)?;
                require_range("eco end minute", u32::from(*end_minute), 0, 59)
            }
            _ => Ok(()),
        }
    }

    /// The `(command id, fixed fields, payload)` table.
    fn parts(&self) -> (u8, Vec<u8>, Vec<u8>) {
        match self {
            Command::FreezeScreen => (3, vec![0], vec![]),
            Command::Screen { on } => (7, vec![1], vec![u8::from(*on)]),
            Command::FlipScreen { flipped } => (6, vec![0x80], vec![u8::from(*flipped)]),
            Command::Brightness { percent } => (4, vec![0x80], vec![*percent]),
            Command::ScrollSpeed { speed } => (3, vec![1], vec![*speed]),
            Command::SetTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
            } => {
                // Validation guarantees the date exists.
                let weekday = date_of(*year, *month, *day)
                    .map(|date| date.weekday().number_from_monday() as u8)
                    .unwrap_or(1);
                (
                    1,
                    vec![0x80],
                    vec![
                        (*year % 100) as u8,
                        *month,
                        *day,
                        weekday,
                        *hour,
                        *minute,
                        *second,
                    ],
                )
            }
            Command::Joint { mode } => (12, vec![0x80], vec![*mode]),
            Command::Password { pin } => {
                // Three decimal digit pairs: 123456 -> 12 34 56.
                let high = (*pin / 10_000 % 100) as u8;
                let mid = (*pin / 100 % 100) as u8;
                let low = (*pin % 100) as u8;
                (4, vec![2], vec![1, high, mid, low])
            }
            Command::Clock {
                style,
                show_date,
                hour24,
                color,
            } => {
                let mut face = *style;
                if *show_date {
                    face |= 0x80;
                }
                if *hour24 {
                    face |= 0x40;
                }
                (6, vec![1], vec![face, color.r, color.g, color.b])
            }
            Command::ClockTimeIndicator { enabled } => {
                (7, vec![0x80], vec![u8::from(*enabled)])
            }
            Command::Countdown {
                action,
                minutes,
                seconds,
            } => (8, vec![0x80], vec![*action as u8, *minutes, *seconds]),
            Command::Chronograph { action } => (9, vec![0x80], vec![*action as u8]),
            Command::FullscreenColor { color } => {
                (2, vec![2], vec![color.r, color.g, color.b])
            }
            Command::Scoreboard { left, right } => {
                // On the wire the counters are least-significant byte first.
                let left = (*left).clamp(0, 999).to_le_bytes();
                let right = (*right).clamp(0, 999).to_le_bytes();
                (
                    10,
                    vec![0x80],
                    vec![left[0], left[1], right[0], right[1]],
                )
            }
            Command::GraffitiPixel { color, x, y } => {
                (5, vec![1], vec![0, color.r, color.g, color.b, *x, *y])
            }
            Command::Effect { style, palette } => {
                // The vendor app pins the byte after the style to 90.
                let mut payload = vec![*style, 90, palette.len() as u8];
                for color in palette {
                    payload.extend_from_slice(&[color.r, color.g, color.b]);
                }
                (3, vec![2], payload)
            }
            Command::Eco {
                enabled,
                start_hour,
                start_minute,
                end_hour,
                end_minute,
                brightness,
            } => (
                2,
                vec![0x80],
                vec![
                    u8::from(*enabled),
                    *start_hour,
                    *start_minute,
                    *end_hour,
                    *end_minute,
                    *brightness,
                ],
            ),
            Command::MicType { kind } => (11, vec![0x80], vec![*kind]),
            Command::ImageRhythm { value } => (0, vec![2], vec![*value, 1]),
            Command::StopRhythm => (0, vec![2], vec![0, 0]),
            Command::DiyMode { mode } => (4, vec![1], vec![*mode]),
            Command::DeleteDeviceData => (
                2,
                vec![1],
                vec![12, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            ),
        }
    }
}

/// The two-frame reset sequence.
///
/// Resetting is not a [`Command`]: it is two complete frames sent
/// back-to-back, and it can fix devices that misbehave after long uptimes.
pub fn reset_frames() -> [Bytes; 2] {
    [
        Bytes::from_static(&[0x04, 0x00, 0x03, 0x80]),
        Bytes::from_static(&[0x05, 0x00, 0x04, 0x80, 0x50]),
    ]
}

fn require_range(name: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DotmatrixError::Validation(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )))
    }
}

fn date_of(year: u16, month: u8, day: u8) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_bytes(command: Command) -> Vec<u8> {
        command.frame().unwrap().to_vec()
    }

    #[test]
    fn test_freeze_screen_vector() {
        assert_eq!(frame_bytes(Command::FreezeScreen), vec![4, 0, 3, 0]);
    }

    #[test]
    fn test_screen_on_off_vectors() {
        assert_eq!(frame_bytes(Command::Screen { on: true }), vec![5, 0, 7, 1, 1]);
        assert_eq!(frame_bytes(Command::Screen { on: false }), vec![5, 0, 7, 1, 0]);
    }

    #[test]
    fn test_flip_screen_vector() {
        assert_eq!(
            frame_bytes(Command::FlipScreen { flipped: true }),
            vec![5, 0, 6, 128, 1]
        );
    }

    #[test]
    fn test_brightness_vector_and_range() {
        assert_eq!(
            frame_bytes(Command::Brightness { percent: 100 }),
            vec![5, 0, 4, 128, 100]
        );
        assert!(Command::Brightness { percent: 4 }.frame().is_err());
        assert!(Command::Brightness { percent: 101 }.frame().is_err());
        assert!(Command::Brightness { percent: 5 }.frame().is_ok());
    }

    #[test]
    fn test_set_time_vector() {
        // 2024-03-01 is a Friday (weekday 5).
        let frame = frame_bytes(Command::SetTime {
            year: 2024,
            month: 3,
            day: 1,
            hour: 13,
            minute: 37,
            second: 42,
        });
        assert_eq!(frame, vec![11, 0, 1, 128, 24, 3, 1, 5, 13, 37, 42]);
    }

    #[test]
    fn test_set_time_rejects_impossible_date() {
        let command = Command::SetTime {
            year: 2023,
            month: 2,
            day: 29,
            hour: 0,
            minute: 0,
            second: 0,
        };
        assert!(matches!(
            command.frame().unwrap_err(),
            DotmatrixError::Validation(_)
        ));
    }

    #[test]
    fn test_password_decimal_pairs() {
        assert_eq!(
            frame_bytes(Command::Password { pin: 123_456 }),
            vec![8, 0, 4, 2, 1, 12, 34, 56]
        );
        assert!(Command::Password { pin: 1_000_000 }.frame().is_err());
    }

    #[test]
    fn test_clock_style_bits() {
        let frame = frame_bytes(Command::Clock {
            style: 3,
            show_date: true,
            hour24: true,
            color: Rgb::new(255, 255, 255),
        });
        assert_eq!(frame, vec![8, 0, 6, 1, 3 | 128 | 64, 255, 255, 255]);
        assert!(Command::Clock {
            style: 8,
            show_date: false,
            hour24: false,
            color: Rgb::new(0, 0, 0),
        }
        .frame()
        .is_err());
    }

    #[test]
    fn test_countdown_vector() {
        assert_eq!(
            frame_bytes(Command::Countdown {
                action: CountdownAction::Start,
                minutes: 5,
                seconds: 30,
            }),
            vec![7, 0, 8, 128, 1, 5, 30]
        );
        assert!(Command::Countdown {
            action: CountdownAction::Start,
            minutes: 5,
            seconds: 60,
        }
        .frame()
        .is_err());
    }

    #[test]
    fn test_chronograph_vector() {
        assert_eq!(
            frame_bytes(Command::Chronograph {
                action: ChronographAction::Pause
            }),
            vec![5, 0, 9, 128, 2]
        );
    }

    #[test]
    fn test_fullscreen_color_vector() {
        assert_eq!(
            frame_bytes(Command::FullscreenColor {
                color: Rgb::new(10, 20, 30)
            }),
            vec![7, 0, 2, 2, 10, 20, 30]
        );
    }

    #[test]
    fn test_scoreboard_low_byte_first_and_clamped() {
        assert_eq!(
            frame_bytes(Command::Scoreboard {
                left: 999,
                right: 1
            }),
            vec![8, 0, 10, 128, 0xE7, 0x03, 1, 0]
        );
        // Above 999 clamps rather than errors, matching the vendor app.
        assert_eq!(
            frame_bytes(Command::Scoreboard {
                left: 5000,
                right: 0
            }),
            vec![8, 0, 10, 128, 0xE7, 0x03, 0, 0]
        );
    }

    #[test]
    fn test_graffiti_pixel_vector() {
        assert_eq!(
            frame_bytes(Command::GraffitiPixel {
                color: Rgb::new(1, 2, 3),
                x: 4,
                y: 5,
            }),
            vec![10, 0, 5, 1, 0, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_effect_vector_and_true_length() {
        let frame = frame_bytes(Command::Effect {
            style: 2,
            palette: vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)],
        });
        // 2 len + 1 id + 1 fixed + 3 payload head + 6 palette = 13 bytes,
        // and the length field says so.
        assert_eq!(frame.len(), 13);
        assert_eq!(
            frame,
            vec![13, 0, 3, 2, 2, 90, 2, 255, 0, 0, 0, 0, 255]
        );
    }

    #[test]
    fn test_effect_ranges() {
        assert!(Command::Effect {
            style: 7,
            palette: vec![Rgb::new(0, 0, 0); 2],
        }
        .frame()
        .is_err());
        assert!(Command::Effect {
            style: 0,
            palette: vec![Rgb::new(0, 0, 0); 1],
        }
        .frame()
        .is_err());
        assert!(Command::Effect {
            style: 0,
            palette: vec![Rgb::new(0, 0, 0); 8],
        }
        .frame()
        .is_err());
    }

    #[test]
    fn test_eco_vector_and_ranges() {
        assert_eq!(
            frame_bytes(Command::Eco {
                enabled: true,
                start_hour: 22,
                start_minute: 30,
                end_hour: 7,
                end_minute: 0,
                brightness: 20,
            }),
            vec![10, 0, 2, 128, 1, 22, 30, 7, 0, 20]
        );
        assert!(Command::Eco {
            enabled: true,
            start_hour: 24,
            start_minute: 0,
            end_hour: 0,
            end_minute: 0,
            brightness: 0,
        }
        .frame()
        .is_err());
    }

    #[test]
    fn test_mic_type_length_is_consistent() {
        // The vendor app declares 6 bytes for this 5-byte frame; the codec
        // computes the real length.
        assert_eq!(frame_bytes(Command::MicType { kind: 1 }), vec![5, 0, 11, 128, 1]);
    }

    #[test]
    fn test_rhythm_vectors() {
        assert_eq!(
            frame_bytes(Command::ImageRhythm { value: 7 }),
            vec![6, 0, 0, 2, 7, 1]
        );
        assert_eq!(frame_bytes(Command::StopRhythm), vec![6, 0, 0, 2, 0, 0]);
    }

    #[test]
    fn test_diy_mode_vector() {
        assert_eq!(frame_bytes(Command::DiyMode { mode: 1 }), vec![5, 0, 4, 1, 1]);
    }

    #[test]
    fn test_delete_device_data_vector() {
        assert_eq!(
            frame_bytes(Command::DeleteDeviceData),
            vec![17, 0, 2, 1, 12, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]
        );
    }

    #[test]
    fn test_reset_sequence() {
        let [first, second] = reset_frames();
        assert_eq!(&first[..], &[0x04, 0x00, 0x03, 0x80]);
        assert_eq!(&second[..], &[0x05, 0x00, 0x04, 0x80, 0x50]);
    }

    #[test]
    fn test_every_frame_length_counts_itself() {
        let commands = vec![
            Command::FreezeScreen,
            Command::Screen { on: true },
            Command::Brightness { percent: 50 },
            Command::Countdown {
                action: CountdownAction::Disable,
                minutes: 0,
                seconds: 0,
            },
            Command::Effect {
                style: 0,
                palette: vec![Rgb::new(1, 2, 3); 7],
            },
            Command::DeleteDeviceData,
        ];
        for command in commands {
            let frame = command.frame().unwrap();
            let declared = u16::from_le_bytes([frame[0], frame[1]]);
            assert_eq!(usize::from(declared), frame.len(), "{:?}", command);
        }
    }
}
