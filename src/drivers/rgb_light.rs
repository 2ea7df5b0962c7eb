//! RGB light driver.
//!
//! Three PWM channels drive the panel's discrete R/G/B LEDs (or a
//! common-cathode RGB LED). Each channel is anything implementing
//! `embedded_hal::pwm::SetDutyCycle`: LEDC channels on the device, a
//! logging or recording channel on the host.

use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::warn;

use crate::app::ports::LightDriverPort;
use crate::error::LightError;
use crate::light::Rgb;

pub struct RgbLight<R, G, B> {
    red: R,
    green: G,
    blue: B,
    current: Rgb,
}

impl<R, G, B> RgbLight<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            current: (0, 0, 0),
        }
    }

    /// Last colour successfully written to all three channels.
    pub fn current_colour(&self) -> Rgb {
        self.current
    }

    /// Release the PWM channels.
    pub fn into_channels(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn write_channel(pwm: &mut impl SetDutyCycle, channel: u8, value: u8) -> Result<(), LightError> {
    pwm.set_duty_cycle_fraction(u16::from(value), 255)
        .map_err(|e| {
            warn!("rgb_light: channel {} write failed ({:?})", channel, e.kind());
            LightError::PwmWriteFailed(channel)
        })
}

impl<R, G, B> LightDriverPort for RgbLight<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LightError> {
        write_channel(&mut self.red, 0, r)?;
        write_channel(&mut self.green, 1, g)?;
        write_channel(&mut self.blue, 2, b)?;
        self.current = (r, g, b);
        Ok(())
    }
}
