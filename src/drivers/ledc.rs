//! LEDC PWM channels for the light output.
//!
//! Configures one LEDC timer and three channels using raw ESP-IDF sys
//! calls, and exposes each channel as an [`embedded_hal::pwm::SetDutyCycle`]
//! so [`RgbLight`](super::rgb_light::RgbLight) can drive it.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty registers.
//! On host/test: tracks the duty in-memory only.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};

use crate::pins;

/// LEDC setup failed with the given `esp_err_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcInitError(pub i32);

impl core::fmt::Display for LedcInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "LEDC timer/channel config failed (rc={})", self.0)
    }
}

impl core::error::Error for LedcInitError {}

/// Configure the light timer and its three channels, all at duty 0.
///
/// Call once from `main()` before building the light driver.
#[cfg(target_os = "espidf")]
pub fn init_light_pwm() -> Result<[LedcChannel; 3], LedcInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::LIGHT_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: called once from main() before any channel is written.
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK {
        return Err(LedcInitError(ret));
    }

    let gpios = [pins::LIGHT_R_GPIO, pins::LIGHT_G_GPIO, pins::LIGHT_B_GPIO];
    for (&channel, &gpio) in pins::LEDC_CH_LIGHT.iter().zip(gpios.iter()) {
        let cfg = ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: gpio,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        // SAFETY: timer configured above; single-threaded init path.
        let ret = unsafe { ledc_channel_config(&cfg) };
        if ret != ESP_OK {
            return Err(LedcInitError(ret));
        }
    }

    log::info!(
        "ledc: light channels configured ({} Hz, {}-bit)",
        pins::LIGHT_PWM_FREQ_HZ,
        pins::PWM_RESOLUTION_BITS
    );
    let [r, g, b] = pins::LEDC_CH_LIGHT;
    Ok([LedcChannel::new(r), LedcChannel::new(g), LedcChannel::new(b)])
}

#[cfg(not(target_os = "espidf"))]
pub fn init_light_pwm() -> Result<[LedcChannel; 3], LedcInitError> {
    log::info!("ledc(sim): light channel init skipped");
    let [r, g, b] = pins::LEDC_CH_LIGHT;
    Ok([LedcChannel::new(r), LedcChannel::new(g), LedcChannel::new(b)])
}

/// One 8-bit LEDC channel.
#[derive(Debug)]
pub struct LedcChannel {
    channel: u32,
    duty: u16,
}

impl LedcChannel {
    fn new(channel: u32) -> Self {
        Self { channel, duty: 0 }
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    /// Last duty written.
    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl ErrorType for LedcChannel {
    type Error = ErrorKind;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        (1u16 << pins::PWM_RESOLUTION_BITS) - 1
    }

    #[cfg(target_os = "espidf")]
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        // SAFETY: channel configured in init_light_pwm(); only the UI
        // context owns the light driver.
        let ret = unsafe {
            let ret = ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, self.channel, duty as u32);
            if ret == ESP_OK {
                ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, self.channel)
            } else {
                ret
            }
        };
        if ret != ESP_OK {
            return Err(ErrorKind::Other);
        }
        self.duty = duty;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}
