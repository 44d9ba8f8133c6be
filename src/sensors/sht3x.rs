//! Sensirion SHT3x temperature / humidity sensor over I2C.
//!
//! Single-shot, high-repeatability measurement with clock stretching
//! disabled: write the command, wait for the conversion, read six bytes
//! (`T_msb T_lsb T_crc RH_msb RH_lsb RH_crc`).  Each word carries a CRC-8
//! (poly 0x31, init 0xFF).
//!
//! ## Dual-target design
//!
//! The driver is generic over the `embedded-hal` 1.0 [`I2c`] and
//! [`DelayNs`] traits.  On ESP-IDF it is built on `I2cDriver` and
//! `Delay`; host tests substitute scripted mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::warn;

use super::{Hygrometer, Measurement, TEMPERATURE_RANGE_C, in_range};
use crate::error::SensorError;

/// ADDR pin low.
pub const DEFAULT_ADDRESS: u8 = 0x44;
/// ADDR pin high.
pub const ALT_ADDRESS: u8 = 0x45;

const CMD_SINGLE_SHOT_HIGH: [u8; 2] = [0x24, 0x00];
const CMD_SOFT_RESET: [u8; 2] = [0x30, 0xA2];
/// Max conversion time for high repeatability is 15.5 ms.
const MEASUREMENT_DELAY_MS: u32 = 16;
const RESET_DELAY_MS: u32 = 2;

pub struct Sht3x<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Sht3x<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self { i2c, delay, address }
    }

    /// Soft reset; used once at boot.
    pub fn reset(&mut self) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &CMD_SOFT_RESET)
            .map_err(|_| SensorError::Bus)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    /// Take one blocking single-shot measurement (~16 ms).
    pub fn read_once(&mut self) -> Result<Measurement, SensorError> {
        self.i2c
            .write(self.address, &CMD_SINGLE_SHOT_HIGH)
            .map_err(|_| SensorError::Bus)?;
        self.delay.delay_ms(MEASUREMENT_DELAY_MS);

        let mut buf = [0u8; 6];
        self.i2c
            .read(self.address, &mut buf)
            .map_err(|_| SensorError::Bus)?;

        let t_raw = checked_word(&buf[0..3])?;
        let rh_raw = checked_word(&buf[3..6])?;

        let temperature_c = raw_to_celsius(t_raw);
        // The transfer function spans -45..130 °C; the part is rated -40..125.
        if !in_range(temperature_c, TEMPERATURE_RANGE_C) {
            return Err(SensorError::OutOfRange);
        }
        Ok(Measurement {
            temperature_c,
            humidity_pct: raw_to_humidity(rh_raw),
        })
    }

    /// Give the bus and delay back.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C: I2c, D: DelayNs> Hygrometer for Sht3x<I2C, D> {
    fn measure(&mut self) -> Result<Measurement, SensorError> {
        self.read_once().inspect_err(|e| warn!("SHT3x: {}", e))
    }
}

fn checked_word(chunk: &[u8]) -> Result<u16, SensorError> {
    if crc8(&chunk[..2]) != chunk[2] {
        return Err(SensorError::Crc);
    }
    Ok(u16::from_be_bytes([chunk[0], chunk[1]]))
}

/// CRC-8, polynomial 0x31, init 0xFF, no reflection, no final XOR.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xFF;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn raw_to_celsius(raw: u16) -> f32 {
    -45.0 + 175.0 * f32::from(raw) / 65_535.0
}

fn raw_to_humidity(raw: u16) -> f32 {
    100.0 * f32::from(raw) / 65_535.0
}
