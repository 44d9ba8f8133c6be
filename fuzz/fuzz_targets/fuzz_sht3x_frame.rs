//! Fuzz target: SHT3x frame decoding
//!
//! Serves arbitrary six-byte frames from a fake I2C bus.
//!
//! Invariants checked:
//! - No panics under any frame
//! - A frame is accepted only when both CRCs match
//! - Accepted values stay inside the sensor's rated range
//!
//! cargo fuzz run fuzz_sht3x_frame

#![no_main]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use incubator::error::SensorError;
use incubator::sensors::sht3x::{Sht3x, crc8};
use libfuzzer_sys::fuzz_target;

struct FrameBus([u8; 6]);

impl ErrorType for FrameBus {
    type Error = ErrorKind;
}

impl I2c for FrameBus {
    fn transaction(&mut self, _addr: u8, ops: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        for op in ops {
            if let Operation::Read(buf) = op {
                let n = buf.len().min(6);
                buf[..n].copy_from_slice(&self.0[..n]);
            }
        }
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fuzz_target!(|frame: [u8; 6]| {
    let crc_ok = crc8(&frame[0..2]) == frame[2] && crc8(&frame[3..5]) == frame[5];
    let mut sensor = Sht3x::new(FrameBus(frame), NoDelay);

    match sensor.read_once() {
        Ok(m) => {
            assert!(crc_ok, "frame with bad CRC accepted");
            assert!((-40.0..=125.0).contains(&m.temperature_c));
            assert!((0.0..=100.0).contains(&m.humidity_pct));
        }
        Err(SensorError::OutOfRange) => assert!(crc_ok),
        Err(_) => assert!(!crc_ok, "valid frame rejected"),
    }
});
