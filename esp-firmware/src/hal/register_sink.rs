// Codec-Register über I2C schreiben
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use esp_core::{BusError, RegisterSink};

/// RegisterSink über einen (geteilten) I2C-Bus
///
/// Jeder Schreibzugriff ist eine Transaktion `[register, value]` an `address`.
pub struct I2cRegisterSink<I: I2c> {
    i2c: I,
}

impl<I: I2c> I2cRegisterSink<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }
}

impl<I: I2c> RegisterSink for I2cRegisterSink<I> {
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), BusError> {
        self.i2c
            .write(address, &[register, value])
            .map_err(|e| match e.kind() {
                ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
                _ => BusError::WriteFailed,
            })
    }
}
