// IR Task - Misst Flanken am TSOP-Ausgang und dekodiert Samsung32-Frames
use defmt::{debug, info, warn};
use embassy_time::Instant;
use esp_hal::gpio::Input;

use crate::IrCodeSender;
use crate::hal::Samsung32Decoder;

/// IR Receiver Task
///
/// Wartet auf jede Flanke, misst die Dauer des abgeschlossenen Pulses und
/// schickt fertige Codes an die Steuerlogik. Ist der Channel voll, wird der
/// Code verworfen (die Fernbedienung wiederholt ohnehin).
#[embassy_executor::task]
pub async fn ir_receiver_task(mut input: Input<'static>, codes: IrCodeSender) {
    info!("IR: Receiver task started");

    let mut decoder = Samsung32Decoder::new();
    let mut last_edge = Instant::now();

    loop {
        input.wait_for_any_edge().await;

        let now = Instant::now();
        let duration_us = u32::try_from(now.duration_since(last_edge).as_micros()).unwrap_or(u32::MAX);
        last_edge = now;

        // Pegel jetzt high → der gerade beendete Puls war low (Träger an)
        let mark = input.is_high();

        if let Some(code) = decoder.feed(mark, duration_us) {
            debug!("IR: Decoded code {}", code);
            if codes.try_send(code).is_err() {
                warn!("IR: Code queue full, dropping {}", code);
            }
        }
    }
}
