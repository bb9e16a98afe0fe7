// Control Task - Treibt die Steuerlogik aus esp-core
use core::cell::RefCell;

use defmt::info;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use esp_core::{
    AmpController, DisplaySurface, IrCodeMap, IrSource, NetworkTransport, Peripherals,
    RegisterSink,
};
use esp_hal::Blocking;
use esp_hal::i2c::master::I2c;

use crate::IrCodeReceiver;
use crate::config::{
    AMP_CONFIG, SPLASH_DURATION_MS, SPLASH_SUBTITLE, SPLASH_TITLE, TICK_INTERVAL_MS, TOPICS,
};
use crate::hal::{ChannelIrSource, I2cRegisterSink, OledSurface};
use crate::transport::ChannelTransport;

/// Geteilter I2C-Bus (Codec + OLED)
pub type SharedI2c = RefCell<I2c<'static, Blocking>>;

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Control Logic - hardware-unabhängige Haupt-Schleife
///
/// Zeigt den Splash-Screen, initialisiert Verstärker und Display und ruft dann
/// in festem Takt `tick()` auf. Alle Collaborators kommen über Traits rein.
pub async fn control_logic<S, D, N, I>(peripherals: Peripherals<S, D, N, I>) -> !
where
    S: RegisterSink,
    D: DisplaySurface,
    N: NetworkTransport,
    I: IrSource,
{
    let mut controller = AmpController::new(
        peripherals,
        AMP_CONFIG,
        IrCodeMap::samsung(),
        TOPICS,
        now_ms(),
    );

    controller.show_splash(SPLASH_TITLE, SPLASH_SUBTITLE, now_ms());
    Timer::after(Duration::from_millis(SPLASH_DURATION_MS)).await;

    controller.start(now_ms());
    info!(
        "Control: Started, volume {} (register {})",
        controller.volume().user_volume(),
        controller.volume().register_value()
    );

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    loop {
        controller.tick(now_ms());
        ticker.next().await;
    }
}

/// Control Task - Embassy Wrapper für control_logic
///
/// Baut die Hardware-Collaborators auf und übergibt an die Logik.
#[embassy_executor::task]
pub async fn control_task(
    i2c: &'static SharedI2c,
    ir_codes: IrCodeReceiver,
    transport: ChannelTransport,
) {
    let mut display = OledSurface::new(RefCellDevice::new(i2c));
    display.init();

    let peripherals = Peripherals {
        sink: I2cRegisterSink::new(RefCellDevice::new(i2c)),
        display,
        transport,
        ir: ChannelIrSource::new(ir_codes),
    };

    control_logic(peripherals).await
}
