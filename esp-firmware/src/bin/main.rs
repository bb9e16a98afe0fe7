// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

use core::cell::RefCell;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_verstaerker::config::{EXTRA_HEAP_SIZE, I2C_FREQUENCY_KHZ, WIFI_HEAP_SIZE};
use esp_verstaerker::tasks::{
    SharedI2c, connection_task, control_task, dhcp_task, ir_receiver_task, mqtt_task, net_task,
};
use esp_verstaerker::transport::ChannelTransport;
use esp_verstaerker::{InboundChannel, IrCodeChannel, OutboundChannel};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // I2C Bus: Codec (0x1B) und OLED (0x3C) teilen sich SDA=GPIO6 / SCL=GPIO7
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
    )
    .expect("Failed to initialize I2C")
    .with_sda(peripherals.GPIO6)
    .with_scl(peripherals.GPIO7);

    static I2C_BUS: static_cell::StaticCell<SharedI2c> = static_cell::StaticCell::new();
    let i2c_bus = &*I2C_BUS.init(RefCell::new(i2c));

    // IR-Empfänger an GPIO4 (TSOP, Ruhepegel high)
    let ir_input = Input::new(peripherals.GPIO4, InputConfig::default().with_pull(Pull::Up));

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net: MQTT-Socket + DNS + DHCP
    static RESOURCES: static_cell::StaticCell<StackResources<3>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Channels: MQTT Task ↔ Control Task, IR Task → Control Task
    static INBOUND: static_cell::StaticCell<InboundChannel> = static_cell::StaticCell::new();
    let inbound = &*INBOUND.init(InboundChannel::new());

    static OUTBOUND: static_cell::StaticCell<OutboundChannel> = static_cell::StaticCell::new();
    let outbound = &*OUTBOUND.init(OutboundChannel::new());

    static IR_CODES: static_cell::StaticCell<IrCodeChannel> = static_cell::StaticCell::new();
    let ir_codes = &*IR_CODES.init(IrCodeChannel::new());

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // Spawn MQTT Task
    spawner
        .spawn(mqtt_task(stack, outbound.receiver(), inbound.sender()))
        .unwrap();

    // Spawn IR Task
    spawner
        .spawn(ir_receiver_task(ir_input, ir_codes.sender()))
        .unwrap();

    // Spawn Control Task (Steuerlogik, Display, Codec)
    let transport = ChannelTransport::new(inbound.receiver(), outbound.sender());
    spawner
        .spawn(control_task(i2c_bus, ir_codes.receiver(), transport))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
