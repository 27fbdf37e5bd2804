#![no_std]
#![no_main]

use defmt::*;
use defmt_rtt as _;
use panic_probe as _;

use embedded_hal::PwmPin;
use fugit::ExtU32;
use keyberon::debounce::Debouncer;
use keyberon::layout::{CustomEvent, Event, Layout};
use rtic::app;
use usb_device::bus::UsbBusAllocator;
use usb_device::class::UsbClass;
use usb_device::device::UsbDeviceState;

use rp_pico as bsp;

use bsp::hal;
use hal::timer::Alarm;
use hal::usb;

use satan_keyberon::backlight::Backlight;
use satan_keyberon::common;
use satan_keyberon::function::{self, Functions};
use satan_keyberon::keyboards::satan;
use satan_keyberon::layouts::common::CustomAction;
use satan_keyberon::layouts::wezm;
use satan_keyberon::mcu;
use satan_keyberon::report::{LayoutHost, PendingKeys};

type Keymap = Layout<{ satan::COLS }, { satan::ROWS }, { wezm::LAYER_COUNT }, CustomAction>;

#[app(device = hal::pac, dispatchers = [PIO0_IRQ_0])]
mod app {
    use super::*;

    #[shared]
    struct Shared {
        usb_dev: common::UsbDevice,
        usb_class: common::UsbClass,
        #[lock_free]
        layout: Keymap,
        #[lock_free]
        functions: Functions,
        #[lock_free]
        pending: PendingKeys,
    }

    #[local]
    struct Local {
        matrix: satan::Matrix,
        debouncer: Debouncer<[[bool; satan::COLS]; satan::ROWS]>,
        watchdog: hal::watchdog::Watchdog,
        alarm: hal::timer::Alarm0,
        backlight: Backlight,
        backlight_pwm: common::BacklightPwm,
    }

    #[init(local = [bus: Option<UsbBusAllocator<usb::UsbBus>> = None])]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        warn!("mcu setup");
        let mut resets = ctx.device.RESETS;
        let (mut watchdog, clocks) = mcu::init_clocks(
            ctx.device.WATCHDOG,
            ctx.device.XOSC,
            ctx.device.CLOCKS,
            ctx.device.PLL_SYS,
            ctx.device.PLL_USB,
            &mut resets,
        );
        let alarm = mcu::init_scan_alarm(ctx.device.TIMER, &mut resets, &clocks);

        info!("usb setup");
        *ctx.local.bus = Some(UsbBusAllocator::new(usb::UsbBus::new(
            ctx.device.USBCTRL_REGS,
            ctx.device.USBCTRL_DPRAM,
            clocks.usb_clock,
            true,
            &mut resets,
        )));
        let usb_bus = ctx.local.bus.as_ref().unwrap();
        let (usb_dev, usb_class) = mcu::init_usb(usb_bus);

        let sio = hal::sio::Sio::new(ctx.device.SIO);
        let pins = bsp::Pins::new(
            ctx.device.IO_BANK0,
            ctx.device.PADS_BANK0,
            sio.gpio_bank0,
            &mut resets,
        );

        info!("backlight setup");
        let backlight = Backlight::new(satan::BACKLIGHT_LEVELS);
        let mut backlight_pwm = mcu::init_backlight(ctx.device.PWM, &mut resets, pins.gpio16);
        backlight_pwm.set_duty(backlight.duty(backlight_pwm.get_max_duty()));

        info!("keyboard setup");
        if let Err(e) = function::check(&wezm::LAYERS) {
            warn!("layers reference a missing function: {}", e);
        }
        let layout = Layout::new(&wezm::LAYERS);
        let debouncer = Debouncer::new(
            [[false; satan::COLS]; satan::ROWS],
            [[false; satan::COLS]; satan::ROWS],
            satan::DEBOUNCE,
        );

        let matrix = satan::Matrix::new(
            satan::cols(
                pins.gpio0,
                pins.gpio1,
                pins.gpio2,
                pins.gpio3,
                pins.gpio4,
                pins.gpio5,
                pins.gpio6,
                pins.gpio7,
                pins.gpio8,
                pins.gpio9,
                pins.gpio10,
                pins.gpio11,
                pins.gpio12,
                pins.gpio13,
            ),
            satan::rows(pins.gpio18, pins.gpio19, pins.gpio20, pins.gpio21, pins.gpio22),
        )
        .unwrap();

        watchdog.start(10_000.micros());

        return (
            Shared {
                usb_dev,
                usb_class,
                layout,
                functions: Functions::new(),
                pending: PendingKeys::new(),
            },
            Local {
                matrix,
                debouncer,
                watchdog,
                alarm,
                backlight,
                backlight_pwm,
            },
            init::Monotonics(),
        );
    }

    #[task(binds = TIMER_IRQ_0, priority = 1, local = [matrix, debouncer, watchdog, alarm])]
    fn tick(ctx: tick::Context) {
        let alarm = ctx.local.alarm;
        alarm.clear_interrupt();
        let _ = alarm.schedule(mcu::TICK_US.micros());

        ctx.local.watchdog.feed();

        let keys = ctx.local.matrix.get().unwrap();
        for event in ctx.local.debouncer.events(keys) {
            if handle_event::spawn(event).is_err() {
                warn!("event queue full, dropped {}", event.coord());
            }
        }
        tick_keeb::spawn().ok();
    }

    #[task(priority = 2, capacity = 8, shared = [layout])]
    fn handle_event(ctx: handle_event::Context, event: Event) {
        ctx.shared.layout.event(event);
    }

    #[task(
        priority = 2,
        shared = [usb_dev, usb_class, layout, functions, pending],
        local = [backlight, backlight_pwm]
    )]
    fn tick_keeb(mut ctx: tick_keeb::Context) {
        let tick = ctx.shared.layout.tick();

        // function keys see the layout as it was when keyberon resolved them
        let mut host = LayoutHost::new(ctx.shared.layout, ctx.shared.pending);
        if let Err(e) = ctx
            .shared
            .functions
            .on_custom(&mut host, &wezm::LAYERS, &tick)
        {
            warn!("function key: {}", e);
        }

        if ctx.shared.usb_dev.lock(|usb_dev| usb_dev.state()) != UsbDeviceState::Configured {
            return;
        }

        match tick {
            CustomEvent::Press(CustomAction::Backlight(action)) => {
                let backlight = ctx.local.backlight;
                backlight.apply(*action);
                info!(
                    "backlight {} level {}",
                    if backlight.is_enabled() { "on" } else { "off" },
                    backlight.level()
                );
                let pwm = ctx.local.backlight_pwm;
                pwm.set_duty(backlight.duty(pwm.get_max_duty()));
            }
            CustomEvent::Press(CustomAction::Bootloader) => {
                warn!("jumping to usb bootloader");
                hal::rom_data::reset_to_usb_boot(0, 0);
            }
            _ => (),
        };

        // write HID report
        let pending = ctx.shared.pending;
        let flush = pending.take_flush();
        let report = pending.hid_report(ctx.shared.layout);
        let changed = ctx
            .shared
            .usb_class
            .lock(|usb_class| usb_class.device_mut().set_keyboard_report(report.clone()));
        if !changed && !flush {
            return;
        }
        while let Ok(0) = ctx
            .shared
            .usb_class
            .lock(|usb_class| usb_class.write(report.as_bytes()))
        {}
    }

    #[task(binds = USBCTRL_IRQ, priority = 3, shared = [usb_dev, usb_class])]
    fn usb_rx(ctx: usb_rx::Context) {
        (ctx.shared.usb_dev, ctx.shared.usb_class).lock(|usb_dev, usb_class| {
            if usb_dev.poll(&mut [usb_class]) {
                usb_class.poll();
            }
        })
    }
}
