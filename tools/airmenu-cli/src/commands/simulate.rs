//! Run a hand script in real time.
//!
//! The script is sampled by a producer task at the display frame rate and
//! its frames reach the kiosk loop through the provider channel. Ctrl+C
//! quits.

use std::path::PathBuf;

use chrono::Local;

use airmenu_common::clock::{FrameClock, RateController};
use airmenu_common::config::AppConfig;
use airmenu_screen_engine::{
    spawn_provider, DrawList, FrameInput, Kiosk, KioskCommand, ScriptedHandProvider,
};

pub async fn run(
    config: AppConfig,
    script: PathBuf,
    catalog: Option<PathBuf>,
) -> anyhow::Result<()> {
    let menu = super::load_menu(catalog.as_deref())?;
    let provider = ScriptedHandProvider::from_path(&script)?;
    let (width, height, fps) = (
        config.display.width,
        config.display.height,
        config.display.fps,
    );

    let clock = FrameClock::start();
    let mut kiosk = Kiosk::new(config, menu, Local::now());
    let mut handle = spawn_provider(provider, fps, clock.clone());
    let mut surface = DrawList::new(width, height);

    println!("Simulating {} at {fps} fps (Ctrl+C to stop)", script.display());

    let mut status = RateController::new(1);
    let mut current = kiosk.current_screen();
    loop {
        let input = tokio::select! {
            frame = handle.frames.recv() => match frame {
                Some(frame) => FrameInput::hands(frame.t, frame.hands),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                FrameInput::hands(clock.now(), Vec::new()).with_command(KioskCommand::Quit)
            }
        };

        surface.clear();
        let report = kiosk.tick(input, &mut surface);
        if report.quit {
            break;
        }
        if status.should_tick(clock.now()) {
            tracing::debug!(fps = kiosk.fps(), screen = %report.screen, "Kiosk status");
        }
        if report.screen != current {
            current = report.screen;
            println!("  {:>6.2}s  {current}", clock.now());
        }
    }

    drop(handle.frames);
    let delivered = handle.task.await??;

    println!();
    println!(
        "Frames: {} (delivered {delivered})  Measured FPS: {:.1}  Final screen: {}",
        kiosk.frames(),
        kiosk.fps(),
        kiosk.current_screen()
    );
    Ok(())
}
