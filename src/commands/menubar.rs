use crate::core::{
    command_init::CommandContext,
    controller::{MenuAction, Redraw, RotationController, RotationStatus, RotationTiming},
    error::Result,
    practice::PracticeSource,
};
use colored::*;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const KEY_HINT: &str = "n next · p previous · t pause/resume · m menu · r reload · q quit";

/// Long-running rotation display driven by single-key lines on stdin.
pub async fn execute_menubar(ctx: &CommandContext) -> Result<()> {
    let source: Arc<dyn PracticeSource> = Arc::new(ctx.api()?);
    let mut controller =
        RotationController::new(ctx.store.clone(), source, &ctx.config.practice);
    let timing = RotationTiming::from(&ctx.config.practice);

    render(&controller, Redraw::Title);
    controller.initialize().await;
    if let RotationStatus::Error(failure) = controller.status() {
        log::warn!("Practice words unavailable: {}", failure.message());
    }

    let (tx, rx) = mpsc::channel(16);
    spawn_key_reader(tx.clone());
    spawn_interrupt_handler(tx);

    println!("{}", KEY_HINT.bright_black());
    controller.run(rx, timing, render).await;
    Ok(())
}

fn render(controller: &RotationController, redraw: Redraw) {
    match redraw {
        Redraw::Title => {
            let title = controller.title();
            let styled = match controller.status() {
                RotationStatus::Error(_) => title.red(),
                RotationStatus::Loading => title.bright_black(),
                RotationStatus::Ready if !controller.is_enabled() => title.yellow(),
                RotationStatus::Ready => title.white().bold(),
            };
            println!("{} {}", "言葉".cyan(), styled);
        }
        Redraw::Menu => {
            println!();
            for line in controller.menu_lines() {
                println!("  {}", line.white());
            }
            println!();
        }
    }
}

fn spawn_key_reader(tx: mpsc::Sender<MenuAction>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let Some(action) = MenuAction::from_key(&line) else {
                        println!("{}", KEY_HINT.bright_black());
                        continue;
                    };
                    if tx.send(action).await.is_err() || action == MenuAction::Quit {
                        break;
                    }
                }
                Ok(None) => {
                    log::debug!("Input closed");
                    break;
                }
                Err(e) => {
                    log::warn!("Failed to read input: {e}");
                    break;
                }
            }
        }
    });
}

fn spawn_interrupt_handler(tx: mpsc::Sender<MenuAction>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(MenuAction::Quit).await;
        }
    });
}
