use std::time::Duration;

use tango_toolbox::{ClockReading, evaluate, format_elapsed, format_number, parse_minutes};
use tango_types::AppEvent;

use crate::context::AppContext;

const STOPWATCH_TICK: Duration = Duration::from_secs(1);

pub async fn handle_calculate(ctx: &mut AppContext, expr: &str) -> anyhow::Result<()> {
    let text = match evaluate(expr) {
        Ok(value) => format!("Result: {}", format_number(value)),
        Err(e) => {
            tracing::debug!("Rejected expression '{}': {}", expr, e);
            "Invalid input".to_string()
        }
    };
    ctx.send(AppEvent::CalcResult(text)).await
}

pub async fn handle_save_note(ctx: &mut AppContext, text: &str) -> anyhow::Result<()> {
    match ctx.notepad.save(text) {
        Ok(()) => ctx.alert("Note saved!").await,
        Err(e) => {
            tracing::error!("Failed to save note: {}", e);
            ctx.alert(format!("Could not save note: {e}")).await
        }
    }
}

pub async fn handle_show_note(ctx: &mut AppContext) -> anyhow::Result<()> {
    let text = ctx.notepad.load();
    ctx.send(AppEvent::Note(text)).await
}

pub async fn handle_add_todo(ctx: &mut AppContext, text: &str) -> anyhow::Result<()> {
    if ctx.todos.add(text).is_none() {
        tracing::debug!("Ignoring blank todo");
    }
    handle_list_todos(ctx).await
}

pub async fn handle_toggle_todo(ctx: &mut AppContext, id: &str) -> anyhow::Result<()> {
    if !ctx.todos.toggle(id) {
        return ctx.alert(format!("No todo matches '{id}'")).await;
    }
    handle_list_todos(ctx).await
}

pub async fn handle_remove_todo(ctx: &mut AppContext, id: &str) -> anyhow::Result<()> {
    if !ctx.todos.remove(id) {
        return ctx.alert(format!("No todo matches '{id}'")).await;
    }
    handle_list_todos(ctx).await
}

pub async fn handle_list_todos(ctx: &mut AppContext) -> anyhow::Result<()> {
    let items = ctx.todos.items().to_vec();
    ctx.send(AppEvent::ShowTodos(items)).await
}

pub async fn handle_stopwatch_toggle(ctx: &mut AppContext) -> anyhow::Result<()> {
    if let Some(elapsed) = ctx.stopwatch.stop() {
        return ctx
            .send(AppEvent::StopwatchStopped(format_elapsed(elapsed)))
            .await;
    }

    let tx = ctx.event_tx.clone();
    ctx.stopwatch.start(STOPWATCH_TICK, move |elapsed| {
        // Ticker callback is sync, hand the send to the runtime
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::StopwatchTick(elapsed)).await;
        });
    });
    ctx.alert("Stopwatch started").await
}

pub async fn handle_timer_start(ctx: &mut AppContext, minutes: &str) -> anyhow::Result<()> {
    let delay = match parse_minutes(minutes) {
        Ok(delay) => delay,
        Err(e) => return ctx.alert(e.to_string()).await,
    };

    let tx = ctx.event_tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(AppEvent::Alert("Time's up!".to_string())).await;
    });

    ctx.alert(format!("Timer set for {} minute(s)", minutes.trim()))
        .await
}

pub async fn handle_clock(ctx: &mut AppContext) -> anyhow::Result<()> {
    let ClockReading { date, time } = ClockReading::now();
    ctx.send(AppEvent::Clock { date, time }).await
}
