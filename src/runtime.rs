//! Terminal event loop and backend effect dispatch.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::admin::run_command;
use crate::api::ApiClient;
use crate::app::{App, Effect, Route};
use crate::quiz::fetch_tasks;
use crate::{terminal, ui, AppError};

/// Shared app state, locked by the UI loop and by finished backend calls.
pub type SharedApp = Arc<Mutex<App>>;

const TICK: Duration = Duration::from_millis(50);

/// Run the client until the user quits.
pub async fn run(client: ApiClient, route: Route, api_url: String) -> Result<(), AppError> {
    let app: SharedApp = Arc::new(Mutex::new(App::new(route, api_url)));

    let initial = app.lock().await.mount_route();
    if let Some(effect) = initial {
        spawn_effect(&app, &client, effect);
    }

    let result = run_tui(&app, &client).await;

    client.end_session().await;
    info!("Session ended");
    result
}

async fn run_tui(app: &SharedApp, client: &ApiClient) -> Result<(), AppError> {
    let mut term = terminal::init()?;

    let result: Result<(), AppError> = loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break Ok(());
            }
            if let Err(e) = term.draw(|frame| ui::render(frame, &app)) {
                break Err(e.into());
            }
        }

        match poll_key(app).await {
            Ok(Some(effect)) => spawn_effect(app, client, effect),
            Ok(None) => {}
            Err(e) => break Err(e),
        }
    };

    terminal::restore()?;
    result
}

async fn poll_key(app: &SharedApp) -> Result<Option<Effect>, AppError> {
    if !event::poll(TICK)? {
        return Ok(None);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            return Ok(app.lock().await.handle_key(key));
        }
    }

    Ok(None)
}

fn spawn_effect(app: &SharedApp, client: &ApiClient, effect: Effect) {
    debug!(?effect, "Dispatching");
    tokio::spawn(perform(Arc::clone(app), client.clone(), effect));
}

/// Run one effect against the backend and apply the outcome.
pub async fn perform(app: SharedApp, client: ApiClient, effect: Effect) {
    match effect {
        Effect::LoadTasks => {
            let outcome = fetch_tasks(&client).await;
            app.lock().await.quiz.finish_load(outcome);
        }
        Effect::SubmitAnswer(request) => {
            let outcome = client
                .submit_answer(request.task_id, request.option_id)
                .await;
            app.lock().await.quiz.complete(request, outcome);
        }
        Effect::LoadAdminTasks => reload_admin(&app, &client).await,
        Effect::SaveTask(command) => {
            let outcome = run_command(&client, &command).await;
            let reload = app.lock().await.admin.finish_submit(outcome);
            if reload {
                app.lock().await.admin.begin_load();
                reload_admin(&app, &client).await;
            }
        }
        Effect::DeleteTask(task_id) => {
            let outcome = client.admin_delete_task(task_id).await;
            let reload = app.lock().await.admin.finish_delete(outcome);
            if reload {
                app.lock().await.admin.begin_load();
                reload_admin(&app, &client).await;
            }
        }
    }
}

async fn reload_admin(app: &SharedApp, client: &ApiClient) {
    let outcome = client.admin_get_tasks().await;
    app.lock().await.admin.finish_load(outcome);
}
