use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::admin::{AdminManager, TaskCommand};
use crate::quiz::{SubmitRequest, TaskList};

/// Which view is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Route {
    #[default]
    Tasks,
    Admin,
}

impl Route {
    pub fn title(self) -> &'static str {
        match self {
            Route::Tasks => "Tasks",
            Route::Admin => "Admin",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Route::Tasks => Route::Admin,
            Route::Admin => Route::Tasks,
        }
    }
}

/// Backend work requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadTasks,
    SubmitAnswer(SubmitRequest),
    LoadAdminTasks,
    SaveTask(TaskCommand),
    DeleteTask(u64),
}

pub struct App {
    pub route: Route,
    pub quiz: TaskList,
    pub admin: AdminManager,
    pub api_url: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(route: Route, api_url: String) -> Self {
        Self {
            route,
            quiz: TaskList::new(),
            admin: AdminManager::new(),
            api_url,
            should_quit: false,
        }
    }

    /// Mount the current route. Each route loads its data the first time
    /// it is shown.
    pub fn mount_route(&mut self) -> Option<Effect> {
        match self.route {
            Route::Tasks => self.quiz.mount().then_some(Effect::LoadTasks),
            Route::Admin => {
                if self.admin.mount() {
                    self.admin.begin_load();
                    Some(Effect::LoadAdminTasks)
                } else {
                    None
                }
            }
        }
    }

    pub fn switch_route(&mut self) -> Option<Effect> {
        self.route = self.route.other();
        self.mount_route()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.route == Route::Admin && self.admin.form().is_some() {
            return self.handle_form_key(key);
        }

        match key.code {
            KeyCode::Tab => self.switch_route(),
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                None
            }
            _ => match self.route {
                Route::Tasks => self.handle_tasks_key(key.code),
                Route::Admin => self.handle_admin_key(key.code),
            },
        }
    }

    fn handle_tasks_key(&mut self, key: KeyCode) -> Option<Effect> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.quiz.cursor_next(),
            KeyCode::Up | KeyCode::Char('k') => self.quiz.cursor_previous(),
            KeyCode::Right | KeyCode::Char('l') => self.quiz.focus_next(),
            KeyCode::Left | KeyCode::Char('h') => self.quiz.focus_previous(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                return self.quiz.select_focused().map(Effect::SubmitAnswer);
            }
            _ => {}
        }
        None
    }

    fn handle_admin_key(&mut self, key: KeyCode) -> Option<Effect> {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.admin.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.admin.select_previous(),
            KeyCode::Char('n') => self.admin.open_create(),
            KeyCode::Char('e') | KeyCode::Enter => self.admin.open_edit_selected(),
            KeyCode::Char('d') => {
                return self.admin.request_delete_selected().map(Effect::DeleteTask);
            }
            KeyCode::Esc => self.admin.cancel_delete(),
            KeyCode::Char('r') => {
                self.admin.begin_load();
                return Some(Effect::LoadAdminTasks);
            }
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.admin.close_form(),
            KeyCode::Enter => return self.admin.begin_submit().map(Effect::SaveTask),
            _ => {
                let form = self.admin.form_mut()?;
                match key.code {
                    KeyCode::Down => form.focus_next(),
                    KeyCode::Up => form.focus_previous(),
                    KeyCode::Backspace => form.delete_char(),
                    KeyCode::Char('t') if ctrl => form.toggle_focused_correct(),
                    KeyCode::Char('n') if ctrl => form.add_option(),
                    KeyCode::Char('d') if ctrl => form.remove_focused_option(),
                    KeyCode::Char(c) if !ctrl => form.insert_char(c),
                    _ => {}
                }
            }
        }
        None
    }
}
