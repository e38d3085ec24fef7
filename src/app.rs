use std::sync::Arc;

use crate::components::list_name_form::ListNameFormState;
use crate::config::{Config, DisplayMode};
use crate::dashboard::{Dashboard, ViewMode};
use crate::holiday::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    ListName,
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub display_mode: DisplayMode,
    pub description: Option<String>,
    pub list_scroll: usize,
    pub form_state: Option<ListNameFormState>,
    pub dashboard: Dashboard,
}

impl App {
    /// Mount the dashboard and kick off the first load.
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        let mut dashboard = Dashboard::new(&config.site_url, &config.list_name, transport);
        dashboard.start();

        Self {
            running: true,
            input_mode: InputMode::Normal,
            show_help: false,
            status_message: None,
            display_mode: config.display_mode,
            description: config.description.clone(),
            list_scroll: 0,
            form_state: None,
            dashboard,
        }
    }

    /// Pick up finished loads. Called once per frame.
    pub fn tick(&mut self) {
        if self.dashboard.poll() {
            self.clamp_scroll();
        }
    }

    pub fn select_card(&mut self) {
        if self.dashboard.state().view_mode == ViewMode::Card {
            self.list_scroll = 0;
            self.dashboard.select_card();
        }
    }

    pub fn back(&mut self) {
        self.dashboard.back();
    }

    pub fn refresh(&mut self) {
        self.dashboard.refresh();
        self.status_message = Some("Refreshing holidays...".to_string());
    }

    pub fn toggle_display_mode(&mut self) {
        self.display_mode = self.display_mode.toggle();
    }

    pub fn scroll_down(&mut self) {
        self.list_scroll += 1;
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self) {
        self.list_scroll = self.list_scroll.saturating_sub(1);
    }

    fn clamp_scroll(&mut self) {
        let max = self.dashboard.state().all_holidays.len().saturating_sub(1);
        self.list_scroll = self.list_scroll.min(max);
    }

    // ── List name form ──

    pub fn open_list_form(&mut self) {
        self.form_state = Some(ListNameFormState::new(self.dashboard.list_name()));
        self.input_mode = InputMode::ListName;
    }

    pub fn close_list_form(&mut self) {
        self.form_state = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.form_state {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.backspace();
        }
    }

    pub fn submit_list_form(&mut self) {
        let Some(form) = self.form_state.take() else {
            return;
        };
        self.input_mode = InputMode::Normal;

        if self.dashboard.set_list_name(&form.value) {
            self.list_scroll = 0;
            self.status_message = Some(format!("Loading \"{}\"", self.dashboard.list_name()));
        } else {
            self.status_message = Some("List unchanged".to_string());
        }
    }
}
