use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use taskdesk_shared::{Filter, Task, TaskId};

use crate::dispatch::{Dispatcher, Intent, Message, Mutation};
use crate::form::{Field, TaskForm};
use crate::store::{ClientState, FetchTicket, TaskStore};

/// A mutation in flight for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Updating,
    Deleting,
}

/// Everything a frame needs, borrowed from the app.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub state: &'a ClientState,
    pub modal: Option<&'a TaskForm>,
    pub selected: usize,
    pub pending: &'a HashMap<TaskId, Pending>,
}

/// Root of the client: owns the store and the transient UI state (modal,
/// selection, rows with a mutation in flight) and routes intents.
pub struct App {
    store: TaskStore,
    dispatcher: Dispatcher,
    modal: Option<TaskForm>,
    selected: usize,
    pending: HashMap<TaskId, Pending>,
    in_flight: usize,
    should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, dispatcher: Dispatcher) -> Self {
        Self {
            store,
            dispatcher,
            modal: None,
            selected: 0,
            pending: HashMap::new(),
            in_flight: 0,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &ClientState {
        self.store.state()
    }

    pub fn modal(&self) -> Option<&TaskForm> {
        self.modal.as_ref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn pending(&self, id: TaskId) -> Option<Pending> {
        self.pending.get(&id).copied()
    }

    /// Requests spawned but not yet reported back.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn view(&self) -> View<'_> {
        View {
            state: self.store.state(),
            modal: self.modal.as_ref(),
            selected: self.selected,
            pending: &self.pending,
        }
    }

    fn selected_task(&self) -> Option<&Task> {
        self.store.state().tasks.get(self.selected)
    }

    fn fetch(&mut self, ticket: FetchTicket) {
        self.in_flight += 1;
        self.dispatcher.fetch(ticket);
    }

    pub fn start(&mut self) {
        let ticket = self.store.mount();
        self.fetch(ticket);
    }

    pub fn open_create(&mut self) {
        self.modal = Some(TaskForm::create());
    }

    pub fn open_edit(&mut self, task: &Task) {
        self.modal = Some(TaskForm::edit(task));
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::ChangeFilter(filter) => {
                if let Some(ticket) = self.store.set_filter(filter) {
                    self.selected = 0;
                    self.fetch(ticket);
                }
            }
            Intent::ChangePage(page) => {
                if let Some(ticket) = self.store.set_page(page) {
                    self.selected = 0;
                    self.fetch(ticket);
                }
            }
            Intent::Retry => {
                let ticket = self.store.retry();
                self.fetch(ticket);
            }
            Intent::ToggleComplete { id, is_completed } => {
                if self.pending.contains_key(&id) {
                    return;
                }
                self.pending.insert(id, Pending::Updating);
                self.in_flight += 1;
                self.dispatcher.toggle(id, is_completed);
            }
            Intent::Delete(id) => {
                if self.pending.contains_key(&id) {
                    return;
                }
                self.pending.insert(id, Pending::Deleting);
                self.in_flight += 1;
                self.dispatcher.delete(id);
            }
            Intent::Submit(draft) => {
                if let Some(form) = self.modal.as_mut() {
                    if form.submitting {
                        return;
                    }
                    form.submitting = true;
                }
                self.in_flight += 1;
                self.dispatcher.submit(draft);
            }
        }
    }

    pub fn handle_message(&mut self, message: Message) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match message {
            Message::Fetched { ticket, result } => {
                self.store.complete_fetch(ticket, result);
                let len = self.store.state().tasks.len();
                self.selected = self.selected.min(len.saturating_sub(1));
            }
            Message::Mutated { mutation, result } => {
                if let Some(id) = mutation.task() {
                    self.pending.remove(&id);
                }
                match result {
                    Ok(()) => {
                        if mutation.from_form() && self.modal.as_ref().is_some_and(|f| f.submitting)
                        {
                            self.modal = None;
                        }
                        let ticket = match mutation {
                            Mutation::Created => self.store.task_created(),
                            Mutation::Edited(_) | Mutation::Toggled(_) => self.store.task_updated(),
                            Mutation::Deleted(_) => self.store.task_deleted(),
                        };
                        self.fetch(ticket);
                    }
                    // mutation failures never reach the banner
                    Err(err) => {
                        log::error!("error applying {mutation:?}: {err:?}");
                        if mutation.from_form() {
                            if let Some(form) = self.modal.as_mut() {
                                form.submitting = false;
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.modal.is_some() {
            self.handle_modal_key(key);
        } else {
            self.handle_list_key(key);
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let state = self.store.state();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < state.tasks.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(task) = self.selected_task() {
                    let intent = Intent::ToggleComplete {
                        id: task.id,
                        is_completed: task.is_completed,
                    };
                    self.dispatch(intent);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.dispatch(Intent::Delete(id));
                }
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task().cloned() {
                    self.open_edit(&task);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('a') => self.open_create(),
            KeyCode::Tab => {
                let next = state.filter.next();
                self.dispatch(Intent::ChangeFilter(next));
            }
            KeyCode::Char(c @ '1'..='3') => {
                let filter = Filter::ALL[(c as u8 - b'1') as usize];
                self.dispatch(Intent::ChangeFilter(filter));
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if state.has_previous_page() {
                    let page = state.current_page - 1;
                    self.dispatch(Intent::ChangePage(page));
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if state.has_next_page() {
                    let page = state.current_page + 1;
                    self.dispatch(Intent::ChangePage(page));
                }
            }
            KeyCode::Char('r') => {
                if state.error.is_some() {
                    self.dispatch(Intent::Retry);
                }
            }
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let Some(form) = self.modal.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Tab | KeyCode::BackTab => form.switch_focus(),
            KeyCode::Enter if form.focus == Field::Description => form.newline(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char('s') if ctrl => self.submit_form(),
            KeyCode::Char(c) if !ctrl => form.insert(c),
            KeyCode::Backspace => form.backspace(),
            _ => {}
        }
    }

    /// Blank titles never leave the form.
    fn submit_form(&mut self) {
        if let Some(draft) = self.modal.as_ref().and_then(TaskForm::draft) {
            self.dispatch(Intent::Submit(draft));
        }
    }
}
