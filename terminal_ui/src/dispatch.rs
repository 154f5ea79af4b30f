//! Intents and the dispatcher that turns them into gateway calls.
//!
//! Components never call the gateway themselves. They produce an [`Intent`];
//! the dispatcher spawns the request and reports back with a [`Message`] on
//! the event loop's channel, where the store is updated.

use std::sync::Arc;

use taskdesk_shared::{CreateTaskRequest, Filter, TaskId, TaskPage, UpdateTaskRequest};
use tokio::sync::mpsc::UnboundedSender;

use crate::api::TaskApi;
use crate::error::FetchError;
use crate::store::FetchTicket;

/// A validated add/edit submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub editing: Option<TaskId>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Carries the task's current flag; the request sends its negation.
    ToggleComplete { id: TaskId, is_completed: bool },
    Delete(TaskId),
    Submit(TaskDraft),
    ChangeFilter(Filter),
    ChangePage(u32),
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Edited(TaskId),
    Toggled(TaskId),
    Deleted(TaskId),
}

impl Mutation {
    pub fn task(&self) -> Option<TaskId> {
        match *self {
            Mutation::Created => None,
            Mutation::Edited(id) | Mutation::Toggled(id) | Mutation::Deleted(id) => Some(id),
        }
    }

    pub fn from_form(&self) -> bool {
        matches!(self, Mutation::Created | Mutation::Edited(_))
    }
}

#[derive(Debug)]
pub enum Message {
    Fetched {
        ticket: FetchTicket,
        result: Result<TaskPage, FetchError>,
    },
    Mutated {
        mutation: Mutation,
        result: Result<(), FetchError>,
    },
}

#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn TaskApi>,
    tx: UnboundedSender<Message>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn TaskApi>, tx: UnboundedSender<Message>) -> Self {
        Self { api, tx }
    }

    fn report(tx: &UnboundedSender<Message>, message: Message) {
        if tx.send(message).is_err() {
            log::debug!("event loop is gone, dropping response");
        }
    }

    pub fn fetch(&self, ticket: FetchTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.list_tasks(ticket.page, ticket.completion()).await;
            Self::report(&tx, Message::Fetched { ticket, result });
        });
    }

    pub fn toggle(&self, id: TaskId, is_completed: bool) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .update_task(id, UpdateTaskRequest::completion(!is_completed))
                .await
                .map(|_| ());
            Self::report(
                &tx,
                Message::Mutated {
                    mutation: Mutation::Toggled(id),
                    result,
                },
            );
        });
    }

    pub fn delete(&self, id: TaskId) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.delete_task(id).await;
            Self::report(
                &tx,
                Message::Mutated {
                    mutation: Mutation::Deleted(id),
                    result,
                },
            );
        });
    }

    pub fn submit(&self, draft: TaskDraft) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let TaskDraft {
                editing,
                title,
                description,
            } = draft;
            let (mutation, result) = match editing {
                Some(id) => (
                    Mutation::Edited(id),
                    api.update_task(id, UpdateTaskRequest::content(title, description))
                        .await
                        .map(|_| ()),
                ),
                None => (
                    Mutation::Created,
                    api.create_task(CreateTaskRequest { title, description })
                        .await
                        .map(|_| ()),
                ),
            };
            Self::report(&tx, Message::Mutated { mutation, result });
        });
    }
}
