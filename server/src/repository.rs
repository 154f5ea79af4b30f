use std::cmp::Ordering as CmpOrdering;
use std::str::FromStr;

use chrono::Utc;
use parking_lot::Mutex;
use taskdesk_shared::{Task, TaskId};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrderField {
    Id,
    Title,
    Description,
    CreatedAt,
    IsCompleted,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Ordering {
    pub field: OrderField,
    pub descending: bool,
}

impl Default for Ordering {
    fn default() -> Self {
        Self {
            field: OrderField::CreatedAt,
            descending: true,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOrdering;

impl FromStr for Ordering {
    type Err = InvalidOrdering;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let field = match name {
            "id" => OrderField::Id,
            "title" => OrderField::Title,
            "description" => OrderField::Description,
            "created_at" => OrderField::CreatedAt,
            "is_completed" => OrderField::IsCompleted,
            _ => return Err(InvalidOrdering),
        };
        Ok(Self { field, descending })
    }
}

impl Ordering {
    fn compare(&self, a: &Task, b: &Task) -> CmpOrdering {
        let by_field = match self.field {
            OrderField::Id => a.id.cmp(&b.id),
            OrderField::Title => a.title.cmp(&b.title),
            OrderField::Description => a.description.cmp(&b.description),
            OrderField::CreatedAt => a.created_at.cmp(&b.created_at),
            OrderField::IsCompleted => a.is_completed.cmp(&b.is_completed),
        };
        // ids break ties so equal timestamps still page deterministically
        let ordered = by_field.then_with(|| a.id.cmp(&b.id));
        if self.descending {
            ordered.reverse()
        } else {
            ordered
        }
    }
}

/// Already-validated fields of a partial update.
#[derive(Debug, Default, Clone)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    tasks: Vec<Task>,
}

/// In-memory task storage shared by every worker.
#[derive(Debug, Default)]
pub struct TaskRepository {
    inner: Mutex<Inner>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, completion: Option<bool>, ordering: Ordering) -> Vec<Task> {
        let inner = self.inner.lock();
        let mut tasks: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|t| completion.map_or(true, |c| t.is_completed == c))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| ordering.compare(a, b));
        tasks
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.inner.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn create(&self, title: String, description: String, is_completed: bool) -> Task {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let task = Task {
            id: TaskId(inner.next_id),
            title,
            description: Some(description),
            is_completed,
            created_at: Some(Utc::now()),
        };
        inner.tasks.push(task.clone());
        task
    }

    pub fn update(&self, id: TaskId, patch: TaskPatch) -> Option<Task> {
        let mut inner = self.inner.lock();
        let task = inner.tasks.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(is_completed) = patch.is_completed {
            task.is_completed = is_completed;
        }
        Some(task.clone())
    }

    pub fn delete(&self, id: TaskId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        inner.tasks.len() != before
    }

    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn seed_demo(&self) {
        let demo = [
            ("Read the project README", "Skim the setup section first.", true),
            ("Plan the week", "", false),
            ("Buy groceries", "Milk, eggs, coffee", false),
            ("Reply to the design review", "", true),
            ("Book dentist appointment", "", false),
            ("Water the plants", "", false),
            ("Write release notes", "Cover the pagination changes.", false),
        ];
        for (title, description, done) in demo {
            self.create(title.to_string(), description.to_string(), done);
        }
    }
}
