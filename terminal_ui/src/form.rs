use taskdesk_shared::{validate_title, Task, TaskId, TITLE_MAX_CHARS};

use crate::dispatch::TaskDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

/// Contents of the add/edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub editing: Option<TaskId>,
    pub title: String,
    pub description: String,
    pub focus: Field,
    pub submitting: bool,
}

impl TaskForm {
    pub fn create() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            focus: Field::Title,
            submitting: false,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            focus: Field::Title,
            submitting: false,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Add New Task"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.submitting, self.editing) {
            (true, _) => "Saving...",
            (false, Some(_)) => "Update Task",
            (false, None) => "Add Task",
        }
    }

    pub fn insert(&mut self, c: char) {
        match self.focus {
            Field::Title => {
                if self.title.chars().count() < TITLE_MAX_CHARS {
                    self.title.push(c);
                }
            }
            Field::Description => self.description.push(c),
        }
    }

    /// Only the description is multi-line.
    pub fn newline(&mut self) {
        if self.focus == Field::Description {
            self.description.push('\n');
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Title => self.title.pop(),
            Field::Description => self.description.pop(),
        };
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Field::Title => Field::Description,
            Field::Description => Field::Title,
        };
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.title.trim().is_empty()
    }

    /// The trimmed submission, or `None` while a submit is already in
    /// flight or the title is blank.
    pub fn draft(&self) -> Option<TaskDraft> {
        if self.submitting {
            return None;
        }
        let title = validate_title(&self.title).ok()?;
        Some(TaskDraft {
            editing: self.editing,
            title,
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn blank_title_produces_no_draft() {
        let mut form = TaskForm::create();
        for c in "   ".chars() {
            form.insert(c);
        }
        assert!(!form.can_submit());
        assert_eq!(form.draft(), None);
    }

    #[test]
    fn draft_is_trimmed() {
        let mut form = TaskForm::create();
        form.title = "  Pay rent ".into();
        form.description = "\n before the 5th \n".into();
        assert_eq!(
            form.draft(),
            Some(TaskDraft {
                editing: None,
                title: "Pay rent".into(),
                description: "before the 5th".into(),
            })
        );
    }

    #[test]
    fn title_input_stops_at_limit() {
        let mut form = TaskForm::create();
        for _ in 0..TITLE_MAX_CHARS + 10 {
            form.insert('x');
        }
        assert_eq!(form.title.chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn newline_only_goes_into_description() {
        let mut form = TaskForm::create();
        form.newline();
        assert!(form.title.is_empty());
        form.switch_focus();
        form.insert('a');
        form.newline();
        form.insert('b');
        assert_eq!(form.description, "a\nb");
        form.backspace();
        assert_eq!(form.description, "a\n");
    }

    #[test]
    fn edit_prefills_from_task() {
        let task = Task {
            id: TaskId(4),
            title: "Old".into(),
            description: None,
            is_completed: true,
            created_at: Some(Utc::now()),
        };
        let form = TaskForm::edit(&task);
        assert_eq!(form.heading(), "Edit Task");
        assert_eq!(form.submit_label(), "Update Task");
        assert_eq!(form.description, "");
        assert_eq!(form.draft().unwrap().editing, Some(TaskId(4)));
    }

    #[test]
    fn submitting_blocks_a_second_draft() {
        let mut form = TaskForm::create();
        form.title = "x".into();
        form.submitting = true;
        assert_eq!(form.submit_label(), "Saving...");
        assert!(form.draft().is_none());
    }
}
