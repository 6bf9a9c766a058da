use serde::Serialize;

use super::domain::{ItemRecord, ListRecord};

/// Page a render outcome targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    List,
}

impl View {
    pub fn template(&self) -> &'static str {
        match self {
            View::Home => "lists/home.html",
            View::List => "lists/list.html",
        }
    }
}

/// Description of the single-field item form, enough for a template to draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemForm {
    pub field: &'static str,
    pub placeholder: String,
    pub css_class: &'static str,
}

impl ItemForm {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            field: "text",
            placeholder: placeholder.into(),
            css_class: "form-control input-lg",
        }
    }
}

/// Values handed to the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewContext {
    pub form: ItemForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListRecord>,
    /// Present exactly when `list` is, possibly empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ViewContext {
    pub fn new(form: ItemForm) -> Self {
        Self {
            form,
            list: None,
            items: None,
            error: None,
        }
    }

    pub fn with_list(mut self, list: ListRecord, items: Vec<ItemRecord>) -> Self {
        self.list = Some(list);
        self.items = Some(items);
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

/// What a workflow asks the presentation layer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Redirect(String),
    Render(View, ViewContext),
}

impl Outcome {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Outcome::Redirect(target) => Some(target),
            Outcome::Render(..) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Render(_, context) => context.error.as_deref(),
            Outcome::Redirect(_) => None,
        }
    }
}
