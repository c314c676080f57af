//! Context menu entries.
//!
//! The grid always offers "insert draft row" and "insert draft column".
//! Hosts append their own entries (trace to source document, open voucher,
//! ...) as [`MenuExtension`]s, which receive the record of the row the menu
//! was opened on.

use std::fmt;
use std::sync::Arc;

use crate::model::Record;

pub type MenuAction = Arc<dyn Fn(Option<&Record>) + Send + Sync>;
pub type MenuEnablement = Arc<dyn Fn(Option<&Record>) -> bool + Send + Sync>;

/// Host-supplied context menu entry.
#[derive(Clone)]
pub struct MenuExtension {
    pub label: String,
    pub icon: Option<String>,
    pub action: MenuAction,
    /// Always enabled when None.
    pub enabled: Option<MenuEnablement>,
}

impl MenuExtension {
    pub fn new<F>(label: &str, action: F) -> Self
    where
        F: Fn(Option<&Record>) + Send + Sync + 'static,
    {
        Self {
            label: label.to_string(),
            icon: None,
            action: Arc::new(action),
            enabled: None,
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn enabled_when<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Record>) -> bool + Send + Sync + 'static,
    {
        self.enabled = Some(Arc::new(f));
        self
    }

    pub fn is_enabled(&self, record: Option<&Record>) -> bool {
        self.enabled.as_ref().is_none_or(|f| f(record))
    }
}

impl fmt::Debug for MenuExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuExtension")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("enabled", &self.enabled.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    InsertRow,
    InsertColumn,
    /// Index into the host's extensions.
    Extension(usize),
}

/// A resolved menu entry, ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub icon: Option<String>,
    pub enabled: bool,
    pub command: MenuCommand,
}

pub const INSERT_ROW_LABEL: &str = "Chèn dòng";
pub const INSERT_COLUMN_LABEL: &str = "Chèn cột";

/// Built-in entries followed by the extensions, resolved against `record`.
pub fn build_menu(extensions: &[MenuExtension], record: Option<&Record>) -> Vec<MenuItem> {
    let builtin = [
        (INSERT_ROW_LABEL, MenuCommand::InsertRow),
        (INSERT_COLUMN_LABEL, MenuCommand::InsertColumn),
    ]
    .into_iter()
    .map(|(label, command)| MenuItem {
        label: label.to_string(),
        icon: None,
        enabled: true,
        command,
    });

    let extra = extensions.iter().enumerate().map(|(idx, ext)| MenuItem {
        label: ext.label.clone(),
        icon: ext.icon.clone(),
        enabled: ext.is_enabled(record),
        command: MenuCommand::Extension(idx),
    });

    builtin.chain(extra).collect()
}
